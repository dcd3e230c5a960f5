//! Handlers for the `/projects` resource.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_core::types::DbId;
use folio_core::uploads::UploadKind;
use folio_db::models::project::{
    CreateProject, Project, ProjectText, ProjectTranslationRow, UpdateProject,
};
use folio_db::repositories::{ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::{default_locale, ensure_languages_configured, read_file_field};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::uploads;

/// A project with its translations, as returned by read endpoints.
///
/// When a `lang` query parameter is given, the resolved locale's text
/// fields are additionally flattened to the top level, falling back to
/// the default language when that locale has no translation.
#[derive(Debug, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub translations: BTreeMap<Locale, ProjectText>,
}

/// Query parameters for project list/read endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProjectQuery {
    pub lang: Option<Locale>,
    /// `true` restricts the listing to published projects (public site).
    pub published: Option<bool>,
}

/// Group translation rows into a locale-keyed map.
fn translation_map(rows: Vec<ProjectTranslationRow>) -> BTreeMap<Locale, ProjectText> {
    rows.into_iter()
        .filter_map(|row| {
            let locale: Locale = row.language_code.parse().ok()?;
            Some((
                locale,
                ProjectText {
                    title: row.title,
                    summary: row.summary,
                    body: row.body,
                },
            ))
        })
        .collect()
}

/// Shape a project and its translations into the response form.
fn build_view(
    project: Project,
    translations: BTreeMap<Locale, ProjectText>,
    lang: Option<Locale>,
    default: Locale,
) -> ProjectView {
    let resolved = lang.and_then(|l| translations.get(&l).or_else(|| translations.get(&default)));
    let (title, summary, body) = match resolved {
        Some(text) => (
            Some(text.title.clone()),
            Some(text.summary.clone()),
            Some(text.body.clone()),
        ),
        None => (None, None, None),
    };
    ProjectView {
        project,
        title,
        summary,
        body,
        translations,
    }
}

/// Fetch one project's translations and shape the response.
async fn view_of(
    state: &State<AppState>,
    project: Project,
    lang: Option<Locale>,
) -> AppResult<ProjectView> {
    let default = default_locale(state).await?;
    let rows = ProjectRepo::translations(&state.pool, project.id).await?;
    Ok(build_view(project, translation_map(rows), lang, default))
}

/// GET /api/v1/projects
pub async fn list(
    state: State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<Vec<ProjectView>>> {
    let projects = ProjectRepo::list(&state.pool, query.published.unwrap_or(false)).await?;
    let default = default_locale(&state).await?;

    let ids: Vec<DbId> = projects.iter().map(|p| p.id).collect();
    let mut by_project: BTreeMap<DbId, Vec<ProjectTranslationRow>> = BTreeMap::new();
    for row in ProjectRepo::translations_for_many(&state.pool, &ids).await? {
        by_project.entry(row.project_id).or_default().push(row);
    }

    let views = projects
        .into_iter()
        .map(|project| {
            let rows = by_project.remove(&project.id).unwrap_or_default();
            build_view(project, translation_map(rows), query.lang, default)
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    state: State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<ProjectView>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(view_of(&state, project, query.lang).await?))
}

/// GET /api/v1/projects/slug/{slug}
pub async fn get_by_slug(
    state: State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ProjectQuery>,
) -> AppResult<Json<ProjectView>> {
    let project = ProjectRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "Project",
                slug: slug.clone(),
            })
        })?;
    Ok(Json(view_of(&state, project, query.lang).await?))
}

/// POST /api/v1/projects
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Json(input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<ProjectView>)> {
    if input.slug.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Slug must not be empty".into(),
        )));
    }
    if input.translations.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one translation is required".into(),
        )));
    }
    ensure_languages_configured(&state, &input.translations).await?;

    let project = ProjectRepo::create(&state.pool, &input).await?;
    tracing::info!(project_id = project.id, slug = %project.slug, "Project created");

    let view = view_of(&state, project, None).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<ProjectView>> {
    ensure_languages_configured(&state, &input.translations).await?;
    let project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;
    Ok(Json(view_of(&state, project, None).await?))
}

/// POST /api/v1/projects/{id}/cover
///
/// Multipart `file` field. Replaces the cover image and unlinks the old
/// one.
pub async fn upload_cover(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ProjectView>> {
    let previous = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?
        .cover_image_path;

    let (filename, data) = read_file_field(multipart).await?;
    let relative = uploads::save(
        &state.config.upload_dir,
        UploadKind::Image,
        &filename,
        &data,
    )
    .await?;

    // On any failure past this point the new file must not be left behind.
    let project = match ProjectRepo::set_cover_image(&state.pool, id, Some(&relative)).await {
        Ok(Some(project)) => project,
        Ok(None) => {
            uploads::discard(&state.config.upload_dir, &relative).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Project",
                id,
            }));
        }
        Err(e) => {
            uploads::discard(&state.config.upload_dir, &relative).await;
            return Err(e.into());
        }
    };

    if let Some(previous) = previous {
        uploads::discard(&state.config.upload_dir, &previous).await;
    }

    Ok(Json(view_of(&state, project, None).await?))
}

/// DELETE /api/v1/projects/{id}
///
/// Translation and image rows cascade; uploaded files are unlinked after
/// the row is gone. A file that fails to unlink is logged, not fatal.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let images = ProjectImageRepo::list_by_project(&state.pool, id).await?;

    ProjectRepo::delete(&state.pool, id).await?;
    tracing::info!(project_id = id, slug = %project.slug, "Project deleted");

    let mut paths: Vec<String> = images.into_iter().map(|i| i.file_path).collect();
    if let Some(cover) = project.cover_image_path {
        paths.push(cover);
    }
    for path in paths {
        uploads::discard(&state.config.upload_dir, &path).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
