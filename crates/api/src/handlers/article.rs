//! Handlers for the `/articles` resource.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_core::types::DbId;
use folio_core::uploads::UploadKind;
use folio_db::models::article::{
    Article, ArticleText, ArticleTranslationRow, CreateArticle, UpdateArticle,
};
use folio_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{default_locale, ensure_languages_configured, read_file_field};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::uploads;

/// An article with its translations; same shaping rules as projects.
#[derive(Debug, Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub translations: BTreeMap<Locale, ArticleText>,
}

/// Query parameters for article list/read endpoints.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArticleQuery {
    pub lang: Option<Locale>,
    pub published: Option<bool>,
}

fn translation_map(rows: Vec<ArticleTranslationRow>) -> BTreeMap<Locale, ArticleText> {
    rows.into_iter()
        .filter_map(|row| {
            let locale: Locale = row.language_code.parse().ok()?;
            Some((
                locale,
                ArticleText {
                    title: row.title,
                    summary: row.summary,
                    body: row.body,
                },
            ))
        })
        .collect()
}

fn build_view(
    article: Article,
    translations: BTreeMap<Locale, ArticleText>,
    lang: Option<Locale>,
    default: Locale,
) -> ArticleView {
    let resolved = lang.and_then(|l| translations.get(&l).or_else(|| translations.get(&default)));
    let (title, summary, body) = match resolved {
        Some(text) => (
            Some(text.title.clone()),
            Some(text.summary.clone()),
            Some(text.body.clone()),
        ),
        None => (None, None, None),
    };
    ArticleView {
        article,
        title,
        summary,
        body,
        translations,
    }
}

async fn view_of(
    state: &State<AppState>,
    article: Article,
    lang: Option<Locale>,
) -> AppResult<ArticleView> {
    let default = default_locale(state).await?;
    let rows = ArticleRepo::translations(&state.pool, article.id).await?;
    Ok(build_view(article, translation_map(rows), lang, default))
}

/// GET /api/v1/articles
pub async fn list(
    state: State<AppState>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<Vec<ArticleView>>> {
    let articles = ArticleRepo::list(&state.pool, query.published.unwrap_or(false)).await?;
    let default = default_locale(&state).await?;

    let ids: Vec<DbId> = articles.iter().map(|a| a.id).collect();
    let mut by_article: BTreeMap<DbId, Vec<ArticleTranslationRow>> = BTreeMap::new();
    for row in ArticleRepo::translations_for_many(&state.pool, &ids).await? {
        by_article.entry(row.article_id).or_default().push(row);
    }

    let views = articles
        .into_iter()
        .map(|article| {
            let rows = by_article.remove(&article.id).unwrap_or_default();
            build_view(article, translation_map(rows), query.lang, default)
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/v1/articles/{id}
pub async fn get_by_id(
    state: State<AppState>,
    Path(id): Path<DbId>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<ArticleView>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;
    Ok(Json(view_of(&state, article, query.lang).await?))
}

/// GET /api/v1/articles/slug/{slug}
pub async fn get_by_slug(
    state: State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> AppResult<Json<ArticleView>> {
    let article = ArticleRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundBySlug {
                entity: "Article",
                slug: slug.clone(),
            })
        })?;
    Ok(Json(view_of(&state, article, query.lang).await?))
}

/// POST /api/v1/articles
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Json(input): Json<CreateArticle>,
) -> AppResult<(StatusCode, Json<ArticleView>)> {
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

    let article = ArticleRepo::create(&state.pool, &input).await?;
    tracing::info!(article_id = article.id, slug = %article.slug, "Article created");

    let view = view_of(&state, article, None).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/articles/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticle>,
) -> AppResult<Json<ArticleView>> {
    ensure_languages_configured(&state, &input.translations).await?;
    let article = ArticleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;
    Ok(Json(view_of(&state, article, None).await?))
}

/// POST /api/v1/articles/{id}/cover
///
/// Multipart `file` field. Replaces the cover image and unlinks the old
/// one.
pub async fn upload_cover(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Json<ArticleView>> {
    let previous = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
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
    let article = match ArticleRepo::set_cover_image(&state.pool, id, Some(&relative)).await {
        Ok(Some(article)) => article,
        Ok(None) => {
            uploads::discard(&state.config.upload_dir, &relative).await;
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Article",
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

    Ok(Json(view_of(&state, article, None).await?))
}

/// DELETE /api/v1/articles/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    ArticleRepo::delete(&state.pool, id).await?;
    tracing::info!(article_id = id, slug = %article.slug, "Article deleted");

    if let Some(cover) = article.cover_image_path {
        uploads::discard(&state.config.upload_dir, &cover).await;
    }

    Ok(StatusCode::NO_CONTENT)
}
