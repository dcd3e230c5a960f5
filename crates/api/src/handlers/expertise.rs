//! Handlers for the `/expertise` resource.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_core::types::DbId;
use folio_db::models::expertise::{
    CreateExpertise, Expertise, ExpertiseText, ExpertiseTranslationRow, UpdateExpertise,
};
use folio_db::repositories::ExpertiseRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{default_locale, ensure_languages_configured, LangQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// An expertise entry with its translations.
#[derive(Debug, Serialize)]
pub struct ExpertiseView {
    #[serde(flatten)]
    pub expertise: Expertise,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub translations: BTreeMap<Locale, ExpertiseText>,
}

fn translation_map(rows: Vec<ExpertiseTranslationRow>) -> BTreeMap<Locale, ExpertiseText> {
    rows.into_iter()
        .filter_map(|row| {
            let locale: Locale = row.language_code.parse().ok()?;
            Some((
                locale,
                ExpertiseText {
                    title: row.title,
                    description: row.description,
                },
            ))
        })
        .collect()
}

fn build_view(
    expertise: Expertise,
    translations: BTreeMap<Locale, ExpertiseText>,
    lang: Option<Locale>,
    default: Locale,
) -> ExpertiseView {
    let resolved = lang.and_then(|l| translations.get(&l).or_else(|| translations.get(&default)));
    let (title, description) = match resolved {
        Some(text) => (Some(text.title.clone()), Some(text.description.clone())),
        None => (None, None),
    };
    ExpertiseView {
        expertise,
        title,
        description,
        translations,
    }
}

async fn view_of(
    state: &State<AppState>,
    expertise: Expertise,
    lang: Option<Locale>,
) -> AppResult<ExpertiseView> {
    let default = default_locale(state).await?;
    let rows = ExpertiseRepo::translations(&state.pool, expertise.id).await?;
    Ok(build_view(expertise, translation_map(rows), lang, default))
}

/// GET /api/v1/expertise
///
/// Ascending by `sort_order`.
pub async fn list(
    state: State<AppState>,
    Query(query): Query<LangQuery>,
) -> AppResult<Json<Vec<ExpertiseView>>> {
    let entries = ExpertiseRepo::list(&state.pool).await?;
    let default = default_locale(&state).await?;

    let ids: Vec<DbId> = entries.iter().map(|e| e.id).collect();
    let mut by_entry: BTreeMap<DbId, Vec<ExpertiseTranslationRow>> = BTreeMap::new();
    for row in ExpertiseRepo::translations_for_many(&state.pool, &ids).await? {
        by_entry.entry(row.expertise_id).or_default().push(row);
    }

    let views = entries
        .into_iter()
        .map(|entry| {
            let rows = by_entry.remove(&entry.id).unwrap_or_default();
            build_view(entry, translation_map(rows), query.lang, default)
        })
        .collect();
    Ok(Json(views))
}

/// POST /api/v1/expertise
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Json(input): Json<CreateExpertise>,
) -> AppResult<(StatusCode, Json<ExpertiseView>)> {
    if input.translations.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one translation is required".into(),
        )));
    }
    ensure_languages_configured(&state, &input.translations).await?;

    let expertise = ExpertiseRepo::create(&state.pool, &input).await?;
    let view = view_of(&state, expertise, None).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// PUT /api/v1/expertise/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateExpertise>,
) -> AppResult<Json<ExpertiseView>> {
    ensure_languages_configured(&state, &input.translations).await?;
    let expertise = ExpertiseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Expertise",
            id,
        }))?;
    Ok(Json(view_of(&state, expertise, None).await?))
}

/// DELETE /api/v1/expertise/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ExpertiseRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Expertise",
            id,
        }))
    }
}
