//! Handlers for the `/languages` resource.
//!
//! Guards the two destructive edge cases: the default language and the
//! last remaining language cannot be deleted.

use std::str::FromStr;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_core::types::DbId;
use folio_db::models::language::{CreateLanguage, Language, UpdateLanguage};
use folio_db::repositories::LanguageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/languages
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Language>>> {
    let languages = LanguageRepo::list(&state.pool).await?;
    Ok(Json(languages))
}

/// POST /api/v1/languages
///
/// The code must belong to the supported locale set.
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLanguage>,
) -> AppResult<(StatusCode, Json<Language>)> {
    Locale::from_str(&input.code).map_err(AppError::Core)?;
    let language = LanguageRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(language)))
}

/// PUT /api/v1/languages/{id}
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLanguage>,
) -> AppResult<Json<Language>> {
    let language = LanguageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Language",
            id,
        }))?;
    Ok(Json(language))
}

/// POST /api/v1/languages/{id}/default
///
/// Make this language the single default.
pub async fn set_default(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Language>> {
    let language = LanguageRepo::set_default(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Language",
            id,
        }))?;
    tracing::info!(language_id = id, code = %language.code, "Default language changed");
    Ok(Json(language))
}

/// DELETE /api/v1/languages/{id}
///
/// Rejected with 400 when the language is the default or the last one
/// remaining; its translation rows cascade on success.
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let language = LanguageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Language",
            id,
        }))?;

    if language.is_default {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete the default language".into(),
        )));
    }
    if LanguageRepo::count(&state.pool).await? <= 1 {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot delete the last remaining language".into(),
        )));
    }

    LanguageRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
