//! Handlers for the singleton `/profile` resource.

use std::collections::BTreeMap;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_core::uploads::UploadKind;
use folio_db::models::profile::{Profile, ProfileText, UpsertProfile};
use folio_db::repositories::ProfileRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::{default_locale, ensure_languages_configured, read_file_field, LangQuery};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::uploads;

/// The profile with its translations.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    #[serde(flatten)]
    pub profile: Profile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_path: Option<String>,
    pub translations: BTreeMap<Locale, ProfileText>,
}

async fn view_of(
    state: &State<AppState>,
    profile: Profile,
    lang: Option<Locale>,
) -> AppResult<ProfileView> {
    let default = default_locale(state).await?;
    let rows = ProfileRepo::translations(&state.pool, profile.id).await?;

    let translations: BTreeMap<Locale, ProfileText> = rows
        .into_iter()
        .filter_map(|row| {
            let locale: Locale = row.language_code.parse().ok()?;
            Some((
                locale,
                ProfileText {
                    headline: row.headline,
                    bio: row.bio,
                    cv_path: row.cv_path,
                },
            ))
        })
        .collect();

    let resolved = lang.and_then(|l| translations.get(&l).or_else(|| translations.get(&default)));
    let (headline, bio, cv_path) = match resolved {
        Some(text) => (
            Some(text.headline.clone()),
            Some(text.bio.clone()),
            text.cv_path.clone(),
        ),
        None => (None, None, None),
    };

    Ok(ProfileView {
        profile,
        headline,
        bio,
        cv_path,
        translations,
    })
}

/// Load the profile or fail with 404. The id is irrelevant to clients, so
/// the NotFound carries 0.
async fn require_profile(state: &State<AppState>) -> AppResult<Profile> {
    ProfileRepo::get(&state.pool)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Profile",
            id: 0,
        }))
}

/// GET /api/v1/profile
pub async fn get(
    state: State<AppState>,
    Query(query): Query<LangQuery>,
) -> AppResult<Json<ProfileView>> {
    let profile = require_profile(&state).await?;
    Ok(Json(view_of(&state, profile, query.lang).await?))
}

/// PUT /api/v1/profile
///
/// Create-or-update: the first PUT creates the row.
pub async fn upsert(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Json(input): Json<UpsertProfile>,
) -> AppResult<Json<ProfileView>> {
    if let Some(email) = &input.email {
        if !validator::ValidateEmail::validate_email(&email.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "'{email}' is not a valid email address"
            ))));
        }
    }

    ensure_languages_configured(&state, &input.translations).await?;
    let profile = ProfileRepo::upsert(&state.pool, &input).await?;
    Ok(Json(view_of(&state, profile, None).await?))
}

/// POST /api/v1/profile/photo
///
/// Multipart `file` field. Replaces the photo and unlinks the old one.
pub async fn upload_photo(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ProfileView>> {
    let profile = require_profile(&state).await?;
    let (filename, data) = read_file_field(multipart).await?;

    let relative = uploads::save(
        &state.config.upload_dir,
        UploadKind::Image,
        &filename,
        &data,
    )
    .await?;

    let previous = match ProfileRepo::set_photo(&state.pool, profile.id, &relative).await {
        Ok(previous) => previous,
        Err(e) => {
            // The new file must not be left behind on a failed write.
            uploads::discard(&state.config.upload_dir, &relative).await;
            return Err(e.into());
        }
    };
    if let Some(previous) = previous {
        uploads::discard(&state.config.upload_dir, &previous).await;
    }

    let profile = require_profile(&state).await?;
    Ok(Json(view_of(&state, profile, None).await?))
}

/// POST /api/v1/profile/cv/{locale}
///
/// Multipart `file` field (PDF). Stores the CV on the translation row for
/// the given locale; 404 when that translation does not exist yet.
pub async fn upload_cv(
    RequireAdmin(_admin): RequireAdmin,
    state: State<AppState>,
    Path(locale): Path<Locale>,
    multipart: Multipart,
) -> AppResult<StatusCode> {
    let profile = require_profile(&state).await?;
    let (filename, data) = read_file_field(multipart).await?;

    let relative = uploads::save(
        &state.config.upload_dir,
        UploadKind::Document,
        &filename,
        &data,
    )
    .await?;

    let previous = match ProfileRepo::set_cv(&state.pool, profile.id, locale, &relative).await {
        Ok(previous) => previous,
        Err(e) => {
            // Covers the missing-translation 404 as well as real failures.
            uploads::discard(&state.config.upload_dir, &relative).await;
            return Err(e.into());
        }
    };
    if let Some(previous) = previous {
        uploads::discard(&state.config.upload_dir, &previous).await;
    }

    tracing::info!(locale = %locale, path = %relative, "CV uploaded");
    Ok(StatusCode::NO_CONTENT)
}
