//! HTTP handlers, one module per resource.

pub mod article;
pub mod auth;
pub mod contact;
pub mod expertise;
pub mod language;
pub mod profile;
pub mod project;
pub mod project_image;

use std::collections::BTreeMap;

use axum::extract::{Multipart, State};
use serde::Deserialize;

use folio_core::error::CoreError;
use folio_core::locale::Locale;
use folio_db::repositories::LanguageRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters shared by all translatable read endpoints.
///
/// An unsupported `lang` code fails `Locale` deserialization, which axum
/// turns into a 400 before the handler runs.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<Locale>,
}

/// Resolve the default locale from the `languages` table, falling back to
/// English when the table holds no default (should not happen; the seed
/// guarantees one).
pub(crate) async fn default_locale(state: &State<AppState>) -> AppResult<Locale> {
    let default = LanguageRepo::default_language(&state.pool).await?;
    Ok(default
        .and_then(|l| l.code.parse().ok())
        .unwrap_or(Locale::En))
}

/// Reject translation maps that name a locale with no `languages` row.
/// The row may have been removed through `DELETE /languages/{id}`; the
/// repositories roll the write back in that case, this check turns it
/// into a clear 400 up front.
pub(crate) async fn ensure_languages_configured<T>(
    state: &State<AppState>,
    translations: &BTreeMap<Locale, T>,
) -> AppResult<()> {
    for locale in translations.keys() {
        if LanguageRepo::find_by_code(&state.pool, locale.as_str())
            .await?
            .is_none()
        {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Language '{locale}' is not configured"
            ))));
        }
    }
    Ok(())
}

/// Pull the `file` field out of a multipart body.
pub(crate) async fn read_file_field(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field.bytes().await?;
            return Ok((filename, data.to_vec()));
        }
    }
    Err(AppError::BadRequest("Missing 'file' field".into()))
}
