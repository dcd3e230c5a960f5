//! Owner profile (singleton) model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::locale::Locale;
use folio_core::types::{DbId, Timestamp};

/// The profile row from the `profile` table. At most one row exists.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub photo_path: Option<String>,
    pub email: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale text fields for the profile. The CV path rides along here
/// because the CV document itself is language-specific.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileText {
    pub headline: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub cv_path: Option<String>,
}

/// A translation row joined with its language code.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileTranslationRow {
    pub profile_id: DbId,
    pub language_code: String,
    pub headline: String,
    pub bio: String,
    pub cv_path: Option<String>,
}

/// DTO for the create-or-update PUT on `/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfile {
    pub email: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub translations: BTreeMap<Locale, ProfileText>,
}
