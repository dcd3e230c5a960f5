//! Expertise entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::locale::Locale;
use folio_core::types::{DbId, Timestamp};

/// An expertise row from the `expertise` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expertise {
    pub id: DbId,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale text fields for an expertise entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpertiseText {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// A translation row joined with its language code.
#[derive(Debug, Clone, FromRow)]
pub struct ExpertiseTranslationRow {
    pub expertise_id: DbId,
    pub language_code: String,
    pub title: String,
    pub description: String,
}

/// DTO for creating a new expertise entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExpertise {
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    pub translations: BTreeMap<Locale, ExpertiseText>,
}

/// DTO for updating an expertise entry.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExpertise {
    pub icon: Option<String>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub translations: BTreeMap<Locale, ExpertiseText>,
}
