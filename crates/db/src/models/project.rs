//! Project entity model, gallery images, and DTOs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::locale::Locale;
use folio_core::types::{DbId, Timestamp};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub slug: String,
    pub cover_image_path: Option<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub is_published: bool,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale text fields for a project. Used both as translation input
/// and as the values of the `translations` map in responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectText {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
}

/// A translation row joined with its language code.
#[derive(Debug, Clone, FromRow)]
pub struct ProjectTranslationRow {
    pub project_id: DbId,
    pub language_code: String,
    pub title: String,
    pub summary: String,
    pub body: String,
}

/// DTO for creating a new project with at least one translation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub slug: String,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
    pub translations: BTreeMap<Locale, ProjectText>,
}

/// DTO for updating a project. Translations present in the map are
/// upserted per locale; absent locales are left untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub slug: Option<String>,
    pub repo_url: Option<String>,
    pub demo_url: Option<String>,
    pub started_on: Option<NaiveDate>,
    pub is_published: Option<bool>,
    pub sort_order: Option<i32>,
    #[serde(default)]
    pub translations: BTreeMap<Locale, ProjectText>,
}

/// A gallery image row from the `project_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectImage {
    pub id: DbId,
    pub project_id: DbId,
    pub file_path: String,
    pub alt_text: Option<String>,
    pub display_order: i32,
    pub created_at: Timestamp,
}

/// One entry of the batch image reorder payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageOrder {
    pub id: DbId,
    pub display_order: i32,
}
