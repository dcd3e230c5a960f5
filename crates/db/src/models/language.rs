//! Language entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::types::{DbId, Timestamp};

/// A language row from the `languages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Language {
    pub id: DbId,
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new language.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLanguage {
    pub code: String,
    pub name: String,
    pub native_name: String,
    /// Defaults to `false`; when `true` the new row becomes the single default.
    pub is_default: Option<bool>,
}

/// DTO for updating an existing language. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLanguage {
    pub name: Option<String>,
    pub native_name: Option<String>,
    /// `Some(true)` switches the default to this row; `Some(false)` is
    /// ignored (the default is moved, never dropped).
    pub is_default: Option<bool>,
}
