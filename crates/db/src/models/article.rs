//! Article (blog post) entity model and DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use folio_core::locale::Locale;
use folio_core::types::{DbId, Timestamp};

/// An article row from the `articles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Article {
    pub id: DbId,
    pub slug: String,
    pub cover_image_path: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Per-locale text fields for an article.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleText {
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: String,
}

/// A translation row joined with its language code.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleTranslationRow {
    pub article_id: DbId,
    pub language_code: String,
    pub title: String,
    pub summary: String,
    pub body: String,
}

/// DTO for creating a new article with at least one translation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub slug: String,
    pub is_published: Option<bool>,
    pub published_at: Option<Timestamp>,
    pub translations: BTreeMap<Locale, ArticleText>,
}

/// DTO for updating an article.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArticle {
    pub slug: Option<String>,
    pub is_published: Option<bool>,
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub translations: BTreeMap<Locale, ArticleText>,
}
