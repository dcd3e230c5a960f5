//! Repository for the `articles` and `article_translations` tables.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use folio_core::locale::Locale;
use folio_core::types::DbId;

use crate::models::article::{
    Article, ArticleText, ArticleTranslationRow, CreateArticle, UpdateArticle,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, slug, cover_image_path, is_published, published_at, created_at, updated_at";

/// Translation columns, joined with the language code.
const TRANSLATION_SELECT: &str = "SELECT t.article_id, l.code AS language_code, \
                                  t.title, t.summary, t.body \
                                  FROM article_translations t \
                                  JOIN languages l ON l.id = t.language_id";

/// Provides CRUD operations for articles and their translations.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article and upsert its translations in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO articles (slug, is_published, published_at)
             VALUES ($1, COALESCE($2, FALSE), $3)
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(&input.slug)
            .bind(input.is_published)
            .bind(input.published_at)
            .fetch_one(&mut *tx)
            .await?;

        upsert_translations(&mut tx, article.id, &input.translations).await?;

        tx.commit().await?;
        Ok(article)
    }

    /// Find an article by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an article by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE slug = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List articles, most recently published first.
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM articles
             WHERE (NOT $1) OR is_published
             ORDER BY published_at DESC NULLS LAST, created_at DESC"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(published_only)
            .fetch_all(pool)
            .await
    }

    /// All translation rows for one article, with language codes.
    pub async fn translations(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Vec<ArticleTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.article_id = $1");
        sqlx::query_as::<_, ArticleTranslationRow>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    /// Translation rows for a set of articles.
    pub async fn translations_for_many(
        pool: &PgPool,
        article_ids: &[DbId],
    ) -> Result<Vec<ArticleTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.article_id = ANY($1)");
        sqlx::query_as::<_, ArticleTranslationRow>(&query)
            .bind(article_ids)
            .fetch_all(pool)
            .await
    }

    /// Update an article and upsert the supplied translations in one
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE articles SET
                slug = COALESCE($2, slug),
                is_published = COALESCE($3, is_published),
                published_at = COALESCE($4, published_at),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let article = sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(input.is_published)
            .bind(input.published_at)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(article) = article else {
            tx.rollback().await?;
            return Ok(None);
        };

        upsert_translations(&mut tx, article.id, &input.translations).await?;

        tx.commit().await?;
        Ok(Some(article))
    }

    /// Set or clear the cover image path. Returns the updated row.
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        path: Option<&str>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET cover_image_path = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Upsert one translation row per locale within the caller's transaction.
///
/// Fails with `RowNotFound` when a locale has no `languages` row, so the
/// whole write rolls back instead of silently dropping that translation.
async fn upsert_translations(
    tx: &mut Transaction<'_, Postgres>,
    article_id: DbId,
    translations: &BTreeMap<Locale, ArticleText>,
) -> Result<(), sqlx::Error> {
    for (locale, text) in translations {
        let result = sqlx::query(
            "INSERT INTO article_translations (article_id, language_id, title, summary, body)
             SELECT $1, l.id, $3, $4, $5 FROM languages l WHERE l.code = $2
             ON CONFLICT ON CONSTRAINT uq_article_translations_article_language
             DO UPDATE SET title = EXCLUDED.title, summary = EXCLUDED.summary,
                           body = EXCLUDED.body",
        )
        .bind(article_id)
        .bind(locale.as_str())
        .bind(&text.title)
        .bind(&text.summary)
        .bind(&text.body)
        .execute(&mut **tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
    }
    Ok(())
}
