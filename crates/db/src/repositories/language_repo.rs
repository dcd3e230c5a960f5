//! Repository for the `languages` table.
//!
//! The single-default invariant is enforced here: every write that can
//! move the default flag unsets the previous holder in the same
//! transaction.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::language::{CreateLanguage, Language, UpdateLanguage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, name, native_name, is_default, created_at, updated_at";

/// Provides CRUD operations for languages.
pub struct LanguageRepo;

impl LanguageRepo {
    /// Insert a new language, returning the created row.
    ///
    /// When `is_default` is true, the previous default is unset in the
    /// same transaction.
    pub async fn create(pool: &PgPool, input: &CreateLanguage) -> Result<Language, sqlx::Error> {
        let make_default = input.is_default.unwrap_or(false);
        let mut tx = pool.begin().await?;

        if make_default {
            sqlx::query("UPDATE languages SET is_default = FALSE, updated_at = NOW() WHERE is_default")
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO languages (code, name, native_name, is_default)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let language = sqlx::query_as::<_, Language>(&query)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.native_name)
            .bind(make_default)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(language)
    }

    /// Find a language by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE id = $1");
        sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a language by its ISO code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE code = $1");
        sqlx::query_as::<_, Language>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// The current default language, if any.
    pub async fn default_language(pool: &PgPool) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE is_default LIMIT 1");
        sqlx::query_as::<_, Language>(&query)
            .fetch_optional(pool)
            .await
    }

    /// List all languages, default first, then by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages ORDER BY is_default DESC, code");
        sqlx::query_as::<_, Language>(&query).fetch_all(pool).await
    }

    /// Number of language rows.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM languages")
            .fetch_one(pool)
            .await
    }

    /// Update a language. Only non-`None` fields in `input` are applied.
    ///
    /// `is_default: Some(true)` moves the default to this row inside the
    /// transaction; `Some(false)` is ignored so the site is never left
    /// without a default language.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLanguage,
    ) -> Result<Option<Language>, sqlx::Error> {
        let make_default = input.is_default == Some(true);
        let mut tx = pool.begin().await?;

        if make_default {
            sqlx::query(
                "UPDATE languages SET is_default = FALSE, updated_at = NOW()
                 WHERE is_default AND id <> $1",
            )
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE languages SET
                name = COALESCE($2, name),
                native_name = COALESCE($3, native_name),
                is_default = is_default OR $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let language = sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.native_name)
            .bind(make_default)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(language)
    }

    /// Make `id` the single default language.
    ///
    /// Returns the updated row, or `None` if it does not exist. The
    /// previous default is unset in the same transaction.
    pub async fn set_default(pool: &PgPool, id: DbId) -> Result<Option<Language>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE languages SET is_default = FALSE, updated_at = NOW()
             WHERE is_default AND id <> $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!(
            "UPDATE languages SET is_default = TRUE, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let language = sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(language)
    }

    /// Delete a language by ID. Returns `true` if a row was removed.
    ///
    /// Callers must reject deleting the default or last language before
    /// reaching this point; translation rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
