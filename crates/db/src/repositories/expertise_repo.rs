//! Repository for the `expertise` and `expertise_translations` tables.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use folio_core::locale::Locale;
use folio_core::types::DbId;

use crate::models::expertise::{
    CreateExpertise, Expertise, ExpertiseText, ExpertiseTranslationRow, UpdateExpertise,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, icon, sort_order, created_at, updated_at";

/// Translation columns, joined with the language code.
const TRANSLATION_SELECT: &str = "SELECT t.expertise_id, l.code AS language_code, \
                                  t.title, t.description \
                                  FROM expertise_translations t \
                                  JOIN languages l ON l.id = t.language_id";

/// Provides CRUD operations for expertise entries and their translations.
pub struct ExpertiseRepo;

impl ExpertiseRepo {
    /// Insert a new expertise entry and its translations in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateExpertise) -> Result<Expertise, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO expertise (icon, sort_order)
             VALUES ($1, COALESCE($2, 0))
             RETURNING {COLUMNS}"
        );
        let expertise = sqlx::query_as::<_, Expertise>(&query)
            .bind(&input.icon)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        upsert_translations(&mut tx, expertise.id, &input.translations).await?;

        tx.commit().await?;
        Ok(expertise)
    }

    /// List all expertise entries ascending by `sort_order`.
    pub async fn list(pool: &PgPool) -> Result<Vec<Expertise>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expertise ORDER BY sort_order, id");
        sqlx::query_as::<_, Expertise>(&query).fetch_all(pool).await
    }

    /// All translation rows for one entry, with language codes.
    pub async fn translations(
        pool: &PgPool,
        expertise_id: DbId,
    ) -> Result<Vec<ExpertiseTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.expertise_id = $1");
        sqlx::query_as::<_, ExpertiseTranslationRow>(&query)
            .bind(expertise_id)
            .fetch_all(pool)
            .await
    }

    /// Translation rows for a set of entries.
    pub async fn translations_for_many(
        pool: &PgPool,
        expertise_ids: &[DbId],
    ) -> Result<Vec<ExpertiseTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.expertise_id = ANY($1)");
        sqlx::query_as::<_, ExpertiseTranslationRow>(&query)
            .bind(expertise_ids)
            .fetch_all(pool)
            .await
    }

    /// Update an entry and upsert the supplied translations in one
    /// transaction. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateExpertise,
    ) -> Result<Option<Expertise>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE expertise SET
                icon = COALESCE($2, icon),
                sort_order = COALESCE($3, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let expertise = sqlx::query_as::<_, Expertise>(&query)
            .bind(id)
            .bind(&input.icon)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(expertise) = expertise else {
            tx.rollback().await?;
            return Ok(None);
        };

        upsert_translations(&mut tx, expertise.id, &input.translations).await?;

        tx.commit().await?;
        Ok(Some(expertise))
    }

    /// Delete an entry by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expertise WHERE id = $1")
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
    expertise_id: DbId,
    translations: &BTreeMap<Locale, ExpertiseText>,
) -> Result<(), sqlx::Error> {
    for (locale, text) in translations {
        let result = sqlx::query(
            "INSERT INTO expertise_translations (expertise_id, language_id, title, description)
             SELECT $1, l.id, $3, $4 FROM languages l WHERE l.code = $2
             ON CONFLICT ON CONSTRAINT uq_expertise_translations_expertise_language
             DO UPDATE SET title = EXCLUDED.title, description = EXCLUDED.description",
        )
        .bind(expertise_id)
        .bind(locale.as_str())
        .bind(&text.title)
        .bind(&text.description)
        .execute(&mut **tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
    }
    Ok(())
}
