//! Repository for the singleton `profile` and its translations.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use folio_core::locale::Locale;
use folio_core::types::DbId;

use crate::models::profile::{Profile, ProfileText, ProfileTranslationRow, UpsertProfile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, photo_path, email, github_url, linkedin_url, location, created_at, updated_at";

/// Provides access to the singleton profile row.
pub struct ProfileRepo;

impl ProfileRepo {
    /// The profile row, if it has been created.
    pub async fn get(pool: &PgPool) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profile ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Profile>(&query).fetch_optional(pool).await
    }

    /// Create or update the profile and upsert its translations in one
    /// transaction.
    pub async fn upsert(pool: &PgPool, input: &UpsertProfile) -> Result<Profile, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let existing_query = format!("SELECT {COLUMNS} FROM profile ORDER BY id LIMIT 1");
        let existing = sqlx::query_as::<_, Profile>(&existing_query)
            .fetch_optional(&mut *tx)
            .await?;

        let profile = match existing {
            Some(profile) => {
                let query = format!(
                    "UPDATE profile SET
                        email = COALESCE($2, email),
                        github_url = COALESCE($3, github_url),
                        linkedin_url = COALESCE($4, linkedin_url),
                        location = COALESCE($5, location),
                        updated_at = NOW()
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Profile>(&query)
                    .bind(profile.id)
                    .bind(&input.email)
                    .bind(&input.github_url)
                    .bind(&input.linkedin_url)
                    .bind(&input.location)
                    .fetch_one(&mut *tx)
                    .await?
            }
            None => {
                let query = format!(
                    "INSERT INTO profile (email, github_url, linkedin_url, location)
                     VALUES ($1, $2, $3, $4)
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Profile>(&query)
                    .bind(&input.email)
                    .bind(&input.github_url)
                    .bind(&input.linkedin_url)
                    .bind(&input.location)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        upsert_translations(&mut tx, profile.id, &input.translations).await?;

        tx.commit().await?;
        Ok(profile)
    }

    /// All translation rows for the profile, with language codes.
    pub async fn translations(
        pool: &PgPool,
        profile_id: DbId,
    ) -> Result<Vec<ProfileTranslationRow>, sqlx::Error> {
        sqlx::query_as::<_, ProfileTranslationRow>(
            "SELECT t.profile_id, l.code AS language_code, t.headline, t.bio, t.cv_path
             FROM profile_translations t
             JOIN languages l ON l.id = t.language_id
             WHERE t.profile_id = $1",
        )
        .bind(profile_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the profile photo path, returning the previous one so the
    /// caller can unlink the old file.
    pub async fn set_photo(
        pool: &PgPool,
        profile_id: DbId,
        photo_path: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<String> =
            sqlx::query_scalar("SELECT photo_path FROM profile WHERE id = $1")
                .bind(profile_id)
                .fetch_one(&mut *tx)
                .await?;

        sqlx::query("UPDATE profile SET photo_path = $2, updated_at = NOW() WHERE id = $1")
            .bind(profile_id)
            .bind(photo_path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(previous)
    }

    /// Set the CV path on the translation row for `locale`.
    ///
    /// Returns the previous path, or `Err(sqlx::Error::RowNotFound)` when
    /// no translation row exists for that locale yet.
    pub async fn set_cv(
        pool: &PgPool,
        profile_id: DbId,
        locale: Locale,
        cv_path: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<String> = sqlx::query_scalar(
            "SELECT t.cv_path FROM profile_translations t
             JOIN languages l ON l.id = t.language_id
             WHERE t.profile_id = $1 AND l.code = $2",
        )
        .bind(profile_id)
        .bind(locale.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE profile_translations t SET cv_path = $3
             FROM languages l
             WHERE t.language_id = l.id AND t.profile_id = $1 AND l.code = $2",
        )
        .bind(profile_id)
        .bind(locale.as_str())
        .bind(cv_path)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(previous)
    }
}

/// Upsert one translation row per locale within the caller's transaction.
///
/// `cv_path` is only overwritten when the input supplies one, so a text
/// edit does not drop an uploaded CV.
///
/// Fails with `RowNotFound` when a locale has no `languages` row, so the
/// whole write rolls back instead of silently dropping that translation.
async fn upsert_translations(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: DbId,
    translations: &BTreeMap<Locale, ProfileText>,
) -> Result<(), sqlx::Error> {
    for (locale, text) in translations {
        let result = sqlx::query(
            "INSERT INTO profile_translations (profile_id, language_id, headline, bio, cv_path)
             SELECT $1, l.id, $3, $4, $5 FROM languages l WHERE l.code = $2
             ON CONFLICT ON CONSTRAINT uq_profile_translations_profile_language
             DO UPDATE SET headline = EXCLUDED.headline, bio = EXCLUDED.bio,
                           cv_path = COALESCE(EXCLUDED.cv_path, profile_translations.cv_path)",
        )
        .bind(profile_id)
        .bind(locale.as_str())
        .bind(&text.headline)
        .bind(&text.bio)
        .bind(&text.cv_path)
        .execute(&mut **tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(sqlx::Error::RowNotFound);
        }
    }
    Ok(())
}
