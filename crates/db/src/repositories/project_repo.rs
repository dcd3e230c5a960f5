//! Repository for the `projects` and `project_translations` tables.

use std::collections::BTreeMap;

use sqlx::{PgPool, Postgres, Transaction};

use folio_core::locale::Locale;
use folio_core::types::DbId;

use crate::models::project::{
    CreateProject, Project, ProjectText, ProjectTranslationRow, UpdateProject,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, slug, cover_image_path, repo_url, demo_url, started_on, \
                       is_published, sort_order, created_at, updated_at";

/// Translation columns, joined with the language code.
const TRANSLATION_SELECT: &str = "SELECT t.project_id, l.code AS language_code, \
                                  t.title, t.summary, t.body \
                                  FROM project_translations t \
                                  JOIN languages l ON l.id = t.language_id";

/// Provides CRUD operations for projects and their translations.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project and upsert its translations in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (slug, repo_url, demo_url, started_on, is_published, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, FALSE), COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.slug)
            .bind(&input.repo_url)
            .bind(&input.demo_url)
            .bind(input.started_on)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_one(&mut *tx)
            .await?;

        upsert_translations(&mut tx, project.id, &input.translations).await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project by its URL slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE slug = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List projects ordered by `sort_order`, then newest first.
    ///
    /// With `published_only`, unpublished projects are excluded (the
    /// public site view; the admin dashboard lists everything).
    pub async fn list(pool: &PgPool, published_only: bool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects
             WHERE (NOT $1) OR is_published
             ORDER BY sort_order, created_at DESC"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(published_only)
            .fetch_all(pool)
            .await
    }

    /// All translation rows for one project, with language codes.
    pub async fn translations(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.project_id = $1");
        sqlx::query_as::<_, ProjectTranslationRow>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Translation rows for a set of projects, for shaping list responses
    /// without a query per row.
    pub async fn translations_for_many(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<ProjectTranslationRow>, sqlx::Error> {
        let query = format!("{TRANSLATION_SELECT} WHERE t.project_id = ANY($1)");
        sqlx::query_as::<_, ProjectTranslationRow>(&query)
            .bind(project_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a project and upsert the supplied translations in one
    /// transaction. Only non-`None` base fields are applied; locales
    /// absent from the translations map are left untouched.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                slug = COALESCE($2, slug),
                repo_url = COALESCE($3, repo_url),
                demo_url = COALESCE($4, demo_url),
                started_on = COALESCE($5, started_on),
                is_published = COALESCE($6, is_published),
                sort_order = COALESCE($7, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.repo_url)
            .bind(&input.demo_url)
            .bind(input.started_on)
            .bind(input.is_published)
            .bind(input.sort_order)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(project) = project else {
            tx.rollback().await?;
            return Ok(None);
        };

        upsert_translations(&mut tx, project.id, &input.translations).await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Set or clear the cover image path. Returns the updated row.
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        path: Option<&str>,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET cover_image_path = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(path)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project by ID. Returns `true` if a row was removed.
    /// Translation and image rows cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Upsert one translation row per locale within the caller's transaction.
///
/// Fails with `RowNotFound` when a locale has no `languages` row (it may
/// have been deleted), so the whole write rolls back instead of silently
/// dropping that translation.
async fn upsert_translations(
    tx: &mut Transaction<'_, Postgres>,
    project_id: DbId,
    translations: &BTreeMap<Locale, ProjectText>,
) -> Result<(), sqlx::Error> {
    for (locale, text) in translations {
        let result = sqlx::query(
            "INSERT INTO project_translations (project_id, language_id, title, summary, body)
             SELECT $1, l.id, $3, $4, $5 FROM languages l WHERE l.code = $2
             ON CONFLICT ON CONSTRAINT uq_project_translations_project_language
             DO UPDATE SET title = EXCLUDED.title, summary = EXCLUDED.summary,
                           body = EXCLUDED.body",
        )
        .bind(project_id)
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
