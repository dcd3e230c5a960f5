//! Repository for the `project_images` table.

use sqlx::PgPool;

use folio_core::types::DbId;

use crate::models::project::{ImageOrder, ProjectImage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, file_path, alt_text, display_order, created_at";

/// Provides CRUD operations for project gallery images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Insert a new image at the end of the gallery.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        file_path: &str,
        alt_text: Option<&str>,
    ) -> Result<ProjectImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_images (project_id, file_path, alt_text, display_order)
             VALUES ($1, $2, $3,
                     (SELECT COALESCE(MAX(display_order) + 1, 0)
                      FROM project_images WHERE project_id = $1))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(file_path)
            .bind(alt_text)
            .fetch_one(pool)
            .await
    }

    /// Find an image by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM project_images WHERE id = $1");
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's images ascending by `display_order`.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images
             WHERE project_id = $1
             ORDER BY display_order, id"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Apply a batch of `(id, display_order)` pairs in one transaction.
    ///
    /// Entries whose `id` does not belong to `project_id` are ignored
    /// rather than failing the batch.
    pub async fn reorder(
        pool: &PgPool,
        project_id: DbId,
        orders: &[ImageOrder],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;
        for order in orders {
            sqlx::query(
                "UPDATE project_images SET display_order = $3
                 WHERE id = $1 AND project_id = $2",
            )
            .bind(order.id)
            .bind(project_id)
            .bind(order.display_order)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Delete an image row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
