//! Handlers for the project gallery: `/projects/{id}/images`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;

use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_core::uploads::UploadKind;
use folio_db::models::project::{ImageOrder, ProjectImage};
use folio_db::repositories::{ProjectImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;
use crate::uploads;

/// Verify that a project exists, returning NotFound if it does not.
async fn ensure_project_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<()> {
    if ProjectRepo::find_by_id(pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }));
    }
    Ok(())
}

/// GET /api/v1/projects/{project_id}/images
///
/// Ascending by `display_order`.
pub async fn list(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectImage>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    let images = ProjectImageRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(images))
}

/// POST /api/v1/projects/{project_id}/images
///
/// Multipart form with a `file` field (image) and an optional `alt_text`
/// field. The image is appended at the end of the gallery.
pub async fn upload(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectImage>)> {
    ensure_project_exists(&state.pool, project_id).await?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut alt_text: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                file = Some((filename, data.to_vec()));
            }
            "alt_text" => {
                alt_text = Some(field.text().await?);
            }
            _ => {}
        }
    }

    let (filename, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing 'file' field".into()))?;

    let relative = uploads::save(
        &state.config.upload_dir,
        UploadKind::Image,
        &filename,
        &data,
    )
    .await?;

    let image =
        match ProjectImageRepo::create(&state.pool, project_id, &relative, alt_text.as_deref())
            .await
        {
            Ok(image) => image,
            Err(e) => {
                // The new file must not be left behind on a failed write.
                uploads::discard(&state.config.upload_dir, &relative).await;
                return Err(e.into());
            }
        };

    tracing::info!(project_id, image_id = image.id, path = %relative, "Project image uploaded");
    Ok((StatusCode::CREATED, Json(image)))
}

/// PUT /api/v1/projects/{project_id}/images/order
///
/// Persist a batch of `(id, display_order)` pairs in one transaction.
pub async fn reorder(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(orders): Json<Vec<ImageOrder>>,
) -> AppResult<Json<Vec<ProjectImage>>> {
    ensure_project_exists(&state.pool, project_id).await?;
    ProjectImageRepo::reorder(&state.pool, project_id, &orders).await?;

    let images = ProjectImageRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(images))
}

/// DELETE /api/v1/projects/{project_id}/images/{image_id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path((project_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let image = ProjectImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .filter(|image| image.project_id == project_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ProjectImage",
            id: image_id,
        }))?;

    ProjectImageRepo::delete(&state.pool, image_id).await?;
    uploads::discard(&state.config.upload_dir, &image.file_path).await;

    Ok(StatusCode::NO_CONTENT)
}
