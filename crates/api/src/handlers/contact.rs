//! Handlers for the `/contact` resource.
//!
//! Submission is public; the inbox requires the editor or admin role.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use folio_core::contact::{validate_submission, ContactStatus};
use folio_core::error::CoreError;
use folio_core::types::DbId;
use folio_db::models::contact::{ContactMessage, CreateContactMessage};
use folio_db::repositories::ContactRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::state::AppState;

/// Query parameters for the inbox listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct InboxQuery {
    pub status: Option<ContactStatus>,
}

/// Request body for `PUT /contact/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: ContactStatus,
}

/// POST /api/v1/contact
///
/// Public submission endpoint. Invalid input is rejected before any row
/// is written.
pub async fn submit(
    State(state): State<AppState>,
    Json(input): Json<CreateContactMessage>,
) -> AppResult<(StatusCode, Json<ContactMessage>)> {
    validate_submission(
        &input.name,
        &input.email,
        input.subject.as_deref(),
        &input.body,
    )
    .map_err(AppError::Core)?;

    let message = ContactRepo::create(&state.pool, &input).await?;
    tracing::info!(message_id = message.id, "Contact message received");
    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/v1/contact
pub async fn list(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Query(query): Query<InboxQuery>,
) -> AppResult<Json<Vec<ContactMessage>>> {
    let status = query.status.map(ContactStatus::as_str);
    let messages = ContactRepo::list(&state.pool, status).await?;
    Ok(Json(messages))
}

/// GET /api/v1/contact/{id}
///
/// Opening an unread message marks it read.
pub async fn get_by_id(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ContactMessage>> {
    let message = ContactRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;

    if message.status == ContactStatus::Unread.as_str() {
        let updated = ContactRepo::set_status(&state.pool, id, ContactStatus::Read.as_str())
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "ContactMessage",
                id,
            }))?;
        return Ok(Json(updated));
    }

    Ok(Json(message))
}

/// PUT /api/v1/contact/{id}/status
pub async fn set_status(
    RequireEditor(_editor): RequireEditor,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SetStatusRequest>,
) -> AppResult<Json<ContactMessage>> {
    let message = ContactRepo::set_status(&state.pool, id, input.status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))?;
    Ok(Json(message))
}

/// DELETE /api/v1/contact/{id}
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ContactRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "ContactMessage",
            id,
        }))
    }
}
