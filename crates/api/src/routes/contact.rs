//! Route definitions for the `/contact` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// POST   /              -> submit (public)
/// GET    /              -> list (editor)
/// GET    /{id}          -> get_by_id (editor)
/// DELETE /{id}          -> delete (admin)
/// PUT    /{id}/status   -> set_status (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(contact::submit).get(contact::list))
        .route("/{id}", get(contact::get_by_id).delete(contact::delete))
        .route("/{id}/status", put(contact::set_status))
}
