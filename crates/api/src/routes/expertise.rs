//! Route definitions for the `/expertise` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::expertise;
use crate::state::AppState;

/// Routes mounted at `/expertise`.
///
/// ```text
/// GET    /      -> list
/// POST   /      -> create (admin)
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(expertise::list).post(expertise::create))
        .route("/{id}", put(expertise::update).delete(expertise::delete))
}
