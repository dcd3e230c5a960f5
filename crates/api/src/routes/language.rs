//! Route definitions for the `/languages` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::language;
use crate::state::AppState;

/// Routes mounted at `/languages`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create (admin)
/// PUT    /{id}           -> update (admin)
/// DELETE /{id}           -> delete (admin)
/// POST   /{id}/default   -> set_default (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(language::list).post(language::create))
        .route("/{id}", put(language::update).delete(language::delete))
        .route("/{id}/default", post(language::set_default))
}
