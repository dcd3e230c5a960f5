//! Route definitions for the singleton `/profile` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /             -> get
/// PUT  /             -> upsert (admin)
/// POST /photo        -> upload_photo (admin)
/// POST /cv/{locale}  -> upload_cv (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profile::get).put(profile::upsert))
        .route("/photo", post(profile::upload_photo))
        .route("/cv/{locale}", post(profile::upload_cv))
}
