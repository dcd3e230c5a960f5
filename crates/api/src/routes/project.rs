//! Route definitions for the `/projects` resource, including the nested
//! gallery routes under `/projects/{id}/images`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{project, project_image};
use crate::state::AppState;

/// Routes mounted at `/projects`.
///
/// ```text
/// GET    /                        -> list
/// POST   /                        -> create (admin)
/// GET    /slug/{slug}             -> get_by_slug
/// GET    /{id}                    -> get_by_id
/// PUT    /{id}                    -> update (admin)
/// DELETE /{id}                    -> delete (admin)
/// POST   /{id}/cover              -> upload cover (admin)
///
/// GET    /{id}/images             -> list images
/// POST   /{id}/images             -> upload image (admin)
/// PUT    /{id}/images/order       -> batch reorder (admin)
/// DELETE /{id}/images/{image_id}  -> delete image (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(project::list).post(project::create))
        .route("/slug/{slug}", get(project::get_by_slug))
        .route(
            "/{id}",
            get(project::get_by_id)
                .put(project::update)
                .delete(project::delete),
        )
        .route("/{id}/cover", post(project::upload_cover))
        .route(
            "/{id}/images",
            get(project_image::list).post(project_image::upload),
        )
        .route("/{id}/images/order", put(project_image::reorder))
        .route("/{id}/images/{image_id}", axum::routing::delete(project_image::delete))
}
