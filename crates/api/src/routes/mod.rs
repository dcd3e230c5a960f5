pub mod article;
pub mod auth;
pub mod contact;
pub mod expertise;
pub mod health;
pub mod language;
pub mod profile;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                        login (public)
/// /auth/logout                       logout (requires auth)
/// /auth/me                           current user (requires auth)
/// /auth/change-password              change password (requires auth)
/// /auth/register                     create account (admin only)
///
/// /languages                         list (public), create (admin)
/// /languages/{id}                    update, delete (admin)
/// /languages/{id}/default            set default (admin)
///
/// /projects                          list (public), create (admin)
/// /projects/slug/{slug}              get by slug (public)
/// /projects/{id}                     get (public), update, delete (admin)
/// /projects/{id}/cover               upload cover (admin)
/// /projects/{id}/images              list (public), upload (admin)
/// /projects/{id}/images/order        batch reorder (admin)
/// /projects/{id}/images/{image_id}   delete (admin)
///
/// /articles                          list (public), create (admin)
/// /articles/slug/{slug}              get by slug (public)
/// /articles/{id}                     get (public), update, delete (admin)
/// /articles/{id}/cover               upload cover (admin)
///
/// /expertise                         list (public), create (admin)
/// /expertise/{id}                    update, delete (admin)
///
/// /profile                           get (public), upsert (admin)
/// /profile/photo                     upload photo (admin)
/// /profile/cv/{locale}               upload CV (admin)
///
/// /contact                           submit (public), list (editor)
/// /contact/{id}                      get (editor), delete (admin)
/// /contact/{id}/status               set status (editor)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/languages", language::router())
        .nest("/projects", project::router())
        .nest("/articles", article::router())
        .nest("/expertise", expertise::router())
        .nest("/profile", profile::router())
        .nest("/contact", contact::router())
}
