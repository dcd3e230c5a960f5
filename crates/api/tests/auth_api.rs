//! HTTP-level integration tests for authentication and account management:
//! login, logout, me, change-password, registration, and role enforcement.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, login_token, post_json, post_json_auth, seed_user, TEST_PASSWORD,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Successful login returns 200 with a token, expiry, and the public user.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = seed_user(&pool, "marie", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "marie", "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["token"].is_string(), "response must contain a token");
    assert_eq!(json["expires_in"], 480 * 60);
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "marie");
    assert_eq!(json["user"]["role"], "admin");
    assert!(
        json["user"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );
}

/// Login with an incorrect password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_wrong_password(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "marie", "password": "not-the-password" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Login with a nonexistent username returns 401 with the same message as a
/// wrong password, so usernames cannot be probed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_nonexistent_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "ghost", "password": "whatever" });
    let response = post_json(app, "/api/v1/auth/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

// ---------------------------------------------------------------------------
// Authenticated session endpoints
// ---------------------------------------------------------------------------

/// GET /auth/me returns the caller's public record.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me(pool: PgPool) {
    let user = seed_user(&pool, "marie", "editor").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/auth/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], user.id);
    assert_eq!(json["role"], "editor");
}

/// Requests without a token are rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_auth(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A malformed bearer token is rejected with 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_rejected(pool: PgPool) {
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/auth/me",
        "not-a-jwt",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout returns 204.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_logout(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/logout",
        serde_json::json!({}),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Change password
// ---------------------------------------------------------------------------

/// Changing the password invalidates the old one for future logins.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "new_password": "an even longer passphrase",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/change-password",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Old password no longer works.
    let body = serde_json::json!({ "username": "marie", "password": TEST_PASSWORD });
    let response = post_json(common::build_test_app(pool.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // New one does.
    let body = serde_json::json!({ "username": "marie", "password": "an even longer passphrase" });
    let response = post_json(common::build_test_app(pool), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Change-password with the wrong current password returns 401.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_wrong_current(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "current_password": "wrong",
        "new_password": "an even longer passphrase",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/change-password",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A too-short new password is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_change_password_too_short(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "current_password": TEST_PASSWORD,
        "new_password": "short",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/change-password",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Registration (admin only)
// ---------------------------------------------------------------------------

/// An admin can register a new editor account.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_editor(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "username": "assistant",
        "email": "assistant@test.com",
        "password": "a perfectly fine passphrase",
        "role": "editor",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        body,
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["username"], "assistant");
    assert_eq!(json["role"], "editor");
}

/// An editor cannot register accounts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_requires_admin(pool: PgPool) {
    seed_user(&pool, "assistant", "editor").await;
    let token = login_token(common::build_test_app(pool.clone()), "assistant").await;

    let body = serde_json::json!({
        "username": "mallory",
        "email": "mallory@test.com",
        "password": "a perfectly fine passphrase",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Unknown roles and invalid emails are rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_validation(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "username": "x",
        "email": "x@test.com",
        "password": "a perfectly fine passphrase",
        "role": "superuser",
    });
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/auth/register",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({
        "username": "y",
        "email": "not-an-email",
        "password": "a perfectly fine passphrase",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Registering a duplicate username returns 409.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_register_duplicate_username(pool: PgPool) {
    seed_user(&pool, "marie", "admin").await;
    let token = login_token(common::build_test_app(pool.clone()), "marie").await;

    let body = serde_json::json!({
        "username": "marie",
        "email": "other@test.com",
        "password": "a perfectly fine passphrase",
    });
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/auth/register",
        body,
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
