//! HTTP-level integration tests for the contact form and the inbox:
//! public submission with validation, triage status flow, and role
//! enforcement on the inbox.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, get_auth, login_token, post_json, put_json_auth, seed_user,
};
use sqlx::PgPool;

use folio_db::repositories::ContactRepo;

fn submission(email: &str) -> serde_json::Value {
    serde_json::json!({
        "name": "Visitor",
        "email": email,
        "subject": "Collaboration",
        "body": "I read your paper and would love to chat.",
    })
}

/// Submit a message through the public endpoint and return its id.
async fn submit_message(pool: &PgPool) -> i64 {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/contact",
        submission("visitor@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// A valid submission is stored unread.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/contact",
        submission("visitor@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "unread");
    assert_eq!(json["email"], "visitor@example.com");
}

/// An invalid email is rejected with 400 and nothing is stored.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_invalid_email_stores_nothing(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/contact",
        submission("not-an-email"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let messages = ContactRepo::list(&pool, None).await.unwrap();
    assert!(messages.is_empty(), "rejected submission must not be stored");
}

/// An empty body is rejected with 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_submit_empty_body(pool: PgPool) {
    let body = serde_json::json!({
        "name": "Visitor",
        "email": "visitor@example.com",
        "body": "   ",
    });
    let response = post_json(common::build_test_app(pool), "/api/v1/contact", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Inbox access
// ---------------------------------------------------------------------------

/// The inbox requires a token.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_inbox_requires_auth(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/contact").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// An editor can read the inbox.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_editor_reads_inbox(pool: PgPool) {
    submit_message(&pool).await;
    seed_user(&pool, "assistant", "editor").await;
    let token = login_token(common::build_test_app(pool.clone()), "assistant").await;

    let response = get_auth(common::build_test_app(pool), "/api/v1/contact", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
}

/// Opening an unread message marks it read.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_open_marks_read(pool: PgPool) {
    let id = submit_message(&pool).await;
    seed_user(&pool, "assistant", "editor").await;
    let token = login_token(common::build_test_app(pool.clone()), "assistant").await;

    let response = get_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/contact/{id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "read");

    // The status filter now finds it under read, not unread.
    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/contact?status=unread",
        &token,
    )
    .await;
    let json = body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

/// Explicit status changes move a message through the triage states.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_set_status(pool: PgPool) {
    let id = submit_message(&pool).await;
    seed_user(&pool, "assistant", "editor").await;
    let token = login_token(common::build_test_app(pool.clone()), "assistant").await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/contact/{id}/status"),
        serde_json::json!({ "status": "archived" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "archived");

    // Unknown status values fail deserialization with 4xx, not 500.
    let response = put_json_auth(
        common::build_test_app(pool),
        &format!("/api/v1/contact/{id}/status"),
        serde_json::json!({ "status": "starred" }),
        &token,
    )
    .await;
    assert!(response.status().is_client_error());
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

/// Deleting a message is admin-only; editors get 403.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_requires_admin(pool: PgPool) {
    let id = submit_message(&pool).await;
    seed_user(&pool, "assistant", "editor").await;
    let editor = login_token(common::build_test_app(pool.clone()), "assistant").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/contact/{id}"),
        &editor,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    seed_user(&pool, "marie", "admin").await;
    let admin = login_token(common::build_test_app(pool.clone()), "marie").await;

    let response = delete_auth(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/contact/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(
        common::build_test_app(pool),
        &format!("/api/v1/contact/{id}"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
