//! Integration tests for contact message storage and triage status.

use sqlx::PgPool;

use folio_db::models::contact::CreateContactMessage;
use folio_db::repositories::ContactRepo;

fn new_message(name: &str, body: &str) -> CreateContactMessage {
    CreateContactMessage {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        subject: None,
        body: body.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: New messages start unread
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_new_message_is_unread(pool: PgPool) {
    let message = ContactRepo::create(&pool, &new_message("Alice", "Hello"))
        .await
        .unwrap();
    assert_eq!(message.status, "unread");
    assert_eq!(message.email, "alice@example.com");
}

// ---------------------------------------------------------------------------
// Test: Status filter in listing
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_list_filtered_by_status(pool: PgPool) {
    let first = ContactRepo::create(&pool, &new_message("Alice", "One"))
        .await
        .unwrap();
    ContactRepo::create(&pool, &new_message("Bob", "Two"))
        .await
        .unwrap();

    ContactRepo::set_status(&pool, first.id, "read")
        .await
        .unwrap()
        .unwrap();

    let unread = ContactRepo::list(&pool, Some("unread")).await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].name, "Bob");

    let all = ContactRepo::list(&pool, None).await.unwrap();
    assert_eq!(all.len(), 2);
}

// ---------------------------------------------------------------------------
// Test: CHECK constraint rejects unknown status values
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_invalid_status_rejected(pool: PgPool) {
    let message = ContactRepo::create(&pool, &new_message("Carol", "Hi"))
        .await
        .unwrap();
    let result = ContactRepo::set_status(&pool, message.id, "starred").await;
    assert!(result.is_err(), "Unknown status should violate the CHECK");
}

// ---------------------------------------------------------------------------
// Test: set_status on missing row returns None
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_status_nonexistent(pool: PgPool) {
    let result = ContactRepo::set_status(&pool, 999_999, "read").await.unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Test: Delete removes the row
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delete_message(pool: PgPool) {
    let message = ContactRepo::create(&pool, &new_message("Dave", "Bye"))
        .await
        .unwrap();

    assert!(ContactRepo::delete(&pool, message.id).await.unwrap());
    assert!(ContactRepo::find_by_id(&pool, message.id)
        .await
        .unwrap()
        .is_none());
    assert!(!ContactRepo::delete(&pool, message.id).await.unwrap());
}
