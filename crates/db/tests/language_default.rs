//! Integration tests for the languages table and its single-default
//! invariant: every write that can move the default flag leaves exactly
//! one default row behind.

use sqlx::PgPool;

use folio_db::models::language::{CreateLanguage, UpdateLanguage};
use folio_db::repositories::LanguageRepo;

async fn default_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM languages WHERE is_default")
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Test: Migrations seed English as the default
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_seeded_languages(pool: PgPool) {
    let languages = LanguageRepo::list(&pool).await.unwrap();
    assert_eq!(languages.len(), 2);

    // Default first, then by code.
    assert_eq!(languages[0].code, "en");
    assert!(languages[0].is_default);
    assert_eq!(languages[1].code, "fr");
    assert!(!languages[1].is_default);

    let default = LanguageRepo::default_language(&pool).await.unwrap().unwrap();
    assert_eq!(default.code, "en");
}

// ---------------------------------------------------------------------------
// Test: set_default moves the flag, leaving exactly one default
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_default_moves_flag(pool: PgPool) {
    let fr = LanguageRepo::find_by_code(&pool, "fr").await.unwrap().unwrap();

    let updated = LanguageRepo::set_default(&pool, fr.id)
        .await
        .unwrap()
        .expect("fr should exist");
    assert!(updated.is_default);

    assert_eq!(default_count(&pool).await, 1);
    let default = LanguageRepo::default_language(&pool).await.unwrap().unwrap();
    assert_eq!(default.code, "fr");
}

// ---------------------------------------------------------------------------
// Test: set_default on the current default is a no-op
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_default_idempotent(pool: PgPool) {
    let en = LanguageRepo::find_by_code(&pool, "en").await.unwrap().unwrap();

    LanguageRepo::set_default(&pool, en.id).await.unwrap().unwrap();

    assert_eq!(default_count(&pool).await, 1);
    let default = LanguageRepo::default_language(&pool).await.unwrap().unwrap();
    assert_eq!(default.code, "en");
}

// ---------------------------------------------------------------------------
// Test: set_default on a missing row returns None and keeps the old default
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_set_default_nonexistent(pool: PgPool) {
    let result = LanguageRepo::set_default(&pool, 999_999).await.unwrap();
    assert!(result.is_none());

    // Transaction rolled back: en is still the default.
    let default = LanguageRepo::default_language(&pool).await.unwrap().unwrap();
    assert_eq!(default.code, "en");
}

// ---------------------------------------------------------------------------
// Test: update with is_default=true switches, is_default=false is ignored
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_update_default_flag(pool: PgPool) {
    let fr = LanguageRepo::find_by_code(&pool, "fr").await.unwrap().unwrap();

    let updated = LanguageRepo::update(
        &pool,
        fr.id,
        &UpdateLanguage {
            name: Some("French".to_string()),
            native_name: None,
            is_default: Some(true),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(updated.is_default);
    assert_eq!(updated.name, "French");
    assert_eq!(default_count(&pool).await, 1);

    // Unsetting via update is ignored; the default can only move.
    let still_default = LanguageRepo::update(
        &pool,
        fr.id,
        &UpdateLanguage {
            name: None,
            native_name: None,
            is_default: Some(false),
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(still_default.is_default);
    assert_eq!(default_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Test: Creating a language as default unsets the previous one
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_language_as_default(pool: PgPool) {
    let created = LanguageRepo::create(
        &pool,
        &CreateLanguage {
            code: "de".to_string(),
            name: "German".to_string(),
            native_name: "Deutsch".to_string(),
            is_default: Some(true),
        },
    )
    .await
    .unwrap();
    assert!(created.is_default);
    assert_eq!(default_count(&pool).await, 1);
}

// ---------------------------------------------------------------------------
// Test: Duplicate language code rejected
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_duplicate_language_code_rejected(pool: PgPool) {
    let result = LanguageRepo::create(
        &pool,
        &CreateLanguage {
            code: "en".to_string(),
            name: "English".to_string(),
            native_name: "English".to_string(),
            is_default: None,
        },
    )
    .await;
    assert!(result.is_err(), "Duplicate language code should fail");
}

// ---------------------------------------------------------------------------
// Test: Deleting a language removes it and reports the count
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delete_language(pool: PgPool) {
    let fr = LanguageRepo::find_by_code(&pool, "fr").await.unwrap().unwrap();

    assert!(LanguageRepo::delete(&pool, fr.id).await.unwrap());
    assert_eq!(LanguageRepo::count(&pool).await.unwrap(), 1);
    assert!(LanguageRepo::find_by_code(&pool, "fr").await.unwrap().is_none());

    assert!(!LanguageRepo::delete(&pool, fr.id).await.unwrap());
}
