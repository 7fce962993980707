//! Integration tests for the password-change flow.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use noteleaf_core::CoreError;
use noteleaf_store::{MemoryAuth, StoreError};
use noteleaf_sync::{AccountManager, SyncError};

fn account() -> (Arc<MemoryAuth>, AccountManager) {
    let auth = Arc::new(MemoryAuth::new("hunter22"));
    let manager = AccountManager::new(auth.clone());
    (auth, manager)
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected_locally() {
    let (auth, manager) = account();

    let err = manager
        .change_password("hunter22", "new-password", "different")
        .await
        .unwrap_err();
    assert_matches!(err, SyncError::Core(CoreError::Validation(_)));

    // No network call happened; the password is unchanged.
    assert_eq!(auth.current_password(), "hunter22");
}

#[tokio::test]
async fn empty_fields_are_rejected_locally() {
    let (auth, manager) = account();

    let err = manager.change_password("", "new-password", "new-password").await.unwrap_err();
    assert_matches!(err, SyncError::Core(CoreError::Validation(_)));

    let err = manager.change_password("hunter22", "", "").await.unwrap_err();
    assert_matches!(err, SyncError::Core(CoreError::Validation(_)));

    assert_eq!(auth.current_password(), "hunter22");
}

#[tokio::test]
async fn wrong_current_password_surfaces_the_translated_message() {
    let (auth, manager) = account();

    let err = manager
        .change_password("wrong", "new-password", "new-password")
        .await
        .unwrap_err();

    assert_matches!(&err, SyncError::Store(StoreError::Auth { .. }));
    assert!(err.to_string().contains("The password is invalid"));
    // Re-authentication failed, so nothing was mutated.
    assert_eq!(auth.current_password(), "hunter22");
}

#[tokio::test]
async fn weak_new_password_surfaces_the_translated_message() {
    let (auth, manager) = account();

    let err = manager
        .change_password("hunter22", "abc", "abc")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("at least 6 characters"));
    assert_eq!(auth.current_password(), "hunter22");
}

#[tokio::test]
async fn change_succeeds_with_the_correct_current_password() {
    let (auth, manager) = account();

    manager
        .change_password("hunter22", "correct-horse", "correct-horse")
        .await
        .unwrap();
    assert_eq!(auth.current_password(), "correct-horse");
}
