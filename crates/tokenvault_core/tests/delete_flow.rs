//! Integration tests for the delete-token transaction.
//!
//! Exercises the full read-modify-write path through AuthConfigService
//! against a real temp directory, including the no-save-on-failure
//! guarantee a fresh load has to observe.

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tokenvault_core::{
    AuthConfigService, AuthError, ConfigStore, ServerQuery, ServerResolver,
};

/// Seed a store with one anchore server holding tokens for alice and carol.
fn seed_store(dir: &TempDir) -> ConfigStore {
    let store = ConfigStore::new(dir.path().join("auth.toml"));
    let mut service = AuthConfigService::load(store.clone()).unwrap();
    service
        .create_user_token(
            "anchore",
            "https://anchore.example.com",
            "anchore",
            "alice",
            "tok-alice",
        )
        .unwrap();
    service
        .create_user_token(
            "anchore",
            "https://anchore.example.com",
            "anchore",
            "carol",
            "tok-carol",
        )
        .unwrap();
    store
}

#[test]
fn test_successful_batch_delete_persists() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);

    let mut service = AuthConfigService::load(store.clone()).unwrap();
    let handle = service
        .delete_user_tokens(
            &ServerResolver::new(),
            &ServerQuery::by_kind("anchore"),
            &["alice".to_string(), "carol".to_string()],
        )
        .unwrap();

    assert_eq!(handle.name, "anchore");
    assert_eq!(handle.url, "https://anchore.example.com");

    let reloaded = store.load().unwrap();
    let server = reloaded.find_server("anchore").unwrap();
    assert!(server.users.is_empty());
}

#[test]
fn test_failed_batch_never_saves() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);

    let mut service = AuthConfigService::load(store.clone()).unwrap();
    let err = service
        .delete_user_tokens(
            &ServerResolver::new(),
            &ServerQuery::by_kind("anchore"),
            &["alice".to_string(), "bob".to_string()],
        )
        .unwrap_err();

    // The batch stopped at bob...
    assert!(matches!(err, AuthError::UserNotFound { ref username, .. } if username == "bob"));
    // ...after alice was removed from the in-memory model...
    assert!(service
        .config()
        .find_server("anchore")
        .unwrap()
        .find_user("alice")
        .is_none());
    // ...but the store was never written, so a fresh load still has her.
    let reloaded = store.load().unwrap();
    let server = reloaded.find_server("anchore").unwrap();
    assert!(server.find_user("alice").is_some());
    assert!(server.find_user("carol").is_some());
}

#[test]
fn test_unresolvable_server_has_no_effect() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);
    let before = std::fs::read_to_string(dir.path().join("auth.toml")).unwrap();

    let mut service = AuthConfigService::load(store).unwrap();
    let err = service
        .delete_user_tokens(
            &ServerResolver::new(),
            &ServerQuery::by_kind("jira"),
            &["alice".to_string()],
        )
        .unwrap_err();

    assert!(matches!(err, AuthError::ServerNotFound { .. }));
    let after = std::fs::read_to_string(dir.path().join("auth.toml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_usernames_processed_in_caller_order() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);

    let mut service = AuthConfigService::load(store).unwrap();
    // bob fails first, so carol (valid, listed after) must be untouched.
    let err = service
        .delete_user_tokens(
            &ServerResolver::new(),
            &ServerQuery::by_kind("anchore"),
            &["bob".to_string(), "carol".to_string()],
        )
        .unwrap_err();

    assert!(matches!(err, AuthError::UserNotFound { ref username, .. } if username == "bob"));
    let server = service.config().find_server("anchore").unwrap();
    assert!(server.find_user("carol").is_some());
}

#[test]
fn test_delete_by_explicit_server_name() {
    let dir = TempDir::new().unwrap();
    let store = seed_store(&dir);

    let mut service = AuthConfigService::load(store.clone()).unwrap();
    service
        .delete_user_tokens(
            &ServerResolver::new(),
            &ServerQuery::by_name("anchore"),
            &["carol".to_string()],
        )
        .unwrap();

    let reloaded = store.load().unwrap();
    let server = reloaded.find_server("anchore").unwrap();
    assert!(server.find_user("carol").is_none());
    assert!(server.find_user("alice").is_some());
}
