// Unit tests for token stores
// Both implementations must behave identically through the trait

use crate::error::TokenStoreError;
use crate::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
use crate::TOKEN_KEY;

use common::RedactedToken;

use tempfile::TempDir;

fn exercise_round_trip(store: &dyn TokenStore) {
    assert!(store.get().unwrap().is_none(), "Store should start empty");

    store.set(&RedactedToken::new("abc")).unwrap();
    assert_eq!(store.get().unwrap().unwrap().as_str(), "abc");
    assert!(store.has_token().unwrap());

    store.set(&RedactedToken::new("def")).unwrap();
    assert_eq!(store.get().unwrap().unwrap().as_str(), "def");
}

/// **VALUE**: Clearing twice leaves the store empty both times with no error.
///
/// **WHY THIS MATTERS**: Logout and a 401 can race; the second clear must not fail.
fn exercise_idempotent_clear(store: &dyn TokenStore) {
    store.set(&RedactedToken::new("abc")).unwrap();

    store.clear().unwrap();
    assert!(store.get().unwrap().is_none());

    store.clear().unwrap();
    assert!(store.get().unwrap().is_none());
}

#[test]
fn given_memory_store_when_setting_and_getting_then_returns_latest_token() {
    exercise_round_trip(&MemoryTokenStore::new());
}

#[test]
fn given_memory_store_when_cleared_twice_then_stays_empty_without_error() {
    exercise_idempotent_clear(&MemoryTokenStore::new());
}

#[test]
fn given_empty_token_when_stored_then_reads_back_as_absent() {
    let store = MemoryTokenStore::with_token("");

    assert!(store.get().unwrap().is_none());
}

#[test]
fn given_file_store_when_setting_and_getting_then_returns_latest_token() {
    let dir = TempDir::new().unwrap();

    exercise_round_trip(&FileTokenStore::new(dir.path(), TOKEN_KEY));
}

#[test]
fn given_file_store_when_cleared_twice_then_stays_empty_without_error() {
    let dir = TempDir::new().unwrap();

    exercise_idempotent_clear(&FileTokenStore::new(dir.path(), TOKEN_KEY));
}

#[test]
fn given_never_written_file_store_when_cleared_then_succeeds_without_creating_file() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path().join("nested"), TOKEN_KEY);

    store.clear().unwrap();

    assert!(!store.path().exists());
}

/// **VALUE**: The token survives a "restart" (a fresh store over the same directory).
///
/// **WHY THIS MATTERS**: This is what makes the file store a replacement for browser
/// local storage: a CLI login must still be valid on the next invocation.
#[test]
fn given_token_written_when_new_store_opens_same_dir_then_token_is_read() {
    let dir = TempDir::new().unwrap();
    FileTokenStore::new(dir.path(), TOKEN_KEY)
        .set(&RedactedToken::new("persisted"))
        .unwrap();

    let reopened = FileTokenStore::new(dir.path(), TOKEN_KEY);

    assert_eq!(reopened.get().unwrap().unwrap().as_str(), "persisted");
}

#[test]
fn given_other_keys_in_file_when_clearing_token_then_other_keys_survive() {
    let dir = TempDir::new().unwrap();
    let token_store = FileTokenStore::new(dir.path(), TOKEN_KEY);
    let other_store = FileTokenStore::new(dir.path(), "theme");

    other_store.set(&RedactedToken::new("dark")).unwrap();
    token_store.set(&RedactedToken::new("abc")).unwrap();
    token_store.clear().unwrap();

    assert!(token_store.get().unwrap().is_none());
    assert_eq!(other_store.get().unwrap().unwrap().as_str(), "dark");
}

#[test]
fn given_corrupt_file_when_reading_then_returns_parse_error() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path(), TOKEN_KEY);
    std::fs::write(store.path(), "{not json").unwrap();

    let result = store.get();

    assert!(matches!(result, Err(TokenStoreError::ParseError { .. })));
}

#[test]
fn given_written_token_when_inspecting_file_then_no_temp_file_remains() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path(), TOKEN_KEY);

    store.set(&RedactedToken::new("abc")).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "Temp file should be renamed away");
}

#[cfg(unix)]
fn file_mode(path: &std::path::Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

/// **VALUE**: The token file is readable by its owner only.
///
/// **WHY THIS MATTERS**: The file holds a live bearer token. With the default umask it
/// would be world-readable and any local user could reuse the session.
///
/// **BUG THIS CATCHES**: Would catch the store going back to a plain `fs::write`, which
/// creates the file with 0644.
#[cfg(unix)]
#[test]
fn given_token_written_when_checking_file_mode_then_owner_only() {
    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path(), TOKEN_KEY);

    store.set(&RedactedToken::new("secret")).unwrap();

    assert_eq!(file_mode(store.path()), 0o600);
}

#[cfg(unix)]
#[test]
fn given_world_readable_file_when_token_rewritten_then_permissions_are_tightened() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let store = FileTokenStore::new(dir.path(), TOKEN_KEY);
    std::fs::write(store.path(), "{}").unwrap();
    std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();
    let stale_temp = store.path().with_extension("json.tmp");
    std::fs::write(&stale_temp, "").unwrap();
    std::fs::set_permissions(&stale_temp, std::fs::Permissions::from_mode(0o644)).unwrap();

    store.set(&RedactedToken::new("secret")).unwrap();

    assert_eq!(file_mode(store.path()), 0o600);
}
