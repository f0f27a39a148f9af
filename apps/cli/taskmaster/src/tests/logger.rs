// Logger initialization runs once per process, so the ordering-sensitive
// checks live in a single test.

use crate::error::TaskmasterError;
use crate::logger::{LOG_FILE_NAME, initialize};

use std::path::PathBuf;

/// **VALUE**: A bad log directory yields an error, and later calls are harmless no-ops.
///
/// **WHY THIS MATTERS**: The CLI initializes logging after resolving its data directory.
/// An unwritable directory must surface as a `TaskmasterError` instead of a panic, and
/// a second initialization (tests, retries) must never try to install a second global
/// logger.
///
/// **BUG THIS CATCHES**: Would catch `fern::log_file()` being unwrapped, or the Once /
/// AtomicBool guards being removed so fern panics on the second `apply()`.
#[test]
fn given_invalid_then_valid_dir_when_initializing_then_errors_once_and_stays_idempotent() {
    // GIVEN: A path that cannot hold a file on Unix-like systems
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Initializing against it
    let result = initialize(&invalid_dir, false);

    // THEN: The failure is reported as an app error
    match result {
        Err(TaskmasterError::Taskmaster { message, .. }) => {
            assert!(message.contains("log file"), "unexpected message: {message}");
        }
        other => panic!("Expected Taskmaster error, got {other:?}"),
    }

    // WHEN: Initializing again with a usable directory
    let temp_dir = tempfile::tempdir().unwrap();
    let second = initialize(temp_dir.path(), true);

    // THEN: The guard short-circuits and no log file is created
    assert!(second.is_ok(), "Repeated initialization should be a no-op");
    assert!(!temp_dir.path().join(LOG_FILE_NAME).exists());
}
