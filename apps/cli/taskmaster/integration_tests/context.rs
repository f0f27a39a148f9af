use taskmaster::context::AppContext;
use taskmaster::error::TaskmasterError;

use client_core::ClientConfig;

fn config_with_data_dir(dir: std::path::PathBuf) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.storage.data_dir = Some(dir);
    config
}

#[test]
fn given_missing_data_dir_when_ensuring_then_it_is_created() {
    let root = tempfile::tempdir().unwrap();
    let data_dir = root.path().join("nested").join("taskmaster");
    let context = AppContext::with_config(config_with_data_dir(data_dir.clone())).unwrap();

    context.ensure_data_dir().unwrap();

    assert!(data_dir.is_dir());
}

/// **VALUE**: A data directory that cannot be created is reported as such.
///
/// **WHY THIS MATTERS**: Startup creates the directory before anything is printed. A
/// generic "Failed to write output" message sends the user looking at stdout instead
/// of at the path that is actually wrong.
///
/// **BUG THIS CATCHES**: Would catch the directory creation going back through the
/// blanket `io::Error` conversion.
#[test]
fn given_data_dir_under_a_file_when_ensuring_then_error_names_the_directory() {
    let root = tempfile::tempdir().unwrap();
    let blocker = root.path().join("not-a-dir");
    std::fs::write(&blocker, "").unwrap();
    let data_dir = blocker.join("taskmaster");
    let context = AppContext::with_config(config_with_data_dir(data_dir.clone())).unwrap();

    let error = context.ensure_data_dir().unwrap_err();

    assert!(matches!(error, TaskmasterError::Taskmaster { .. }));
    let message = error.user_message();
    assert!(message.starts_with("Failed to create data directory"), "got: {message}");
    assert!(message.contains(&data_dir.display().to_string()));
    assert!(!message.contains("write output"));
}
