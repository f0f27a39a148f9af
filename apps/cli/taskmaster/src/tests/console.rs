use crate::console::{ConsoleNavigator, format_toast};

use client_core::Toast;

#[test]
fn given_error_toast_when_formatting_then_prefixes_kind() {
    let line = format_toast(&Toast::error("Session expired. Please sign in again."));

    assert_eq!(line, "[error] Session expired. Please sign in again.");
}

#[test]
fn given_info_toast_when_formatting_then_prefixes_info() {
    assert_eq!(format_toast(&Toast::info("Saved")), "[info] Saved");
}

/// **VALUE**: Being sent to the login page tells the user which command to run.
///
/// **WHY THIS MATTERS**: After a 401 the client navigates to the login page. A terminal
/// cannot open `/login.html`, so the only useful output is the command that signs in.
///
/// **BUG THIS CATCHES**: Would catch the navigator comparing against a hard-coded page
/// instead of the configured login page.
#[test]
fn given_configured_login_page_when_navigating_there_then_hints_login_command() {
    let navigator = ConsoleNavigator::new("/signin");

    assert!(navigator.hint_for("/signin").contains("taskmaster login"));
    assert_eq!(navigator.hint_for("/tasks.html"), "Open /tasks.html to continue.");
}
