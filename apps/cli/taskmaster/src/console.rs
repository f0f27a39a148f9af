//! Terminal stand-ins for the browser's toast and location APIs.

use client_core::{Navigator, Notifier, Toast};

use std::io::{Write, stderr};

use log::debug;

/// Render a toast as a single terminal line: `[error] Session expired.`
pub fn format_toast(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind, toast.message)
}

/// Prints toasts to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn show_toast(&self, toast: Toast) {
        let _ = writeln!(stderr(), "{}", format_toast(&toast));
    }
}

/// Turns navigation requests into hints, since a terminal has no pages.
#[derive(Debug, Clone)]
pub struct ConsoleNavigator {
    login_page: String,
}

impl ConsoleNavigator {
    pub fn new(login_page: impl Into<String>) -> Self {
        Self {
            login_page: login_page.into(),
        }
    }

    /// Line printed when something asks to navigate to `path`.
    pub fn hint_for(&self, path: &str) -> String {
        if path == self.login_page {
            "Run `taskmaster login <email>` to sign in.".to_string()
        } else {
            format!("Open {path} to continue.")
        }
    }

    fn print_hint(&self, path: &str) {
        debug!("Navigation requested: {path}");
        let _ = writeln!(stderr(), "{}", self.hint_for(path));
    }
}

impl Navigator for ConsoleNavigator {
    fn assign(&self, path: &str) {
        self.print_hint(path);
    }

    fn replace(&self, path: &str) {
        self.print_hint(path);
    }
}
