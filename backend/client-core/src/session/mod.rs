//! Session state and the side-effect hooks the client drives.
//!
//! The API client never shows UI or navigates on its own. On a 401 it raises
//! a toast through a [`Notifier`] and schedules a redirect through a
//! [`Navigator`]; embedders decide what those mean (a DOM toast and
//! `location.assign` in a browser shell, a stderr line in the CLI, a
//! recording double in tests).

use crate::token_store::TokenStore;

use std::fmt;
use std::time::Duration;

use log::{debug, error, info, warn};

pub const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3000);

/// Whether a token is currently stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Authenticated,
    Anonymous,
}

impl SessionState {
    pub fn of(store: &dyn TokenStore) -> Self {
        match store.has_token() {
            Ok(true) => SessionState::Authenticated,
            Ok(false) => SessionState::Anonymous,
            Err(e) => {
                warn!("Token store unreadable, treating session as anonymous: {e}");
                SessionState::Anonymous
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// CSS class suffix, as in `toast error`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Info => "info",
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

impl fmt::Display for ToastKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transient, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// `None` leaves the choice to the notifier, which falls back to its
    /// configured default.
    pub timeout: Option<Duration>,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            timeout: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Explicit timeout, else `default`.
    pub fn timeout_or(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }
}

/// Shows user-visible notifications.
pub trait Notifier: Send + Sync {
    fn show_toast(&self, toast: Toast);
}

/// Moves the user to another page.
///
/// `assign` keeps the current page in history, `replace` does not.
pub trait Navigator: Send + Sync {
    fn assign(&self, path: &str);

    fn replace(&self, path: &str);
}

/// Default notifier: writes toasts to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_toast(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => error!("[toast] {}", toast.message),
            ToastKind::Info | ToastKind::Success => info!("[toast] {}", toast.message),
        }
    }
}

/// Default navigator: records the request in the log and goes nowhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn assign(&self, path: &str) {
        info!("Navigation requested: {path}");
    }

    fn replace(&self, path: &str) {
        info!("Navigation (replace) requested: {path}");
    }
}

/// Redirect visitors without a stored token to the login page.
///
/// Returns `true` when a token is present and the caller may continue.
pub fn ensure_auth_or_redirect(
    store: &dyn TokenStore,
    navigator: &dyn Navigator,
    login_page: &str,
) -> bool {
    if SessionState::of(store).is_authenticated() {
        return true;
    }

    debug!("No stored token, redirecting to {login_page}");
    navigator.replace(login_page);
    false
}
