//! In-process toast stack.
//!
//! Mirrors a page's toast container: the container is created on the first
//! toast, each toast is shown immediately, hidden after its timeout and
//! removed shortly after so an exit transition can play.

use crate::config::UiConfig;
use crate::session::{DEFAULT_TOAST_TIMEOUT, Notifier, Toast};

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::debug;
use uuid::Uuid;

pub const TOAST_CONTAINER_ID: &str = "toast-container";
pub const TOAST_REMOVE_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastContainer {
    pub id: &'static str,
    pub role: &'static str,
    pub aria_live: &'static str,
}

impl Default for ToastContainer {
    fn default() -> Self {
        Self {
            id: TOAST_CONTAINER_ID,
            role: "status",
            aria_live: "polite",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToast {
    pub id: Uuid,
    /// `toast <kind>`
    pub class_name: String,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Default)]
struct ToastCenterState {
    container: Option<ToastContainer>,
    toasts: Vec<ActiveToast>,
}

/// Shared toast stack; clones see the same toasts.
#[derive(Debug, Clone)]
pub struct ToastCenter {
    state: Arc<Mutex<ToastCenterState>>,
    default_timeout: Duration,
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self {
            state: Arc::default(),
            default_timeout: DEFAULT_TOAST_TIMEOUT,
        }
    }
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `toast_timeout_ms` for toasts that carry no timeout of their own.
    pub fn from_config(config: &UiConfig) -> Self {
        Self::default().with_default_timeout(Duration::from_millis(config.toast_timeout_ms))
    }

    pub fn with_default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    fn lock(&self) -> MutexGuard<'_, ToastCenterState> {
        // A panic mid-update leaves at worst a stale toast behind
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn container(&self) -> Option<ToastContainer> {
        self.lock().container.clone()
    }

    /// Toasts currently attached to the container, oldest first.
    pub fn active(&self) -> Vec<ActiveToast> {
        self.lock().toasts.clone()
    }

    /// Add a toast and schedule its hide/remove timers.
    ///
    /// Outside a tokio runtime there is nothing to run the timers; the toast
    /// then stays until [`Self::remove`] is called.
    pub fn show(&self, toast: Toast) -> Uuid {
        let id = Uuid::new_v4();
        let timeout = toast.timeout_or(self.default_timeout);

        {
            let mut state = self.lock();
            state.container.get_or_insert_with(ToastContainer::default);
            state.toasts.push(ActiveToast {
                id,
                class_name: format!("toast {}", toast.kind),
                text: toast.message,
                visible: true,
            });
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let center = self.clone();
                handle.spawn(async move {
                    tokio::time::sleep(timeout).await;
                    center.hide(id);
                    tokio::time::sleep(TOAST_REMOVE_DELAY).await;
                    center.remove(id);
                });
            }
            Err(_) => debug!("No async runtime, toast {id} will not expire on its own"),
        }

        id
    }

    pub fn hide(&self, id: Uuid) {
        if let Some(toast) = self.lock().toasts.iter_mut().find(|t| t.id == id) {
            toast.visible = false;
        }
    }

    pub fn remove(&self, id: Uuid) {
        self.lock().toasts.retain(|t| t.id != id);
    }
}

impl Notifier for ToastCenter {
    fn show_toast(&self, toast: Toast) {
        self.show(toast);
    }
}
