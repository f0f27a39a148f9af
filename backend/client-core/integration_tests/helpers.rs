//! Test helpers for client integration tests.
//!
//! - Recording doubles for the notifier and navigator
//! - A client wired to a wiremock server with a short redirect delay

use client_core::session::{Navigator, Notifier, Toast};
use client_core::token_store::{MemoryTokenStore, TokenStore};
use client_core::TaskmasterClient;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-token-12345";
pub const TEST_REDIRECT_DELAY: Duration = Duration::from_millis(50);

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub assigned: Mutex<Vec<String>>,
    pub replaced: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn assigned(&self) -> Vec<String> {
        self.assigned.lock().unwrap().clone()
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn assign(&self, path: &str) {
        self.assigned.lock().unwrap().push(path.to_string());
    }

    fn replace(&self, path: &str) {
        self.replaced.lock().unwrap().push(path.to_string());
    }
}

/// Client plus handles on every collaborator it was built with.
pub struct TestClient {
    pub client: TaskmasterClient,
    pub store: Arc<MemoryTokenStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
}

/// Build a client against `server`, optionally with a token already stored.
pub fn test_client(server: &MockServer, token: Option<&str>) -> TestClient {
    let store = Arc::new(match token {
        Some(token) => MemoryTokenStore::with_token(token),
        None => MemoryTokenStore::new(),
    });
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());

    let client = TaskmasterClient::builder()
        .with_base_url(server.uri())
        .with_token_store(store.clone() as Arc<dyn TokenStore>)
        .with_notifier(notifier.clone() as Arc<dyn Notifier>)
        .with_navigator(navigator.clone() as Arc<dyn Navigator>)
        .with_redirect_delay(TEST_REDIRECT_DELAY)
        .build()
        .expect("Failed to build test client");

    TestClient {
        client,
        store,
        notifier,
        navigator,
    }
}
