pub mod api_client;
pub mod config;
pub mod error;
pub mod session;
pub mod token_store;
pub mod ui;

pub use api_client::{ListQuery, LoginResponse, RequestOptions, TaskmasterClient};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, TokenStoreError};
pub use session::{Navigator, Notifier, SessionState, Toast, ToastKind};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
mod tests;

use std::time::Duration;

pub const APP_DIR_NAME: &str = "taskmaster";
pub const DEFAULT_SERVER_HOSTNAME: &str = "127.0.0.1";
pub const DEFAULT_SERVER_PORT: u16 = 8000;
pub const DEFAULT_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_SERVER_HOSTNAME, ":", DEFAULT_SERVER_PORT, "/");

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "taskmaster_token";
pub const DEFAULT_LOGIN_PAGE: &str = "/login.html";
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(800);
pub const DEFAULT_SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please sign in again.";

pub const AUTH_LOGIN_ENDPOINT: &str = "/auth/login";
pub const AUTH_REGISTER_ENDPOINT: &str = "/auth/register";
pub const TASKS_ENDPOINT: &str = "/tasks/";
