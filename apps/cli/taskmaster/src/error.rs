use client_core::error::{ApiError, ConfigError, TokenStoreError};

use common::ErrorLocation;

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the `taskmaster` command line.
///
/// Printed as text by default; with `--json` they are serialized so scripts
/// can branch on the variant.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum TaskmasterError {
    /// Error from this app (logger, arguments, output)
    #[error("Taskmaster Error: {message} {location}")]
    Taskmaster {
        message: String,
        location: ErrorLocation,
    },

    /// The server rejected the stored session
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// A request failed with a message worth showing as-is
    #[error("Api Error: {message} {location}")]
    Api {
        message: String,
        status: Option<u16>,
        category: &'static str,
        location: ErrorLocation,
    },

    /// Config could not be loaded or is invalid
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Token file could not be read or written
    #[error("Storage Error: {message} {location}")]
    Storage {
        message: String,
        location: ErrorLocation,
    },
}

impl TaskmasterError {
    #[track_caller]
    pub fn taskmaster(message: impl Into<String>) -> Self {
        TaskmasterError::Taskmaster {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Message for the terminal, without variant prefix or location.
    pub fn user_message(&self) -> &str {
        match self {
            TaskmasterError::Taskmaster { message, .. }
            | TaskmasterError::Unauthorized { message, .. }
            | TaskmasterError::Api { message, .. }
            | TaskmasterError::Config { message, .. }
            | TaskmasterError::Storage { message, .. } => message,
        }
    }

    /// Process exit code: 2 for configuration problems, 3 for an ended
    /// session, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            TaskmasterError::Config { .. } => 2,
            TaskmasterError::Unauthorized { .. } => 3,
            _ => 1,
        }
    }
}

impl From<ApiError> for TaskmasterError {
    #[track_caller]
    fn from(error: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = error.user_message();

        match error {
            ApiError::Unauthorized { .. } => TaskmasterError::Unauthorized { message, location },
            ApiError::TokenStore(_) => TaskmasterError::Storage { message, location },
            other => TaskmasterError::Api {
                message,
                status: other.status_code(),
                category: other.category(),
                location,
            },
        }
    }
}

impl From<ConfigError> for TaskmasterError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        TaskmasterError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<TokenStoreError> for TaskmasterError {
    #[track_caller]
    fn from(error: TokenStoreError) -> Self {
        TaskmasterError::Storage {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<std::io::Error> for TaskmasterError {
    #[track_caller]
    fn from(error: std::io::Error) -> Self {
        TaskmasterError::Taskmaster {
            message: format!("Failed to write output: {error}"),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
