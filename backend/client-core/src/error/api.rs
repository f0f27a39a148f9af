//! Error types for API calls.
//!
//! - 401 is its own variant; the session side effects have already run when
//!   a caller sees it
//! - Other non-success statuses keep the status code and the message derived
//!   from the response body
//! - All variants carry ErrorLocation via `#[track_caller]`

use crate::error::token_store::TokenStoreError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("Unauthorized {location}")]
    Unauthorized { location: ErrorLocation },

    #[error("Request Failed: HTTP {status} - {message} {location}")]
    RequestFailed {
        status: HttpStatusCode,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Error: {message} {location}")]
    Http {
        message: String,
        is_timeout: bool,
        is_connection: bool,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid Header Error: {message} {location}")]
    InvalidHeader {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    TokenStore(#[from] TokenStoreError),
}

impl ApiError {
    #[track_caller]
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn request_failed(status: impl Into<HttpStatusCode>, message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status: status.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn json(message: impl Into<String>) -> Self {
        ApiError::Json {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn url(message: impl Into<String>) -> Self {
        ApiError::UrlParse {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Text suitable for a toast: no location, no variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => UNAUTHORIZED_MESSAGE.to_string(),
            ApiError::RequestFailed { message, .. } => message.clone(),
            ApiError::Http { message, .. }
            | ApiError::Json { message, .. }
            | ApiError::UrlParse { message, .. }
            | ApiError::InvalidHeader { message, .. } => message.clone(),
            ApiError::TokenStore(error) => error.to_string(),
        }
    }

    /// Stable label for logs.
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Unauthorized { .. } => "unauthorized",
            ApiError::RequestFailed { status, .. } if status.is_client_error() => "client_error",
            ApiError::RequestFailed { status, .. } if status.is_server_error() => "server_error",
            ApiError::RequestFailed { .. } => "request_failed",
            ApiError::Http {
                is_timeout: true, ..
            } => "timeout",
            ApiError::Http {
                is_connection: true,
                ..
            } => "connection",
            ApiError::Http { .. } => "network",
            ApiError::Json { .. } => "json",
            ApiError::UrlParse { .. } => "url",
            ApiError::InvalidHeader { .. } => "header",
            ApiError::TokenStore(_) => "token_store",
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(HttpStatusCode::UNAUTHORIZED.0),
            ApiError::RequestFailed { status, .. } => Some(status.0),
            _ => None,
        }
    }
}

impl From<url::ParseError> for ApiError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        // Categorize before the error is flattened into a string
        ApiError::Http {
            is_timeout: error.is_timeout(),
            is_connection: error.is_connect(),
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ApiError {
    #[track_caller]
    fn from(error: reqwest::header::InvalidHeaderValue) -> Self {
        ApiError::InvalidHeader {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
