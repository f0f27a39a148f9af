//! Shared building blocks for the TaskMaster client workspace.
//!
//! ## Architecture
//!
//! - **common** (this crate): error locations, HTTP status helpers and the
//!   redacted bearer token
//! - **client-core**: session-aware API client built on these types
//! - **taskmaster**: command-line front end wiring everything together

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
