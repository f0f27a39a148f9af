use crate::error::TaskmasterError;

use client_core::error::{ApiError, ConfigError, TokenStoreError};

use common::ErrorLocation;

use std::panic::Location;

#[test]
fn given_unauthorized_api_error_when_converting_then_maps_to_unauthorized_with_exit_3() {
    let error = TaskmasterError::from(ApiError::unauthorized());

    assert!(matches!(error, TaskmasterError::Unauthorized { .. }));
    assert_eq!(error.user_message(), "Unauthorized");
    assert_eq!(error.exit_code(), 3);
}

/// **VALUE**: Server messages reach the terminal without the variant prefix.
///
/// **WHY THIS MATTERS**: `taskmaster create ""` should print the server's
/// "title cannot be empty", not a Debug dump or a location suffix.
///
/// **BUG THIS CATCHES**: Would catch `From<ApiError>` using `to_string()` (which carries
/// the "Request failed" prefix and caller location) instead of `user_message()`.
#[test]
fn given_request_failed_when_converting_then_keeps_message_status_and_category() {
    let error = TaskmasterError::from(ApiError::request_failed(422u16, "title cannot be empty"));

    match &error {
        TaskmasterError::Api {
            message,
            status,
            category,
            ..
        } => {
            assert_eq!(message, "title cannot be empty");
            assert_eq!(*status, Some(422));
            assert_eq!(*category, "client_error");
        }
        other => panic!("Expected Api variant, got {other:?}"),
    }
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn given_token_store_failure_inside_api_error_when_converting_then_maps_to_storage() {
    let inner = TokenStoreError::Poisoned {
        location: ErrorLocation::from(Location::caller()),
    };

    let error = TaskmasterError::from(ApiError::from(inner));

    assert!(matches!(error, TaskmasterError::Storage { .. }));
}

#[test]
fn given_config_error_when_converting_then_exit_code_is_2() {
    let error = TaskmasterError::from(ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: "Invalid base URL format: ftp://x".to_string(),
    });

    assert_eq!(error.exit_code(), 2);
    assert!(error.user_message().contains("ftp://x"));
}

#[test]
fn given_error_when_serialized_then_uses_type_and_data_tags() {
    let error = TaskmasterError::taskmaster("boom");

    let value = serde_json::to_value(&error).unwrap();

    assert_eq!(value["type"], "Taskmaster");
    assert_eq!(value["data"]["message"], "boom");
}
