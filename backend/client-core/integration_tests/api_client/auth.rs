use crate::helpers::{TEST_TOKEN, test_client};

use client_core::error::ApiError;
use client_core::session::SessionState;
use client_core::token_store::TokenStore;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// login()
// ============================================================================

/// **VALUE**: The current backend answers `{"token": ...}`; callers get `access_token`.
///
/// **BUG THIS CATCHES**: Would catch the legacy field fallback or the `bearer` default
/// going missing, and a login that sends the wrong body or path.
#[tokio::test]
async fn given_legacy_token_response_when_logging_in_then_normalizes_to_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let login = test.client.login("a@b.com", "pw").await.unwrap();

    assert_eq!(login.access_token.as_str(), "abc");
    assert_eq!(login.token_type, "bearer");
    // login() alone does not store
    assert!(test.store.get().unwrap().is_none());
}

#[tokio::test]
async fn given_access_token_response_when_logging_in_then_keeps_token_type() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "xyz", "token_type": "jwt"})),
        )
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let login = test.client.login("a@b.com", "pw").await.unwrap();

    assert_eq!(login.access_token.as_str(), "xyz");
    assert_eq!(login.token_type, "jwt");
}

/// **VALUE**: Bad credentials surface the server's message and do not end a session.
///
/// **WHY THIS MATTERS**: Login is unauthenticated. A 401 there means "wrong password",
/// not "session expired", so there must be no session-expired toast or redirect.
#[tokio::test]
async fn given_invalid_credentials_when_logging_in_then_fails_with_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Invalid credentials"})),
        )
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.login("a@b.com", "wrong").await.unwrap_err();

    match &error {
        ApiError::RequestFailed { status, message, .. } => {
            assert_eq!(status.0, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
    assert!(test.notifier.toasts().is_empty());
    assert_eq!(test.store.get().unwrap().unwrap().as_str(), TEST_TOKEN);
}

#[tokio::test]
async fn given_login_request_when_sent_then_carries_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "new"})))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    test.client.login("a@b.com", "pw").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn given_success_without_token_when_logging_in_then_returns_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let result = test.client.login("a@b.com", "pw").await;

    assert!(matches!(result, Err(ApiError::Json { .. })));
}

// ============================================================================
// Session transitions
// ============================================================================

/// **VALUE**: Anonymous → Authenticated on login, back to Anonymous on logout.
#[tokio::test]
async fn given_anonymous_session_when_login_and_logout_then_state_follows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .mount(&server)
        .await;
    let test = test_client(&server, None);
    assert_eq!(test.client.session_state(), SessionState::Anonymous);

    test.client.login_and_store("a@b.com", "pw").await.unwrap();
    assert_eq!(test.client.session_state(), SessionState::Authenticated);
    assert_eq!(test.store.get().unwrap().unwrap().as_str(), "abc");

    test.client.logout().unwrap();
    test.client.logout().unwrap();
    assert_eq!(test.client.session_state(), SessionState::Anonymous);
}

#[tokio::test]
async fn given_anonymous_visitor_when_guarding_then_replaces_to_login_page() {
    let server = MockServer::start().await;
    let test = test_client(&server, None);

    assert!(!test.client.ensure_auth_or_redirect());
    assert_eq!(test.navigator.replaced(), vec!["/login.html".to_string()]);

    test.client.token_store().set(&common::RedactedToken::new("abc")).unwrap();
    assert!(test.client.ensure_auth_or_redirect());
    assert_eq!(test.navigator.replaced().len(), 1);
}

// ============================================================================
// register()
// ============================================================================

#[tokio::test]
async fn given_new_account_when_registering_then_returns_body_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({"email": "a@b.com", "password": "pw"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": 1, "email": "a@b.com"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let user = test.client.register("a@b.com", "pw").await.unwrap();

    assert_eq!(user, json!({"id": 1, "email": "a@b.com"}));
}

/// **VALUE**: FastAPI validation errors (422 with a list of `{msg}`) become one line.
#[tokio::test]
async fn given_validation_errors_when_registering_then_joins_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "email"], "msg": "field required", "type": "missing"},
                {"loc": ["body", "password"], "msg": "too short", "type": "value_error"}
            ]
        })))
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let error = test.client.register("a@b.com", "").await.unwrap_err();

    assert_eq!(error.user_message(), "field required, too short");
    assert_eq!(error.status_code(), Some(422));
}
