use crate::helpers::{TEST_REDIRECT_DELAY, TEST_TOKEN, test_client};

use client_core::error::ApiError;
use client_core::session::{SessionState, ToastKind};
use client_core::token_store::TokenStore;
use client_core::{DEFAULT_LOGIN_PAGE, RequestOptions};

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Header injection
// ============================================================================

/// **VALUE**: Anonymous requests carry no `Authorization` header at all.
///
/// **WHY THIS MATTERS**: Sending `Bearer ` or `Bearer null` makes the backend answer
/// 401 instead of its usual "missing token" response, which would trigger a spurious
/// session-expired redirect.
#[tokio::test]
async fn given_no_token_when_fetching_then_authorization_header_is_absent() {
    // GIVEN: A server and a client with an empty token store
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    // WHEN: Fetching
    let response = test
        .client
        .api_fetch("/tasks/", RequestOptions::get())
        .await
        .unwrap();

    // THEN: Request went out without Authorization but with JSON content type
    assert!(response.status().is_success());
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn given_stored_token_when_fetching_then_sends_bearer_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let response = test
        .client
        .api_fetch("/tasks/", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

/// **VALUE**: Caller headers pass through, but Content-Type is always JSON and a
/// caller-supplied Authorization never replaces the stored token.
#[tokio::test]
async fn given_caller_headers_when_fetching_then_merges_and_forces_json_and_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let options = RequestOptions::get()
        .with_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-1"),
        )
        .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .with_header(
            reqwest::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer forged"),
        );

    test.client.api_fetch("/tasks/", options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    assert_eq!(headers.get("x-request-id").unwrap(), "req-1");
    assert_eq!(headers.get("content-type").unwrap(), "application/json");
    assert_eq!(
        headers.get("authorization").unwrap(),
        format!("Bearer {TEST_TOKEN}").as_str()
    );
}

#[tokio::test]
async fn given_base_url_with_path_when_fetching_then_path_is_resolved_under_it() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_core::TaskmasterClient::new(&format!("{}/api", server.uri())).unwrap();

    let response = client
        .api_fetch("/tasks/", RequestOptions::get())
        .await
        .unwrap();

    assert!(response.status().is_success());
}

// ============================================================================
// 401 handling
// ============================================================================

/// **VALUE**: A 401 ends the session: store cleared, exactly one toast, Unauthorized.
///
/// **WHY THIS MATTERS**: This is the single place expired sessions are handled. If it
/// leaves the token behind, every following request fails the same way and the user
/// is stuck on a page that can never load.
///
/// **BUG THIS CATCHES**: Would catch a duplicated toast, a missing clear, or the raw
/// 401 response leaking to the caller.
#[tokio::test]
async fn given_401_when_fetching_then_clears_store_notifies_once_and_fails_unauthorized() {
    // GIVEN: A server that rejects the token, with a detail body
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token has expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    // WHEN: Fetching
    let result = test.client.api_fetch("/tasks/", RequestOptions::get()).await;

    // THEN: Unauthorized regardless of body, token gone, one error toast
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(test.store.get().unwrap().is_none());
    assert_eq!(test.client.session_state(), SessionState::Anonymous);

    let toasts = test.notifier.toasts();
    assert_eq!(toasts.len(), 1, "Exactly one notification");
    assert_eq!(toasts[0].kind, ToastKind::Error);
    assert_eq!(toasts[0].message, "Session expired. Please sign in again.");
}

/// **VALUE**: The login redirect is scheduled, not immediate.
///
/// **WHY THIS MATTERS**: Navigating synchronously would tear down the page before the
/// session-expired toast is ever rendered.
#[tokio::test]
async fn given_401_when_delay_elapses_then_navigates_to_login_page() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(401).set_body_string("garbage"))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let result = test.client.delete_note(3).await;

    assert!(result.unwrap_err().is_unauthorized());
    assert!(
        test.navigator.assigned().is_empty(),
        "Navigation should wait for the delay"
    );

    tokio::time::sleep(TEST_REDIRECT_DELAY * 6).await;

    assert_eq!(test.navigator.assigned(), vec![DEFAULT_LOGIN_PAGE.to_string()]);
    assert!(test.navigator.replaced().is_empty());
}

#[tokio::test]
async fn given_401_without_stored_token_when_fetching_then_still_notifies_and_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let test = test_client(&server, None);

    let result = test.client.get_notes(&Default::default()).await;

    assert!(result.unwrap_err().is_unauthorized());
    assert_eq!(test.notifier.toasts().len(), 1);
}

#[tokio::test]
async fn given_non_401_failure_when_fetching_then_returns_raw_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "nope"})))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let response = test
        .client
        .api_fetch("/tasks/", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
    assert_eq!(test.store.get().unwrap().unwrap().as_str(), TEST_TOKEN);
    assert!(test.notifier.toasts().is_empty());
}
