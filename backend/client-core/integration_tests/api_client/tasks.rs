use crate::helpers::{TEST_TOKEN, test_client};

use client_core::ListQuery;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: `get_notes(page 2, limit 5, q "foo")` → `GET /tasks/?page=2&limit=5&q=foo`.
#[tokio::test]
async fn given_page_limit_and_search_when_listing_then_sends_query_parameters() {
    let server = MockServer::start().await;
    let page = json!({"items": [], "page": 2, "limit": 5, "total": 0, "pages": 1});
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("q", "foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let query = ListQuery::default()
        .with_page(2)
        .with_limit(5)
        .with_search("foo");
    let body = test.client.get_notes(&query).await.unwrap();

    assert_eq!(body, page);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("page=2&limit=5&q=foo"));
}

#[tokio::test]
async fn given_default_query_when_listing_then_omits_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    test.client.get_notes(&ListQuery::default()).await.unwrap();
}

#[tokio::test]
async fn given_title_only_when_creating_then_sends_empty_description() {
    let server = MockServer::start().await;
    let created = json!({"id": 7, "title": "Buy milk", "description": "", "user_email": "a@b.com"});
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .and(header("authorization", "Bearer test-token-12345"))
        .and(body_json(json!({"title": "Buy milk", "description": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(created.clone()))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let task = test.client.create_note("Buy milk", None).await.unwrap();

    assert_eq!(task, created);
}

#[tokio::test]
async fn given_description_when_creating_then_sends_it() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .and(body_json(json!({"title": "Report", "description": "Q3 numbers"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 8})))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    test.client
        .create_note("Report", Some("Q3 numbers"))
        .await
        .unwrap();
}

#[tokio::test]
async fn given_blank_title_when_creating_then_fails_with_validation_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"msg": "Value error, title cannot be empty"}]
        })))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.create_note("   ", None).await.unwrap_err();

    assert_eq!(error.user_message(), "Value error, title cannot be empty");
}

#[tokio::test]
async fn given_existing_task_when_deleting_then_returns_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    assert!(test.client.delete_note(42).await.unwrap());
}

/// **VALUE**: Non-401 failures keep the session and surface the server's detail.
#[tokio::test]
async fn given_foreign_task_when_deleting_then_fails_with_detail_and_keeps_session() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/9"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"detail": "Not allowed to delete this task"})),
        )
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.delete_note("9").await.unwrap_err();

    assert_eq!(error.user_message(), "Not allowed to delete this task");
    assert_eq!(error.status_code(), Some(403));
    assert!(test.notifier.toasts().is_empty());
}

#[tokio::test]
async fn given_plain_text_error_when_listing_then_uses_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.get_notes(&ListQuery::default()).await.unwrap_err();

    assert_eq!(error.user_message(), "oops");
    assert_eq!(error.category(), "server_error");
}

#[tokio::test]
async fn given_empty_error_body_when_listing_then_uses_status_line() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.get_notes(&ListQuery::default()).await.unwrap_err();

    assert_eq!(error.user_message(), "503 Service Unavailable");
}

#[tokio::test]
async fn given_no_content_response_when_deleting_then_returns_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    assert!(test.client.delete_note(7).await.unwrap());
}

/// **VALUE**: A task id is always one path segment under `/tasks/`.
///
/// **WHY THIS MATTERS**: Ids come from the command line. Joined as raw text, an id of
/// `../auth/login` resolves to `/auth/login` and sends an authenticated DELETE there.
///
/// **BUG THIS CATCHES**: Would catch the id being spliced into the path with
/// `format!` instead of pushed as an encoded segment.
#[tokio::test]
async fn given_id_with_path_separators_when_deleting_then_stays_under_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/..%2Fauth%2Flogin"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Task not found"})))
        .expect(1)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    let error = test.client.delete_note("../auth/login").await.unwrap_err();

    assert_eq!(error.status_code(), Some(404));
    assert_eq!(error.user_message(), "Task not found");
}

#[tokio::test]
async fn given_dot_segment_id_when_deleting_then_fails_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let test = test_client(&server, Some(TEST_TOKEN));

    for id in ["..", ".", ""] {
        let error = test.client.delete_note(id).await.unwrap_err();
        assert_eq!(error.category(), "url", "id {id:?} should be rejected");
    }
}
