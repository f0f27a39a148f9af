//! End-to-end command runs against a wiremock server with the token file in a
//! temporary directory.

use taskmaster::cli::Commands;
use taskmaster::commands;
use taskmaster::context::AppContext;
use taskmaster::error::TaskmasterError;

use client_core::{ClientConfig, FileTokenStore, TokenStore};

use common::RedactedToken;

use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use serde_json::{Value, json};

struct Harness {
    context: AppContext,
    store: FileTokenStore,
    _data_dir: TempDir,
}

fn harness(server: &MockServer) -> Harness {
    let data_dir = tempfile::tempdir().unwrap();

    let mut config = ClientConfig::default();
    config.server.base_url = server.uri();
    config.session.redirect_delay_ms = 10;
    config.storage.data_dir = Some(data_dir.path().to_path_buf());

    let store = FileTokenStore::new(data_dir.path(), config.storage.token_key.clone());
    let context = AppContext::with_config(config).unwrap();

    Harness {
        context,
        store,
        _data_dir: data_dir,
    }
}

async fn run(
    harness: &Harness,
    command: Commands,
    json: bool,
) -> (Result<(), TaskmasterError>, String) {
    let mut out = Vec::new();
    let result = commands::run(&harness.context.client, command, json, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

/// **VALUE**: `login` writes the token to the file store the next process will read.
///
/// **WHY THIS MATTERS**: Every later command runs in a new process. If the token only
/// lived in memory, the user would be signed out again immediately.
///
/// **BUG THIS CATCHES**: Would catch the CLI calling `login` instead of
/// `login_and_store`, or the context wiring an in-memory store.
#[tokio::test]
async fn given_valid_credentials_when_running_login_then_token_is_persisted() {
    // GIVEN: A server that accepts the credentials
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "file-token", "token_type": "bearer"})),
        )
        .mount(&server)
        .await;
    let harness = harness(&server);

    // WHEN: Logging in
    let (result, out) = run(
        &harness,
        Commands::Login {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        },
        false,
    )
    .await;

    // THEN: The token is on disk and the user is told
    result.unwrap();
    assert_eq!(out.trim(), "Signed in as a@b.com");
    assert_eq!(harness.store.get().unwrap().unwrap().as_str(), "file-token");
}

#[tokio::test]
async fn given_login_in_json_mode_when_running_then_token_is_not_printed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "secret-token"})))
        .mount(&server)
        .await;
    let harness = harness(&server);

    let (result, out) = run(
        &harness,
        Commands::Login {
            email: "a@b.com".to_string(),
            password: "pw".to_string(),
        },
        true,
    )
    .await;

    result.unwrap();
    assert!(!out.contains("secret-token"));
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["authenticated"], true);
    assert_eq!(value["token_type"], "bearer");
}

#[tokio::test]
async fn given_stored_token_when_listing_then_sends_bearer_and_prints_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .and(query_param("q", "docs"))
        .and(header("Authorization", "Bearer stored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": 6, "title": "Write docs", "description": "", "user_email": "a@b.com"}
            ],
            "page": 2, "limit": 5, "total": 6, "pages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;
    let harness = harness(&server);
    harness.store.set(&RedactedToken::new("stored")).unwrap();

    let (result, out) = run(
        &harness,
        Commands::List {
            page: 2,
            limit: 5,
            query: Some("docs".to_string()),
        },
        false,
    )
    .await;

    result.unwrap();
    assert_eq!(out, "#6  Write docs\nPage 2 of 2 (6 total)\n");
}

/// **VALUE**: A 401 from any command signs the user out on disk.
///
/// **WHY THIS MATTERS**: A stale token left in the file would make every following
/// command fail the same way, with no way forward except deleting files by hand.
///
/// **BUG THIS CATCHES**: Would catch the CLI swallowing `Unauthorized` before the
/// client's session handling runs, or the file store ignoring `clear`.
#[tokio::test]
async fn given_expired_token_when_creating_task_then_file_store_is_cleared() {
    // GIVEN: A stored token the server no longer accepts
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"detail": "Token has expired"})),
        )
        .mount(&server)
        .await;
    let harness = harness(&server);
    harness.store.set(&RedactedToken::new("expired")).unwrap();

    // WHEN: Creating a task
    let (result, out) = run(
        &harness,
        Commands::Create {
            title: "x".to_string(),
            description: None,
        },
        false,
    )
    .await;

    // THEN: Unauthorized, nothing on stdout, token gone
    let error = result.unwrap_err();
    assert!(matches!(error, TaskmasterError::Unauthorized { .. }));
    assert_eq!(error.exit_code(), 3);
    assert!(out.is_empty());
    assert!(harness.store.get().unwrap().is_none());
}

#[tokio::test]
async fn given_validation_failure_when_creating_task_then_error_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tasks/"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"msg": "title cannot be empty"}]
        })))
        .mount(&server)
        .await;
    let harness = harness(&server);
    harness.store.set(&RedactedToken::new("t")).unwrap();

    let (result, _) = run(
        &harness,
        Commands::Create {
            title: " ".to_string(),
            description: None,
        },
        false,
    )
    .await;

    let error = result.unwrap_err();
    assert_eq!(error.user_message(), "title cannot be empty");
    assert!(matches!(error, TaskmasterError::Api { status: Some(422), .. }));
}

#[tokio::test]
async fn given_task_id_when_deleting_in_json_mode_then_reports_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/tasks/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;
    let harness = harness(&server);
    harness.store.set(&RedactedToken::new("t")).unwrap();

    let (result, out) = run(&harness, Commands::Delete { id: "42".to_string() }, true).await;

    result.unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value, json!({"deleted": true, "id": "42"}));
}

#[tokio::test]
async fn given_signed_in_user_when_logging_out_then_status_reports_anonymous() {
    let server = MockServer::start().await;
    let harness = harness(&server);
    harness.store.set(&RedactedToken::new("t")).unwrap();

    let (before, out_before) = run(&harness, Commands::Status, false).await;
    before.unwrap();
    assert!(out_before.starts_with("Signed in to"));

    let (logout, _) = run(&harness, Commands::Logout, false).await;
    logout.unwrap();

    let (after, out_after) = run(&harness, Commands::Status, true).await;
    after.unwrap();
    let value: Value = serde_json::from_str(&out_after).unwrap();
    assert_eq!(value["authenticated"], false);
}
