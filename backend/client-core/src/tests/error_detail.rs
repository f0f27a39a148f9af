// Unit tests for error message derivation
// HTTP-level behavior is covered in integration_tests/api_client

use crate::api_client::error_detail::{
    DetailItem, ErrorDetail, derive_message, message_from_text, status_line,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================
// message_from_text
// ============================================

/// **VALUE**: The common FastAPI shape, `{"detail": "..."}`, yields the detail string.
///
/// **BUG THIS CATCHES**: Would catch returning the raw JSON text instead of the message,
/// which would show `{"detail":"bad input"}` in the toast.
#[test]
fn given_string_detail_when_deriving_message_then_returns_detail() {
    assert_eq!(message_from_text(r#"{"detail":"bad input"}"#), "bad input");
}

/// **VALUE**: Validation errors arrive as a list of `{msg}` entries and are joined.
///
/// **WHY THIS MATTERS**: Registration with a bad email or long password returns 422 with
/// several entries. Users need all of them, in order, in one line.
#[test]
fn given_list_of_msg_objects_when_deriving_message_then_joins_with_comma() {
    let body = r#"{"detail":[{"msg":"field required"},{"msg":"too short"}]}"#;

    assert_eq!(message_from_text(body), "field required, too short");
}

#[test]
fn given_non_json_body_when_deriving_message_then_returns_raw_text() {
    assert_eq!(message_from_text("oops"), "oops");
}

#[test]
fn given_json_without_detail_when_deriving_message_then_returns_raw_text() {
    let body = r#"{"error":"nope"}"#;

    assert_eq!(message_from_text(body), body);
}

#[test]
fn given_detail_object_with_msg_when_deriving_message_then_returns_msg() {
    assert_eq!(
        message_from_text(r#"{"detail":{"msg":"Token has expired","type":"auth"}}"#),
        "Token has expired"
    );
}

/// **VALUE**: Pins down the object-without-msg case: rendered as compact JSON.
///
/// **BUG THIS CATCHES**: Would catch a regression to an opaque placeholder string
/// (or an empty message) when the server sends an unexpected detail object.
#[test]
fn given_detail_object_without_msg_when_deriving_message_then_renders_compact_json() {
    assert_eq!(
        message_from_text(r#"{"detail":{"code":42}}"#),
        r#"{"code":42}"#
    );
}

#[test]
fn given_falsy_detail_when_deriving_message_then_returns_raw_text() {
    for body in [
        r#"{"detail":""}"#,
        r#"{"detail":null}"#,
        r#"{"detail":false}"#,
        r#"{"detail":0}"#,
    ] {
        assert_eq!(message_from_text(body), body, "body: {body}");
    }
}

#[test]
fn given_mixed_list_items_when_deriving_message_then_renders_each_item() {
    let body = r#"{"detail":[{"msg":"bad email"},"plain",{"loc":["body"]},7]}"#;

    assert_eq!(
        message_from_text(body),
        r#"bad email, plain, {"loc":["body"]}, 7"#
    );
}

// ============================================
// ErrorDetail decoding
// ============================================

#[test]
fn given_detail_values_when_decoding_then_picks_expected_variant() {
    assert_eq!(
        ErrorDetail::from_body(&json!({"detail": "x"})),
        Some(ErrorDetail::Text("x".to_string()))
    );
    assert_eq!(
        ErrorDetail::from_body(&json!({"detail": {"msg": "m"}})),
        Some(ErrorDetail::Message("m".to_string()))
    );
    assert_eq!(
        ErrorDetail::from_body(&json!({"detail": [{"msg": "a"}, "b"]})),
        Some(ErrorDetail::Items(vec![
            DetailItem::Message("a".to_string()),
            DetailItem::Text("b".to_string()),
        ]))
    );
    assert_eq!(
        ErrorDetail::from_body(&json!({"detail": true})),
        Some(ErrorDetail::Other(json!(true)))
    );
    assert_eq!(ErrorDetail::from_body(&json!(["detail"])), None);
    assert_eq!(ErrorDetail::from_body(&json!("detail")), None);
}

#[test]
fn given_empty_detail_list_when_rendering_then_returns_empty_string() {
    let detail = ErrorDetail::from_body(&json!({"detail": []}));

    assert_eq!(detail.map(|d| d.render()), Some(String::new()));
}

// ============================================
// derive_message fallbacks
// ============================================

/// **VALUE**: An unreadable body falls back to `"<status> <reason>"`.
///
/// **WHY THIS MATTERS**: Dropped connections mid-body must still produce a message the
/// user can act on instead of an empty toast.
#[test]
fn given_unreadable_body_when_deriving_message_then_returns_status_line() {
    let body: Result<String, &str> = Err("connection reset");

    let message = derive_message(body, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(message, "500 Internal Server Error");
}

#[test]
fn given_blank_body_when_deriving_message_then_returns_status_line() {
    let body: Result<String, &str> = Ok(String::new());

    assert_eq!(derive_message(body, StatusCode::BAD_GATEWAY), "502 Bad Gateway");
}

#[test]
fn given_readable_body_when_deriving_message_then_uses_body() {
    let body: Result<String, &str> = Ok(r#"{"detail":"Task not found"}"#.to_string());

    assert_eq!(derive_message(body, StatusCode::NOT_FOUND), "Task not found");
}

#[test]
fn given_status_when_building_status_line_then_includes_canonical_reason() {
    assert_eq!(status_line(StatusCode::FORBIDDEN), "403 Forbidden");
}
