//! Human-readable messages from error response bodies.
//!
//! The backend reports failures as `{"detail": ...}` where `detail` is a
//! plain string, a single `{msg}` object, or a list of validation entries.
//! Bodies are decoded into [`ErrorDetail`] with a fixed precedence instead of
//! probing fields ad hoc:
//!
//! 1. list → [`ErrorDetail::Items`], rendered joined with `", "`
//! 2. object with a non-empty string `msg` → [`ErrorDetail::Message`]
//! 3. non-empty string → [`ErrorDetail::Text`]
//! 4. any other truthy value → [`ErrorDetail::Other`], rendered as compact JSON
//!
//! A falsy `detail` (missing, `null`, `false`, `0`, `""`) means the body has
//! no usable detail and the raw text is used instead.

use common::HttpStatusCode;

use log::debug;
use reqwest::Response;
use serde_json::Value;

const DETAIL_FIELD: &str = "detail";
const MSG_FIELD: &str = "msg";
const ITEM_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Items(Vec<DetailItem>),
    Message(String),
    Text(String),
    Other(Value),
}

/// One entry of a list-valued `detail`.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailItem {
    Message(String),
    Text(String),
    Other(Value),
}

impl ErrorDetail {
    /// Decode the `detail` field of a parsed body, if it carries one.
    pub fn from_body(body: &Value) -> Option<Self> {
        let detail = body.as_object()?.get(DETAIL_FIELD)?;

        if !is_truthy(detail) {
            return None;
        }

        let decoded = match detail {
            Value::Array(items) => {
                ErrorDetail::Items(items.iter().map(DetailItem::from_value).collect())
            }
            Value::String(text) => ErrorDetail::Text(text.clone()),
            other => match msg_of(other) {
                Some(msg) => ErrorDetail::Message(msg),
                None => ErrorDetail::Other(other.clone()),
            },
        };

        Some(decoded)
    }

    pub fn render(&self) -> String {
        match self {
            ErrorDetail::Items(items) => items
                .iter()
                .map(DetailItem::render)
                .collect::<Vec<_>>()
                .join(ITEM_SEPARATOR),
            ErrorDetail::Message(msg) => msg.clone(),
            ErrorDetail::Text(text) => text.clone(),
            ErrorDetail::Other(value) => render_value(value),
        }
    }
}

impl DetailItem {
    fn from_value(value: &Value) -> Self {
        if let Some(msg) = msg_of(value) {
            return DetailItem::Message(msg);
        }

        match value {
            Value::String(text) if !text.is_empty() => DetailItem::Text(text.clone()),
            other => DetailItem::Other(other.clone()),
        }
    }

    fn render(&self) -> String {
        match self {
            DetailItem::Message(msg) => msg.clone(),
            DetailItem::Text(text) => text.clone(),
            DetailItem::Other(value) => render_value(value),
        }
    }
}

fn msg_of(value: &Value) -> Option<String> {
    value
        .as_object()?
        .get(MSG_FIELD)?
        .as_str()
        .filter(|msg| !msg.is_empty())
        .map(str::to_string)
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Strings print bare; everything else prints as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Message for a body that was read successfully.
///
/// Uses the decoded `detail` when there is one, the raw text otherwise.
pub fn message_from_text(text: &str) -> String {
    match serde_json::from_str::<Value>(text) {
        Ok(body) => match ErrorDetail::from_body(&body) {
            Some(detail) => detail.render(),
            None => text.to_string(),
        },
        Err(_) => text.to_string(),
    }
}

/// `"<status> <reason>"` for a status code.
pub fn status_line(status: reqwest::StatusCode) -> String {
    HttpStatusCode(status.as_u16()).status_line(status.canonical_reason())
}

/// Pick the message for a failed response whose body read may have failed.
///
/// Falls back to the status line when the body is unreadable or yields a
/// blank message.
pub fn derive_message<E: std::fmt::Display>(
    body: Result<String, E>,
    status: reqwest::StatusCode,
) -> String {
    match body {
        Ok(text) => {
            let message = message_from_text(&text);
            if message.trim().is_empty() {
                status_line(status)
            } else {
                message
            }
        }
        Err(e) => {
            debug!("Failed to read error body for HTTP {status}: {e}");
            status_line(status)
        }
    }
}

/// Consume a failed response and produce its human-readable message.
pub async fn safe_text(response: Response) -> String {
    let status = response.status();
    derive_message(response.text().await, status)
}
