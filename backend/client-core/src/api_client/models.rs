//! Request and response shapes the client itself cares about.
//!
//! Tasks and users stay opaque `serde_json::Value`s; only the login response
//! is normalized.

use common::RedactedToken;

use serde::{Deserialize, Serialize};

pub const DEFAULT_TOKEN_TYPE: &str = "bearer";
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Serialize)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewTask<'a> {
    pub title: &'a str,
    pub description: &'a str,
}

/// Login body as the server may send it: `access_token` or legacy `token`.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Normalized login result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    pub access_token: RedactedToken,
    pub token_type: String,
}

impl RawLoginResponse {
    /// First non-empty of `access_token` then `token`; `token_type` defaults
    /// to `"bearer"`. `None` when the body has no token at all.
    pub fn normalize(self) -> Option<LoginResponse> {
        let access_token = self
            .access_token
            .filter(|t| !t.is_empty())
            .or(self.token.filter(|t| !t.is_empty()))?;

        let token_type = self
            .token_type
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string());

        Some(LoginResponse {
            access_token: RedactedToken::new(access_token),
            token_type,
        })
    }
}

/// Paging and search parameters for the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub q: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            q: None,
        }
    }
}

impl ListQuery {
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// `page=..&limit=..[&q=..]`, form-encoded. An empty `q` is omitted.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        serializer
            .append_pair("page", &self.page.to_string())
            .append_pair("limit", &self.limit.to_string());

        if let Some(q) = self.q.as_deref().filter(|q| !q.is_empty()) {
            serializer.append_pair("q", q);
        }

        serializer.finish()
    }
}
