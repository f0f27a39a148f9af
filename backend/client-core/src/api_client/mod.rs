pub mod error_detail;
pub mod models;
pub mod request;

pub use error_detail::{DetailItem, ErrorDetail, safe_text};
pub use models::{ListQuery, LoginResponse};
pub use request::RequestOptions;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::{
    LogNavigator, LogNotifier, Navigator, Notifier, SessionState, Toast, ensure_auth_or_redirect,
};
use crate::token_store::{MemoryTokenStore, TokenStore};
use crate::{
    AUTH_LOGIN_ENDPOINT, AUTH_REGISTER_ENDPOINT, DEFAULT_BASE_URL, DEFAULT_LOGIN_PAGE,
    DEFAULT_REDIRECT_DELAY, DEFAULT_SESSION_EXPIRED_MESSAGE, TASKS_ENDPOINT,
};

use models::{Credentials, NewTask, RawLoginResponse};

use common::HttpStatusCode;

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Response};
use serde_json::Value;
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const JSON_CONTENT_TYPE: &str = "application/json";

/// What happens to the user when the server ends the session.
#[derive(Debug, Clone)]
struct SessionOptions {
    login_page: String,
    redirect_delay: Duration,
    expired_message: String,
}

/// Session-aware client for the TaskMaster HTTP API.
///
/// Cheap to clone; clones share the token store, notifier and navigator.
#[derive(Clone)]
pub struct TaskmasterClient {
    base_url: Url,
    client: Client,
    token_store: Arc<dyn TokenStore>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    session: SessionOptions,
}

impl TaskmasterClient {
    pub fn builder() -> TaskmasterClientBuilder {
        TaskmasterClientBuilder::default()
    }

    /// Client with an in-memory token store and log-only hooks.
    pub fn new(base_url_str: &str) -> Result<Self, ApiError> {
        Self::builder().with_base_url(base_url_str).build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    pub fn login_page(&self) -> &str {
        &self.session.login_page
    }

    /// Paths are resolved under the base URL; a leading `/` does not escape
    /// a base path such as `http://host/api/`.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Send a request carrying the stored bearer token.
    ///
    /// `Content-Type: application/json` is always set. `Authorization` is set
    /// from the token store and never taken from `options`.
    ///
    /// # Errors
    /// - [`ApiError::Unauthorized`] on a 401, after the session has been ended
    ///   (toast shown, token cleared, login redirect scheduled)
    /// - [`ApiError::Http`] on transport failures
    ///
    /// Any other status is returned to the caller as-is.
    pub async fn api_fetch(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        self.fetch_url(url, options).await
    }

    /// [`Self::api_fetch`] for an already resolved URL.
    async fn fetch_url(&self, url: Url, options: RequestOptions) -> Result<Response, ApiError> {
        let RequestOptions {
            method,
            mut headers,
            body,
        } = options;

        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.remove(AUTHORIZATION);

        if let Some(token) = self.token_store.get()? {
            let mut value = HeaderValue::from_str(&token.bearer_header())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        debug!("{method} {url}");

        let mut request = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(&body)?);
        }

        let response = request.send().await?;

        if HttpStatusCode(response.status().as_u16()).is_unauthorized() {
            self.end_session();
            return Err(ApiError::unauthorized());
        }

        Ok(response)
    }

    /// 401 handling: one toast, clear the token, redirect after a delay.
    fn end_session(&self) {
        warn!("Server rejected the session (HTTP 401), signing out");

        self.notifier
            .show_toast(Toast::error(self.session.expired_message.clone()));

        if let Err(e) = self.token_store.clear() {
            warn!("Failed to clear token after 401: {e}");
        }

        let navigator = Arc::clone(&self.navigator);
        let login_page = self.session.login_page.clone();
        let delay = self.session.redirect_delay;

        // Give the toast a moment on screen before leaving the page
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.assign(&login_page);
        });
    }

    /// POST without the stored token (login and register).
    async fn post_anonymous(
        &self,
        path: &str,
        credentials: &Credentials<'_>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path)?;
        debug!("POST {url}");

        Ok(self
            .client
            .post(url)
            .json(credentials)
            .send()
            .await?)
    }

    /// Turn a non-success response into [`ApiError::RequestFailed`].
    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = HttpStatusCode(response.status().as_u16());
        if status.is_success() {
            return Ok(response);
        }

        let message = safe_text(response).await;
        debug!("HTTP {status} failed: {message}");
        Err(ApiError::request_failed(status, message))
    }

    /// Exchange credentials for a token.
    ///
    /// The token is returned, not stored; see [`Self::login_and_store`].
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .post_anonymous(AUTH_LOGIN_ENDPOINT, &Credentials { email, password })
            .await?;
        let response = Self::ensure_success(response).await?;

        let raw: RawLoginResponse = response.json().await?;
        let login = raw
            .normalize()
            .ok_or_else(|| ApiError::json("login response did not contain a token"))?;

        info!(
            "Login succeeded ({} token, {} chars)",
            login.token_type,
            login.access_token.len()
        );
        Ok(login)
    }

    /// Persist a login result, moving the session to Authenticated.
    pub fn store_login(&self, login: &LoginResponse) -> Result<(), ApiError> {
        self.token_store.set(&login.access_token)?;
        Ok(())
    }

    pub async fn login_and_store(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let login = self.login(email, password).await?;
        self.store_login(&login)?;
        Ok(login)
    }

    /// Create an account. The server's body is returned unchanged.
    pub async fn register(&self, email: &str, password: &str) -> Result<Value, ApiError> {
        let response = self
            .post_anonymous(AUTH_REGISTER_ENDPOINT, &Credentials { email, password })
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// `GET /tasks/?page=&limit=[&q=]`.
    pub async fn get_notes(&self, query: &ListQuery) -> Result<Value, ApiError> {
        let path = format!("{TASKS_ENDPOINT}?{}", query.to_query_string());

        let response = self.api_fetch(&path, RequestOptions::get()).await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// `POST /tasks/` with `{title, description}`; `None` sends `""`.
    pub async fn create_note(
        &self,
        title: &str,
        description: Option<&str>,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(NewTask {
            title,
            description: description.unwrap_or_default(),
        })?;

        let response = self
            .api_fetch(TASKS_ENDPOINT, RequestOptions::post(body))
            .await?;
        let response = Self::ensure_success(response).await?;

        Ok(response.json().await?)
    }

    /// `/tasks/{id}` with `id` percent-encoded as a single path segment, so an
    /// id like `../auth/login` cannot address another resource.
    fn task_url(&self, id: &str) -> Result<Url, ApiError> {
        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::url(format!("Invalid task id: '{id}'")));
        }

        let mut url = self.endpoint(TASKS_ENDPOINT)?;
        url.path_segments_mut()
            .map_err(|()| ApiError::url(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// `DELETE /tasks/{id}`. The response body is ignored.
    ///
    /// # Errors
    /// [`ApiError::UrlParse`] for an empty, `.` or `..` id, before any request.
    pub async fn delete_note(&self, id: impl Display) -> Result<bool, ApiError> {
        let url = self.task_url(&id.to_string())?;

        let response = self.fetch_url(url, RequestOptions::delete()).await?;
        Self::ensure_success(response).await?;

        Ok(true)
    }

    /// Drop the stored token. Safe to call when already signed out.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.token_store.clear()?;
        info!("Signed out");
        Ok(())
    }

    pub fn session_state(&self) -> SessionState {
        SessionState::of(self.token_store.as_ref())
    }

    /// Send anonymous visitors to the login page. `true` means stay.
    pub fn ensure_auth_or_redirect(&self) -> bool {
        ensure_auth_or_redirect(
            self.token_store.as_ref(),
            self.navigator.as_ref(),
            &self.session.login_page,
        )
    }

    /// Show a toast through the configured notifier.
    pub fn show_toast(&self, toast: Toast) {
        self.notifier.show_toast(toast);
    }
}

/// Builder for [`TaskmasterClient`].
///
/// Every collaborator has a default: in-memory token store, log-only
/// notifier and navigator, [`DEFAULT_BASE_URL`].
#[derive(Default)]
pub struct TaskmasterClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    token_store: Option<Arc<dyn TokenStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
    login_page: Option<String>,
    redirect_delay: Option<Duration>,
    expired_message: Option<String>,
}

impl TaskmasterClientBuilder {
    /// Base URL, login page, redirect delay, expiry message and timeout from
    /// config. Collaborators still need to be supplied separately.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::default()
            .with_base_url(config.server.base_url.clone())
            .with_timeout(Duration::from_secs(config.server.timeout_secs))
            .with_login_page(config.session.login_page.clone())
            .with_redirect_delay(Duration::from_millis(config.session.redirect_delay_ms))
            .with_expired_message(config.session.expired_message.clone())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_login_page(mut self, page: impl Into<String>) -> Self {
        self.login_page = Some(page.into());
        self
    }

    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = Some(delay);
        self
    }

    pub fn with_expired_message(mut self, message: impl Into<String>) -> Self {
        self.expired_message = Some(message.into());
        self
    }

    /// # Errors
    /// [`ApiError::UrlParse`] for an unparseable base URL, [`ApiError::Http`]
    /// if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<TaskmasterClient, ApiError> {
        let mut base = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Url::join replaces the last segment unless the base ends in '/'
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)?;

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT_DURATION))
            .build()?;

        Ok(TaskmasterClient {
            base_url,
            client,
            token_store: self
                .token_store
                .unwrap_or_else(|| Arc::new(MemoryTokenStore::new())),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(LogNavigator)),
            session: SessionOptions {
                login_page: self
                    .login_page
                    .unwrap_or_else(|| DEFAULT_LOGIN_PAGE.to_string()),
                redirect_delay: self.redirect_delay.unwrap_or(DEFAULT_REDIRECT_DELAY),
                expired_message: self
                    .expired_message
                    .unwrap_or_else(|| DEFAULT_SESSION_EXPIRED_MESSAGE.to_string()),
            },
        })
    }
}
