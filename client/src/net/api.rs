//! REST request client for the Stockroom API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every call goes through [`ApiClient::request`], which prefixes the base
//! URL, attaches the bearer token, and decodes JSON. Success bodies served
//! with a non-JSON content type (CSV report exports) come back as a
//! `Value::String`. Resource actions live in the sibling `api_*` modules as
//! thin path/body mappings.
//!
//! ERROR HANDLING
//! ==============
//! One attempt per call: no retry, no timeout, no backoff. A 401 clears the
//! stored token and broadcasts [`AuthEvent::Unauthorized`]; the hosting
//! application decides where to navigate. The caller only sees
//! [`ApiError::Unauthorized`] and never a value.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::broadcast;

use super::error::{ApiError, failure_message};
use super::token_store::{FileTokenStore, TokenStore};
use super::types::{LoginRequest, LoginResponse, Params, RegisterResponse, User};
use crate::config::ClientConfig;

const EVENT_CAPACITY: usize = 16;

/// Session-level signals raised by the request client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The server rejected the token for the request to `path`.
    Unauthorized { path: String },
}

// =============================================================================
// CLIENT
// =============================================================================

/// Shared REST client. Cloning is cheap; clones share the token store and
/// the event channel.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    events: broadcast::Sender<AuthEvent>,
}

impl ApiClient {
    /// Build a client for `base_url` backed by `tokens`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let base_url = base_url.trim_end_matches('/').to_owned();
        Ok(Self { inner: Arc::new(Inner { http, base_url, tokens, events }) })
    }

    /// Build a client from config, persisting the token in the configured file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let tokens = FileTokenStore::open(&config.token_file);
        tracing::debug!(
            path = %tokens.path().display(),
            has_token = tokens.get().is_some(),
            "token store opened"
        );
        Self::new(&config.base_url, Arc::new(tokens))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Current bearer token, if any.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.tokens.get()
    }

    /// Replace the bearer token; `None` removes it from storage.
    pub fn set_token(&self, token: Option<&str>) {
        self.inner.tokens.set(token);
    }

    /// Subscribe to session signals. Only events sent after subscribing are seen.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    /// Send one JSON request to `base_url + path` and decode the response body.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Unauthorized`] on 401 (token cleared, event emitted)
    /// - [`ApiError::Status`] on any other non-2xx status
    /// - [`ApiError::Network`] when no response arrives
    /// - [`ApiError::Decode`] when a 2xx JSON body does not parse
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        self.send(method, path, None::<&Params>, body).await
    }

    /// Like [`ApiClient::request`], deserializing the body into `T`.
    ///
    /// # Errors
    ///
    /// Same as [`ApiClient::request`], plus [`ApiError::Decode`] on a shape mismatch.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<T, ApiError> {
        let value = self.request(method, path, body).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, path, None).await
    }

    pub(crate) async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Value, ApiError> {
        self.send(Method::GET, path, Some(query), None).await
    }

    pub(crate) async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn send<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        tracing::debug!(%method, %url, "api request");

        let mut request = self
            .inner
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.inner.tokens.get() {
            request = request.bearer_auth(token);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.reject_session(path);
            return Err(ApiError::Unauthorized);
        }

        let content_type = response_content_type(response.headers());
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if !status.is_success() {
            let message = failure_message(&text);
            tracing::debug!(status = status.as_u16(), %message, path, "api request failed");
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        parse_body(content_type.as_deref(), &text)
    }

    fn reject_session(&self, path: &str) {
        tracing::info!(path, "server rejected session token; clearing it");
        self.inner.tokens.set(None);
        // No subscribers is fine: nobody is waiting to navigate.
        let _ = self.inner.events.send(AuthEvent::Unauthorized { path: path.to_owned() });
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /auth/login`. Does not store the returned token.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request or response decoding.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = serde_json::to_value(LoginRequest { username, password })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request_as(Method::POST, "/auth/login", Some(&body)).await
    }

    /// `POST /auth/register`. Does not store the returned token.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request or response decoding.
    pub async fn register(&self, user_data: &Value) -> Result<RegisterResponse, ApiError> {
        self.request_as(Method::POST, "/auth/register", Some(user_data)).await
    }

    /// `GET /auth/me`.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request or response decoding.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request_as(Method::GET, "/auth/me", None).await
    }

    /// `POST /auth/logout`. Only notifies the server; the caller clears the token.
    ///
    /// # Errors
    ///
    /// Propagates [`ApiError`] from the request.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.request(Method::POST, "/auth/logout", Some(&Value::Object(serde_json::Map::new())))
            .await
            .map(|_| ())
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("has_token", &self.inner.tokens.get().is_some())
            .finish_non_exhaustive()
    }
}

fn response_content_type(headers: &HeaderMap) -> Option<String> {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_ascii_lowercase)
}

/// Decode a success body. Blank is `Null`; a declared non-JSON type is text.
fn parse_body(content_type: Option<&str>, text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    if content_type.is_some_and(|ct| !ct.contains("json")) {
        return Ok(Value::String(text.to_owned()));
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}
