//! Request-client errors.
//!
//! ERROR HANDLING
//! ==============
//! A 401 is reported as [`ApiError::Unauthorized`] only after the token has
//! been cleared and the unauthorized signal emitted, so callers can tell a
//! dead session apart from an application error without acting on it.

/// Generic message used when a failing response carries no `error` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Errors produced by [`super::api::ApiClient`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the bearer token; the session is gone.
    #[error("Unauthorized")]
    Unauthorized,

    /// The server answered with a non-success status other than 401.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (DNS, connect, reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// A success response body could not be decoded.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A success response lacked a field the caller depends on.
    #[error("response missing field `{0}`")]
    MissingField(&'static str),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// HTTP status associated with the error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull the backend's `error` message out of a failure body.
pub(crate) fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(serde_json::Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned())
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
