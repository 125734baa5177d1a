//! Application-level errors surfaced by `main`.

use client::ApiError;
use client::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("invalid parameter `{0}`; expected KEY=VALUE")]
    InvalidParam(String),
    #[error("not signed in; run `stockroom login` first")]
    NotSignedIn,
    #[error("already signed in as {0}; run `stockroom logout` first")]
    AlreadySignedIn(String),
    #[error("session expired; sign in again with `stockroom login`")]
    SessionExpired,
}
