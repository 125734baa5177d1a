//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const TOKEN_FILE_NAME: &str = "token.json";
pub const CONFIG_DIR_NAME: &str = ".stockroom";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The API base URL is not an absolute `http(s)` URL.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to, without a trailing `/`.
    pub base_url: String,
    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Build a config from explicit values, normalizing the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not `http://` or `https://`.
    pub fn new(base_url: &str, token_file: PathBuf) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { base_url, token_file })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `STOCKROOM_API_BASE_URL`: default `http://127.0.0.1:5000/api`
    /// - `STOCKROOM_TOKEN_FILE`: default `$HOME/.stockroom/token.json`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("STOCKROOM_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_owned());
        let token_file = std::env::var("STOCKROOM_TOKEN_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_token_file, PathBuf::from);
        Self::new(&base_url, token_file)
    }
}

/// Default token location under the user's home directory.
#[must_use]
pub fn default_token_file() -> PathBuf {
    let root = std::env::var_os("HOME").map_or_else(PathBuf::new, PathBuf::from);
    root.join(CONFIG_DIR_NAME).join(TOKEN_FILE_NAME)
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_owned()),
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_owned())),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
