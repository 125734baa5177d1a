//! Bearer-token persistence.
//!
//! DESIGN
//! ======
//! A store holds at most one opaque token under the fixed key
//! [`TOKEN_KEY`]. Reads never fail: a missing, unreadable, or corrupt record
//! means "no session". Writes are best effort and only logged on failure,
//! mirroring how browser storage writes are treated.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Key the token is stored under.
pub const TOKEN_KEY: &str = "access_token";

/// Holds the single bearer token shared by the request client and session.
pub trait TokenStore: Send + Sync {
    /// Return the current token, if any.
    fn get(&self) -> Option<String>;

    /// Replace the current token; `None` removes it.
    fn set(&self, token: Option<&str>);
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { token: Mutex::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token.map(ToOwned::to_owned);
        }
    }
}

// =============================================================================
// FILE
// =============================================================================

#[derive(Serialize, Deserialize)]
struct TokenRecord {
    access_token: String,
}

/// Token store backed by a small JSON file, `{"access_token": "..."}`.
///
/// The last value set is cached so a failed write does not lose the token
/// for the rest of the process.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    cached: Mutex<Option<String>>,
}

impl FileTokenStore {
    /// Open the store at `path`, loading any token already persisted there.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = Mutex::new(read_token(&path));
        Self { path, cached }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        self.cached.lock().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: Option<&str>) {
        if let Ok(mut guard) = self.cached.lock() {
            *guard = token.map(ToOwned::to_owned);
        }
        match token {
            Some(token) => write_token(&self.path, token),
            None => remove_token(&self.path),
        }
    }
}

fn read_token(path: &Path) -> Option<String> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<TokenRecord>(&raw) {
        Ok(record) if !record.access_token.is_empty() => Some(record.access_token),
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable token file");
            None
        }
    }
}

fn write_token(path: &Path, token: &str) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = %parent.display(), error = %e, "token directory create failed");
            return;
        }
    }
    let record = TokenRecord { access_token: token.to_owned() };
    let Ok(raw) = serde_json::to_string(&record) else {
        return;
    };
    if let Err(e) = std::fs::write(path, raw) {
        tracing::warn!(path = %path.display(), error = %e, "token write failed");
    }
}

fn remove_token(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "token remove failed"),
    }
}
