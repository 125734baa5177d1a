//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once at startup: one request client, the session
//! manager that owns it, and the navigator listening to its signals. Command
//! handlers receive it explicitly.

use client::util::auth::HOME_PATH;
use client::{ApiClient, ClientConfig, SessionManager};

use crate::error::AppError;
use crate::navigation::Navigator;

pub struct AppState {
    pub session: SessionManager,
    pub navigator: Navigator,
}

impl AppState {
    /// Build the client from `config` and restore any stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub async fn start(config: &ClientConfig) -> Result<Self, AppError> {
        let api = ApiClient::from_config(config)?;
        Ok(Self::with_session(SessionManager::restored(api).await))
    }

    /// Wrap an already-restored session. The navigator subscribes afterwards
    /// so a rejected stored token stays a silent restore failure.
    #[must_use]
    pub fn with_session(session: SessionManager) -> Self {
        let navigator = Navigator::new(session.api().subscribe(), HOME_PATH);
        Self { session, navigator }
    }
}
