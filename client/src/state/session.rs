//! Session manager: the live auth state and its transitions.
//!
//! DESIGN
//! ======
//! The manager is handed an [`ApiClient`] explicitly and keeps its state
//! behind an async `RwLock`. The lock is never held across a network call,
//! so overlapping `login`/`register` calls are not serialized: whichever
//! resolves last wins.
//!
//! ERROR HANDLING
//! ==============
//! - restore failures fall back to signed-out without recording an error
//! - login/registration failures are recorded in `error` and returned
//! - logout failures are logged and swallowed; local state is always cleared

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use super::auth::{AuthState, RequiredRoles, SessionPhase};
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::types::{LoginResponse, User};

#[derive(Clone, Debug)]
pub struct SessionManager {
    api: ApiClient,
    state: Arc<RwLock<AuthState>>,
}

impl SessionManager {
    /// Create a manager in the `Restoring` phase. Call [`SessionManager::restore`] next.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api, state: Arc::new(RwLock::new(AuthState::default())) }
    }

    /// Create a manager and run the startup session restore.
    pub async fn restored(api: ApiClient) -> Self {
        let session = Self::new(api);
        session.restore().await;
        session
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated()
    }

    pub async fn has_role<'a>(&self, roles: impl Into<RequiredRoles<'a>>) -> bool {
        self.state.read().await.has_role(roles)
    }

    /// Re-establish a session from a stored token, if there is one.
    ///
    /// Without a token no request is made. Any failure, a 401 included,
    /// clears the token and leaves the session signed out.
    pub async fn restore(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.phase = SessionPhase::Restoring;
        }

        if self.api.token().is_none() {
            tracing::debug!("no stored token; starting signed out");
            self.state.write().await.sign_out();
            return;
        }

        match self.api.current_user().await {
            Ok(user) => {
                tracing::info!(username = %user.username, "session restored");
                self.state.write().await.sign_in(user);
            }
            Err(e) => {
                tracing::debug!(error = %e, "session restore failed; discarding token");
                self.api.set_token(None);
                self.state.write().await.sign_out();
            }
        }
    }

    /// Log in and load the user's profile.
    ///
    /// Returns the raw login response. A response without `access_token`
    /// leaves the session as it was apart from the loading flag. The token is
    /// kept only once the profile fetch succeeds.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the login or profile request; its
    /// message is also recorded in `error`.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.state.write().await.begin_request();

        match self.login_inner(username, password).await {
            Ok(response) => Ok(response),
            Err(e) => {
                tracing::warn!(username, status = ?e.status(), error = %e, "login failed");
                self.state.write().await.fail(e.to_string());
                Err(e)
            }
        }
    }

    async fn login_inner(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self.api.login(username, password).await?;
        tracing::debug!(has_token = response.access_token.is_some(), "login response");

        match response.access_token.as_deref() {
            Some(token) => {
                self.api.set_token(Some(token));
                let user = match self.api.current_user().await {
                    Ok(user) => user,
                    Err(e) => {
                        self.api.set_token(None);
                        return Err(e);
                    }
                };
                tracing::info!(username = %user.username, "logged in");
                self.state.write().await.sign_in(user);
            }
            None => {
                self.state.write().await.loading = false;
            }
        }
        Ok(response)
    }

    /// Register a new account; the response carries both token and profile.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] from the request, or
    /// [`ApiError::MissingField`] when the response lacks `access_token` or
    /// `user`; the message is also recorded in `error`.
    pub async fn register(&self, user_data: &Value) -> Result<User, ApiError> {
        self.state.write().await.begin_request();

        match self.register_inner(user_data).await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!(error = %e, "registration failed");
                self.state.write().await.fail(e.to_string());
                Err(e)
            }
        }
    }

    async fn register_inner(&self, user_data: &Value) -> Result<User, ApiError> {
        let response = self.api.register(user_data).await?;
        let token = response.access_token.ok_or(ApiError::MissingField("access_token"))?;
        let user = response.user.ok_or(ApiError::MissingField("user"))?;

        self.api.set_token(Some(&token));
        tracing::info!(username = %user.username, "registered");
        self.state.write().await.sign_in(user.clone());
        Ok(user)
    }

    /// Sign out. Always ends with no token, no user and no error.
    pub async fn logout(&self) {
        if self.api.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!(error = %e, "logout request failed; clearing session anyway");
            }
        }
        self.api.set_token(None);
        self.state.write().await.sign_out();
        tracing::info!("logged out");
    }

    /// Drop the in-memory user after the request client reported a 401.
    ///
    /// The token is already gone by the time the signal arrives.
    pub async fn expire(&self) {
        self.state.write().await.sign_out();
    }
}
