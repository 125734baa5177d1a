//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Snapshots of this state are what route guards and user-aware commands
//! read. The live copy is owned by [`super::session::SessionManager`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Where the session is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup check of a stored token has not finished yet.
    #[default]
    Restoring,
    Authenticated,
    Unauthenticated,
}

/// Authentication state tracking the current user, loading flag and last error.
///
/// `user` is the single source of truth for [`AuthState::is_authenticated`].
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SessionPhase,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true, error: None, phase: SessionPhase::Restoring }
    }
}

/// Roles accepted by an authorization check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredRoles<'a> {
    One(&'a str),
    Any(&'a [&'a str]),
}

impl<'a> From<&'a str> for RequiredRoles<'a> {
    fn from(role: &'a str) -> Self {
        Self::One(role)
    }
}

impl<'a> From<&'a [&'a str]> for RequiredRoles<'a> {
    fn from(roles: &'a [&'a str]) -> Self {
        Self::Any(roles)
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for RequiredRoles<'a> {
    fn from(roles: &'a [&'a str; N]) -> Self {
        Self::Any(roles.as_slice())
    }
}

impl RequiredRoles<'_> {
    fn accepts(&self, role: &str) -> bool {
        match self {
            Self::One(required) => *required == role,
            Self::Any(required) => required.contains(&role),
        }
    }
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the current user holds `roles` (one role, or any of a set).
    /// Always `false` without a user.
    #[must_use]
    pub fn has_role<'a>(&self, roles: impl Into<RequiredRoles<'a>>) -> bool {
        let roles = roles.into();
        self.user.as_ref().is_some_and(|user| roles.accepts(&user.role))
    }

    pub(crate) fn begin_request(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn sign_in(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
        self.error = None;
        self.phase = SessionPhase::Authenticated;
    }

    pub(crate) fn fail(&mut self, message: String) {
        self.user = None;
        self.loading = false;
        self.error = Some(message);
        self.phase = SessionPhase::Unauthenticated;
    }

    pub(crate) fn sign_out(&mut self) {
        self.user = None;
        self.loading = false;
        self.error = None;
        self.phase = SessionPhase::Unauthenticated;
    }
}
