//! Route guards over [`AuthState`] snapshots.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views should apply identical redirect behavior: wait while the session is
//! loading, send signed-out users to the login view, and keep signed-in
//! users away from it.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::state::auth::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// What a guarded view should do for the current session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session is still resolving; show a placeholder.
    Loading,
    /// Navigate elsewhere instead of rendering.
    Redirect(&'static str),
    /// Render the guarded contents.
    Render,
}

/// Which kind of visitor a view admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Signed-in users only.
    Authenticated,
    /// Signed-out users only (e.g. the login view).
    Guest,
}

impl Guard {
    #[must_use]
    pub fn evaluate(self, state: &AuthState) -> GuardOutcome {
        match self {
            Self::Authenticated => require_auth(state),
            Self::Guest => require_guest(state),
        }
    }
}

/// Whether a signed-out session should be bounced to [`LOGIN_PATH`].
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && !state.is_authenticated()
}

/// Guard for views that need a signed-in user.
#[must_use]
pub fn require_auth(state: &AuthState) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Loading
    } else if should_redirect_unauth(state) {
        GuardOutcome::Redirect(LOGIN_PATH)
    } else {
        GuardOutcome::Render
    }
}

/// Guard for views only signed-out users should see.
#[must_use]
pub fn require_guest(state: &AuthState) -> GuardOutcome {
    if state.loading {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Redirect(HOME_PATH)
    } else {
        GuardOutcome::Render
    }
}
