//! Navigation decisions driven by request-client signals.
//!
//! DESIGN
//! ======
//! The request client only broadcasts [`AuthEvent::Unauthorized`]; this
//! module is where the application decides what that means. Queued events
//! are drained after each command so the decision is made before output is
//! printed.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use client::util::auth::LOGIN_PATH;
use client::{AuthEvent, SessionManager};
use tokio::sync::broadcast::Receiver;
use tokio::sync::broadcast::error::TryRecvError;

/// A navigation the application performed on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    pub to: &'static str,
    /// Request path whose 401 triggered the navigation.
    pub cause: String,
}

pub struct Navigator {
    events: Receiver<AuthEvent>,
    location: String,
}

impl Navigator {
    #[must_use]
    pub fn new(events: Receiver<AuthEvent>, location: &str) -> Self {
        Self { events, location: location.to_owned() }
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn navigate(&mut self, to: &str) {
        if self.location != to {
            tracing::debug!(from = %self.location, to, "navigate");
            self.location = to.to_owned();
        }
    }

    /// Apply every signal received so far. Returns the last forced
    /// navigation, if any.
    pub async fn settle(&mut self, session: &SessionManager) -> Option<Navigation> {
        let mut forced = None;
        loop {
            match self.events.try_recv() {
                Ok(AuthEvent::Unauthorized { path }) => {
                    tracing::info!(cause = %path, "session rejected; returning to login");
                    session.expire().await;
                    self.navigate(LOGIN_PATH);
                    forced = Some(Navigation { to: LOGIN_PATH, cause: path });
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "navigator lagged behind session events");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return forced,
            }
        }
    }
}
