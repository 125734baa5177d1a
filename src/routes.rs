//! View table and guard resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! Maps a view path plus a session snapshot to what should happen: render a
//! view, show a loading placeholder, or redirect. Unknown paths redirect to
//! the dashboard, which in turn bounces signed-out users to the login view.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use client::AuthState;
use client::util::auth::{Guard, GuardOutcome, HOME_PATH, LOGIN_PATH};

/// Redirect chains longer than this are treated as settled where they stop.
const MAX_REDIRECTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Inventory,
    Jobs,
    Reports,
    Users,
}

struct Route {
    path: &'static str,
    view: View,
    guard: Guard,
}

const ROUTES: &[Route] = &[
    Route { path: LOGIN_PATH, view: View::Login, guard: Guard::Guest },
    Route { path: HOME_PATH, view: View::Dashboard, guard: Guard::Authenticated },
    Route { path: "/inventory", view: View::Inventory, guard: Guard::Authenticated },
    Route { path: "/jobs", view: View::Jobs, guard: Guard::Authenticated },
    Route { path: "/reports", view: View::Reports, guard: Guard::Authenticated },
    Route { path: "/users", view: View::Users, guard: Guard::Authenticated },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Loading,
    Redirect(&'static str),
    Render(View),
}

/// Resolve a single path without following redirects.
#[must_use]
pub fn resolve(path: &str, state: &AuthState) -> Resolution {
    let path = normalize(path);
    let Some(route) = ROUTES.iter().find(|route| route.path == path) else {
        return Resolution::Redirect(HOME_PATH);
    };
    match route.guard.evaluate(state) {
        GuardOutcome::Loading => Resolution::Loading,
        GuardOutcome::Redirect(to) => Resolution::Redirect(to),
        GuardOutcome::Render => Resolution::Render(route.view),
    }
}

/// Resolve `path`, following redirects. Returns the final path and outcome.
#[must_use]
pub fn follow(path: &str, state: &AuthState) -> (String, Resolution) {
    let mut current = normalize(path).to_owned();
    let mut resolution = resolve(&current, state);
    for _ in 0..MAX_REDIRECTS {
        let Resolution::Redirect(to) = resolution else {
            break;
        };
        current = to.to_owned();
        resolution = resolve(&current, state);
    }
    (current, resolution)
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim();
    let trimmed = trimmed.split(['?', '#']).next().unwrap_or_default();
    match trimmed.trim_end_matches('/') {
        "" => HOME_PATH,
        other => other,
    }
}
