//! Stockroom client: bearer-token session handling over the Stockroom REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` owns the token store and the REST request client, `state` owns the
//! in-memory session built on top of it, and `util` holds the pure route
//! guards that hosting applications evaluate against session snapshots.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

pub use config::ClientConfig;
pub use net::api::{ApiClient, AuthEvent};
pub use net::error::ApiError;
pub use net::token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use net::types::User;
pub use state::auth::{AuthState, SessionPhase};
pub use state::session::SessionManager;
