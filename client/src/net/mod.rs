//! Networking modules for the Stockroom REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token_store` persists the bearer credential, `api` wraps every REST call
//! and raises the unauthorized signal, `types` defines the wire schema, and
//! the `api_*` modules map resource actions onto paths and bodies.

pub mod api;
mod api_inventory;
mod api_jobs;
mod api_reports;
mod api_users;
pub mod error;
pub mod token_store;
pub mod types;
