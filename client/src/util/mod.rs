//! Utility helpers shared by hosting applications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards are pure functions over session snapshots so any front end (CLI,
//! web, desktop) applies identical redirect behavior.

pub mod auth;
