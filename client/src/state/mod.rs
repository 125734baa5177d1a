//! Client-side session state.
//!
//! DESIGN
//! ======
//! `auth` is the plain snapshot model route guards read; `session` owns the
//! live copy and the login/registration/logout transitions that mutate it.

pub mod auth;
pub mod session;
