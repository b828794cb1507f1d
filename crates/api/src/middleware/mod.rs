//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.

pub mod auth;
