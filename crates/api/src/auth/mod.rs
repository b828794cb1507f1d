//! Bearer token primitives.
//!
//! Login and registration live in the auth service; this server only
//! verifies the HS256 access tokens it issues.
//!
//! - [`jwt`] -- token validation, plus generation for tooling and tests.

pub mod jwt;
