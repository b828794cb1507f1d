//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers validate through `skillswap_core`, persist through the
//! repositories in `skillswap_db`, and map errors via [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod assessments;
pub mod dashboard;
pub mod exchanges;
pub mod messages;
pub mod questions;
pub mod skills;
pub mod users;
