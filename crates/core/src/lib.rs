//! Domain logic for the SkillSwap backend.
//!
//! Everything in this crate is pure: no database handles, no HTTP types.
//! The `db` and `api` crates call into these modules to validate input and
//! drive the assessment, messaging, and exchange state transitions.

pub mod assessment;
pub mod dashboard;
pub mod error;
pub mod exchange;
pub mod messaging;
pub mod skill;
pub mod types;
