//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches, where
//!   the entity can be patched

pub mod assessment;
pub mod exchange;
pub mod message;
pub mod question;
pub mod skill;
pub mod user;
