//! Domain error taxonomy shared by every SkillSwap layer.

use crate::types::DbId;

/// Errors raised by domain checks before anything is written.
///
/// The api crate maps each variant onto an HTTP status: `Validation` → 400,
/// `Unauthorized` → 401, `Forbidden` → 403, `NotFound` → 404,
/// `Conflict` → 409, `Internal` → 500.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The referenced row does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input has the wrong shape, range, or enum value.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The operation is not allowed from the record's current state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// No caller identity could be established.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller is known but is not the owner or does not hold the role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
