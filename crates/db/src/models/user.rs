//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skillswap_core::types::{DbId, Timestamp};

/// A row from the `users` table. Carries no credentials, so it is safe to
/// serialize directly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    /// Running two-point average of the ratings this user received.
    pub average_rating: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO used when the auth service provisions a user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}
