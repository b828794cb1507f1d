//! Skill entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skillswap_core::skill::{validate_category, validate_proficiency};
use skillswap_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `skills` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Skill {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub is_teaching: bool,
    pub proficiency: Option<String>,
    pub icon: Option<String>,
    pub average_rating: Option<i32>,
    pub active_students: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a skill. The owner is the authenticated caller.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSkill {
    #[validate(length(min = 3, message = "Skill name must be at least 3 characters"))]
    pub name: String,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    pub is_teaching: bool,
    #[validate(custom(function = "validate_proficiency"))]
    pub proficiency: Option<String>,
    pub icon: Option<String>,
}

/// DTO for patching a skill. `is_teaching` is fixed at creation.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSkill {
    #[validate(length(min = 3, message = "Skill name must be at least 3 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: Option<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_proficiency"))]
    pub proficiency: Option<String>,
    pub icon: Option<String>,
}
