//! Skill exchange entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skillswap_core::exchange::{ExchangeStatus, RatingUpdate};
use skillswap_core::types::{DbId, Timestamp};

/// A row from the `skill_exchanges` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exchange {
    pub id: DbId,
    pub teacher_id: DbId,
    pub student_id: DbId,
    pub teacher_skill_id: DbId,
    pub status: String,
    /// Written by the student; folded into the student's aggregate.
    pub student_rating: Option<i32>,
    /// Written by the teacher; folded into the teacher's and the skill's
    /// aggregates.
    pub teacher_rating: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for requesting an exchange.
#[derive(Debug, Deserialize)]
pub struct CreateExchange {
    pub teacher_id: DbId,
    pub student_id: DbId,
    pub teacher_skill_id: DbId,
}

/// DTO for patching an exchange. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateExchange {
    pub status: Option<String>,
    pub student_rating: Option<i32>,
    pub teacher_rating: Option<i32>,
}

/// A validated patch, ready to be applied in one transaction.
#[derive(Debug, Clone)]
pub struct ExchangeChange {
    pub status: ExchangeStatus,
    pub student_rating: Option<i32>,
    pub teacher_rating: Option<i32>,
    /// Ratings whose value changed and must reach an aggregate.
    pub rating_updates: Vec<RatingUpdate>,
    /// Adjustment to the teacher skill's `active_students`.
    pub active_students_delta: i32,
}
