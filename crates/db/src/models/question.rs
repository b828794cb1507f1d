//! Knowledge-test question models.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use skillswap_core::types::{DbId, Timestamp};

/// A row from the `assessment_questions` table, answer included.
///
/// Never serialized; clients receive [`QuizQuestion`].
#[derive(Debug, Clone, FromRow)]
pub struct AssessmentQuestion {
    pub id: DbId,
    pub category: String,
    pub question: String,
    pub options: Json<Vec<String>>,
    pub correct_option: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A question as served to a quiz taker.
#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
}

impl From<AssessmentQuestion> for QuizQuestion {
    fn from(q: AssessmentQuestion) -> Self {
        Self {
            id: q.id,
            category: q.category,
            question: q.question,
            options: q.options.0,
        }
    }
}
