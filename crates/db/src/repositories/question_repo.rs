//! Repository for the `assessment_questions` table (read-only bank).

use sqlx::PgPool;
use skillswap_core::types::DbId;

use crate::models::question::AssessmentQuestion;

const COLUMNS: &str = "id, category, question, options, correct_option, created_at, updated_at";

pub struct QuestionRepo;

impl QuestionRepo {
    /// Every question in a category, in insertion order.
    pub async fn list_by_category(
        pool: &PgPool,
        category: &str,
    ) -> Result<Vec<AssessmentQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assessment_questions WHERE category = $1 ORDER BY id"
        );
        sqlx::query_as::<_, AssessmentQuestion>(&query)
            .bind(category)
            .fetch_all(pool)
            .await
    }

    /// Fetch the questions with the given IDs. Missing IDs are skipped.
    pub async fn find_many(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<AssessmentQuestion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assessment_questions WHERE id = ANY($1)");
        sqlx::query_as::<_, AssessmentQuestion>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
