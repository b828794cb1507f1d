//! Repository for the `skill_assessments` table.

use sqlx::PgPool;
use skillswap_core::assessment::AssessmentProgress;
use skillswap_core::types::DbId;

use crate::models::assessment::Assessment;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, skill_id, user_id, status, current_step, knowledge_score, \
                       practical_score, teaching_score, overall_score, completed_at, \
                       created_at, updated_at";

/// Provides persistence for assessment attempts.
pub struct AssessmentRepo;

impl AssessmentRepo {
    /// Start a new attempt at step 1 with status `pending`.
    pub async fn create(
        pool: &PgPool,
        skill_id: DbId,
        user_id: DbId,
    ) -> Result<Assessment, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_assessments (skill_id, user_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(skill_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an attempt by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skill_assessments WHERE id = $1");
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all attempts by a user, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skill_assessments
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// List all attempts for a skill, newest first.
    pub async fn list_for_skill(
        pool: &PgPool,
        skill_id: DbId,
    ) -> Result<Vec<Assessment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skill_assessments
             WHERE skill_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(skill_id)
            .fetch_all(pool)
            .await
    }

    /// Persist the state machine's view of an attempt.
    ///
    /// `completed_at` is only written while still NULL, so concurrent
    /// completions keep the first timestamp. Returns `None` if the row is
    /// gone.
    pub async fn save_progress(
        pool: &PgPool,
        id: DbId,
        progress: &AssessmentProgress,
    ) -> Result<Option<Assessment>, sqlx::Error> {
        let query = format!(
            "UPDATE skill_assessments SET
                status = $2,
                current_step = $3,
                knowledge_score = $4,
                practical_score = $5,
                teaching_score = $6,
                overall_score = $7,
                completed_at = COALESCE(completed_at, $8)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Assessment>(&query)
            .bind(id)
            .bind(progress.status.as_str())
            .bind(progress.step.to_number())
            .bind(progress.knowledge_score)
            .bind(progress.practical_score)
            .bind(progress.teaching_score)
            .bind(progress.overall_score)
            .bind(progress.completed_at)
            .fetch_optional(pool)
            .await
    }
}
