//! Repository for the `skill_exchanges` table.

use sqlx::PgPool;
use skillswap_core::exchange::{running_average, ExchangeStatus, RatedParty};
use skillswap_core::types::DbId;

use crate::models::exchange::{CreateExchange, Exchange, ExchangeChange};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, teacher_id, student_id, teacher_skill_id, status, student_rating, \
                       teacher_rating, created_at, updated_at";

/// Provides persistence for skill exchanges and their rating side effects.
pub struct ExchangeRepo;

impl ExchangeRepo {
    /// Insert a new exchange with status `pending`.
    pub async fn create(pool: &PgPool, input: &CreateExchange) -> Result<Exchange, sqlx::Error> {
        let query = format!(
            "INSERT INTO skill_exchanges (teacher_id, student_id, teacher_skill_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Exchange>(&query)
            .bind(input.teacher_id)
            .bind(input.student_id)
            .bind(input.teacher_skill_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Exchange>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skill_exchanges WHERE id = $1");
        sqlx::query_as::<_, Exchange>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exchanges where the user is teacher or student, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Exchange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skill_exchanges
             WHERE teacher_id = $1 OR student_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Exchange>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Number of `active` exchanges the user takes part in.
    pub async fn count_active_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM skill_exchanges
             WHERE (teacher_id = $1 OR student_id = $1) AND status = $2",
        )
        .bind(user_id)
        .bind(ExchangeStatus::Active.as_str())
        .fetch_one(pool)
        .await
    }

    /// Apply a validated patch to `exchange` in a single transaction.
    ///
    /// Writes the row, folds each changed rating into the target user's
    /// aggregate (and the teacher skill's when the teacher is the target), and
    /// adjusts the skill's `active_students` counter, never below zero.
    pub async fn apply_change(
        pool: &PgPool,
        exchange: &Exchange,
        change: &ExchangeChange,
    ) -> Result<Exchange, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE skill_exchanges SET
                status = $2,
                student_rating = COALESCE($3, student_rating),
                teacher_rating = COALESCE($4, teacher_rating)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Exchange>(&query)
            .bind(exchange.id)
            .bind(change.status.as_str())
            .bind(change.student_rating)
            .bind(change.teacher_rating)
            .fetch_one(&mut *tx)
            .await?;

        for update in &change.rating_updates {
            let rated_user = match update.rated {
                RatedParty::Teacher => exchange.teacher_id,
                RatedParty::Student => exchange.student_id,
            };

            let previous: Option<i32> = sqlx::query_scalar(
                "SELECT average_rating FROM users WHERE id = $1 FOR UPDATE",
            )
            .bind(rated_user)
            .fetch_one(&mut *tx)
            .await?;
            sqlx::query("UPDATE users SET average_rating = $2 WHERE id = $1")
                .bind(rated_user)
                .bind(running_average(previous, update.rating))
                .execute(&mut *tx)
                .await?;

            if update.rated == RatedParty::Teacher {
                let previous: Option<i32> = sqlx::query_scalar(
                    "SELECT average_rating FROM skills WHERE id = $1 FOR UPDATE",
                )
                .bind(exchange.teacher_skill_id)
                .fetch_one(&mut *tx)
                .await?;
                sqlx::query("UPDATE skills SET average_rating = $2 WHERE id = $1")
                    .bind(exchange.teacher_skill_id)
                    .bind(running_average(previous, update.rating))
                    .execute(&mut *tx)
                    .await?;
            }
        }

        if change.active_students_delta != 0 {
            sqlx::query(
                "UPDATE skills SET active_students = GREATEST(active_students + $2, 0)
                 WHERE id = $1",
            )
            .bind(exchange.teacher_skill_id)
            .bind(change.active_students_delta)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            exchange_id = exchange.id,
            status = %change.status.as_str(),
            ratings = change.rating_updates.len(),
            "Exchange change applied",
        );
        Ok(updated)
    }
}
