//! Repository for the `skills` table.

use sqlx::PgPool;
use skillswap_core::types::DbId;

use crate::models::skill::{CreateSkill, Skill, UpdateSkill};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, description, category, is_teaching, proficiency, \
                       icon, average_rating, active_students, created_at, updated_at";

/// Provides CRUD operations for skills.
pub struct SkillRepo;

impl SkillRepo {
    /// Insert a skill owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateSkill,
    ) -> Result<Skill, sqlx::Error> {
        let query = format!(
            "INSERT INTO skills (user_id, name, description, category, is_teaching, proficiency, icon)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(input.is_teaching)
            .bind(&input.proficiency)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Find a skill by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills WHERE id = $1");
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every skill, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM skills ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Skill>(&query).fetch_all(pool).await
    }

    /// List a user's teaching (`is_teaching = true`) or learning skills.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        is_teaching: bool,
    ) -> Result<Vec<Skill>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM skills
             WHERE user_id = $1 AND is_teaching = $2
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(user_id)
            .bind(is_teaching)
            .fetch_all(pool)
            .await
    }

    /// Update a skill. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSkill,
    ) -> Result<Option<Skill>, sqlx::Error> {
        let query = format!(
            "UPDATE skills SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                proficiency = COALESCE($5, proficiency),
                icon = COALESCE($6, icon)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Skill>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.proficiency)
            .bind(&input.icon)
            .fetch_optional(pool)
            .await
    }

    /// Delete a skill. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count a user's teaching or learning skills.
    pub async fn count_for_user(
        pool: &PgPool,
        user_id: DbId,
        is_teaching: bool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM skills WHERE user_id = $1 AND is_teaching = $2")
            .bind(user_id)
            .bind(is_teaching)
            .fetch_one(pool)
            .await
    }
}
