//! Repository for the `messages` table.

use sqlx::PgPool;
use skillswap_core::types::DbId;

use crate::models::message::{CreateMessage, Message};

/// Column list for `messages` queries.
const COLUMNS: &str = "id, sender_id, receiver_id, content, is_read, created_at, updated_at";

/// Provides storage for direct messages.
pub struct MessageRepo;

impl MessageRepo {
    /// Store a message from `sender_id`. New messages start unread.
    pub async fn create(
        pool: &PgPool,
        sender_id: DbId,
        input: &CreateMessage,
    ) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (sender_id, receiver_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(sender_id)
            .bind(input.receiver_id)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM messages WHERE id = $1");
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Every message sent or received by a user, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE sender_id = $1 OR receiver_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// The thread between two users, oldest first.
    pub async fn conversation(
        pool: &PgPool,
        user_id: DbId,
        other_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE (sender_id = $1 AND receiver_id = $2)
                OR (sender_id = $2 AND receiver_id = $1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(user_id)
            .bind(other_id)
            .fetch_all(pool)
            .await
    }

    /// Set `is_read = true`. Returns `None` if the message does not exist.
    pub async fn mark_read(pool: &PgPool, id: DbId) -> Result<Option<Message>, sqlx::Error> {
        let query = format!(
            "UPDATE messages SET is_read = true
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Number of unread messages addressed to a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
