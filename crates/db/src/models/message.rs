//! Message entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skillswap_core::messaging::ConversationMessage;
use skillswap_core::types::{DbId, Timestamp};

/// A row from the `messages` table. Only `is_read` ever changes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ConversationMessage for Message {
    fn id(&self) -> DbId {
        self.id
    }

    fn sender_id(&self) -> DbId {
        self.sender_id
    }

    fn receiver_id(&self) -> DbId {
        self.receiver_id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn is_read(&self) -> bool {
        self.is_read
    }
}

/// DTO for sending a message. Any `sender_id` in the body is ignored; the
/// sender is always the caller.
#[derive(Debug, Deserialize)]
pub struct CreateMessage {
    pub receiver_id: DbId,
    pub content: String,
}
