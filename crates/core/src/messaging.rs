//! Conversation derivation and message rules.
//!
//! Messages are stored as a flat log of (sender, receiver) pairs. A
//! conversation is the set of messages between exactly two users; the inbox
//! view shows one entry per counterpart holding the latest message.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Maximum length of a message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 5000;

/// Read-only view of a stored message.
pub trait ConversationMessage {
    fn id(&self) -> DbId;
    fn sender_id(&self) -> DbId;
    fn receiver_id(&self) -> DbId;
    fn created_at(&self) -> Timestamp;
    fn is_read(&self) -> bool;

    /// The participant that is not `viewer`.
    fn counterpart_of(&self, viewer: DbId) -> DbId {
        if self.sender_id() == viewer {
            self.receiver_id()
        } else {
            self.sender_id()
        }
    }

    fn involves(&self, user_id: DbId) -> bool {
        self.sender_id() == user_id || self.receiver_id() == user_id
    }

    /// Unread for `viewer` only if it is addressed to them and not yet read.
    fn is_unread_for(&self, viewer: DbId) -> bool {
        !self.is_read() && self.receiver_id() == viewer
    }
}

/// Validate a message body. Whitespace-only content is rejected.
pub fn validate_message_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Message content must not be empty".to_string(),
        ));
    }
    let len = content.chars().count();
    if len > MAX_MESSAGE_LEN {
        return Err(CoreError::Validation(format!(
            "Message content is {len} characters; the limit is {MAX_MESSAGE_LEN}"
        )));
    }
    Ok(())
}

/// Only the receiver may mark a message as read.
pub fn ensure_receiver(receiver_id: DbId, caller_id: DbId) -> Result<(), CoreError> {
    if receiver_id != caller_id {
        return Err(CoreError::Forbidden(
            "Not authorized to mark this message as read".to_string(),
        ));
    }
    Ok(())
}

/// One inbox entry.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary<M> {
    pub counterpart_id: DbId,
    pub last_message: M,
    /// Messages in this conversation that are unread for the viewer.
    pub unread_count: i64,
}

/// Group `messages` by counterpart of `viewer`, newest conversation first.
///
/// The latest message per counterpart wins by `created_at`; equal
/// timestamps fall back to the higher id. Messages that do not involve
/// `viewer` are ignored. The input order does not matter.
pub fn list_conversations<M>(viewer: DbId, messages: &[M]) -> Vec<ConversationSummary<M>>
where
    M: ConversationMessage + Clone,
{
    // counterpart -> (index of latest message, unread count)
    let mut latest: HashMap<DbId, (usize, i64)> = HashMap::new();

    for (idx, message) in messages.iter().enumerate() {
        if !message.involves(viewer) {
            continue;
        }
        let unread = i64::from(message.is_unread_for(viewer));
        let entry = latest
            .entry(message.counterpart_of(viewer))
            .or_insert((idx, 0));
        entry.1 += unread;

        let current = &messages[entry.0];
        if order_key(message) > order_key(current) {
            entry.0 = idx;
        }
    }

    let mut summaries: Vec<ConversationSummary<M>> = latest
        .into_iter()
        .map(|(counterpart_id, (idx, unread_count))| ConversationSummary {
            counterpart_id,
            last_message: messages[idx].clone(),
            unread_count,
        })
        .collect();

    summaries.sort_by(|a, b| order_key(&b.last_message).cmp(&order_key(&a.last_message)));
    summaries
}

fn order_key<M: ConversationMessage>(message: &M) -> (Timestamp, DbId) {
    (message.created_at(), message.id())
}
