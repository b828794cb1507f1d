//! Route definitions for direct messages.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::messages;
use crate::state::AppState;

/// Routes mounted at `/messages`.
///
/// ```text
/// GET    /                          -> list_messages
/// POST   /                          -> send_message
/// GET    /conversations             -> list_conversation_summaries
/// GET    /unread-count              -> unread_count
/// GET    /conversation/{user_id}    -> get_conversation
/// PUT    /{id}/read                 -> mark_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(messages::list_messages).post(messages::send_message),
        )
        .route(
            "/conversations",
            get(messages::list_conversation_summaries),
        )
        .route("/unread-count", get(messages::unread_count))
        .route("/conversation/{user_id}", get(messages::get_conversation))
        .route("/{id}/read", put(messages::mark_read))
}
