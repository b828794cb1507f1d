//! Handlers for direct messages.
//!
//! The sender of a new message is always the caller. Conversations are
//! derived on read from the caller's message log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use skillswap_core::error::CoreError;
use skillswap_core::messaging::{ensure_receiver, list_conversations, validate_message_content};
use skillswap_core::types::DbId;
use skillswap_db::models::message::CreateMessage;
use skillswap_db::repositories::{MessageRepo, UserRepo};

use crate::error::AppResult;
use crate::handlers::users::find_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Unread message count for the badge.
#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub count: i64,
}

/// GET /api/messages
///
/// Every message the caller sent or received, newest first.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let messages = MessageRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/messages
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateMessage>,
) -> AppResult<impl IntoResponse> {
    validate_message_content(&input.content)?;
    if input.receiver_id == auth.user_id {
        return Err(CoreError::Validation(
            "You cannot send a message to yourself".to_string(),
        )
        .into());
    }
    if !UserRepo::exists(&state.pool, input.receiver_id).await? {
        return Err(CoreError::not_found("User", input.receiver_id).into());
    }

    let message = MessageRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        receiver_id = input.receiver_id,
        message_id = message.id,
        "Message sent"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /api/messages/conversations
///
/// One entry per counterpart with the latest message, newest first.
pub async fn list_conversation_summaries(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let messages = MessageRepo::list_for_user(&state.pool, auth.user_id).await?;
    let conversations = list_conversations(auth.user_id, &messages);
    Ok(Json(DataResponse {
        data: conversations,
    }))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = MessageRepo::unread_count(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse {
        data: UnreadCount { count },
    }))
}

/// GET /api/messages/conversation/{user_id}
///
/// The thread between the caller and another user, oldest first.
pub async fn get_conversation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(other_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_user(&state.pool, other_id).await?;
    let thread = MessageRepo::conversation(&state.pool, auth.user_id, other_id).await?;
    Ok(Json(DataResponse { data: thread }))
}

/// PUT /api/messages/{id}/read
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(message_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let message = MessageRepo::find_by_id(&state.pool, message_id)
        .await?
        .ok_or(CoreError::not_found("Message", message_id))?;
    ensure_receiver(message.receiver_id, auth.user_id)?;

    let updated = MessageRepo::mark_read(&state.pool, message_id)
        .await?
        .ok_or(CoreError::not_found("Message", message_id))?;

    tracing::debug!(user_id = auth.user_id, message_id, "Message marked read");

    Ok(Json(DataResponse { data: updated }))
}
