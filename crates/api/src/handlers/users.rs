//! Handlers for user profiles.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use skillswap_core::error::CoreError;
use skillswap_core::types::DbId;
use skillswap_db::models::user::User;
use skillswap_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Load a user, returning 404 if they do not exist.
pub(crate) async fn find_user(pool: &sqlx::PgPool, user_id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(pool, user_id)
        .await?
        .ok_or(CoreError::not_found("User", user_id))?;
    Ok(user)
}

/// GET /api/users/me
pub async fn get_me(auth: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let user = find_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = find_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse { data: user }))
}
