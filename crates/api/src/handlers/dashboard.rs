//! Handler for the signed-in user's dashboard counters.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use skillswap_core::dashboard::{average_rating, count_verified, DashboardStats};
use skillswap_db::repositories::{AssessmentRepo, ExchangeRepo, MessageRepo, SkillRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/dashboard/stats
pub async fn get_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;
    let teaching = SkillRepo::list_for_user(pool, auth.user_id, true).await?;
    let learning_skills_count = SkillRepo::count_for_user(pool, auth.user_id, false).await?;
    let active_exchanges_count = ExchangeRepo::count_active_for_user(pool, auth.user_id).await?;
    let unread_messages_count = MessageRepo::unread_count(pool, auth.user_id).await?;
    let attempts = AssessmentRepo::list_for_user(pool, auth.user_id).await?;

    let teaching_ids: Vec<_> = teaching.iter().map(|s| s.id).collect();

    let stats = DashboardStats {
        teaching_skills_count: teaching.len() as i64,
        learning_skills_count,
        active_exchanges_count,
        average_rating: average_rating(teaching.iter().map(|s| s.average_rating)),
        verified_skills_count: count_verified(&teaching_ids, &attempts),
        unread_messages_count,
    };

    Ok(Json(DataResponse { data: stats }))
}
