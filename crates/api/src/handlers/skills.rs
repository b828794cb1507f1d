//! Handlers for skills.
//!
//! Listing and single-skill reads are public; creating, editing, and
//! deleting require the caller to own the skill.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use skillswap_core::error::CoreError;
use skillswap_core::skill::{ensure_skill_owner, validate_proficiency_for_kind};
use skillswap_core::types::DbId;
use skillswap_db::models::skill::{CreateSkill, Skill, UpdateSkill};
use skillswap_db::repositories::SkillRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a skill, returning 404 if it does not exist.
pub(crate) async fn find_skill(pool: &sqlx::PgPool, skill_id: DbId) -> AppResult<Skill> {
    let skill = SkillRepo::find_by_id(pool, skill_id)
        .await?
        .ok_or(CoreError::not_found("Skill", skill_id))?;
    Ok(skill)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/skills
pub async fn list_skills(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/skills/{id}
pub async fn get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let skill = find_skill(&state.pool, skill_id).await?;
    Ok(Json(DataResponse { data: skill }))
}

/// GET /api/skills/teaching
pub async fn list_teaching(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_for_user(&state.pool, auth.user_id, true).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// GET /api/skills/learning
pub async fn list_learning(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let skills = SkillRepo::list_for_user(&state.pool, auth.user_id, false).await?;
    Ok(Json(DataResponse { data: skills }))
}

/// POST /api/skills
///
/// Create a skill owned by the caller.
pub async fn create_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateSkill>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    validate_proficiency_for_kind(input.is_teaching, input.proficiency.as_deref())?;

    let skill = SkillRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        user_id = auth.user_id,
        skill_id = skill.id,
        is_teaching = skill.is_teaching,
        "Skill created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: skill })))
}

/// PUT /api/skills/{id}
///
/// Patch a skill. Only the owner may edit; the teaching flag is fixed.
pub async fn update_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
    Json(input): Json<UpdateSkill>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let skill = find_skill(&state.pool, skill_id).await?;
    ensure_skill_owner(skill.user_id, auth.user_id, "update")?;
    validate_proficiency_for_kind(skill.is_teaching, input.proficiency.as_deref())?;

    let updated = SkillRepo::update(&state.pool, skill_id, &input)
        .await?
        .ok_or(CoreError::not_found("Skill", skill_id))?;

    tracing::info!(user_id = auth.user_id, skill_id, "Skill updated");

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/skills/{id}
pub async fn delete_skill(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let skill = find_skill(&state.pool, skill_id).await?;
    ensure_skill_owner(skill.user_id, auth.user_id, "delete")?;

    if !SkillRepo::delete(&state.pool, skill_id).await? {
        return Err(CoreError::not_found("Skill", skill_id).into());
    }

    tracing::info!(user_id = auth.user_id, skill_id, "Skill deleted");

    Ok(StatusCode::NO_CONTENT)
}
