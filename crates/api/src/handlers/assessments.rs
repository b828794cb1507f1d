//! Handlers for skill assessments.
//!
//! Every endpoint is scoped to the caller: an assessment is visible only to
//! the user taking it, and only the owner of a skill may assess it. State
//! transitions run through [`AssessmentProgress`] and are then persisted as
//! a whole with `AssessmentRepo::save_progress`.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use skillswap_core::assessment::{active_attempt, AssessmentProgress, Completion, ScoreField};
use skillswap_core::error::CoreError;
use skillswap_core::knowledge_test::grade_submission;
use skillswap_core::types::DbId;
use skillswap_db::models::assessment::{
    Assessment, AssessmentAction, CreateAssessment, KnowledgeTestSubmission,
};
use skillswap_db::models::skill::Skill;
use skillswap_db::repositories::{AssessmentRepo, QuestionRepo};

use crate::error::AppResult;
use crate::handlers::skills::find_skill;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of a graded knowledge test.
#[derive(Debug, Serialize)]
pub struct KnowledgeTestResult {
    pub score: i32,
    pub assessment: Assessment,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a skill and require the caller to own it.
async fn find_owned_skill(
    pool: &sqlx::PgPool,
    skill_id: DbId,
    user_id: DbId,
) -> AppResult<Skill> {
    let skill = find_skill(pool, skill_id).await?;
    if skill.user_id != user_id {
        return Err(CoreError::Forbidden(
            "Not authorized to access assessments for this skill".to_string(),
        )
        .into());
    }
    Ok(skill)
}

/// Load an assessment and require the caller to be the candidate.
async fn find_owned_assessment(
    pool: &sqlx::PgPool,
    assessment_id: DbId,
    user_id: DbId,
) -> AppResult<Assessment> {
    let assessment = AssessmentRepo::find_by_id(pool, assessment_id)
        .await?
        .ok_or(CoreError::not_found("Assessment", assessment_id))?;
    if assessment.user_id != user_id {
        return Err(CoreError::Forbidden(
            "Not authorized to access this assessment".to_string(),
        )
        .into());
    }
    Ok(assessment)
}

/// Persist `progress` for `assessment_id`, mapping a vanished row to 404.
async fn save(
    pool: &sqlx::PgPool,
    assessment_id: DbId,
    progress: &AssessmentProgress,
) -> AppResult<Assessment> {
    let saved = AssessmentRepo::save_progress(pool, assessment_id, progress)
        .await?
        .ok_or(CoreError::not_found("Assessment", assessment_id))?;
    Ok(saved)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/assessments/user
pub async fn list_user_assessments(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let assessments = AssessmentRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: assessments }))
}

/// GET /api/assessments/skill/{skill_id}
pub async fn list_skill_assessments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_owned_skill(&state.pool, skill_id, auth.user_id).await?;
    let assessments = AssessmentRepo::list_for_skill(&state.pool, skill_id).await?;
    Ok(Json(DataResponse { data: assessments }))
}

/// GET /api/assessments/skill/{skill_id}/active
///
/// The most recently created attempt that is not completed, or 204.
pub async fn get_active_assessment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(skill_id): Path<DbId>,
) -> AppResult<Response> {
    find_owned_skill(&state.pool, skill_id, auth.user_id).await?;
    let attempts = AssessmentRepo::list_for_skill(&state.pool, skill_id).await?;

    Ok(match active_attempt(&attempts) {
        Some(active) => Json(DataResponse { data: active }).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    })
}

/// GET /api/assessments/{id}
pub async fn get_assessment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assessment_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let assessment = find_owned_assessment(&state.pool, assessment_id, auth.user_id).await?;
    Ok(Json(DataResponse { data: assessment }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /api/assessments
///
/// Start a new attempt for one of the caller's teaching skills.
pub async fn create_assessment(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateAssessment>,
) -> AppResult<impl IntoResponse> {
    let skill = find_owned_skill(&state.pool, input.skill_id, auth.user_id).await?;
    if !skill.is_teaching {
        return Err(CoreError::Validation(
            "Only teaching skills can be assessed".to_string(),
        )
        .into());
    }

    let assessment = AssessmentRepo::create(&state.pool, skill.id, auth.user_id).await?;

    tracing::info!(
        user_id = auth.user_id,
        skill_id = skill.id,
        assessment_id = assessment.id,
        "Assessment started"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: assessment })))
}

/// PUT /api/assessments/{id}
///
/// Either record one step score (advancing the step) or complete the
/// assessment. Completing twice returns the stored row unchanged.
pub async fn update_assessment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assessment_id): Path<DbId>,
    Json(action): Json<AssessmentAction>,
) -> AppResult<impl IntoResponse> {
    let assessment = find_owned_assessment(&state.pool, assessment_id, auth.user_id).await?;
    let mut progress = assessment.progress()?;

    let updated = match action {
        AssessmentAction::RecordScore { field, score } => {
            let in_step = progress.step.expected_score() == Some(field);
            progress.record_score(field, score)?;
            let saved = save(&state.pool, assessment_id, &progress).await?;
            tracing::info!(
                user_id = auth.user_id,
                assessment_id,
                field = field.as_str(),
                score,
                in_step,
                step = saved.current_step,
                overall_score = saved.overall_score,
                "Assessment score recorded"
            );
            saved
        }
        AssessmentAction::Complete => match progress.complete(Utc::now())? {
            Completion::AlreadyCompleted if assessment.completed_at.is_some() => assessment,
            _ => {
                let saved = save(&state.pool, assessment_id, &progress).await?;
                tracing::info!(
                    user_id = auth.user_id,
                    assessment_id,
                    overall_score = saved.overall_score,
                    "Assessment completed"
                );
                saved
            }
        },
    };

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/assessments/{id}/knowledge-test
///
/// Grade submitted answers against the stored key and record the result as
/// the knowledge score. Questions must come from the skill's category.
pub async fn submit_knowledge_test(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(assessment_id): Path<DbId>,
    Json(submission): Json<KnowledgeTestSubmission>,
) -> AppResult<impl IntoResponse> {
    let assessment = find_owned_assessment(&state.pool, assessment_id, auth.user_id).await?;
    let skill = find_skill(&state.pool, assessment.skill_id).await?;
    let mut progress = assessment.progress()?;

    let question_ids: Vec<DbId> = submission.answers.iter().map(|a| a.question_id).collect();
    let answer_key: HashMap<DbId, i32> = QuestionRepo::find_many(&state.pool, &question_ids)
        .await?
        .into_iter()
        .filter(|q| q.category == skill.category)
        .map(|q| (q.id, q.correct_option))
        .collect();

    let answers: Vec<(DbId, Option<i32>)> = submission
        .answers
        .iter()
        .map(|a| (a.question_id, a.selected_option))
        .collect();
    let score = grade_submission(&answers, &answer_key)?;

    progress.record_score(ScoreField::Knowledge, score)?;
    let saved = save(&state.pool, assessment_id, &progress).await?;

    tracing::info!(
        user_id = auth.user_id,
        assessment_id,
        questions = answers.len(),
        score,
        "Knowledge test graded"
    );

    Ok(Json(DataResponse {
        data: KnowledgeTestResult {
            score,
            assessment: saved,
        },
    }))
}
