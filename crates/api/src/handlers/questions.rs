//! Handler for serving knowledge-test questions.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use skillswap_core::error::CoreError;
use skillswap_core::knowledge_test::{clamp_question_count, sample_questions, TIME_LIMIT_SECS};
use skillswap_core::skill::SkillCategory;
use skillswap_db::models::question::QuizQuestion;
use skillswap_db::repositories::QuestionRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::QuestionParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A freshly drawn quiz. Answers stay on the server.
#[derive(Debug, Serialize)]
pub struct Quiz {
    pub category: &'static str,
    pub time_limit_secs: u32,
    pub questions: Vec<QuizQuestion>,
}

/// GET /api/assessment/questions?category=&count=
///
/// Draw up to `count` questions (default 10) from the category without
/// replacement.
pub async fn get_questions(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<QuestionParams>,
) -> AppResult<impl IntoResponse> {
    let category = params
        .category
        .as_deref()
        .ok_or_else(|| CoreError::Validation("category is required".to_string()))?;
    let category = SkillCategory::from_str_db(category)?;
    let count = clamp_question_count(params.count);

    let bank = QuestionRepo::list_by_category(&state.pool, category.as_str()).await?;
    let questions = sample_questions(bank, count, &mut rand::rng())
        .into_iter()
        .map(QuizQuestion::from)
        .collect();

    Ok(Json(DataResponse {
        data: Quiz {
            category: category.as_str(),
            time_limit_secs: TIME_LIMIT_SECS,
            questions,
        },
    }))
}
