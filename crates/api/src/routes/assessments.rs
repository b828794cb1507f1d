//! Route definitions for skill assessments.
//!
//! All endpoints require authentication and are scoped to the caller.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assessments;
use crate::state::AppState;

/// Routes mounted at `/assessments`.
///
/// ```text
/// POST   /                              -> create_assessment
/// GET    /user                          -> list_user_assessments
/// GET    /skill/{skill_id}              -> list_skill_assessments
/// GET    /skill/{skill_id}/active       -> get_active_assessment
/// GET    /{id}                          -> get_assessment
/// PUT    /{id}                          -> update_assessment
/// POST   /{id}/knowledge-test           -> submit_knowledge_test
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(assessments::create_assessment))
        .route("/user", get(assessments::list_user_assessments))
        .route("/skill/{skill_id}", get(assessments::list_skill_assessments))
        .route(
            "/skill/{skill_id}/active",
            get(assessments::get_active_assessment),
        )
        .route(
            "/{id}",
            get(assessments::get_assessment).put(assessments::update_assessment),
        )
        .route(
            "/{id}/knowledge-test",
            post(assessments::submit_knowledge_test),
        )
}
