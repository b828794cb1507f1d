//! Route definitions for skills.

use axum::routing::get;
use axum::Router;

use crate::handlers::skills;
use crate::state::AppState;

/// Routes mounted at `/skills`.
///
/// ```text
/// GET    /            -> list_skills (public)
/// POST   /            -> create_skill
/// GET    /teaching    -> list_teaching
/// GET    /learning    -> list_learning
/// GET    /{id}        -> get_skill (public)
/// PUT    /{id}        -> update_skill
/// DELETE /{id}        -> delete_skill
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(skills::list_skills).post(skills::create_skill))
        .route("/teaching", get(skills::list_teaching))
        .route("/learning", get(skills::list_learning))
        .route(
            "/{id}",
            get(skills::get_skill)
                .put(skills::update_skill)
                .delete(skills::delete_skill),
        )
}
