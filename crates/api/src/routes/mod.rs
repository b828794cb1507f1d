pub mod assessments;
pub mod dashboard;
pub mod exchanges;
pub mod health;
pub mod messages;
pub mod skills;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /skills                                  list (public), create
/// /skills/teaching                         caller's teaching skills
/// /skills/learning                         caller's learning skills
/// /skills/{id}                             get (public), update, delete
///
/// /users/me                                caller's profile
/// /users/{id}                              public profile
///
/// /assessments                             create
/// /assessments/user                        caller's attempts
/// /assessments/skill/{skill_id}            attempts for an owned skill
/// /assessments/skill/{skill_id}/active     active attempt (204 if none)
/// /assessments/{id}                        get, update (record score / complete)
/// /assessments/{id}/knowledge-test         submit answers (POST)
///
/// /assessment/questions                    random quiz (?category=&count=)
///
/// /messages                                list, send
/// /messages/conversations                  one summary per counterpart
/// /messages/unread-count                   unread badge
/// /messages/conversation/{user_id}         thread with one user
/// /messages/{id}/read                      mark read (PUT)
///
/// /exchanges                               list, request
/// /exchanges/{id}                          update status / rate (PUT)
///
/// /dashboard/stats                         caller's counters
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/skills", skills::router())
        .nest("/users", users::router())
        .nest("/assessments", assessments::router())
        .route(
            "/assessment/questions",
            get(handlers::questions::get_questions),
        )
        .nest("/messages", messages::router())
        .nest("/exchanges", exchanges::router())
        .nest("/dashboard", dashboard::router())
}
