//! Query parameter types for API handlers.

use serde::Deserialize;

/// Parameters for `GET /assessment/questions`.
///
/// `category` is checked in the handler so a missing value produces the
/// standard JSON validation error rather than a plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct QuestionParams {
    pub category: Option<String>,
    pub count: Option<i64>,
}
