//! Dashboard aggregates for the signed-in user.

use std::collections::HashMap;

use serde::Serialize;

use crate::assessment::{verified_score, AssessmentAttempt};
use crate::types::DbId;

/// Counters shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub teaching_skills_count: i64,
    pub learning_skills_count: i64,
    pub active_exchanges_count: i64,
    /// Mean of the rated teaching skills; `None` when none are rated.
    pub average_rating: Option<f64>,
    pub verified_skills_count: i64,
    pub unread_messages_count: i64,
}

/// Plain mean over the ratings that are present.
pub fn average_rating<I>(ratings: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<i32>>,
{
    let (sum, count) = ratings
        .into_iter()
        .flatten()
        .fold((0i64, 0i64), |(sum, count), r| (sum + i64::from(r), count + 1));
    (count > 0).then(|| sum as f64 / count as f64)
}

/// Number of `skill_ids` that have a verified assessment in `attempts`.
pub fn count_verified<A: AssessmentAttempt + Clone>(skill_ids: &[DbId], attempts: &[A]) -> i64 {
    let mut by_skill: HashMap<DbId, Vec<A>> = HashMap::new();
    for attempt in attempts {
        by_skill
            .entry(attempt.skill_id())
            .or_default()
            .push(attempt.clone());
    }
    skill_ids
        .iter()
        .filter(|id| {
            by_skill
                .get(id)
                .is_some_and(|a| verified_score(a).is_some())
        })
        .count() as i64
}
