//! Teaching-skill assessment state machine.
//!
//! An assessment moves through four fixed steps. Each of the first three
//! steps produces one score; the fourth is a review step from which the
//! assessment can be completed. Status is tracked separately from the step
//! counter:
//!
//! ```text
//! status:  pending ──first score──▶ in_progress ──complete()──▶ completed
//! step:    KnowledgeTest → PracticalExercise → TeachingSample → Review
//! ```
//!
//! Score writes are not bound to the current step: a teaching
//! score recorded at step 2 is accepted and still advances the counter.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Lowest accepted score for a single step.
pub const MIN_SCORE: i32 = 0;

/// Highest accepted score for a single step.
pub const MAX_SCORE: i32 = 100;

/// Minimum step number (1-based).
pub const MIN_STEP: i32 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: i32 = 4;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Pending,
    InProgress,
    Completed,
}

impl AssessmentStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid assessment status '{s}'. Must be one of: pending, in_progress, completed"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The four steps of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStep {
    KnowledgeTest,
    PracticalExercise,
    TeachingSample,
    Review,
}

impl AssessmentStep {
    /// Convert a 1-based step number to an `AssessmentStep`.
    pub fn from_number(n: i32) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::KnowledgeTest),
            2 => Ok(Self::PracticalExercise),
            3 => Ok(Self::TeachingSample),
            4 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    pub fn to_number(self) -> i32 {
        match self {
            Self::KnowledgeTest => 1,
            Self::PracticalExercise => 2,
            Self::TeachingSample => 3,
            Self::Review => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::KnowledgeTest => "Knowledge Test",
            Self::PracticalExercise => "Practical Exercise",
            Self::TeachingSample => "Teaching Sample",
            Self::Review => "Review",
        }
    }

    /// The step after this one. `Review` is the last step and maps to itself.
    pub fn next(self) -> Self {
        match self {
            Self::KnowledgeTest => Self::PracticalExercise,
            Self::PracticalExercise => Self::TeachingSample,
            Self::TeachingSample | Self::Review => Self::Review,
        }
    }

    /// The score this step normally produces (`None` for the review step).
    pub fn expected_score(self) -> Option<ScoreField> {
        match self {
            Self::KnowledgeTest => Some(ScoreField::Knowledge),
            Self::PracticalExercise => Some(ScoreField::Practical),
            Self::TeachingSample => Some(ScoreField::Teaching),
            Self::Review => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// One of the three per-step score columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreField {
    Knowledge,
    Practical,
    Teaching,
}

impl ScoreField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Knowledge => "knowledge",
            Self::Practical => "practical",
            Self::Teaching => "teaching",
        }
    }
}

/// Validate that a step score is within `[MIN_SCORE, MAX_SCORE]`.
pub fn validate_score(score: i32) -> Result<(), CoreError> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(CoreError::Validation(format!(
            "Score {score} is out of range ({MIN_SCORE}..={MAX_SCORE})"
        )));
    }
    Ok(())
}

/// Rounded mean of the three step scores.
///
/// Halves round up. The sum of three integers never lands on a half when
/// divided by three, so in practice this is nearest-integer rounding.
pub fn overall_score(knowledge: i32, practical: i32, teaching: i32) -> i32 {
    (f64::from(knowledge + practical + teaching) / 3.0).round() as i32
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Outcome of [`AssessmentProgress::complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// This call moved the assessment into `completed`.
    Completed,
    /// The assessment was already completed; nothing changed.
    AlreadyCompleted,
}

/// Mutable progress of one assessment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentProgress {
    pub status: AssessmentStatus,
    pub step: AssessmentStep,
    pub knowledge_score: Option<i32>,
    pub practical_score: Option<i32>,
    pub teaching_score: Option<i32>,
    pub overall_score: Option<i32>,
    pub completed_at: Option<Timestamp>,
}

impl Default for AssessmentProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentProgress {
    /// A fresh attempt: step 1, `pending`, no scores.
    pub fn new() -> Self {
        Self {
            status: AssessmentStatus::Pending,
            step: AssessmentStep::KnowledgeTest,
            knowledge_score: None,
            practical_score: None,
            teaching_score: None,
            overall_score: None,
            completed_at: None,
        }
    }

    pub fn score(&self, field: ScoreField) -> Option<i32> {
        match field {
            ScoreField::Knowledge => self.knowledge_score,
            ScoreField::Practical => self.practical_score,
            ScoreField::Teaching => self.teaching_score,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed
    }

    /// Record a step score and advance the step counter by one.
    ///
    /// The field does not have to match the current step. The first score
    /// written moves the status from `pending` to `in_progress`. Once all
    /// three scores are present `overall_score` follows them on every write.
    pub fn record_score(&mut self, field: ScoreField, score: i32) -> Result<(), CoreError> {
        if self.is_completed() {
            return Err(CoreError::Conflict(
                "Assessment is already completed".to_string(),
            ));
        }
        validate_score(score)?;

        let slot = match field {
            ScoreField::Knowledge => &mut self.knowledge_score,
            ScoreField::Practical => &mut self.practical_score,
            ScoreField::Teaching => &mut self.teaching_score,
        };
        *slot = Some(score);
        self.overall_score = self.mean_of_scores();

        self.step = self.step.next();
        if self.status == AssessmentStatus::Pending {
            self.status = AssessmentStatus::InProgress;
        }
        Ok(())
    }

    fn mean_of_scores(&self) -> Option<i32> {
        match (self.knowledge_score, self.practical_score, self.teaching_score) {
            (Some(k), Some(p), Some(t)) => Some(overall_score(k, p, t)),
            _ => None,
        }
    }

    /// Complete the assessment at the review step.
    ///
    /// Requires all three scores. Calling this on an already completed
    /// assessment is a no-op and never moves `completed_at`.
    pub fn complete(&mut self, now: Timestamp) -> Result<Completion, CoreError> {
        if self.is_completed() {
            if self.completed_at.is_none() {
                self.completed_at = Some(now);
            }
            return Ok(Completion::AlreadyCompleted);
        }

        if self.step != AssessmentStep::Review {
            return Err(CoreError::Validation(format!(
                "Assessment can only be completed at the {} step (currently at step {})",
                AssessmentStep::Review.label(),
                self.step.to_number()
            )));
        }

        let (Some(k), Some(p), Some(t)) =
            (self.knowledge_score, self.practical_score, self.teaching_score)
        else {
            let missing: Vec<&str> = [ScoreField::Knowledge, ScoreField::Practical, ScoreField::Teaching]
                .into_iter()
                .filter(|f| self.score(*f).is_none())
                .map(ScoreField::as_str)
                .collect();
            return Err(CoreError::Validation(format!(
                "Cannot complete assessment: missing {} score(s)",
                missing.join(", ")
            )));
        };

        self.overall_score = Some(overall_score(k, p, t));
        self.status = AssessmentStatus::Completed;
        self.completed_at = Some(now);
        Ok(Completion::Completed)
    }
}

// ---------------------------------------------------------------------------
// Attempt history
// ---------------------------------------------------------------------------

/// Read-only view of a stored assessment attempt.
pub trait AssessmentAttempt {
    fn attempt_id(&self) -> DbId;
    fn skill_id(&self) -> DbId;
    fn is_completed(&self) -> bool;
    fn overall_score(&self) -> Option<i32>;
    fn created_at(&self) -> Timestamp;
    fn completed_at(&self) -> Option<Timestamp>;
}

/// The attempt a user is currently working on: the most recently created
/// attempt that is not completed.
pub fn active_attempt<A: AssessmentAttempt>(attempts: &[A]) -> Option<&A> {
    attempts
        .iter()
        .filter(|a| !a.is_completed())
        .max_by_key(|a| (a.created_at(), a.attempt_id()))
}

/// Overall score of the most recently completed attempt, if any.
///
/// A skill counts as verified when this returns `Some`.
pub fn verified_score<A: AssessmentAttempt>(attempts: &[A]) -> Option<i32> {
    attempts
        .iter()
        .filter(|a| a.is_completed() && a.overall_score().is_some())
        .max_by_key(|a| (a.completed_at(), a.attempt_id()))
        .and_then(|a| a.overall_score())
}
