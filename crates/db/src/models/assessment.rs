//! Assessment entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use skillswap_core::assessment::{
    AssessmentAttempt, AssessmentProgress, AssessmentStatus, AssessmentStep, ScoreField,
};
use skillswap_core::error::CoreError;
use skillswap_core::types::{DbId, Timestamp};

/// A row from the `skill_assessments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assessment {
    pub id: DbId,
    pub skill_id: DbId,
    pub user_id: DbId,
    pub status: String,
    pub current_step: i32,
    pub knowledge_score: Option<i32>,
    pub practical_score: Option<i32>,
    pub teaching_score: Option<i32>,
    pub overall_score: Option<i32>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Assessment {
    /// Lift the stored columns into the state machine.
    pub fn progress(&self) -> Result<AssessmentProgress, CoreError> {
        Ok(AssessmentProgress {
            status: AssessmentStatus::from_str_db(&self.status)?,
            step: AssessmentStep::from_number(self.current_step)?,
            knowledge_score: self.knowledge_score,
            practical_score: self.practical_score,
            teaching_score: self.teaching_score,
            overall_score: self.overall_score,
            completed_at: self.completed_at,
        })
    }
}

impl AssessmentAttempt for Assessment {
    fn attempt_id(&self) -> DbId {
        self.id
    }

    fn skill_id(&self) -> DbId {
        self.skill_id
    }

    fn is_completed(&self) -> bool {
        self.status == AssessmentStatus::Completed.as_str()
    }

    fn overall_score(&self) -> Option<i32> {
        self.overall_score
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }
}

/// DTO for starting an assessment. The candidate is the caller.
#[derive(Debug, Deserialize)]
pub struct CreateAssessment {
    pub skill_id: DbId,
}

/// Body of `PUT /api/assessments/{id}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AssessmentAction {
    RecordScore { field: ScoreField, score: i32 },
    Complete,
}

/// One answered question in a knowledge-test submission.
#[derive(Debug, Deserialize)]
pub struct QuizAnswer {
    pub question_id: DbId,
    pub selected_option: Option<i32>,
}

/// Body of `POST /api/assessments/{id}/knowledge-test`.
#[derive(Debug, Deserialize)]
pub struct KnowledgeTestSubmission {
    pub answers: Vec<QuizAnswer>,
}
