//! Skill exchange rules: request checks, status transitions, and ratings.
//!
//! Rating fields are named after the party that writes them: only the
//! student may set `student_rating` and only the teacher may set
//! `teacher_rating`. A changed rating is folded into the aggregate of the
//! user the field is named after, so `student_rating` lands on the student
//! and `teacher_rating` on the teacher (and the exchanged skill).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Lowest accepted rating.
pub const MIN_RATING: i32 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i32 = 5;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeStatus {
    Pending,
    Active,
    Completed,
}

impl ExchangeStatus {
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "pending" => Ok(Self::Pending),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid exchange status '{s}'. Must be one of: pending, active, completed"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Pending => 0,
            Self::Active => 1,
            Self::Completed => 2,
        }
    }
}

/// Status only moves forward. Staying in place is allowed.
pub fn validate_status_transition(
    from: ExchangeStatus,
    to: ExchangeStatus,
) -> Result<(), CoreError> {
    if to.rank() < from.rank() {
        return Err(CoreError::Conflict(format!(
            "Cannot move exchange from '{}' back to '{}'",
            from.as_str(),
            to.as_str()
        )));
    }
    Ok(())
}

/// Change to a skill's `active_students` counter caused by a status change.
pub fn active_students_delta(from: ExchangeStatus, to: ExchangeStatus) -> i32 {
    match (from == ExchangeStatus::Active, to == ExchangeStatus::Active) {
        (false, true) => 1,
        (true, false) => -1,
        _ => 0,
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Checks for a new exchange request made by `caller_id`.
///
/// `skill_owner_id` and `skill_is_teaching` describe the requested skill.
pub fn validate_exchange_request(
    caller_id: DbId,
    student_id: DbId,
    teacher_id: DbId,
    skill_owner_id: DbId,
    skill_is_teaching: bool,
) -> Result<(), CoreError> {
    if student_id != caller_id {
        return Err(CoreError::Forbidden(
            "You can only create exchanges as a student".to_string(),
        ));
    }
    if teacher_id == student_id {
        return Err(CoreError::Validation(
            "You cannot request an exchange with yourself".to_string(),
        ));
    }
    if !skill_is_teaching {
        return Err(CoreError::Validation(
            "Exchanges can only be requested for teaching skills".to_string(),
        ));
    }
    if skill_owner_id != teacher_id {
        return Err(CoreError::Validation(
            "The requested skill does not belong to the teacher".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Participants and ratings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Teacher,
    Student,
}

/// Resolve the caller's role in an exchange. Outsiders are forbidden.
pub fn participant_role(
    teacher_id: DbId,
    student_id: DbId,
    caller_id: DbId,
) -> Result<ParticipantRole, CoreError> {
    if caller_id == teacher_id {
        Ok(ParticipantRole::Teacher)
    } else if caller_id == student_id {
        Ok(ParticipantRole::Student)
    } else {
        Err(CoreError::Forbidden(
            "Not authorized to update this exchange".to_string(),
        ))
    }
}

pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(CoreError::Validation(format!(
            "Rating {rating} is out of range ({MIN_RATING}..={MAX_RATING})"
        )));
    }
    Ok(())
}

/// Each party may only write the rating field named after their own role.
pub fn authorize_rating_fields(
    role: ParticipantRole,
    student_rating: Option<i32>,
    teacher_rating: Option<i32>,
) -> Result<(), CoreError> {
    if student_rating.is_some() && role != ParticipantRole::Student {
        return Err(CoreError::Forbidden(
            "Only students can provide student ratings".to_string(),
        ));
    }
    if teacher_rating.is_some() && role != ParticipantRole::Teacher {
        return Err(CoreError::Forbidden(
            "Only teachers can provide teacher ratings".to_string(),
        ));
    }
    Ok(())
}

/// Running two-point average: the new rating is averaged with the previous
/// aggregate, not with the full history.
pub fn running_average(previous: Option<i32>, rating: i32) -> i32 {
    match previous {
        None => rating,
        Some(prev) => (f64::from(prev + rating) / 2.0).round() as i32,
    }
}

/// Whose aggregate absorbs a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatedParty {
    Teacher,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdate {
    pub rated: RatedParty,
    pub rating: i32,
}

/// Ratings in a patch that change the stored value and therefore must be
/// pushed into an aggregate. Each field feeds the party it is named after.
pub fn rating_updates(
    stored_student_rating: Option<i32>,
    stored_teacher_rating: Option<i32>,
    new_student_rating: Option<i32>,
    new_teacher_rating: Option<i32>,
) -> Vec<RatingUpdate> {
    let mut updates = Vec::new();
    if let Some(rating) = new_student_rating {
        if stored_student_rating != Some(rating) {
            updates.push(RatingUpdate {
                rated: RatedParty::Student,
                rating,
            });
        }
    }
    if let Some(rating) = new_teacher_rating {
        if stored_teacher_rating != Some(rating) {
            updates.push(RatingUpdate {
                rated: RatedParty::Teacher,
                rating,
            });
        }
    }
    updates
}
