//! Skill categories, proficiency levels, and input validation rules.
//!
//! Categories and proficiency levels are stored as TEXT columns; these enums
//! are the single source of truth for which strings are accepted.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::DbId;

/// Minimum length of a skill name.
pub const MIN_NAME_LEN: u64 = 3;

/// Minimum length of a skill description.
pub const MIN_DESCRIPTION_LEN: u64 = 10;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The seven skill categories offered in the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    Programming,
    Design,
    Language,
    Music,
    Business,
    Lifestyle,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        Self::Programming,
        Self::Design,
        Self::Language,
        Self::Music,
        Self::Business,
        Self::Lifestyle,
        Self::Other,
    ];

    /// Parse a category string from the database or a request.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid category '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Programming => "programming",
            Self::Design => "design",
            Self::Language => "language",
            Self::Music => "music",
            Self::Business => "business",
            Self::Lifestyle => "lifestyle",
            Self::Other => "other",
        }
    }
}

// ---------------------------------------------------------------------------
// Proficiency
// ---------------------------------------------------------------------------

/// Self-declared proficiency of a teacher. Only meaningful on teaching skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl ProficiencyLevel {
    pub const ALL: [ProficiencyLevel; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid proficiency '{s}'. Must be one of: {}",
                    Self::ALL.map(Self::as_str).join(", ")
                ))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

// ---------------------------------------------------------------------------
// Field validators (used by `#[validate(custom(...))]` on request DTOs)
// ---------------------------------------------------------------------------

/// Field-level check for `category`.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    SkillCategory::from_str_db(category)
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("invalid_category")
                .with_message(Cow::Borrowed("Please select a valid category"))
        })
}

/// Field-level check for `proficiency`.
pub fn validate_proficiency(proficiency: &str) -> Result<(), ValidationError> {
    ProficiencyLevel::from_str_db(proficiency)
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("invalid_proficiency")
                .with_message(Cow::Borrowed("Please select a valid proficiency level"))
        })
}

// ---------------------------------------------------------------------------
// Cross-field and ownership rules
// ---------------------------------------------------------------------------

/// Proficiency is a teaching attribute; a learning skill must not carry one.
pub fn validate_proficiency_for_kind(
    is_teaching: bool,
    proficiency: Option<&str>,
) -> Result<(), CoreError> {
    if !is_teaching && proficiency.is_some() {
        return Err(CoreError::Validation(
            "Proficiency can only be set on teaching skills".to_string(),
        ));
    }
    Ok(())
}

/// Only the owner of a skill may modify or delete it.
pub fn ensure_skill_owner(owner_id: DbId, caller_id: DbId, action: &str) -> Result<(), CoreError> {
    if owner_id != caller_id {
        return Err(CoreError::Forbidden(format!(
            "Not authorized to {action} this skill"
        )));
    }
    Ok(())
}
