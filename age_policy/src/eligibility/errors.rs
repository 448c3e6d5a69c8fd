//! Input error types.
//!
//! These are reserved for malformed or insufficient input. A player who is
//! simply not admitted gets a verdict with `allowed: false`, never an error.

use serde::Serialize;
use thiserror::Error;

/// Malformed or insufficient eligibility input
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityError {
    /// Required field empty or absent
    #[error("Missing required field {entity}.{field}")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// Tournament asks for a uniform restriction but carries none
    #[error("Tournament {tournament_id} uses a uniform age restriction but none is set")]
    MissingUniformRestriction { tournament_id: String },

    /// Table needs venue policy but no venue was supplied
    #[error("Table {table_id} has no age restriction of its own and no venue was supplied")]
    MissingVenue { table_id: String },

    /// Limited-hours policy without a minors window
    #[error("Venue {venue_id} allows minors during limited hours but has no minors window")]
    MissingMinorsWindow { venue_id: String },

    /// Venue supplied is not the one the table or tournament belongs to
    #[error("Venue mismatch: expected {expected}, got {found}")]
    VenueMismatch { expected: String, found: String },

    /// Clock time not in `HH:MM` form
    #[error("Invalid time '{value}': use HH:MM format")]
    InvalidTime { value: String },
}

impl EligibilityError {
    /// Stable machine-readable code, matching the serialized `code` tag
    pub fn code(&self) -> &'static str {
        match self {
            EligibilityError::MissingField { .. } => "MISSING_FIELD",
            EligibilityError::MissingUniformRestriction { .. } => "MISSING_UNIFORM_RESTRICTION",
            EligibilityError::MissingVenue { .. } => "MISSING_VENUE",
            EligibilityError::MissingMinorsWindow { .. } => "MISSING_MINORS_WINDOW",
            EligibilityError::VenueMismatch { .. } => "VENUE_MISMATCH",
            EligibilityError::InvalidTime { .. } => "INVALID_TIME",
        }
    }
}

/// Result type for eligibility operations
pub type EligibilityResult<T> = Result<T, EligibilityError>;
