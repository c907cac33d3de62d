//! Error types for input validation and loading
//!
//! The calculation library and the engine never fail; unreachable goals and
//! inconsistent plans are reported in the output. Errors only arise at the
//! boundary where plan data is decoded and checked.

use thiserror::Error;

use crate::money::Money;

/// Result alias for the loading and validation boundary
pub type Result<T> = std::result::Result<T, PlannerError>;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Allocation for goal '{goal_id}' is negative: {amount}")]
    NegativeAllocation { goal_id: String, amount: Money },

    #[error("Goal '{0}' is allocated more than once")]
    DuplicateAllocation(String),

    #[error("Goal id '{0}' appears more than once")]
    DuplicateGoal(String),

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown goal type: {0}")]
    UnknownGoalType(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PlannerError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PlannerError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
