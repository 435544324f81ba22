//! Error types used throughout the planner

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::DayAlternative;

/// Main error type for Slotwise
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SlotwiseError {
    /// Malformed `HH:MM` value. Rejected at the boundary, never coerced.
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The whole lookahead window has no usable slot.
    #[error("No free slot in the lookahead window")]
    NoSlotInWindow,

    /// Free slots exist but none satisfy the request filters.
    #[error(
        "No free slot matches the requested filters ({} alternative day(s))",
        alternatives.len()
    )]
    NoSlotMatchingFilters { alternatives: Vec<DayAlternative> },

    /// Storage collaborator failure, message of the underlying cause preserved.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// The chosen slot was taken between selection and commit. Re-run selection.
    #[error("Concurrent conflict: {0}")]
    ConcurrentConflict(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlotwiseError {
    /// Stable label suitable for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InvalidTimeFormat(_) => "invalid_time_format",
            Self::InvalidInput(_) => "invalid_input",
            Self::NoSlotInWindow => "no_slot_in_window",
            Self::NoSlotMatchingFilters { .. } => "no_slot_matching_filters",
            Self::Persistence(_) => "persistence",
            Self::ConcurrentConflict(_) => "concurrent_conflict",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the caller should simply re-run selection.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentConflict(_))
    }
}

/// Result type alias for Slotwise operations
pub type Result<T> = std::result::Result<T, SlotwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(SlotwiseError::NoSlotInWindow.label(), "no_slot_in_window");
        assert_eq!(SlotwiseError::Persistence("disk".into()).label(), "persistence");
    }

    #[test]
    fn only_conflicts_are_retryable() {
        assert!(SlotwiseError::ConcurrentConflict("taken".into()).is_retryable());
        assert!(!SlotwiseError::Persistence("disk".into()).is_retryable());
        assert!(!SlotwiseError::NoSlotInWindow.is_retryable());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(SlotwiseError::InvalidTimeFormat("25:00".into()))
            .expect("error should serialize");
        assert_eq!(json["type"], "InvalidTimeFormat");
        assert_eq!(json["message"], "25:00");
    }
}
