//! Placement requests and their outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::MINUTES_PER_DAY;
use crate::impl_domain_status_conversions;
use crate::types::{EventId, EventKind, SlotQuality, TimeOfDay};
use crate::{Result, SlotwiseError};

/// Day the caller wants the event on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TargetDay {
    Date(NaiveDate),
    /// English or French weekday name, matched exactly (case-insensitive).
    Weekday(String),
}

/// A decoded "place this for me" intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRequest {
    pub title: String,
    pub kind: EventKind,
    /// Minutes. Falls back to [`EventKind::default_duration_minutes`].
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub target: Option<TargetDay>,
    #[serde(default)]
    pub time_of_day: Option<TimeOfDay>,
    /// Prefer the best tier over the earliest slot.
    #[serde(default)]
    pub quality_priority: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
}

impl PlacementRequest {
    pub fn new(title: impl Into<String>, kind: EventKind) -> Self {
        Self {
            title: title.into(),
            kind,
            duration: None,
            target: None,
            time_of_day: None,
            quality_priority: false,
            location: None,
            category: None,
            subject: None,
            professor: None,
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = Some(minutes);
        self
    }

    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.target = Some(TargetDay::Date(date));
        self
    }

    pub fn on_weekday(mut self, name: impl Into<String>) -> Self {
        self.target = Some(TargetDay::Weekday(name.into()));
        self
    }

    pub fn during(mut self, time_of_day: TimeOfDay) -> Self {
        self.time_of_day = Some(time_of_day);
        self
    }

    pub fn prefer_quality(mut self) -> Self {
        self.quality_priority = true;
        self
    }

    pub fn at_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn resolved_duration(&self) -> u32 {
        self.duration.unwrap_or_else(|| self.kind.default_duration_minutes())
    }

    /// Reject requests no day could ever satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(SlotwiseError::InvalidInput("title must not be empty".into()));
        }
        let duration = self.resolved_duration();
        if duration == 0 || duration > MINUTES_PER_DAY {
            return Err(SlotwiseError::InvalidInput(format!(
                "duration must be between 1 and {MINUTES_PER_DAY} minutes, got {duration}"
            )));
        }
        Ok(())
    }
}

/// A placed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementSuccess {
    pub date: NaiveDate,
    pub day_name: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: u32,
    pub quality: SlotQuality,
    pub reason: String,
    pub event_id: EventId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    NoSlotInWindow,
    NoSlotMatchingFilters,
}

impl_domain_status_conversions!(FailureKind {
    NoSlotInWindow => "no_slot_in_window",
    NoSlotMatchingFilters => "no_slot_matching_filters",
});

/// A day that could satisfy the request instead, with its slot count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAlternative {
    pub date: NaiveDate,
    pub day: String,
    pub count: usize,
}

/// A negotiable failure: nothing was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementFailure {
    pub error_kind: FailureKind,
    #[serde(default)]
    pub alternatives: Vec<DayAlternative>,
}

impl PlacementFailure {
    pub fn no_slot_in_window() -> Self {
        Self { error_kind: FailureKind::NoSlotInWindow, alternatives: Vec::new() }
    }

    pub fn no_matching_slot(alternatives: Vec<DayAlternative>) -> Self {
        Self { error_kind: FailureKind::NoSlotMatchingFilters, alternatives }
    }

    pub fn into_error(self) -> SlotwiseError {
        match self.error_kind {
            FailureKind::NoSlotInWindow => SlotwiseError::NoSlotInWindow,
            FailureKind::NoSlotMatchingFilters => {
                SlotwiseError::NoSlotMatchingFilters { alternatives: self.alternatives }
            }
        }
    }
}

/// Result of one placement attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlacementOutcome {
    Placed(PlacementSuccess),
    Unavailable(PlacementFailure),
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }

    /// Collapse into the error taxonomy for callers that prefer `?`.
    pub fn into_result(self) -> Result<PlacementSuccess> {
        match self {
            Self::Placed(success) => Ok(success),
            Self::Unavailable(failure) => Err(failure.into_error()),
        }
    }
}
