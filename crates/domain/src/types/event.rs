//! Calendar events and the minute intervals derived from them.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MINUTES_PER_DAY;
use crate::impl_domain_status_conversions;
use crate::utils::clock_time::to_minutes;
use crate::{Result, SlotwiseError};

// ============================================================================
// Event kind
// ============================================================================

/// What a calendar entry represents. Drives default durations and colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Class,
    Exam,
    Study,
    Activity,
}

impl_domain_status_conversions!(EventKind {
    Class => "class",
    Exam => "exam",
    Study => "study",
    Activity => "activity",
});

impl EventKind {
    /// Duration used when a request does not carry one.
    pub fn default_duration_minutes(self) -> u32 {
        match self {
            Self::Study | Self::Class => 90,
            Self::Activity => 60,
            Self::Exam => 120,
        }
    }

    /// Display colour stored with the event.
    pub fn color(self) -> &'static str {
        match self {
            Self::Class => "#3B82F6",
            Self::Exam => "#EF4444",
            Self::Study => "#F59E0B",
            Self::Activity => "#14B8A6",
        }
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque event identifier assigned by the storage adapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for EventId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Interval
// ============================================================================

/// Half-open `[start, end)` range of minutes since midnight.
///
/// Always satisfies `start <= end <= 1440`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start > end || end > MINUTES_PER_DAY {
            return Err(SlotwiseError::InvalidInput(format!(
                "interval [{start}, {end}) is outside [0, {MINUTES_PER_DAY}] or inverted"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse from two `HH:MM` strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(to_minutes(start)?, to_minutes(end)?)
    }

    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// True for zero-length ranges and for inverted ones built through the
    /// public fields.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True when the two ranges share at least one minute. Touching ranges
    /// do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, minute: u32) -> bool {
        self.start <= minute && minute < self.end
    }
}

// ============================================================================
// Calendar events
// ============================================================================

/// A stored calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub owner: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    /// `HH:MM`
    pub start_time: String,
    /// `HH:MM`
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Only meaningful for activities (sport, club, job...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    pub color: String,
    pub created_at: NaiveDateTime,
}

impl CalendarEvent {
    /// Parsed `(start, end)` in minutes. Malformed times are an error.
    pub fn minutes(&self) -> Result<(u32, u32)> {
        Ok((to_minutes(&self.start_time)?, to_minutes(&self.end_time)?))
    }

    /// The busy interval this event occupies, or `None` when it is empty or
    /// inverted.
    pub fn busy_interval(&self) -> Result<Option<Interval>> {
        let (start, end) = self.minutes()?;
        if end <= start {
            return Ok(None);
        }
        Interval::new(start, end).map(Some)
    }

    /// Day of week with Monday = 0.
    pub fn day_index(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }
}

/// Insert payload for a new calendar entry. The adapter assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    pub owner: String,
    pub title: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor: Option<String>,
    pub color: String,
}

impl NewCalendarEvent {
    /// Materialize the stored row once the adapter has an id for it.
    pub fn into_event(self, id: EventId, created_at: NaiveDateTime) -> CalendarEvent {
        CalendarEvent {
            id,
            owner: self.owner,
            title: self.title,
            kind: self.kind,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            location: self.location,
            category: self.category,
            subject: self.subject,
            professor: self.professor,
            color: self.color,
            created_at,
        }
    }

    pub fn interval(&self) -> Result<Interval> {
        Interval::parse(&self.start_time, &self.end_time)
    }
}
