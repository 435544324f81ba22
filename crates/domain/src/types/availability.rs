//! Free slots, quality tiers and the availability report.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;
use crate::types::Interval;
use crate::utils::clock_time::{hour_of, to_hhmm};
use crate::utils::day_reference::weekday_label;

/// A gap between busy intervals on one day. `duration > 0` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeSlot {
    pub date: NaiveDate,
    /// Weekday label, e.g. `Thursday`.
    pub day: String,
    pub start: u32,
    pub end: u32,
    pub duration: u32,
}

impl FreeSlot {
    pub fn new(date: NaiveDate, interval: Interval) -> Self {
        Self {
            date,
            day: weekday_label(date).to_string(),
            start: interval.start,
            end: interval.end,
            duration: interval.duration(),
        }
    }

    pub fn interval(&self) -> Interval {
        Interval { start: self.start, end: self.end }
    }

    pub fn start_hour(&self) -> u32 {
        hour_of(self.start)
    }
}

// ============================================================================
// Quality
// ============================================================================

/// Coarse desirability tier. Ordered so that `Excellent` is the greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotQuality {
    Acceptable,
    Good,
    Excellent,
}

impl_domain_status_conversions!(SlotQuality {
    Acceptable => "acceptable",
    Good => "good",
    Excellent => "excellent",
});

impl SlotQuality {
    /// 3 for excellent down to 1 for acceptable.
    pub fn rank(self) -> u8 {
        match self {
            Self::Excellent => 3,
            Self::Good => 2,
            Self::Acceptable => 1,
        }
    }
}

/// A free slot with its quality tier and advisory activity hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredSlot {
    pub date: NaiveDate,
    pub day: String,
    pub start: u32,
    pub end: u32,
    pub duration: u32,
    pub quality: SlotQuality,
    pub score: i32,
    #[serde(default)]
    pub recommended: Vec<String>,
}

impl ScoredSlot {
    pub fn start_time(&self) -> String {
        to_hhmm(self.start)
    }

    pub fn end_time(&self) -> String {
        to_hhmm(self.end)
    }

    pub fn start_hour(&self) -> u32 {
        hour_of(self.start)
    }

    pub fn interval(&self) -> Interval {
        Interval { start: self.start, end: self.end }
    }
}

/// Summary of the lookahead window handed to downstream consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Chronological, truncated to the configured report size.
    pub slots: Vec<ScoredSlot>,
    /// Sum over the whole window, not only the truncated list.
    pub total_free_minutes: u32,
    pub excellent_count: usize,
    pub summary: String,
    #[serde(default)]
    pub critical_info: Vec<String>,
}

// ============================================================================
// Time of day
// ============================================================================

/// Part of the day a slot should start in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Any,
}

impl_domain_status_conversions!(TimeOfDay {
    Morning => "morning",
    Afternoon => "afternoon",
    Evening => "evening",
    Any => "any",
});

impl TimeOfDay {
    /// Start-hour bucket `[from, to)`; `None` for `Any`.
    pub fn hour_range(self) -> Option<(u32, u32)> {
        match self {
            Self::Morning => Some((7, 12)),
            Self::Afternoon => Some((12, 18)),
            Self::Evening => Some((18, 22)),
            Self::Any => None,
        }
    }

    pub fn contains_hour(self, hour: u32) -> bool {
        self.hour_range().map_or(true, |(from, to)| from <= hour && hour < to)
    }
}

/// A concrete suggestion produced by the optimal-time search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSuggestion {
    pub date: NaiveDate,
    pub day_name: String,
    pub start_time: String,
    pub end_time: String,
    pub time_of_day: TimeOfDay,
    /// Higher is better.
    pub priority: u8,
    pub reason: String,
}
