//! Configuration structures
//!
//! Everything the planner reads at runtime lives here. Times of day are
//! stored as `HH:MM` strings so config files stay human-editable; they are
//! parsed (and rejected if malformed) by [`Config::validate`] and by the
//! accessors on [`DailyConstraints`].

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONTEXT_MAX_ENTRIES, DEFAULT_CONTEXT_TTL_SECS, DEFAULT_FETCH_CONCURRENCY,
    DEFAULT_MAX_REPORT_SLOTS, DEFAULT_MIN_SLOT_MINUTES, MAX_LOOKAHEAD_DAYS, MIN_LOOKAHEAD_DAYS,
};
use crate::types::Interval;
use crate::utils::clock_time::to_minutes;
use crate::{Result, SlotwiseError};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub cache: CacheSettings,
}

impl Config {
    /// Check every section. Fails fast with `Config` on the first problem.
    pub fn validate(&self) -> Result<()> {
        self.database.validate()?;
        self.planner.validate()?;
        self.cache.validate()
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "slotwise.db".to_string(), pool_size: 4 }
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if self.path.trim().is_empty() {
            return Err(SlotwiseError::Config("database path must not be empty".into()));
        }
        if self.pool_size == 0 {
            return Err(SlotwiseError::Config("database pool_size must be at least 1".into()));
        }
        Ok(())
    }
}

/// A fixed daily window such as a meal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into() }
    }

    /// Parse into a validated minute interval.
    pub fn interval(&self) -> Result<Interval> {
        Interval::new(to_minutes(&self.start)?, to_minutes(&self.end)?)
    }
}

/// Fixed blocks applied to every day of the window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyConstraints {
    pub wake_time: String,
    pub bedtime: String,
    pub lunch: TimeWindow,
    pub dinner: TimeWindow,
    pub avoid_late_evening: bool,
    pub late_evening_cutoff: String,
}

impl Default for DailyConstraints {
    fn default() -> Self {
        Self {
            wake_time: "07:00".to_string(),
            bedtime: "23:00".to_string(),
            lunch: TimeWindow::new("12:00", "13:00"),
            dinner: TimeWindow::new("19:00", "20:00"),
            avoid_late_evening: true,
            late_evening_cutoff: "22:00".to_string(),
        }
    }
}

impl DailyConstraints {
    pub fn wake_minutes(&self) -> Result<u32> {
        to_minutes(&self.wake_time)
    }

    pub fn bedtime_minutes(&self) -> Result<u32> {
        to_minutes(&self.bedtime)
    }

    pub fn late_cutoff_minutes(&self) -> Result<u32> {
        to_minutes(&self.late_evening_cutoff)
    }

    /// Wake must precede bedtime, meals must sit inside the waking day, and
    /// the late cutoff must not fall before waking.
    pub fn validate(&self) -> Result<()> {
        let wake = self.wake_minutes()?;
        let bed = self.bedtime_minutes()?;
        if wake >= bed {
            return Err(SlotwiseError::Config(format!(
                "wake_time {} must be before bedtime {}",
                self.wake_time, self.bedtime
            )));
        }

        for (name, window) in [("lunch", &self.lunch), ("dinner", &self.dinner)] {
            let interval = window.interval().map_err(|e| match e {
                SlotwiseError::InvalidTimeFormat(_) => e,
                other => SlotwiseError::Config(format!("{name}: {other}")),
            })?;
            if interval.is_empty() {
                return Err(SlotwiseError::Config(format!("{name} window is empty")));
            }
        }

        let cutoff = self.late_cutoff_minutes()?;
        if cutoff < wake {
            return Err(SlotwiseError::Config(format!(
                "late_evening_cutoff {} is before wake_time {}",
                self.late_evening_cutoff, self.wake_time
            )));
        }
        Ok(())
    }
}

/// Preferred study session bounds, in minutes. Feeds the quality scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPreferences {
    pub min_duration: u32,
    pub max_duration: u32,
}

impl Default for StudyPreferences {
    fn default() -> Self {
        Self { min_duration: 30, max_duration: 120 }
    }
}

/// Planner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub constraints: DailyConstraints,
    pub study: StudyPreferences,
    /// Days scanned starting at the reference date, inclusive.
    pub lookahead_days: u32,
    /// Maximum in-flight day fetches during a scan.
    pub fetch_concurrency: usize,
    /// Slots shorter than this are dropped before scoring.
    pub min_slot_minutes: u32,
    pub max_report_slots: usize,
    /// Block `[00:00, now)` on the reference date.
    pub skip_elapsed_today: bool,
    /// Address substituted for room codes on class events.
    pub campus_address: Option<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            constraints: DailyConstraints::default(),
            study: StudyPreferences::default(),
            lookahead_days: MIN_LOOKAHEAD_DAYS,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            min_slot_minutes: DEFAULT_MIN_SLOT_MINUTES,
            max_report_slots: DEFAULT_MAX_REPORT_SLOTS,
            skip_elapsed_today: true,
            campus_address: None,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        self.constraints.validate()?;

        if !(MIN_LOOKAHEAD_DAYS..=MAX_LOOKAHEAD_DAYS).contains(&self.lookahead_days) {
            return Err(SlotwiseError::Config(format!(
                "lookahead_days must be between {} and {}, got {}",
                MIN_LOOKAHEAD_DAYS, MAX_LOOKAHEAD_DAYS, self.lookahead_days
            )));
        }
        if self.fetch_concurrency == 0 {
            return Err(SlotwiseError::Config("fetch_concurrency must be at least 1".into()));
        }
        if self.min_slot_minutes == 0 {
            return Err(SlotwiseError::Config("min_slot_minutes must be at least 1".into()));
        }
        if self.max_report_slots == 0 {
            return Err(SlotwiseError::Config("max_report_slots must be at least 1".into()));
        }
        if self.study.min_duration > self.study.max_duration {
            return Err(SlotwiseError::Config(format!(
                "study.min_duration {} exceeds study.max_duration {}",
                self.study.min_duration, self.study.max_duration
            )));
        }
        Ok(())
    }
}

/// Settings for the per-user context cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub context_ttl_secs: u64,
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            context_ttl_secs: DEFAULT_CONTEXT_TTL_SECS,
            max_entries: DEFAULT_CONTEXT_MAX_ENTRIES,
        }
    }
}

impl CacheSettings {
    pub fn validate(&self) -> Result<()> {
        if self.context_ttl_secs == 0 {
            return Err(SlotwiseError::Config("cache.context_ttl_secs must be positive".into()));
        }
        if self.max_entries == 0 {
            return Err(SlotwiseError::Config("cache.max_entries must be at least 1".into()));
        }
        Ok(())
    }
}
