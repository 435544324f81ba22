//! Planner constants
//!
//! Centralized location for all domain-level constants used throughout the
//! planner.

// Clock arithmetic
pub const MINUTES_PER_DAY: u32 = 1440;
pub const MINUTES_PER_HOUR: u32 = 60;

// Lookahead window. Today plus the next seven days, so every weekday
// strictly after today is inside the window.
pub const MIN_LOOKAHEAD_DAYS: u32 = 8;
pub const MAX_LOOKAHEAD_DAYS: u32 = 14;
pub const DEFAULT_FETCH_CONCURRENCY: usize = 4;

// Slot filtering and reporting
pub const DEFAULT_MIN_SLOT_MINUTES: u32 = 30;
pub const DEFAULT_MAX_REPORT_SLOTS: usize = 15;
pub const LOW_AVAILABILITY_THRESHOLD_MINUTES: u32 = 300;
pub const EXCELLENT_HIGHLIGHT_THRESHOLD: usize = 3;

// Slot scoring
pub const BASE_SLOT_SCORE: i32 = 50;
pub const STUDY_RANGE_BONUS: i32 = 20;
pub const MORNING_BONUS: i32 = 15;
pub const AFTERNOON_BONUS: i32 = 10;
pub const LATE_EVENING_PENALTY: i32 = 15;
pub const LONG_SLOT_BONUS: i32 = 10;
pub const LONG_SLOT_MINUTES: u32 = 90;
pub const EXCELLENT_SCORE: i32 = 70;
pub const GOOD_SCORE: i32 = 55;

// User context cache
pub const DEFAULT_CONTEXT_TTL_SECS: u64 = 300;
pub const DEFAULT_CONTEXT_MAX_ENTRIES: usize = 1000;
pub const CONTEXT_LOOKBACK_DAYS: i64 = 7;
pub const CONTEXT_LOOKAHEAD_DAYS: i64 = 14;
pub const CONTEXT_EVENT_LIMIT: usize = 10;
pub const CONTEXT_EXAM_LIMIT: usize = 3;

// Time suggestions
pub const DEFAULT_MIN_BREAK_MINUTES: u32 = 15;
pub const MAX_SUGGESTIONS: usize = 3;
pub const SUGGESTION_SCAN_DAYS: u32 = 7;

// Location resolution
pub const MIN_ADDRESS_LENGTH: usize = 5;
