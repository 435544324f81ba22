//! # Slotwise Domain
//!
//! Business domain types and models for Slotwise.
//!
//! This crate contains:
//! - Domain data types (CalendarEvent, FreeSlot, PlacementRequest, etc.)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants and pure helpers (clock-time arithmetic, day
//!   references, location resolution)
//!
//! ## Architecture
//! - No dependencies on other Slotwise crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::clock_time::{minute_of_day, to_hhmm, to_minutes};
pub use utils::day_reference::{
    extract_time_of_day, parse_weekday, reconcile_target_date, resolve_day_reference,
    resolve_weekday, resolve_weekday_next_week, weekday_label, Confidence, DayReference,
};
pub use utils::location::resolve_location;
