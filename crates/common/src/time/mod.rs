//! Time abstractions
//!
//! Everything time-dependent in Slotwise reads the clock through [`Clock`]
//! so tests can pin both the monotonic instant (cache TTLs) and the wall
//! clock ("today", "now") to fixed values.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use chrono::NaiveDate;
//! use slotwise_common::time::{Clock, MockClock};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 3, 13).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let clock = MockClock::at(start);
//! clock.advance(Duration::from_secs(90 * 60));
//! assert_eq!(clock.local_now().time().to_string(), "10:30:00");
//! ```

pub mod clock;

// Re-export commonly used items
pub use clock::{Clock, MockClock, SystemClock};
