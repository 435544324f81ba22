//! Availability analysis
//!
//! Busy intervals → free slots per day → scored slots across the lookahead
//! window.

pub mod aggregator;
pub mod day_finder;
pub mod intervals;
pub mod scorer;
pub mod suggestions;

pub use aggregator::{AvailabilityAggregator, WindowScan};
pub use day_finder::DayFinder;
pub use intervals::{free_gaps, merge_intervals};
pub use scorer::SlotScorer;
pub use suggestions::{SuggestionOptions, SuggestionService};
