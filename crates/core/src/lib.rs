//! # Slotwise Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Free-slot computation, scoring and weekly aggregation
//! - Placement selection and the calendar mutation gateway
//! - The per-user context cache
//! - Port interfaces (traits) for storage and cache invalidation
//!
//! ## Architecture Principles
//! - Only depends on `slotwise-common` and `slotwise-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Every computation takes an explicit reference instant

pub mod availability;
pub mod context;
pub mod placement;
pub mod ports;

// Re-export specific items to avoid ambiguity
pub use availability::{
    merge_intervals, AvailabilityAggregator, DayFinder, SlotScorer, SuggestionOptions,
    SuggestionService, WindowScan,
};
pub use context::UserContextService;
pub use placement::{
    select_slot, CalendarGateway, OwnerGuard, OwnerLocks, PlacementService, Selection, SlotChoice,
};
pub use ports::{CalendarEventRepository, ContextInvalidator, NoopInvalidator};
