//! Domain types and models
//!
//! Calendar data flows in as [`CalendarEvent`]s, is reduced to busy
//! [`Interval`]s and [`FreeSlot`]s, scored into [`ScoredSlot`]s, and leaves
//! as a [`PlacementOutcome`] or an [`AvailabilityReport`].

pub mod availability;
pub mod context;
pub mod event;
pub mod placement;

pub use availability::{
    AvailabilityReport, FreeSlot, ScoredSlot, SlotQuality, TimeOfDay, TimeSuggestion,
};
pub use context::UserContext;
pub use event::{CalendarEvent, EventId, EventKind, Interval, NewCalendarEvent};
pub use placement::{
    DayAlternative, FailureKind, PlacementFailure, PlacementOutcome, PlacementRequest,
    PlacementSuccess, TargetDay,
};
