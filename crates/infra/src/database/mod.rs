//! Database implementations

pub mod manager;
pub mod memory_repository;
pub mod sqlite_calendar_repository;

pub use manager::DbManager;
pub use memory_repository::InMemoryCalendarRepository;
pub use sqlite_calendar_repository::SqliteCalendarEventRepository;

use slotwise_domain::{to_hhmm, to_minutes, NewCalendarEvent, Result};

/// Rewrite times as zero-padded `HH:MM` so text ordering is clock ordering.
pub(crate) fn normalize_times(mut event: NewCalendarEvent) -> Result<NewCalendarEvent> {
    event.start_time = to_hhmm(to_minutes(&event.start_time)?);
    event.end_time = to_hhmm(to_minutes(&event.end_time)?);
    Ok(event)
}
