//! Port interfaces for the planner
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use chrono::NaiveDate;
use slotwise_domain::{CalendarEvent, EventId, NewCalendarEvent, Result};

/// Storage collaborator for calendar events
#[async_trait]
pub trait CalendarEventRepository: Send + Sync {
    /// All of `owner`'s events dated exactly `date`
    async fn events_on(&self, owner: &str, date: NaiveDate) -> Result<Vec<CalendarEvent>>;

    /// All of `owner`'s events dated within `[from, to]`, chronological
    async fn events_between(
        &self,
        owner: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CalendarEvent>>;

    /// Insert one event atomically and return its id
    ///
    /// Any backend failure is reported as `SlotwiseError::Persistence`.
    async fn create_event(&self, event: NewCalendarEvent) -> Result<EventId>;
}

/// Drops any derived per-user data after a write. Best effort.
pub trait ContextInvalidator: Send + Sync {
    fn invalidate(&self, owner: &str);
}

/// Invalidator for deployments without a derived-context cache
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopInvalidator;

impl ContextInvalidator for NoopInvalidator {
    fn invalidate(&self, _owner: &str) {}
}
