//! In-memory `CalendarEventRepository` for embedding and tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use parking_lot::RwLock;
use slotwise_core::ports::CalendarEventRepository;
use slotwise_domain::{to_minutes, CalendarEvent, EventId, NewCalendarEvent, Result as DomainResult};
use tracing::debug;

use super::normalize_times;

/// Vec-backed repository. Clones share storage.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCalendarRepository {
    events: Arc<RwLock<Vec<CalendarEvent>>>,
}

impl InMemoryCalendarRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository seeded with already-stored events.
    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self { events: Arc::new(RwLock::new(events)) }
    }

    /// Store an existing event as-is.
    pub fn insert(&self, event: CalendarEvent) {
        self.events.write().push(event);
    }

    /// Number of stored events, all owners.
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    fn collect<F>(&self, keep: F) -> Vec<CalendarEvent>
    where
        F: Fn(&CalendarEvent) -> bool,
    {
        let mut found: Vec<CalendarEvent> =
            self.events.read().iter().filter(|e| keep(e)).cloned().collect();
        found.sort_by_key(|e| {
            let minute = |t: &str| to_minutes(t).unwrap_or(u32::MAX);
            (e.date, minute(&e.start_time), minute(&e.end_time))
        });
        found
    }
}

#[async_trait]
impl CalendarEventRepository for InMemoryCalendarRepository {
    async fn events_on(&self, owner: &str, date: NaiveDate) -> DomainResult<Vec<CalendarEvent>> {
        Ok(self.collect(|e| e.owner == owner && e.date == date))
    }

    async fn events_between(
        &self,
        owner: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarEvent>> {
        Ok(self.collect(|e| e.owner == owner && e.date >= from && e.date <= to))
    }

    async fn create_event(&self, event: NewCalendarEvent) -> DomainResult<EventId> {
        let event = normalize_times(event)?;
        let id = EventId::generate();
        self.events.write().push(event.into_event(id.clone(), Utc::now().naive_utc()));
        debug!(event_id = %id, "calendar event stored in memory");
        Ok(id)
    }
}
