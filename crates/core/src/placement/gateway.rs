//! The single write path for placements.

use std::sync::Arc;

use slotwise_domain::{
    resolve_location, to_hhmm, EventId, EventKind, NewCalendarEvent, PlacementRequest, Result,
    SlotwiseError,
};
use tracing::{debug, instrument};

use super::selector::SlotChoice;
use crate::ports::{CalendarEventRepository, ContextInvalidator, NoopInvalidator};

/// Builds, re-validates and persists placed events.
pub struct CalendarGateway {
    repository: Arc<dyn CalendarEventRepository>,
    invalidator: Arc<dyn ContextInvalidator>,
    campus_address: Option<String>,
}

impl CalendarGateway {
    pub fn new(repository: Arc<dyn CalendarEventRepository>) -> Self {
        Self { repository, invalidator: Arc::new(NoopInvalidator), campus_address: None }
    }

    pub fn with_invalidator(mut self, invalidator: Arc<dyn ContextInvalidator>) -> Self {
        self.invalidator = invalidator;
        self
    }

    pub fn with_campus_address(mut self, address: Option<String>) -> Self {
        self.campus_address = address;
        self
    }

    /// Insert payload for `choice`. Category is kept for activities only.
    pub fn build_event(
        &self,
        owner: &str,
        request: &PlacementRequest,
        choice: &SlotChoice,
    ) -> NewCalendarEvent {
        NewCalendarEvent {
            owner: owner.to_string(),
            title: request.title.trim().to_string(),
            kind: request.kind,
            date: choice.slot.date,
            start_time: to_hhmm(choice.start),
            end_time: to_hhmm(choice.end),
            location: resolve_location(
                request.kind,
                request.location.as_deref(),
                self.campus_address.as_deref(),
            ),
            category: match request.kind {
                EventKind::Activity => request.category.clone(),
                _ => None,
            },
            subject: request.subject.clone(),
            professor: request.professor.clone(),
            color: request.kind.color().to_string(),
        }
    }

    /// Write `event` if its span is still free, then drop the owner's
    /// derived context.
    ///
    /// An overlap with any event stored since selection is reported as
    /// `ConcurrentConflict` and nothing is written.
    #[instrument(
        skip(self, event),
        fields(owner = %event.owner, date = %event.date, start = %event.start_time)
    )]
    pub async fn commit(&self, event: NewCalendarEvent) -> Result<EventId> {
        let span = event.interval()?;

        for existing in self.repository.events_on(&event.owner, event.date).await? {
            if let Some(busy) = existing.busy_interval()? {
                if busy.overlaps(&span) {
                    return Err(SlotwiseError::ConcurrentConflict(format!(
                        "{} {}-{} now overlaps event {}",
                        event.date, event.start_time, event.end_time, existing.id
                    )));
                }
            }
        }

        let owner = event.owner.clone();
        let id = self.repository.create_event(event).await?;
        self.invalidator.invalidate(&owner);
        debug!(event_id = %id, "event committed");
        Ok(id)
    }
}
