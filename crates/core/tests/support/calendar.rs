use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use slotwise_core::ports::{CalendarEventRepository, ContextInvalidator};
use slotwise_domain::{
    CalendarEvent, EventId, NewCalendarEvent, Result as DomainResult, SlotwiseError,
};

/// In-memory mock for `CalendarEventRepository`.
///
/// Clones share state. Failures and a concurrent writer can be injected so
/// error paths are deterministic.
#[derive(Default, Clone)]
pub struct MockCalendarEventRepository {
    events: Arc<Mutex<Vec<CalendarEvent>>>,
    fail_reads: Arc<AtomicBool>,
    fail_creates: Arc<AtomicBool>,
    reads: Arc<AtomicUsize>,
    creates: Arc<AtomicUsize>,
    /// Event slipped into storage once `reads` reaches the given count.
    sneak_in: Arc<Mutex<Option<(usize, CalendarEvent)>>>,
}

impl MockCalendarEventRepository {
    /// Create a new mock seeded with the provided events.
    pub fn new(events: Vec<CalendarEvent>) -> Self {
        Self { events: Arc::new(Mutex::new(events)), ..Self::default() }
    }

    pub fn with_event(self, event: CalendarEvent) -> Self {
        self.events.lock().unwrap().push(event);
        self
    }

    pub fn failing_reads(self) -> Self {
        self.fail_reads.store(true, Ordering::SeqCst);
        self
    }

    pub fn failing_creates(self) -> Self {
        self.fail_creates.store(true, Ordering::SeqCst);
        self
    }

    /// Store `event` right after the `after_reads`-th read, as if another
    /// writer bypassed the planner.
    pub fn sneak_in_after(self, after_reads: usize, event: CalendarEvent) -> Self {
        *self.sneak_in.lock().unwrap() = Some((after_reads, event));
        self
    }

    pub fn all(&self) -> Vec<CalendarEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    fn after_read(&self) {
        let count = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
        let mut pending = self.sneak_in.lock().unwrap();
        if pending.as_ref().is_some_and(|(n, _)| *n == count) {
            if let Some((_, event)) = pending.take() {
                self.events.lock().unwrap().push(event);
            }
        }
    }
}

#[async_trait]
impl CalendarEventRepository for MockCalendarEventRepository {
    async fn events_on(&self, owner: &str, date: NaiveDate) -> DomainResult<Vec<CalendarEvent>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SlotwiseError::Persistence("database is locked".into()));
        }
        // Let other tasks interleave between fetch and write.
        tokio::task::yield_now().await;

        let found = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner == owner && e.date == date)
            .cloned()
            .collect();
        self.after_read();
        Ok(found)
    }

    async fn events_between(
        &self,
        owner: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DomainResult<Vec<CalendarEvent>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SlotwiseError::Persistence("database is locked".into()));
        }
        let mut found: Vec<CalendarEvent> = self
            .events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner == owner && e.date >= from && e.date <= to)
            .cloned()
            .collect();
        found.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));
        self.after_read();
        Ok(found)
    }

    async fn create_event(&self, event: NewCalendarEvent) -> DomainResult<EventId> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(SlotwiseError::Persistence("disk I/O error".into()));
        }
        tokio::task::yield_now().await;

        let id = EventId::generate();
        let created_at = event.date.and_hms_opt(0, 0, 0).unwrap();
        self.events.lock().unwrap().push(event.into_event(id.clone(), created_at));
        self.creates.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }
}

/// Records every owner it is asked to invalidate.
#[derive(Default, Clone)]
pub struct RecordingInvalidator {
    owners: Arc<Mutex<Vec<String>>>,
}

impl RecordingInvalidator {
    pub fn owners(&self) -> Vec<String> {
        self.owners.lock().unwrap().clone()
    }
}

impl ContextInvalidator for RecordingInvalidator {
    fn invalidate(&self, owner: &str) {
        self.owners.lock().unwrap().push(owner.to_string());
    }
}
