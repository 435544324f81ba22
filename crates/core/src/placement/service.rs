//! Placement orchestration: lock, scan, select, commit.

use std::sync::Arc;

use chrono::NaiveDateTime;
use slotwise_domain::{
    to_hhmm, AvailabilityReport, PlacementOutcome, PlacementRequest, PlacementSuccess,
    PlannerConfig, Result,
};
use tracing::{info, instrument, Span};

use super::gateway::CalendarGateway;
use super::locks::OwnerLocks;
use super::selector::{select_slot, Selection, SlotChoice};
use crate::availability::{AvailabilityAggregator, WindowScan};
use crate::ports::{CalendarEventRepository, ContextInvalidator};

/// Places events into a user's free time.
pub struct PlacementService {
    aggregator: AvailabilityAggregator,
    gateway: CalendarGateway,
    locks: OwnerLocks,
}

impl PlacementService {
    /// Validates `config`; bad constraints fail here rather than per request.
    pub fn new(
        repository: Arc<dyn CalendarEventRepository>,
        config: PlannerConfig,
    ) -> Result<Self> {
        let gateway = CalendarGateway::new(Arc::clone(&repository))
            .with_campus_address(config.campus_address.clone());
        let aggregator = AvailabilityAggregator::new(repository, config)?;
        Ok(Self { aggregator, gateway, locks: OwnerLocks::new() })
    }

    /// Notify `invalidator` after every successful write.
    pub fn with_invalidator(mut self, invalidator: Arc<dyn ContextInvalidator>) -> Self {
        self.gateway = self.gateway.with_invalidator(invalidator);
        self
    }

    /// Share a lock table with other services writing the same calendars.
    pub fn with_locks(mut self, locks: OwnerLocks) -> Self {
        self.locks = locks;
        self
    }

    /// Per-owner lock table serializing scan and commit.
    pub fn locks(&self) -> &OwnerLocks {
        &self.locks
    }

    /// Place `request` in `owner`'s calendar.
    ///
    /// `Unavailable` is a negotiable outcome and nothing is written. Errors
    /// are reserved for bad input, storage failures and lost races.
    #[instrument(
        skip(self, request),
        fields(
            owner = %owner,
            kind = %request.kind,
            duration = request.resolved_duration(),
            outcome = tracing::field::Empty,
        )
    )]
    pub async fn place(
        &self,
        owner: &str,
        request: &PlacementRequest,
        reference: NaiveDateTime,
    ) -> Result<PlacementOutcome> {
        request.validate()?;

        let _guard = self.locks.lock(owner).await;
        let scan = self.aggregator.scan(owner, reference).await?;

        let choice = match select_slot(&scan.slots, request, reference.date())? {
            Selection::Chosen(choice) => choice,
            Selection::Unavailable(failure) => {
                Span::current().record("outcome", failure.error_kind.to_string().as_str());
                info!(alternatives = failure.alternatives.len(), "no slot placed");
                return Ok(PlacementOutcome::Unavailable(failure));
            }
        };

        let event = self.gateway.build_event(owner, request, &choice);
        let event_id = match self.gateway.commit(event).await {
            Ok(id) => id,
            Err(err) => {
                Span::current().record("outcome", err.label());
                return Err(err);
            }
        };

        Span::current().record("outcome", "placed");
        info!(%event_id, date = %choice.slot.date, start = %to_hhmm(choice.start), "event placed");

        Ok(PlacementOutcome::Placed(PlacementSuccess {
            date: choice.slot.date,
            day_name: choice.slot.day.clone(),
            start_time: to_hhmm(choice.start),
            end_time: to_hhmm(choice.end),
            duration: choice.end - choice.start,
            quality: choice.slot.quality,
            reason: reason(request, &choice, &scan),
            event_id,
        }))
    }

    /// Report over the lookahead window starting at `reference`.
    pub async fn availability_report(
        &self,
        owner: &str,
        reference: NaiveDateTime,
    ) -> Result<AvailabilityReport> {
        self.aggregator.report(owner, reference).await
    }

    /// Full, untruncated scan.
    pub async fn scan(&self, owner: &str, reference: NaiveDateTime) -> Result<WindowScan> {
        self.aggregator.scan(owner, reference).await
    }
}

fn reason(request: &PlacementRequest, choice: &SlotChoice, scan: &WindowScan) -> String {
    let slot = &choice.slot;
    let basis = if request.quality_priority { "best-rated" } else { "earliest" };
    let mut reason = format!(
        "{basis} {} slot that fits {} minutes: {} {} {}-{}",
        slot.quality,
        choice.end - choice.start,
        slot.day,
        slot.date,
        to_hhmm(slot.start),
        to_hhmm(slot.end),
    );
    let same_day = scan.slots_on(slot.date).count();
    if same_day > 1 {
        reason.push_str(&format!(" ({same_day} free slots that day)"));
    }
    if !slot.recommended.is_empty() {
        reason.push_str(&format!("; good for {}", slot.recommended.join(", ")));
    }
    reason
}
