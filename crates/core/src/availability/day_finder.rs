//! Free-slot computation for a single day.

use chrono::NaiveDate;
use slotwise_domain::constants::MINUTES_PER_DAY;
use slotwise_domain::{CalendarEvent, DailyConstraints, FreeSlot, Interval, Result};
use tracing::warn;

use super::intervals::{free_gaps, merge_intervals};

/// Turns a day's events into free slots around the fixed daily blocks.
///
/// The fixed blocks (sleep, meals, late evening) are parsed once from
/// [`DailyConstraints`]; malformed constraint times fail construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayFinder {
    fixed: Vec<Interval>,
}

impl DayFinder {
    /// Fails on malformed or inconsistent constraint times.
    pub fn new(constraints: &DailyConstraints) -> Result<Self> {
        constraints.validate()?;

        let wake = constraints.wake_minutes()?;
        let bedtime = constraints.bedtime_minutes()?;
        let mut fixed = vec![
            Interval::new(0, wake)?,
            Interval::new(bedtime, MINUTES_PER_DAY)?,
            constraints.lunch.interval()?,
            constraints.dinner.interval()?,
        ];

        if constraints.avoid_late_evening {
            let cutoff = constraints.late_cutoff_minutes()?;
            if cutoff < bedtime {
                fixed.push(Interval::new(cutoff, bedtime)?);
            }
        }

        Ok(Self { fixed: merge_intervals(fixed) })
    }

    /// Merged fixed blocks shared by every day.
    pub fn fixed_blocks(&self) -> &[Interval] {
        &self.fixed
    }

    /// Merged busy intervals for a day: fixed blocks, `events` and `extra`.
    ///
    /// Events with a malformed time fail the whole day. Events whose end is
    /// not after their start are skipped.
    pub fn busy_intervals(
        &self,
        events: &[CalendarEvent],
        extra: &[Interval],
    ) -> Result<Vec<Interval>> {
        let mut busy = Vec::with_capacity(self.fixed.len() + events.len() + extra.len());
        busy.extend_from_slice(&self.fixed);
        busy.extend_from_slice(extra);

        for event in events {
            match event.busy_interval()? {
                Some(interval) => busy.push(interval),
                None => warn!(
                    event_id = %event.id,
                    start = %event.start_time,
                    end = %event.end_time,
                    "skipping event with empty or inverted time range"
                ),
            }
        }

        Ok(merge_intervals(busy))
    }

    /// Every gap with positive duration. Minimum-length filtering is the
    /// caller's concern.
    pub fn free_slots(
        &self,
        date: NaiveDate,
        events: &[CalendarEvent],
        extra: &[Interval],
    ) -> Result<Vec<FreeSlot>> {
        let busy = self.busy_intervals(events, extra)?;
        Ok(free_gaps(&busy).into_iter().map(|gap| FreeSlot::new(date, gap)).collect())
    }
}
