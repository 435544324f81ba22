//! Weekly availability aggregation.
//!
//! Scans `lookahead_days` days from the reference date, fetching each day's
//! events with bounded concurrency, and produces the full chronological slot
//! list plus a truncated report for downstream consumers.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use futures::stream::{self, StreamExt, TryStreamExt};
use slotwise_domain::constants::{EXCELLENT_HIGHLIGHT_THRESHOLD, LOW_AVAILABILITY_THRESHOLD_MINUTES};
use slotwise_domain::{
    minute_of_day, AvailabilityReport, CalendarEvent, EventKind, Interval, PlannerConfig, Result,
    ScoredSlot, SlotQuality,
};
use tracing::{debug, instrument};

use super::day_finder::DayFinder;
use super::scorer::SlotScorer;
use crate::ports::CalendarEventRepository;

/// Every usable slot in the window, before truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowScan {
    pub reference: NaiveDateTime,
    pub window_start: NaiveDate,
    pub window_end: NaiveDate,
    /// Chronological by (date, start).
    pub slots: Vec<ScoredSlot>,
    pub event_count: usize,
    /// Titles of exams dated inside the window, chronological.
    pub exam_titles: Vec<String>,
}

impl WindowScan {
    /// Sum of usable slot durations across the window.
    pub fn total_free_minutes(&self) -> u32 {
        self.slots.iter().map(|s| s.duration).sum()
    }

    pub fn count_quality(&self, quality: SlotQuality) -> usize {
        self.slots.iter().filter(|s| s.quality == quality).count()
    }

    /// Usable slots on `date`, in chronological order.
    pub fn slots_on(&self, date: NaiveDate) -> impl Iterator<Item = &ScoredSlot> {
        self.slots.iter().filter(move |s| s.date == date)
    }

    /// Alerts worth surfacing before anything else.
    pub fn critical_info(&self) -> Vec<String> {
        let mut info = Vec::new();

        if !self.exam_titles.is_empty() {
            info.push(format!(
                "{} exam(s) upcoming: {}",
                self.exam_titles.len(),
                self.exam_titles.join(", ")
            ));
        }

        if self.total_free_minutes() < LOW_AVAILABILITY_THRESHOLD_MINUTES {
            info.push("Low availability this week: prioritise the important tasks".to_string());
        }

        let excellent = self.count_quality(SlotQuality::Excellent);
        if excellent >= EXCELLENT_HIGHLIGHT_THRESHOLD {
            info.push(format!("{excellent} excellent slots available"));
        }

        info
    }

    /// Multi-line human summary of the window.
    pub fn summary(&self) -> String {
        let total = self.total_free_minutes();
        [
            format!("Availability from {} to {}", self.window_start, self.window_end),
            format!("Scheduled events: {}", self.event_count),
            format!("Total free time: {}h {}min", total / 60, total % 60),
            format!("Usable slots: {}", self.slots.len()),
            format!(
                "Slot quality: {} excellent, {} good",
                self.count_quality(SlotQuality::Excellent),
                self.count_quality(SlotQuality::Good)
            ),
        ]
        .join("\n")
    }

    /// Build the report, keeping the first `max_slots` slots in
    /// chronological order. Totals cover the whole window.
    pub fn to_report(&self, max_slots: usize) -> AvailabilityReport {
        AvailabilityReport {
            window_start: self.window_start,
            window_end: self.window_end,
            slots: self.slots.iter().take(max_slots).cloned().collect(),
            total_free_minutes: self.total_free_minutes(),
            excellent_count: self.count_quality(SlotQuality::Excellent),
            summary: self.summary(),
            critical_info: self.critical_info(),
        }
    }
}

/// Scans the lookahead window for one owner.
pub struct AvailabilityAggregator {
    repository: Arc<dyn CalendarEventRepository>,
    finder: DayFinder,
    scorer: SlotScorer,
    config: PlannerConfig,
}

impl AvailabilityAggregator {
    /// Validates `config` and parses the daily constraints once.
    pub fn new(
        repository: Arc<dyn CalendarEventRepository>,
        config: PlannerConfig,
    ) -> Result<Self> {
        config.validate()?;
        let finder = DayFinder::new(&config.constraints)?;
        Ok(Self { repository, finder, scorer: SlotScorer::new(config.study), config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn finder(&self) -> &DayFinder {
        &self.finder
    }

    /// Dates in the window, reference date first.
    pub fn window(&self, reference: NaiveDateTime) -> Vec<NaiveDate> {
        let start = reference.date();
        (0..self.config.lookahead_days).map(|i| start + Duration::days(i64::from(i))).collect()
    }

    /// Busy time already elapsed on the reference date.
    pub fn elapsed_block(&self, date: NaiveDate, reference: NaiveDateTime) -> Option<Interval> {
        let now = minute_of_day(reference.time());
        (self.config.skip_elapsed_today && date == reference.date() && now > 0)
            .then_some(Interval { start: 0, end: now })
    }

    /// Fetch every day of the window concurrently and collect the usable,
    /// scored slots in date order. A failed fetch fails the scan.
    #[instrument(skip(self), fields(owner = %owner, days = self.config.lookahead_days))]
    pub async fn scan(&self, owner: &str, reference: NaiveDateTime) -> Result<WindowScan> {
        let dates = self.window(reference);
        let window_start = reference.date();
        let window_end = dates.last().copied().unwrap_or(window_start);

        let mut days: Vec<(NaiveDate, Vec<CalendarEvent>)> = stream::iter(dates)
            .map(|date| async move {
                let events = self.repository.events_on(owner, date).await?;
                Ok::<_, slotwise_domain::SlotwiseError>((date, events))
            })
            .buffered(self.config.fetch_concurrency)
            .try_collect()
            .await?;
        days.sort_by_key(|(date, _)| *date);

        let mut slots = Vec::new();
        let mut event_count = 0;
        let mut exams: Vec<&CalendarEvent> = Vec::new();

        for (date, events) in &days {
            event_count += events.len();
            exams.extend(events.iter().filter(|e| e.kind == EventKind::Exam));

            let extra: Vec<Interval> = self.elapsed_block(*date, reference).into_iter().collect();
            let free = self.finder.free_slots(*date, events, &extra)?;
            let before = free.len();
            let usable: Vec<ScoredSlot> = free
                .into_iter()
                .filter(|slot| slot.duration >= self.config.min_slot_minutes)
                .map(|slot| self.scorer.score_slot(slot))
                .collect();

            debug!(
                %date,
                events = events.len(),
                gaps = before,
                usable = usable.len(),
                "day scanned"
            );
            slots.extend(usable);
        }

        slots.sort_by_key(|s| (s.date, s.start));
        exams.sort_by(|a, b| (a.date, &a.start_time).cmp(&(b.date, &b.start_time)));

        Ok(WindowScan {
            reference,
            window_start,
            window_end,
            slots,
            event_count,
            exam_titles: exams.into_iter().map(|e| e.title.clone()).collect(),
        })
    }

    /// [`scan`](Self::scan) truncated to `max_report_slots`.
    pub async fn report(
        &self,
        owner: &str,
        reference: NaiveDateTime,
    ) -> Result<AvailabilityReport> {
        let scan = self.scan(owner, reference).await?;
        Ok(scan.to_report(self.config.max_report_slots))
    }
}
