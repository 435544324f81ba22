//! Optimal start-time suggestions.
//!
//! A lighter search than placement: walks forward day by day, pads every
//! event with a break on both sides and proposes at most one start per
//! preferred bucket per day. Nothing is written.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use slotwise_domain::constants::{
    DEFAULT_MIN_BREAK_MINUTES, MAX_SUGGESTIONS, MINUTES_PER_DAY, MINUTES_PER_HOUR,
    SUGGESTION_SCAN_DAYS,
};
use slotwise_domain::{
    to_hhmm, weekday_label, CalendarEvent, DailyConstraints, Interval, Result, SlotwiseError,
    TimeOfDay, TimeSuggestion,
};
use tracing::{debug, instrument, warn};

use super::day_finder::DayFinder;
use super::intervals::free_gaps;
use crate::ports::CalendarEventRepository;

/// Search options. `Default` matches a 90 minute study block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOptions {
    pub duration: u32,
    /// First day searched. Defaults to the day after the reference date.
    pub from: Option<NaiveDate>,
    /// Buckets to try, in order. `Any` expands to all three.
    pub preferred: Vec<TimeOfDay>,
    pub min_break_minutes: u32,
    pub avoid_weekends: bool,
    pub prefer_early_morning: bool,
}

impl Default for SuggestionOptions {
    fn default() -> Self {
        Self {
            duration: 90,
            from: None,
            preferred: vec![TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening],
            min_break_minutes: DEFAULT_MIN_BREAK_MINUTES,
            avoid_weekends: false,
            prefer_early_morning: false,
        }
    }
}

impl SuggestionOptions {
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn starting(mut self, date: NaiveDate) -> Self {
        self.from = Some(date);
        self
    }

    pub fn preferring(mut self, buckets: Vec<TimeOfDay>) -> Self {
        self.preferred = buckets;
        self
    }

    fn buckets(&self) -> Vec<TimeOfDay> {
        let mut out = Vec::with_capacity(3);
        for bucket in &self.preferred {
            let expanded: &[TimeOfDay] = match bucket {
                TimeOfDay::Any => &[TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening],
                other => std::slice::from_ref(other),
            };
            for b in expanded {
                if !out.contains(b) {
                    out.push(*b);
                }
            }
        }
        out
    }

    /// Search window and priority for a bucket.
    fn window(&self, bucket: TimeOfDay) -> Option<(Interval, u8)> {
        let hours = |from: u32, to: u32| Interval {
            start: from * MINUTES_PER_HOUR,
            end: to * MINUTES_PER_HOUR,
        };
        match bucket {
            TimeOfDay::Morning => {
                Some((hours(8, 12), if self.prefer_early_morning { 3 } else { 2 }))
            }
            TimeOfDay::Afternoon => Some((hours(13, 18), 2)),
            TimeOfDay::Evening => Some((hours(18, 21), 1)),
            TimeOfDay::Any => None,
        }
    }
}

/// Proposes start times without committing anything.
pub struct SuggestionService {
    repository: Arc<dyn CalendarEventRepository>,
    finder: DayFinder,
}

impl SuggestionService {
    pub fn new(
        repository: Arc<dyn CalendarEventRepository>,
        constraints: &DailyConstraints,
    ) -> Result<Self> {
        Ok(Self { repository, finder: DayFinder::new(constraints)? })
    }

    /// Up to three suggestions, highest priority first. Empty when nothing
    /// fits.
    #[instrument(skip(self, options), fields(owner = %owner, duration = options.duration))]
    pub async fn suggest(
        &self,
        owner: &str,
        reference: NaiveDate,
        options: &SuggestionOptions,
    ) -> Result<Vec<TimeSuggestion>> {
        if options.duration == 0 || options.duration > MINUTES_PER_DAY {
            return Err(SlotwiseError::InvalidInput(format!(
                "duration must be between 1 and {MINUTES_PER_DAY} minutes, got {}",
                options.duration
            )));
        }

        let first = options.from.unwrap_or(reference + Duration::days(1));
        let buckets = options.buckets();
        let mut suggestions = Vec::new();

        for offset in 0..SUGGESTION_SCAN_DAYS {
            if suggestions.len() >= MAX_SUGGESTIONS {
                break;
            }
            let date = first + Duration::days(i64::from(offset));
            if options.avoid_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let events = self.repository.events_on(owner, date).await?;
            let padded = pad_events(&events, options.min_break_minutes)?;
            let busy = self.finder.busy_intervals(&[], &padded)?;
            let gaps = free_gaps(&busy);

            for bucket in &buckets {
                let Some((window, priority)) = options.window(*bucket) else { continue };
                if let Some(start) = first_fit(&gaps, window, options.duration) {
                    suggestions.push(TimeSuggestion {
                        date,
                        day_name: weekday_label(date).to_string(),
                        start_time: to_hhmm(start),
                        end_time: to_hhmm(start + options.duration),
                        time_of_day: *bucket,
                        priority,
                        reason: format!("Free {bucket} on {}", weekday_label(date)),
                    });
                }
            }
            debug!(%date, found = suggestions.len(), "suggestion day scanned");
        }

        // Stable: equal priorities stay chronological.
        suggestions.sort_by(|a, b| b.priority.cmp(&a.priority));
        suggestions.truncate(MAX_SUGGESTIONS);
        Ok(suggestions)
    }
}

/// Events widened by `padding` minutes on both sides, clamped to the day.
fn pad_events(events: &[CalendarEvent], padding: u32) -> Result<Vec<Interval>> {
    let mut out = Vec::with_capacity(events.len());
    for event in events {
        match event.busy_interval()? {
            Some(busy) => out.push(Interval {
                start: busy.start.saturating_sub(padding),
                end: (busy.end + padding).min(MINUTES_PER_DAY),
            }),
            None => warn!(event_id = %event.id, "skipping event with empty or inverted time range"),
        }
    }
    Ok(out)
}

/// Earliest start inside `window` with `duration` free minutes.
fn first_fit(gaps: &[Interval], window: Interval, duration: u32) -> Option<u32> {
    gaps.iter().find_map(|gap| {
        let start = gap.start.max(window.start);
        let end = gap.end.min(window.end);
        (end > start && end - start >= duration).then_some(start)
    })
}
