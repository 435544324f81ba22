//! Per-user context cache.
//!
//! Conversational layers ask for the same recent/upcoming snapshot on every
//! turn. It is built from the repository and kept for a short TTL; any write
//! through the gateway invalidates it. Placement never reads from here.
//!
//! Entries are keyed by owner and reference date, since the window and the
//! upcoming exams both move with the reference.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use slotwise_common::{Cache, CacheConfig, CacheStats, Clock, SystemClock};
use slotwise_domain::constants::{
    CONTEXT_EVENT_LIMIT, CONTEXT_EXAM_LIMIT, CONTEXT_LOOKAHEAD_DAYS, CONTEXT_LOOKBACK_DAYS,
};
use slotwise_domain::{to_minutes, CacheSettings, CalendarEvent, EventKind, Result, UserContext};
use tracing::{debug, instrument};

use crate::ports::{CalendarEventRepository, ContextInvalidator};

type ContextKey = (String, NaiveDate);

/// TTL cache of [`UserContext`] keyed by owner and reference date.
pub struct UserContextService<C: Clock + Clone = SystemClock> {
    repository: Arc<dyn CalendarEventRepository>,
    cache: Cache<ContextKey, UserContext, C>,
    clock: C,
}

impl UserContextService<SystemClock> {
    /// Service reading the system clock. Fails on invalid `settings`.
    pub fn new(
        repository: Arc<dyn CalendarEventRepository>,
        settings: CacheSettings,
    ) -> Result<Self> {
        Self::with_clock(repository, settings, SystemClock)
    }
}

impl<C: Clock + Clone> UserContextService<C> {
    /// Service reading `clock` for expiry and `built_at`.
    pub fn with_clock(
        repository: Arc<dyn CalendarEventRepository>,
        settings: CacheSettings,
        clock: C,
    ) -> Result<Self> {
        settings.validate()?;
        let config = CacheConfig::builder()
            .ttl(Duration::from_secs(settings.context_ttl_secs))
            .max_size(settings.max_entries)
            .track_metrics(true)
            .build();
        Ok(Self { repository, cache: Cache::with_clock(config, clock.clone()), clock })
    }

    /// Cached context for `owner` on `reference`'s date, built on a miss.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn get(&self, owner: &str, reference: NaiveDateTime) -> Result<UserContext> {
        let key = (owner.to_string(), reference.date());
        if let Some(context) = self.cache.get(&key) {
            debug!("context cache hit");
            return Ok(context);
        }

        let context = self.build(owner, reference).await?;
        self.cache.insert(key, context.clone());
        debug!(
            events = context.events.len(),
            exams = context.upcoming_exams.len(),
            "context rebuilt"
        );
        Ok(context)
    }

    /// Build without touching the cache.
    pub async fn build(&self, owner: &str, reference: NaiveDateTime) -> Result<UserContext> {
        let today = reference.date();
        let from = today - ChronoDuration::days(CONTEXT_LOOKBACK_DAYS);
        let to = today + ChronoDuration::days(CONTEXT_LOOKAHEAD_DAYS);

        let mut events = self.repository.events_between(owner, from, to).await?;
        events.sort_by_key(chronological_key);

        let upcoming_exams: Vec<CalendarEvent> = events
            .iter()
            .filter(|e| e.kind == EventKind::Exam && e.date >= today)
            .take(CONTEXT_EXAM_LIMIT)
            .cloned()
            .collect();
        events.truncate(CONTEXT_EVENT_LIMIT);

        Ok(UserContext {
            owner: owner.to_string(),
            events,
            upcoming_exams,
            built_at: self.clock.local_now(),
        })
    }

    /// Drop expired entries. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.cache.purge_expired()
    }

    /// Drop every cached context.
    pub fn clear(&self) {
        self.cache.clear();
    }

    /// Hit, miss and invalidation counters.
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl<C: Clock + Clone> ContextInvalidator for UserContextService<C> {
    fn invalidate(&self, owner: &str) {
        let removed = self.cache.remove_where(|(cached, _)| cached == owner);
        if removed > 0 {
            debug!(owner, removed, "context invalidated");
        }
    }
}

/// Date then start minute; unparsable times sort last within their day.
fn chronological_key(event: &CalendarEvent) -> (NaiveDate, u32) {
    (event.date, to_minutes(&event.start_time).unwrap_or(u32::MAX))
}
