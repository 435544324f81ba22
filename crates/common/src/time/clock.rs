//! Clock trait with a system implementation and a controllable mock.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use parking_lot::Mutex;

/// Trait for time operations to enable testing
///
/// `now` is monotonic and used for measuring ages (cache TTLs). `local_now`
/// is the naive wall-clock instant the planner anchors "today" on.
pub trait Clock: Send + Sync + 'static {
    /// Current monotonic instant
    fn now(&self) -> Instant;

    /// Current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Current wall-clock time in the local zone, without offset
    fn local_now(&self) -> NaiveDateTime {
        DateTime::<Local>::from(self.system_time()).naive_local()
    }
}

/// Real system clock implementation for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Implement Clock for Arc<T> where T: Clock for convenient cloning
impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> Instant {
        (**self).now()
    }

    fn system_time(&self) -> SystemTime {
        (**self).system_time()
    }

    fn local_now(&self) -> NaiveDateTime {
        (**self).local_now()
    }
}

/// Mock clock for deterministic testing
///
/// Clones share the same elapsed counter, so a clone handed to a cache and
/// the one kept by the test move together.
#[derive(Debug, Clone)]
pub struct MockClock {
    start: Instant,
    wall_start: NaiveDateTime,
    elapsed: Arc<Mutex<Duration>>,
}

impl MockClock {
    /// Mock clock whose wall clock starts at the current local time
    pub fn new() -> Self {
        Self::at(Local::now().naive_local())
    }

    /// Mock clock whose wall clock starts at `wall_start`
    pub fn at(wall_start: NaiveDateTime) -> Self {
        Self { start: Instant::now(), wall_start, elapsed: Arc::new(Mutex::new(Duration::ZERO)) }
    }

    /// Simulate time passing without waiting
    pub fn advance(&self, duration: Duration) {
        *self.elapsed.lock() += duration;
    }

    /// Replace the simulated elapsed time
    pub fn set_elapsed(&self, duration: Duration) {
        *self.elapsed.lock() = duration;
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    fn system_time(&self) -> SystemTime {
        SystemTime::from(DateTime::<Utc>::from_naive_utc_and_offset(self.local_now(), Utc))
    }

    fn local_now(&self) -> NaiveDateTime {
        chrono::Duration::from_std(self.elapsed())
            .ok()
            .and_then(|elapsed| self.wall_start.checked_add_signed(elapsed))
            .unwrap_or(NaiveDateTime::MAX)
    }
}
