//! Cache counters

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Point-in-time view of a cache's counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub size: usize,
    pub max_size: Option<usize>,
    pub hits: u64,
    /// Missing or expired on read
    pub misses: u64,
    pub inserts: u64,
    pub evictions: u64,
    pub expirations: u64,
    /// Explicit removals by key
    pub invalidations: u64,
}

impl CacheStats {
    /// Hits over total reads; 0.0 before the first read
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Lock-free counters shared by clones of a cache
#[derive(Debug, Clone, Default)]
pub(crate) struct MetricsCollector {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    inserts: Arc<AtomicU64>,
    evictions: Arc<AtomicU64>,
    expirations: Arc<AtomicU64>,
    invalidations: Arc<AtomicU64>,
}

impl MetricsCollector {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_insert(&self) {
        self.inserts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_expirations(&self, count: u64) {
        self.expirations.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, size: usize, max_size: Option<usize>) -> CacheStats {
        CacheStats {
            size,
            max_size,
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expirations: self.expirations.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn reset(&self) {
        for counter in [
            &self.hits,
            &self.misses,
            &self.inserts,
            &self.evictions,
            &self.expirations,
            &self.invalidations,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
