//! Cache sizing and expiry settings

use std::time::Duration;

/// Settings for a [`Cache`](super::Cache).
///
/// When `max_size` is reached the least recently used entry makes room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entry bound; `None` never evicts on size
    pub max_size: Option<usize>,
    /// Lifetime measured from insertion; `None` never expires
    pub ttl: Option<Duration>,
    /// Count hits, misses, evictions and expirations
    pub track_metrics: bool,
}

impl CacheConfig {
    /// Start from an unbounded, non-expiring, uncounted cache.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }
}

/// Fluent construction of [`CacheConfig`].
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    config: CacheConfig,
}

impl CacheConfigBuilder {
    /// Bound the cache to `size` entries.
    pub fn max_size(mut self, size: usize) -> Self {
        self.config.max_size = Some(size);
        self
    }

    /// Expire entries `duration` after insertion.
    pub fn ttl(mut self, duration: Duration) -> Self {
        self.config.ttl = Some(duration);
        self
    }

    /// Toggle the counters behind [`Cache::stats`](super::Cache::stats).
    pub fn track_metrics(mut self, enabled: bool) -> Self {
        self.config.track_metrics = enabled;
        self
    }

    /// Finish.
    pub fn build(self) -> CacheConfig {
        self.config
    }
}
