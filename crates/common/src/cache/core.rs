//! Core cache implementation

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;

use super::config::CacheConfig;
use super::stats::{CacheStats, MetricsCollector};
use crate::time::{Clock, SystemClock};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheStorage<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Least recently used at the front
    recency: VecDeque<K>,
}

impl<K, V> CacheStorage<K, V>
where
    K: Eq + Hash + Clone,
{
    fn new() -> Self {
        Self { entries: HashMap::new(), recency: VecDeque::new() }
    }

    fn touch(&mut self, key: &K) {
        self.forget(key);
        self.recency.push_back(key.clone());
    }

    fn forget(&mut self, key: &K) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            self.recency.remove(pos);
        }
    }

    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        self.forget(key);
        self.entries.remove(key)
    }
}

/// Thread-safe cache with TTL expiry and LRU eviction
///
/// Clones share storage and counters.
///
/// # Type Parameters
/// - `K`: Key type
/// - `V`: Value type, cloned out on reads
/// - `C`: Clock used for expiry (defaults to `SystemClock`)
pub struct Cache<K, V, C = SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock,
{
    storage: Arc<RwLock<CacheStorage<K, V>>>,
    config: CacheConfig,
    metrics: MetricsCollector,
    clock: C,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache reading the system clock
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    /// Create a cache reading time from `clock`
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            storage: Arc::new(RwLock::new(CacheStorage::new())),
            config,
            metrics: MetricsCollector::default(),
            clock,
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>, now: Instant) -> bool {
        self.config.ttl.is_some_and(|ttl| now.duration_since(entry.inserted_at) >= ttl)
    }

    /// Insert or replace a value, evicting the LRU entry first if full.
    ///
    /// Replacing restarts the entry's TTL.
    pub fn insert(&self, key: K, value: V) {
        let now = self.clock.now();
        let mut storage = self.storage.write();

        if let Some(max_size) = self.config.max_size {
            if storage.entries.len() >= max_size && !storage.entries.contains_key(&key) {
                self.evict_lru(&mut storage);
            }
        }

        storage.entries.insert(key.clone(), CacheEntry { value, inserted_at: now });
        storage.touch(&key);

        if self.config.track_metrics {
            self.metrics.record_insert();
        }
    }

    /// Read a value. Expired entries are dropped and reported as missing.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = self.clock.now();
        let mut storage = self.storage.write();

        let expired = match storage.entries.get(key) {
            None => {
                if self.config.track_metrics {
                    self.metrics.record_miss();
                }
                return None;
            }
            Some(entry) => self.is_expired(entry, now),
        };

        if expired {
            storage.remove(key);
            if self.config.track_metrics {
                self.metrics.record_miss();
                self.metrics.record_expirations(1);
            }
            return None;
        }

        let value = storage.entries.get(key).map(|entry| entry.value.clone());
        storage.touch(key);
        if self.config.track_metrics {
            self.metrics.record_hit();
        }
        value
    }

    /// Drop one key. Returns the value if it was present (expired or not).
    pub fn remove(&self, key: &K) -> Option<V> {
        let removed = self.storage.write().remove(key).map(|entry| entry.value);
        if removed.is_some() && self.config.track_metrics {
            self.metrics.record_invalidation();
        }
        removed
    }

    /// Drop every key matching `pred`. Returns how many were removed.
    pub fn remove_where<F>(&self, pred: F) -> usize
    where
        F: Fn(&K) -> bool,
    {
        let mut storage = self.storage.write();
        let doomed: Vec<K> = storage.entries.keys().filter(|key| pred(key)).cloned().collect();
        for key in &doomed {
            storage.remove(key);
        }
        if self.config.track_metrics {
            for _ in &doomed {
                self.metrics.record_invalidation();
            }
        }
        doomed.len()
    }

    /// Drop everything and reset the counters.
    pub fn clear(&self) {
        let mut storage = self.storage.write();
        storage.entries.clear();
        storage.recency.clear();
        if self.config.track_metrics {
            self.metrics.reset();
        }
    }

    /// Entries currently stored, including expired ones not yet purged
    pub fn len(&self) -> usize {
        self.storage.read().entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        if self.config.ttl.is_none() {
            return 0;
        }

        let now = self.clock.now();
        let mut storage = self.storage.write();
        let expired: Vec<K> = storage
            .entries
            .iter()
            .filter(|(_, entry)| self.is_expired(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            storage.remove(key);
        }

        if self.config.track_metrics {
            self.metrics.record_expirations(expired.len() as u64);
        }
        #[cfg(feature = "observability")]
        if !expired.is_empty() {
            tracing::debug!(removed = expired.len(), "purged expired cache entries");
        }
        expired.len()
    }

    /// Counter snapshot; all zero unless `track_metrics` is on.
    pub fn stats(&self) -> CacheStats {
        self.metrics.snapshot(self.len(), self.config.max_size)
    }

    fn evict_lru(&self, storage: &mut CacheStorage<K, V>) {
        if let Some(key) = storage.recency.front().cloned() {
            storage.remove(&key);
            if self.config.track_metrics {
                self.metrics.record_eviction();
            }
        }
    }
}

impl<K, V, C> Clone for Cache<K, V, C>
where
    K: Eq + Hash + Clone,
    V: Clone,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: self.config,
            metrics: self.metrics.clone(),
            clock: self.clock.clone(),
        }
    }
}
