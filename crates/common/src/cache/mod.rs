//! In-process cache with TTL expiry and an LRU size bound
//!
//! Used for per-user derived data that is cheap to rebuild but expensive to
//! fetch on every request. Time is read through a [`Clock`](crate::Clock) so
//! expiry is testable without sleeping.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use slotwise_common::cache::{Cache, CacheConfig};
//!
//! let config = CacheConfig::builder().ttl(Duration::from_secs(300)).max_size(100).build();
//! let cache: Cache<String, u32> = Cache::new(config);
//! cache.insert("alice".to_string(), 3);
//! assert_eq!(cache.get(&"alice".to_string()), Some(3));
//! ```

mod config;
mod core;
mod stats;

// Re-export public API
pub use self::core::Cache;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use stats::CacheStats;
