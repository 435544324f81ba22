//! Modular common utilities shared across Slotwise crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `runtime`: clock abstraction and TTL cache
//! - `observability`: tracing events from the runtime modules

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Runtime tier
// --------------------------------------------------------------------
#[cfg(feature = "runtime")]
pub mod cache;
#[cfg(feature = "runtime")]
pub mod time;

// Re-export commonly used types and traits for convenience
// ------------------------
#[cfg(feature = "runtime")]
pub use cache::{Cache, CacheConfig, CacheStats};
#[cfg(feature = "runtime")]
pub use time::{Clock, MockClock, SystemClock};
