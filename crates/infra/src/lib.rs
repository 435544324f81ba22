//! # Slotwise Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite persistence for calendar events (r2d2 pool)
//! - An in-memory repository for tests and embedding
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `slotwise-core`
//! - Contains all "impure" code (I/O, environment, global subscribers)

pub mod config;
pub mod database;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use database::{DbManager, InMemoryCalendarRepository, SqliteCalendarEventRepository};
pub use errors::InfraError;
pub use observability::{init_tracing, LogFormat};
