//! Shared harness for infra integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use slotwise_domain::{EventKind, NewCalendarEvent, PlannerConfig};
use slotwise_infra::{DbManager, SqliteCalendarEventRepository};
use tempfile::TempDir;

pub const OWNER: &str = "student-1";

/// Migrated SQLite database in a temporary directory.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let manager = DbManager::new(dir.path().join("slotwise.db"), 4).expect("pool");
        manager.run_migrations().expect("migrations");
        Self { manager: Arc::new(manager), _dir: dir }
    }

    pub fn repository(&self) -> SqliteCalendarEventRepository {
        SqliteCalendarEventRepository::new(Arc::clone(&self.manager))
    }
}

/// March 2025; the 10th is a Monday.
pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date")
}

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(day).and_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn payload(owner: &str, day: u32, start: &str, end: &str, kind: EventKind) -> NewCalendarEvent {
    NewCalendarEvent {
        owner: owner.into(),
        title: format!("{kind} {start}"),
        kind,
        date: date(day),
        start_time: start.into(),
        end_time: end.into(),
        location: None,
        category: None,
        subject: None,
        professor: None,
        color: kind.color().into(),
    }
}

pub fn planner() -> PlannerConfig {
    PlannerConfig::default()
}
