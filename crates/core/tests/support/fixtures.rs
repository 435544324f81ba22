use chrono::{NaiveDate, NaiveDateTime};
use slotwise_domain::{CalendarEvent, EventId, EventKind, NewCalendarEvent, PlannerConfig};

pub const OWNER: &str = "student-1";

/// 2025-03-10 is a Monday.
pub fn monday() -> NaiveDate {
    date(10)
}

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

/// Reference instant at midnight so nothing on the reference date has elapsed.
pub fn at_midnight(day: u32) -> NaiveDateTime {
    date(day).and_hms_opt(0, 0, 0).unwrap()
}

pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(day).and_hms_opt(hour, minute, 0).unwrap()
}

pub fn event(
    owner: &str,
    date: NaiveDate,
    start: &str,
    end: &str,
    kind: EventKind,
) -> CalendarEvent {
    NewCalendarEvent {
        owner: owner.into(),
        title: format!("{kind} {start}"),
        kind,
        date,
        start_time: start.into(),
        end_time: end.into(),
        location: None,
        category: None,
        subject: None,
        professor: None,
        color: kind.color().into(),
    }
    .into_event(EventId::generate(), date.and_hms_opt(0, 0, 0).unwrap())
}

pub fn class(date: NaiveDate, start: &str, end: &str) -> CalendarEvent {
    event(OWNER, date, start, end, EventKind::Class)
}

/// Blocks every waking minute of `date`.
pub fn full_day(date: NaiveDate) -> CalendarEvent {
    event(OWNER, date, "00:00", "24:00", EventKind::Activity)
}

pub fn planner() -> PlannerConfig {
    PlannerConfig::default()
}
