//! User context cache behaviour with a controllable clock.

mod support;

use std::sync::Arc;
use std::time::Duration;

use slotwise_common::MockClock;
use slotwise_core::{ContextInvalidator, UserContextService};
use slotwise_domain::{CacheSettings, EventKind};
use support::calendar::MockCalendarEventRepository;
use support::fixtures::{at, at_midnight, class, date, event, OWNER};

fn service(
    repo: &MockCalendarEventRepository,
    clock: &MockClock,
) -> UserContextService<MockClock> {
    let repo = Arc::new(repo.clone());
    UserContextService::with_clock(repo, CacheSettings::default(), clock.clone()).unwrap()
}

#[tokio::test]
async fn context_is_cached_until_ttl() {
    let repo = MockCalendarEventRepository::default().with_event(class(date(11), "09:00", "10:00"));
    let clock = MockClock::at(at(10, 8, 0));
    let contexts = service(&repo, &clock);

    let first = contexts.get(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(first.events.len(), 1);
    assert_eq!(first.built_at, at(10, 8, 0));

    repo.clone().with_event(class(date(12), "09:00", "10:00"));
    clock.advance(Duration::from_secs(299));
    assert_eq!(contexts.get(OWNER, at_midnight(10)).await.unwrap().events.len(), 1);

    clock.advance(Duration::from_secs(1));
    let refreshed = contexts.get(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(refreshed.events.len(), 2);
    assert_eq!(refreshed.built_at, at(10, 8, 5));

    let stats = contexts.stats();
    assert_eq!((stats.hits, stats.misses), (1, 2));
}

#[tokio::test]
async fn invalidate_forces_a_rebuild() {
    let repo = MockCalendarEventRepository::default();
    let clock = MockClock::new();
    let contexts = service(&repo, &clock);

    assert!(contexts.get(OWNER, at_midnight(10)).await.unwrap().is_empty());
    repo.clone().with_event(class(date(10), "14:00", "15:00"));

    contexts.invalidate(OWNER);
    assert_eq!(contexts.get(OWNER, at_midnight(10)).await.unwrap().events.len(), 1);
    assert_eq!(contexts.stats().invalidations, 1);
}

#[tokio::test]
async fn each_reference_date_gets_its_own_context() {
    let repo = MockCalendarEventRepository::default()
        .with_event(event(OWNER, date(11), "09:00", "11:00", EventKind::Exam));
    let clock = MockClock::new();
    let contexts = service(&repo, &clock);

    let monday = contexts.get(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(monday.upcoming_exams.len(), 1);

    let later = contexts.get(OWNER, at_midnight(20)).await.unwrap();
    assert!(later.upcoming_exams.is_empty());
    assert_eq!(later, contexts.build(OWNER, at_midnight(20)).await.unwrap());

    // Same date, later in the day: served from cache.
    contexts.get(OWNER, at(10, 18, 0)).await.unwrap();
    assert_eq!(contexts.stats().hits, 1);

    contexts.invalidate(OWNER);
    assert_eq!(contexts.stats().size, 0);
    assert_eq!(contexts.stats().invalidations, 2);
}

#[tokio::test]
async fn unpadded_start_times_sort_by_clock_value() {
    let repo = MockCalendarEventRepository::default()
        .with_event(class(date(10), "14:00", "15:00"))
        .with_event(class(date(10), "9:00", "10:00"));
    let clock = MockClock::new();
    let context = service(&repo, &clock).get(OWNER, at_midnight(10)).await.unwrap();

    let starts: Vec<_> = context.events.iter().map(|e| e.start_time.as_str()).collect();
    assert_eq!(starts, vec!["9:00", "14:00"]);
}

#[tokio::test]
async fn window_and_limits() {
    let repo = MockCalendarEventRepository::default()
        // Outside the window on both sides.
        .with_event(class(date(2), "09:00", "10:00"))
        .with_event(class(date(25), "09:00", "10:00"))
        // A past exam is context but not upcoming.
        .with_event(event(OWNER, date(5), "09:00", "11:00", EventKind::Exam));
    for day in 11..=14 {
        repo.clone().with_event(event(OWNER, date(day), "08:00", "10:00", EventKind::Exam));
    }
    for day in 3..=9 {
        repo.clone().with_event(class(date(day), "14:00", "15:00"));
    }
    repo.clone().with_event(event("someone-else", date(11), "09:00", "10:00", EventKind::Exam));

    let clock = MockClock::new();
    let context = service(&repo, &clock).get(OWNER, at_midnight(10)).await.unwrap();

    assert_eq!(context.events.len(), 10);
    assert_eq!(context.events[0].date, date(3));
    assert!(context
        .events
        .windows(2)
        .all(|w| (w[0].date, &w[0].start_time) <= (w[1].date, &w[1].start_time)));

    let exam_days: Vec<_> = context.upcoming_exams.iter().map(|e| e.date).collect();
    assert_eq!(exam_days, vec![date(11), date(12), date(13)]);
    assert!(context.upcoming_exams.iter().all(|e| e.owner == OWNER));
}

#[tokio::test]
async fn purge_drops_only_expired_entries() {
    let repo = MockCalendarEventRepository::default();
    let clock = MockClock::new();
    let contexts = service(&repo, &clock);

    contexts.get("a", at_midnight(10)).await.unwrap();
    clock.advance(Duration::from_secs(200));
    contexts.get("b", at_midnight(10)).await.unwrap();
    clock.advance(Duration::from_secs(100));

    assert_eq!(contexts.purge_expired(), 1);
    assert_eq!(contexts.stats().size, 1);
}

#[tokio::test]
async fn storage_errors_are_not_cached() {
    let repo = MockCalendarEventRepository::default().failing_reads();
    let clock = MockClock::new();
    let contexts = service(&repo, &clock);

    assert!(contexts.get(OWNER, at_midnight(10)).await.is_err());
    assert_eq!(contexts.stats().size, 0);
}
