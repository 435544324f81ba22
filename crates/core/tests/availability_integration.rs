//! Weekly scan, report and suggestions over the mock repository.

mod support;

use std::sync::Arc;

use slotwise_core::{AvailabilityAggregator, SuggestionOptions, SuggestionService};
use slotwise_domain::{
    to_hhmm, DailyConstraints, EventKind, PlannerConfig, SlotQuality, SlotwiseError, TimeOfDay,
};
use support::calendar::MockCalendarEventRepository;
use support::fixtures::{at, at_midnight, class, date, event, full_day, planner, OWNER};

fn aggregator(repo: &MockCalendarEventRepository, config: PlannerConfig) -> AvailabilityAggregator {
    AvailabilityAggregator::new(Arc::new(repo.clone()), config).unwrap()
}

fn spans_on(scan: &slotwise_core::WindowScan, day: u32) -> Vec<(String, String)> {
    scan.slots_on(date(day)).map(|s| (to_hhmm(s.start), to_hhmm(s.end))).collect()
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter().map(|(a, b)| (a.to_string(), b.to_string())).collect()
}

#[tokio::test]
async fn empty_day_matches_constraint_derivation() {
    let repo = MockCalendarEventRepository::default();

    let closing_at_dinner = PlannerConfig {
        constraints: DailyConstraints {
            late_evening_cutoff: "20:00".into(),
            ..DailyConstraints::default()
        },
        ..planner()
    };
    let scan = aggregator(&repo, closing_at_dinner).scan(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(spans_on(&scan, 11), pairs(&[("07:00", "12:00"), ("13:00", "19:00")]));

    let scan = aggregator(&repo, planner()).scan(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(
        spans_on(&scan, 11),
        pairs(&[("07:00", "12:00"), ("13:00", "19:00"), ("20:00", "22:00")])
    );
}

#[tokio::test]
async fn window_covers_eight_days_in_order() {
    let repo = MockCalendarEventRepository::default();
    let scan = aggregator(&repo, planner()).scan(OWNER, at(10, 10, 30)).await.unwrap();

    assert_eq!((scan.window_start, scan.window_end), (date(10), date(17)));
    assert_eq!(repo.reads(), 8);
    assert!(scan.slots.windows(2).all(|w| (w[0].date, w[0].start) < (w[1].date, w[1].start)));
    // Elapsed morning on the reference date.
    assert_eq!(scan.slots[0].start, 10 * 60 + 30);
    assert!(scan.slots.iter().all(|s| s.duration >= 30));
}

#[tokio::test]
async fn short_gaps_are_dropped() {
    let repo = MockCalendarEventRepository::default()
        .with_event(class(date(11), "07:20", "12:00"));
    let scan = aggregator(&repo, planner()).scan(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(spans_on(&scan, 11)[0], ("13:00".to_string(), "19:00".to_string()));
}

#[tokio::test]
async fn report_truncates_chronologically_and_flags_exams() {
    let repo = MockCalendarEventRepository::default()
        .with_event(event(OWNER, date(13), "08:00", "10:00", EventKind::Exam))
        .with_event(event(OWNER, date(11), "14:00", "16:00", EventKind::Exam));
    let agg = aggregator(&repo, planner());

    let scan = agg.scan(OWNER, at_midnight(10)).await.unwrap();
    let report = agg.report(OWNER, at_midnight(10)).await.unwrap();

    assert_eq!(report.slots.len(), 15);
    assert_eq!(report.slots[..], scan.slots[..15]);
    assert_eq!(report.total_free_minutes, scan.total_free_minutes());
    assert_eq!(report.excellent_count, scan.count_quality(SlotQuality::Excellent));
    assert_eq!(report.critical_info[0], "2 exam(s) upcoming: exam 14:00, exam 08:00");
    assert!(report.summary.contains("Scheduled events: 2"));
}

#[tokio::test]
async fn booked_week_warns_about_low_availability() {
    let repo = MockCalendarEventRepository::default();
    for day in 10..=17 {
        repo.clone().with_event(full_day(date(day)));
    }

    let report = aggregator(&repo, planner()).report(OWNER, at_midnight(10)).await.unwrap();
    assert!(report.slots.is_empty());
    assert_eq!(report.total_free_minutes, 0);
    assert!(report.critical_info.iter().any(|i| i.starts_with("Low availability")));
}

#[tokio::test]
async fn malformed_event_time_fails_the_scan() {
    let repo = MockCalendarEventRepository::default().with_event(class(date(12), "9h", "10:00"));
    let err = aggregator(&repo, planner()).scan(OWNER, at_midnight(10)).await.unwrap_err();
    assert!(matches!(err, SlotwiseError::InvalidTimeFormat(_)));
}

#[tokio::test]
async fn lookahead_is_bounded() {
    let repo = MockCalendarEventRepository::default();
    for days in [7, 15] {
        let config = PlannerConfig { lookahead_days: days, ..planner() };
        assert!(matches!(
            AvailabilityAggregator::new(Arc::new(repo.clone()), config),
            Err(SlotwiseError::Config(_))
        ));
    }
    let wide = PlannerConfig { lookahead_days: 14, fetch_concurrency: 1, ..planner() };
    let scan = aggregator(&repo, wide).scan(OWNER, at_midnight(10)).await.unwrap();
    assert_eq!(scan.window_end, date(23));
}

// ============================================================================
// Suggestions
// ============================================================================

fn suggestions(repo: &MockCalendarEventRepository) -> SuggestionService {
    SuggestionService::new(Arc::new(repo.clone()), &DailyConstraints::default()).unwrap()
}

#[tokio::test]
async fn suggestions_start_tomorrow_and_sort_by_priority() {
    let repo = MockCalendarEventRepository::default();
    let options = SuggestionOptions::default();
    let found = suggestions(&repo).suggest(OWNER, date(10), &options).await.unwrap();

    // The evening window (18-21h) never has 90 free minutes around dinner,
    // so the third suggestion comes from the next day.
    let picked: Vec<_> =
        found.iter().map(|s| (s.date, s.time_of_day, s.priority, s.start_time.as_str())).collect();
    assert_eq!(
        picked,
        vec![
            (date(11), TimeOfDay::Morning, 2, "08:00"),
            (date(11), TimeOfDay::Afternoon, 2, "13:00"),
            (date(12), TimeOfDay::Morning, 2, "08:00"),
        ]
    );
}

#[tokio::test]
async fn suggestions_pad_events_with_a_break() {
    let repo = MockCalendarEventRepository::default().with_event(class(date(11), "08:00", "09:00"));
    let options =
        SuggestionOptions::default().preferring(vec![TimeOfDay::Morning]).with_duration(60);
    let found = suggestions(&repo).suggest(OWNER, date(10), &options).await.unwrap();

    assert_eq!(found[0].date, date(11));
    assert_eq!((found[0].start_time.as_str(), found[0].end_time.as_str()), ("09:15", "10:15"));
}

#[tokio::test]
async fn suggestions_skip_weekends_when_asked() {
    let repo = MockCalendarEventRepository::default();
    // Friday the 14th; Saturday and Sunday are skipped.
    let options = SuggestionOptions {
        avoid_weekends: true,
        prefer_early_morning: true,
        ..SuggestionOptions::default()
    }
    .preferring(vec![TimeOfDay::Morning])
        .starting(date(15));
    let found = suggestions(&repo).suggest(OWNER, date(14), &options).await.unwrap();

    let days: Vec<_> = found.iter().map(|s| (s.date, s.priority)).collect();
    assert_eq!(days, vec![(date(17), 3), (date(18), 3), (date(19), 3)]);
}

#[tokio::test]
async fn no_fit_means_no_suggestions() {
    let repo = MockCalendarEventRepository::default();
    let options = SuggestionOptions::default().with_duration(400);
    let found = suggestions(&repo).suggest(OWNER, date(10), &options).await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn evening_suggestions_avoid_dinner() {
    let repo = MockCalendarEventRepository::default();
    let options =
        SuggestionOptions::default().preferring(vec![TimeOfDay::Evening]).with_duration(60);
    let found = suggestions(&repo).suggest(OWNER, date(10), &options).await.unwrap();

    assert_eq!(found.len(), 3);
    // 18:00-19:00 fits before dinner every day.
    assert!(found.iter().all(|s| s.start_time == "18:00" && s.priority == 1));
    assert_eq!(found[0].date, date(11));
}
