//! Interval merging and gap computation over a single day.

use slotwise_domain::constants::MINUTES_PER_DAY;
use slotwise_domain::Interval;

/// Merge overlapping or touching intervals.
///
/// Ends are clamped to 24:00, then empty and inverted intervals are dropped.
/// The output is sorted by start, pairwise disjoint and non-touching, and
/// covers exactly the same minutes of the day as the input.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    for interval in &mut intervals {
        interval.end = interval.end.min(MINUTES_PER_DAY);
    }
    intervals.retain(|i| !i.is_empty());
    intervals.sort_unstable_by_key(|i| (i.start, i.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for next in intervals {
        match merged.last_mut() {
            Some(prev) if next.start <= prev.end => prev.end = prev.end.max(next.end),
            _ => merged.push(next),
        }
    }
    merged
}

/// Complement of merged busy intervals within `[00:00, 24:00)`.
///
/// `busy` must already be merged. Edge gaps before the first and after the
/// last interval are included; zero-length gaps are not.
pub fn free_gaps(busy: &[Interval]) -> Vec<Interval> {
    let mut gaps = Vec::with_capacity(busy.len() + 1);
    let mut cursor = 0;
    for interval in busy {
        if interval.start > cursor {
            gaps.push(Interval { start: cursor, end: interval.start });
        }
        cursor = cursor.max(interval.end);
    }
    if cursor < MINUTES_PER_DAY {
        gaps.push(Interval { start: cursor, end: MINUTES_PER_DAY });
    }
    gaps
}
