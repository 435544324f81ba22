//! Slot selection for a placement request.
//!
//! Pure: takes the full scanned slot list and decides. Never substitutes a
//! different day for the one asked for; a miss returns the alternatives so
//! the caller can negotiate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use slotwise_domain::{
    parse_weekday, resolve_weekday, DayAlternative, PlacementFailure, PlacementRequest, Result,
    ScoredSlot, SlotwiseError, TargetDay,
};

/// The slot picked and the span the event will occupy inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotChoice {
    pub slot: ScoredSlot,
    pub start: u32,
    pub end: u32,
}

/// Result of matching a request against the scanned slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(SlotChoice),
    Unavailable(PlacementFailure),
}

/// Concrete date a request targets, if any.
///
/// Weekday names resolve to their next occurrence strictly after
/// `reference`.
pub fn target_date(target: Option<&TargetDay>, reference: NaiveDate) -> Result<Option<NaiveDate>> {
    match target {
        None => Ok(None),
        Some(TargetDay::Date(date)) => Ok(Some(*date)),
        Some(TargetDay::Weekday(name)) => parse_weekday(name)
            .map(|weekday| Some(resolve_weekday(reference, weekday)))
            .ok_or_else(|| SlotwiseError::InvalidInput(format!("Unknown weekday: {name}"))),
    }
}

/// Pick the slot for `request`.
///
/// Slots must fit the duration, lie on the target date when one is given
/// and start inside the requested time of day. The earliest match wins
/// unless the request prefers quality. Without a match, fitting slots on
/// other days are offered as alternatives.
pub fn select_slot(
    slots: &[ScoredSlot],
    request: &PlacementRequest,
    reference: NaiveDate,
) -> Result<Selection> {
    let duration = request.resolved_duration();
    let target = target_date(request.target.as_ref(), reference)?;

    if slots.is_empty() {
        return Ok(Selection::Unavailable(PlacementFailure::no_slot_in_window()));
    }

    let fits = |slot: &&ScoredSlot| slot.duration >= duration;
    let in_bucket = |slot: &&ScoredSlot| {
        request.time_of_day.map_or(true, |tod| tod.contains_hour(slot.start_hour()))
    };
    let on_target = |slot: &&ScoredSlot| target.map_or(true, |date| slot.date == date);

    let mut candidates: Vec<&ScoredSlot> =
        slots.iter().filter(fits).filter(on_target).filter(in_bucket).collect();

    if candidates.is_empty() {
        let off_target = |slot: &&ScoredSlot| target.map_or(true, |date| slot.date != date);
        let mut alternatives =
            group_by_day(slots.iter().filter(fits).filter(off_target).filter(in_bucket));
        if alternatives.is_empty() {
            alternatives = group_by_day(slots.iter().filter(fits).filter(off_target));
        }
        return Ok(Selection::Unavailable(PlacementFailure::no_matching_slot(alternatives)));
    }

    if request.quality_priority {
        candidates.sort_by(|a, b| {
            b.quality.cmp(&a.quality).then_with(|| (a.date, a.start).cmp(&(b.date, b.start)))
        });
    } else {
        candidates.sort_by_key(|slot| (slot.date, slot.start));
    }

    let slot = candidates[0].clone();
    let start = slot.start;
    Ok(Selection::Chosen(SlotChoice { slot, start, end: start + duration }))
}

fn group_by_day<'a>(slots: impl Iterator<Item = &'a ScoredSlot>) -> Vec<DayAlternative> {
    let mut days: BTreeMap<NaiveDate, DayAlternative> = BTreeMap::new();
    for slot in slots {
        days.entry(slot.date)
            .or_insert_with(|| DayAlternative { date: slot.date, day: slot.day.clone(), count: 0 })
            .count += 1;
    }
    days.into_values().collect()
}
