//! Turning day phrases into concrete dates.
//!
//! Rules, anchored on an explicit `today`:
//! - `today` / `aujourd'hui` resolve to today, `tomorrow` / `demain` to
//!   today + 1, `day after tomorrow` / `après-demain` to today + 2.
//! - A bare weekday name resolves to its next occurrence strictly after
//!   today. Today itself is only returned when the phrase also says "today"
//!   and today is that weekday.
//! - With `next week` / `semaine prochaine` the weekday is taken inside the
//!   following Monday-based week.
//! - `weekend` resolves to the coming Saturday (Sunday when today is
//!   Saturday).

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;
use crate::types::TimeOfDay;

static TODAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(today|aujourd['’]?hui)\b").expect("valid regex"));
static DAY_AFTER_TOMORROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(day after tomorrow|apr[eè]s[- ]demain)\b").expect("valid regex")
});
static TOMORROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(tomorrow|demain)\b").expect("valid regex"));
static NEXT_WEEK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(next week|semaine prochaine|next weekend|week-?end prochain)\b")
        .expect("valid regex")
});
static WEEKEND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bweek-?end\b").expect("valid regex"));
static WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday",
        r"|lundi|mardi|mercredi|jeudi|vendredi|samedi|dimanche)\b",
    ))
    .expect("valid regex")
});

static EVENING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(soir|soirée|tard|evening|tonight|night|late|fin d['’]apr[eè]s-midi)\b")
        .expect("valid regex")
});
static MORNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(matin|matinée|tôt|morning|early)\b").expect("valid regex"));
static AFTERNOON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\bapr[eè]s-midi\b|\baprem\b|\baprèm\b|\bafternoon\b|\bmilieu de journ)")
        .expect("valid regex")
});

/// How sure the resolver is about the date it produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl_domain_status_conversions!(Confidence {
    High => "high",
    Medium => "medium",
    Low => "low",
});

/// Result of resolving a day phrase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayReference {
    pub target_date: Option<NaiveDate>,
    /// English weekday label of `target_date`.
    pub day_name: Option<String>,
    pub time_of_day: TimeOfDay,
    pub is_next_week: bool,
    pub confidence: Confidence,
}

/// English weekday label, e.g. `Thursday`.
pub fn weekday_label(date: NaiveDate) -> &'static str {
    weekday_name(date.weekday())
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Exact, case-insensitive weekday name in English or French.
pub fn parse_weekday(name: &str) -> Option<Weekday> {
    let weekday = match name.trim().to_lowercase().as_str() {
        "monday" | "lundi" => Weekday::Mon,
        "tuesday" | "mardi" => Weekday::Tue,
        "wednesday" | "mercredi" => Weekday::Wed,
        "thursday" | "jeudi" => Weekday::Thu,
        "friday" | "vendredi" => Weekday::Fri,
        "saturday" | "samedi" => Weekday::Sat,
        "sunday" | "dimanche" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

/// Next occurrence of `weekday` strictly after `today` (1 to 7 days ahead).
pub fn resolve_weekday(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let ahead = (weekday.num_days_from_monday() + 7 - today.weekday().num_days_from_monday()) % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Duration::days(i64::from(ahead))
}

/// `weekday` inside the Monday-based week following the one containing
/// `today`.
pub fn resolve_weekday_next_week(today: NaiveDate, weekday: Weekday) -> NaiveDate {
    let this_monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    this_monday + Duration::days(7 + i64::from(weekday.num_days_from_monday()))
}

/// Bucket named in the phrase, `Any` when none is.
pub fn extract_time_of_day(phrase: &str) -> TimeOfDay {
    let lower = phrase.to_lowercase();
    // "fin d'après-midi" is evening, so evening is checked first
    if EVENING.is_match(&lower) {
        TimeOfDay::Evening
    } else if MORNING.is_match(&lower) {
        TimeOfDay::Morning
    } else if AFTERNOON.is_match(&lower) {
        TimeOfDay::Afternoon
    } else {
        TimeOfDay::Any
    }
}

/// Resolve a free-text day phrase against `today`.
pub fn resolve_day_reference(phrase: &str, today: NaiveDate) -> DayReference {
    let lower = phrase.to_lowercase();
    let time_of_day = extract_time_of_day(&lower);
    let is_next_week = NEXT_WEEK.is_match(&lower);
    let says_today = TODAY.is_match(&lower);

    let dated = |date: NaiveDate, is_next_week: bool, confidence: Confidence| DayReference {
        target_date: Some(date),
        day_name: Some(weekday_label(date).to_string()),
        time_of_day,
        is_next_week,
        confidence,
    };

    if DAY_AFTER_TOMORROW.is_match(&lower) {
        return dated(today + Duration::days(2), false, Confidence::High);
    }
    if TOMORROW.is_match(&lower) {
        return dated(today + Duration::days(1), false, Confidence::High);
    }

    if let Some(weekday) = WEEKDAY.find(&lower).and_then(|m| parse_weekday(m.as_str())) {
        let date = if is_next_week {
            resolve_weekday_next_week(today, weekday)
        } else if says_today && today.weekday() == weekday {
            today
        } else {
            resolve_weekday(today, weekday)
        };
        return dated(date, is_next_week, Confidence::High);
    }

    if says_today {
        return dated(today, false, Confidence::High);
    }

    if WEEKEND.is_match(&lower) {
        let date = if is_next_week {
            resolve_weekday_next_week(today, Weekday::Sat)
        } else if today.weekday() == Weekday::Sat {
            today + Duration::days(1)
        } else {
            resolve_weekday(today, Weekday::Sat)
        };
        return dated(date, is_next_week, Confidence::Medium);
    }

    DayReference {
        target_date: None,
        day_name: None,
        time_of_day,
        is_next_week,
        confidence: Confidence::Low,
    }
}

/// Pick between a date proposed upstream and the one named in the phrase.
///
/// A high-confidence date from the phrase wins; otherwise the proposal is
/// kept, and the phrase's lower-confidence date is the last resort.
pub fn reconcile_target_date(
    proposed: Option<NaiveDate>,
    phrase: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let parsed = resolve_day_reference(phrase, today);
    match (parsed.confidence, parsed.target_date, proposed) {
        (Confidence::High, Some(date), _) => Some(date),
        (_, _, Some(date)) => Some(date),
        (_, parsed_date, None) => parsed_date,
    }
}
