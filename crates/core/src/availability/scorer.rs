//! Slot quality scoring.
//!
//! Score = 50, +20 when the duration is inside the study range, +15 for a
//! morning start (08-12h), +10 for an afternoon start (14-17h), -15 from 20h
//! on, +10 for 90 minutes or more. 70+ is excellent, 55+ good.

use slotwise_domain::constants::{
    AFTERNOON_BONUS, BASE_SLOT_SCORE, EXCELLENT_SCORE, GOOD_SCORE, LATE_EVENING_PENALTY,
    LONG_SLOT_BONUS, LONG_SLOT_MINUTES, MORNING_BONUS, STUDY_RANGE_BONUS,
};
use slotwise_domain::utils::clock_time::hour_of;
use slotwise_domain::{FreeSlot, ScoredSlot, SlotQuality, StudyPreferences};

/// Deterministic scorer parameterised by study preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotScorer {
    study: StudyPreferences,
}

impl SlotScorer {
    /// Scorer favouring slots whose length falls in the study range.
    pub fn new(study: StudyPreferences) -> Self {
        Self { study }
    }

    /// Raw score for a slot starting at `start` (minutes since midnight).
    pub fn score(&self, start: u32, duration: u32) -> i32 {
        let hour = hour_of(start);
        let mut score = BASE_SLOT_SCORE;

        if (self.study.min_duration..=self.study.max_duration).contains(&duration) {
            score += STUDY_RANGE_BONUS;
        }

        match hour {
            8..=11 => score += MORNING_BONUS,
            14..=16 => score += AFTERNOON_BONUS,
            h if h >= 20 => score -= LATE_EVENING_PENALTY,
            _ => {}
        }

        if duration >= LONG_SLOT_MINUTES {
            score += LONG_SLOT_BONUS;
        }
        score
    }

    /// Quality tier of [`score`](Self::score).
    pub fn quality(&self, start: u32, duration: u32) -> SlotQuality {
        quality_for_score(self.score(start, duration))
    }

    /// Score a free slot, attaching tier and activity hints.
    pub fn score_slot(&self, slot: FreeSlot) -> ScoredSlot {
        let score = self.score(slot.start, slot.duration);
        ScoredSlot {
            recommended: recommendations(slot.start, slot.duration),
            quality: quality_for_score(score),
            score,
            date: slot.date,
            day: slot.day,
            start: slot.start,
            end: slot.end,
            duration: slot.duration,
        }
    }
}

/// Map a raw score onto its tier. Thresholds are inclusive lower bounds.
pub fn quality_for_score(score: i32) -> SlotQuality {
    if score >= EXCELLENT_SCORE {
        SlotQuality::Excellent
    } else if score >= GOOD_SCORE {
        SlotQuality::Good
    } else {
        SlotQuality::Acceptable
    }
}

/// Advisory activity hints. Never used for selection.
pub fn recommendations(start: u32, duration: u32) -> Vec<String> {
    let hints: &[&str] = match hour_of(start) {
        8..=11 => &["intensive review", "difficult assignments"],
        14..=16 => &["exercises", "projects"],
        17..=19 => &["light review", "reading"],
        _ => &[],
    };

    let mut out: Vec<String> = hints.iter().map(|h| (*h).to_string()).collect();
    if duration >= LONG_SLOT_MINUTES {
        out.push("long-term project".to_string());
    }
    out
}
