//! Per-user derived context.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::CalendarEvent;

/// Snapshot of a user's recent and upcoming calendar, used to prime
/// conversational layers. Never consulted by placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub owner: String,
    /// Recent and upcoming events, chronological.
    pub events: Vec<CalendarEvent>,
    /// Next exams from the reference instant, chronological.
    pub upcoming_exams: Vec<CalendarEvent>,
    pub built_at: NaiveDateTime,
}

impl UserContext {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.upcoming_exams.is_empty()
    }
}
