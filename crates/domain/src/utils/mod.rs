//! Pure helpers shared by the domain types and the planner.

pub mod clock_time;
pub mod day_reference;
pub mod location;
