//! Clock-time arithmetic on minutes since midnight.
//!
//! All interval math in the planner works on `u32` minutes in `[0, 1440]`.
//! `HH:MM` strings only exist at the edges (storage rows, config, output).

use chrono::{NaiveTime, Timelike};

use crate::constants::{MINUTES_PER_DAY, MINUTES_PER_HOUR};
use crate::{Result, SlotwiseError};

/// Parse a strict `H:MM` / `HH:MM` value into minutes since midnight.
///
/// Hours run `0..=24`, minutes `0..=59`, and `24:00` is the only value
/// accepted with hour 24 (end of day). Anything else is an
/// `InvalidTimeFormat` error.
pub fn to_minutes(value: &str) -> Result<u32> {
    let invalid = || SlotwiseError::InvalidTimeFormat(value.to_string());

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    if hours.is_empty()
        || hours.len() > 2
        || minutes.len() != 2
        || !hours.bytes().all(|b| b.is_ascii_digit())
        || !minutes.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(invalid());
    }

    let hours: u32 = hours.parse().map_err(|_| invalid())?;
    let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= MINUTES_PER_HOUR || hours > 24 || (hours == 24 && minutes != 0) {
        return Err(invalid());
    }

    Ok(hours * MINUTES_PER_HOUR + minutes)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Values past the end of day are clamped to `24:00`.
pub fn to_hhmm(minutes: u32) -> String {
    let minutes = minutes.min(MINUTES_PER_DAY);
    format!("{:02}:{:02}", minutes / MINUTES_PER_HOUR, minutes % MINUTES_PER_HOUR)
}

/// Minutes since midnight for a wall-clock time (seconds are dropped).
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * MINUTES_PER_HOUR + time.minute()
}

/// Hour component of a minute offset.
pub fn hour_of(minutes: u32) -> u32 {
    minutes / MINUTES_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_padded_and_unpadded_hours() {
        assert_eq!(to_minutes("07:00").unwrap(), 420);
        assert_eq!(to_minutes("7:05").unwrap(), 425);
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
        assert_eq!(to_minutes("24:00").unwrap(), 1440);
    }

    #[test]
    fn rejects_malformed_values() {
        let malformed = [
            "", "7", "07:0", "07:000", "25:00", "24:01", "12:60", "ab:cd", "-1:00", " 07:00",
            "07h00",
        ];
        for bad in malformed {
            assert!(
                matches!(to_minutes(bad), Err(SlotwiseError::InvalidTimeFormat(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn formats_with_padding() {
        assert_eq!(to_hhmm(0), "00:00");
        assert_eq!(to_hhmm(570), "09:30");
        assert_eq!(to_hhmm(1440), "24:00");
        assert_eq!(to_hhmm(5000), "24:00");
    }

    #[test]
    fn minute_of_day_drops_seconds() {
        let t = NaiveTime::from_hms_opt(14, 7, 59).unwrap();
        assert_eq!(minute_of_day(t), 847);
        assert_eq!(hour_of(847), 14);
    }
}
