//! Wall-clock time handling for weekly availability rules.
//!
//! Availability rules carry times as "HH:MM" strings. This module provides a
//! validated wall-clock time type plus the 15-minute grid arithmetic the slot
//! walker uses: candidate starts are always aligned to quarter-hour
//! boundaries of the hour.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Granularity of the candidate grid, in minutes.
pub const GRID_MINUTES: u32 = 15;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A validated wall-clock time of day ("HH:MM").
///
/// Rules express working hours as wall-clock times without a date or zone;
/// they only become instants once interpreted in the policy timezone for a
/// concrete calendar day.
///
/// # Examples
///
/// ```
/// use booking_engine::domain::WallTime;
///
/// let t = WallTime::parse("09:30").unwrap();
/// assert_eq!(t.to_string(), "09:30");
///
/// assert!(WallTime::parse("9:30").is_err());
/// assert!(WallTime::parse("24:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime {
    time: NaiveTime,
}

impl WallTime {
    /// Parse a wall-clock time from strict "HH:MM" format.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("invalid time"))?;

        Ok(Self { time })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    /// Converts to a `NaiveTime` for combining with a calendar date.
    pub fn to_naive_time(&self) -> NaiveTime {
        self.time
    }
}

/// Parse exactly two ASCII digits into a number.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_digit() {
        return None;
    }
    Some(u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0'))
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WallTime({self})")
    }
}

impl FromStr for WallTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Returns one grid step as a `Duration`.
pub fn grid_step() -> Duration {
    Duration::minutes(i64::from(GRID_MINUTES))
}

/// Round an instant up to the next grid boundary.
///
/// Instants already on a boundary (with zero sub-minute component) are
/// returned unchanged, so the function is idempotent.
pub fn round_up_to_grid(instant: DateTime<Utc>) -> DateTime<Utc> {
    let step = i64::from(GRID_MINUTES) * 60;
    let secs = instant.timestamp();
    let rem = secs.rem_euclid(step);

    if rem == 0 && instant.timestamp_subsec_nanos() == 0 {
        return instant;
    }
    let rounded = secs - rem + step;

    DateTime::from_timestamp(rounded, 0).unwrap_or(instant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn parse_valid_times() {
        assert!(WallTime::parse("00:00").is_ok());
        assert!(WallTime::parse("23:59").is_ok());

        let t = WallTime::parse("14:30").unwrap();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 30);
    }

    #[test]
    fn parse_invalid_times() {
        assert!(WallTime::parse("1430").is_err());
        assert!(WallTime::parse("14:3").is_err());
        assert!(WallTime::parse("24:00").is_err());
        assert!(WallTime::parse("12:60").is_err());
        assert!(WallTime::parse("ab:cd").is_err());
        assert!(WallTime::parse("12-30").is_err());
        assert!(WallTime::parse("").is_err());
    }

    #[test]
    fn display_round_trip() {
        let t = WallTime::parse("09:05").unwrap();
        assert_eq!(t.to_string(), "09:05");
        assert_eq!("09:05".parse::<WallTime>().unwrap(), t);
    }

    #[test]
    fn ordering_follows_clock() {
        let early = WallTime::parse("08:00").unwrap();
        let late = WallTime::parse("17:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn serde_as_string() {
        let t = WallTime::parse("09:30").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"09:30\"");

        let back: WallTime = serde_json::from_str("\"09:30\"").unwrap();
        assert_eq!(back, t);

        assert!(serde_json::from_str::<WallTime>("\"25:00\"").is_err());
    }

    #[test]
    fn round_up_aligned_is_identity() {
        assert_eq!(round_up_to_grid(utc(9, 0, 0)), utc(9, 0, 0));
        assert_eq!(round_up_to_grid(utc(9, 45, 0)), utc(9, 45, 0));
    }

    #[test]
    fn round_up_advances_to_next_boundary() {
        assert_eq!(round_up_to_grid(utc(9, 1, 0)), utc(9, 15, 0));
        assert_eq!(round_up_to_grid(utc(9, 23, 0)), utc(9, 30, 0));
        assert_eq!(round_up_to_grid(utc(9, 46, 0)), utc(10, 0, 0));
        // Seconds past a boundary push to the next one
        assert_eq!(round_up_to_grid(utc(9, 0, 1)), utc(9, 15, 0));
    }

    #[test]
    fn round_up_crosses_midnight() {
        let late = Utc.with_ymd_and_hms(2026, 3, 10, 23, 50, 0).unwrap();
        let rounded = round_up_to_grid(late);
        assert_eq!(rounded, Utc.with_ymd_and_hms(2026, 3, 11, 0, 0, 0).unwrap());
    }
}
