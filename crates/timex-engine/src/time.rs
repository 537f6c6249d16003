//! Wall-clock time of day.

use std::fmt;

use chrono::{NaiveTime, Timelike};

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// A time of day with second precision.
///
/// `hour` is normally 0-23, but `24:00:00` is allowed as the exclusive end of
/// a range that runs to midnight (the `night` part of day ends there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Time {
    /// A clock time. Fields are not range-checked.
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Milliseconds since midnight.
    pub fn to_millis(&self) -> u64 {
        self.hour as u64 * MILLIS_PER_HOUR
            + self.minute as u64 * MILLIS_PER_MINUTE
            + self.second as u64 * MILLIS_PER_SECOND
    }

    /// Inverse of [`Time::to_millis`]. Sub-second remainders are dropped and
    /// the hour saturates at `u32::MAX`.
    pub fn from_millis(millis: u64) -> Self {
        let hour = u32::try_from(millis / MILLIS_PER_HOUR).unwrap_or(u32::MAX);
        let minute = (millis % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let second = (millis % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        Self::new(hour, minute as u32, second as u32)
    }
}

impl From<NaiveTime> for Time {
    fn from(t: NaiveTime) -> Self {
        Self::new(t.hour(), t.minute(), t.second())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millis_round_trip() {
        let t = Time::new(17, 30, 5);
        assert_eq!(t.to_millis(), 63_005_000);
        assert_eq!(Time::from_millis(t.to_millis()), t);
    }

    #[test]
    fn test_from_millis_drops_sub_second() {
        assert_eq!(Time::from_millis(3_600_999), Time::new(1, 0, 0));
    }

    #[test]
    fn test_end_of_day_is_representable() {
        let end = Time::new(24, 0, 0);
        assert_eq!(end.to_millis(), 86_400_000);
        assert!(end > Time::new(23, 59, 59));
    }

    #[test]
    fn test_from_naive_time() {
        let t: Time = NaiveTime::from_hms_opt(8, 15, 0).unwrap().into();
        assert_eq!(t, Time::new(8, 15, 0));
        assert_eq!(t.to_string(), "08:15:00");
    }
}
