//! Plain string values of resolved timexes, as emitted in resolution entries.

use rust_decimal::Decimal;

use crate::timex::Timex;

/// Placeholder for a value the engine cannot pin down.
pub const NOT_RESOLVED: &str = "not resolved";

const SECONDS_PER_YEAR: i64 = 31_536_000;
const SECONDS_PER_MONTH: i64 = 2_592_000;
const SECONDS_PER_WEEK: i64 = 604_800;
const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// String renderings used in resolution entries: `2017-05-29`, `17:30:00`,
/// `2017-05-29 17:30:00`, and durations as a number of seconds.
pub struct TimexValue;

impl TimexValue {
    /// `YYYY-MM-DD` for a definite date, otherwise [`NOT_RESOLVED`].
    pub fn date_value(timex: &Timex) -> String {
        match (timex.year, timex.month, timex.day_of_month) {
            (Some(y), Some(m), Some(d)) => format!("{y:04}-{m:02}-{d:02}"),
            _ => NOT_RESOLVED.to_string(),
        }
    }

    /// `HH:MM:SS`, or [`NOT_RESOLVED`] without clock fields.
    pub fn time_value(timex: &Timex) -> String {
        timex
            .time()
            .map(|t| t.to_string())
            .unwrap_or_else(|| NOT_RESOLVED.to_string())
    }

    /// Date and time joined by a space; either half may be [`NOT_RESOLVED`].
    pub fn datetime_value(timex: &Timex) -> String {
        format!(
            "{} {}",
            Self::date_value(timex),
            Self::time_value(timex)
        )
    }

    /// The duration in seconds, using fixed calendar-naive unit lengths
    /// (a month is 30 days, a year 365). An amount too large to express in
    /// seconds yields [`NOT_RESOLVED`].
    pub fn duration_value(timex: &Timex) -> String {
        let units = [
            (timex.years, SECONDS_PER_YEAR),
            (timex.months, SECONDS_PER_MONTH),
            (timex.weeks, SECONDS_PER_WEEK),
            (timex.days, SECONDS_PER_DAY),
            (timex.hours, SECONDS_PER_HOUR),
            (timex.minutes, SECONDS_PER_MINUTE),
            (timex.seconds, 1),
        ];
        units
            .into_iter()
            .find_map(|(amount, per_unit)| amount.map(|a| a.checked_mul(Decimal::from(per_unit))))
            .flatten()
            .map(|total| total.normalize().to_string())
            .unwrap_or_else(|| NOT_RESOLVED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_value() {
        assert_eq!(TimexValue::date_value(&Timex::parse("2017-05-29")), "2017-05-29");
        assert_eq!(TimexValue::date_value(&Timex::parse("XXXX-05-29")), NOT_RESOLVED);
    }

    #[test]
    fn test_time_value() {
        assert_eq!(TimexValue::time_value(&Timex::parse("T17:30")), "17:30:00");
    }

    #[test]
    fn test_datetime_value() {
        assert_eq!(
            TimexValue::datetime_value(&Timex::parse("2017-05-29T08:05:09")),
            "2017-05-29 08:05:09"
        );
    }

    #[test]
    fn test_duration_value_in_seconds() {
        assert_eq!(TimexValue::duration_value(&Timex::parse("P1Y")), "31536000");
        assert_eq!(TimexValue::duration_value(&Timex::parse("P2.5W")), "1512000");
        assert_eq!(TimexValue::duration_value(&Timex::parse("PT30M")), "1800");
        assert_eq!(TimexValue::duration_value(&Timex::parse("PT45S")), "45");
    }

    #[test]
    fn test_duration_value_overflow_is_not_resolved() {
        let huge = Timex::parse("P99999999999999999999999999Y");
        assert_eq!(TimexValue::duration_value(&huge), NOT_RESOLVED);
    }
}
