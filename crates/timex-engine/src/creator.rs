//! Canonical TIMEX strings for common expressions.
//!
//! Builders take the reference date explicitly and return the string form,
//! ready to be parsed or passed to a resolver.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::date_helpers;
use crate::timex::{PartOfDay, Timex};

/// Builders and constants for frequently used TIMEX expressions.
pub struct TimexCreator;

impl TimexCreator {
    // ISO weekdays, Monday = 1.
    pub const MONDAY: &'static str = "XXXX-WXX-1";
    pub const TUESDAY: &'static str = "XXXX-WXX-2";
    pub const WEDNESDAY: &'static str = "XXXX-WXX-3";
    pub const THURSDAY: &'static str = "XXXX-WXX-4";
    pub const FRIDAY: &'static str = "XXXX-WXX-5";
    pub const SATURDAY: &'static str = "XXXX-WXX-6";
    pub const SUNDAY: &'static str = "XXXX-WXX-7";

    // Parts of day as explicit clock windows. `NIGHT` ends at midnight; its
    // canonical form wraps the end to `T00`: `(T20,T00,PT4H)`.
    pub const DAYTIME: &'static str = "(T08,T18,PT10H)";
    pub const MORNING: &'static str = "(T08,T12,PT4H)";
    pub const AFTERNOON: &'static str = "(T12,T16,PT4H)";
    pub const EVENING: &'static str = "(T16,T20,PT4H)";
    pub const NIGHT: &'static str = "(T20,T24,PT4H)";

    /// The explicit clock window of a part of day.
    pub fn part_of_day(part: PartOfDay) -> &'static str {
        match part {
            PartOfDay::Daytime => Self::DAYTIME,
            PartOfDay::Morning => Self::MORNING,
            PartOfDay::Afternoon => Self::AFTERNOON,
            PartOfDay::Evening => Self::EVENING,
            PartOfDay::Night => Self::NIGHT,
        }
    }

    /// The reference date itself, e.g. `2017-09-27`.
    pub fn today(reference: NaiveDate) -> String {
        Timex::from_date(reference).timex_value()
    }

    /// The day after `reference`.
    pub fn tomorrow(reference: NaiveDate) -> String {
        Timex::from_date(date_helpers::tomorrow(reference)).timex_value()
    }

    /// The day before `reference`.
    pub fn yesterday(reference: NaiveDate) -> String {
        Timex::from_date(date_helpers::yesterday(reference)).timex_value()
    }

    /// The seven days starting at `reference`.
    pub fn week_from_today(reference: NaiveDate) -> String {
        Self::days_from(reference, 7)
    }

    /// The seven days ending at `reference`.
    pub fn week_back_from_today(reference: NaiveDate) -> String {
        Self::days_from(reference - Duration::days(7), 7)
    }

    /// The ISO week (Monday through Sunday) containing `reference`, as a
    /// seven-day explicit range.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use timex_engine::TimexCreator;
    ///
    /// let wednesday = NaiveDate::from_ymd_opt(2017, 9, 27).unwrap();
    /// assert_eq!(TimexCreator::this_week(wednesday), "(2017-09-25,2017-10-02,P7D)");
    /// ```
    pub fn this_week(reference: NaiveDate) -> String {
        Self::days_from(date_helpers::start_of_week(reference), 7)
    }

    /// The ISO week after the one containing `reference`.
    pub fn next_week(reference: NaiveDate) -> String {
        Self::days_from(date_helpers::start_of_week(reference) + Duration::weeks(1), 7)
    }

    /// The ISO week before the one containing `reference`.
    pub fn last_week(reference: NaiveDate) -> String {
        Self::days_from(date_helpers::start_of_week(reference) - Duration::weeks(1), 7)
    }

    /// `weeks` whole weeks starting at `reference`, expressed in days.
    pub fn next_weeks_from_today(weeks: u32, reference: NaiveDate) -> String {
        Self::days_from(reference, weeks.saturating_mul(7))
    }

    fn days_from(start: NaiveDate, days: u32) -> String {
        let mut timex = Timex::from_date(start);
        timex.days = Some(Decimal::from(days));
        timex.timex_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        // Wednesday
        NaiveDate::from_ymd_opt(2017, 9, 27).unwrap()
    }

    #[test]
    fn test_single_days() {
        assert_eq!(TimexCreator::today(reference()), "2017-09-27");
        assert_eq!(TimexCreator::tomorrow(reference()), "2017-09-28");
        assert_eq!(TimexCreator::yesterday(reference()), "2017-09-26");
    }

    #[test]
    fn test_week_spans() {
        assert_eq!(
            TimexCreator::week_from_today(reference()),
            "(2017-09-27,2017-10-04,P7D)"
        );
        assert_eq!(
            TimexCreator::week_back_from_today(reference()),
            "(2017-09-20,2017-09-27,P7D)"
        );
        assert_eq!(
            TimexCreator::this_week(reference()),
            "(2017-09-25,2017-10-02,P7D)"
        );
        assert_eq!(
            TimexCreator::next_week(reference()),
            "(2017-10-02,2017-10-09,P7D)"
        );
        assert_eq!(
            TimexCreator::last_week(reference()),
            "(2017-09-18,2017-09-25,P7D)"
        );
        assert_eq!(
            TimexCreator::next_weeks_from_today(2, reference()),
            "(2017-09-27,2017-10-11,P14D)"
        );
    }

    #[test]
    fn test_part_of_day_constants_round_trip() {
        for s in [
            TimexCreator::DAYTIME,
            TimexCreator::MORNING,
            TimexCreator::AFTERNOON,
            TimexCreator::EVENING,
        ] {
            assert_eq!(Timex::parse(s).timex_value(), s);
        }
    }

    #[test]
    fn test_night_end_wraps_to_midnight() {
        let night = Timex::parse(TimexCreator::NIGHT);
        assert_eq!(night.hour(), Some(20));
        assert_eq!(night.timex_value(), "(T20,T00,PT4H)");
        assert_eq!(Timex::parse(&night.timex_value()), night);
    }
}
