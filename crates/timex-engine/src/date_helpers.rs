//! Calendar walks over [`NaiveDate`] used by resolution and rendering.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// The following calendar day.
pub fn tomorrow(date: NaiveDate) -> NaiveDate {
    date + Duration::days(1)
}

/// The preceding calendar day.
pub fn yesterday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(1)
}

/// ISO day-of-week number (1 = Monday) to a [`Weekday`].
pub fn weekday_from_iso(day_of_week: u32) -> Option<Weekday> {
    match day_of_week {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// The closest `day` strictly before `reference`.
pub fn date_of_last_day(day: Weekday, reference: NaiveDate) -> NaiveDate {
    let back = (reference.weekday().num_days_from_monday() as i64
        - day.num_days_from_monday() as i64
        + 7)
        % 7;
    reference - Duration::days(if back == 0 { 7 } else { back })
}

/// The closest `day` strictly after `reference`.
pub fn date_of_next_day(day: Weekday, reference: NaiveDate) -> NaiveDate {
    let ahead = (day.num_days_from_monday() as i64
        - reference.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    reference + Duration::days(if ahead == 0 { 7 } else { ahead })
}

/// Every `day` in `[start, end)`.
pub fn dates_matching_day(day: Weekday, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let ahead = (day.num_days_from_monday() as i64
        - start.weekday().num_days_from_monday() as i64
        + 7)
        % 7;
    let first = start + Duration::days(ahead);
    first
        .iter_weeks()
        .take_while(|d| *d < end)
        .collect()
}

/// Monday of the ISO week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Whether `date` falls in the same ISO week (Monday start) as `reference`.
pub fn is_this_week(date: NaiveDate, reference: NaiveDate) -> bool {
    start_of_week(date) == start_of_week(reference)
}

/// Whether `date` falls in the ISO week after the one containing `reference`.
pub fn is_next_week(date: NaiveDate, reference: NaiveDate) -> bool {
    is_this_week(date, reference + Duration::weeks(1))
}

/// Whether `date` falls in the ISO week before the one containing `reference`.
pub fn is_last_week(date: NaiveDate, reference: NaiveDate) -> bool {
    is_this_week(date, reference - Duration::weeks(1))
}

/// ISO week number of `date`.
pub fn week_of_year(date: NaiveDate) -> u32 {
    date.iso_week().week()
}
