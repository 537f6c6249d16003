//! Range expansion and duration arithmetic on [`Timex`] values.
//!
//! A range-bearing timex carries a start point and a duration in one value.
//! [`clone_datetime`] and [`clone_duration`] split those halves apart so each
//! can be handled on its own; the `*_add` functions then move a point forward
//! by a duration.

use chrono::{Datelike, NaiveDate, TimeDelta, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::creator::TimexCreator;
use crate::inference::TimexType;
use crate::range::{DateRange, TimeRange};
use crate::time::Time;
use crate::timex::Timex;

/// Year used for day arithmetic on dates that carry no year. A leap year, so
/// that `XXXX-02-29` is a valid starting point.
const YEARLESS_BASE: i32 = 2000;

/// Start, end, and duration of an expanded range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimexRange {
    pub start: Timex,
    pub end: Timex,
    pub duration: Timex,
}

/// Expand a date or date-time range into concrete start and end points.
///
/// With a duration, the range runs from the point fields to the point plus
/// the duration. Without one, calendar fields select the enclosing period:
/// a year, a month, an ISO week (or its weekend), or a single day.
pub fn expand_datetime_range(timex: &Timex) -> TimexRange {
    if timex.has_duration() {
        let start = clone_datetime(timex);
        let duration = clone_duration(timex);
        let end = timex_datetime_add(&start, &duration);
        return TimexRange {
            start,
            end,
            duration,
        };
    }

    calendar_period(timex)
        .map(|(start, end)| TimexRange {
            start: Timex::from_date(start),
            end: Timex::from_date(end),
            duration: Timex::default(),
        })
        .unwrap_or_default()
}

fn calendar_period(timex: &Timex) -> Option<(NaiveDate, NaiveDate)> {
    let year = timex.year?;
    if let Some(week) = timex.week_of_year {
        let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
        return if timex.weekend {
            Some((monday + TimeDelta::days(5), monday + TimeDelta::days(7)))
        } else {
            Some((monday, monday + TimeDelta::days(7)))
        };
    }
    match (timex.month, timex.day_of_month) {
        (Some(month), Some(day)) => {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            Some((date, date.succ_opt()?))
        }
        (Some(month), None) => {
            let start = NaiveDate::from_ymd_opt(year, month, 1)?;
            Some((start, first_of_next_month(start)?))
        }
        _ => Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
        )),
    }
}

pub(crate) fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
}

/// Expand a time range: the clock fields are the start, and the end is the
/// start plus the duration. A part of day is first replaced by its canonical
/// window (`TMO` is `(T08,T12,PT4H)`).
pub fn expand_time_range(timex: &Timex) -> TimexRange {
    let resolved;
    let timex = match timex.part_of_day {
        Some(part) => {
            resolved = Timex::parse(TimexCreator::part_of_day(part));
            &resolved
        }
        None => timex,
    };

    let mut start = Timex::default();
    start.set_time(timex.time());
    let duration = clone_duration(timex);
    let end = timex_time_add(&start, &duration);
    TimexRange {
        start,
        end,
        duration,
    }
}

/// Whole units of a duration amount; fractions are truncated. Amounts
/// outside the `i64` range count as zero.
fn whole(amount: Option<Decimal>) -> i64 {
    amount.and_then(|a| a.trunc().to_i64()).unwrap_or(0)
}

fn shift_day_of_week(day_of_week: u32, days: i64) -> u32 {
    ((day_of_week as i64 - 1 + days.rem_euclid(7)).rem_euclid(7) + 1) as u32
}

/// Move the date part of `start` forward by the date part of `duration`.
///
/// A weekday shifts around the week. A month and day move by calendar
/// arithmetic (using a leap base year when no year is present). Years and
/// months are added field-wise, keeping the day of month as it is; months
/// carry into the year when one is present. Anything else is returned as is.
///
/// A shift that leaves the representable calendar is a no-op: `start` comes
/// back unchanged.
pub fn timex_date_add(start: &Timex, duration: &Timex) -> Timex {
    shift_date(start, duration).unwrap_or_else(|| start.clone())
}

fn shift_date(start: &Timex, duration: &Timex) -> Option<Timex> {
    let mut result = start.clone();
    let days = whole(duration.weeks)
        .checked_mul(7)?
        .checked_add(whole(duration.days))?;

    if let Some(dow) = start.day_of_week {
        if days != 0 {
            result.day_of_week = Some(shift_day_of_week(dow, days));
        }
        return Some(result);
    }

    let (Some(month), Some(day)) = (start.month, start.day_of_month) else {
        return Some(result);
    };

    if days != 0 {
        let d = NaiveDate::from_ymd_opt(start.year.unwrap_or(YEARLESS_BASE), month, day)?
            .checked_add_signed(TimeDelta::try_days(days)?)?;
        if start.year.is_some() {
            result.year = Some(d.year());
        }
        result.month = Some(d.month());
        result.day_of_month = Some(d.day());
        return Some(result);
    }

    let years = whole(duration.years);
    if years != 0 {
        if let Some(year) = start.year {
            result.year = Some(year.checked_add(i32::try_from(years).ok()?)?);
        }
        return Some(result);
    }

    let months = whole(duration.months);
    if months != 0 {
        let total = (month as i64 - 1).checked_add(months)?;
        result.month = Some((total.rem_euclid(12) + 1) as u32);
        if let Some(year) = start.year {
            result.year = Some(year.checked_add(i32::try_from(total.div_euclid(12)).ok()?)?);
        }
    }
    Some(result)
}

/// Move the clock of `start` forward by the hours or minutes of `duration`.
///
/// Hours past 23 wrap, and the whole days carried spill into the full date
/// when present, else into the weekday. Minutes past 59 carry a single hour.
/// A dated start without a clock counts from midnight.
///
/// As with [`timex_date_add`], a shift that cannot be represented returns
/// `start` unchanged.
pub fn timex_time_add(start: &Timex, duration: &Timex) -> Timex {
    shift_time(start, duration).unwrap_or_else(|| start.clone())
}

fn clock_or_midnight(timex: &Timex) -> Option<Time> {
    let dated = timex.date().is_some() || timex.day_of_week.is_some();
    timex.time().or_else(|| dated.then(Time::default))
}

fn shift_time(start: &Timex, duration: &Timex) -> Option<Timex> {
    let mut result = start.clone();

    let hours = whole(duration.hours);
    if hours != 0 {
        let Some(clock) = clock_or_midnight(start) else {
            return Some(result);
        };
        let total = (clock.hour as i64).checked_add(hours)?;
        result.set_time(Some(clock));
        if (0..=23).contains(&total) {
            result.set_hour(Some(total as u32));
            return Some(result);
        }

        let days = total.div_euclid(24);
        result.set_hour(Some(total.rem_euclid(24) as u32));
        if let Some(d) = start.date() {
            let d = d.checked_add_signed(TimeDelta::try_days(days)?)?;
            result.year = Some(d.year());
            result.month = Some(d.month());
            result.day_of_month = Some(d.day());
        } else if let Some(dow) = start.day_of_week {
            result.day_of_week = Some(shift_day_of_week(dow, days));
        }
        return Some(result);
    }

    let minutes = whole(duration.minutes);
    if minutes != 0 {
        let Some(clock) = clock_or_midnight(start) else {
            return Some(result);
        };
        let total = (clock.minute as i64).checked_add(minutes)?;
        let (hour, minute) = if total > 59 {
            (clock.hour + 1, total - 60)
        } else {
            (clock.hour, total)
        };
        result.set_time(Some(Time::new(hour, u32::try_from(minute).ok()?, clock.second)));
    }
    Some(result)
}

/// Date addition followed by time addition.
pub fn timex_datetime_add(start: &Timex, duration: &Timex) -> Timex {
    timex_time_add(&timex_date_add(start, duration), duration)
}

/// A copy of `timex` with every duration field cleared.
pub fn clone_datetime(timex: &Timex) -> Timex {
    Timex {
        years: None,
        months: None,
        weeks: None,
        days: None,
        hours: None,
        minutes: None,
        seconds: None,
        ..timex.clone()
    }
}

/// A copy holding only the duration fields of `timex`.
pub fn clone_duration(timex: &Timex) -> Timex {
    Timex {
        years: timex.years,
        months: timex.months,
        weeks: timex.weeks,
        days: timex.days,
        hours: timex.hours,
        minutes: timex.minutes,
        seconds: timex.seconds,
        ..Default::default()
    }
}

/// The full calendar date of `timex`, if year, month and day are all set.
pub fn date_from_timex(timex: &Timex) -> Option<NaiveDate> {
    timex.date()
}

/// The clock fields of `timex`, midnight when unset.
pub fn time_from_timex(timex: &Timex) -> Time {
    timex.time().unwrap_or_default()
}

/// The concrete date span of a date-range timex, if it pins down real dates.
pub fn date_range_from_timex(timex: &Timex) -> Option<DateRange> {
    let range = expand_datetime_range(timex);
    Some(DateRange::new(
        date_from_timex(&range.start)?,
        date_from_timex(&range.end)?,
    ))
}

/// The concrete clock span of a time-range timex.
///
/// Unlike [`timex_time_add`], the end does not wrap at midnight: the `night`
/// window ends at `24:00:00`.
pub fn time_range_from_timex(timex: &Timex) -> Option<TimeRange> {
    if !timex.types().contains(TimexType::TimeRange) {
        return None;
    }
    let range = expand_time_range(timex);
    let start = range.start.time()?;
    let end = start.to_millis().checked_add(duration_millis(&range.duration)?)?;
    let end = Time::from_millis(end);
    Some(TimeRange::new(start, end))
}

/// Clock length of a duration in milliseconds, or `None` when it does not
/// fit.
fn duration_millis(duration: &Timex) -> Option<u64> {
    [
        (duration.hours, 3_600_000),
        (duration.minutes, 60_000),
        (duration.seconds, 1_000),
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, |total, (amount, per_unit)| {
        total.checked_add(amount.unwrap_or_default().checked_mul(Decimal::from(per_unit))?)
    })?
    .trunc()
    .to_u64()
}
