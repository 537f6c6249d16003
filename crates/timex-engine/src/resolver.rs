//! Resolution of TIMEX strings into concrete values.
//!
//! Each input is parsed, typed, and handed to exactly one producer. Type
//! tags overlap, so producers are tried in a fixed priority order: composite
//! types before the single types they contain.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::date_helpers;
use crate::helpers;
use crate::inference::TimexType;
use crate::timex::{PartOfDay, Timex};
use crate::value::{TimexValue, NOT_RESOLVED};

/// One resolved value: either a single `value` or a `start`/`end` pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Entry {
    pub timex: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TimexType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Entry {
    fn value(kind: TimexType, value: String) -> Self {
        Self {
            kind: Some(kind),
            value: Some(value),
            ..Default::default()
        }
    }

    fn range(kind: TimexType, start: String, end: String) -> Self {
        Self {
            kind: Some(kind),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    fn not_resolved(kind: TimexType) -> Self {
        Self::value(kind, NOT_RESOLVED.to_string())
    }
}

/// Resolved entries for a batch of TIMEX strings, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Resolution {
    pub values: Vec<Entry>,
}

type Producer = fn(&Timex, NaiveDateTime) -> Vec<Entry>;

const PRODUCERS: &[(&[TimexType], Producer)] = &[
    (&[TimexType::DateTimeRange], resolve_datetime_range),
    (&[TimexType::Definite, TimexType::Time], resolve_definite_time),
    (
        &[TimexType::Definite, TimexType::DateRange],
        resolve_definite_daterange,
    ),
    (&[TimexType::DateRange], resolve_daterange),
    (&[TimexType::Definite], resolve_definite),
    (&[TimexType::TimeRange], resolve_timerange),
    (&[TimexType::DateTime], resolve_datetime),
    (&[TimexType::Duration], resolve_duration),
    (&[TimexType::Date], resolve_date),
    (&[TimexType::Time], resolve_time),
];

/// Turns TIMEX strings into concrete dates, times, datetimes and spans.
///
/// Values that name a single point resolve to one entry. Partially
/// specified values (a weekday, a month without a year) resolve to their
/// nearest occurrences before and after the reference date.
pub struct TimexResolver;

impl TimexResolver {
    /// Resolve every TIMEX string against `reference`, or against the local
    /// clock when no reference is given.
    ///
    /// Unresolvable input never aborts the batch: it yields an entry with
    /// only the `timex` set, or a `not resolved` placeholder.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use timex_engine::TimexResolver;
    ///
    /// let reference = NaiveDate::from_ymd_opt(2021, 6, 7).unwrap().and_hms_opt(0, 0, 0);
    /// let resolution = TimexResolver::resolve(&["2021-06"], reference);
    /// let entry = &resolution.values[0];
    /// assert_eq!(entry.start.as_deref(), Some("2021-06-01"));
    /// assert_eq!(entry.end.as_deref(), Some("2021-07-01"));
    /// ```
    pub fn resolve<S: AsRef<str>>(timexes: &[S], reference: Option<NaiveDateTime>) -> Resolution {
        let reference = reference.unwrap_or_else(|| Local::now().naive_local());
        let values = timexes
            .iter()
            .flat_map(|s| resolve_timex(s.as_ref(), reference))
            .collect();
        Resolution { values }
    }
}

fn resolve_timex(source: &str, reference: NaiveDateTime) -> Vec<Entry> {
    let timex = Timex::parse(source);
    let types = timex.types();

    let entries = match PRODUCERS
        .iter()
        .find(|(required, _)| types.contains_all(required))
    {
        Some((_, produce)) => produce(&timex, reference),
        None => {
            tracing::debug!(timex = %source, "no resolution for timex");
            vec![Entry::default()]
        }
    };

    entries
        .into_iter()
        .map(|entry| Entry {
            timex: source.to_string(),
            ..entry
        })
        .collect()
}

fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn part_of_day_window(part: PartOfDay) -> Option<(&'static str, &'static str)> {
    match part {
        PartOfDay::Morning => Some(("08:00:00", "12:00:00")),
        PartOfDay::Afternoon => Some(("12:00:00", "16:00:00")),
        PartOfDay::Evening => Some(("16:00:00", "20:00:00")),
        PartOfDay::Night => Some(("20:00:00", "24:00:00")),
        PartOfDay::Daytime => None,
    }
}

/// Most recent past occurrence of a partial date.
fn last_occurrence(timex: &Timex, reference: NaiveDate) -> Option<NaiveDate> {
    if let (Some(month), Some(day)) = (timex.month, timex.day_of_month) {
        return NaiveDate::from_ymd_opt(reference.year() - 1, month, day);
    }
    let weekday = date_helpers::weekday_from_iso(timex.day_of_week?)?;
    Some(date_helpers::date_of_last_day(weekday, reference))
}

/// Nearest future occurrence of a partial date.
fn next_occurrence(timex: &Timex, reference: NaiveDate) -> Option<NaiveDate> {
    if let (Some(month), Some(day)) = (timex.month, timex.day_of_month) {
        return NaiveDate::from_ymd_opt(reference.year(), month, day);
    }
    let weekday = date_helpers::weekday_from_iso(timex.day_of_week?)?;
    Some(date_helpers::date_of_next_day(weekday, reference))
}

/// The concrete dates a timex stands for: its own date when definite, else
/// the last and next occurrences around `reference`.
fn occurrences(timex: &Timex, reference: NaiveDate) -> Vec<NaiveDate> {
    if let Some(date) = timex.date() {
        return vec![date];
    }
    [
        last_occurrence(timex, reference),
        next_occurrence(timex, reference),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// `timex` with its calendar fields replaced by `date`.
fn on_date(timex: &Timex, date: NaiveDate) -> Timex {
    Timex {
        year: Some(date.year()),
        month: Some(date.month()),
        day_of_month: Some(date.day()),
        day_of_week: None,
        ..timex.clone()
    }
}

// ── producers ───────────────────────────────────────────────────────────────

fn resolve_datetime_range(timex: &Timex, reference: NaiveDateTime) -> Vec<Entry> {
    let dates = occurrences(timex, reference.date());
    if dates.is_empty() {
        return vec![Entry::not_resolved(TimexType::DateTimeRange)];
    }

    if let Some(part) = timex.part_of_day {
        let Some((start, end)) = part_of_day_window(part) else {
            return vec![Entry::not_resolved(TimexType::DateTimeRange)];
        };
        return dates
            .into_iter()
            .map(|d| {
                let date = date_string(d);
                Entry::range(
                    TimexType::DateTimeRange,
                    format!("{date} {start}"),
                    format!("{date} {end}"),
                )
            })
            .collect();
    }

    dates
        .into_iter()
        .map(|d| {
            let range = helpers::expand_datetime_range(&on_date(timex, d));
            Entry::range(
                TimexType::DateTimeRange,
                TimexValue::datetime_value(&range.start),
                TimexValue::datetime_value(&range.end),
            )
        })
        .collect()
}

fn resolve_definite_time(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    vec![Entry::value(
        TimexType::DateTime,
        TimexValue::datetime_value(timex),
    )]
}

fn resolve_definite_daterange(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    let range = helpers::expand_datetime_range(timex);
    vec![Entry::range(
        TimexType::DateRange,
        TimexValue::date_value(&range.start),
        TimexValue::date_value(&range.end),
    )]
}

fn resolve_daterange(timex: &Timex, reference: NaiveDateTime) -> Vec<Entry> {
    let month_range = |year: i32, month: u32| {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = helpers::first_of_next_month(start)?;
        Some(Entry::range(
            TimexType::DateRange,
            date_string(start),
            date_string(end),
        ))
    };

    let entries: Vec<Entry> = if timex.has_duration() {
        occurrences(timex, reference.date())
            .into_iter()
            .map(|d| {
                let range = helpers::expand_datetime_range(&on_date(timex, d));
                Entry::range(
                    TimexType::DateRange,
                    TimexValue::date_value(&range.start),
                    TimexValue::date_value(&range.end),
                )
            })
            .collect()
    } else if timex.season.is_some() {
        Vec::new()
    } else if let (Some(year), Some(month)) = (timex.year, timex.month) {
        month_range(year, month).into_iter().collect()
    } else if timex.year.is_some() && timex.week_of_year.is_some() {
        helpers::date_range_from_timex(timex)
            .map(|r| {
                Entry::range(
                    TimexType::DateRange,
                    date_string(r.start),
                    date_string(r.end),
                )
            })
            .into_iter()
            .collect()
    } else if let Some(month) = timex.month {
        let year = reference.year();
        [month_range(year - 1, month), month_range(year, month)]
            .into_iter()
            .flatten()
            .collect()
    } else if let Some(year) = timex.year {
        let start = NaiveDate::from_ymd_opt(year, 1, 1);
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1);
        start
            .zip(end)
            .map(|(s, e)| Entry::range(TimexType::DateRange, date_string(s), date_string(e)))
            .into_iter()
            .collect()
    } else {
        Vec::new()
    };

    if entries.is_empty() {
        vec![Entry::not_resolved(TimexType::DateRange)]
    } else {
        entries
    }
}

fn resolve_definite(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    vec![Entry::value(TimexType::Date, TimexValue::date_value(timex))]
}

fn resolve_timerange(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    if let Some(part) = timex.part_of_day {
        return match part_of_day_window(part) {
            Some((start, end)) => vec![Entry::range(
                TimexType::TimeRange,
                start.to_string(),
                end.to_string(),
            )],
            None => vec![Entry::not_resolved(TimexType::TimeRange)],
        };
    }
    let range = helpers::expand_time_range(timex);
    vec![Entry::range(
        TimexType::TimeRange,
        TimexValue::time_value(&range.start),
        TimexValue::time_value(&range.end),
    )]
}

fn resolve_datetime(timex: &Timex, reference: NaiveDateTime) -> Vec<Entry> {
    if timex.now {
        return vec![Entry::value(
            TimexType::DateTime,
            reference.format("%Y-%m-%d %H:%M:%S").to_string(),
        )];
    }
    let time = TimexValue::time_value(timex);
    let entries: Vec<Entry> = occurrences(timex, reference.date())
        .into_iter()
        .map(|d| Entry::value(TimexType::DateTime, format!("{} {time}", date_string(d))))
        .collect();
    if entries.is_empty() {
        vec![Entry::not_resolved(TimexType::DateTime)]
    } else {
        entries
    }
}

fn resolve_duration(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    vec![Entry::value(
        TimexType::Duration,
        TimexValue::duration_value(timex),
    )]
}

fn resolve_date(timex: &Timex, reference: NaiveDateTime) -> Vec<Entry> {
    let date = reference.date();
    let entries: Vec<Entry> = [last_occurrence(timex, date), next_occurrence(timex, date)]
        .into_iter()
        .flatten()
        .map(|d| Entry::value(TimexType::Date, date_string(d)))
        .collect();
    if entries.is_empty() {
        vec![Entry::not_resolved(TimexType::Date)]
    } else {
        entries
    }
}

fn resolve_time(timex: &Timex, _: NaiveDateTime) -> Vec<Entry> {
    vec![Entry::value(TimexType::Time, TimexValue::time_value(timex))]
}
