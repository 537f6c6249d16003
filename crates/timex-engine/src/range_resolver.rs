//! Narrowing candidate timexes by constraint timexes.
//!
//! [`TimexRangeResolver::evaluate`] runs the candidates through four stages,
//! each consuming the TIMEX strings the previous one produced:
//!
//! 1. bare durations are anchored to every point-in-time constraint
//! 2. dates are placed inside the intersected date-range constraints
//! 3. dates without a clock take each explicit time constraint
//! 4. times and time ranges are filtered by the intersected time-range
//!    constraints
//!
//! A stage with no applicable constraints passes its input through. Every
//! stage drops repeated strings, keeping the first occurrence.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::date_helpers;
use crate::helpers;
use crate::inference::{TimexType, TimexTypes};
use crate::range::{self, DateRange, Interval, TimeRange};
use crate::time::Time;
use crate::timex::Timex;

/// Narrows ambiguous candidates down to the values consistent with a set of
/// constraints.
///
/// Constraints may be date ranges (`(2021-06-01,2021-06-08,P7D)`, `2021-06`),
/// time ranges (`(T09,T12,PT3H)`, `TMO`), or point times (`T16`,
/// `2017-09-27T20`). Candidates are rewritten or dropped stage by stage:
/// bare durations are anchored to point times, yearless and weekday dates
/// are enumerated inside the date ranges, dates pick up the point times, and
/// clock values must fall inside the time ranges.
pub struct TimexRangeResolver;

impl TimexRangeResolver {
    /// Resolve `candidates` so they satisfy `constraints`.
    ///
    /// The result keeps first-seen order with duplicates removed. Input that
    /// does not parse, or a constraint without a concrete span, is skipped
    /// rather than failing the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use timex_engine::TimexRangeResolver;
    ///
    /// let result = TimexRangeResolver::evaluate(&["T10"], &["(T09,T12,PT3H)"]);
    /// assert_eq!(result.len(), 1);
    /// assert_eq!(result[0].timex_value(), "T10");
    /// ```
    pub fn evaluate<C, K>(candidates: &[C], constraints: &[K]) -> Vec<Timex>
    where
        C: AsRef<str>,
        K: AsRef<str>,
    {
        let constraints: Vec<Timex> = constraints
            .iter()
            .map(|c| Timex::parse(c.as_ref()))
            .collect();
        let candidates: Vec<String> = candidates.iter().map(|c| c.as_ref().to_string()).collect();

        let anchored = resolve_durations(candidates, &constraints);
        tracing::trace!(count = anchored.len(), "durations anchored");
        let dated = resolve_by_date_range_constraints(anchored, &constraints);
        tracing::trace!(count = dated.len(), "date ranges applied");
        let timed = resolve_by_time_constraints(dated, &constraints);
        tracing::trace!(count = timed.len(), "explicit times applied");
        let filtered = resolve_by_time_range_constraints(timed, &constraints);
        tracing::trace!(count = filtered.len(), "time ranges applied");

        filtered.iter().map(|s| Timex::parse(s)).collect()
    }
}

fn unique(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

fn is_bare_duration(types: &TimexTypes) -> bool {
    types.contains(TimexType::Duration) && types.len() == 1
}

/// A clock time that is a point, not a window.
fn is_point_time(types: &TimexTypes) -> bool {
    types.contains(TimexType::Time) && !types.contains(TimexType::TimeRange)
}

// ── stage 1: durations ──────────────────────────────────────────────────────

fn resolve_durations(candidates: Vec<String>, constraints: &[Timex]) -> Vec<String> {
    let mut results = Vec::new();
    for candidate in candidates {
        let timex = Timex::parse(&candidate);
        if !is_bare_duration(&timex.types()) {
            results.push(candidate);
            continue;
        }
        for constraint in constraints {
            let types = constraint.types();
            if !is_point_time(&types) {
                continue;
            }
            let anchored = if types.contains(TimexType::DateTime) {
                helpers::timex_datetime_add(constraint, &timex)
            } else {
                helpers::timex_time_add(constraint, &timex)
            };
            results.push(anchored.timex_value());
        }
    }
    unique(results)
}

// ── stage 2: date ranges ────────────────────────────────────────────────────

fn resolve_by_date_range_constraints(candidates: Vec<String>, constraints: &[Timex]) -> Vec<String> {
    let ranges: Vec<DateRange> = constraints
        .iter()
        .filter(|c| c.types().contains(TimexType::DateRange))
        .filter_map(|c| {
            let range = helpers::date_range_from_timex(c);
            if range.is_none() {
                tracing::debug!(constraint = %c, "date range constraint has no concrete span");
            }
            range
        })
        .collect();
    let collapsed = range::collapse(&ranges);
    if collapsed.is_empty() {
        return candidates;
    }

    let mut results = Vec::new();
    for candidate in &candidates {
        let timex = Timex::parse(candidate);
        for constraint in &collapsed {
            results.extend(resolve_date_against_constraint(&timex, constraint));
        }
    }
    unique(results)
}

fn resolve_date_against_constraint(timex: &Timex, constraint: &DateRange) -> Vec<String> {
    if let (Some(month), Some(day)) = (timex.month, timex.day_of_month) {
        let years = match timex.year {
            Some(year) => year..=year,
            None => constraint.start.year()..=constraint.end.year(),
        };
        return years
            .filter(|&year| {
                NaiveDate::from_ymd_opt(year, month, day)
                    .is_some_and(|date| constraint.contains(date))
            })
            .map(|year| Timex {
                year: Some(year),
                ..timex.clone()
            })
            .map(|t| t.timex_value())
            .collect();
    }

    if let Some(weekday) = timex.day_of_week.and_then(date_helpers::weekday_from_iso) {
        return date_helpers::dates_matching_day(weekday, constraint.start, constraint.end)
            .into_iter()
            .map(|date| Timex {
                day_of_week: None,
                ..with_date(timex, date)
            })
            .map(|t| t.timex_value())
            .collect();
    }

    vec![timex.timex_value()]
}

fn with_date(timex: &Timex, date: NaiveDate) -> Timex {
    let calendar = Timex::from_date(date);
    Timex {
        year: calendar.year,
        month: calendar.month,
        day_of_month: calendar.day_of_month,
        ..timex.clone()
    }
}

// ── stage 3: explicit times ─────────────────────────────────────────────────

fn resolve_by_time_constraints(candidates: Vec<String>, constraints: &[Timex]) -> Vec<String> {
    let times: Vec<Time> = constraints
        .iter()
        .filter(|c| is_point_time(&c.types()))
        .filter_map(Timex::time)
        .collect();
    if times.is_empty() {
        return candidates;
    }

    let mut results = Vec::new();
    for candidate in candidates {
        let timex = Timex::parse(&candidate);
        let types = timex.types();
        if types.contains(TimexType::Date) && !types.contains(TimexType::Time) {
            for &time in &times {
                let mut with_time = timex.clone();
                with_time.set_time(Some(time));
                results.push(with_time.timex_value());
            }
        } else {
            results.push(candidate);
        }
    }
    unique(results)
}

// ── stage 4: time ranges ────────────────────────────────────────────────────

fn resolve_by_time_range_constraints(candidates: Vec<String>, constraints: &[Timex]) -> Vec<String> {
    let ranges: Vec<TimeRange> = constraints
        .iter()
        .filter_map(helpers::time_range_from_timex)
        .collect();
    let collapsed = range::collapse(&ranges);
    if collapsed.is_empty() {
        return candidates;
    }

    let mut results = Vec::new();
    for candidate in candidates {
        let timex = Timex::parse(&candidate);
        let types = timex.types();
        if types.contains(TimexType::TimeRange) {
            results.extend(resolve_time_range(&timex, &collapsed));
        } else if let Some(time) = timex.time() {
            if collapsed.iter().any(|r| r.contains(time)) {
                results.push(candidate);
            }
        } else {
            tracing::trace!(candidate = %candidate, "dropped: no clock to test against time ranges");
        }
    }
    unique(results)
}

/// Rewrite a time-range candidate to the start of each constraint window it
/// overlaps.
fn resolve_time_range(timex: &Timex, constraints: &[TimeRange]) -> Vec<String> {
    let Some(candidate) = helpers::time_range_from_timex(timex) else {
        return Vec::new();
    };
    constraints
        .iter()
        .filter(|c| candidate.is_overlapping(c))
        .map(|c| {
            let start = candidate.start_point().max(c.start_point());
            let mut resolved = Timex {
                part_of_day: None,
                ..helpers::clone_datetime(timex)
            };
            resolved.set_time(Some(Time::from_millis(start)));
            resolved.timex_value()
        })
        .collect()
}
