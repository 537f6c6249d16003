//! Canonical TIMEX rendering of a [`Timex`].
//!
//! The inferred type set picks the shape. Tags overlap, so the rules are an
//! ordered list and the first matching rule wins.

use crate::helpers;
use crate::inference::{TimexType, TimexTypes};
use crate::parsing::PRESENT_REF;
use crate::timex::Timex;

type Rule = (fn(&TimexTypes) -> bool, fn(&Timex) -> String);

const RULES: &[Rule] = &[
    (|t| t.contains(TimexType::Present), |_| PRESENT_REF.to_string()),
    (
        |t| {
            t.contains(TimexType::Duration)
                && t.contains_any(&[
                    TimexType::DateTimeRange,
                    TimexType::DateRange,
                    TimexType::TimeRange,
                ])
        },
        format_explicit_range,
    ),
    (
        |t| t.contains(TimexType::DateTimeRange),
        |x| format!("{}{}", format_date(x), format_time_range(x)),
    ),
    (|t| t.contains(TimexType::DateRange), format_date_range),
    (|t| t.contains(TimexType::TimeRange), format_time_range),
    (
        |t| t.contains(TimexType::DateTime),
        |x| format!("{}{}", format_date(x), format_time(x)),
    ),
    (|t| t.contains(TimexType::Duration), format_duration),
    (|t| t.contains(TimexType::Date), format_date),
    (|t| t.contains(TimexType::Time), format_time),
];

/// Render `timex` in TIMEX notation. Values with no recognizable type
/// render as the empty string.
pub fn format(timex: &Timex) -> String {
    let types = timex.types();
    RULES
        .iter()
        .find(|(applies, _)| applies(&types))
        .map(|(_, render)| render(timex))
        .unwrap_or_default()
}

fn format_explicit_range(timex: &Timex) -> String {
    let range = helpers::expand_datetime_range(timex);
    format!(
        "({},{},{})",
        format(&range.start),
        format(&range.end),
        format(&range.duration)
    )
}

fn format_duration(timex: &Timex) -> String {
    let units = [
        (timex.years, "P", "Y"),
        (timex.months, "P", "M"),
        (timex.weeks, "P", "W"),
        (timex.days, "P", "D"),
        (timex.hours, "PT", "H"),
        (timex.minutes, "PT", "M"),
        (timex.seconds, "PT", "S"),
    ];
    units
        .into_iter()
        .find_map(|(amount, prefix, unit)| amount.map(|a| format!("{prefix}{a}{unit}")))
        .unwrap_or_default()
}

fn format_time(timex: &Timex) -> String {
    let Some(t) = timex.time() else {
        return String::new();
    };
    match (t.minute, t.second) {
        (0, 0) => format!("T{:02}", t.hour),
        (m, 0) => format!("T{:02}:{:02}", t.hour, m),
        (m, s) => format!("T{:02}:{:02}:{:02}", t.hour, m, s),
    }
}

fn format_time_range(timex: &Timex) -> String {
    timex
        .part_of_day
        .map(|p| format!("T{}", p.code()))
        .unwrap_or_default()
}

fn format_date(timex: &Timex) -> String {
    match (timex.year, timex.month, timex.day_of_month, timex.day_of_week) {
        (Some(y), Some(m), Some(d), _) => format!("{y:04}-{m:02}-{d:02}"),
        (None, Some(m), Some(d), _) => format!("XXXX-{m:02}-{d:02}"),
        (_, _, _, Some(dow)) => format!("XXXX-WXX-{dow}"),
        _ => String::new(),
    }
}

fn format_date_range(timex: &Timex) -> String {
    let year = timex.year.map(|y| format!("{y:04}"));

    if let (Some(year), Some(week)) = (&year, timex.week_of_year) {
        let weekend = if timex.weekend { "-WE" } else { "" };
        return format!("{year}-W{week:02}{weekend}");
    }
    if let Some(season) = timex.season {
        return match &year {
            Some(year) => format!("{year}-{}", season.code()),
            None => season.code().to_string(),
        };
    }
    if let Some(month) = timex.month {
        let year = year.as_deref().unwrap_or("XXXX");
        return match (timex.week_of_month, timex.day_of_week) {
            (Some(week), Some(dow)) => format!("{year}-{month:02}-WXX-{week}-{dow}"),
            (Some(week), None) => format!("{year}-{month:02}-W{week:02}"),
            _ => format!("{year}-{month:02}"),
        };
    }
    year.unwrap_or_default()
}
