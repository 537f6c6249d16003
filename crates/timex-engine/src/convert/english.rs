//! English phrases for timex values.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::NaturalLanguageRenderer;
use crate::date_helpers;
use crate::error::{Result, TimexError};
use crate::helpers;
use crate::inference::TimexType;
use crate::timex::{PartOfDay, Season, Timex, TimexSet};

const DAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKS: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

fn season_name(season: Season) -> &'static str {
    match season {
        Season::Spring => "spring",
        Season::Summer => "summer",
        Season::Fall => "fall",
        Season::Winter => "winter",
    }
}

fn part_of_day_name(part: PartOfDay) -> &'static str {
    match part {
        PartOfDay::Daytime => "daytime",
        PartOfDay::Night => "night",
        PartOfDay::Morning => "morning",
        PartOfDay::Afternoon => "afternoon",
        PartOfDay::Evening => "evening",
    }
}

fn lookup(table: &[&'static str], one_based: u32) -> &'static str {
    one_based
        .checked_sub(1)
        .and_then(|i| table.get(i as usize))
        .copied()
        .unwrap_or("")
}

fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// English renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl NaturalLanguageRenderer for English {
    fn render(&self, timex: &Timex) -> Result<String> {
        convert_timex(timex)
    }

    fn render_relative(&self, timex: &Timex, reference: NaiveDate) -> Result<String> {
        let types = timex.types();
        let relative = if types.contains(TimexType::DateTimeRange) {
            relative_datetime_range(timex, reference)
        } else if types.contains(TimexType::DateRange) {
            relative_date_range(timex, reference)
        } else if types.contains(TimexType::DateTime) && !timex.now {
            relative_date(timex, reference).map(|day| format!("{day} {}", convert_time(timex)))
        } else if types.contains(TimexType::Date) && !timex.now {
            relative_date(timex, reference)
        } else {
            None
        };
        match relative {
            Some(phrase) => Ok(phrase),
            None => convert_timex(timex),
        }
    }

    fn render_set(&self, set: &TimexSet) -> Result<String> {
        let timex = &set.timex;
        let types = timex.types();
        if types.len() == 1 && types.contains(TimexType::Duration) {
            return Ok(format!("every {}", convert_duration(timex, false)));
        }
        Ok(format!("every {}", convert_timex(timex)?))
    }
}

// ── absolute ────────────────────────────────────────────────────────────────

fn convert_timex(timex: &Timex) -> Result<String> {
    let types = timex.types();
    if types.contains(TimexType::Present) {
        return Ok("now".to_string());
    }
    if types.contains(TimexType::Duration)
        && types.contains_any(&[
            TimexType::DateTimeRange,
            TimexType::DateRange,
            TimexType::TimeRange,
        ])
    {
        let range = helpers::expand_datetime_range(timex);
        return Ok(format!(
            "{} to {}",
            convert_timex(&range.start)?,
            convert_timex(&range.end)?
        ));
    }
    if types.contains(TimexType::DateTimeRange) {
        return Ok(convert_datetime_range(timex));
    }
    if types.contains(TimexType::DateRange) {
        return convert_date_range(timex);
    }
    if types.contains(TimexType::Duration) {
        return Ok(convert_duration(timex, true));
    }
    if types.contains(TimexType::TimeRange) {
        return Ok(convert_time_range(timex));
    }
    if types.contains(TimexType::DateTime) {
        return Ok(format!("{} {}", convert_time(timex), convert_date(timex)));
    }
    if types.contains(TimexType::Date) {
        return Ok(convert_date(timex));
    }
    if types.contains(TimexType::Time) {
        return Ok(convert_time(timex));
    }
    Ok(String::new())
}

fn convert_date(timex: &Timex) -> String {
    if let Some(dow) = timex.day_of_week {
        return lookup(&DAYS, dow).to_string();
    }
    let (Some(month), Some(day)) = (timex.month, timex.day_of_month) else {
        return String::new();
    };
    let date = format!("{day}{} {}", ordinal_suffix(day), lookup(&MONTHS, month));
    match timex.year {
        Some(year) => format!("{date} {year}"),
        None => date,
    }
}

fn convert_time(timex: &Timex) -> String {
    let Some(t) = timex.time() else {
        return String::new();
    };
    match (t.hour, t.minute, t.second) {
        (0, 0, 0) => return "midnight".to_string(),
        (12, 0, 0) => return "midday".to_string(),
        _ => {}
    }
    let hour = match t.hour {
        0 => 12,
        h if h > 12 => h - 12,
        h => h,
    };
    let period = if t.hour < 12 { "AM" } else { "PM" };
    match (t.minute, t.second) {
        (0, 0) => format!("{hour}{period}"),
        (m, 0) => format!("{hour}:{m:02}{period}"),
        (m, s) => format!("{hour}:{m:02}:{s:02}{period}"),
    }
}

fn convert_duration(timex: &Timex, include_single_count: bool) -> String {
    let units = [
        (timex.years, "year"),
        (timex.months, "month"),
        (timex.weeks, "week"),
        (timex.days, "day"),
        (timex.hours, "hour"),
        (timex.minutes, "minute"),
        (timex.seconds, "second"),
    ];
    units
        .into_iter()
        .find_map(|(amount, unit)| {
            amount.map(|a| match (a == Decimal::ONE, include_single_count) {
                (true, true) => format!("1 {unit}"),
                (true, false) => unit.to_string(),
                (false, _) => format!("{a} {unit}s"),
            })
        })
        .unwrap_or_default()
}

fn convert_time_range(timex: &Timex) -> String {
    timex
        .part_of_day
        .map(part_of_day_name)
        .unwrap_or_default()
        .to_string()
}

fn convert_datetime_range(timex: &Timex) -> String {
    match timex.part_of_day {
        Some(part) => format!("{} {}", convert_date(timex), part_of_day_name(part)),
        None => String::new(),
    }
}

fn convert_date_range(timex: &Timex) -> Result<String> {
    let year = timex.year.map(|y| y.to_string()).unwrap_or_default();

    if let Some(week) = timex.week_of_year {
        if timex.weekend {
            return Err(TimexError::Unsupported(format!(
                "English phrase for the weekend of week {week}"
            )));
        }
        return Ok(format!("week {week} {year}").trim_end().to_string());
    }
    if let Some(month) = timex.month {
        let month_name = lookup(&MONTHS, month);
        return Ok(match (timex.week_of_month, timex.day_of_week) {
            (Some(week), Some(dow)) => format!(
                "{} {} of {month_name}",
                lookup(&WEEKS, week),
                lookup(&DAYS, dow)
            ),
            (Some(week), None) => format!("{} week of {month_name}", lookup(&WEEKS, week)),
            _ => format!("{month_name} {year}").trim_end().to_string(),
        });
    }
    let season = timex.season.map(season_name).unwrap_or_default();
    Ok(format!("{season} {year}").trim().to_string())
}

// ── relative ────────────────────────────────────────────────────────────────

fn day_name(date: NaiveDate) -> &'static str {
    DAYS[date.weekday().num_days_from_monday() as usize]
}

fn relative_date(timex: &Timex, reference: NaiveDate) -> Option<String> {
    let date = timex.date()?;
    let phrase = if date == reference {
        "today".to_string()
    } else if date == date_helpers::tomorrow(reference) {
        "tomorrow".to_string()
    } else if date == date_helpers::yesterday(reference) {
        "yesterday".to_string()
    } else if date_helpers::is_this_week(date, reference) {
        format!("this {}", day_name(date))
    } else if date_helpers::is_next_week(date, reference) {
        format!("next {}", day_name(date))
    } else if date_helpers::is_last_week(date, reference) {
        format!("last {}", day_name(date))
    } else {
        return None;
    };
    Some(phrase)
}

fn relative_offset(target: i64, current: i64) -> Option<&'static str> {
    match target - current {
        0 => Some("this"),
        1 => Some("next"),
        -1 => Some("last"),
        _ => None,
    }
}

fn relative_date_range(timex: &Timex, reference: NaiveDate) -> Option<String> {
    let year = timex.year?;
    let year_offset = relative_offset(year as i64, reference.year() as i64)?;

    if year_offset == "this" {
        if let Some(week) = timex.week_of_year {
            let which = relative_offset(week as i64, date_helpers::week_of_year(reference) as i64)?;
            let span = if timex.weekend { "weekend" } else { "week" };
            return Some(format!("{which} {span}"));
        }
        if let Some(month) = timex.month {
            let which = relative_offset(month as i64, reference.month() as i64)?;
            return Some(format!("{which} month"));
        }
    } else if timex.week_of_year.is_some() || timex.month.is_some() {
        return None;
    }

    Some(match timex.season {
        Some(season) => format!("{} {year_offset} year", season_name(season)),
        None => format!("{year_offset} year"),
    })
}

fn relative_datetime_range(timex: &Timex, reference: NaiveDate) -> Option<String> {
    let date = timex.date()?;
    let part = timex.part_of_day?;
    let name = part_of_day_name(part);

    if date == reference {
        return Some(match part {
            PartOfDay::Night => "tonight".to_string(),
            _ => format!("this {name}"),
        });
    }
    if date == date_helpers::tomorrow(reference) {
        return Some(format!("tomorrow {name}"));
    }
    if date == date_helpers::yesterday(reference) {
        return Some(format!("yesterday {name}"));
    }
    if date_helpers::is_next_week(date, reference) {
        return Some(format!("next {} {name}", day_name(date)));
    }
    if date_helpers::is_last_week(date, reference) {
        return Some(format!("last {} {name}", day_name(date)));
    }
    None
}
