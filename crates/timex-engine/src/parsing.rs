//! TIMEX string grammar.
//!
//! Three shapes are recognized: `PRESENT_REF`, durations (`P...`), explicit
//! ranges `(start,end,duration)`, and date/time expressions split on the `T`
//! separator. Date and time patterns are tried in order and the first match
//! wins; their named groups are copied onto the [`Timex`] by
//! [`assign_properties`].

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::timex::{PartOfDay, Season, Timex};

pub(crate) const PRESENT_REF: &str = "PRESENT_REF";

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("invalid TIMEX pattern"))
        .collect()
}

// Order matters: earlier patterns win when several would match.
static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^(?P<year>\d{4})-(?P<month>\d{2})-(?P<day_of_month>\d{2})$",
        r"^XXXX-WXX-(?P<day_of_week>\d)$",
        r"^XXXX-(?P<month>\d{2})-(?P<day_of_month>\d{2})$",
        r"^(?P<year>\d{4})$",
        r"^(?P<year>\d{4})-(?P<month>\d{2})$",
        r"^(?P<season>SP|SU|FA|WI)$",
        r"^(?P<year>\d{4})-(?P<season>SP|SU|FA|WI)$",
        r"^(?P<year>\d{4})-W(?P<week_of_year>\d{2})$",
        r"^(?P<year>\d{4})-W(?P<week_of_year>\d{2})-(?P<weekend>WE)$",
        r"^XXXX-(?P<month>\d{2})$",
        r"^XXXX-(?P<month>\d{2})-W(?P<week_of_month>\d{2})$",
        r"^XXXX-(?P<month>\d{2})-WXX-(?P<week_of_month>\d{1,2})-(?P<day_of_week>\d)$",
    ])
});

static TIME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^T(?P<hour>\d{2})$",
        r"^T(?P<hour>\d{2}):(?P<minute>\d{2})$",
        r"^T(?P<hour>\d{2}):(?P<minute>\d{2}):(?P<second>\d{2})$",
        r"^T(?P<part_of_day>DT|NI|MO|AF|EV)$",
    ])
});

static DURATION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"^P(?P<amount>\d*\.?\d+)(?P<date_unit>Y|M|W|D)$",
        r"^PT(?P<amount>\d*\.?\d+)(?P<time_unit>H|M|S)$",
    ])
});

/// Parse `timex` into a value. The flag reports whether every part of the
/// input was recognized; unrecognized parts leave their fields unset.
pub(crate) fn parse(timex: &str) -> (Timex, bool) {
    let s = timex.trim();
    let mut result = Timex::default();

    let recognized = if s == PRESENT_REF {
        result.now = true;
        true
    } else if s.starts_with('P') {
        extract_duration(s, &mut result)
    } else if let Some(inner) = s.strip_prefix('(').and_then(|r| r.strip_suffix(')')) {
        extract_range(inner, &mut result)
    } else {
        extract_date_time(s, &mut result)
    };

    if !recognized {
        tracing::debug!(timex = %s, "unrecognized timex");
    }
    (result, recognized)
}

/// `start,end,duration`: the start point and the duration define the range.
/// The end point must parse but contributes no fields.
fn extract_range(inner: &str, timex: &mut Timex) -> bool {
    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let [start, end, duration] = parts.as_slice() else {
        return false;
    };

    let start_ok = extract_date_time(start, timex);
    let duration_ok = extract_duration(duration, timex);
    let end_ok = extract_date_time(end, &mut Timex::default());

    start_ok && end_ok && duration_ok
}

fn extract_date_time(s: &str, timex: &mut Timex) -> bool {
    match s.find('T') {
        None => extract_with(&DATE_PATTERNS, s, timex),
        Some(idx) => {
            let (date, time) = s.split_at(idx);
            let date_ok = date.is_empty() || extract_with(&DATE_PATTERNS, date, timex);
            let time_ok = extract_with(&TIME_PATTERNS, time, timex);
            date_ok && time_ok
        }
    }
}

fn extract_duration(s: &str, timex: &mut Timex) -> bool {
    extract_with(&DURATION_PATTERNS, s, timex)
}

fn extract_with(patterns: &[Regex], s: &str, timex: &mut Timex) -> bool {
    for re in patterns {
        if let Some(caps) = re.captures(s) {
            let properties: HashMap<&str, &str> = re
                .capture_names()
                .flatten()
                .filter_map(|name| caps.name(name).map(|m| (name, m.as_str())))
                .collect();
            assign_properties(timex, &properties);
            return true;
        }
    }
    false
}

/// Copy named string properties onto typed fields. Unknown names are ignored.
pub(crate) fn assign_properties(timex: &mut Timex, properties: &HashMap<&str, &str>) {
    for (&name, &value) in properties {
        match name {
            "year" => timex.year = value.parse().ok(),
            "month" => timex.month = value.parse().ok(),
            "day_of_month" => timex.day_of_month = value.parse().ok(),
            "day_of_week" => timex.day_of_week = value.parse().ok(),
            "week_of_year" => timex.week_of_year = value.parse().ok(),
            "week_of_month" => timex.week_of_month = value.parse().ok(),
            "season" => timex.season = Season::from_code(value),
            "weekend" => timex.weekend = true,
            "hour" => timex.set_hour(value.parse().ok()),
            "minute" => timex.set_minute(value.parse().ok()),
            "second" => timex.set_second(value.parse().ok()),
            "part_of_day" => timex.part_of_day = PartOfDay::from_code(value),
            _ => {}
        }
    }

    if let Some(amount) = properties
        .get("amount")
        .and_then(|a| a.parse::<Decimal>().ok())
    {
        let field = match (properties.get("date_unit"), properties.get("time_unit")) {
            (Some(&"Y"), _) => &mut timex.years,
            (Some(&"M"), _) => &mut timex.months,
            (Some(&"W"), _) => &mut timex.weeks,
            (Some(&"D"), _) => &mut timex.days,
            (_, Some(&"H")) => &mut timex.hours,
            (_, Some(&"M")) => &mut timex.minutes,
            (_, Some(&"S")) => &mut timex.seconds,
            _ => return,
        };
        *field = Some(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::TimexType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ── dates ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_full_date() {
        let t = Timex::parse("2017-05-29");
        assert_eq!(t.year, Some(2017));
        assert_eq!(t.month, Some(5));
        assert_eq!(t.day_of_month, Some(29));
        assert!(t.types().contains_all(&[TimexType::Definite, TimexType::Date]));
        assert_eq!(t.types().len(), 2);
    }

    #[test]
    fn test_parse_day_of_week() {
        let t = Timex::parse("XXXX-WXX-3");
        assert_eq!(t.day_of_week, Some(3));
        assert!(t.types().contains(TimexType::Date));
        assert_eq!(t.types().len(), 1);
    }

    #[test]
    fn test_parse_month_and_day_without_year() {
        let t = Timex::parse("XXXX-12-05");
        assert_eq!(t.year, None);
        assert_eq!(t.month, Some(12));
        assert_eq!(t.day_of_month, Some(5));
    }

    #[test]
    fn test_parse_year_week_weekend() {
        let t = Timex::parse("2017-W37-WE");
        assert_eq!(t.year, Some(2017));
        assert_eq!(t.week_of_year, Some(37));
        assert!(t.weekend);
    }

    #[test]
    fn test_parse_seasons() {
        assert_eq!(Timex::parse("SU").season, Some(Season::Summer));
        let t = Timex::parse("2016-WI");
        assert_eq!(t.year, Some(2016));
        assert_eq!(t.season, Some(Season::Winter));
    }

    #[test]
    fn test_parse_month_week_patterns() {
        let t = Timex::parse("XXXX-05-W02");
        assert_eq!(t.month, Some(5));
        assert_eq!(t.week_of_month, Some(2));
        assert_eq!(t.day_of_week, None);

        let t = Timex::parse("XXXX-05-WXX-1-1");
        assert_eq!(t.month, Some(5));
        assert_eq!(t.week_of_month, Some(1));
        assert_eq!(t.day_of_week, Some(1));
    }

    // ── times ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_times() {
        let t = Timex::parse("T17");
        assert_eq!((t.hour(), t.minute(), t.second()), (Some(17), Some(0), Some(0)));
        let t = Timex::parse("T17:30:05");
        assert_eq!((t.hour(), t.minute(), t.second()), (Some(17), Some(30), Some(5)));
    }

    #[test]
    fn test_parse_part_of_day() {
        let t = Timex::parse("TMO");
        assert_eq!(t.part_of_day, Some(PartOfDay::Morning));
        assert!(t.time().is_none());
    }

    #[test]
    fn test_parse_date_and_time() {
        let t = Timex::parse("XXXX-WXX-3T10:30");
        assert_eq!(t.day_of_week, Some(3));
        assert_eq!(t.hour(), Some(10));
        assert_eq!(t.minute(), Some(30));
    }

    // ── durations and ranges ────────────────────────────────────────────

    #[test]
    fn test_parse_present_ref() {
        let t = Timex::parse("PRESENT_REF");
        assert!(t.now);
        assert!(!t.has_duration());
    }

    #[test]
    fn test_parse_fractional_weeks_exactly() {
        let t = Timex::parse("P2.5W");
        assert_eq!(t.weeks, Some(dec("2.5")));
        assert_eq!(t.days, None);
    }

    #[test]
    fn test_parse_minutes_vs_months() {
        assert_eq!(Timex::parse("PT30M").minutes, Some(dec("30")));
        assert_eq!(Timex::parse("P30M").months, Some(dec("30")));
    }

    #[test]
    fn test_parse_explicit_range() {
        let t = Timex::parse("(XXXX-WXX-3,XXXX-WXX-6,P3D)");
        assert_eq!(t.day_of_week, Some(3));
        assert_eq!(t.days, Some(dec("3")));
    }

    #[test]
    fn test_parse_range_keeps_start_time() {
        let t = Timex::parse("(T09,T12,PT3H)");
        assert_eq!(t.hour(), Some(9));
        assert_eq!(t.hours, Some(dec("3")));
    }

    #[test]
    fn test_parse_range_takes_no_fields_from_end_point() {
        let t = Timex::parse("(2017-05-29,2017-05-29T12,PT12H)");
        assert_eq!(t.time(), None);
        assert_eq!(t.day_of_month, Some(29));
        assert_eq!(t.hours, Some(dec("12")));
        assert_eq!(t.timex_value(), "(2017-05-29,2017-05-29T12,PT12H)");
    }

    #[test]
    fn test_parse_range_with_bad_end_point_is_unrecognized() {
        let (_, ok) = parse("(2017-05-29,bogus,P3D)");
        assert!(!ok);
    }

    #[test]
    fn test_parse_range_with_wrong_arity_is_unrecognized() {
        let (_, ok) = parse("(T09,PT3H)");
        assert!(!ok);
    }

    #[test]
    fn test_assign_properties_ignores_unknown_names() {
        let mut t = Timex::default();
        let props = HashMap::from([("colour", "blue"), ("year", "1999")]);
        assign_properties(&mut t, &props);
        assert_eq!(t.year, Some(1999));
    }
}
