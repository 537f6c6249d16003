//! Property tests over parsing, formatting, inference and collapsing.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;
use timex_engine::{
    collapse, DateRange, Interval, PartOfDay, Time, TimeRange, Timex, TimexRangeResolver,
};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1990i32..2050, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn date_range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 1i64..60).prop_map(|(start, days)| DateRange::new(start, start + Duration::days(days)))
}

fn timex_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        date_strategy().prop_map(|d| d.format("%Y-%m-%d").to_string()),
        (1u32..=7).prop_map(|d| format!("XXXX-WXX-{d}")),
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| format!("XXXX-{m:02}-{d:02}")),
        (0u32..24).prop_map(|h| format!("T{h:02}")),
        (0u32..24, 1u32..60).prop_map(|(h, m)| format!("T{h:02}:{m:02}")),
        (0u32..24, 0u32..60, 1u32..60).prop_map(|(h, m, s)| format!("T{h:02}:{m:02}:{s:02}")),
        (date_strategy(), 0u32..24).prop_map(|(d, h)| format!("{}T{h:02}", d.format("%Y-%m-%d"))),
        (1u32..100).prop_map(|n| format!("P{n}D")),
        (1u32..100).prop_map(|n| format!("PT{n}M")),
        (1990i32..2050, 1u32..=52).prop_map(|(y, w)| format!("{y}-W{w:02}")),
        (1990i32..2050, 1u32..=12).prop_map(|(y, m)| format!("{y}-{m:02}")),
        Just("PRESENT_REF".to_string()),
        Just("TMO".to_string()),
    ]
}

fn ymd(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// A date-range constraint somewhere in 2021: start and length in days.
fn date_window_strategy() -> impl Strategy<Value = (NaiveDate, i64)> {
    (0i64..365, 1i64..45).prop_map(|(offset, days)| {
        (NaiveDate::from_ymd_opt(2021, 1, 1).unwrap() + Duration::days(offset), days)
    })
}

fn date_candidate_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (1u32..=7).prop_map(|d| format!("XXXX-WXX-{d}")),
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| format!("XXXX-{m:02}-{d:02}")),
        (1u32..=12, 1u32..=28).prop_map(|(m, d)| format!("2021-{m:02}-{d:02}")),
    ]
}

/// A clock window: start hour and length in hours, ending by 23:00.
fn time_window_strategy() -> impl Strategy<Value = (u32, u32)> {
    (0u32..12, 1u32..12)
}

fn time_candidate_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..24).prop_map(|h| format!("T{h:02}")),
        (0u32..24, 1u32..60).prop_map(|(h, m)| format!("T{h:02}:{m:02}")),
    ]
}

#[derive(Debug, Clone)]
enum Field {
    Year(i32),
    Month(u32),
    DayOfMonth(u32),
    DayOfWeek(u32),
    Hour(u32),
    Minute(u32),
    Days(u32),
    Hours(u32),
    PartOfDay(PartOfDay),
}

impl Field {
    fn apply(&self, timex: &mut Timex) {
        match *self {
            Field::Year(v) => timex.year = Some(v),
            Field::Month(v) => timex.month = Some(v),
            Field::DayOfMonth(v) => timex.day_of_month = Some(v),
            Field::DayOfWeek(v) => timex.day_of_week = Some(v),
            Field::Hour(v) => timex.set_hour(Some(v)),
            Field::Minute(v) => timex.set_minute(Some(v)),
            Field::Days(v) => timex.days = Some(Decimal::from(v)),
            Field::Hours(v) => timex.hours = Some(Decimal::from(v)),
            Field::PartOfDay(p) => timex.part_of_day = Some(p),
        }
    }
}

/// Distinct fields, each present or absent.
fn fields_strategy() -> impl Strategy<Value = Vec<Field>> {
    let part = prop_oneof![
        Just(PartOfDay::Morning),
        Just(PartOfDay::Afternoon),
        Just(PartOfDay::Night),
    ];
    (
        prop::option::of(1990i32..2050),
        prop::option::of(1u32..=12),
        prop::option::of(1u32..=28),
        prop::option::of(1u32..=7),
        prop::option::of(0u32..24),
        prop::option::of(0u32..60),
        prop::option::of(0u32..10),
        prop::option::of(0u32..10),
        prop::option::of(part),
    )
        .prop_map(|(y, mo, d, w, h, mi, days, hours, p)| {
            [
                y.map(Field::Year),
                mo.map(Field::Month),
                d.map(Field::DayOfMonth),
                w.map(Field::DayOfWeek),
                h.map(Field::Hour),
                mi.map(Field::Minute),
                days.map(Field::Days),
                hours.map(Field::Hours),
                p.map(Field::PartOfDay),
            ]
            .into_iter()
            .flatten()
            .collect()
        })
}

fn build(fields: &[Field]) -> Timex {
    let mut timex = Timex::default();
    for field in fields {
        field.apply(&mut timex);
    }
    timex
}

proptest! {
    #[test]
    fn prop_canonical_strings_round_trip(s in timex_string_strategy()) {
        prop_assert_eq!(Timex::parse(&s).timex_value(), s);
    }

    #[test]
    fn prop_inference_is_deterministic(s in timex_string_strategy()) {
        let t = Timex::parse(&s);
        prop_assert_eq!(t.types(), Timex::parse(&t.timex_value()).types());
    }

    #[test]
    fn prop_collapsed_ranges_never_overlap(ranges in prop::collection::vec(date_range_strategy(), 0..8)) {
        let collapsed = collapse(&ranges);
        for (i, a) in collapsed.iter().enumerate() {
            for b in &collapsed[i + 1..] {
                prop_assert!(!a.is_overlapping(b));
            }
        }
    }

    #[test]
    fn prop_collapse_is_idempotent(ranges in prop::collection::vec(date_range_strategy(), 0..8)) {
        let once = collapse(&ranges);
        prop_assert_eq!(collapse(&once), once);
    }

    #[test]
    fn prop_collapsed_ranges_lie_within_an_input(ranges in prop::collection::vec(date_range_strategy(), 1..8)) {
        for r in collapse(&ranges) {
            prop_assert!(r.start < r.end);
            prop_assert!(ranges.iter().any(|input| input.start <= r.start && r.end <= input.end));
        }
    }

    #[test]
    fn prop_evaluate_output_has_no_duplicates(days in prop::collection::vec(1u32..=7, 1..10)) {
        let candidates: Vec<String> = days.iter().map(|d| format!("XXXX-WXX-{d}")).collect();
        let result = TimexRangeResolver::evaluate(&candidates, &["(2021-06-01,2021-07-01,P30D)"]);
        let values: Vec<String> = result.iter().map(Timex::timex_value).collect();
        let mut deduped = values.clone();
        deduped.sort();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), values.len());
    }

    #[test]
    fn prop_inference_ignores_field_order(
        (fields, shuffled) in fields_strategy()
            .prop_flat_map(|f| (Just(f.clone()), Just(f).prop_shuffle()))
    ) {
        prop_assert_eq!(build(&fields).types(), build(&shuffled).types());
    }

    #[test]
    fn prop_resolved_dates_lie_in_collapsed_date_constraints(
        windows in prop::collection::vec(date_window_strategy(), 1..4),
        candidates in prop::collection::vec(date_candidate_strategy(), 1..6),
    ) {
        let ranges: Vec<DateRange> = windows
            .iter()
            .map(|&(start, days)| DateRange::new(start, start + Duration::days(days)))
            .collect();
        let constraints: Vec<String> = windows
            .iter()
            .map(|&(start, days)| {
                format!("({},{},P{days}D)", ymd(start), ymd(start + Duration::days(days)))
            })
            .collect();
        let collapsed = collapse(&ranges);

        for t in TimexRangeResolver::evaluate(&candidates, &constraints) {
            let date = t.date();
            prop_assert!(date.is_some(), "{} has no concrete date", t);
            let date = date.unwrap();
            prop_assert!(
                collapsed.iter().any(|r| r.contains(date)),
                "{} outside {:?}", date, collapsed
            );
        }
    }

    #[test]
    fn prop_resolved_times_lie_in_collapsed_time_constraints(
        windows in prop::collection::vec(time_window_strategy(), 1..4),
        candidates in prop::collection::vec(time_candidate_strategy(), 1..6),
    ) {
        let ranges: Vec<TimeRange> = windows
            .iter()
            .map(|&(start, hours)| TimeRange::new(Time::new(start, 0, 0), Time::new(start + hours, 0, 0)))
            .collect();
        let constraints: Vec<String> = windows
            .iter()
            .map(|&(start, hours)| format!("(T{start:02},T{:02},PT{hours}H)", start + hours))
            .collect();
        let collapsed = collapse(&ranges);

        for t in TimexRangeResolver::evaluate(&candidates, &constraints) {
            let time = t.time();
            prop_assert!(time.is_some(), "{} has no clock", t);
            let time = time.unwrap();
            prop_assert!(
                collapsed.iter().any(|r| r.contains(time)),
                "{} outside {:?}", time, collapsed
            );
        }
    }
}
