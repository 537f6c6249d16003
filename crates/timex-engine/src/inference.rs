//! Type inference: which semantic categories a [`Timex`] belongs to.
//!
//! The categories overlap (a full date is both `definite` and `date`), so the
//! result is a set. Base tags come straight from populated fields; composite
//! tags are layered on in a single ordered pass where each rule only reads
//! tags added before it.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::timex::Timex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimexType {
    Present,
    Definite,
    Date,
    DateRange,
    Duration,
    Time,
    TimeRange,
    DateTime,
    DateTimeRange,
}

impl TimexType {
    /// The lowercase tag name, as used in resolution entries.
    pub fn as_str(self) -> &'static str {
        match self {
            TimexType::Present => "present",
            TimexType::Definite => "definite",
            TimexType::Date => "date",
            TimexType::DateRange => "daterange",
            TimexType::Duration => "duration",
            TimexType::Time => "time",
            TimexType::TimeRange => "timerange",
            TimexType::DateTime => "datetime",
            TimexType::DateTimeRange => "datetimerange",
        }
    }
}

impl fmt::Display for TimexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of [`TimexType`] tags that apply to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimexTypes(BTreeSet<TimexType>);

impl TimexTypes {
    pub fn contains(&self, t: TimexType) -> bool {
        self.0.contains(&t)
    }

    /// Whether every tag in `types` is present.
    pub fn contains_all(&self, types: &[TimexType]) -> bool {
        types.iter().all(|t| self.0.contains(t))
    }

    /// Whether at least one tag in `types` is present.
    pub fn contains_any(&self, types: &[TimexType]) -> bool {
        types.iter().any(|t| self.0.contains(t))
    }

    pub fn insert(&mut self, t: TimexType) {
        self.0.insert(t);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TimexType> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<TimexType> for TimexTypes {
    fn from_iter<I: IntoIterator<Item = TimexType>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Compute the type set of `timex` from its populated fields.
pub fn infer(timex: &Timex) -> TimexTypes {
    use TimexType::*;

    let mut types = TimexTypes::default();

    if timex.now {
        types.insert(Present);
    }
    if is_definite(timex) {
        types.insert(Definite);
    }
    if is_date(timex) {
        types.insert(Date);
    }
    if is_date_range(timex) {
        types.insert(DateRange);
    }
    if timex.has_duration() {
        types.insert(Duration);
    }
    if timex.time().is_some() {
        types.insert(Time);
    }
    if timex.part_of_day.is_some() {
        types.insert(TimeRange);
    }

    let derived: [(&[TimexType], TimexType); 7] = [
        (&[Present], Date),
        (&[Present], Time),
        (&[Time, Duration], TimeRange),
        (&[Date, Time], DateTime),
        (&[Date, Duration], DateRange),
        (&[DateTime, Duration], DateTimeRange),
        (&[Date, TimeRange], DateTimeRange),
    ];
    for (requires, adds) in derived {
        if types.contains_all(requires) {
            types.insert(adds);
        }
    }

    types
}

fn is_definite(timex: &Timex) -> bool {
    timex.year.is_some() && timex.month.is_some() && timex.day_of_month.is_some()
}

fn is_date(timex: &Timex) -> bool {
    (timex.month.is_some() && timex.day_of_month.is_some()) || timex.day_of_week.is_some()
}

fn is_date_range(timex: &Timex) -> bool {
    let no_day = timex.day_of_month.is_none();
    (timex.year.is_some() && no_day)
        || (timex.month.is_some() && no_day)
        || timex.season.is_some()
        || timex.week_of_year.is_some()
        || timex.week_of_month.is_some()
}
