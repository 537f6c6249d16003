//! The partially specified temporal value at the center of the engine.
//!
//! Every field of a [`Timex`] is independently optional: `None` means
//! "unspecified", never zero. Which fields are populated decides the value's
//! semantic types (see [`crate::inference`]), so the type set is computed on
//! demand and never stored.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::convert::NaturalLanguageRenderer;
use crate::error::{Result, TimexError};
use crate::inference::{self, TimexTypes};
use crate::time::Time;
use crate::{format, parsing};

/// Meteorological season code used by TIMEX3 (`SP`, `SU`, `FA`, `WI`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// The two-letter TIMEX code, e.g. `SU` for summer.
    pub fn code(self) -> &'static str {
        match self {
            Season::Spring => "SP",
            Season::Summer => "SU",
            Season::Fall => "FA",
            Season::Winter => "WI",
        }
    }

    /// Inverse of [`Season::code`]; `None` for anything else.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "SP" => Some(Season::Spring),
            "SU" => Some(Season::Summer),
            "FA" => Some(Season::Fall),
            "WI" => Some(Season::Winter),
            _ => None,
        }
    }
}

/// A named time-of-day range (`DT`, `NI`, `MO`, `AF`, `EV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfDay {
    Daytime,
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl PartOfDay {
    /// The two-letter TIMEX code used after `T`, e.g. `MO` in `TMO`.
    pub fn code(self) -> &'static str {
        match self {
            PartOfDay::Daytime => "DT",
            PartOfDay::Night => "NI",
            PartOfDay::Morning => "MO",
            PartOfDay::Afternoon => "AF",
            PartOfDay::Evening => "EV",
        }
    }

    /// Inverse of [`PartOfDay::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DT" => Some(PartOfDay::Daytime),
            "NI" => Some(PartOfDay::Night),
            "MO" => Some(PartOfDay::Morning),
            "AF" => Some(PartOfDay::Afternoon),
            "EV" => Some(PartOfDay::Evening),
            _ => None,
        }
    }
}

/// A possibly partial date, time, duration, or range.
///
/// Duration amounts are exact decimals so fractional values such as the
/// `2.5` in `P2.5W` survive a parse/format cycle unchanged. A well-formed
/// duration sets exactly one of the seven duration fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timex {
    /// Reference to the present moment (`PRESENT_REF`).
    pub now: bool,

    pub years: Option<Decimal>,
    pub months: Option<Decimal>,
    pub weeks: Option<Decimal>,
    pub days: Option<Decimal>,
    pub hours: Option<Decimal>,
    pub minutes: Option<Decimal>,
    pub seconds: Option<Decimal>,

    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day_of_month: Option<u32>,
    /// ISO weekday, 1 = Monday through 7 = Sunday.
    pub day_of_week: Option<u32>,
    pub season: Option<Season>,
    pub week_of_year: Option<u32>,
    pub week_of_month: Option<u32>,
    pub weekend: bool,

    pub part_of_day: Option<PartOfDay>,

    pub(crate) time: Option<Time>,
}

impl Timex {
    /// Parse a TIMEX string. Unrecognized input yields a value with no
    /// fields set, which formats as the empty string.
    pub fn parse(timex: &str) -> Self {
        parsing::parse(timex).0
    }

    /// Like [`Timex::parse`], but reports input that no grammar branch
    /// recognizes.
    ///
    /// # Errors
    ///
    /// Returns [`TimexError::InvalidTimex`] if any part of the string (for a
    /// range: start, end or duration) does not match the grammar.
    ///
    /// # Examples
    ///
    /// ```
    /// use timex_engine::Timex;
    ///
    /// assert!(Timex::try_parse("XXXX-WXX-3").is_ok());
    /// assert!(Timex::try_parse("next tuesday").is_err());
    /// ```
    pub fn try_parse(timex: &str) -> Result<Self> {
        match parsing::parse(timex) {
            (parsed, true) => Ok(parsed),
            (_, false) => Err(TimexError::InvalidTimex(format!("'{timex}'"))),
        }
    }

    /// A definite date with no clock.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: Some(date.year()),
            month: Some(date.month()),
            day_of_month: Some(date.day()),
            ..Default::default()
        }
    }

    /// A definite date and clock time. Sub-second precision is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use timex_engine::Timex;
    ///
    /// let dt = NaiveDate::from_ymd_opt(2017, 5, 29).unwrap().and_hms_opt(16, 30, 0).unwrap();
    /// assert_eq!(Timex::from_date_time(dt).timex_value(), "2017-05-29T16:30");
    /// ```
    pub fn from_date_time(datetime: NaiveDateTime) -> Self {
        let mut timex = Self::from_date(datetime.date());
        timex.set_time(Some(datetime.time().into()));
        timex
    }

    /// A clock time with no date.
    pub fn from_time(time: Time) -> Self {
        let mut timex = Self::default();
        timex.set_time(Some(time));
        timex
    }

    // ── time of day ─────────────────────────────────────────────────────

    /// The clock fields, or `None` when no time of day is set.
    pub fn time(&self) -> Option<Time> {
        self.time
    }

    /// Replace or clear all three clock fields at once.
    pub fn set_time(&mut self, time: Option<Time>) {
        self.time = time;
    }

    /// The hour, if a time of day is set. Likewise [`Timex::minute`] and
    /// [`Timex::second`].
    pub fn hour(&self) -> Option<u32> {
        self.time.map(|t| t.hour)
    }

    pub fn minute(&self) -> Option<u32> {
        self.time.map(|t| t.minute)
    }

    pub fn second(&self) -> Option<u32> {
        self.time.map(|t| t.second)
    }

    /// Set the hour. Setting any clock field materializes the whole time of
    /// day (other fields default to zero); clearing any one clears all three.
    pub fn set_hour(&mut self, hour: Option<u32>) {
        self.update_time(hour, |t, v| t.hour = v);
    }

    /// See [`Timex::set_hour`].
    pub fn set_minute(&mut self, minute: Option<u32>) {
        self.update_time(minute, |t, v| t.minute = v);
    }

    /// See [`Timex::set_hour`].
    pub fn set_second(&mut self, second: Option<u32>) {
        self.update_time(second, |t, v| t.second = v);
    }

    fn update_time(&mut self, value: Option<u32>, apply: impl FnOnce(&mut Time, u32)) {
        match value {
            None => self.time = None,
            Some(v) => apply(self.time.get_or_insert_with(Time::default), v),
        }
    }

    // ── derived views ───────────────────────────────────────────────────

    /// The semantic types implied by the populated fields.
    pub fn types(&self) -> TimexTypes {
        inference::infer(self)
    }

    /// Whether any duration field carries a non-zero amount.
    pub fn has_duration(&self) -> bool {
        self.duration_fields()
            .into_iter()
            .any(|f| f.is_some_and(|v| !v.is_zero()))
    }

    pub(crate) fn duration_fields(&self) -> [Option<Decimal>; 7] {
        [
            self.years,
            self.months,
            self.weeks,
            self.days,
            self.hours,
            self.minutes,
            self.seconds,
        ]
    }

    /// The full calendar date, if year, month and day are all present and valid.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year?, self.month?, self.day_of_month?)
    }

    /// Canonical TIMEX string for this value.
    pub fn timex_value(&self) -> String {
        format::format(self)
    }

    /// Render this value as a phrase in the renderer's language.
    ///
    /// # Errors
    ///
    /// Returns [`TimexError::Unsupported`] when the renderer has no phrase
    /// for this value (in English, the weekend of a numbered week).
    ///
    /// # Examples
    ///
    /// ```
    /// use timex_engine::{English, Timex};
    ///
    /// assert_eq!(Timex::parse("PT45S").to_natural_language(&English).unwrap(), "45 seconds");
    /// ```
    pub fn to_natural_language(&self, renderer: &dyn NaturalLanguageRenderer) -> Result<String> {
        renderer.render(self)
    }

    /// Render this value as a phrase relative to `reference`
    /// ("tomorrow", "last week", ...).
    pub fn to_natural_language_relative(
        &self,
        renderer: &dyn NaturalLanguageRenderer,
        reference: NaiveDate,
    ) -> Result<String> {
        renderer.render_relative(self, reference)
    }
}

impl From<&str> for Timex {
    fn from(timex: &str) -> Self {
        Self::parse(timex)
    }
}

impl fmt::Display for Timex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.timex_value())
    }
}

/// A recurring [`Timex`] ("every Tuesday", "every 2 weeks").
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimexSet {
    pub timex: Timex,
}

impl TimexSet {
    /// A set recurring on `timex`.
    pub fn new(timex: Timex) -> Self {
        Self { timex }
    }

    /// Parse the recurring value; see [`Timex::parse`].
    pub fn parse(timex: &str) -> Self {
        Self::new(Timex::parse(timex))
    }

    /// Render as a recurring phrase ("every Tuesday").
    pub fn to_natural_language(&self, renderer: &dyn NaturalLanguageRenderer) -> Result<String> {
        renderer.render_set(self)
    }
}
