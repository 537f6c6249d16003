//! # timex-engine
//!
//! Parsing, arithmetic and resolution for TIMEX3 temporal expressions.
//!
//! A TIMEX3 string such as `2017-05-29T16:30`, `XXXX-WXX-3`, `PT2H` or
//! `(2017-05-29T10,2017-05-29T12,PT2H)` is a partially specified point,
//! range, duration or recurring period. This crate parses those strings into
//! a [`Timex`], infers what kind of value each one is, formats it back,
//! narrows ambiguous candidates against constraints, resolves them into
//! concrete values relative to a reference moment, and renders them as
//! English phrases.
//!
//! ## Modules
//!
//! - [`timex`]: the [`Timex`] value, its fields and constructors
//! - [`inference`]: semantic type inference ([`TimexType`])
//! - [`format`]: canonical TIMEX3 formatting
//! - [`helpers`]: range expansion and date/time arithmetic on timex values
//! - [`range`]: half-open date and time ranges and overlap collapsing
//! - [`range_resolver`]: candidate narrowing against constraints
//! - [`resolver`]: concrete values relative to a reference moment
//! - [`creator`]: builders for common expressions ("today", "next week")
//! - [`value`]: plain string renderings of dates, times and durations
//! - [`date_helpers`]: calendar utilities on `chrono` dates
//! - [`convert`]: natural-language renderers ([`English`])
//! - [`time`]: clock time of day
//! - [`error`]: error types

pub mod convert;
pub mod creator;
pub mod date_helpers;
pub mod error;
pub mod format;
pub mod helpers;
pub mod inference;
mod parsing;
pub mod range;
pub mod range_resolver;
pub mod resolver;
pub mod time;
pub mod timex;
pub mod value;

pub use convert::{English, NaturalLanguageRenderer};
pub use creator::TimexCreator;
pub use error::TimexError;
pub use helpers::TimexRange;
pub use inference::{TimexType, TimexTypes};
pub use range::{collapse, DateRange, Interval, TimeRange};
pub use range_resolver::TimexRangeResolver;
pub use resolver::{Entry, Resolution, TimexResolver};
pub use time::Time;
pub use timex::{PartOfDay, Season, Timex, TimexSet};
pub use value::TimexValue;
