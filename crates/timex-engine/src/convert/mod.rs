//! Natural-language rendering of timex values.
//!
//! Each language implements [`NaturalLanguageRenderer`]; callers pick the
//! renderer and pass it to [`Timex::to_natural_language`] and friends.

mod english;

pub use english::English;

use chrono::NaiveDate;

use crate::error::Result;
use crate::timex::{Timex, TimexSet};

/// A language that timex values can be rendered in.
///
/// # Errors
///
/// Implementations return [`TimexError::Unsupported`](crate::TimexError::Unsupported)
/// for values they have no phrase for.
pub trait NaturalLanguageRenderer {
    /// An absolute phrase ("29th May 2017", "5:30PM", "45 seconds").
    fn render(&self, timex: &Timex) -> Result<String>;

    /// A phrase relative to `reference` where one applies ("tomorrow",
    /// "next week"), else the absolute phrase.
    fn render_relative(&self, timex: &Timex, reference: NaiveDate) -> Result<String>;

    /// A recurring phrase ("every Tuesday", "every 2 weeks").
    fn render_set(&self, set: &TimexSet) -> Result<String>;
}
