//! Error types for timex-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimexError {
    #[error("Invalid timex: {0}")]
    InvalidTimex(String),

    #[error("Not implemented: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, TimexError>;
