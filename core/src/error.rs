use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ReportError {
    #[error("Invalid date range: end {end} is before begin {begin}")]
    InvalidRange { begin: NaiveDate, end: NaiveDate },

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Could not parse date: {0}")]
    InvalidDate(String),

    #[error("Unknown key: '{0}'")]
    UnknownKey(String),

    #[error("Ambiguous key: '{key}' matches {candidates:?}")]
    AmbiguousKey { key: String, candidates: Vec<String> },
}
