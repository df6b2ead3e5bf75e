//! Error types for date parsing and month validation.

use thiserror::Error;

/// A day's date string is not a valid `YYYY-MM-DD` calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date {date:?}")]
pub struct ParseError {
    pub date: String,
    #[source]
    pub source: chrono::ParseError,
}

/// A month is well-formed date-wise but cannot be laid out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("month has no days")]
    EmptyMonth,

    /// `date` is not after `previous` (includes duplicates).
    #[error("{date} does not follow {previous}")]
    NotAscending { previous: String, date: String },

    /// `date` skips days after `previous`.
    #[error("gap between {previous} and {date}")]
    Gap { previous: String, date: String },

    #[error("{supplied} leading days supplied but first day falls in column {offset}")]
    LeadingMismatch { supplied: usize, offset: usize },

    #[error("invalid month {month} of year {year}")]
    InvalidMonth { year: i32, month: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Validation,
}

/// Failure to build one month's grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cannot build month {month:?}")]
    Parse {
        month: String,
        #[source]
        source: ParseError,
    },

    #[error("cannot build month {month:?}")]
    Validation {
        month: String,
        #[source]
        source: ValidationError,
    },
}

impl GridError {
    pub fn parse(month: &str, source: ParseError) -> Self {
        GridError::Parse {
            month: month.to_string(),
            source,
        }
    }

    pub fn validation(month: &str, source: ValidationError) -> Self {
        GridError::Validation {
            month: month.to_string(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GridError::Parse { .. } => ErrorKind::Parse,
            GridError::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Name of the month that failed.
    pub fn month(&self) -> &str {
        match self {
            GridError::Parse { month, .. } | GridError::Validation { month, .. } => month,
        }
    }
}
