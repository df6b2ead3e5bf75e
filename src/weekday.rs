//! Date-to-weekday resolution with Monday as the first column.

use chrono::{Datelike, NaiveDate};

use crate::error::ParseError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(date: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| ParseError {
        date: date.to_string(),
        source,
    })
}

/// Monday-based weekday index (0 = Monday ... 6 = Sunday) of a parsed date.
pub fn monday_index_of(date: NaiveDate) -> u32 {
    // Native order starts the week on Sunday.
    match date.weekday().num_days_from_sunday() {
        0 => 6,
        native => native - 1,
    }
}

/// Monday-based weekday index of a `YYYY-MM-DD` date string.
pub fn monday_index(date: &str) -> Result<u32, ParseError> {
    parse_date(date).map(monday_index_of)
}
