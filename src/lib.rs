//! Calendar grid builder: lays out months as padded 7-column grids.
//!
//! Features:
//! - Monday-first weekday resolution for `YYYY-MM-DD` dates
//! - Leading/trailing filler so every grid holds whole weeks
//! - Corner flags for rounded grid edges
//! - Date selection through a single callback
//! - Terminal and JSON output

pub mod args;
pub mod calendar;
pub mod error;
pub mod formatter;
pub mod selection;
pub mod types;
pub mod weekday;

pub use calendar::build_grids;
pub use error::{ErrorKind, GridError, ParseError, ValidationError};
pub use selection::Calendar;
pub use types::{CellKind, Corners, DayRecord, GridCell, LeadingPolicy, MonthBlock, MonthGrid};
pub use weekday::monday_index;
