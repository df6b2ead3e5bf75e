//! Type definitions and constants for grid building and formatting.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How days supplied before the first current-month day are placed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LeadingPolicy {
    /// Supplied leading days take the columns right before the anchor day;
    /// filler only covers what they leave open.
    #[default]
    Reconcile,
    /// Emit `offset` filler cells and then every supplied day, leading
    /// adjacent-month days included.
    Verbatim,
}

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// One calendar day as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    /// Date in `YYYY-MM-DD` form.
    pub date: String,
    #[serde(default)]
    pub is_current_month: bool,
    #[serde(default)]
    pub is_today: bool,
}

impl DayRecord {
    pub fn new(date: impl Into<String>, is_current_month: bool, is_today: bool) -> Self {
        DayRecord {
            date: date.into(),
            is_current_month,
            is_today,
        }
    }

    /// Shorthand for a current-month day that is not today.
    pub fn current(date: impl Into<String>) -> Self {
        Self::new(date, true, false)
    }

    /// Shorthand for a day borrowed from an adjacent month.
    pub fn adjacent(date: impl Into<String>) -> Self {
        Self::new(date, false, false)
    }
}

/// One month's display data: a name and its days in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBlock {
    pub name: String,
    pub days: Vec<DayRecord>,
}

/// Corner-rounding flags of a real-day cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Corners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl Corners {
    pub fn any(self) -> bool {
        self.top_left || self.top_right || self.bottom_left || self.bottom_right
    }
}

/// Content of a grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CellKind {
    /// Padding before the first or after the last supplied day.
    Filler,
    /// A supplied day.
    Day {
        record: DayRecord,
        /// Day of month parsed from `record.date`.
        day: u32,
    },
}

/// One cell of the 7-column grid, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub kind: CellKind,
    pub corners: Corners,
}

impl GridCell {
    pub fn is_filler(&self) -> bool {
        matches!(self.kind, CellKind::Filler)
    }

    pub fn record(&self) -> Option<&DayRecord> {
        match &self.kind {
            CellKind::Day { record, .. } => Some(record),
            CellKind::Filler => None,
        }
    }

    pub fn day(&self) -> Option<u32> {
        match self.kind {
            CellKind::Day { day, .. } => Some(day),
            CellKind::Filler => None,
        }
    }
}

/// Padded grid built from one `MonthBlock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub name: String,
    /// Monday-based weekday of the anchor day (0 when no day is in the current month).
    pub offset: usize,
    /// Number of supplied days before the anchor day.
    pub supplied_leading: usize,
    pub leading_filler: usize,
    pub trailing_filler: usize,
    pub cells: Vec<GridCell>,
}

/// Grid building and formatting context containing all display options.
#[derive(Clone, Debug)]
pub struct GridContext {
    pub leading: LeadingPolicy,
    /// Whether generated months include days from adjacent months.
    pub adjacent: bool,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Whether to draw a frame around the day rows.
    pub frame: bool,
    /// Today's date for highlighting generated months.
    pub today: chrono::NaiveDate,
    /// Whether generated month names carry the year.
    pub show_year_in_header: bool,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
    pub columns: ColumnsMode,
}

pub const DAYS_PER_WEEK: usize = 7;

/// Width of a row of day cells: seven 2-wide cells and six separators.
pub const ROW_WIDTH: usize = DAYS_PER_WEEK * 2 + DAYS_PER_WEEK - 1;
pub const GUTTER_WIDTH_REGULAR: usize = 2;
pub const GUTTER_WIDTH_YEAR: usize = 3;

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
