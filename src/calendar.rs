//! Grid padding: aligns each month's days under Monday-first weekday columns.

use std::io::Read;

use chrono::{Datelike, Days, Locale, Months, NaiveDate};

use crate::error::{GridError, ValidationError};
use crate::formatter::{get_month_name, get_system_locale};
use crate::types::{
    CellKind, ColumnsMode, Corners, DAYS_PER_WEEK, DayRecord, GridCell, GridContext,
    LeadingPolicy, MonthBlock, MonthGrid, ROW_WIDTH,
};
use crate::weekday::{monday_index_of, parse_date};

impl MonthGrid {
    /// Build a grid with the default leading policy.
    pub fn new(block: &MonthBlock) -> Result<Self, GridError> {
        Self::build(block, LeadingPolicy::default())
    }

    /// Build the padded grid for one month.
    ///
    /// The anchor is the first day flagged as current-month; its weekday sets
    /// `offset`. Without such a day the offset is 0. Every date is parsed
    /// before anything is laid out, so one bad date rejects the whole month.
    pub fn build(block: &MonthBlock, policy: LeadingPolicy) -> Result<Self, GridError> {
        if block.days.is_empty() {
            return Err(GridError::validation(
                &block.name,
                ValidationError::EmptyMonth,
            ));
        }

        let dates = block
            .days
            .iter()
            .map(|day| parse_date(&day.date))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GridError::parse(&block.name, e))?;

        check_order(&block.days, &dates).map_err(|e| GridError::validation(&block.name, e))?;

        let (offset, supplied_leading) = match block.days.iter().position(|d| d.is_current_month) {
            Some(anchor) => (monday_index_of(dates[anchor]) as usize, anchor),
            None => (0, 0),
        };

        let leading_filler = match policy {
            LeadingPolicy::Reconcile => offset.checked_sub(supplied_leading).ok_or_else(|| {
                GridError::validation(
                    &block.name,
                    ValidationError::LeadingMismatch {
                        supplied: supplied_leading,
                        offset,
                    },
                )
            })?,
            LeadingPolicy::Verbatim => {
                if supplied_leading > 0 {
                    log::warn!(
                        "{}: {} supplied leading days push the first day past column {}",
                        block.name,
                        supplied_leading,
                        offset
                    );
                }
                offset
            }
        };

        let filled = leading_filler + block.days.len();
        let trailing_filler = (DAYS_PER_WEEK - filled % DAYS_PER_WEEK) % DAYS_PER_WEEK;
        // Row of the last real day, not of trailing filler
        let last_row = (filled - 1) / DAYS_PER_WEEK;

        let mut cells = Vec::with_capacity(filled + trailing_filler);
        cells.extend((0..leading_filler).map(GridCell::filler));
        for (position, (record, date)) in block.days.iter().zip(&dates).enumerate() {
            cells.push(GridCell::real_day(
                leading_filler + position,
                record.clone(),
                date.day(),
                last_row,
            ));
        }
        cells.extend((filled..filled + trailing_filler).map(GridCell::filler));

        log::debug!(
            "{}: offset {}, supplied leading {}, filler {}+{}, {} cells",
            block.name,
            offset,
            supplied_leading,
            leading_filler,
            trailing_filler,
            cells.len()
        );

        Ok(MonthGrid {
            name: block.name.clone(),
            offset,
            supplied_leading,
            leading_filler,
            trailing_filler,
            cells,
        })
    }

    /// Cells grouped into weeks.
    pub fn rows(&self) -> std::slice::Chunks<'_, GridCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn row_count(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    /// Number of real (non-filler) cells.
    pub fn day_count(&self) -> usize {
        self.cells.len() - self.leading_filler - self.trailing_filler
    }

    pub fn cell(&self, index: usize) -> Option<&GridCell> {
        self.cells.get(index)
    }

    /// First real cell with the given literal date.
    pub fn find_date(&self, date: &str) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.record().is_some_and(|r| r.date == date))
    }

    /// Cell of the first current-month day.
    pub fn anchor(&self) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.record().is_some_and(|r| r.is_current_month))
    }
}

impl GridCell {
    fn filler(index: usize) -> Self {
        GridCell {
            index,
            row: index / DAYS_PER_WEEK,
            column: index % DAYS_PER_WEEK,
            kind: CellKind::Filler,
            corners: Corners::default(),
        }
    }

    fn real_day(index: usize, record: DayRecord, day: u32, last_row: usize) -> Self {
        let row = index / DAYS_PER_WEEK;
        let column = index % DAYS_PER_WEEK;
        let (top, bottom) = (row == 0, row == last_row);
        let (left, right) = (column == 0, column == DAYS_PER_WEEK - 1);

        GridCell {
            index,
            row,
            column,
            kind: CellKind::Day { record, day },
            corners: Corners {
                top_left: top && left,
                top_right: top && right,
                bottom_left: bottom && left,
                bottom_right: bottom && right,
            },
        }
    }
}

/// Days must follow each other one calendar day apart.
fn check_order(days: &[DayRecord], dates: &[NaiveDate]) -> Result<(), ValidationError> {
    for (i, pair) in dates.windows(2).enumerate() {
        let (previous, date) = (pair[0], pair[1]);
        if date <= previous {
            return Err(ValidationError::NotAscending {
                previous: days[i].date.clone(),
                date: days[i + 1].date.clone(),
            });
        }
        if previous.succ_opt() != Some(date) {
            return Err(ValidationError::Gap {
                previous: days[i].date.clone(),
                date: days[i + 1].date.clone(),
            });
        }
    }
    Ok(())
}

/// Build grids for all months, stopping at the first month that fails.
pub fn build_grids(
    months: &[MonthBlock],
    policy: LeadingPolicy,
) -> Result<Vec<MonthGrid>, GridError> {
    months
        .iter()
        .map(|block| MonthGrid::build(block, policy))
        .collect()
}

/// Read months from JSON (an array of `{ name, days: [{ date, isCurrentMonth, isToday }] }`).
pub fn read_months<R: Read>(reader: R) -> Result<Vec<MonthBlock>, serde_json::Error> {
    serde_json::from_reader(reader)
}

impl MonthBlock {
    /// Block for a real month, named in the system locale.
    pub fn for_month(
        year: i32,
        month: u32,
        today: NaiveDate,
        adjacent: bool,
    ) -> Result<Self, ValidationError> {
        Self::for_month_localized(year, month, today, adjacent, get_system_locale())
    }

    /// Block for a real month.
    ///
    /// With `adjacent`, the block is widened to whole weeks with days of the
    /// previous and next month, flagged as not current.
    pub fn for_month_localized(
        year: i32,
        month: u32,
        today: NaiveDate,
        adjacent: bool,
        locale: Locale,
    ) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMonth { year, month };

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        let (start, end) = if adjacent {
            let before = u64::from(monday_index_of(first));
            let after = 6 - u64::from(monday_index_of(last));
            (
                first.checked_sub_days(Days::new(before)).ok_or_else(invalid)?,
                last.checked_add_days(Days::new(after)).ok_or_else(invalid)?,
            )
        } else {
            (first, last)
        };

        let days = start
            .iter_days()
            .take_while(|date| *date <= end)
            .map(|date| {
                DayRecord::new(
                    date.format("%Y-%m-%d").to_string(),
                    date.month() == month,
                    date == today,
                )
            })
            .collect();

        Ok(MonthBlock {
            name: get_month_name(month, locale),
            days,
        })
    }
}

/// Consecutive `(year, month)` pairs starting at the given month.
///
/// With `span`, the sequence is centered on the given month instead.
/// Years are not range-checked; see `Args::month_range` for the CLI bounds.
pub fn month_sequence(year: i32, month: u32, count: u32, span: bool) -> Vec<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month) - 1;
    let count = i64::from(count);
    let start = if span && count > 1 {
        total - (count - 1) / 2
    } else {
        total
    };
    (start..start + count)
        .map(|t| (t.div_euclid(12) as i32, (t.rem_euclid(12) + 1) as u32))
        .collect()
}

impl GridContext {
    /// Generate blocks for the given months, naming them with the year if configured.
    pub fn generate_months(
        &self,
        months: &[(i32, u32)],
    ) -> Result<Vec<MonthBlock>, ValidationError> {
        months
            .iter()
            .map(|&(year, month)| {
                let mut block = MonthBlock::for_month(year, month, self.today, self.adjacent)?;
                if self.show_year_in_header {
                    block.name = format!("{} {}", block.name, year);
                }
                Ok(block)
            })
            .collect()
    }

    /// Display width of one month, frame included.
    pub fn month_width(&self) -> usize {
        if self.frame { ROW_WIDTH + 2 } else { ROW_WIDTH }
    }

    pub fn months_per_row(&self) -> u32 {
        match self.columns {
            ColumnsMode::Fixed(n) => n,
            ColumnsMode::Auto => {
                // Clamp to 1-3 for readability
                let month_width = self.month_width() + self.gutter_width;
                if let Some(term_width) = get_terminal_width() {
                    (term_width / month_width as u32).clamp(1, 3)
                } else {
                    3
                }
            }
        }
    }
}

/// Get terminal width using terminal_size crate.
fn get_terminal_width() -> Option<u32> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as u32)
}
