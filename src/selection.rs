//! Day selection: reports pressed day cells through a single callback.

use crate::error::GridError;
use crate::types::{GridCell, LeadingPolicy, MonthBlock, MonthGrid};

impl GridCell {
    /// Report this cell's date to `on_select`.
    ///
    /// Returns `false` without calling it for filler cells.
    pub fn select(&self, on_select: impl FnOnce(&str)) -> bool {
        match self.record() {
            Some(record) => {
                on_select(&record.date);
                true
            }
            None => false,
        }
    }
}

/// Built month grids together with the date selection callback.
pub struct Calendar<F>
where
    F: FnMut(&str),
{
    grids: Vec<MonthGrid>,
    on_select: F,
}

impl<F> Calendar<F>
where
    F: FnMut(&str),
{
    pub fn new(
        months: &[MonthBlock],
        policy: LeadingPolicy,
        on_select: F,
    ) -> Result<Self, GridError> {
        let grids = crate::calendar::build_grids(months, policy)?;
        Ok(Self::from_grids(grids, on_select))
    }

    pub fn from_grids(grids: Vec<MonthGrid>, on_select: F) -> Self {
        Calendar { grids, on_select }
    }

    pub fn grids(&self) -> &[MonthGrid] {
        &self.grids
    }

    pub fn into_grids(self) -> Vec<MonthGrid> {
        self.grids
    }

    /// Press the cell at `index` of month `month`.
    ///
    /// Returns whether the callback ran; filler and out-of-range cells are ignored.
    pub fn press(&mut self, month: usize, index: usize) -> bool {
        let Some(cell) = self.grids.get(month).and_then(|grid| grid.cell(index)) else {
            return false;
        };
        log::debug!("press {}[{}]", self.grids[month].name, index);
        cell.select(&mut self.on_select)
    }

    /// Press the first real cell carrying `date`.
    pub fn press_date(&mut self, date: &str) -> bool {
        match self.grids.iter().find_map(|grid| grid.find_date(date)) {
            Some(cell) => cell.select(&mut self.on_select),
            None => false,
        }
    }
}
