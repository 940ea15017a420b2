//! Occurrence tallies for feasible-board counting.
//!
//! Sampling workers record each accepted board into a tally; tallies merge
//! with a commutative, associative reduction, so partial tallies from
//! independent workers (or enumeration chunks) combine in any order.

use crate::math::mass::{MassFunction, SUPPORT};

/// Value-occurrence counts for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueTally([u64; SUPPORT]);

impl ValueTally {
    /// Record one occurrence of `value`. Off-support values are ignored.
    pub fn record(&mut self, value: u8) {
        if let Some(count) = self.0.get_mut(value as usize) {
            *count += 1;
        }
    }

    /// Total occurrences recorded.
    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    /// Occurrences of `value`.
    pub fn count(&self, value: u8) -> u64 {
        self.0.get(value as usize).copied().unwrap_or(0)
    }

    /// Fold another tally into this one.
    pub fn merge(&mut self, other: &ValueTally) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    /// Normalize into a mass function. `None` when nothing was recorded.
    pub fn to_mass(&self) -> Option<MassFunction> {
        MassFunction::from_counts(self.0)
    }
}

/// Per-cell tallies across a fixed number of cells, plus a board counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTally {
    cells: Vec<ValueTally>,
    boards: u64,
}

impl GridTally {
    pub fn new(cell_count: usize) -> Self {
        GridTally {
            cells: vec![ValueTally::default(); cell_count],
            boards: 0,
        }
    }

    /// Record one full board: `values[i]` is the value at cell index `i`.
    /// The slice length must match the tally's cell count.
    pub fn record_board(&mut self, values: &[u8]) {
        debug_assert_eq!(values.len(), self.cells.len());
        for (tally, &value) in self.cells.iter_mut().zip(values.iter()) {
            tally.record(value);
        }
        self.boards += 1;
    }

    /// Number of boards recorded.
    pub fn boards(&self) -> u64 {
        self.boards
    }

    /// The tally for cell index `i`.
    pub fn cell(&self, index: usize) -> Option<&ValueTally> {
        self.cells.get(index)
    }

    /// Fold another grid tally into this one. Cell counts must match.
    pub fn merge(&mut self, other: &GridTally) {
        debug_assert_eq!(self.cells.len(), other.cells.len());
        for (mine, theirs) in self.cells.iter_mut().zip(other.cells.iter()) {
            mine.merge(theirs);
        }
        self.boards += other.boards;
    }
}
