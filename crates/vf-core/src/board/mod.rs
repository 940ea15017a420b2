//! The constraint board: cell domains plus the ten line constraints.
//!
//! The board is built fresh from each validated request and mutated only by
//! [`propagate`]. Everything downstream (the estimator, the policy layer)
//! reads it immutably.

pub mod domain;
pub mod line;
pub mod propagate;

pub use domain::DomainMask;
pub use line::{LineId, LineSpec};
pub use propagate::{propagate, Contradiction, ContradictionKind, PropagationError, PropagationStats};

use vf_common::{AnalysisRequest, Axis, ForcedValue, Position, CELL_COUNT, GRID_SIZE};

/// A 5×5 grid of cell domains plus row and column clue targets.
#[derive(Debug, Clone)]
pub struct Board {
    domains: [DomainMask; CELL_COUNT],
    revealed: [Option<u8>; CELL_COUNT],
    rows: [LineSpec; GRID_SIZE],
    cols: [LineSpec; GRID_SIZE],
}

/// Everything propagation can guarantee about the open cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deductions {
    /// Open cells whose domain excludes 0, row-major.
    pub safe: Vec<Position>,
    /// Open cells whose domain is exactly {0}, row-major.
    pub voltorbs: Vec<Position>,
    /// Open cells pinned to a single value, row-major.
    pub forced: Vec<ForcedValue>,
}

impl Board {
    /// Build a board from a request that has passed validation: revealed
    /// cells collapse to singletons, every other cell starts at the full
    /// domain.
    pub fn build(request: &AnalysisRequest) -> Board {
        let mut domains = [DomainMask::FULL; CELL_COUNT];
        let mut revealed = [None; CELL_COUNT];
        for cell in &request.revealed {
            if let Some(mask) = DomainMask::singleton(cell.value) {
                domains[cell.position.index()] = mask;
                revealed[cell.position.index()] = Some(cell.value);
            }
        }

        let mut rows = [LineSpec {
            id: LineId::row(0),
            sum_target: 0,
            zero_target: 0,
        }; GRID_SIZE];
        let mut cols = rows;
        for (i, clue) in request.rows.iter().take(GRID_SIZE).enumerate() {
            rows[i] = LineSpec {
                id: LineId::row(i as u8),
                sum_target: clue.sum,
                zero_target: clue.voltorbs,
            };
        }
        for (i, clue) in request.cols.iter().take(GRID_SIZE).enumerate() {
            cols[i] = LineSpec {
                id: LineId::col(i as u8),
                sum_target: clue.sum,
                zero_target: clue.voltorbs,
            };
        }

        Board {
            domains,
            revealed,
            rows,
            cols,
        }
    }

    pub fn domain(&self, position: Position) -> DomainMask {
        self.domains[position.index()]
    }

    pub(crate) fn set_domain(&mut self, position: Position, mask: DomainMask) {
        self.domains[position.index()] = mask;
    }

    /// The value the caller asserted for this cell, if any.
    pub fn revealed_value(&self, position: Position) -> Option<u8> {
        self.revealed[position.index()]
    }

    pub fn is_revealed(&self, position: Position) -> bool {
        self.revealed[position.index()].is_some()
    }

    /// Whether any caller-revealed cell is a voltorb.
    pub fn revealed_voltorb(&self) -> bool {
        self.revealed.iter().any(|v| *v == Some(0))
    }

    pub fn line(&self, id: LineId) -> &LineSpec {
        match id.axis {
            Axis::Row => &self.rows[id.index as usize],
            Axis::Col => &self.cols[id.index as usize],
        }
    }

    /// Current domains of a line's five cells, in cell order.
    pub fn line_domains(&self, id: LineId) -> [DomainMask; GRID_SIZE] {
        let positions = id.positions();
        let mut out = [DomainMask::EMPTY; GRID_SIZE];
        for (mask, position) in out.iter_mut().zip(positions.iter()) {
            *mask = self.domains[position.index()];
        }
        out
    }

    /// Positions not asserted by the caller, row-major.
    pub fn open_positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..GRID_SIZE as u8)
            .flat_map(|r| (0..GRID_SIZE as u8).map(move |c| Position(r, c)))
            .filter(|p| !self.is_revealed(*p))
    }

    /// Whether the round is cleared: no open cell can hold a 2 or 3, and
    /// either nothing is left open or some open cell may still be a voltorb.
    /// A board whose open cells are all forced to positive values stays
    /// active; those flips are free and still on offer.
    pub fn cleared(&self) -> bool {
        let mut any_open = false;
        let mut any_possible_voltorb = false;
        for position in self.open_positions() {
            let mask = self.domain(position);
            if mask.values().any(|v| v > 1) {
                return false;
            }
            any_open = true;
            any_possible_voltorb |= mask.contains(0);
        }
        !any_open || any_possible_voltorb
    }

    /// Extract guaranteed-safe, guaranteed-voltorb, and forced-value sets
    /// over the open cells.
    pub fn deductions(&self) -> Deductions {
        let mut out = Deductions::default();
        for position in self.open_positions() {
            let mask = self.domain(position);
            if mask.excludes_zero() {
                out.safe.push(position);
            }
            if let Some(value) = mask.value() {
                if value == 0 {
                    out.voltorbs.push(position);
                }
                out.forced.push(ForcedValue {
                    row: position.row(),
                    col: position.col(),
                    value,
                });
            }
        }
        out
    }
}
