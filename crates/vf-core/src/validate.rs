//! Arithmetic request validation.
//!
//! Everything here is checkable without constructing a single line solution
//! set: clue shape, per-line target feasibility, row/column total agreement,
//! and revealed-cell sanity. Anything deeper is the constraint engine's job.

use thiserror::Error;
use vf_common::{AnalysisRequest, Axis, Error, LineClue, Position, GRID_SIZE, MAX_CELL_VALUE};

/// Cells per line, and the number of clues expected per axis.
const LINE_LEN: u32 = GRID_SIZE as u32;

/// Validation failures, each naming the offending clue or cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("expected 5 {axis} clues, got {count}")]
    BadShape { axis: Axis, count: usize },

    #[error("{axis} {index} clue infeasible: sum={sum}, voltorbs={voltorbs}")]
    BadRange {
        axis: Axis,
        index: usize,
        sum: u32,
        voltorbs: u32,
    },

    #[error("row sums total {row_sums} but column sums total {col_sums}")]
    SumTotalsDisagree { row_sums: u32, col_sums: u32 },

    #[error("row voltorbs total {row_voltorbs} but column voltorbs total {col_voltorbs}")]
    VoltorbTotalsDisagree {
        row_voltorbs: u32,
        col_voltorbs: u32,
    },

    #[error("revealed value {value} at {position} is outside 0..=3")]
    BadRevealValue { position: Position, value: u8 },

    #[error("revealed coordinate {position} repeats")]
    DuplicateReveal { position: Position },

    #[error("revealed coordinate ({row}, {col}) is off the board")]
    OutOfBounds { row: u8, col: u8 },
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::BadShape { axis, count } => Error::BadShape { axis, count },
            ValidationError::BadRange {
                axis,
                index,
                sum,
                voltorbs,
            } => Error::BadRange {
                axis,
                index,
                sum,
                voltorbs,
            },
            ValidationError::SumTotalsDisagree { row_sums, col_sums } => Error::BadTotals {
                detail: format!("row sums {row_sums} vs column sums {col_sums}"),
            },
            ValidationError::VoltorbTotalsDisagree {
                row_voltorbs,
                col_voltorbs,
            } => Error::BadTotals {
                detail: format!("row voltorbs {row_voltorbs} vs column voltorbs {col_voltorbs}"),
            },
            ValidationError::BadRevealValue { position, value } => Error::BadReveal {
                detail: format!("value {value} at {position} is outside 0..={MAX_CELL_VALUE}"),
            },
            ValidationError::DuplicateReveal { position } => Error::BadReveal {
                detail: format!("duplicate coordinate {position}"),
            },
            ValidationError::OutOfBounds { row, col } => Error::OutOfBounds {
                row: row as u32,
                col: col as u32,
            },
        }
    }
}

/// Accept or reject a request on shape and arithmetic alone.
pub fn validate(request: &AnalysisRequest) -> Result<(), ValidationError> {
    check_shape(Axis::Row, &request.rows)?;
    check_shape(Axis::Col, &request.cols)?;

    for (axis, clues) in [(Axis::Row, &request.rows), (Axis::Col, &request.cols)] {
        for (index, clue) in clues.iter().enumerate() {
            check_range(axis, index, clue)?;
        }
    }

    let row_sums: u32 = request.rows.iter().map(|c| c.sum).sum();
    let col_sums: u32 = request.cols.iter().map(|c| c.sum).sum();
    if row_sums != col_sums {
        return Err(ValidationError::SumTotalsDisagree { row_sums, col_sums });
    }
    let row_voltorbs: u32 = request.rows.iter().map(|c| c.voltorbs).sum();
    let col_voltorbs: u32 = request.cols.iter().map(|c| c.voltorbs).sum();
    if row_voltorbs != col_voltorbs {
        return Err(ValidationError::VoltorbTotalsDisagree {
            row_voltorbs,
            col_voltorbs,
        });
    }

    let mut seen = [false; GRID_SIZE * GRID_SIZE];
    for cell in &request.revealed {
        if !cell.position.in_bounds() {
            return Err(ValidationError::OutOfBounds {
                row: cell.position.row(),
                col: cell.position.col(),
            });
        }
        if cell.value > MAX_CELL_VALUE {
            return Err(ValidationError::BadRevealValue {
                position: cell.position,
                value: cell.value,
            });
        }
        let index = cell.position.index();
        if seen[index] {
            return Err(ValidationError::DuplicateReveal {
                position: cell.position,
            });
        }
        seen[index] = true;
    }

    Ok(())
}

fn check_shape(axis: Axis, clues: &[LineClue]) -> Result<(), ValidationError> {
    if clues.len() != GRID_SIZE {
        return Err(ValidationError::BadShape {
            axis,
            count: clues.len(),
        });
    }
    Ok(())
}

/// Five cells in 0..=3 bound a line: with `z` voltorbs, the positive cells
/// number `5 - z` and each contributes 1 to 3.
fn check_range(axis: Axis, index: usize, clue: &LineClue) -> Result<(), ValidationError> {
    let infeasible = clue.voltorbs > LINE_LEN
        || clue.sum < LINE_LEN - clue.voltorbs.min(LINE_LEN)
        || clue.sum > 3 * (LINE_LEN - clue.voltorbs.min(LINE_LEN));
    if infeasible {
        return Err(ValidationError::BadRange {
            axis,
            index,
            sum: clue.sum,
            voltorbs: clue.voltorbs,
        });
    }
    Ok(())
}
