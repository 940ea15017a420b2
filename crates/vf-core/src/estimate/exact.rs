//! Exact enumeration of the feasible board set.
//!
//! Rows are assigned depth-first from their cached solution sets while
//! running column sums and zero counts prune branches that can no longer
//! hit the column targets. Every surviving board is counted into the
//! tally, so the resulting marginals are exact occurrence frequencies.

use crate::board::{Board, LineId};
use vf_math::GridTally;
use vf_common::GRID_SIZE;

/// Enumerate every board assembling one solution per row that also meets
/// all column targets. Returns the number of feasible boards.
pub fn enumerate(
    board: &Board,
    row_solutions: &[Vec<[u8; GRID_SIZE]>; GRID_SIZE],
    tally: &mut GridTally,
) -> u64 {
    let col_sum_targets: [u32; GRID_SIZE] =
        std::array::from_fn(|c| board.line(LineId::col(c as u8)).sum_target);
    let col_zero_targets: [u32; GRID_SIZE] =
        std::array::from_fn(|c| board.line(LineId::col(c as u8)).zero_target);

    let mut grid = [[0u8; GRID_SIZE]; GRID_SIZE];
    let mut col_sums = [0u32; GRID_SIZE];
    let mut col_zeros = [0u32; GRID_SIZE];
    descend(
        row_solutions,
        &col_sum_targets,
        &col_zero_targets,
        0,
        &mut grid,
        &mut col_sums,
        &mut col_zeros,
        tally,
    )
}

#[allow(clippy::too_many_arguments)]
fn descend(
    row_solutions: &[Vec<[u8; GRID_SIZE]>; GRID_SIZE],
    col_sum_targets: &[u32; GRID_SIZE],
    col_zero_targets: &[u32; GRID_SIZE],
    row: usize,
    grid: &mut [[u8; GRID_SIZE]; GRID_SIZE],
    col_sums: &mut [u32; GRID_SIZE],
    col_zeros: &mut [u32; GRID_SIZE],
    tally: &mut GridTally,
) -> u64 {
    if row == GRID_SIZE {
        // The prune below keeps partial sums within reach, and at the last
        // row within equality.
        let mut flat = [0u8; GRID_SIZE * GRID_SIZE];
        for (r, row_values) in grid.iter().enumerate() {
            flat[r * GRID_SIZE..(r + 1) * GRID_SIZE].copy_from_slice(row_values);
        }
        tally.record_board(&flat);
        return 1;
    }

    let rows_left = (GRID_SIZE - row - 1) as u32;
    let mut found = 0;
    'tuples: for tuple in &row_solutions[row] {
        for c in 0..GRID_SIZE {
            let sum = col_sums[c] + tuple[c] as u32;
            let zeros = col_zeros[c] + u32::from(tuple[c] == 0);
            // Remaining rows contribute at most 3 per cell to the sum and
            // one zero per cell to the count.
            if sum > col_sum_targets[c]
                || sum + 3 * rows_left < col_sum_targets[c]
                || zeros > col_zero_targets[c]
                || zeros + rows_left < col_zero_targets[c]
            {
                continue 'tuples;
            }
        }

        grid[row] = *tuple;
        for c in 0..GRID_SIZE {
            col_sums[c] += tuple[c] as u32;
            col_zeros[c] += u32::from(tuple[c] == 0);
        }
        found += descend(
            row_solutions,
            col_sum_targets,
            col_zero_targets,
            row + 1,
            grid,
            col_sums,
            col_zeros,
            tally,
        );
        for c in 0..GRID_SIZE {
            col_sums[c] -= tuple[c] as u32;
            col_zeros[c] -= u32::from(tuple[c] == 0);
        }
    }
    found
}
