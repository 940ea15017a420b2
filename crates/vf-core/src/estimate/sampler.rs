//! Constrained rejection sampling over the feasible board set.
//!
//! Each attempt draws one uniform solution per row from the cached row
//! solution sets; rows are satisfied by construction and the draw is
//! rejected if any column misses its sum or voltorb target. Uniform
//! proposals plus rejection give every feasible joint board equal
//! acceptance probability, so accepted tallies are unbiased.

use crate::board::{Board, LineId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use vf_common::GRID_SIZE;
use vf_math::GridTally;

/// How often the wall-clock deadline is consulted, in attempts.
const DEADLINE_STRIDE: u64 = 256;

/// Attempt ceiling as a multiple of the accepted-sample budget.
const ATTEMPT_FACTOR: u64 = 64;

/// Budget and reproducibility knobs for one sampling run.
#[derive(Debug, Clone, Copy)]
pub struct SampleBudget {
    /// Accepted samples to aim for; attempts stop at 64× this figure.
    pub samples: u64,
    /// Wall-clock deadline for the whole run.
    pub deadline: Duration,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

/// Counters from one sampling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleOutcome {
    pub accepted: u64,
    pub attempted: u64,
}

/// Sample boards until the accepted budget, the attempt ceiling, or the
/// deadline runs out, recording every accepted board into `tally`.
///
/// Every row solution set must be non-empty; propagation guarantees this
/// for the boards the estimator sees.
pub fn sample(
    board: &Board,
    row_solutions: &[Vec<[u8; GRID_SIZE]>; GRID_SIZE],
    budget: &SampleBudget,
    tally: &mut GridTally,
) -> SampleOutcome {
    let col_sum_targets: [u32; GRID_SIZE] =
        std::array::from_fn(|c| board.line(LineId::col(c as u8)).sum_target);
    let col_zero_targets: [u32; GRID_SIZE] =
        std::array::from_fn(|c| board.line(LineId::col(c as u8)).zero_target);

    let mut rng = match budget.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let started = Instant::now();
    let max_attempts = budget.samples.saturating_mul(ATTEMPT_FACTOR);
    let mut outcome = SampleOutcome::default();
    let mut flat = [0u8; GRID_SIZE * GRID_SIZE];

    while outcome.accepted < budget.samples && outcome.attempted < max_attempts {
        if outcome.attempted % DEADLINE_STRIDE == 0
            && outcome.attempted > 0
            && started.elapsed() >= budget.deadline
        {
            tracing::debug!(
                attempted = outcome.attempted,
                accepted = outcome.accepted,
                "sampler deadline reached"
            );
            break;
        }
        outcome.attempted += 1;

        for (r, solutions) in row_solutions.iter().enumerate() {
            let pick = &solutions[rng.random_range(0..solutions.len())];
            flat[r * GRID_SIZE..(r + 1) * GRID_SIZE].copy_from_slice(pick);
        }

        if columns_satisfied(&flat, &col_sum_targets, &col_zero_targets) {
            tally.record_board(&flat);
            outcome.accepted += 1;
        }
    }

    outcome
}

fn columns_satisfied(
    flat: &[u8; GRID_SIZE * GRID_SIZE],
    col_sum_targets: &[u32; GRID_SIZE],
    col_zero_targets: &[u32; GRID_SIZE],
) -> bool {
    for c in 0..GRID_SIZE {
        let mut sum = 0u32;
        let mut zeros = 0u32;
        for r in 0..GRID_SIZE {
            let v = flat[r * GRID_SIZE + c];
            sum += v as u32;
            zeros += u32::from(v == 0);
        }
        if sum != col_sum_targets[c] || zeros != col_zero_targets[c] {
            return false;
        }
    }
    true
}
