//! Per-cell marginal distributions over the feasible board set.
//!
//! Three paths, tried in order of exactness:
//! 1. *Degenerate* — every open cell is forced; marginals are point masses.
//! 2. *Exact* — the product of row solution-set sizes is small enough to
//!    enumerate the full feasible set and count occurrences.
//! 3. *Sampled* — rejection sampling: uniform row draws filtered on column
//!    targets, tallied until the accepted budget, attempt ceiling, or
//!    deadline runs out.
//!
//! The estimator reads the post-propagation board immutably; row solution
//! sets are enumerated once per request and shared by paths 2 and 3.

pub mod exact;
pub mod sampler;

pub use sampler::{SampleBudget, SampleOutcome};

use crate::board::{Board, LineId};
use crate::config::EstimatorConfig;
use thiserror::Error;
use vf_common::{EstimateMethod, EstimatorReport, Position, CELL_COUNT, GRID_SIZE};
use vf_math::{GridTally, MassFunction};

/// Errors raised during marginal estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EstimateError {
    /// A row's solution set is empty. Propagation never hands over such a
    /// board, so this means the board skipped propagation.
    #[error("row {row} has an empty solution set; board was not propagated")]
    UnpropagatedBoard { row: usize },
}

/// Marginals for every open cell, plus how they were produced.
#[derive(Debug, Clone)]
pub struct Estimate {
    marginals: [Option<MassFunction>; CELL_COUNT],
    pub report: EstimatorReport,
}

impl Estimate {
    /// The marginal for an open cell; `None` for revealed cells.
    pub fn marginal(&self, position: Position) -> Option<MassFunction> {
        self.marginals[position.index()]
    }
}

/// Estimate marginals for every open cell of a propagated board.
pub fn estimate(board: &Board, config: &EstimatorConfig) -> Result<Estimate, EstimateError> {
    if board
        .open_positions()
        .all(|p| board.domain(p).is_singleton())
    {
        return Ok(degenerate(board));
    }

    let row_solutions: [Vec<[u8; GRID_SIZE]>; GRID_SIZE] = std::array::from_fn(|r| {
        let id = LineId::row(r as u8);
        board.line(id).solutions(&board.line_domains(id))
    });
    if let Some(row) = row_solutions.iter().position(|set| set.is_empty()) {
        return Err(EstimateError::UnpropagatedBoard { row });
    }

    let joint_size = row_solutions
        .iter()
        .fold(1u64, |acc, set| acc.saturating_mul(set.len() as u64));

    let mut tally = GridTally::new(CELL_COUNT);
    if joint_size <= config.exact_enumeration_limit {
        let feasible = exact::enumerate(board, &row_solutions, &mut tally);
        tracing::info!(joint_size, feasible, "estimated marginals by exact enumeration");
        if feasible == 0 {
            // Arc consistency per line does not rule out joint
            // infeasibility. Degrade the same way as a dry sampling run.
            return Ok(uniform_fallback(
                board,
                SampleOutcome {
                    accepted: 0,
                    attempted: 0,
                },
                EstimateMethod::Exact,
            ));
        }
        return Ok(from_tally(
            board,
            &tally,
            EstimatorReport {
                method: EstimateMethod::Exact,
                accepted: feasible,
                attempted: feasible,
                low_confidence: false,
            },
        ));
    }

    let budget = SampleBudget {
        samples: config.sample_budget,
        deadline: config.deadline(),
        seed: config.seed,
    };
    let outcome = sampler::sample(board, &row_solutions, &budget, &mut tally);
    let acceptance = outcome.accepted as f64 / outcome.attempted.max(1) as f64;
    tracing::info!(
        accepted = outcome.accepted,
        attempted = outcome.attempted,
        acceptance,
        "estimated marginals by rejection sampling"
    );

    if outcome.accepted == 0 {
        return Ok(uniform_fallback(board, outcome, EstimateMethod::Sampled));
    }

    Ok(from_tally(
        board,
        &tally,
        EstimatorReport {
            method: EstimateMethod::Sampled,
            accepted: outcome.accepted,
            attempted: outcome.attempted,
            low_confidence: outcome.accepted < config.min_accepted,
        },
    ))
}

/// Every open cell is forced: point-mass marginals, one representative
/// board.
fn degenerate(board: &Board) -> Estimate {
    let mut marginals = [None; CELL_COUNT];
    for position in board.open_positions() {
        let value = board.domain(position).value().unwrap_or(0);
        marginals[position.index()] = MassFunction::point(value);
    }
    Estimate {
        marginals,
        report: EstimatorReport {
            method: EstimateMethod::Degenerate,
            accepted: 1,
            attempted: 1,
            low_confidence: false,
        },
    }
}

fn from_tally(board: &Board, tally: &GridTally, report: EstimatorReport) -> Estimate {
    let mut marginals = [None; CELL_COUNT];
    for position in board.open_positions() {
        let index = position.index();
        marginals[index] = tally.cell(index).and_then(|cell| cell.to_mass());
    }
    Estimate { marginals, report }
}

/// No feasible board was seen: degrade to uniform-over-domain marginals and
/// flag the result as unusable for ranking beyond propagation guarantees.
fn uniform_fallback(board: &Board, outcome: SampleOutcome, method: EstimateMethod) -> Estimate {
    let mut marginals = [None; CELL_COUNT];
    for position in board.open_positions() {
        let values: Vec<u8> = board.domain(position).values().collect();
        marginals[position.index()] = MassFunction::uniform_over(&values);
    }
    Estimate {
        marginals,
        report: EstimatorReport {
            method,
            accepted: 0,
            attempted: outcome.attempted,
            low_confidence: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::propagate;
    use vf_common::{AnalysisRequest, Mode};
    use vf_math::MASS_TOLERANCE;

    fn propagated(request: &AnalysisRequest) -> Board {
        let mut board = Board::build(request);
        propagate(&mut board).unwrap();
        board
    }

    #[test]
    fn forced_board_is_degenerate() {
        let request = AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5]);
        let board = propagated(&request);
        let estimate = estimate(&board, &EstimatorConfig::default()).unwrap();
        assert_eq!(estimate.report.method, EstimateMethod::Degenerate);
        assert!(!estimate.report.low_confidence);
        let mass = estimate.marginal(Position(3, 3)).unwrap();
        assert_eq!(mass.as_point(), Some(1));
    }

    #[test]
    fn small_joint_space_goes_exact() {
        let request = AnalysisRequest::from_clues(Mode::Level, [(3, 2); 5], [(3, 2); 5]);
        let board = propagated(&request);
        let estimate = estimate(&board, &EstimatorConfig::default()).unwrap();
        assert_eq!(estimate.report.method, EstimateMethod::Exact);
        assert_eq!(estimate.report.accepted, 2040);
        // By symmetry every cell is a voltorb in exactly 2 of 5 boards.
        for r in 0..5u8 {
            for c in 0..5u8 {
                let mass = estimate.marginal(Position(r, c)).unwrap();
                assert!((mass.p_zero() - 0.4).abs() < 1e-12);
                let total: f64 = mass.masses().iter().sum();
                assert!((total - 1.0).abs() <= MASS_TOLERANCE);
            }
        }
    }

    #[test]
    fn large_joint_space_samples() {
        let request = AnalysisRequest::from_clues(
            Mode::Level,
            [(6, 1), (7, 0), (5, 2), (8, 0), (4, 2)],
            [(6, 1), (5, 1), (7, 1), (6, 1), (6, 1)],
        );
        let board = propagated(&request);
        let config = EstimatorConfig {
            seed: Some(99),
            exact_enumeration_limit: 1,
            ..EstimatorConfig::default()
        };
        let estimate = estimate(&board, &config).unwrap();
        assert_eq!(estimate.report.method, EstimateMethod::Sampled);
        assert!(estimate.report.accepted > 0);
        for position in board.open_positions() {
            let mass = estimate.marginal(position).unwrap();
            let total: f64 = mass.masses().iter().sum();
            assert!((total - 1.0).abs() <= MASS_TOLERANCE);
        }
    }

    #[test]
    fn revealed_cells_have_no_marginal() {
        let request = AnalysisRequest::from_clues(Mode::Level, [(3, 2); 5], [(3, 2); 5])
            .with_reveal(Position(0, 0), 1);
        let board = propagated(&request);
        let estimate = estimate(&board, &EstimatorConfig::default()).unwrap();
        assert!(estimate.marginal(Position(0, 0)).is_none());
        assert!(estimate.marginal(Position(0, 1)).is_some());
    }

    #[test]
    fn marginals_respect_propagation_guarantees() {
        // Row 0 sum 12 with one voltorb forces its positive cells to 3.
        let request = AnalysisRequest::from_clues(
            Mode::Level,
            [(12, 1), (5, 1), (6, 1), (5, 1), (4, 1)],
            [(7, 1), (6, 1), (6, 1), (7, 1), (6, 1)],
        );
        let board = propagated(&request);
        let config = EstimatorConfig {
            seed: Some(5),
            ..EstimatorConfig::default()
        };
        let estimate = estimate(&board, &config).unwrap();
        for c in 0..5u8 {
            let mass = estimate.marginal(Position(0, c)).unwrap();
            assert!(mass.mass(1).abs() < 1e-12);
            assert!(mass.mass(2).abs() < 1e-12);
        }
    }
}
