//! The analysis orchestrator.
//!
//! Sequences validation → propagation → round-state classification →
//! estimation → ranking, and assembles the response. This is the only
//! layer that converts component errors into the public error type;
//! everything below returns its own typed results.

use crate::board::{propagate, Board, Deductions, PropagationError};
use crate::config::AnalysisConfig;
use crate::decision::{rank, Candidate, Ranking};
use crate::estimate::{estimate, Estimate};
use crate::validate::validate;
use vf_common::{
    AnalysisRequest, AnalysisResponse, EstimateMethod, EstimatorReport, Error, GameState, Mode,
    SCHEMA_VERSION,
};

/// Run the full pipeline for one request.
pub fn analyze(request: &AnalysisRequest, config: &AnalysisConfig) -> Result<AnalysisResponse, Error> {
    config
        .validate()
        .map_err(|err| Error::Config(err.to_string()))?;
    validate(request)?;

    let mut board = Board::build(request);
    let stats = propagate(&mut board).map_err(|err| match err {
        PropagationError::Contradiction(c) => Error::Contradiction {
            axis: c.axis,
            index: c.index as usize,
            detail: c.kind.to_string(),
        },
        PropagationError::IterationLimit { rounds } => {
            Error::Internal(format!("propagation ran away: {rounds} queue rounds"))
        }
    })?;
    tracing::debug!(
        rounds = stats.rounds,
        lines_examined = stats.lines_examined,
        domains_narrowed = stats.domains_narrowed,
        "propagation reached fixpoint"
    );

    let deductions = board.deductions();

    if board.revealed_voltorb() {
        return Ok(settled_response(
            request,
            &deductions,
            GameState::Lost,
            lost_explanation(request),
        ));
    }
    if board.cleared() {
        return Ok(settled_response(
            request,
            &deductions,
            GameState::Won,
            "round won: every remaining cell holds at most a 1, so all multiplier cells are flipped"
                .to_string(),
        ));
    }

    let estimate = estimate(&board, &config.estimator)
        .map_err(|err| Error::Internal(err.to_string()))?;

    let unusable = estimate.report.low_confidence && estimate.report.accepted == 0;
    if unusable && deductions == Deductions::default() {
        return Err(Error::LowConfidence {
            accepted: 0,
            attempted: estimate.report.attempted,
        });
    }

    let candidates = collect_candidates(&board, &estimate, unusable)?;
    let ranking = rank(
        &candidates,
        request.mode,
        &config.policy,
        !deductions.safe.is_empty(),
    );
    let explanation = active_explanation(request.mode, &ranking, &estimate.report);
    tracing::info!(
        mode = %request.mode,
        candidates = candidates.len(),
        guaranteed_safe = deductions.safe.len(),
        guaranteed_voltorb = deductions.voltorbs.len(),
        quit = ranking.quit_recommended,
        "analysis complete"
    );

    Ok(AnalysisResponse {
        schema_version: SCHEMA_VERSION.to_string(),
        mode: request.mode,
        game_state: GameState::Active,
        guaranteed_safe: deductions.safe,
        guaranteed_voltorb: deductions.voltorbs,
        forced_values: deductions.forced,
        recommendations: ranking.recommendations,
        quit_recommended: ranking.quit_recommended,
        explanation,
        estimator: estimate.report,
    })
}

/// Candidates for ranking: every open cell, or only the guaranteed-safe
/// ones when the estimator produced nothing trustworthy.
fn collect_candidates(
    board: &Board,
    estimate: &Estimate,
    guarantees_only: bool,
) -> Result<Vec<Candidate>, Error> {
    let mut candidates = Vec::new();
    for position in board.open_positions() {
        if guarantees_only && !board.domain(position).excludes_zero() {
            continue;
        }
        let mass = estimate.marginal(position).ok_or_else(|| {
            Error::Internal(format!("open cell {position} is missing its marginal"))
        })?;
        candidates.push(Candidate { position, mass });
    }
    Ok(candidates)
}

/// Response for a round that is already decided; the estimator and policy
/// never run.
fn settled_response(
    request: &AnalysisRequest,
    deductions: &Deductions,
    game_state: GameState,
    explanation: String,
) -> AnalysisResponse {
    AnalysisResponse {
        schema_version: SCHEMA_VERSION.to_string(),
        mode: request.mode,
        game_state,
        guaranteed_safe: deductions.safe.clone(),
        guaranteed_voltorb: deductions.voltorbs.clone(),
        forced_values: deductions.forced.clone(),
        recommendations: Vec::new(),
        quit_recommended: false,
        explanation,
        estimator: EstimatorReport::propagation_only(),
    }
}

fn lost_explanation(request: &AnalysisRequest) -> String {
    let position = request
        .revealed
        .iter()
        .find(|cell| cell.value == 0)
        .map(|cell| cell.position);
    match position {
        Some(position) => format!("round lost: the revealed cell at {position} is a voltorb"),
        None => "round lost: a revealed cell is a voltorb".to_string(),
    }
}

fn active_explanation(mode: Mode, ranking: &Ranking, report: &EstimatorReport) -> String {
    let source = match report.method {
        EstimateMethod::Propagation => "settled by propagation alone".to_string(),
        EstimateMethod::Degenerate => "every open cell is forced by propagation".to_string(),
        EstimateMethod::Exact => format!(
            "marginals from exact enumeration of {} feasible boards",
            report.accepted
        ),
        EstimateMethod::Sampled => format!(
            "marginals from {} accepted samples out of {} attempts",
            report.accepted, report.attempted
        ),
    };
    let confidence = if report.low_confidence {
        "; confidence is low"
    } else {
        ""
    };
    let quit = if ranking.quit_recommended {
        "; quitting is advised"
    } else {
        "; quitting is not advised"
    };

    match ranking.recommendations.first() {
        Some(top) => format!(
            "{mode} mode: flip {} ({} risk, p(voltorb) {:.1}%); {source}{confidence}{quit}",
            top.position,
            top.risk_tier,
            top.p_voltorb * 100.0
        ),
        None => format!("{mode} mode: no flip can be recommended; {source}{confidence}{quit}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_common::{LineClue, Position, RiskTier};

    fn config_with_seed(seed: u64) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.estimator.seed = Some(seed);
        config
    }

    #[test]
    fn trivial_safe_board_forces_everything() {
        let request = AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5]);
        let response = analyze(&request, &config_with_seed(1)).unwrap();
        assert_eq!(response.game_state, GameState::Active);
        assert_eq!(response.guaranteed_safe.len(), 25);
        assert_eq!(response.forced_values.len(), 25);
        assert!(response.guaranteed_voltorb.is_empty());
        assert_eq!(response.recommendations.len(), 25);
        let top = &response.recommendations[0];
        assert_eq!(top.p_voltorb, 0.0);
        assert_eq!(top.risk_tier, RiskTier::Safe);
        assert_eq!(response.estimator.method, EstimateMethod::Degenerate);
        assert!(!response.quit_recommended);
        assert!(!response.explanation.is_empty());
    }

    #[test]
    fn revealed_voltorb_loses_the_round() {
        // A board where a voltorb reveal is consistent: row 0 carries one.
        let request = AnalysisRequest::from_clues(
            Mode::Level,
            [(4, 1), (5, 0), (5, 0), (5, 0), (5, 0)],
            [(4, 1), (5, 0), (5, 0), (5, 0), (5, 0)],
        )
        .with_reveal(Position(0, 0), 0);
        let response = analyze(&request, &config_with_seed(1)).unwrap();
        assert_eq!(response.game_state, GameState::Lost);
        assert!(response.recommendations.is_empty());
        assert!(!response.quit_recommended);
        assert!(response.explanation.contains("(0, 0)"));
    }

    #[test]
    fn contradictory_reveal_is_an_error() {
        let request = AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5])
            .with_reveal(Position(0, 0), 0);
        let err = analyze(&request, &config_with_seed(1)).unwrap_err();
        match err {
            Error::Contradiction { index, .. } => assert_eq!(index, 0),
            other => panic!("expected contradiction, got {other}"),
        }
    }

    #[test]
    fn validation_runs_before_solving() {
        let mut request = AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5]);
        request.rows[0] = LineClue::new(6, 0);
        let err = analyze(&request, &config_with_seed(1)).unwrap_err();
        assert!(matches!(err, Error::BadTotals { .. }));
    }

    #[test]
    fn won_round_skips_the_estimator() {
        // All cells 0 or 1; nothing worth flipping remains.
        let request = AnalysisRequest::from_clues(Mode::Profit, [(3, 2); 5], [(3, 2); 5]);
        let response = analyze(&request, &config_with_seed(1)).unwrap();
        assert_eq!(response.game_state, GameState::Won);
        assert!(response.recommendations.is_empty());
        assert!(!response.quit_recommended);
        assert_eq!(response.estimator.method, EstimateMethod::Propagation);
    }

    #[test]
    fn responses_are_reproducible_with_a_seed() {
        let request = AnalysisRequest::from_clues(
            Mode::Level,
            [(6, 1), (7, 0), (5, 2), (8, 0), (4, 2)],
            [(6, 1), (5, 1), (7, 1), (6, 1), (6, 1)],
        );
        let first = analyze(&request, &config_with_seed(17)).unwrap();
        let second = analyze(&request, &config_with_seed(17)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mode_is_echoed_back() {
        let request = AnalysisRequest::from_clues(Mode::Profit, [(6, 1); 5], [(6, 1); 5]);
        let response = analyze(&request, &config_with_seed(3)).unwrap();
        assert_eq!(response.mode, Mode::Profit);
        assert!(response.explanation.contains("profit mode"));
    }
}
