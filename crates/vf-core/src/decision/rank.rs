//! Candidate ranking and the quit advisory.
//!
//! Both objectives sort over a total order: the objective's score, its
//! tie-break, then row-major position, so equal inputs always yield the
//! same recommendation list.

use crate::config::PolicyConfig;
use crate::decision::risk::tier_for;
use vf_common::{Mode, Position, Recommendation};
use vf_math::MassFunction;

/// One open cell with its marginal, before ranking.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub position: Position,
    pub mass: MassFunction,
}

/// Ranked recommendations plus the quit flag.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    pub recommendations: Vec<Recommendation>,
    pub quit_recommended: bool,
}

/// Rank candidates under the active objective.
///
/// Level mode climbs ascending hazard probability, breaking ties on higher
/// expected value. Profit mode climbs descending risk-adjusted reward
/// U = Σ_{v≥1} v·P(v), breaking ties on lower hazard probability.
pub fn rank(
    candidates: &[Candidate],
    mode: Mode,
    policy: &PolicyConfig,
    any_guaranteed_safe: bool,
) -> Ranking {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    match mode {
        Mode::Level => ordered.sort_by(|a, b| {
            a.mass
                .p_zero()
                .total_cmp(&b.mass.p_zero())
                .then(b.mass.expected_value().total_cmp(&a.mass.expected_value()))
                .then(a.position.cmp(&b.position))
        }),
        Mode::Profit => ordered.sort_by(|a, b| {
            b.mass
                .expected_value()
                .total_cmp(&a.mass.expected_value())
                .then(a.mass.p_zero().total_cmp(&b.mass.p_zero()))
                .then(a.position.cmp(&b.position))
        }),
    }

    let recommendations: Vec<Recommendation> = ordered
        .iter()
        .map(|candidate| {
            let p_voltorb = candidate.mass.p_zero();
            let expected_value = match mode {
                Mode::Level => candidate.mass.expected_value(),
                Mode::Profit => candidate.mass.conditional_positive_mean(),
            };
            Recommendation {
                position: candidate.position,
                p_voltorb,
                expected_value,
                risk_tier: tier_for(p_voltorb, &policy.risk_tiers),
                distribution: candidate.mass.masses(),
            }
        })
        .collect();

    let quit_recommended = match mode {
        Mode::Level => {
            let min_hazard = candidates
                .iter()
                .map(|c| c.mass.p_zero())
                .fold(f64::INFINITY, f64::min);
            !candidates.is_empty()
                && !any_guaranteed_safe
                && min_hazard > policy.quit_threshold_level
        }
        Mode::Profit => {
            let max_reward = candidates
                .iter()
                .map(|c| c.mass.expected_value())
                .fold(f64::NEG_INFINITY, f64::max);
            !candidates.is_empty() && max_reward < policy.quit_threshold_profit
        }
    };

    Ranking {
        recommendations,
        quit_recommended,
    }
}
