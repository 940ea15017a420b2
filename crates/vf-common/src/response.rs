//! Analysis response schema.
//!
//! The response is the advisor's public result object. It adopts the
//! superset schema: earlier revisions of the engine omitted
//! `forced_values`, `game_state`, and the per-recommendation
//! `distribution`; all are first-class here.

use crate::grid::{GameState, Mode, Position, RiskTier, VALUE_COUNT};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A singleton-domain cell discovered by propagation rather than flipped by
/// the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForcedValue {
    pub row: u8,
    pub col: u8,
    /// The only value the cell can hold, in `0..=3`.
    pub value: u8,
}

/// One ranked flip candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recommendation {
    /// Board coordinate as `[row, col]`.
    pub position: Position,
    /// Probability that this cell hides a voltorb; equals `distribution[0]`.
    pub p_voltorb: f64,
    /// E[value] in level mode, E[value | value > 0] in profit mode.
    pub expected_value: f64,
    /// Qualitative hazard tier derived from `p_voltorb`.
    pub risk_tier: RiskTier,
    /// Marginal distribution over cell values; index `v` holds P(value = v).
    pub distribution: [f64; VALUE_COUNT],
}

/// How the marginals in a response were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMethod {
    /// Propagation alone settled the round (won/lost); no marginals computed.
    Propagation,
    /// Every open cell was forced; marginals are point masses.
    Degenerate,
    /// Exact enumeration of the full feasible board set.
    Exact,
    /// Monte-Carlo rejection sampling.
    Sampled,
}

impl std::fmt::Display for EstimateMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateMethod::Propagation => write!(f, "propagation"),
            EstimateMethod::Degenerate => write!(f, "degenerate"),
            EstimateMethod::Exact => write!(f, "exact"),
            EstimateMethod::Sampled => write!(f, "sampled"),
        }
    }
}

/// Diagnostics describing how the estimator arrived at its marginals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimatorReport {
    pub method: EstimateMethod,
    /// Boards that satisfied every constraint (samples accepted, or boards
    /// enumerated on the exact path).
    pub accepted: u64,
    /// Sampling attempts made; equals `accepted` on non-sampled paths.
    pub attempted: u64,
    /// Set when too few boards were accepted for trustworthy marginals.
    pub low_confidence: bool,
}

impl EstimatorReport {
    /// Report for responses that never reached the estimator.
    pub fn propagation_only() -> Self {
        EstimatorReport {
            method: EstimateMethod::Propagation,
            accepted: 0,
            attempted: 0,
            low_confidence: false,
        }
    }
}

/// The advisor's full answer to one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisResponse {
    /// Response schema version, e.g. `"1.0.0"`.
    pub schema_version: String,
    /// The objective the rankings were computed under, echoed back.
    pub mode: Mode,
    /// Round classification: `active`, `won`, or `lost`.
    pub game_state: GameState,
    /// Open cells whose domain excludes 0, sorted row-major.
    pub guaranteed_safe: Vec<Position>,
    /// Open cells whose domain is exactly {0}, sorted row-major.
    pub guaranteed_voltorb: Vec<Position>,
    /// Cells pinned to a single value by propagation, sorted row-major.
    pub forced_values: Vec<ForcedValue>,
    /// Flip candidates, best first under the active objective.
    pub recommendations: Vec<Recommendation>,
    /// Whether stopping is preferable under the active objective.
    pub quit_recommended: bool,
    /// Short human-readable summary of the advice.
    pub explanation: String,
    /// Estimator diagnostics.
    pub estimator: EstimatorReport,
}
