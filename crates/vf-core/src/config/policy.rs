//! Policy configuration types.
//!
//! Thresholds steering the decision layer: quit advisories per objective
//! and the hazard-probability cut points behind the qualitative risk tiers.

use serde::{Deserialize, Serialize};

/// Hazard-probability cut points for the qualitative tiers.
///
/// A cell is Safe at `p <= safe` (0 by default, so only proven cells), Low
/// up to `low`, Medium up to `medium`, and High above that.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTiers {
    #[serde(default = "default_safe_max")]
    pub safe: f64,
    #[serde(default = "default_low_max")]
    pub low: f64,
    #[serde(default = "default_medium_max")]
    pub medium: f64,
}

fn default_safe_max() -> f64 {
    0.0
}

fn default_low_max() -> f64 {
    0.15
}

fn default_medium_max() -> f64 {
    0.35
}

impl Default for RiskTiers {
    fn default() -> Self {
        RiskTiers {
            safe: default_safe_max(),
            low: default_low_max(),
            medium: default_medium_max(),
        }
    }
}

/// Decision-layer thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Level mode advises quitting when every open cell's hazard
    /// probability exceeds this and nothing is guaranteed safe.
    #[serde(default = "default_quit_threshold_level")]
    pub quit_threshold_level: f64,

    /// Profit mode advises quitting when no cell's risk-adjusted expected
    /// reward reaches this multiplier baseline.
    #[serde(default = "default_quit_threshold_profit")]
    pub quit_threshold_profit: f64,

    #[serde(default)]
    pub risk_tiers: RiskTiers,
}

fn default_quit_threshold_level() -> f64 {
    0.45
}

fn default_quit_threshold_profit() -> f64 {
    1.0
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            quit_threshold_level: default_quit_threshold_level(),
            quit_threshold_profit: default_quit_threshold_profit(),
            risk_tiers: RiskTiers::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let policy = PolicyConfig::default();
        assert_eq!(policy.quit_threshold_level, 0.45);
        assert_eq!(policy.quit_threshold_profit, 1.0);
        assert_eq!(policy.risk_tiers.safe, 0.0);
        assert_eq!(policy.risk_tiers.low, 0.15);
        assert_eq!(policy.risk_tiers.medium, 0.35);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let policy: PolicyConfig = toml::from_str("quit_threshold_level = 0.6").unwrap();
        assert_eq!(policy.quit_threshold_level, 0.6);
        assert_eq!(policy.quit_threshold_profit, 1.0);
        assert_eq!(policy.risk_tiers.low, 0.15);
    }
}
