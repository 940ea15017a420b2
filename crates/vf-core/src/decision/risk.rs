//! Hazard-probability tiers.

use crate::config::RiskTiers;
use vf_common::RiskTier;

/// Map a hazard probability onto a qualitative tier.
///
/// With the default cut points only a provably-safe cell (p = 0) earns
/// `Safe`; sampling noise on a merely-likely-safe cell lands in `Low`.
pub fn tier_for(p_voltorb: f64, tiers: &RiskTiers) -> RiskTier {
    if p_voltorb <= tiers.safe {
        RiskTier::Safe
    } else if p_voltorb <= tiers.low {
        RiskTier::Low
    } else if p_voltorb <= tiers.medium {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}
