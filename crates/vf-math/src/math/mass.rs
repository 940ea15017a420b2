//! Probability mass functions over the four cell values {0, 1, 2, 3}.
//!
//! A marginal is a fixed-arity pmf: `mass(v)` is the probability that a cell
//! hides value `v`. Constructors validate their inputs and return `None`
//! rather than produce a non-distribution; downstream code treats a
//! `MassFunction` as normalized by construction.

use serde::{Deserialize, Serialize};

/// Number of support points: the values 0 through 3.
pub const SUPPORT: usize = 4;

/// Tolerance for the masses-sum-to-one check.
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Guard for divisions by the positive-value probability.
const POSITIVE_PROB_FLOOR: f64 = 1e-12;

/// A probability mass function over {0, 1, 2, 3}.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MassFunction([f64; SUPPORT]);

impl MassFunction {
    /// Build from raw masses, requiring non-negative, finite entries that sum
    /// to 1 within [`MASS_TOLERANCE`].
    pub fn from_masses(masses: [f64; SUPPORT]) -> Option<Self> {
        if masses.iter().any(|m| m.is_nan() || *m < 0.0 || *m > 1.0) {
            return None;
        }
        let total: f64 = masses.iter().sum();
        if (total - 1.0).abs() > MASS_TOLERANCE {
            return None;
        }
        Some(MassFunction(masses))
    }

    /// Build by normalizing occurrence counts. `None` when all counts are 0.
    pub fn from_counts(counts: [u64; SUPPORT]) -> Option<Self> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return None;
        }
        let mut masses = [0.0; SUPPORT];
        for (mass, count) in masses.iter_mut().zip(counts.iter()) {
            *mass = *count as f64 / total as f64;
        }
        Some(MassFunction(masses))
    }

    /// A point mass at `value`. `None` when the value is off-support.
    pub fn point(value: u8) -> Option<Self> {
        if value as usize >= SUPPORT {
            return None;
        }
        let mut masses = [0.0; SUPPORT];
        masses[value as usize] = 1.0;
        Some(MassFunction(masses))
    }

    /// Uniform over the listed support values. Duplicates are ignored.
    /// `None` when the list is empty or holds an off-support value.
    pub fn uniform_over(values: &[u8]) -> Option<Self> {
        let mut present = [false; SUPPORT];
        for &v in values {
            if v as usize >= SUPPORT {
                return None;
            }
            present[v as usize] = true;
        }
        let count = present.iter().filter(|p| **p).count();
        if count == 0 {
            return None;
        }
        let share = 1.0 / count as f64;
        let mut masses = [0.0; SUPPORT];
        for (mass, here) in masses.iter_mut().zip(present.iter()) {
            if *here {
                *mass = share;
            }
        }
        Some(MassFunction(masses))
    }

    /// P(value = v). Off-support values have probability 0.
    pub fn mass(&self, value: u8) -> f64 {
        self.0.get(value as usize).copied().unwrap_or(0.0)
    }

    /// P(value = 0), the hazard probability.
    pub fn p_zero(&self) -> f64 {
        self.0[0]
    }

    /// The raw masses, indexed by value.
    pub fn masses(&self) -> [f64; SUPPORT] {
        self.0
    }

    /// E[value] = Σ v·mass(v). Because the 0 value contributes nothing, this
    /// also equals the risk-adjusted reward (1 − p0)·E[value | value > 0].
    pub fn expected_value(&self) -> f64 {
        self.0
            .iter()
            .enumerate()
            .map(|(v, m)| v as f64 * m)
            .sum()
    }

    /// E[value | value > 0], with the denominator floored to stay finite
    /// when the cell is almost certainly a hazard.
    pub fn conditional_positive_mean(&self) -> f64 {
        let p_positive = (1.0 - self.p_zero()).max(POSITIVE_PROB_FLOOR);
        self.expected_value() / p_positive
    }

    /// Whether this is a point mass, and at which value.
    pub fn as_point(&self) -> Option<u8> {
        let mut found = None;
        for (v, m) in self.0.iter().enumerate() {
            if *m > 0.0 {
                if found.is_some() {
                    return None;
                }
                found = Some(v as u8);
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_masses_validates_sum() {
        assert!(MassFunction::from_masses([0.25, 0.25, 0.25, 0.25]).is_some());
        assert!(MassFunction::from_masses([0.5, 0.5, 0.5, 0.0]).is_none());
        assert!(MassFunction::from_masses([1.0, 0.0, 0.0, f64::NAN]).is_none());
        assert!(MassFunction::from_masses([-0.1, 0.6, 0.25, 0.25]).is_none());
    }

    #[test]
    fn from_counts_normalizes() {
        let mass = MassFunction::from_counts([1, 1, 1, 1]).unwrap();
        assert!((mass.mass(2) - 0.25).abs() < 1e-12);
        assert!(MassFunction::from_counts([0, 0, 0, 0]).is_none());
    }

    #[test]
    fn point_mass_expectations() {
        let mass = MassFunction::point(3).unwrap();
        assert_eq!(mass.p_zero(), 0.0);
        assert!((mass.expected_value() - 3.0).abs() < 1e-12);
        assert_eq!(mass.as_point(), Some(3));
        assert!(MassFunction::point(4).is_none());
    }

    #[test]
    fn uniform_over_support_subset() {
        let mass = MassFunction::uniform_over(&[1, 3]).unwrap();
        assert_eq!(mass.p_zero(), 0.0);
        assert!((mass.mass(1) - 0.5).abs() < 1e-12);
        assert!((mass.mass(2)).abs() < 1e-12);
        assert!((mass.expected_value() - 2.0).abs() < 1e-12);
        assert!(MassFunction::uniform_over(&[]).is_none());
        assert!(MassFunction::uniform_over(&[5]).is_none());
    }

    #[test]
    fn uniform_over_ignores_duplicates() {
        let mass = MassFunction::uniform_over(&[2, 2, 2]).unwrap();
        assert!((mass.mass(2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn conditional_positive_mean_matches_ratio() {
        let mass = MassFunction::from_masses([0.5, 0.25, 0.125, 0.125]).unwrap();
        let expected = (0.25 + 2.0 * 0.125 + 3.0 * 0.125) / 0.5;
        assert!((mass.conditional_positive_mean() - expected).abs() < 1e-12);
    }

    #[test]
    fn conditional_positive_mean_certain_hazard_stays_finite() {
        let mass = MassFunction::point(0).unwrap();
        assert!(mass.conditional_positive_mean().is_finite());
        assert_eq!(mass.expected_value(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_from_counts_is_normalized(counts in prop::array::uniform4(0u64..1_000_000)) {
            prop_assume!(counts.iter().sum::<u64>() > 0);
            let mass = MassFunction::from_counts(counts).unwrap();
            let total: f64 = mass.masses().iter().sum();
            prop_assert!((total - 1.0).abs() <= MASS_TOLERANCE);
        }

        #[test]
        fn prop_expected_value_bounds(counts in prop::array::uniform4(0u64..10_000)) {
            prop_assume!(counts.iter().sum::<u64>() > 0);
            let mass = MassFunction::from_counts(counts).unwrap();
            let ev = mass.expected_value();
            prop_assert!((0.0..=3.0).contains(&ev));
            prop_assert!(mass.conditional_positive_mean() >= ev - 1e-12);
        }
    }
}
