//! Decision layer: risk tiers, objective rankings, and the quit advisory.

pub mod rank;
pub mod risk;

pub use rank::{rank, Candidate, Ranking};
pub use risk::tier_for;
