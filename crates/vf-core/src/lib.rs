//! Voltorb Flip Advisor Core Library
//!
//! A decision-support engine for the 5×5 Voltorb Flip board:
//! - Arithmetic request validation
//! - Constraint propagation over cell domains (guarantees and forced values)
//! - Marginal estimation by exact enumeration or rejection sampling
//! - Objective-driven move ranking and a quit advisory
//!
//! The binary entry point is in `main.rs`.

pub mod analyze;
pub mod board;
pub mod config;
pub mod decision;
pub mod estimate;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod validate;

pub use analyze::analyze;
pub use config::{AnalysisConfig, EstimatorConfig, PolicyConfig};
