//! Voltorb Flip Advisor common types, errors, and payload schemas.
//!
//! This crate provides foundational types shared across vf-core modules:
//! - Grid geometry and coordinate types
//! - Request/response payload schemas with JSON Schema derives
//! - Common error types with stable codes
//! - Output format specifications

pub mod error;
pub mod grid;
pub mod output;
pub mod request;
pub mod response;
pub mod schema;

pub use error::{format_error_human, Error, ErrorCategory, Result, StructuredError};
pub use grid::{
    Axis, GameState, Mode, Position, RiskTier, CELL_COUNT, GRID_SIZE, MAX_CELL_VALUE, VALUE_COUNT,
};
pub use output::OutputFormat;
pub use request::{AnalysisRequest, LineClue, RevealedCell};
pub use response::{
    AnalysisResponse, EstimateMethod, EstimatorReport, ForcedValue, Recommendation,
};
pub use schema::SCHEMA_VERSION;
