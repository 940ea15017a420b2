//! Error types for the Voltorb Flip Advisor.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Recoverability hints for automation
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! Errors can be formatted for human consumption with headline, reason, and fix:
//! ```text
//! ✗ Invalid Request
//!   Reason: row 2 clue out of range: sum=16, voltorbs=0
//!   Fix: Check the clue values against the board; five cells in 0..=3 bound each line.
//! ```
//!
//! # Agent-Facing Output
//!
//! Errors serialize to structured JSON:
//! ```json
//! {
//!   "code": 21,
//!   "category": "constraint",
//!   "message": "constraints are contradictory at row 0: voltorb count cannot be met",
//!   "recoverable": true,
//!   "suggested_action": "fix_request",
//!   "context": { "axis": "row", "index": 0 }
//! }
//! ```

use crate::grid::Axis;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for advisor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or arithmetically infeasible requests.
    Request,
    /// Constraint propagation contradictions.
    Constraint,
    /// Distribution estimation errors.
    Estimate,
    /// Configuration file or option errors.
    Config,
    /// File I/O and serialization errors.
    Io,
    /// Internal invariant violations.
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Request => write!(f, "request"),
            ErrorCategory::Constraint => write!(f, "constraint"),
            ErrorCategory::Estimate => write!(f, "estimate"),
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Io => write!(f, "io"),
            ErrorCategory::Internal => write!(f, "internal"),
        }
    }
}

/// Suggested actions for callers in response to errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Correct the request payload and resubmit.
    FixRequest,
    /// Re-enter the clues from the game screen; at least one is mistyped.
    RecheckClues,
    /// Raise the sample budget or deadline and retry.
    RaiseBudget,
    /// Run the `check` command for a detailed validation report.
    RunCheck,
    /// Report as a bug with the offending request.
    Report,
    /// No action needed (informational).
    None,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::FixRequest => write!(f, "fix_request"),
            SuggestedAction::RecheckClues => write!(f, "recheck_clues"),
            SuggestedAction::RaiseBudget => write!(f, "raise_budget"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::Report => write!(f, "report"),
            SuggestedAction::None => write!(f, "none"),
        }
    }
}

/// Unified error type for the Voltorb Flip Advisor.
#[derive(Error, Debug)]
pub enum Error {
    // Request errors (10-19)
    #[error("request shape invalid: expected 5 {axis} clues, got {count}")]
    BadShape { axis: Axis, count: usize },

    #[error("{axis} {index} clue out of range: sum={sum}, voltorbs={voltorbs}")]
    BadRange {
        axis: Axis,
        index: usize,
        sum: u32,
        voltorbs: u32,
    },

    #[error("row and column totals disagree: {detail}")]
    BadTotals { detail: String },

    #[error("revealed cell invalid: {detail}")]
    BadReveal { detail: String },

    #[error("revealed coordinate out of bounds: ({row}, {col})")]
    OutOfBounds { row: u32, col: u32 },

    // Constraint errors (20-29)
    #[error("constraints are contradictory at {axis} {index}: {detail}")]
    Contradiction {
        axis: Axis,
        index: usize,
        detail: String,
    },

    // Estimator errors (30-39)
    #[error("estimator confidence too low: {accepted} of {attempted} sampled boards accepted")]
    LowConfidence { accepted: u64, attempted: u64 },

    // Configuration errors (40-49)
    #[error("configuration error: {0}")]
    Config(String),

    // I/O errors (50-59)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Internal errors (90+)
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Request errors
    /// - 20-29: Constraint errors
    /// - 30-39: Estimator errors
    /// - 40-49: Configuration errors
    /// - 50-59: I/O errors
    /// - 90+: Internal errors
    pub fn code(&self) -> u32 {
        match self {
            Error::BadShape { .. } => 10,
            Error::BadRange { .. } => 11,
            Error::BadTotals { .. } => 12,
            Error::BadReveal { .. } => 13,
            Error::OutOfBounds { .. } => 14,
            Error::Contradiction { .. } => 21,
            Error::LowConfidence { .. } => 31,
            Error::Config(_) => 40,
            Error::Io(_) => 50,
            Error::Json(_) => 51,
            Error::Internal(_) => 90,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::BadShape { .. }
            | Error::BadRange { .. }
            | Error::BadTotals { .. }
            | Error::BadReveal { .. }
            | Error::OutOfBounds { .. } => ErrorCategory::Request,

            Error::Contradiction { .. } => ErrorCategory::Constraint,

            Error::LowConfidence { .. } => ErrorCategory::Estimate,

            Error::Config(_) => ErrorCategory::Config,

            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,

            Error::Internal(_) => ErrorCategory::Internal,
        }
    }

    /// Returns whether this error is potentially recoverable by the caller.
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Request errors: recoverable by correcting the payload
            Error::BadShape { .. }
            | Error::BadRange { .. }
            | Error::BadTotals { .. }
            | Error::BadReveal { .. }
            | Error::OutOfBounds { .. } => true,

            // A contradiction means the clues or reveals are wrong, which the
            // caller can fix by re-reading the game screen
            Error::Contradiction { .. } => true,

            // Recoverable with a larger budget or longer deadline
            Error::LowConfidence { .. } => true,

            Error::Config(_) => true,

            // I/O: often transient
            Error::Io(_) => true,
            Error::Json(_) => true,

            // Internal: a bug, not recoverable at runtime
            Error::Internal(_) => false,
        }
    }

    /// Returns the suggested action for callers.
    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::BadShape { .. } | Error::BadReveal { .. } | Error::OutOfBounds { .. } => {
                SuggestedAction::FixRequest
            }
            Error::BadRange { .. } | Error::BadTotals { .. } => SuggestedAction::RecheckClues,
            Error::Contradiction { .. } => SuggestedAction::RecheckClues,
            Error::LowConfidence { .. } => SuggestedAction::RaiseBudget,
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::Io(_) => SuggestedAction::FixRequest,
            Error::Json(_) => SuggestedAction::FixRequest,
            Error::Internal(_) => SuggestedAction::Report,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::BadShape { .. } => {
                "Supply exactly 5 row clues and 5 column clues, each with sum and voltorb count."
            }
            Error::BadRange { .. } => {
                "Check the clue values against the board; five cells in 0..=3 bound each line to sum in [5 - voltorbs, 3 * (5 - voltorbs)]."
            }
            Error::BadTotals { .. } => {
                "Row clues and column clues describe the same 25 cells, so their sums and voltorb counts must agree. Re-enter the clues."
            }
            Error::BadReveal { .. } => {
                "Each revealed cell needs a value in 0..=3 and a unique coordinate."
            }
            Error::OutOfBounds { .. } => {
                "Revealed coordinates are zero-based and must lie in 0..=4 for both row and column."
            }
            Error::Contradiction { .. } => {
                "No board satisfies these clues and reveals together. At least one entry is mistyped; run 'vf-core check' after correcting it."
            }
            Error::LowConfidence { .. } => {
                "Too few sampled boards satisfied the column clues. Retry with '--samples' raised or a longer deadline."
            }
            Error::Config(_) => {
                "Run 'vf-core check' to validate options, or drop '--config' to use the defaults."
            }
            Error::Io(_) => {
                "Check that the input path exists and is readable, then retry."
            }
            Error::Json(_) => {
                "Invalid JSON in the request. Check syntax with 'cat <file> | jq .'."
            }
            Error::Internal(_) => {
                "Internal invariant violation. Please report this with the offending request attached."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::BadShape { .. } => "Invalid Request Shape",
            Error::BadRange { .. } => "Clue Out of Range",
            Error::BadTotals { .. } => "Clue Totals Disagree",
            Error::BadReveal { .. } => "Invalid Revealed Cell",
            Error::OutOfBounds { .. } => "Coordinate Out of Bounds",
            Error::Contradiction { .. } => "Contradictory Constraints",
            Error::LowConfidence { .. } => "Low Estimator Confidence",
            Error::Config(_) => "Configuration Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
            Error::Internal(_) => "Internal Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Suggested action for callers.
    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., line index, coordinate).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::BadShape { axis, count } => {
                context.insert("axis".to_string(), serde_json::json!(axis.to_string()));
                context.insert("count".to_string(), serde_json::json!(count));
            }
            Error::BadRange { axis, index, .. } => {
                context.insert("axis".to_string(), serde_json::json!(axis.to_string()));
                context.insert("index".to_string(), serde_json::json!(index));
            }
            Error::OutOfBounds { row, col } => {
                context.insert("row".to_string(), serde_json::json!(row));
                context.insert("col".to_string(), serde_json::json!(col));
            }
            Error::Contradiction { axis, index, .. } => {
                context.insert("axis".to_string(), serde_json::json!(axis.to_string()));
                context.insert("index".to_string(), serde_json::json!(index));
            }
            Error::LowConfidence {
                accepted,
                attempted,
            } => {
                context.insert("accepted".to_string(), serde_json::json!(accepted));
                context.insert("attempted".to_string(), serde_json::json!(attempted));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human consumption with headline, reason, and fix.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let mark = if use_color { "\x1b[31m✗\x1b[0m" } else { "✗" };
    format!(
        "{mark} {}\n  Reason: {}\n  Fix: {}",
        err.headline(),
        err,
        err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_stability() {
        let err = Error::BadShape {
            axis: Axis::Row,
            count: 4,
        };
        assert_eq!(err.code(), 10);

        let err = Error::Contradiction {
            axis: Axis::Col,
            index: 3,
            detail: "sum target unreachable".to_string(),
        };
        assert_eq!(err.code(), 21);

        let err = Error::Internal("oops".to_string());
        assert_eq!(err.code(), 90);
    }

    #[test]
    fn test_error_category() {
        let err = Error::BadTotals {
            detail: "sums 30 vs 29".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Request);

        let err = Error::LowConfidence {
            accepted: 0,
            attempted: 20000,
        };
        assert_eq!(err.category(), ErrorCategory::Estimate);
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::Config("bad threshold".to_string()).is_recoverable());
        assert!(!Error::Internal("bug".to_string()).is_recoverable());
    }

    #[test]
    fn test_structured_error_context() {
        let err = Error::Contradiction {
            axis: Axis::Row,
            index: 0,
            detail: "voltorb count cannot be met".to_string(),
        };
        let structured = StructuredError::from(&err);
        assert_eq!(structured.code, 21);
        assert_eq!(structured.category, ErrorCategory::Constraint);
        assert!(structured.recoverable);
        assert_eq!(structured.context["index"], serde_json::json!(0));
        assert_eq!(structured.context["axis"], serde_json::json!("row"));
    }

    #[test]
    fn test_structured_error_json_roundtrip() {
        let err = Error::OutOfBounds { row: 7, col: 2 };
        let json = StructuredError::from(&err).to_json();
        let parsed: StructuredError = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.code, 14);
        assert_eq!(parsed.suggested_action, SuggestedAction::FixRequest);
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::BadReveal {
            detail: "duplicate coordinate (1, 1)".to_string(),
        };
        let text = format_error_human(&err, false);
        assert!(text.contains("Invalid Revealed Cell"));
        assert!(text.contains("Reason:"));
        assert!(text.contains("Fix:"));
    }
}
