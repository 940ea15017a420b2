//! Exit codes for the vf-core CLI.
//!
//! Exit codes communicate the outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-9: Successful analysis outcomes (parse outcome from code, not output)
//! - 10-19: Request/environment errors (recoverable by the caller)
//! - 20-29: Internal errors (bugs, should be reported)

use vf_common::{Error, ErrorCategory};

/// Exit codes for vf-core operations.
///
/// These codes are a stable contract for automation. Changes require a
/// major version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis produced advice; flipping on is reasonable.
    Clean = 0,

    /// Analysis produced advice and the quit advisory fired.
    QuitAdvised = 1,

    /// The round is already decided (won or lost).
    RoundOver = 2,

    /// Invalid arguments or unreadable input.
    ArgsError = 10,

    /// The request failed validation.
    InvalidRequest = 11,

    /// The clues and reveals are contradictory.
    ContradictoryRequest = 12,

    /// The estimator could not reach usable confidence.
    LowConfidence = 13,

    /// Configuration file or option rejected.
    ConfigError = 14,

    /// Internal error (bug - please report).
    InternalError = 20,
}

impl ExitCode {
    /// The exit code owed to a failed analysis.
    pub fn from_error(err: &Error) -> Self {
        match err.category() {
            ErrorCategory::Request => ExitCode::InvalidRequest,
            ErrorCategory::Constraint => ExitCode::ContradictoryRequest,
            ErrorCategory::Estimate => ExitCode::LowConfidence,
            ErrorCategory::Config => ExitCode::ConfigError,
            ErrorCategory::Io => ExitCode::ArgsError,
            ErrorCategory::Internal => ExitCode::InternalError,
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vf_common::Axis;

    #[test]
    fn error_categories_map_to_stable_codes() {
        let err = Error::BadShape {
            axis: Axis::Row,
            count: 3,
        };
        assert_eq!(ExitCode::from_error(&err), ExitCode::InvalidRequest);
        assert_eq!(ExitCode::InvalidRequest.code(), 11);

        let err = Error::Contradiction {
            axis: Axis::Col,
            index: 2,
            detail: "sum target unreachable".to_string(),
        };
        assert_eq!(ExitCode::from_error(&err).code(), 12);

        let err = Error::Internal("bug".to_string());
        assert_eq!(ExitCode::from_error(&err).code(), 20);
    }

    #[test]
    fn outcome_codes_are_stable() {
        assert_eq!(ExitCode::Clean.code(), 0);
        assert_eq!(ExitCode::QuitAdvised.code(), 1);
        assert_eq!(ExitCode::RoundOver.code(), 2);
    }
}
