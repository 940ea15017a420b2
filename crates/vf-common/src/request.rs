//! Analysis request schema.
//!
//! The request carries the clue digits printed beside the board plus any
//! cells the player has already flipped. It matches the
//! request.schema.json specification.

use crate::grid::{Mode, Position};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Clue for a single row or column: the sum of its five values and how many
/// of them are voltorbs (zeros).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LineClue {
    /// Required sum of the line's five cell values.
    pub sum: u32,
    /// Required count of zeros among the line's five cells.
    pub voltorbs: u32,
}

impl LineClue {
    pub fn new(sum: u32, voltorbs: u32) -> Self {
        LineClue { sum, voltorbs }
    }
}

/// A cell the player has already flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RevealedCell {
    /// Board coordinate as `[row, col]`.
    pub position: Position,
    /// The value shown, in `0..=3`. A 0 means the round was lost.
    pub value: u8,
}

/// A full analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AnalysisRequest {
    /// Advisory objective.
    #[serde(default)]
    pub mode: Mode,
    /// Clues for rows 0 through 4, in order.
    pub rows: Vec<LineClue>,
    /// Clues for columns 0 through 4, in order.
    pub cols: Vec<LineClue>,
    /// Already-flipped cells. Coordinates must not repeat.
    #[serde(default)]
    pub revealed: Vec<RevealedCell>,
}

impl AnalysisRequest {
    /// Build a request from row/column clue pairs, no reveals.
    pub fn from_clues(mode: Mode, rows: [(u32, u32); 5], cols: [(u32, u32); 5]) -> Self {
        AnalysisRequest {
            mode,
            rows: rows.iter().map(|&(s, v)| LineClue::new(s, v)).collect(),
            cols: cols.iter().map(|&(s, v)| LineClue::new(s, v)).collect(),
            revealed: Vec::new(),
        }
    }

    /// Add a revealed cell, replacing any prior reveal at the same position.
    pub fn with_reveal(mut self, position: Position, value: u8) -> Self {
        self.revealed.retain(|r| r.position != position);
        self.revealed.push(RevealedCell { position, value });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parses_minimal_json() {
        let json = r#"{
            "mode": "profit",
            "rows": [{"sum": 5, "voltorbs": 0}, {"sum": 5, "voltorbs": 0},
                     {"sum": 5, "voltorbs": 0}, {"sum": 5, "voltorbs": 0},
                     {"sum": 5, "voltorbs": 0}],
            "cols": [{"sum": 5, "voltorbs": 0}, {"sum": 5, "voltorbs": 0},
                     {"sum": 5, "voltorbs": 0}, {"sum": 5, "voltorbs": 0},
                     {"sum": 5, "voltorbs": 0}]
        }"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mode, Mode::Profit);
        assert_eq!(request.rows.len(), 5);
        assert!(request.revealed.is_empty());
    }

    #[test]
    fn test_request_mode_defaults_to_level() {
        let json = r#"{"rows": [], "cols": []}"#;
        let request: AnalysisRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.mode, Mode::Level);
    }

    #[test]
    fn test_request_rejects_unknown_fields() {
        let json = r#"{"rows": [], "cols": [], "grid": []}"#;
        assert!(serde_json::from_str::<AnalysisRequest>(json).is_err());
    }

    #[test]
    fn test_with_reveal_replaces_duplicate() {
        let request =
            AnalysisRequest::from_clues(Mode::Level, [(5, 0); 5], [(5, 0); 5])
                .with_reveal(Position(1, 1), 2)
                .with_reveal(Position(1, 1), 3);
        assert_eq!(request.revealed.len(), 1);
        assert_eq!(request.revealed[0].value, 3);
    }
}
