//! Grid geometry and closed enums shared across the advisor.
//!
//! The board is a fixed 5×5 grid. Coordinates are zero-based `(row, col)`
//! pairs and serialize as two-element arrays so payloads read as
//! `"position": [2, 4]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of rows and columns on the board.
pub const GRID_SIZE: usize = 5;

/// Total number of cells.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Largest value a cell can hide.
pub const MAX_CELL_VALUE: u8 = 3;

/// Number of distinct cell values (0 through 3).
pub const VALUE_COUNT: usize = MAX_CELL_VALUE as usize + 1;

/// A zero-based board coordinate, serialized as `[row, col]`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct Position(pub u8, pub u8);

impl Position {
    pub fn row(&self) -> u8 {
        self.0
    }

    pub fn col(&self) -> u8 {
        self.1
    }

    /// Whether both coordinates lie on the 5×5 board.
    pub fn in_bounds(&self) -> bool {
        (self.0 as usize) < GRID_SIZE && (self.1 as usize) < GRID_SIZE
    }

    /// Row-major cell index in `0..25`.
    pub fn index(&self) -> usize {
        self.0 as usize * GRID_SIZE + self.1 as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

/// A line orientation: one of the five rows or five columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Col,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Col => write!(f, "column"),
        }
    }
}

/// Advisory objective selected by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Survival first: minimize the probability of flipping a voltorb.
    #[default]
    Level,
    /// Reward first: maximize risk-adjusted expected multiplier gain.
    Profit,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Level => write!(f, "level"),
            Mode::Profit => write!(f, "profit"),
        }
    }
}

/// Round state derived from reveals and propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    /// Hidden cells remain worth flipping.
    Active,
    /// Every remaining hidden cell can only be a 0 or a 1; the round is cleared.
    Won,
    /// A revealed cell is a voltorb.
    Lost,
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Active => write!(f, "active"),
            GameState::Won => write!(f, "won"),
            GameState::Lost => write!(f, "lost"),
        }
    }
}

/// Qualitative hazard tier attached to every recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    /// Provably not a voltorb.
    Safe,
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Safe => write!(f, "safe"),
            RiskTier::Low => write!(f, "low"),
            RiskTier::Medium => write!(f, "medium"),
            RiskTier::High => write!(f, "high"),
        }
    }
}
