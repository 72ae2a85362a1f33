//! Error types shared across the engine.
//!
//! Search and evaluator failures live next to their modules
//! (`mcts::SearchError`, `nn::EvaluatorError`); this module holds the
//! rules-level and configuration errors every other module builds on.

use thiserror::Error;

use crate::core::Action;

/// Configuration rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid size {size} is outside the supported range {min}..={max}")]
    GridSize { size: u8, min: u8, max: u8 },

    #[error("wall count {walls} exceeds the maximum of {max} for this grid")]
    WallCount { walls: u8, max: u8 },

    #[error("max_turns must be at least 1")]
    MaxTurns,

    #[error("invalid search parameter: {0}")]
    Search(String),

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

/// Why an action was refused by the rules engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalReason {
    /// The game has already ended.
    GameOver,
    /// Cell or intersection lies outside the board.
    OutOfBounds,
    /// The pawn cannot reach that cell this turn.
    Unreachable,
    /// The mover has no walls left.
    NoWallsLeft,
    /// The intersection already holds a wall.
    Occupied,
    /// A colinear wall of the same orientation abuts this intersection.
    Overlap,
    /// The wall would cut a player off from their goal row.
    Strands,
}

impl std::fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            IllegalReason::GameOver => "the game is over",
            IllegalReason::OutOfBounds => "target is off the board",
            IllegalReason::Unreachable => "pawn cannot reach that cell",
            IllegalReason::NoWallsLeft => "no walls remaining",
            IllegalReason::Occupied => "intersection already occupied",
            IllegalReason::Overlap => "wall overlaps an adjacent wall",
            IllegalReason::Strands => "wall would block a player from their goal",
        };
        f.write_str(text)
    }
}

/// Errors raised by the rules engine and action codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoridorError {
    #[error("illegal action {action}: {reason}")]
    IllegalAction { action: Action, reason: IllegalReason },

    #[error("action index {index} is outside the action space of size {action_count}")]
    InvalidActionIndex { index: usize, action_count: usize },

    #[error("cannot parse action: {0}")]
    ParseAction(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl QuoridorError {
    /// The refusal reason, if this is an illegal-action error.
    #[must_use]
    pub fn illegal_reason(&self) -> Option<IllegalReason> {
        match self {
            QuoridorError::IllegalAction { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
