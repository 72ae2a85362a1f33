//! Game configuration.
//!
//! `GameConfig` fixes the board size, wall supply and turn cap. It is
//! validated eagerly: `Quoridor::new` refuses an invalid config instead of
//! failing later in the middle of a game.

use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::board::Cell;
use crate::error::ConfigError;

/// Smallest supported board.
pub const MIN_GRID_SIZE: u8 = 3;

/// Largest supported board. Column letters in action notation run out
/// past `s`.
pub const MAX_GRID_SIZE: u8 = 19;

/// Rules parameters for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width and height in cells.
    pub grid_size: u8,

    /// Walls each player starts with.
    pub max_walls: u8,

    /// The game is drawn once this many actions have been played.
    pub max_turns: u32,

    /// When the square behind an adjacent opponent is off the board, allow
    /// the diagonal side-steps of the official rules. Off by default: only a
    /// wall behind the opponent enables diagonals.
    pub diagonal_jump_at_edge: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 9,
            max_walls: 10,
            max_turns: 200,
            diagonal_jump_at_edge: false,
        }
    }
}

impl GameConfig {
    /// A config for a `grid_size` board with `max_walls` walls per player.
    #[must_use]
    pub fn new(grid_size: u8, max_walls: u8) -> Self {
        Self {
            grid_size,
            max_walls,
            ..Self::default()
        }
    }

    /// Set the turn cap.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the walls per player.
    #[must_use]
    pub fn with_max_walls(mut self, max_walls: u8) -> Self {
        self.max_walls = max_walls;
        self
    }

    /// Choose the jump fallback when the opponent stands against an edge.
    #[must_use]
    pub fn with_diagonal_jump_at_edge(mut self, enabled: bool) -> Self {
        self.diagonal_jump_at_edge = enabled;
        self
    }

    /// Upper bound on `max_walls` for a board: one wall per intersection.
    #[must_use]
    pub fn wall_limit(grid_size: u8) -> u8 {
        let intersections = (grid_size as usize).saturating_sub(1).pow(2);
        intersections.min(u8::MAX as usize) as u8
    }

    /// Check every field against the supported bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
                max: MAX_GRID_SIZE,
            });
        }
        let limit = Self::wall_limit(self.grid_size);
        if self.max_walls > limit {
            return Err(ConfigError::WallCount {
                walls: self.max_walls,
                max: limit,
            });
        }
        if self.max_turns == 0 {
            return Err(ConfigError::MaxTurns);
        }
        Ok(())
    }

    /// Size of the fixed action index space: `N² + 2(N-1)²`.
    #[must_use]
    pub fn action_count(&self) -> usize {
        let n = self.grid_size as usize;
        n * n + 2 * (n - 1) * (n - 1)
    }

    /// The row `player` must reach to win.
    #[inline]
    #[must_use]
    pub fn goal_row(&self, player: PlayerId) -> u8 {
        if player == PlayerId::ZERO {
            self.grid_size - 1
        } else {
            0
        }
    }

    /// Where `player` starts: the middle of their home row.
    #[must_use]
    pub fn start_cell(&self, player: PlayerId) -> Cell {
        let col = self.grid_size / 2;
        if player == PlayerId::ZERO {
            Cell::new(0, col)
        } else {
            Cell::new(self.grid_size - 1, col)
        }
    }
}
