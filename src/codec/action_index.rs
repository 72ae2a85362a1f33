//! Fixed-size integer action space.
//!
//! For an N×N board there are `N² + 2(N-1)²` indices:
//!
//! | Range                           | Action                         |
//! |---------------------------------|--------------------------------|
//! | `0 .. N²`                       | move to cell `row * N + col`   |
//! | `N² .. N² + (N-1)²`             | horizontal wall at `row * (N-1) + col` |
//! | `N² + (N-1)² .. N² + 2(N-1)²`   | vertical wall, same addressing |
//!
//! This layout is shared with evaluators and training data, so it must
//! not change.

use serde::{Deserialize, Serialize};

use super::perspective::perspective;
use crate::board::{span, Cell, Intersection, Orientation};
use crate::core::{Action, GameConfig, PlayerId};
use crate::error::QuoridorError;

/// Converts between [`Action`] values and indices for one board size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionCodec {
    grid_size: u8,
}

impl ActionCodec {
    #[must_use]
    pub const fn new(grid_size: u8) -> Self {
        Self { grid_size }
    }

    #[must_use]
    pub fn for_config(config: &GameConfig) -> Self {
        Self::new(config.grid_size)
    }

    #[inline]
    #[must_use]
    pub fn grid_size(&self) -> u8 {
        self.grid_size
    }

    /// Number of pawn-move indices, `N²`.
    #[inline]
    #[must_use]
    pub fn move_count(&self) -> usize {
        let n = self.grid_size as usize;
        n * n
    }

    /// Number of indices in each wall block, `(N-1)²`.
    #[inline]
    #[must_use]
    pub fn wall_block(&self) -> usize {
        span(self.grid_size) * span(self.grid_size)
    }

    #[inline]
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.move_count() + 2 * self.wall_block()
    }

    /// Index of `action` on the real board.
    #[must_use]
    pub fn encode(&self, action: &Action) -> usize {
        match *action {
            Action::Move(cell) => cell.index(self.grid_size),
            Action::PlaceWall(at, Orientation::Horizontal) => self.move_count() + at.index(self.grid_size),
            Action::PlaceWall(at, Orientation::Vertical) => {
                self.move_count() + self.wall_block() + at.index(self.grid_size)
            }
        }
    }

    /// Action at `index` on the real board.
    pub fn decode(&self, index: usize) -> Result<Action, QuoridorError> {
        let moves = self.move_count();
        let block = self.wall_block();
        if index < moves {
            return Ok(Action::Move(Cell::from_index(index, self.grid_size)));
        }
        let wall = index - moves;
        if wall < block {
            return Ok(Action::PlaceWall(
                Intersection::from_index(wall, self.grid_size),
                Orientation::Horizontal,
            ));
        }
        if wall < 2 * block {
            return Ok(Action::PlaceWall(
                Intersection::from_index(wall - block, self.grid_size),
                Orientation::Vertical,
            ));
        }
        Err(QuoridorError::InvalidActionIndex {
            index,
            action_count: self.action_count(),
        })
    }

    /// Index of `action` as seen by `player` (rotated for player 1).
    #[must_use]
    pub fn encode_for(&self, action: &Action, player: PlayerId) -> usize {
        self.encode(&perspective(action, player, self.grid_size))
    }

    /// Inverse of [`ActionCodec::encode_for`]: a canonical index back to
    /// the real board.
    pub fn decode_for(&self, index: usize, player: PlayerId) -> Result<Action, QuoridorError> {
        let action = self.decode(index)?;
        Ok(perspective(&action, player, self.grid_size))
    }
}
