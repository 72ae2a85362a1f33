//! Actions: pawn moves and wall placements.
//!
//! `Action` is a closed sum type compared structurally. It has a compact
//! text notation: the 1-based row number followed by the column letter,
//! plus `h` or `v` for a wall.
//!
//! ```
//! use rust_quoridor::board::{Cell, Intersection, Orientation};
//! use rust_quoridor::core::Action;
//!
//! let step = Action::Move(Cell::new(0, 4));
//! assert_eq!(step.to_string(), "1e");
//!
//! let wall: Action = "3ch".parse().unwrap();
//! assert_eq!(wall, Action::PlaceWall(Intersection::new(2, 2), Orientation::Horizontal));
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::board::{Cell, Intersection, Orientation};
use crate::error::QuoridorError;

/// A complete game action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Move the pawn to a cell (step, jump or diagonal).
    Move(Cell),
    /// Anchor a wall at an intersection.
    PlaceWall(Intersection, Orientation),
}

impl Action {
    /// Shorthand for `Action::Move(Cell::new(row, col))`.
    #[must_use]
    pub const fn step_to(row: u8, col: u8) -> Self {
        Action::Move(Cell::new(row, col))
    }

    /// Shorthand for a wall action.
    #[must_use]
    pub const fn wall(row: u8, col: u8, orientation: Orientation) -> Self {
        Action::PlaceWall(Intersection::new(row, col), orientation)
    }

    #[must_use]
    pub fn is_move(&self) -> bool {
        matches!(self, Action::Move(_))
    }

    #[must_use]
    pub fn is_wall(&self) -> bool {
        matches!(self, Action::PlaceWall(..))
    }
}

/// Writes a square in `<row><letter>` form. Columns past `z` have no
/// letter, so those fall back to raw `(row,col)` coordinates.
fn write_square(f: &mut std::fmt::Formatter<'_>, row: u8, col: u8) -> std::fmt::Result {
    match char::from_u32(u32::from(b'a') + u32::from(col)).filter(char::is_ascii_lowercase) {
        Some(letter) => write!(f, "{}{}", u16::from(row) + 1, letter),
        None => write!(f, "({},{})", row, col),
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(cell) => write_square(f, cell.row, cell.col),
            Action::PlaceWall(at, orientation) => {
                write_square(f, at.row, at.col)?;
                write!(f, "{}", orientation.symbol())
            }
        }
    }
}

impl FromStr for Action {
    type Err = QuoridorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || QuoridorError::ParseAction(s.to_string());
        let text = s.trim();

        let digits = text.chars().take_while(|c| c.is_ascii_digit()).count();
        let row: u8 = text[..digits].parse().map_err(|_| bad())?;
        if row == 0 {
            return Err(bad());
        }
        let mut rest = text[digits..].chars();
        let col = match rest.next() {
            Some(c @ 'a'..='z') => c as u8 - b'a',
            _ => return Err(bad()),
        };
        let orientation = match rest.next() {
            None => return Ok(Action::Move(Cell::new(row - 1, col))),
            Some('h') => Orientation::Horizontal,
            Some('v') => Orientation::Vertical,
            Some(_) => return Err(bad()),
        };
        if rest.next().is_some() {
            return Err(bad());
        }
        Ok(Action::PlaceWall(Intersection::new(row - 1, col), orientation))
    }
}

/// An action together with who played it and when.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number before the action was applied.
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self { player, action, turn }
    }
}
