//! Game state.
//!
//! ## Immutability
//!
//! `GameState` is a value: `Quoridor::apply` returns a new state and never
//! touches the old one. The wall grid is an `im::Vector`, so successors
//! share structure with their parent and cloning is cheap enough to branch
//! freely during search.
//!
//! ## Derived data
//!
//! The connectivity oracle is an index over the walls, rebuilt or updated
//! alongside them. It is not part of the state's identity: equality only
//! compares the source-of-truth fields.

use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerMap};
use crate::board::{Cell, ConnectivityOracle, Direction, WallGrid};

/// Where a game stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won(PlayerId),
    /// The turn cap was reached with no winner.
    Drawn,
}

/// A complete Quoridor position.
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) positions: PlayerMap<Cell>,
    pub(crate) walls: WallGrid,
    pub(crate) walls_remaining: PlayerMap<u8>,
    pub(crate) turn: u32,
    pub(crate) current_player: PlayerId,
    pub(crate) status: GameStatus,
    pub(crate) connectivity: ConnectivityOracle,
}

impl GameState {
    /// Assemble a state, rebuilding the connectivity index from `walls`.
    pub(crate) fn from_parts(
        positions: PlayerMap<Cell>,
        walls: WallGrid,
        walls_remaining: PlayerMap<u8>,
        turn: u32,
        current_player: PlayerId,
        status: GameStatus,
    ) -> Self {
        let connectivity = ConnectivityOracle::from_walls(&walls);
        Self {
            positions,
            walls,
            walls_remaining,
            turn,
            current_player,
            status,
            connectivity,
        }
    }

    /// Board width in cells.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u8 {
        self.walls.size()
    }

    /// Both pawns.
    #[inline]
    #[must_use]
    pub fn positions(&self) -> &PlayerMap<Cell> {
        &self.positions
    }

    /// One player's pawn.
    #[inline]
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Cell {
        self.positions[player]
    }

    #[inline]
    #[must_use]
    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    #[inline]
    #[must_use]
    pub fn walls_remaining(&self, player: PlayerId) -> u8 {
        self.walls_remaining[player]
    }

    /// Actions played so far.
    #[inline]
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The player to move.
    #[inline]
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::InProgress
    }

    /// The winner, if the game was won.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Won(player) => Some(player),
            _ => None,
        }
    }

    /// The pawn occupying `cell`, if any.
    #[must_use]
    pub fn occupant(&self, cell: Cell) -> Option<PlayerId> {
        self.positions
            .iter()
            .find(|(_, pos)| **pos == cell)
            .map(|(player, _)| player)
    }

    pub(crate) fn connectivity(&self) -> &ConnectivityOracle {
        &self.connectivity
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.positions == other.positions
            && self.walls == other.walls
            && self.walls_remaining == other.walls_remaining
            && self.turn == other.turn
            && self.current_player == other.current_player
            && self.status == other.status
    }
}

impl Eq for GameState {}

/// ASCII board: `0`/`1` pawns, `|` and `-` wall segments.
impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.size();
        for row in 0..size {
            for col in 0..size {
                let cell = Cell::new(row, col);
                let glyph = match self.occupant(cell) {
                    Some(player) => char::from(b'0' + player.index() as u8),
                    None => '.',
                };
                write!(f, "{glyph}")?;
                if col + 1 < size {
                    let sep = if self.walls.blocks(cell, Direction::Right) { '|' } else { ' ' };
                    write!(f, "{sep}")?;
                }
            }
            writeln!(f)?;
            if row + 1 < size {
                for col in 0..size {
                    let below = if self.walls.blocks(Cell::new(row, col), Direction::Down) { '-' } else { ' ' };
                    write!(f, "{below}")?;
                    if col + 1 < size {
                        write!(f, " ")?;
                    }
                }
                writeln!(f)?;
            }
        }
        write!(
            f,
            "turn {} | to move: {} | walls {}/{}",
            self.turn,
            self.current_player,
            self.walls_remaining[PlayerId::ZERO],
            self.walls_remaining[PlayerId::ONE]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Intersection, Orientation};

    fn sample() -> GameState {
        GameState::from_parts(
            PlayerMap::from_pair(Cell::new(0, 1), Cell::new(2, 1)),
            WallGrid::new(3).with_wall(Intersection::new(0, 0), Orientation::Horizontal),
            PlayerMap::from_pair(1, 2),
            3,
            PlayerId::ONE,
            GameStatus::InProgress,
        )
    }

    #[test]
    fn test_accessors() {
        let state = sample();
        assert_eq!(state.size(), 3);
        assert_eq!(state.position(PlayerId::ONE), Cell::new(2, 1));
        assert_eq!(state.walls_remaining(PlayerId::ZERO), 1);
        assert_eq!(state.turn(), 3);
        assert_eq!(state.current_player(), PlayerId::ONE);
        assert!(!state.is_terminal());
        assert_eq!(state.winner(), None);
        assert_eq!(state.occupant(Cell::new(0, 1)), Some(PlayerId::ZERO));
        assert_eq!(state.occupant(Cell::new(1, 1)), None);
    }

    #[test]
    fn test_equality_ignores_oracle_layout() {
        let state = sample();
        let mut other = state.clone();
        other.connectivity = ConnectivityOracle::new(3);
        assert_eq!(state, other);

        other.turn += 1;
        assert_ne!(state, other);
    }

    #[test]
    fn test_render() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ". 0 .");
        assert_eq!(lines[1], "- -  ");
        assert_eq!(lines[4], ". 1 .");
        assert!(lines[5].starts_with("turn 3 | to move: Player 1"));
    }
}
