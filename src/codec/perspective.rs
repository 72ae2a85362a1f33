//! The 180° perspective transform and transposition keys.
//!
//! Quoridor is point-symmetric: rotating the board half a turn and
//! swapping the players' roles maps every position onto an equivalent one.
//! Search and feature encoding always look at the board from the side of
//! the player to move, so a single action index space serves both players.
//!
//! Rotation maps cell `(r, c)` to `(N-1-r, N-1-c)` and intersection
//! `(r, c)` to `(N-2-r, N-2-c)`. Wall orientation is preserved. Every
//! transform here is an involution.

use crate::board::{Cell, Intersection, WallGrid};
use crate::core::{Action, GameState, GameStatus, PlayerId};

#[inline]
#[must_use]
pub fn rotate_cell(cell: Cell, size: u8) -> Cell {
    Cell::new(size - 1 - cell.row, size - 1 - cell.col)
}

#[inline]
#[must_use]
pub fn rotate_intersection(at: Intersection, size: u8) -> Intersection {
    Intersection::new(size - 2 - at.row, size - 2 - at.col)
}

#[must_use]
pub fn rotate_action(action: &Action, size: u8) -> Action {
    match *action {
        Action::Move(cell) => Action::Move(rotate_cell(cell, size)),
        Action::PlaceWall(at, orientation) => Action::PlaceWall(rotate_intersection(at, size), orientation),
    }
}

/// `action` as seen by `player`: unchanged for player 0, rotated for
/// player 1. Applying it twice gives back the original action.
#[must_use]
pub fn perspective(action: &Action, player: PlayerId, size: u8) -> Action {
    if player == PlayerId::ZERO {
        *action
    } else {
        rotate_action(action, size)
    }
}

/// Rotate the board and swap the players' roles.
///
/// Player 1's pawn, walls and supply become player 0's and vice versa; the
/// side to move flips with them, so a state with player 1 to move comes
/// back with player 0 to move. The turn counter is unchanged.
#[must_use]
pub fn flip_perspective(state: &GameState) -> GameState {
    let size = state.size();
    let positions = state.positions().swapped().map(|&cell| rotate_cell(cell, size));
    let mut walls = WallGrid::new(size);
    for (at, orientation) in state.walls().iter() {
        walls.place(rotate_intersection(at, size), orientation);
    }
    let walls_remaining = state.walls_remaining.swapped();
    let status = match state.status() {
        GameStatus::Won(player) => GameStatus::Won(player.opponent()),
        other => other,
    };
    GameState::from_parts(
        positions,
        walls,
        walls_remaining,
        state.turn(),
        state.current_player().opponent(),
        status,
    )
}

/// The state as seen by the player to move, who always appears as
/// player 0.
#[must_use]
pub fn canonical_state(state: &GameState) -> GameState {
    if state.current_player() == PlayerId::ZERO {
        state.clone()
    } else {
        flip_perspective(state)
    }
}

/// Transposition-table identity of a state.
///
/// Encodes board size, pawns, wall supplies, side to move, turn and every
/// wall slot, one byte per field element.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Key for `state`; with `canonical`, the key of its canonical view.
#[must_use]
pub fn state_key(state: &GameState, canonical: bool) -> StateKey {
    if canonical && state.current_player() == PlayerId::ONE {
        return encode_key(&flip_perspective(state));
    }
    encode_key(state)
}

fn encode_key(state: &GameState) -> StateKey {
    let walls = state.walls();
    let span = crate::board::span(state.size());
    let mut bytes = Vec::with_capacity(12 + span * span);
    bytes.push(state.size());
    for player in PlayerId::all() {
        let cell = state.position(player);
        bytes.extend_from_slice(&[cell.row, cell.col, state.walls_remaining(player)]);
    }
    bytes.push(state.current_player().index() as u8);
    bytes.extend_from_slice(&state.turn().to_le_bytes());
    bytes.extend(walls.slots().map(|slot| match slot {
        None => 0,
        Some(orientation) => 1 + orientation as u8,
    }));
    StateKey(bytes.into_boxed_slice())
}
