//! Pawn move generation, including jumps.
//!
//! From the mover's cell, each open orthogonal neighbour is a move unless
//! the opponent stands there. Then the mover may jump straight over the
//! opponent if nothing blocks the far side; otherwise each side cell next
//! to the opponent that is on the board and not walled off is a move.

use smallvec::SmallVec;

use crate::board::{Cell, Direction};
use crate::core::GameState;

/// Destinations available to the player to move, in cell-index order.
///
/// With `diagonal_at_edge == false`, an opponent standing against the
/// board edge cannot be jumped at all; only a wall behind the opponent
/// opens the diagonals.
#[must_use]
pub fn pawn_moves(state: &GameState, diagonal_at_edge: bool) -> SmallVec<[Cell; 8]> {
    let size = state.size();
    let walls = state.walls();
    let mover = state.current_player();
    let from = state.position(mover);
    let opponent = state.position(mover.opponent());
    let mut out: SmallVec<[Cell; 8]> = SmallVec::new();

    for direction in Direction::ALL {
        let Some(next) = walls.open_step(from, direction) else {
            continue;
        };
        if next != opponent {
            out.push(next);
            continue;
        }

        match next.step(direction, size) {
            Some(beyond) if !walls.blocks(next, direction) => {
                out.push(beyond);
                continue;
            }
            None if !diagonal_at_edge => continue,
            _ => {}
        }
        for side in direction.perpendicular() {
            if let Some(diagonal) = walls.open_step(next, side) {
                out.push(diagonal);
            }
        }
    }

    out.sort_unstable_by_key(|cell| cell.index(size));
    out
}
