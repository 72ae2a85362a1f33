//! Linear position evaluation for minimax.
//!
//! Four features, all from the point of view of the maximizing player `me`:
//!
//! - `f1`: rows `me` has advanced from their home row
//! - `f2`: `f1` minus the same for the opponent
//! - `f3`: `1 / steps` for `me` to reach the next row toward the goal
//! - `f4`: the same for the opponent
//!
//! Score = `f1 + f2 + f3 - f4`. A finished game scores `±WIN_SCORE`, which
//! dominates every feature sum.

use crate::board::{shortest_distance, Cell};
use crate::core::{GameState, PlayerId};
use crate::rules::{GameResult, Quoridor};

/// Score of a won position.
pub const WIN_SCORE: f32 = 1000.0;

/// Evaluate `state` for `me`.
#[must_use]
pub fn evaluate(game: &Quoridor, state: &GameState, me: PlayerId) -> f32 {
    match game.result(state) {
        Some(GameResult::Winner(winner)) if winner == me => return WIN_SCORE,
        Some(GameResult::Winner(_)) => return -WIN_SCORE,
        Some(GameResult::Draw) => return 0.0,
        None => {}
    }

    let them = me.opponent();
    let f1 = progress(game, state, me);
    let f2 = f1 - progress(game, state, them);
    let f3 = next_row_inverse(game, state, me);
    let f4 = next_row_inverse(game, state, them);
    f1 + f2 + f3 - f4
}

/// Rows advanced from the home row.
fn progress(game: &Quoridor, state: &GameState, player: PlayerId) -> f32 {
    let row = state.position(player).row;
    let advanced = if player == PlayerId::ZERO {
        row
    } else {
        game.size() - 1 - row
    };
    f32::from(advanced)
}

/// `1 / d`, where `d` is the path length to the next row toward the goal.
fn next_row_inverse(game: &Quoridor, state: &GameState, player: PlayerId) -> f32 {
    let Cell { row, .. } = state.position(player);
    let goal = game.goal_row(player);
    if row == goal {
        return 0.0;
    }
    let next_row = if goal > row { row + 1 } else { row - 1 };
    match shortest_distance(state.walls(), state.position(player), next_row) {
        Some(steps) if steps > 0 => 1.0 / steps as f32,
        _ => 0.0,
    }
}
