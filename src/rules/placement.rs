//! Wall legality.
//!
//! A placement is checked in tiers, cheapest first: wall supply, then the
//! structural checks on the grid (bounds, occupancy, overlap), then
//! stranding. Stranding is decided by the connectivity oracle when it can
//! prove the wall closes nothing off; only flagged walls pay for a path
//! search per player.

use tracing::trace;

use crate::board::{reaches_goal, Intersection, Orientation};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::error::IllegalReason;

/// Why the player to move may not place this wall, or `None` if they may.
pub(crate) fn wall_conflict(
    config: &GameConfig,
    state: &GameState,
    at: Intersection,
    orientation: Orientation,
) -> Option<IllegalReason> {
    if state.walls_remaining(state.current_player()) == 0 {
        return Some(IllegalReason::NoWallsLeft);
    }
    if let Some(reason) = state.walls().placement_conflict(at, orientation) {
        return Some(reason);
    }
    if would_strand(config, state, at, orientation) {
        return Some(IllegalReason::Strands);
    }
    None
}

/// Whether adding the wall leaves either pawn without a route to its goal.
///
/// Assumes the wall already passed the structural checks.
pub(crate) fn would_strand(
    config: &GameConfig,
    state: &GameState,
    at: Intersection,
    orientation: Orientation,
) -> bool {
    let walls = state.walls();
    if !state.connectivity().check_merges_borders(walls, at, orientation) {
        return false;
    }

    trace!(%at, ?orientation, "wall may close a region; running path search");
    let tentative = walls.with_wall(at, orientation);
    PlayerId::all()
        .into_iter()
        .any(|player| !reaches_goal(&tentative, state.position(player), config.goal_row(player)))
}

/// Commit a wall that already passed [`wall_conflict`] into `state`.
///
/// Does not touch the wall supply or the turn.
pub(crate) fn place_wall(state: &mut GameState, at: Intersection, orientation: Orientation) {
    state.connectivity.commit(&state.walls, at, orientation);
    state.walls.place(at, orientation);
}
