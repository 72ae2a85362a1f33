//! Feature planes for evaluator input.
//!
//! [`PlaneEncoder`] stacks the last few positions as `N×N` planes, always
//! seen from the side of the player to move in the newest frame: for that
//! player the board is rotated half a turn, so "my pawn" always races
//! towards the last row and one policy head serves both colours.

use crate::codec::{rotate_cell, rotate_intersection};
use crate::core::{GameState, PlayerId};
use crate::nn::traits::EncodedState;

/// Turns a position (with its recent history) into evaluator input.
pub trait StateEncoder: Send + Sync {
    /// Encode the newest state in `history` (oldest first) for the player
    /// to move there.
    fn encode(&self, history: &[&GameState]) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Length of the policy vector evaluators must return.
    fn action_space_size(&self) -> usize;
}

/// Planes per history frame: own pawn, opponent pawn, wall code.
const FRAME_PLANES: usize = 3;

/// Constant planes after the frames: mover colour, own walls, opponent walls.
const CONSTANT_PLANES: usize = 3;

/// Time-stacked plane encoder.
///
/// Frame `k` (0 = newest) occupies planes `3k..3k+3`:
///
/// - own pawn: 1.0 at the mover's cell
/// - opponent pawn: 1.0 at the opponent's cell
/// - walls: 1.0 horizontal, 2.0 vertical, at the anchor intersection
///   (the last row and column are unused)
///
/// Frames missing from a short history are left at zero. The last three
/// planes are filled with the mover's colour (0 or 1) and each side's
/// remaining walls divided by `max_walls`.
#[derive(Clone, Debug)]
pub struct PlaneEncoder {
    grid_size: u8,
    max_walls: u8,
    history_len: usize,
}

impl PlaneEncoder {
    pub fn new(grid_size: u8, max_walls: u8) -> Self {
        Self {
            grid_size,
            max_walls,
            history_len: 8,
        }
    }

    /// Set how many past positions are stacked.
    pub fn with_history_len(mut self, history_len: usize) -> Self {
        self.history_len = history_len.max(1);
        self
    }

    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history_len
    }

    fn plane_len(&self) -> usize {
        let n = self.grid_size as usize;
        n * n
    }

    fn plane_count(&self) -> usize {
        self.history_len * FRAME_PLANES + CONSTANT_PLANES
    }

    fn write_frame(&self, tensor: &mut [f32], frame: usize, state: &GameState, mover: PlayerId) {
        let size = self.grid_size;
        let rotate = mover == PlayerId::ONE;
        let plane = self.plane_len();
        let base = frame * FRAME_PLANES * plane;

        let view = |cell| if rotate { rotate_cell(cell, size) } else { cell };
        tensor[base + view(state.position(mover)).index(size)] = 1.0;
        tensor[base + plane + view(state.position(mover.opponent())).index(size)] = 1.0;

        for (at, orientation) in state.walls().iter() {
            let at = if rotate { rotate_intersection(at, size) } else { at };
            let code = 1.0 + orientation as u8 as f32;
            tensor[base + 2 * plane + at.row as usize * size as usize + at.col as usize] = code;
        }
    }
}

impl StateEncoder for PlaneEncoder {
    fn encode(&self, history: &[&GameState]) -> EncodedState {
        let mut encoded = EncodedState::zeros(self.output_shape());
        let Some(latest) = history.last() else {
            return encoded;
        };
        let mover = latest.current_player();
        let tensor = encoded.tensor.as_mut_slice();

        for (frame, state) in history.iter().rev().take(self.history_len).enumerate() {
            self.write_frame(tensor, frame, state, mover);
        }

        let plane = self.plane_len();
        let constants = self.history_len * FRAME_PLANES * plane;
        let supply = |player| {
            if self.max_walls == 0 {
                0.0
            } else {
                f32::from(latest.walls_remaining(player)) / f32::from(self.max_walls)
            }
        };
        let fills = [mover.index() as f32, supply(mover), supply(mover.opponent())];
        for (k, value) in fills.into_iter().enumerate() {
            let start = constants + k * plane;
            tensor[start..start + plane].fill(value);
        }
        encoded
    }

    fn output_shape(&self) -> Vec<usize> {
        let n = self.grid_size as usize;
        vec![self.plane_count(), n, n]
    }

    fn action_space_size(&self) -> usize {
        let n = self.grid_size as usize;
        n * n + 2 * (n - 1) * (n - 1)
    }
}
