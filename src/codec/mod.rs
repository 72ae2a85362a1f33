//! Action index space and the canonical perspective transform.
//!
//! Evaluators and training data address actions by a fixed integer index
//! ([`ActionCodec`]). Both players share one index space by looking at the
//! board from the side of the player to move ([`canonical_state`],
//! [`perspective`]).

pub mod action_index;
pub mod perspective;

pub use action_index::ActionCodec;
pub use perspective::{
    canonical_state, flip_perspective, perspective, rotate_action, rotate_cell, rotate_intersection, state_key,
    StateKey,
};
