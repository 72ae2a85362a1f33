//! Quoridor rules.
//!
//! [`Quoridor`] is the only place legality is decided: pawn movement with
//! jumps, wall placement with the overlap and stranding rules, and the
//! win and draw conditions. Search and training code never re-implement
//! any of it.

pub mod engine;
mod movegen;
mod placement;

pub use engine::{GameResult, Quoridor};
pub use movegen::pawn_moves;
