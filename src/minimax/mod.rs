//! Depth-limited minimax with a path-distance evaluation.
//!
//! A cheap deterministic opponent: no evaluator, no randomness. See
//! [`evaluate`] for the scoring features.

pub mod eval;
pub mod search;

pub use eval::{evaluate, WIN_SCORE};
pub use search::{MinimaxConfig, MinimaxDecision, MinimaxSearch};
