//! # rust-quoridor
//!
//! A Quoridor rules engine and tree-search AI, built for RL self-play.
//!
//! ## Design Principles
//!
//! 1. **One Source of Legality**: pawn moves, jumps, wall overlap and the
//!    no-stranding rule live only in [`rules::Quoridor`]. Search, agents and
//!    self-play all go through it.
//!
//! 2. **Immutable States**: `apply` returns a new [`GameState`]. The wall
//!    grid is an `im` vector, so a copy shares structure with its parent and
//!    independent search branches never see each other's changes.
//!
//! 3. **Mover's Perspective**: evaluators and training data see the board
//!    from the side of the player to move, with one fixed action index
//!    space for both players.
//!
//! ## Architecture
//!
//! - **Two wall oracles**: a union-find connectivity check cheaply clears
//!   most wall placements; A* path search settles the rest.
//!
//! - **PUCT search with transpositions**: lazy expansion, evaluator priors,
//!   Dirichlet root noise and visit-count policies.
//!
//! - **Rollout UCT**: an evaluator-free baseline valued by random playouts.
//!
//! ## Modules
//!
//! - `core`: Players, state, actions, RNG, configuration
//! - `board`: Geometry, wall grid, connectivity and path oracles
//! - `rules`: The rules engine
//! - `codec`: Action index space and perspective transforms
//! - `nn`: Evaluator interface and feature planes
//! - `mcts`: Monte Carlo Tree Search
//! - `minimax`: Depth-limited minimax opponent
//! - `agents`: Agents and head-to-head matches
//! - `training`: Self-play trajectories and experience buffer
//! - `config`: TOML configuration for the whole engine

pub mod agents;
pub mod board;
pub mod codec;
pub mod config;
pub mod core;
pub mod error;
pub mod mcts;
pub mod minimax;
pub mod nn;
pub mod rules;
pub mod training;

// Re-export commonly used types
pub use crate::core::{Action, ActionRecord, GameConfig, GameRng, GameState, GameStatus, PlayerId, PlayerMap};

pub use crate::board::{Cell, Direction, Intersection, Orientation, WallGrid};

pub use crate::rules::{GameResult, Quoridor};

pub use crate::codec::{canonical_state, flip_perspective, ActionCodec, StateKey};

pub use crate::error::{ConfigError, IllegalReason, QuoridorError};

pub use crate::config::EngineConfig;

pub use crate::nn::{EncodedState, Evaluation, Evaluator, EvaluatorError, PlaneEncoder, StateEncoder, UniformEvaluator};

pub use crate::mcts::{MCTSConfig, MCTSSearch, RolloutConfig, SearchError, SearchResult, SearchStats, UctSearch, PUCT};

pub use crate::minimax::{MinimaxConfig, MinimaxSearch};

pub use crate::agents::{play_match, Agent, GameRecord, MctsAgent, MinimaxAgent, RandomAgent, RolloutAgent};

pub use crate::training::{ExperienceBuffer, SelfPlayConfig, SelfPlayWorker, Trajectory};
