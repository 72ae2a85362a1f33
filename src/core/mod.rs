//! Core engine types: players, state, actions, RNG, configuration.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::{GameConfig, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, GameStatus};
