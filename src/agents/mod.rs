//! Players that pick actions, and matches between them.
//!
//! Every agent chooses through [`Quoridor`](crate::rules::Quoridor), so
//! none of them carries its own notion of legality.
//!
//! ```rust
//! use rust_quoridor::agents::{play_match, MinimaxAgent, RandomAgent};
//! use rust_quoridor::core::GameConfig;
//! use rust_quoridor::minimax::MinimaxConfig;
//! use rust_quoridor::rules::Quoridor;
//!
//! let game = Quoridor::new(GameConfig::new(5, 0)).unwrap();
//! let mut minimax = MinimaxAgent::new(game.clone(), MinimaxConfig::default()).unwrap();
//! let mut random = RandomAgent::new(game.clone(), 7);
//!
//! let record = play_match(&game, &mut minimax, &mut random).unwrap();
//! assert!(record.result.is_some());
//! println!("{}", record.to_notation());
//! ```

pub mod arena;
pub mod players;

use crate::core::{Action, GameState};
use crate::mcts::SearchError;

pub use arena::{play_match, GameRecord};
pub use players::{MctsAgent, MinimaxAgent, RandomAgent, RolloutAgent};

/// Something that can play a turn.
pub trait Agent {
    fn name(&self) -> &str;

    /// Choose an action for the newest position in `history` (oldest
    /// first). The position must not be finished.
    fn select_action(&mut self, history: &[GameState]) -> Result<Action, SearchError>;
}
