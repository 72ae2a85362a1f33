//! Monte Carlo Tree Search guided by a policy/value evaluator.
//!
//! ## Overview
//!
//! AlphaZero-style PUCT search over [`Quoridor`](crate::rules::Quoridor)
//! positions:
//!
//! - **Lazy expansion**: a node stores the evaluator's raw prior and only
//!   builds its edges the first time it is selected from
//! - **Transpositions**: nodes are keyed by position, so a position reached
//!   along two lines is searched once
//! - **Canonical edges**: edge indices are in the mover's rotated index
//!   space, matching what the evaluator sees
//! - **Exploration**: Dirichlet noise on the root priors, temperature on the
//!   returned visit policy
//!
//! [`UctSearch`] is a separate evaluator-free variant: UCB1 selection with
//! leaves valued by random playouts, optionally blended with RAVE.
//!
//! ## Usage
//!
//! ```rust
//! use rust_quoridor::core::GameConfig;
//! use rust_quoridor::mcts::{MCTSConfig, MCTSSearch};
//! use rust_quoridor::nn::UniformEvaluator;
//! use rust_quoridor::rules::Quoridor;
//!
//! let game = Quoridor::new(GameConfig::new(5, 3)).unwrap();
//! let evaluator = UniformEvaluator::new(game.action_count());
//! let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();
//!
//! let state = game.initial_state();
//! let result = search.select_action(&state).unwrap();
//! assert!(game.is_legal(&state, &result.action));
//! ```
//!
//! ## Custom Policies
//!
//! ```rust,ignore
//! use rust_quoridor::mcts::{MCTSSearch, MCTSConfig};
//!
//! let search = MCTSSearch::new(game, &evaluator, config)?
//!     .with_selection(MySelection);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod rollout;
pub mod search;
pub mod stats;
pub mod tree;

// Re-export main types
pub use config::MCTSConfig;
pub use node::{Edge, MCTSNode, NodeId};
pub use policy::{legal_priors, mix_root_noise, visit_policy, SelectionPolicy, PUCT};
pub use rollout::{random_action, RolloutConfig, UctDecision, UctSearch};
pub use search::{MCTSSearch, SearchError, SearchResult};
pub use stats::SearchStats;
pub use tree::{MCTSTree, TreeStats};
