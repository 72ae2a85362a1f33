//! Training data generation.
//!
//! This module provides the data structures and self-play loop for
//! generating training data in an AlphaZero-style training pipeline.
//!
//! ## Overview
//!
//! - **Trajectory**: Records a complete game with features, policies, and result
//! - **ExperienceBuffer**: Collects and samples from trajectories
//! - **SelfPlayWorker**: Runs games using MCTS to generate trajectories
//!
//! ## Usage
//!
//! ```rust
//! use rust_quoridor::core::GameConfig;
//! use rust_quoridor::mcts::MCTSConfig;
//! use rust_quoridor::nn::UniformEvaluator;
//! use rust_quoridor::rules::Quoridor;
//! use rust_quoridor::training::{ExperienceBuffer, SelfPlayConfig, SelfPlayWorker};
//!
//! let game = Quoridor::new(GameConfig::new(5, 2).with_max_turns(30)).unwrap();
//! let evaluator = UniformEvaluator::new(game.action_count());
//! let config = SelfPlayConfig::default().with_mcts(MCTSConfig::for_training().with_simulations(8));
//! let worker = SelfPlayWorker::new(game, &evaluator, config).unwrap();
//!
//! let mut buffer = ExperienceBuffer::new(100);
//! for trajectory in worker.play_games(2).unwrap() {
//!     buffer.push(trajectory);
//! }
//! let batch = buffer.sample_batch(16, 0);
//! assert!(!batch.is_empty());
//! ```

pub mod self_play;
pub mod trajectory;

// Re-export main types
pub use self_play::{SelfPlayConfig, SelfPlayWorker};
pub use trajectory::{ExperienceBuffer, Step, TrainingSample, Trajectory};
