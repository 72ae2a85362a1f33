//! Evaluator integration.
//!
//! This module provides the seam between the search engine and a
//! policy/value evaluator (typically a neural network living outside the
//! crate).
//!
//! ## Overview
//!
//! - **Traits**: `Evaluator`, `StateEncoder`
//! - **Encoding**: `PlaneEncoder`, time-stacked board planes
//! - **Baseline**: `UniformEvaluator` for testing
//!
//! ## Usage
//!
//! ```rust
//! use rust_quoridor::nn::{Evaluator, PlaneEncoder, StateEncoder, UniformEvaluator};
//! use rust_quoridor::rules::Quoridor;
//!
//! let game = Quoridor::default();
//! let state = game.initial_state();
//!
//! let encoder = PlaneEncoder::new(9, 10);
//! let encoded = encoder.encode(&[&state]);
//!
//! let evaluator = UniformEvaluator::new(game.action_count());
//! let evaluation = evaluator.evaluate(&encoded).unwrap();
//! assert_eq!(evaluation.prior.len(), 209);
//! ```

pub mod encoder;
pub mod traits;

pub use encoder::{PlaneEncoder, StateEncoder};
pub use traits::{EncodedState, Evaluation, Evaluator, EvaluatorError, UniformEvaluator};
