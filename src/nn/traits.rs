//! Evaluator interface for policy/value prediction.
//!
//! The search engine treats the evaluator as an opaque function from
//! encoded features to a prior over the action index space and a scalar
//! value. Both are from the perspective of the player to move, in the
//! canonical (rotated for player 1) index space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Encoded game state as a flat tensor for evaluator input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor, `[planes, rows, cols]` for [`PlaneEncoder`](super::PlaneEncoder).
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    /// Create a zero-filled encoded state with the given shape.
    pub fn zeros(shape: Vec<usize>) -> Self {
        let size = shape.iter().product();
        Self {
            tensor: vec![0.0; size],
            shape,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Get element at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Evaluator output for one position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Raw prior over the whole action space. Need not be normalized or
    /// masked to legal actions.
    pub prior: Vec<f32>,

    /// Expected outcome for the player to move, nominally in `[-1, 1]`.
    pub value: f32,
}

impl Evaluation {
    pub fn new(prior: Vec<f32>, value: f32) -> Self {
        Self { prior, value }
    }

    /// Reject outputs the search cannot use.
    pub fn validate(&self, action_count: usize) -> Result<(), EvaluatorError> {
        if self.prior.len() != action_count {
            return Err(EvaluatorError::MalformedPrior {
                expected: action_count,
                actual: self.prior.len(),
            });
        }
        if !self.value.is_finite() {
            return Err(EvaluatorError::NonFiniteValue(self.value));
        }
        Ok(())
    }
}

/// Evaluator failure. Fatal to the search call that made the request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluatorError {
    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("prior has {actual} entries, expected {expected}")]
    MalformedPrior { expected: usize, actual: usize },

    #[error("value {0} is not finite")]
    NonFiniteValue(f32),
}

/// Policy/value evaluator shared by search workers.
///
/// Implementations must be safe to call from several threads at once;
/// self-play workers share one evaluator and nothing else.
pub trait Evaluator: Send + Sync {
    /// Evaluate a single position.
    fn evaluate(&self, encoded: &EncodedState) -> Result<Evaluation, EvaluatorError>;

    /// Batch evaluation (optional optimization).
    fn evaluate_batch(&self, encoded: &[EncodedState]) -> Result<Vec<Evaluation>, EvaluatorError> {
        encoded.iter().map(|e| self.evaluate(e)).collect()
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
        (**self).evaluate(encoded)
    }
}

/// Uniform prior and zero value (baseline for testing).
#[derive(Clone, Debug, Default)]
pub struct UniformEvaluator {
    action_count: usize,
}

impl UniformEvaluator {
    pub fn new(action_count: usize) -> Self {
        Self { action_count }
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
        let prior = if self.action_count == 0 {
            vec![]
        } else {
            vec![1.0 / self.action_count as f32; self.action_count]
        };
        Ok(Evaluation::new(prior, 0.0))
    }
}
