//! MCTS search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one `select_action` call.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Simulations completed.
    pub simulations: u32,

    /// Evaluator calls (one per newly expanded node, root included).
    pub evaluations: u32,

    /// Simulations that ended on a finished game.
    pub terminal_hits: u32,

    /// Deepest leaf reached, in plies below the root.
    pub max_depth: u16,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.simulations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Fraction of simulations that needed an evaluator call.
    #[must_use]
    pub fn evaluation_rate(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.evaluations as f64 / self.simulations as f64
        }
    }
}
