//! MCTS configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MCTSConfig {
    /// Simulations per decision (default: 800).
    pub n_simulations: u32,

    /// PUCT exploration constant (default: 1.25).
    /// Higher values follow the prior longer before trusting Q.
    pub c_puct: f32,

    /// Temperature for the output policy (0 = argmax, 1 = proportional
    /// to visit counts).
    pub temperature: f32,

    /// Dirichlet concentration for root noise.
    pub dirichlet_alpha: f32,

    /// Weight of the root noise (0 disables it).
    pub dirichlet_epsilon: f32,

    /// Prior mass on legal actions below which the node falls back to a
    /// uniform prior.
    pub prior_epsilon: f32,

    /// Wall-clock budget per decision in milliseconds. Checked between
    /// simulations only.
    pub time_budget_ms: Option<u64>,

    /// Key transposition nodes by the canonical (mover's) view.
    pub canonical_keys: bool,

    /// Random seed for noise and policy sampling.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            n_simulations: 800,
            c_puct: 1.25,
            temperature: 1.0,
            dirichlet_alpha: 0.03,
            dirichlet_epsilon: 0.25,
            prior_epsilon: 1e-8,
            time_budget_ms: None,
            canonical_keys: true,
            seed: 42,
        }
    }
}

impl MCTSConfig {
    /// Self-play settings: full budget, root noise, proportional policy.
    #[must_use]
    pub fn for_training() -> Self {
        Self::default()
    }

    /// Match settings: no noise, greedy choice.
    #[must_use]
    pub fn for_evaluation() -> Self {
        Self {
            temperature: 0.0,
            dirichlet_epsilon: 0.0,
            ..Self::default()
        }
    }

    /// Small deterministic searches for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            n_simulations: 64,
            temperature: 0.0,
            dirichlet_epsilon: 0.0,
            ..Self::default()
        }
    }

    pub fn with_simulations(mut self, n: u32) -> Self {
        self.n_simulations = n;
        self
    }

    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set root noise; `epsilon == 0` disables it.
    pub fn with_dirichlet(mut self, alpha: f32, epsilon: f32) -> Self {
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis() as u64);
        self
    }

    pub fn with_canonical_keys(mut self, canonical: bool) -> Self {
        self.canonical_keys = canonical;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let bad = |msg: &str| Err(ConfigError::Search(msg.to_string()));
        if self.n_simulations == 0 {
            return bad("n_simulations must be at least 1");
        }
        if !(self.c_puct >= 0.0) {
            return bad("c_puct must be non-negative");
        }
        if !(self.temperature >= 0.0) {
            return bad("temperature must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
            return bad("dirichlet_epsilon must lie in [0, 1]");
        }
        if self.dirichlet_epsilon > 0.0 && !(self.dirichlet_alpha > 0.0) {
            return bad("dirichlet_alpha must be positive when noise is enabled");
        }
        if !(self.prior_epsilon >= 0.0) {
            return bad("prior_epsilon must be non-negative");
        }
        Ok(())
    }
}
