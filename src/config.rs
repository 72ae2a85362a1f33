//! Whole-engine configuration, loadable from TOML.
//!
//! ```toml
//! [game]
//! grid_size = 7
//! max_walls = 6
//!
//! [mcts]
//! n_simulations = 200
//! time_budget_ms = 500
//!
//! [rollout]
//! n_iterations = 2000
//! rave_equivalence = 1000.0
//!
//! [self_play]
//! temperature_threshold = 20
//! ```
//!
//! Every section and every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;
use crate::error::ConfigError;
use crate::mcts::{MCTSConfig, RolloutConfig};
use crate::minimax::MinimaxConfig;
use crate::training::SelfPlayConfig;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub game: GameConfig,
    pub mcts: MCTSConfig,
    pub minimax: MinimaxConfig,
    pub rollout: RolloutConfig,
    pub self_play: SelfPlayConfig,
}

impl EngineConfig {
    /// Parse and validate every section.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;
        self.mcts.validate()?;
        self.minimax.validate()?;
        self.rollout.validate()?;
        self.self_play.validate()
    }
}
