//! Self-play loop for generating training data.
//!
//! Runs games using MCTS to generate trajectories for training
//! neural networks in an AlphaZero-style loop. Games are independent:
//! each owns its state, its search tree and its RNG, and only the
//! evaluator is shared between workers.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::GameState;
use crate::error::{ConfigError, QuoridorError};
use crate::mcts::{MCTSConfig, MCTSSearch, SearchError};
use crate::nn::{Evaluator, PlaneEncoder, StateEncoder};
use crate::rules::Quoridor;

use super::trajectory::{Step, Trajectory};

/// Configuration for self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Search settings; `mcts.temperature` is the early-game temperature.
    pub mcts: MCTSConfig,

    /// Turn at which to switch to greedy (temperature = 0).
    /// 0 = always use the configured temperature.
    pub temperature_threshold: u32,

    /// Seed offset (combined with the game index for unique seeds).
    pub seed_offset: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            mcts: MCTSConfig::for_training(),
            temperature_threshold: 30,
            seed_offset: 0,
        }
    }
}

impl SelfPlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mcts(mut self, mcts: MCTSConfig) -> Self {
        self.mcts = mcts;
        self
    }

    pub fn with_temperature_threshold(mut self, threshold: u32) -> Self {
        self.temperature_threshold = threshold;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    /// Temperature for the move played at `turn`.
    pub fn effective_temperature(&self, turn: u32) -> f32 {
        if self.temperature_threshold > 0 && turn >= self.temperature_threshold {
            0.0
        } else {
            self.mcts.temperature
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mcts.validate()
    }
}

/// Worker for running self-play games.
pub struct SelfPlayWorker<'a, E: Evaluator + ?Sized> {
    game: Quoridor,
    evaluator: &'a E,
    encoder: PlaneEncoder,
    config: SelfPlayConfig,
}

impl<'a, E: Evaluator + ?Sized> SelfPlayWorker<'a, E> {
    pub fn new(game: Quoridor, evaluator: &'a E, config: SelfPlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let encoder = PlaneEncoder::new(game.size(), game.config().max_walls);
        Ok(Self {
            game,
            evaluator,
            encoder,
            config,
        })
    }

    /// Play one game from the initial position.
    ///
    /// A game that stops without a result (a stuck pawn with no walls left)
    /// is returned unfinished.
    pub fn play_game(&self, seed: u64) -> Result<Trajectory, SearchError> {
        let mcts_config = self.config.mcts.clone().with_seed(seed);
        let mut search =
            MCTSSearch::new(self.game.clone(), self.evaluator, mcts_config).map_err(QuoridorError::from)?;

        let mut trajectory = Trajectory::new(seed);
        let mut history: Vec<GameState> = vec![self.game.initial_state()];

        loop {
            let state = &history[history.len() - 1];
            if state.is_terminal() || self.game.legal_actions(state).is_empty() {
                break;
            }
            let mover = state.current_player();
            let turn = state.turn();
            let frames: Vec<&GameState> = history.iter().collect();
            let features = self.encoder.encode(&frames);

            search.set_temperature(self.config.effective_temperature(turn));
            let result = search.select_action_with_history(&history)?;
            let next = self.game.apply(state, &result.action)?;

            trajectory.push(Step {
                features,
                policy: result.policy,
                action: result.action,
                player: mover,
                turn,
                intermediate_reward: self.game.intermediate_reward(&next, mover),
            });
            history.push(next);
        }

        let last = &history[history.len() - 1];
        trajectory.set_result(self.game.result(last));
        debug!(seed, turns = trajectory.len(), result = ?trajectory.result, "self-play game finished");
        Ok(trajectory)
    }

    /// Play `count` games in parallel, seeded `seed_offset + i`.
    pub fn play_games(&self, count: usize) -> Result<Vec<Trajectory>, SearchError> {
        (0..count)
            .into_par_iter()
            .map(|i| self.play_game(self.config.seed_offset.wrapping_add(i as u64)))
            .collect()
    }

    pub fn encoder(&self) -> &PlaneEncoder {
        &self.encoder
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }
}
