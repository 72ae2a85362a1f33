//! Trajectory and experience buffer for training data collection.
//!
//! A trajectory records a complete self-play game, capturing:
//! - Encoded features at each decision point
//! - The MCTS visit policy (the "target" policy)
//! - Actions actually taken
//! - The final result, from which each step's value target is derived

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, PlayerId};
use crate::nn::EncodedState;
use crate::rules::GameResult;

/// A single decision point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Features from the mover's canonical perspective.
    pub features: EncodedState,

    /// Visit-count policy over the canonical index space.
    pub policy: Vec<f32>,

    /// The action played, on the real board.
    pub action: Action,

    /// The player who made this decision.
    pub player: PlayerId,

    /// Turn number before the action.
    pub turn: u32,

    /// Path-distance reward for `player` after the action.
    pub intermediate_reward: f32,
}

impl Step {
    /// Probability the policy gave to `index` (0 if out of range).
    pub fn policy_at(&self, index: usize) -> f32 {
        self.policy.get(index).copied().unwrap_or(0.0)
    }
}

/// A complete game trajectory from self-play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub steps: Vec<Step>,

    /// Final result, `None` if the game was not finished.
    pub result: Option<GameResult>,

    /// Random seed used for this game.
    pub seed: u64,
}

impl Trajectory {
    pub fn new(seed: u64) -> Self {
        Self {
            steps: Vec::new(),
            result: None,
            seed,
        }
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn set_result(&mut self, result: Option<GameResult>) {
        self.result = result;
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn player_steps(&self, player: PlayerId) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.player == player)
    }

    /// Outcome for `player`: +1 win, -1 loss, 0 draw or unfinished.
    pub fn player_outcome(&self, player: PlayerId) -> f32 {
        self.result.map_or(0.0, |result| result.value_for(player))
    }

    /// Convert to training samples, one per step, with the value target
    /// taken from that step's player.
    pub fn to_training_samples(&self) -> Vec<TrainingSample> {
        self.steps
            .iter()
            .map(|step| TrainingSample {
                features: step.features.clone(),
                policy: step.policy.clone(),
                value: self.player_outcome(step.player),
                intermediate_reward: step.intermediate_reward,
            })
            .collect()
    }

    /// Compact binary form for storage.
    pub fn to_bytes(&self) -> bincode::Result<Vec<u8>> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> bincode::Result<Self> {
        bincode::deserialize(bytes)
    }
}

/// A single training sample extracted from a trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub features: EncodedState,

    /// Target policy (MCTS visit distribution).
    pub policy: Vec<f32>,

    /// Target value: the game outcome for the player to move.
    pub value: f32,

    pub intermediate_reward: f32,
}

/// Buffer for storing trajectories during training.
///
/// Uses a FIFO strategy: when full, oldest trajectories are removed.
#[derive(Clone, Debug)]
pub struct ExperienceBuffer {
    trajectories: VecDeque<Trajectory>,
    max_trajectories: usize,
}

impl ExperienceBuffer {
    pub fn new(max_trajectories: usize) -> Self {
        Self {
            trajectories: VecDeque::with_capacity(max_trajectories),
            max_trajectories,
        }
    }

    /// Add a trajectory, evicting the oldest if the buffer is full.
    pub fn push(&mut self, trajectory: Trajectory) {
        if self.max_trajectories == 0 {
            return;
        }
        if self.trajectories.len() >= self.max_trajectories {
            self.trajectories.pop_front();
        }
        self.trajectories.push_back(trajectory);
    }

    pub fn len(&self) -> usize {
        self.trajectories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_trajectories
    }

    pub fn clear(&mut self) {
        self.trajectories.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trajectory> {
        self.trajectories.iter()
    }

    /// Total number of steps across all trajectories.
    pub fn total_steps(&self) -> usize {
        self.trajectories.iter().map(|t| t.len()).sum()
    }

    pub fn to_training_samples(&self) -> Vec<TrainingSample> {
        self.trajectories
            .iter()
            .flat_map(|t| t.to_training_samples())
            .collect()
    }

    /// Sample up to `batch_size` distinct samples. Same seed, same batch.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<TrainingSample> {
        let all_samples = self.to_training_samples();
        if all_samples.is_empty() || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);

        // Partial Fisher-Yates over the first `batch_size` slots
        let mut indices: Vec<usize> = (0..all_samples.len()).collect();
        let n = indices.len();
        let limit = batch_size.min(n);
        for i in 0..limit {
            let j = i + rng.gen_range_usize(0..n - i);
            indices.swap(i, j);
        }

        indices
            .into_iter()
            .take(limit)
            .map(|i| all_samples[i].clone())
            .collect()
    }
}

impl Default for ExperienceBuffer {
    fn default() -> Self {
        Self::new(10000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_step(player: u8, turn: u32) -> Step {
        let mut policy = vec![0.0; 4];
        policy[turn as usize % 4] = 1.0;
        Step {
            features: EncodedState::zeros(vec![2, 2, 2]),
            policy,
            action: Action::step_to(1, 4),
            player: PlayerId::new(player),
            turn,
            intermediate_reward: 0.0,
        }
    }

    fn two_step_game(result: Option<GameResult>) -> Trajectory {
        let mut traj = Trajectory::new(42);
        traj.push(make_test_step(0, 0));
        traj.push(make_test_step(1, 1));
        traj.set_result(result);
        traj
    }

    #[test]
    fn test_trajectory_outcomes() {
        let won = two_step_game(Some(GameResult::Winner(PlayerId::ONE)));
        assert_eq!(won.player_outcome(PlayerId::ZERO), -1.0);
        assert_eq!(won.player_outcome(PlayerId::ONE), 1.0);

        let drawn = two_step_game(Some(GameResult::Draw));
        assert_eq!(drawn.player_outcome(PlayerId::ZERO), 0.0);

        let unfinished = two_step_game(None);
        assert_eq!(unfinished.player_outcome(PlayerId::ONE), 0.0);
    }

    #[test]
    fn test_samples_take_value_from_step_player() {
        let traj = two_step_game(Some(GameResult::Winner(PlayerId::ZERO)));
        let samples = traj.to_training_samples();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].value, 1.0);
        assert_eq!(samples[1].value, -1.0);
        assert_eq!(samples[1].policy, vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_player_steps() {
        let mut traj = Trajectory::new(1);
        for turn in 0..5 {
            traj.push(make_test_step((turn % 2) as u8, turn));
        }
        assert_eq!(traj.player_steps(PlayerId::ZERO).count(), 3);
        assert_eq!(traj.player_steps(PlayerId::ONE).count(), 2);
        assert_eq!(traj.steps[2].policy_at(2), 1.0);
        assert_eq!(traj.steps[2].policy_at(99), 0.0);
    }

    #[test]
    fn test_trajectory_bincode_bytes() {
        let traj = two_step_game(Some(GameResult::Winner(PlayerId::ZERO)));
        let bytes = traj.to_bytes().unwrap();
        assert_eq!(Trajectory::from_bytes(&bytes).unwrap(), traj);
        assert!(Trajectory::from_bytes(&bytes[..3]).is_err());
    }

    #[test]
    fn test_experience_buffer_fifo_order() {
        let mut buffer = ExperienceBuffer::new(3);
        for seed in 1..=5 {
            buffer.push(Trajectory::new(seed));
        }
        let seeds: Vec<_> = buffer.iter().map(|t| t.seed).collect();
        assert_eq!(seeds, vec![3, 4, 5]);

        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_experience_buffer_total_steps() {
        let mut buffer = ExperienceBuffer::new(10);
        buffer.push(two_step_game(None));
        buffer.push(two_step_game(None));
        assert_eq!(buffer.total_steps(), 4);
        assert_eq!(buffer.to_training_samples().len(), 4);
    }

    #[test]
    fn test_experience_buffer_sample_batch() {
        let mut buffer = ExperienceBuffer::new(10);
        let mut traj = Trajectory::new(42);
        for turn in 0..10 {
            traj.push(make_test_step((turn % 2) as u8, turn));
        }
        buffer.push(traj);

        let batch = buffer.sample_batch(5, 123);
        assert_eq!(batch.len(), 5);
        assert_eq!(batch, buffer.sample_batch(5, 123));

        assert_eq!(buffer.sample_batch(100, 1).len(), 10);
        assert!(buffer.sample_batch(0, 1).is_empty());
    }

    #[test]
    fn test_experience_buffer_default() {
        let buffer = ExperienceBuffer::default();
        assert_eq!(buffer.capacity(), 10000);
        assert!(buffer.is_empty());
        assert!(buffer.sample_batch(10, 42).is_empty());
    }

    #[test]
    fn test_zero_capacity_buffer_stays_empty() {
        let mut buffer = ExperienceBuffer::new(0);
        buffer.push(Trajectory::new(1));
        assert!(buffer.is_empty());
    }
}
