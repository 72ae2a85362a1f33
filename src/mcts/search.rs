//! PUCT tree search driven by a policy/value evaluator.
//!
//! Each `select_action` call starts from an empty tree. The root is
//! evaluated and opened first; every simulation then descends by PUCT
//! until it leaves the tree or finishes the game, evaluates the new
//! position once, and backs the value up the path, negating it at every
//! ply.
//!
//! Everything inside the tree is expressed from the mover's side: edges
//! carry canonical action indices and values are for the player to move at
//! the parent. Actions are mapped back to the real board only when applied
//! or returned.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::codec::{state_key, ActionCodec};
use crate::core::{Action, GameRng, GameState};
use crate::error::{ConfigError, QuoridorError};
use crate::nn::{EncodedState, Evaluator, EvaluatorError, PlaneEncoder, StateEncoder};
use crate::rules::Quoridor;

use super::config::MCTSConfig;
use super::node::{Edge, MCTSNode, NodeId};
use super::policy::{legal_priors, mix_root_noise, visit_policy, SelectionPolicy, PUCT};
use super::stats::SearchStats;
use super::tree::MCTSTree;

/// Why a search call failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error(transparent)]
    Rules(#[from] QuoridorError),

    #[error("no legal action in this position")]
    NoLegalAction,
}

/// Outcome of one search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult {
    /// Chosen action on the real board.
    pub action: Action,

    /// Index of `action` on the real board.
    pub action_index: usize,

    /// Visit-count policy over the mover's canonical index space.
    pub policy: Vec<f32>,

    /// Visit-weighted root value for the player to move.
    pub root_value: f32,

    /// Simulations completed.
    pub simulations: u32,
}

/// MCTS search context.
///
/// Owns its rules engine, tree and RNG; borrows the evaluator so several
/// searches (one per worker) can share it.
pub struct MCTSSearch<'a, E: Evaluator + ?Sized> {
    game: Quoridor,
    evaluator: &'a E,
    encoder: Box<dyn StateEncoder>,
    selection: Box<dyn SelectionPolicy>,
    codec: ActionCodec,
    config: MCTSConfig,
    tree: MCTSTree,
    rng: GameRng,
    stats: SearchStats,
}

impl<'a, E: Evaluator + ?Sized> MCTSSearch<'a, E> {
    /// Create a search context. The config is validated here.
    pub fn new(game: Quoridor, evaluator: &'a E, config: MCTSConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let encoder = PlaneEncoder::new(game.size(), game.config().max_walls);
        let codec = ActionCodec::for_config(game.config());
        let rng = GameRng::new(config.seed);
        Ok(Self {
            game,
            evaluator,
            encoder: Box::new(encoder),
            selection: Box::new(PUCT),
            codec,
            config,
            tree: MCTSTree::new(),
            rng,
            stats: SearchStats::default(),
        })
    }

    /// Replace the default [`PlaneEncoder`].
    pub fn with_encoder<S: StateEncoder + 'static>(mut self, encoder: S) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Set a custom selection policy.
    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    /// Change the output temperature between calls (self-play schedules).
    pub fn set_temperature(&mut self, temperature: f32) {
        self.config.temperature = temperature.max(0.0);
    }

    /// Search from `state` and choose an action.
    ///
    /// # Panics
    ///
    /// If `state` is terminal or has no legal action; callers check
    /// terminality first.
    pub fn select_action(&mut self, state: &GameState) -> Result<SearchResult, SearchError> {
        self.select_action_with_history(std::slice::from_ref(state))
    }

    /// Like [`MCTSSearch::select_action`], with earlier positions (oldest
    /// first) available to the encoder. The last element is the root.
    pub fn select_action_with_history(&mut self, history: &[GameState]) -> Result<SearchResult, SearchError> {
        assert!(!history.is_empty(), "select_action needs a position");
        let root = &history[history.len() - 1];
        assert!(!root.is_terminal(), "select_action called on a finished game");

        let start = Instant::now();
        let deadline = self.config.time_budget().map(|budget| start + budget);
        self.tree.clear();
        self.stats.reset();

        let frames: Vec<&GameState> = history.iter().collect();
        let (prior, value) = self.evaluate(&frames)?;
        let root_id = self
            .tree
            .insert(state_key(root, self.config.canonical_keys), MCTSNode::new(prior, value, 0));
        self.open_node(root_id, root);
        assert!(
            !self.tree.root_node().edges.is_empty(),
            "no legal actions at the search root"
        );
        if self.config.dirichlet_epsilon > 0.0 {
            let count = self.tree.root_node().edges.len();
            let noise = self.rng.dirichlet(count, self.config.dirichlet_alpha);
            mix_root_noise(&mut self.tree.root_node_mut().edges, &noise, self.config.dirichlet_epsilon);
        }

        for sim in 0..self.config.n_simulations {
            if sim > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            self.simulate(&frames)?;
            self.stats.simulations += 1;
        }

        let root_node = self.tree.root_node();
        let policy = visit_policy(&root_node.edges, self.codec.action_count(), self.config.temperature);
        let chosen = if self.config.temperature <= 0.0 {
            root_node.most_visited().unwrap_or(0)
        } else {
            let weights: Vec<f32> = root_node.edges.iter().map(|e| policy[e.index as usize]).collect();
            self.rng.choose_weighted(&weights).unwrap_or(0)
        };
        let canonical_index = root_node.edges[chosen].index as usize;
        let root_value = root_node.mean_value();
        let action = self.codec.decode_for(canonical_index, root.current_player())?;
        let action_index = self.codec.encode(&action);

        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!(
            simulations = self.stats.simulations,
            elapsed_us = self.stats.time_us,
            nodes = self.tree.len(),
            %action,
            root_value,
            "search finished"
        );

        Ok(SearchResult {
            action,
            action_index,
            policy,
            root_value,
            simulations: self.stats.simulations,
        })
    }

    /// One descent, expansion and backup.
    fn simulate(&mut self, root_frames: &[&GameState]) -> Result<(), SearchError> {
        let root = root_frames[root_frames.len() - 1];
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut line: Vec<GameState> = Vec::new();
        let mut node_id = self.tree.root();

        let leaf_value = loop {
            let state = line.last().unwrap_or(root);
            if !self.tree.get(node_id).is_opened() {
                self.open_node(node_id, state);
            }
            if self.tree.get(node_id).edges.is_empty() {
                // Stuck pawn with no walls left: score it by its evaluation.
                break self.tree.get(node_id).value;
            }

            let edge_idx = self.selection.select(self.tree.get(node_id), &self.config);
            path.push((node_id, edge_idx));
            let edge = &self.tree.get(node_id).edges[edge_idx];
            let (index, child) = (edge.index, edge.child);
            let action = self.codec.decode_for(index as usize, state.current_player())?;
            let next = self.game.apply(state, &action)?;

            let depth = path.len() as u16;
            self.stats.max_depth = self.stats.max_depth.max(depth);

            if let Some(result) = self.game.result(&next) {
                self.stats.terminal_hits += 1;
                break result.value_for(next.current_player());
            }

            let child = if child.is_none() {
                let key = state_key(&next, self.config.canonical_keys);
                match self.tree.lookup(&key) {
                    Some(existing) => existing,
                    None => {
                        let mut frames: Vec<&GameState> = root_frames.to_vec();
                        frames.extend(line.iter());
                        frames.push(&next);
                        let (prior, value) = self.evaluate(&frames)?;
                        let id = self.tree.insert(key, MCTSNode::new(prior, value, depth));
                        self.tree.get_mut(node_id).edges[edge_idx].child = id;
                        break value;
                    }
                }
            } else {
                child
            };
            self.tree.get_mut(node_id).edges[edge_idx].child = child;
            line.push(next);
            node_id = child;
        };

        let mut value = leaf_value;
        for &(id, edge_idx) in path.iter().rev() {
            value = -value;
            let node = self.tree.get_mut(id);
            node.visits += 1;
            node.edges[edge_idx].record(value);
        }
        trace!(depth = path.len(), value = leaf_value, "simulation finished");
        Ok(())
    }

    /// Build the edges of `node_id` from its stored prior.
    fn open_node(&mut self, node_id: NodeId, state: &GameState) {
        let mover = state.current_player();
        let mut legal: Vec<u32> = self
            .game
            .legal_actions(state)
            .iter()
            .map(|action| self.codec.encode_for(action, mover) as u32)
            .collect();
        legal.sort_unstable();

        let node = self.tree.get_mut(node_id);
        let raw = node.raw_prior.take().unwrap_or_default();
        let (priors, fell_back) = legal_priors(&raw, &legal, self.config.prior_epsilon);
        if fell_back && !legal.is_empty() {
            warn!(legal = legal.len(), "prior has no mass on legal actions; using uniform");
        }
        node.edges = legal.into_iter().zip(priors).map(|(i, p)| Edge::new(i, p)).collect();
    }

    /// Encode and evaluate the newest of `frames`.
    fn evaluate(&mut self, frames: &[&GameState]) -> Result<(Vec<f32>, f32), EvaluatorError> {
        let encoded: EncodedState = self.encoder.encode(frames);
        let evaluation = self.evaluator.evaluate(&encoded)?;
        evaluation.validate(self.codec.action_count())?;
        self.stats.evaluations += 1;

        let mut value = evaluation.value;
        if !(-1.0..=1.0).contains(&value) {
            warn!(value, "evaluator value outside [-1, 1]; clamping");
            value = value.clamp(-1.0, 1.0);
        }
        Ok((evaluation.prior, value))
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The tree left by the last search.
    #[must_use]
    pub fn tree(&self) -> &MCTSTree {
        &self.tree
    }

    /// Root (canonical index, visit count) pairs from the last search.
    pub fn root_visits(&self) -> Vec<(usize, u32)> {
        if self.tree.is_empty() {
            return Vec::new();
        }
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.index as usize, e.visits))
            .collect()
    }

    #[must_use]
    pub fn game(&self) -> &Quoridor {
        &self.game
    }

    #[must_use]
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerId};
    use crate::nn::{Evaluation, UniformEvaluator};

    fn small_game() -> Quoridor {
        Quoridor::new(GameConfig::new(5, 2)).unwrap()
    }

    struct Broken;

    impl Evaluator for Broken {
        fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
            Ok(Evaluation::new(vec![1.0; 3], 0.0))
        }
    }

    struct Loud(usize);

    impl Evaluator for Loud {
        fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
            Ok(Evaluation::new(vec![1.0; self.0], 7.5))
        }
    }

    #[test]
    fn test_search_returns_legal_action() {
        let game = small_game();
        let evaluator = UniformEvaluator::new(game.action_count());
        let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();

        let state = game.initial_state();
        let result = search.select_action(&state).unwrap();

        assert!(game.is_legal(&state, &result.action));
        assert_eq!(result.simulations, 64);
        assert_eq!(result.policy.len(), game.action_count());
        assert!((result.policy.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(search.stats().simulations, 64);
    }

    #[test]
    fn test_root_visits_account_for_every_simulation() {
        let game = small_game();
        let evaluator = UniformEvaluator::new(game.action_count());
        let config = MCTSConfig::for_testing().with_simulations(40);
        let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();
        search.select_action(&game.initial_state()).unwrap();

        let total: u32 = search.root_visits().iter().map(|&(_, n)| n).sum();
        assert_eq!(total, 40);
        assert_eq!(search.tree().root_node().visits, 40);
    }

    #[test]
    fn test_player_one_action_is_on_real_board() {
        let game = small_game();
        let evaluator = UniformEvaluator::new(game.action_count());
        let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();

        let state = game.apply(&game.initial_state(), &Action::step_to(1, 2)).unwrap();
        assert_eq!(state.current_player(), PlayerId::ONE);
        let result = search.select_action(&state).unwrap();
        assert!(game.is_legal(&state, &result.action));
        assert_eq!(search.codec.encode(&result.action), result.action_index);
    }

    #[test]
    fn test_malformed_prior_is_fatal() {
        let game = small_game();
        let mut search = MCTSSearch::new(game.clone(), &Broken, MCTSConfig::for_testing()).unwrap();
        let err = search.select_action(&game.initial_state()).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Evaluator(EvaluatorError::MalformedPrior { expected: 57, actual: 3 })
        ));
    }

    #[test]
    fn test_out_of_range_value_is_clamped() {
        let game = small_game();
        let evaluator = Loud(game.action_count());
        let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();
        let result = search.select_action(&game.initial_state()).unwrap();
        assert!(result.root_value.abs() <= 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let game = small_game();
        let evaluator = UniformEvaluator::new(game.action_count());
        assert!(MCTSSearch::new(game, &evaluator, MCTSConfig::default().with_simulations(0)).is_err());
    }

    #[test]
    #[should_panic(expected = "finished game")]
    fn test_terminal_root_panics() {
        let game = small_game();
        let state = game
            .custom_position(
                crate::core::PlayerMap::from_pair(crate::board::Cell::new(3, 0), crate::board::Cell::new(2, 4)),
                &[],
                PlayerId::ZERO,
            )
            .unwrap();
        let done = game.apply(&state, &Action::step_to(4, 0)).unwrap();
        let evaluator = UniformEvaluator::new(game.action_count());
        let mut search = MCTSSearch::new(game, &evaluator, MCTSConfig::for_testing()).unwrap();
        let _ = search.select_action(&done);
    }
}
