//! Evaluator-free UCT search valued by random playouts.
//!
//! Each iteration walks the tree by UCB1, adds one untried child, finishes
//! the game from there with random legal actions and backs the outcome up
//! the path. No evaluator is involved, so this is the cheap baseline
//! opponent.
//!
//! With `rave_equivalence` set, child values also blend in
//! all-moves-as-first (AMAF) statistics: every action a player makes later
//! in a simulation counts as a sample for the sibling that plays that
//! action now. The AMAF weight decays as `sqrt(k / (3n + k))`.
//!
//! ```rust
//! use rust_quoridor::core::GameConfig;
//! use rust_quoridor::mcts::{RolloutConfig, UctSearch};
//! use rust_quoridor::rules::Quoridor;
//!
//! let game = Quoridor::new(GameConfig::new(5, 2)).unwrap();
//! let mut search = UctSearch::new(game.clone(), RolloutConfig::default().with_iterations(40)).unwrap();
//!
//! let state = game.initial_state();
//! let decision = search.select_action(&state).unwrap();
//! assert!(game.is_legal(&state, &decision.action));
//! ```

use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{Action, GameRng, GameState, PlayerId};
use crate::error::ConfigError;
use crate::rules::{GameResult, Quoridor};

use super::search::SearchError;

/// Rollout search parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RolloutConfig {
    /// Iterations per decision (default: 1000).
    pub n_iterations: u32,

    /// UCB1 exploration constant (default: sqrt 2).
    pub exploration: f32,

    /// Chance that a playout ply is a pawn move; otherwise any legal
    /// action is drawn.
    pub move_probability: f64,

    /// RAVE equivalence parameter `k`. `None` runs plain UCB1.
    pub rave_equivalence: Option<f32>,

    /// Wall-clock budget per decision in milliseconds.
    pub time_budget_ms: Option<u64>,

    pub seed: u64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            n_iterations: 1000,
            exploration: std::f32::consts::SQRT_2,
            move_probability: 0.5,
            rave_equivalence: None,
            time_budget_ms: None,
            seed: 42,
        }
    }
}

impl RolloutConfig {
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_exploration(mut self, c: f32) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_move_probability(mut self, probability: f64) -> Self {
        self.move_probability = probability;
        self
    }

    pub fn with_rave(mut self, equivalence: f32) -> Self {
        self.rave_equivalence = Some(equivalence);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis() as u64);
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
        if self.n_iterations == 0 {
            return bad("n_iterations must be at least 1");
        }
        if !(self.exploration >= 0.0) {
            return bad("exploration must be non-negative");
        }
        if !(0.0..=1.0).contains(&self.move_probability) {
            return bad("move_probability must lie in [0, 1]");
        }
        if self.rave_equivalence.is_some_and(|k| !(k > 0.0)) {
            return bad("rave_equivalence must be positive");
        }
        Ok(())
    }
}

/// A random legal action: a pawn move with probability `move_probability`
/// when one exists, otherwise any legal action.
pub fn random_action(game: &Quoridor, state: &GameState, rng: &mut GameRng, move_probability: f64) -> Option<Action> {
    let moves = game.legal_moves(state);
    if !moves.is_empty() && rng.gen_bool(move_probability) {
        if let Some(&cell) = rng.choose(&moves) {
            return Some(Action::Move(cell));
        }
    }
    let actions = game.legal_actions(state);
    rng.choose(&actions).copied()
}

/// Outcome of one rollout search.
#[derive(Clone, Debug, PartialEq)]
pub struct UctDecision {
    pub action: Action,

    /// Visits of the chosen child.
    pub visits: u32,

    /// Mean playout outcome of the chosen child for the player to move.
    pub value: f32,

    /// Iterations completed.
    pub iterations: u32,
}

#[derive(Clone, Debug)]
struct UctNode {
    state: GameState,
    /// Action that led here from the parent.
    action: Option<Action>,
    children: Vec<usize>,
    untried: Vec<Action>,
    visits: u32,
    /// Outcomes summed for the player who moved into this node.
    value_sum: f32,
    amaf_visits: u32,
    amaf_sum: f32,
}

impl UctNode {
    fn new(game: &Quoridor, state: GameState, action: Option<Action>) -> Self {
        let untried = game.legal_actions(&state);
        Self {
            state,
            action,
            children: Vec::new(),
            untried,
            visits: 0,
            value_sum: 0.0,
            amaf_visits: 0,
            amaf_sum: 0.0,
        }
    }

    fn mean_value(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.value_sum / self.visits as f32
        }
    }

    /// Player who moved into this node.
    fn arrived_by(&self) -> PlayerId {
        self.state.current_player().opponent()
    }
}

fn outcome_for(result: Option<GameResult>, player: PlayerId) -> f32 {
    result.map_or(0.0, |r| r.value_for(player))
}

/// UCT search context. The tree is rebuilt on every call.
#[derive(Clone, Debug)]
pub struct UctSearch {
    game: Quoridor,
    config: RolloutConfig,
    rng: GameRng,
    playout_rng: GameRng,
    nodes: Vec<UctNode>,
}

impl UctSearch {
    pub fn new(game: Quoridor, config: RolloutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = GameRng::new(config.seed);
        let playout_rng = rng.fork();
        Ok(Self {
            game,
            config,
            rng,
            playout_rng,
            nodes: Vec::new(),
        })
    }

    /// Search from `state` and choose an action.
    ///
    /// A child that wins on the spot is always taken. Otherwise the most
    /// visited child is chosen, then the best mean outcome, then the first
    /// expanded.
    pub fn select_action(&mut self, state: &GameState) -> Result<UctDecision, SearchError> {
        let start = Instant::now();
        let deadline = self.config.time_budget().map(|budget| start + budget);
        self.nodes.clear();
        self.nodes.push(UctNode::new(&self.game, state.clone(), None));
        if self.nodes[0].untried.is_empty() {
            return Err(SearchError::NoLegalAction);
        }

        let mut iterations = 0;
        while iterations < self.config.n_iterations {
            if iterations > 0 && deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            self.iterate()?;
            iterations += 1;
        }

        let mover = state.current_player();
        let mut best: Option<(usize, (bool, u32, f32))> = None;
        for &child in &self.nodes[0].children {
            let node = &self.nodes[child];
            let wins = self.game.result(&node.state) == Some(GameResult::Winner(mover));
            let rank = (wins, node.visits, node.mean_value());
            if best.map_or(true, |(_, top)| rank > top) {
                best = Some((child, rank));
            }
        }
        let (chosen, _) = best.ok_or(SearchError::NoLegalAction)?;
        let node = &self.nodes[chosen];
        let action = node.action.ok_or(SearchError::NoLegalAction)?;

        debug!(
            iterations,
            elapsed_us = start.elapsed().as_micros() as u64,
            nodes = self.nodes.len(),
            %action,
            value = node.mean_value(),
            "rollout search finished"
        );
        Ok(UctDecision {
            action,
            visits: node.visits,
            value: node.mean_value(),
            iterations,
        })
    }

    /// One selection, expansion, playout and backup.
    fn iterate(&mut self) -> Result<(), SearchError> {
        let mut path = vec![0];
        let mut node = 0;
        while !self.nodes[node].state.is_terminal() {
            if !self.nodes[node].untried.is_empty() {
                node = self.expand(node)?;
                path.push(node);
                break;
            }
            match self.best_child(node) {
                Some(child) => {
                    node = child;
                    path.push(child);
                }
                None => break,
            }
        }

        let mut line: Vec<(PlayerId, Action)> = path[1..]
            .iter()
            .filter_map(|&id| {
                let child = &self.nodes[id];
                child.action.map(|a| (child.arrived_by(), a))
            })
            .collect();
        let leaf = self.nodes[node].state.clone();
        let result = self.playout(leaf, &mut line)?;

        for &id in &path {
            let node = &mut self.nodes[id];
            node.visits += 1;
            node.value_sum += outcome_for(result, node.arrived_by());
        }
        if self.config.rave_equivalence.is_some() {
            self.update_amaf(&path, &line, result);
        }
        trace!(depth = path.len(), plies = line.len(), ?result, "iteration finished");
        Ok(())
    }

    /// Add one random untried child of `parent`.
    fn expand(&mut self, parent: usize) -> Result<usize, SearchError> {
        let count = self.nodes[parent].untried.len();
        let pick = self.rng.gen_range_usize(0..count);
        let action = self.nodes[parent].untried.swap_remove(pick);
        let next = self.game.apply(&self.nodes[parent].state, &action)?;

        let id = self.nodes.len();
        self.nodes.push(UctNode::new(&self.game, next, Some(action)));
        self.nodes[parent].children.push(id);
        Ok(id)
    }

    /// Highest UCB1 score; the earliest child wins ties.
    fn best_child(&self, parent: usize) -> Option<usize> {
        let log_visits = (self.nodes[parent].visits.max(1) as f32).ln();
        let mut best: Option<(usize, f32)> = None;
        for &child in &self.nodes[parent].children {
            let score = self.score(&self.nodes[child], log_visits);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((child, score));
            }
        }
        best.map(|(child, _)| child)
    }

    fn score(&self, child: &UctNode, log_parent_visits: f32) -> f32 {
        let n = child.visits.max(1) as f32;
        let mut q = child.value_sum / n;
        if let Some(k) = self.config.rave_equivalence {
            if child.amaf_visits > 0 {
                let beta = (k / (3.0 * n + k)).sqrt();
                q = (1.0 - beta) * q + beta * child.amaf_sum / child.amaf_visits as f32;
            }
        }
        q + self.config.exploration * (log_parent_visits / n).sqrt()
    }

    /// Play random actions from `state` to the end, appending each ply to
    /// `line`. A stuck player ends the playout as a draw.
    fn playout(&mut self, mut state: GameState, line: &mut Vec<(PlayerId, Action)>) -> Result<Option<GameResult>, SearchError> {
        while !state.is_terminal() {
            let mover = state.current_player();
            let Some(action) = random_action(&self.game, &state, &mut self.playout_rng, self.config.move_probability)
            else {
                break;
            };
            line.push((mover, action));
            state = self.game.apply(&state, &action)?;
        }
        Ok(self.game.result(&state))
    }

    /// Credit every child of a path node whose action its mover played
    /// later in the simulation. `line[i]` is the ply played from `path[i]`.
    fn update_amaf(&mut self, path: &[usize], line: &[(PlayerId, Action)], result: Option<GameResult>) {
        let mut later: [FxHashSet<Action>; 2] = Default::default();
        for depth in (0..line.len()).rev() {
            let (player, action) = line[depth];
            later[player.index()].insert(action);
            let Some(&id) = path.get(depth) else {
                continue;
            };
            let value = outcome_for(result, player);
            for i in 0..self.nodes[id].children.len() {
                let child = self.nodes[id].children[i];
                if self.nodes[child].action.is_some_and(|a| later[player.index()].contains(&a)) {
                    let node = &mut self.nodes[child];
                    node.amaf_visits += 1;
                    node.amaf_sum += value;
                }
            }
        }
    }

    /// Nodes in the tree left by the last search.
    #[must_use]
    pub fn tree_size(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn game(&self) -> &Quoridor {
        &self.game
    }

    #[must_use]
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::core::{GameConfig, PlayerMap};

    fn small(walls: u8) -> Quoridor {
        Quoridor::new(GameConfig::new(5, walls)).unwrap()
    }

    /// Player 0 on (3, 2), one step from their goal row.
    fn one_step_from_goal(game: &Quoridor) -> GameState {
        game.custom_position(
            PlayerMap::from_pair(Cell::new(3, 2), Cell::new(2, 0)),
            &[],
            PlayerId::ZERO,
        )
        .unwrap()
    }

    #[test]
    fn test_config_default_and_validate() {
        let config = RolloutConfig::default();
        assert_eq!(config.n_iterations, 1000);
        assert_eq!(config.rave_equivalence, None);
        assert!(config.validate().is_ok());

        assert!(config.clone().with_iterations(0).validate().is_err());
        assert!(config.clone().with_move_probability(1.5).validate().is_err());
        assert!(config.clone().with_rave(0.0).validate().is_err());
        assert!(config.with_exploration(-1.0).validate().is_err());
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = small(0);
        let state = one_step_from_goal(&game);
        let mut search = UctSearch::new(game, RolloutConfig::default().with_iterations(50)).unwrap();

        let decision = search.select_action(&state).unwrap();
        assert_eq!(decision.action, Action::step_to(4, 2));
        assert_eq!(decision.value, 1.0);
        assert_eq!(decision.iterations, 50);
    }

    #[test]
    fn test_rave_takes_immediate_win() {
        let game = small(0);
        let state = one_step_from_goal(&game);
        let config = RolloutConfig::default().with_iterations(50).with_rave(1000.0);
        let mut search = UctSearch::new(game, config).unwrap();

        assert_eq!(search.select_action(&state).unwrap().action, Action::step_to(4, 2));
        let amaf: u32 = search.nodes[0].children.iter().map(|&c| search.nodes[c].amaf_visits).sum();
        assert!(amaf > 0);
    }

    #[test]
    fn test_choice_is_legal_and_seeded() {
        let game = small(2);
        let state = game.initial_state();
        let config = RolloutConfig::default().with_iterations(30).with_seed(5);
        let mut a = UctSearch::new(game.clone(), config.clone()).unwrap();
        let mut b = UctSearch::new(game.clone(), config).unwrap();

        let decision = a.select_action(&state).unwrap();
        assert!(game.is_legal(&state, &decision.action));
        assert_eq!(decision, b.select_action(&state).unwrap());
        assert!(a.tree_size() > 1);
    }

    #[test]
    fn test_visits_add_up() {
        let game = small(1);
        let mut search = UctSearch::new(game.clone(), RolloutConfig::default().with_iterations(40)).unwrap();
        search.select_action(&game.initial_state()).unwrap();

        let root = &search.nodes[0];
        assert_eq!(root.visits, 40);
        let child_visits: u32 = root.children.iter().map(|&c| search.nodes[c].visits).sum();
        assert_eq!(child_visits, 40);
    }

    #[test]
    fn test_finished_game_has_no_action() {
        let game = small(0);
        let won = game
            .apply(&one_step_from_goal(&game), &Action::step_to(4, 2))
            .unwrap();
        let mut search = UctSearch::new(game, RolloutConfig::default()).unwrap();
        assert_eq!(search.select_action(&won), Err(SearchError::NoLegalAction));
    }

    #[test]
    fn test_random_action_is_legal() {
        let game = small(2);
        let state = game.initial_state();
        let mut rng = GameRng::new(3);
        for probability in [0.0, 0.5, 1.0] {
            for _ in 0..20 {
                let action = random_action(&game, &state, &mut rng, probability).unwrap();
                assert!(game.is_legal(&state, &action));
            }
        }
        let mut moves_only = GameRng::new(3);
        let action = random_action(&game, &state, &mut moves_only, 1.0).unwrap();
        assert!(action.is_move());
    }
}
