//! MCTS integration tests on small boards.

use rust_quoridor::board::{Cell, Orientation};
use rust_quoridor::codec::ActionCodec;
use rust_quoridor::core::{Action, GameConfig, GameState, PlayerId, PlayerMap};
use rust_quoridor::agents::{play_match, Agent, RandomAgent, RolloutAgent};
use rust_quoridor::mcts::{MCTSConfig, MCTSSearch, RolloutConfig, SearchError, UctSearch};
use rust_quoridor::nn::{EncodedState, Evaluation, Evaluator, EvaluatorError, UniformEvaluator};
use rust_quoridor::rules::Quoridor;

fn small() -> Quoridor {
    Quoridor::new(GameConfig::new(5, 2)).unwrap()
}

/// One step from winning: player 0 on row 3 of a 5x5 board.
fn near_win(game: &Quoridor) -> GameState {
    game.custom_position(
        PlayerMap::from_pair(Cell::new(3, 0), Cell::new(1, 4)),
        &[],
        PlayerId::ZERO,
    )
    .unwrap()
}

/// Puts all prior mass on a single canonical index.
struct Peaked {
    index: usize,
    action_count: usize,
}

impl Evaluator for Peaked {
    fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
        let mut prior = vec![0.0; self.action_count];
        prior[self.index] = 1.0;
        Ok(Evaluation::new(prior, 0.0))
    }
}

struct Failing;

impl Evaluator for Failing {
    fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
        Err(EvaluatorError::EvaluationFailed("model offline".into()))
    }
}

struct NotANumber(usize);

impl Evaluator for NotANumber {
    fn evaluate(&self, _encoded: &EncodedState) -> Result<Evaluation, EvaluatorError> {
        Ok(Evaluation::new(vec![1.0; self.0], f32::NAN))
    }
}

// =============================================================================
// Basic Search Tests
// =============================================================================

#[test]
fn test_mcts_returns_legal_action() {
    let game = Quoridor::default();
    let evaluator = UniformEvaluator::new(game.action_count());
    let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();

    let state = game.initial_state();
    let result = search.select_action(&state).unwrap();
    assert!(game.is_legal(&state, &result.action));
    assert_eq!(result.policy.len(), 209);
}

#[test]
fn test_single_simulation_still_decides() {
    let game = small();
    let evaluator = UniformEvaluator::new(game.action_count());
    let config = MCTSConfig::for_testing().with_simulations(1);
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();

    let result = search.select_action(&game.initial_state()).unwrap();
    assert_eq!(result.simulations, 1);
    assert_eq!(result.policy.iter().filter(|&&p| p > 0.0).count(), 1);
}

#[test]
fn test_finds_winning_move() {
    let game = small();
    let evaluator = UniformEvaluator::new(game.action_count());
    let config = MCTSConfig::for_testing().with_simulations(200);
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();

    let result = search.select_action(&near_win(&game)).unwrap();
    assert_eq!(result.action, Action::step_to(4, 0));
    assert!(result.root_value > 0.5);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_mcts_deterministic_with_seed() {
    let game = small();
    let evaluator = UniformEvaluator::new(game.action_count());
    let config = MCTSConfig::for_training().with_simulations(100).with_seed(12345);
    let state = game.initial_state();

    let mut a = MCTSSearch::new(game.clone(), &evaluator, config.clone()).unwrap();
    let mut b = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();
    let first = a.select_action(&state).unwrap();
    let second = b.select_action(&state).unwrap();

    assert_eq!(first, second);
    assert_eq!(a.root_visits(), b.root_visits());
}

#[test]
fn test_greedy_search_without_noise_repeats() {
    let game = small();
    let evaluator = UniformEvaluator::new(game.action_count());
    let state = game.initial_state();
    let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();

    let first = search.select_action(&state).unwrap();
    let second = search.select_action(&state).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Priors And Perspective
// =============================================================================

#[test]
fn test_prior_steers_search() {
    let game = small();
    let codec = ActionCodec::for_config(game.config());
    let target = Action::wall(1, 1, Orientation::Vertical);
    let evaluator = Peaked {
        index: codec.encode(&target),
        action_count: game.action_count(),
    };
    let config = MCTSConfig::for_testing().with_simulations(16);
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();

    let result = search.select_action(&game.initial_state()).unwrap();
    assert_eq!(result.action, target);
    assert_eq!(result.action_index, codec.encode(&target));
}

#[test]
fn test_prior_is_read_from_mover_perspective() {
    let game = small();
    let codec = ActionCodec::for_config(game.config());
    // Canonical "one step forward" from the middle of the home row.
    let evaluator = Peaked {
        index: codec.encode(&Action::step_to(1, 2)),
        action_count: game.action_count(),
    };
    let config = MCTSConfig::for_testing().with_simulations(16);
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();

    let state = game.apply(&game.initial_state(), &Action::step_to(0, 1)).unwrap();
    assert_eq!(state.current_player(), PlayerId::ONE);
    let result = search.select_action(&state).unwrap();
    // Player 1 moves from (4, 2) toward row 0.
    assert_eq!(result.action, Action::step_to(3, 2));
}

#[test]
fn test_zero_prior_falls_back_to_uniform() {
    let game = small();
    // Index 0 is cell (0, 0): never a legal move from the start.
    let evaluator = Peaked {
        index: 0,
        action_count: game.action_count(),
    };
    let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();
    let state = game.initial_state();
    let result = search.select_action(&state).unwrap();
    assert!(game.is_legal(&state, &result.action));
}

// =============================================================================
// Evaluator Failures
// =============================================================================

#[test]
fn test_evaluator_failure_aborts_search() {
    let game = small();
    let mut search = MCTSSearch::new(game.clone(), &Failing, MCTSConfig::for_testing()).unwrap();
    let err = search.select_action(&game.initial_state()).unwrap_err();
    assert!(matches!(err, SearchError::Evaluator(EvaluatorError::EvaluationFailed(_))));
}

#[test]
fn test_non_finite_value_rejected() {
    let game = small();
    let evaluator = NotANumber(game.action_count());
    let mut search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();
    let err = search.select_action(&game.initial_state()).unwrap_err();
    assert!(matches!(err, SearchError::Evaluator(EvaluatorError::NonFiniteValue(_))));
}

// =============================================================================
// Budgets And Statistics
// =============================================================================

#[test]
fn test_time_budget_stops_early() {
    let game = Quoridor::default();
    let evaluator = UniformEvaluator::new(game.action_count());
    let config = MCTSConfig::for_testing()
        .with_simulations(1_000_000)
        .with_time_budget(std::time::Duration::from_millis(20));
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();

    let result = search.select_action(&game.initial_state()).unwrap();
    assert!(result.simulations >= 1);
    assert!(result.simulations < 1_000_000);
}

#[test]
fn test_search_statistics() {
    let game = small();
    let evaluator = UniformEvaluator::new(game.action_count());
    let config = MCTSConfig::for_testing().with_simulations(50);
    let mut search = MCTSSearch::new(game.clone(), &evaluator, config).unwrap();
    search.select_action(&game.initial_state()).unwrap();

    let stats = search.stats();
    assert_eq!(stats.simulations, 50);
    assert!(stats.evaluations >= 2);
    assert!(stats.evaluations <= 51);
    assert!(stats.max_depth >= 1);

    let tree = search.tree().stats();
    assert_eq!(tree.node_count as u32, stats.evaluations);
    assert!(tree.opened_count >= 1);
}

// =============================================================================
// Rollout UCT
// =============================================================================

#[test]
fn test_rollout_search_finds_winning_move() {
    let game = Quoridor::new(GameConfig::new(5, 2).with_max_turns(60)).unwrap();
    let state = near_win(&game);
    let mut search = UctSearch::new(game.clone(), RolloutConfig::default().with_iterations(200)).unwrap();

    let decision = search.select_action(&state).unwrap();
    assert_eq!(decision.action, Action::step_to(4, 0));
    assert_eq!(decision.value, 1.0);
}

#[test]
fn test_rollout_agent_match_replays() {
    let game = Quoridor::new(GameConfig::new(5, 0).with_max_turns(40)).unwrap();
    let config = RolloutConfig::default().with_iterations(60).with_rave(300.0);
    let mut uct = RolloutAgent::new(game.clone(), config).unwrap();
    let mut random = RandomAgent::new(game.clone(), 4);
    assert_eq!(uct.name(), "uct");

    let record = play_match(&game, &mut uct, &mut random).unwrap();
    assert!(record.result.is_some());
    let end = record.replay().unwrap();
    assert_eq!(game.result(&end), record.result);
}

#[test]
fn test_rollout_search_refuses_finished_game() {
    let game = small();
    let won = game.apply(&near_win(&game), &Action::step_to(4, 0)).unwrap();
    let mut search = UctSearch::new(game, RolloutConfig::default()).unwrap();
    assert_eq!(search.select_action(&won), Err(SearchError::NoLegalAction));
}
