//! Concrete agents.

use crate::core::{Action, GameRng, GameState};
use crate::error::ConfigError;
use crate::mcts::{random_action, MCTSSearch, RolloutConfig, SearchError, UctSearch};
use crate::minimax::{MinimaxConfig, MinimaxSearch};
use crate::nn::Evaluator;
use crate::rules::Quoridor;

use super::Agent;

/// Plays a random pawn move half the time, otherwise any random legal
/// action. Wall placements still go through the legality engine, so the
/// agent can never strand anyone.
#[derive(Clone, Debug)]
pub struct RandomAgent {
    game: Quoridor,
    rng: GameRng,
}

impl RandomAgent {
    pub fn new(game: Quoridor, seed: u64) -> Self {
        Self {
            game,
            rng: GameRng::new(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn select_action(&mut self, history: &[GameState]) -> Result<Action, SearchError> {
        let state = history.last().ok_or(SearchError::NoLegalAction)?;
        random_action(&self.game, state, &mut self.rng, 0.5).ok_or(SearchError::NoLegalAction)
    }
}

/// Agent wrapping [`MinimaxSearch`].
#[derive(Clone, Debug)]
pub struct MinimaxAgent {
    search: MinimaxSearch,
}

impl MinimaxAgent {
    pub fn new(game: Quoridor, config: MinimaxConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            search: MinimaxSearch::new(game, config)?,
        })
    }
}

impl Agent for MinimaxAgent {
    fn name(&self) -> &str {
        "minimax"
    }

    fn select_action(&mut self, history: &[GameState]) -> Result<Action, SearchError> {
        let state = history.last().ok_or(SearchError::NoLegalAction)?;
        self.search
            .best_action(state)
            .map(|decision| decision.action)
            .ok_or(SearchError::NoLegalAction)
    }
}

/// Agent wrapping the evaluator-free [`UctSearch`].
#[derive(Clone, Debug)]
pub struct RolloutAgent {
    search: UctSearch,
}

impl RolloutAgent {
    pub fn new(game: Quoridor, config: RolloutConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            search: UctSearch::new(game, config)?,
        })
    }
}

impl Agent for RolloutAgent {
    fn name(&self) -> &str {
        "uct"
    }

    fn select_action(&mut self, history: &[GameState]) -> Result<Action, SearchError> {
        let state = history.last().ok_or(SearchError::NoLegalAction)?;
        Ok(self.search.select_action(state)?.action)
    }
}

/// Agent wrapping an [`MCTSSearch`]; the whole game history is passed on to
/// the encoder.
pub struct MctsAgent<'a, E: Evaluator + ?Sized> {
    search: MCTSSearch<'a, E>,
}

impl<'a, E: Evaluator + ?Sized> MctsAgent<'a, E> {
    pub fn new(search: MCTSSearch<'a, E>) -> Self {
        Self { search }
    }

    pub fn search(&self) -> &MCTSSearch<'a, E> {
        &self.search
    }
}

impl<E: Evaluator + ?Sized> Agent for MctsAgent<'_, E> {
    fn name(&self) -> &str {
        "mcts"
    }

    fn select_action(&mut self, history: &[GameState]) -> Result<Action, SearchError> {
        let state = history.last().ok_or(SearchError::NoLegalAction)?;
        if self.search.game().legal_actions(state).is_empty() {
            return Err(SearchError::NoLegalAction);
        }
        Ok(self.search.select_action_with_history(history)?.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::mcts::MCTSConfig;
    use crate::nn::UniformEvaluator;

    fn small() -> Quoridor {
        Quoridor::new(GameConfig::new(5, 2)).unwrap()
    }

    #[test]
    fn test_random_agent_is_legal_and_seeded() {
        let game = small();
        let history = vec![game.initial_state()];
        let mut a = RandomAgent::new(game.clone(), 9);
        let mut b = RandomAgent::new(game.clone(), 9);
        for _ in 0..20 {
            let action = a.select_action(&history).unwrap();
            assert!(game.is_legal(&history[0], &action));
            assert_eq!(action, b.select_action(&history).unwrap());
        }
    }

    #[test]
    fn test_agents_refuse_empty_history() {
        let game = small();
        let mut random = RandomAgent::new(game.clone(), 0);
        let mut minimax = MinimaxAgent::new(game.clone(), MinimaxConfig::default()).unwrap();
        let mut uct = RolloutAgent::new(game, RolloutConfig::default()).unwrap();
        assert_eq!(random.select_action(&[]), Err(SearchError::NoLegalAction));
        assert_eq!(minimax.select_action(&[]), Err(SearchError::NoLegalAction));
        assert_eq!(uct.select_action(&[]), Err(SearchError::NoLegalAction));
    }

    #[test]
    fn test_mcts_agent_uses_history() {
        let game = small();
        let evaluator = UniformEvaluator::new(game.action_count());
        let search = MCTSSearch::new(game.clone(), &evaluator, MCTSConfig::for_testing()).unwrap();
        let mut agent = MctsAgent::new(search);

        let first = game.initial_state();
        let second = game.apply(&first, &Action::step_to(1, 2)).unwrap();
        let action = agent.select_action(&[first, second.clone()]).unwrap();
        assert!(game.is_legal(&second, &action));
        assert_eq!(agent.name(), "mcts");
        assert_eq!(agent.search().stats().simulations, 64);
    }

    #[test]
    fn test_rollout_agent_plays_legal_actions() {
        let game = small();
        let mut agent = RolloutAgent::new(game.clone(), RolloutConfig::default().with_iterations(20)).unwrap();
        let mut history = vec![game.initial_state()];
        for _ in 0..4 {
            let state = &history[history.len() - 1];
            let action = agent.select_action(&history).unwrap();
            assert!(game.is_legal(state, &action));
            let next = game.apply(state, &action).unwrap();
            history.push(next);
        }
        assert_eq!(agent.name(), "uct");
    }
}
