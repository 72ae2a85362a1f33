//! Fixed-depth alpha-beta search.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::ActionCodec;
use crate::core::{Action, GameState, PlayerId};
use crate::error::ConfigError;
use crate::rules::Quoridor;

use super::eval::evaluate;

/// Configuration for minimax search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    /// Plies searched below the root, counting the root move.
    pub depth: u8,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        Self { depth: 2 }
    }
}

impl MinimaxConfig {
    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Search("minimax depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// A minimax decision and its score for the mover.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimaxDecision {
    pub action: Action,
    pub score: f32,
    /// Leaf positions evaluated.
    pub leaves: u64,
}

/// Deterministic minimax player.
///
/// Every leaf is scored from the root mover's point of view, so the root
/// and every other even ply maximize and odd plies minimize.
#[derive(Clone, Debug)]
pub struct MinimaxSearch {
    game: Quoridor,
    codec: ActionCodec,
    config: MinimaxConfig,
}

impl MinimaxSearch {
    pub fn new(game: Quoridor, config: MinimaxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = ActionCodec::for_config(game.config());
        Ok(Self { game, codec, config })
    }

    /// Best action for the player to move, or `None` if there is none
    /// (finished game or a stuck pawn with no walls).
    ///
    /// Ties go to the lowest action index.
    pub fn best_action(&self, state: &GameState) -> Option<MinimaxDecision> {
        let me = state.current_player();
        let mut leaves = 0;
        let mut best: Option<(Action, f32)> = None;
        let mut alpha = f32::NEG_INFINITY;

        for action in self.ordered_actions(state) {
            let Ok(next) = self.game.apply(state, &action) else {
                continue;
            };
            let score = self.alphabeta(&next, self.config.depth - 1, alpha, f32::INFINITY, me, &mut leaves);
            if best.as_ref().map_or(true, |&(_, s)| score > s) {
                alpha = alpha.max(score);
                best = Some((action, score));
            }
        }

        let (action, score) = best?;
        debug!(%action, score, leaves, "minimax decision");
        Some(MinimaxDecision { action, score, leaves })
    }

    fn alphabeta(
        &self,
        state: &GameState,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
        me: PlayerId,
        leaves: &mut u64,
    ) -> f32 {
        if depth == 0 || state.is_terminal() {
            *leaves += 1;
            return evaluate(&self.game, state, me);
        }
        let actions = self.ordered_actions(state);
        if actions.is_empty() {
            *leaves += 1;
            return evaluate(&self.game, state, me);
        }

        let maximizing = state.current_player() == me;
        let mut best = if maximizing { f32::NEG_INFINITY } else { f32::INFINITY };
        for action in actions {
            let Ok(next) = self.game.apply(state, &action) else {
                continue;
            };
            let score = self.alphabeta(&next, depth - 1, alpha, beta, me, leaves);
            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if alpha >= beta {
                break;
            }
        }
        best
    }

    /// Legal actions sorted by their real-board index.
    fn ordered_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions = self.game.legal_actions(state);
        actions.sort_by_key(|action| self.codec.encode(action));
        actions
    }

    pub fn game(&self) -> &Quoridor {
        &self.game
    }

    pub fn config(&self) -> &MinimaxConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::core::{GameConfig, PlayerMap};
    use crate::minimax::WIN_SCORE;

    fn small() -> Quoridor {
        Quoridor::new(GameConfig::new(5, 2)).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(MinimaxConfig::default().depth, 2);
        assert!(MinimaxConfig::default().with_depth(0).validate().is_err());
        assert!(MinimaxSearch::new(small(), MinimaxConfig { depth: 0 }).is_err());
    }

    #[test]
    fn test_takes_immediate_win() {
        let game = small();
        let state = game
            .custom_position(
                PlayerMap::from_pair(Cell::new(3, 1), Cell::new(1, 3)),
                &[],
                PlayerId::ZERO,
            )
            .unwrap();
        let search = MinimaxSearch::new(game, MinimaxConfig::default()).unwrap();
        let decision = search.best_action(&state).unwrap();
        assert_eq!(decision.action, Action::step_to(4, 1));
        assert_eq!(decision.score, WIN_SCORE);
    }

    #[test]
    fn test_none_on_finished_game() {
        let game = small();
        let state = game
            .custom_position(
                PlayerMap::from_pair(Cell::new(3, 1), Cell::new(1, 3)),
                &[],
                PlayerId::ZERO,
            )
            .unwrap();
        let done = game.apply(&state, &Action::step_to(4, 1)).unwrap();
        let search = MinimaxSearch::new(game, MinimaxConfig::default()).unwrap();
        assert!(search.best_action(&done).is_none());
    }

    #[test]
    fn test_decision_is_legal_and_deterministic() {
        let game = small();
        let state = game.initial_state();
        let search = MinimaxSearch::new(game.clone(), MinimaxConfig::default()).unwrap();
        let a = search.best_action(&state).unwrap();
        let b = search.best_action(&state).unwrap();
        assert!(game.is_legal(&state, &a.action));
        assert_eq!(a, b);
        assert!(a.leaves > 0);
    }

    #[test]
    fn test_depth_one_is_greedy() {
        let game = small();
        let state = game.initial_state();
        let search = MinimaxSearch::new(game.clone(), MinimaxConfig::default().with_depth(1)).unwrap();
        let decision = search.best_action(&state).unwrap();
        // Only a forward step raises both progress features.
        assert_eq!(decision.action, Action::step_to(1, 2));
        assert_eq!(decision.leaves as usize, game.legal_actions(&state).len());
    }
}
