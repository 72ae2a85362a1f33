//! Head-to-head games between two agents.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Action, ActionRecord, GameConfig, GameState, PlayerId};
use crate::error::QuoridorError;
use crate::mcts::SearchError;
use crate::rules::{GameResult, Quoridor};

use super::Agent;

/// A finished (or abandoned) game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub config: GameConfig,
    pub actions: Vec<ActionRecord>,
    /// `None` if the game was stopped before it ended.
    pub result: Option<GameResult>,
}

impl GameRecord {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            actions: Vec::new(),
            result: None,
        }
    }

    /// Space-separated action notation, e.g. `"2e 8e 3ch"`.
    #[must_use]
    pub fn to_notation(&self) -> String {
        self.actions
            .iter()
            .map(|record| record.action.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a notation string and replay it on a fresh board.
    pub fn from_notation(config: GameConfig, notation: &str) -> Result<Self, QuoridorError> {
        let game = Quoridor::new(config.clone())?;
        let mut record = Self::new(config);
        let mut state = game.initial_state();
        for token in notation.split_whitespace() {
            let action: Action = token.parse()?;
            let next = game.apply(&state, &action)?;
            record
                .actions
                .push(ActionRecord::new(state.current_player(), action, state.turn()));
            state = next;
        }
        record.result = game.result(&state);
        Ok(record)
    }

    /// Replay every action and return the final position.
    pub fn replay(&self) -> Result<GameState, QuoridorError> {
        let game = Quoridor::new(self.config.clone())?;
        let mut state = game.initial_state();
        for record in &self.actions {
            state = game.apply(&state, &record.action)?;
        }
        Ok(state)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Play `first` (player 0) against `second` (player 1) from the initial
/// position until the game ends. A mover left without any legal action
/// abandons the game, recorded with `result: None`.
pub fn play_match(
    game: &Quoridor,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
) -> Result<GameRecord, SearchError> {
    let mut record = GameRecord::new(game.config().clone());
    let mut history = vec![game.initial_state()];

    loop {
        let state = &history[history.len() - 1];
        if let Some(result) = game.result(state) {
            record.result = Some(result);
            break;
        }
        if game.legal_actions(state).is_empty() {
            break;
        }
        let mover = state.current_player();
        let action = if mover == PlayerId::ZERO {
            first.select_action(&history)?
        } else {
            second.select_action(&history)?
        };
        let next = game.apply(state, &action)?;
        record.actions.push(ActionRecord::new(mover, action, state.turn()));
        history.push(next);
    }

    debug!(
        first = first.name(),
        second = second.name(),
        turns = record.len(),
        result = ?record.result,
        "match finished"
    );
    Ok(record)
}
