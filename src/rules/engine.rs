//! The Quoridor rules engine.
//!
//! `Quoridor` owns a validated [`GameConfig`] and is the single authority
//! on legality: every consumer (search, agents, self-play) enumerates and
//! applies actions through it.
//!
//! ## Ordering
//!
//! `legal_actions` lists pawn moves by cell index, then horizontal walls,
//! then vertical walls, each by intersection index. This is the same order
//! as the action codec, so search results are reproducible.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::movegen::pawn_moves;
use super::placement::{place_wall, wall_conflict, would_strand};
use crate::board::{reaches_goal, shortest_distance, Cell, Intersection, Orientation, WallGrid};
use crate::core::{Action, GameConfig, GameState, GameStatus, PlayerId, PlayerMap};
use crate::error::{ConfigError, IllegalReason, QuoridorError};

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Turn cap reached.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Outcome for `player`: `1.0` win, `-1.0` loss, `0.0` draw.
    #[must_use]
    pub fn value_for(&self, player: PlayerId) -> f32 {
        match self {
            GameResult::Winner(p) if *p == player => 1.0,
            GameResult::Winner(_) => -1.0,
            GameResult::Draw => 0.0,
        }
    }

    /// The result a status implies, `None` while the game is running.
    #[must_use]
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(player) => Some(GameResult::Winner(player)),
            GameStatus::Drawn => Some(GameResult::Draw),
        }
    }
}

/// Rules engine for one board configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Quoridor {
    config: GameConfig,
}

impl Default for Quoridor {
    fn default() -> Self {
        Self {
            config: GameConfig::default(),
        }
    }
}

impl Quoridor {
    /// Build an engine, validating the config.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Board width in cells.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u8 {
        self.config.grid_size
    }

    /// Size of the action index space.
    #[inline]
    #[must_use]
    pub fn action_count(&self) -> usize {
        self.config.action_count()
    }

    #[inline]
    #[must_use]
    pub fn goal_row(&self, player: PlayerId) -> u8 {
        self.config.goal_row(player)
    }

    /// Pawns on their start cells, no walls, full supplies, player 0 to move.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::from_parts(
            PlayerMap::new(|player| self.config.start_cell(player)),
            WallGrid::new(self.size()),
            PlayerMap::with_value(self.config.max_walls),
            0,
            PlayerId::ZERO,
            GameStatus::InProgress,
        )
    }

    /// Set up an arbitrary in-progress position.
    ///
    /// Walls are laid in order and each must be individually legal against
    /// the ones before it. Pre-placed walls do not draw on either supply.
    pub fn custom_position(
        &self,
        positions: PlayerMap<Cell>,
        walls: &[(Intersection, Orientation)],
        current_player: PlayerId,
    ) -> Result<GameState, QuoridorError> {
        let size = self.size();
        for (player, &cell) in positions.iter() {
            if !cell.in_bounds(size) {
                return Err(QuoridorError::InvalidPosition(format!("{player} at {cell} is off the board")));
            }
            if cell.row == self.goal_row(player) {
                return Err(QuoridorError::InvalidPosition(format!("{player} already stands on their goal row")));
            }
        }
        if positions[PlayerId::ZERO] == positions[PlayerId::ONE] {
            return Err(QuoridorError::InvalidPosition("both pawns share a cell".to_string()));
        }

        let mut state = GameState::from_parts(
            positions,
            WallGrid::new(size),
            PlayerMap::with_value(self.config.max_walls),
            0,
            current_player,
            GameStatus::InProgress,
        );
        for &(at, orientation) in walls {
            let reason = state
                .walls()
                .placement_conflict(at, orientation)
                .or_else(|| would_strand(&self.config, &state, at, orientation).then_some(IllegalReason::Strands));
            if let Some(reason) = reason {
                let action = Action::PlaceWall(at, orientation);
                return Err(QuoridorError::InvalidPosition(format!("wall {action}: {reason}")));
            }
            place_wall(&mut state, at, orientation);
        }
        Ok(state)
    }

    /// Pawn destinations for the player to move, in cell-index order.
    #[must_use]
    pub fn legal_moves(&self, state: &GameState) -> SmallVec<[Cell; 8]> {
        if state.is_terminal() {
            return SmallVec::new();
        }
        pawn_moves(state, self.config.diagonal_jump_at_edge)
    }

    /// Wall placements for the player to move, horizontals first.
    #[must_use]
    pub fn legal_walls(&self, state: &GameState) -> Vec<(Intersection, Orientation)> {
        if state.is_terminal() || state.walls_remaining(state.current_player()) == 0 {
            return Vec::new();
        }
        let span = crate::board::span(self.size());
        let mut out = Vec::new();
        for orientation in Orientation::ALL {
            for index in 0..span * span {
                let at = Intersection::from_index(index, self.size());
                if wall_conflict(&self.config, state, at, orientation).is_none() {
                    out.push((at, orientation));
                }
            }
        }
        out
    }

    /// Every legal action in action-index order. Empty when terminal.
    #[must_use]
    pub fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions: Vec<Action> = self.legal_moves(state).into_iter().map(Action::Move).collect();
        actions.extend(
            self.legal_walls(state)
                .into_iter()
                .map(|(at, orientation)| Action::PlaceWall(at, orientation)),
        );
        actions
    }

    /// Why `action` is illegal for the player to move, if it is.
    pub fn check_action(&self, state: &GameState, action: &Action) -> Result<(), IllegalReason> {
        if state.is_terminal() {
            return Err(IllegalReason::GameOver);
        }
        match *action {
            Action::Move(cell) => {
                if !cell.in_bounds(self.size()) {
                    return Err(IllegalReason::OutOfBounds);
                }
                if !self.legal_moves(state).contains(&cell) {
                    return Err(IllegalReason::Unreachable);
                }
                Ok(())
            }
            Action::PlaceWall(at, orientation) => match wall_conflict(&self.config, state, at, orientation) {
                Some(reason) => Err(reason),
                None => Ok(()),
            },
        }
    }

    #[must_use]
    pub fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.check_action(state, action).is_ok()
    }

    /// Play `action` for the player to move, returning the successor.
    ///
    /// The input state is left untouched. A pawn reaching its goal row wins
    /// immediately; otherwise reaching `max_turns` draws.
    pub fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, QuoridorError> {
        self.check_action(state, action)
            .map_err(|reason| QuoridorError::IllegalAction { action: *action, reason })?;

        let mover = state.current_player();
        let mut next = state.clone();
        match *action {
            Action::Move(cell) => next.positions[mover] = cell,
            Action::PlaceWall(at, orientation) => {
                place_wall(&mut next, at, orientation);
                next.walls_remaining[mover] -= 1;
                // `wall_conflict` already guarantees both goals stay
                // reachable. Re-running two path searches per wall is too
                // slow for search playouts, so release builds skip this.
                debug_assert!(
                    PlayerId::all()
                        .into_iter()
                        .all(|p| reaches_goal(next.walls(), next.position(p), self.goal_row(p))),
                    "wall {action} passed the legality check but strands a player"
                );
            }
        }

        next.turn += 1;
        next.current_player = mover.opponent();
        next.status = if next.position(mover).row == self.goal_row(mover) {
            GameStatus::Won(mover)
        } else if next.turn >= self.config.max_turns {
            GameStatus::Drawn
        } else {
            GameStatus::InProgress
        };
        Ok(next)
    }

    #[inline]
    #[must_use]
    pub fn is_terminal(&self, state: &GameState) -> bool {
        state.is_terminal()
    }

    /// `Some(result)` once the game has ended.
    #[must_use]
    pub fn result(&self, state: &GameState) -> Option<GameResult> {
        GameResult::from_status(state.status())
    }

    /// Fewest pawn steps from `player`'s cell to their goal row, ignoring
    /// the other pawn. `None` only for positions that break the rules.
    #[must_use]
    pub fn distance_to_goal(&self, state: &GameState, player: PlayerId) -> Option<u32> {
        shortest_distance(state.walls(), state.position(player), self.goal_row(player))
    }

    /// Shaping reward for `player`: how far ahead they are in the race to
    /// the goal, normalized by the cell count.
    #[must_use]
    pub fn intermediate_reward(&self, state: &GameState, player: PlayerId) -> f32 {
        let cells = f32::from(self.size()) * f32::from(self.size());
        let distance = |p| self.distance_to_goal(state, p).map_or(cells, |d| d as f32);
        (distance(player.opponent()) - distance(player)) / cells
    }
}
