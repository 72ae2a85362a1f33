//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe identifier for one of the two players. Player 0 starts on row
//! 0 and races to row N-1; player 1 starts on row N-1 and races to row 0.
//!
//! ## PlayerMap
//!
//! Per-player data backed by a `[T; 2]`, indexed by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Identifier for one of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who moves first.
    pub const ZERO: PlayerId = PlayerId(0);
    /// The second player.
    pub const ONE: PlayerId = PlayerId(1);

    /// Create a player ID. Only 0 and 1 exist.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "Quoridor has exactly 2 players");
        Self(id)
    }

    /// Get the raw player index (0 or 1).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both players in turn order.
    #[must_use]
    pub const fn all() -> [PlayerId; 2] {
        [PlayerId::ZERO, PlayerId::ONE]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per player with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_quoridor::core::{PlayerId, PlayerMap};
///
/// let mut walls: PlayerMap<u8> = PlayerMap::with_value(10);
/// walls[PlayerId::ONE] -= 1;
/// assert_eq!(walls[PlayerId::ZERO], 10);
/// assert_eq!(walls[PlayerId::ONE], 9);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Build from a factory called once per player.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ZERO), factory(PlayerId::ONE)],
        }
    }

    /// Build from explicit values for player 0 and player 1.
    pub const fn from_pair(first: T, second: T) -> Self {
        Self { data: [first, second] }
    }

    /// Both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// The same entries with the two players' roles exchanged.
    #[must_use]
    pub fn swapped(self) -> Self {
        let [first, second] = self.data;
        Self { data: [second, first] }
    }

    /// Apply `f` to each entry.
    pub fn map<U>(&self, f: impl Fn(&T) -> U) -> PlayerMap<U> {
        PlayerMap {
            data: [f(&self.data[0]), f(&self.data[1])],
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().into_iter().zip(self.data.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
