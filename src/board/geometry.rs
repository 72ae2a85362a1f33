//! Board coordinates: player cells, wall intersections, directions.
//!
//! An N×N board has N² cells and (N-1)² intersections. Intersection
//! `(r, c)` is the point shared by cells `(r, c)`, `(r, c+1)`, `(r+1, c)`
//! and `(r+1, c+1)`; it is the only place a wall can be anchored.
//!
//! Linear indices are row-major: cell `(r, c)` is `r * N + c` and
//! intersection `(r, c)` is `r * (N - 1) + c`.

use serde::{Deserialize, Serialize};

/// A square a pawn can stand on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index on a board of `size` columns.
    #[inline]
    #[must_use]
    pub fn index(self, size: u8) -> usize {
        self.row as usize * size as usize + self.col as usize
    }

    /// Inverse of [`Cell::index`].
    #[inline]
    #[must_use]
    pub fn from_index(index: usize, size: u8) -> Self {
        let size = size as usize;
        Self::new((index / size) as u8, (index % size) as u8)
    }

    #[inline]
    #[must_use]
    pub fn in_bounds(self, size: u8) -> bool {
        self.row < size && self.col < size
    }

    /// The neighbouring cell in `direction`, if it is on the board.
    #[must_use]
    pub fn step(self, direction: Direction, size: u8) -> Option<Cell> {
        let (dr, dc) = direction.delta();
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 || row >= size as i16 || col >= size as i16 {
            return None;
        }
        Some(Cell::new(row as u8, col as u8))
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A wall anchor point between four cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Intersection {
    pub row: u8,
    pub col: u8,
}

impl Intersection {
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Row-major index among the `(size-1)²` intersections.
    #[inline]
    #[must_use]
    pub fn index(self, size: u8) -> usize {
        self.row as usize * span(size) + self.col as usize
    }

    /// Inverse of [`Intersection::index`].
    #[inline]
    #[must_use]
    pub fn from_index(index: usize, size: u8) -> Self {
        let span = span(size);
        Self::new((index / span) as u8, (index % span) as u8)
    }

    #[inline]
    #[must_use]
    pub fn in_bounds(self, size: u8) -> bool {
        (self.row as usize) < span(size) && (self.col as usize) < span(size)
    }

    /// Offset by a signed delta, if the result is a valid intersection.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8, size: u8) -> Option<Intersection> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        let span = span(size) as i16;
        if row < 0 || col < 0 || row >= span || col >= span {
            return None;
        }
        Some(Intersection::new(row as u8, col as u8))
    }
}

impl std::fmt::Display for Intersection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}, {}>", self.row, self.col)
    }
}

/// Number of intersections along one axis of a `size`-wide board.
///
/// Valid intersection coordinates are `0..span(size)`, so the last one on
/// each axis is `size - 2`.
#[inline]
#[must_use]
pub const fn span(size: u8) -> usize {
    size as usize - 1
}

/// Wall orientation.
///
/// A horizontal wall at `(r, c)` separates rows `r` and `r+1` across
/// columns `c` and `c+1`. A vertical wall separates columns `c` and `c+1`
/// across rows `r` and `r+1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    #[must_use]
    pub const fn perpendicular(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Notation suffix: `h` or `v`.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Orientation::Horizontal => 'h',
            Orientation::Vertical => 'v',
        }
    }
}

/// Orthogonal pawn step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// `(d_row, d_col)` for one step.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The two directions at right angles to this one.
    #[must_use]
    pub const fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }
}
