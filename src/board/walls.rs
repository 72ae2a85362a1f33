//! Copy-on-write wall grid.
//!
//! Walls are stored one slot per intersection in an `im::Vector`, so
//! cloning a grid for a successor state shares structure with the parent
//! and a placement only copies the touched chunk.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::geometry::{span, Cell, Direction, Intersection, Orientation};
use crate::error::IllegalReason;

/// Placed walls, indexed by intersection.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallGrid {
    size: u8,
    slots: Vector<Option<Orientation>>,
}

impl WallGrid {
    /// An empty grid for a `size`×`size` board.
    #[must_use]
    pub fn new(size: u8) -> Self {
        let count = span(size) * span(size);
        Self {
            size,
            slots: std::iter::repeat(None).take(count).collect(),
        }
    }

    /// Board width in cells.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Wall anchored at `at`, if any. Out-of-bounds reads as empty.
    #[inline]
    #[must_use]
    pub fn get(&self, at: Intersection) -> Option<Orientation> {
        if !at.in_bounds(self.size) {
            return None;
        }
        self.slots.get(at.index(self.size)).copied().flatten()
    }

    fn get_signed(&self, row: i16, col: i16) -> Option<Orientation> {
        let span = span(self.size) as i16;
        if row < 0 || col < 0 || row >= span || col >= span {
            return None;
        }
        self.get(Intersection::new(row as u8, col as u8))
    }

    /// Write a wall. Callers are responsible for legality.
    pub fn place(&mut self, at: Intersection, orientation: Orientation) {
        debug_assert!(at.in_bounds(self.size), "wall anchor {at} off the board");
        self.slots.set(at.index(self.size), Some(orientation));
    }

    /// A copy of this grid with one more wall.
    #[must_use]
    pub fn with_wall(&self, at: Intersection, orientation: Orientation) -> Self {
        let mut next = self.clone();
        next.place(at, orientation);
        next
    }

    /// Whether a wall stops a pawn stepping from `from` in `direction`.
    ///
    /// Each cell edge is covered by exactly two anchors: the wall may start
    /// at the intersection before or at the edge.
    #[must_use]
    pub fn blocks(&self, from: Cell, direction: Direction) -> bool {
        let (r, c) = (from.row as i16, from.col as i16);
        let (orientation, anchors) = match direction {
            Direction::Down => (Orientation::Horizontal, [(r, c - 1), (r, c)]),
            Direction::Up => (Orientation::Horizontal, [(r - 1, c - 1), (r - 1, c)]),
            Direction::Right => (Orientation::Vertical, [(r - 1, c), (r, c)]),
            Direction::Left => (Orientation::Vertical, [(r - 1, c - 1), (r, c - 1)]),
        };
        anchors
            .iter()
            .any(|&(ar, ac)| self.get_signed(ar, ac) == Some(orientation))
    }

    /// The neighbour of `from` in `direction` if it exists and no wall is in the way.
    #[must_use]
    pub fn open_step(&self, from: Cell, direction: Direction) -> Option<Cell> {
        let to = from.step(direction, self.size)?;
        if self.blocks(from, direction) {
            None
        } else {
            Some(to)
        }
    }

    /// Structural conflict for a new wall, ignoring connectivity.
    ///
    /// The anchor must be empty and the two colinear neighbours must not
    /// hold a wall of the same orientation, otherwise the segments overlap.
    #[must_use]
    pub fn placement_conflict(&self, at: Intersection, orientation: Orientation) -> Option<IllegalReason> {
        if !at.in_bounds(self.size) {
            return Some(IllegalReason::OutOfBounds);
        }
        if self.get(at).is_some() {
            return Some(IllegalReason::Occupied);
        }
        let colinear: [(i8, i8); 2] = match orientation {
            Orientation::Horizontal => [(0, -1), (0, 1)],
            Orientation::Vertical => [(-1, 0), (1, 0)],
        };
        let overlaps = colinear.iter().any(|&(dr, dc)| {
            at.offset(dr, dc, self.size)
                .and_then(|n| self.get(n))
                == Some(orientation)
        });
        overlaps.then_some(IllegalReason::Overlap)
    }

    /// Placed walls in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Intersection, Orientation)> + '_ {
        let size = self.size;
        self.slots
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.map(|o| (Intersection::from_index(i, size), o)))
    }

    /// Raw slot per intersection index.
    pub fn slots(&self) -> impl Iterator<Item = Option<Orientation>> + '_ {
        self.slots.iter().copied()
    }

    /// Number of walls on the board.
    #[must_use]
    pub fn count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = WallGrid::new(9);
        assert_eq!(grid.count(), 0);
        assert_eq!(grid.slots().count(), 64);
        assert_eq!(grid.get(Intersection::new(7, 7)), None);
    }

    #[test]
    fn test_horizontal_blocks_two_columns() {
        let grid = WallGrid::new(5).with_wall(Intersection::new(1, 1), Orientation::Horizontal);

        assert!(grid.blocks(Cell::new(1, 1), Direction::Down));
        assert!(grid.blocks(Cell::new(1, 2), Direction::Down));
        assert!(grid.blocks(Cell::new(2, 1), Direction::Up));
        assert!(grid.blocks(Cell::new(2, 2), Direction::Up));

        assert!(!grid.blocks(Cell::new(1, 0), Direction::Down));
        assert!(!grid.blocks(Cell::new(1, 3), Direction::Down));
        assert!(!grid.blocks(Cell::new(1, 1), Direction::Right));
    }

    #[test]
    fn test_vertical_blocks_two_rows() {
        let grid = WallGrid::new(5).with_wall(Intersection::new(2, 0), Orientation::Vertical);

        assert!(grid.blocks(Cell::new(2, 0), Direction::Right));
        assert!(grid.blocks(Cell::new(3, 0), Direction::Right));
        assert!(grid.blocks(Cell::new(2, 1), Direction::Left));
        assert!(grid.blocks(Cell::new(3, 1), Direction::Left));

        assert!(!grid.blocks(Cell::new(1, 0), Direction::Right));
        assert!(!grid.blocks(Cell::new(4, 0), Direction::Right));
        assert!(!grid.blocks(Cell::new(2, 0), Direction::Down));
    }

    #[test]
    fn test_open_step_respects_edges_and_walls() {
        let grid = WallGrid::new(3).with_wall(Intersection::new(0, 0), Orientation::Horizontal);
        assert_eq!(grid.open_step(Cell::new(0, 0), Direction::Down), None);
        assert_eq!(grid.open_step(Cell::new(0, 2), Direction::Down), Some(Cell::new(1, 2)));
        assert_eq!(grid.open_step(Cell::new(0, 2), Direction::Right), None);
    }

    #[test]
    fn test_placement_conflicts() {
        let grid = WallGrid::new(5).with_wall(Intersection::new(2, 2), Orientation::Horizontal);

        assert_eq!(
            grid.placement_conflict(Intersection::new(2, 2), Orientation::Horizontal),
            Some(IllegalReason::Occupied)
        );
        assert_eq!(
            grid.placement_conflict(Intersection::new(2, 2), Orientation::Vertical),
            Some(IllegalReason::Occupied)
        );
        assert_eq!(
            grid.placement_conflict(Intersection::new(2, 1), Orientation::Horizontal),
            Some(IllegalReason::Overlap)
        );
        assert_eq!(
            grid.placement_conflict(Intersection::new(2, 3), Orientation::Horizontal),
            Some(IllegalReason::Overlap)
        );
        // Perpendicular neighbours and parallel rows are fine.
        assert_eq!(grid.placement_conflict(Intersection::new(2, 1), Orientation::Vertical), None);
        assert_eq!(grid.placement_conflict(Intersection::new(1, 2), Orientation::Horizontal), None);
        assert_eq!(grid.placement_conflict(Intersection::new(2, 0), Orientation::Horizontal), None);
    }

    #[test]
    fn test_overlap_at_grid_edges() {
        let grid = WallGrid::new(5)
            .with_wall(Intersection::new(0, 0), Orientation::Vertical)
            .with_wall(Intersection::new(3, 3), Orientation::Horizontal);

        assert_eq!(
            grid.placement_conflict(Intersection::new(1, 0), Orientation::Vertical),
            Some(IllegalReason::Overlap)
        );
        assert_eq!(
            grid.placement_conflict(Intersection::new(3, 2), Orientation::Horizontal),
            Some(IllegalReason::Overlap)
        );
        assert_eq!(
            grid.placement_conflict(Intersection::new(4, 0), Orientation::Vertical),
            Some(IllegalReason::OutOfBounds)
        );
        assert_eq!(grid.placement_conflict(Intersection::new(0, 3), Orientation::Vertical), None);
    }

    #[test]
    fn test_clone_shares_parent_unchanged() {
        let parent = WallGrid::new(9);
        let child = parent.with_wall(Intersection::new(4, 4), Orientation::Vertical);
        assert_eq!(parent.count(), 0);
        assert_eq!(child.count(), 1);
        assert_eq!(
            child.iter().collect::<Vec<_>>(),
            vec![(Intersection::new(4, 4), Orientation::Vertical)]
        );
    }
}
