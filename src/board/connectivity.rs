//! Union-find over wall intersections, used as a cheap pre-filter for the
//! no-stranding rule.
//!
//! ## Model
//!
//! Each intersection is one element, plus four sentinels for the board
//! edges. Walls that share a lattice point are unioned together, and a
//! wall that reaches an edge is unioned with that edge's sentinel. Every
//! root carries a bitmask of the edges its group touches.
//!
//! A new wall can only enclose cells if it closes a loop: either it joins
//! two groups that already touch the border (the border itself closes the
//! loop), or it touches the same group twice. Anything else leaves the
//! free region connected, so the path search can be skipped.
//!
//! The oracle never looks at pawns. A positive answer only means "run the
//! path oracle"; see [`crate::board::pathfinding`].

use smallvec::SmallVec;

use super::geometry::{span, Intersection, Orientation};
use super::walls::WallGrid;

/// One of the four board edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoardEdge {
    Top,
    Bottom,
    Left,
    Right,
}

impl BoardEdge {
    pub const ALL: [BoardEdge; 4] = [BoardEdge::Top, BoardEdge::Bottom, BoardEdge::Left, BoardEdge::Right];

    /// Bit used in edge masks.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            BoardEdge::Top => 0b0001,
            BoardEdge::Bottom => 0b0010,
            BoardEdge::Left => 0b0100,
            BoardEdge::Right => 0b1000,
        }
    }

    const fn offset(self) -> usize {
        match self {
            BoardEdge::Top => 0,
            BoardEdge::Bottom => 1,
            BoardEdge::Left => 2,
            BoardEdge::Right => 3,
        }
    }
}

/// Walls of the opposite orientation that share a point with a wall at the
/// origin, as `(d_row, d_col)`.
const CROSSING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1), (0, 1),
    (1, -1), (1, 0), (1, 1),
];

/// Union-find forest sized `(N-1)² + 4`.
#[derive(Clone, Debug)]
pub struct ConnectivityOracle {
    size: u8,
    parent: Vec<u16>,
    edges: Vec<u8>,
}

impl ConnectivityOracle {
    /// A forest with no walls: every element is its own root.
    #[must_use]
    pub fn new(size: u8) -> Self {
        let intersections = span(size) * span(size);
        let total = intersections + BoardEdge::ALL.len();
        let mut edges = vec![0u8; total];
        for edge in BoardEdge::ALL {
            edges[intersections + edge.offset()] = edge.bit();
        }
        Self {
            size,
            parent: (0..total as u16).collect(),
            edges,
        }
    }

    /// Rebuild from scratch for an existing wall grid.
    #[must_use]
    pub fn from_walls(walls: &WallGrid) -> Self {
        let mut oracle = Self::new(walls.size());
        let mut partial = WallGrid::new(walls.size());
        for (at, orientation) in walls.iter() {
            oracle.commit(&partial, at, orientation);
            partial.place(at, orientation);
        }
        oracle
    }

    /// Number of elements, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn sentinel(&self, edge: BoardEdge) -> usize {
        span(self.size) * span(self.size) + edge.offset()
    }

    /// Root lookup without compression.
    fn root(&self, mut x: usize) -> usize {
        while self.parent[x] as usize != x {
            x = self.parent[x] as usize;
        }
        x
    }

    /// Root lookup that points every visited element straight at the root.
    fn find(&mut self, x: usize) -> usize {
        let root = self.root(x);
        let mut cur = x;
        while self.parent[cur] as usize != root {
            let next = self.parent[cur] as usize;
            self.parent[cur] = root as u16;
            cur = next;
        }
        root
    }

    /// Merge two groups, keeping an edge-anchored root on top.
    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (top, child) = if self.edges[rb] != 0 && self.edges[ra] == 0 {
            (rb, ra)
        } else {
            (ra, rb)
        };
        self.parent[child] = top as u16;
        self.edges[top] |= self.edges[child];
    }

    /// Elements a wall at `at` would be unioned with, given the walls already placed.
    fn contacts(&self, walls: &WallGrid, at: Intersection, orientation: Orientation) -> SmallVec<[usize; 12]> {
        let size = self.size;
        let last = span(size) as u8 - 1;
        let mut out = SmallVec::new();

        let colinear: [(i8, i8); 2] = match orientation {
            Orientation::Horizontal => [(0, -2), (0, 2)],
            Orientation::Vertical => [(-2, 0), (2, 0)],
        };
        for (dr, dc) in colinear {
            if let Some(n) = at.offset(dr, dc, size) {
                if walls.get(n) == Some(orientation) {
                    out.push(n.index(size));
                }
            }
        }
        let crossing = orientation.perpendicular();
        for (dr, dc) in CROSSING_OFFSETS {
            if let Some(n) = at.offset(dr, dc, size) {
                if walls.get(n) == Some(crossing) {
                    out.push(n.index(size));
                }
            }
        }

        let (low, high, coord) = match orientation {
            Orientation::Horizontal => (BoardEdge::Left, BoardEdge::Right, at.col),
            Orientation::Vertical => (BoardEdge::Top, BoardEdge::Bottom, at.row),
        };
        if coord == 0 {
            out.push(self.sentinel(low));
        }
        if coord == last {
            out.push(self.sentinel(high));
        }
        out
    }

    /// Whether placing this wall could close off part of the board.
    ///
    /// `walls` is the grid before the placement. Returns `true` when the
    /// wall would join two border-anchored groups or touch one group twice.
    #[must_use]
    pub fn check_merges_borders(&self, walls: &WallGrid, at: Intersection, orientation: Orientation) -> bool {
        let mut roots: SmallVec<[usize; 12]> = SmallVec::new();
        let mut anchored = 0;
        for element in self.contacts(walls, at, orientation) {
            let root = self.root(element);
            if roots.contains(&root) {
                return true;
            }
            if self.edges[root] != 0 {
                anchored += 1;
                if anchored > 1 {
                    return true;
                }
            }
            roots.push(root);
        }
        false
    }

    /// Record a placed wall. `walls` is the grid before the placement.
    pub fn commit(&mut self, walls: &WallGrid, at: Intersection, orientation: Orientation) {
        let element = at.index(self.size);
        for other in self.contacts(walls, at, orientation) {
            self.union(element, other);
        }
    }

    /// Edges reached by the group containing the wall at `at`.
    #[must_use]
    pub fn edges_touched(&self, at: Intersection) -> u8 {
        self.edges[self.root(at.index(self.size))]
    }
}
