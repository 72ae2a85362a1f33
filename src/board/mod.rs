//! Board geometry and the two wall oracles.
//!
//! - `geometry`: cells, intersections, orientations, directions
//! - `walls`: copy-on-write wall grid with edge blocking and overlap checks
//! - `connectivity`: union-find pre-filter for wall placements
//! - `pathfinding`: A* reachability and distance to a goal row

pub mod connectivity;
pub mod geometry;
pub mod pathfinding;
pub mod walls;

pub use connectivity::{BoardEdge, ConnectivityOracle};
pub use geometry::{span, Cell, Direction, Intersection, Orientation};
pub use pathfinding::{reaches_goal, shortest_distance};
pub use walls::WallGrid;
