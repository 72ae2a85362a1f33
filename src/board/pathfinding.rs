//! Path oracle: best-first search from a cell to any cell of a target row.
//!
//! Nodes are cells, edges join orthogonal neighbours unless a wall blocks
//! them. The priority is `g + h` with `h = |row - goal_row|`, which never
//! overestimates (a pawn gains at most one row per step), so the first goal
//! cell dequeued is at the shortest distance.
//!
//! Pawns do not block each other here: the no-stranding rule and the
//! heuristic features only care about walls.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::geometry::{Cell, Direction};
use super::walls::WallGrid;

#[inline]
fn heuristic(cell: Cell, goal_row: u8) -> u32 {
    cell.row.abs_diff(goal_row) as u32
}

/// Shared A* core. With `stop_on_discovery`, returns as soon as a goal
/// cell is generated, which answers reachability but not distance.
fn search(walls: &WallGrid, start: Cell, goal_row: u8, stop_on_discovery: bool) -> Option<u32> {
    let size = walls.size();
    debug_assert!(start.in_bounds(size), "start cell {start} off the board");
    if start.row == goal_row {
        return Some(0);
    }

    let mut best = vec![u32::MAX; size as usize * size as usize];
    let mut frontier = BinaryHeap::new();
    best[start.index(size)] = 0;
    frontier.push(Reverse((heuristic(start, goal_row), 0u32, start.index(size) as u16)));

    while let Some(Reverse((_, g, index))) = frontier.pop() {
        let cell = Cell::from_index(index as usize, size);
        if cell.row == goal_row {
            return Some(g);
        }
        if g > best[index as usize] {
            continue;
        }
        for direction in Direction::ALL {
            let Some(next) = walls.open_step(cell, direction) else {
                continue;
            };
            let next_g = g + 1;
            let slot = next.index(size);
            if next_g >= best[slot] {
                continue;
            }
            if stop_on_discovery && next.row == goal_row {
                return Some(next_g);
            }
            best[slot] = next_g;
            frontier.push(Reverse((next_g + heuristic(next, goal_row), next_g, slot as u16)));
        }
    }
    None
}

/// Whether `start` can reach any cell of `goal_row`.
#[must_use]
pub fn reaches_goal(walls: &WallGrid, start: Cell, goal_row: u8) -> bool {
    search(walls, start, goal_row, true).is_some()
}

/// Number of steps from `start` to the nearest cell of `goal_row`, or
/// `None` if the row is walled off.
#[must_use]
pub fn shortest_distance(walls: &WallGrid, start: Cell, goal_row: u8) -> Option<u32> {
    search(walls, start, goal_row, false)
}
