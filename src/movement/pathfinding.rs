//! A* pathfinding on the torus
//!
//! Orthogonal steps cost 1.0 and diagonal steps 1.4. The heuristic is the
//! wrapped Manhattan distance. Frontier ties are broken by discovery order so
//! a given grid always yields the same path.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::OrderedFloat;

use crate::core::types::{Position, NEIGHBOR_OFFSETS};
use crate::spatial::Grid;

pub const ORTHOGONAL_COST: f64 = 1.0;
pub const DIAGONAL_COST: f64 = 1.4;

/// Node in the A* open set
#[derive(Debug, Clone, Copy)]
struct PathNode {
    pos: Position,
    g_cost: f64,
    f_cost: OrderedFloat<f64>,
    seq: u64,
}

impl PartialEq for PathNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PathNode {}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; earlier discoveries win ties
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn step_cost(dx: i32, dy: i32) -> f64 {
    if dx != 0 && dy != 0 {
        DIAGONAL_COST
    } else {
        ORTHOGONAL_COST
    }
}

/// Find a path using A*
///
/// The returned path includes both `start` and `goal`, normalized onto the
/// grid. With `avoid_occupied`, occupied cells other than the goal are
/// impassable. Returns None if no path exists.
pub fn find_path(
    grid: &Grid,
    start: Position,
    goal: Position,
    avoid_occupied: bool,
) -> Option<Vec<Position>> {
    let start = grid.wrap(start);
    let goal = grid.wrap(goal);
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Position, Position> = HashMap::new();
    let mut g_scores: HashMap<Position, f64> = HashMap::new();
    let mut seq = 0u64;

    g_scores.insert(start, 0.0);
    open_set.push(PathNode {
        pos: start,
        g_cost: 0.0,
        f_cost: OrderedFloat(grid.manhattan(start, goal) as f64),
        seq,
    });

    while let Some(current) = open_set.pop() {
        if current.pos == goal {
            return Some(reconstruct_path(&came_from, current.pos));
        }

        // Stale entry: a cheaper route to this cell was found after it was queued
        let best_g = g_scores.get(&current.pos).copied().unwrap_or(f64::INFINITY);
        if current.g_cost > best_g {
            continue;
        }

        for (dx, dy) in NEIGHBOR_OFFSETS {
            let neighbor = grid.normalize(current.pos.x + dx, current.pos.y + dy);
            if neighbor == current.pos {
                continue;
            }
            if avoid_occupied && neighbor != goal && !grid.is_empty(neighbor) {
                continue;
            }

            let tentative_g = current.g_cost + step_cost(dx, dy);
            let neighbor_g = g_scores.get(&neighbor).copied().unwrap_or(f64::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.pos);
                g_scores.insert(neighbor, tentative_g);

                seq += 1;
                open_set.push(PathNode {
                    pos: neighbor,
                    g_cost: tentative_g,
                    f_cost: OrderedFloat(tentative_g + grid.manhattan(neighbor, goal) as f64),
                    seq,
                });
            }
        }
    }

    None
}

/// Reconstruct path from came_from map
fn reconstruct_path(came_from: &HashMap<Position, Position>, mut current: Position) -> Vec<Position> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Total movement cost of a path, measuring each step on the torus
pub fn path_cost(grid: &Grid, path: &[Position]) -> f64 {
    path.windows(2)
        .map(|pair| {
            let (dx, dy) = grid.wrapped_delta(pair[0], pair[1]);
            step_cost(dx, dy)
        })
        .sum()
}
