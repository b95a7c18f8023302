//! Single-step movement on the grid
//!
//! Agents move at most one cell per turn: the first step of an A* path
//! toward their target, or a random king-move when no path exists.

pub mod pathfinding;

pub use pathfinding::{find_path, path_cost, DIAGONAL_COST, ORTHOGONAL_COST};

use rand::Rng;

use crate::core::types::Position;
use crate::entity::Entity;
use crate::spatial::Grid;

/// Result of trying to step toward a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Moved(Position),
    /// The next cell on the path is occupied, usually by the target itself
    Blocked,
    NoPath,
    /// Already standing on the target cell
    Arrived,
}

impl StepResult {
    pub fn moved(&self) -> bool {
        matches!(self, Self::Moved(_))
    }
}

/// Take one step along the shortest unobstructed path to `target`
pub fn step_towards(grid: &mut Grid, entity: &mut Entity, target: Position) -> StepResult {
    let target = grid.wrap(target);
    if entity.pos == target {
        return StepResult::Arrived;
    }

    let Some(path) = find_path(grid, entity.pos, target, true) else {
        return StepResult::NoPath;
    };
    let Some(&next) = path.get(1) else {
        return StepResult::Arrived;
    };

    if grid.move_entity(entity, next) {
        StepResult::Moved(next)
    } else {
        StepResult::Blocked
    }
}

/// True iff a step toward the target was taken
pub fn move_towards_target(grid: &mut Grid, entity: &mut Entity, target: Position) -> bool {
    step_towards(grid, entity, target).moved()
}

/// Move to a uniformly random neighbor (or stay, which fails)
pub fn random_step<R: Rng + ?Sized>(grid: &mut Grid, entity: &mut Entity, rng: &mut R) -> bool {
    let dx = rng.gen_range(-1..=1);
    let dy = rng.gen_range(-1..=1);
    let dest = entity.pos.offset(dx, dy);
    grid.move_entity(entity, dest)
}
