//! Toroidal occupancy grid
//!
//! The grid is the authoritative position-to-entity binding. Every cell holds
//! at most one entity id; coordinates wrap on both axes.

use crate::core::types::{EntityId, Position};
use crate::entity::Entity;

#[derive(Debug, Clone)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    cells: Vec<Option<EntityId>>,
}

impl Grid {
    /// Panics on non-positive dimensions; `SimulationConfig::validate` rejects those first.
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
        }
    }

    /// Wrap any coordinate onto the torus
    #[inline]
    pub fn normalize(&self, x: i32, y: i32) -> Position {
        Position::new(x.rem_euclid(self.width), y.rem_euclid(self.height))
    }

    #[inline]
    pub fn wrap(&self, pos: Position) -> Position {
        self.normalize(pos.x, pos.y)
    }

    /// Strict bounds check, no wrapping
    #[inline]
    pub fn is_valid(&self, x: i32, y: i32) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        let p = self.wrap(pos);
        (p.y * self.width + p.x) as usize
    }

    pub fn get_cell(&self, pos: Position) -> Option<EntityId> {
        self.cells[self.index(pos)]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get_cell(pos).is_none()
    }

    /// Put an entity on an empty cell and record the position on the entity
    ///
    /// Returns false (and leaves everything untouched) if the cell is taken.
    pub fn place(&mut self, entity: &mut Entity, pos: Position) -> bool {
        let idx = self.index(pos);
        if self.cells[idx].is_some() {
            return false;
        }
        self.cells[idx] = Some(entity.id);
        entity.pos = self.wrap(pos);
        true
    }

    /// Clear the cell if it holds `id`; otherwise a no-op
    pub fn remove(&mut self, id: EntityId, pos: Position) {
        let idx = self.index(pos);
        if self.cells[idx] == Some(id) {
            self.cells[idx] = None;
        }
    }

    /// Move an entity to `dest` (wrapped), failing if the destination is occupied
    pub fn move_entity(&mut self, entity: &mut Entity, dest: Position) -> bool {
        let to = self.index(dest);
        if self.cells[to].is_some() {
            return false;
        }
        let from = self.index(entity.pos);
        if self.cells[from] == Some(entity.id) {
            self.cells[from] = None;
        }
        self.cells[to] = Some(entity.id);
        entity.pos = self.wrap(dest);
        true
    }

    /// Shortest signed-free distance along one wrapped axis
    #[inline]
    fn axis_delta(a: i32, b: i32, size: i32) -> i32 {
        let d = (a - b).rem_euclid(size);
        d.min(size - d)
    }

    /// Per-axis shortest distances between two cells on the torus
    pub fn wrapped_delta(&self, a: Position, b: Position) -> (i32, i32) {
        (
            Self::axis_delta(a.x, b.x, self.width),
            Self::axis_delta(a.y, b.y, self.height),
        )
    }

    pub fn manhattan(&self, a: Position, b: Position) -> i32 {
        let (dx, dy) = self.wrapped_delta(a, b);
        dx + dy
    }

    pub fn chebyshev(&self, a: Position, b: Position) -> i32 {
        let (dx, dy) = self.wrapped_delta(a, b);
        dx.max(dy)
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(i, _)| Position::new(i as i32 % self.width, i as i32 / self.width))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
