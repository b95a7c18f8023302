use badlands::core::types::{EntityId, Position};
use badlands::entity::Entity;
use badlands::spatial::Grid;
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_lands_in_bounds_and_is_idempotent(
        width in 1i32..64,
        height in 1i32..64,
        x in -10_000i32..10_000,
        y in -10_000i32..10_000,
    ) {
        let grid = Grid::new(width, height);
        let p = grid.normalize(x, y);
        prop_assert!(grid.is_valid(p.x, p.y));
        prop_assert_eq!(grid.normalize(p.x, p.y), p);
    }

    #[test]
    fn placed_entity_is_indexed_at_its_position(
        x in -100i32..100,
        y in -100i32..100,
    ) {
        let mut grid = Grid::new(13, 7);
        let mut e = Entity::support(EntityId(1), "Thia", Position::default());
        prop_assert!(grid.place(&mut e, Position::new(x, y)));
        prop_assert_eq!(grid.get_cell(e.pos), Some(EntityId(1)));
        prop_assert_eq!(grid.get_cell(Position::new(x, y)), Some(EntityId(1)));
        prop_assert_eq!(grid.occupied_count(), 1);
    }

    #[test]
    fn wrapped_distances_are_symmetric(
        ax in 0i32..20, ay in 0i32..20, bx in 0i32..20, by in 0i32..20,
    ) {
        let grid = Grid::new(20, 20);
        let a = Position::new(ax, ay);
        let b = Position::new(bx, by);
        prop_assert_eq!(grid.manhattan(a, b), grid.manhattan(b, a));
        prop_assert!(grid.chebyshev(a, b) <= 10);
        prop_assert!(grid.chebyshev(a, b) <= grid.manhattan(a, b));
    }
}

#[test]
fn test_take_damage_exact_and_liveness() {
    let mut e = Entity::creature(EntityId(1), "Beast", Position::default(), 100, 10, false);
    assert!(e.take_damage(99));
    assert_eq!(e.health, 1);
    assert!(e.is_alive());
    assert!(!e.take_damage(1));
    assert_eq!(e.health, 0);
    assert!(!e.is_alive());
}
