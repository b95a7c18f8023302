//! State abstraction
//!
//! Squashes a hunter's numeric attributes and its surroundings into a small
//! discrete tuple that keys the Q-table.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::spatial::Grid;

/// Creatures closer than this (wrapped Manhattan) count toward the threat level
pub const THREAT_RADIUS: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateKey {
    pub health: Level,
    /// Only ever `Low` or `High`
    pub stamina: Level,
    pub honor: Level,
    pub threat: Level,
}

impl StateKey {
    pub fn from_parts(health: i32, stamina: i32, honor: i32, nearby_threats: usize) -> Self {
        Self {
            health: health_level(health),
            stamina: stamina_level(stamina),
            honor: honor_level(honor),
            threat: threat_level(nearby_threats),
        }
    }

    /// Observe a hunter against the living creatures around it
    ///
    /// Non-hunters read as zero stamina and honor.
    pub fn observe<'a>(
        hunter: &Entity,
        creatures: impl IntoIterator<Item = &'a Entity>,
        grid: &Grid,
    ) -> Self {
        let nearby = creatures
            .into_iter()
            .filter(|c| c.is_creature() && c.is_alive())
            .filter(|c| grid.manhattan(c.pos, hunter.pos) < THREAT_RADIUS)
            .count();

        let (stamina, honor) = hunter
            .as_hunter()
            .map_or((0, 0), |h| (h.stamina, h.honor));

        Self::from_parts(hunter.health, stamina, honor, nearby)
    }
}

fn health_level(health: i32) -> Level {
    match health {
        h if h > 65 => Level::High,
        h if h > 30 => Level::Medium,
        _ => Level::Low,
    }
}

fn stamina_level(stamina: i32) -> Level {
    if stamina > 65 {
        Level::High
    } else {
        Level::Low
    }
}

fn honor_level(honor: i32) -> Level {
    match honor {
        h if h > 50 => Level::High,
        h if h > 20 => Level::Medium,
        _ => Level::Low,
    }
}

fn threat_level(count: usize) -> Level {
    match count {
        0 | 1 => Level::Low,
        2 => Level::Medium,
        _ => Level::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{EntityId, Position};
    use crate::entity::HunterRole;

    #[test]
    fn test_bucket_thresholds() {
        let key = StateKey::from_parts(66, 66, 51, 3);
        assert_eq!(key.health, Level::High);
        assert_eq!(key.stamina, Level::High);
        assert_eq!(key.honor, Level::High);
        assert_eq!(key.threat, Level::High);

        let key = StateKey::from_parts(65, 65, 50, 2);
        assert_eq!(key.health, Level::Medium);
        assert_eq!(key.stamina, Level::Low);
        assert_eq!(key.honor, Level::Medium);
        assert_eq!(key.threat, Level::Medium);

        let key = StateKey::from_parts(30, 0, 20, 1);
        assert_eq!(key.health, Level::Low);
        assert_eq!(key.honor, Level::Low);
        assert_eq!(key.threat, Level::Low);
    }

    #[test]
    fn test_observe_counts_only_nearby_living_creatures() {
        let grid = Grid::new(20, 20);
        let hunter = Entity::hunter(EntityId(1), "Dek", Position::new(0, 0), HunterRole::Protagonist);

        // Two within reach across the wrap, one far away, one dead
        let near_a = Entity::creature(EntityId(2), "A", Position::new(19, 0), 100, 10, false);
        let near_b = Entity::creature(EntityId(3), "B", Position::new(0, 18), 100, 10, false);
        let far = Entity::creature(EntityId(4), "C", Position::new(10, 10), 100, 10, false);
        let mut dead = Entity::creature(EntityId(5), "D", Position::new(1, 1), 100, 10, false);
        dead.take_damage(100);

        let key = StateKey::observe(&hunter, [&near_a, &near_b, &far, &dead], &grid);
        assert_eq!(key.threat, Level::Medium);
        assert_eq!(key.health, Level::High);
        assert_eq!(key.honor, Level::Medium);
    }
}
