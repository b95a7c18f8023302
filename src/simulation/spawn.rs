//! Initial population

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{info, warn};

use crate::core::error::{Result, SimError};
use crate::core::types::{EntityId, Position};
use crate::entity::creature::CREATURE_HEALTH;
use crate::entity::{Entity, HunterRole};
use crate::simulation::world::World;

/// Random probes before falling back to a full scan
pub const SPAWN_ATTEMPTS: usize = 100;

/// Names for the first hunters; later ones are numbered
const HUNTER_NAMES: [&str; 3] = ["Dek", "Brother", "Father"];
const BOSS_NAME: &str = "Ultimate Adversary";
const SUPPORT_NAME: &str = "Thia";
/// Stand-in id; `World::add_entity` assigns the real one
const UNASSIGNED: EntityId = EntityId(0);

impl World {
    /// An empty cell, preferring random ones
    pub fn find_empty_position(&mut self) -> Result<Position> {
        self.find_position(|world, pos| world.grid.is_empty(pos))
    }

    /// Random probes first, then a row-major scan over empty cells
    fn find_position(&mut self, accept: impl Fn(&World, Position) -> bool) -> Result<Position> {
        for _ in 0..SPAWN_ATTEMPTS {
            let pos = Position::new(
                self.rng.gen_range(0..self.grid.width),
                self.rng.gen_range(0..self.grid.height),
            );
            if self.grid.is_empty(pos) && accept(self, pos) {
                return Ok(pos);
            }
        }

        warn!(
            attempts = SPAWN_ATTEMPTS,
            "Random spawn probing failed, scanning the grid"
        );
        let world: &World = self;
        world
            .grid
            .empty_cells()
            .find(|&pos| accept(world, pos))
            .ok_or(SimError::GridFull {
                width: world.grid.width,
                height: world.grid.height,
            })
    }

    fn has_trap(&self, pos: Position) -> bool {
        self.entities.values().any(|e| e.is_trap() && e.pos == pos)
    }

    fn spawn(&mut self, entity: Entity) -> Result<()> {
        let pos = self.find_empty_position()?;
        self.add_entity(entity, pos).ok_or(SimError::GridFull {
            width: self.grid.width,
            height: self.grid.height,
        })?;
        Ok(())
    }

    /// Spawn hunters, traps, creatures, support agents and resources
    pub(crate) fn spawn_population(&mut self) -> Result<()> {
        let population = self.config.population.clone();
        let policy = self.config.policy.clone();
        let origin = Position::default();

        for i in 0..population.hunters as usize {
            let name = HUNTER_NAMES
                .get(i)
                .map_or_else(|| format!("Hunter{}", i + 1), |n| n.to_string());
            let role = if i == 0 {
                HunterRole::Protagonist
            } else {
                HunterRole::Rival
            };
            self.spawn(Entity::hunter(UNASSIGNED, name, origin, role))?;
        }

        // Traps hide under whatever spawns later; they only avoid occupants and each other
        let traps = self.rng.gen_range(population.traps_min..=population.traps_max);
        for i in 0..traps {
            let pos = self.find_position(|world, pos| !world.has_trap(pos))?;
            let trap = Entity::trap(UNASSIGNED, format!("Trap{}", i + 1), pos);
            self.add_entity(trap, pos);
        }

        for i in 0..population.creatures as usize {
            let creature = if i == 0 {
                Entity::creature(
                    UNASSIGNED,
                    BOSS_NAME,
                    origin,
                    policy.boss_health,
                    policy.boss_damage,
                    true,
                )
            } else {
                Entity::creature(
                    UNASSIGNED,
                    format!("Creature{}", i + 1),
                    origin,
                    CREATURE_HEALTH,
                    policy.creature_damage,
                    false,
                )
            };
            self.spawn(creature)?;
        }

        for i in 0..population.supports as usize {
            let name = if i == 0 {
                SUPPORT_NAME.to_string()
            } else {
                format!("Support{}", i + 1)
            };
            self.spawn(Entity::support(UNASSIGNED, name, origin))?;
        }

        let kinds = population.resource_kinds()?;
        let resources = self
            .rng
            .gen_range(population.resources_min..=population.resources_max);
        for _ in 0..resources {
            let Some(&kind) = kinds.choose(&mut self.rng) else {
                break;
            };
            self.spawn(Entity::resource(UNASSIGNED, origin, kind))?;
        }

        info!(
            hunters = population.hunters,
            creatures = population.creatures,
            supports = population.supports,
            traps,
            resources,
            "Population spawned"
        );
        Ok(())
    }
}
