//! World state: the grid, the entity arena and everything a tick mutates
//!
//! Entities live in a `BTreeMap` so iteration is ordered by id; together with
//! the world-owned `ChaCha8Rng` this makes a seeded run fully reproducible.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::{EntityId, Position, Tick};
use crate::entity::{Entity, HonorRank, HunterRole};
use crate::environment::{HazardField, Weather, WeatherState};
use crate::learning::{Outcome, QLearner, QTableSnapshot, StateKey};
use crate::simulation::events::{DeathCause, GameOutcome, SimulationEvent};
use crate::simulation::output::SimulationOutput;
use crate::spatial::Grid;

/// Aggregate counters over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub ticks: Tick,
    pub combats: u32,
    pub kills: u32,
    pub deaths: u32,
    pub resources_collected: u32,
    pub traps_triggered: u32,
    pub hazard_hits: u32,
    pub vetoed_attacks: u32,
}

/// Read-only view of one hunter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: EntityId,
    pub name: String,
    pub role: HunterRole,
    pub health: i32,
    pub stamina: i32,
    pub honor: i32,
    pub rank: HonorRank,
    pub kills: u32,
    pub alive: bool,
}

impl AgentSnapshot {
    /// None for anything that isn't a hunter
    pub fn of(entity: &Entity) -> Option<Self> {
        let hunter = entity.as_hunter()?;
        Some(Self {
            id: entity.id,
            name: entity.name.clone(),
            role: hunter.role,
            health: entity.health,
            stamina: hunter.stamina,
            honor: hunter.honor,
            rank: hunter.rank(),
            kills: hunter.kills,
            alive: entity.is_alive(),
        })
    }
}

/// Living entities per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationCounts {
    pub hunters: usize,
    pub creatures: usize,
    /// Includes support agents being carried
    pub supports: usize,
    /// Untriggered traps
    pub traps: usize,
    pub resources: usize,
}

pub struct World {
    pub(crate) config: SimulationConfig,
    pub(crate) grid: Grid,
    pub(crate) entities: BTreeMap<EntityId, Entity>,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) learner: QLearner,
    pub(crate) protagonist: Option<EntityId>,
    pub(crate) hazards: HazardField,
    pub(crate) weather: WeatherState,
    pub(crate) stats: SimulationStats,
    pub(crate) events: Vec<SimulationEvent>,
    /// Hunters that have died, as they were at death
    pub(crate) fallen: Vec<AgentSnapshot>,
    pub(crate) tick: Tick,
    pub(crate) outcome: Option<GameOutcome>,
    next_entity_id: u32,
}

impl World {
    /// Build and populate a world from a validated configuration
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut world = Self::empty(config)?;
        world.spawn_population()?;
        let initial = world.config.hazards.initial_count;
        world.hazards.generate_initial(initial, &mut world.rng);
        info!(
            entities = world.entities.len(),
            seed = world.config.seed,
            "World created"
        );
        Ok(world)
    }

    /// A world with a grid and no entities or hazards, for hand-built scenarios
    pub fn empty(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            entities: BTreeMap::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            learner: QLearner::new(&config.learning),
            protagonist: None,
            hazards: HazardField::new(config.width, config.height, config.hazards.clone()),
            weather: WeatherState::new(),
            stats: SimulationStats::default(),
            events: Vec::new(),
            fallen: Vec::new(),
            tick: 0,
            outcome: None,
            next_entity_id: 1,
            config,
        })
    }

    pub(crate) fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Add an entity at `pos`, giving it a fresh id
    ///
    /// Traps are recorded without touching the grid. Returns None if the cell
    /// is occupied. The first protagonist added drives the learner.
    pub fn add_entity(&mut self, mut entity: Entity, pos: Position) -> Option<EntityId> {
        let pos = self.grid.wrap(pos);
        if entity.is_trap() {
            entity.pos = pos;
        } else if !self.grid.is_empty(pos) {
            return None;
        }

        let id = self.next_entity_id();
        entity.id = id;
        if !entity.is_trap() && !self.grid.place(&mut entity, pos) {
            return None;
        }
        if entity.is_protagonist() && self.protagonist.is_none() {
            self.protagonist = Some(id);
        }
        self.entities.insert(id, entity);
        Some(id)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn stats(&self) -> &SimulationStats {
        &self.stats
    }

    pub fn hazards(&self) -> &HazardField {
        &self.hazards
    }

    pub fn hazards_mut(&mut self) -> &mut HazardField {
        &mut self.hazards
    }

    pub fn weather(&self) -> Weather {
        self.weather.current
    }

    /// Tick the current weather was rolled on
    pub fn weather_since(&self) -> Tick {
        self.weather.since
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather.current = weather;
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn learner(&self) -> &QLearner {
        &self.learner
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities in the arena, in id order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// The entity indexed at `pos` (wrapped); traps are never visible here
    pub fn cell(&self, pos: Position) -> Option<&Entity> {
        self.grid.get_cell(pos).and_then(|id| self.entities.get(&id))
    }

    pub fn protagonist(&self) -> Option<&Entity> {
        self.protagonist.and_then(|id| self.entities.get(&id))
    }

    /// Hunters living and fallen, in id order
    pub fn agent_snapshots(&self) -> Vec<AgentSnapshot> {
        let mut snapshots: Vec<AgentSnapshot> = self
            .entities
            .values()
            .filter_map(AgentSnapshot::of)
            .chain(self.fallen.iter().cloned())
            .collect();
        snapshots.sort_by_key(|s| s.id);
        snapshots
    }

    pub fn population(&self) -> PopulationCounts {
        let mut counts = PopulationCounts::default();
        for entity in self.entities.values().filter(|e| e.is_alive()) {
            if let Some(h) = entity.as_hunter() {
                counts.hunters += 1;
                if h.is_carrying() {
                    counts.supports += 1;
                }
            } else if entity.is_creature() {
                counts.creatures += 1;
            } else if entity.is_support() {
                counts.supports += 1;
            } else if entity.is_trap() {
                counts.traps += 1;
            } else if entity.is_resource() {
                counts.resources += 1;
            }
        }
        counts
    }

    /// Take the events logged since the last drain
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn export_q_table(&self) -> QTableSnapshot {
        self.learner.export_table()
    }

    pub fn import_q_table(&mut self, snapshot: QTableSnapshot) {
        self.learner.import_table(snapshot);
    }

    /// Run until the game ends or `max_ticks` more ticks have passed
    pub fn run(&mut self, max_ticks: Tick) -> SimulationOutput {
        for _ in 0..max_ticks {
            if self.run_tick() {
                break;
            }
        }
        SimulationOutput::new(self)
    }

    pub(crate) fn log(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Position of the closest matching entity by wrapped Manhattan distance
    ///
    /// Ties go to the lower id.
    pub(crate) fn nearest<F>(&self, from: Position, mut filter: F) -> Option<Position>
    where
        F: FnMut(&Entity) -> bool,
    {
        self.entities
            .values()
            .filter(|e| filter(*e))
            .min_by_key(|e| (self.grid.manhattan(from, e.pos), e.id))
            .map(|e| e.pos)
    }

    pub(crate) fn observe(&self, hunter: &Entity) -> StateKey {
        StateKey::observe(hunter, self.entities.values(), &self.grid)
    }

    /// Credit a later outcome to the protagonist's last state/action pair
    ///
    /// `hunter` must not be borrowed from the arena; see `learn_from_id`.
    pub(crate) fn learn_from(&mut self, hunter: &Entity, outcome: Outcome) {
        if !hunter.is_protagonist() {
            return;
        }
        let Some(memory) = hunter.as_hunter().and_then(|h| h.memory) else {
            return;
        };
        let next = self.observe(hunter);
        self.learner
            .reinforce(memory.state, memory.action, outcome, next);
    }

    pub(crate) fn learn_from_id(&mut self, id: EntityId, outcome: Outcome) {
        let Some(hunter) = self.entities.get(&id) else {
            return;
        };
        if !hunter.is_protagonist() {
            return;
        }
        let Some(memory) = hunter.as_hunter().and_then(|h| h.memory) else {
            return;
        };
        let next = StateKey::observe(hunter, self.entities.values(), &self.grid);
        self.learner
            .reinforce(memory.state, memory.action, outcome, next);
    }

    /// Remove a dead entity that is still in the arena
    pub(crate) fn remove_dead(&mut self, id: EntityId, cause: DeathCause) {
        if let Some(dead) = self.entities.remove(&id) {
            self.bury(dead, cause);
        }
    }

    /// Final bookkeeping for an entity already taken out of the arena
    ///
    /// A hunter's carried support agent is set down on the freed cell.
    pub(crate) fn bury(&mut self, mut dead: Entity, cause: DeathCause) {
        self.grid.remove(dead.id, dead.pos);
        self.stats.deaths += 1;

        if dead.is_protagonist() {
            self.learn_from(&dead, Outcome::Died);
        }

        let carried = dead.as_hunter_mut().and_then(|h| h.set_down());
        if let Some(mut support) = carried {
            if self.grid.place(&mut support, dead.pos) {
                self.log(SimulationEvent::SupportSetDown {
                    tick: self.tick,
                    carrier: dead.name.clone(),
                    support: support.name.clone(),
                    pos: support.pos,
                });
                self.entities.insert(support.id, support);
            }
        }

        if let Some(snapshot) = AgentSnapshot::of(&dead) {
            self.fallen.push(snapshot);
        }

        info!(name = %dead.name, id = %dead.id, ?cause, "Entity died");
        self.log(SimulationEvent::Died {
            tick: self.tick,
            id: dead.id,
            name: dead.name,
            cause,
        });
    }

    /// Living hunters and creatures decide the game
    pub(crate) fn check_outcome(&self) -> Option<GameOutcome> {
        let creatures = self
            .entities
            .values()
            .any(|e| e.is_creature() && e.is_alive());
        let hunters = self
            .entities
            .values()
            .any(|e| e.is_hunter() && e.is_alive());
        match (hunters, creatures) {
            (true, true) => None,
            (true, false) => Some(GameOutcome::HuntersWin),
            (false, true) => Some(GameOutcome::CreaturesWin),
            (false, false) => Some(GameOutcome::MutualDestruction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::ResourceKind;

    fn quiet_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.hazards.initial_count = 0;
        config.hazards.spawn_rate = 0.0;
        config
    }

    #[test]
    fn test_new_world_spawns_configured_population() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let counts = world.population();
        assert_eq!(counts.hunters, 3);
        assert_eq!(counts.creatures, 5);
        assert_eq!(counts.supports, 1);
        assert!((3..=5).contains(&counts.traps));
        assert!((4..=8).contains(&counts.resources));
        assert_eq!(world.hazards().len(), 3);
        assert_eq!(world.protagonist().unwrap().name, "Dek");
    }

    #[test]
    fn test_entity_ids_are_sequential() {
        let world = World::new(SimulationConfig::default()).unwrap();
        let ids: Vec<u32> = world.entities().map(|e| e.id.0).collect();
        let expected: Vec<u32> = (1..=ids.len() as u32).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_add_entity_rejects_occupied_cells() {
        let mut world = World::empty(quiet_config()).unwrap();
        let pos = Position::new(3, 3);
        let a = world
            .add_entity(Entity::resource(EntityId(0), pos, ResourceKind::MedKit), pos)
            .unwrap();
        assert!(world
            .add_entity(Entity::support(EntityId(0), "Thia", pos), pos)
            .is_none());

        // Traps hide under occupants
        let trap = world
            .add_entity(Entity::trap(EntityId(0), "Trap", pos), pos)
            .unwrap();
        assert_eq!(world.cell(pos).unwrap().id, a);
        assert_eq!(world.entity(trap).unwrap().pos, pos);
    }

    #[test]
    fn test_cell_wraps_coordinates() {
        let mut world = World::empty(quiet_config()).unwrap();
        let id = world
            .add_entity(
                Entity::hunter(EntityId(0), "Dek", Position::default(), HunterRole::Protagonist),
                Position::new(-1, 20),
            )
            .unwrap();
        assert_eq!(world.cell(Position::new(19, 0)).unwrap().id, id);
        assert_eq!(world.cell(Position::new(-1, 0)).unwrap().id, id);
        assert_eq!(world.protagonist().unwrap().id, id);
    }

    #[test]
    fn test_carried_support_set_down_when_carrier_dies() {
        let mut world = World::empty(quiet_config()).unwrap();
        let pos = Position::new(5, 5);
        let id = world
            .add_entity(
                Entity::hunter(EntityId(0), "Dek", pos, HunterRole::Protagonist),
                pos,
            )
            .unwrap();
        let thia = Entity::support(EntityId(99), "Thia", pos);
        world
            .entity_mut(id)
            .unwrap()
            .as_hunter_mut()
            .unwrap()
            .carry(thia)
            .unwrap();
        assert_eq!(world.population().supports, 1);

        world.entity_mut(id).unwrap().take_damage(500);
        world.remove_dead(id, DeathCause::Trap);

        let cell = world.cell(pos).unwrap();
        assert_eq!(cell.name, "Thia");
        assert_eq!(cell.id, EntityId(99));
        assert_eq!(world.stats().deaths, 1);

        let snapshots = world.agent_snapshots();
        assert_eq!(snapshots.len(), 1);
        assert!(!snapshots[0].alive);
    }

    #[test]
    fn test_outcome_table() {
        let mut world = World::empty(quiet_config()).unwrap();
        assert_eq!(world.check_outcome(), Some(GameOutcome::MutualDestruction));

        world.add_entity(
            Entity::hunter(EntityId(0), "Dek", Position::default(), HunterRole::Protagonist),
            Position::new(0, 0),
        );
        assert_eq!(world.check_outcome(), Some(GameOutcome::HuntersWin));

        world.add_entity(
            Entity::creature(EntityId(0), "Beast", Position::default(), 100, 10, false),
            Position::new(9, 9),
        );
        assert_eq!(world.check_outcome(), None);
    }
}
