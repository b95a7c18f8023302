use std::collections::HashMap;

use badlands::core::types::{EntityId, Position};
use badlands::entity::{Entity, HunterRole};
use badlands::simulation::{GameOutcome, SimulationEvent};
use badlands::{SimError, SimulationConfig, World};

fn seeded(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed,
        ..SimulationConfig::default()
    }
}

fn assert_grid_consistent(world: &World) {
    let mut on_grid = 0;
    for entity in world.entities().filter(|e| !e.is_trap()) {
        assert!(world.grid().is_valid(entity.pos.x, entity.pos.y));
        assert_eq!(
            world.grid().get_cell(entity.pos),
            Some(entity.id),
            "{} is not indexed at {}",
            entity.name,
            entity.pos
        );
        assert!(entity.is_alive(), "{} is dead but still in the arena", entity.name);
        on_grid += 1;
    }
    assert_eq!(world.grid().occupied_count(), on_grid);
}

#[test]
fn test_no_two_entities_share_a_cell() {
    for seed in [1, 7, 42, 12345] {
        let mut world = World::new(seeded(seed)).unwrap();
        assert_grid_consistent(&world);
        for _ in 0..60 {
            let done = world.run_tick();
            assert_grid_consistent(&world);
            if done {
                break;
            }
        }
    }
}

#[test]
fn test_same_seed_same_run() {
    let mut a = World::new(seeded(99)).unwrap();
    let mut b = World::new(seeded(99)).unwrap();
    let out_a = a.run(80);
    let out_b = b.run(80);

    assert_eq!(out_a.ticks, out_b.ticks);
    assert_eq!(out_a.agents, out_b.agents);
    assert_eq!(out_a.statistics, out_b.statistics);
    assert_eq!(a.drain_events(), b.drain_events());
    assert_eq!(a.export_q_table(), b.export_q_table());
}

#[test]
fn test_honor_and_stamina_stay_in_range() {
    for seed in [3, 5, 8, 13] {
        let mut world = World::new(seeded(seed)).unwrap();
        for _ in 0..100 {
            let done = world.run_tick();
            for agent in world.agent_snapshots() {
                assert!((0..=100).contains(&agent.honor));
                assert!((0..=100).contains(&agent.stamina));
                assert!(agent.health >= 0);
            }
            if done {
                break;
            }
        }
    }
}

#[test]
fn test_hazard_intensity_never_drops() {
    let mut world = World::new(seeded(21)).unwrap();
    let mut seen: HashMap<u32, f64> = HashMap::new();
    for _ in 0..80 {
        if world.run_tick() {
            break;
        }
        for hazard in world.hazards().hazards() {
            if let Some(&before) = seen.get(&hazard.id) {
                assert!(hazard.intensity >= before);
            }
            assert!(hazard.intensity <= hazard.max_intensity.max(1.0 + world.tick() as f64 / 100.0));
            assert!(hazard.tiles.len() <= 5);
            assert!((hazard.age as u64) < 50);
            seen.insert(hazard.id, hazard.intensity);
        }
        assert!(world.hazards().len() <= 8);
    }
}

#[test]
fn test_hunters_win_without_creatures() {
    let mut config = seeded(4);
    config.population.creatures = 0;
    let mut world = World::new(config).unwrap();
    assert!(world.run_tick());
    assert_eq!(world.outcome(), Some(GameOutcome::HuntersWin));
    assert!(world
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimulationEvent::GameOver { outcome: GameOutcome::HuntersWin, .. })));
}

#[test]
fn test_creatures_win_when_hunters_are_gone() {
    let mut config = seeded(4);
    config.hazards.initial_count = 0;
    config.hazards.spawn_rate = 0.0;
    let mut world = World::empty(config).unwrap();
    world.add_entity(
        Entity::creature(EntityId(0), "Beast", Position::default(), 100, 10, false),
        Position::new(3, 3),
    );
    assert!(world.run_tick());
    assert_eq!(world.outcome(), Some(GameOutcome::CreaturesWin));

    let output = world.run(10);
    assert_eq!(output.ticks, 1);
}

#[test]
fn test_exhausted_hunter_rests_instead_of_moving() {
    let mut config = seeded(4);
    config.hazards.initial_count = 0;
    config.hazards.spawn_rate = 0.0;
    config.policy.move_chance = 1.0;
    config.policy.combat_chance = 0.0;
    let mut world = World::empty(config).unwrap();
    let hunter = world
        .add_entity(
            Entity::hunter(EntityId(0), "Father", Position::default(), HunterRole::Rival),
            Position::new(1, 1),
        )
        .unwrap();
    world.add_entity(
        Entity::creature(EntityId(0), "Beast", Position::default(), 100, 10, false),
        Position::new(11, 11),
    );
    world.entity_mut(hunter).unwrap().as_hunter_mut().unwrap().stamina = 3;

    world.run_tick();

    let father = world.entity(hunter).unwrap();
    assert_eq!(father.pos, Position::new(1, 1));
    assert_eq!(father.as_hunter().unwrap().stamina, 18);
}

#[test]
fn test_config_from_toml_drives_the_world() {
    let config = SimulationConfig::from_toml_str(
        r#"
        width = 30
        height = 12
        seed = 5

        [population]
        creatures = 2
        traps_min = 0
        traps_max = 0
        "#,
    )
    .unwrap();
    let world = World::new(config).unwrap();
    assert_eq!(world.grid().width, 30);
    assert_eq!(world.grid().height, 12);
    assert_eq!(world.population().creatures, 2);
    assert_eq!(world.population().traps, 0);
}

#[test]
fn test_overfull_world_is_rejected() {
    let mut config = seeded(1);
    config.width = 4;
    config.height = 4;
    let err = World::new(config).err().unwrap();
    assert!(matches!(err, SimError::InvalidConfig(_)));
}

#[test]
fn test_deaths_are_recorded_for_fallen_hunters() {
    let mut world = World::new(seeded(2024)).unwrap();
    let output = world.run(300);
    let fallen = output.agents.iter().filter(|a| !a.alive).count() as u32;
    assert!(output.statistics.deaths >= fallen);
    assert_eq!(output.agents.len(), 3);
    assert_eq!(output.statistics.ticks, output.ticks);
}
