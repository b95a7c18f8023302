use badlands::learning::{
    Action, ActionValues, Level, Outcome, QEntry, QLearner, QTableSnapshot, StateKey,
};
use badlands::{SimulationConfig, World};

fn key(threat: Level) -> StateKey {
    StateKey {
        health: Level::High,
        stamina: Level::High,
        honor: Level::Medium,
        threat,
    }
}

#[test]
fn test_exact_td_update() {
    let s = key(Level::Low);
    let s_next = key(Level::High);

    let mut current = ActionValues::default();
    current.set(Action::HuntMinorThreat, 10.0);
    let mut next = ActionValues::default();
    next.set(Action::Rest, 15.0);

    let mut learner = QLearner::with_params(0.1, 0.95, 0.0);
    learner.import_table(QTableSnapshot {
        entries: vec![
            QEntry { state: s, values: current },
            QEntry { state: s_next, values: next },
        ],
    });

    let updated = learner.update(s, Action::HuntMinorThreat, 20.0, s_next);
    assert!((updated - 12.425).abs() < 1e-9);
    assert!((learner.q(&s, Action::HuntMinorThreat) - 12.425).abs() < 1e-9);
}

#[test]
fn test_reinforce_uses_reward_table() {
    let mut learner = QLearner::with_params(0.5, 0.0, 0.0);
    let s = key(Level::Medium);
    let q = learner.reinforce(s, Action::HuntBoss, Outcome::BossKill, s);
    assert!((q - 50.0).abs() < 1e-9);
    let q = learner.reinforce(s, Action::Rest, Outcome::Died, s);
    assert!((q + 50.0).abs() < 1e-9);
}

#[test]
fn test_world_learns_and_decays_epsilon() {
    let mut world = World::new(SimulationConfig::default()).unwrap();
    for _ in 0..20 {
        if world.run_tick() {
            break;
        }
    }

    let ticks = world.tick() as i32;
    assert!(!world.learner().is_empty());
    let expected = 0.995_f64.powi(ticks).max(0.05);
    assert!((world.learner().epsilon - expected).abs() < 1e-9);
}

#[test]
fn test_exported_table_transfers_between_worlds() {
    let mut trained = World::new(SimulationConfig::default()).unwrap();
    trained.run(30);
    let snapshot = trained.export_q_table();
    assert!(!snapshot.entries.is_empty());

    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: QTableSnapshot = serde_json::from_str(&json).unwrap();

    let mut fresh = World::new(SimulationConfig::default()).unwrap();
    fresh.import_q_table(restored);
    assert_eq!(fresh.export_q_table(), snapshot);
}
