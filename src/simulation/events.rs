//! Structured simulation log
//!
//! Every tick appends events to the world's buffer; callers drain it with
//! `World::drain_events`.

use serde::{Deserialize, Serialize};

use crate::core::types::{EntityId, Position, Tick};
use crate::entity::ResourceKind;
use crate::environment::{HazardKind, Weather};

/// Events generated during a simulation tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// Combat: attacker hit defender
    CombatHit {
        tick: Tick,
        attacker: String,
        defender: String,
        damage: i32,
    },
    Killed {
        tick: Tick,
        killer: String,
        victim: String,
        boss: bool,
    },
    /// The honor code stopped an attack before it landed
    AttackVetoed {
        tick: Tick,
        attacker: String,
        target: String,
    },
    HonorChanged {
        tick: Tick,
        hunter: String,
        delta: i32,
        message: String,
    },
    TrapTriggered {
        tick: Tick,
        victim: String,
        damage: i32,
    },
    HazardDamage {
        tick: Tick,
        victim: String,
        kind: HazardKind,
        damage: i32,
    },
    LightningStrike {
        tick: Tick,
        victim: String,
        damage: i32,
    },
    ResourceCollected {
        tick: Tick,
        hunter: String,
        resource: ResourceKind,
    },
    ResourceUsed {
        tick: Tick,
        hunter: String,
        resource: ResourceKind,
        target: String,
    },
    SupportDamaged {
        tick: Tick,
        support: String,
    },
    SupportCarried {
        tick: Tick,
        carrier: String,
        support: String,
    },
    SupportSetDown {
        tick: Tick,
        carrier: String,
        support: String,
        pos: Position,
    },
    Died {
        tick: Tick,
        id: EntityId,
        name: String,
        cause: DeathCause,
    },
    WeatherChanged {
        tick: Tick,
        old: Weather,
        new: Weather,
    },
    HazardSpawned {
        tick: Tick,
        hazard: u32,
        kind: HazardKind,
        origin: Position,
    },
    /// Game over event - signals end of simulation
    GameOver { tick: Tick, outcome: GameOutcome },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Combat { killer: String },
    Trap,
    Hazard(HazardKind),
    Lightning,
}

/// Outcome of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every hostile creature is dead
    HuntersWin,
    /// Every hunter is dead
    CreaturesWin,
    /// Both sides were wiped out in the same tick
    MutualDestruction,
}
