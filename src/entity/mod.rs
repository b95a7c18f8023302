//! Entity model
//!
//! Every grid occupant (and the hidden traps) is an `Entity`: a shared set of
//! attributes plus a closed `EntityKind` payload. Rules that depend on
//! attacker kind × defender kind match on the payload instead of dispatching
//! through traits.

pub mod creature;
pub mod hunter;
pub mod resource;
pub mod support;
pub mod trap;

pub use creature::CreatureState;
pub use hunter::{HonorRank, HunterRole, HunterState, LearningMemory};
pub use resource::{ResourceKind, ResourceState};
pub use support::SupportState;
pub use trap::TrapState;

use crate::core::types::{EntityId, Position};

/// Health every entity starts with unless its kind overrides it
pub const BASE_HEALTH: i32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Hunter(HunterState),
    Creature(CreatureState),
    Support(SupportState),
    Trap(TrapState),
    Resource(ResourceState),
}

/// Which side of a fight an entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Faction {
    Hunter,
    Creature,
    Support,
    /// Traps and resources never fight
    Inert,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    pub pos: Position,
    pub health: i32,
    pub max_health: i32,
    pub kind: EntityKind,
}

impl Entity {
    fn with_kind(id: EntityId, name: impl Into<String>, pos: Position, kind: EntityKind) -> Self {
        Self {
            id,
            name: name.into(),
            pos,
            health: BASE_HEALTH,
            max_health: BASE_HEALTH,
            kind,
        }
    }

    pub fn hunter(id: EntityId, name: impl Into<String>, pos: Position, role: HunterRole) -> Self {
        Self::with_kind(id, name, pos, EntityKind::Hunter(HunterState::new(role)))
    }

    pub fn creature(
        id: EntityId,
        name: impl Into<String>,
        pos: Position,
        health: i32,
        damage: i32,
        boss: bool,
    ) -> Self {
        let mut entity =
            Self::with_kind(id, name, pos, EntityKind::Creature(CreatureState { damage, boss }));
        entity.health = health;
        entity.max_health = health;
        entity
    }

    pub fn support(id: EntityId, name: impl Into<String>, pos: Position) -> Self {
        Self::with_kind(id, name, pos, EntityKind::Support(SupportState::default()))
    }

    pub fn trap(id: EntityId, name: impl Into<String>, pos: Position) -> Self {
        Self::with_kind(id, name, pos, EntityKind::Trap(TrapState::default()))
    }

    pub fn resource(id: EntityId, pos: Position, kind: ResourceKind) -> Self {
        Self::with_kind(id, kind.display_name(), pos, EntityKind::Resource(ResourceState::new(kind)))
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage, clamping at zero. Returns whether the entity survived.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        self.health = (self.health - amount.max(0)).max(0);
        self.is_alive()
    }

    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount.max(0)).min(self.max_health);
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    pub fn faction(&self) -> Faction {
        match self.kind {
            EntityKind::Hunter(_) => Faction::Hunter,
            EntityKind::Creature(_) => Faction::Creature,
            EntityKind::Support(_) => Faction::Support,
            EntityKind::Trap(_) | EntityKind::Resource(_) => Faction::Inert,
        }
    }

    /// Entities that take turns each tick
    pub fn is_mobile(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Hunter(_) | EntityKind::Creature(_) | EntityKind::Support(_)
        )
    }

    /// Single-character marker for renderers
    pub fn marker(&self) -> char {
        match &self.kind {
            EntityKind::Hunter(h) if h.role == HunterRole::Protagonist => 'D',
            EntityKind::Hunter(_) => 'P',
            EntityKind::Creature(c) if c.boss => 'X',
            EntityKind::Creature(_) => 'M',
            EntityKind::Support(_) => 'T',
            EntityKind::Trap(_) => '!',
            EntityKind::Resource(r) => r.kind.marker(),
        }
    }

    pub fn as_hunter(&self) -> Option<&HunterState> {
        match &self.kind {
            EntityKind::Hunter(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_hunter_mut(&mut self) -> Option<&mut HunterState> {
        match &mut self.kind {
            EntityKind::Hunter(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_creature(&self) -> Option<&CreatureState> {
        match &self.kind {
            EntityKind::Creature(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_support(&self) -> Option<&SupportState> {
        match &self.kind {
            EntityKind::Support(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_support_mut(&mut self) -> Option<&mut SupportState> {
        match &mut self.kind {
            EntityKind::Support(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_resource(&self) -> Option<&ResourceState> {
        match &self.kind {
            EntityKind::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_resource_mut(&mut self) -> Option<&mut ResourceState> {
        match &mut self.kind {
            EntityKind::Resource(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_trap(&self) -> Option<&TrapState> {
        match &self.kind {
            EntityKind::Trap(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_trap_mut(&mut self) -> Option<&mut TrapState> {
        match &mut self.kind {
            EntityKind::Trap(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_hunter(&self) -> bool {
        matches!(self.kind, EntityKind::Hunter(_))
    }

    pub fn is_protagonist(&self) -> bool {
        self.as_hunter()
            .is_some_and(|h| h.role == HunterRole::Protagonist)
    }

    pub fn is_creature(&self) -> bool {
        matches!(self.kind, EntityKind::Creature(_))
    }

    pub fn is_boss(&self) -> bool {
        self.as_creature().is_some_and(|c| c.boss)
    }

    pub fn is_support(&self) -> bool {
        matches!(self.kind, EntityKind::Support(_))
    }

    pub fn is_trap(&self) -> bool {
        matches!(self.kind, EntityKind::Trap(_))
    }

    pub fn is_resource(&self) -> bool {
        matches!(self.kind, EntityKind::Resource(_))
    }

    /// Support agents that are damaged can't act on their own
    pub fn is_incapacitated(&self) -> bool {
        self.as_support().is_some_and(|s| s.damaged)
    }

    /// Re-evaluate the damaged flag after health changes (no-op for non-support)
    pub fn judge_damage(&mut self) -> bool {
        let health = self.health;
        match &mut self.kind {
            EntityKind::Support(s) => s.judge_damage(health),
            _ => false,
        }
    }
}
