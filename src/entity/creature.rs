//! Hostile creatures

/// Health of an ordinary creature
pub const CREATURE_HEALTH: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatureState {
    /// Fixed damage dealt per strike
    pub damage: i32,
    /// The single elevated creature, spawned first
    pub boss: bool,
}
