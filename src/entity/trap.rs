//! Hidden traps
//!
//! Traps are never put on the grid; they are found by matching coordinates.

pub const TRAP_DAMAGE: i32 = 20;
/// Honor a hunter loses for walking into a trap
pub const TRAP_HONOR_PENALTY: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapState {
    pub damage: i32,
    pub triggered: bool,
}

impl Default for TrapState {
    fn default() -> Self {
        Self {
            damage: TRAP_DAMAGE,
            triggered: false,
        }
    }
}

impl TrapState {
    /// Spring the trap. Returns its damage the first time only.
    pub fn trigger(&mut self) -> Option<i32> {
        if self.triggered {
            return None;
        }
        self.triggered = true;
        Some(self.damage)
    }
}
