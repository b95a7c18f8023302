//! Support agents
//!
//! Support agents never fight back. Once their health drops under the damage
//! threshold they stop acting and can be carried until repaired.

pub const DAMAGE_THRESHOLD: i32 = 50;
/// Health restored by a repair kit
pub const REPAIR_AMOUNT: i32 = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportState {
    pub damaged: bool,
}

impl SupportState {
    /// Latch the damaged flag once health falls under the threshold
    ///
    /// Only a repair clears it again.
    pub fn judge_damage(&mut self, health: i32) -> bool {
        if health < DAMAGE_THRESHOLD {
            self.damaged = true;
        }
        self.damaged
    }

    pub fn repair(&mut self) {
        self.damaged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_latches_until_repair() {
        let mut s = SupportState::default();
        assert!(!s.judge_damage(60));
        assert!(s.judge_damage(49));
        assert!(s.judge_damage(90));
        s.repair();
        assert!(!s.damaged);
    }
}
