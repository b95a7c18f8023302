//! Reward shaping

use serde::{Deserialize, Serialize};

/// What happened as a result of an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    BossKill,
    MinorKill,
    HonorGain,
    ResourceCollected,
    Healed,
    Moved,
    DamageTaken,
    HonorLost,
    Died,
    WastedAction,
}

/// Scalar reward per outcome
///
/// Boss kills and death carry the largest magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTable {
    pub boss_kill: f64,
    pub minor_kill: f64,
    pub honor_gain: f64,
    pub resource_collected: f64,
    pub healed: f64,
    pub moved: f64,
    pub damage_taken: f64,
    pub honor_lost: f64,
    pub died: f64,
    pub wasted_action: f64,
}

impl Default for RewardTable {
    fn default() -> Self {
        Self {
            boss_kill: 100.0,
            minor_kill: 20.0,
            honor_gain: 10.0,
            resource_collected: 15.0,
            healed: 5.0,
            moved: -1.0,
            damage_taken: -10.0,
            honor_lost: -15.0,
            died: -100.0,
            wasted_action: -5.0,
        }
    }
}

impl RewardTable {
    pub fn reward(&self, outcome: Outcome) -> f64 {
        match outcome {
            Outcome::BossKill => self.boss_kill,
            Outcome::MinorKill => self.minor_kill,
            Outcome::HonorGain => self.honor_gain,
            Outcome::ResourceCollected => self.resource_collected,
            Outcome::Healed => self.healed,
            Outcome::Moved => self.moved,
            Outcome::DamageTaken => self.damage_taken,
            Outcome::HonorLost => self.honor_lost,
            Outcome::Died => self.died,
            Outcome::WastedAction => self.wasted_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extremes_are_boss_kill_and_death() {
        let table = RewardTable::default();
        let all = [
            Outcome::BossKill,
            Outcome::MinorKill,
            Outcome::HonorGain,
            Outcome::ResourceCollected,
            Outcome::Healed,
            Outcome::Moved,
            Outcome::DamageTaken,
            Outcome::HonorLost,
            Outcome::Died,
            Outcome::WastedAction,
        ];
        let max = all.iter().map(|&o| table.reward(o)).fold(f64::MIN, f64::max);
        let min = all.iter().map(|&o| table.reward(o)).fold(f64::MAX, f64::min);
        assert_eq!(max, table.reward(Outcome::BossKill));
        assert_eq!(min, table.reward(Outcome::Died));
    }
}
