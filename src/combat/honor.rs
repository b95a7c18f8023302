//! The hunters' honor code
//!
//! Pure rules: which targets are worthy, how much honor an act is worth and
//! which acts the protagonist refuses outright.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    HONOR_BOSS_KILL, HONOR_COWARDICE, HONOR_SUPPORT_ATTACK, HONOR_WORTHY_KILL,
    HONOR_WOUNDED_ATTACK, WOUNDED_FRACTION,
};
use crate::entity::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HonorAction {
    Kill,
    Attack,
    Flee,
}

/// Why a target is or isn't worthy prey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreyClass {
    /// Support agents are machines, not prey
    NotAlive,
    Wounded,
    UltimateAdversary,
    Healthy,
    Standard,
}

impl PreyClass {
    pub fn is_worthy(self) -> bool {
        matches!(self, Self::UltimateAdversary | Self::Healthy | Self::Standard)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Worthiness {
    pub worthy: bool,
    pub class: PreyClass,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonorChange {
    pub delta: i32,
    pub message: String,
}

impl HonorChange {
    fn new(delta: i32, message: String) -> Self {
        Self { delta, message }
    }

    pub fn none() -> Self {
        Self::new(0, String::new())
    }

    pub fn is_none(&self) -> bool {
        self.delta == 0
    }
}

/// Classify a target as seen by a would-be attacker
///
/// Checks run in order: support agents, wounded targets, the boss, full
/// health, everything else.
pub fn is_worthy_prey(_attacker: &Entity, target: &Entity) -> Worthiness {
    let class = classify(target);
    Worthiness {
        worthy: class.is_worthy(),
        class,
    }
}

fn classify(target: &Entity) -> PreyClass {
    if target.is_support() {
        PreyClass::NotAlive
    } else if target.health_fraction() < WOUNDED_FRACTION {
        PreyClass::Wounded
    } else if target.is_boss() {
        PreyClass::UltimateAdversary
    } else if target.health == target.max_health {
        PreyClass::Healthy
    } else {
        PreyClass::Standard
    }
}

/// Honor won or lost by `attacker` for `action` against `target`
pub fn honor_delta(attacker: &Entity, target: &Entity, action: HonorAction) -> HonorChange {
    delta_for(&attacker.name, target.is_boss(), classify(target), action)
}

/// The honor table itself, for callers that classified the target earlier
///
/// Kills are judged on the target as it stood before the fatal blow, since a
/// dead target always reads as wounded.
pub fn delta_for(attacker: &str, is_boss: bool, class: PreyClass, action: HonorAction) -> HonorChange {
    match action {
        HonorAction::Kill if is_boss => HonorChange::new(
            HONOR_BOSS_KILL,
            format!("{} gains great honor for slaying the Ultimate Adversary", attacker),
        ),
        HonorAction::Kill if class.is_worthy() => HonorChange::new(
            HONOR_WORTHY_KILL,
            format!("{} gains honor for a successful hunt", attacker),
        ),
        HonorAction::Kill | HonorAction::Attack => match class {
            PreyClass::Wounded => HonorChange::new(
                HONOR_WOUNDED_ATTACK,
                format!("{} dishonorably struck wounded prey", attacker),
            ),
            PreyClass::NotAlive => HonorChange::new(
                HONOR_SUPPORT_ATTACK,
                format!("{} attacked non-living prey", attacker),
            ),
            _ => HonorChange::none(),
        },
        HonorAction::Flee => HonorChange::new(
            HONOR_COWARDICE,
            format!("{} fled from combat", attacker),
        ),
    }
}

/// Only the protagonist is bound strictly: it refuses to strike support agents
pub fn should_allow_action(attacker: &Entity, target: &Entity, action: HonorAction) -> bool {
    match action {
        HonorAction::Attack | HonorAction::Kill => {
            !(attacker.is_protagonist() && classify(target) == PreyClass::NotAlive)
        }
        HonorAction::Flee => true,
    }
}
