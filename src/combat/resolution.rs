//! Strike resolution between two entities
//!
//! Resolution only touches the two combatants. Removing the dead, counting
//! and the learning signal are the caller's job, driven by `CombatResult`.

use rand::Rng;

use crate::combat::honor::{
    delta_for, honor_delta, is_worthy_prey, should_allow_action, HonorAction, HonorChange,
    PreyClass,
};
use crate::core::config::PolicyConstants;
use crate::entity::{Entity, EntityKind, Faction};

/// How an acting entity regards a neighbor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engagement {
    /// Hunters and creatures fight whenever the combat roll succeeds
    Hostile,
    /// Hunters only rarely turn on support agents
    Restrained,
    Peaceful,
}

pub fn engagement(actor: &Entity, neighbor: &Entity) -> Engagement {
    match (actor.faction(), neighbor.faction()) {
        (Faction::Hunter, Faction::Creature) | (Faction::Creature, Faction::Hunter) => {
            Engagement::Hostile
        }
        (Faction::Hunter, Faction::Support) => Engagement::Restrained,
        _ => Engagement::Peaceful,
    }
}

/// Roll whether `actor` starts a fight with `neighbor` this turn
pub fn should_engage<R: Rng + ?Sized>(
    actor: &Entity,
    neighbor: &Entity,
    policy: &PolicyConstants,
    rng: &mut R,
) -> bool {
    if !actor.is_alive() || !neighbor.is_alive() {
        return false;
    }
    match engagement(actor, neighbor) {
        Engagement::Hostile => rng.gen::<f64>() < policy.combat_chance,
        Engagement::Restrained => {
            rng.gen::<f64>() < policy.combat_chance
                && rng.gen::<f64>() < policy.support_attack_chance
        }
        Engagement::Peaceful => false,
    }
}

/// Damage dealt by one strike from `attacker`
pub fn roll_damage<R: Rng + ?Sized>(attacker: &Entity, policy: &PolicyConstants, rng: &mut R) -> i32 {
    match &attacker.kind {
        EntityKind::Creature(c) => c.damage,
        EntityKind::Hunter(h) => {
            rng.gen_range(policy.hunter_damage_min..=policy.hunter_damage_max) + h.weapon_bonus
        }
        _ => rng.gen_range(policy.other_damage_min..=policy.other_damage_max),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrikeOutcome {
    pub damage: i32,
    pub killed: bool,
    /// The strike pushed a support agent under its damage threshold
    pub support_damaged: bool,
}

/// Apply one strike's damage and re-judge support damage
pub fn apply_strike(defender: &mut Entity, damage: i32) -> StrikeOutcome {
    let was_damaged = defender.is_incapacitated();
    let survived = defender.take_damage(damage);
    let damaged = defender.judge_damage();
    StrikeOutcome {
        damage,
        killed: !survived,
        support_damaged: damaged && !was_damaged,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CombatResult {
    /// One side was already dead
    Skipped,
    /// The honor code forbade the attack; only the penalty applied
    Vetoed { penalty: HonorChange },
    Struck {
        strike: StrikeOutcome,
        /// Honor change applied to a hunter attacker (zero otherwise)
        honor: HonorChange,
        /// Defender's class before the strike landed
        prey: PreyClass,
        boss: bool,
    },
}

impl CombatResult {
    /// Whether the exchange counts as a combat
    pub fn counted(&self) -> bool {
        matches!(self, Self::Struck { .. })
    }

    pub fn killed(&self) -> bool {
        matches!(self, Self::Struck { strike, .. } if strike.killed)
    }
}

/// Resolve one attack of `attacker` on `defender`
///
/// Hunters are checked against the honor code first. On a kill the hunter's
/// kill count and honor are updated here; the defender is left at zero health
/// for the caller to remove.
pub fn resolve_combat<R: Rng + ?Sized>(
    attacker: &mut Entity,
    defender: &mut Entity,
    policy: &PolicyConstants,
    rng: &mut R,
) -> CombatResult {
    if !attacker.is_alive() || !defender.is_alive() {
        return CombatResult::Skipped;
    }

    if attacker.is_hunter() && !should_allow_action(attacker, defender, HonorAction::Attack) {
        let penalty = honor_delta(attacker, defender, HonorAction::Attack);
        if let Some(h) = attacker.as_hunter_mut() {
            h.adjust_honor(penalty.delta);
        }
        return CombatResult::Vetoed { penalty };
    }

    let prey = is_worthy_prey(attacker, defender).class;
    let boss = defender.is_boss();
    let damage = roll_damage(attacker, policy, rng);
    let strike = apply_strike(defender, damage);

    // Only a kill moves honor; refused attacks were handled above
    let honor = if attacker.is_hunter() && strike.killed {
        let change = delta_for(&attacker.name, boss, prey, HonorAction::Kill);
        if let Some(h) = attacker.as_hunter_mut() {
            h.record_kill();
            h.adjust_honor(change.delta);
        }
        change
    } else {
        HonorChange::none()
    };

    CombatResult::Struck {
        strike,
        honor,
        prey,
        boss,
    }
}
