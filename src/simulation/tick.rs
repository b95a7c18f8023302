//! Tick system - orchestrates simulation updates
//!
//! One tick runs, in order:
//! shuffled agent turns -> hazard evolution -> weather -> epsilon decay -> outcome check
//!
//! An agent's turn is move -> trap check -> carry -> combat -> upkeep. The
//! acting agent is taken out of the arena for the length of its turn, so it
//! and whatever it fights are two separate `&mut Entity`.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::combat::constants::{DANGER_RADIUS, MED_KIT_THRESHOLD, STAMINA_BOOST_THRESHOLD};
use crate::combat::{delta_for, resolve_combat, should_engage, CombatResult, HonorAction, PreyClass};
use crate::core::types::{EntityId, Position, NEIGHBOR_OFFSETS, ORTHOGONAL_OFFSETS};
use crate::entity::trap::TRAP_HONOR_PENALTY;
use crate::entity::{Entity, LearningMemory, ResourceKind};
use crate::environment::weather::{HEAT_EXHAUSTION, HEAT_REST};
use crate::environment::Weather;
use crate::learning::{Action, Outcome};
use crate::movement::{random_step, step_towards, StepResult};
use crate::simulation::events::{DeathCause, SimulationEvent};
use crate::simulation::world::World;
use crate::spatial::Grid;

/// How a stamina-gated move went
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pursuit {
    /// Too tired to move; rested instead
    Exhausted,
    /// Already next to (or on) the target
    InReach,
    Stepped(bool),
}

impl Pursuit {
    fn moved(self) -> bool {
        matches!(self, Self::Stepped(true))
    }
}

impl World {
    /// Advance the world one tick. Returns true once the game is over.
    pub fn run_tick(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }
        self.tick += 1;

        let mut order: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.is_mobile() && e.is_alive())
            .map(|e| e.id)
            .collect();
        order.shuffle(&mut self.rng);

        for id in order {
            // Killed or carried off earlier this tick
            if !self.entities.get(&id).is_some_and(|e| e.is_alive()) {
                continue;
            }
            self.take_turn(id);
        }

        let update = self.hazards.update(self.tick, &mut self.rng);
        if let Some((hazard, kind, origin)) = update.spawned {
            self.log(SimulationEvent::HazardSpawned {
                tick: self.tick,
                hazard,
                kind,
                origin,
            });
        }

        self.apply_weather();
        self.learner.decay_epsilon();
        self.stats.ticks = self.tick;

        match self.check_outcome() {
            Some(outcome) => {
                info!(tick = self.tick, ?outcome, "Game over");
                self.outcome = Some(outcome);
                self.log(SimulationEvent::GameOver {
                    tick: self.tick,
                    outcome,
                });
                true
            }
            None => false,
        }
    }

    fn take_turn(&mut self, id: EntityId) {
        let Some(mut agent) = self.entities.remove(&id) else {
            return;
        };

        let moved = if agent.is_protagonist() {
            self.protagonist_move(&mut agent)
        } else if agent.is_hunter() {
            self.rival_move(&mut agent)
        } else if agent.is_creature() {
            self.creature_move(&mut agent)
        } else if agent.is_support() {
            self.support_move(&mut agent)
        } else {
            false
        };

        if moved && self.spring_trap(&mut agent) {
            self.bury(agent, DeathCause::Trap);
            return;
        }

        if agent.is_protagonist() {
            self.pick_up_support(&mut agent);
        }

        self.combat_round(&mut agent);

        if agent.is_hunter() {
            self.collect_resources(&mut agent);
            self.use_repair_kit(&mut agent);
            self.auto_use_items(&mut agent);

            if let Some((kind, damage)) = self.hazards.damage_at(agent.pos) {
                agent.take_damage(damage);
                self.stats.hazard_hits += 1;
                debug!(hunter = %agent.name, kind = kind.name(), damage, "Hazard damage");
                self.log(SimulationEvent::HazardDamage {
                    tick: self.tick,
                    victim: agent.name.clone(),
                    kind,
                    damage,
                });
                if !agent.is_alive() {
                    self.bury(agent, DeathCause::Hazard(kind));
                    return;
                }
                self.learn_from(&agent, Outcome::DamageTaken);
            }

            let regen = self.config.policy.stamina_regen;
            if let Some(h) = agent.as_hunter_mut() {
                h.rest(regen);
            }
        }

        self.entities.insert(id, agent);
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    fn protagonist_move(&mut self, agent: &mut Entity) -> bool {
        let state = self.observe(agent);
        let action = self.learner.choose_action(state, &mut self.rng);
        debug!(hunter = %agent.name, action = action.name(), ?state, "Learned action chosen");
        if let Some(h) = agent.as_hunter_mut() {
            h.memory = Some(LearningMemory { state, action });
        }

        let (moved, outcome) = self.perform(agent, action);
        let next = self.observe(agent);
        self.learner.reinforce(state, action, outcome, next);
        moved
    }

    /// Carry out one learned action and judge its immediate outcome
    fn perform(&mut self, agent: &mut Entity, action: Action) -> (bool, Outcome) {
        let move_cost = self.config.policy.move_stamina_cost;
        let light_cost = self.config.policy.light_stamina_cost;
        let from = agent.pos;

        let (target, cost) = match action {
            Action::HuntMinorThreat => (
                self.nearest(from, |e| e.is_creature() && !e.is_boss() && e.is_alive()),
                move_cost,
            ),
            Action::HuntBoss => (self.nearest(from, |e| e.is_boss() && e.is_alive()), move_cost),
            Action::CollectResource => (self.nearest(from, Entity::is_resource), light_cost),
            Action::SeekSupport => (self.nearest(from, Entity::is_support), move_cost),
            Action::Rest => return (false, self.deliberate_rest(agent)),
            Action::AvoidDanger => return self.avoid_danger(agent, light_cost),
        };

        let Some(target) = target else {
            return (false, Outcome::WastedAction);
        };
        match self.pursue(agent, target, cost) {
            Pursuit::Exhausted => (false, Outcome::WastedAction),
            pursuit => (pursuit.moved(), Outcome::Moved),
        }
    }

    fn deliberate_rest(&mut self, agent: &mut Entity) -> Outcome {
        let amount = self.config.policy.deliberate_rest;
        match agent.as_hunter_mut() {
            Some(h) if h.stamina < h.max_stamina => {
                h.rest(amount);
                Outcome::Healed
            }
            _ => Outcome::WastedAction,
        }
    }

    /// Stamina a step would cost, or None after resting when it can't be paid
    ///
    /// Nothing is charged here; `charge_step` takes it once the step lands.
    fn step_cost(&self, agent: &mut Entity, cost: i32) -> Option<i32> {
        let policy = &self.config.policy;
        let Some(h) = agent.as_hunter_mut() else {
            return Some(0);
        };
        let cost = if h.load > policy.encumbered_load {
            cost.max(policy.encumbered_stamina_cost)
        } else {
            cost
        };
        if h.stamina >= cost {
            return Some(cost);
        }
        h.rest(policy.exhausted_rest);
        debug!(name = %agent.name, cost, "Too tired to move, resting");
        None
    }

    fn charge_step(agent: &mut Entity, cost: i32) {
        if let Some(h) = agent.as_hunter_mut() {
            h.use_stamina(cost);
        }
    }

    /// One step toward `target`, wandering when no path exists
    fn pursue(&mut self, agent: &mut Entity, target: Position, cost: i32) -> Pursuit {
        if self.grid.chebyshev(agent.pos, target) <= 1 {
            return Pursuit::InReach;
        }
        let Some(cost) = self.step_cost(agent, cost) else {
            return Pursuit::Exhausted;
        };

        let moved = match step_towards(&mut self.grid, agent, target) {
            StepResult::Moved(_) => true,
            StepResult::NoPath => {
                debug!(name = %agent.name, %target, "No path, wandering");
                random_step(&mut self.grid, agent, &mut self.rng)
            }
            StepResult::Blocked | StepResult::Arrived => false,
        };
        if moved {
            Self::charge_step(agent, cost);
        }
        Pursuit::Stepped(moved)
    }

    /// Step to the neighbor with the fewest creatures within danger range
    ///
    /// Leaving a creature's side this way is cowardice under the honor code.
    fn avoid_danger(&mut self, agent: &mut Entity, cost: i32) -> (bool, Outcome) {
        let threats: Vec<Position> = self
            .entities
            .values()
            .filter(|e| e.is_creature() && e.is_alive())
            .map(|e| e.pos)
            .collect();
        let danger = |grid: &Grid, pos: Position| {
            threats
                .iter()
                .filter(|&&t| grid.manhattan(pos, t) < DANGER_RADIUS)
                .count()
        };

        let here = danger(&self.grid, agent.pos);
        if here == 0 {
            return (false, Outcome::WastedAction);
        }
        let engaged = threats.iter().any(|&t| self.grid.chebyshev(agent.pos, t) <= 1);

        let best = NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| self.grid.normalize(agent.pos.x + dx, agent.pos.y + dy))
            .filter(|&p| self.grid.is_empty(p))
            .min_by_key(|&p| danger(&self.grid, p));
        let Some(dest) = best else {
            return (false, Outcome::WastedAction);
        };

        let Some(cost) = self.step_cost(agent, cost) else {
            return (false, Outcome::WastedAction);
        };
        if !self.grid.move_entity(agent, dest) {
            return (false, Outcome::Moved);
        }
        Self::charge_step(agent, cost);

        if !engaged {
            return (true, Outcome::Moved);
        }
        let change = delta_for(&agent.name, false, PreyClass::Standard, HonorAction::Flee);
        if let Some(h) = agent.as_hunter_mut() {
            h.adjust_honor(change.delta);
        }
        self.log(SimulationEvent::HonorChanged {
            tick: self.tick,
            hunter: agent.name.clone(),
            delta: change.delta,
            message: change.message,
        });
        (true, Outcome::HonorLost)
    }

    /// Rivals go after the boss first, then any creature
    fn rival_move(&mut self, agent: &mut Entity) -> bool {
        if !self.rolls_move() {
            return false;
        }
        let target = self
            .nearest(agent.pos, |e| e.is_boss() && e.is_alive())
            .or_else(|| self.nearest(agent.pos, |e| e.is_creature() && e.is_alive()));
        let cost = self.config.policy.move_stamina_cost;
        match target {
            Some(target) => self.pursue(agent, target, cost).moved(),
            None => false,
        }
    }

    fn creature_move(&mut self, agent: &mut Entity) -> bool {
        if !self.rolls_move() {
            return false;
        }
        match self.nearest(agent.pos, |e| e.is_hunter() && e.is_alive()) {
            Some(target) => self.pursue(agent, target, 0).moved(),
            None => random_step(&mut self.grid, agent, &mut self.rng),
        }
    }

    /// Support agents wander until damaged
    fn support_move(&mut self, agent: &mut Entity) -> bool {
        if agent.is_incapacitated() || !self.rolls_move() {
            return false;
        }
        random_step(&mut self.grid, agent, &mut self.rng)
    }

    fn rolls_move(&mut self) -> bool {
        self.rng.gen::<f64>() < self.config.policy.move_chance
    }

    // ------------------------------------------------------------------
    // Traps and carrying
    // ------------------------------------------------------------------

    /// Trigger an armed trap under the agent. Returns true if it killed them.
    fn spring_trap(&mut self, agent: &mut Entity) -> bool {
        let found = self
            .entities
            .values()
            .find(|e| e.pos == agent.pos && e.as_trap().is_some_and(|t| !t.triggered))
            .map(|e| e.id);
        let Some(trap_id) = found else {
            return false;
        };
        let Some(mut trap) = self.entities.remove(&trap_id) else {
            return false;
        };
        let Some(damage) = trap.as_trap_mut().and_then(|t| t.trigger()) else {
            return false;
        };

        self.stats.traps_triggered += 1;
        let was_damaged = agent.is_incapacitated();
        agent.take_damage(damage);
        info!(victim = %agent.name, damage, pos = %agent.pos, "Trap triggered");
        self.log(SimulationEvent::TrapTriggered {
            tick: self.tick,
            victim: agent.name.clone(),
            damage,
        });

        if agent.judge_damage() && !was_damaged {
            self.log(SimulationEvent::SupportDamaged {
                tick: self.tick,
                support: agent.name.clone(),
            });
        }
        if let Some(h) = agent.as_hunter_mut() {
            h.lose_honor(TRAP_HONOR_PENALTY);
            self.log(SimulationEvent::HonorChanged {
                tick: self.tick,
                hunter: agent.name.clone(),
                delta: -TRAP_HONOR_PENALTY,
                message: format!("{} blundered into a trap", agent.name),
            });
        }

        if !agent.is_alive() {
            return true;
        }
        self.learn_from(agent, Outcome::DamageTaken);
        false
    }

    /// Neighbor ids around `pos`, once each even on tiny grids
    fn ids_around(&self, pos: Position, offsets: &[(i32, i32)]) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(offsets.len());
        for &(dx, dy) in offsets {
            if let Some(id) = self.grid.get_cell(pos.offset(dx, dy)) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// The protagonist picks up a damaged support agent one orthogonal step away
    fn pick_up_support(&mut self, agent: &mut Entity) {
        if agent.as_hunter().map_or(true, |h| h.is_carrying()) {
            return;
        }
        let found = self.ids_around(agent.pos, &ORTHOGONAL_OFFSETS).into_iter().find(|id| {
            self.entities
                .get(id)
                .is_some_and(|e| e.is_incapacitated() && e.is_alive())
        });
        let Some(support) = found.and_then(|id| self.entities.remove(&id)) else {
            return;
        };
        self.grid.remove(support.id, support.pos);
        let name = support.name.clone();

        let rejected = match agent.as_hunter_mut() {
            Some(h) => h.carry(support).err(),
            None => Some(support),
        };
        if let Some(mut support) = rejected {
            let pos = support.pos;
            self.grid.place(&mut support, pos);
            self.entities.insert(support.id, support);
            return;
        }

        info!(carrier = %agent.name, support = %name, "Picked up damaged support agent");
        self.log(SimulationEvent::SupportCarried {
            tick: self.tick,
            carrier: agent.name.clone(),
            support: name,
        });
        self.learn_from(agent, Outcome::HonorGain);
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    /// Roll combat against each neighbor in turn
    fn combat_round(&mut self, agent: &mut Entity) {
        for id in self.ids_around(agent.pos, &NEIGHBOR_OFFSETS) {
            let Some(neighbor) = self.entities.get(&id) else {
                continue;
            };
            if should_engage(agent, neighbor, &self.config.policy, &mut self.rng) {
                self.fight(agent, id);
            }
        }
    }

    /// Resolve a single attack between two entities in the arena
    ///
    /// Returns None if either is missing or they are the same entity.
    pub fn resolve_attack(
        &mut self,
        attacker_id: EntityId,
        defender_id: EntityId,
    ) -> Option<CombatResult> {
        if attacker_id == defender_id || !self.entities.contains_key(&defender_id) {
            return None;
        }
        let mut attacker = self.entities.remove(&attacker_id)?;
        let result = self.fight(&mut attacker, defender_id);
        self.entities.insert(attacker_id, attacker);
        result
    }

    /// Attack an arena entity with an agent that has been taken out
    fn fight(&mut self, attacker: &mut Entity, defender_id: EntityId) -> Option<CombatResult> {
        let mut defender = self.entities.remove(&defender_id)?;
        let result = resolve_combat(attacker, &mut defender, &self.config.policy, &mut self.rng);

        match &result {
            CombatResult::Skipped => {}
            CombatResult::Vetoed { penalty } => {
                self.stats.vetoed_attacks += 1;
                debug!(attacker = %attacker.name, target = %defender.name, "Attack vetoed by honor code");
                self.log(SimulationEvent::AttackVetoed {
                    tick: self.tick,
                    attacker: attacker.name.clone(),
                    target: defender.name.clone(),
                });
                self.log(SimulationEvent::HonorChanged {
                    tick: self.tick,
                    hunter: attacker.name.clone(),
                    delta: penalty.delta,
                    message: penalty.message.clone(),
                });
                self.learn_from(attacker, Outcome::HonorLost);
            }
            CombatResult::Struck {
                strike,
                honor,
                boss,
                ..
            } => {
                self.stats.combats += 1;
                self.log(SimulationEvent::CombatHit {
                    tick: self.tick,
                    attacker: attacker.name.clone(),
                    defender: defender.name.clone(),
                    damage: strike.damage,
                });
                if !honor.is_none() {
                    self.log(SimulationEvent::HonorChanged {
                        tick: self.tick,
                        hunter: attacker.name.clone(),
                        delta: honor.delta,
                        message: honor.message.clone(),
                    });
                }
                if strike.support_damaged {
                    self.log(SimulationEvent::SupportDamaged {
                        tick: self.tick,
                        support: defender.name.clone(),
                    });
                }
                if defender.is_alive() {
                    self.learn_from(&defender, Outcome::DamageTaken);
                }

                if strike.killed {
                    if attacker.is_hunter() {
                        self.stats.kills += 1;
                        let outcome = if *boss {
                            Outcome::BossKill
                        } else {
                            Outcome::MinorKill
                        };
                        self.learn_from(attacker, outcome);
                    }
                    info!(killer = %attacker.name, victim = %defender.name, boss = *boss, "Kill");
                    self.log(SimulationEvent::Killed {
                        tick: self.tick,
                        killer: attacker.name.clone(),
                        victim: defender.name.clone(),
                        boss: *boss,
                    });
                }
            }
        }

        if defender.is_alive() {
            self.entities.insert(defender_id, defender);
        } else {
            let killer = attacker.name.clone();
            self.bury(defender, DeathCause::Combat { killer });
        }
        Some(result)
    }

    // ------------------------------------------------------------------
    // Resources
    // ------------------------------------------------------------------

    /// Pick up resources from the surrounding cells
    ///
    /// Weapons are equipped at once, med kits and stamina boosts are used at
    /// once if they would help, anything else goes into the inventory.
    fn collect_resources(&mut self, agent: &mut Entity) {
        for id in self.ids_around(agent.pos, &NEIGHBOR_OFFSETS) {
            let Some(kind) = self
                .entities
                .get(&id)
                .and_then(Entity::as_resource)
                .filter(|r| !r.collected)
                .map(|r| r.kind)
            else {
                continue;
            };
            let Some(h) = agent.as_hunter() else {
                return;
            };
            let use_now = match kind {
                ResourceKind::Weapon => true,
                ResourceKind::MedKit => agent.health < agent.max_health,
                ResourceKind::StaminaBoost => h.stamina < h.max_stamina,
                ResourceKind::RepairKit => false,
            };
            if !use_now && h.inventory_full() {
                continue;
            }

            let Some(mut resource) = self.entities.remove(&id) else {
                continue;
            };
            self.grid.remove(id, resource.pos);
            if let Some(r) = resource.as_resource_mut() {
                r.collected = true;
            }

            self.stats.resources_collected += 1;
            info!(hunter = %agent.name, resource = kind.name(), "Resource collected");
            self.log(SimulationEvent::ResourceCollected {
                tick: self.tick,
                hunter: agent.name.clone(),
                resource: kind,
            });

            if use_now {
                kind.apply(agent);
                self.log(SimulationEvent::ResourceUsed {
                    tick: self.tick,
                    hunter: agent.name.clone(),
                    resource: kind,
                    target: agent.name.clone(),
                });
            } else if let Some(h) = agent.as_hunter_mut() {
                h.stow(kind);
            }
            self.learn_from(agent, Outcome::ResourceCollected);
        }
    }

    /// Repair the carried support agent, else an adjacent damaged one
    ///
    /// A repaired agent that was being carried is set down next to the carrier.
    fn use_repair_kit(&mut self, agent: &mut Entity) {
        if !agent
            .as_hunter()
            .is_some_and(|h| h.has_item(ResourceKind::RepairKit))
        {
            return;
        }

        let carried = agent
            .as_hunter()
            .and_then(|h| h.carried.as_deref())
            .is_some_and(Entity::is_incapacitated);
        if carried {
            let Some(h) = agent.as_hunter_mut() else {
                return;
            };
            let Some(mut support) = h.set_down() else {
                return;
            };
            h.take_item(ResourceKind::RepairKit);
            ResourceKind::RepairKit.apply(&mut support);
            self.log_repair(agent, &support);

            let spot = NEIGHBOR_OFFSETS
                .iter()
                .map(|&(dx, dy)| self.grid.normalize(agent.pos.x + dx, agent.pos.y + dy))
                .find(|&p| self.grid.is_empty(p));
            match spot {
                Some(pos) if self.grid.place(&mut support, pos) => {
                    self.log(SimulationEvent::SupportSetDown {
                        tick: self.tick,
                        carrier: agent.name.clone(),
                        support: support.name.clone(),
                        pos,
                    });
                    self.entities.insert(support.id, support);
                }
                // Nowhere to put them down; keep carrying
                _ => {
                    if let Some(h) = agent.as_hunter_mut() {
                        let _ = h.carry(support);
                    }
                }
            }
            self.learn_from(agent, Outcome::Healed);
            return;
        }

        let target = self.ids_around(agent.pos, &ORTHOGONAL_OFFSETS).into_iter().find(|id| {
            self.entities
                .get(id)
                .is_some_and(|e| e.is_incapacitated() && e.is_alive())
        });
        let Some(target) = target else {
            return;
        };
        if let Some(h) = agent.as_hunter_mut() {
            h.take_item(ResourceKind::RepairKit);
        }
        let Some(mut support) = self.entities.remove(&target) else {
            return;
        };
        ResourceKind::RepairKit.apply(&mut support);
        self.log_repair(agent, &support);
        self.entities.insert(target, support);
        self.learn_from(agent, Outcome::Healed);
    }

    fn log_repair(&mut self, agent: &Entity, support: &Entity) {
        info!(hunter = %agent.name, support = %support.name, "Support agent repaired");
        self.log(SimulationEvent::ResourceUsed {
            tick: self.tick,
            hunter: agent.name.clone(),
            resource: ResourceKind::RepairKit,
            target: support.name.clone(),
        });
    }

    /// Use a stowed med kit or stamina boost when running low
    fn auto_use_items(&mut self, agent: &mut Entity) {
        let Some(h) = agent.as_hunter() else {
            return;
        };
        let wanted = [
            (ResourceKind::MedKit, agent.health < MED_KIT_THRESHOLD),
            (ResourceKind::StaminaBoost, h.stamina < STAMINA_BOOST_THRESHOLD),
        ];

        for (kind, low) in wanted {
            if !low || !agent.as_hunter_mut().is_some_and(|h| h.take_item(kind)) {
                continue;
            }
            kind.apply(agent);
            self.log(SimulationEvent::ResourceUsed {
                tick: self.tick,
                hunter: agent.name.clone(),
                resource: kind,
                target: agent.name.clone(),
            });
            self.learn_from(agent, Outcome::Healed);
        }
    }

    // ------------------------------------------------------------------
    // Weather
    // ------------------------------------------------------------------

    fn apply_weather(&mut self) {
        if let Some(old) = self.weather.update(self.tick, &mut self.rng) {
            let new = self.weather.current;
            info!(old = old.name(), new = new.name(), "Weather changed");
            self.log(SimulationEvent::WeatherChanged {
                tick: self.tick,
                old,
                new,
            });
        }

        let weather = self.weather.current;
        let hunters: Vec<EntityId> = self
            .entities
            .values()
            .filter(|e| e.is_hunter() && e.is_alive())
            .map(|e| e.id)
            .collect();

        for id in hunters {
            match weather {
                Weather::Clear => {}
                Weather::Hot | Weather::Cold => {
                    let drain = weather.stamina_drain();
                    if let Some(h) = self.entities.get_mut(&id).and_then(Entity::as_hunter_mut) {
                        h.stamina = (h.stamina - drain).max(0);
                        if weather == Weather::Hot && h.stamina < HEAT_EXHAUSTION {
                            h.rest(HEAT_REST);
                        }
                    }
                }
                Weather::ThunderStorm => {
                    let Some(damage) = self.weather.roll_lightning(&mut self.rng) else {
                        continue;
                    };
                    let Some(hunter) = self.entities.get_mut(&id) else {
                        continue;
                    };
                    let alive = hunter.take_damage(damage);
                    let victim = hunter.name.clone();
                    debug!(%victim, damage, "Lightning strike");
                    self.log(SimulationEvent::LightningStrike {
                        tick: self.tick,
                        victim,
                        damage,
                    });
                    if alive {
                        self.learn_from_id(id, Outcome::DamageTaken);
                    } else {
                        self.remove_dead(id, DeathCause::Lightning);
                    }
                }
            }
        }
    }
}
