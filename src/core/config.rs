//! Simulation configuration with documented constants
//!
//! Every tuning value the simulation rolls against lives here so experiments
//! can override it from TOML. Values that are part of the rules rather than
//! knobs live in `combat::constants`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};
use crate::entity::ResourceKind;
use crate::learning::RewardTable;

/// Top-level configuration for a world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid width in cells (the grid wraps horizontally)
    pub width: i32,
    /// Grid height in cells (the grid wraps vertically)
    pub height: i32,
    /// Seed for the world RNG; the same seed replays the same run
    pub seed: u64,
    /// Tick limit used by `World::run` when the caller doesn't pass one
    pub max_ticks: u64,
    pub population: PopulationConfig,
    pub policy: PolicyConstants,
    pub learning: LearningConfig,
    pub hazards: HazardConfig,
}

/// How many of each entity kind to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Hunters including the learning protagonist (must be >= 1)
    pub hunters: u32,
    /// Hostile creatures; the first one spawned is the boss
    pub creatures: u32,
    /// Support agents
    pub supports: u32,
    pub traps_min: u32,
    pub traps_max: u32,
    pub resources_min: u32,
    pub resources_max: u32,
    /// Item kinds resources are drawn from, by name (`weapon`, `med_kit`, ...)
    pub resource_kinds: Vec<String>,
}

impl PopulationConfig {
    /// Parse `resource_kinds`; an unknown name is an error, never skipped
    pub fn resource_kinds(&self) -> Result<Vec<ResourceKind>> {
        self.resource_kinds.iter().map(|name| name.parse()).collect()
    }
}

/// Probabilities and magnitudes the rules roll against
///
/// These were tuned by hand rather than derived. Keep them overridable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConstants {
    /// Chance that an adjacent hostile pair actually fights this tick
    pub combat_chance: f64,
    /// Chance a hunter picks a fight with an adjacent support agent
    ///
    /// Models restraint: support agents are rarely targeted.
    pub support_attack_chance: f64,
    /// Chance that a non-learning agent moves on its turn
    pub move_chance: f64,

    pub hunter_damage_min: i32,
    pub hunter_damage_max: i32,
    /// Damage range for attackers that are neither hunters nor creatures
    pub other_damage_min: i32,
    pub other_damage_max: i32,
    pub creature_damage: i32,
    pub boss_damage: i32,
    pub boss_health: i32,

    /// Stamina spent per step while chasing a target
    pub move_stamina_cost: i32,
    /// Stamina spent per step while carrying more than `encumbered_load`
    pub encumbered_stamina_cost: i32,
    pub encumbered_load: i32,
    /// Stamina spent by the protagonist when foraging or evading
    pub light_stamina_cost: i32,
    /// Stamina regained by a hunter too tired to move
    pub exhausted_rest: i32,
    /// Stamina regained by the protagonist's explicit rest action
    pub deliberate_rest: i32,
    /// Stamina regenerated at the end of every hunter turn
    pub stamina_regen: i32,
}

/// Q-learning hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Learning rate (alpha)
    pub alpha: f64,
    /// Discount factor (gamma)
    pub gamma: f64,
    /// Initial exploration probability
    pub epsilon: f64,
    /// Multiplier applied to epsilon after every tick (1.0 = no decay)
    pub epsilon_decay: f64,
    /// Epsilon never decays below this
    pub epsilon_min: f64,
    pub rewards: RewardTable,
}

/// Procedural hazard generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardConfig {
    /// Hazards seeded before the first tick
    pub initial_count: u32,
    /// Base per-tick chance of spawning a new hazard
    pub spawn_rate: f64,
    /// Multiplier on `spawn_rate`
    pub difficulty: f64,
    pub max_concurrent: usize,
    /// Hazards are pruned once their age reaches this many ticks
    pub lifespan: u32,
    /// Spreading hazards grow one tile every this many ticks of age
    pub spread_interval: u32,
    pub max_tiles: usize,
    /// Severe hazards go dormant on ticks divisible by this
    pub dormant_period: u64,
    /// Severe hazards can only spawn after this tick
    pub severe_unlock_tick: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            seed: 12345,
            max_ticks: 100,
            population: PopulationConfig::default(),
            policy: PolicyConstants::default(),
            learning: LearningConfig::default(),
            hazards: HazardConfig::default(),
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            hunters: 3,
            creatures: 5,
            supports: 1,
            traps_min: 3,
            traps_max: 5,
            resources_min: 4,
            resources_max: 8,
            resource_kinds: ResourceKind::ALL.iter().map(|k| k.name().to_string()).collect(),
        }
    }
}

impl Default for PolicyConstants {
    fn default() -> Self {
        Self {
            combat_chance: 0.40,
            support_attack_chance: 0.30,
            move_chance: 0.70,

            hunter_damage_min: 20,
            hunter_damage_max: 40,
            other_damage_min: 10,
            other_damage_max: 20,
            creature_damage: 10,
            boss_damage: 100,
            boss_health: 3500,

            move_stamina_cost: 5,
            encumbered_stamina_cost: 10,
            encumbered_load: 10,
            light_stamina_cost: 3,
            exhausted_rest: 10,
            deliberate_rest: 20,
            stamina_regen: 5,
        }
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.95,
            epsilon: 1.0,
            epsilon_decay: 0.995,
            epsilon_min: 0.05,
            rewards: RewardTable::default(),
        }
    }
}

impl Default for HazardConfig {
    fn default() -> Self {
        Self {
            initial_count: 3,
            spawn_rate: 0.15,
            difficulty: 1.0,
            max_concurrent: 8,
            lifespan: 50,
            spread_interval: 5,
            max_tiles: 5,
            dormant_period: 10,
            severe_unlock_tick: 30,
        }
    }
}

impl SimulationConfig {
    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Total cells on the grid
    pub fn cell_count(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(invalid(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let pop = &self.population;
        if pop.hunters == 0 {
            return Err(invalid("at least one hunter is required".into()));
        }
        if pop.traps_min > pop.traps_max {
            return Err(invalid(format!(
                "traps_min ({}) exceeds traps_max ({})",
                pop.traps_min, pop.traps_max
            )));
        }
        if pop.resources_min > pop.resources_max {
            return Err(invalid(format!(
                "resources_min ({}) exceeds resources_max ({})",
                pop.resources_min, pop.resources_max
            )));
        }

        if pop.resources_max > 0 && pop.resource_kinds()?.is_empty() {
            return Err(invalid("resources need at least one resource kind".into()));
        }

        // Traps spawn after hunters, each on its own free cell
        if (pop.hunters + pop.traps_max) as usize > self.cell_count() {
            return Err(invalid(format!(
                "{} traps cannot be hidden on a {}x{} grid",
                pop.traps_max, self.width, self.height
            )));
        }

        // Traps don't occupy cells, everything else does
        let occupants = pop.hunters + pop.creatures + pop.supports + pop.resources_max;
        if occupants as usize > self.cell_count() {
            return Err(invalid(format!(
                "{} occupants cannot fit on a {}x{} grid",
                occupants, self.width, self.height
            )));
        }

        let policy = &self.policy;
        for (name, p) in [
            ("combat_chance", policy.combat_chance),
            ("support_attack_chance", policy.support_attack_chance),
            ("move_chance", policy.move_chance),
            ("epsilon", self.learning.epsilon),
            ("epsilon_min", self.learning.epsilon_min),
            ("alpha", self.learning.alpha),
            ("gamma", self.learning.gamma),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(format!("{} must be within [0, 1], got {}", name, p)));
            }
        }
        if policy.hunter_damage_min > policy.hunter_damage_max
            || policy.other_damage_min > policy.other_damage_max
        {
            return Err(invalid("damage ranges must have min <= max".into()));
        }
        if policy.boss_health <= 0 {
            return Err(invalid("boss_health must be positive".into()));
        }

        let hazards = &self.hazards;
        if hazards.spread_interval == 0 || hazards.dormant_period == 0 {
            return Err(invalid("hazard intervals must be non-zero".into()));
        }
        if hazards.max_tiles == 0 {
            return Err(invalid("hazard max_tiles must be at least 1".into()));
        }

        Ok(())
    }
}

fn invalid(msg: String) -> SimError {
    SimError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let config = SimulationConfig {
            width: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_overcrowded_grid_rejected() {
        let mut config = SimulationConfig::default();
        config.width = 3;
        config.height = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let mut config = SimulationConfig::default();
        config.policy.combat_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            seed = 7
            [policy]
            combat_chance = 0.9
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.policy.combat_chance, 0.9);
        assert_eq!(config.width, 20);
        assert_eq!(config.policy.support_attack_chance, 0.30);
        assert_eq!(config.learning.gamma, 0.95);
    }

    #[test]
    fn test_unknown_resource_kind_rejected() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [population]
            resource_kinds = ["med_kit", "banana"]
            "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, SimError::UnknownResourceType(ref s) if s == "banana"));
    }

    #[test]
    fn test_resource_kinds_parse_in_order() {
        let mut config = SimulationConfig::default();
        config.population.resource_kinds = vec!["weapon".into(), "repair_kit".into()];
        assert_eq!(
            config.population.resource_kinds().unwrap(),
            vec![ResourceKind::Weapon, ResourceKind::RepairKit]
        );

        config.population.resource_kinds.clear();
        assert!(matches!(config.validate(), Err(SimError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = SimulationConfig::from_toml_str("width = \"wide\"").unwrap_err();
        assert!(matches!(err, SimError::TomlError(_)));
    }
}
