//! Collectible resources

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::SimError;
use crate::entity::support::REPAIR_AMOUNT;
use crate::entity::{Entity, EntityKind};

pub const WEAPON_DAMAGE_BONUS: i32 = 20;
pub const MED_KIT_HEAL: i32 = 50;
pub const STAMINA_BOOST_AMOUNT: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Permanent damage bonus for the hunter who equips it
    Weapon,
    /// Repairs a damaged support agent
    RepairKit,
    MedKit,
    StaminaBoost,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::RepairKit,
        ResourceKind::StaminaBoost,
        ResourceKind::MedKit,
        ResourceKind::Weapon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::RepairKit => "repair_kit",
            Self::MedKit => "med_kit",
            Self::StaminaBoost => "stamina_boost",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Weapon => "Sword of Despair",
            Self::RepairKit => "Repair Kit",
            Self::MedKit => "Med Kit",
            Self::StaminaBoost => "Stamina Boost",
        }
    }

    pub fn marker(&self) -> char {
        match self {
            Self::Weapon => 'W',
            Self::RepairKit => 'R',
            Self::MedKit => 'H',
            Self::StaminaBoost => 'S',
        }
    }

    /// Apply the item's effect. Returns false if it has no effect on this target.
    pub fn apply(&self, target: &mut Entity) -> bool {
        match self {
            Self::Weapon => match target.as_hunter_mut() {
                Some(h) => {
                    h.weapon_bonus = WEAPON_DAMAGE_BONUS;
                    true
                }
                None => false,
            },
            Self::StaminaBoost => match target.as_hunter_mut() {
                Some(h) => {
                    h.rest(STAMINA_BOOST_AMOUNT);
                    true
                }
                None => false,
            },
            Self::RepairKit => {
                let Some(s) = target.as_support_mut() else {
                    return false;
                };
                s.repair();
                target.heal(REPAIR_AMOUNT);
                true
            }
            Self::MedKit => match target.kind {
                EntityKind::Hunter(_) | EntityKind::Support(_) => {
                    target.heal(MED_KIT_HEAL);
                    true
                }
                _ => false,
            },
        }
    }
}

impl FromStr for ResourceKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(Self::Weapon),
            "repair_kit" => Ok(Self::RepairKit),
            "med_kit" => Ok(Self::MedKit),
            "stamina_boost" => Ok(Self::StaminaBoost),
            other => Err(SimError::UnknownResourceType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceState {
    pub kind: ResourceKind,
    pub collected: bool,
}

impl ResourceState {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            collected: false,
        }
    }
}
