//! Hunters: the protagonist and its rivals
//!
//! Hunters spend stamina to move, keep an honor score in `[0, 100]`, carry a
//! small inventory and can carry one damaged support agent.

use serde::{Deserialize, Serialize};

use crate::entity::{Entity, ResourceKind};
use crate::learning::{Action, StateKey};

pub const MAX_STAMINA: i32 = 100;
pub const STARTING_HONOR: i32 = 50;
pub const MAX_HONOR: i32 = 100;
pub const INVENTORY_CAPACITY: usize = 3;
/// Load added per stowed item
pub const ITEM_WEIGHT: i32 = 10;
/// Load added while carrying a support agent
pub const CARRY_WEIGHT: i32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HunterRole {
    /// The single hunter whose actions come from the learning controller
    Protagonist,
    Rival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HonorRank {
    Legendary,
    Honoured,
    Neutral,
    Dishonoured,
    Disgraced,
}

impl HonorRank {
    pub fn from_honor(honor: i32) -> Self {
        match honor {
            80.. => Self::Legendary,
            60..=79 => Self::Honoured,
            40..=59 => Self::Neutral,
            20..=39 => Self::Dishonoured,
            _ => Self::Disgraced,
        }
    }
}

/// Last state/action pair, kept so a later outcome can still be credited
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LearningMemory {
    pub state: StateKey,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HunterState {
    pub role: HunterRole,
    pub stamina: i32,
    pub max_stamina: i32,
    pub honor: i32,
    pub kills: u32,
    pub load: i32,
    /// A damaged support agent being carried; it is off the grid while here
    pub carried: Option<Box<Entity>>,
    pub inventory: Vec<ResourceKind>,
    pub weapon_bonus: i32,
    pub memory: Option<LearningMemory>,
}

impl HunterState {
    pub fn new(role: HunterRole) -> Self {
        Self {
            role,
            stamina: MAX_STAMINA,
            max_stamina: MAX_STAMINA,
            honor: STARTING_HONOR,
            kills: 0,
            load: 0,
            carried: None,
            inventory: Vec::with_capacity(INVENTORY_CAPACITY),
            weapon_bonus: 0,
            memory: None,
        }
    }

    /// Spend stamina if there is enough; otherwise nothing changes
    pub fn use_stamina(&mut self, amount: i32) -> bool {
        if self.stamina >= amount {
            self.stamina -= amount;
            true
        } else {
            false
        }
    }

    pub fn rest(&mut self, amount: i32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    pub fn gain_honor(&mut self, amount: i32) {
        self.honor = (self.honor + amount).clamp(0, MAX_HONOR);
    }

    pub fn lose_honor(&mut self, amount: i32) {
        self.honor = (self.honor - amount).clamp(0, MAX_HONOR);
    }

    /// Apply a signed honor change
    pub fn adjust_honor(&mut self, delta: i32) {
        if delta >= 0 {
            self.gain_honor(delta);
        } else {
            self.lose_honor(-delta);
        }
    }

    pub fn record_kill(&mut self) {
        self.kills += 1;
    }

    pub fn rank(&self) -> HonorRank {
        HonorRank::from_honor(self.honor)
    }

    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= INVENTORY_CAPACITY
    }

    /// Put an item in the inventory. Fails when full.
    pub fn stow(&mut self, item: ResourceKind) -> bool {
        if self.inventory_full() {
            return false;
        }
        self.inventory.push(item);
        self.load += ITEM_WEIGHT;
        true
    }

    /// Take one item of this kind out of the inventory
    pub fn take_item(&mut self, item: ResourceKind) -> bool {
        match self.inventory.iter().position(|&k| k == item) {
            Some(idx) => {
                self.inventory.remove(idx);
                self.load = (self.load - ITEM_WEIGHT).max(0);
                true
            }
            None => false,
        }
    }

    pub fn has_item(&self, item: ResourceKind) -> bool {
        self.inventory.contains(&item)
    }

    pub fn is_carrying(&self) -> bool {
        self.carried.is_some()
    }

    /// Take a support agent into the carry slot. Hands it back if the slot is taken.
    pub fn carry(&mut self, entity: Entity) -> Result<(), Entity> {
        if self.carried.is_some() {
            return Err(entity);
        }
        self.carried = Some(Box::new(entity));
        self.load += CARRY_WEIGHT;
        Ok(())
    }

    /// Empty the carry slot
    pub fn set_down(&mut self) -> Option<Entity> {
        let carried = self.carried.take()?;
        self.load = (self.load - CARRY_WEIGHT).max(0);
        Some(*carried)
    }
}
