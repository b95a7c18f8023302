//! Tabular Q-learning
//!
//! The table is sparse: a state only gets a row the first time it is read
//! or updated, initialised to zero for every action.

use ahash::AHashMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::LearningConfig;
use crate::learning::reward::{Outcome, RewardTable};
use crate::learning::state::StateKey;

/// The protagonist's action set, in tie-breaking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    HuntMinorThreat,
    HuntBoss,
    CollectResource,
    Rest,
    SeekSupport,
    AvoidDanger,
}

impl Action {
    pub const COUNT: usize = 6;

    pub const ALL: [Action; Action::COUNT] = [
        Action::HuntMinorThreat,
        Action::HuntBoss,
        Action::CollectResource,
        Action::Rest,
        Action::SeekSupport,
        Action::AvoidDanger,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HuntMinorThreat => "hunt_minor_threat",
            Self::HuntBoss => "hunt_boss",
            Self::CollectResource => "collect_resource",
            Self::Rest => "rest",
            Self::SeekSupport => "seek_support",
            Self::AvoidDanger => "avoid_danger",
        }
    }
}

/// One Q-value per action
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionValues(pub [f64; Action::COUNT]);

impl ActionValues {
    pub fn get(&self, action: Action) -> f64 {
        self.0[action.index()]
    }

    pub fn set(&mut self, action: Action, value: f64) {
        self.0[action.index()] = value;
    }

    pub fn max(&self) -> f64 {
        self.0.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Highest-valued action; earlier actions win ties
    pub fn best(&self) -> (Action, f64) {
        let mut best = (Action::ALL[0], self.0[0]);
        for action in Action::ALL.into_iter().skip(1) {
            let value = self.get(action);
            if value > best.1 {
                best = (action, value);
            }
        }
        best
    }
}

/// A row of the exported table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QEntry {
    pub state: StateKey,
    pub values: ActionValues,
}

/// Serializable copy of a learned table, for callers that persist it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QTableSnapshot {
    pub entries: Vec<QEntry>,
}

#[derive(Debug, Clone)]
pub struct QLearner {
    table: AHashMap<StateKey, ActionValues>,
    pub alpha: f64,
    pub gamma: f64,
    pub epsilon: f64,
    pub epsilon_decay: f64,
    pub epsilon_min: f64,
    pub rewards: RewardTable,
}

impl QLearner {
    pub fn new(config: &LearningConfig) -> Self {
        Self {
            table: AHashMap::new(),
            alpha: config.alpha,
            gamma: config.gamma,
            epsilon: config.epsilon,
            epsilon_decay: config.epsilon_decay,
            epsilon_min: config.epsilon_min,
            rewards: config.rewards.clone(),
        }
    }

    /// Learner with explicit hyperparameters, no decay and default rewards
    pub fn with_params(alpha: f64, gamma: f64, epsilon: f64) -> Self {
        Self::new(&LearningConfig {
            alpha,
            gamma,
            epsilon,
            epsilon_decay: 1.0,
            epsilon_min: 0.0,
            rewards: RewardTable::default(),
        })
    }

    fn row(&mut self, state: StateKey) -> &mut ActionValues {
        self.table.entry(state).or_default()
    }

    /// Q-value without initialising the row
    pub fn q(&self, state: &StateKey, action: Action) -> f64 {
        self.table.get(state).map_or(0.0, |v| v.get(action))
    }

    pub fn values(&self, state: &StateKey) -> Option<&ActionValues> {
        self.table.get(state)
    }

    /// Epsilon-greedy selection
    pub fn choose_action<R: Rng + ?Sized>(&mut self, state: StateKey, rng: &mut R) -> Action {
        let row = *self.row(state);
        if rng.gen::<f64>() < self.epsilon {
            Action::ALL[rng.gen_range(0..Action::COUNT)]
        } else {
            row.best().0
        }
    }

    /// One temporal-difference step; returns the new Q(state, action)
    pub fn update(&mut self, state: StateKey, action: Action, reward: f64, next_state: StateKey) -> f64 {
        let max_next = self.row(next_state).max();
        let alpha = self.alpha;
        let gamma = self.gamma;

        let row = self.row(state);
        let current = row.get(action);
        let updated = current + alpha * (reward + gamma * max_next - current);
        row.set(action, updated);
        updated
    }

    pub fn reward(&self, outcome: Outcome) -> f64 {
        self.rewards.reward(outcome)
    }

    /// Update using the reward configured for `outcome`
    pub fn reinforce(&mut self, state: StateKey, action: Action, outcome: Outcome, next_state: StateKey) -> f64 {
        let reward = self.reward(outcome);
        self.update(state, action, reward, next_state)
    }

    pub fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * self.epsilon_decay).max(self.epsilon_min);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &AHashMap<StateKey, ActionValues> {
        &self.table
    }

    /// Copy the table out, rows sorted by state so exports are stable
    pub fn export_table(&self) -> QTableSnapshot {
        let mut entries: Vec<QEntry> = self
            .table
            .iter()
            .map(|(&state, &values)| QEntry { state, values })
            .collect();
        entries.sort_by_key(|e| e.state);
        QTableSnapshot { entries }
    }

    /// Replace the table with a previously exported one
    pub fn import_table(&mut self, snapshot: QTableSnapshot) {
        self.table = snapshot
            .entries
            .into_iter()
            .map(|e| (e.state, e.values))
            .collect();
    }
}
