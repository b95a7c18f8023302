//! Online tabular learning for the protagonist
//!
//! `state` discretises what the hunter sees, `qtable` owns the value table and
//! the epsilon-greedy policy, and `reward` maps outcomes to scalar rewards.

pub mod qtable;
pub mod reward;
pub mod state;

pub use qtable::{Action, ActionValues, QEntry, QLearner, QTableSnapshot};
pub use reward::{Outcome, RewardTable};
pub use state::{Level, StateKey, THREAT_RADIUS};
