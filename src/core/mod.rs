pub mod config;
pub mod error;
pub mod types;

pub use config::{HazardConfig, LearningConfig, PolicyConstants, PopulationConfig, SimulationConfig};
pub use error::{Result, SimError};
pub use types::{EntityId, Position, Tick};
