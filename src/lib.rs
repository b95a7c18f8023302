//! Badlands - a turn-based hunting simulation on a toroidal grid
//!
//! A learning protagonist, its rivals, hostile creatures and support agents
//! share a wrapping grid with hidden traps, resources and evolving hazards.

pub mod combat;
pub mod core;
pub mod entity;
pub mod environment;
pub mod learning;
pub mod movement;
pub mod simulation;
pub mod spatial;

pub use crate::core::config::SimulationConfig;
pub use crate::core::error::{Result, SimError};
pub use crate::simulation::{SimulationOutput, World};
