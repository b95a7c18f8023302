//! The orchestrator: world state, spawning and the tick loop

pub mod events;
pub mod output;
pub mod scan;
pub mod spawn;
pub mod tick;
pub mod world;

pub use events::{DeathCause, GameOutcome, SimulationEvent};
pub use output::SimulationOutput;
pub use scan::{ScanReport, Sighting, SCAN_RANGE};
pub use world::{AgentSnapshot, PopulationCounts, SimulationStats, World};
