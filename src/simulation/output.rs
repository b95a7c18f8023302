//! Simulation output and serialization

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::environment::Weather;
use crate::simulation::events::GameOutcome;
use crate::simulation::world::{AgentSnapshot, PopulationCounts, SimulationStats, World};

/// Everything a finished (or stopped) run reports
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub seed: u64,
    pub ticks: Tick,
    /// None if the tick limit was hit first
    pub outcome: Option<GameOutcome>,
    pub statistics: SimulationStats,
    pub agents: Vec<AgentSnapshot>,
    pub remaining: PopulationCounts,
    pub active_hazards: usize,
    pub weather: Weather,
    pub weather_since: Tick,
    /// Distinct states the learner has seen
    pub q_states: usize,
    pub epsilon: f64,
}

impl SimulationOutput {
    pub fn new(world: &World) -> Self {
        Self {
            seed: world.config().seed,
            ticks: world.tick(),
            outcome: world.outcome(),
            statistics: world.stats().clone(),
            agents: world.agent_snapshots(),
            remaining: world.population(),
            active_hazards: world.hazards().len(),
            weather: world.weather(),
            weather_since: world.weather_since(),
            q_states: world.learner().len(),
            epsilon: world.learner().epsilon,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let outcome = match self.outcome {
            Some(GameOutcome::HuntersWin) => "hunters win",
            Some(GameOutcome::CreaturesWin) => "creatures win",
            Some(GameOutcome::MutualDestruction) => "mutual destruction",
            None => "undecided",
        };
        let mut out = format!(
            "Seed {}: {} after {} ticks\n{} combats, {} kills, {} deaths, {} resources collected, {} traps sprung\n",
            self.seed,
            outcome,
            self.ticks,
            self.statistics.combats,
            self.statistics.kills,
            self.statistics.deaths,
            self.statistics.resources_collected,
            self.statistics.traps_triggered,
        );
        for agent in &self.agents {
            out.push_str(&format!(
                "  {:<10} {:>3} hp  {:>3} stamina  honor {:>3} ({:?})  kills {}{}\n",
                agent.name,
                agent.health,
                agent.stamina,
                agent.honor,
                agent.rank,
                agent.kills,
                if agent.alive { "" } else { "  [fallen]" },
            ));
        }
        out.push_str(&format!(
            "Learner: {} states, epsilon {:.3}; weather {} since tick {}",
            self.q_states,
            self.epsilon,
            self.weather.name(),
            self.weather_since
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    #[test]
    fn test_output_reflects_world() {
        let mut world = World::new(SimulationConfig::default()).unwrap();
        let output = world.run(5);
        assert_eq!(output.seed, 12345);
        assert!(output.ticks <= 5);
        assert_eq!(output.statistics.ticks, output.ticks);
        assert_eq!(output.agents.len(), 3);
        assert!(output.summary().contains("Dek"));
        assert_eq!(output.weather_since, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut world = World::new(SimulationConfig::default()).unwrap();
        let output = world.run(3);
        let parsed: SimulationOutput = serde_json::from_str(&output.to_json()).unwrap();
        assert_eq!(parsed.ticks, output.ticks);
        assert_eq!(parsed.agents, output.agents);
        assert_eq!(parsed.statistics, output.statistics);
    }
}
