//! Headless runner
//!
//! Builds a world from defaults or a TOML config, runs it to completion or
//! the tick limit and prints a summary (or the full output as JSON).

use std::path::PathBuf;

use badlands::{SimulationConfig, World};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "badlands")]
#[command(about = "Run a hunting simulation and report the outcome")]
struct Args {
    /// TOML config file; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum ticks to run (overrides the config)
    #[arg(long)]
    ticks: Option<u64>,

    /// Print the full output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> badlands::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("badlands=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let ticks = args.ticks.unwrap_or(config.max_ticks);

    tracing::info!(seed = config.seed, ticks, "Badlands starting");
    let mut world = World::new(config)?;
    let output = world.run(ticks);

    if args.json {
        println!("{}", output.to_json());
    } else {
        println!("{}", output.summary());
    }
    Ok(())
}
