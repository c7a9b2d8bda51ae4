//! HEXTACTICS CLI - Headless driver for the hex tactics engine
//!
//! Commands:
//! - map: Print the generated map
//! - reach: Show where the unit on a hex can move
//! - replay: Feed a scripted event list through the frame loop

mod map_cmd;
mod reach_cmd;
mod replay_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hextactics_core::GameConfig;

#[derive(Parser)]
#[command(name = "hextactics")]
#[command(about = "Hex grid tactics simulation")]
struct Cli {
    #[command(flatten)]
    world: WorldArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the generated map
    Map(map_cmd::MapArgs),
    /// List the hexes a unit can reach
    Reach(reach_cmd::ReachArgs),
    /// Run a JSON event script through the frame loop
    Replay(replay_cmd::ReplayArgs),
}

/// Options shared by every command
#[derive(Args)]
pub struct WorldArgs {
    /// Game config JSON file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the map radius
    #[arg(long, global = true)]
    pub radius: Option<u32>,

    /// Override the generation seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,
}

impl WorldArgs {
    /// Config file (or defaults) with command-line overrides applied
    pub fn load_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(radius) = self.radius {
            config.world.radius = radius;
        }
        if let Some(seed) = self.seed {
            config.world.seed = seed;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.world.load_config()?;

    match cli.command {
        Commands::Map(args) => map_cmd::run(args, config),
        Commands::Reach(args) => reach_cmd::run(args, config),
        Commands::Replay(args) => replay_cmd::run(args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let args = WorldArgs {
            config: None,
            radius: Some(7),
            seed: None,
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.world.radius, 7);
        assert_eq!(config.world.seed, 42);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["hextactics", "reach", "--q", "0", "--r", "0", "--seed", "3"]).unwrap();
        assert_eq!(cli.world.seed, Some(3));
        assert!(matches!(cli.command, Commands::Reach(_)));
    }
}
