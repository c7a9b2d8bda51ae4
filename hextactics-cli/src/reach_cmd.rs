//! Reach command - list where the unit on a hex can move

use anyhow::{bail, Result};
use clap::Args;

use hextactics_core::{reachable, Game, GameConfig, Hex};

use crate::map_cmd::build_game;

#[derive(Args)]
pub struct ReachArgs {
    /// Axial q of the unit's hex
    #[arg(long, allow_negative_numbers = true, default_value = "0")]
    pub q: i32,

    /// Axial r of the unit's hex
    #[arg(long, allow_negative_numbers = true, default_value = "0")]
    pub r: i32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ReachArgs, config: GameConfig) -> Result<()> {
    let game = build_game(config)?;
    let cells = reachable_from(&game, Hex::new(args.q, args.r))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&cells)?);
    } else {
        println!("{} reachable hexes from ({}, {})", cells.len(), args.q, args.r);
        for hex in &cells {
            println!("  ({}, {})", hex.q, hex.r);
        }
    }
    Ok(())
}

/// Sorted reachable set for whatever unit stands on `hex`
fn reachable_from(game: &Game, hex: Hex) -> Result<Vec<Hex>> {
    let Some(unit) = game.world().unit_at(hex) else {
        bail!("no unit at ({}, {})", hex.q, hex.r);
    };
    let mut cells: Vec<Hex> = reachable(game.world(), game.registry(), unit)
        .into_iter()
        .collect();
    cells.sort();
    Ok(cells)
}
