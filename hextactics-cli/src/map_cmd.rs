//! Map command - print the generated world
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_game(), report_map()
//! - Level 3: render_ascii(), render_json()
//! - Level 4: glyph lookup

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hextactics_core::{Game, GameConfig, Hex, Registry, Unbound, World};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MapArgs {
    /// Output the map as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TileRecord<'a> {
    q: i32,
    r: i32,
    terrain: &'a str,
    unit: Option<&'a str>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: MapArgs, config: GameConfig) -> Result<()> {
    let game = build_game(config)?;
    report_map(&game, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

pub(crate) fn build_game(config: GameConfig) -> Result<Game> {
    let game = Game::new(config, &mut Unbound)?;
    Ok(game)
}

fn report_map(game: &Game, args: &MapArgs) -> Result<()> {
    if args.json {
        println!("{}", render_json(game.world(), game.registry())?);
    } else {
        print!("{}", render_ascii(game.world(), game.registry()));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One text row per r, indented so hex columns line up
pub(crate) fn render_ascii(world: &World, registry: &Registry) -> String {
    let radius = world.radius() as i32;
    let mut out = String::new();
    for r in -radius..=radius {
        out.push_str(&" ".repeat((r + radius) as usize));
        let row: Vec<String> = (-radius..=radius)
            .map(|q| glyph(world, registry, Hex::new(q, r)).to_string())
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }
    out
}

fn render_json(world: &World, registry: &Registry) -> Result<String> {
    let records: Vec<TileRecord> = world
        .tiles()
        .map(|t| TileRecord {
            q: t.hex.q,
            r: t.hex.r,
            terrain: registry.terrain(t.terrain).map_or("unknown", |k| k.name),
            unit: t
                .occupant
                .and_then(|id| world.unit(id))
                .and_then(|u| registry.unit_kind(u.kind))
                .map(|k| k.name),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn glyph(world: &World, registry: &Registry, hex: Hex) -> char {
    let Some(tile) = world.tile(hex) else {
        return ' ';
    };
    if tile.occupant.is_some() {
        return '@';
    }
    match registry.terrain(tile.terrain).map(|k| k.name) {
        Some("grass") => '.',
        Some("water") => '~',
        Some("mountain") => '^',
        _ => '?',
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_map_shape() {
        let game = build_game(GameConfig::default()).unwrap();
        let text = render_ascii(game.world(), game.registry());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(text.matches('@').count(), 1);
        // row r = -5 is entirely water
        assert_eq!(lines[0].trim().replace(' ', ""), "~~~~~~");
    }

    #[test]
    fn test_json_lists_every_tile() {
        let game = build_game(GameConfig::default()).unwrap();
        let json = render_json(game.world(), game.registry()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let tiles = value.as_array().unwrap();
        assert_eq!(tiles.len(), 91);
        assert!(tiles
            .iter()
            .any(|t| t["q"] == 0 && t["r"] == 0 && t["unit"] == "scout"));
    }
}
