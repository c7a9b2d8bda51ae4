//! Replay command - drive the frame loop from a JSON event script
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_script(), play_script(), report_frame()
//! - Level 3: ScriptedEvents / CapturedFrame (backend stand-ins)

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};

use hextactics_core::game::{EventSource, TileSink};
use hextactics_core::{DebugLabel, Game, GameConfig, InputEvent, OverlayClass, TileDescriptor};

use crate::map_cmd::build_game;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file: an array of events (one frame) or {"frames": [[...], ...]}
    #[arg(long, value_name = "FILE")]
    pub script: PathBuf,

    /// Seconds per frame
    #[arg(long, default_value = "0.016")]
    pub dt: f32,

    /// Print the final frame as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Event script, one inner list per frame
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(from = "ScriptFile")]
pub struct Script {
    pub frames: Vec<Vec<InputEvent>>,
}

/// Accepted on-disk shapes
#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFile {
    Frames { frames: Vec<Vec<InputEvent>> },
    /// Flat event list played as a single frame
    Events(Vec<InputEvent>),
}

impl From<ScriptFile> for Script {
    fn from(file: ScriptFile) -> Self {
        let frames = match file {
            ScriptFile::Frames { frames } => frames,
            ScriptFile::Events(events) => vec![events],
        };
        Self { frames }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: ReplayArgs, config: GameConfig) -> Result<()> {
    let script = load_script(&args.script)?;
    let mut game = build_game(config)?;

    let frame = play_script(&mut game, script, args.dt);
    report_frame(&game, &frame, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_script(path: &Path) -> Result<Script> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path.display()))?;
    let script = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script: {}", path.display()))?;
    Ok(script)
}

/// Run every frame until the script ends or a quit event arrives
pub(crate) fn play_script(game: &mut Game, script: Script, dt: f32) -> CapturedFrame {
    let mut sink = CapturedFrame::default();
    for (i, events) in script.frames.into_iter().enumerate() {
        let mut source = ScriptedEvents(events.into());
        game.frame(dt, &mut source, &mut sink);
        tracing::debug!(frame = i, tiles = sink.tiles.len(), "frame done");
        if !game.is_running() {
            tracing::info!(frame = i, "quit received");
            break;
        }
    }
    sink
}

fn report_frame(game: &Game, frame: &CapturedFrame, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&frame.tiles)?);
        return Ok(());
    }

    let count = |class: OverlayClass| frame.tiles.iter().filter(|d| d.class == class).count();
    println!("Frames: {}", frame.frames);
    println!("Tiles: {}", frame.tiles.len());
    println!("Selected: {}", count(OverlayClass::Selected));
    println!("Reachable: {}", count(OverlayClass::Reachable));
    println!("Hover: {}", count(OverlayClass::Hover));
    println!("Labels: {}", frame.labels.len());
    for unit in game.world().units() {
        println!("Unit {:?} at ({}, {})", unit.id, unit.pos.q, unit.pos.r);
    }
    let cam = game.camera();
    println!("Camera: offset=({:.1}, {:.1}) zoom={:.2}", cam.offset_x, cam.offset_y, cam.zoom);
    Ok(())
}

// ============================================================================
// LEVEL 3 - BACKEND STAND-INS
// ============================================================================

struct ScriptedEvents(VecDeque<InputEvent>);

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.0.pop_front()
    }
}

/// Keeps only the most recent frame
#[derive(Debug, Default)]
pub(crate) struct CapturedFrame {
    frames: usize,
    tiles: Vec<TileDescriptor>,
    labels: Vec<DebugLabel>,
}

impl TileSink for CapturedFrame {
    fn set_tiles(&mut self, tiles: &[TileDescriptor]) {
        self.frames += 1;
        self.tiles = tiles.to_vec();
    }

    fn clear_tiles(&mut self) {
        self.frames += 1;
        self.tiles.clear();
    }

    fn set_debug_labels(&mut self, labels: &[DebugLabel]) {
        self.labels = labels.to_vec();
    }
}

// ============================================================================
// TESTS
// ============================================================================
