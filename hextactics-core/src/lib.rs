//! HEXTACTICS Core - Hex grid world and movement engine
//!
//! This crate provides the simulation behind the hex tactics board:
//! - Board geometry (hex grid with axial coordinates)
//! - Terrain and unit types
//! - Seeded world generation and unit occupancy
//! - Movement reachability search
//! - Input-driven selection and movement
//! - Render snapshots for an external backend

pub mod board;
pub mod camera;
pub mod config;
pub mod error;
pub mod game;
pub mod kinds;
pub mod reach;
pub mod rng;
pub mod selection;
pub mod snapshot;
pub mod world;

// Re-exports for convenient access
pub use board::{hexagon, ring, Hex, DIRECTIONS};
pub use camera::Camera;
pub use config::{CameraConfig, GameConfig, WorldConfig};
pub use error::WorldError;
pub use game::{EventSource, Game, TileSink};
pub use kinds::{Registry, Rgba, TerrainId, TextureBinder, Unbound, UnitKindId};
pub use reach::reachable;
pub use rng::Lcg;
pub use selection::{Controller, InputEvent, KeyCode, Selection};
pub use snapshot::{build_snapshot, debug_labels, DebugLabel, OverlayClass, TileDescriptor};
pub use world::{Tile, Unit, UnitId, World};
