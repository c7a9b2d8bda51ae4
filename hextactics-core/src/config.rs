//! Game configuration
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Map generation parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Hexagon radius of the map
    pub radius: u32,
    /// Hex size in pixels, handed to the renderer
    pub hex_size: f32,
    /// LCG seed for terrain generation
    pub seed: u64,
    /// Unit kind placed at the origin on startup
    pub spawn_kind: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            hex_size: 48.0,
            seed: 42,
            spawn_kind: "scout".to_string(),
        }
    }
}

/// Camera pan/zoom limits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Pixels per second at zoom 1.0
    pub pan_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            pan_speed: 320.0,
            min_zoom: 0.4,
            max_zoom: 3.5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub camera: CameraConfig,
}

impl GameConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
