//! Terrain and unit type definitions

use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Ids are `u8`, so at most this many kinds per table
const MAX_KINDS: usize = 256;

/// Terrain type identifier (index into the registry terrain table)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TerrainId(pub u8);

/// Unit type identifier (index into the registry unit table)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitKindId(pub u8);

/// RGBA colour with 8-bit channels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Terrain type definition
#[derive(Clone, Debug)]
pub struct TerrainKind {
    pub name: &'static str,
    pub slot: i32,
    pub texture_path: &'static str,
    /// Fill colour used when the texture has to be synthesized
    pub placeholder: (u8, u8, u8),
    pub overlay: Rgba,
    pub passable: bool,
}

impl TerrainKind {
    const fn new(
        name: &'static str,
        slot: i32,
        texture_path: &'static str,
        placeholder: (u8, u8, u8),
        passable: bool,
    ) -> Self {
        Self {
            name,
            slot,
            texture_path,
            placeholder,
            overlay: Rgba::TRANSPARENT,
            passable,
        }
    }
}

/// Unit type definition
#[derive(Clone, Debug)]
pub struct UnitKind {
    pub name: &'static str,
    pub slot: i32,
    pub texture_path: &'static str,
    pub placeholder: (u8, u8, u8),
    pub move_range: u32,
}

/// Built-in terrain types
pub static TERRAIN_DEFS: [TerrainKind; 3] = [
    TerrainKind::new("grass", 0, "assets/terrain_grass.png", (70, 145, 84), true),
    TerrainKind::new("water", 1, "assets/terrain_water.png", (58, 105, 190), false),
    TerrainKind::new("mountain", 2, "assets/terrain_mountain.png", (145, 141, 132), false),
];

/// Built-in unit types
pub static UNIT_DEFS: [UnitKind; 1] = [UnitKind {
    name: "scout",
    slot: 10,
    texture_path: "assets/unit_scout.png",
    placeholder: (220, 220, 80),
    move_range: 3,
}];

/// Source of render slots; implemented by the graphics backend.
pub trait TextureBinder {
    /// Load the texture at `path` into `slot`, returning whether it bound.
    fn load_texture(&mut self, slot: i32, path: &str) -> bool;
}

/// Binder that leaves every slot unbound (headless runs).
#[derive(Clone, Copy, Debug, Default)]
pub struct Unbound;

impl TextureBinder for Unbound {
    fn load_texture(&mut self, _slot: i32, _path: &str) -> bool {
        false
    }
}

/// Terrain and unit catalogs plus their texture binding state
#[derive(Clone, Debug)]
pub struct Registry {
    terrains: Vec<TerrainKind>,
    units: Vec<UnitKind>,
    terrain_bound: Vec<bool>,
    unit_bound: Vec<bool>,
}

impl Registry {
    /// Kinds past index 255 have no id and are never returned by lookups
    pub fn new(terrains: Vec<TerrainKind>, units: Vec<UnitKind>) -> Self {
        if terrains.len() > MAX_KINDS || units.len() > MAX_KINDS {
            tracing::warn!(
                terrains = terrains.len(),
                units = units.len(),
                "registry holds more than {} kinds; extras are unaddressable",
                MAX_KINDS
            );
        }
        let terrain_bound = vec![false; terrains.len()];
        let unit_bound = vec![false; units.len()];
        Self {
            terrains,
            units,
            terrain_bound,
            unit_bound,
        }
    }

    /// Registry hydrated from `TERRAIN_DEFS` / `UNIT_DEFS`
    pub fn builtin() -> Self {
        Self::new(TERRAIN_DEFS.to_vec(), UNIT_DEFS.to_vec())
    }

    /// Ask the backend to bind every kind's texture. Failures only leave the slot unbound.
    pub fn bind_textures(&mut self, binder: &mut dyn TextureBinder) {
        for (kind, bound) in self.terrains.iter().zip(self.terrain_bound.iter_mut()) {
            *bound = binder.load_texture(kind.slot, kind.texture_path);
            if !*bound {
                tracing::warn!("[terrain] texture load failed for {}: {}", kind.name, kind.texture_path);
            }
        }
        for (kind, bound) in self.units.iter().zip(self.unit_bound.iter_mut()) {
            *bound = binder.load_texture(kind.slot, kind.texture_path);
            if !*bound {
                tracing::warn!("[unit] texture load failed for {}: {}", kind.name, kind.texture_path);
            }
        }
    }

    /// `None` for ids that did not come from this registry
    pub fn terrain(&self, id: TerrainId) -> Option<&TerrainKind> {
        self.terrains.get(usize::from(id.0))
    }

    pub fn unit_kind(&self, id: UnitKindId) -> Option<&UnitKind> {
        self.units.get(usize::from(id.0))
    }

    pub fn terrain_id(&self, name: &str) -> Option<TerrainId> {
        self.terrains
            .iter()
            .position(|t| t.name == name)
            .and_then(|i| u8::try_from(i).ok())
            .map(TerrainId)
    }

    pub fn unit_kind_id(&self, name: &str) -> Option<UnitKindId> {
        self.units
            .iter()
            .position(|u| u.name == name)
            .and_then(|i| u8::try_from(i).ok())
            .map(UnitKindId)
    }

    /// Like `terrain_id`, for kinds the world cannot be built without
    pub fn require_terrain(&self, name: &str) -> Result<TerrainId, WorldError> {
        self.terrain_id(name)
            .ok_or_else(|| WorldError::MissingTerrain(name.to_string()))
    }

    pub fn require_unit_kind(&self, name: &str) -> Result<UnitKindId, WorldError> {
        self.unit_kind_id(name)
            .ok_or_else(|| WorldError::MissingUnitKind(name.to_string()))
    }

    /// Render slot for a terrain, or -1 if its texture never bound
    pub fn terrain_slot(&self, id: TerrainId) -> i32 {
        match (self.terrain(id), self.terrain_bound.get(usize::from(id.0))) {
            (Some(kind), Some(true)) => kind.slot,
            _ => -1,
        }
    }

    pub fn unit_slot(&self, id: UnitKindId) -> i32 {
        match (self.unit_kind(id), self.unit_bound.get(usize::from(id.0))) {
            (Some(kind), Some(true)) => kind.slot,
            _ => -1,
        }
    }

    pub fn terrains(&self) -> impl Iterator<Item = (TerrainId, &TerrainKind)> + '_ {
        self.terrains
            .iter()
            .enumerate()
            .map_while(|(i, t)| u8::try_from(i).ok().map(|i| (TerrainId(i), t)))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
