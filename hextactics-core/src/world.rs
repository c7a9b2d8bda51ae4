//! World grid: tiles keyed by hex, a unit arena, and map generation

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::board::{hexagon, Hex};
use crate::error::WorldError;
use crate::kinds::{Registry, TerrainId, UnitKindId};
use crate::reach::reachable;
use rand::{RngCore, SeedableRng};

use crate::rng::{unit_draw, Lcg};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Hexes forced to grass after generation so the spawn area is walkable
pub const SPAWN_AREA: [Hex; 3] = [Hex::new(0, 0), Hex::new(1, -1), Hex::new(0, -1)];

/// Rows at or above this r are always water
const NORTH_SEA_ROW: i32 = -3;

/// Random rolls below this become water
const WATER_CHANCE: f64 = 0.12;

/// Random rolls below this (and not water) become mountain
const MOUNTAIN_CHANCE: f64 = 0.22;

// ============================================================================
// CORE TYPES
// ============================================================================

/// Handle into the world's unit arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// One map cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub hex: Hex,
    pub terrain: TerrainId,
    pub occupant: Option<UnitId>,
}

/// A unit on the map
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKindId,
    pub pos: Hex,
}

impl Unit {
    pub fn move_range(&self, registry: &Registry) -> u32 {
        registry.unit_kind(self.kind).map_or(0, |k| k.move_range)
    }
}

/// Terrain ids the generator needs, resolved once by name
#[derive(Clone, Copy, Debug)]
struct Palette {
    grass: TerrainId,
    water: TerrainId,
    mountain: TerrainId,
}

impl Palette {
    fn resolve(registry: &Registry) -> Result<Self, WorldError> {
        Ok(Self {
            grass: registry.require_terrain("grass")?,
            water: registry.require_terrain("water")?,
            mountain: registry.require_terrain("mountain")?,
        })
    }

    /// Rules are checked in order; only the last one consumes a draw.
    fn pick<R: RngCore + ?Sized>(&self, hex: Hex, radius: i32, rng: &mut R) -> TerrainId {
        if hex.r <= NORTH_SEA_ROW {
            return self.water;
        }
        if hex.q + hex.r > radius - 1 {
            return self.mountain;
        }
        if hex.q.abs() <= 1 && hex.r.abs() <= 1 {
            return self.grass;
        }
        let roll = unit_draw(rng);
        if roll < WATER_CHANCE {
            self.water
        } else if roll < MOUNTAIN_CHANCE {
            self.mountain
        } else {
            self.grass
        }
    }
}

// ============================================================================
// WORLD
// ============================================================================

/// Hexagonal map of tiles plus the units standing on them.
///
/// Occupancy is only changed by `spawn_unit`, `move_unit` and `remove_unit`,
/// which keep `Tile::occupant` and `Unit::pos` pointing at each other.
#[derive(Clone, Debug)]
pub struct World {
    radius: u32,
    /// Tiles in generation order
    tiles: Vec<Tile>,
    index: FxHashMap<Hex, usize>,
    units: Vec<Option<Unit>>,
}

impl World {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Every hex within `radius` gets the same terrain
    pub fn uniform(radius: u32, terrain: TerrainId) -> Self {
        Self::from_fn(radius, |_| terrain)
    }

    /// Generate the seeded map
    pub fn generate(registry: &Registry, radius: u32, seed: u64) -> Result<Self, WorldError> {
        let world = Self::generate_with(registry, radius, &mut Lcg::seed_from_u64(seed))?;
        tracing::debug!(radius, seed, tiles = world.len(), "generated world");
        Ok(world)
    }

    /// Generate with any random source; draws are taken in `hexagon` order
    pub fn generate_with<R: RngCore + ?Sized>(
        registry: &Registry,
        radius: u32,
        rng: &mut R,
    ) -> Result<Self, WorldError> {
        let palette = Palette::resolve(registry)?;
        let r = radius as i32;

        let mut world = Self::from_fn(radius, |hex| palette.pick(hex, r, rng));
        for hex in SPAWN_AREA {
            world.set_terrain(hex, palette.grass);
        }
        Ok(world)
    }

    fn from_fn(radius: u32, mut terrain_at: impl FnMut(Hex) -> TerrainId) -> Self {
        let cells = hexagon(radius);
        let mut tiles = Vec::with_capacity(cells.len());
        let mut index = FxHashMap::default();
        for hex in cells {
            index.insert(hex, tiles.len());
            tiles.push(Tile {
                hex,
                terrain: terrain_at(hex),
                occupant: None,
            });
        }
        Self {
            radius,
            tiles,
            index,
            units: Vec::new(),
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.index.contains_key(&hex)
    }

    pub fn tile(&self, hex: Hex) -> Option<&Tile> {
        self.index.get(&hex).map(|&i| &self.tiles[i])
    }

    /// Tiles in generation order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize).and_then(Option::as_ref)
    }

    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().flatten()
    }

    pub fn unit_at(&self, hex: Hex) -> Option<UnitId> {
        self.tile(hex).and_then(|t| t.occupant)
    }

    /// Rewrite a tile's terrain. Returns false for hexes outside the world.
    pub fn set_terrain(&mut self, hex: Hex, terrain: TerrainId) -> bool {
        match self.index.get(&hex) {
            Some(&i) => {
                self.tiles[i].terrain = terrain;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // OCCUPANCY
    // ========================================================================

    /// Can `unit` stand on `hex`? A unit never blocks itself.
    pub fn is_passable_for(&self, registry: &Registry, hex: Hex, unit: UnitId) -> bool {
        let Some(tile) = self.tile(hex) else {
            return false;
        };
        if !registry.terrain(tile.terrain).is_some_and(|t| t.passable) {
            return false;
        }
        match tile.occupant {
            Some(other) => other == unit,
            None => true,
        }
    }

    /// Place a new unit. The target must be in the world and empty.
    pub fn spawn_unit(&mut self, kind: UnitKindId, at: Hex) -> Result<UnitId, WorldError> {
        let &i = self.index.get(&at).ok_or(WorldError::OffGrid(at))?;
        if self.tiles[i].occupant.is_some() {
            return Err(WorldError::Occupied(at));
        }

        let id = UnitId(self.units.len() as u32);
        self.units.push(Some(Unit { id, kind, pos: at }));
        self.tiles[i].occupant = Some(id);
        tracing::debug!(?id, q = at.q, r = at.r, "spawned unit");
        Ok(id)
    }

    /// Take a unit off the map, freeing its tile
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let unit = self.units.get_mut(id.0 as usize)?.take()?;
        if let Some(&i) = self.index.get(&unit.pos) {
            self.tiles[i].occupant = None;
        }
        Some(unit)
    }

    /// Move `unit` to `target` if a fresh reachability search allows it.
    ///
    /// Returns false and leaves the world untouched otherwise.
    pub fn move_unit(&mut self, registry: &Registry, unit: UnitId, target: Hex) -> bool {
        let Some(origin) = self.unit(unit).map(|u| u.pos) else {
            return false;
        };
        let Some(&target_idx) = self.index.get(&target) else {
            return false;
        };
        if !reachable(self, registry, unit).contains(&target)
            || !self.is_passable_for(registry, target, unit)
        {
            tracing::trace!(?unit, q = target.q, r = target.r, "move rejected");
            return false;
        }

        if let Some(&origin_idx) = self.index.get(&origin) {
            self.tiles[origin_idx].occupant = None;
        }
        if let Some(Some(u)) = self.units.get_mut(unit.0 as usize) {
            u.pos = target;
        }
        self.tiles[target_idx].occupant = Some(unit);

        tracing::debug!(?unit, from = ?origin, to = ?target, "moved unit");
        true
    }

    /// Check that every unit and the tile claiming it agree on position
    pub fn occupancy_consistent(&self) -> bool {
        let tiles_ok = self.tiles.iter().all(|t| match t.occupant {
            Some(id) => self.unit(id).is_some_and(|u| u.pos == t.hex),
            None => true,
        });
        let units_ok = self.units().all(|u| {
            self.tiles
                .iter()
                .filter(|t| t.occupant == Some(u.id))
                .count()
                == 1
                && self.unit_at(u.pos) == Some(u.id)
        });
        let index_ok = self
            .index
            .iter()
            .all(|(hex, &i)| self.tiles[i].hex == *hex);
        tiles_ok && units_ok && index_ok
    }
}
