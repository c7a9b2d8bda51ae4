//! Per-frame render descriptors

use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::kinds::{Registry, Rgba};
use crate::selection::{Controller, Selection};
use crate::world::{Tile, World};

pub const SELECTED_TINT: Rgba = Rgba::new(255, 234, 150, 135);
pub const REACHABLE_TINT: Rgba = Rgba::new(120, 215, 255, 105);
pub const HOVER_TINT: Rgba = Rgba::new(255, 255, 255, 75);

/// Slot value for "no texture"
pub const UNBOUND_SLOT: i32 = -1;

/// Labels are emitted for tiles on multiples of this along either axis
const LABEL_STRIDE: i32 = 5;
const LABEL_MAX_LEN: usize = 15;

/// Which tint a tile gets this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayClass {
    Selected,
    Reachable,
    Hover,
    Base,
}

/// One tile as the renderer sees it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    pub hex: Hex,
    pub terrain_slot: i32,
    pub unit_slot: i32,
    pub class: OverlayClass,
    pub overlay: Rgba,
}

/// Coordinate text drawn over a tile to debug layout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugLabel {
    pub hex: Hex,
    pub text: String,
}

/// Overlay priority: selected, then reachable, then hover, then terrain
pub fn classify(hex: Hex, world: &World, selection: &Selection, hover: Option<Hex>) -> OverlayClass {
    let selected_pos = selection
        .unit()
        .and_then(|id| world.unit(id))
        .map(|u| u.pos);
    if selected_pos == Some(hex) {
        OverlayClass::Selected
    } else if selection.is_reachable(hex) {
        OverlayClass::Reachable
    } else if hover == Some(hex) {
        OverlayClass::Hover
    } else {
        OverlayClass::Base
    }
}

fn describe(tile: &Tile, class: OverlayClass, world: &World, registry: &Registry) -> TileDescriptor {
    let unit_slot = tile
        .occupant
        .and_then(|id| world.unit(id))
        .map_or(UNBOUND_SLOT, |u| registry.unit_slot(u.kind));
    let overlay = match class {
        OverlayClass::Selected => SELECTED_TINT,
        OverlayClass::Reachable => REACHABLE_TINT,
        OverlayClass::Hover => HOVER_TINT,
        OverlayClass::Base => registry
            .terrain(tile.terrain)
            .map_or(Rgba::TRANSPARENT, |t| t.overlay),
    };
    TileDescriptor {
        hex: tile.hex,
        terrain_slot: registry.terrain_slot(tile.terrain),
        unit_slot,
        class,
        overlay,
    }
}

/// Descriptors for every tile, in world order
pub fn build_snapshot(world: &World, registry: &Registry, controller: &Controller) -> Vec<TileDescriptor> {
    world
        .tiles()
        .map(|tile| {
            let class = classify(tile.hex, world, controller.selection(), controller.hover());
            describe(tile, class, world, registry)
        })
        .collect()
}

pub fn debug_labels(world: &World) -> Vec<DebugLabel> {
    world
        .tiles()
        .filter(|t| t.hex.q % LABEL_STRIDE == 0 || t.hex.r % LABEL_STRIDE == 0)
        .map(|t| {
            let mut text = format!("{},{}", t.hex.q, t.hex.r);
            text.truncate(LABEL_MAX_LEN);
            DebugLabel { hex: t.hex, text }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::{TextureBinder, Unbound};
    use crate::selection::InputEvent;

    struct BindAll;

    impl TextureBinder for BindAll {
        fn load_texture(&mut self, _slot: i32, _path: &str) -> bool {
            true
        }
    }

    fn setup() -> (Registry, World, Controller) {
        let mut reg = Registry::builtin();
        reg.bind_textures(&mut BindAll);
        let grass = reg.terrain_id("grass").unwrap();
        let scout = reg.unit_kind_id("scout").unwrap();
        let mut world = World::uniform(5, grass);
        world.spawn_unit(scout, Hex::ORIGIN).unwrap();
        (reg, world, Controller::new())
    }

    fn descriptor(snapshot: &[TileDescriptor], hex: Hex) -> TileDescriptor {
        *snapshot.iter().find(|d| d.hex == hex).unwrap()
    }

    #[test]
    fn test_one_descriptor_per_tile() {
        let (reg, world, ctl) = setup();
        let snap = build_snapshot(&world, &reg, &ctl);
        assert_eq!(snap.len(), world.len());
        assert!(snap.iter().all(|d| d.class == OverlayClass::Base));
        assert_eq!(descriptor(&snap, Hex::ORIGIN).unit_slot, 10);
        assert_eq!(descriptor(&snap, Hex::new(1, 0)).unit_slot, UNBOUND_SLOT);
        assert_eq!(descriptor(&snap, Hex::new(1, 0)).terrain_slot, 0);
        assert_eq!(descriptor(&snap, Hex::new(1, 0)).overlay, Rgba::TRANSPARENT);
    }

    #[test]
    fn test_unbound_textures_use_sentinel() {
        let mut reg = Registry::builtin();
        reg.bind_textures(&mut Unbound);
        let grass = reg.terrain_id("grass").unwrap();
        let scout = reg.unit_kind_id("scout").unwrap();
        let mut world = World::uniform(1, grass);
        world.spawn_unit(scout, Hex::ORIGIN).unwrap();
        let snap = build_snapshot(&world, &reg, &Controller::new());
        assert!(snap.iter().all(|d| d.terrain_slot == UNBOUND_SLOT && d.unit_slot == UNBOUND_SLOT));
    }

    #[test]
    fn test_reachable_beats_hover() {
        let (reg, mut world, mut ctl) = setup();
        ctl.handle_event(InputEvent::LeftClick { hex: Hex::ORIGIN }, &mut world, &reg);
        ctl.handle_event(InputEvent::Hover { hex: Hex::new(1, 0) }, &mut world, &reg);
        let snap = build_snapshot(&world, &reg, &ctl);
        let d = descriptor(&snap, Hex::new(1, 0));
        assert_eq!(d.class, OverlayClass::Reachable);
        assert_eq!(d.overlay, REACHABLE_TINT);
    }

    #[test]
    fn test_selected_beats_hover() {
        let (reg, mut world, mut ctl) = setup();
        ctl.handle_event(InputEvent::LeftClick { hex: Hex::ORIGIN }, &mut world, &reg);
        ctl.handle_event(InputEvent::Hover { hex: Hex::ORIGIN }, &mut world, &reg);
        let snap = build_snapshot(&world, &reg, &ctl);
        let d = descriptor(&snap, Hex::ORIGIN);
        assert_eq!(d.class, OverlayClass::Selected);
        assert_eq!(d.overlay, SELECTED_TINT);
    }

    #[test]
    fn test_hover_outside_reach() {
        let (reg, mut world, mut ctl) = setup();
        ctl.handle_event(InputEvent::LeftClick { hex: Hex::ORIGIN }, &mut world, &reg);
        ctl.handle_event(InputEvent::Hover { hex: Hex::new(0, 5) }, &mut world, &reg);
        let snap = build_snapshot(&world, &reg, &ctl);
        assert_eq!(descriptor(&snap, Hex::new(0, 5)).overlay, HOVER_TINT);
        let counts = |class: OverlayClass| snap.iter().filter(|d| d.class == class).count();
        assert_eq!(counts(OverlayClass::Selected), 1);
        assert_eq!(counts(OverlayClass::Reachable), 36);
        assert_eq!(counts(OverlayClass::Hover), 1);
    }

    #[test]
    fn test_debug_labels() {
        let (_, world, _) = setup();
        let labels = debug_labels(&world);
        assert!(labels.iter().any(|l| l.hex == Hex::new(-5, 3) && l.text == "-5,3"));
        assert!(labels.iter().any(|l| l.hex == Hex::ORIGIN && l.text == "0,0"));
        assert!(labels.iter().all(|l| l.hex.q % 5 == 0 || l.hex.r % 5 == 0));
        assert!(!labels.iter().any(|l| l.hex == Hex::new(1, 1)));
    }
}
