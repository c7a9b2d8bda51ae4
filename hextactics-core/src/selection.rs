//! Input events and the selection state machine

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::Hex;
use crate::kinds::Registry;
use crate::reach::reachable;
use crate::world::{UnitId, World};

// ============================================================================
// INPUT
// ============================================================================

/// Backend key code (SDL keycode values)
pub type KeyCode = i32;

pub const KEY_W: KeyCode = b'w' as KeyCode;
pub const KEY_A: KeyCode = b'a' as KeyCode;
pub const KEY_S: KeyCode = b's' as KeyCode;
pub const KEY_D: KeyCode = b'd' as KeyCode;
pub const KEY_MINUS: KeyCode = 45;
pub const KEY_EQUALS: KeyCode = 61;
pub const KEY_KP_MINUS: KeyCode = 1_073_741_910;
pub const KEY_KP_PLUS: KeyCode = 1_073_741_911;

const ZOOM_OUT_FACTOR: f32 = 0.9;
const ZOOM_IN_FACTOR: f32 = 1.1;

/// A decoded input event from the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    Quit,
    LeftClick { hex: Hex },
    RightClick { hex: Hex },
    Hover { hex: Hex },
    KeyDown { key: KeyCode },
    KeyUp { key: KeyCode },
}

/// Side effect of an event outside the selection state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Quit,
    Zoom(f32),
}

// ============================================================================
// SELECTION
// ============================================================================

/// What the player has selected. The reachable set only exists while a
/// unit is selected and is rebuilt whenever that unit changes or moves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    UnitSelected {
        unit: UnitId,
        reachable: FxHashSet<Hex>,
    },
}

impl Selection {
    fn select(world: &World, registry: &Registry, unit: UnitId) -> Self {
        Selection::UnitSelected {
            unit,
            reachable: reachable(world, registry, unit),
        }
    }

    pub fn unit(&self) -> Option<UnitId> {
        match self {
            Selection::Idle => None,
            Selection::UnitSelected { unit, .. } => Some(*unit),
        }
    }

    pub fn is_reachable(&self, hex: Hex) -> bool {
        match self {
            Selection::Idle => false,
            Selection::UnitSelected { reachable, .. } => reachable.contains(&hex),
        }
    }

    pub fn reachable(&self) -> Option<&FxHashSet<Hex>> {
        match self {
            Selection::Idle => None,
            Selection::UnitSelected { reachable, .. } => Some(reachable),
        }
    }
}

/// Selection, hover and held keys, driven one event at a time
#[derive(Clone, Debug, Default)]
pub struct Controller {
    selection: Selection,
    hover: Option<Hex>,
    pressed_keys: FxHashSet<KeyCode>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn hover(&self) -> Option<Hex> {
        self.hover
    }

    pub fn pressed_keys(&self) -> &FxHashSet<KeyCode> {
        &self.pressed_keys
    }

    /// Apply one event. Invalid input is ignored rather than reported.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        world: &mut World,
        registry: &Registry,
    ) -> Option<Effect> {
        match event {
            InputEvent::Quit => return Some(Effect::Quit),
            InputEvent::LeftClick { hex } => self.left_click(hex, world, registry),
            InputEvent::RightClick { hex } => self.right_click(hex, world, registry),
            InputEvent::Hover { hex } => {
                self.hover = world.contains(hex).then_some(hex);
            }
            InputEvent::KeyDown { key } => {
                self.pressed_keys.insert(key);
                return zoom_for_key(key).map(Effect::Zoom);
            }
            InputEvent::KeyUp { key } => {
                self.pressed_keys.remove(&key);
            }
        }
        None
    }

    /// Select whatever unit stands on `hex`; anything else clears the selection.
    fn left_click(&mut self, hex: Hex, world: &World, registry: &Registry) {
        self.selection = match world.unit_at(hex) {
            Some(unit) => {
                tracing::debug!(?unit, q = hex.q, r = hex.r, "selected unit");
                Selection::select(world, registry, unit)
            }
            None => Selection::Idle,
        };
    }

    /// Move the selected unit. Never changes which unit is selected.
    fn right_click(&mut self, hex: Hex, world: &mut World, registry: &Registry) {
        let Selection::UnitSelected { unit, reachable } = &self.selection else {
            return;
        };
        let unit = *unit;
        if !world.contains(hex)
            || !reachable.contains(&hex)
            || !world.is_passable_for(registry, hex, unit)
        {
            return;
        }
        if world.move_unit(registry, unit, hex) {
            self.selection = Selection::select(world, registry, unit);
        }
    }

    /// Drop the selection if its unit has left the world
    pub fn forget_missing_units(&mut self, world: &World) {
        if let Some(unit) = self.selection.unit() {
            if world.unit(unit).is_none() {
                self.selection = Selection::Idle;
            }
        }
    }
}

fn zoom_for_key(key: KeyCode) -> Option<f32> {
    match key {
        KEY_MINUS | KEY_KP_MINUS => Some(ZOOM_OUT_FACTOR),
        KEY_EQUALS | KEY_KP_PLUS => Some(ZOOM_IN_FACTOR),
        _ => None,
    }
}
