//! Game session and frame loop

use crate::board::Hex;
use crate::camera::Camera;
use crate::config::GameConfig;
use crate::error::WorldError;
use crate::kinds::{Registry, TextureBinder};
use crate::selection::{Controller, Effect, InputEvent};
use crate::snapshot::{build_snapshot, debug_labels, DebugLabel, TileDescriptor};
use crate::world::{UnitId, World};

// ============================================================================
// BACKEND SEAMS
// ============================================================================

/// Decoded input from the window backend
pub trait EventSource {
    /// Next pending event, or `None` once the queue is drained for this frame
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// Receives the frame's tiles
pub trait TileSink {
    fn set_tiles(&mut self, tiles: &[TileDescriptor]);
    fn clear_tiles(&mut self);
    fn set_debug_labels(&mut self, labels: &[DebugLabel]);
}

// ============================================================================
// GAME
// ============================================================================

/// Owns everything the simulation needs; no global state.
#[derive(Clone, Debug)]
pub struct Game {
    config: GameConfig,
    registry: Registry,
    world: World,
    controller: Controller,
    camera: Camera,
    running: bool,
}

impl Game {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Bind textures, generate the map and drop the starting unit at the origin
    pub fn new(config: GameConfig, binder: &mut dyn TextureBinder) -> Result<Self, WorldError> {
        Self::with_registry(config, Registry::builtin(), binder)
    }

    pub fn with_registry(
        config: GameConfig,
        mut registry: Registry,
        binder: &mut dyn TextureBinder,
    ) -> Result<Self, WorldError> {
        let spawn_kind = registry.require_unit_kind(&config.world.spawn_kind)?;
        registry.bind_textures(binder);

        let mut world = World::generate(&registry, config.world.radius, config.world.seed)?;
        world.spawn_unit(spawn_kind, Hex::ORIGIN)?;

        let camera = Camera::new(config.camera.clone());
        tracing::info!(
            radius = config.world.radius,
            seed = config.world.seed,
            tiles = world.len(),
            "game initialized"
        );

        Ok(Self {
            config,
            registry,
            world,
            controller: Controller::new(),
            camera,
            running: true,
        })
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn selected_unit(&self) -> Option<UnitId> {
        self.controller.selection().unit()
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    pub fn handle_event(&mut self, event: InputEvent) {
        match self
            .controller
            .handle_event(event, &mut self.world, &self.registry)
        {
            Some(Effect::Quit) => self.running = false,
            Some(Effect::Zoom(factor)) => self.camera.zoom_by(factor),
            None => {}
        }
    }

    pub fn remove_unit(&mut self, id: UnitId) -> bool {
        let removed = self.world.remove_unit(id).is_some();
        self.controller.forget_missing_units(&self.world);
        removed
    }

    /// Zoom so the whole map fits a `view_w` x `view_h` viewport
    pub fn fit_camera(&mut self, view_w: f32, view_h: f32) {
        let extent = (self.config.world.radius * 2 + 1) as f32;
        let size = self.config.world.hex_size;
        let grid_w = 1.5 * (extent - 1.0) * size + 2.0 * size;
        let grid_h = 3.0f32.sqrt() * size * (extent + 0.5) + size;
        self.camera.fit(grid_w, grid_h, view_w, view_h);
    }

    /// Advance time-based state
    pub fn update(&mut self, dt: f32) {
        self.camera.update(dt, self.controller.pressed_keys());
    }

    pub fn snapshot(&self) -> Vec<TileDescriptor> {
        build_snapshot(&self.world, &self.registry, &self.controller)
    }

    /// One frame: drain input, advance the camera, hand tiles to the sink
    pub fn frame(&mut self, dt: f32, events: &mut dyn EventSource, sink: &mut dyn TileSink) {
        while let Some(event) = events.poll_event() {
            self.handle_event(event);
        }

        self.update(dt);

        let tiles = self.snapshot();
        if tiles.is_empty() {
            sink.clear_tiles();
            sink.set_debug_labels(&[]);
            return;
        }
        sink.set_tiles(&tiles);
        sink.set_debug_labels(&debug_labels(&self.world));
    }
}
