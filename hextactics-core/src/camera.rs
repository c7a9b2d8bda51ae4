//! Camera pan and zoom state
//!
//! Only the accumulated offset and zoom factor live here; projecting
//! hexes to pixels is the renderer's job.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::selection::{KeyCode, KEY_A, KEY_D, KEY_S, KEY_W};

/// Smallest zoom used when scaling pan speed
const PAN_ZOOM_FLOOR: f32 = 0.2;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,
    #[serde(skip)]
    config: CameraConfig,
}

impl Camera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            config,
        }
    }

    /// Start zoomed so that the whole map fits the viewport, never above 1.0
    pub fn fit(&mut self, content_w: f32, content_h: f32, view_w: f32, view_h: f32) {
        let fit = 1.0f32.min(view_w / content_w).min(view_h / content_h);
        self.zoom = self.clamp_zoom(fit);
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    /// Multiply zoom; the limits are applied on the next `update`
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom *= factor;
    }

    /// Pan for every held WASD key, then clamp zoom
    pub fn update(&mut self, dt: f32, keys: &FxHashSet<KeyCode>) {
        let delta = if dt > 0.0 {
            self.config.pan_speed * dt / self.zoom.max(PAN_ZOOM_FLOOR)
        } else {
            0.0
        };

        if keys.contains(&KEY_W) {
            self.offset_y += delta;
        }
        if keys.contains(&KEY_S) {
            self.offset_y -= delta;
        }
        if keys.contains(&KEY_A) {
            self.offset_x += delta;
        }
        if keys.contains(&KEY_D) {
            self.offset_x -= delta;
        }

        self.zoom = self.clamp_zoom(self.zoom);
    }

    /// Upper limit first, then lower, so inverted or NaN limits never panic
    fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.min(self.config.max_zoom).max(self.config.min_zoom)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(codes: &[KeyCode]) -> FxHashSet<KeyCode> {
        codes.iter().copied().collect()
    }

    #[test]
    fn test_pan_directions() {
        let mut cam = Camera::default();
        cam.update(0.5, &keys(&[KEY_W, KEY_D]));
        assert_eq!(cam.offset_y, 160.0);
        assert_eq!(cam.offset_x, -160.0);

        cam.update(0.5, &keys(&[KEY_S, KEY_A]));
        assert_eq!(cam.offset_y, 0.0);
        assert_eq!(cam.offset_x, 0.0);
    }

    #[test]
    fn test_pan_scales_with_zoom() {
        let mut cam = Camera::default();
        cam.zoom = 2.0;
        cam.update(1.0, &keys(&[KEY_A]));
        assert_eq!(cam.offset_x, 160.0);
    }

    #[test]
    fn test_no_movement_without_time() {
        let mut cam = Camera::default();
        cam.update(0.0, &keys(&[KEY_W]));
        cam.update(-1.0, &keys(&[KEY_W]));
        assert_eq!(cam.offset_y, 0.0);
    }

    #[test]
    fn test_zoom_clamped_on_update() {
        let mut cam = Camera::default();
        for _ in 0..40 {
            cam.zoom_by(1.1);
        }
        assert!(cam.zoom > 3.5);
        cam.update(0.0, &FxHashSet::default());
        assert_eq!(cam.zoom, 3.5);

        for _ in 0..80 {
            cam.zoom_by(0.9);
        }
        cam.update(0.0, &FxHashSet::default());
        assert_eq!(cam.zoom, 0.4);
    }

    #[test]
    fn test_inverted_zoom_limits() {
        let config = CameraConfig {
            min_zoom: 3.0,
            max_zoom: 1.0,
            ..CameraConfig::default()
        };
        let mut cam = Camera::new(config);
        cam.update(0.016, &keys(&[KEY_W]));
        assert_eq!(cam.zoom, 3.0);
        cam.fit(2000.0, 1000.0, 1000.0, 800.0);
        assert_eq!(cam.zoom, 3.0);

        let config = CameraConfig {
            min_zoom: f32::NAN,
            max_zoom: f32::NAN,
            ..CameraConfig::default()
        };
        let mut cam = Camera::new(config);
        cam.update(0.016, &FxHashSet::default());
        assert_eq!(cam.zoom, 1.0);
    }

    #[test]
    fn test_fit() {
        let mut cam = Camera::default();
        cam.fit(2000.0, 1000.0, 1000.0, 800.0);
        assert_eq!(cam.zoom, 0.5);
        cam.fit(100.0, 100.0, 1000.0, 800.0);
        assert_eq!(cam.zoom, 1.0);
    }
}
