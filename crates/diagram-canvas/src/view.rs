//! # Viewport System
//!
//! World/screen coordinate mathematics for the infinite canvas. World space
//! is where node positions live; screen space is window pixels.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The camera: pan offset plus zoom factor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Transform {
    /// Translation of the canvas. Positive moves content right/down.
    pub pan: Vec2,
    /// Scale factor: 1.0 = 100%, above 1.0 zoomed in.
    pub zoom: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

/// Camera transform plus viewport size. Single source of truth for
/// coordinate conversion.
pub struct View {
    pub transform: Transform,
    /// Size of the visible area in pixels.
    pub viewport_size: Vec2,
}

impl View {
    pub fn new(transform: Transform, viewport_size: Vec2) -> Self {
        Self {
            transform,
            viewport_size,
        }
    }

    /// `Screen = World * Zoom + Pan`
    pub fn world_to_screen(&self, world_pos: Vec2) -> Vec2 {
        (world_pos * self.transform.zoom) + self.transform.pan
    }

    /// `World = (Screen - Pan) / Zoom`
    pub fn screen_to_world(&self, screen_pos: Vec2) -> Vec2 {
        (screen_pos - self.transform.pan) / self.transform.zoom
    }

    /// The world-space bounds currently visible, as `(min, max)`.
    pub fn visible_world_bounds(&self, screen_size: Vec2) -> (Vec2, Vec2) {
        let a = self.screen_to_world(Vec2::ZERO);
        let b = self.screen_to_world(screen_size);
        (a.min(b), a.max(b))
    }
}
