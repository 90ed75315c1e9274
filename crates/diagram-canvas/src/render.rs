//! # Rendering Surface
//!
//! The editor never draws pixels. It emits a display list of `DrawCommand`s
//! in screen space; the host (egui, canvas 2D, wgpu, ...) interprets them.
//! Quadratic segments are degree-elevated to cubics before they reach this
//! vocabulary, so hosts only need one curve primitive.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

/// A single drawing primitive. Coordinates are in **screen space** (pixels).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum DrawCommand {
    /// A filled rounded rectangle with an optional stroke.
    Rect {
        /// Top-left position in screen pixels.
        pos: Vec2,
        size: Vec2,
        /// Fill color (RGBA, 0.0 - 1.0).
        color: Vec4,
        corner_radius: f32,
        stroke_width: f32,
        stroke_color: Option<Vec4>,
    },
    /// A straight line segment.
    Line {
        start: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// A circle: ring when `filled` is false (ERD source marker), dot when
    /// true (ERD target marker).
    Circle {
        center: Vec2,
        radius: f32,
        color: Vec4,
        filled: bool,
        stroke_width: f32,
    },
    /// A filled triangle, used for arrowheads.
    Triangle { points: [Vec2; 3], color: Vec4 },
    /// A cubic Bezier curve.
    Bezier {
        start: Vec2,
        cp1: Vec2,
        cp2: Vec2,
        end: Vec2,
        color: Vec4,
        width: f32,
    },
    /// Text; layout and font fall to the host.
    Text {
        /// Anchor position in screen pixels (horizontal center).
        pos: Vec2,
        text: String,
        color: Vec4,
        /// Font size in pixels (approximate).
        size: f32,
    },
}

/// A list of draw commands representing the current frame.
pub type RenderList = Vec<DrawCommand>;
