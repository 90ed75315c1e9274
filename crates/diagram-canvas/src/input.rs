//! # Input Protocol
//!
//! The input state the host passes to the editor for every event or frame.
//! The editor is purely reactive: no timers, no background work, so a frame's
//! worth of pointer/keyboard state is all it needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// State of mouse buttons.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct MouseButtons {
    /// Left mouse button is pressed.
    pub left: bool,
    /// Right mouse button is pressed.
    pub right: bool,
    /// Middle mouse button is pressed.
    pub middle: bool,
}

/// Keyboard keys the editor reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Delete,
    Backspace,
    /// Cancels a pending link.
    Escape,
}

/// The input state for a single frame.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputState {
    /// Cursor position in screen space (pixels).
    pub mouse_pos: Vec2,
    pub mouse_buttons: MouseButtons,
    /// Vertical scroll delta this frame (positive = up).
    pub scroll_delta: f32,
    /// Keys pressed this frame.
    pub pressed_keys: Vec<Key>,
    /// Size of the canvas viewport in pixels.
    pub screen_size: Vec2,
    /// False when the pointer has left the canvas; an in-progress drag ends
    /// on the transition.
    pub pointer_inside: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            mouse_buttons: MouseButtons::default(),
            scroll_delta: 0.0,
            pressed_keys: Vec::new(),
            screen_size: Vec2::new(800.0, 600.0),
            pointer_inside: true,
        }
    }
}
