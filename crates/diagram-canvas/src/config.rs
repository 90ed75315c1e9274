//! # Configuration
//!
//! Editor tuning knobs, the per-kind layout profiles, and the visual style
//! tables the painter consults. Hosts can override any of it; the defaults
//! match the shipped product behavior.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::model::DiagramKind;

/// Configuration parameters for the editor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Multiplier for zoom speed. Default: 0.1 per scroll click.
    pub zoom_speed: f32,
    /// World-space distance a pressed pointer must travel before the press
    /// becomes a drag instead of a click. Default: 4.0.
    pub drag_threshold: f32,
    /// World-space radius around an edge label within which the delete
    /// affordance is shown and clickable. Default: 16.0.
    pub hover_radius: f32,
    /// Visual styling configuration.
    #[serde(default)]
    pub style: CanvasStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            zoom_speed: 0.1,
            drag_threshold: 4.0,
            hover_radius: 16.0,
            style: CanvasStyle::default(),
        }
    }
}

/// Default placement constants for one diagram kind.
///
/// The layout policy is deliberately simple and deterministic: lanes for
/// sequence diagrams, a fixed hub for mind maps, a grid for everything else.
/// ERD cards are wider, so they get fewer grid columns.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct LayoutProfile {
    /// Grid columns before wrapping to the next row.
    pub columns: usize,
    /// Horizontal grid pitch.
    pub col_spacing: f32,
    /// Vertical grid pitch.
    pub row_spacing: f32,
    /// Outer margin applied to grid and lane placement.
    pub margin: f32,
    /// Y coordinate of sequence actor lanes.
    pub top_margin: f32,
    /// Horizontal pitch between sequence actor lanes.
    pub lane_spacing: f32,
    /// Fixed hub coordinate for the first mind-map node.
    pub center: Vec2,
    /// Fixed top-left default for the first node of other kinds.
    pub first_position: Vec2,
    /// Default card size for new nodes.
    pub default_size: Vec2,
}

impl LayoutProfile {
    pub fn for_kind(kind: DiagramKind) -> Self {
        let base = Self {
            columns: 4,
            col_spacing: 220.0,
            row_spacing: 160.0,
            margin: 40.0,
            top_margin: 40.0,
            lane_spacing: 180.0,
            center: Vec2::new(480.0, 320.0),
            first_position: Vec2::new(80.0, 60.0),
            default_size: Vec2::new(160.0, 64.0),
        };
        match kind {
            DiagramKind::Erd => Self {
                columns: 3,
                col_spacing: 280.0,
                row_spacing: 220.0,
                default_size: Vec2::new(220.0, 140.0),
                ..base
            },
            DiagramKind::MindMap => Self {
                default_size: Vec2::new(140.0, 56.0),
                ..base
            },
            DiagramKind::Sequence => Self {
                default_size: Vec2::new(140.0, 48.0),
                ..base
            },
            _ => base,
        }
    }
}

/// Color tables for the painter. Colors are RGBA `glam::Vec4`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CanvasStyle {
    /// Background color of the canvas.
    pub background_color: glam::Vec4,
    /// Color of the grid lines.
    pub grid_color: glam::Vec4,
    /// Default style for nodes.
    #[serde(default)]
    pub node_default: NodeStyle,
    /// Default style for edges.
    #[serde(default)]
    pub edge_default: EdgeStyle,
    /// Color of edge labels and the delete affordance.
    pub label_color: glam::Vec4,
    /// Label font size in pixels at zoom 1.0.
    pub label_size: f32,
}

impl Default for CanvasStyle {
    fn default() -> Self {
        Self {
            background_color: glam::Vec4::new(0.1, 0.1, 0.1, 1.0),
            grid_color: glam::Vec4::new(0.2, 0.2, 0.2, 1.0),
            node_default: NodeStyle::default(),
            edge_default: EdgeStyle::default(),
            label_color: glam::Vec4::new(0.9, 0.9, 0.9, 1.0),
            label_size: 13.0,
        }
    }
}

/// Visual style for a node card.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeStyle {
    /// Fill color of the node.
    pub color: glam::Vec4,
    /// Border color of the node.
    pub border_color: glam::Vec4,
    /// Color of the text label.
    pub text_color: glam::Vec4,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            color: glam::Vec4::new(0.15, 0.15, 0.15, 1.0),
            border_color: glam::Vec4::new(0.5, 0.5, 0.5, 1.0),
            text_color: glam::Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Visual style for an edge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeStyle {
    /// Color of the edge stroke.
    pub color: glam::Vec4,
    /// Stroke width in screen pixels.
    pub width: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: glam::Vec4::new(0.8, 0.8, 0.8, 1.0),
            width: 2.0,
        }
    }
}
