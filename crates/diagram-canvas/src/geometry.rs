//! # Edge Geometry
//!
//! Pure path and label-anchor computation for edges. Everything here is a
//! function of the two endpoint nodes, the diagram kind, and (for sequence
//! diagrams) the edge's creation ordinal. No graph access, no side effects;
//! the painter turns the result into draw commands.

use glam::Vec2;

use crate::model::{DiagramKind, Node};

/// Vertical gap between the lower endpoint and the first sequence message row.
pub const SEQUENCE_BASE_GAP: f32 = 40.0;
/// Vertical pitch between consecutive sequence message rows.
pub const SEQUENCE_ROW_HEIGHT: f32 = 36.0;

/// Cap on the horizontal control-point offset of mind-map wires.
const MINDMAP_MAX_CONTROL: f32 = 150.0;
/// Distance from the label anchor to the delete affordance.
const DELETE_OFFSET: f32 = 18.0;

/// The path shape of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgePath {
    /// Two quadratic bends through the shared midpoint (flowchart,
    /// architecture, component).
    SCurve {
        start: Vec2,
        c1: Vec2,
        mid: Vec2,
        c2: Vec2,
        end: Vec2,
    },
    /// A straight segment (ERD).
    Straight { start: Vec2, end: Vec2 },
    /// A cubic Bezier with horizontally offset control points (mind map).
    Cubic {
        start: Vec2,
        cp1: Vec2,
        cp2: Vec2,
        end: Vec2,
    },
    /// A horizontal message row between two lifelines (sequence).
    Lifeline { start: Vec2, end: Vec2 },
}

/// End decorations per diagram kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndMarkers {
    /// Filled arrowhead at the target.
    Arrowhead,
    /// Ring at the source end, filled dot at the target end.
    CrowsFootLite,
    /// Bare stroke.
    None,
}

/// The full geometric description of one edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeGeometry {
    pub path: EdgePath,
    /// Where the label is drawn, when present.
    pub label_anchor: Vec2,
    /// Where the hover-only delete affordance sits, just past the label.
    pub delete_anchor: Vec2,
    pub markers: EndMarkers,
}

/// Computes the path and label anchor for an edge.
///
/// Anchors are the bottom-center of the source and the top-center of the
/// target, except sequence diagrams, which run horizontally between lifeline
/// center columns. `seq_index` is the edge's ordinal among the diagram's
/// edges and only affects sequence row placement.
pub fn edge_geometry(source: &Node, target: &Node, kind: DiagramKind, seq_index: usize) -> EdgeGeometry {
    let s = source.bottom_center();
    let t = target.top_center();
    let mid = (s + t) * 0.5;

    match kind {
        DiagramKind::Flowchart | DiagramKind::Architecture | DiagramKind::Component => EdgeGeometry {
            path: EdgePath::SCurve {
                start: s,
                c1: Vec2::new(s.x, mid.y),
                mid,
                c2: Vec2::new(t.x, mid.y),
                end: t,
            },
            label_anchor: mid,
            delete_anchor: mid + Vec2::new(DELETE_OFFSET, 0.0),
            markers: EndMarkers::Arrowhead,
        },
        DiagramKind::Erd => EdgeGeometry {
            path: EdgePath::Straight { start: s, end: t },
            label_anchor: mid,
            delete_anchor: mid + Vec2::new(DELETE_OFFSET, 0.0),
            markers: EndMarkers::CrowsFootLite,
        },
        DiagramKind::MindMap => {
            let (cp1, cp2) = bezier_control_points(s, t);
            EdgeGeometry {
                path: EdgePath::Cubic {
                    start: s,
                    cp1,
                    cp2,
                    end: t,
                },
                label_anchor: mid,
                delete_anchor: mid + Vec2::new(DELETE_OFFSET, 0.0),
                markers: EndMarkers::None,
            }
        }
        DiagramKind::Sequence => {
            let y = s.y.max(t.y) + SEQUENCE_BASE_GAP + seq_index as f32 * SEQUENCE_ROW_HEIGHT;
            let start = Vec2::new(source.center().x, y);
            let end = Vec2::new(target.center().x, y);
            let row_mid = (start + end) * 0.5;
            EdgeGeometry {
                path: EdgePath::Lifeline { start, end },
                label_anchor: row_mid,
                delete_anchor: row_mid + Vec2::new(DELETE_OFFSET, 0.0),
                markers: EndMarkers::Arrowhead,
            }
        }
    }
}

/// Control points for a horizontal-flow cubic wire: offset along x by half
/// the endpoint distance, capped so long wires do not balloon.
pub fn bezier_control_points(start: Vec2, end: Vec2) -> (Vec2, Vec2) {
    let control_dist = (start.distance(end) * 0.5).min(MINDMAP_MAX_CONTROL);
    let cp1 = start + Vec2::new(control_dist, 0.0);
    let cp2 = end - Vec2::new(control_dist, 0.0);
    (cp1, cp2)
}

/// Degree-elevates a quadratic Bezier to the cubic form the render command
/// set speaks. Returns the two cubic control points.
pub fn elevate_quadratic(start: Vec2, ctrl: Vec2, end: Vec2) -> (Vec2, Vec2) {
    let cp1 = start + (ctrl - start) * (2.0 / 3.0);
    let cp2 = end + (ctrl - end) * (2.0 / 3.0);
    (cp1, cp2)
}

/// An axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_elevation_preserves_endpoints_weighting() {
        let (cp1, cp2) = elevate_quadratic(Vec2::ZERO, Vec2::new(3.0, 3.0), Vec2::new(6.0, 0.0));
        assert_eq!(cp1, Vec2::new(2.0, 2.0));
        assert_eq!(cp2, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn control_offset_is_capped_for_long_wires() {
        let (cp1, _) = bezier_control_points(Vec2::ZERO, Vec2::new(10_000.0, 0.0));
        assert_eq!(cp1.x, MINDMAP_MAX_CONTROL);
    }
}
