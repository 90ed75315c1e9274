//! # Default Layout Policy
//!
//! Chooses the default position for a newly added node from the diagram kind
//! and the current node count. Deliberately not a force-directed layout:
//! placement is additive and deterministic, existing nodes never move, and
//! manual dragging is the only way to resolve overlaps after many inserts.

use glam::Vec2;

use crate::config::LayoutProfile;
use crate::model::DiagramKind;

/// Default position for the `node_count`-th node (0-based). First matching
/// rule wins:
///
/// 1. Sequence: actor lanes left-to-right in creation order.
/// 2. First mind-map node: the fixed hub coordinate.
/// 3. First node of any other kind: the fixed top-left default.
/// 4. Otherwise: grid placement with per-kind column count and pitch.
pub fn default_position(kind: DiagramKind, node_count: usize, profile: &LayoutProfile) -> Vec2 {
    match kind {
        DiagramKind::Sequence => Vec2::new(
            node_count as f32 * profile.lane_spacing + profile.margin,
            profile.top_margin,
        ),
        DiagramKind::MindMap if node_count == 0 => profile.center,
        _ if node_count == 0 => profile.first_position,
        _ => {
            let col = node_count % profile.columns;
            let row = node_count / profile.columns;
            Vec2::new(
                col as f32 * profile.col_spacing + profile.margin,
                row as f32 * profile.row_spacing + profile.margin,
            )
        }
    }
}
