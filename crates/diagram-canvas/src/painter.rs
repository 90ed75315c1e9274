//! # Painter
//!
//! Converts graph state plus interaction state into a `RenderList`, applying
//! the kind-specific visual policy: S-curves with arrowheads for flowcharts,
//! crow's-foot-lite markers for ERD relations, hub-weighted strokes and
//! level-scaled cards for mind maps, stacked message rows for sequence
//! diagrams, and table cards for ERD entities.

use glam::{Vec2, Vec4};

use crate::config::EditorConfig;
use crate::erd;
use crate::geometry::{self, EdgeGeometry, EdgePath, EndMarkers};
use crate::hierarchy;
use crate::interaction::{self, InteractionMode};
use crate::model::{DiagramKind, GraphState, Node, NodeFlags};
use crate::render::{DrawCommand, RenderList};
use crate::view::View;

const GRID_SIZE: f32 = 100.0;
const ARROW_LENGTH: f32 = 10.0;
const ARROW_HALF_WIDTH: f32 = 5.0;
const ERD_MARKER_RADIUS: f32 = 5.0;
const ERD_TITLE_HEIGHT: f32 = 28.0;
const ERD_ROW_HEIGHT: f32 = 20.0;
/// Stroke multiplier for mind-map wires touching the hub.
const HUB_STROKE_BOOST: f32 = 1.8;

/// High-level renderer for the diagram canvas.
pub struct Painter;

impl Painter {
    /// Generates the draw commands for the whole frame.
    pub fn draw_graph(
        view: &View,
        config: &EditorConfig,
        graph: &GraphState,
        mode: &InteractionMode,
        mouse_pos: Vec2,
    ) -> RenderList {
        let mut draw_list = Vec::new();
        let style = &config.style;
        let zoom = view.transform.zoom;

        Self::draw_grid(view, style, &mut draw_list);

        let levels = (graph.kind == DiagramKind::MindMap).then(|| hierarchy::levels(graph));
        let hub = graph.hub_node();
        let mouse_world = view.screen_to_world(mouse_pos);
        let hovered_edge = interaction::edge_delete_target(graph, mouse_world, config.hover_radius);

        // Edges first (behind nodes).
        for (idx, &eid) in graph.edge_order.iter().enumerate() {
            let Some(edge) = graph.edges.get(eid) else {
                continue;
            };
            // Dangling references are skipped at render time.
            let (Some(source), Some(target)) =
                (graph.nodes.get(edge.source), graph.nodes.get(edge.target))
            else {
                continue;
            };

            let geo = geometry::edge_geometry(source, target, graph.kind, idx);

            let mut width = style.edge_default.width;
            if graph.kind == DiagramKind::MindMap
                && (hub == Some(edge.source) || hub == Some(edge.target))
            {
                width *= HUB_STROKE_BOOST;
            }

            Self::draw_edge_path(view, &geo, style.edge_default.color, width, &mut draw_list);

            if let Some(label) = &edge.label {
                draw_list.push(DrawCommand::Text {
                    pos: view.world_to_screen(geo.label_anchor),
                    text: label.clone(),
                    color: style.label_color,
                    size: style.label_size * zoom,
                });
            }

            if hovered_edge == Some(eid) {
                draw_list.push(DrawCommand::Text {
                    pos: view.world_to_screen(geo.delete_anchor),
                    text: "\u{00d7}".to_string(),
                    color: style.label_color,
                    size: style.label_size * zoom,
                });
            }
        }

        // In-progress link wire.
        if let InteractionMode::Linking {
            source,
            cursor_world,
        } = mode
            && let Some(node) = graph.nodes.get(*source)
        {
            let start = view.world_to_screen(node.bottom_center());
            let end = view.world_to_screen(*cursor_world);
            let (cp1, cp2) = geometry::bezier_control_points(start, end);
            draw_list.push(DrawCommand::Bezier {
                start,
                cp1,
                cp2,
                end,
                color: Vec4::new(1.0, 1.0, 1.0, 1.0),
                width: style.edge_default.width,
            });
        }

        // Nodes in creation order, the selected node raised to the top.
        let selected = graph.selected_node();
        for &nid in graph
            .order
            .iter()
            .filter(|&&n| Some(n) != selected)
            .chain(selected.iter())
        {
            if let Some(node) = graph.nodes.get(nid) {
                if node.flags.contains(NodeFlags::HIDDEN) {
                    continue;
                }
                let level = levels.as_ref().and_then(|l| l.get(nid)).copied();
                Self::draw_node(view, config, graph.kind, node, level, &mut draw_list);
            }
        }

        draw_list
    }

    fn draw_edge_path(
        view: &View,
        geo: &EdgeGeometry,
        color: Vec4,
        width: f32,
        draw_list: &mut RenderList,
    ) {
        let zoom = view.transform.zoom;
        match geo.path {
            EdgePath::SCurve {
                start,
                c1,
                mid,
                c2,
                end,
            } => {
                for (a, c, b) in [(start, c1, mid), (mid, c2, end)] {
                    let (cp1, cp2) = geometry::elevate_quadratic(a, c, b);
                    draw_list.push(DrawCommand::Bezier {
                        start: view.world_to_screen(a),
                        cp1: view.world_to_screen(cp1),
                        cp2: view.world_to_screen(cp2),
                        end: view.world_to_screen(b),
                        color,
                        width,
                    });
                }
                if geo.markers == EndMarkers::Arrowhead {
                    Self::draw_arrowhead(view, end, end - c2, color, draw_list);
                }
            }
            EdgePath::Straight { start, end } => {
                let s = view.world_to_screen(start);
                let e = view.world_to_screen(end);
                draw_list.push(DrawCommand::Line {
                    start: s,
                    end: e,
                    color,
                    width,
                });
                if geo.markers == EndMarkers::CrowsFootLite {
                    draw_list.push(DrawCommand::Circle {
                        center: s,
                        radius: ERD_MARKER_RADIUS * zoom,
                        color,
                        filled: false,
                        stroke_width: width,
                    });
                    draw_list.push(DrawCommand::Circle {
                        center: e,
                        radius: ERD_MARKER_RADIUS * zoom,
                        color,
                        filled: true,
                        stroke_width: 0.0,
                    });
                }
            }
            EdgePath::Cubic {
                start,
                cp1,
                cp2,
                end,
            } => {
                draw_list.push(DrawCommand::Bezier {
                    start: view.world_to_screen(start),
                    cp1: view.world_to_screen(cp1),
                    cp2: view.world_to_screen(cp2),
                    end: view.world_to_screen(end),
                    color,
                    width,
                });
            }
            EdgePath::Lifeline { start, end } => {
                draw_list.push(DrawCommand::Line {
                    start: view.world_to_screen(start),
                    end: view.world_to_screen(end),
                    color,
                    width,
                });
                if geo.markers == EndMarkers::Arrowhead {
                    Self::draw_arrowhead(view, end, end - start, color, draw_list);
                }
            }
        }
    }

    /// Filled triangle pointing along `dir` with its tip at `tip` (world
    /// coordinates).
    fn draw_arrowhead(view: &View, tip: Vec2, dir: Vec2, color: Vec4, draw_list: &mut RenderList) {
        let dir = dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let zoom = view.transform.zoom;
        let tip_s = view.world_to_screen(tip);
        let base = tip_s - dir * ARROW_LENGTH * zoom;
        let perp = Vec2::new(-dir.y, dir.x) * ARROW_HALF_WIDTH * zoom;
        draw_list.push(DrawCommand::Triangle {
            points: [tip_s, base + perp, base - perp],
            color,
        });
    }

    fn draw_node(
        view: &View,
        config: &EditorConfig,
        kind: DiagramKind,
        node: &Node,
        level: Option<u32>,
        draw_list: &mut RenderList,
    ) {
        let style = &config.style;
        let zoom = view.transform.zoom;
        let node_style = &style.node_default;

        let selected = node.flags.contains(NodeFlags::SELECTED);
        let color = if selected {
            node_style.color * 1.2
        } else {
            node_style.color
        };
        let stroke_color = if selected {
            node_style.border_color * 1.5
        } else {
            node_style.border_color
        };
        let stroke_width = if selected { 2.0 } else { 1.0 };

        // Mind-map cards shrink with distance from the hub; position is
        // untouched, the card contracts around its own center.
        let (pos, size, corner_radius) = match kind {
            DiagramKind::MindMap => {
                let scale = (1.0 - 0.1 * level.unwrap_or(1) as f32).max(0.6);
                let size = node.size * scale;
                let pos = node.center() - size * 0.5;
                // Pill shape.
                (pos, size, size.y * 0.5)
            }
            _ => (node.position, node.size, 5.0),
        };

        draw_list.push(DrawCommand::Rect {
            pos: view.world_to_screen(pos),
            size: size * zoom,
            color,
            corner_radius: corner_radius * zoom,
            stroke_width,
            stroke_color: Some(stroke_color),
        });

        if kind == DiagramKind::Erd {
            Self::draw_erd_card(view, config, node, draw_list);
            return;
        }

        draw_list.push(DrawCommand::Text {
            pos: view.world_to_screen(pos + size * 0.5),
            text: node.label.clone(),
            color: node_style.text_color,
            size: style.label_size * zoom,
        });
    }

    /// Table-style card for an ERD entity: title bar plus one row per
    /// column, with key tags appended.
    fn draw_erd_card(view: &View, config: &EditorConfig, node: &Node, draw_list: &mut RenderList) {
        let style = &config.style;
        let zoom = view.transform.zoom;
        let node_style = &style.node_default;

        let title_size = Vec2::new(node.size.x, ERD_TITLE_HEIGHT);
        draw_list.push(DrawCommand::Rect {
            pos: view.world_to_screen(node.position),
            size: title_size * zoom,
            color: node_style.border_color,
            corner_radius: 5.0 * zoom,
            stroke_width: 0.0,
            stroke_color: None,
        });
        draw_list.push(DrawCommand::Text {
            pos: view.world_to_screen(node.position + title_size * 0.5),
            text: node.label.clone(),
            color: node_style.text_color,
            size: style.label_size * zoom,
        });

        // Structured columns win; free text is the legacy-import fallback.
        let columns = node
            .columns
            .clone()
            .unwrap_or_else(|| erd::parse_columns(&node.description));

        for (i, col) in columns.iter().enumerate() {
            let y = ERD_TITLE_HEIGHT + (i as f32 + 0.5) * ERD_ROW_HEIGHT;
            if y + ERD_ROW_HEIGHT * 0.5 > node.size.y {
                break;
            }
            let mut text = format!("{} {}", col.name, col.ty);
            if col.primary_key {
                text.push_str(" PK");
            }
            if col.foreign_key {
                text.push_str(" FK");
            }
            draw_list.push(DrawCommand::Text {
                pos: view.world_to_screen(node.position + Vec2::new(node.size.x * 0.5, y)),
                text,
                color: node_style.text_color,
                size: (style.label_size - 2.0) * zoom,
            });
        }
    }

    /// Background grid over the visible world bounds.
    fn draw_grid(view: &View, style: &crate::config::CanvasStyle, draw_list: &mut RenderList) {
        let (min, max) = view.visible_world_bounds(view.viewport_size);

        let start_x = (min.x / GRID_SIZE).floor() * GRID_SIZE;
        let start_y = (min.y / GRID_SIZE).floor() * GRID_SIZE;

        let mut x = start_x;
        while x <= max.x {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(x, min.y)),
                end: view.world_to_screen(Vec2::new(x, max.y)),
                color: style.grid_color,
                width: 1.0,
            });
            x += GRID_SIZE;
        }

        let mut y = start_y;
        while y <= max.y {
            draw_list.push(DrawCommand::Line {
                start: view.world_to_screen(Vec2::new(min.x, y)),
                end: view.world_to_screen(Vec2::new(max.x, y)),
                color: style.grid_color,
                width: 1.0,
            });
            y += GRID_SIZE;
        }
    }
}
