//! # Interaction State Machine
//!
//! The explicit finite-state machine behind pointer and keyboard handling.
//! Selection, dragging, and linking are distinct states; in particular the
//! "a drag must not toggle selection" rule is modeled as a `PressPending` ->
//! `Dragging` transition instead of a timer race: a press only becomes a
//! click if the pointer never travels past the drag threshold.

use glam::Vec2;

use crate::config::EditorConfig;
use crate::geometry;
use crate::input::{self, InputState};
use crate::model::{EdgeId, GraphState, NodeFlags, NodeId};
use crate::view::{Transform, View};

/// Events emitted to the host application.
#[derive(Clone, Debug, PartialEq)]
pub enum LogicEvent {
    /// The graph was mutated; the host should enable its save affordance.
    GraphChanged,
    /// The single selection changed.
    SelectionChanged(Option<NodeId>),
    /// A connect operation succeeded.
    EdgeCreated(EdgeId),
    /// The visual state changed, requiring a repaint.
    RepaintNeeded,
}

/// The current interaction state.
#[derive(Clone, Debug)]
pub enum InteractionMode {
    /// No pending interaction.
    Idle,
    /// One node is the active selection.
    Selected { node: NodeId },
    /// Pointer is down on a node but has not moved past the drag threshold.
    /// Release from here is the click path (selection toggle).
    PressPending {
        node: NodeId,
        /// Pointer position at press time (world space).
        press_world: Vec2,
        /// Selection at press time, restored if the press turns into a drag.
        prior: Option<NodeId>,
    },
    /// Position updates stream to the node under the pointer. Ends on
    /// release or on the pointer leaving the viewport; never alters the
    /// selection.
    Dragging {
        node: NodeId,
        /// Press offset from the node origin, so the card does not jump.
        grab_offset: Vec2,
        prior: Option<NodeId>,
    },
    /// Awaiting a target-node click for a new edge.
    Linking {
        source: NodeId,
        /// Current wire endpoint (world space).
        cursor_world: Vec2,
    },
    /// Middle-button canvas pan.
    Panning {
        start_drag: Vec2,
        initial_transform: Transform,
        prior: Option<NodeId>,
    },
}

impl InteractionMode {
    /// The node the current selection (or pending press) refers to.
    pub fn selection(&self) -> Option<NodeId> {
        match self {
            InteractionMode::Selected { node } => Some(*node),
            InteractionMode::PressPending { prior, .. }
            | InteractionMode::Dragging { prior, .. }
            | InteractionMode::Panning { prior, .. } => *prior,
            _ => None,
        }
    }
}

/// Processes one frame of input against the current mode.
///
/// `left_pressed` must be true only on the frame the left button went down;
/// the editor entry point derives it from the previous frame's state.
pub fn handle_interactions(
    mode: &mut InteractionMode,
    view: &mut View,
    config: &EditorConfig,
    input: &InputState,
    left_pressed: bool,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) {
    sanitize_mode(mode, graph);

    // Scroll zoom, anchored under the cursor.
    if input.scroll_delta != 0.0 {
        let old_zoom = view.transform.zoom;
        let zoom_factor = 1.0 + (input.scroll_delta * config.zoom_speed);
        let new_zoom = (old_zoom * zoom_factor).clamp(0.1, 10.0);

        if (new_zoom - old_zoom).abs() > f32::EPSILON {
            let world_mouse = view.screen_to_world(input.mouse_pos);
            view.transform.zoom = new_zoom;
            view.transform.pan = input.mouse_pos - (world_mouse * new_zoom);
            events.push(LogicEvent::RepaintNeeded);
        }
    }

    // Keyboard shortcuts.
    for key in &input.pressed_keys {
        match key {
            input::Key::Delete | input::Key::Backspace => {
                if let InteractionMode::Selected { node } = *mode {
                    graph.delete_node(node);
                    *mode = InteractionMode::Idle;
                    events.push(LogicEvent::GraphChanged);
                    events.push(LogicEvent::SelectionChanged(None));
                    events.push(LogicEvent::RepaintNeeded);
                }
            }
            input::Key::Escape => {
                if matches!(mode, InteractionMode::Linking { .. }) {
                    *mode = InteractionMode::Idle;
                    events.push(LogicEvent::RepaintNeeded);
                }
            }
        }
    }

    let next_mode = match mode {
        InteractionMode::Idle => {
            handle_idle_or_selected(None, view, config, input, left_pressed, graph, events)
        }
        InteractionMode::Selected { node } => {
            handle_idle_or_selected(Some(*node), view, config, input, left_pressed, graph, events)
        }
        InteractionMode::PressPending {
            node,
            press_world,
            prior,
        } => handle_press_pending(*node, *press_world, *prior, view, config, input, graph, events),
        InteractionMode::Dragging {
            node,
            grab_offset,
            prior,
        } => handle_dragging(*node, *grab_offset, *prior, view, input, graph, events),
        InteractionMode::Linking {
            source,
            cursor_world,
        } => handle_linking(*source, cursor_world, view, input, left_pressed, graph, events),
        InteractionMode::Panning {
            start_drag,
            initial_transform,
            prior,
        } => handle_panning(view, input, *start_drag, *initial_transform, *prior, events),
    };

    if let Some(new_mode) = next_mode {
        *mode = new_mode;
    }
}

/// Drops interaction state that points at entities the host has deleted out
/// from under the editor.
fn sanitize_mode(mode: &mut InteractionMode, graph: &GraphState) {
    let stale = match mode {
        InteractionMode::Selected { node }
        | InteractionMode::PressPending { node, .. }
        | InteractionMode::Dragging { node, .. } => !graph.nodes.contains_key(*node),
        InteractionMode::Linking { source, .. } => !graph.nodes.contains_key(*source),
        _ => false,
    };
    if stale {
        *mode = InteractionMode::Idle;
        return;
    }
    if let InteractionMode::PressPending { prior, .. }
    | InteractionMode::Dragging { prior, .. }
    | InteractionMode::Panning { prior, .. } = mode
        && prior.is_some_and(|n| !graph.nodes.contains_key(n))
    {
        *prior = None;
    }
}

/// Topmost node under a world-space point. Creation order is the base
/// z-order, so later nodes win.
pub fn node_at(graph: &GraphState, world: Vec2) -> Option<NodeId> {
    graph
        .order
        .iter()
        .rev()
        .copied()
        .find(|&id| graph.nodes.get(id).is_some_and(|n| n.contains(world)))
}

/// The edge whose delete affordance sits within `radius` of a world-space
/// point, if any. Used for the hover-only delete "x" next to edge labels.
pub fn edge_delete_target(graph: &GraphState, world: Vec2, radius: f32) -> Option<EdgeId> {
    graph.edge_order.iter().enumerate().find_map(|(idx, &eid)| {
        let edge = graph.edges.get(eid)?;
        let source = graph.nodes.get(edge.source)?;
        let target = graph.nodes.get(edge.target)?;
        let geo = geometry::edge_geometry(source, target, graph.kind, idx);
        (geo.delete_anchor.distance(world) <= radius).then_some(eid)
    })
}

/// Applies a selection change to the node flags and notifies the host.
fn set_selection(graph: &mut GraphState, selection: Option<NodeId>, events: &mut Vec<LogicEvent>) {
    for (_, node) in &mut graph.nodes {
        node.flags.remove(NodeFlags::SELECTED);
    }
    if let Some(id) = selection
        && let Some(node) = graph.nodes.get_mut(id)
    {
        node.flags.insert(NodeFlags::SELECTED);
    }
    events.push(LogicEvent::SelectionChanged(selection));
    events.push(LogicEvent::RepaintNeeded);
}

fn handle_idle_or_selected(
    current: Option<NodeId>,
    view: &View,
    config: &EditorConfig,
    input: &InputState,
    left_pressed: bool,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if input.mouse_buttons.middle {
        return Some(InteractionMode::Panning {
            start_drag: input.mouse_pos,
            initial_transform: view.transform,
            prior: current,
        });
    }

    if !left_pressed {
        return None;
    }

    let world = view.screen_to_world(input.mouse_pos);

    if let Some(node) = node_at(graph, world) {
        return Some(InteractionMode::PressPending {
            node,
            press_world: world,
            prior: current,
        });
    }

    if let Some(eid) = edge_delete_target(graph, world, config.hover_radius) {
        graph.delete_edge(eid);
        events.push(LogicEvent::GraphChanged);
        events.push(LogicEvent::RepaintNeeded);
        return None;
    }

    // Clicked empty canvas: back to idle.
    if current.is_some() {
        set_selection(graph, None, events);
    }
    Some(InteractionMode::Idle)
}

#[allow(clippy::too_many_arguments)]
fn handle_press_pending(
    node: NodeId,
    press_world: Vec2,
    prior: Option<NodeId>,
    view: &View,
    config: &EditorConfig,
    input: &InputState,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.pointer_inside {
        return Some(restore_selection(prior));
    }

    if !input.mouse_buttons.left {
        // Released without dragging: this is the click path. Clicking the
        // already-selected node deselects it.
        return if prior == Some(node) {
            set_selection(graph, None, events);
            Some(InteractionMode::Idle)
        } else {
            set_selection(graph, Some(node), events);
            Some(InteractionMode::Selected { node })
        };
    }

    let world = view.screen_to_world(input.mouse_pos);
    if world.distance(press_world) > config.drag_threshold {
        let origin = graph.nodes.get(node)?.position;
        return Some(InteractionMode::Dragging {
            node,
            grab_offset: press_world - origin,
            prior,
        });
    }
    None
}

fn handle_dragging(
    node: NodeId,
    grab_offset: Vec2,
    prior: Option<NodeId>,
    view: &View,
    input: &InputState,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.mouse_buttons.left || !input.pointer_inside {
        // Drag ended; the click handler is suppressed by construction since
        // we never pass through the click path here.
        events.push(LogicEvent::GraphChanged);
        events.push(LogicEvent::RepaintNeeded);
        return Some(restore_selection(prior));
    }

    let world = view.screen_to_world(input.mouse_pos);
    graph.move_node(node, world - grab_offset);
    events.push(LogicEvent::RepaintNeeded);
    None
}

fn handle_linking(
    source: NodeId,
    cursor_world: &mut Vec2,
    view: &View,
    input: &InputState,
    left_pressed: bool,
    graph: &mut GraphState,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    let world = view.screen_to_world(input.mouse_pos);
    if *cursor_world != world {
        *cursor_world = world;
        events.push(LogicEvent::RepaintNeeded);
    }

    if !left_pressed {
        return None;
    }

    // A click resolves the link attempt one way or another.
    match node_at(graph, world) {
        Some(target) if target != source => {
            if let Some(eid) = graph.connect(source, target, None) {
                events.push(LogicEvent::EdgeCreated(eid));
                events.push(LogicEvent::GraphChanged);
            }
        }
        // Clicking the source node or empty canvas cancels.
        _ => {}
    }
    events.push(LogicEvent::RepaintNeeded);
    Some(InteractionMode::Idle)
}

fn handle_panning(
    view: &mut View,
    input: &InputState,
    start_drag: Vec2,
    initial_transform: Transform,
    prior: Option<NodeId>,
    events: &mut Vec<LogicEvent>,
) -> Option<InteractionMode> {
    if !input.mouse_buttons.middle {
        Some(restore_selection(prior))
    } else {
        let delta = input.mouse_pos - start_drag;
        view.transform.pan = initial_transform.pan + delta;
        events.push(LogicEvent::RepaintNeeded);
        None
    }
}

fn restore_selection(prior: Option<NodeId>) -> InteractionMode {
    match prior {
        Some(node) => InteractionMode::Selected { node },
        None => InteractionMode::Idle,
    }
}
