//! # diagram-canvas
//!
//! `diagram_canvas` is a headless, retained-mode diagram editor. It owns the
//! graph of positioned nodes and directed edges for one open diagram,
//! interprets pointer/keyboard input through an explicit interaction state
//! machine, and emits a display list of draw commands; the host application
//! owns the pixels and the transport to the backing store.
//!
//! ## Core architecture
//! - **Model (`model.rs`)**: graph state in flat arenas plus every mutating
//!   operation (add, move, edit, delete, connect).
//! - **Interaction (`interaction.rs`)**: idle / selected / press-pending /
//!   dragging / linking as explicit states.
//! - **Geometry (`geometry.rs`)**: pure per-kind edge path computation.
//! - **Persistence (`persistence.rs`)**: UUID-addressed snapshots and the
//!   async `DiagramStore` boundary.
//! - **Painter (`painter.rs`)**: turns state into `DrawCommand`s for the
//!   host renderer.

pub mod config;
pub mod erd;
pub mod geometry;
pub mod hierarchy;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod painter;
pub mod persistence;
pub mod render;
pub mod view;

use glam::Vec2;
use input::InputState;
use model::{GraphState, NodeId};
use render::RenderList;
use view::{Transform, View};

// Re-exports for convenience
pub use config::{EditorConfig, LayoutProfile};
pub use interaction::{InteractionMode, LogicEvent};
pub use model::{DiagramKind, EdgeId};
pub use persistence::{DiagramStore, MemoryStore, SavedDiagram, StoreError};

/// The main entry point for the library.
///
/// `Editor` holds the transient per-session state: viewport, configuration,
/// interaction mode, and the saved-revision watermark behind the host's
/// unsaved-changes affordance. The graph itself is passed in by the host, so
/// one editor can be reused across diagrams.
pub struct Editor {
    /// Configuration settings.
    pub config: EditorConfig,
    /// The viewport system handling coordinate transforms.
    pub view: View,
    /// Current interaction mode.
    pub mode: InteractionMode,
    prev_left: bool,
    saved_revision: u64,
}

impl Editor {
    /// Creates a new editor with the given configuration.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            view: View::new(Transform::default(), Vec2::new(800.0, 600.0)),
            mode: InteractionMode::Idle,
            prev_left: false,
            saved_revision: 0,
        }
    }

    /// The core update loop: processes one frame of input against the graph
    /// and returns the draw commands plus any logic events for the host.
    ///
    /// All mutations complete before this returns; there is no partial
    /// update visible to the next event.
    pub fn update(&mut self, input: &InputState, graph: &mut GraphState) -> (RenderList, Vec<LogicEvent>) {
        let mut events = Vec::new();
        self.view.viewport_size = input.screen_size;
        let left_pressed = input.mouse_buttons.left && !self.prev_left;
        self.prev_left = input.mouse_buttons.left;

        let revision_before = graph.revision;
        interaction::handle_interactions(
            &mut self.mode,
            &mut self.view,
            &self.config,
            input,
            left_pressed,
            graph,
            &mut events,
        );

        // Catch mutations made outside the pointer paths as well. Streaming
        // drag moves are exempt; those coalesce into one event at drag end.
        if graph.revision != revision_before
            && !matches!(self.mode, InteractionMode::Dragging { .. })
            && !events.contains(&LogicEvent::GraphChanged)
        {
            events.push(LogicEvent::GraphChanged);
        }

        let draw_list =
            painter::Painter::draw_graph(&self.view, &self.config, graph, &self.mode, input.mouse_pos);

        (draw_list, events)
    }

    /// The currently selected node, if any.
    pub fn selected_node(&self) -> Option<NodeId> {
        match self.mode {
            InteractionMode::Selected { node } => Some(node),
            _ => None,
        }
    }

    /// Enters linking mode from the current selection. Returns false when
    /// nothing is selected; the caller's connect affordance should be
    /// disabled in that case.
    pub fn begin_link(&mut self, graph: &GraphState) -> bool {
        if let InteractionMode::Selected { node } = self.mode
            && let Some(n) = graph.nodes.get(node)
        {
            self.mode = InteractionMode::Linking {
                source: node,
                cursor_world: n.bottom_center(),
            };
            return true;
        }
        false
    }

    /// Cancels a pending link, returning to idle.
    pub fn cancel_link(&mut self) {
        if matches!(self.mode, InteractionMode::Linking { .. }) {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Records the current graph revision as saved. Call after a successful
    /// `DiagramStore::save_diagram`.
    pub fn mark_saved(&mut self, graph: &GraphState) {
        self.saved_revision = graph.revision;
    }

    /// Whether the graph has been mutated since the last `mark_saved`.
    pub fn has_unsaved_changes(&self, graph: &GraphState) -> bool {
        graph.revision != self.saved_revision
    }
}
