//! # Core Data Model
//!
//! This module defines the graph data model for one open diagram and every
//! mutating operation on it. Entities live in flat `SlotMap` arenas, so ids
//! stay stable across deletions without reference counting or pointers.
//!
//! Invalid operations (connecting a missing node, duplicate edges, empty
//! labels) are absorbed here as no-ops rather than surfaced as errors: they
//! arise from ordinary interactive exploration, not from bugs.

use glam::Vec2;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::config::LayoutProfile;
use crate::erd::ErdColumn;
use crate::layout;

pub use uuid::Uuid;

new_key_type! {
    /// Unique identifier for a Node.
    pub struct NodeId;
    /// Unique identifier for an Edge.
    pub struct EdgeId;
}

/// The six diagram kinds. Stored once on the [`GraphState`], never per node:
/// the kind selects layout, geometry, and rendering policy for the whole
/// diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagramKind {
    Flowchart,
    Erd,
    MindMap,
    Architecture,
    Sequence,
    Component,
}

use bitflags::bitflags;

bitflags! {
    /// Bitflags representing various boolean states of a Node.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u8 {
        /// The node cannot be moved or deleted.
        const LOCKED = 1 << 0;
        /// The node is not rendered.
        const HIDDEN = 1 << 1;
        /// The node is the current single selection.
        const SELECTED = 1 << 2;
    }
}

// Compact u8 serde representation, used by the persistence snapshot.
impl serde::Serialize for NodeFlags {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> serde::Deserialize<'de> for NodeFlags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// A positioned node.
///
/// `label` and `description` are user text. For ERD diagrams the structured
/// `columns` list is authoritative when present; a `None` falls back to the
/// heuristic parse of `description` at render time (legacy import path).
#[derive(Clone, Debug)]
pub struct Node {
    /// Self-reference ID.
    pub id: NodeId,
    /// Stable UUID for persistence.
    pub uuid: Uuid,
    /// World-space position of the top-left corner. Componentwise >= 0.
    pub position: Vec2,
    /// Size of the node card.
    pub size: Vec2,
    /// Display text.
    pub label: String,
    /// Optional free text (ERD: column source when `columns` is `None`).
    pub description: String,
    /// Structured ERD columns, when edited through the structured path.
    pub columns: Option<Vec<ErdColumn>>,
    /// State flags.
    pub flags: NodeFlags,
}

impl Node {
    /// World-space center of the node card.
    pub fn center(&self) -> Vec2 {
        self.position + self.size * 0.5
    }

    /// Bottom-center anchor, where outgoing edges attach.
    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.position.x + self.size.x * 0.5, self.position.y + self.size.y)
    }

    /// Top-center anchor, where incoming edges attach.
    pub fn top_center(&self) -> Vec2 {
        Vec2::new(self.position.x + self.size.x * 0.5, self.position.y)
    }

    /// Whether a world-space point lies inside the node card.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.position.x
            && p.x <= self.position.x + self.size.x
            && p.y >= self.position.y
            && p.y <= self.position.y + self.size.y
    }
}

/// A directed edge between two nodes of the same diagram.
#[derive(Clone, Debug)]
pub struct Edge {
    /// Self-reference ID.
    pub id: EdgeId,
    /// Stable UUID for persistence.
    pub uuid: Uuid,
    pub source: NodeId,
    pub target: NodeId,
    /// Optional text drawn at the edge midpoint.
    pub label: Option<String>,
}

/// The entire state of one open diagram.
///
/// The editor exclusively owns this while the diagram is open; saving hands a
/// [`crate::persistence::SavedDiagram`] snapshot to the store. `order` tracks
/// creation order and doubles as the base z-order for rendering. `hub` is the
/// explicit mind-map hub node (first node created), rather than an ambient
/// "index 0" convention.
#[derive(Clone, Debug)]
pub struct GraphState {
    pub kind: DiagramKind,
    /// Arena for Nodes.
    pub nodes: SlotMap<NodeId, Node>,
    /// Arena for Edges.
    pub edges: SlotMap<EdgeId, Edge>,
    /// Node creation order. Lower index = created earlier / drawn below.
    pub order: Vec<NodeId>,
    /// Edge creation order; drives sequence-diagram message row placement.
    pub edge_order: Vec<EdgeId>,
    /// Explicit mind-map hub. Re-pointed to the earliest surviving node if
    /// the hub itself is deleted.
    pub hub: Option<NodeId>,
    /// Index for O(1) UUID to NodeId lookup.
    pub uuid_index: HashMap<Uuid, NodeId>,
    /// Monotonic change counter; backs the host's unsaved-changes affordance.
    pub revision: u64,
}

impl GraphState {
    pub fn new(kind: DiagramKind) -> Self {
        Self {
            kind,
            nodes: SlotMap::with_key(),
            edges: SlotMap::with_key(),
            order: Vec::new(),
            edge_order: Vec::new(),
            hub: None,
            uuid_index: HashMap::new(),
            revision: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Resolves a stable UUID to its current arena id.
    pub fn node_by_uuid(&self, uuid: Uuid) -> Option<NodeId> {
        self.uuid_index.get(&uuid).copied()
    }

    /// The mind-map hub: the explicit field, falling back to the earliest
    /// surviving node for diagrams restored from snapshots without one.
    pub fn hub_node(&self) -> Option<NodeId> {
        self.hub.or_else(|| self.order.first().copied())
    }

    /// Ordinal position of an edge in creation order. Sequence diagrams use
    /// this to stack message rows top to bottom.
    pub fn edge_index(&self, id: EdgeId) -> Option<usize> {
        self.edge_order.iter().position(|&e| e == id)
    }

    /// Adds a node with a policy-derived default position.
    ///
    /// Rejected (returns `None`, no mutation) when `label` is empty or
    /// whitespace. The first node of a mind map becomes the hub.
    pub fn add_node(&mut self, label: &str, description: &str, profile: &LayoutProfile) -> Option<NodeId> {
        if label.trim().is_empty() {
            return None;
        }

        let position = layout::default_position(self.kind, self.order.len(), profile);
        let uuid = Uuid::new_v4();
        let id = self.nodes.insert_with_key(|key| Node {
            id: key,
            uuid,
            position,
            size: profile.default_size,
            label: label.to_string(),
            description: description.to_string(),
            columns: None,
            flags: NodeFlags::default(),
        });
        self.uuid_index.insert(uuid, id);
        self.order.push(id);

        if self.kind == DiagramKind::MindMap && self.hub.is_none() {
            self.hub = Some(id);
        }

        self.touch();
        tracing::debug!(node = %uuid, "node added");
        Some(id)
    }

    /// Moves a node, clamping the position to non-negative coordinates.
    /// No-op if `id` is not present, locked, or the clamped position is
    /// unchanged.
    pub fn move_node(&mut self, id: NodeId, position: Vec2) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.flags.contains(NodeFlags::LOCKED) {
                return;
            }
            let clamped = position.max(Vec2::ZERO);
            if node.position != clamped {
                node.position = clamped;
                self.touch();
            }
        }
    }

    /// Updates label and description in place. No-op if `id` is not present
    /// or nothing changes.
    pub fn edit_node(&mut self, id: NodeId, label: &str, description: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.label == label && node.description == description {
                return;
            }
            node.label = label.to_string();
            node.description = description.to_string();
            self.touch();
        }
    }

    /// Replaces a node's structured ERD columns. `None` reverts the node to
    /// the description-parsing fallback.
    pub fn set_columns(&mut self, id: NodeId, columns: Option<Vec<ErdColumn>>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.columns = columns;
            self.touch();
        }
    }

    /// Removes a node and cascades removal of every edge touching it.
    /// Locked nodes are left alone.
    ///
    /// A deleted hub re-points `hub` at the earliest surviving node so that
    /// level computation stays stable.
    pub fn delete_node(&mut self, id: NodeId) {
        if self
            .nodes
            .get(id)
            .is_some_and(|n| n.flags.contains(NodeFlags::LOCKED))
        {
            return;
        }
        if let Some(node) = self.nodes.remove(id) {
            self.uuid_index.remove(&node.uuid);
            self.order.retain(|&n| n != id);

            let stale: Vec<EdgeId> = self
                .edges
                .iter()
                .filter(|(_, e)| e.source == id || e.target == id)
                .map(|(eid, _)| eid)
                .collect();
            for eid in stale {
                self.edges.remove(eid);
                self.edge_order.retain(|&e| e != eid);
            }

            if self.hub == Some(id) {
                self.hub = self.order.first().copied();
            }

            self.touch();
            tracing::debug!(node = %node.uuid, "node deleted");
        }
    }

    /// Creates a directed edge.
    ///
    /// Returns `None` (no mutation) on a self-loop, a missing endpoint, or an
    /// existing edge with the same `(source, target)` pair.
    pub fn connect(&mut self, source: NodeId, target: NodeId, label: Option<String>) -> Option<EdgeId> {
        if source == target {
            return None;
        }
        if !self.nodes.contains_key(source) || !self.nodes.contains_key(target) {
            return None;
        }
        if self
            .edges
            .values()
            .any(|e| e.source == source && e.target == target)
        {
            return None;
        }

        let uuid = Uuid::new_v4();
        let id = self.edges.insert_with_key(|key| Edge {
            id: key,
            uuid,
            source,
            target,
            label,
        });
        self.edge_order.push(id);
        self.touch();
        tracing::debug!(edge = %uuid, "edge created");
        Some(id)
    }

    /// Removes an edge. No-op if absent.
    pub fn delete_edge(&mut self, id: EdgeId) {
        if self.edges.remove(id).is_some() {
            self.edge_order.retain(|&e| e != id);
            self.touch();
        }
    }

    /// The currently selected node, if any.
    pub fn selected_node(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.flags.contains(NodeFlags::SELECTED))
            .map(|(id, _)| id)
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
