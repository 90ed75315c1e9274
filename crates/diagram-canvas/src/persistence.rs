//! # Persistence
//!
//! Serializable snapshots of a diagram and the async boundary to whatever
//! actually stores them. Snapshots address nodes by stable UUID instead of
//! transient arena keys, so a save/load round trip survives arena reuse.
//!
//! Persistence failures never touch local state: the editor keeps its copy
//! and the host decides whether to retry. There is no delta protocol; a save
//! always transmits the full node and edge arrays (last save wins).

use async_trait::async_trait;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::erd::ErdColumn;
use crate::model::{DiagramKind, GraphState, NodeFlags};

/// A serializable representation of a node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedNode {
    pub uuid: Uuid,
    pub position: Vec2,
    pub size: Vec2,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub columns: Option<Vec<ErdColumn>>,
    #[serde(default)]
    pub flags: NodeFlags,
}

/// A serializable representation of an edge, endpoint-addressed by node UUID.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedEdge {
    pub uuid: Uuid,
    pub source: Uuid,
    pub target: Uuid,
    #[serde(default)]
    pub label: Option<String>,
}

/// A full snapshot of one diagram, the unit of save/load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedDiagram {
    pub id: Uuid,
    pub title: String,
    pub kind: DiagramKind,
    pub nodes: Vec<SavedNode>,
    pub edges: Vec<SavedEdge>,
    /// Explicit mind-map hub. Absent in legacy payloads, where the first
    /// node of the array is the hub by convention.
    #[serde(default)]
    pub hub: Option<Uuid>,
}

impl GraphState {
    /// Serializes the graph into a snapshot, nodes and edges in creation
    /// order.
    pub fn snapshot(&self, id: Uuid, title: &str) -> SavedDiagram {
        let nodes = self
            .order
            .iter()
            .filter_map(|&nid| self.nodes.get(nid))
            .map(|node| SavedNode {
                uuid: node.uuid,
                position: node.position,
                size: node.size,
                label: node.label.clone(),
                description: node.description.clone(),
                columns: node.columns.clone(),
                flags: node.flags,
            })
            .collect();

        let edges = self
            .edge_order
            .iter()
            .filter_map(|&eid| self.edges.get(eid))
            .filter_map(|edge| {
                let source = self.nodes.get(edge.source)?.uuid;
                let target = self.nodes.get(edge.target)?.uuid;
                Some(SavedEdge {
                    uuid: edge.uuid,
                    source,
                    target,
                    label: edge.label.clone(),
                })
            })
            .collect();

        SavedDiagram {
            id,
            title: title.to_string(),
            kind: self.kind,
            nodes,
            edges,
            hub: self.hub.and_then(|h| self.nodes.get(h)).map(|n| n.uuid),
        }
    }

    /// Builds a fresh graph from a snapshot.
    ///
    /// Edges referencing unknown node UUIDs are dropped, mirroring the
    /// render-time policy for dangling references in legacy payloads.
    pub fn restore(saved: &SavedDiagram) -> Self {
        let mut graph = GraphState::new(saved.kind);
        let mut by_uuid = HashMap::new();

        for sn in &saved.nodes {
            let id = graph.nodes.insert_with_key(|key| crate::model::Node {
                id: key,
                uuid: sn.uuid,
                position: sn.position.max(Vec2::ZERO),
                size: sn.size,
                label: sn.label.clone(),
                description: sn.description.clone(),
                columns: sn.columns.clone(),
                flags: sn.flags,
            });
            graph.uuid_index.insert(sn.uuid, id);
            graph.order.push(id);
            by_uuid.insert(sn.uuid, id);
        }

        for se in &saved.edges {
            match (by_uuid.get(&se.source), by_uuid.get(&se.target)) {
                (Some(&source), Some(&target)) => {
                    let id = graph.edges.insert_with_key(|key| crate::model::Edge {
                        id: key,
                        uuid: se.uuid,
                        source,
                        target,
                        label: se.label.clone(),
                    });
                    graph.edge_order.push(id);
                }
                _ => {
                    tracing::warn!(edge = %se.uuid, "dropping edge with unknown endpoint");
                }
            }
        }

        graph.hub = saved
            .hub
            .and_then(|uuid| by_uuid.get(&uuid).copied())
            .or_else(|| {
                (saved.kind == DiagramKind::MindMap)
                    .then(|| graph.order.first().copied())
                    .flatten()
            });

        graph
    }
}

/// Request payload for AI-assisted diagram generation. The editor treats the
/// response as an opaque, already-valid graph; normal invariants re-apply on
/// the first subsequent operation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub title: String,
    pub kind: DiagramKind,
    pub prompt: String,
    /// Provider configuration forwarded verbatim to the backend.
    #[serde(default)]
    pub provider: serde_json::Value,
}

/// Errors surfaced at the persistence boundary. These propagate to the host
/// for display; the editor never retries and never rolls back local edits.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("diagram {0} not found")]
    NotFound(Uuid),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("generation failed: {0}")]
    Generation(String),
}

/// The external store the editor session talks to.
#[async_trait]
pub trait DiagramStore: Send + Sync {
    /// Returns the canonical graph for a diagram.
    async fn load_diagram(&self, id: Uuid) -> Result<SavedDiagram, StoreError>;

    /// Transmits a full snapshot. No partial updates.
    async fn save_diagram(&self, snapshot: &SavedDiagram) -> Result<(), StoreError>;

    /// Deletes a diagram. Irreversible from the editor's perspective.
    async fn delete_diagram(&self, id: Uuid) -> Result<(), StoreError>;

    /// AI-assisted initial graph population.
    async fn generate_diagram(&self, request: GenerateRequest) -> Result<SavedDiagram, StoreError>;
}

/// In-memory reference store, used by tests and by embedders that bring no
/// backend of their own.
#[derive(Debug, Default)]
pub struct MemoryStore {
    diagrams: tokio::sync::Mutex<HashMap<Uuid, SavedDiagram>>,
}

#[async_trait]
impl DiagramStore for MemoryStore {
    async fn load_diagram(&self, id: Uuid) -> Result<SavedDiagram, StoreError> {
        self.diagrams
            .lock()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn save_diagram(&self, snapshot: &SavedDiagram) -> Result<(), StoreError> {
        tracing::info!(diagram = %snapshot.id, nodes = snapshot.nodes.len(), "saving diagram");
        self.diagrams
            .lock()
            .await
            .insert(snapshot.id, snapshot.clone());
        Ok(())
    }

    async fn delete_diagram(&self, id: Uuid) -> Result<(), StoreError> {
        self.diagrams
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn generate_diagram(&self, request: GenerateRequest) -> Result<SavedDiagram, StoreError> {
        // The reference store has no model behind it; it produces an empty
        // but well-formed diagram so hosts can exercise the flow.
        Ok(SavedDiagram {
            id: Uuid::new_v4(),
            title: request.title,
            kind: request.kind,
            nodes: Vec::new(),
            edges: Vec::new(),
            hub: None,
        })
    }
}
