use diagram_canvas::config::LayoutProfile;
use diagram_canvas::model::{DiagramKind, GraphState};
use diagram_canvas::persistence::{DiagramStore, GenerateRequest, MemoryStore, SavedDiagram, StoreError};
use diagram_canvas::{Editor, EditorConfig};
use uuid::Uuid;

fn sample_flowchart() -> GraphState {
    let profile = LayoutProfile::for_kind(DiagramKind::Flowchart);
    let mut graph = GraphState::new(DiagramKind::Flowchart);
    let start = graph.add_node("Start", "", &profile).unwrap();
    let decision = graph.add_node("Decision?", "entry gate", &profile).unwrap();
    graph.connect(start, decision, Some("next".into())).unwrap();
    graph
}

#[tokio::test]
async fn save_load_restore_round_trip() {
    let store = MemoryStore::default();
    let graph = sample_flowchart();
    let id = Uuid::new_v4();

    let snapshot = graph.snapshot(id, "Checkout flow");
    store.save_diagram(&snapshot).await.unwrap();

    let loaded = store.load_diagram(id).await.unwrap();
    assert_eq!(loaded.title, "Checkout flow");
    let restored = GraphState::restore(&loaded);

    assert_eq!(restored.kind, DiagramKind::Flowchart);
    assert_eq!(restored.node_count(), graph.node_count());
    assert_eq!(restored.edge_count(), graph.edge_count());

    // Stable identity and payload survive the trip, in creation order.
    for (&orig, &back) in graph.order.iter().zip(&restored.order) {
        let (o, r) = (&graph.nodes[orig], &restored.nodes[back]);
        assert_eq!(o.uuid, r.uuid);
        assert_eq!(o.label, r.label);
        assert_eq!(o.description, r.description);
        assert_eq!(o.position, r.position);
    }
    let edge = restored.edges.values().next().unwrap();
    assert_eq!(edge.label.as_deref(), Some("next"));
    assert_eq!(restored.nodes[edge.source].label, "Start");
    assert_eq!(restored.nodes[edge.target].label, "Decision?");
}

#[tokio::test]
async fn loading_a_missing_diagram_is_not_found() {
    let store = MemoryStore::default();
    let id = Uuid::new_v4();
    assert!(matches!(
        store.load_diagram(id).await,
        Err(StoreError::NotFound(missing)) if missing == id
    ));
}

#[tokio::test]
async fn delete_makes_the_diagram_unloadable() {
    let store = MemoryStore::default();
    let id = Uuid::new_v4();
    store
        .save_diagram(&sample_flowchart().snapshot(id, "doomed"))
        .await
        .unwrap();

    store.delete_diagram(id).await.unwrap();
    assert!(matches!(
        store.load_diagram(id).await,
        Err(StoreError::NotFound(_))
    ));
    // A second delete reports the same absence.
    assert!(matches!(
        store.delete_diagram(id).await,
        Err(StoreError::NotFound(_))
    ));
}

#[test]
fn restore_drops_edges_with_unknown_endpoints() {
    let graph = sample_flowchart();
    let mut snapshot = graph.snapshot(Uuid::new_v4(), "partial");
    snapshot.edges.push(diagram_canvas::persistence::SavedEdge {
        uuid: Uuid::new_v4(),
        source: snapshot.nodes[0].uuid,
        target: Uuid::new_v4(),
        label: None,
    });

    let restored = GraphState::restore(&snapshot);
    assert_eq!(restored.node_count(), 2);
    assert_eq!(restored.edge_count(), 1, "the dangling edge is dropped");
}

#[test]
fn legacy_mindmap_payloads_treat_the_first_node_as_hub() {
    // Payload written before the hub field existed: no hub, no descriptions.
    let json = r#"{
        "id": "6f9d2f9a-8c1e-4b7a-9c39-0f3f1a2b4c5d",
        "title": "Old map",
        "kind": "mind_map",
        "nodes": [
            {"uuid": "11111111-1111-4111-8111-111111111111",
             "position": [480.0, 320.0], "size": [140.0, 56.0], "label": "Center"},
            {"uuid": "22222222-2222-4222-8222-222222222222",
             "position": [80.0, 60.0], "size": [140.0, 56.0], "label": "Branch"}
        ],
        "edges": []
    }"#;
    let saved: SavedDiagram = serde_json::from_str(json).unwrap();
    assert_eq!(saved.hub, None);

    let restored = GraphState::restore(&saved);
    let hub = restored.hub_node().unwrap();
    assert_eq!(restored.nodes[hub].label, "Center");
}

#[test]
fn restore_clamps_out_of_range_positions() {
    let graph = sample_flowchart();
    let mut snapshot = graph.snapshot(Uuid::new_v4(), "offscreen");
    snapshot.nodes[0].position = glam::Vec2::new(-30.0, -5.0);

    let restored = GraphState::restore(&snapshot);
    let first = restored.order[0];
    assert_eq!(restored.nodes[first].position, glam::Vec2::ZERO);
}

#[tokio::test]
async fn unsaved_changes_track_the_revision_watermark() {
    let store = MemoryStore::default();
    let mut editor = Editor::new(EditorConfig::default());
    let mut graph = sample_flowchart();
    let id = Uuid::new_v4();

    assert!(editor.has_unsaved_changes(&graph));

    store.save_diagram(&graph.snapshot(id, "draft")).await.unwrap();
    editor.mark_saved(&graph);
    assert!(!editor.has_unsaved_changes(&graph));

    let profile = LayoutProfile::for_kind(DiagramKind::Flowchart);
    graph.add_node("Done", "", &profile).unwrap();
    assert!(editor.has_unsaved_changes(&graph));
}

#[tokio::test]
async fn generate_returns_a_well_formed_empty_diagram() {
    let store = MemoryStore::default();
    let saved = store
        .generate_diagram(GenerateRequest {
            title: "Sketch".into(),
            kind: DiagramKind::Architecture,
            prompt: "three tier web app".into(),
            provider: serde_json::Value::Null,
        })
        .await
        .unwrap();

    assert_eq!(saved.title, "Sketch");
    assert_eq!(saved.kind, DiagramKind::Architecture);
    assert!(saved.nodes.is_empty() && saved.edges.is_empty());
    // The result restores like any other snapshot.
    let restored = GraphState::restore(&saved);
    assert_eq!(restored.node_count(), 0);
}
