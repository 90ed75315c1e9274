use diagram_canvas::config::LayoutProfile;
use diagram_canvas::geometry::{
    self, EdgeGeometry, EdgePath, EndMarkers, SEQUENCE_BASE_GAP, SEQUENCE_ROW_HEIGHT,
};
use diagram_canvas::model::{DiagramKind, GraphState, NodeId};

fn graph_pair(kind: DiagramKind) -> (GraphState, NodeId, NodeId) {
    let profile = LayoutProfile::for_kind(kind);
    let mut graph = GraphState::new(kind);
    let a = graph.add_node("A", "", &profile).unwrap();
    let b = graph.add_node("B", "", &profile).unwrap();
    (graph, a, b)
}

fn geo(graph: &GraphState, a: NodeId, b: NodeId, idx: usize) -> EdgeGeometry {
    geometry::edge_geometry(&graph.nodes[a], &graph.nodes[b], graph.kind, idx)
}

#[test]
fn flowchart_edges_are_s_curves_through_the_midpoint() {
    let (graph, a, b) = graph_pair(DiagramKind::Flowchart);
    let g = geo(&graph, a, b, 0);

    let s = graph.nodes[a].bottom_center();
    let t = graph.nodes[b].top_center();
    let EdgePath::SCurve { start, mid, end, .. } = g.path else {
        panic!("expected an S-curve, got {:?}", g.path);
    };
    assert_eq!(start, s);
    assert_eq!(end, t);
    assert_eq!(mid, (s + t) * 0.5);
    assert_eq!(g.label_anchor, mid);
    assert_eq!(g.markers, EndMarkers::Arrowhead);
}

#[test]
fn erd_edges_are_straight_with_crows_foot_lite_markers() {
    let (graph, a, b) = graph_pair(DiagramKind::Erd);
    let g = geo(&graph, a, b, 0);

    assert!(matches!(g.path, EdgePath::Straight { .. }));
    assert_eq!(g.markers, EndMarkers::CrowsFootLite);
}

#[test]
fn mindmap_edges_are_cubic_with_horizontal_control_offsets() {
    let (graph, a, b) = graph_pair(DiagramKind::MindMap);
    let g = geo(&graph, a, b, 0);

    let s = graph.nodes[a].bottom_center();
    let t = graph.nodes[b].top_center();
    let EdgePath::Cubic { start, cp1, cp2, end } = g.path else {
        panic!("expected a cubic, got {:?}", g.path);
    };
    assert_eq!(start, s);
    assert_eq!(end, t);
    // Control points shift only along x.
    assert_eq!(cp1.y, s.y);
    assert_eq!(cp2.y, t.y);
    assert!(cp1.x > s.x);
    assert!(cp2.x < t.x);
    assert_eq!(g.markers, EndMarkers::None);
}

#[test]
fn sequence_rows_advance_by_exactly_one_row_height() {
    let profile = LayoutProfile::for_kind(DiagramKind::Sequence);
    let mut graph = GraphState::new(DiagramKind::Sequence);
    let a = graph.add_node("A", "", &profile).unwrap();
    let b = graph.add_node("B", "", &profile).unwrap();

    let rows: Vec<f32> = (0..3)
        .map(|idx| {
            let EdgePath::Lifeline { start, end } = geo(&graph, a, b, idx).path else {
                panic!("expected a lifeline row");
            };
            assert_eq!(start.y, end.y);
            start.y
        })
        .collect();

    assert!(rows[1] > rows[0] && rows[2] > rows[1]);
    assert_eq!(rows[1] - rows[0], SEQUENCE_ROW_HEIGHT);
    assert_eq!(rows[2] - rows[1], SEQUENCE_ROW_HEIGHT);

    let lower_anchor = graph.nodes[a]
        .bottom_center()
        .y
        .max(graph.nodes[b].bottom_center().y);
    assert_eq!(rows[0], lower_anchor + SEQUENCE_BASE_GAP);
}

#[test]
fn sequence_rows_run_between_lifeline_centers() {
    let (graph, a, b) = graph_pair(DiagramKind::Sequence);
    let EdgePath::Lifeline { start, end } = geo(&graph, a, b, 0).path else {
        panic!("expected a lifeline row");
    };
    assert_eq!(start.x, graph.nodes[a].center().x);
    assert_eq!(end.x, graph.nodes[b].center().x);
}

#[test]
fn delete_affordance_sits_past_the_label() {
    let (graph, a, b) = graph_pair(DiagramKind::Flowchart);
    let g = geo(&graph, a, b, 0);
    assert!(g.delete_anchor.x > g.label_anchor.x);
    assert_eq!(g.delete_anchor.y, g.label_anchor.y);
}
