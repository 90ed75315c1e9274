use diagram_canvas::EditorConfig;
use diagram_canvas::config::LayoutProfile;
use diagram_canvas::erd::ErdColumn;
use diagram_canvas::interaction::InteractionMode;
use diagram_canvas::model::{DiagramKind, GraphState, NodeId};
use diagram_canvas::painter::Painter;
use diagram_canvas::render::DrawCommand;
use diagram_canvas::view::{Transform, View};
use glam::Vec2;

fn users_table() -> (GraphState, NodeId) {
    let profile = LayoutProfile::for_kind(DiagramKind::Erd);
    let mut graph = GraphState::new(DiagramKind::Erd);
    let users = graph
        .add_node("users", "legacy_id: INT (PK)", &profile)
        .unwrap();
    (graph, users)
}

fn structured_columns() -> Vec<ErdColumn> {
    vec![
        ErdColumn {
            name: "id".into(),
            ty: "uuid".into(),
            primary_key: true,
            foreign_key: false,
        },
        ErdColumn {
            name: "org_id".into(),
            ty: "uuid".into(),
            primary_key: false,
            foreign_key: true,
        },
    ]
}

fn card_texts(graph: &GraphState) -> Vec<String> {
    let view = View::new(Transform::default(), Vec2::new(800.0, 600.0));
    let config = EditorConfig::default();
    Painter::draw_graph(&view, &config, graph, &InteractionMode::Idle, Vec2::ZERO)
        .into_iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        })
        .collect()
}

#[test]
fn set_columns_bumps_the_revision() {
    let (mut graph, users) = users_table();
    let before = graph.revision;

    graph.set_columns(users, Some(structured_columns()));
    assert_eq!(graph.revision, before + 1);
    assert_eq!(graph.nodes[users].columns.as_ref().map(Vec::len), Some(2));

    graph.set_columns(users, None);
    assert_eq!(graph.revision, before + 2);
    assert!(graph.nodes[users].columns.is_none());
}

#[test]
fn set_columns_on_a_missing_node_is_a_no_op() {
    let (mut graph, users) = users_table();
    graph.delete_node(users);

    let before = graph.revision;
    graph.set_columns(users, Some(structured_columns()));
    assert_eq!(graph.revision, before);
}

#[test]
fn structured_columns_win_over_the_description_parse() {
    let (mut graph, users) = users_table();
    graph.set_columns(users, Some(structured_columns()));

    let texts = card_texts(&graph);
    assert!(texts.iter().any(|t| t == "id uuid PK"));
    assert!(texts.iter().any(|t| t == "org_id uuid FK"));
    assert!(
        !texts.iter().any(|t| t.contains("legacy_id")),
        "description text must not leak into a structured card"
    );
}

#[test]
fn clearing_columns_reverts_the_card_to_the_parse_fallback() {
    let (mut graph, users) = users_table();
    graph.set_columns(users, Some(structured_columns()));
    graph.set_columns(users, None);

    let texts = card_texts(&graph);
    assert!(texts.iter().any(|t| t == "legacy_id INT PK"));
    assert!(!texts.iter().any(|t| t.contains("org_id")));
}
