//! # Mind-Map Hierarchy
//!
//! Computes each node's distance in edge hops from the hub. The level only
//! drives visual scale and stroke weight; it never feeds back into the data
//! model.

use slotmap::SecondaryMap;
use std::collections::{HashMap, VecDeque};

use crate::model::{GraphState, NodeId};

/// BFS levels from the hub over the undirected view of the edge set.
///
/// The hub is level 0. Nodes unreachable from the hub are assigned level 1 so
/// rendering stays stable instead of erroring. An empty graph yields an empty
/// map.
pub fn levels(graph: &GraphState) -> SecondaryMap<NodeId, u32> {
    let mut levels = SecondaryMap::new();
    let Some(hub) = graph.hub_node() else {
        return levels;
    };

    let mut adjacency: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
    for (_, edge) in &graph.edges {
        adjacency.entry(edge.source).or_default().push(edge.target);
        adjacency.entry(edge.target).or_default().push(edge.source);
    }

    levels.insert(hub, 0);
    let mut queue = VecDeque::from([hub]);
    while let Some(current) = queue.pop_front() {
        let depth = levels[current];
        if let Some(neighbors) = adjacency.get(&current) {
            for &next in neighbors {
                if !levels.contains_key(next) {
                    levels.insert(next, depth + 1);
                    queue.push_back(next);
                }
            }
        }
    }

    // Disconnected nodes render as level 1 rather than failing.
    for (id, _) in &graph.nodes {
        if !levels.contains_key(id) {
            levels.insert(id, 1);
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutProfile;
    use crate::model::DiagramKind;

    fn mindmap_with_chain() -> (GraphState, NodeId, NodeId, NodeId) {
        let profile = LayoutProfile::for_kind(DiagramKind::MindMap);
        let mut graph = GraphState::new(DiagramKind::MindMap);
        let hub = graph.add_node("Hub", "", &profile).unwrap();
        let x = graph.add_node("X", "", &profile).unwrap();
        let y = graph.add_node("Y", "", &profile).unwrap();
        graph.connect(hub, x, None).unwrap();
        graph.connect(x, y, None).unwrap();
        (graph, hub, x, y)
    }

    #[test]
    fn chain_levels_count_hops_from_hub() {
        let (graph, hub, x, y) = mindmap_with_chain();
        let levels = levels(&graph);
        assert_eq!(levels[hub], 0);
        assert_eq!(levels[x], 1);
        assert_eq!(levels[y], 2);
    }

    #[test]
    fn traversal_ignores_edge_direction() {
        let profile = LayoutProfile::for_kind(DiagramKind::MindMap);
        let mut graph = GraphState::new(DiagramKind::MindMap);
        let hub = graph.add_node("Hub", "", &profile).unwrap();
        let leaf = graph.add_node("Leaf", "", &profile).unwrap();
        // Edge points *at* the hub; the leaf is still one hop away.
        graph.connect(leaf, hub, None).unwrap();
        let levels = levels(&graph);
        assert_eq!(levels[leaf], 1);
    }

    #[test]
    fn unreachable_nodes_fall_back_to_level_one() {
        let (mut graph, _, _, _) = mindmap_with_chain();
        let profile = LayoutProfile::for_kind(DiagramKind::MindMap);
        let island = graph.add_node("Island", "", &profile).unwrap();
        let levels = levels(&graph);
        assert_eq!(levels[island], 1);
    }

    #[test]
    fn deleting_the_hub_promotes_the_earliest_survivor() {
        let (mut graph, hub, x, _) = mindmap_with_chain();
        graph.delete_node(hub);
        assert_eq!(graph.hub_node(), Some(x));
        let levels = levels(&graph);
        assert_eq!(levels[x], 0);
    }
}
