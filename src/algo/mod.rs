//! Graph analysis module
//!
//! Algorithms are implemented in the `netarena-algorithms` crate over dense
//! adjacency lists. This module builds those lists from the arena on demand
//! and assembles the statistics snapshot. Nothing here is cached: every call
//! rebuilds its working set from the arena's current arrays.

pub mod maintenance;

use crate::graph::{GraphArena, NodeIndex};
use netarena_algorithms::{AdjacencyList, DegreeSummary};
use serde::Serialize;

// Re-export algorithms
pub use maintenance::{auto_connect_nearby, keep_only_giant_component, remove_isolated_nodes};
pub use netarena_algorithms::{connected_components, ComponentResult, GiantComponent};

/// Build undirected neighbor lists sized to the arena's node count
pub fn build_adjacency_list(arena: &GraphArena) -> AdjacencyList {
    AdjacencyList::from_edges(arena.node_count(), arena.edges())
}

/// Label every node with its connected component (BFS, ascending start order)
pub fn compute_connected_components(arena: &GraphArena) -> ComponentResult {
    connected_components(&build_adjacency_list(arena))
}

/// Largest component; ties go to the first discovered. `None` when empty.
pub fn find_giant_component(arena: &GraphArena) -> Option<GiantComponent> {
    compute_connected_components(arena).giant()
}

/// Incident edge count per node
pub fn compute_degrees(arena: &GraphArena) -> Vec<usize> {
    netarena_algorithms::degrees(arena.node_count(), arena.edges())
}

/// Nodes with no incident edge, ascending
pub fn isolated_nodes(arena: &GraphArena) -> Vec<NodeIndex> {
    compute_degrees(arena)
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| i)
        .collect()
}

/// Plain statistics record, safe to cache until the arena version changes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub component_count: usize,
    pub giant_component_size: usize,
    /// Giant component share of all nodes, 0..=100
    pub giant_component_percentage: f64,
    pub average_degree: f64,
    pub isolated_node_count: usize,
    pub max_degree: usize,
    /// Arena version the snapshot was computed at
    pub version: u64,
}

pub fn compute_statistics(arena: &GraphArena) -> GraphStatistics {
    let node_count = arena.node_count();
    let degrees = compute_degrees(arena);
    let summary = DegreeSummary::from_degrees(&degrees);
    let components = compute_connected_components(arena);
    let giant_size = components.giant().map_or(0, |g| g.size);

    let giant_component_percentage = if node_count == 0 {
        0.0
    } else {
        giant_size as f64 / node_count as f64 * 100.0
    };

    GraphStatistics {
        node_count,
        edge_count: arena.edge_count(),
        component_count: components.count(),
        giant_component_size: giant_size,
        giant_component_percentage,
        average_degree: summary.average,
        isolated_node_count: summary.isolated,
        max_degree: summary.max,
        version: arena.version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_triangles() -> GraphArena {
        let mut arena = GraphArena::new();
        for i in 0..6 {
            arena.add_node(i as f32, 0.0);
        }
        for (a, b) in [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)] {
            arena.add_edge(a, b).unwrap();
        }
        arena
    }

    #[test]
    fn test_adjacency_projection() {
        let arena = two_triangles();
        let adj = build_adjacency_list(&arena);

        assert_eq!(adj.node_count, 6);
        assert!(adj.neighbors(0).contains(&1));
        assert!(adj.neighbors(0).contains(&2));
        assert_eq!(adj.degree(4), 2);
    }

    #[test]
    fn test_two_triangles() {
        let arena = two_triangles();
        let components = compute_connected_components(&arena);

        assert_eq!(components.count(), 2);
        assert_eq!(components.sizes, vec![3, 3]);

        let giant = find_giant_component(&arena).unwrap();
        assert_eq!(giant.size, 3);
        assert_eq!(giant.id, components.labels[0]);
    }

    #[test]
    fn test_statistics() {
        let mut arena = two_triangles();
        arena.add_node(100.0, 100.0);
        arena.add_edge(0, 3).unwrap();

        let stats = compute_statistics(&arena);
        assert_eq!(stats.node_count, 7);
        assert_eq!(stats.edge_count, 7);
        assert_eq!(stats.component_count, 2);
        assert_eq!(stats.giant_component_size, 6);
        assert!((stats.giant_component_percentage - 600.0 / 7.0).abs() < 1e-9);
        assert!((stats.average_degree - 2.0).abs() < 1e-9);
        assert_eq!(stats.isolated_node_count, 1);
        assert_eq!(stats.max_degree, 3);
        assert_eq!(stats.version, arena.version());
        assert_eq!(isolated_nodes(&arena), vec![6]);
    }

    #[test]
    fn test_statistics_empty() {
        let stats = compute_statistics(&GraphArena::new());
        assert_eq!(stats.component_count, 0);
        assert_eq!(stats.giant_component_size, 0);
        assert_eq!(stats.giant_component_percentage, 0.0);
        assert_eq!(stats.average_degree, 0.0);
    }

    #[test]
    fn test_statistics_serialize() {
        let stats = compute_statistics(&two_triangles());
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["component_count"], 2);
        assert_eq!(json["isolated_node_count"], 0);
    }
}
