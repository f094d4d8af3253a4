//! Whole-graph maintenance passes
//!
//! These mutate the arena directly (outside the command history). Removals
//! always run from the highest index down: compaction only ever relocates
//! the last node, so every index still pending stays valid.

use super::{compute_connected_components, compute_degrees};
use crate::graph::GraphArena;
use crate::spatial::limit_sq;
use rustc_hash::FxHashSet;
use tracing::info;

/// Connect every unconnected pair of nodes within `max_distance` (inclusive).
///
/// O(n²) by construction. Existing adjacency is copied into a local set once
/// so pair checks never rescan the edge arrays. Returns the number of edges
/// added.
pub fn auto_connect_nearby(arena: &mut GraphArena, max_distance: f32) -> usize {
    let n = arena.node_count();
    let Some(limit) = limit_sq(Some(max_distance)) else {
        return 0;
    };

    let mut connected: FxHashSet<(usize, usize)> = arena
        .edges()
        .map(|(s, t)| if s < t { (s, t) } else { (t, s) })
        .collect();

    let mut added = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            if connected.contains(&(i, j)) {
                continue;
            }
            let dx = arena.xs()[i] - arena.xs()[j];
            let dy = arena.ys()[i] - arena.ys()[j];
            if dx * dx + dy * dy <= limit {
                arena.append_edge(i, j);
                connected.insert((i, j));
                added += 1;
            }
        }
    }

    info!(
        "Auto-connect within {} added {} edges ({} nodes)",
        max_distance, added, n
    );
    added
}

/// Remove every node with no incident edge. Returns the number removed.
pub fn remove_isolated_nodes(arena: &mut GraphArena) -> usize {
    let degrees = compute_degrees(arena);
    let mut removed = 0;

    for index in (0..degrees.len()).rev() {
        if degrees[index] == 0 && arena.remove_node(index).is_ok() {
            removed += 1;
        }
    }

    info!("Removed {} isolated nodes", removed);
    removed
}

/// Remove every node outside the giant component. Returns the number removed.
pub fn keep_only_giant_component(arena: &mut GraphArena) -> usize {
    let components = compute_connected_components(arena);
    let Some(giant) = components.giant() else {
        return 0;
    };

    let mut removed = 0;
    for index in (0..components.labels.len()).rev() {
        if components.labels[index] != giant.id && arena.remove_node(index).is_ok() {
            removed += 1;
        }
    }

    info!(
        "Kept giant component of {} nodes, removed {}",
        giant.size, removed
    );
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::compute_statistics;
    use crate::graph::Point;

    #[test]
    fn test_auto_connect_nearby() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        arena.add_node(1.0, 0.0);
        arena.add_node(2.0, 0.0);
        arena.add_node(10.0, 0.0);
        arena.add_edge(1, 0).unwrap();

        let added = auto_connect_nearby(&mut arena, 1.0);

        assert_eq!(added, 1);
        assert_eq!(arena.edge_count(), 2);
        assert!(arena.has_edge(1, 2));
        assert!(!arena.has_edge(0, 2));
        assert_eq!(arena.neighbors(3), Vec::<usize>::new());
    }

    #[test]
    fn test_auto_connect_is_idempotent() {
        let mut arena = GraphArena::new();
        for i in 0..5 {
            arena.add_node(i as f32, 0.0);
        }
        let first = auto_connect_nearby(&mut arena, 2.0);
        let second = auto_connect_nearby(&mut arena, 2.0);

        assert_eq!(first, 7);
        assert_eq!(second, 0);
    }

    #[test]
    fn test_auto_connect_rejects_negative_distance() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0);
        arena.add_node(0.5, 0.0);

        assert_eq!(auto_connect_nearby(&mut arena, -1.0), 0);
        assert_eq!(auto_connect_nearby(&mut arena, f32::NAN), 0);
        assert_eq!(arena.edge_count(), 0);

        // Zero still connects coincident nodes
        arena.add_node(0.0, 0.0);
        assert_eq!(auto_connect_nearby(&mut arena, 0.0), 1);
        assert!(arena.has_edge(0, 2));
    }

    #[test]
    fn test_remove_isolated_nodes() {
        let mut arena = GraphArena::new();
        arena.add_node(0.0, 0.0); // isolated
        arena.add_node(1.0, 0.0);
        arena.add_node(2.0, 0.0); // isolated
        arena.add_node(3.0, 0.0);
        arena.add_node(4.0, 0.0); // isolated
        arena.add_edge(1, 3).unwrap();

        assert_eq!(remove_isolated_nodes(&mut arena), 3);
        assert_eq!(arena.node_count(), 2);
        assert_eq!(arena.edge_count(), 1);
        assert!(arena.has_edge(0, 1));

        let mut kept = vec![arena.node_position(0).unwrap(), arena.node_position(1).unwrap()];
        kept.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(kept, vec![Point::new(1.0, 0.0), Point::new(3.0, 0.0)]);
    }

    #[test]
    fn test_keep_only_giant_component() {
        let mut arena = GraphArena::new();
        // Pair {0, 4}, triangle {1, 2, 3}, isolated 5
        for i in 0..6 {
            arena.add_node(i as f32, i as f32);
        }
        arena.add_edge(0, 4).unwrap();
        arena.add_edge(1, 2).unwrap();
        arena.add_edge(2, 3).unwrap();
        arena.add_edge(3, 1).unwrap();

        assert_eq!(keep_only_giant_component(&mut arena), 3);

        let stats = compute_statistics(&arena);
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 3);
        assert_eq!(stats.component_count, 1);

        let mut xs = arena.xs().to_vec();
        xs.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_keep_only_giant_empty() {
        let mut arena = GraphArena::new();
        assert_eq!(keep_only_giant_component(&mut arena), 0);
    }
}
