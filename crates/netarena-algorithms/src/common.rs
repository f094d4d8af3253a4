//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of an undirected graph's topology for
//! algorithm execution.

/// Dense node index (position in the caller's node arrays)
pub type NodeIndex = usize;

/// Undirected adjacency lists indexed by dense node index.
///
/// Built from scratch from an edge list; never kept in sync with the source
/// graph. Each edge contributes one entry to both of its endpoints' lists.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyList {
    /// Number of nodes
    pub node_count: usize,
    /// Neighbors: index -> vec![neighbor_index]
    pub neighbors: Vec<Vec<NodeIndex>>,
}

impl AdjacencyList {
    /// Build adjacency lists for `node_count` nodes from `(source, target)` pairs.
    ///
    /// Pairs with an endpoint outside `0..node_count` are skipped.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
    {
        let mut neighbors = vec![Vec::new(); node_count];

        for (source, target) in edges {
            if source >= node_count || target >= node_count {
                continue;
            }
            neighbors[source].push(target);
            neighbors[target].push(source);
        }

        Self {
            node_count,
            neighbors,
        }
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: NodeIndex) -> usize {
        self.neighbors[idx].len()
    }

    /// Get the neighbors of a node
    pub fn neighbors(&self, idx: NodeIndex) -> &[NodeIndex] {
        &self.neighbors[idx]
    }

    /// Whether the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }
}
