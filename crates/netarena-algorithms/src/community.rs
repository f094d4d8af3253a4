//! Connected components
//!
//! Breadth-first labeling over an undirected [`AdjacencyList`].

use super::common::{AdjacencyList, NodeIndex};
use std::collections::VecDeque;

/// Result of connected components labeling
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ComponentResult {
    /// Component id per node index
    pub labels: Vec<usize>,
    /// Component sizes ordered by discovery (ascending first-node index)
    pub sizes: Vec<usize>,
}

/// The largest connected component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GiantComponent {
    pub id: usize,
    pub size: usize,
}

impl ComponentResult {
    /// Number of components found
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Component with the maximum size.
    ///
    /// Ties go to the component discovered first, i.e. the one whose
    /// lowest node index is smallest. `None` for an empty graph.
    pub fn giant(&self) -> Option<GiantComponent> {
        let mut best: Option<GiantComponent> = None;
        for (id, &size) in self.sizes.iter().enumerate() {
            match best {
                Some(b) if size <= b.size => {}
                _ => best = Some(GiantComponent { id, size }),
            }
        }
        best
    }

    /// Node indices labeled with `component`, ascending
    pub fn members(&self, component: usize) -> Vec<NodeIndex> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == component)
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Connected components via breadth-first search.
///
/// Nodes are scanned in ascending index order; each unlabeled node seeds a
/// new component id, so ids and `sizes` follow discovery order.
pub fn connected_components(adj: &AdjacencyList) -> ComponentResult {
    const UNLABELED: usize = usize::MAX;

    let n = adj.node_count;
    let mut labels = vec![UNLABELED; n];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for start in 0..n {
        if labels[start] != UNLABELED {
            continue;
        }

        let component = sizes.len();
        let mut size = 0;
        labels[start] = component;
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            size += 1;
            for &next in adj.neighbors(current) {
                if labels[next] == UNLABELED {
                    labels[next] = component;
                    queue.push_back(next);
                }
            }
        }

        sizes.push(size);
    }

    ComponentResult { labels, sizes }
}
