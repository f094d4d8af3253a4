//! In-memory graph arena
//!
//! Nodes and edges live in parallel, zero-filled arrays sized to the current
//! capacity; only the first `node_count` / `edge_count` slots are live.
//! Removal keeps the arrays dense by moving the last element into the freed
//! slot, so a node removal reassigns exactly one node's index and rewrites
//! every edge endpoint that referred to it.

use super::types::{EdgeIndex, NodeIndex, Point};
use crate::config::ArenaConfig;
use thiserror::Error;
use tracing::{debug, info, trace};

/// Initial node slots when no configuration is supplied
pub const DEFAULT_NODE_CAPACITY: usize = 1024;

/// Initial edge slots when no configuration is supplied
pub const DEFAULT_EDGE_CAPACITY: usize = 4096;

/// Errors that can occur during arena operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node index {index} out of range (node count {count})")]
    NodeOutOfRange { index: NodeIndex, count: usize },

    #[error("Edge index {index} out of range (edge count {count})")]
    EdgeOutOfRange { index: EdgeIndex, count: usize },

    #[error("Invalid edge: self-loop on node {0}")]
    SelfLoop(NodeIndex),

    #[error("Invalid edge: nodes {a} and {b} are already connected")]
    DuplicateEdge { a: NodeIndex, b: NodeIndex },

    #[error("Bulk load rejected: edge {edge} references a node outside 0..{node_count}")]
    BulkEdgeOutOfRange { edge: usize, node_count: usize },

    #[error("Command '{0}' has not been executed")]
    NotExecuted(&'static str),

    #[error("Cannot restore slot {index}: arena holds {actual} elements, expected {expected}")]
    RestoreMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

impl GraphError {
    /// True for the out-of-range family, which callers treat as a no-op
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            GraphError::NodeOutOfRange { .. } | GraphError::EdgeOutOfRange { .. }
        )
    }
}

pub type GraphResult<T> = Result<T, GraphError>;

/// An edge as it was stored right before removal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemovedEdge {
    pub index: EdgeIndex,
    pub source: NodeIndex,
    pub target: NodeIndex,
}

/// Everything needed to put a removed node back exactly where it was
#[derive(Debug, Clone, PartialEq)]
pub struct RemovedNode {
    pub index: NodeIndex,
    pub position: Point,
    pub velocity: Point,
    /// Index of the last live node before removal; that node now occupies
    /// `index` (equal to `index` when nothing moved).
    pub relocated_from: NodeIndex,
    /// Incident edges in the order they were removed
    pub edges: Vec<RemovedEdge>,
}

/// Dense structure-of-arrays node/edge store
///
/// - xs, ys: node positions
/// - vxs, vys: velocity scratch owned by an external integrator
/// - sources, targets: edge endpoints (unordered pair per edge)
#[derive(Debug, Clone)]
pub struct GraphArena {
    xs: Vec<f32>,
    ys: Vec<f32>,
    vxs: Vec<f32>,
    vys: Vec<f32>,

    sources: Vec<u32>,
    targets: Vec<u32>,

    node_count: usize,
    edge_count: usize,

    /// Bumped on every structural or positional mutation
    version: u64,
}

impl GraphArena {
    /// Create an arena with the default starting capacities
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NODE_CAPACITY, DEFAULT_EDGE_CAPACITY)
    }

    /// Create an arena with explicit starting capacities
    pub fn with_capacity(node_capacity: usize, edge_capacity: usize) -> Self {
        GraphArena {
            xs: vec![0.0; node_capacity],
            ys: vec![0.0; node_capacity],
            vxs: vec![0.0; node_capacity],
            vys: vec![0.0; node_capacity],
            sources: vec![0; edge_capacity],
            targets: vec![0; edge_capacity],
            node_count: 0,
            edge_count: 0,
            version: 0,
        }
    }

    pub fn with_config(config: &ArenaConfig) -> Self {
        Self::with_capacity(config.initial_node_capacity, config.initial_edge_capacity)
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn node_capacity(&self) -> usize {
        self.xs.len()
    }

    pub fn edge_capacity(&self) -> usize {
        self.sources.len()
    }

    /// Monotonic change counter; differs between two reads iff a mutation happened
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    fn check_node(&self, index: NodeIndex) -> GraphResult<()> {
        if index >= self.node_count {
            return Err(GraphError::NodeOutOfRange {
                index,
                count: self.node_count,
            });
        }
        Ok(())
    }

    fn check_edge(&self, index: EdgeIndex) -> GraphResult<()> {
        if index >= self.edge_count {
            return Err(GraphError::EdgeOutOfRange {
                index,
                count: self.edge_count,
            });
        }
        Ok(())
    }

    /// Double node capacity until it holds `required` slots
    fn reserve_nodes(&mut self, required: usize) {
        let old = self.node_capacity();
        if required <= old {
            return;
        }
        let mut capacity = old;
        while capacity < required {
            capacity = (capacity * 2).max(1);
        }
        debug!("Growing node capacity {} -> {}", old, capacity);
        self.xs.resize(capacity, 0.0);
        self.ys.resize(capacity, 0.0);
        self.vxs.resize(capacity, 0.0);
        self.vys.resize(capacity, 0.0);
    }

    /// Double edge capacity until it holds `required` slots
    fn reserve_edges(&mut self, required: usize) {
        let old = self.edge_capacity();
        if required <= old {
            return;
        }
        let mut capacity = old;
        while capacity < required {
            capacity = (capacity * 2).max(1);
        }
        debug!("Growing edge capacity {} -> {}", old, capacity);
        self.sources.resize(capacity, 0);
        self.targets.resize(capacity, 0);
    }

    fn copy_node(&mut self, from: NodeIndex, to: NodeIndex) {
        self.xs[to] = self.xs[from];
        self.ys[to] = self.ys[from];
        self.vxs[to] = self.vxs[from];
        self.vys[to] = self.vys[from];
    }

    /// Rewrite every live edge endpoint equal to `from` into `to`
    fn remap_endpoints(&mut self, from: NodeIndex, to: NodeIndex) {
        let (from, to) = (from as u32, to as u32);
        for e in 0..self.edge_count {
            if self.sources[e] == from {
                self.sources[e] = to;
            }
            if self.targets[e] == from {
                self.targets[e] = to;
            }
        }
    }

    // ---------------------------------------------------------------
    // Nodes
    // ---------------------------------------------------------------

    /// Append a node with zero velocity and return its index
    pub fn add_node(&mut self, x: f32, y: f32) -> NodeIndex {
        let index = self.node_count;
        self.reserve_nodes(index + 1);

        self.xs[index] = x;
        self.ys[index] = y;
        self.vxs[index] = 0.0;
        self.vys[index] = 0.0;

        self.node_count += 1;
        self.touch();
        trace!("Added node {} at ({}, {})", index, x, y);
        index
    }

    /// Overwrite a node's position; velocity is left untouched
    pub fn update_node(&mut self, index: NodeIndex, x: f32, y: f32) -> GraphResult<()> {
        self.check_node(index)?;
        self.xs[index] = x;
        self.ys[index] = y;
        self.touch();
        Ok(())
    }

    pub fn node_position(&self, index: NodeIndex) -> Option<Point> {
        (index < self.node_count).then(|| Point::new(self.xs[index], self.ys[index]))
    }

    pub fn node_velocity(&self, index: NodeIndex) -> Option<Point> {
        (index < self.node_count).then(|| Point::new(self.vxs[index], self.vys[index]))
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Incident edges go first, scanned from the highest edge index down so
    /// that edge compaction never skips a candidate. If `index` is not the
    /// last node, the last node is moved into `index` and every endpoint
    /// referring to its old index is rewritten.
    pub fn remove_node(&mut self, index: NodeIndex) -> GraphResult<RemovedNode> {
        self.check_node(index)?;

        let target = index as u32;
        let mut edges = Vec::new();
        for e in (0..self.edge_count).rev() {
            if self.sources[e] == target || self.targets[e] == target {
                edges.push(self.swap_remove_edge(e));
            }
        }

        let last = self.node_count - 1;
        let removed = RemovedNode {
            index,
            position: Point::new(self.xs[index], self.ys[index]),
            velocity: Point::new(self.vxs[index], self.vys[index]),
            relocated_from: last,
            edges,
        };

        if index != last {
            self.copy_node(last, index);
            self.remap_endpoints(last, index);
            debug!("Removed node {}; relocated node {} into its slot", index, last);
        } else {
            trace!("Removed last node {}", index);
        }

        self.xs[last] = 0.0;
        self.ys[last] = 0.0;
        self.vxs[last] = 0.0;
        self.vys[last] = 0.0;

        self.node_count -= 1;
        self.touch();
        Ok(removed)
    }

    /// Exact inverse of [`remove_node`](Self::remove_node).
    ///
    /// The node currently occupying `removed.index` is moved back to the end
    /// (endpoints remapped), the removed node is written into its original
    /// slot, and its incident edges are restored at their original edge
    /// indices. Fails without mutating if the arena's shape no longer matches
    /// the state right after the removal.
    pub fn restore_node(&mut self, removed: &RemovedNode) -> GraphResult<()> {
        let index = removed.index;
        if index > self.node_count {
            return Err(GraphError::NodeOutOfRange {
                index,
                count: self.node_count,
            });
        }
        if removed.relocated_from != self.node_count {
            return Err(GraphError::RestoreMismatch {
                index,
                expected: removed.relocated_from,
                actual: self.node_count,
            });
        }

        let restored_count = self.node_count + 1;
        let mut edge_count = self.edge_count;
        for edge in removed.edges.iter().rev() {
            if edge.index > edge_count {
                return Err(GraphError::EdgeOutOfRange {
                    index: edge.index,
                    count: edge_count,
                });
            }
            for endpoint in [edge.source, edge.target] {
                if endpoint >= restored_count {
                    return Err(GraphError::NodeOutOfRange {
                        index: endpoint,
                        count: restored_count,
                    });
                }
            }
            edge_count += 1;
        }

        self.reserve_nodes(restored_count);
        let slot = self.node_count;
        if index != slot {
            self.copy_node(index, slot);
            self.remap_endpoints(index, slot);
        }
        self.xs[index] = removed.position.x;
        self.ys[index] = removed.position.y;
        self.vxs[index] = removed.velocity.x;
        self.vys[index] = removed.velocity.y;
        self.node_count = restored_count;

        for edge in removed.edges.iter().rev() {
            self.insert_edge_at(edge);
        }

        self.touch();
        debug!("Restored node {} with {} edges", index, removed.edges.len());
        Ok(())
    }

    // ---------------------------------------------------------------
    // Edges
    // ---------------------------------------------------------------

    /// Connect two nodes.
    ///
    /// Rejects out-of-range endpoints, self-loops and pairs that are already
    /// connected in either orientation.
    pub fn add_edge(&mut self, source: NodeIndex, target: NodeIndex) -> GraphResult<EdgeIndex> {
        self.check_node(source)?;
        self.check_node(target)?;
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if self.has_edge(source, target) {
            return Err(GraphError::DuplicateEdge {
                a: source,
                b: target,
            });
        }
        Ok(self.append_edge(source, target))
    }

    /// Append an edge the caller has already validated
    pub(crate) fn append_edge(&mut self, source: NodeIndex, target: NodeIndex) -> EdgeIndex {
        debug_assert!(source < self.node_count && target < self.node_count);
        debug_assert_ne!(source, target);

        let index = self.edge_count;
        self.reserve_edges(index + 1);
        self.sources[index] = source as u32;
        self.targets[index] = target as u32;
        self.edge_count += 1;
        self.touch();
        trace!("Added edge {} ({}, {})", index, source, target);
        index
    }

    /// Remove an edge, moving the last edge into its slot
    pub fn remove_edge(&mut self, index: EdgeIndex) -> GraphResult<RemovedEdge> {
        self.check_edge(index)?;
        Ok(self.swap_remove_edge(index))
    }

    fn swap_remove_edge(&mut self, index: EdgeIndex) -> RemovedEdge {
        let removed = RemovedEdge {
            index,
            source: self.sources[index] as usize,
            target: self.targets[index] as usize,
        };

        let last = self.edge_count - 1;
        if index != last {
            self.sources[index] = self.sources[last];
            self.targets[index] = self.targets[last];
        }
        self.edge_count -= 1;
        self.touch();
        trace!("Removed edge {} ({}, {})", index, removed.source, removed.target);
        removed
    }

    /// Exact inverse of [`remove_edge`](Self::remove_edge): the edge now at
    /// `removed.index` goes back to the end and the removed edge returns to
    /// its original slot.
    pub fn restore_edge(&mut self, removed: &RemovedEdge) -> GraphResult<()> {
        if removed.index > self.edge_count {
            return Err(GraphError::EdgeOutOfRange {
                index: removed.index,
                count: self.edge_count,
            });
        }
        self.check_node(removed.source)?;
        self.check_node(removed.target)?;
        if removed.source == removed.target {
            return Err(GraphError::SelfLoop(removed.source));
        }
        if self.has_edge(removed.source, removed.target) {
            return Err(GraphError::DuplicateEdge {
                a: removed.source,
                b: removed.target,
            });
        }

        self.insert_edge_at(removed);
        self.touch();
        Ok(())
    }

    fn insert_edge_at(&mut self, edge: &RemovedEdge) {
        let slot = self.edge_count;
        self.reserve_edges(slot + 1);
        if edge.index != slot {
            self.sources[slot] = self.sources[edge.index];
            self.targets[slot] = self.targets[edge.index];
        }
        self.sources[edge.index] = edge.source as u32;
        self.targets[edge.index] = edge.target as u32;
        self.edge_count += 1;
    }

    pub fn edge_endpoints(&self, index: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        (index < self.edge_count)
            .then(|| (self.sources[index] as usize, self.targets[index] as usize))
    }

    /// Find the edge connecting `a` and `b` in either orientation (linear scan)
    pub fn find_edge(&self, a: NodeIndex, b: NodeIndex) -> Option<EdgeIndex> {
        if a >= self.node_count || b >= self.node_count {
            return None;
        }
        let (a, b) = (a as u32, b as u32);
        (0..self.edge_count).find(|&e| {
            let (s, t) = (self.sources[e], self.targets[e]);
            (s == a && t == b) || (s == b && t == a)
        })
    }

    pub fn has_edge(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.find_edge(a, b).is_some()
    }

    /// Adjacent node indices, in edge order (linear scan)
    pub fn neighbors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let node = index as u32;
        let mut result = Vec::new();
        if index >= self.node_count {
            return result;
        }
        for e in 0..self.edge_count {
            if self.sources[e] == node {
                result.push(self.targets[e] as usize);
            } else if self.targets[e] == node {
                result.push(self.sources[e] as usize);
            }
        }
        result
    }

    /// Incident edge indices, ascending (linear scan)
    pub fn edges_for_node(&self, index: NodeIndex) -> Vec<EdgeIndex> {
        if index >= self.node_count {
            return Vec::new();
        }
        let node = index as u32;
        (0..self.edge_count)
            .filter(|&e| self.sources[e] == node || self.targets[e] == node)
            .collect()
    }

    /// Live edges as `(source, target)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.sources()
            .iter()
            .zip(self.targets())
            .map(|(&s, &t)| (s as usize, t as usize))
    }

    // ---------------------------------------------------------------
    // Bulk access
    // ---------------------------------------------------------------

    /// Replace the whole arena contents in one step.
    ///
    /// Every endpoint is validated before anything is touched; capacities
    /// grow by doubling until the new data fits and never shrink.
    pub fn reset_and_load(
        &mut self,
        positions: &[[f32; 2]],
        endpoints: &[[u32; 2]],
    ) -> GraphResult<()> {
        let node_count = positions.len();
        if let Some(edge) = endpoints
            .iter()
            .position(|&[s, t]| s as usize >= node_count || t as usize >= node_count)
        {
            return Err(GraphError::BulkEdgeOutOfRange { edge, node_count });
        }

        self.node_count = 0;
        self.edge_count = 0;
        self.reserve_nodes(node_count);
        self.reserve_edges(endpoints.len());

        for (i, &[x, y]) in positions.iter().enumerate() {
            self.xs[i] = x;
            self.ys[i] = y;
        }
        self.vxs[..node_count].fill(0.0);
        self.vys[..node_count].fill(0.0);

        for (e, &[s, t]) in endpoints.iter().enumerate() {
            self.sources[e] = s;
            self.targets[e] = t;
        }

        self.node_count = node_count;
        self.edge_count = endpoints.len();
        self.touch();
        info!(
            "Bulk loaded {} nodes and {} edges (capacity {}/{})",
            self.node_count,
            self.edge_count,
            self.node_capacity(),
            self.edge_capacity()
        );
        Ok(())
    }

    /// Drop all nodes and edges, keeping capacity
    pub fn clear(&mut self) {
        self.node_count = 0;
        self.edge_count = 0;
        self.touch();
    }

    pub fn xs(&self) -> &[f32] {
        &self.xs[..self.node_count]
    }

    pub fn ys(&self) -> &[f32] {
        &self.ys[..self.node_count]
    }

    pub fn vxs(&self) -> &[f32] {
        &self.vxs[..self.node_count]
    }

    pub fn vys(&self) -> &[f32] {
        &self.vys[..self.node_count]
    }

    pub fn sources(&self) -> &[u32] {
        &self.sources[..self.edge_count]
    }

    pub fn targets(&self) -> &[u32] {
        &self.targets[..self.edge_count]
    }

    /// Velocity scratch for an external integrator. Writing here does not
    /// bump `version`; no core algorithm reads it.
    pub fn velocities_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        let n = self.node_count;
        (&mut self.vxs[..n], &mut self.vys[..n])
    }
}

impl Default for GraphArena {
    fn default() -> Self {
        Self::new()
    }
}
