//! Ephemeral node/edge selection
//!
//! A selection holds raw arena indices, which any mutation may reassign. It
//! remembers the arena version it was taken at so holders can tell when it
//! must be recomputed or dropped; it is never patched up after a mutation.

use super::arena::GraphArena;
use super::types::{EdgeIndex, NodeIndex};
use crate::history::Command;
use crate::spatial::{self, BoundingBox};
use rustc_hash::FxHashSet;

#[derive(Debug, Clone, Default)]
pub struct Selection {
    nodes: FxHashSet<NodeIndex>,
    edges: FxHashSet<EdgeIndex>,
    version: u64,
}

impl Selection {
    /// Empty selection valid for the arena's current version
    pub fn new(arena: &GraphArena) -> Self {
        Selection {
            nodes: FxHashSet::default(),
            edges: FxHashSet::default(),
            version: arena.version(),
        }
    }

    /// Nodes inside `bbox`
    pub fn from_box(arena: &GraphArena, bbox: &BoundingBox) -> Self {
        let mut selection = Self::new(arena);
        selection.nodes.extend(spatial::find_nodes_in_box(arena, bbox));
        selection
    }

    /// Nodes within `radius` of `(x, y)`
    pub fn from_radius(arena: &GraphArena, x: f32, y: f32, radius: f32) -> Self {
        let mut selection = Self::new(arena);
        selection.nodes.extend(spatial::find_nodes_in_radius(arena, x, y, radius));
        selection
    }

    /// True once the arena has changed since this selection was taken
    pub fn is_stale(&self, arena: &GraphArena) -> bool {
        self.version != arena.version()
    }

    /// Version the indices refer to
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn select_node(&mut self, index: NodeIndex) -> bool {
        self.nodes.insert(index)
    }

    pub fn select_edge(&mut self, index: EdgeIndex) -> bool {
        self.edges.insert(index)
    }

    /// Flip membership; returns whether the node is now selected
    pub fn toggle_node(&mut self, index: NodeIndex) -> bool {
        if !self.nodes.remove(&index) {
            self.nodes.insert(index);
            return true;
        }
        false
    }

    pub fn toggle_edge(&mut self, index: EdgeIndex) -> bool {
        if !self.edges.remove(&index) {
            self.edges.insert(index);
            return true;
        }
        false
    }

    pub fn contains_node(&self, index: NodeIndex) -> bool {
        self.nodes.contains(&index)
    }

    pub fn contains_edge(&self, index: EdgeIndex) -> bool {
        self.edges.contains(&index)
    }

    pub fn nodes(&self) -> &FxHashSet<NodeIndex> {
        &self.nodes
    }

    pub fn edges(&self) -> &FxHashSet<EdgeIndex> {
        &self.edges
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len() + self.edges.len()
    }

    /// Empty the selection and re-stamp it with the arena's current version
    pub fn clear(&mut self, arena: &GraphArena) {
        self.nodes.clear();
        self.edges.clear();
        self.version = arena.version();
    }

    /// Composite command deleting everything selected
    pub fn to_batch_delete(&self) -> Command {
        Command::batch_delete(self.nodes.iter().copied(), self.edges.iter().copied())
    }
}
