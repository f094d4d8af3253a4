//! Graph arena implementation
//!
//! This module implements the dense node/edge store with:
//! - Structure-of-arrays storage for direct bulk upload
//! - Compaction-based deletion with index remapping
//! - A monotonic version counter as the sole change signal
//! - Ephemeral selection sets stamped with the version they were taken at

pub mod arena;
pub mod selection;
pub mod types;

// Re-export main types
pub use arena::{
    GraphArena, GraphError, GraphResult, RemovedEdge, RemovedNode, DEFAULT_EDGE_CAPACITY,
    DEFAULT_NODE_CAPACITY,
};
pub use selection::Selection;
pub use types::{EdgeIndex, NodeIndex, Point};
