//! Netarena
//!
//! Live topology and geometry store for large node/edge networks that are
//! visualized, edited and analyzed at the same time.
//!
//! # Architecture
//!
//! - [`graph`]: the dense structure-of-arrays [`GraphArena`]. Node identity is
//!   the array index; removals compact the arrays and remap one node. A single
//!   version counter is the only change signal for external consumers.
//! - [`spatial`]: brute-force hit-testing (nearest node/edge, radius, box).
//! - [`algo`]: on-demand adjacency, BFS connected components, statistics and
//!   whole-graph maintenance passes, backed by `netarena-algorithms`.
//! - [`history`]: reversible [`Command`]s and the bounded [`CommandHistory`].
//! - [`config`]: YAML-loadable [`ArenaConfig`].
//!
//! Everything is single-threaded and synchronous; callers serialize all
//! mutation through one thread.
//!
//! ## Example Usage
//!
//! ```rust
//! use netarena::{Command, CommandHistory, GraphArena};
//! use netarena::algo::compute_statistics;
//! use netarena::spatial::find_nearest_node;
//!
//! let mut arena = GraphArena::new();
//! let mut history = CommandHistory::new();
//!
//! history.execute(&mut arena, Command::add_node(0.0, 0.0)).unwrap();
//! history.execute(&mut arena, Command::add_node(10.0, 0.0)).unwrap();
//! history.execute(&mut arena, Command::add_edge(0, 1)).unwrap();
//!
//! assert_eq!(find_nearest_node(&arena, 8.0, 1.0, None), Some(1));
//! assert_eq!(compute_statistics(&arena).component_count, 1);
//!
//! history.undo(&mut arena).unwrap();
//! assert_eq!(arena.edge_count(), 0);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod history;
pub mod spatial;

// Re-export main types for convenience
pub use algo::GraphStatistics;
pub use config::{ArenaConfig, ConfigError, ConfigResult};
pub use graph::{
    EdgeIndex, GraphArena, GraphError, GraphResult, NodeIndex, Point, RemovedEdge, RemovedNode,
    Selection,
};
pub use history::{Command, CommandHistory};
pub use spatial::BoundingBox;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
