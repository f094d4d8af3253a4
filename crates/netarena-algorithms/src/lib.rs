pub mod common;
pub mod community;
pub mod topology;

pub use common::{AdjacencyList, NodeIndex};
pub use community::{connected_components, ComponentResult, GiantComponent};
pub use topology::{degrees, DegreeSummary};
