//! Degree statistics

use super::common::NodeIndex;

/// Degree of every node, from a single pass over the edge list.
///
/// Pairs with an endpoint outside `0..node_count` are skipped.
pub fn degrees<I>(node_count: usize, edges: I) -> Vec<usize>
where
    I: IntoIterator<Item = (NodeIndex, NodeIndex)>,
{
    let mut degree = vec![0usize; node_count];
    for (source, target) in edges {
        if source >= node_count || target >= node_count {
            continue;
        }
        degree[source] += 1;
        degree[target] += 1;
    }
    degree
}

/// Aggregate view of a degree array
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DegreeSummary {
    pub isolated: usize,
    pub average: f64,
    pub max: usize,
}

impl DegreeSummary {
    pub fn from_degrees(degrees: &[usize]) -> Self {
        if degrees.is_empty() {
            return Self {
                isolated: 0,
                average: 0.0,
                max: 0,
            };
        }

        let total: usize = degrees.iter().sum();
        Self {
            isolated: degrees.iter().filter(|&&d| d == 0).count(),
            average: total as f64 / degrees.len() as f64,
            max: degrees.iter().copied().max().unwrap_or(0),
        }
    }
}
