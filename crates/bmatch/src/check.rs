//! Solver-free check of the inclusive property.

use crate::error::MatchingError;
use crate::graph::{Edge, NodeIndex, node_degrees};

/// Verdict of [`check_inclusive`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusiveReport {
    /// Whether the edge list is an inclusive matching.
    pub success: bool,
    /// Nodes whose degree differs from their capacity, ascending.
    pub deficient_nodes: Vec<NodeIndex>,
}

impl InclusiveReport {
    /// Split into `(success, deficient_nodes)`.
    pub fn into_parts(self) -> (bool, Vec<NodeIndex>) {
        (self.success, self.deficient_nodes)
    }
}

/// Check that `solution` fills every node to its capacity, except at most
/// one node which may be exactly one edge short, and overfills none.
///
/// # Errors
///
/// Returns an input-kind error if an edge references a node outside
/// `0..b_maxs.len()`.
pub fn check_inclusive(b_maxs: &[u32], solution: &[Edge]) -> Result<InclusiveReport, MatchingError> {
    let node_count = b_maxs.len();
    for &edge in solution {
        if let Some(node) = [edge.0, edge.1].into_iter().find(|&node| node >= node_count) {
            return Err(MatchingError::NodeOutOfRange {
                edge,
                node,
                node_count,
            });
        }
    }

    let degrees = node_degrees(node_count, solution);
    let deficient_nodes: Vec<NodeIndex> = degrees
        .iter()
        .zip(b_maxs)
        .enumerate()
        .filter(|(_, (degree, b_max))| degree != b_max)
        .map(|(node, _)| node)
        .collect();

    let overfilled = degrees.iter().zip(b_maxs).any(|(degree, b_max)| degree > b_max);
    let success = !overfilled
        && match deficient_nodes.as_slice() {
            [] => true,
            [node] => degrees[*node] + 1 == b_maxs[*node],
            _ => false,
        };

    Ok(InclusiveReport {
        success,
        deficient_nodes,
    })
}
