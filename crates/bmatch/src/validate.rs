//! Input checks that run before any model is built.
//!
//! All checks are pure and stop at the first problem found.

use crate::error::MatchingError;
use crate::graph::Weights;

/// Every capacity must be at least one.
pub fn validate_capacities(b_maxs: &[u32]) -> Result<(), MatchingError> {
    match b_maxs.iter().position(|&b_max| b_max == 0) {
        Some(node) => Err(MatchingError::NonPositiveCapacity { node }),
        None => Ok(()),
    }
}

/// Every edge must join nodes in `0..node_count` and carry a finite,
/// non-negative weight.
pub fn validate_weights(weights: &Weights, node_count: usize) -> Result<(), MatchingError> {
    for (&edge, &weight) in weights {
        let (i, j) = edge;
        if let Some(node) = [i, j].into_iter().find(|&node| node >= node_count) {
            return Err(MatchingError::NodeOutOfRange {
                edge,
                node,
                node_count,
            });
        }
        if !weight.is_finite() {
            return Err(MatchingError::NonFiniteWeight { edge, weight });
        }
        if weight < 0.0 {
            return Err(MatchingError::NegativeWeight { edge, weight });
        }
    }
    Ok(())
}

/// The edges must form a complete graph on `node_count` nodes: exactly one
/// edge per unordered pair, in either direction, and nothing else.
pub fn validate_full_connectivity(
    weights: &Weights,
    node_count: usize,
) -> Result<(), MatchingError> {
    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let forward = weights.contains_key(&(i, j));
            let backward = weights.contains_key(&(j, i));
            if !forward && !backward {
                return Err(MatchingError::MissingEdge { pair: (i, j) });
            }
            if forward && backward {
                return Err(MatchingError::DuplicatedEdge { pair: (i, j) });
            }
        }
    }

    // Self-loops and edges to unknown nodes only show up in the count.
    let expected = node_count * node_count.saturating_sub(1) / 2;
    if weights.len() != expected {
        return Err(MatchingError::WrongEdgeCount {
            expected,
            got: weights.len(),
        });
    }
    Ok(())
}
