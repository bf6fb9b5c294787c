//! Graph vocabulary shared by every stage.

use std::collections::BTreeMap;

/// Zero-based node position in the capacity list.
pub type NodeIndex = usize;

/// Undirected edge, stored as the ordered key it was supplied under.
pub type Edge = (NodeIndex, NodeIndex);

/// Edge weights keyed by edge.
///
/// Iteration order (ascending `(i, j)`) is the order in which selected edges
/// are reported.
pub type Weights = BTreeMap<Edge, f64>;

/// Count how many edges touch each node.
///
/// Both endpoints are incremented, so a self-loop adds two to its node.
/// Edges referencing nodes outside `0..node_count` are ignored; callers that
/// need them reported validate first.
pub fn node_degrees(node_count: usize, edges: &[Edge]) -> Vec<u32> {
    let mut degrees = vec![0u32; node_count];
    for &(i, j) in edges {
        for node in [i, j] {
            if let Some(degree) = degrees.get_mut(node) {
                *degree += 1;
            }
        }
    }
    degrees
}

/// Total weight of `edges`; edges missing from `weights` count as zero.
pub fn matching_weight(weights: &Weights, edges: &[Edge]) -> f64 {
    edges
        .iter()
        .filter_map(|edge| weights.get(edge))
        .sum()
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn degrees_count_both_endpoints() {
        assert_eq!(node_degrees(4, &[(0, 1), (1, 2), (2, 0)]), vec![2, 2, 2, 0]);
    }

    #[test]
    fn self_loop_counts_twice() {
        assert_eq!(node_degrees(2, &[(1, 1)]), vec![0, 2]);
    }

    #[test]
    fn out_of_range_endpoints_are_skipped() {
        assert_eq!(node_degrees(2, &[(0, 5)]), vec![1, 0]);
        assert!(node_degrees(0, &[]).is_empty());
    }

    #[test]
    fn weight_sums_selected_edges() {
        let weights = Weights::from([((0, 1), 3.0), ((0, 2), 2.0), ((1, 2), 1.5)]);
        assert_eq!(matching_weight(&weights, &[(0, 1), (1, 2)]), 4.5);
        assert_eq!(matching_weight(&weights, &[(2, 1)]), 0.0);
        assert_eq!(matching_weight(&weights, &[]), 0.0);
    }
}
