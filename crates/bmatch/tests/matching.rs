#![cfg(feature = "highs")]
#![allow(clippy::float_cmp)]

use bmatch::{
    MatchingConfig, MatchingError, Weights, check_inclusive, inclusive_matching,
    matching_weight, maximize_weighted_b_matching, maximize_weighted_b_matching_with,
    node_degrees,
};
use bmatch_highs::HighsSolver;

fn triangle() -> Weights {
    Weights::from([((0, 1), 1.0), ((1, 2), 1.0), ((2, 0), 1.0)])
}

fn complete_graph(nodes: usize, weight: f64) -> Weights {
    let mut weights = Weights::new();
    for i in 0..nodes {
        for j in (i + 1)..nodes {
            weights.insert((i, j), weight);
        }
    }
    weights
}

fn hub_weights() -> Weights {
    Weights::from([
        ((0, 1), 3.0),
        ((0, 2), 2.0),
        ((0, 3), 1.0),
        ((1, 2), 1.0),
        ((1, 3), 1.0),
        ((2, 3), 1.0),
    ])
}

#[test]
fn test_triangle_unit_capacity() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let edges = maximize_weighted_b_matching(&[1, 1, 1], &triangle(), 0, None).unwrap();
    assert_eq!(edges.len(), 1);
    assert!(triangle().contains_key(&edges[0]));
}

#[test]
fn test_triangle_unit_capacity_with_b_min_is_infeasible() {
    let err = maximize_weighted_b_matching(&[1, 1, 1], &triangle(), 1, None).unwrap_err();
    assert!(err.is_solver_error(), "unexpected error: {err}");
}

#[test]
fn test_triangle_capacity_two() {
    let edges = maximize_weighted_b_matching(&[2, 2, 2], &triangle(), 0, None).unwrap();
    assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
}

#[test]
fn test_complete_four_unit_capacity() {
    let edges = maximize_weighted_b_matching(&[1, 1, 1, 1], &complete_graph(4, 1.0), 0, None)
        .unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(node_degrees(4, &edges), vec![1, 1, 1, 1]);
}

#[test]
fn test_complete_four_capacity_two() {
    let edges = maximize_weighted_b_matching(&[2, 2, 2, 2], &complete_graph(4, 1.0), 0, None)
        .unwrap();
    assert_eq!(edges.len(), 4);
    assert_eq!(node_degrees(4, &edges), vec![2, 2, 2, 2]);
}

#[test]
fn test_hub_graph() {
    let edges = maximize_weighted_b_matching(&[2, 1, 1, 1], &hub_weights(), 0, None).unwrap();
    assert_eq!(edges, vec![(0, 1), (0, 2)]);

    let edges = maximize_weighted_b_matching(&[2, 1, 1, 1], &hub_weights(), 1, None).unwrap();
    assert_eq!(edges, vec![(0, 1), (2, 3)]);
}

#[test]
fn test_inclusive_matching() {
    let edges = inclusive_matching(&[1, 1, 1], &triangle(), None).unwrap();
    assert_eq!(edges.len(), 1);

    let edges = inclusive_matching(&[2, 1, 1, 1], &hub_weights(), None).unwrap();
    assert_eq!(edges, vec![(0, 1), (2, 3)]);
    assert!(check_inclusive(&[2, 1, 1, 1], &edges).unwrap().success);
}

#[test]
fn test_bad_capacity() {
    let err = maximize_weighted_b_matching(&[1, 2, 3, 0], &Weights::new(), 0, None).unwrap_err();
    assert_eq!(err, MatchingError::NonPositiveCapacity { node: 3 });
}

#[test]
fn test_edge_out_of_range() {
    let weights = Weights::from([((0, 1), 1.0), ((1, 3), 1.0)]);
    let err = maximize_weighted_b_matching(&[1, 1, 1], &weights, 0, None).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_negative_weight() {
    let weights = Weights::from([((0, 1), 1.0), ((1, 2), -1.0)]);
    let err = maximize_weighted_b_matching(&[1, 1, 1], &weights, 0, None).unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_inclusive_rejects_self_edge_and_duplicates() {
    let self_edge = Weights::from([((0, 1), 1.0), ((1, 1), 1.0)]);
    assert!(
        inclusive_matching(&[1, 1], &self_edge, None)
            .unwrap_err()
            .is_invalid_input()
    );

    let duplicated = Weights::from([((0, 1), 1.0), ((1, 0), 1.0), ((1, 2), 1.0)]);
    assert!(
        inclusive_matching(&[1, 1, 1], &duplicated, None)
            .unwrap_err()
            .is_invalid_input()
    );
}

#[test]
fn test_repeated_solves_agree_on_weight() {
    let mut weights = Weights::new();
    for i in 0..8usize {
        for j in (i + 1)..8 {
            weights.insert((i, j), ((i * 7 + j * 3) % 5) as f64 + 0.5);
        }
    }
    let b_maxs = [1, 2, 3, 1, 1, 2, 1, 1];

    let first = maximize_weighted_b_matching(&b_maxs, &weights, 0, None).unwrap();
    let second = maximize_weighted_b_matching(&b_maxs, &weights, 0, None).unwrap();
    assert!((matching_weight(&weights, &first) - matching_weight(&weights, &second)).abs() < 1e-9);
    for (degree, b_max) in node_degrees(b_maxs.len(), &first).iter().zip(b_maxs) {
        assert!(*degree <= b_max);
    }
}

#[test]
fn test_timeout_still_returns_valid_matching() {
    let weights = complete_graph(12, 1.0);
    let b_maxs = [3; 12];
    let config = MatchingConfig::new().with_timeout_ms(2_000);

    let edges =
        maximize_weighted_b_matching_with(&mut HighsSolver::new(), &b_maxs, &weights, &config)
            .unwrap();
    assert_eq!(edges.len(), 18);
    assert!(node_degrees(12, &edges).iter().all(|&degree| degree == 3));
}
