//! Inclusive matching on complete graphs.
//!
//! The policy is a single fixed choice of `b_min`: one when some node may
//! take more than one edge, zero otherwise. There is no retry. If the chosen
//! lower bound turns out infeasible the solver error is returned as is, and
//! a caller wanting a fallback can rerun the plain matching with `b_min = 0`.

use crate::config::MatchingConfig;
use crate::error::MatchingError;
use crate::graph::{Edge, Weights};
use crate::solve::maximize_weighted_b_matching_with;
use crate::validate::validate_full_connectivity;
use bmatch_core::Solver;
use tracing::debug;

/// Lower degree bound used by inclusive matching for these capacities.
pub fn inclusive_b_min(b_maxs: &[u32]) -> u32 {
    if b_maxs.iter().any(|&b_max| b_max > 1) {
        1
    } else {
        0
    }
}

/// Inclusive matching with an explicit solver and options.
///
/// `config.b_min` is ignored and replaced by [`inclusive_b_min`].
///
/// # Errors
///
/// Returns an input-kind error unless `weights` holds exactly one edge per
/// node pair, plus every error of [`maximize_weighted_b_matching_with`].
pub fn inclusive_matching_with<S>(
    solver: &mut S,
    b_maxs: &[u32],
    weights: &Weights,
    config: &MatchingConfig,
) -> Result<Vec<Edge>, MatchingError>
where
    S: Solver + ?Sized,
{
    validate_full_connectivity(weights, b_maxs.len())?;

    let b_min = inclusive_b_min(b_maxs);
    debug!(
        component = "matching",
        operation = "inclusive_matching",
        status = "start",
        nodes = b_maxs.len(),
        edges = weights.len(),
        b_min,
        "Chose lower degree bound"
    );

    let config = config.clone().with_b_min(b_min);
    maximize_weighted_b_matching_with(solver, b_maxs, weights, &config)
}

/// Inclusive matching solved with HiGHS.
///
/// Every node reaches its capacity except at most one, which may fall one
/// short, whenever that is achievable under the fixed `b_min` policy.
#[cfg(feature = "highs")]
pub fn inclusive_matching(
    b_maxs: &[u32],
    weights: &Weights,
    timeout_ms: Option<u64>,
) -> Result<Vec<Edge>, MatchingError> {
    let config = MatchingConfig::new().with_optional_timeout_ms(timeout_ms);
    let mut solver = bmatch_highs::HighsSolver::new();
    inclusive_matching_with(&mut solver, b_maxs, weights, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::check_inclusive;
    use crate::fixture::FixtureSolver;

    fn triangle() -> Weights {
        Weights::from([((0, 1), 1.0), ((1, 2), 1.0), ((2, 0), 1.0)])
    }

    #[test]
    fn b_min_policy() {
        assert_eq!(inclusive_b_min(&[1, 1, 1]), 0);
        assert_eq!(inclusive_b_min(&[1, 2, 1]), 1);
        assert_eq!(inclusive_b_min(&[]), 0);
    }

    #[test]
    fn unit_capacities_fall_back_to_plain_matching() {
        let mut solver = FixtureSolver::exhaustive();
        let edges =
            inclusive_matching_with(&mut solver, &[1, 1, 1], &triangle(), &MatchingConfig::new())
                .unwrap();
        assert_eq!(edges.len(), 1);
        assert!(check_inclusive(&[1, 1, 1], &edges).unwrap().success);
    }

    #[test]
    fn triangle_with_capacity_two_uses_every_edge() {
        let mut solver = FixtureSolver::exhaustive();
        let edges =
            inclusive_matching_with(&mut solver, &[2, 2, 2], &triangle(), &MatchingConfig::new())
                .unwrap();
        assert_eq!(edges, vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn configured_b_min_is_overridden() {
        let weights = Weights::from([
            ((0, 1), 3.0),
            ((0, 2), 2.0),
            ((0, 3), 1.0),
            ((1, 2), 1.0),
            ((1, 3), 1.0),
            ((2, 3), 1.0),
        ]);
        let mut solver = FixtureSolver::exhaustive();
        let edges = inclusive_matching_with(
            &mut solver,
            &[2, 1, 1, 1],
            &weights,
            &MatchingConfig::new().with_b_min(5),
        )
        .unwrap();
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
    }

    #[test]
    fn incomplete_graphs_are_rejected() {
        let mut solver = FixtureSolver::exhaustive();
        let self_edge = Weights::from([((0, 1), 1.0), ((1, 1), 1.0)]);
        let err = inclusive_matching_with(&mut solver, &[1, 1], &self_edge, &MatchingConfig::new())
            .unwrap_err();
        assert!(err.is_invalid_input());

        let duplicated = Weights::from([((0, 1), 1.0), ((1, 0), 1.0), ((1, 2), 1.0)]);
        let err =
            inclusive_matching_with(&mut solver, &[1, 1, 1], &duplicated, &MatchingConfig::new())
                .unwrap_err();
        assert_eq!(err, MatchingError::DuplicatedEdge { pair: (0, 1) });
        assert_eq!(solver.calls, 0);
    }

    #[test]
    fn no_nodes_selects_nothing() {
        let mut solver = FixtureSolver::exhaustive();
        let edges =
            inclusive_matching_with(&mut solver, &[], &Weights::new(), &MatchingConfig::new())
                .unwrap();
        assert!(edges.is_empty());
    }
}
