//! Solve orchestration: run the backend, judge its status, re-verify its
//! answer and read the selected edges back out.

use crate::builder::MatchingModel;
use crate::config::MatchingConfig;
use crate::error::MatchingError;
use crate::graph::{Edge, Weights};
use bmatch_core::{Solver, SolverStatus};
use std::time::Instant;
use tracing::{debug, warn};

/// Solve a built matching program and return the selected edges.
///
/// `Optimal` is accepted silently and `Feasible` with a warning; any other
/// status is an error. The returned values are then checked against every
/// row with `config.primal_tolerance`, whatever status was reported.
///
/// # Errors
///
/// Returns a solver-kind error when the backend fails, reports no usable
/// solution, or returns values that break the model.
pub fn solve_model<S>(
    solver: &mut S,
    matching: &MatchingModel,
    config: &MatchingConfig,
) -> Result<Vec<Edge>, MatchingError>
where
    S: Solver + ?Sized,
{
    let started = Instant::now();
    let solution = solver
        .solve(matching.model(), &config.solver_config())
        .inspect_err(|err| {
            warn!(
                component = "matching",
                operation = "solve",
                status = "error",
                solver = solver.name(),
                error = %err,
                "Solver backend failed"
            );
        })?;

    match solution.status {
        SolverStatus::Optimal => {}
        SolverStatus::Feasible => {
            warn!(
                component = "matching",
                operation = "solve",
                status = "warn",
                solver = solver.name(),
                solver_status = %solution.status,
                timeout_ms = ?config.timeout_ms,
                "A potentially suboptimal solution was found"
            );
        }
        status => {
            warn!(
                component = "matching",
                operation = "solve",
                status = "error",
                solver = solver.name(),
                solver_status = %status,
                nodes = matching.node_count(),
                edges = matching.num_edges(),
                b_min = matching.b_min(),
                "The solver could not solve the problem"
            );
            return Err(MatchingError::SolveFailed { status });
        }
    }

    matching
        .model()
        .verify_solution(&solution.primal_values, config.primal_tolerance)
        .map_err(|violations| {
            warn!(
                component = "matching",
                operation = "verify_solution",
                status = "error",
                solver = solver.name(),
                violations = violations.len(),
                tolerance = config.primal_tolerance,
                "The solution does not satisfy the constraints"
            );
            MatchingError::SolutionRejected { violations }
        })?;

    let edges = matching.selected_edges(&solution.primal_values);

    debug!(
        component = "matching",
        operation = "solve",
        status = "success",
        solver = solver.name(),
        solver_status = %solution.status,
        nodes = matching.node_count(),
        edges = matching.num_edges(),
        selected = edges.len(),
        objective_value = solution.objective_value,
        duration_ms = started.elapsed().as_secs_f64() * 1000.0,
        "Solved b-matching"
    );

    Ok(edges)
}

/// Maximum-weight b-matching with an explicit solver and options.
///
/// # Errors
///
/// Returns an input-kind error for invalid capacities or weights (before
/// the solver is called) and a solver-kind error as in [`solve_model`].
pub fn maximize_weighted_b_matching_with<S>(
    solver: &mut S,
    b_maxs: &[u32],
    weights: &Weights,
    config: &MatchingConfig,
) -> Result<Vec<Edge>, MatchingError>
where
    S: Solver + ?Sized,
{
    let matching = MatchingModel::build(b_maxs, weights, config.b_min).inspect_err(|err| {
        debug!(
            component = "matching",
            operation = "build_model",
            status = "error",
            code = err.code(),
            error = %err,
            "Rejected matching input"
        );
    })?;
    solve_model(solver, &matching, config)
}

/// Maximum-weight b-matching solved with HiGHS.
///
/// Selects edges so every node `i` touches at most `b_maxs[i]` and at least
/// `b_min` of them, maximizing the total weight. A non-zero `b_min` or a
/// `timeout_ms` can make the problem unsolvable, which is reported as a
/// solver-kind error.
///
/// Edges are returned in ascending key order of `weights`.
#[cfg(feature = "highs")]
pub fn maximize_weighted_b_matching(
    b_maxs: &[u32],
    weights: &Weights,
    b_min: u32,
    timeout_ms: Option<u64>,
) -> Result<Vec<Edge>, MatchingError> {
    let config = MatchingConfig::new()
        .with_b_min(b_min)
        .with_optional_timeout_ms(timeout_ms);
    let mut solver = bmatch_highs::HighsSolver::new();
    maximize_weighted_b_matching_with(&mut solver, b_maxs, weights, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureSolver;
    use crate::graph::node_degrees;
    use bmatch_core::SolverError;
    use std::time::Duration;

    fn triangle() -> Weights {
        Weights::from([((0, 1), 1.0), ((1, 2), 1.0), ((2, 0), 1.0)])
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
    fn triangle_with_unit_capacity_picks_one_edge() {
        let mut solver = FixtureSolver::exhaustive();
        let edges = maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 1, 1],
            &triangle(),
            &MatchingConfig::new(),
        )
        .unwrap();
        assert_eq!(edges.len(), 1);
        assert!(triangle().contains_key(&edges[0]));
    }

    #[test]
    fn hub_graph_matches_known_optimum() {
        let mut solver = FixtureSolver::exhaustive();
        let edges = maximize_weighted_b_matching_with(
            &mut solver,
            &[2, 1, 1, 1],
            &hub_weights(),
            &MatchingConfig::new(),
        )
        .unwrap();
        assert_eq!(edges, vec![(0, 1), (0, 2)]);

        let edges = maximize_weighted_b_matching_with(
            &mut solver,
            &[2, 1, 1, 1],
            &hub_weights(),
            &MatchingConfig::new().with_b_min(1),
        )
        .unwrap();
        assert_eq!(edges, vec![(0, 1), (2, 3)]);
        assert_eq!(node_degrees(4, &edges), vec![1, 1, 1, 1]);
    }

    #[test]
    fn infeasible_b_min_is_a_solver_error() {
        let mut solver = FixtureSolver::exhaustive();
        let err = maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 1, 1],
            &triangle(),
            &MatchingConfig::new().with_b_min(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            MatchingError::SolveFailed {
                status: SolverStatus::Infeasible
            }
        );
        assert!(err.is_solver_error());
    }

    #[test]
    fn invalid_input_never_reaches_the_solver() {
        let mut solver = FixtureSolver::exhaustive();
        let err = maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 2, 3, 0],
            &Weights::new(),
            &MatchingConfig::new(),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());

        let negative = Weights::from([((0, 1), -1.0)]);
        let err = maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 1],
            &negative,
            &MatchingConfig::new(),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(solver.calls, 0);
    }

    #[test]
    fn feasible_status_is_accepted() {
        let matching = MatchingModel::build(&[1, 1, 1], &triangle(), 0).unwrap();
        let mut values = vec![0.0; 3];
        values[matching.variable_for((1, 2)).unwrap().index()] = 1.0;
        let mut solver = FixtureSolver::reply(SolverStatus::Feasible, values);

        let edges = solve_model(&mut solver, &matching, &MatchingConfig::new()).unwrap();
        assert_eq!(edges, vec![(1, 2)]);
    }

    #[test]
    fn unknown_and_unbounded_statuses_fail() {
        let matching = MatchingModel::build(&[1, 1, 1], &triangle(), 0).unwrap();
        for status in [SolverStatus::Unknown, SolverStatus::Unbounded] {
            let mut solver = FixtureSolver::reply(status, vec![0.0; 3]);
            let err = solve_model(&mut solver, &matching, &MatchingConfig::new()).unwrap_err();
            assert_eq!(err, MatchingError::SolveFailed { status });
        }
    }

    #[test]
    fn optimal_but_violating_solution_is_rejected() {
        let matching = MatchingModel::build(&[1, 1, 1], &triangle(), 0).unwrap();
        let mut solver = FixtureSolver::reply(SolverStatus::Optimal, vec![1.0, 1.0, 0.0]);

        let err = solve_model(&mut solver, &matching, &MatchingConfig::new()).unwrap_err();
        match err {
            MatchingError::SolutionRejected { violations } => assert!(!violations.is_empty()),
            other => panic!("expected rejected solution, got {other:?}"),
        }
    }

    #[test]
    fn values_within_tolerance_are_accepted() {
        let matching = MatchingModel::build(&[1, 1, 1], &triangle(), 0).unwrap();
        let mut values = vec![0.0; 3];
        values[matching.variable_for((0, 1)).unwrap().index()] = 1.0 + 5e-8;
        let mut solver = FixtureSolver::reply(SolverStatus::Optimal, values.clone());
        let edges = solve_model(&mut solver, &matching, &MatchingConfig::new()).unwrap();
        assert_eq!(edges, vec![(0, 1)]);

        let strict = MatchingConfig::new().with_primal_tolerance(1e-9);
        let mut solver = FixtureSolver::reply(SolverStatus::Optimal, values);
        assert!(solve_model(&mut solver, &matching, &strict).is_err());
    }

    #[test]
    fn backend_failure_is_wrapped() {
        let matching = MatchingModel::build(&[1, 1], &Weights::from([((0, 1), 1.0)]), 0).unwrap();
        let mut solver =
            FixtureSolver::fail(SolverError::Unavailable("no library".to_string()));
        let err = solve_model(&mut solver, &matching, &MatchingConfig::new()).unwrap_err();
        assert!(matches!(err, MatchingError::Backend(_)));
        assert!(err.is_solver_error());
    }

    #[test]
    fn timeout_is_forwarded() {
        let mut solver = FixtureSolver::exhaustive();
        maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 1],
            &Weights::from([((0, 1), 1.0)]),
            &MatchingConfig::new().with_timeout_ms(250),
        )
        .unwrap();
        let config = solver.last_config.take().unwrap();
        assert_eq!(config.time_limit, Some(Duration::from_millis(250)));
    }

    #[test]
    fn empty_graph_selects_nothing() {
        let mut solver = FixtureSolver::exhaustive();
        let edges = maximize_weighted_b_matching_with(
            &mut solver,
            &[1, 1, 1],
            &Weights::new(),
            &MatchingConfig::new(),
        )
        .unwrap();
        assert!(edges.is_empty());
    }
}
