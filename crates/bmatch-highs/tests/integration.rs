#![allow(clippy::float_cmp)]

use bmatch_core::{
    Bounds, Constraint, DEFAULT_PRIMAL_TOLERANCE, Model, Objective, Sense, Solver, SolverConfig,
    SolverStatus, Variable,
};
use bmatch_expr::{Expr, linear_sum};
use bmatch_highs::HighsSolver;
use std::time::Duration;

/// minimize 2x + 3y subject to x + y >= 5, x,y >= 0
#[test]
fn test_simple_lp() {
    let mut model = Model::new();
    let x = model
        .add_variable(Variable::continuous(Bounds::at_least(0.0)))
        .unwrap();
    let y = model
        .add_variable(Variable::continuous(Bounds::at_least(0.0)))
        .unwrap();
    let constraint = model
        .add_constraint(Constraint {
            bounds: Bounds::at_least(5.0),
        })
        .unwrap();
    model.set_coefficient(x, constraint, 1.0).unwrap();
    model.set_coefficient(y, constraint, 1.0).unwrap();
    model
        .set_objective(Objective {
            sense: Some(Sense::Minimize),
            terms: vec![(x, 2.0), (y, 3.0)],
        })
        .unwrap();

    let solution = HighsSolver::new()
        .solve(&model, &SolverConfig::new())
        .expect("Failed to solve");

    assert_eq!(solution.status, SolverStatus::Optimal);
    assert!(
        (solution.objective_value - 10.0).abs() < 1e-6,
        "Expected objective value 10.0, got {}",
        solution.objective_value
    );
    assert!((solution.get_primal(x.index()).unwrap() - 5.0).abs() < 1e-6);
}

/// Three binaries pairwise conflicting: at most one can be chosen.
#[test]
fn test_binary_packing_picks_heaviest() {
    let mut model = Model::new();
    let vars: Vec<_> = (0..3)
        .map(|_| model.add_variable(Variable::binary()).unwrap())
        .collect();
    for i in 0..3 {
        for j in (i + 1)..3 {
            model
                .add_constraint_expr(linear_sum([vars[i], vars[j]]).le_scalar(1.0))
                .unwrap();
        }
    }
    model
        .maximize(Expr::term(vars[0], 1.0) + Expr::term(vars[1], 4.0) + Expr::term(vars[2], 2.0))
        .unwrap();

    let config = SolverConfig::new().with_time_limit_ms(2_000);
    let solution = HighsSolver::new().solve(&model, &config).unwrap();

    assert!(solution.is_optimal());
    assert!((solution.objective_value - 4.0).abs() < 1e-6);
    let chosen: Vec<usize> = solution
        .primal_values
        .iter()
        .enumerate()
        .filter(|(_, value)| **value > 0.5)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(chosen, vec![1]);
    assert_eq!(solution.row_values.len(), 3);
    assert!(
        model
            .verify_solution(&solution.primal_values, DEFAULT_PRIMAL_TOLERANCE)
            .is_ok()
    );
}

#[test]
fn test_infeasible_model_reports_status() {
    let mut model = Model::new();
    let x = model.add_variable(Variable::binary()).unwrap();
    let y = model.add_variable(Variable::binary()).unwrap();
    model
        .add_constraint_expr(linear_sum([x, y]).ge_scalar(3.0))
        .unwrap();
    model.maximize(linear_sum([x, y])).unwrap();

    let solution = HighsSolver::new()
        .solve(&model, &SolverConfig::new())
        .expect("infeasibility is a status, not an error");

    assert_eq!(solution.status, SolverStatus::Infeasible);
    assert!(!solution.status.has_solution());
    assert!(solution.primal_values.is_empty());
}

#[test]
fn test_solver_is_reusable() {
    let mut solver = HighsSolver::new();
    for bound in [1.0, 2.0, 3.0] {
        let mut model = Model::new();
        let x = model
            .add_variable(Variable::integer(Bounds::new(0.0, 10.0)))
            .unwrap();
        model
            .add_constraint_expr(Expr::var(x).le_scalar(bound + 0.5))
            .unwrap();
        model.maximize(Expr::var(x)).unwrap();

        let solution = solver.solve(&model, &SolverConfig::new()).unwrap();
        assert!((solution.objective_value - bound).abs() < 1e-6);
    }
    assert_eq!(solver.name(), "highs");
}

#[test]
fn test_config_options_are_accepted() {
    let mut model = Model::new();
    let x = model.add_variable(Variable::binary()).unwrap();
    model.maximize(Expr::var(x)).unwrap();

    let config = SolverConfig::new()
        .with_time_limit(Duration::from_secs(1))
        .with_mip_gap(0.0)
        .with_threads(1)
        .with_tolerance(1e-7)
        .with_log_to_console(false);
    let solution = HighsSolver::new().solve(&model, &config).unwrap();

    assert!(solution.is_optimal());
    assert_eq!(solution.get_primal(0).map(f64::round), Some(1.0));
    assert!(solution.metadata.contains_key("mip_gap"));
}
