use bmatch_highs::{HighsModel, HighsOption, HighsStatus, ObjectiveSense, PrimalSolutionStatus};

#[test]
fn test_minimize_simple() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    // minimize x subject to x >= 1
    let mut model = HighsModel::new();
    let x = model.add_col(1.0, f64::INFINITY, 1.0);
    model.set_objective_sense(ObjectiveSense::Minimize);
    assert_eq!(model.columns(), 1);

    let status = model.solve().expect("HiGHS failed to run");
    assert_eq!(status, HighsStatus::Optimal);
    assert_eq!(model.columns(), 0);

    let obj_value = model.objective_value().expect("missing objective value");
    let snapshot = model.solution_snapshot().expect("missing solution");
    assert!(
        (obj_value - 1.0).abs() < 1e-6,
        "Expected objective value ~1.0, got {}",
        obj_value
    );
    assert!((snapshot.col_values()[x] - 1.0).abs() < 1e-6);
    assert_eq!(
        model.primal_solution_status(),
        PrimalSolutionStatus::Feasible
    );
}

#[test]
fn test_integer_variable_is_enforced() {
    let mut model = HighsModel::new();
    let x = model.add_integer_col(0.0, 10.0, 1.0);
    model
        .add_row(f64::NEG_INFINITY, 1.5, &[x], &[1.0])
        .expect("failed to add row");
    model.set_objective_sense(ObjectiveSense::Maximize);

    let status = model.solve().expect("HiGHS failed to run");
    assert_eq!(status, HighsStatus::Optimal);

    let snapshot = model.solution_snapshot().expect("missing solution");
    assert!(
        (snapshot.col_values()[x] - 1.0).abs() < 1e-6,
        "Expected integer x = 1.0, got {}",
        snapshot.col_values()[x]
    );
    assert!((snapshot.row_values()[0] - 1.0).abs() < 1e-6);
}

#[test]
fn test_contradictory_rows_are_infeasible() {
    let mut model = HighsModel::new();
    let x = model.add_integer_col(0.0, 1.0, 1.0);
    let y = model.add_integer_col(0.0, 1.0, 1.0);
    model
        .add_row(f64::NEG_INFINITY, 1.0, &[x, y], &[1.0, 1.0])
        .expect("failed to add row");
    model
        .add_row(2.0, f64::INFINITY, &[x, y], &[1.0, 1.0])
        .expect("failed to add row");
    model.set_objective_sense(ObjectiveSense::Maximize);
    model.set_option("presolve", HighsOption::Str("off".to_string()));

    let status = model.solve().expect("HiGHS failed to run");
    assert_eq!(status, HighsStatus::Infeasible);
    assert_ne!(
        model.primal_solution_status(),
        PrimalSolutionStatus::Feasible
    );
}
