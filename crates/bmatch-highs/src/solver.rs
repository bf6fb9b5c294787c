use crate::ffi::{HighsModel, HighsModelError, HighsOption, ObjectiveSense};
use crate::status::{highs_status_string, to_solver_status};
use bmatch_core::{Model, Sense, Solution, Solver, SolverConfig, SolverError, SolverStatus};
use bmatch_tools::memory::{RssSampler, rss_delta};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, trace, warn};

/// [`Solver`] backed by HiGHS.
///
/// Every solve loads the model into a fresh HiGHS instance, so nothing
/// carries over between calls apart from the memory sampler.
#[derive(Debug, Default)]
pub struct HighsSolver {
    sampler: RssSampler,
}

impl HighsSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        let sense = model.objective().sense.ok_or(SolverError::NoObjective)?;

        // HiGHS reports an empty model without a usable status.
        if model.num_variables() == 0 {
            return Ok(decide_without_columns(model));
        }

        let version = crate::ffi::highs_version().unwrap_or_else(|| "unknown".to_string());
        let rss_before = self.sampler.rss_bytes("highs_load");
        let started = Instant::now();
        debug!(
            component = "solver",
            operation = "solve",
            status = "start",
            solver = "highs",
            solver_version = %version,
            variables = model.num_variables(),
            constraints = model.num_constraints(),
            nnz = model.num_coefficients(),
            time_limit = ?config.time_limit,
            rss_bytes = ?rss_before,
            "Loading model into HiGHS"
        );

        let mut highs = load_model(model, sense, config).map_err(backend_error)?;
        let highs_status = highs.solve().map_err(backend_error)?;
        let primal_status = highs.primal_solution_status();
        let status = to_solver_status(highs_status, primal_status);
        let elapsed = started.elapsed();

        let metadata = BTreeMap::from([
            ("mip_gap", highs.mip_gap()),
            ("mip_node_count", highs.mip_node_count() as f64),
            ("simplex_iterations", highs.simplex_iteration_count() as f64),
        ]);
        let rss_after = self.sampler.rss_bytes("highs_solved");
        debug!(
            component = "solver",
            operation = "solve",
            status = "success",
            solver = "highs",
            highs_status = highs_status_string(highs_status),
            primal_status = ?primal_status,
            solver_status = %status,
            mip_gap = metadata["mip_gap"],
            duration_ms = elapsed.as_secs_f64() * 1000.0,
            rss_bytes = ?rss_after,
            rss_delta_bytes = ?rss_delta(rss_before, rss_after),
            "HiGHS solve finished"
        );

        if !status.has_solution() {
            warn!(
                component = "solver",
                operation = "solve",
                status = "warn",
                solver = "highs",
                highs_status = highs_status_string(highs_status),
                solver_status = %status,
                "HiGHS returned no usable solution"
            );
            return Ok(Solution::without_values(status)
                .with_solve_time(elapsed)
                .with_metadata(metadata));
        }

        let (columns, rows) = highs.solution_snapshot().map_err(backend_error)?.into_parts();
        let objective_value = highs.objective_value().map_err(backend_error)?;
        trace!(
            component = "solver",
            operation = "extract_solution",
            status = "success",
            objective_value,
            columns = columns.len(),
            rows = rows.len(),
            "Read solution from HiGHS"
        );

        Ok(Solution::new(status, columns, objective_value)
            .with_row_values(rows)
            .with_solve_time(elapsed)
            .with_metadata(metadata))
    }
}

fn backend_error(err: HighsModelError) -> SolverError {
    SolverError::Backend(err.to_string())
}

/// Options, columns (in variable order) and rows (in constraint order).
fn load_model(
    model: &Model,
    sense: Sense,
    config: &SolverConfig,
) -> Result<HighsModel, HighsModelError> {
    let mut highs = HighsModel::new();
    apply_config(&mut highs, config);
    highs.set_objective_sense(match sense {
        Sense::Minimize => ObjectiveSense::Minimize,
        Sense::Maximize => ObjectiveSense::Maximize,
    });

    let mut costs = vec![0.0; model.num_variables()];
    for &(var, coeff) in &model.objective().terms {
        costs[var.index()] += coeff;
    }
    for ((_, var), cost) in model.variables().zip(costs) {
        let (lower, upper) = (var.bounds.lower, var.bounds.upper);
        if var.is_integer {
            highs.add_integer_col(lower, upper, cost);
        } else {
            highs.add_col(lower, upper, cost);
        }
    }

    for ((_, constraint), row) in model.constraints().zip(model.rows()) {
        let (columns, coefficients): (Vec<usize>, Vec<f64>) =
            row.iter().map(|&(var, coeff)| (var.index(), coeff)).unzip();
        highs.add_row(
            constraint.bounds.lower,
            constraint.bounds.upper,
            &columns,
            &coefficients,
        )?;
    }

    trace!(
        component = "solver",
        operation = "load_model",
        status = "success",
        columns = highs.columns(),
        rows = highs.rows(),
        "Loaded model into HiGHS"
    );
    Ok(highs)
}

fn apply_config(highs: &mut HighsModel, config: &SolverConfig) {
    highs.set_log_to_console(config.log_to_console.unwrap_or(false));

    if let Some(limit) = config.time_limit {
        highs.set_option("time_limit", HighsOption::Float(limit.as_secs_f64()));
    }
    if let Some(gap) = config.mip_gap {
        highs.set_option("mip_rel_gap", HighsOption::Float(gap));
    }
    if let Some(threads) = config.threads {
        let threads = i32::try_from(threads).unwrap_or(i32::MAX);
        highs.set_option("threads", HighsOption::Int(threads));
    }
    if let Some(tolerance) = config.tolerance {
        highs.set_option("primal_feasibility_tolerance", HighsOption::Float(tolerance));
        highs.set_option("mip_feasibility_tolerance", HighsOption::Float(tolerance));
    }
}

/// Every row activity of a column-free model is zero.
fn decide_without_columns(model: &Model) -> Solution {
    let feasible = model
        .constraints()
        .all(|(_, constraint)| constraint.bounds.contains(0.0, 0.0));
    debug!(
        component = "solver",
        operation = "solve",
        status = "success",
        solver = "highs",
        constraints = model.num_constraints(),
        feasible,
        "Model has no variables; decided without HiGHS"
    );

    if feasible {
        Solution::new(SolverStatus::Optimal, Vec::new(), 0.0)
            .with_row_values(vec![0.0; model.num_constraints()])
    } else {
        Solution::without_values(SolverStatus::Infeasible)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use bmatch_core::{Bounds, Constraint, Variable};
    use bmatch_expr::Expr;

    #[test]
    fn empty_model_without_rows_is_optimal() {
        let mut model = Model::new();
        model.maximize(Expr::new_empty()).unwrap();

        let solution = HighsSolver::new()
            .solve(&model, &SolverConfig::new())
            .unwrap();
        assert_eq!(solution.status, SolverStatus::Optimal);
        assert!(solution.primal_values.is_empty());
        assert_eq!(solution.objective_value, 0.0);
    }

    #[test]
    fn empty_model_with_unsatisfiable_row_is_infeasible() {
        let mut model = Model::new();
        model
            .add_constraint(Constraint {
                bounds: Bounds::at_least(1.0),
            })
            .unwrap();
        model.maximize(Expr::new_empty()).unwrap();

        let solution = HighsSolver::new()
            .solve(&model, &SolverConfig::new())
            .unwrap();
        assert_eq!(solution.status, SolverStatus::Infeasible);
    }

    #[test]
    fn model_without_objective_is_rejected() {
        let model = Model::new();
        let err = HighsSolver::new()
            .solve(&model, &SolverConfig::new())
            .unwrap_err();
        assert_eq!(err, SolverError::NoObjective);
    }

    #[test]
    fn loading_sums_repeated_objective_terms() {
        let mut model = Model::new();
        let x = model.add_variable(Variable::binary()).unwrap();
        model.maximize(Expr::term(x, 1.0) + Expr::term(x, 2.0)).unwrap();
        model
            .add_constraint_expr(Expr::var(x).le_scalar(1.0))
            .unwrap();

        let highs = load_model(&model, Sense::Maximize, &SolverConfig::new()).unwrap();
        assert_eq!(highs.columns(), 1);
        assert_eq!(highs.rows(), 1);
    }

    #[test]
    fn wrapper_errors_become_backend_errors() {
        let err = backend_error(HighsModelError::SolveRequired {
            operation: "objective_value",
        });
        assert!(err.to_string().contains("objective_value"));
        assert_eq!(err.code(), "SOLVER_BACKEND");
    }
}
