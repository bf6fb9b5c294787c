//! Tolerance-based feasibility check of a candidate solution.
//!
//! Backends report their own status, but numerical trouble or a backend bug
//! can still hand back values that break the model. This check recomputes
//! every row activity from the primal values and compares it with the row
//! bounds, independent of any solver state.

use bmatch_expr::ids::{ConstraintId, VariableId};
use tracing::warn;

use crate::model::Model;
use crate::types::Bounds;

/// A single way in which a candidate solution breaks the model.
#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    /// The value vector does not have one entry per variable.
    ValueCountMismatch { expected: usize, got: usize },
    /// A variable value lies outside its bounds (or is NaN).
    VariableBounds {
        variable: VariableId,
        name: Option<String>,
        value: f64,
        bounds: Bounds,
    },
    /// A row activity lies outside the constraint bounds.
    ConstraintBounds {
        constraint: ConstraintId,
        name: Option<String>,
        activity: f64,
        bounds: Bounds,
    },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::ValueCountMismatch { expected, got } => write!(
                f,
                "expected {} variable values, got {}",
                expected, got
            ),
            Violation::VariableBounds {
                variable,
                name,
                value,
                bounds,
            } => write!(
                f,
                "variable {} has value {} outside {}",
                name.as_deref().map_or_else(|| variable.to_string(), str::to_string),
                value,
                bounds
            ),
            Violation::ConstraintBounds {
                constraint,
                name,
                activity,
                bounds,
            } => write!(
                f,
                "constraint {} has activity {} outside {}",
                name.as_deref()
                    .map_or_else(|| constraint.to_string(), str::to_string),
                activity,
                bounds
            ),
        }
    }
}

impl Model {
    /// Check that `values` satisfies every variable bound and every
    /// constraint within an absolute `tolerance`.
    ///
    /// `values` is indexed by variable position. Each violation found is
    /// logged at warn level and returned.
    pub fn verify_solution(&self, values: &[f64], tolerance: f64) -> Result<(), Vec<Violation>> {
        if values.len() != self.num_variables() {
            let violation = Violation::ValueCountMismatch {
                expected: self.num_variables(),
                got: values.len(),
            };
            warn!(
                component = "model",
                operation = "verify_solution",
                status = "error",
                violation = %violation,
                "Solution does not match model shape"
            );
            return Err(vec![violation]);
        }

        let mut violations = Vec::new();

        for (var_id, var) in self.variables() {
            let value = values[var_id.index()];
            if !var.bounds.contains(value, tolerance) {
                violations.push(Violation::VariableBounds {
                    variable: var_id,
                    name: self.get_variable_name(var_id).map(str::to_string),
                    value,
                    bounds: var.bounds,
                });
            }
        }

        let rows = self.rows();
        for (constraint_id, constraint) in self.constraints() {
            let activity: f64 = rows
                .get(constraint_id.index())
                .map(|row| {
                    row.iter()
                        .map(|(var_id, coeff)| coeff * values[var_id.index()])
                        .sum()
                })
                .unwrap_or(0.0);
            if !constraint.bounds.contains(activity, tolerance) {
                violations.push(Violation::ConstraintBounds {
                    constraint: constraint_id,
                    name: self.get_constraint_name(constraint_id).map(str::to_string),
                    activity,
                    bounds: constraint.bounds,
                });
            }
        }

        if violations.is_empty() {
            tracing::debug!(
                component = "model",
                operation = "verify_solution",
                status = "success",
                variables = self.num_variables(),
                constraints = self.num_constraints(),
                tolerance,
                "Solution satisfies all constraints"
            );
            return Ok(());
        }

        for violation in &violations {
            warn!(
                component = "model",
                operation = "verify_solution",
                status = "error",
                tolerance,
                violation = %violation,
                "Solution violates model"
            );
        }
        Err(violations)
    }
}
