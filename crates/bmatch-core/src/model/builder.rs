use crate::types::{Bounds, Constraint, Objective, Sense, Variable};
use bmatch_expr::expr::{ComparisonSense, ConstraintExpr, Expr};
use bmatch_expr::ids::{ConstraintId, VariableId};

use super::{Model, ModelError};

impl Model {
    pub fn add_variable(&mut self, variable: Variable) -> Result<VariableId, ModelError> {
        let Bounds { lower, upper } = variable.bounds;
        if !variable.bounds.is_valid() {
            return Err(ModelError::InvalidVariableBounds { lower, upper });
        }

        let id = VariableId::new(self.variables.len() as u32);
        self.variables.push(variable);
        tracing::trace!(
            component = "model",
            operation = "add_variable",
            status = "success",
            var_id = id.inner(),
            lower,
            upper,
            is_integer = variable.is_integer,
            "Added variable"
        );
        Ok(id)
    }

    /// Add a constraint with an empty row.
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ConstraintId, ModelError> {
        let Bounds { lower, upper } = constraint.bounds;
        if !constraint.bounds.is_valid() {
            return Err(ModelError::InvalidConstraintBounds { lower, upper });
        }

        let id = ConstraintId::new(self.constraints.len() as u32);
        self.constraints.push(constraint);
        self.rows.push(Vec::new());
        Ok(id)
    }

    /// Add `expr` compared with a scalar as a new row.
    ///
    /// The expression constant is moved to the right-hand side and repeated
    /// variables are merged, so `x + x <= 2` stores `2x <= 2`.
    pub fn add_constraint_expr(
        &mut self,
        constraint: ConstraintExpr,
    ) -> Result<ConstraintId, ModelError> {
        let (expr, sense, rhs) = constraint.into_parts();
        let rhs = rhs - expr.constant();
        let bounds = match sense {
            ComparisonSense::LessEqual => Bounds::at_most(rhs),
            ComparisonSense::GreaterEqual => Bounds::at_least(rhs),
            ComparisonSense::Equal => Bounds::new(rhs, rhs),
        };

        let terms = expr.into_linear_terms();
        for &(var_id, coefficient) in &terms {
            self.ensure_variable_exists(var_id)?;
            if !coefficient.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient });
            }
        }

        let id = self.add_constraint(Constraint { bounds })?;
        self.rows[id.index()] = Self::normalize_terms(terms);
        Ok(id)
    }

    /// Set one matrix entry, replacing any existing entry for the pair.
    pub fn set_coefficient(
        &mut self,
        var_id: VariableId,
        constraint_id: ConstraintId,
        coefficient: f64,
    ) -> Result<(), ModelError> {
        if !coefficient.is_finite() {
            return Err(ModelError::InvalidCoefficient { coefficient });
        }
        self.ensure_variable_exists(var_id)?;
        self.ensure_constraint_exists(constraint_id)?;

        let row = &mut self.rows[constraint_id.index()];
        match row.iter_mut().find(|(id, _)| *id == var_id) {
            Some(entry) => entry.1 = coefficient,
            None => row.push((var_id, coefficient)),
        }
        Ok(())
    }

    /// Replace the objective. Prefer [`Model::maximize`] or
    /// [`Model::minimize`], which refuse to overwrite.
    pub fn set_objective(&mut self, objective: Objective) -> Result<(), ModelError> {
        let sense = objective.sense.ok_or(ModelError::NoObjective)?;
        for &(var_id, coefficient) in &objective.terms {
            self.ensure_variable_exists(var_id)?;
            if !coefficient.is_finite() {
                return Err(ModelError::InvalidCoefficient { coefficient });
            }
        }

        self.objective = Objective {
            sense: Some(sense),
            terms: Self::normalize_terms(objective.terms),
        };
        tracing::debug!(
            component = "model",
            operation = "set_objective",
            status = "success",
            sense = sense.as_str(),
            terms = self.objective.terms.len(),
            "Set objective"
        );
        Ok(())
    }

    pub fn minimize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_first_objective(Sense::Minimize, expr)
    }

    pub fn maximize(&mut self, expr: Expr) -> Result<(), ModelError> {
        self.set_first_objective(Sense::Maximize, expr)
    }

    fn set_first_objective(&mut self, sense: Sense, expr: Expr) -> Result<(), ModelError> {
        if self.objective.sense.is_some() {
            return Err(ModelError::MultipleObjectives);
        }
        self.set_objective(Objective {
            sense: Some(sense),
            terms: expr.into_linear_terms(),
        })
    }
}
