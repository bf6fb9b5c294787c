//! Integer programming model with row-major sparse storage.
//!
//! Variables and constraints live in dense vectors indexed by their ids, so
//! ids are never reused and always equal insertion order. Each constraint
//! owns its row of `(variable, coefficient)` entries, which is the shape
//! both the HiGHS backend and [`Model::verify_solution`] consume.

mod builder;
mod error;
mod names;
mod verify;

use crate::types::{Constraint, Objective, Variable};
use bmatch_expr::ids::{ConstraintId, VariableId};
use names::NameTable;
use std::collections::BTreeMap;

pub use error::ModelError;
pub use verify::Violation;

pub type Row = Vec<(VariableId, f64)>;

#[derive(Debug, Clone, Default)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    rows: Vec<Row>,
    objective: Objective,
    variable_names: NameTable<VariableId>,
    constraint_names: NameTable<ConstraintId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Nonzero entries over all rows.
    pub fn num_coefficients(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn get_variable(&self, id: VariableId) -> Result<&Variable, ModelError> {
        self.variables
            .get(id.index())
            .ok_or(ModelError::UnknownVariable(id))
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Result<&Constraint, ModelError> {
        self.constraints
            .get(id.index())
            .ok_or(ModelError::UnknownConstraint(id))
    }

    /// Variables in id order.
    pub fn variables(&self) -> impl Iterator<Item = (VariableId, &Variable)> {
        self.variables
            .iter()
            .enumerate()
            .map(|(index, var)| (VariableId::new(index as u32), var))
    }

    /// Constraints in id order.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .map(|(index, con)| (ConstraintId::new(index as u32), con))
    }

    /// All rows, indexed by constraint position. Each row names a variable
    /// at most once.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, id: ConstraintId) -> Result<&[(VariableId, f64)], ModelError> {
        self.rows
            .get(id.index())
            .map(Vec::as_slice)
            .ok_or(ModelError::UnknownConstraint(id))
    }

    fn ensure_variable_exists(&self, id: VariableId) -> Result<(), ModelError> {
        self.get_variable(id).map(|_| ())
    }

    fn ensure_constraint_exists(&self, id: ConstraintId) -> Result<(), ModelError> {
        self.get_constraint(id).map(|_| ())
    }

    /// Sum coefficients per variable, drop zeros, and order by variable id.
    fn normalize_terms(terms: Vec<(VariableId, f64)>) -> Row {
        let terms_in = terms.len();
        let mut merged: BTreeMap<VariableId, f64> = BTreeMap::new();
        for (var_id, coeff) in terms {
            *merged.entry(var_id).or_default() += coeff;
        }
        let normalized: Row = merged.into_iter().filter(|&(_, c)| c != 0.0).collect();

        tracing::trace!(
            component = "model",
            operation = "normalize_terms",
            status = "success",
            terms_in,
            terms_out = normalized.len(),
            "Normalized linear terms"
        );
        normalized
    }
}
