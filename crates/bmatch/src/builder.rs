//! Translation of a weighted graph into a 0/1 integer program.
//!
//! One binary variable per edge, one `b_max` row per node, one `b_min` row
//! per node when a positive lower bound is requested, and a maximized
//! objective of weight times selection.

use crate::error::MatchingError;
use crate::graph::{Edge, Weights};
use crate::validate::{validate_capacities, validate_weights};
use bmatch_core::{Model, Variable};
use bmatch_expr::{Expr, VariableId, linear_sum};
use tracing::{debug, trace};

/// A built matching program together with its edge-to-variable table.
///
/// The table keeps the weight mapping's iteration order, which is the
/// order selected edges are reported in.
#[derive(Debug, Clone)]
pub struct MatchingModel {
    model: Model,
    edge_vars: Vec<(Edge, VariableId)>,
    node_count: usize,
    b_min: u32,
}

impl MatchingModel {
    /// Validate the inputs and build the program.
    ///
    /// # Errors
    ///
    /// Returns an input error for a zero capacity, an edge outside the node
    /// range, or a negative or non-finite weight.
    pub fn build(b_maxs: &[u32], weights: &Weights, b_min: u32) -> Result<Self, MatchingError> {
        validate_capacities(b_maxs)?;
        validate_weights(weights, b_maxs.len())?;

        let node_count = b_maxs.len();
        let mut model = Model::new();
        let mut edge_vars = Vec::with_capacity(weights.len());
        let mut vars_on_node: Vec<Vec<VariableId>> = vec![Vec::new(); node_count];
        let mut objective_terms = Vec::with_capacity(weights.len());

        for (&(i, j), &weight) in weights {
            let var = model.add_variable(Variable::binary())?;
            model.set_variable_name(var, format!("edge_{}_{}", i, j))?;
            vars_on_node[i].push(var);
            vars_on_node[j].push(var);
            objective_terms.push((var, weight));
            edge_vars.push(((i, j), var));

            trace!(
                component = "matching",
                operation = "add_edge",
                status = "success",
                i,
                j,
                weight,
                var_id = var.inner(),
                "Added edge variable"
            );
        }

        for (node, (vars, &b_max)) in vars_on_node.into_iter().zip(b_maxs).enumerate() {
            let degree = linear_sum(vars);
            let row = model.add_constraint_expr(degree.le_scalar(f64::from(b_max)))?;
            model.set_constraint_name(row, format!("b_max_{}", node))?;
            if b_min > 0 {
                let row = model.add_constraint_expr(degree.ge_scalar(f64::from(b_min)))?;
                model.set_constraint_name(row, format!("b_min_{}", node))?;
            }
        }

        model.maximize(Expr::from_linear(objective_terms))?;

        debug!(
            component = "matching",
            operation = "build_model",
            status = "success",
            nodes = node_count,
            edges = edge_vars.len(),
            b_min,
            constraints = model.num_constraints(),
            "Built b-matching model"
        );

        Ok(Self {
            model,
            edge_vars,
            node_count,
            b_min,
        })
    }

    /// The underlying integer program.
    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn num_edges(&self) -> usize {
        self.edge_vars.len()
    }

    pub fn b_min(&self) -> u32 {
        self.b_min
    }

    /// Edges with their decision variables, in weight-mapping order.
    pub fn edge_variables(&self) -> &[(Edge, VariableId)] {
        &self.edge_vars
    }

    /// Decision variable of `edge`, if the edge is part of the model.
    pub fn variable_for(&self, edge: Edge) -> Option<VariableId> {
        self.edge_vars
            .iter()
            .find_map(|&(candidate, var)| (candidate == edge).then_some(var))
    }

    /// Edges whose variable is set in `values`, in weight-mapping order.
    ///
    /// A variable counts as set when its value exceeds one half.
    pub fn selected_edges(&self, values: &[f64]) -> Vec<Edge> {
        self.edge_vars
            .iter()
            .filter(|(_, var)| values.get(var.index()).is_some_and(|&value| value > 0.5))
            .map(|&(edge, _)| edge)
            .collect()
    }
}
