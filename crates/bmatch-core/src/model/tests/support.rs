use crate::model::Model;
use crate::types::Variable;
use bmatch_expr::expr::linear_sum;
use bmatch_expr::ids::VariableId;

/// Two binaries `x`, `y` with a single named row `x + y <= 1`.
pub(super) fn packing_model() -> (Model, VariableId, VariableId) {
    let mut model = Model::new();
    let x = model.add_variable(Variable::binary()).unwrap();
    let y = model.add_variable(Variable::binary()).unwrap();
    let row = model
        .add_constraint_expr(linear_sum([x, y]).le_scalar(1.0))
        .unwrap();
    model.set_constraint_name(row, "pack".to_string()).unwrap();
    (model, x, y)
}
