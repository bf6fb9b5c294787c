use crate::expr::core::Expr;
use crate::ids::VariableId;

/// Sum of `variables` with unit coefficients.
///
/// Repeated variables stay separate terms until the model lowers the
/// expression into a row.
pub fn linear_sum<I>(variables: I) -> Expr
where
    I: IntoIterator<Item = VariableId>,
{
    Expr::from_linear(variables.into_iter().map(|var| (var, 1.0)).collect())
}
