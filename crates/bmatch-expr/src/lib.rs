//! Ids and linear expressions used to state b-matching models.

pub mod expr;
pub mod ids;

pub use expr::{ComparisonSense, ConstraintExpr, Expr, linear_sum};
pub use ids::{ConstraintId, VariableId};
