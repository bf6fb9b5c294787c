//! Linear expressions over model variables.
//!
//! - `core`: [`Expr`], a sum of `coefficient * variable` terms plus a constant
//! - `constraint`: [`ConstraintExpr`], an expression compared with a scalar
//! - `builders`: [`linear_sum`] and friends

pub mod builders;
pub mod constraint;
pub mod core;

pub use builders::linear_sum;
pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::Expr;
