use crate::expr::constraint::{ComparisonSense, ConstraintExpr};
use crate::ids::VariableId;

/// `sum(coefficient * variable) + constant`.
///
/// Terms are kept as given; a variable may appear more than once until the
/// expression is lowered into a model row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Expr {
    terms: Vec<(VariableId, f64)>,
    constant: f64,
}

impl Expr {
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// `coeff * var`, or the empty expression when `coeff` is zero.
    pub fn term(var: VariableId, coeff: f64) -> Self {
        let terms = if coeff == 0.0 {
            Vec::new()
        } else {
            vec![(var, coeff)]
        };
        Self {
            terms,
            constant: 0.0,
        }
    }

    pub fn var(var: VariableId) -> Self {
        Self::term(var, 1.0)
    }

    pub fn from_linear(terms: Vec<(VariableId, f64)>) -> Self {
        Self {
            terms,
            constant: 0.0,
        }
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn constant(&self) -> f64 {
        self.constant
    }

    pub fn linear_terms(&self) -> &[(VariableId, f64)] {
        &self.terms
    }

    pub fn into_linear_terms(self) -> Vec<(VariableId, f64)> {
        self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.constant == 0.0
    }

    /// Value at `values`, indexed by variable position. Missing values count as zero.
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.terms.iter().fold(self.constant, |acc, &(var, coeff)| {
            acc + coeff * values.get(var.index()).copied().unwrap_or(0.0)
        })
    }

    /// Compare with `rhs`, moving the constant to the right-hand side.
    pub fn compare_scalar(&self, sense: ComparisonSense, rhs: f64) -> ConstraintExpr {
        let lhs = Self::from_linear(self.terms.clone());
        ConstraintExpr::new(lhs, sense, rhs - self.constant)
    }

    pub fn le_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(ComparisonSense::LessEqual, rhs)
    }

    pub fn ge_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(ComparisonSense::GreaterEqual, rhs)
    }

    pub fn eq_scalar(&self, rhs: f64) -> ConstraintExpr {
        self.compare_scalar(ComparisonSense::Equal, rhs)
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(mut self, rhs: Expr) -> Expr {
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}
