use crate::expr::core::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonSense {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl std::fmt::Display for ComparisonSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ComparisonSense::LessEqual => "<=",
            ComparisonSense::GreaterEqual => ">=",
            ComparisonSense::Equal => "==",
        })
    }
}

/// `expr <sense> rhs`, with the constant already moved into `rhs` when
/// built through [`Expr::le_scalar`] and friends.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintExpr {
    expr: Expr,
    sense: ComparisonSense,
    rhs: f64,
}

impl ConstraintExpr {
    pub fn new(expr: Expr, sense: ComparisonSense, rhs: f64) -> Self {
        Self { expr, sense, rhs }
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    pub fn sense(&self) -> ComparisonSense {
        self.sense
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }

    pub fn into_parts(self) -> (Expr, ComparisonSense, f64) {
        (self.expr, self.sense, self.rhs)
    }
}

impl std::fmt::Display for ConstraintExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, (var, coeff)) in self.expr.linear_terms().iter().enumerate() {
            if position > 0 {
                f.write_str(" + ")?;
            }
            write!(f, "{coeff} x{var}")?;
        }
        if self.expr.linear_terms().is_empty() {
            f.write_str("0")?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}
