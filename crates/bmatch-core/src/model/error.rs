use bmatch_expr::ids::{ConstraintId, VariableId};

/// Rejected model edits.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    UnknownVariable(VariableId),
    UnknownConstraint(ConstraintId),
    /// `lower > upper`, or either bound is NaN.
    InvalidVariableBounds { lower: f64, upper: f64 },
    InvalidConstraintBounds { lower: f64, upper: f64 },
    /// Coefficient is NaN or infinite.
    InvalidCoefficient { coefficient: f64 },
    /// Another variable or constraint already uses this name.
    DuplicateName { name: String },
    NoObjective,
    MultipleObjectives,
}

impl ModelError {
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::UnknownVariable(_) => "MODEL_UNKNOWN_VARIABLE",
            ModelError::UnknownConstraint(_) => "MODEL_UNKNOWN_CONSTRAINT",
            ModelError::InvalidVariableBounds { .. } => "MODEL_VARIABLE_BOUNDS",
            ModelError::InvalidConstraintBounds { .. } => "MODEL_CONSTRAINT_BOUNDS",
            ModelError::InvalidCoefficient { .. } => "MODEL_COEFFICIENT",
            ModelError::DuplicateName { .. } => "MODEL_DUPLICATE_NAME",
            ModelError::NoObjective => "MODEL_NO_OBJECTIVE",
            ModelError::MultipleObjectives => "MODEL_OBJECTIVE_SET",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.code();
        match self {
            ModelError::UnknownVariable(id) => write!(f, "[{code}] No variable with id {id}"),
            ModelError::UnknownConstraint(id) => {
                write!(f, "[{code}] No constraint with id {id}")
            }
            ModelError::InvalidVariableBounds { lower, upper } => {
                write!(f, "[{code}] Variable bounds [{lower}, {upper}] are empty")
            }
            ModelError::InvalidConstraintBounds { lower, upper } => {
                write!(f, "[{code}] Constraint bounds [{lower}, {upper}] are empty")
            }
            ModelError::InvalidCoefficient { coefficient } => {
                write!(f, "[{code}] Coefficient {coefficient} is not finite")
            }
            ModelError::DuplicateName { name } => {
                write!(f, "[{code}] Name '{name}' is already in use")
            }
            ModelError::NoObjective => write!(f, "[{code}] Objective has no sense"),
            ModelError::MultipleObjectives => {
                write!(f, "[{code}] Model already has an objective")
            }
        }
    }
}

impl std::error::Error for ModelError {}
