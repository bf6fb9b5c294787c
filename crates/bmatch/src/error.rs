//! Matching error types.

use crate::graph::{Edge, NodeIndex};
use bmatch_core::{ModelError, SolverError, SolverStatus, Violation};

/// The two broad failure classes of a matching call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied bad capacities, edges or weights.
    InvalidInput,
    /// The solver found no usable solution, or its solution failed verification.
    Solver,
}

/// Errors returned by the matching functions.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchingError {
    /// A capacity is zero.
    NonPositiveCapacity { node: NodeIndex },
    /// An edge references a node outside the capacity list.
    NodeOutOfRange {
        edge: Edge,
        node: NodeIndex,
        node_count: usize,
    },
    /// An edge weight is below zero.
    NegativeWeight { edge: Edge, weight: f64 },
    /// An edge weight is NaN or infinite.
    NonFiniteWeight { edge: Edge, weight: f64 },
    /// A node pair has no edge in either direction.
    MissingEdge { pair: Edge },
    /// A node pair has an edge in both directions.
    DuplicatedEdge { pair: Edge },
    /// The edge count does not match a complete graph.
    WrongEdgeCount { expected: usize, got: usize },
    /// The model could not be built.
    Model(ModelError),
    /// The solver backend failed to run.
    Backend(SolverError),
    /// The solver finished without a usable solution.
    SolveFailed { status: SolverStatus },
    /// The returned solution breaks the model beyond tolerance.
    SolutionRejected { violations: Vec<Violation> },
}

impl MatchingError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            MatchingError::NonPositiveCapacity { .. } => "INPUT_NON_POSITIVE_CAPACITY",
            MatchingError::NodeOutOfRange { .. } => "INPUT_NODE_OUT_OF_RANGE",
            MatchingError::NegativeWeight { .. } => "INPUT_NEGATIVE_WEIGHT",
            MatchingError::NonFiniteWeight { .. } => "INPUT_NON_FINITE_WEIGHT",
            MatchingError::MissingEdge { .. } => "INPUT_MISSING_EDGE",
            MatchingError::DuplicatedEdge { .. } => "INPUT_DUPLICATED_EDGE",
            MatchingError::WrongEdgeCount { .. } => "INPUT_WRONG_EDGE_COUNT",
            MatchingError::Model(_) => "SOLVER_MODEL_BUILD",
            MatchingError::Backend(_) => "SOLVER_BACKEND",
            MatchingError::SolveFailed { .. } => "SOLVER_NO_SOLUTION",
            MatchingError::SolutionRejected { .. } => "SOLVER_SOLUTION_REJECTED",
        }
    }

    /// Which of the two failure classes this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchingError::NonPositiveCapacity { .. }
            | MatchingError::NodeOutOfRange { .. }
            | MatchingError::NegativeWeight { .. }
            | MatchingError::NonFiniteWeight { .. }
            | MatchingError::MissingEdge { .. }
            | MatchingError::DuplicatedEdge { .. }
            | MatchingError::WrongEdgeCount { .. } => ErrorKind::InvalidInput,
            MatchingError::Model(_)
            | MatchingError::Backend(_)
            | MatchingError::SolveFailed { .. }
            | MatchingError::SolutionRejected { .. } => ErrorKind::Solver,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }

    pub fn is_solver_error(&self) -> bool {
        self.kind() == ErrorKind::Solver
    }
}

impl std::fmt::Display for MatchingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchingError::NonPositiveCapacity { node } => write!(
                f,
                "[{}] b_max of node {} must be greater than zero",
                self.code(),
                node
            ),
            MatchingError::NodeOutOfRange {
                edge,
                node,
                node_count,
            } => write!(
                f,
                "[{}] Edge ({}, {}) references node {} but there are {} nodes",
                self.code(),
                edge.0,
                edge.1,
                node,
                node_count
            ),
            MatchingError::NegativeWeight { edge, weight } => write!(
                f,
                "[{}] Edge ({}, {}) has negative weight {}",
                self.code(),
                edge.0,
                edge.1,
                weight
            ),
            MatchingError::NonFiniteWeight { edge, weight } => write!(
                f,
                "[{}] Edge ({}, {}) has non-finite weight {}",
                self.code(),
                edge.0,
                edge.1,
                weight
            ),
            MatchingError::MissingEdge { pair } => {
                write!(f, "[{}] Missing edge ({}, {})", self.code(), pair.0, pair.1)
            }
            MatchingError::DuplicatedEdge { pair } => write!(
                f,
                "[{}] Duplicated edge ({}, {})",
                self.code(),
                pair.0,
                pair.1
            ),
            MatchingError::WrongEdgeCount { expected, got } => write!(
                f,
                "[{}] Wrong number of edges: expected {}, got {}",
                self.code(),
                expected,
                got
            ),
            MatchingError::Model(err) => write!(f, "[{}] {}", self.code(), err),
            MatchingError::Backend(err) => write!(f, "[{}] {}", self.code(), err),
            MatchingError::SolveFailed { status } => write!(
                f,
                "[{}] The solver could not solve the problem (status: {})",
                self.code(),
                status
            ),
            MatchingError::SolutionRejected { violations } => {
                write!(
                    f,
                    "[{}] The solution does not satisfy the constraints",
                    self.code()
                )?;
                if let Some(first) = violations.first() {
                    write!(f, ": {}", first)?;
                    if violations.len() > 1 {
                        write!(f, " (and {} more)", violations.len() - 1)?;
                    }
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for MatchingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchingError::Model(err) => Some(err),
            MatchingError::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for MatchingError {
    fn from(err: ModelError) -> Self {
        MatchingError::Model(err)
    }
}

impl From<SolverError> for MatchingError {
    fn from(err: SolverError) -> Self {
        MatchingError::Backend(err)
    }
}
