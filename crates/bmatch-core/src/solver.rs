//! The contract between a [`Model`] and whatever solves it.
//!
//! Every completed solve comes back as `Ok`, whatever its status; callers
//! decide which statuses they accept. `Err` means the backend itself failed.

use crate::Model;
use crate::config::SolverConfig;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverStatus {
    Optimal,
    /// A limit was reached; the incumbent is feasible but may be suboptimal.
    Feasible,
    Infeasible,
    Unbounded,
    /// Stopped without a usable solution.
    Unknown,
}

impl SolverStatus {
    pub fn is_optimal(self) -> bool {
        self == SolverStatus::Optimal
    }

    /// Whether primal values come with this status.
    pub fn has_solution(self) -> bool {
        matches!(self, SolverStatus::Optimal | SolverStatus::Feasible)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "optimal",
            SolverStatus::Feasible => "feasible",
            SolverStatus::Infeasible => "infeasible",
            SolverStatus::Unbounded => "unbounded",
            SolverStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    NoObjective,
    /// The backend library could not be loaded or initialized.
    Unavailable(String),
    /// The backend failed while building or solving.
    Backend(String),
}

impl SolverError {
    pub fn code(&self) -> &'static str {
        match self {
            SolverError::NoObjective => "SOLVER_NO_OBJECTIVE",
            SolverError::Unavailable(_) => "SOLVER_UNAVAILABLE",
            SolverError::Backend(_) => "SOLVER_BACKEND",
        }
    }
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.code();
        match self {
            SolverError::NoObjective => write!(f, "[{code}] Model has no objective"),
            SolverError::Unavailable(detail) => {
                write!(f, "[{code}] Solver unavailable: {detail}")
            }
            SolverError::Backend(detail) => write!(f, "[{code}] Solver failed: {detail}"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Outcome of one solve.
#[derive(Debug, Clone)]
pub struct Solution {
    pub status: SolverStatus,
    /// One value per variable, in variable order. Empty when
    /// `status.has_solution()` is false.
    pub primal_values: Vec<f64>,
    /// Row activities, in constraint order, when the backend reports them.
    pub row_values: Vec<f64>,
    /// NaN when there are no values.
    pub objective_value: f64,
    pub solve_time: Duration,
    /// Backend statistics such as `mip_gap` or node counts.
    pub metadata: BTreeMap<&'static str, f64>,
}

impl Solution {
    pub fn new(status: SolverStatus, primal_values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status,
            primal_values,
            row_values: Vec::new(),
            objective_value,
            solve_time: Duration::ZERO,
            metadata: BTreeMap::new(),
        }
    }

    /// A status-only outcome.
    pub fn without_values(status: SolverStatus) -> Self {
        Self::new(status, Vec::new(), f64::NAN)
    }

    pub fn with_row_values(mut self, row_values: Vec<f64>) -> Self {
        self.row_values = row_values;
        self
    }

    pub fn with_solve_time(mut self, solve_time: Duration) -> Self {
        self.solve_time = solve_time;
        self
    }

    pub fn with_metadata(mut self, metadata: BTreeMap<&'static str, f64>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn get_primal(&self, index: usize) -> Option<f64> {
        self.primal_values.get(index).copied()
    }

    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }
}

/// A backend able to solve a [`Model`].
///
/// Callers hold `&mut` for the duration of one solve; a backend may keep
/// state between solves but must not let it change results.
pub trait Solver {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError>;
}
