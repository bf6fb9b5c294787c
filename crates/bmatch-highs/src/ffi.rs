//! Thin safe layer over the `highs` crate and the raw HiGHS info API.
//!
//! This module contains unsafe code for interacting with the C library.
#![allow(unsafe_code)]

use highs::{Col, HighsModelStatus, RowProblem, Sense as HighsSense, SolvedModel};
use std::ffi::{CStr, CString};
use std::fmt;
use tracing::{debug, trace, warn};

/// Objective sense for optimization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    /// Minimize the objective
    Minimize,
    /// Maximize the objective
    Maximize,
}

/// Model status reported by HiGHS after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighsStatus {
    /// Optimal solution found
    Optimal,
    /// Problem is infeasible
    Infeasible,
    /// Problem is unbounded
    Unbounded,
    /// Presolve could not tell infeasible from unbounded
    UnboundedOrInfeasible,
    /// Solver reached time limit (may have feasible solution)
    ReachedTimeLimit,
    /// Solver reached iteration limit (may have feasible solution)
    ReachedIterationLimit,
    /// The model had no columns and no rows
    ModelEmpty,
    /// Any other status, including interrupts and internal errors
    Unknown,
}

/// HiGHS `primal_solution_status` info value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimalSolutionStatus {
    /// No primal solution is available
    NoSolution,
    /// A primal solution exists but violates the model
    Infeasible,
    /// A primal feasible solution is available
    Feasible,
}

impl PrimalSolutionStatus {
    fn from_info(value: highs_sys::HighsInt) -> Self {
        match value {
            2 => PrimalSolutionStatus::Feasible,
            1 => PrimalSolutionStatus::Infeasible,
            _ => PrimalSolutionStatus::NoSolution,
        }
    }
}

/// Errors returned by the HiGHS model wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsModelError {
    ColumnCoefficientLengthMismatch {
        columns: usize,
        coefficients: usize,
    },
    ColumnIndexOutOfBounds {
        column_index: usize,
        num_columns: usize,
    },
    SolveRequired {
        operation: &'static str,
    },
    SolveFailed {
        message: String,
    },
}

impl fmt::Display for HighsModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighsModelError::ColumnCoefficientLengthMismatch {
                columns,
                coefficients,
            } => write!(
                f,
                "columns length ({}) must match coefficients length ({})",
                columns, coefficients
            ),
            HighsModelError::ColumnIndexOutOfBounds {
                column_index,
                num_columns,
            } => write!(
                f,
                "column index {} out of bounds (num_columns = {})",
                column_index, num_columns
            ),
            HighsModelError::SolveRequired { operation } => {
                write!(f, "solve must be called before {}", operation)
            }
            HighsModelError::SolveFailed { message } => {
                write!(f, "HiGHS failed to run: {}", message)
            }
        }
    }
}

impl std::error::Error for HighsModelError {}

/// Primal column values and row activities of the last solve.
#[derive(Debug, Clone)]
pub struct SolutionSnapshot {
    col_values: Vec<f64>,
    row_values: Vec<f64>,
}

impl SolutionSnapshot {
    /// Primal values for variables.
    pub fn col_values(&self) -> &[f64] {
        &self.col_values
    }

    /// Row activities for constraints.
    pub fn row_values(&self) -> &[f64] {
        &self.row_values
    }

    /// Split into column values and row activities.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.col_values, self.row_values)
    }
}

/// Option value types for HiGHS solver configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum HighsOption {
    Bool(bool),
    Int(i32),
    Float(f64),
    Str(String),
}

/// Safe wrapper around a single HiGHS solve.
///
/// Columns and rows are accumulated into a [`RowProblem`]; [`HighsModel::solve`]
/// consumes them. Results stay queryable until the next column is added.
pub struct HighsModel {
    problem: RowProblem,
    objective_sense: ObjectiveSense,
    solved: Option<SolvedModel>,
    columns: Vec<Col>,
    log_to_console: bool,
    options: Vec<(String, HighsOption)>,
}

impl HighsModel {
    /// Create a new HiGHS model
    pub fn new() -> Self {
        trace!(
            component = "solver",
            operation = "init_highs",
            status = "success",
            "Creating new HiGHS model"
        );
        HighsModel {
            problem: RowProblem::default(),
            objective_sense: ObjectiveSense::Minimize,
            solved: None,
            columns: Vec::new(),
            log_to_console: false,
            options: Vec::new(),
        }
    }

    /// Add a continuous column and return its index.
    pub fn add_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
    ) -> usize {
        self.push_col(lower_bound, upper_bound, objective_coefficient, false)
    }

    /// Add an integer column and return its index.
    pub fn add_integer_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
    ) -> usize {
        self.push_col(lower_bound, upper_bound, objective_coefficient, true)
    }

    fn push_col(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        objective_coefficient: f64,
        is_integer: bool,
    ) -> usize {
        trace!(
            lower_bound,
            upper_bound,
            objective_coefficient,
            is_integer,
            component = "solver",
            operation = "add_column",
            status = "success",
            "Adding column"
        );
        self.solved = None;
        let col = if is_integer {
            self.problem
                .add_integer_column(objective_coefficient, lower_bound..=upper_bound)
        } else {
            self.problem
                .add_column(objective_coefficient, lower_bound..=upper_bound)
        };
        self.columns.push(col);
        self.columns.len() - 1
    }

    /// Add a linear row over previously added columns and return its index.
    ///
    /// # Errors
    ///
    /// Returns an error if columns and coefficients have different lengths
    /// or if any column index is out of bounds.
    pub fn add_row(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
        columns: &[usize],
        coefficients: &[f64],
    ) -> Result<usize, HighsModelError> {
        if columns.len() != coefficients.len() {
            warn!(
                component = "solver",
                operation = "add_row",
                status = "error",
                columns = columns.len(),
                coefficients = coefficients.len(),
                "Column/coefficients length mismatch"
            );
            return Err(HighsModelError::ColumnCoefficientLengthMismatch {
                columns: columns.len(),
                coefficients: coefficients.len(),
            });
        }

        let num_columns = self.columns.len();
        let factors = columns
            .iter()
            .zip(coefficients)
            .map(|(&column_index, &coeff)| {
                self.columns
                    .get(column_index)
                    .map(|col| (*col, coeff))
                    .ok_or(HighsModelError::ColumnIndexOutOfBounds {
                        column_index,
                        num_columns,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        trace!(
            lower_bound,
            upper_bound,
            num_coeffs = factors.len(),
            component = "solver",
            operation = "add_row",
            status = "success",
            "Adding row"
        );
        self.solved = None;
        self.problem.add_row(lower_bound..=upper_bound, factors);
        Ok(self.problem.num_rows().saturating_sub(1))
    }

    /// Set the objective sense
    pub fn set_objective_sense(&mut self, sense: ObjectiveSense) {
        self.objective_sense = sense;
    }

    /// Current objective sense.
    pub fn objective_sense(&self) -> ObjectiveSense {
        self.objective_sense
    }

    /// Enable or disable HiGHS console output for the next solve.
    pub fn set_log_to_console(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    /// Queue a HiGHS option for the next solve.
    pub fn set_option(&mut self, option: impl Into<String>, value: HighsOption) {
        self.options.push((option.into(), value));
    }

    /// Number of columns waiting for the next solve.
    pub fn columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows waiting for the next solve.
    pub fn rows(&self) -> usize {
        self.problem.num_rows()
    }

    /// Run HiGHS on the accumulated problem.
    ///
    /// The pending columns, rows and options are consumed; results of this
    /// solve remain available through the query methods.
    ///
    /// # Errors
    ///
    /// Returns an error if HiGHS itself reports a failure to run.
    pub fn solve(&mut self) -> Result<HighsStatus, HighsModelError> {
        debug!(
            num_cols = self.problem.num_cols(),
            num_rows = self.problem.num_rows(),
            objective_sense = ?self.objective_sense,
            options = self.options.len(),
            component = "solver",
            operation = "solve",
            status = "start",
            "Handing model to HiGHS"
        );

        let sense = match self.objective_sense {
            ObjectiveSense::Minimize => HighsSense::Minimise,
            ObjectiveSense::Maximize => HighsSense::Maximise,
        };

        let problem = std::mem::take(&mut self.problem);
        self.columns.clear();
        let mut model = problem.optimise(sense);
        if !self.log_to_console {
            model.make_quiet();
        }
        for (option, value) in self.options.drain(..) {
            match value {
                HighsOption::Bool(val) => model.set_option(option.as_str(), val),
                HighsOption::Int(val) => model.set_option(option.as_str(), val),
                HighsOption::Float(val) => model.set_option(option.as_str(), val),
                HighsOption::Str(val) => model.set_option(option.as_str(), val.as_str()),
            }
        }
        if self.log_to_console {
            model.set_option("output_flag", true);
            model.set_option("log_to_console", true);
        }

        let solved = model.try_solve().map_err(|status| {
            warn!(
                component = "solver",
                operation = "solve",
                status = "error",
                highs_status = ?status,
                "HiGHS run returned an error status"
            );
            HighsModelError::SolveFailed {
                message: format!("{:?}", status),
            }
        })?;
        let status = map_status(solved.status());

        trace!(
            component = "solver",
            operation = "solve",
            status = "success",
            model_status = ?status,
            "Model status received"
        );
        self.solved = Some(solved);
        Ok(status)
    }

    fn solved(&self, operation: &'static str) -> Result<&SolvedModel, HighsModelError> {
        self.solved
            .as_ref()
            .ok_or(HighsModelError::SolveRequired { operation })
    }

    /// Objective value of the last solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn objective_value(&self) -> Result<f64, HighsModelError> {
        Ok(self.solved("objective_value")?.objective_value())
    }

    /// Relative MIP gap of the last solve, NaN before any solve.
    pub fn mip_gap(&self) -> f64 {
        self.solved
            .as_ref()
            .map_or(f64::NAN, |solved| solved.mip_gap())
    }

    /// Whether the last solve left a primal feasible point behind.
    pub fn primal_solution_status(&self) -> PrimalSolutionStatus {
        self.int_info("primal_solution_status")
            .map_or(PrimalSolutionStatus::NoSolution, PrimalSolutionStatus::from_info)
    }

    /// Branch-and-bound nodes explored by the last MIP solve.
    pub fn mip_node_count(&self) -> u64 {
        let Some(solved) = self.solved.as_ref() else {
            return 0;
        };
        let Ok(name) = CString::new("mip_node_count") else {
            return 0;
        };
        let mut value: i64 = 0;
        let status = unsafe {
            highs_sys::Highs_getInt64InfoValue(solved.as_ptr(), name.as_ptr(), &raw mut value)
        };
        if status != highs_sys::STATUS_OK || value < 0 {
            return 0;
        }
        value as u64
    }

    /// Simplex iterations spent by the last solve.
    pub fn simplex_iteration_count(&self) -> u64 {
        self.int_info("simplex_iteration_count")
            .filter(|value| *value >= 0)
            .map_or(0, |value| value as u64)
    }

    fn int_info(&self, name: &str) -> Option<highs_sys::HighsInt> {
        let solved = self.solved.as_ref()?;
        let c_name = CString::new(name).ok()?;
        let mut value: highs_sys::HighsInt = 0;
        let status = unsafe {
            highs_sys::Highs_getIntInfoValue(solved.as_ptr(), c_name.as_ptr(), &raw mut value)
        };
        if status == highs_sys::STATUS_OK {
            Some(value)
        } else {
            debug!(
                component = "solver",
                operation = "solve_info",
                info = name,
                status_code = status,
                "HiGHS info value not available"
            );
            None
        }
    }

    /// Copy out the primal values of the last solve.
    ///
    /// # Errors
    ///
    /// Returns an error if the model has not been solved yet.
    pub fn solution_snapshot(&self) -> Result<SolutionSnapshot, HighsModelError> {
        let solution = self.solved("solution_snapshot")?.get_solution();
        Ok(SolutionSnapshot {
            col_values: solution.columns().to_vec(),
            row_values: solution.rows().to_vec(),
        })
    }
}

impl Default for HighsModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HighsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let objective_value = self.solved.as_ref().map(|s| s.objective_value());
        f.debug_struct("HighsModel")
            .field("num_variables", &self.problem.num_cols())
            .field("num_constraints", &self.problem.num_rows())
            .field("objective_sense", &self.objective_sense)
            .field("objective_value", &objective_value)
            .finish_non_exhaustive()
    }
}

/// Return the HiGHS solver version string, if available.
pub fn highs_version() -> Option<String> {
    unsafe {
        let ptr = highs_sys::Highs_version();
        if ptr.is_null() {
            None
        } else {
            CStr::from_ptr(ptr).to_str().ok().map(str::to_string)
        }
    }
}

fn map_status(status: HighsModelStatus) -> HighsStatus {
    match status {
        HighsModelStatus::Optimal => HighsStatus::Optimal,
        HighsModelStatus::Infeasible => HighsStatus::Infeasible,
        HighsModelStatus::Unbounded => HighsStatus::Unbounded,
        HighsModelStatus::UnboundedOrInfeasible => HighsStatus::UnboundedOrInfeasible,
        HighsModelStatus::ReachedTimeLimit => HighsStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => HighsStatus::ReachedIterationLimit,
        HighsModelStatus::ModelEmpty => HighsStatus::ModelEmpty,
        _ => HighsStatus::Unknown,
    }
}
