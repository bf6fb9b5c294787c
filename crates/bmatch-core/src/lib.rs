//! Integer programming model and the solver contract it is handed to.
//!
//! A [`Model`] holds boolean/integer/continuous variables, named linear
//! constraints and one linear objective. Any backend implementing
//! [`Solver`] can solve it; [`Model::verify_solution`] re-checks a
//! backend's answer independently of that backend.

pub mod config;
pub mod model;
pub mod solver;
pub mod types;

pub use config::{DEFAULT_PRIMAL_TOLERANCE, SolverConfig};
pub use model::{Model, ModelError, Violation};
pub use solver::{Solution, Solver, SolverError, SolverStatus};
pub use types::{Bounds, Constraint, Objective, Sense, Variable};
