//! HiGHS backend for `bmatch-core` models.
//!
//! [`HighsSolver`] implements [`bmatch_core::Solver`]. The lower-level
//! [`HighsModel`] wrapper in [`ffi`] is exposed for callers that want to
//! drive HiGHS column by column.

pub mod ffi;
pub mod solver;
mod status;

pub use ffi::{
    HighsModel, HighsModelError, HighsOption, HighsStatus, ObjectiveSense, PrimalSolutionStatus,
    SolutionSnapshot, highs_version,
};
pub use solver::HighsSolver;
