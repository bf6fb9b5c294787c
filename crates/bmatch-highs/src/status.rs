//! Translation of HiGHS outcomes into backend-neutral statuses.

use crate::ffi::{HighsStatus, PrimalSolutionStatus};
use bmatch_core::SolverStatus;

/// Fold a HiGHS model status and its primal solution status into one
/// [`SolverStatus`].
///
/// A stopped solve counts as `Feasible` only when HiGHS still reports a
/// primal feasible incumbent.
pub(crate) fn to_solver_status(status: HighsStatus, primal: PrimalSolutionStatus) -> SolverStatus {
    match status {
        HighsStatus::Optimal => SolverStatus::Optimal,
        HighsStatus::Infeasible => SolverStatus::Infeasible,
        HighsStatus::Unbounded => SolverStatus::Unbounded,
        HighsStatus::ReachedTimeLimit
        | HighsStatus::ReachedIterationLimit
        | HighsStatus::Unknown => {
            if primal == PrimalSolutionStatus::Feasible {
                SolverStatus::Feasible
            } else {
                SolverStatus::Unknown
            }
        }
        HighsStatus::UnboundedOrInfeasible | HighsStatus::ModelEmpty => SolverStatus::Unknown,
    }
}

pub(crate) fn highs_status_string(status: HighsStatus) -> &'static str {
    match status {
        HighsStatus::Optimal => "optimal",
        HighsStatus::Infeasible => "infeasible",
        HighsStatus::Unbounded => "unbounded",
        HighsStatus::UnboundedOrInfeasible => "unbounded_or_infeasible",
        HighsStatus::ReachedTimeLimit => "time_limit",
        HighsStatus::ReachedIterationLimit => "iteration_limit",
        HighsStatus::ModelEmpty => "model_empty",
        HighsStatus::Unknown => "unknown",
    }
}
