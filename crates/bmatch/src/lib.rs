//! Maximum-weight b-matching of a weighted undirected graph.
//!
//! A b-matching selects edges so that every node touches at most `b_max`
//! of them (and, optionally, at least a shared `b_min`). The selection with
//! the largest total weight is found by handing a 0/1 integer program to a
//! [`bmatch_core::Solver`]:
//!
//! - [`validate`]: input checks run before any model is built
//! - [`builder`]: graph to [`MatchingModel`] translation
//! - [`solve`]: solver invocation, status handling and re-verification
//! - [`inclusive`]: the fixed `b_min` policy for fully connected graphs
//! - [`check`]: solver-free inclusiveness check of an edge list
//!
//! With the default `highs` feature, [`maximize_weighted_b_matching`] and
//! [`inclusive_matching`] solve with HiGHS directly.

pub mod builder;
pub mod check;
pub mod config;
pub mod error;
pub mod graph;
pub mod inclusive;
pub mod solve;
pub mod validate;

#[cfg(test)]
mod fixture;

pub use builder::MatchingModel;
pub use check::{InclusiveReport, check_inclusive};
pub use config::MatchingConfig;
pub use error::{ErrorKind, MatchingError};
pub use graph::{Edge, NodeIndex, Weights, matching_weight, node_degrees};
pub use inclusive::{inclusive_b_min, inclusive_matching_with};
pub use solve::{maximize_weighted_b_matching_with, solve_model};
pub use validate::{validate_capacities, validate_full_connectivity, validate_weights};

#[cfg(feature = "highs")]
pub use inclusive::inclusive_matching;
#[cfg(feature = "highs")]
pub use solve::maximize_weighted_b_matching;
