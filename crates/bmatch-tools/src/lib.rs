//! Diagnostics helpers shared by the solver backend and the benchmark.

pub mod memory;

pub use memory::{MemoryError, RssSample, RssSampler};
