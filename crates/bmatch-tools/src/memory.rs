//! Resident set size sampling of the current process.
//!
//! The solver backend records RSS around each solve for its debug events and
//! the benchmark reports it per run. Both only need the current process, so
//! the sampler refreshes that one entry instead of the whole process table.

use std::time::Instant;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

/// RSS of the current process at one labelled moment.
#[derive(Debug, Clone, Copy)]
pub struct RssSample {
    /// Resident set size in bytes
    pub rss_bytes: u64,
    /// When the sample was taken
    pub taken_at: Instant,
    /// Label of the phase being measured (e.g. "solve_start")
    pub stage: &'static str,
}

impl RssSample {
    /// Signed growth from `earlier` to `self` in bytes.
    pub fn delta_since(&self, earlier: &Self) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }
}

/// Errors produced by memory sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "failed to locate process {}", pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

/// Reusable sampler bound to the current process.
#[derive(Debug)]
pub struct RssSampler {
    system: System,
    pid: Pid,
}

impl RssSampler {
    /// Create a sampler for the running process.
    pub fn new() -> Self {
        Self {
            system: System::new(),
            pid: Pid::from(std::process::id() as usize),
        }
    }

    /// Take a fresh sample labelled with `stage`.
    ///
    /// # Errors
    ///
    /// Returns an error if the current process cannot be located.
    pub fn sample(&mut self, stage: &'static str) -> Result<RssSample, MemoryError> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );
        let process = self
            .system
            .process(self.pid)
            .ok_or(MemoryError::ProcessNotFound {
                pid: std::process::id(),
            })?;

        Ok(RssSample {
            rss_bytes: process.memory(),
            taken_at: Instant::now(),
            stage,
        })
    }

    /// Sample and keep only the byte count, swallowing lookup failures.
    pub fn rss_bytes(&mut self, stage: &'static str) -> Option<u64> {
        self.sample(stage).ok().map(|sample| sample.rss_bytes)
    }
}

impl Default for RssSampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed difference of two optional readings, when both exist.
pub fn rss_delta(before: Option<u64>, after: Option<u64>) -> Option<i64> {
    match (before, after) {
        (Some(before), Some(after)) => Some(after as i64 - before as i64),
        _ => None,
    }
}
