//! Per-call matching options.

use bmatch_core::{DEFAULT_PRIMAL_TOLERANCE, SolverConfig};

/// Options for one matching solve.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Lower bound on every node's degree; zero adds no lower-bound rows.
    pub b_min: u32,
    /// Soft deadline handed to the solver.
    pub timeout_ms: Option<u64>,
    /// Absolute slack used when re-checking the solver's answer.
    pub primal_tolerance: f64,
    /// Solver thread count. `None` uses solver default.
    pub threads: Option<u32>,
    /// Forward solver output to the console.
    pub log_to_console: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            b_min: 0,
            timeout_ms: None,
            primal_tolerance: DEFAULT_PRIMAL_TOLERANCE,
            threads: None,
            log_to_console: false,
        }
    }
}

impl MatchingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_b_min(mut self, b_min: u32) -> Self {
        self.b_min = b_min;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Set the timeout only when one is given.
    pub fn with_optional_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_primal_tolerance(mut self, tolerance: f64) -> Self {
        self.primal_tolerance = tolerance;
        self
    }

    pub fn with_threads(mut self, threads: u32) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = enabled;
        self
    }

    /// Backend settings derived from these options.
    ///
    /// The verification tolerance is not forwarded; the backend keeps its
    /// own feasibility tolerance.
    pub fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::new().with_log_to_console(self.log_to_console);
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_time_limit_ms(timeout_ms);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        config
    }
}
