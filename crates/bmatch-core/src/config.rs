use std::time::Duration;

/// Absolute slack allowed when re-checking a solution against the model,
/// the customary primal feasibility tolerance of MIP solvers.
pub const DEFAULT_PRIMAL_TOLERANCE: f64 = 1e-7;

/// Backend-neutral solve options. Every `None` leaves the backend default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverConfig {
    /// Wall-clock budget. The backend stops and reports its incumbent, if
    /// any, once it runs out.
    pub time_limit: Option<Duration>,
    /// Relative MIP gap at which the search may stop.
    pub mip_gap: Option<f64>,
    pub threads: Option<u32>,
    /// Primal feasibility tolerance inside the backend.
    pub tolerance: Option<f64>,
    pub log_to_console: Option<bool>,
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_time_limit_ms(self, millis: u64) -> Self {
        self.with_time_limit(Duration::from_millis(millis))
    }

    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn with_log_to_console(mut self, enabled: bool) -> Self {
        self.log_to_console = Some(enabled);
        self
    }

    /// Whether every option is left to the backend.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
