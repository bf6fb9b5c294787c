//! Scripted and brute-force [`Solver`]s for unit tests.

use bmatch_core::{Model, Sense, Solution, Solver, SolverConfig, SolverError, SolverStatus};

enum Script {
    /// Enumerate every 0/1 assignment and keep the best feasible one.
    Exhaustive,
    /// Report the given status and values without looking at the model.
    Reply {
        status: SolverStatus,
        values: Vec<f64>,
    },
    Fail(SolverError),
}

pub(crate) struct FixtureSolver {
    script: Script,
    pub(crate) calls: usize,
    pub(crate) last_config: Option<SolverConfig>,
}

impl FixtureSolver {
    pub(crate) fn exhaustive() -> Self {
        Self::with_script(Script::Exhaustive)
    }

    pub(crate) fn reply(status: SolverStatus, values: Vec<f64>) -> Self {
        Self::with_script(Script::Reply { status, values })
    }

    pub(crate) fn fail(err: SolverError) -> Self {
        Self::with_script(Script::Fail(err))
    }

    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: 0,
            last_config: None,
        }
    }
}

impl Solver for FixtureSolver {
    fn name(&self) -> &'static str {
        "fixture"
    }

    fn solve(&mut self, model: &Model, config: &SolverConfig) -> Result<Solution, SolverError> {
        self.calls += 1;
        self.last_config = Some(config.clone());
        match &self.script {
            Script::Exhaustive => Ok(enumerate(model)),
            Script::Reply { status, values } => Ok(Solution::new(*status, values.clone(), 0.0)),
            Script::Fail(err) => Err(err.clone()),
        }
    }
}

fn enumerate(model: &Model) -> Solution {
    let n = model.num_variables();
    assert!(n <= 20, "fixture enumeration is limited to 20 variables");
    let sign = match model.objective().sense {
        Some(Sense::Minimize) => -1.0,
        _ => 1.0,
    };

    let mut best: Option<(f64, Vec<f64>)> = None;
    for mask in 0u32..(1u32 << n) {
        let values: Vec<f64> = (0..n).map(|bit| f64::from((mask >> bit) & 1)).collect();
        if model.verify_solution(&values, 0.0).is_err() {
            continue;
        }
        let objective: f64 = model
            .objective()
            .terms
            .iter()
            .map(|(var, coeff)| coeff * values[var.index()])
            .sum();
        if best
            .as_ref()
            .is_none_or(|(incumbent, _)| sign * objective > sign * incumbent)
        {
            best = Some((objective, values));
        }
    }

    match best {
        Some((objective_value, primal_values)) => {
            Solution::new(SolverStatus::Optimal, primal_values, objective_value)
        }
        None => Solution::without_values(SolverStatus::Infeasible),
    }
}
