use crate::sat::assignment::Solutions;
use crate::sat::cnf::Cnf;
use crate::sat::error::Result;
use crate::sat::variable_selection::DEFAULT_DECAY_INTERVAL;
use std::time::Duration;

/// Tunables for a single solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    /// Decisions between two halvings of the activity scores.
    pub decay_interval: usize,
    /// Re-check the model against every clause before reporting `Sat`.
    pub verify: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            decay_interval: DEFAULT_DECAY_INTERVAL,
            verify: true,
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolutionStats {
    pub decisions: usize,
    /// Trail literals taken off the propagation cursor.
    pub propagations: usize,
    pub conflicts: usize,
    /// Wall-clock time spent inside the propagator.
    pub propagate_time: Duration,
}

impl SolutionStats {
    /// Propagations per second of propagation time.
    #[must_use]
    pub fn propagation_rate(&self) -> f64 {
        let secs = self.propagate_time.as_secs_f64();
        if secs > 0.0 {
            self.propagations as f64 / secs
        } else {
            0.0
        }
    }
}

/// Where the search stands after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Running,
    Sat,
    Unsat,
}

/// Final verdict of a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Sat(Solutions),
    Unsat,
}

impl Outcome {
    #[must_use]
    pub const fn is_sat(&self) -> bool {
        matches!(self, Self::Sat(_))
    }

    /// SAT-competition exit code: 20 for satisfiable, 10 for unsatisfiable.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Sat(_) => 20,
            Self::Unsat => 10,
        }
    }
}

pub trait Solver {
    fn new(cnf: Cnf, config: SolverConfig) -> Self;

    /// Runs the search to completion.
    ///
    /// # Errors
    ///
    /// If verification is enabled and the model found violates a clause.
    fn solve(&mut self) -> Result<Outcome>;

    fn solutions(&self) -> Solutions;

    fn stats(&self) -> SolutionStats;
}
