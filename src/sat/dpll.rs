//! The DPLL search driver.
//!
//! `Dpll` owns every piece of search state: the clause store, the assignment,
//! the trail, the activity scores and the counters. The search is iterative:
//! each [`Dpll::step`] runs propagation to a fixpoint or a conflict, then
//! either backtracks chronologically (flipping the most recent decision) or
//! makes a new decision. There is no clause learning and no restart.
//!
//! Before the first step every input clause of size one is asserted at level
//! zero. If two such clauses contradict each other the formula is reported
//! unsatisfiable without entering the search loop.

use crate::sat::assignment::{Assignment, Solutions};
use crate::sat::cnf::{Cnf, DecisionLevel};
use crate::sat::error::Result;
use crate::sat::literal::Literal;
use crate::sat::propagation::Propagator;
use crate::sat::solver::{Outcome, SearchState, SolutionStats, Solver, SolverConfig};
use crate::sat::trail::Trail;
use crate::sat::variable_selection::Vsids;

#[derive(Debug, Clone)]
pub struct Dpll {
    pub cnf: Cnf,
    assignment: Assignment,
    trail: Trail,
    selector: Vsids,
    propagator: Propagator,
    stats: SolutionStats,
    config: SolverConfig,
    state: SearchState,
}

impl Solver for Dpll {
    fn new(cnf: Cnf, config: SolverConfig) -> Self {
        let assignment = Assignment::new(cnf.num_vars);
        let trail = Trail::new(cnf.num_vars);
        let selector = Vsids::new(&cnf, config.decay_interval);

        let mut solver = Self {
            cnf,
            assignment,
            trail,
            selector,
            propagator: Propagator,
            stats: SolutionStats::default(),
            config,
            state: SearchState::Running,
        };
        solver.seed_units();
        solver
    }

    fn solve(&mut self) -> Result<Outcome> {
        loop {
            match self.step()? {
                SearchState::Running => {}
                SearchState::Sat => return Ok(Outcome::Sat(self.solutions())),
                SearchState::Unsat => return Ok(Outcome::Unsat),
            }
        }
    }

    fn solutions(&self) -> Solutions {
        self.assignment.get_solutions()
    }

    fn stats(&self) -> SolutionStats {
        self.stats
    }
}

impl Dpll {
    #[must_use]
    pub const fn state(&self) -> SearchState {
        self.state
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[must_use]
    pub const fn trail(&self) -> &Trail {
        &self.trail
    }

    #[must_use]
    pub const fn selector(&self) -> &Vsids {
        &self.selector
    }

    #[must_use]
    pub const fn decision_level(&self) -> DecisionLevel {
        self.trail.decision_level()
    }

    /// Asserts the literal of every size-one clause at level zero, in input
    /// order. A unit clause that is already false makes the formula UNSAT.
    fn seed_units(&mut self) {
        for clause in self.cnf.iter().filter(|c| c.is_unit()) {
            let lit = clause[0];
            let value = self.assignment.value_of(lit);

            if value.is_false() {
                log::debug!("unit clause {lit} contradicts an earlier unit clause");
                self.state = SearchState::Unsat;
                return;
            }
            if value.is_undefined() {
                self.trail.assert(lit, &mut self.assignment);
            }
        }
        log::debug!("seeded {} unit literals", self.trail.len());
    }

    /// Runs one iteration of the search: propagate, then backtrack on a
    /// conflict or decide on a fixpoint. Terminal states are sticky.
    ///
    /// # Errors
    ///
    /// If verification is enabled and the total assignment reached violates a
    /// clause.
    pub fn step(&mut self) -> Result<SearchState> {
        if self.state != SearchState::Running {
            return Ok(self.state);
        }

        let conflict = self.propagator.propagate(
            &mut self.trail,
            &mut self.assignment,
            &self.cnf,
            &mut self.selector,
            &mut self.stats,
        );

        if conflict.is_some() {
            if self.decision_level() == 0 {
                log::debug!("conflict at level 0 after {} decisions", self.stats.decisions);
                self.state = SearchState::Unsat;
            } else {
                self.backtrack();
            }
            return Ok(self.state);
        }

        match self.selector.pick(&self.assignment, self.stats.decisions) {
            Some(var) => self.decide(Literal::new(var, true)),
            None => {
                if self.config.verify {
                    self.cnf.check_model(&self.assignment)?;
                }
                log::debug!("model found after {} decisions", self.stats.decisions);
                self.state = SearchState::Sat;
            }
        }
        Ok(self.state)
    }

    /// Undoes the current level and asserts the negation of its decision at
    /// the level below.
    fn backtrack(&mut self) {
        let decision = self.trail.pop_level(&mut self.assignment);
        self.trail.curr_idx = self.trail.len();
        log::trace!(
            "backtrack to level {}, flipping {decision}",
            self.trail.decision_level()
        );
        self.trail.assert(!decision, &mut self.assignment);
    }

    fn decide(&mut self, lit: Literal) {
        self.trail.push_level();
        self.trail.curr_idx = self.trail.len();
        self.stats.decisions += 1;
        log::trace!("decide {lit} at level {}", self.trail.decision_level());
        self.trail.assert(lit, &mut self.assignment);
    }
}
