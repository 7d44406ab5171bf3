#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Unit propagation over occurrence lists.
//!
//! Every literal taken from the trail causes a full rescan of each clause in
//! which its variable occurs with the opposite sign. There are no watched
//! literals; each rescan is linear in the clause length.

use crate::sat::assignment::{Assignment, LitValue};
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use crate::sat::solver::SolutionStats;
use crate::sat::trail::{Step, Trail};
use crate::sat::variable_selection::Vsids;
use std::time::Instant;

/// What a single clause scan concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseState {
    Satisfied,
    /// Every literal is false.
    Falsified,
    /// Exactly one literal is undefined and none is true.
    Unit(Literal),
    Unresolved,
}

/// Scans `literals` under `assignment`, stopping at the first true literal.
#[must_use]
pub fn clause_state(literals: &[Literal], assignment: &Assignment) -> ClauseState {
    let mut undefined = 0_usize;
    let mut last_undefined = None;

    for &lit in literals {
        match assignment.value_of(lit) {
            LitValue::True => return ClauseState::Satisfied,
            LitValue::Undefined => {
                undefined += 1;
                last_undefined = Some(lit);
            }
            LitValue::False => {}
        }
    }

    match (undefined, last_undefined) {
        (0, _) => ClauseState::Falsified,
        (1, Some(lit)) => ClauseState::Unit(lit),
        _ => ClauseState::Unresolved,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Propagator;

impl Propagator {
    /// Processes the trail from the cursor to its end.
    ///
    /// Returns the index of the first falsified clause, or `None` once there
    /// is nothing left to propagate. On conflict the variable of the literal
    /// whose scan failed gets its activity bumped.
    pub fn propagate(
        &self,
        trail: &mut Trail,
        assignment: &mut Assignment,
        cnf: &Cnf,
        vsids: &mut Vsids,
        stats: &mut SolutionStats,
    ) -> Option<usize> {
        let start = Instant::now();
        let mut conflict = None;

        while conflict.is_none() && trail.curr_idx < trail.len() {
            let step = trail[trail.curr_idx];
            trail.curr_idx += 1;

            let Step::Lit(lit) = step else {
                continue;
            };
            stats.propagations += 1;

            conflict = Self::check_clauses(lit, trail, assignment, cnf);
            if conflict.is_some() {
                stats.conflicts += 1;
                vsids.bump(lit.variable());
            }
        }

        stats.propagate_time += start.elapsed();
        conflict
    }

    /// Rechecks the clauses that just lost `lit`'s negation as a candidate,
    /// asserting any that became unit.
    fn check_clauses(
        lit: Literal,
        trail: &mut Trail,
        assignment: &mut Assignment,
        cnf: &Cnf,
    ) -> Option<usize> {
        for &idx in cnf.opposite_occurrences(lit) {
            match clause_state(cnf[idx].literals(), assignment) {
                ClauseState::Falsified => {
                    log::trace!("conflict in clause {idx} after {lit}");
                    return Some(idx);
                }
                ClauseState::Unit(unit) => trail.assert(unit, assignment),
                ClauseState::Satisfied | ClauseState::Unresolved => {}
            }
        }
        None
    }
}
