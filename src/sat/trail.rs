#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::assignment::Assignment;
use crate::sat::literal::Literal;
use std::ops::Index;

/// One entry of the trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// Opens a new decision level. The entry directly above it is the
    /// level's decision literal.
    LevelMarker,
    /// A decided or propagated literal.
    Lit(Literal),
}

/// Chronological record of assignments, split into decision levels by
/// [`Step::LevelMarker`] entries.
///
/// `curr_idx` is the propagation cursor: everything below it has already had
/// its consequences computed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Trail {
    t: Vec<Step>,
    pub curr_idx: usize,
    level: usize,
}

impl Index<usize> for Trail {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.t[index]
    }
}

impl Trail {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            t: Vec::with_capacity(num_vars * 2),
            curr_idx: 0,
            level: 0,
        }
    }

    #[must_use]
    pub const fn decision_level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Step> {
        self.t.iter()
    }

    /// Literals on the trail, skipping level markers.
    pub fn literals(&self) -> impl Iterator<Item = Literal> + '_ {
        self.t.iter().filter_map(|step| match step {
            Step::Lit(lit) => Some(*lit),
            Step::LevelMarker => None,
        })
    }

    /// True when every entry up to the end has been propagated.
    #[must_use]
    pub fn fully_propagated(&self) -> bool {
        self.curr_idx >= self.t.len()
    }

    /// Pushes `lit` and makes it true in `a`. The variable must be unassigned.
    pub fn assert(&mut self, lit: Literal, a: &mut Assignment) {
        debug_assert!(a[lit.variable()].is_undefined());
        self.t.push(Step::Lit(lit));
        a.set(lit);
    }

    pub fn push_level(&mut self) {
        self.t.push(Step::LevelMarker);
        self.level += 1;
    }

    /// Undoes the current decision level, unassigning every literal above the
    /// most recent marker and removing the marker. Returns the level's
    /// decision literal.
    ///
    /// # Panics
    ///
    /// If called at level 0, or if the level holds no decision.
    pub fn pop_level(&mut self, a: &mut Assignment) -> Literal {
        assert!(self.level > 0, "pop_level called at decision level 0");

        let mut decision = None;
        while let Some(step) = self.t.pop() {
            match step {
                Step::Lit(lit) => {
                    a.unassign(lit.variable());
                    decision = Some(lit);
                }
                Step::LevelMarker => break,
            }
        }
        self.level -= 1;
        self.curr_idx = self.curr_idx.min(self.t.len());

        decision.expect("decision level without a decision literal")
    }

    /// Number of level markers currently on the trail.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.t
            .iter()
            .filter(|step| matches!(step, Step::LevelMarker))
            .count()
    }
}
