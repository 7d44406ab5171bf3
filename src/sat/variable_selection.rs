#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]

use crate::sat::assignment::Assignment;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Variable;
use std::ops::{Index, IndexMut};

/// Number of decisions between two halvings of every activity score.
pub const DEFAULT_DECAY_INTERVAL: usize = 3500;

/// Integer activity scores, indexed by variable. Slot 0 is unused.
///
/// Scores start at the variable's occurrence count, grow by one whenever the
/// variable triggers a conflict, and are halved every `decay_interval`
/// decisions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Vsids {
    scores: Vec<u64>,
    decay_interval: usize,
}

impl Index<Variable> for Vsids {
    type Output = u64;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.scores[index as usize]
    }
}

impl IndexMut<Variable> for Vsids {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.scores[index as usize]
    }
}

impl Vsids {
    #[must_use]
    pub fn new(cnf: &Cnf, decay_interval: usize) -> Self {
        let mut scores = vec![0; cnf.num_vars + 1];
        for (var, score) in scores.iter_mut().enumerate().skip(1) {
            *score = cnf.occurrence_count(var as Variable) as u64;
        }

        Self {
            scores,
            decay_interval: decay_interval.max(1),
        }
    }

    pub fn bump(&mut self, var: Variable) {
        self[var] += 1;
    }

    /// Halves every score, truncating.
    pub fn decay(&mut self) {
        for score in &mut self.scores {
            *score /= 2;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, u64)> + '_ {
        self.scores
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &s)| (i as Variable, s))
    }

    /// Picks the unassigned variable with the highest score, lowest id on
    /// ties. Scores are decayed first whenever `decisions` is a multiple of
    /// the decay interval, including before the first decision.
    pub fn pick(&mut self, assignment: &Assignment, decisions: usize) -> Option<Variable> {
        if decisions % self.decay_interval == 0 {
            self.decay();
        }

        let mut best: Option<(Variable, u64)> = None;
        for (var, score) in self.iter() {
            if !assignment[var].is_undefined() {
                continue;
            }
            match best {
                Some((_, max)) if score <= max => {}
                _ => best = Some((var, score)),
            }
        }
        best.map(|(var, _)| var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::Literal;

    fn cnf() -> Cnf {
        // occurrences: x1 = 1, x2 = 3, x3 = 3
        Cnf::from_dimacs(3, &[vec![1, 2, 3], vec![-2, 3], vec![2, -3]])
    }

    #[test]
    fn test_initial_scores_are_occurrence_counts() {
        let vsids = Vsids::new(&cnf(), DEFAULT_DECAY_INTERVAL);
        assert_eq!(vsids.iter().collect::<Vec<_>>(), vec![(1, 1), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_first_pick_decays_and_prefers_lowest_id_on_ties() {
        let mut vsids = Vsids::new(&cnf(), DEFAULT_DECAY_INTERVAL);
        let a = Assignment::new(3);

        assert_eq!(vsids.pick(&a, 0), Some(2));
        assert_eq!(vsids.iter().collect::<Vec<_>>(), vec![(1, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_no_decay_between_intervals() {
        let mut vsids = Vsids::new(&cnf(), DEFAULT_DECAY_INTERVAL);
        let a = Assignment::new(3);

        vsids.pick(&a, 1);
        assert_eq!(vsids[2], 3);
        vsids.pick(&a, 3500);
        assert_eq!(vsids[2], 1);
    }

    #[test]
    fn test_skips_assigned_and_returns_none_when_total() {
        let mut vsids = Vsids::new(&cnf(), DEFAULT_DECAY_INTERVAL);
        let mut a = Assignment::new(3);
        a.set(Literal::new(2, true));

        assert_eq!(vsids.pick(&a, 1), Some(3));

        a.set(Literal::new(1, false));
        a.set(Literal::new(3, true));
        assert_eq!(vsids.pick(&a, 2), None);
    }

    #[test]
    fn test_strictly_greater_replaces_candidate() {
        let mut vsids = Vsids::new(&cnf(), DEFAULT_DECAY_INTERVAL);
        vsids.bump(3);
        assert_eq!(vsids.pick(&Assignment::new(3), 1), Some(3));
    }

    #[test]
    fn test_decay_truncates_to_zero() {
        let mut vsids = Vsids::new(&cnf(), 1);
        for _ in 0..4 {
            vsids.decay();
        }
        assert!(vsids.iter().all(|(_, s)| s == 0));
    }
}
