#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause store.
//!
//! `Cnf` owns the clause list and, for every variable, the indices of the
//! clauses in which it occurs positively and negatively. It is built once
//! from parsed input and never mutated afterwards.

use crate::sat::assignment::Assignment;
use crate::sat::clause::Clause;
use crate::sat::error::{Result, SolverError};
use crate::sat::literal::{Literal, Variable};
use core::ops::Index;
use std::fmt;

/// Current decision level.
pub type DecisionLevel = usize;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
    pub num_vars: usize,
    /// Clause indices per variable where it occurs positively.
    pos_occurrences: Vec<Vec<usize>>,
    /// Clause indices per variable where it occurs negatively.
    neg_occurrences: Vec<Vec<usize>>,
}

impl Index<usize> for Cnf {
    type Output = Clause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.clauses[index]
    }
}

impl Cnf {
    /// Builds the store and its occurrence lists.
    ///
    /// # Panics
    ///
    /// If a literal names a variable above `num_vars`. The reader rejects such
    /// input before it gets here.
    #[must_use]
    pub fn new(num_vars: usize, clauses: Vec<Clause>) -> Self {
        let mut pos_occurrences = vec![Vec::new(); num_vars + 1];
        let mut neg_occurrences = vec![Vec::new(); num_vars + 1];

        for (i, clause) in clauses.iter().enumerate() {
            for lit in clause.iter() {
                let var = lit.variable() as usize;
                if lit.polarity() {
                    pos_occurrences[var].push(i);
                } else {
                    neg_occurrences[var].push(i);
                }
            }
        }

        Self {
            clauses,
            num_vars,
            pos_occurrences,
            neg_occurrences,
        }
    }

    /// Convenience constructor from DIMACS integers.
    ///
    /// # Panics
    ///
    /// If any literal is `0`.
    #[must_use]
    pub fn from_dimacs(num_vars: usize, clauses: &[Vec<i32>]) -> Self {
        let clauses = clauses
            .iter()
            .map(|c| {
                Clause::new(
                    c.iter()
                        .map(|&l| Literal::from_i32(l).expect("0 is not a clause literal")),
                )
            })
            .collect();
        Self::new(num_vars, clauses)
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Total number of literal occurrences over all clauses.
    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Clauses in which `lit`'s variable occurs with the opposite sign. These
    /// lose a potential satisfying literal once `lit` becomes true.
    #[must_use]
    pub fn opposite_occurrences(&self, lit: Literal) -> &[usize] {
        let var = lit.variable() as usize;
        if lit.polarity() {
            &self.neg_occurrences[var]
        } else {
            &self.pos_occurrences[var]
        }
    }

    /// Occurrences of `var` in either polarity.
    #[must_use]
    pub fn occurrence_count(&self, var: Variable) -> usize {
        let var = var as usize;
        self.pos_occurrences[var].len() + self.neg_occurrences[var].len()
    }

    /// Checks that every clause has a true literal under `assignment`.
    ///
    /// # Errors
    ///
    /// `SolverError::UnsatisfiedClause` for the first clause with no true
    /// literal.
    pub fn check_model(&self, assignment: &Assignment) -> Result<()> {
        match self
            .clauses
            .iter()
            .position(|c| !c.iter().any(|&l| assignment.value_of(l).is_true()))
        {
            Some(index) => Err(SolverError::UnsatisfiedClause {
                index,
                literals: self.clauses[index].literals().to_vec(),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Cnf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "p cnf {} {}", self.num_vars, self.clauses.len())?;
        for clause in &self.clauses {
            writeln!(f, "{clause}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_lists() {
        let cnf = Cnf::from_dimacs(3, &[vec![1, -2], vec![-1, 3], vec![2, 3, -1]]);

        assert_eq!(cnf.num_clauses(), 3);
        assert_eq!(cnf.num_literals(), 7);
        assert_eq!(cnf.opposite_occurrences(Literal::new(1, true)), &[1, 2]);
        assert_eq!(cnf.opposite_occurrences(Literal::new(1, false)), &[0]);
        assert_eq!(cnf.opposite_occurrences(Literal::new(3, true)), &[] as &[usize]);
        assert_eq!(cnf.occurrence_count(1), 3);
        assert_eq!(cnf.occurrence_count(3), 2);
    }

    #[test]
    fn test_check_model_accepts() {
        let cnf = Cnf::from_dimacs(2, &[vec![1, 2], vec![-1]]);
        let mut a = Assignment::new(2);
        a.set(Literal::new(1, false));
        a.set(Literal::new(2, true));
        assert!(cnf.check_model(&a).is_ok());
    }

    #[test]
    fn test_check_model_rejects_undefined() {
        let cnf = Cnf::from_dimacs(2, &[vec![1, 2], vec![-2]]);
        let mut a = Assignment::new(2);
        a.set(Literal::new(2, false));

        let err = cnf.check_model(&a).unwrap_err();
        let SolverError::UnsatisfiedClause { index, literals } = err;
        assert_eq!(index, 0);
        assert_eq!(literals, vec![Literal::new(1, true), Literal::new(2, true)]);
    }

    #[test]
    fn test_display_dimacs() {
        let cnf = Cnf::from_dimacs(2, &[vec![1, -2], vec![2]]);
        assert_eq!(cnf.to_string(), "p cnf 2 2\n1 -2 0\n2 0\n");
    }
}
