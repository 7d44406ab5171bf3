use crate::sat::literal::{Literal, Variable};
use core::ops::Index;

/// Three-valued truth value of a variable or literal.
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default, Hash, PartialOrd, Ord)]
pub enum LitValue {
    #[default]
    Undefined,
    True,
    False,
}

impl LitValue {
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    #[must_use]
    pub const fn is_undefined(self) -> bool {
        matches!(self, Self::Undefined)
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::True)
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::False)
    }

    /// Logical negation; `Undefined` stays `Undefined`.
    #[must_use]
    pub const fn negate(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Undefined => Self::Undefined,
        }
    }
}

/// Current value of every variable, indexed by variable id. Slot 0 is unused.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment(Vec<LitValue>);

impl Index<Variable> for Assignment {
    type Output = LitValue;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

/// A model as DIMACS literals, one per variable in ascending order.
pub type Solutions = Vec<i32>;

impl Assignment {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![LitValue::Undefined; num_vars + 1])
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len() - 1
    }

    #[must_use]
    pub fn value_of(&self, lit: Literal) -> LitValue {
        let value = self[lit.variable()];
        if lit.polarity() { value } else { value.negate() }
    }

    /// Makes `lit` true by assigning its variable.
    pub fn set(&mut self, lit: Literal) {
        self.0[lit.variable() as usize] = LitValue::from_bool(lit.polarity());
    }

    pub fn unassign(&mut self, var: Variable) {
        self.0[var as usize] = LitValue::Undefined;
    }

    /// Variables in ascending id order, paired with their values.
    pub fn iter(&self) -> impl Iterator<Item = (Variable, LitValue)> + '_ {
        self.0
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &v)| (i as Variable, v))
    }

    /// Number of variables that currently hold a value.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.iter().filter(|(_, v)| !v.is_undefined()).count()
    }

    #[must_use]
    pub fn get_solutions(&self) -> Solutions {
        self.iter()
            .filter(|(_, v)| !v.is_undefined())
            .map(|(var, v)| Literal::new(var, v.is_true()).to_i32())
            .collect()
    }
}
