#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal encoding.
//!
//! A literal is a signed integer: its magnitude is the variable id and its
//! sign is the polarity (positive means the variable is asserted true,
//! negative means asserted false). `0` is never a valid literal. This is the
//! same mapping DIMACS uses, so the reader and the clause store share it
//! without conversion.

use core::ops::{Neg, Not};
use std::fmt;

/// A variable id in `[1, num_vars]`.
pub type Variable = u32;

/// A signed-integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Literal(i32);

impl Literal {
    /// Creates the literal of `var` with the given polarity.
    ///
    /// # Panics
    ///
    /// If `var` is zero or does not fit in an `i32`.
    #[must_use]
    pub fn new(var: Variable, polarity: bool) -> Self {
        assert_ne!(var, 0, "variable 0 is not a valid literal");
        let var = i32::try_from(var).expect("literal variable overflowed");

        if polarity { Self(var) } else { Self(-var) }
    }

    /// Builds a literal from its DIMACS integer, rejecting `0`.
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        if value == 0 || value == i32::MIN {
            None
        } else {
            Some(Self(value))
        }
    }

    #[must_use]
    pub const fn to_i32(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.0.unsigned_abs()
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.0.is_positive()
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity()
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self(-self.0)
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(Literal::new(1, false).negated(), Literal::new(1, true));
        assert_eq!(!Literal::new(1, true), Literal::new(1, false));
        assert_eq!(-Literal::new(7, true), Literal::new(7, false));
    }

    #[test]
    fn test_variable_and_polarity() {
        let lit = Literal::new(5, false);
        assert_eq!(lit.variable(), 5);
        assert!(!lit.polarity());
        assert!(lit.is_negated());
        assert_eq!(lit.to_i32(), -5);
    }

    #[test]
    fn test_from_i32_rejects_zero() {
        assert_eq!(Literal::from_i32(0), None);
        assert_eq!(Literal::from_i32(-3), Some(Literal::new(3, false)));
    }

    #[test]
    fn test_display_is_dimacs() {
        assert_eq!(Literal::new(12, false).to_string(), "-12");
    }
}
