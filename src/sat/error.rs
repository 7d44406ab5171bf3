//! Error types for the reader and the solver.

use crate::sat::literal::Literal;
use itertools::Itertools;
use thiserror::Error;

/// Errors produced while reading a DIMACS CNF problem.
#[derive(Debug, Error)]
pub enum ParseError {
    /// I/O failure while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input ended before a `p cnf` header was found.
    #[error("missing `p cnf <vars> <clauses>` header")]
    MissingHeader,

    /// The header line could not be parsed.
    #[error("malformed header on line {line}: {text:?}")]
    InvalidHeader { line: usize, text: String },

    /// A token in the clause body is not an integer.
    #[error("invalid literal {token:?} on line {line}")]
    InvalidLiteral { line: usize, token: String },

    /// A literal names a variable outside `[1, num_vars]`.
    #[error("literal {literal} on line {line} is outside the declared {num_vars} variables")]
    VariableOutOfRange {
        line: usize,
        literal: i64,
        num_vars: u32,
    },

    /// A clause with no literals, i.e. a bare `0`.
    #[error("clause {index} on line {line} is empty")]
    EmptyClause { line: usize, index: usize },

    /// The input ended before all declared clauses were read.
    #[error("unexpected end of input: expected {expected} clauses, found {found}")]
    UnexpectedEof { expected: usize, found: usize },
}

/// Errors raised by the search itself.
#[derive(Debug, Error)]
pub enum SolverError {
    /// A model reported as satisfying leaves a clause false. This is a defect
    /// in propagation or trail bookkeeping, never a property of the input.
    #[error("Error in model, clause {index} is not satisfied: {}", .literals.iter().join(" "))]
    UnsatisfiedClause {
        index: usize,
        literals: Vec<Literal>,
    },
}

/// Result alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
