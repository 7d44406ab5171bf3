#![warn(missing_docs)]
//! A DPLL SAT solver: unit propagation over occurrence lists, an integer
//! activity heuristic, and chronological backtracking with polarity flipping.

/// The `sat` module implements the solver, its DIMACS reader and the model
/// validator.
pub mod sat;
