//! End-to-end scenarios: the library on small hand-written formulas, and the
//! binary's verdict output and exit codes.

use dpll_sat::sat::assignment::LitValue;
use dpll_sat::sat::dimacs::parse_str;
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::{Outcome, SearchState, Solver, SolverConfig};
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn solver_for(dimacs: &str) -> Dpll {
    Dpll::new(parse_str(dimacs).unwrap(), SolverConfig::default())
}

fn run_binary(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_dpll_sat"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn all_sign_combinations_of_two_variables_is_unsat() {
    let mut solver = solver_for("p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n");
    let outcome = solver.solve().unwrap();
    assert_eq!(outcome, Outcome::Unsat);
    assert_eq!(outcome.exit_code(), 10);
}

#[test]
fn single_positive_unit_is_sat() {
    let mut solver = solver_for("p cnf 1 1\n1 0\n");
    assert_eq!(solver.solve().unwrap(), Outcome::Sat(vec![1]));
    assert_eq!(solver.assignment()[1], LitValue::True);
}

#[test]
fn contradicting_units_are_unsat_before_search() {
    let mut solver = solver_for("p cnf 1 2\n1 0\n-1 0\n");
    assert_eq!(solver.state(), SearchState::Unsat);
    assert_eq!(solver.solve().unwrap(), Outcome::Unsat);
    assert_eq!(solver.stats().propagations, 0);
    assert_eq!(solver.stats().decisions, 0);
}

#[test]
fn one_wide_clause_is_sat_with_any_true_literal() {
    let mut solver = solver_for("p cnf 3 1\n1 2 3 0\n");
    let Outcome::Sat(model) = solver.solve().unwrap() else {
        panic!("expected SAT");
    };
    assert!(model.iter().any(|&l| l > 0));
    assert!(solver.cnf.check_model(solver.assignment()).is_ok());
}

#[test]
fn empty_formula_is_sat_immediately() {
    let mut solver = solver_for("p cnf 0 0\n");
    assert_eq!(solver.solve().unwrap(), Outcome::Sat(vec![]));
    assert_eq!(solver.stats().decisions, 0);
}

#[test]
fn first_decision_sees_halved_scores() {
    // Occurrence counts 2/2/3 are halved to 1/1/1 before the first decision,
    // so ties fall to x1 and x2 and x3 ends up forced by the third clause.
    let mut solver = solver_for("p cnf 3 3\n3 1 0\n3 2 0\n3 -1 -2 0\n");
    assert_eq!(solver.solve().unwrap(), Outcome::Sat(vec![1, 2, 3]));
    assert_eq!(solver.stats().decisions, 2);
    assert_eq!(solver.stats().conflicts, 0);
}

#[test]
fn binary_reports_unsat_with_exit_code_10() {
    let output = run_binary(&["--stats", "false"], "p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n");
    assert_eq!(output.status.code(), Some(10));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "UNSATISFIABLE");
}

#[test]
fn binary_reports_sat_with_exit_code_20_and_model() {
    let output = run_binary(&["-p"], "c unit\np cnf 1 1\n1 0\n");
    assert_eq!(output.status.code(), Some(20));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["SATISFIABLE", "v 1 0"]);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Decisions"));
}

#[test]
fn binary_text_subcommand() {
    let output = run_binary(&["text", "--input", "p cnf 1 2\n1 0\n-1 0\n"], "");
    assert_eq!(output.status.code(), Some(10));
}

#[test]
fn binary_rejects_malformed_input() {
    let output = run_binary(&[], "p cnf 2 1\n1 x 0\n");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid literal"));
}
