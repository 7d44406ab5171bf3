#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF format.
//!
//! The accepted format:
//! - comment lines starting with `c`, before the header or between clauses;
//! - a problem line `p cnf <num_variables> <num_clauses>`;
//! - the clause body: whitespace separated signed integers, each clause
//!   terminated by `0`. Clauses may span lines or share a line;
//! - an optional `%` line ending the body (SATLIB files carry one).
//!
//! Exactly `num_clauses` clauses are read. Anything after the last declared
//! clause is ignored with a warning.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::error::ParseError;
use crate::sat::literal::Literal;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

struct Header {
    num_vars: u32,
    num_clauses: usize,
}

fn parse_header(line_no: usize, line: &str) -> Result<Header, ParseError> {
    let invalid = || ParseError::InvalidHeader {
        line: line_no,
        text: line.to_string(),
    };

    let mut parts = line.split_whitespace();
    if parts.next() != Some("p") || parts.next() != Some("cnf") {
        return Err(invalid());
    }

    let num_vars = parts
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|&n| i32::try_from(n).is_ok())
        .ok_or_else(invalid)?;
    let num_clauses = parts
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(invalid)?;

    if parts.next().is_some() {
        return Err(invalid());
    }

    Ok(Header {
        num_vars,
        num_clauses,
    })
}

fn is_comment(line: &str) -> bool {
    line.starts_with('c')
}

/// Parses DIMACS data from any buffered reader.
///
/// # Errors
///
/// A [`ParseError`] for I/O failures, a missing or malformed header,
/// non-integer tokens, out-of-range literals, empty clauses, or input that
/// ends before every declared clause is complete.
pub fn parse_dimacs<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut lines = reader.lines().enumerate().map(|(i, l)| (i + 1, l));

    let header = loop {
        let Some((line_no, line)) = lines.next() else {
            return Err(ParseError::MissingHeader);
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }
        if !trimmed.starts_with('p') {
            return Err(ParseError::MissingHeader);
        }
        break parse_header(line_no, trimmed)?;
    };

    let num_vars = i64::from(header.num_vars);
    let mut clauses = Vec::with_capacity(header.num_clauses);
    let mut current: Vec<Literal> = Vec::new();

    'lines: for (line_no, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if is_comment(trimmed) {
            continue;
        }
        if trimmed.starts_with('%') {
            break;
        }

        for token in trimmed.split_whitespace() {
            if clauses.len() == header.num_clauses {
                log::warn!(
                    "ignoring input after the {} declared clauses (line {line_no})",
                    header.num_clauses
                );
                break 'lines;
            }

            let value = token
                .parse::<i64>()
                .map_err(|_| ParseError::InvalidLiteral {
                    line: line_no,
                    token: token.to_string(),
                })?;

            if value == 0 {
                if current.is_empty() {
                    return Err(ParseError::EmptyClause {
                        line: line_no,
                        index: clauses.len(),
                    });
                }
                clauses.push(Clause::new(current.drain(..)));
                continue;
            }

            let literal = i32::try_from(value)
                .ok()
                .filter(|_| value.abs() <= num_vars)
                .and_then(Literal::from_i32)
                .ok_or(ParseError::VariableOutOfRange {
                    line: line_no,
                    literal: value,
                    num_vars: header.num_vars,
                })?;
            current.push(literal);
        }
    }

    if clauses.len() < header.num_clauses {
        return Err(ParseError::UnexpectedEof {
            expected: header.num_clauses,
            found: clauses.len(),
        });
    }

    log::info!(
        "parsed {} variables and {} clauses",
        header.num_vars,
        clauses.len()
    );
    Ok(Cnf::new(header.num_vars as usize, clauses))
}

/// Parses a DIMACS file.
///
/// # Errors
///
/// If the file cannot be opened or its contents fail [`parse_dimacs`].
pub fn parse_file(file_path: &Path) -> Result<Cnf, ParseError> {
    let file = File::open(file_path)?;
    parse_dimacs(io::BufReader::new(file))
}

/// Parses DIMACS text held in memory.
///
/// # Errors
///
/// As [`parse_dimacs`].
pub fn parse_str(input: &str) -> Result<Cnf, ParseError> {
    parse_dimacs(io::Cursor::new(input))
}
