//! # dpll_sat
//!
//! Command-line front end for the DPLL solver. It reads a DIMACS CNF formula,
//! runs the search and reports the verdict.
//!
//! ## Usage
//!
//! ```sh
//! dpll_sat [OPTIONS] [PATH]            # solve a file, or stdin without PATH
//! dpll_sat file --path <PATH>          # solve a file
//! dpll_sat text --input "<dimacs>"     # solve inline DIMACS text
//! dpll_sat dir --path <DIR>            # solve every .cnf file below DIR
//! dpll_sat completions <SHELL>         # print shell completions
//! ```
//!
//! ## Output
//!
//! `SATISFIABLE` or `UNSATISFIABLE` goes to stdout, optionally followed by a
//! `v` line holding the model. Statistics go to stderr.
//!
//! ## Exit codes
//!
//! | code | meaning                                   |
//! |------|-------------------------------------------|
//! | 10   | UNSATISFIABLE                             |
//! | 20   | SATISFIABLE                               |
//! | 1    | the input could not be read or parsed     |
//! | 3    | the model found failed verification       |
//!
//! `dir` exits 0 when every file was solved.

use crate::command_line::cli::{Cli, Commands, Input, init_logging, print_completions, run_single, solve_dir};
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> ExitCode {
    let start = Instant::now();
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::File { path, common }) => {
            init_logging(common.debug);
            run_single(&Input::File(path), common, start)
        }
        Some(Commands::Text { input, common }) => {
            init_logging(common.debug);
            run_single(&Input::Text(input), common, start)
        }
        Some(Commands::Dir { path, common }) => {
            init_logging(common.debug);
            solve_dir(path, common)
        }
        Some(Commands::Completions { shell }) => {
            print_completions(*shell);
            ExitCode::SUCCESS
        }
        None => {
            init_logging(cli.common.debug);
            let input = cli.path.as_deref().map_or(Input::Stdin, Input::File);
            run_single(&input, &cli.common, start)
        }
    }
}
