#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dimacs::{parse_dimacs, parse_file, parse_str};
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::error::{ParseError, SolverError};
use dpll_sat::sat::solver::{Outcome, SolutionStats, Solver, SolverConfig};
use dpll_sat::sat::variable_selection::DEFAULT_DECAY_INTERVAL;
use itertools::Itertools;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use thiserror::Error;
use tikv_jemalloc_ctl::{epoch, stats};

/// Exit code for input that could not be read or parsed.
pub(crate) const EXIT_INPUT_ERROR: u8 = 1;
/// Exit code when a reported model fails verification.
pub(crate) const EXIT_INVALID_MODEL: u8 = 3;

/// Defines the command-line interface for the solver.
#[derive(Parser, Debug)]
#[command(name = "dpll_sat", version, about = "A DPLL SAT solver")]
pub(crate) struct Cli {
    /// Path to a DIMACS .cnf file. Without a path or subcommand the formula
    /// is read from stdin.
    pub path: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a CNF file in DIMACS format.
    File {
        /// Path to the DIMACS .cnf file.
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a CNF formula provided as DIMACS text.
    Text {
        /// DIMACS input as a string (e.g. "p cnf 2 2\n1 -2 0\n2 0").
        #[arg(short, long)]
        input: String,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every .cnf file below a directory, one verdict line per file.
    Dir {
        #[arg(long)]
        path: PathBuf,

        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Options shared by every solving command.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging. `RUST_LOG` overrides this.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the model against every clause before reporting SATISFIABLE.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print search statistics to stderr.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the model as a `v` line when the formula is satisfiable.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// Decisions between two halvings of the activity scores.
    #[arg(long, default_value_t = DEFAULT_DECAY_INTERVAL)]
    pub(crate) decay_interval: usize,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            decay_interval: DEFAULT_DECAY_INTERVAL,
        }
    }
}

impl CommonOptions {
    pub(crate) const fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            decay_interval: self.decay_interval,
            verify: self.verify,
        }
    }
}

/// Anything that stops a run short of a verdict.
#[derive(Debug, Error)]
pub(crate) enum RunError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Solver(#[from] SolverError),
}

impl RunError {
    pub(crate) const fn code(&self) -> u8 {
        match self {
            Self::Parse(_) => EXIT_INPUT_ERROR,
            Self::Solver(_) => EXIT_INVALID_MODEL,
        }
    }

    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Where the formula comes from.
pub(crate) enum Input<'a> {
    File(&'a Path),
    Text(&'a str),
    Stdin,
}

impl Input<'_> {
    fn load(&self) -> Result<Cnf, ParseError> {
        match self {
            Input::File(path) => parse_file(path),
            Input::Text(text) => parse_str(text),
            Input::Stdin => parse_dimacs(io::stdin().lock()),
        }
    }

    fn label(&self) -> Option<&Path> {
        match self {
            Input::File(path) => Some(*path),
            Input::Text(_) | Input::Stdin => None,
        }
    }
}

pub(crate) fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Parses, solves and reports a single formula. The returned exit code is
/// 20 for SATISFIABLE and 10 for UNSATISFIABLE.
pub(crate) fn run_single(input: &Input<'_>, common: &CommonOptions, start: Instant) -> ExitCode {
    match solve_input(input, common, start) {
        Ok(outcome) => ExitCode::from(outcome_code(&outcome)),
        Err(e) => {
            eprintln!("{e}");
            e.exit_code()
        }
    }
}

fn outcome_code(outcome: &Outcome) -> u8 {
    u8::try_from(outcome.exit_code()).unwrap_or(EXIT_INVALID_MODEL)
}

fn solve_input(
    input: &Input<'_>,
    common: &CommonOptions,
    start: Instant,
) -> Result<Outcome, RunError> {
    let time = Instant::now();
    let cnf = input.load()?;
    let parse_time = time.elapsed();

    if let Some(label) = input.label() {
        log::info!("solving {}", label.display());
    }

    let (outcome, stats) = solve(&cnf, common)?;

    println!("{}", verdict(&outcome));
    if common.print_solution {
        if let Outcome::Sat(model) = &outcome {
            println!("v {} 0", model.iter().join(" "));
        }
    }
    if common.stats {
        print_stats(parse_time, start.elapsed(), &cnf, &stats);
    }

    Ok(outcome)
}

/// Runs the search over `cnf` with the options' solver configuration.
///
/// # Errors
///
/// If verification is enabled and the model violates a clause.
pub(crate) fn solve(
    cnf: &Cnf,
    common: &CommonOptions,
) -> Result<(Outcome, SolutionStats), SolverError> {
    let mut solver = Dpll::new(cnf.clone(), common.solver_config());
    let outcome = solver.solve()?;
    Ok((outcome, solver.stats()))
}

const fn verdict(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Sat(_) => "SATISFIABLE",
        Outcome::Unsat => "UNSATISFIABLE",
    }
}

/// Solves every `.cnf` file below `path`, printing `<file>: <verdict>` per
/// file. Unreadable files are reported and skipped.
pub(crate) fn solve_dir(path: &Path, common: &CommonOptions) -> ExitCode {
    if !path.is_dir() {
        eprintln!("Provided path is not a directory: {}", path.display());
        return ExitCode::from(EXIT_INPUT_ERROR);
    }

    let mut code = ExitCode::SUCCESS;

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() || file_path.extension().is_none_or(|ext| ext != "cnf") {
            continue;
        }

        let result = parse_file(file_path)
            .map_err(RunError::from)
            .and_then(|cnf| solve(&cnf, common).map_err(RunError::from));

        match result {
            Ok((outcome, stats)) => {
                println!("{}: {}", file_path.display(), verdict(&outcome));
                log::debug!(
                    "{}: {} decisions, {} propagations, {} conflicts",
                    file_path.display(),
                    stats.decisions,
                    stats.propagations,
                    stats.conflicts
                );
            }
            Err(e) => {
                eprintln!("{}: {e}", file_path.display());
                code = e.exit_code();
            }
        }
    }

    code
}

pub(crate) fn print_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
}

/// Allocated and resident memory in MiB, if jemalloc can report them.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    eprintln!("|  {label:<28} {value:>18}  |");
}

pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    eprintln!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints the statistics table to stderr.
pub(crate) fn print_stats(parse_time: Duration, total: Duration, cnf: &Cnf, s: &SolutionStats) {
    let total_secs = total.as_secs_f64();
    let propagate_ms = s.propagate_time.as_secs_f64() * 1000.0;
    let propagate_share = if total_secs > 0.0 {
        s.propagate_time.as_secs_f64() / total_secs * 100.0
    } else {
        0.0
    };

    eprintln!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Variables", cnf.num_vars);
    stat_line("Clauses", cnf.num_clauses());
    stat_line("Literals", cnf.num_literals());

    eprintln!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Decisions", s.decisions, total_secs);
    stat_line_with_rate("Propagations", s.propagations, total_secs);
    stat_line_with_rate("Conflicts", s.conflicts, total_secs);
    stat_line("Propagations/s", format!("{:.2}", s.propagation_rate()));
    stat_line(
        "Propagate time (ms)",
        format!("{propagate_ms:.2} ({propagate_share:.2}%)"),
    );
    stat_line("Total time (ms)", format!("{:.2}", total_secs * 1000.0));
    if let Some((allocated, resident)) = memory_usage() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    eprintln!("=====================================================================");
}
