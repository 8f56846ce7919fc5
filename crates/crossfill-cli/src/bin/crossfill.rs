//! Fills a crossword structure with words from a word list.
//!
//! # Usage
//!
//! ```sh
//! cargo run -- data/structure0.txt data/words0.txt
//! ```
//!
//! Write the filled grid to a file as well, and report solver statistics:
//!
//! ```sh
//! cargo run -- data/structure1.txt data/words1.txt output.txt --stats
//! ```
//!
//! Bound the search time and keep arc consistency during search:
//!
//! ```sh
//! cargo run -- data/structure1.txt data/words1.txt --time-limit 2.5 --maintain-arc-consistency
//! ```
//!
//! Set `RUST_LOG=debug` to see domain sizes and search counters.

use std::{
    fs, io,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::Parser;
use crossfill_core::{Crossword, Structure, StructureError, Vocabulary};
use crossfill_solver::{CrosswordSolver, SearchConfig, SolveOutcome, Solution, SolverError};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Structure file: one line per row, `_` marks an open cell.
    #[arg(value_name = "STRUCTURE")]
    structure: PathBuf,

    /// Word list: one word per line.
    #[arg(value_name = "WORDS")]
    words: PathBuf,

    /// Also write the filled grid to this file.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Give up after this many seconds of search.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    time_limit: Option<Duration>,

    /// Run arc consistency after every assignment.
    #[arg(long)]
    maintain_arc_consistency: bool,

    /// Print solver statistics.
    #[arg(long)]
    stats: bool,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("failed to {action} {}: {source}", path.display())]
struct FileError {
    action: &'static str,
    path: PathBuf,
    source: io::Error,
}

#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
enum CliError {
    #[display("{_0}")]
    File(FileError),
    #[display("invalid structure: {_0}")]
    Structure(StructureError),
    #[display("{_0}")]
    Solver(SolverError),
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs = s.parse::<f64>().map_err(|e| e.to_string())?;
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

fn read(path: &Path) -> Result<String, CliError> {
    let text = fs::read_to_string(path).map_err(|source| FileError {
        action: "read",
        path: path.to_owned(),
        source,
    })?;
    Ok(text)
}

fn load(args: &Args) -> Result<Crossword, CliError> {
    let structure = read(&args.structure)?.parse::<Structure>()?;
    let vocabulary = Vocabulary::parse(&read(&args.words)?);
    let crossword = Crossword::new(structure, vocabulary);
    log::info!(
        "{} slots, {} words",
        crossword.variables().len(),
        crossword.vocabulary().len()
    );
    Ok(crossword)
}

fn solver(args: &Args) -> CrosswordSolver {
    CrosswordSolver::default().with_search_config(
        SearchConfig::new()
            .with_time_limit(args.time_limit)
            .with_maintain_arc_consistency(args.maintain_arc_consistency),
    )
}

fn format_stats(solver: &CrosswordSolver, solution: &Solution<'_>) -> String {
    let stats = solution.stats();
    let mut out = solver
        .engine()
        .propagators()
        .iter()
        .zip(stats.consistency().removals())
        .map(|(propagator, removed)| {
            format!("{}: {removed} candidates removed\n", propagator.name())
        })
        .collect::<String>();
    match stats.search() {
        Some(search) => out.push_str(&format!(
            "search: {} nodes, {} values tried, {} backtracks, max depth {}\n",
            search.nodes(),
            search.values_tried(),
            search.backtracks(),
            search.max_depth()
        )),
        None => out.push_str("search: skipped\n"),
    }
    out
}

fn run(args: &Args) -> Result<(), CliError> {
    let crossword = load(args)?;
    let solver = solver(args);
    let solution = solver.solve(&crossword)?;

    match solution.outcome() {
        SolveOutcome::Solved(assignment) => {
            let grid = assignment.to_string();
            print!("{grid}");
            if let Some(path) = &args.output {
                fs::write(path, &grid).map_err(|source| FileError {
                    action: "write",
                    path: path.clone(),
                    source,
                })?;
            }
        }
        SolveOutcome::NoSolution(reason) => {
            log::info!("{reason}");
            println!("No solution.");
        }
    }
    if args.stats {
        print!("{}", format_stats(&solver, &solution));
    }
    Ok(())
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
