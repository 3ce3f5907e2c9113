use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use cdcl_sat::formula::Formula;
use cdcl_sat::heuristics::{Heuristic, HeuristicKind};
use cdcl_sat::report::SolveReport;
use cdcl_sat::solver::{SolveOutcome, Solver};

/// A CDCL based SAT solver with pluggable branching heuristics.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Branching heuristic to use for variable selection.
    #[arg(long, value_parser = HeuristicKind::parse)]
    heuristics: HeuristicKind,

    /// Path to a DIMACS CNF input file.
    #[arg(long)]
    filename: PathBuf,

    /// Seed for the heuristic's PRNG, for reproducible runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn run() -> anyhow::Result<i32> {
    env_logger::init();

    let cli = Cli::parse();

    let formula = Formula::load_from_path(&cli.filename)?;
    let ratio = formula.ratio();

    let heuristic = Heuristic::new(cli.heuristics, cli.seed);
    let mut solver = Solver::new(formula, heuristic);

    info!(
        "solving {} ({} variables, clause/variable ratio {:.3})",
        cli.filename.display(),
        solver.num_variables(),
        ratio
    );

    let start = Instant::now();
    let outcome = solver.solve();
    let elapsed = start.elapsed();

    let report = SolveReport::build(
        &cli.filename.display().to_string(),
        &outcome,
        elapsed,
        solver.decision_count(),
        ratio,
    );
    info!("{report:?}");

    match outcome {
        SolveOutcome::Sat(_) => println!("SAT {}", solver.decision_count()),
        SolveOutcome::Unsat => println!("UNSAT {}", solver.decision_count()),
    }

    Ok(0)
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}
