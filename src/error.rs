//! Fatal, before-solving error kinds (spec §7).
//!
//! Once `Solver::solve` starts, there are no recoverable error conditions —
//! it either returns SAT or UNSAT. Internal invariant violations (a bug
//! reachable only on malformed solver state, never on well-formed input)
//! are not represented here; they abort via `panic!`/`debug_assert!` at the
//! point they're detected instead of unwinding through a `Result`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("malformed CNF input: {0}")]
    MalformedCnf(String),

    #[error("unknown heuristic: {0}")]
    UnknownHeuristic(String),

    #[error("failed to read input file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
