//! Internal debug record (spec §6): everything the CLI's stdout contract
//! doesn't surface, exposed for anyone running with `RUST_LOG=info`.

use std::fmt;
use std::time::Duration;

use crate::solver::SolveOutcome;

pub struct SolveReport {
    pub file: String,
    pub satisfiable: bool,
    pub elapsed_secs: f64,
    /// The satisfying assignment rendered as space-separated signed
    /// variable ids, in variable-id iteration order. Empty for UNSAT.
    pub assignment: String,
    pub decisions: u64,
    pub ratio: f64,
}

impl SolveReport {
    pub fn build(
        file: &str,
        outcome: &SolveOutcome,
        elapsed: Duration,
        decisions: u64,
        ratio: f64,
    ) -> SolveReport {
        let (satisfiable, assignment) = match outcome {
            SolveOutcome::Sat(values) => {
                let rendered = values
                    .iter()
                    .map(|&(var, value)| {
                        if value {
                            var.to_string()
                        } else {
                            format!("-{var}")
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                (true, rendered)
            }
            SolveOutcome::Unsat => (false, String::new()),
        };

        SolveReport {
            file: file.to_string(),
            satisfiable,
            elapsed_secs: elapsed.as_secs_f64(),
            assignment,
            decisions,
            ratio,
        }
    }
}

impl fmt::Debug for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SolveReport")
            .field("file", &self.file)
            .field(
                "satisfiable",
                &if self.satisfiable { "SAT" } else { "UNSAT" },
            )
            .field("elapsed_secs", &self.elapsed_secs)
            .field("assignment", &self.assignment)
            .field("decisions", &self.decisions)
            .field("ratio", &self.ratio)
            .finish()
    }
}
