//! The formula store (spec §4.A): original clauses, learned clauses, and
//! the variable/clause ratio captured at parse time.

use std::collections::HashMap;
use std::path::Path;

use crate::assignment::Assignment;
use crate::clause::Clause;
use crate::error::SolverError;

/// Addresses a clause in either the original or the learned collection.
/// Implication nodes keep one of these as their antecedent rather than
/// owning a copy of the clause.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClauseId {
    Original(usize),
    Learned(usize),
}

pub struct Formula {
    num_vars: usize,
    original: Vec<Clause>,
    learned: Vec<Clause>,
    learned_index: HashMap<Clause, usize>,
    ratio: f64,
}

impl Formula {
    pub fn new(num_vars: usize, original: Vec<Clause>) -> Formula {
        let ratio = if num_vars == 0 {
            0.0
        } else {
            original.len() as f64 / num_vars as f64
        };

        Formula {
            num_vars,
            original,
            learned: Vec::new(),
            learned_index: HashMap::new(),
            ratio,
        }
    }

    /// Converts a parsed DIMACS instance. The DIMACS parser itself is an
    /// external collaborator (spec §6); this only adapts its output into
    /// our internal clause representation.
    pub fn try_from_dimacs(instance: dimacs::Instance) -> Result<Formula, String> {
        match instance {
            dimacs::Instance::Cnf { num_vars, clauses } => {
                let converted = clauses
                    .iter()
                    .map(|clause| {
                        let lits = clause.lits().iter().map(|&lit| dimacs_lit_to_i32(lit)).collect();
                        Clause::new(lits)
                    })
                    .collect();
                Ok(Formula::new(num_vars as usize, converted))
            }
            dimacs::Instance::Sat { .. } => {
                Err("expected a CNF instance, got a SAT-format instance".to_string())
            }
        }
    }

    /// Reads and parses a DIMACS CNF file from disk (spec §6, the external
    /// parser's contract). Surfaces the fatal-before-solving error kinds of
    /// spec §7: the path missing, the file unreadable, or the contents
    /// malformed.
    pub fn load_from_path(path: &Path) -> Result<Formula, SolverError> {
        if !path.is_file() {
            return Err(SolverError::InputNotFound(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| SolverError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let instance = dimacs::parse_dimacs(&contents)
            .map_err(|err| SolverError::MalformedCnf(format!("{err:?}")))?;

        Formula::try_from_dimacs(instance).map_err(SolverError::MalformedCnf)
    }

    pub fn num_variables(&self) -> usize {
        self.num_vars
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn original_clauses(&self) -> &[Clause] {
        &self.original
    }

    pub fn num_learned(&self) -> usize {
        self.learned.len()
    }

    pub fn get(&self, id: ClauseId) -> &Clause {
        match id {
            ClauseId::Original(i) => &self.original[i],
            ClauseId::Learned(i) => &self.learned[i],
        }
    }

    /// Iterates all active clauses: the union of original and learned.
    pub fn active_clauses(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.original
            .iter()
            .enumerate()
            .map(|(i, c)| (ClauseId::Original(i), c))
            .chain(
                self.learned
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (ClauseId::Learned(i), c)),
            )
    }

    /// Inserts a learned clause. Idempotent: a clause already present (by
    /// set equality) is a no-op and returns the existing clause's id.
    pub fn insert_learned(&mut self, clause: Clause) -> ClauseId {
        if let Some(&idx) = self.learned_index.get(&clause) {
            return ClauseId::Learned(idx);
        }

        let idx = self.learned.len();
        self.learned_index.insert(clause.clone(), idx);
        self.learned.push(clause);
        ClauseId::Learned(idx)
    }
}

fn dimacs_lit_to_i32(lit: dimacs::Lit) -> i32 {
    let magnitude = lit.var().to_u64() as i32;
    if lit.sign() == dimacs::Sign::Pos {
        magnitude
    } else {
        -magnitude
    }
}

/// Evaluates a literal under the current assignment: `None` if unassigned,
/// otherwise the XOR of the variable's value with the literal's sign.
pub fn eval_lit(lit: crate::clause::Lit, assignment: &Assignment) -> Option<bool> {
    assignment.eval_lit(lit)
}

/// Evaluates a clause: TRUE if any literal is TRUE, FALSE if every literal
/// is FALSE (including the empty clause), else UNASSIGNED.
pub fn eval_clause(clause: &Clause, assignment: &Assignment) -> Option<bool> {
    let mut any_unassigned = false;

    for &lit in clause.lits() {
        match assignment.eval_lit(lit) {
            Some(true) => return Some(true),
            Some(false) => {}
            None => any_unassigned = true,
        }
    }

    if any_unassigned {
        None
    } else {
        Some(false)
    }
}
