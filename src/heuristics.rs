//! Branching heuristics (spec §4.H): four variants behind one capability
//! set, `{preprocess(), select()}`, selected by a tagged variant rather
//! than a trait object (spec §9, "Heuristic polymorphism").

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::assignment::Assignment;
use crate::clause::{var_index, var_of, Var};
use crate::error::SolverError;
use crate::formula::{eval_clause, Formula};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    Random,
    TwoClause,
    Dlis,
    JeroslowWang,
}

impl HeuristicKind {
    /// Parses one of the four long-form names the CLI accepts (spec §6).
    pub fn parse(name: &str) -> Result<HeuristicKind, SolverError> {
        match name {
            "RandomHeuristicsSolver" => Ok(HeuristicKind::Random),
            "TwoClauseHeuristicSolver" => Ok(HeuristicKind::TwoClause),
            "DynamicLargestIndividualSumSolver" => Ok(HeuristicKind::Dlis),
            "JeroslowWangOneSidedSolver" => Ok(HeuristicKind::JeroslowWang),
            other => Err(SolverError::UnknownHeuristic(other.to_string())),
        }
    }
}

/// A branching heuristic. Random draws (variable choice, polarity,
/// tie-breaking) all go through the one seeded `rng` a variant carries, so
/// two runs with the same seed make the same decisions (spec §4.H
/// "Determinism", §9 "PRNG").
pub enum Heuristic {
    Random {
        rng: StdRng,
    },
    TwoClause {
        rng: StdRng,
        /// Count of initial-length-2 clauses each variable appears in.
        score: Vec<u32>,
    },
    Dlis,
    JeroslowWang {
        rng: StdRng,
        score: Vec<f64>,
    },
}

impl Heuristic {
    pub fn new(kind: HeuristicKind, seed: u64) -> Heuristic {
        match kind {
            HeuristicKind::Random => Heuristic::Random {
                rng: StdRng::seed_from_u64(seed),
            },
            HeuristicKind::TwoClause => Heuristic::TwoClause {
                rng: StdRng::seed_from_u64(seed),
                score: Vec::new(),
            },
            HeuristicKind::Dlis => Heuristic::Dlis,
            HeuristicKind::JeroslowWang => Heuristic::JeroslowWang {
                rng: StdRng::seed_from_u64(seed),
                score: Vec::new(),
            },
        }
    }

    pub fn preprocess(&mut self, formula: &Formula) {
        match self {
            Heuristic::TwoClause { score, .. } => {
                *score = vec![0u32; formula.num_variables()];
                for clause in formula.original_clauses() {
                    if clause.len() == 2 {
                        for &lit in clause.lits() {
                            score[var_index(var_of(lit))] += 1;
                        }
                    }
                }
            }
            Heuristic::JeroslowWang { score, .. } => {
                *score = vec![0.0f64; formula.num_variables()];
                for clause in formula.original_clauses() {
                    let weight = 2f64.powi(-(clause.len() as i32));
                    for &lit in clause.lits() {
                        score[var_index(var_of(lit))] += weight;
                    }
                }
            }
            Heuristic::Random { .. } | Heuristic::Dlis => {}
        }
    }

    /// Picks the next decision: `(value, variable)` where `variable` is
    /// currently unassigned.
    pub fn select(&mut self, formula: &Formula, assignment: &Assignment) -> (bool, Var) {
        match self {
            Heuristic::Random { rng } => select_random(assignment, rng),
            Heuristic::TwoClause { rng, score } => select_two_clause(assignment, score, rng),
            Heuristic::Dlis => select_dlis(formula, assignment),
            Heuristic::JeroslowWang { rng, score } => select_jeroslow_wang(assignment, score, rng),
        }
    }
}

fn unassigned_vars(assignment: &Assignment) -> impl Iterator<Item = Var> + '_ {
    (1..=assignment.len() as u64)
        .map(|v| v as Var)
        .filter(move |&v| assignment.get(v).is_none())
}

fn select_random(assignment: &Assignment, rng: &mut StdRng) -> (bool, Var) {
    let var = unassigned_vars(assignment)
        .choose(rng)
        .expect("select called with a total assignment");
    (rng.gen_bool(0.5), var)
}

fn select_two_clause(assignment: &Assignment, score: &[u32], rng: &mut StdRng) -> (bool, Var) {
    let max_score = unassigned_vars(assignment)
        .map(|v| score[var_index(v)])
        .max()
        .unwrap_or(0);

    if max_score == 0 {
        return select_random(assignment, rng);
    }

    let var = unassigned_vars(assignment)
        .filter(|&v| score[var_index(v)] == max_score)
        .choose(rng)
        .expect("max score computed over a nonempty set of unassigned variables");

    (rng.gen_bool(0.5), var)
}

fn select_dlis(formula: &Formula, assignment: &Assignment) -> (bool, Var) {
    let mut pos = vec![0u32; formula.num_variables()];
    let mut neg = vec![0u32; formula.num_variables()];

    // Scored over original clauses only, matching the reference's
    // `all_unresolved_clauses` (which reads `self.clauses`, never
    // `self.learned_clauses`).
    for clause in formula.original_clauses() {
        if eval_clause(clause, assignment).is_some() {
            continue;
        }

        for &lit in clause.lits() {
            let var = var_of(lit);
            if assignment.get(var).is_some() {
                continue;
            }
            if lit > 0 {
                pos[var_index(var)] += 1;
            } else {
                neg[var_index(var)] += 1;
            }
        }
    }

    let best_pos = unassigned_vars(assignment)
        .map(|v| (v, pos[var_index(v)]))
        .max_by_key(|&(_, count)| count)
        .expect("select called with a total assignment");
    let best_neg = unassigned_vars(assignment)
        .map(|v| (v, neg[var_index(v)]))
        .max_by_key(|&(_, count)| count)
        .expect("select called with a total assignment");

    if best_pos.1 > best_neg.1 {
        (true, best_pos.0)
    } else {
        (false, best_neg.0)
    }
}

fn select_jeroslow_wang(assignment: &Assignment, score: &[f64], rng: &mut StdRng) -> (bool, Var) {
    let var = unassigned_vars(assignment)
        .max_by(|&a, &b| {
            score[var_index(a)]
                .partial_cmp(&score[var_index(b)])
                .expect("Jeroslow-Wang scores are finite")
        })
        .expect("select called with a total assignment");

    (rng.gen_bool(0.5), var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Clause;

    fn formula_of(clauses: Vec<Vec<i32>>, num_vars: usize) -> Formula {
        Formula::new(num_vars, clauses.into_iter().map(Clause::new).collect())
    }

    #[test]
    fn unknown_heuristic_name_is_rejected() {
        assert!(HeuristicKind::parse("NotAHeuristic").is_err());
    }

    #[test]
    fn two_clause_scores_only_length_two_original_clauses() {
        let formula = formula_of(vec![vec![1, 2], vec![1, 2, 3]], 3);
        let mut heuristic = Heuristic::new(HeuristicKind::TwoClause, 0);
        heuristic.preprocess(&formula);

        match &heuristic {
            Heuristic::TwoClause { score, .. } => {
                assert_eq!(score[0], 1);
                assert_eq!(score[1], 1);
                assert_eq!(score[2], 0);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn dlis_prefers_the_polarity_with_more_unresolved_occurrences() {
        let formula = formula_of(vec![vec![1, 2], vec![1, 3], vec![-1, 4]], 4);
        let assignment = Assignment::new(4);
        let (value, var) = select_dlis(&formula, &assignment);
        assert_eq!(var, 1);
        assert!(value);
    }

    #[test]
    fn same_seed_picks_same_decision() {
        let formula = formula_of(vec![vec![1, 2, 3]], 3);
        let assignment = Assignment::new(3);

        let mut h1 = Heuristic::new(HeuristicKind::Random, 42);
        let mut h2 = Heuristic::new(HeuristicKind::Random, 42);
        h1.preprocess(&formula);
        h2.preprocess(&formula);

        assert_eq!(
            h1.select(&formula, &assignment),
            h2.select(&formula, &assignment)
        );
    }
}
