//! Conflict analyzer (spec §4.E): derives a First-UIP learned clause and a
//! non-chronological backtrack level from a conflicting clause.

use std::collections::HashSet;

use fixedbitset::FixedBitSet;

use crate::assignment::Assignment;
use crate::clause::{var_index, var_of, Clause, Lit, Var};
use crate::formula::{ClauseId, Formula};
use crate::graph::ImplicationGraph;

/// Analyzes a conflict observed at `level`. Returns `None` for a level-0
/// conflict (the formula is UNSAT); otherwise the learned clause and the
/// level to backtrack to.
pub fn analyze(
    formula: &Formula,
    assignment: &Assignment,
    graph: &ImplicationGraph,
    conflict: ClauseId,
    level: usize,
) -> Option<(Clause, i64)> {
    if level == 0 {
        return None;
    }

    // The level's assignment history, in chronological order: its decision
    // variable (if any) followed by everything propagation forced at it.
    let mut history: Vec<Var> = Vec::new();
    if let Some(decision) = assignment.decision_at[level] {
        history.push(decision);
    }
    history.extend(assignment.propagated_at[level].iter().map(|&lit| var_of(lit)));

    let mut pool: Vec<Lit> = formula.get(conflict).lits().to_vec();
    // Tracks which variables have already been resolved away, so a variable
    // with fan-out in the graph is never resolved on twice. Sized once up
    // front since the variable count is fixed for the solver's lifetime.
    let mut resolved = FixedBitSet::with_capacity(formula.num_variables());
    let mut current: HashSet<Lit> = HashSet::new();
    let mut previous: HashSet<Lit> = HashSet::new();

    loop {
        for &lit in &pool {
            if graph.node(var_of(lit)).level == level as i64 {
                current.insert(lit);
            } else {
                previous.insert(lit);
            }
        }

        if current.len() == 1 {
            break;
        }

        let latest = history
            .iter()
            .rev()
            .find(|&&var| current.contains(&(var as Lit)) || current.contains(&-(var as Lit)))
            .copied()
            .expect("conflict analysis: no resolvable variable at the current level");

        current.retain(|&lit| var_of(lit) != latest);
        resolved.insert(var_index(latest));

        pool = match graph.node(latest).antecedent {
            Some(antecedent) => formula
                .get(antecedent)
                .lits()
                .iter()
                .filter(|&&lit| !resolved.contains(var_index(var_of(lit))))
                .copied()
                .collect(),
            None => Vec::new(),
        };
    }

    let backtrack_level = previous
        .iter()
        .map(|&lit| graph.node(var_of(lit)).level)
        .max()
        .unwrap_or(level as i64 - 1);

    let learned: Vec<Lit> = current.into_iter().chain(previous).collect();

    Some((Clause::new(learned), backtrack_level))
}
