//! Unit-propagation engine (spec §4.D).
//!
//! Each sweep evaluates every active clause. A FALSE clause is returned
//! immediately as the conflict; a unit clause is queued. The queue drains
//! into new assignments, then the next sweep begins, until a sweep queues
//! nothing. This is the reference implementation's all-clauses-per-sweep
//! strategy rather than a two-watched-literal scheme — simpler to keep
//! provably equivalent, at the cost of redoing work a watch list would
//! avoid (spec §9, open question on propagation strategy).

use std::collections::VecDeque;

use crate::assignment::{Assignment, Value};
use crate::clause::{var_of, Clause, Lit};
use crate::formula::{eval_clause, ClauseId, Formula};
use crate::graph::ImplicationGraph;

/// Runs propagation to fixpoint. Returns the first conflicting clause
/// found, or `None` once a sweep finds nothing left to propagate.
pub fn propagate(
    formula: &Formula,
    assignment: &mut Assignment,
    graph: &mut ImplicationGraph,
    level: usize,
) -> Option<ClauseId> {
    loop {
        let mut queue: VecDeque<(ClauseId, Lit)> = VecDeque::new();

        for (id, clause) in formula.active_clauses() {
            match eval_clause(clause, assignment) {
                Some(false) => return Some(id),
                Some(true) => continue,
                None => {
                    if let Some(lit) = unit_literal(clause, assignment) {
                        queue.push_back((id, lit));
                    }
                }
            }
        }

        if queue.is_empty() {
            return None;
        }

        for (id, lit) in queue {
            let var = var_of(lit);
            let value = lit > 0;
            let clause = formula.get(id);

            assignment.set(var, if value { Value::True } else { Value::False });
            graph.assign(var, value, level, Some((id, clause.lits())));
            assignment.record_propagation(level, lit);
        }
    }
}

/// A clause is unit if exactly one of its literals is unassigned and all
/// others are FALSE. `eval_clause` having already ruled out TRUE/FALSE
/// for the clause means every remaining literal is either FALSE or
/// unassigned, so this only has to count the unassigned ones.
fn unit_literal(clause: &Clause, assignment: &Assignment) -> Option<Lit> {
    let mut unassigned = None;

    for &lit in clause.lits() {
        if assignment.eval_lit(lit).is_none() {
            if unassigned.is_some() {
                return None;
            }
            unassigned = Some(lit);
        }
    }

    unassigned
}
