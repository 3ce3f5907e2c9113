//! Backtracker (spec §4.F): undoes assignments above a level and prunes
//! the implication graph consistently.

use std::collections::HashSet;

use crate::assignment::Assignment;
use crate::clause::{var_index, Var};
use crate::graph::ImplicationGraph;

/// Undoes every assignment above `target_level` and re-registers any
/// parent-less retained variable as a decision variable, so the
/// heuristics' view of "which variables were decisions" stays consistent
/// after a non-chronological jump (spec §4.F, last bullet).
pub fn backtrack(
    assignment: &mut Assignment,
    graph: &mut ImplicationGraph,
    decision_vars: &mut HashSet<Var>,
    num_vars: usize,
    target_level: i64,
) {
    let levels: Vec<i64> = (1..=num_vars as u64)
        .map(|v| graph.node(v as Var).level)
        .collect();

    for v in 1..=num_vars as u64 {
        let var = v as Var;
        let level = levels[var_index(var)];

        if level <= target_level {
            graph
                .children_mut(var)
                .retain(|&child| levels[var_index(child)] <= target_level);
        } else {
            graph.reset(var);
            assignment.unset(var);
            decision_vars.remove(&var);
        }
    }

    assignment.truncate_to(target_level.max(0) as usize);

    for v in 1..=num_vars as u64 {
        let var = v as Var;
        if assignment.get(var).is_some() && graph.node(var).parents.is_empty() {
            decision_vars.insert(var);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Value;
    use crate::clause::Lit;
    use crate::formula::ClauseId;

    #[test]
    fn resets_variables_above_target_level() {
        let mut assignment = Assignment::new(2);
        let mut graph = ImplicationGraph::new(2);
        let mut decision_vars = HashSet::new();

        assignment.begin_level(1, Some(1));
        assignment.set(1, Value::True);
        graph.assign(1, true, 1, None);
        decision_vars.insert(1);

        assignment.begin_level(2, Some(2));
        assignment.set(2, Value::True);
        graph.assign(2, true, 2, None);
        decision_vars.insert(2);

        backtrack(&mut assignment, &mut graph, &mut decision_vars, 2, 1);

        assert_eq!(assignment.get(2), None);
        assert_eq!(graph.node(2).level, -1);
        assert_eq!(assignment.get(1), Some(Value::True));
        assert_eq!(assignment.decision_at.len(), 2);
    }

    #[test]
    fn filters_children_by_level_after_backtrack() {
        let mut assignment = Assignment::new(3);
        let mut graph = ImplicationGraph::new(3);
        let mut decision_vars = HashSet::new();

        assignment.begin_level(1, Some(1));
        assignment.set(1, Value::True);
        graph.assign(1, true, 1, None);

        assignment.begin_level(2, Some(2));
        assignment.set(2, Value::True);
        graph.assign(2, true, 2, None);

        let id = ClauseId::Original(0);
        let lits: Vec<Lit> = vec![-1, -2, 3];
        assignment.set(3, Value::True);
        graph.assign(3, true, 2, Some((id, &lits)));

        backtrack(&mut assignment, &mut graph, &mut decision_vars, 3, 1);

        assert!(!graph.children_mut(1).contains(&3));
    }

    #[test]
    fn reregisters_parentless_propagated_variables_as_decisions() {
        // A unit clause forces variable 1 at level 0; it has no parents in
        // the graph, so after backtracking to level 0 it should count as a
        // decision variable for heuristic bookkeeping.
        let mut assignment = Assignment::new(1);
        let mut graph = ImplicationGraph::new(1);
        let mut decision_vars = HashSet::new();

        let id = ClauseId::Original(0);
        let lits: Vec<Lit> = vec![1];
        assignment.set(1, Value::True);
        graph.assign(1, true, 0, Some((id, &lits)));

        backtrack(&mut assignment, &mut graph, &mut decision_vars, 1, 0);

        assert!(decision_vars.contains(&1));
    }
}
