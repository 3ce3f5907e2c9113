//! Search driver (spec §4.G): the top-level CDCL loop orchestrating the
//! formula store, assignment/trail, implication graph, propagation,
//! conflict analysis, backtracking, and the branching heuristic.

use std::collections::HashSet;

use log::{debug, info};

use crate::analyze::analyze;
use crate::assignment::{Assignment, Value};
use crate::backtrack::backtrack;
use crate::clause::Var;
use crate::formula::Formula;
use crate::graph::ImplicationGraph;
use crate::heuristics::Heuristic;
use crate::propagate::propagate;

pub enum SolveOutcome {
    Sat(Vec<(Var, bool)>),
    Unsat,
}

pub struct Solver {
    formula: Formula,
    assignment: Assignment,
    graph: ImplicationGraph,
    decision_vars: HashSet<Var>,
    decision_level: usize,
    decision_count: u64,
    heuristic: Heuristic,
    num_vars: usize,
}

impl Solver {
    pub fn new(formula: Formula, heuristic: Heuristic) -> Solver {
        let num_vars = formula.num_variables();

        Solver {
            assignment: Assignment::new(num_vars),
            graph: ImplicationGraph::new(num_vars),
            decision_vars: HashSet::new(),
            decision_level: 0,
            decision_count: 0,
            heuristic,
            formula,
            num_vars,
        }
    }

    pub fn num_variables(&self) -> usize {
        self.num_vars
    }

    pub fn decision_count(&self) -> u64 {
        self.decision_count
    }

    pub fn ratio(&self) -> f64 {
        self.formula.ratio()
    }

    /// Runs the search to completion.
    pub fn solve(&mut self) -> SolveOutcome {
        self.heuristic.preprocess(&self.formula);

        loop {
            if self.assignment.is_total() {
                info!("all {} variables assigned, formula is SAT", self.num_vars);
                return SolveOutcome::Sat(self.extract_assignment());
            }

            if let Some(conflict) = propagate(
                &self.formula,
                &mut self.assignment,
                &mut self.graph,
                self.decision_level,
            ) {
                debug!("conflict at decision level {}", self.decision_level);

                match analyze(
                    &self.formula,
                    &self.assignment,
                    &self.graph,
                    conflict,
                    self.decision_level,
                ) {
                    None => {
                        info!("conflict at decision level 0, formula is UNSAT");
                        return SolveOutcome::Unsat;
                    }
                    Some((learned, backtrack_level)) => {
                        let backtrack_level = backtrack_level.max(0) as usize;
                        self.formula.insert_learned(learned);
                        backtrack(
                            &mut self.assignment,
                            &mut self.graph,
                            &mut self.decision_vars,
                            self.num_vars,
                            backtrack_level as i64,
                        );
                        self.decision_level = backtrack_level;
                        debug!("backtracked to decision level {}", self.decision_level);
                    }
                }
            } else {
                self.decision_count += 1;
                self.decision_level += 1;

                let (value, var) = self.heuristic.select(&self.formula, &self.assignment);
                debug!(
                    "decision #{}: variable {} = {} at level {}",
                    self.decision_count, var, value, self.decision_level
                );

                self.assignment.begin_level(self.decision_level, Some(var));
                self.assignment
                    .set(var, if value { Value::True } else { Value::False });
                self.decision_vars.insert(var);
                self.graph.assign(var, value, self.decision_level, None);
            }
        }
    }

    fn extract_assignment(&self) -> Vec<(Var, bool)> {
        (1..=self.num_vars as u64)
            .map(|v| {
                let var = v as Var;
                let value = self.assignment.get(var) == Some(Value::True);
                (var, value)
            })
            .collect()
    }
}
