//! Assignment & trail (spec §4.B): the current partial assignment, plus the
//! per-level history `decision_at` / `propagated_at` the backtracker and
//! conflict analyzer both read.

use std::collections::VecDeque;

use crate::clause::{var_index, Lit, Var};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    True,
    False,
}

pub struct Assignment {
    values: Vec<Option<Value>>,
    assigned_count: usize,

    /// `decision_at[level]` is the decision variable introduced at that
    /// level, or `None` for level 0 (which only ever holds forced units).
    pub decision_at: Vec<Option<Var>>,

    /// `propagated_at[level]` is the ordered sequence of literals
    /// propagated at that level.
    pub propagated_at: Vec<VecDeque<Lit>>,
}

impl Assignment {
    pub fn new(num_vars: usize) -> Assignment {
        Assignment {
            values: vec![None; num_vars],
            assigned_count: 0,
            decision_at: vec![None],
            propagated_at: vec![VecDeque::new()],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, var: Var) -> Option<Value> {
        self.values[var_index(var)]
    }

    pub fn set(&mut self, var: Var, value: Value) {
        let slot = &mut self.values[var_index(var)];
        if slot.is_none() {
            self.assigned_count += 1;
        }
        *slot = Some(value);
    }

    pub fn unset(&mut self, var: Var) {
        let slot = &mut self.values[var_index(var)];
        if slot.is_some() {
            self.assigned_count -= 1;
        }
        *slot = None;
    }

    pub fn is_total(&self) -> bool {
        self.assigned_count == self.values.len()
    }

    pub fn size(&self) -> usize {
        self.assigned_count
    }

    /// Evaluates a literal: `None` if its variable is unassigned, otherwise
    /// the variable's value XORed with the literal's sign.
    pub fn eval_lit(&self, lit: Lit) -> Option<bool> {
        self.get(crate::clause::var_of(lit)).map(|value| {
            let positive = value == Value::True;
            if lit > 0 {
                positive
            } else {
                !positive
            }
        })
    }

    /// Opens bookkeeping for a new decision level. Must be called exactly
    /// once per level, in increasing order, before any propagation at that
    /// level is recorded.
    pub fn begin_level(&mut self, level: usize, decision: Option<Var>) {
        debug_assert_eq!(self.decision_at.len(), level);
        debug_assert_eq!(self.propagated_at.len(), level);
        self.decision_at.push(decision);
        self.propagated_at.push(VecDeque::new());
    }

    /// Drops the history of every level above `level`, for backtracking.
    pub fn truncate_to(&mut self, level: usize) {
        self.decision_at.truncate(level + 1);
        self.propagated_at.truncate(level + 1);
    }

    pub fn record_propagation(&mut self, level: usize, lit: Lit) {
        self.propagated_at[level].push_back(lit);
    }
}
