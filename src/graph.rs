//! The implication graph (spec §4.C, §9 "Implication graph shape"): one
//! node per variable, lifetime the whole search. Parents/children are
//! relations into a single node table indexed by variable id, never owned
//! references, so the graph can't form reference cycles.

use crate::clause::{var_index, var_of, Lit, Var};
use crate::formula::ClauseId;

#[derive(Clone, Debug)]
pub struct ImplicationNode {
    pub variable: Var,
    pub value: Option<bool>,
    /// Decision level the current value was set at, or -1 if unassigned.
    pub level: i64,
    pub antecedent: Option<ClauseId>,
    pub parents: Vec<Var>,
    pub children: Vec<Var>,
}

impl ImplicationNode {
    fn unassigned(variable: Var) -> ImplicationNode {
        ImplicationNode {
            variable,
            value: None,
            level: -1,
            antecedent: None,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }
}

pub struct ImplicationGraph {
    nodes: Vec<ImplicationNode>,
}

impl ImplicationGraph {
    pub fn new(num_vars: usize) -> ImplicationGraph {
        let nodes = (1..=num_vars as u64)
            .map(|v| ImplicationNode::unassigned(v as Var))
            .collect();
        ImplicationGraph { nodes }
    }

    pub fn node(&self, var: Var) -> &ImplicationNode {
        &self.nodes[var_index(var)]
    }

    pub fn children_mut(&mut self, var: Var) -> &mut Vec<Var> {
        &mut self.nodes[var_index(var)].children
    }

    /// Assigns `var` at `level`. `antecedent` is `Some((id, lits))` for a
    /// propagated literal (the clause that forced it) and `None` for a
    /// decision, per invariant 2 in spec §3.
    pub fn assign(
        &mut self,
        var: Var,
        value: bool,
        level: usize,
        antecedent: Option<(ClauseId, &[Lit])>,
    ) {
        let parents: Vec<Var> = match antecedent {
            Some((_, lits)) => lits
                .iter()
                .map(|&l| var_of(l))
                .filter(|&v| v != var)
                .collect(),
            None => Vec::new(),
        };

        {
            let node = &mut self.nodes[var_index(var)];
            node.value = Some(value);
            node.level = level as i64;
            node.antecedent = antecedent.map(|(id, _)| id);
            node.parents = parents.clone();
        }

        for parent in parents {
            let children = self.children_mut(parent);
            if !children.contains(&var) {
                children.push(var);
            }
        }
    }

    /// Resets a node to the unassigned state (spec §3 invariant 1): no
    /// value, no antecedent, no parents, empty children.
    pub fn reset(&mut self, var: Var) {
        let node = &mut self.nodes[var_index(var)];
        node.value = None;
        node.level = -1;
        node.antecedent = None;
        node.parents.clear();
        node.children.clear();
    }
}
