//! Variable management for the SAT encoding
//!
//! Every edge owns two boolean variables: `b1` ("carries at least one
//! bridge") and `b2` ("carries two bridges"), with the invariant b2 => b1.
//! The bidirectional mapping lives here so no call site ever recomputes
//! variable ids by formula.

use crate::constraints::Assignment;
use std::collections::HashMap;

/// Which of an edge's two literals a variable id refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVar {
    /// At least one bridge on the edge
    AtLeastOne,
    /// A second, parallel bridge
    Double,
}

/// Bidirectional edge <-> variable mapping plus the auxiliary-id allocator
/// used by the cardinality encoder. Auxiliary ids are handed out
/// monotonically and never reused.
#[derive(Debug, Clone)]
pub struct VariableMap {
    b1: Vec<i32>,
    b2: Vec<i32>,
    reverse: HashMap<i32, (usize, EdgeVar)>,
    next_id: i32,
}

impl VariableMap {
    /// Allocate b1/b2 pairs for the given number of edges.
    /// SAT variables start from 1.
    pub fn for_edges(edge_count: usize) -> Self {
        let mut b1 = Vec::with_capacity(edge_count);
        let mut b2 = Vec::with_capacity(edge_count);
        let mut reverse = HashMap::new();
        let mut next_id = 1;

        for edge in 0..edge_count {
            b1.push(next_id);
            reverse.insert(next_id, (edge, EdgeVar::AtLeastOne));
            next_id += 1;

            b2.push(next_id);
            reverse.insert(next_id, (edge, EdgeVar::Double));
            next_id += 1;
        }

        Self {
            b1,
            b2,
            reverse,
            next_id,
        }
    }

    pub fn b1(&self, edge: usize) -> i32 {
        self.b1[edge]
    }

    pub fn b2(&self, edge: usize) -> i32 {
        self.b2[edge]
    }

    /// Map a variable id back to its edge literal; auxiliary variables
    /// decode to None.
    pub fn decode(&self, var: i32) -> Option<(usize, EdgeVar)> {
        self.reverse.get(&var).copied()
    }

    /// Allocate a fresh auxiliary variable
    pub fn fresh_aux(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn edge_count(&self) -> usize {
        self.b1.len()
    }

    /// Total number of variables allocated so far, auxiliaries included
    pub fn variable_count(&self) -> usize {
        (self.next_id - 1) as usize
    }

    /// Decode a model into an edge-state assignment:
    /// b2 true -> 2, else b1 true -> 1, else 0.
    pub fn assignment_from_model(&self, model: &HashMap<i32, bool>) -> Assignment {
        let counts = (0..self.edge_count())
            .map(|edge| {
                if model.get(&self.b2(edge)).copied().unwrap_or(false) {
                    2
                } else if model.get(&self.b1(edge)).copied().unwrap_or(false) {
                    1
                } else {
                    0
                }
            })
            .collect();
        Assignment::from_counts(counts)
    }

    /// Same decoding over a dense partial valuation indexed by variable id;
    /// unassigned variables read as false.
    pub fn assignment_from_values(&self, values: &[Option<bool>]) -> Assignment {
        let value_of = |var: i32| values.get(var as usize).copied().flatten().unwrap_or(false);
        let counts = (0..self.edge_count())
            .map(|edge| {
                if value_of(self.b2(edge)) {
                    2
                } else if value_of(self.b1(edge)) {
                    1
                } else {
                    0
                }
            })
            .collect();
        Assignment::from_counts(counts)
    }
}
