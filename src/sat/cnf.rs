//! CNF primitives: clauses, the puzzle formula, cardinality encoding
//!
//! A clause is a disjunction of nonzero integer literals (positive =
//! variable true, negative = false). The empty clause is unconditionally
//! false and forces UNSAT.

use super::VariableMap;

/// A SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>,
}

impl Clause {
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Single-literal clause
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Two-literal clause
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Evaluate against a dense partial valuation indexed by variable id
    pub fn evaluate(&self, values: &[Option<bool>]) -> ClauseEval {
        let mut unassigned = 0;
        for &lit in &self.literals {
            match literal_value(lit, values) {
                Some(true) => {
                    return ClauseEval {
                        satisfied: true,
                        unassigned: 0,
                    }
                }
                Some(false) => {}
                None => unassigned += 1,
            }
        }
        ClauseEval {
            satisfied: false,
            unassigned,
        }
    }
}

/// Outcome of evaluating one clause under a partial valuation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClauseEval {
    pub satisfied: bool,
    /// Literals still unassigned; 0 with satisfied = false means falsified
    pub unassigned: usize,
}

/// Truth value of a literal under a partial valuation, if its variable is
/// assigned
pub fn literal_value(lit: i32, values: &[Option<bool>]) -> Option<bool> {
    let value = values.get(lit.unsigned_abs() as usize).copied().flatten()?;
    Some(if lit > 0 { value } else { !value })
}

/// The puzzle's clause set with its family boundaries preserved, so
/// heuristics can weight degree clauses differently from geometry clauses.
///
/// Families appear in generation order: implication, crossing, degree.
#[derive(Debug, Clone)]
pub struct CnfFormula {
    pub clauses: Vec<Clause>,
    implication_end: usize,
    crossing_end: usize,
    variable_count: usize,
    /// Variable id -> indices of clauses containing it
    var_to_clauses: Vec<Vec<usize>>,
}

impl CnfFormula {
    pub fn new(
        clauses: Vec<Clause>,
        implication_end: usize,
        crossing_end: usize,
        variable_count: usize,
    ) -> Self {
        let mut var_to_clauses = vec![Vec::new(); variable_count + 1];
        for (index, clause) in clauses.iter().enumerate() {
            for &lit in &clause.literals {
                var_to_clauses[lit.unsigned_abs() as usize].push(index);
            }
        }

        Self {
            clauses,
            implication_end,
            crossing_end,
            variable_count,
            var_to_clauses,
        }
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Degree (cardinality) clauses start after the geometry families
    pub fn is_degree_clause(&self, index: usize) -> bool {
        index >= self.crossing_end
    }

    pub fn is_crossing_clause(&self, index: usize) -> bool {
        (self.implication_end..self.crossing_end).contains(&index)
    }

    /// Indices of clauses containing the given variable
    pub fn clauses_containing(&self, var: i32) -> &[usize] {
        &self.var_to_clauses[var.unsigned_abs() as usize]
    }

    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    /// True when every clause has a true literal under the valuation
    pub fn all_satisfied(&self, values: &[Option<bool>]) -> bool {
        self.clauses
            .iter()
            .all(|clause| clause.evaluate(values).satisfied)
    }

    /// True when some clause containing `var` is falsified outright.
    /// Local check used to prune right after assigning `var`.
    pub fn falsifies_any(&self, var: i32, values: &[Option<bool>]) -> bool {
        self.clauses_containing(var).iter().any(|&index| {
            let eval = self.clauses[index].evaluate(values);
            !eval.satisfied && eval.unassigned == 0
        })
    }
}

/// Encode "exactly k of these literals are true".
///
/// At-most-k uses the sequential-counter encoding (auxiliary register
/// variables from the shared allocator); at-least-k is at-most-(n-k) over
/// the negated literals. An unsatisfiable request (k above the literal
/// count, or a positive k over no literals) yields the empty clause.
pub fn exactly_k(literals: &[i32], k: usize, variables: &mut VariableMap) -> Vec<Clause> {
    let n = literals.len();
    if k > n {
        return vec![Clause::new(Vec::new())];
    }

    let mut clauses = at_most_k(literals, k, variables);
    let negated: Vec<i32> = literals.iter().map(|&lit| -lit).collect();
    clauses.extend(at_most_k(&negated, n - k, variables));
    clauses
}

/// Sequential-counter at-most-k over the given literals
pub fn at_most_k(literals: &[i32], k: usize, variables: &mut VariableMap) -> Vec<Clause> {
    let n = literals.len();
    if n <= k {
        return Vec::new();
    }
    if k == 0 {
        return literals.iter().map(|&lit| Clause::unit(-lit)).collect();
    }

    // Register s[i][j]: at least j+1 true among literals[0..=i]
    let registers: Vec<Vec<i32>> = (0..n - 1)
        .map(|_| (0..k).map(|_| variables.fresh_aux()).collect())
        .collect();

    let mut clauses = Vec::new();

    clauses.push(Clause::binary(-literals[0], registers[0][0]));
    for j in 1..k {
        clauses.push(Clause::unit(-registers[0][j]));
    }

    for i in 1..n - 1 {
        clauses.push(Clause::binary(-literals[i], registers[i][0]));
        clauses.push(Clause::binary(-registers[i - 1][0], registers[i][0]));
        for j in 1..k {
            clauses.push(Clause::new(vec![
                -literals[i],
                -registers[i - 1][j - 1],
                registers[i][j],
            ]));
            clauses.push(Clause::binary(-registers[i - 1][j], registers[i][j]));
        }
        clauses.push(Clause::binary(-literals[i], -registers[i - 1][k - 1]));
    }

    clauses.push(Clause::binary(-literals[n - 1], -registers[n - 2][k - 1]));

    clauses
}
