//! CaDiCaL integration
//!
//! Thin wrapper owning the clause/variable bookkeeping around the
//! incremental solver; callers add clauses between solve calls to refine
//! the model set.

use super::Clause;
use anyhow::Result;
use cadical::Solver;
use std::collections::HashMap;

/// SAT solver wrapper around CaDiCaL
pub struct SatSolver {
    solver: Solver,
    variable_count: usize,
    clause_count: usize,
}

impl SatSolver {
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            variable_count: 0,
            clause_count: 0,
        }
    }

    /// Add a single clause. The empty clause is rejected; it would make
    /// the instance trivially unsatisfiable and callers are expected to
    /// detect that before solving.
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());
        self.clause_count += 1;
        Ok(())
    }

    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Solve the current clause set. Returns the satisfying assignment or
    /// None when unsatisfiable.
    pub fn solve(&mut self) -> Option<HashMap<i32, bool>> {
        if self.solver.solve() == Some(true) {
            Some(self.extract_assignment())
        } else {
            None
        }
    }

    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();
        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }
        assignment
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clause_count(&self) -> usize {
        self.clause_count
    }
}

impl Default for SatSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::binary(1, 2)).unwrap();
        solver.add_clause(&Clause::binary(-1, 2)).unwrap();

        let assignment = solver.solve().unwrap();
        assert_eq!(assignment.get(&2), Some(&true));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();
        assert!(solver.solve().is_none());
    }

    #[test]
    fn test_incremental_refinement() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::binary(1, 2)).unwrap();

        let first = solver.solve().unwrap();
        // Block the first model and resolve
        let blocking: Vec<i32> = first
            .iter()
            .map(|(&var, &value)| if value { -var } else { var })
            .collect();
        solver.add_clause(&Clause::new(blocking)).unwrap();

        let second = solver.solve().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_empty_clause_rejected() {
        let mut solver = SatSolver::new();
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = SatSolver::new();
        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);
        solver.add_clause(&Clause::binary(2, -7)).unwrap();
        assert_eq!(solver.variable_count(), 7);
        assert_eq!(solver.clause_count(), 2);
    }
}
