//! SAT encode-and-refine solver
//!
//! Degree and crossing constraints translate directly to CNF; connectivity
//! does not fit a small fixed clause set, so it is enforced lazily: solve,
//! decode the model, check connectivity, and when the bridge graph is
//! split, block exactly that edge-state and solve again. The loop is
//! bounded to guarantee termination; hitting the bound is reported as
//! inconclusive, distinct from genuine unsatisfiability.

use super::{SearchStats, Solution, SolveBudget, SolveOutcome, Solver};
use crate::constraints::{connectivity_exact, Assignment};
use crate::puzzle::{Grid, Puzzle};
use crate::sat::{encode, Clause, SatSolver, VariableMap};
use anyhow::Result;
use std::time::Instant;

pub struct SatReductionSolver {
    max_refinements: usize,
}

impl SatReductionSolver {
    pub fn new(max_refinements: usize) -> Self {
        Self { max_refinements }
    }
}

impl Solver for SatReductionSolver {
    fn name(&self) -> &str {
        "sat"
    }

    fn solve(&self, grid: &Grid, budget: &SolveBudget) -> Result<SolveOutcome> {
        let start = Instant::now();
        let puzzle = Puzzle::build(grid)?;
        let encoding = encode(&puzzle);

        if encoding.formula.has_empty_clause() {
            // Some island demands more bridges than its candidate edges
            // can carry; unsolvable by construction
            return Ok(SolveOutcome::Infeasible);
        }

        let mut solver = SatSolver::new();
        solver.add_clauses(&encoding.formula.clauses)?;

        for iteration in 0..self.max_refinements {
            if budget.exhausted() {
                return Ok(SolveOutcome::Cancelled);
            }

            let Some(model) = solver.solve() else {
                // All remaining models are blocked or none ever existed
                return Ok(SolveOutcome::Infeasible);
            };

            let assignment = encoding.variables.assignment_from_model(&model);

            if connectivity_exact(&puzzle, &assignment) {
                let stats = SearchStats {
                    nodes_explored: iteration as u64 + 1,
                    solve_time: start.elapsed(),
                };
                return Ok(SolveOutcome::Solved(Solution::new(
                    &puzzle,
                    &assignment,
                    stats,
                )));
            }

            solver.add_clause(&blocking_clause(&encoding.variables, &assignment))?;
        }

        Ok(SolveOutcome::BoundExceeded)
    }
}

/// Negate exactly this edge-state: one literal per edge, each false under
/// the current model, so any future model must change some edge's bridge
/// count. Auxiliary variables are deliberately left out of the clause.
fn blocking_clause(variables: &VariableMap, assignment: &Assignment) -> Clause {
    let literals = (0..variables.edge_count())
        .map(|edge| match assignment.bridges(edge) {
            0 => variables.b1(edge),
            1 => variables.b2(edge),
            _ => -variables.b2(edge),
        })
        .collect();
    Clause::new(literals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    fn solve(rows: Vec<Vec<u8>>) -> SolveOutcome {
        let grid = Grid::from_rows(rows).unwrap();
        SatReductionSolver::new(100)
            .solve(&grid, &SolveBudget::unlimited())
            .unwrap()
    }

    #[test]
    fn test_adjacent_pair_unique_double_bridge() {
        let outcome = solve(vec![vec![2, 2]]);
        let solution = outcome.solution().expect("solvable");
        assert_eq!(solution.bridges, vec![2]);
    }

    #[test]
    fn test_solution_satisfies_all_constraints() {
        let rows = vec![
            vec![2, 0, 0, 3, 0, 1],
            vec![0, 0, 0, 0, 0, 0],
            vec![2, 0, 0, 2, 0, 0],
        ];
        let outcome = solve(rows.clone());
        let solution = outcome.solution().expect("solvable");

        let puzzle = Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap();
        let assignment = Assignment::from_counts(solution.bridges.clone());
        assert!(constraints::degree_exact(&puzzle, &assignment));
        assert!(constraints::crossing_ok(&puzzle, &assignment));
        assert!(constraints::connectivity_exact(&puzzle, &assignment));
    }

    #[test]
    fn test_refinement_rejects_disconnected_models() {
        // Degree and crossing admit exactly one model here, and it is
        // disconnected; blocking it must drive the loop to UNSAT
        let outcome = solve(vec![
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 2, 2],
        ]);
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }

    #[test]
    fn test_refinement_finds_connected_model() {
        // A square of islands: plenty of degree-feasible models, some
        // disconnected subsets are impossible, but refinement must land on
        // a connected one
        let rows = vec![vec![2, 0, 2], vec![0, 0, 0], vec![2, 0, 2]];
        let outcome = solve(rows.clone());
        let solution = outcome.solution().expect("solvable");

        let puzzle = Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap();
        let assignment = Assignment::from_counts(solution.bridges.clone());
        assert!(constraints::connectivity_exact(&puzzle, &assignment));
    }

    #[test]
    fn test_bound_exceeded_is_distinct() {
        // With a refinement budget of zero iterations the loop cannot even
        // look at a model and must report the bound, not infeasibility
        let grid = Grid::from_rows(vec![vec![2, 0, 2]]).unwrap();
        let outcome = SatReductionSolver::new(0)
            .solve(&grid, &SolveBudget::unlimited())
            .unwrap();
        assert!(matches!(outcome, SolveOutcome::BoundExceeded));
    }

    #[test]
    fn test_stranded_island_infeasible() {
        let outcome = solve(vec![vec![5]]);
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }

    #[test]
    fn test_scenario_grid_reports_infeasible() {
        // Island (0,3) needs 5 bridges but only one candidate edge exists
        let outcome = solve(vec![
            vec![0, 2, 0, 5, 0],
            vec![0, 0, 0, 0, 0],
            vec![3, 0, 0, 0, 4],
        ]);
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }

    #[test]
    fn test_blocking_clause_shape() {
        let variables = VariableMap::for_edges(3);
        let assignment = Assignment::from_counts(vec![0, 1, 2]);
        let clause = blocking_clause(&variables, &assignment);
        assert_eq!(
            clause.literals,
            vec![variables.b1(0), variables.b2(1), -variables.b2(2)]
        );
    }
}
