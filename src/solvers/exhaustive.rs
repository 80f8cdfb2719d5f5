//! Brute-force enumeration of the full assignment space

use super::{SearchStats, Solution, SolveBudget, SolveOutcome, Solver};
use crate::constraints::{connectivity_exact, crossing_ok, degree_exact, Assignment};
use crate::error::Error;
use crate::puzzle::{Grid, Puzzle};
use anyhow::Result;
use itertools::Itertools;
use std::time::Instant;

/// Enumerates {0,1,2}^|edges| in a fixed order and returns the first
/// candidate passing crossing, degree and connectivity (cheapest and most
/// discriminating first). The space is 3^|edges|, so the solver refuses
/// puzzles above a configurable edge ceiling rather than running
/// unbounded.
pub struct ExhaustiveSolver {
    edge_limit: usize,
}

impl ExhaustiveSolver {
    pub fn new(edge_limit: usize) -> Self {
        Self { edge_limit }
    }
}

impl Solver for ExhaustiveSolver {
    fn name(&self) -> &str {
        "exhaustive"
    }

    fn solve(&self, grid: &Grid, budget: &SolveBudget) -> Result<SolveOutcome> {
        let start = Instant::now();
        let puzzle = Puzzle::build(grid)?;
        let edges = puzzle.edges().len();

        if edges > self.edge_limit {
            return Err(Error::SearchSpaceTooLarge {
                edges,
                limit: self.edge_limit,
            }
            .into());
        }

        if puzzle.stranded_island().is_some() {
            return Ok(SolveOutcome::Infeasible);
        }

        let mut nodes = 0u64;

        if edges == 0 {
            // Nothing to assign; the empty assignment either is or is not
            // a solution
            let empty = Assignment::empty(0);
            let outcome = if degree_exact(&puzzle, &empty) && connectivity_exact(&puzzle, &empty) {
                SolveOutcome::Solved(Solution::new(
                    &puzzle,
                    &empty,
                    SearchStats {
                        nodes_explored: 1,
                        solve_time: start.elapsed(),
                    },
                ))
            } else {
                SolveOutcome::Infeasible
            };
            return Ok(outcome);
        }

        for counts in (0..edges).map(|_| 0u8..=2).multi_cartesian_product() {
            if budget.exhausted() {
                return Ok(SolveOutcome::Cancelled);
            }
            nodes += 1;

            let candidate = Assignment::from_counts(counts);
            if crossing_ok(&puzzle, &candidate)
                && degree_exact(&puzzle, &candidate)
                && connectivity_exact(&puzzle, &candidate)
            {
                let stats = SearchStats {
                    nodes_explored: nodes,
                    solve_time: start.elapsed(),
                };
                return Ok(SolveOutcome::Solved(Solution::new(&puzzle, &candidate, stats)));
            }
        }

        Ok(SolveOutcome::Infeasible)
    }
}
