//! Depth-first search with incremental pruning

use super::{SearchStats, Solution, SolveBudget, SolveOutcome, Solver};
use crate::constraints::{
    connectivity_exact, crossing_ok, degree_exact, degree_partial, Assignment,
};
use crate::puzzle::{Grid, Puzzle};
use anyhow::Result;
use std::time::Instant;

/// Assigns edges in id order, trying values [2, 1, 0] so islands approach
/// their degree sooner. Each tentative value runs the crossing check (only
/// when positive) and the partial degree check; a failed check undoes the
/// assignment and moves to the next value. The exact degree and
/// connectivity checks run only at complete assignments.
pub struct BacktrackingSolver;

impl BacktrackingSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BacktrackingSolver {
    fn default() -> Self {
        Self::new()
    }
}

enum Step {
    Found,
    Exhausted,
    Cancelled,
}

impl Solver for BacktrackingSolver {
    fn name(&self) -> &str {
        "backtracking"
    }

    fn solve(&self, grid: &Grid, budget: &SolveBudget) -> Result<SolveOutcome> {
        let start = Instant::now();
        let puzzle = Puzzle::build(grid)?;

        if puzzle.stranded_island().is_some() {
            return Ok(SolveOutcome::Infeasible);
        }

        let mut assignment = Assignment::empty(puzzle.edges().len());
        let mut nodes = 0u64;

        let step = search(&puzzle, &mut assignment, 0, budget, &mut nodes);
        let stats = SearchStats {
            nodes_explored: nodes,
            solve_time: start.elapsed(),
        };

        Ok(match step {
            Step::Found => SolveOutcome::Solved(Solution::new(&puzzle, &assignment, stats)),
            Step::Exhausted => SolveOutcome::Infeasible,
            Step::Cancelled => SolveOutcome::Cancelled,
        })
    }
}

fn search(
    puzzle: &Puzzle,
    assignment: &mut Assignment,
    index: usize,
    budget: &SolveBudget,
    nodes: &mut u64,
) -> Step {
    if budget.exhausted() {
        return Step::Cancelled;
    }
    *nodes += 1;

    if index == puzzle.edges().len() {
        if degree_exact(puzzle, assignment) && connectivity_exact(puzzle, assignment) {
            return Step::Found;
        }
        return Step::Exhausted;
    }

    for count in [2, 1, 0] {
        assignment.set(index, count);

        let feasible = (count == 0 || crossing_ok(puzzle, assignment))
            && degree_partial(puzzle, assignment);

        if feasible {
            match search(puzzle, assignment, index + 1, budget, nodes) {
                Step::Exhausted => {}
                done => return done,
            }
        }

        // Undo before trying the next value
        assignment.clear(index);
    }

    Step::Exhausted
}
