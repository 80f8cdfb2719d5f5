//! Best-first search over edge states
//!
//! Same (index, partial assignment) state space as backtracking, but the
//! frontier is a priority queue ordered by f = g + h, with g the number of
//! assigned edges and h the summed remaining bridge demand across islands.

use super::{SearchStats, Solution, SolveBudget, SolveOutcome, Solver};
use crate::constraints::{
    connectivity_exact, crossing_ok, degree_exact, degree_partial, Assignment,
};
use crate::puzzle::{Grid, Puzzle};
use anyhow::Result;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

pub struct AStarSolver;

impl AStarSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AStarSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(PartialEq, Eq)]
struct Node {
    f: u64,
    /// Insertion counter; makes pop order deterministic among equal f
    tie: u64,
    g: u64,
    index: usize,
    assignment: Assignment,
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.f, self.tie).cmp(&(other.f, other.tie))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Summed bridge deficit across islands, or None when some island already
/// exceeds its requirement (the branch is infeasible)
fn heuristic(puzzle: &Puzzle, assignment: &Assignment) -> Option<u64> {
    let mut degrees = vec![0u32; puzzle.islands().len()];
    for edge in puzzle.edges() {
        let bridges = assignment.bridges(edge.id) as u32;
        degrees[edge.u] += bridges;
        degrees[edge.v] += bridges;
    }

    let mut deficit = 0u64;
    for island in puzzle.islands() {
        let required = island.value as u32;
        let current = degrees[island.id];
        if current > required {
            return None;
        }
        deficit += (required - current) as u64;
    }
    Some(deficit)
}

impl Solver for AStarSolver {
    fn name(&self) -> &str {
        "astar"
    }

    fn solve(&self, grid: &Grid, budget: &SolveBudget) -> Result<SolveOutcome> {
        let start = Instant::now();
        let puzzle = Puzzle::build(grid)?;

        if puzzle.stranded_island().is_some() {
            return Ok(SolveOutcome::Infeasible);
        }

        let edge_count = puzzle.edges().len();
        let mut frontier = BinaryHeap::new();
        let mut visited: HashSet<Assignment> = HashSet::new();
        let mut tie = 0u64;
        let mut nodes = 0u64;

        let root = Assignment::empty(edge_count);
        let h0 = heuristic(&puzzle, &root).unwrap_or(0);
        frontier.push(Reverse(Node {
            f: h0,
            tie,
            g: 0,
            index: 0,
            assignment: root,
        }));

        while let Some(Reverse(node)) = frontier.pop() {
            if budget.exhausted() {
                return Ok(SolveOutcome::Cancelled);
            }
            nodes += 1;

            if !visited.insert(node.assignment.clone()) {
                continue;
            }

            if node.index == edge_count {
                if degree_exact(&puzzle, &node.assignment)
                    && connectivity_exact(&puzzle, &node.assignment)
                {
                    let stats = SearchStats {
                        nodes_explored: nodes,
                        solve_time: start.elapsed(),
                    };
                    return Ok(SolveOutcome::Solved(Solution::new(
                        &puzzle,
                        &node.assignment,
                        stats,
                    )));
                }
                continue;
            }

            for count in [2, 1, 0] {
                let mut successor = node.assignment.clone();
                successor.set(node.index, count);

                let feasible = (count == 0 || crossing_ok(&puzzle, &successor))
                    && degree_partial(&puzzle, &successor);
                if !feasible {
                    continue;
                }

                let Some(h) = heuristic(&puzzle, &successor) else {
                    continue;
                };

                tie += 1;
                frontier.push(Reverse(Node {
                    f: node.g + 1 + h,
                    tie,
                    g: node.g + 1,
                    index: node.index + 1,
                    assignment: successor,
                }));
            }
        }

        Ok(SolveOutcome::Infeasible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;

    fn solve(rows: Vec<Vec<u8>>) -> SolveOutcome {
        let grid = Grid::from_rows(rows).unwrap();
        AStarSolver::new()
            .solve(&grid, &SolveBudget::unlimited())
            .unwrap()
    }

    #[test]
    fn test_heuristic_counts_deficit() {
        let puzzle = Puzzle::build(&Grid::from_rows(vec![vec![2, 0, 2]]).unwrap()).unwrap();
        assert_eq!(heuristic(&puzzle, &Assignment::empty(1)), Some(4));
        assert_eq!(heuristic(&puzzle, &Assignment::from_counts(vec![2])), Some(0));
    }

    #[test]
    fn test_heuristic_prunes_overshoot() {
        let puzzle = Puzzle::build(&Grid::from_rows(vec![vec![1, 0, 1]]).unwrap()).unwrap();
        assert_eq!(heuristic(&puzzle, &Assignment::from_counts(vec![2])), None);
    }

    #[test]
    fn test_solves_small_puzzle() {
        let rows = vec![vec![3, 0, 2], vec![0, 0, 0], vec![1, 0, 0]];
        let outcome = solve(rows.clone());
        let solution = outcome.solution().expect("solvable");

        let puzzle = Puzzle::build(&Grid::from_rows(rows).unwrap()).unwrap();
        let assignment = Assignment::from_counts(solution.bridges.clone());
        assert!(constraints::degree_exact(&puzzle, &assignment));
        assert!(constraints::crossing_ok(&puzzle, &assignment));
        assert!(constraints::connectivity_exact(&puzzle, &assignment));
    }

    #[test]
    fn test_agrees_with_exhaustive() {
        use super::super::ExhaustiveSolver;

        let puzzles = vec![
            vec![vec![2, 2]],
            vec![vec![1, 0, 1]],
            vec![vec![0, 1, 0], vec![1, 0, 1], vec![0, 1, 0]],
            vec![vec![2, 2, 0, 0], vec![0, 0, 0, 0], vec![0, 0, 2, 2]],
        ];

        for rows in puzzles {
            let grid = Grid::from_rows(rows).unwrap();
            let budget = SolveBudget::unlimited();
            let exhaustive = ExhaustiveSolver::new(15).solve(&grid, &budget).unwrap();
            let astar = AStarSolver::new().solve(&grid, &budget).unwrap();
            assert_eq!(exhaustive.is_solved(), astar.is_solved());
        }
    }

    #[test]
    fn test_infeasible_reported() {
        let outcome = solve(vec![
            vec![2, 2, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 2, 2],
        ]);
        assert!(matches!(outcome, SolveOutcome::Infeasible));
    }
}
