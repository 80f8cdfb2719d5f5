//! Search strategies over the edge-assignment space
//!
//! Every strategy consumes the same immutable [`Puzzle`](crate::puzzle::Puzzle)
//! and the same constraint engine; they differ only in how they traverse
//! and prune the space. All of them honor the shared contract: a returned
//! solution satisfies degree, crossing and connectivity simultaneously,
//! and "no solution" is an ordinary outcome, not an error.

pub mod astar;
pub mod backtracking;
pub mod cnf_astar;
pub mod exhaustive;
pub mod heuristics;
pub mod sat_reduction;

pub use astar::AStarSolver;
pub use backtracking::BacktrackingSolver;
pub use cnf_astar::CnfAStarSolver;
pub use exhaustive::ExhaustiveSolver;
pub use sat_reduction::SatReductionSolver;

use crate::config::{CnfHeuristic, SolverConfig, Strategy};
use crate::constraints::Assignment;
use crate::puzzle::{Grid, Puzzle};
use crate::utils::render_solution;
use anyhow::Result;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Common contract shared by all strategies
pub trait Solver {
    fn name(&self) -> &str;

    /// Solve a puzzle grid. Structural defects (unaligned edges, a search
    /// space the strategy refuses to enter) are errors; an exhausted or
    /// inconclusive search is an ordinary [`SolveOutcome`].
    fn solve(&self, grid: &Grid, budget: &SolveBudget) -> Result<SolveOutcome>;
}

/// Result of a solve invocation
#[derive(Debug, Clone, Serialize)]
pub enum SolveOutcome {
    Solved(Solution),
    /// The search space is exhausted without a satisfying assignment
    Infeasible,
    /// The SAT refinement loop hit its iteration cap; inconclusive,
    /// distinct from Infeasible
    BoundExceeded,
    /// The cancellation deadline or flag fired mid-search
    Cancelled,
}

impl SolveOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SolveOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SolveOutcome::Solved(_))
    }

    /// Short human-readable label for tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            SolveOutcome::Solved(_) => "solved",
            SolveOutcome::Infeasible => "no solution",
            SolveOutcome::BoundExceeded => "bound exceeded",
            SolveOutcome::Cancelled => "cancelled",
        }
    }
}

/// A solved puzzle: the rendered output grid, the per-edge bridge counts
/// it was rendered from, and advisory search statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub rendered: Vec<Vec<String>>,
    pub bridges: Vec<u8>,
    pub stats: SearchStats,
}

impl Solution {
    fn new(puzzle: &Puzzle, assignment: &Assignment, stats: SearchStats) -> Self {
        let bridges = (0..puzzle.edges().len())
            .map(|edge| assignment.bridges(edge))
            .collect();
        Self {
            rendered: render_solution(puzzle, assignment),
            bridges,
            stats,
        }
    }
}

/// Advisory statistics; not part of the correctness contract
#[derive(Debug, Clone, Serialize)]
pub struct SearchStats {
    pub nodes_explored: u64,
    pub solve_time: Duration,
}

/// Cooperative cancellation for long-running searches.
///
/// Strategies check the budget at every node expansion, so a surrounding
/// harness can enforce a wall-clock timeout without tearing threads down.
#[derive(Debug, Clone, Default)]
pub struct SolveBudget {
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
}

impl SolveBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            cancel: None,
        }
    }

    /// Attach an external cancel flag; setting it stops the search at the
    /// next node expansion
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn exhausted(&self) -> bool {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        false
    }
}

/// Instantiate the strategy selected by the configuration
pub fn solver_for(config: &SolverConfig) -> Box<dyn Solver + Send + Sync> {
    match config.strategy {
        Strategy::Exhaustive => Box::new(ExhaustiveSolver::new(config.exhaustive_edge_limit)),
        Strategy::Backtracking => Box::new(BacktrackingSolver::new()),
        Strategy::AStar => Box::new(AStarSolver::new()),
        Strategy::AStarCnf => Box::new(CnfAStarSolver::new(config.cnf_heuristic.policy())),
        Strategy::Sat => Box::new(SatReductionSolver::new(config.max_refinements)),
    }
}

/// Every solver instance for the given configuration; used by the compare
/// command. The CNF best-first strategy appears once per heuristic policy.
pub fn all_solvers(config: &SolverConfig) -> Vec<Box<dyn Solver + Send + Sync>> {
    let mut solvers: Vec<Box<dyn Solver + Send + Sync>> = vec![
        Box::new(ExhaustiveSolver::new(config.exhaustive_edge_limit)),
        Box::new(BacktrackingSolver::new()),
        Box::new(AStarSolver::new()),
    ];
    for heuristic in [
        CnfHeuristic::CountUnsatisfied,
        CnfHeuristic::Weighted,
        CnfHeuristic::Moms,
        CnfHeuristic::JeroslowWang,
    ] {
        solvers.push(Box::new(CnfAStarSolver::new(heuristic.policy())));
    }
    solvers.push(Box::new(SatReductionSolver::new(config.max_refinements)));
    solvers
}
