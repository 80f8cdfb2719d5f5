//! Hashiwokakero ("Bridges") puzzle solver
//!
//! This library turns a numbered grid into a puzzle graph (islands,
//! candidate edges, crossings) and solves it with one of several
//! interchangeable strategies: exhaustive enumeration, backtracking,
//! heuristic best-first search over edge states or CNF literals, and a
//! SAT reduction with lazy connectivity refinement.

pub mod config;
pub mod constraints;
pub mod error;
pub mod puzzle;
pub mod sat;
pub mod solvers;
pub mod utils;

pub use config::Settings;
pub use error::Error;
pub use puzzle::{Grid, Puzzle};
pub use solvers::{SolveBudget, SolveOutcome, Solution, Solver};

use anyhow::Result;
use std::time::Duration;

/// Solve the puzzle named by the settings with the configured strategy
pub fn solve_with_settings(settings: &Settings) -> Result<SolveOutcome> {
    let grid = puzzle::load_grid_from_file(&settings.input.puzzle_file)?;
    let solver = solvers::solver_for(&settings.solver);
    solver.solve(&grid, &budget_from(settings))
}

/// Budget honoring the configured timeout; 0 means unlimited
pub fn budget_from(settings: &Settings) -> SolveBudget {
    if settings.solver.timeout_seconds == 0 {
        SolveBudget::unlimited()
    } else {
        SolveBudget::with_timeout(Duration::from_secs(settings.solver.timeout_seconds))
    }
}
