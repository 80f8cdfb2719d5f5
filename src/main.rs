//! CLI for the Hashiwokakero solver

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hashi_solver::{
    budget_from,
    config::{CliOverrides, OutputFormat, Settings, Strategy},
    constraints::{connectivity_exact, crossing_ok, degree_exact},
    puzzle::{display_solution, load_grid_from_file, write_solution_to_file, Puzzle},
    solvers::{all_solvers, solver_for, SolveBudget, SolveOutcome},
    utils::derive_assignment,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "hashi_solver")]
#[command(about = "Hashiwokakero (Bridges) puzzle solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a puzzle with the configured strategy
    Solve {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Strategy: exhaustive, backtracking, astar, astar-cnf or sat
        /// (overrides config)
        #[arg(short, long)]
        solver: Option<String>,

        /// Timeout in seconds, 0 for none (overrides config)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Solution output file (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every strategy on one puzzle and tabulate the results
    Compare {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file (overrides config)
        #[arg(short, long)]
        puzzle: Option<PathBuf>,

        /// Per-solver timeout in seconds, 0 for none
        #[arg(short, long, default_value_t = 30)]
        timeout: u64,
    },

    /// Validate a rendered solution file against a puzzle
    Check {
        /// Puzzle file
        #[arg(short, long)]
        puzzle: PathBuf,

        /// Rendered solution file
        #[arg(short, long)]
        solution: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            config,
            puzzle,
            solver,
            timeout,
            output,
            verbose,
        } => solve_command(config, puzzle, solver, timeout, output, verbose),
        Commands::Compare {
            config,
            puzzle,
            timeout,
        } => compare_command(config, puzzle, timeout),
        Commands::Check { puzzle, solution } => check_command(puzzle, solution),
    }
}

fn load_settings(config_path: &PathBuf) -> Result<Settings> {
    if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    } else {
        Ok(Settings::default())
    }
}

fn solve_command(
    config_path: PathBuf,
    puzzle_file: Option<PathBuf>,
    solver_name: Option<String>,
    timeout: Option<u64>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let mut settings = load_settings(&config_path)?;

    let strategy = solver_name
        .as_deref()
        .map(Strategy::from_name)
        .transpose()?;
    settings.merge_with_cli(&CliOverrides {
        strategy,
        timeout_seconds: timeout,
        puzzle_file,
        solution_file: output,
    });
    settings.validate()?;

    let grid = load_grid_from_file(&settings.input.puzzle_file)?;
    if verbose {
        println!(
            "Puzzle {}x{} with {} islands",
            grid.rows,
            grid.cols,
            grid.island_count()
        );
    }

    let solver = solver_for(&settings.solver);
    let outcome = solver.solve(&grid, &budget_from(&settings))?;

    match outcome {
        SolveOutcome::Solved(solution) => {
            if verbose {
                println!(
                    "{} solved the puzzle in {:.3}s ({} nodes)",
                    solver.name(),
                    solution.stats.solve_time.as_secs_f64(),
                    solution.stats.nodes_explored
                );
            }

            match settings.output.format {
                OutputFormat::Text => display_solution(&solution.rendered),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&solution)?),
            }

            if let Some(path) = &settings.output.solution_file {
                write_solution_to_file(path, &solution.rendered)?;
                println!("Solution written to {}", path.display());
            }
            Ok(())
        }
        other => {
            println!("{}: {}", solver.name(), other.label());
            std::process::exit(1);
        }
    }
}

fn compare_command(config_path: PathBuf, puzzle_file: Option<PathBuf>, timeout: u64) -> Result<()> {
    let mut settings = load_settings(&config_path)?;
    settings.merge_with_cli(&CliOverrides {
        puzzle_file,
        ..Default::default()
    });

    let grid = load_grid_from_file(&settings.input.puzzle_file)?;
    println!(
        "Comparing solvers on {}x{} puzzle ({} islands)",
        grid.rows,
        grid.cols,
        grid.island_count()
    );

    let budget = if timeout == 0 {
        SolveBudget::unlimited()
    } else {
        SolveBudget::with_timeout(Duration::from_secs(timeout))
    };

    // Each solver builds its own Puzzle; only the read-only grid is shared
    let solvers = all_solvers(&settings.solver);
    let mut rows: Vec<(String, String, f64, Option<u64>)> = solvers
        .par_iter()
        .map(|solver| {
            let start = Instant::now();
            let result = solver.solve(&grid, &budget);
            let elapsed = start.elapsed().as_secs_f64();
            match result {
                Ok(outcome) => {
                    let nodes = outcome.solution().map(|s| s.stats.nodes_explored);
                    (solver.name().to_string(), outcome.label().to_string(), elapsed, nodes)
                }
                Err(error) => (solver.name().to_string(), error.to_string(), elapsed, None),
            }
        })
        .collect();
    rows.sort_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    println!("{:<18} | {:<40} | {:>9} | {:>8}", "solver", "outcome", "time (s)", "nodes");
    println!("{:-<18}-+-{:-<40}-+-{:-<9}-+-{:-<8}", "", "", "", "");
    for (name, outcome, elapsed, nodes) in rows {
        let nodes = nodes.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:<18} | {:<40} | {:>9.3} | {:>8}", name, outcome, elapsed, nodes);
    }

    Ok(())
}

fn check_command(puzzle_file: PathBuf, solution_file: PathBuf) -> Result<()> {
    let grid = load_grid_from_file(&puzzle_file)?;
    let puzzle = Puzzle::build(&grid)?;

    let content = std::fs::read_to_string(&solution_file)
        .with_context(|| format!("Failed to read solution file: {}", solution_file.display()))?;
    let rendered: Vec<Vec<String>> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect();

    let assignment = derive_assignment(&puzzle, &rendered)?;

    let degree = degree_exact(&puzzle, &assignment);
    let crossing = crossing_ok(&puzzle, &assignment);
    let connected = connectivity_exact(&puzzle, &assignment);

    println!("degree:       {}", if degree { "ok" } else { "violated" });
    println!("crossing:     {}", if crossing { "ok" } else { "violated" });
    println!("connectivity: {}", if connected { "ok" } else { "violated" });

    if degree && crossing && connected {
        println!("Solution is valid");
        Ok(())
    } else {
        println!("Solution is invalid");
        std::process::exit(1);
    }
}
