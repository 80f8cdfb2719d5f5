//! Configuration settings for the Hashiwokakero solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub input: InputConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub puzzle_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub strategy: Strategy,
    /// Wall-clock limit for a solve call; 0 disables the deadline
    pub timeout_seconds: u64,
    /// Iteration cap for the SAT connectivity-refinement loop
    pub max_refinements: usize,
    /// Largest edge count the exhaustive solver will enumerate
    pub exhaustive_edge_limit: usize,
    /// Heuristic policy for the CNF best-first strategy
    pub cnf_heuristic: CnfHeuristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Exhaustive,
    Backtracking,
    AStar,
    AStarCnf,
    Sat,
}

impl Strategy {
    /// Parse a CLI strategy name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "exhaustive" | "bruteforce" => Ok(Strategy::Exhaustive),
            "backtracking" => Ok(Strategy::Backtracking),
            "astar" => Ok(Strategy::AStar),
            "astar-cnf" | "astar_cnf" => Ok(Strategy::AStarCnf),
            "sat" => Ok(Strategy::Sat),
            other => anyhow::bail!(
                "Unknown solver {:?} (expected exhaustive, backtracking, astar, astar-cnf or sat)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CnfHeuristic {
    CountUnsatisfied,
    Weighted,
    Moms,
    JeroslowWang,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Where to write the solution grid; None prints to the console only
    pub solution_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input: InputConfig {
                puzzle_file: PathBuf::from("puzzles/example.txt"),
            },
            solver: SolverConfig {
                strategy: Strategy::Sat,
                timeout_seconds: 300,
                max_refinements: 100,
                exhaustive_edge_limit: 15,
                cnf_heuristic: CnfHeuristic::Moms,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                solution_file: None,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.solver.max_refinements == 0 {
            anyhow::bail!("max_refinements must be positive");
        }
        if self.solver.exhaustive_edge_limit == 0 {
            anyhow::bail!("exhaustive_edge_limit must be positive");
        }
        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(strategy) = cli_overrides.strategy {
            self.solver.strategy = strategy;
        }
        if let Some(timeout) = cli_overrides.timeout_seconds {
            self.solver.timeout_seconds = timeout;
        }
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.input.puzzle_file = puzzle_file.clone();
        }
        if let Some(ref solution_file) = cli_overrides.solution_file {
            self.output.solution_file = Some(solution_file.clone());
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub strategy: Option<Strategy>,
    pub timeout_seconds: Option<u64>,
    pub puzzle_file: Option<PathBuf>,
    pub solution_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(Strategy::from_name("sat").unwrap(), Strategy::Sat);
        assert_eq!(
            Strategy::from_name("astar-cnf").unwrap(),
            Strategy::AStarCnf
        );
        assert!(Strategy::from_name("quantum").is_err());
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        let mut settings = Settings::default();
        settings.solver.strategy = Strategy::Backtracking;
        settings.solver.timeout_seconds = 42;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.solver.strategy, Strategy::Backtracking);
        assert_eq!(loaded.solver.timeout_seconds, 42);
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            strategy: Some(Strategy::AStar),
            timeout_seconds: Some(10),
            puzzle_file: Some(PathBuf::from("other.txt")),
            solution_file: None,
        });
        assert_eq!(settings.solver.strategy, Strategy::AStar);
        assert_eq!(settings.solver.timeout_seconds, 10);
        assert_eq!(settings.input.puzzle_file, PathBuf::from("other.txt"));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let mut settings = Settings::default();
        settings.solver.max_refinements = 0;
        assert!(settings.validate().is_err());
    }
}
