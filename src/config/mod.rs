//! Configuration management

pub mod settings;

pub use settings::{
    CliOverrides, CnfHeuristic, InputConfig, OutputConfig, OutputFormat, Settings, SolverConfig,
    Strategy,
};
