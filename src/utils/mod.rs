//! Rendering and formatting utilities

pub mod display;

pub use display::{derive_assignment, format_solution_grid, render_solution};
