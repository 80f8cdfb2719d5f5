//! Core error taxonomy for the solver library
//!
//! Search outcomes ("no solution", refinement bound hit, cancellation) are
//! not errors; they are reported through `SolveOutcome`. Only structural
//! defects surface here.

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Asked to build an edge between two islands that share neither a row
    /// nor a column. A construction-time defect, always fatal to that call.
    #[error("islands at {a:?} and {b:?} share neither a row nor a column")]
    Alignment { a: (usize, usize), b: (usize, usize) },

    /// The exhaustive solver refuses puzzles whose assignment space 3^edges
    /// exceeds the configured ceiling.
    #[error("puzzle has {edges} candidate edges, above the exhaustive-search limit of {limit}")]
    SearchSpaceTooLarge { edges: usize, limit: usize },
}
