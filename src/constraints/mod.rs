//! Constraint engine shared by every search strategy
//!
//! Exact checks decide whether a complete assignment is a solution; partial
//! checks prune branches that can no longer lead to one.

pub mod assignment;
pub mod checks;

pub use assignment::Assignment;
pub use checks::{
    connectivity_exact, connectivity_partial, crossing_ok, degree_exact, degree_partial,
};
