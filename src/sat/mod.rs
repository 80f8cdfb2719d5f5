//! Boolean encoding of puzzles and the SAT solving boundary

pub mod cnf;
pub mod encoder;
pub mod solver;
pub mod variables;

pub use cnf::{Clause, ClauseEval, CnfFormula};
pub use encoder::{encode, SatEncoding};
pub use solver::SatSolver;
pub use variables::{EdgeVar, VariableMap};
