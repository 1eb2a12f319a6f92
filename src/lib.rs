//! Maximum weight topological cuts of workflow DAGs, optionally under a budget on the number of
//! marked (computation) edges crossing the cut.

pub mod cuts;
pub mod dot;
pub mod graph;
pub mod solver;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use cuts::{max_cut, p_max_cut, Cut, CutError, CutOptions, Relaxation};
pub use graph::Graph;
pub use solver::{MicroLpSolver, Solver};
