use thiserror::Error;

mod backend;
mod program;

pub use backend::MicroLpSolver;
pub use program::{
    Comparison, LinearConstraint, LinearExpr, LinearProgram, Sense, VariableDef, VariableId,
    VariableKind,
};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("linear program is infeasible")]
    Infeasible,
    #[error("linear program is unbounded")]
    Unbounded,
    #[error("solver backend failed: {0}")]
    Backend(String),
}

/// Optimal assignment returned by a [`Solver`].
#[derive(Clone, Debug, PartialEq)]
pub struct LpSolution {
    /// One value per variable, indexed like [`LinearProgram::variables`].
    pub values: Vec<f64>,
    pub objective: f64,
}

/// Anything that can solve a [`LinearProgram`] to optimality.
///
/// A single call makes a single attempt; retrying is up to the caller.
pub trait Solver {
    fn solve(&self, program: &LinearProgram) -> Result<LpSolution, SolverError>;
}
