use tracing::debug;

use crate::cuts::{best_threshold_cut, cut_model, solve, threshold_cut, Cut, CutError, CutOptions};
use crate::graph::Graph;
use crate::solver::{Solver, VariableKind};

/// How the budgeted model is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    /// Solve the continuous relaxation and round it with a threshold sweep.
    Fractional,
    /// Solve with binary variables.
    Integral,
}

/// Heaviest topological cut of `graph` containing at most `budget` marked edges.
///
/// The budget breaks total unimodularity, so in [`Relaxation::Fractional`] mode the relaxed
/// optimum may be fractional; it is turned into the best budget-feasible threshold cut, which
/// can be lighter than the integral optimum.
pub fn p_max_cut<S: Solver + ?Sized>(
    graph: &Graph,
    budget: usize,
    relaxation: Relaxation,
    solver: &S,
    options: &CutOptions,
) -> Result<Cut, CutError> {
    let kind = match relaxation {
        Relaxation::Fractional => VariableKind::Continuous,
        Relaxation::Integral => VariableKind::Binary,
    };
    let program = cut_model(graph, Some(budget), kind)?;
    let solution = solve(solver, &program)?;

    let cut = match relaxation {
        Relaxation::Integral => threshold_cut(graph, &solution.values, 0.5),
        Relaxation::Fractional => {
            best_threshold_cut(graph, &solution.values, budget, options.tolerance)
                .ok_or(CutError::NoFeasibleRounding { budget })?
        }
    };
    debug!(
        ?relaxation,
        budget,
        value = cut.value,
        relaxed = solution.objective,
        marked = cut.marked,
        "computed p-maximum topological cut"
    );
    Ok(cut)
}
