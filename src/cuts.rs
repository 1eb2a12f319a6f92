use thiserror::Error;
use tracing::error;

use crate::graph::{Graph, VertexId};
use crate::solver::{
    Comparison, LinearExpr, LinearProgram, LpSolution, Sense, Solver, SolverError, VariableKind,
};

mod cut;
mod max_cut;
mod p_max_cut;
mod rounding;

pub use cut::Cut;
pub use max_cut::max_cut;
pub use p_max_cut::{p_max_cut, Relaxation};
pub use rounding::{best_threshold_cut, threshold_cut};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CutError {
    #[error("source or target is not determined (source: {source_id:?}, target: {target_id:?})")]
    UnsetEndpoints {
        source_id: Option<VertexId>,
        target_id: Option<VertexId>,
    },
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error("no threshold of the relaxed solution yields a cut with at most {budget} marked edges")]
    NoFeasibleRounding { budget: usize },
}

/// Tuning knobs for the cut search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CutOptions {
    /// Decision values closer than this are treated as equal by the threshold sweep.
    /// Decision values live in `[0, 1]`, so this does not depend on the edge weights.
    pub tolerance: f64,
}

impl Default for CutOptions {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

pub(crate) fn endpoints(graph: &Graph) -> Result<(VertexId, VertexId), CutError> {
    match (graph.source_id, graph.target_id) {
        (Some(source), Some(target)) => Ok((source, target)),
        (source_id, target_id) => Err(CutError::UnsetEndpoints {
            source_id,
            target_id,
        }),
    }
}

/// Linear program of the maximum topological cut of `graph`.
///
/// Variable `i` is the membership of vertex `i` in the source side. Every edge `a -> b` gets
/// `x_a - x_b >= 0`, the source is fixed to 1 and the target to 0, and the objective maximizes
/// the weighted sum of `x_a - x_b`. With a `budget`, the same differences summed over marked
/// edges must not exceed it.
pub fn cut_model(
    graph: &Graph,
    budget: Option<usize>,
    kind: VariableKind,
) -> Result<LinearProgram, CutError> {
    let (source, target) = endpoints(graph)?;

    let mut program = LinearProgram::new();
    for _ in 0..graph.n_vertices() {
        program.add_variable(kind, 0.0, 1.0);
    }

    let mut objective = LinearExpr::new();
    let mut marked_count = LinearExpr::new();
    for (_, a, b, edge) in graph.edges() {
        let difference = LinearExpr::difference(a, b);
        objective.add_scaled(edge.weight, &difference);
        if edge.marked {
            marked_count.add_scaled(1.0, &difference);
        }
        program.add_constraint(difference, Comparison::GreaterOrEqual, 0.0);
    }
    program.set_objective(objective, Sense::Maximize);

    if let Some(budget) = budget {
        if !marked_count.is_empty() {
            program.add_constraint(marked_count, Comparison::LessOrEqual, budget as f64);
        }
    }
    program.add_constraint(LinearExpr::variable(source), Comparison::Equal, 1.0);
    program.add_constraint(LinearExpr::variable(target), Comparison::Equal, 0.0);

    Ok(program)
}

pub(crate) fn solve<S: Solver + ?Sized>(
    solver: &S,
    program: &LinearProgram,
) -> Result<LpSolution, CutError> {
    solver.solve(program).map_err(|err| {
        error!(%err, "failed to solve cut model");
        CutError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::{cut_model, CutError};
    use crate::graph::Graph;
    use crate::solver::{Comparison, VariableKind};

    fn marked_diamond() -> Graph {
        let mut graph = Graph::new();
        for _ in 0..4 {
            graph.add_vertex(0.0, 0.0);
        }
        graph.add_edge(0, 1, 1.0, false);
        graph.add_edge(0, 2, 1.0, false);
        graph.add_edge(1, 3, 5.0, true);
        graph.add_edge(2, 3, 5.0, true);
        graph.source_id = Some(0);
        graph.target_id = Some(3);
        graph
    }

    #[test]
    fn model_shape() {
        let graph = marked_diamond();
        let program = cut_model(&graph, None, VariableKind::Continuous).unwrap();
        assert_eq!(4, program.variables.len());
        // one monotonicity constraint per edge plus the two fixed endpoints
        assert_eq!(6, program.constraints.len());
        assert!(!program.is_integral());

        let budgeted = cut_model(&graph, Some(1), VariableKind::Binary).unwrap();
        assert_eq!(7, budgeted.constraints.len());
        assert!(budgeted.is_integral());
        let budget = &budgeted.constraints[4];
        assert_eq!(Comparison::LessOrEqual, budget.comparison);
        assert_eq!(1.0, budget.rhs);
    }

    #[test]
    fn objective_is_cut_weight_on_integral_points() {
        let graph = marked_diamond();
        let program = cut_model(&graph, None, VariableKind::Continuous).unwrap();
        // S = {0, 1}: edges 0 -> 2 and 1 -> 3 cross
        assert_eq!(6.0, program.objective.evaluate(&[1.0, 1.0, 0.0, 0.0]));
        let feasible = program
            .constraints
            .iter()
            .all(|c| c.is_satisfied(&[1.0, 1.0, 0.0, 0.0], 1e-9));
        assert!(feasible);
    }

    #[test]
    fn missing_endpoints() {
        let mut graph = marked_diamond();
        graph.target_id = None;
        let err = cut_model(&graph, None, VariableKind::Continuous).unwrap_err();
        assert_eq!(
            CutError::UnsetEndpoints {
                source_id: Some(0),
                target_id: None
            },
            err
        );
    }
}
