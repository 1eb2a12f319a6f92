use tracing::debug;

use crate::cuts::{cut_model, solve, threshold_cut, Cut, CutError};
use crate::graph::Graph;
use crate::solver::{Solver, VariableKind};

/// Maximum weight topological cut of `graph`.
///
/// Only the relaxation is solved: the monotonicity constraints form a totally unimodular
/// system, so the optimal vertex is already integral and any threshold in `(0, 1)` recovers it.
pub fn max_cut<S: Solver + ?Sized>(graph: &Graph, solver: &S) -> Result<Cut, CutError> {
    let program = cut_model(graph, None, VariableKind::Continuous)?;
    let solution = solve(solver, &program)?;

    let cut = threshold_cut(graph, &solution.values, 0.5);
    debug!(
        value = cut.value,
        relaxed = solution.objective,
        edges = cut.size(),
        "computed maximum topological cut"
    );
    Ok(cut)
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    use super::max_cut;
    use crate::cuts::CutError;
    use crate::graph::Graph;
    use crate::solver::{LinearProgram, LpSolution, MicroLpSolver, Solver, SolverError};

    const EPS: f64 = 1e-6;

    struct FailingSolver;

    impl Solver for FailingSolver {
        fn solve(&self, _: &LinearProgram) -> Result<LpSolution, SolverError> {
            Err(SolverError::Backend("license expired".to_string()))
        }
    }

    fn chain(weights: &[f64]) -> Graph {
        let mut graph = Graph::new();
        for _ in 0..=weights.len() {
            graph.add_vertex(0.0, 0.0);
        }
        for (i, &w) in weights.iter().enumerate() {
            graph.add_edge(i, i + 1, w, false);
        }
        graph.find_source();
        graph.find_target();
        graph
    }

    #[test]
    fn uniform_chain() {
        let graph = chain(&[1.0, 1.0, 1.0]);
        let cut = max_cut(&graph, &MicroLpSolver).unwrap();
        assert!((cut.value - 1.0).abs() < EPS);
        assert_eq!(1, cut.size());
        assert!(cut.is_topological(&graph));
        assert!(cut.separates(&graph));
    }

    #[test]
    fn chain_picks_heaviest_edge() {
        let graph = chain(&[2.0, 7.0, 3.0]);
        let cut = max_cut(&graph, &MicroLpSolver).unwrap();
        assert_eq!(vec![1], cut.cut_set);
        assert_eq!(vec![0, 1], cut.source_set);
        assert_eq!(vec![2, 3], cut.destination_set);
        assert!((cut.value - 7.0).abs() < EPS);
    }

    #[test]
    fn parallel_paths() {
        // 0 -> 1 -> 5 and 0 -> 2 -> 3 -> 4 -> 5
        let mut graph = Graph::new();
        for _ in 0..6 {
            graph.add_vertex(0.0, 0.0);
        }
        graph.add_edge(0, 1, 3.0, false);
        graph.add_edge(1, 5, 5.0, false);
        graph.add_edge(0, 2, 2.0, false);
        graph.add_edge(2, 3, 7.0, false);
        graph.add_edge(3, 4, 4.0, false);
        graph.add_edge(4, 5, 1.0, false);
        graph.find_source();
        graph.find_target();

        // every path crosses exactly once: the heaviest edge of each path
        let cut = max_cut(&graph, &MicroLpSolver).unwrap();
        assert!((cut.value - 12.0).abs() < EPS);
        assert_eq!(vec![1, 3], cut.cut_set);
    }

    #[test]
    fn shortcut_edges_limit_the_cut() {
        // 0 -> 1 -> 2 with a light shortcut 0 -> 2 that can never be avoided
        let mut graph = Graph::new();
        for _ in 0..3 {
            graph.add_vertex(0.0, 0.0);
        }
        graph.add_edge(0, 1, 4.0, false);
        graph.add_edge(1, 2, 6.0, false);
        graph.add_edge(0, 2, 1.0, false);
        graph.find_source();
        graph.find_target();

        let cut = max_cut(&graph, &MicroLpSolver).unwrap();
        assert!((cut.value - 7.0).abs() < EPS);
        assert_eq!(vec![1, 2], cut.cut_set);
    }

    #[test]
    fn unset_endpoints() {
        let mut graph = chain(&[1.0]);
        graph.source_id = None;
        let err = max_cut(&graph, &MicroLpSolver).unwrap_err();
        assert!(matches!(err, CutError::UnsetEndpoints { source_id: None, .. }));
    }

    #[test]
    #[traced_test]
    fn solver_failure_is_logged() {
        let graph = chain(&[1.0, 2.0]);
        let err = max_cut(&graph, &FailingSolver).unwrap_err();
        assert_eq!(
            CutError::Solver(SolverError::Backend("license expired".to_string())),
            err
        );
        assert!(logs_contain("failed to solve cut model"));
    }
}
