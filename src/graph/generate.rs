use rand::Rng;

use crate::graph::{convert_to_simple_data_flow, Graph};

/// Random DAG on `n` vertices: each pair `i < j` is linked with probability `connectedness`.
///
/// Memory costs and edge weights are drawn from `[0, w_max)`, time costs from `[0, t_max)`.
pub fn generate_dag<R: Rng>(
    n: usize,
    connectedness: f64,
    w_max: f64,
    t_max: f64,
    rng: &mut R,
) -> Graph {
    let mut res = Graph::with_capacity(n, 0);

    for _ in 0..n {
        let time = uniform(rng, t_max);
        let memory = uniform(rng, w_max);
        res.add_vertex(time, memory);
    }

    for i in 0..n {
        for j in i + 1..n {
            if rng.gen::<f64>() < connectedness {
                let weight = uniform(rng, w_max);
                res.add_edge(i, j, weight, false);
            }
        }
    }

    res
}

/// Same as [`generate_dag`], converted to the SimpleDataFlowModel.
pub fn generate_dag_ss<R: Rng>(
    n: usize,
    connectedness: f64,
    w_max: f64,
    t_max: f64,
    rng: &mut R,
) -> Graph {
    let mut dag = generate_dag(n, connectedness, w_max, t_max, rng);
    dag.find_source();
    dag.find_target();
    convert_to_simple_data_flow(&dag)
}

fn uniform<R: Rng>(rng: &mut R, max: f64) -> f64 {
    rng.gen::<f64>() * max
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{generate_dag, generate_dag_ss};

    #[test]
    fn edges_point_forward() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = generate_dag(30, 0.3, 10.0, 5.0, &mut rng);
        assert_eq!(30, graph.n_vertices());
        for (_, from, to, edge) in graph.edges() {
            assert!(from < to);
            assert!((0.0..10.0).contains(&edge.weight));
        }
        for (_, vertex) in graph.vertices() {
            assert!((0.0..5.0).contains(&vertex.time));
            assert!((0.0..10.0).contains(&vertex.memory));
        }
    }

    #[test]
    fn connectedness_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(0, generate_dag(10, 0.0, 1.0, 1.0, &mut rng).n_edges());
        assert_eq!(45, generate_dag(10, 1.0, 1.0, 1.0, &mut rng).n_edges());
    }

    #[test]
    fn same_seed_same_graph() {
        let a = generate_dag_ss(15, 0.5, 3.0, 3.0, &mut StdRng::seed_from_u64(42));
        let b = generate_dag_ss(15, 0.5, 3.0, 3.0, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.to_dot_string(), b.to_dot_string());
        assert_eq!(30, a.n_vertices());
        assert!(a.source_id.is_some());
        assert!(a.target_id.is_some());
    }
}
