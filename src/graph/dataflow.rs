use tracing::debug;

use crate::graph::{Graph, VertexId};

/// Converts `graph` into the SimpleDataFlowModel, where all cost sits on edges.
///
/// Every vertex `v` becomes a pair `(in, out)` joined by a marked edge whose weight is the memory
/// of `v` plus the weights of all edges incident to `v`. Every original edge `u -> v` becomes an
/// unmarked edge `out(u) -> in(v)` with the same weight. The source maps to its `in` copy and the
/// target to its `out` copy; splitting may strand vertices so the result is normalized again.
pub fn convert_to_simple_data_flow(graph: &Graph) -> Graph {
    let mut res = Graph::with_capacity(2 * graph.n_vertices(), graph.n_vertices() + graph.n_edges());

    let split: Vec<(VertexId, VertexId)> = graph
        .vertices()
        .map(|(v, vertex)| {
            let vertex_in = res.add_vertex(0.0, 0.0);
            let vertex_out = res.add_vertex(0.0, 0.0);
            let incident: f64 = graph
                .incoming_edges(v)
                .chain(graph.outgoing_edges(v))
                .map(|e| graph.edge(e).weight)
                .sum();
            res.add_edge(vertex_in, vertex_out, vertex.memory + incident, true);
            (vertex_in, vertex_out)
        })
        .collect();

    for (_, from, to, edge) in graph.edges() {
        res.add_edge(split[from].1, split[to].0, edge.weight, false);
    }

    res.source_id = graph.source_id.map(|s| split[s].0);
    res.target_id = graph.target_id.map(|t| split[t].1);
    res.make_single_source_target();

    debug!(
        vertices = res.n_vertices(),
        edges = res.n_edges(),
        "converted graph to simple data flow model"
    );
    res
}
