use tracing::{debug, warn};

use crate::graph::{Graph, VertexId};

impl Graph {
    /// Returns the designated source, picking the first vertex without predecessors if unset.
    ///
    /// The current target is never chosen, so an isolated vertex can't end up as both.
    pub fn find_source(&mut self) -> Option<VertexId> {
        if self.source_id.is_none() {
            self.source_id = (0..self.n_vertices())
                .find(|&v| self.in_degree(v) == 0 && Some(v) != self.target_id);
        }
        self.source_id
    }

    /// Returns the designated target, picking the first vertex without successors if unset.
    pub fn find_target(&mut self) -> Option<VertexId> {
        if self.target_id.is_none() {
            self.target_id = (0..self.n_vertices())
                .find(|&v| self.out_degree(v) == 0 && Some(v) != self.source_id);
        }
        self.target_id
    }

    /// Links every other vertex without predecessors to the source and every other vertex
    /// without successors to the target. Only edges are added.
    pub fn make_single_source_target(&mut self) {
        let source = self.find_source();
        let target = self.find_target();
        if source.is_none() || target.is_none() {
            warn!(?source, ?target, "graph endpoints are not fully determined");
        }

        let mut added = 0usize;
        for v in 0..self.n_vertices() {
            if let Some(source) = source {
                if v != source && self.in_degree(v) == 0 {
                    self.add_plain_edge(source, v);
                    added += 1;
                }
            }
            if let Some(target) = target {
                if v != target && self.out_degree(v) == 0 {
                    self.add_plain_edge(v, target);
                    added += 1;
                }
            }
        }
        debug!(added, "linked stranded vertices to source/target");
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::Graph;

    fn graph_with_vertices(n: usize) -> Graph {
        let mut graph = Graph::new();
        for _ in 0..n {
            graph.add_vertex(0.0, 0.0);
        }
        graph
    }

    #[test]
    fn finds_first_source_and_target() {
        // 0 -> 2, 1 -> 2, 2 -> 3, 2 -> 4
        let mut graph = graph_with_vertices(5);
        graph.add_plain_edge(0, 2);
        graph.add_plain_edge(1, 2);
        graph.add_plain_edge(2, 3);
        graph.add_plain_edge(2, 4);

        assert_eq!(Some(0), graph.find_source());
        assert_eq!(Some(3), graph.find_target());
    }

    #[test]
    fn lookup_is_cached() {
        let mut graph = graph_with_vertices(3);
        graph.add_plain_edge(1, 2);
        let edges = graph.n_edges();

        let source = graph.find_source();
        let target = graph.find_target();
        assert_eq!(Some(0), source);
        // the isolated vertex 0 is already the source
        assert_eq!(Some(2), target);
        assert_eq!(source, graph.find_source());
        assert_eq!(target, graph.find_target());
        assert_eq!(edges, graph.n_edges());
    }

    #[test]
    fn preset_endpoints_are_kept() {
        let mut graph = graph_with_vertices(3);
        graph.add_plain_edge(0, 1);
        graph.add_plain_edge(1, 2);
        graph.source_id = Some(1);
        assert_eq!(Some(1), graph.find_source());
    }

    #[test]
    fn empty_graph_has_no_endpoints() {
        let mut graph = Graph::new();
        assert_eq!(None, graph.find_source());
        assert_eq!(None, graph.find_target());
        graph.make_single_source_target();
        assert_eq!(0, graph.n_edges());
    }

    #[test]
    fn single_source_target() {
        // two disjoint chains 0 -> 1 and 2 -> 3 plus an isolated vertex 4
        let mut graph = graph_with_vertices(5);
        graph.add_plain_edge(0, 1);
        graph.add_plain_edge(2, 3);
        graph.make_single_source_target();

        let source = graph.source_id.unwrap();
        let target = graph.target_id.unwrap();
        assert_eq!((0, 1), (source, target));
        assert_eq!(5, graph.n_vertices());
        for v in 0..graph.n_vertices() {
            if v != source {
                assert!(graph.in_degree(v) >= 1, "vertex {} has no predecessor", v);
                assert!(graph.path_exists(source, v));
            }
            if v != target {
                assert!(graph.out_degree(v) >= 1, "vertex {} has no successor", v);
                assert!(graph.path_exists(v, target));
            }
        }
    }
}
