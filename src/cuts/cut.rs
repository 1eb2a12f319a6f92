use crate::graph::{EdgeId, Graph, VertexId};

/// A topological cut `(S, T)` together with the edges going from `S` to `T`.
#[derive(Clone, Debug)]
pub struct Cut {
    pub source_set: Vec<VertexId>,
    pub destination_set: Vec<VertexId>,
    pub cut_set: Vec<EdgeId>,
    /// Total weight of `cut_set`.
    pub value: f64,
    /// Number of marked edges in `cut_set`.
    pub marked: usize,
}

impl Cut {
    /// Builds the cut induced by `in_source_set`, a per-vertex membership of `S`.
    pub fn from_membership(graph: &Graph, in_source_set: &[bool]) -> Self {
        let (source_set, destination_set): (Vec<VertexId>, Vec<VertexId>) =
            (0..graph.n_vertices()).partition(|&v| in_source_set[v]);

        let mut cut_set = vec![];
        let mut value = 0.0;
        let mut marked = 0;
        for (id, from, to, edge) in graph.edges() {
            if in_source_set[from] && !in_source_set[to] {
                cut_set.push(id);
                value += edge.weight;
                if edge.marked {
                    marked += 1;
                }
            }
        }

        Self {
            source_set,
            destination_set,
            cut_set,
            value,
            marked,
        }
    }

    pub fn size(&self) -> usize {
        self.cut_set.len()
    }

    /// Whether no edge goes from the destination set back into the source set.
    pub fn is_topological(&self, graph: &Graph) -> bool {
        let mut in_source_set = vec![false; graph.n_vertices()];
        for &v in &self.source_set {
            in_source_set[v] = true;
        }
        graph
            .edges()
            .all(|(_, from, to, _)| in_source_set[from] || !in_source_set[to])
    }

    /// Whether the cut separates `graph`'s designated source from its designated target.
    pub fn separates(&self, graph: &Graph) -> bool {
        match (graph.source_id, graph.target_id) {
            (Some(source), Some(target)) => {
                self.source_set.contains(&source) && self.destination_set.contains(&target)
            }
            _ => false,
        }
    }
}

impl PartialEq for Cut {
    fn eq(&self, other: &Self) -> bool {
        self.source_set == other.source_set
            && self.destination_set == other.destination_set
            && self.cut_set == other.cut_set
    }
}

#[cfg(test)]
mod tests {
    use super::Cut;
    use crate::graph::Graph;

    fn chain() -> Graph {
        let mut graph = Graph::new();
        for _ in 0..4 {
            graph.add_vertex(0.0, 0.0);
        }
        graph.add_edge(0, 1, 1.0, false);
        graph.add_edge(1, 2, 2.0, true);
        graph.add_edge(2, 3, 3.0, false);
        graph.source_id = Some(0);
        graph.target_id = Some(3);
        graph
    }

    #[test]
    fn membership_cut() {
        let graph = chain();
        let cut = Cut::from_membership(&graph, &[true, true, false, false]);
        assert_eq!(vec![0, 1], cut.source_set);
        assert_eq!(vec![2, 3], cut.destination_set);
        assert_eq!(vec![1], cut.cut_set);
        assert_eq!(2.0, cut.value);
        assert_eq!(1, cut.marked);
        assert_eq!(1, cut.size());
        assert!(cut.is_topological(&graph));
        assert!(cut.separates(&graph));
    }

    #[test]
    fn backward_edges_are_not_topological() {
        let graph = chain();
        let cut = Cut::from_membership(&graph, &[true, false, true, false]);
        assert!(!cut.is_topological(&graph));
        // only forward crossings count
        assert_eq!(vec![0, 2], cut.cut_set);
        assert_eq!(4.0, cut.value);
    }
}
