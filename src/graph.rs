use std::fmt;
use std::fs;
use std::path::Path;

use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

mod dataflow;
mod generate;
mod normalize;

pub use dataflow::convert_to_simple_data_flow;
pub use generate::{generate_dag, generate_dag_ss};

pub type VertexId = usize;
pub type EdgeId = usize;

/// Cost carried by a vertex of a workflow DAG.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vertex {
    pub time: f64,
    pub memory: f64,
}

/// A directed edge payload. Marked ("red") edges count against the budget of a p-cut.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub weight: f64,
    pub marked: bool,
}

impl Default for Edge {
    fn default() -> Self {
        Self {
            weight: 1.0,
            marked: false,
        }
    }
}

type Storage = petgraph::Graph<Vertex, Edge, Directed, usize>;

/// Append-only directed graph with dense vertex and edge ids.
///
/// The graph is expected to be acyclic; nothing checks it.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    inner: Storage,
    pub source_id: Option<VertexId>,
    pub target_id: Option<VertexId>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            inner: Storage::with_capacity(vertices, edges),
            source_id: None,
            target_id: None,
        }
    }

    pub fn add_vertex(&mut self, time: f64, memory: f64) -> VertexId {
        self.inner.add_node(Vertex { time, memory }).index()
    }

    /// Adds `from -> to`. Both endpoints must already exist.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId, weight: f64, marked: bool) -> EdgeId {
        self.inner
            .add_edge(NodeIndex::new(from), NodeIndex::new(to), Edge { weight, marked })
            .index()
    }

    /// Adds an unmarked edge of weight 1.
    pub fn add_plain_edge(&mut self, from: VertexId, to: VertexId) -> EdgeId {
        let Edge { weight, marked } = Edge::default();
        self.add_edge(from, to, weight, marked)
    }

    pub fn n_vertices(&self) -> usize {
        self.inner.node_count()
    }

    pub fn n_edges(&self) -> usize {
        self.inner.edge_count()
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.inner[NodeIndex::new(id)]
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex {
        &mut self.inner[NodeIndex::new(id)]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.inner[EdgeIndex::new(id)]
    }

    pub fn edge_endpoints(&self, id: EdgeId) -> (VertexId, VertexId) {
        let edge = &self.inner.raw_edges()[id];
        (edge.source().index(), edge.target().index())
    }

    /// Edges in id order as `(id, from, to, payload)`.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, VertexId, VertexId, &Edge)> + '_ {
        self.inner
            .raw_edges()
            .iter()
            .enumerate()
            .map(|(id, edge)| (id, edge.source().index(), edge.target().index(), &edge.weight))
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &Vertex)> + '_ {
        self.inner
            .raw_nodes()
            .iter()
            .enumerate()
            .map(|(id, node)| (id, &node.weight))
    }

    pub fn outgoing_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.adjacent_edges(vertex, Direction::Outgoing)
    }

    pub fn incoming_edges(&self, vertex: VertexId) -> impl Iterator<Item = EdgeId> + '_ {
        self.adjacent_edges(vertex, Direction::Incoming)
    }

    fn adjacent_edges(
        &self,
        vertex: VertexId,
        direction: Direction,
    ) -> impl Iterator<Item = EdgeId> + '_ {
        self.inner
            .edges_directed(NodeIndex::new(vertex), direction)
            .map(|edge| edge.id().index())
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.outgoing_edges(vertex).count()
    }

    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.incoming_edges(vertex).count()
    }

    /// Whether `b` can be reached from `a` through at least one edge.
    pub fn path_exists(&self, a: VertexId, b: VertexId) -> bool {
        let mut seen = vec![false; self.n_vertices()];
        let mut stack = vec![a];
        seen[a] = true;

        // iterative DFS, stops as soon as b is hit by an outgoing edge
        while let Some(vertex) = stack.pop() {
            for next in self.inner.neighbors(NodeIndex::new(vertex)) {
                let next = next.index();
                if next == b {
                    return true;
                }
                if !seen[next] {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }

        false
    }

    /// Edge list in DOT syntax, one line per edge.
    pub fn to_dot_string(&self) -> String {
        let lines = self
            .inner
            .edge_references()
            .map(|edge| {
                let payload = edge.weight();
                format!(
                    "{} -> {} [id={}, weight={}, red={}];",
                    edge.source().index(),
                    edge.target().index(),
                    edge.id().index(),
                    payload.weight,
                    u8::from(payload.marked),
                )
            })
            .join("\n");
        if lines.is_empty() {
            "strict digraph {\n}\n".to_string()
        } else {
            format!("strict digraph {{\n{lines}\n}}\n")
        }
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, self.to_dot_string())
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_string())
    }
}
