//! Interactive viewer for a graph and one of its cuts.

mod app;
mod edge;
mod node;

pub use app::draw_cut;
