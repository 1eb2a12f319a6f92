use eframe::{run_native, App, CreationContext};
use egui::{Context, Style, Visuals};
use egui_graphs::{GraphView, SettingsInteraction, SettingsStyle};
use petgraph::stable_graph::{DefaultIx, StableDiGraph};
use petgraph::Directed;

use crate::cuts::Cut;
use crate::graph::Graph;
use crate::visualization::edge::{CutEdgeShape, EdgeData};
use crate::visualization::node::{Side, VertexData, VertexShape};

type CutView = egui_graphs::Graph<VertexData, EdgeData, Directed, DefaultIx, VertexShape, CutEdgeShape>;

struct CutApp {
    graph: CutView,
}

impl CutApp {
    fn new(graph: &Graph, cut: &Cut, _: &CreationContext<'_>) -> Self {
        Self {
            graph: generate_view(graph, cut),
        }
    }
}

impl App for CutApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        let settings_style = &SettingsStyle::new().with_labels_always(true);
        let interaction_settings = &SettingsInteraction::new()
            .with_dragging_enabled(true)
            .with_node_clicking_enabled(true)
            .with_node_selection_enabled(true);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(
                &mut GraphView::<_, _, _, _, VertexShape, CutEdgeShape>::new(&mut self.graph)
                    .with_styles(settings_style)
                    .with_interactions(interaction_settings),
            );
        });
    }
}

fn generate_view(graph: &Graph, cut: &Cut) -> CutView {
    let mut in_source_set = vec![false; graph.n_vertices()];
    for &v in &cut.source_set {
        in_source_set[v] = true;
    }
    let mut in_cut = vec![false; graph.n_edges()];
    for &e in &cut.cut_set {
        in_cut[e] = true;
    }

    let mut g = StableDiGraph::with_capacity(graph.n_vertices(), graph.n_edges());
    let nodes: Vec<_> = (0..graph.n_vertices())
        .map(|v| {
            let side = if Some(v) == graph.source_id {
                Side::Source
            } else if Some(v) == graph.target_id {
                Side::Target
            } else if in_source_set[v] {
                Side::SourceSet
            } else {
                Side::DestinationSet
            };
            g.add_node(VertexData::new(side))
        })
        .collect();

    for (id, from, to, edge) in graph.edges() {
        g.add_edge(nodes[from], nodes[to], EdgeData::new(in_cut[id], edge.marked));
    }

    egui_graphs::Graph::from(&g)
}

/// Opens a window showing `graph` with `cut` highlighted. Blocks until the window is closed.
pub fn draw_cut(graph: &Graph, cut: &Cut) -> Result<(), eframe::Error> {
    let native_options = eframe::NativeOptions::default();
    let graph = graph.clone();
    let cut = cut.clone();
    run_native(
        "Topological cut",
        native_options,
        Box::new(move |cc| {
            cc.egui_ctx.set_style(Style {
                visuals: Visuals::dark(),
                ..Style::default()
            });
            Box::new(CutApp::new(&graph, &cut, cc))
        }),
    )
}
