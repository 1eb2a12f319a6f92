use eframe::emath::{Pos2, Vec2};
use eframe::epaint::{CircleShape, FontFamily, FontId, Shape, Stroke, TextShape};
use egui::Color32;
use egui_graphs::{DisplayNode, DrawContext, NodeProps};
use petgraph::stable_graph::IndexType;
use petgraph::EdgeType;

pub(crate) trait CutSide {
    fn side(&self) -> Side;
}

/// Where a vertex ended up relative to the cut.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Source,
    Target,
    SourceSet,
    DestinationSet,
}

#[derive(Clone, Debug)]
pub(crate) struct VertexData {
    side: Side,
}

impl VertexData {
    pub(crate) fn new(side: Side) -> Self {
        Self { side }
    }
}

impl CutSide for VertexData {
    fn side(&self) -> Side {
        self.side
    }
}

fn side_color(side: Side, is_interacted: bool) -> Color32 {
    match (side, is_interacted) {
        (Side::Source, false) => Color32::from_rgb(0x50, 0x50, 0xFF),
        (Side::Source, true) => Color32::from_rgb(0x90, 0x90, 0xFF),
        (Side::SourceSet, false) => Color32::from_rgb(0x80, 0xB0, 0xFF),
        (Side::SourceSet, true) => Color32::from_rgb(0xB0, 0xD0, 0xFF),
        (Side::Target, false) => Color32::from_rgb(0xFF, 0x50, 0x50),
        (Side::Target, true) => Color32::from_rgb(0xFF, 0x90, 0x90),
        (Side::DestinationSet, false) => Color32::from_rgb(0xFF, 0xA0, 0x80),
        (Side::DestinationSet, true) => Color32::from_rgb(0xFF, 0xC8, 0xB0),
    }
}

#[derive(Clone)]
pub(crate) struct VertexShape {
    pos: Pos2,
    label_text: String,
    selected: bool,
    dragged: bool,

    radius: f32,
    side: Side,
}

impl<N: Clone + CutSide> From<NodeProps<N>> for VertexShape {
    fn from(node_props: NodeProps<N>) -> Self {
        let side = node_props.payload.side();
        let radius = match side {
            Side::Source | Side::Target => 8.0,
            Side::SourceSet | Side::DestinationSet => 5.0,
        };
        Self {
            pos: node_props.location,
            label_text: node_props.label.to_string(),
            selected: node_props.selected,
            dragged: node_props.dragged,
            radius,
            side,
        }
    }
}

impl<N: Clone + CutSide, E: Clone, Ty: EdgeType, Ix: IndexType> DisplayNode<N, E, Ty, Ix>
    for VertexShape
{
    fn closest_boundary_point(&self, dir: Vec2) -> Pos2 {
        self.pos + dir.normalized() * self.radius
    }

    fn shapes(&mut self, ctx: &DrawContext) -> Vec<Shape> {
        let color = side_color(self.side, self.selected || self.dragged);
        let center = ctx.meta.canvas_to_screen_pos(self.pos);
        let radius = ctx.meta.canvas_to_screen_size(self.radius);

        let circle = CircleShape {
            center,
            radius,
            fill: color,
            stroke: Stroke::default(),
        };

        let galley = ctx.ctx.fonts(|f| {
            f.layout_no_wrap(
                self.label_text.clone(),
                FontId::new(radius, FontFamily::Monospace),
                Color32::BLACK,
            )
        });
        // centered on the vertex
        let label_pos = Pos2::new(
            center.x - galley.size().x / 2.,
            center.y - galley.size().y / 2.,
        );
        let label = TextShape::new(label_pos, galley, Color32::BLACK);

        vec![circle.into(), label.into()]
    }

    fn update(&mut self, state: &NodeProps<N>) {
        self.pos = state.location;
        self.label_text = state.label.to_string();
        self.selected = state.selected;
        self.dragged = state.dragged;
    }

    fn is_inside(&self, pos: Pos2) -> bool {
        (pos - self.pos).length() <= self.radius
    }
}
