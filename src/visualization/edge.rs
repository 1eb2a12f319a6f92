use eframe::emath::{Pos2, Vec2};
use eframe::epaint::Shape;
use egui::{Color32, Stroke};
use egui_graphs::{DisplayEdge, DisplayNode, DrawContext, EdgeProps, Node};
use petgraph::stable_graph::IndexType;
use petgraph::EdgeType;

pub(crate) trait CutMembership {
    fn is_cut(&self) -> bool;
    fn is_marked(&self) -> bool;
}

#[derive(Clone, Debug)]
pub(crate) struct EdgeData {
    is_cut: bool,
    marked: bool,
}

impl EdgeData {
    pub(crate) fn new(is_cut: bool, marked: bool) -> Self {
        Self { is_cut, marked }
    }
}

impl CutMembership for EdgeData {
    fn is_cut(&self) -> bool {
        self.is_cut
    }

    fn is_marked(&self) -> bool {
        self.marked
    }
}

const CUT: Color32 = Color32::from_rgb(0x90, 0xEE, 0x90);

/// Straight arrow; cut edges are green, marked edges are drawn wider.
#[derive(Clone)]
pub(crate) struct CutEdgeShape {
    selected: bool,
    width: f32,
    tip_size: f32,
    tip_angle: f32,
    is_cut: bool,
}

impl<E: Clone + CutMembership> From<EdgeProps<E>> for CutEdgeShape {
    fn from(edge_props: EdgeProps<E>) -> Self {
        Self {
            selected: edge_props.selected,
            width: if edge_props.payload.is_marked() { 4. } else { 2. },
            tip_size: 12.5,
            tip_angle: std::f32::consts::TAU / 30.,
            is_cut: edge_props.payload.is_cut(),
        }
    }
}

impl<N, E, Ty, Ix, D> DisplayEdge<N, E, Ty, Ix, D> for CutEdgeShape
where
    N: Clone,
    E: Clone + CutMembership,
    Ty: EdgeType,
    Ix: IndexType,
    D: DisplayNode<N, E, Ty, Ix>,
{
    fn shapes(
        &mut self,
        start_node: &Node<N, E, Ty, Ix, D>,
        end_node: &Node<N, E, Ty, Ix, D>,
        ctx: &DrawContext,
    ) -> Vec<Shape> {
        let color = if self.is_cut {
            CUT
        } else if self.selected {
            ctx.ctx.style().visuals.widgets.active.fg_stroke.color
        } else {
            ctx.ctx.style().visuals.widgets.inactive.fg_stroke.color
        };
        let stroke = Stroke::new(ctx.meta.canvas_to_screen_size(self.width), color);

        let dir = (end_node.location() - start_node.location()).normalized();
        let start = start_node.display().closest_boundary_point(dir);
        let end = end_node.display().closest_boundary_point(-dir);

        // the line stops where the arrow tip begins
        let tip_base = end - self.tip_size * dir;
        let tip = [
            end,
            end - rotate(dir, self.tip_angle) * self.tip_size,
            end - rotate(dir, -self.tip_angle) * self.tip_size,
        ]
        .map(|p| ctx.meta.canvas_to_screen_pos(p))
        .to_vec();

        vec![
            Shape::line_segment(
                [
                    ctx.meta.canvas_to_screen_pos(start),
                    ctx.meta.canvas_to_screen_pos(tip_base),
                ],
                stroke,
            ),
            Shape::convex_polygon(tip, color, Stroke::default()),
        ]
    }

    fn update(&mut self, state: &EdgeProps<E>) {
        self.selected = state.selected;
        self.is_cut = state.payload.is_cut();
    }

    fn is_inside(
        &self,
        start: &Node<N, E, Ty, Ix, D>,
        end: &Node<N, E, Ty, Ix, D>,
        pos: Pos2,
    ) -> bool {
        distance_to_segment(start.location(), end.location(), pos) <= self.width
    }
}

fn distance_to_segment(a: Pos2, b: Pos2, point: Pos2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_sq();
    if length_sq == 0.0 {
        return (point - a).length();
    }
    let t = ((point - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    (point - (a + t * ab)).length()
}

fn rotate(vec: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(cos * vec.x - sin * vec.y, sin * vec.x + cos * vec.y)
}
