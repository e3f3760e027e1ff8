//! Per-frame drawing and hover detection.
//!
//! The renderer talks to the host through [`Surface`], a small subset of the
//! canvas 2D API. Hover hit-testing runs inside the same pass, so the frame
//! output always describes what was just drawn.

use crate::color::{hex_to_rgb, Rgb, Rgba};
use crate::config::NetworkConfig;
use crate::geometry::{is_point_near_segment, CanvasSize, Point};
use crate::topology::{Edge, Node, Topology};

pub const GRID_SPACING: f64 = 20.0;
pub const GRID_COLOR: Rgba = Rgba {
    rgb: Rgb::WHITE,
    a: 0.05,
};
/// Max distance from an edge's line that still counts as hovering it.
pub const EDGE_HOVER_THRESHOLD: f64 = 10.0;
/// Extra hover radius around a node disc.
pub const NODE_HOVER_PADDING: f64 = 5.0;
/// Node activation above which the outer glow is drawn.
pub const GLOW_THRESHOLD: f64 = 0.1;
/// Tooltip size assumed when the host cannot measure the element.
pub const DEFAULT_TOOLTIP_SIZE: (f64, f64) = (200.0, 40.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Two-circle radial gradient, as in `createRadialGradient`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub inner: Point,
    pub inner_radius: f64,
    pub outer: Point,
    pub outer_radius: f64,
    pub stops: [ColorStop; 2],
}

impl RadialGradient {
    fn centered(center: Point, inner_radius: f64, outer_radius: f64, from: Rgba, to: Rgba) -> Self {
        Self {
            inner: center,
            inner_radius,
            outer: center,
            outer_radius,
            stops: [
                ColorStop {
                    offset: 0.0,
                    color: from,
                },
                ColorStop {
                    offset: 1.0,
                    color: to,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Radial(RadialGradient),
}

/// Drawing primitives the renderer needs from the host.
///
/// Paths follow canvas semantics: `begin_path` starts a new path, `fill` and
/// `stroke` use the current path and the most recently set style.
pub trait Surface {
    fn clear(&mut self, size: CanvasSize);
    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    /// Full circle.
    fn circle(&mut self, center: Point, radius: f64);
    fn set_line_width(&mut self, width: f64);
    fn set_stroke(&mut self, color: Rgba);
    fn set_fill(&mut self, paint: &Paint);
    fn stroke(&mut self);
    fn fill(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Input,
    Hidden,
    Output,
}

impl LayerKind {
    pub fn of(layer: usize, layer_count: usize) -> Self {
        if layer == 0 {
            LayerKind::Input
        } else if layer + 1 == layer_count {
            LayerKind::Output
        } else {
            LayerKind::Hidden
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LayerKind::Input => "Input",
            LayerKind::Hidden => "Hidden",
            LayerKind::Output => "Output",
        }
    }
}

/// Snapshot of the entity under the pointer. Holds values, not references,
/// so it stays valid across a topology rebuild.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverTarget {
    Node {
        layer: usize,
        index: usize,
        kind: LayerKind,
        activation: f64,
        anchor: Point,
    },
    Edge {
        weight: f64,
        signal_active: bool,
        anchor: Point,
    },
}

impl HoverTarget {
    fn node(node: &Node, layer_count: usize) -> Self {
        HoverTarget::Node {
            layer: node.layer,
            index: node.index,
            kind: LayerKind::of(node.layer, layer_count),
            activation: node.activation,
            anchor: node.pos,
        }
    }

    fn edge(edge: &Edge, a: Point, b: Point) -> Self {
        HoverTarget::Edge {
            weight: edge.weight(),
            signal_active: edge.signal_active,
            anchor: a.midpoint(b),
        }
    }

    /// Point the tooltip is placed against.
    pub fn anchor(&self) -> Point {
        match self {
            HoverTarget::Node { anchor, .. } | HoverTarget::Edge { anchor, .. } => *anchor,
        }
    }

    pub fn tooltip_lines(&self) -> Vec<String> {
        match self {
            HoverTarget::Node {
                kind, activation, ..
            } => vec![
                format!("{} Layer Node", kind.label()),
                format!("Activation: {:.0}%", activation * 100.0),
            ],
            HoverTarget::Edge {
                weight,
                signal_active,
                ..
            } => vec![
                "Connection".to_string(),
                format!("Weight: {weight:.2}"),
                format!(
                    "Signal: {}",
                    if *signal_active { "Active" } else { "Inactive" }
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub lines: Vec<String>,
    pub left: f64,
    pub top: f64,
}

/// What the host needs after a frame: cursor style and tooltip state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    pub hover: Option<HoverTarget>,
    pub cursor: Cursor,
    pub tooltip: Option<Tooltip>,
}

/// Top-left corner for a tooltip of `size` anchored at `anchor`.
///
/// Sits up and to the right of the anchor, flipping to the left side or below
/// the anchor near the right and top edges. The result never leaves the canvas.
pub fn place_tooltip(anchor: Point, size: (f64, f64), canvas: CanvasSize) -> (f64, f64) {
    let (w, h) = size;
    let mut x = anchor.x + 10.0;
    let mut y = anchor.y - 10.0;

    if x + w > canvas.width {
        x = (anchor.x - w - 10.0).max(0.0);
    }
    if y < h {
        y = anchor.y + 20.0;
    } else if y + h > canvas.height {
        y = canvas.height - h;
    }

    let x = x.min(canvas.width - w).max(0.0);
    let y = y.min(canvas.height - h).max(0.0);
    (x, y)
}

/// Stateless renderer; everything it draws comes from `topology` and `config`.
pub struct Renderer<'a> {
    pub topology: &'a Topology,
    pub config: &'a NetworkConfig,
    pub pointer: Option<Point>,
    pub tooltip_size: (f64, f64),
}

impl<'a> Renderer<'a> {
    pub fn new(topology: &'a Topology, config: &'a NetworkConfig) -> Self {
        Self {
            topology,
            config,
            pointer: None,
            tooltip_size: DEFAULT_TOOLTIP_SIZE,
        }
    }

    pub fn with_pointer(mut self, pointer: Option<Point>) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn with_tooltip_size(mut self, size: (f64, f64)) -> Self {
        self.tooltip_size = size;
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> FrameOutput {
        let canvas = self.topology.canvas();
        surface.clear(canvas);
        draw_grid(surface, canvas);

        let node_rgb = hex_to_rgb(&self.config.node_color);
        let edge_rgb = hex_to_rgb(&self.config.edge_color);
        let glow = self.config.glow_intensity;

        let mut hover = None;

        for edge in self.topology.edges() {
            let (a, b) = self.topology.endpoints(edge);
            self.draw_edge(surface, edge, a, b, node_rgb, edge_rgb, glow);

            if let Some(p) = self.pointer {
                if is_point_near_segment(p, a, b, EDGE_HOVER_THRESHOLD) {
                    hover = Some(HoverTarget::edge(edge, a, b));
                }
            }
        }

        let layer_count = self.topology.layer_count();
        for node in self.topology.nodes() {
            draw_node(surface, node, node_rgb, glow);

            // Nodes are tested after edges and overwrite any edge hit.
            if let Some(p) = self.pointer {
                if p.distance(node.pos) <= node.radius + NODE_HOVER_PADDING {
                    hover = Some(HoverTarget::node(node, layer_count));
                }
            }
        }

        let tooltip = hover.as_ref().map(|h| {
            let (left, top) = place_tooltip(h.anchor(), self.tooltip_size, canvas);
            Tooltip {
                lines: h.tooltip_lines(),
                left,
                top,
            }
        });

        FrameOutput {
            cursor: if hover.is_some() {
                Cursor::Pointer
            } else {
                Cursor::Default
            },
            hover,
            tooltip,
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_edge(
        &self,
        surface: &mut dyn Surface,
        edge: &Edge,
        a: Point,
        b: Point,
        node_rgb: Rgb,
        edge_rgb: Rgb,
        glow: f64,
    ) {
        let width = if edge.weight() > 0.0 {
            1.0 + edge.weight()
        } else {
            0.5
        };

        surface.begin_path();
        surface.move_to(a);
        surface.line_to(b);
        surface.set_stroke(edge_rgb.with_alpha(0.3));
        surface.set_line_width(width);
        surface.stroke();

        if !edge.signal_active {
            return;
        }

        surface.begin_path();
        surface.move_to(a);
        surface.line_to(b);
        surface.set_stroke(node_rgb.with_alpha(0.3));
        surface.set_line_width(width * 2.0);
        surface.stroke();

        let pos = self.topology.signal_position(edge);
        let radius = 10.0 * glow;
        surface.set_fill(&Paint::Radial(RadialGradient::centered(
            pos,
            0.0,
            radius,
            node_rgb.with_alpha(0.8),
            node_rgb.with_alpha(0.0),
        )));
        surface.begin_path();
        surface.circle(pos, radius);
        surface.fill();
    }
}

fn draw_grid(surface: &mut dyn Surface, canvas: CanvasSize) {
    surface.set_stroke(GRID_COLOR);
    surface.set_line_width(1.0);

    let mut x = 0.0;
    while x <= canvas.width {
        surface.begin_path();
        surface.move_to(Point::new(x, 0.0));
        surface.line_to(Point::new(x, canvas.height));
        surface.stroke();
        x += GRID_SPACING;
    }

    let mut y = 0.0;
    while y <= canvas.height {
        surface.begin_path();
        surface.move_to(Point::new(0.0, y));
        surface.line_to(Point::new(canvas.width, y));
        surface.stroke();
        y += GRID_SPACING;
    }
}

fn draw_node(surface: &mut dyn Surface, node: &Node, rgb: Rgb, glow: f64) {
    let (pos, r, a) = (node.pos, node.radius, node.activation);

    if a > GLOW_THRESHOLD {
        let glow_radius = r * (1.5 + a * glow);
        surface.set_fill(&Paint::Radial(RadialGradient::centered(
            pos,
            r,
            glow_radius,
            rgb.with_alpha(0.3 * a),
            rgb.with_alpha(0.0),
        )));
        surface.begin_path();
        surface.circle(pos, glow_radius);
        surface.fill();
    }

    surface.begin_path();
    surface.circle(pos, r);
    surface.set_fill(&Paint::Solid(rgb.with_alpha(0.2 + a * 0.8)));
    surface.fill();

    // Highlight offset toward the upper-left reads as a lit sphere.
    let highlight = RadialGradient {
        inner: Point::new(pos.x - r * 0.3, pos.y - r * 0.3),
        inner_radius: 0.0,
        outer: pos,
        outer_radius: r,
        stops: [
            ColorStop {
                offset: 0.0,
                color: Rgb::WHITE.with_alpha(0.3 * a),
            },
            ColorStop {
                offset: 1.0,
                color: rgb.with_alpha(0.0),
            },
        ],
    };
    surface.set_fill(&Paint::Radial(highlight));
    surface.fill();

    surface.set_line_width(1.5);
    surface.set_stroke(rgb.with_alpha(0.7 + 0.3 * a));
    surface.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::Prng;
    use crate::recording::{DrawOp, RecordingSurface};

    fn setup() -> (Topology, NetworkConfig) {
        let t = Topology::build(3, 5, CanvasSize::new(800.0, 600.0), &mut Prng::new(8));
        (t, NetworkConfig::default())
    }

    #[test]
    fn node_hover_boundary_is_inclusive() {
        let (t, cfg) = setup();
        let node = t.layer_nodes(0)[0].clone();
        let mut surface = RecordingSurface::new();

        // Exactly radius + 5 to the left, away from any edge.
        let p = Point::new(node.pos.x - (node.radius + NODE_HOVER_PADDING), node.pos.y);
        let out = Renderer::new(&t, &cfg)
            .with_pointer(Some(p))
            .draw(&mut surface);
        assert_eq!(out.cursor, Cursor::Pointer);
        assert!(matches!(
            out.hover,
            Some(HoverTarget::Node {
                layer: 0,
                index: 0,
                kind: LayerKind::Input,
                ..
            })
        ));

        let p = Point::new(p.x - 0.01, p.y);
        let out = Renderer::new(&t, &cfg)
            .with_pointer(Some(p))
            .draw(&mut surface);
        assert_eq!(out.hover, None);
        assert_eq!(out.cursor, Cursor::Default);
        assert_eq!(out.tooltip, None);
    }

    #[test]
    fn edge_hover_reports_midpoint_and_weight() {
        let (t, cfg) = setup();
        // (200,150) -> (400,100); no other edge or node comes within range of its midpoint.
        let e = &t.edges()[0];
        let (a, b) = t.endpoints(e);
        let mid = a.midpoint(b);

        let out = Renderer::new(&t, &cfg)
            .with_pointer(Some(mid))
            .draw(&mut RecordingSurface::new());
        assert_eq!(
            out.hover,
            Some(HoverTarget::Edge {
                weight: e.weight(),
                signal_active: false,
                anchor: mid,
            })
        );
        assert_eq!(out.cursor, Cursor::Pointer);
        let tip = out.tooltip.unwrap();
        assert_eq!(tip.lines[0], "Connection");
        assert!(tip.lines[1].starts_with("Weight: "));
        assert_eq!(tip.lines[2], "Signal: Inactive");
    }

    #[test]
    fn nodes_override_edges() {
        let (t, cfg) = setup();
        // A node center lies on all of its edges' lines.
        let node = t.layer_nodes(1)[2].clone();
        let out = Renderer::new(&t, &cfg)
            .with_pointer(Some(node.pos))
            .draw(&mut RecordingSurface::new());
        assert!(matches!(
            out.hover,
            Some(HoverTarget::Node {
                layer: 1,
                index: 2,
                kind: LayerKind::Hidden,
                ..
            })
        ));
    }

    #[test]
    fn node_tooltip_text() {
        let h = HoverTarget::Node {
            layer: 2,
            index: 0,
            kind: LayerKind::of(2, 3),
            activation: 0.456,
            anchor: Point::new(0.0, 0.0),
        };
        assert_eq!(
            h.tooltip_lines(),
            vec!["Output Layer Node".to_string(), "Activation: 46%".to_string()]
        );
    }

    #[test]
    fn tooltip_stays_inside_canvas() {
        let canvas = CanvasSize::new(800.0, 600.0);
        let size = DEFAULT_TOOLTIP_SIZE;

        // Normal placement.
        assert_eq!(place_tooltip(Point::new(100.0, 300.0), size, canvas), (110.0, 290.0));
        // Right edge: flips to the left of the anchor.
        assert_eq!(place_tooltip(Point::new(700.0, 300.0), size, canvas), (490.0, 290.0));
        // Top edge: drops below the anchor.
        assert_eq!(place_tooltip(Point::new(100.0, 20.0), size, canvas), (110.0, 40.0));
        // Bottom edge.
        assert_eq!(place_tooltip(Point::new(100.0, 595.0), size, canvas), (110.0, 560.0));

        for &(x, y) in &[(0.0, 0.0), (800.0, 600.0), (799.0, 1.0), (1.0, 599.0)] {
            let (l, t) = place_tooltip(Point::new(x, y), size, canvas);
            assert!(l >= 0.0 && l + size.0 <= canvas.width);
            assert!(t >= 0.0 && t + size.1 <= canvas.height);
        }
    }

    #[test]
    fn grid_on_oversized_canvas_is_bounded() {
        let t = Topology::build(2, 2, CanvasSize::new(2e6, 2e6), &mut Prng::new(8));
        let cfg = NetworkConfig::default();
        let mut surface = RecordingSurface::new();
        Renderer::new(&t, &cfg).draw(&mut surface);

        let lines = (CanvasSize::MAX_DIM / GRID_SPACING) as usize + 1;
        let grid_strokes = surface
            .ops()
            .iter()
            .take_while(|op| !matches!(op, DrawOp::SetStroke(c) if *c != GRID_COLOR))
            .filter(|op| matches!(op, DrawOp::Stroke))
            .count();
        assert_eq!(grid_strokes, 2 * lines);
    }

    #[test]
    fn draw_order_grid_edges_nodes() {
        let (mut t, cfg) = setup();
        t.edges_mut()[0].fire();
        t.edges_mut()[0].animation_progress = 0.5;
        t.set_activation(0, 0, 1.0);
        t.sync_nodes();

        let mut surface = RecordingSurface::new();
        Renderer::new(&t, &cfg).draw(&mut surface);
        let ops = surface.ops();

        assert!(matches!(ops[0], DrawOp::Clear(_)));
        // 41 vertical + 31 horizontal grid lines on 800x600.
        let grid_strokes = ops
            .iter()
            .take_while(|op| !matches!(op, DrawOp::SetStroke(c) if *c != GRID_COLOR))
            .filter(|op| matches!(op, DrawOp::Stroke))
            .count();
        assert_eq!(grid_strokes, 41 + 31);

        // One pulse for the signal, one glow for the active node, plus one highlight per node.
        let radial = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::SetFill(Paint::Radial(_))))
            .count();
        assert_eq!(radial, 1 + 1 + t.nodes().len());

        let pulse = ops
            .iter()
            .find_map(|op| match op {
                DrawOp::SetFill(Paint::Radial(g)) => Some(g.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(pulse.outer_radius, 10.0 * cfg.glow_intensity);
        assert_eq!(pulse.inner, t.signal_position(&t.edges()[0]));
    }

    #[test]
    fn malformed_colors_render_black() {
        let (t, _) = setup();
        let cfg = NetworkConfig::default().with_colors("notacolor", "#zzzzzz");
        let mut surface = RecordingSurface::new();
        Renderer::new(&t, &cfg).draw(&mut surface);
        assert!(surface.ops().iter().any(|op| matches!(
            op,
            DrawOp::SetFill(Paint::Solid(c)) if c.rgb == Rgb::BLACK
        )));
    }
}
