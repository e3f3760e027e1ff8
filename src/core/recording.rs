// In-memory surface that records every call.
//
// Used by tests to inspect what a frame drew, and by the headless runner to
// turn a frame into SVG.

use crate::color::Rgba;
use crate::geometry::{CanvasSize, Point};
use crate::render::{Paint, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear(CanvasSize),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Circle { center: Point, radius: f64 },
    SetLineWidth(f64),
    SetStroke(Rgba),
    SetFill(Paint),
    Stroke,
    Fill,
}

/// A shape resolved from the op log: the path that was current when a
/// `stroke` or `fill` ran, with the style in effect at that moment.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
    Disc {
        center: Point,
        radius: f64,
        paint: Paint,
    },
    Ring {
        center: Point,
        radius: f64,
        color: Rgba,
        width: f64,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Canvas size from the most recent `clear`, if any.
    pub fn canvas(&self) -> Option<CanvasSize> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::Clear(size) => Some(*size),
            _ => None,
        })
    }

    /// Replay the log into concrete shapes, in paint order.
    ///
    /// Only the path forms the renderer emits are understood: one segment
    /// (`move_to` + `line_to`) or one circle.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut shapes = Vec::new();
        let mut stroke = Rgba {
            rgb: crate::color::Rgb::BLACK,
            a: 1.0,
        };
        let mut fill = Paint::Solid(stroke);
        let mut width = 1.0;
        let mut start = None;
        let mut segment = None;
        let mut circle = None;

        for op in &self.ops {
            match op {
                DrawOp::Clear(_) => shapes.clear(),
                DrawOp::BeginPath => {
                    start = None;
                    segment = None;
                    circle = None;
                }
                DrawOp::MoveTo(p) => start = Some(*p),
                DrawOp::LineTo(p) => {
                    if let Some(a) = start {
                        segment = Some((a, *p));
                    }
                }
                DrawOp::Circle { center, radius } => circle = Some((*center, *radius)),
                DrawOp::SetLineWidth(w) => width = *w,
                DrawOp::SetStroke(c) => stroke = *c,
                DrawOp::SetFill(p) => fill = p.clone(),
                DrawOp::Stroke => {
                    if let Some((from, to)) = segment {
                        shapes.push(Shape::Line {
                            from,
                            to,
                            color: stroke,
                            width,
                        });
                    } else if let Some((center, radius)) = circle {
                        shapes.push(Shape::Ring {
                            center,
                            radius,
                            color: stroke,
                            width,
                        });
                    }
                }
                DrawOp::Fill => {
                    if let Some((center, radius)) = circle {
                        shapes.push(Shape::Disc {
                            center,
                            radius,
                            paint: fill.clone(),
                        });
                    }
                }
            }
        }
        shapes
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: CanvasSize) {
        self.ops.push(DrawOp::Clear(size));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.ops.push(DrawOp::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.ops.push(DrawOp::LineTo(p));
    }

    fn circle(&mut self, center: Point, radius: f64) {
        self.ops.push(DrawOp::Circle { center, radius });
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::SetLineWidth(width));
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ops.push(DrawOp::SetStroke(color));
    }

    fn set_fill(&mut self, paint: &Paint) {
        self.ops.push(DrawOp::SetFill(paint.clone()));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn shapes_resolve_current_style() {
        let mut s = RecordingSurface::new();
        s.clear(CanvasSize::new(100.0, 100.0));
        s.begin_path();
        s.move_to(Point::new(0.0, 0.0));
        s.line_to(Point::new(10.0, 0.0));
        s.set_stroke(Rgb::WHITE.with_alpha(0.5));
        s.set_line_width(2.0);
        s.stroke();

        s.begin_path();
        s.circle(Point::new(5.0, 5.0), 3.0);
        s.set_fill(&Paint::Solid(Rgb::BLACK.with_alpha(1.0)));
        s.fill();
        s.stroke();

        let shapes = s.shapes();
        assert_eq!(shapes.len(), 3);
        assert!(matches!(shapes[0], Shape::Line { width, .. } if width == 2.0));
        assert!(matches!(shapes[1], Shape::Disc { radius, .. } if radius == 3.0));
        assert!(matches!(shapes[2], Shape::Ring { .. }));
        assert_eq!(s.canvas(), Some(CanvasSize::new(100.0, 100.0)));
    }
}
