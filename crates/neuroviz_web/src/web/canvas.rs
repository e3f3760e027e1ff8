use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use neuroviz::color::Rgba;
use neuroviz::geometry::{CanvasSize, Point};
use neuroviz::render::{Paint, RadialGradient, Surface};

/// [`Surface`] backed by a 2d canvas context.
pub(super) struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(super) fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "canvas: get_context threw".to_string())?
            .ok_or("canvas: missing 2d context".to_string())?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "canvas: context is not 2d".to_string())?;
        Ok(Self { ctx })
    }

    #[allow(deprecated)]
    fn set_gradient(&mut self, g: &RadialGradient) {
        let gradient = match self.ctx.create_radial_gradient(
            g.inner.x,
            g.inner.y,
            g.inner_radius,
            g.outer.x,
            g.outer.y,
            g.outer_radius,
        ) {
            Ok(gradient) => gradient,
            Err(_) => {
                // Degenerate radii; fall back to the inner color.
                self.ctx.set_fill_style_str(&g.stops[0].color.to_string());
                return;
            }
        };
        for stop in &g.stops {
            let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_string());
        }
        self.ctx.set_fill_style(gradient.as_ref());
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, size: CanvasSize) {
        self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn circle(&mut self, center: Point, radius: f64) {
        let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, TAU);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_stroke(&mut self, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_string());
    }

    fn set_fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style_str(&c.to_string()),
            Paint::Radial(g) => self.set_gradient(g),
        }
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }
}
