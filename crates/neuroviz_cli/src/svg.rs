//! SVG export of a recorded frame.

use std::fmt::Write as _;

use neuroviz::color::Rgba;
use neuroviz::geometry::CanvasSize;
use neuroviz::recording::Shape;
use neuroviz::render::{Paint, RadialGradient};

/// Page background behind the canvas; the canvas itself clears to transparent.
pub const DEFAULT_BACKGROUND: &str = "#121212";

fn rgb(c: &Rgba) -> String {
    format!("rgb({},{},{})", c.rgb.r, c.rgb.g, c.rgb.b)
}

fn num(v: f64) -> String {
    // Trim trailing zeros so the output stays compact and diffable.
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn gradient_def(out: &mut String, id: usize, g: &RadialGradient) {
    let _ = writeln!(
        out,
        r#"<radialGradient id="g{id}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}" fx="{}" fy="{}" fr="{}">"#,
        num(g.outer.x),
        num(g.outer.y),
        num(g.outer_radius),
        num(g.inner.x),
        num(g.inner.y),
        num(g.inner_radius),
    );
    for stop in &g.stops {
        let _ = writeln!(
            out,
            r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
            num(stop.offset),
            rgb(&stop.color),
            num(stop.color.alpha()),
        );
    }
    out.push_str("</radialGradient>\n");
}

/// Serialize `shapes` (in paint order) as a standalone SVG document.
pub fn render_svg(shapes: &[Shape], canvas: CanvasSize, background: Option<&str>) -> String {
    let mut defs = String::new();
    let mut body = String::new();
    let mut gradients = 0usize;

    for shape in shapes {
        match shape {
            Shape::Line {
                from,
                to,
                color,
                width,
            } => {
                let _ = writeln!(
                    body,
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                    num(from.x),
                    num(from.y),
                    num(to.x),
                    num(to.y),
                    rgb(color),
                    num(color.alpha()),
                    num(*width),
                );
            }
            Shape::Disc {
                center,
                radius,
                paint,
            } => {
                let fill = match paint {
                    Paint::Solid(c) => {
                        format!(r#"fill="{}" fill-opacity="{}""#, rgb(c), num(c.alpha()))
                    }
                    Paint::Radial(g) => {
                        gradient_def(&mut defs, gradients, g);
                        gradients += 1;
                        format!(r#"fill="url(#g{})""#, gradients - 1)
                    }
                };
                let _ = writeln!(
                    body,
                    r#"<circle cx="{}" cy="{}" r="{}" {fill}/>"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                );
            }
            Shape::Ring {
                center,
                radius,
                color,
                width,
            } => {
                let _ = writeln!(
                    body,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                    rgb(color),
                    num(color.alpha()),
                    num(*width),
                );
            }
        }
    }

    let (w, h) = (num(canvas.width), num(canvas.height));
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    if !defs.is_empty() {
        out.push_str("<defs>\n");
        out.push_str(&defs);
        out.push_str("</defs>\n");
    }
    if let Some(bg) = background {
        let _ = writeln!(out, r#"<rect width="100%" height="100%" fill="{bg}"/>"#);
    }
    out.push_str(&body);
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroviz::color::Rgb;
    use neuroviz::geometry::Point;
    use neuroviz::config::NetworkConfig;
    use neuroviz::network::Network;
    use neuroviz::recording::RecordingSurface;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(20.0), "20");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(1.0 / 3.0), "0.333");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn solid_disc_and_line() {
        let shapes = vec![
            Shape::Line {
                from: Point::new(0.0, 0.0),
                to: Point::new(10.0, 5.0),
                color: Rgb::WHITE.with_alpha(0.05),
                width: 1.0,
            },
            Shape::Disc {
                center: Point::new(3.0, 4.0),
                radius: 8.0,
                paint: Paint::Solid(Rgb::new(0, 176, 255).with_alpha(0.2)),
            },
        ];
        let svg = render_svg(&shapes, CanvasSize::new(100.0, 50.0), None);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 100 50""#));
        assert!(svg.contains(r#"<line x1="0" y1="0" x2="10" y2="5" stroke="rgb(255,255,255)" stroke-opacity="0.05" stroke-width="1"/>"#));
        assert!(svg.contains(r#"<circle cx="3" cy="4" r="8" fill="rgb(0,176,255)" fill-opacity="0.2"/>"#));
        assert!(!svg.contains("<defs>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn full_frame_exports_every_node() {
        let net = Network::new(
            NetworkConfig::default().with_seed(7),
            CanvasSize::new(800.0, 600.0),
        );
        let mut surface = RecordingSurface::new();
        net.render(&mut surface);
        let svg = render_svg(&surface.shapes(), net.canvas(), Some(DEFAULT_BACKGROUND));

        // Each node draws a body disc, a highlight gradient disc and a rim.
        let nodes = net.topology().nodes().len();
        assert_eq!(svg.matches("<circle").count(), nodes * 3);
        assert_eq!(svg.matches(r#"fill="none""#).count(), nodes);
        assert_eq!(svg.matches("<radialGradient").count(), nodes);
        assert!(svg.contains(r##"fill="#121212""##));
        // 41 vertical + 31 horizontal grid lines, then 30 edges.
        assert_eq!(svg.matches("<line").count(), 41 + 31 + 30);
    }
}
