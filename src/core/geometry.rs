// Canvas-space geometry used by layout, signal interpolation and hit-testing.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Canvas dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Largest side a canvas may have; matches common browser limits.
    pub const MAX_DIM: f64 = 16_384.0;

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Non-finite or negative dimensions collapse to zero; oversized ones are
    /// capped at [`Self::MAX_DIM`].
    pub fn sanitized(self) -> Self {
        let fix = |v: f64| {
            if v.is_finite() {
                v.clamp(0.0, Self::MAX_DIM)
            } else {
                0.0
            }
        };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// True when `p` lies within `threshold` of the line through `a`-`b` and
/// inside the segment's bounding box padded by `threshold`.
///
/// The distance is measured to the infinite line, so the padded box is what
/// bounds the hit region near the endpoints. A zero-length segment never hits.
pub fn is_point_near_segment(p: Point, a: Point, b: Point, threshold: f64) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = dx.hypot(dy);
    if len <= 0.0 || !len.is_finite() {
        return false;
    }

    let dist = (dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs() / len;

    let min_x = a.x.min(b.x) - threshold;
    let max_x = a.x.max(b.x) + threshold;
    let min_y = a.y.min(b.y) - threshold;
    let max_y = a.y.max(b.y) + threshold;
    let within_bounds = p.x >= min_x && p.x <= max_x && p.y >= min_y && p.y <= max_y;

    dist <= threshold && within_bounds
}
