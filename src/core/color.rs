// Color helpers for the renderer.
//
// Colors arrive from the host as raw `#rrggbb` strings (color pickers) and are
// resolved once per frame. Anything that does not parse renders as black.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }
}

/// An [`Rgb`] with a straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    /// Alpha clamped into `[0, 1]`; NaN becomes fully transparent.
    pub fn alpha(&self) -> f64 {
        if self.a.is_nan() {
            0.0
        } else {
            self.a.clamp(0.0, 1.0)
        }
    }
}

/// CSS `rgba(r, g, b, a)` form, the format canvas style setters accept.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Rgb { r, g, b } = self.rgb;
        write!(f, "rgba({r}, {g}, {b}, {})", self.alpha())
    }
}

/// Parse `#rrggbb` (leading `#` optional, hex digits case-insensitive).
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Like [`parse_hex`], but malformed input degrades to black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or(Rgb::BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_picker_values() {
        assert_eq!(hex_to_rgb("#00b0ff"), Rgb::new(0, 176, 255));
        assert_eq!(hex_to_rgb("#4F5B62"), Rgb::new(0x4f, 0x5b, 0x62));
        assert_eq!(hex_to_rgb("ffffff"), Rgb::WHITE);
    }

    #[test]
    fn malformed_input_is_black() {
        assert_eq!(hex_to_rgb("notacolor"), Rgb::BLACK);
        assert_eq!(hex_to_rgb("#fff"), Rgb::BLACK);
        assert_eq!(hex_to_rgb("#00b0ff00"), Rgb::BLACK);
        assert_eq!(hex_to_rgb(""), Rgb::BLACK);
        // Six bytes, but not six hex digits.
        assert_eq!(hex_to_rgb("#0é0ff"), Rgb::BLACK);
    }

    #[test]
    fn rgba_formats_as_css() {
        let c = Rgb::new(0, 176, 255).with_alpha(0.3);
        assert_eq!(c.to_string(), "rgba(0, 176, 255, 0.3)");
        assert_eq!(Rgb::BLACK.with_alpha(2.0).to_string(), "rgba(0, 0, 0, 1)");
    }
}
