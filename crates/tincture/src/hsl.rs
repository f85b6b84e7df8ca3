//! HSL representation used for lightness nudging and CSS fallbacks.

use std::fmt;

use tracing::warn;

use crate::oklch::Oklch;
use crate::rgb::Rgb;

/// An HSL color with CSS-style units: hue in degrees, saturation and
/// lightness in percent (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.to_unit();

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = f64::midpoint(max, min);

        if (max - min).abs() < f64::EPSILON {
            return Self::new(0.0, 0.0, l * 100.0);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if (max - r).abs() < f64::EPSILON {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h / 6.0 * 360.0, s * 100.0, l * 100.0)
    }

    /// Convert to 8-bit sRGB. Saturation and lightness are clamped to `0..=100`.
    pub fn to_rgb(self) -> Rgb {
        let l = self.l.clamp(0.0, 100.0) / 100.0;
        let s = self.s.clamp(0.0, 100.0) / 100.0;
        let h = self.h.rem_euclid(360.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        Rgb::from_unit(r + m, g + m, b + m)
    }

    /// Same hue and saturation with a different lightness.
    pub fn with_lightness(self, l: f64) -> Self {
        Self { l, ..self }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}deg {}% {}%",
            self.h.round(),
            self.s.round(),
            self.l.round()
        )
    }
}

/// Convert an OKLCH `"L C H"` triple to a CSS HSL string such as `"217deg 91% 60%"`.
///
/// Unparseable input yields `"0deg 0% 0%"`.
pub fn oklch_triple_to_hsl(triple: &str) -> String {
    match Oklch::parse(triple) {
        Some(lch) => Hsl::from_rgb(lch.to_rgb()).to_string(),
        None => {
            warn!(color.input = %triple, "Failed to convert OKLCH to HSL; using fallback");
            "0deg 0% 0%".to_string()
        }
    }
}
