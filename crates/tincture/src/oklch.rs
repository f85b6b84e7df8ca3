//! OKLab / OKLCH conversions (D65).
//!
//! Direct linear-sRGB <-> OKLab transforms with the cube-root nonlinearity,
//! after Björn Ottosson's reference matrices.

use std::f64::consts::PI;
use std::fmt;

use tracing::{trace, warn};

use crate::rgb::Rgb;

/// Upper bound applied to chroma when converting from HEX.
///
/// Every sRGB color sits below this, so the clamp only guards against
/// rounding drift.
pub const MAX_CHROMA: f64 = 0.37;

/// Chroma below this is treated as achromatic (hue forced to 0).
const ACHROMATIC_EPSILON: f64 = 1e-4;

/// A color in the OKLab space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// A color in the OKLCH space: lightness `0..=1`, chroma `>= 0`, hue in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

fn srgb_to_linear(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(v: f64) -> f64 {
    if v <= 0.0031308 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

impl Oklab {
    pub fn from_rgb(rgb: Rgb) -> Self {
        let (r, g, b) = rgb.to_unit();
        let r = srgb_to_linear(r);
        let g = srgb_to_linear(g);
        let b = srgb_to_linear(b);

        // Linear sRGB -> LMS
        let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
        let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
        let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

        let l_ = l.cbrt();
        let m_ = m.cbrt();
        let s_ = s.cbrt();

        Self {
            l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
            a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
            b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
        }
    }

    /// Convert to 8-bit sRGB, clipping each channel into gamut.
    pub fn to_rgb(self) -> Rgb {
        let l_ = self.l + 0.3963377774 * self.a + 0.2158037573 * self.b;
        let m_ = self.l - 0.1055613458 * self.a - 0.0638541728 * self.b;
        let s_ = self.l - 0.0894841775 * self.a - 1.2914855480 * self.b;

        let l = l_.powi(3);
        let m = m_.powi(3);
        let s = s_.powi(3);

        let r = 4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s;
        let g = -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s;
        let b = -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s;

        Rgb::from_unit(linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b))
    }
}

impl Oklch {
    pub const fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    pub fn from_oklab(lab: Oklab) -> Self {
        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        if c < ACHROMATIC_EPSILON {
            return Self { l: lab.l, c: 0.0, h: 0.0 };
        }
        let mut h = lab.b.atan2(lab.a).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        Self { l: lab.l, c, h }
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self::from_oklab(Oklab::from_rgb(rgb))
    }

    pub fn to_oklab(self) -> Oklab {
        let h = self.h * PI / 180.0;
        Oklab {
            l: self.l,
            a: self.c * h.cos(),
            b: self.c * h.sin(),
        }
    }

    pub fn to_rgb(self) -> Rgb {
        self.to_oklab().to_rgb()
    }

    /// Parse a space-separated `"L C H"` triple.
    ///
    /// Lightness may carry a `%` suffix and hue a `deg` suffix. Anything after
    /// the third component (such as `/ 0.1` alpha) is ignored.
    pub fn parse(triple: &str) -> Option<Self> {
        let mut parts = triple.split_whitespace();
        let l = parse_component(parts.next()?, "%", 100.0)?;
        let c = parse_component(parts.next()?, "%", 100.0 / 0.4)?;
        let h = parse_component(parts.next()?, "deg", 1.0)?;
        Some(Self { l, c, h })
    }

    /// Clamp chroma into `0..=MAX_CHROMA` and normalize hue into `0..360`.
    pub fn normalized(self) -> Self {
        let c = self.c.clamp(0.0, MAX_CHROMA);
        let h = self.h.rem_euclid(360.0);
        Self { l: self.l, c, h }
    }

    /// CSS function form, e.g. `oklch(0.62 0.19 259.8)`.
    pub fn to_css(self) -> String {
        format!("oklch({self})")
    }
}

fn parse_component(raw: &str, suffix: &str, percent_divisor: f64) -> Option<f64> {
    if raw.eq_ignore_ascii_case("none") {
        return Some(0.0);
    }
    let (number, scaled) = match raw.strip_suffix(suffix) {
        Some(n) if suffix == "%" => (n, true),
        Some(n) => (n, false),
        None => (raw, false),
    };
    let value: f64 = number.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if scaled { value / percent_divisor } else { value })
}

/// Round to four decimals and drop trailing zeros.
fn format_component(v: f64) -> String {
    let rounded = (v * 10_000.0).round() / 10_000.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let s = format!("{rounded:.4}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Oklch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut h = format_component(self.h);
        if h == "360" {
            h = "0".to_string();
        }
        write!(
            f,
            "{} {} {}",
            format_component(self.l),
            format_component(self.c),
            h
        )
    }
}

/// Convert a HEX color to an OKLCH `"L C H"` triple.
///
/// Chroma is clamped to [`MAX_CHROMA`]. Unparseable input yields `"0 0 0"`.
pub fn hex_to_oklch_triple(hex: &str) -> String {
    let Some(rgb) = Rgb::from_hex(hex) else {
        warn!(color.input = %hex, "Failed to convert hex to OKLCH; using zero triple");
        return "0 0 0".to_string();
    };
    let triple = Oklch::from_rgb(rgb).normalized().to_string();
    trace!(color.hex = %hex, color.oklch = %triple, "hex -> oklch");
    triple
}

/// Convert an OKLCH `"L C H"` triple to lowercase `#rrggbb`.
///
/// Unparseable input yields `"#000000"`. Callers must treat that value as a
/// conversion failure, not as a real black.
pub fn oklch_triple_to_hex(triple: &str) -> String {
    match Oklch::parse(triple) {
        Some(lch) => lch.to_rgb().to_hex(),
        None => {
            warn!(color.input = %triple, "Failed to convert OKLCH to hex; using #000000");
            Rgb::BLACK.to_hex()
        }
    }
}

/// Strip an `oklch(...)` wrapper, returning the inner triple.
///
/// Strings without the wrapper are returned unchanged.
pub fn unwrap_oklch_fn(value: &str) -> &str {
    let v = value.trim();
    v.strip_prefix("oklch(")
        .and_then(|rest| rest.strip_suffix(')'))
        .map_or(v, str::trim)
}
