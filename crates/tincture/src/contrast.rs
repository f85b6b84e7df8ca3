//! WCAG 2.1 relative luminance, contrast ratios and AA checks.

use std::fmt;

use tracing::{debug, warn};

use crate::hsl::Hsl;
use crate::rgb::Rgb;

/// Minimum ratio for normal-size text at WCAG AA.
pub const AA_NORMAL_RATIO: f64 = 4.5;

/// Minimum ratio for large text (18pt+, or 14pt+ bold) at WCAG AA.
pub const AA_LARGE_RATIO: f64 = 3.0;

/// Lightness steps [`auto_fix_contrast`] tries before giving up.
pub const MAX_FIX_ATTEMPTS: usize = 20;

/// Lightness change per auto-fix step, in HSL percentage points.
const FIX_STEP: f64 = 5.0;

/// Which AA threshold a check was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WcagLevel {
    AaNormal,
    AaLarge,
}

impl WcagLevel {
    pub const fn for_text(is_large_text: bool) -> Self {
        if is_large_text { Self::AaLarge } else { Self::AaNormal }
    }

    pub const fn required_ratio(self) -> f64 {
        match self {
            Self::AaNormal => AA_NORMAL_RATIO,
            Self::AaLarge => AA_LARGE_RATIO,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AaNormal => "AA Normal",
            Self::AaLarge => "AA Large",
        }
    }
}

impl fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`check_wcag_aa`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WcagCheck {
    pub passes: bool,
    pub required_ratio: f64,
    pub actual_ratio: f64,
    pub level: WcagLevel,
}

fn channel_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn luminance_of(rgb: Rgb) -> f64 {
    let (r, g, b) = rgb.to_unit();
    0.2126 * channel_to_linear(r) + 0.7152 * channel_to_linear(g) + 0.0722 * channel_to_linear(b)
}

/// WCAG relative luminance of a HEX color, in `0.0..=1.0`.
///
/// Unparseable input is treated as black and yields `0.0`.
pub fn relative_luminance(hex: &str) -> f64 {
    match Rgb::from_hex(hex) {
        Some(rgb) => luminance_of(rgb),
        None => {
            warn!(color.input = %hex, "Unparseable color in luminance; treating as black");
            0.0
        }
    }
}

/// Contrast ratio between two HEX colors, in `1.0..=21.0`. Order does not matter.
pub fn contrast_ratio(a: &str, b: &str) -> f64 {
    ratio_of_luminances(relative_luminance(a), relative_luminance(b))
}

fn ratio_of_luminances(a: f64, b: f64) -> f64 {
    let lighter = a.max(b);
    let darker = a.min(b);
    (lighter + 0.05) / (darker + 0.05)
}

/// Check a contrast ratio against the WCAG AA threshold for the text size.
pub fn check_wcag_aa(ratio: f64, is_large_text: bool) -> WcagCheck {
    let level = WcagLevel::for_text(is_large_text);
    let required_ratio = level.required_ratio();
    WcagCheck {
        passes: ratio >= required_ratio,
        required_ratio,
        actual_ratio: ratio,
        level,
    }
}

/// Adjust the foreground's lightness until it passes AA against the background.
///
/// Hue and saturation are kept. The foreground moves darker on light
/// backgrounds (luminance above 0.5) and lighter otherwise, in steps of five
/// lightness points, for at most [`MAX_FIX_ATTEMPTS`] steps. The last
/// candidate is returned even if it still fails.
///
/// A passing pair, or a foreground that is not valid HEX, is returned unchanged.
pub fn auto_fix_contrast(background: &str, foreground: &str, is_large_text: bool) -> String {
    let required = WcagLevel::for_text(is_large_text).required_ratio();
    let bg_luminance = relative_luminance(background);

    let Some(fg) = Rgb::from_hex(foreground) else {
        warn!(color.input = %foreground, "Cannot auto-fix an unparseable foreground");
        return foreground.to_string();
    };

    let mut ratio = ratio_of_luminances(bg_luminance, luminance_of(fg));
    if ratio >= required {
        return foreground.to_string();
    }

    let darken = bg_luminance > 0.5;
    let hsl = Hsl::from_rgb(fg);
    let mut lightness = hsl.l;
    let mut candidate = fg;
    let mut attempts = 0;

    while ratio < required && attempts < MAX_FIX_ATTEMPTS {
        lightness = if darken {
            (lightness - FIX_STEP).max(0.0)
        } else {
            (lightness + FIX_STEP).min(100.0)
        };
        candidate = hsl.with_lightness(lightness).to_rgb();
        ratio = ratio_of_luminances(bg_luminance, luminance_of(candidate));
        attempts += 1;
    }

    debug!(
        contrast.background = %background,
        contrast.from = %foreground,
        contrast.to = %candidate,
        contrast.ratio = ratio,
        contrast.attempts = attempts,
        "Auto-fixed foreground contrast"
    );

    candidate.to_hex()
}
