#![forbid(unsafe_code)]
// Allow these clippy lints for color math readability
#![allow(clippy::must_use_candidate)]
#![allow(clippy::suboptimal_flops)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

//! # Tincture
//!
//! Color conversions for design-token pipelines.
//!
//! Tincture moves colors between the three representations a CSS theme
//! generator deals with:
//! - **HEX** (`#rrggbb`) - what language models and color pickers produce
//! - **OKLCH** (`"L C H"`) - the perceptual space themes are stored in
//! - **HSL** (`"Hdeg S% L%"`) - a compatibility format for older browsers
//!
//! It also computes WCAG relative luminance and contrast ratios, and can
//! nudge a foreground color until it passes AA contrast.
//!
//! Every string-level conversion degrades to a documented fallback instead of
//! failing, because these functions sit on a live-preview path where one bad
//! value must not take down the render:
//!
//! | Function | Fallback |
//! |----------|----------|
//! | [`hex_to_oklch_triple`] | `"0 0 0"` |
//! | [`oklch_triple_to_hex`] | `"#000000"` |
//! | [`oklch_triple_to_hsl`] | `"0deg 0% 0%"` |
//! | [`relative_luminance`] | `0.0` |
//!
//! ## Example
//!
//! ```rust
//! use tincture::{contrast_ratio, hex_to_oklch_triple, oklch_triple_to_hex};
//!
//! let triple = hex_to_oklch_triple("#3b82f6");
//! let back = oklch_triple_to_hex(&triple);
//! assert_eq!(back, "#3b82f6");
//!
//! assert!((contrast_ratio("#000000", "#ffffff") - 21.0).abs() < 1e-9);
//! ```

mod contrast;
mod hsl;
mod oklch;
mod rgb;

pub use contrast::{
    AA_LARGE_RATIO, AA_NORMAL_RATIO, MAX_FIX_ATTEMPTS, WcagCheck, WcagLevel, auto_fix_contrast,
    check_wcag_aa, contrast_ratio, relative_luminance,
};
pub use hsl::{Hsl, oklch_triple_to_hsl};
pub use oklch::{
    MAX_CHROMA, Oklab, Oklch, hex_to_oklch_triple, oklch_triple_to_hex, unwrap_oklch_fn,
};
pub use rgb::{Rgb, is_valid_hex};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::contrast::{auto_fix_contrast, check_wcag_aa, contrast_ratio};
    pub use crate::oklch::{hex_to_oklch_triple, oklch_triple_to_hex};
    pub use crate::{Hsl, Oklch, Rgb};
}
