#![forbid(unsafe_code)]
// Allow these clippy lints for API ergonomics
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::future_not_send)]

//! # Themer
//!
//! Design-token themes for web UIs, generated from prompts and edited in
//! place.
//!
//! A theme is a fixed catalog of named tokens (colors, fonts, radius,
//! shadow parts) with one value set per light and dark mode. Themer provides:
//! - **Catalog**: the token names, groups and background/foreground pairs
//! - **Adapter**: HEX-colored generator payloads into `oklch(...)` themes
//! - **Intent**: keyword rules deciding which tokens a tweak may touch
//! - **Patch**: merging a tweak response into an existing theme
//! - **Store**: the editing session, with bounded undo/redo and generation
//!
//! Generation goes through the [`ThemeGenerator`] and [`LogoGenerator`]
//! traits. The `themer-client` crate implements them over HTTP.
//!
//! ## Example
//!
//! ```rust
//! use themer::{ModeSelector, ThemeStore, render_css_vars};
//!
//! let mut store = ThemeStore::new();
//! store.update_token("primary", "#3b82f6", ModeSelector::Both);
//! assert_eq!(
//!     store.current().light.get("primary"),
//!     Some("oklch(0.6231 0.188 259.8145)")
//! );
//!
//! store.undo();
//! assert_eq!(store.current().light.get("primary"), Some("oklch(0.205 0 0)"));
//!
//! let css = render_css_vars(store.current(), false);
//! assert!(css.contains("--primary: oklch(0.205 0 0);"));
//! ```
//!
//! ## Tweaks
//!
//! ```rust
//! use themer::{ThemePayload, create_default_theme, parse_intent, patch_theme};
//!
//! let base = create_default_theme();
//! let response = ThemePayload::from_json(
//!     r##"{"text":"","theme":{"light":{"background":"#000000","primary":"#ff0000"},"dark":{}}}"##,
//! )
//! .unwrap();
//!
//! let patched = patch_theme(&base, &response, &parse_intent("darker background"));
//! assert_eq!(patched.light.get("background"), Some("oklch(0 0 0)"));
//! assert_eq!(patched.light.get("primary"), base.light.get("primary"));
//! ```

pub mod adapter;
pub mod css;
pub mod generator;
pub mod history;
pub mod intent;
pub mod patch;
pub mod payload;
pub mod store;
pub mod theme;
pub mod tokens;

pub use adapter::{
    BOX_SHADOW_TOKEN, DEFAULT_GENERATED_NAME, adapt_external_to_internal,
    adapt_internal_to_external, compose_box_shadow, create_default_theme, default_token_value,
    internal_value,
};
pub use css::{color_to_hex, render_css_vars, render_stylesheet};
pub use generator::{
    ErrorBody, GenerateError, GenerationMode, GenerationRequest, LogoGenerator, LogoRequest,
    LogoResponse, SEED_RANGE, ThemeGenerator, UpstreamCategory, default_logo_prompt,
};
pub use history::{History, MAX_HISTORY};
pub use intent::{Intent, RuleEffect, TOKEN_RULES, TokenMatcher, TokenRule, parse_intent};
pub use patch::{BASE_THEME_TAG, build_tweak_prompt, patch_theme};
pub use payload::{PayloadError, PayloadModes, ThemePayload, TokenMap};
pub use store::{
    GENERATION_SUCCESS_TEXT, GenerationStatus, GenerationTicket, PairContrast, Scene, ThemeStore,
    contrast_report,
};
pub use theme::{
    Fonts, FontsPatch, Mode, ModeSelector, THEME_VERSION, Theme, ThemeLoadError, ThemeSaveError,
    new_theme_id,
};
pub use tokens::{
    ALL_TOKENS, FOREGROUND_PAIRS, TokenGroup, UnknownTokenGroup, foreground_token,
    is_color_token, is_known_token, is_non_color_token, is_token_in_group,
    tokens_with_foreground,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::generator::{GenerateError, GenerationMode, LogoGenerator, ThemeGenerator};
    pub use crate::intent::{Intent, parse_intent};
    pub use crate::store::{Scene, ThemeStore};
    pub use crate::theme::{FontsPatch, Mode, ModeSelector, Theme};
    pub use crate::{adapt_external_to_internal, create_default_theme, patch_theme};
}
