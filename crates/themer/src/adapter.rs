//! Conversion between the HEX wire format and the internal OKLCH theme.

use tincture::{hex_to_oklch_triple, unwrap_oklch_fn};
use tracing::{debug, info, trace, warn};

use crate::payload::{ThemePayload, TokenMap};
use crate::theme::{
    DEFAULT_FONT_MONO, DEFAULT_FONT_SANS, DEFAULT_FONT_SERIF, DEFAULT_LETTER_SPACING,
    DEFAULT_RADIUS, Fonts, Mode, THEME_VERSION, Theme, new_theme_id,
};
use crate::tokens::{ALL_TOKENS, is_known_token, is_non_color_token};

/// Name given to adapted themes when the caller has none.
pub const DEFAULT_GENERATED_NAME: &str = "Generated Theme";

/// Composite token synthesized from the `shadow-*` sub-tokens.
pub const BOX_SHADOW_TOKEN: &str = "box-shadow";

const DEFAULT_LIGHT: [(&str, &str); 43] = [
    ("background", "oklch(0.98 0 0)"),
    ("foreground", "oklch(0.12 0.02 255)"),
    ("card", "oklch(1 0 0)"),
    ("card-foreground", "oklch(0.12 0.02 255)"),
    ("popover", "oklch(1 0 0)"),
    ("popover-foreground", "oklch(0.12 0.02 255)"),
    ("primary", "oklch(0.205 0 0)"),
    ("primary-foreground", "oklch(0.985 0 0)"),
    ("secondary", "oklch(0.97 0 0)"),
    ("secondary-foreground", "oklch(0.205 0 0)"),
    ("muted", "oklch(0.97 0 0)"),
    ("muted-foreground", "oklch(0.556 0 0)"),
    ("accent", "oklch(0.97 0 0)"),
    ("accent-foreground", "oklch(0.205 0 0)"),
    ("destructive", "oklch(0.577 0.245 27.325)"),
    ("destructive-foreground", "oklch(0.985 0 0)"),
    ("border", "oklch(0.922 0 0)"),
    ("input", "oklch(0.922 0 0)"),
    ("ring", "oklch(0.708 0 0)"),
    ("sidebar", "oklch(0.97 0 0)"),
    ("sidebar-foreground", "oklch(0.12 0.02 255)"),
    ("sidebar-primary", "oklch(0.205 0 0)"),
    ("sidebar-primary-foreground", "oklch(0.985 0 0)"),
    ("sidebar-accent", "oklch(0.95 0 0)"),
    ("sidebar-accent-foreground", "oklch(0.12 0.02 255)"),
    ("sidebar-border", "oklch(0.9 0 0)"),
    ("sidebar-ring", "oklch(0.708 0 0)"),
    ("chart-1", "oklch(0.205 0 0)"),
    ("chart-2", "oklch(0.4 0 0)"),
    ("chart-3", "oklch(0.6 0 0)"),
    ("chart-4", "oklch(0.8 0 0)"),
    ("chart-5", "oklch(0.9 0 0)"),
    ("shadow-color", "oklch(0.12 0.02 255)"),
    ("shadow-opacity", "0.1"),
    ("shadow-blur", "10px"),
    ("shadow-spread", "-3px"),
    ("shadow-offset-x", "0px"),
    ("shadow-offset-y", "4px"),
    ("radius", DEFAULT_RADIUS),
    ("font-sans", DEFAULT_FONT_SANS),
    ("font-serif", DEFAULT_FONT_SERIF),
    ("font-mono", DEFAULT_FONT_MONO),
    ("letter-spacing", DEFAULT_LETTER_SPACING),
];

const DEFAULT_DARK: [(&str, &str); 43] = [
    ("background", "oklch(0.145 0 0)"),
    ("foreground", "oklch(0.985 0 0)"),
    ("card", "oklch(0.205 0 0)"),
    ("card-foreground", "oklch(0.985 0 0)"),
    ("popover", "oklch(0.205 0 0)"),
    ("popover-foreground", "oklch(0.985 0 0)"),
    ("primary", "oklch(0.922 0 0)"),
    ("primary-foreground", "oklch(0.205 0 0)"),
    ("secondary", "oklch(0.269 0 0)"),
    ("secondary-foreground", "oklch(0.985 0 0)"),
    ("muted", "oklch(0.269 0 0)"),
    ("muted-foreground", "oklch(0.708 0 0)"),
    ("accent", "oklch(0.269 0 0)"),
    ("accent-foreground", "oklch(0.985 0 0)"),
    ("destructive", "oklch(0.704 0.191 22.216)"),
    ("destructive-foreground", "oklch(0.205 0 0)"),
    ("border", "oklch(1 0 0 / 0.1)"),
    ("input", "oklch(1 0 0 / 0.15)"),
    ("ring", "oklch(0.556 0 0)"),
    ("sidebar", "oklch(0.269 0 0)"),
    ("sidebar-foreground", "oklch(0.985 0 0)"),
    ("sidebar-primary", "oklch(0.985 0 0)"),
    ("sidebar-primary-foreground", "oklch(0.205 0 0)"),
    ("sidebar-accent", "oklch(0.3 0 0)"),
    ("sidebar-accent-foreground", "oklch(0.985 0 0)"),
    ("sidebar-border", "oklch(0.35 0 0)"),
    ("sidebar-ring", "oklch(0.556 0 0)"),
    ("chart-1", "oklch(0.985 0 0)"),
    ("chart-2", "oklch(0.8 0 0)"),
    ("chart-3", "oklch(0.6 0 0)"),
    ("chart-4", "oklch(0.4 0 0)"),
    ("chart-5", "oklch(0.2 0 0)"),
    ("shadow-color", "oklch(0 0 0)"),
    ("shadow-opacity", "0.5"),
    ("shadow-blur", "15px"),
    ("shadow-spread", "-5px"),
    ("shadow-offset-x", "0px"),
    ("shadow-offset-y", "5px"),
    ("radius", DEFAULT_RADIUS),
    ("font-sans", DEFAULT_FONT_SANS),
    ("font-serif", DEFAULT_FONT_SERIF),
    ("font-mono", DEFAULT_FONT_MONO),
    ("letter-spacing", DEFAULT_LETTER_SPACING),
];

fn default_pairs(dark: bool) -> &'static [(&'static str, &'static str)] {
    if dark { &DEFAULT_DARK } else { &DEFAULT_LIGHT }
}

/// The default theme's value for `token` in the given mode.
pub fn default_token_value(token: &str, dark: bool) -> Option<&'static str> {
    default_pairs(dark)
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, v)| *v)
}

/// The neutral grayscale theme used at startup and on reset.
pub fn create_default_theme() -> Theme {
    Theme {
        id: new_theme_id(),
        name: "Default Theme".to_string(),
        notes: None,
        version: THEME_VERSION,
        radius: DEFAULT_RADIUS.to_string(),
        letter_spacing: DEFAULT_LETTER_SPACING.to_string(),
        fonts: Fonts::default(),
        light: DEFAULT_LIGHT.iter().copied().collect(),
        dark: DEFAULT_DARK.iter().copied().collect(),
    }
}

/// The stored form of a wire value, or `None` if it should be dropped.
///
/// Non-color tokens are kept verbatim, surrounding whitespace included. HEX colors become `oklch(L C H)` and
/// values already in `oklch(...)` form pass through. Any other value for a
/// catalog color token is rejected; unknown tokens keep whatever they carry.
pub fn internal_value(token: &str, raw: &str) -> Option<String> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    if is_non_color_token(token) {
        return Some(raw.to_string());
    }
    if value.starts_with('#') {
        let triple = hex_to_oklch_triple(value);
        trace!(theme.token = %token, color.hex = %value, color.oklch = %triple, "Converted color token");
        return Some(format!("oklch({triple})"));
    }
    if value.starts_with("oklch(") || !is_known_token(token) {
        return Some(value.to_string());
    }
    warn!(theme.token = %token, theme.value = %value, "Dropping color token that is neither HEX nor OKLCH");
    None
}

fn shadow_color_triple(value: &str) -> String {
    let value = value.trim();
    if value.starts_with("oklch(") {
        unwrap_oklch_fn(value).to_string()
    } else {
        hex_to_oklch_triple(value)
    }
}

/// Build the composite `box-shadow` value from `shadow-*` sub-tokens.
///
/// Needs at least `shadow-color` and `shadow-blur`; other parts default to
/// `0px` and opacity to `0.1`.
pub fn compose_box_shadow<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Option<String> {
    let part = |token: &str| lookup(token).filter(|v| !v.trim().is_empty());
    let color = part("shadow-color")?;
    let blur = part("shadow-blur")?;

    let offset_x = part("shadow-offset-x").unwrap_or("0px");
    let offset_y = part("shadow-offset-y").unwrap_or("0px");
    let spread = part("shadow-spread").unwrap_or("0px");
    let opacity = part("shadow-opacity").unwrap_or("0.1");

    Some(format!(
        "{offset_x} {offset_y} {blur} {spread} oklch({}) / {opacity}",
        shadow_color_triple(color)
    ))
}

fn convert_mode(tokens: &TokenMap, dark: bool) -> Mode {
    let mode_name = if dark { "dark" } else { "light" };
    let mut mode = Mode::new();

    for (token, value) in tokens {
        match internal_value(token, value) {
            Some(v) => {
                mode.set(token.as_str(), v);
            }
            None => debug!(theme.mode = mode_name, theme.token = %token, "Skipped empty or unusable token"),
        }
    }

    if let Some(shadow) = compose_box_shadow(|t| tokens.get(t).map(String::as_str)) {
        debug!(theme.mode = mode_name, theme.box_shadow = %shadow, "Built box-shadow");
        mode.set(BOX_SHADOW_TOKEN, shadow);
    }

    for token in ALL_TOKENS {
        if !mode.contains(token) {
            if let Some(fallback) = default_token_value(token, dark) {
                debug!(theme.mode = mode_name, theme.token = token, "Filled missing token from default theme");
                mode.set(token, fallback);
            }
        }
    }

    mode
}

fn non_empty<'a>(tokens: &'a TokenMap, token: &str) -> Option<&'a str> {
    tokens
        .get(token)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Convert a generator payload into a complete internal theme.
///
/// Every token in each mode is converted, not just catalog tokens. Catalog
/// tokens the payload omits are filled from the default theme, so both
/// modes always carry the full token set.
pub fn adapt_external_to_internal(payload: &ThemePayload, name: &str) -> Theme {
    let light = &payload.theme.light;
    let lift = |token: &str, fallback: &str| non_empty(light, token).unwrap_or(fallback).to_string();

    let theme = Theme {
        id: new_theme_id(),
        name: name.to_string(),
        notes: Some(payload.text.clone()).filter(|t| !t.is_empty()),
        version: THEME_VERSION,
        radius: lift("radius", DEFAULT_RADIUS),
        letter_spacing: lift("letter-spacing", DEFAULT_LETTER_SPACING),
        fonts: Fonts {
            sans: lift("font-sans", DEFAULT_FONT_SANS),
            serif: lift("font-serif", DEFAULT_FONT_SERIF),
            mono: lift("font-mono", DEFAULT_FONT_MONO),
        },
        light: convert_mode(&payload.theme.light, false),
        dark: convert_mode(&payload.theme.dark, true),
    };

    info!(
        theme.name = %theme.name,
        theme.light_tokens = theme.light.len(),
        theme.dark_tokens = theme.dark.len(),
        "Adapted generated theme"
    );
    theme
}

/// Convert a theme back into the wire shape.
///
/// Values keep their stored form, so colors come back as `oklch(...)` rather
/// than HEX. A HEX roundtrip is not exact after the OKLCH hop anyway.
pub fn adapt_internal_to_external(theme: &Theme) -> ThemePayload {
    let to_map = |mode: &Mode| -> TokenMap {
        mode.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    };
    ThemePayload::new(
        theme.notes.clone().unwrap_or_default(),
        to_map(&theme.light),
        to_map(&theme.dark),
    )
}
