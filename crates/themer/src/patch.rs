//! Intent-scoped merging of a generator response into an existing theme.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::adapter::{BOX_SHADOW_TOKEN, compose_box_shadow, internal_value};
use crate::intent::Intent;
use crate::payload::{ThemePayload, TokenMap};
use crate::theme::{Mode, Theme};

/// Marker the generator looks for in front of the serialized base theme.
pub const BASE_THEME_TAG: &str = "@[base_theme]";

fn patch_mode(mode: &mut Mode, tokens: &TokenMap, intent: &Intent, mode_name: &str) -> usize {
    let mut applied = 0;
    let mut shadow_touched = false;

    for (token, value) in tokens {
        if !intent.permits(token) {
            continue;
        }
        let Some(value) = internal_value(token, value) else {
            continue;
        };
        shadow_touched |= token.starts_with("shadow-");
        mode.set(token.as_str(), value);
        applied += 1;
    }

    if shadow_touched {
        if let Some(shadow) = compose_box_shadow(|t| mode.get(t)) {
            mode.set(BOX_SHADOW_TOKEN, shadow);
        }
    }

    debug!(theme.mode = mode_name, patch.applied = applied, patch.offered = tokens.len(), "Patched mode");
    applied
}

/// Merge `payload` into a copy of `base`, touching only what `intent` permits.
///
/// Each mode the intent selects receives the response tokens that pass the
/// token predicate and the shadow/font gates. Root fonts follow the font
/// gate; root radius and letter spacing follow the predicate for `radius`
/// and `letter-spacing`. All three are read from the response's light mode
/// because they do not vary by mode. Everything else keeps its base value.
pub fn patch_theme(base: &Theme, payload: &ThemePayload, intent: &Intent) -> Theme {
    let mut patched = base.clone();
    let mut applied = 0;

    if intent.modes.includes_light() {
        applied += patch_mode(&mut patched.light, &payload.theme.light, intent, "light");
    }
    if intent.modes.includes_dark() {
        applied += patch_mode(&mut patched.dark, &payload.theme.dark, intent, "dark");
    }

    let light = &payload.theme.light;
    let lifted = |token: &str| {
        light
            .get(token)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    };

    if intent.allow_fonts {
        if let Some(sans) = lifted("font-sans") {
            patched.fonts.sans = sans;
        }
        if let Some(serif) = lifted("font-serif") {
            patched.fonts.serif = serif;
        }
        if let Some(mono) = lifted("font-mono") {
            patched.fonts.mono = mono;
        }
    }
    if intent.allows("radius") {
        if let Some(radius) = lifted("radius") {
            patched.radius = radius;
        }
    }
    if intent.allows("letter-spacing") {
        if let Some(spacing) = lifted("letter-spacing") {
            patched.letter_spacing = spacing;
        }
    }

    info!(theme.name = %patched.name, intent = %intent, patch.applied = applied, "Patched theme");
    patched
}

#[derive(Serialize)]
struct BaseThemeSnapshot<'a> {
    light: &'a BTreeMap<String, String>,
    dark: &'a BTreeMap<String, String>,
}

/// Append the base theme's tokens to a tweak instruction.
///
/// The result is the instruction, a blank line, [`BASE_THEME_TAG`], then the
/// per-mode token maps as pretty JSON.
pub fn build_tweak_prompt(instruction: &str, base: &Theme) -> String {
    let snapshot = BaseThemeSnapshot {
        light: base.light.as_map(),
        dark: base.dark.as_map(),
    };
    let json = serde_json::to_string_pretty(&snapshot).unwrap_or_else(|err| {
        warn!(error = %err, "Failed to serialize base theme for tweak prompt");
        "{}".to_string()
    });
    format!("{instruction}\n\n{BASE_THEME_TAG}\n{json}")
}
