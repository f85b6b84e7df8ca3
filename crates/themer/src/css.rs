//! CSS custom-property output for a theme.

use tincture::{oklch_triple_to_hex, unwrap_oklch_fn};

use crate::theme::{Mode, Theme};

/// Tokens whose rendered value comes from the theme root, not the mode.
const ROOT_TOKENS: [&str; 5] = ["font-sans", "font-serif", "font-mono", "radius", "letter-spacing"];

/// Convert a stored color value to lowercase `#rrggbb`.
///
/// HEX passes through lowercased; `oklch(...)` and bare triples are
/// converted, ignoring any alpha. Anything else yields `#000000`.
pub fn color_to_hex(value: &str) -> String {
    let value = value.trim();
    if value.starts_with('#') {
        return value.to_ascii_lowercase();
    }
    oklch_triple_to_hex(unwrap_oklch_fn(value))
}

fn declarations(theme: &Theme, mode: &Mode) -> Vec<String> {
    let mut parts: Vec<String> = mode
        .iter()
        .filter(|(token, _)| !ROOT_TOKENS.contains(token))
        .map(|(token, value)| format!("--{token}: {value};"))
        .collect();

    parts.push(format!("--font-sans: {};", theme.fonts.sans));
    parts.push(format!("--font-serif: {};", theme.fonts.serif));
    parts.push(format!("--font-mono: {};", theme.fonts.mono));
    parts.push(format!("--radius: {};", theme.radius));
    parts.push(format!("--letter-spacing: {};", theme.letter_spacing));
    parts
}

/// One `--token: value;` declaration per line for the selected mode.
///
/// Mode tokens come first in name order, then the root fonts, radius and
/// letter spacing. Root values win over any per-mode copy.
pub fn render_css_vars(theme: &Theme, dark: bool) -> String {
    declarations(theme, theme.mode(dark)).join("\n")
}

/// A stylesheet with light tokens on `:root` and dark tokens on `.dark`.
pub fn render_stylesheet(theme: &Theme) -> String {
    let block = |selector: &str, mode: &Mode| {
        let body: Vec<String> = declarations(theme, mode)
            .into_iter()
            .map(|line| format!("  {line}"))
            .collect();
        format!("{selector} {{\n{}\n}}\n", body.join("\n"))
    };
    format!("{}\n{}", block(":root", &theme.light), block(".dark", &theme.dark))
}
