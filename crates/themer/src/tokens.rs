//! The closed catalog of theme tokens.
//!
//! Tokens are named without the CSS `--` prefix. The catalog partitions them
//! into semantic groups and pairs every surface-like background with the
//! foreground drawn on top of it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Every token a theme recognizes.
pub const ALL_TOKENS: [&str; 43] = [
    // Color pairs
    "background",
    "foreground",
    "card",
    "card-foreground",
    "popover",
    "popover-foreground",
    "primary",
    "primary-foreground",
    "secondary",
    "secondary-foreground",
    "muted",
    "muted-foreground",
    "accent",
    "accent-foreground",
    "destructive",
    "destructive-foreground",
    "border",
    "input",
    "ring",
    // Chart
    "chart-1",
    "chart-2",
    "chart-3",
    "chart-4",
    "chart-5",
    // Sidebar
    "sidebar",
    "sidebar-foreground",
    "sidebar-primary",
    "sidebar-primary-foreground",
    "sidebar-accent",
    "sidebar-accent-foreground",
    "sidebar-border",
    "sidebar-ring",
    // Typography
    "font-sans",
    "font-serif",
    "font-mono",
    // Other
    "radius",
    "letter-spacing",
    // Shadows
    "shadow-color",
    "shadow-opacity",
    "shadow-blur",
    "shadow-spread",
    "shadow-offset-x",
    "shadow-offset-y",
];

/// Background token -> the foreground token rendered on it.
pub const FOREGROUND_PAIRS: [(&str, &str); 11] = [
    ("background", "foreground"),
    ("card", "card-foreground"),
    ("popover", "popover-foreground"),
    ("primary", "primary-foreground"),
    ("secondary", "secondary-foreground"),
    ("muted", "muted-foreground"),
    ("accent", "accent-foreground"),
    ("destructive", "destructive-foreground"),
    ("sidebar", "sidebar-foreground"),
    ("sidebar-primary", "sidebar-primary-foreground"),
    ("sidebar-accent", "sidebar-accent-foreground"),
];

const BRAND: &[&str] = &["primary", "secondary", "accent", "ring"];
const SURFACES: &[&str] = &["background", "card", "popover", "muted", "sidebar"];
const TYPOGRAPHY: &[&str] = &["font-sans", "font-serif", "font-mono"];
const CONTRAST: &[&str] = &[
    "background",
    "card",
    "popover",
    "muted",
    "primary",
    "secondary",
    "accent",
    "destructive",
    "sidebar",
];
const CHART: &[&str] = &["chart-1", "chart-2", "chart-3", "chart-4", "chart-5"];
const SIDEBAR: &[&str] = &[
    "sidebar",
    "sidebar-foreground",
    "sidebar-primary",
    "sidebar-primary-foreground",
    "sidebar-accent",
    "sidebar-accent-foreground",
    "sidebar-border",
    "sidebar-ring",
];
const SHADOWS: &[&str] = &[
    "shadow-color",
    "shadow-opacity",
    "shadow-blur",
    "shadow-spread",
    "shadow-offset-x",
    "shadow-offset-y",
];
const OTHER: &[&str] = &[
    "radius",
    "letter-spacing",
    "border",
    "input",
    "destructive",
    "destructive-foreground",
];

/// Semantic grouping of tokens. Groups may overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenGroup {
    Brand,
    Surfaces,
    Typography,
    /// Backgrounds whose foreground is checked for contrast.
    Contrast,
    Chart,
    Sidebar,
    Shadows,
    Other,
}

impl TokenGroup {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Brand,
            Self::Surfaces,
            Self::Typography,
            Self::Contrast,
            Self::Chart,
            Self::Sidebar,
            Self::Shadows,
            Self::Other,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Surfaces => "surfaces",
            Self::Typography => "typography",
            Self::Contrast => "contrast",
            Self::Chart => "chart",
            Self::Sidebar => "sidebar",
            Self::Shadows => "shadows",
            Self::Other => "other",
        }
    }

    /// Member tokens, in catalog order.
    pub const fn tokens(self) -> &'static [&'static str] {
        match self {
            Self::Brand => BRAND,
            Self::Surfaces => SURFACES,
            Self::Typography => TYPOGRAPHY,
            Self::Contrast => CONTRAST,
            Self::Chart => CHART,
            Self::Sidebar => SIDEBAR,
            Self::Shadows => SHADOWS,
            Self::Other => OTHER,
        }
    }
}

impl fmt::Display for TokenGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown group name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown token group: {0}")]
pub struct UnknownTokenGroup(pub String);

impl FromStr for TokenGroup {
    type Err = UnknownTokenGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|g| g.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownTokenGroup(s.to_string()))
    }
}

/// Returns true if `token` is in the catalog.
pub fn is_known_token(token: &str) -> bool {
    ALL_TOKENS.contains(&token)
}

pub fn is_token_in_group(token: &str, group: TokenGroup) -> bool {
    group.tokens().contains(&token)
}

/// The foreground paired with a background token, if it has one.
pub fn foreground_token(background: &str) -> Option<&'static str> {
    FOREGROUND_PAIRS
        .iter()
        .find(|(bg, _)| *bg == background)
        .map(|(_, fg)| *fg)
}

/// Background tokens that have a foreground pair.
pub fn tokens_with_foreground() -> impl Iterator<Item = &'static str> {
    FOREGROUND_PAIRS.iter().map(|(bg, _)| *bg)
}

fn is_paired(token: &str) -> bool {
    FOREGROUND_PAIRS
        .iter()
        .any(|(bg, fg)| *bg == token || *fg == token)
}

/// Returns true for catalog tokens that hold a color.
///
/// Chart, ring, border and input tokens are colors, as is either side of a
/// foreground pairing.
pub fn is_color_token(token: &str) -> bool {
    if !is_known_token(token) {
        return false;
    }
    ["chart", "ring", "border", "input"]
        .iter()
        .any(|kind| token.contains(kind))
        || is_paired(token)
}

/// Returns true for tokens whose value is an opaque string rather than a color.
///
/// This is a naming rule and applies to tokens outside the catalog too.
pub fn is_non_color_token(token: &str) -> bool {
    token.starts_with("font-")
        || token == "radius"
        || token == "letter-spacing"
        || token.starts_with("shadow-")
}
