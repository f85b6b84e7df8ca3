//! The internal theme model.
//!
//! A [`Theme`] holds two [`Mode`]s of CSS-ready token values plus a few root
//! fields (fonts, radius, letter spacing) that are mirrored into both modes.
//! Color tokens hold `oklch(L C H)` strings; everything else is opaque.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Schema version carried by every theme.
pub const THEME_VERSION: u8 = 1;

pub const DEFAULT_FONT_SANS: &str = "Inter, ui-sans-serif, system-ui";
pub const DEFAULT_FONT_SERIF: &str = "Lora, ui-serif";
pub const DEFAULT_FONT_MONO: &str = "\"Fira Code\", ui-monospace";
pub const DEFAULT_RADIUS: &str = "0.625rem";
pub const DEFAULT_LETTER_SPACING: &str = "0px";

/// Token values for one color scheme, keyed by un-prefixed token name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    #[serde(default)]
    vars: BTreeMap<String, String>,
}

impl Mode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.vars.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.vars.contains_key(token)
    }

    /// Set a token, returning the previous value.
    pub fn set(&mut self, token: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(token.into(), value.into())
    }

    pub fn remove(&mut self, token: &str) -> Option<String> {
        self.vars.remove(token)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.vars
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Mode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Font family stacks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fonts {
    pub sans: String,
    pub serif: String,
    pub mono: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            sans: DEFAULT_FONT_SANS.to_string(),
            serif: DEFAULT_FONT_SERIF.to_string(),
            mono: DEFAULT_FONT_MONO.to_string(),
        }
    }
}

/// A partial font update. `None` and empty strings leave the family unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontsPatch {
    pub sans: Option<String>,
    pub serif: Option<String>,
    pub mono: Option<String>,
}

impl FontsPatch {
    pub fn sans(mut self, family: impl Into<String>) -> Self {
        self.sans = Some(family.into());
        self
    }

    pub fn serif(mut self, family: impl Into<String>) -> Self {
        self.serif = Some(family.into());
        self
    }

    pub fn mono(mut self, family: impl Into<String>) -> Self {
        self.mono = Some(family.into());
        self
    }

    /// Non-empty entries as `(token, family)`.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("font-sans", self.sans.as_deref()),
            ("font-serif", self.serif.as_deref()),
            ("font-mono", self.mono.as_deref()),
        ]
        .into_iter()
        .filter_map(|(token, value)| value.filter(|v| !v.is_empty()).map(|v| (token, v)))
    }
}

/// Which of a theme's modes an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeSelector {
    Light,
    Dark,
    #[default]
    Both,
}

impl ModeSelector {
    pub const fn includes_light(self) -> bool {
        matches!(self, Self::Light | Self::Both)
    }

    pub const fn includes_dark(self) -> bool {
        matches!(self, Self::Dark | Self::Both)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Both => "both",
        }
    }
}

impl fmt::Display for ModeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModeSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown mode '{other}' (expected light, dark or both)")),
        }
    }
}

/// A complete theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub version: u8,
    pub radius: String,
    pub letter_spacing: String,
    #[serde(default)]
    pub fonts: Fonts,
    pub light: Mode,
    pub dark: Mode,
}

impl Theme {
    /// An empty theme with default root fields and a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_theme_id(),
            name: name.into(),
            notes: None,
            version: THEME_VERSION,
            radius: DEFAULT_RADIUS.to_string(),
            letter_spacing: DEFAULT_LETTER_SPACING.to_string(),
            fonts: Fonts::default(),
            light: Mode::new(),
            dark: Mode::new(),
        }
    }

    pub fn mode(&self, dark: bool) -> &Mode {
        if dark { &self.dark } else { &self.light }
    }

    pub fn mode_mut(&mut self, dark: bool) -> &mut Mode {
        if dark { &mut self.dark } else { &mut self.light }
    }

    /// Write a token into every mode the selector includes.
    pub fn set_token(&mut self, token: &str, value: &str, modes: ModeSelector) {
        if modes.includes_light() {
            self.light.set(token, value);
        }
        if modes.includes_dark() {
            self.dark.set(token, value);
        }
    }

    /// Load a theme from its JSON form.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if parsing fails or the version is unknown.
    pub fn from_json(json: &str) -> Result<Self, ThemeLoadError> {
        let theme: Self = serde_json::from_str(json)?;
        theme.check_version()?;
        Ok(theme)
    }

    /// Load a theme from TOML text.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if parsing fails or the version is unknown.
    pub fn from_toml(toml: &str) -> Result<Self, ThemeLoadError> {
        let theme: Self = toml::from_str(toml)?;
        theme.check_version()?;
        Ok(theme)
    }

    /// Load a theme from a `.json` or `.toml` file.
    ///
    /// # Errors
    /// Returns `ThemeLoadError` if reading or parsing fails.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ThemeLoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            Some(ext) => Err(ThemeLoadError::UnsupportedFormat(ext.into())),
            None => Err(ThemeLoadError::UnsupportedFormat("unknown".into())),
        }
    }

    /// # Errors
    /// Returns `ThemeSaveError` if serialization fails.
    pub fn to_json(&self) -> Result<String, ThemeSaveError> {
        serde_json::to_string_pretty(self).map_err(ThemeSaveError::Json)
    }

    /// # Errors
    /// Returns `ThemeSaveError` if serialization fails.
    pub fn to_toml(&self) -> Result<String, ThemeSaveError> {
        toml::to_string_pretty(self).map_err(ThemeSaveError::Toml)
    }

    /// Save to a file; the format follows the extension (JSON when absent).
    ///
    /// # Errors
    /// Returns `ThemeSaveError` if serialization or writing fails.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), ThemeSaveError> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|e| e.to_str()) {
            Some("json") | None => self.to_json()?,
            Some("toml") => self.to_toml()?,
            Some(ext) => return Err(ThemeSaveError::UnsupportedFormat(ext.into())),
        };
        fs::write(path, content)?;
        Ok(())
    }

    fn check_version(&self) -> Result<(), ThemeLoadError> {
        if self.version == THEME_VERSION {
            Ok(())
        } else {
            Err(ThemeLoadError::UnsupportedVersion(self.version))
        }
    }
}

/// A random 128-bit id rendered as 32 hex digits.
pub fn new_theme_id() -> String {
    format!("{:032x}", rand::random::<u128>())
}

/// Error loading a theme.
#[derive(Error, Debug)]
pub enum ThemeLoadError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Unsupported theme version: {0}")]
    UnsupportedVersion(u8),
}

/// Error saving a theme.
#[derive(Error, Debug)]
pub enum ThemeSaveError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
