//! Tolerant parsing of the generator's wire format.
//!
//! The generator promises little beyond "a JSON object", so parsing accepts
//! extra keys, stringifies numbers, and drops values it cannot use. The only
//! hard failure is a missing `theme.light` or `theme.dark` object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Flat token -> value map for one mode, as sent over the wire.
pub type TokenMap = BTreeMap<String, String>;

/// Per-mode token maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadModes {
    pub light: TokenMap,
    pub dark: TokenMap,
}

/// A generator response: a free-text message plus HEX-valued token maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePayload {
    #[serde(default)]
    pub text: String,
    pub theme: PayloadModes,
}

/// Why a response could not be read as a theme payload.
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("response is not a JSON object")]
    NotAnObject,
    #[error("response has no theme object")]
    MissingTheme,
    #[error("response theme has no {0} mode")]
    MissingMode(&'static str),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ThemePayload {
    pub fn new(text: impl Into<String>, light: TokenMap, dark: TokenMap) -> Self {
        Self {
            text: text.into(),
            theme: PayloadModes { light, dark },
        }
    }

    /// Parse a raw response value.
    ///
    /// # Errors
    /// Returns `PayloadError` when the value is not an object or lacks either mode.
    pub fn from_value(value: &Value) -> Result<Self, PayloadError> {
        let root = value.as_object().ok_or(PayloadError::NotAnObject)?;
        let theme = root
            .get("theme")
            .and_then(Value::as_object)
            .ok_or(PayloadError::MissingTheme)?;

        let light = parse_mode(theme.get("light"), "light")?;
        let dark = parse_mode(theme.get("dark"), "dark")?;

        let text = match root.get("text") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => {
                debug!(payload.text = %other, "Ignoring non-string response text");
                String::new()
            }
            None => String::new(),
        };

        Ok(Self::new(text, light, dark))
    }

    /// Parse raw JSON text.
    ///
    /// # Errors
    /// Returns `PayloadError` on invalid JSON or a malformed shape.
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn mode(&self, dark: bool) -> &TokenMap {
        if dark {
            &self.theme.dark
        } else {
            &self.theme.light
        }
    }
}

fn parse_mode(value: Option<&Value>, name: &'static str) -> Result<TokenMap, PayloadError> {
    let object = value
        .and_then(Value::as_object)
        .ok_or(PayloadError::MissingMode(name))?;

    let mut tokens = TokenMap::new();
    for (token, raw) in object {
        match raw {
            Value::String(s) => {
                tokens.insert(token.clone(), s.clone());
            }
            Value::Number(n) => {
                tokens.insert(token.clone(), n.to_string());
            }
            Value::Null => {}
            other => {
                warn!(
                    payload.mode = name,
                    theme.token = %token,
                    payload.value = %other,
                    "Ignoring non-string token value"
                );
            }
        }
    }
    Ok(tokens)
}
