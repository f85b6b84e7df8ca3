//! Contracts for the external theme and logo generators.
//!
//! The store only sees these traits. `themer-client` implements them over
//! HTTP; tests implement them in memory.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payload::PayloadError;

/// Upper bound (exclusive) for the random request seed.
pub const SEED_RANGE: u32 = 1000;

/// What kind of generation the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    #[default]
    Create,
    Remix,
    Tweak,
}

impl GenerationMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Remix => "remix",
            Self::Tweak => "tweak",
        }
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Self::Create),
            "remix" => Ok(Self::Remix),
            "tweak" => Ok(Self::Tweak),
            other => Err(format!(
                "unknown generation mode '{other}' (expected create, remix or tweak)"
            )),
        }
    }
}

/// Body of a theme generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub prompt: String,
    pub use_base: bool,
    pub mode: GenerationMode,
    pub seed: u32,
    pub allow_fonts: bool,
    pub allow_shadows: bool,
}

impl GenerationRequest {
    /// A request with a random seed, fonts allowed and shadows disallowed.
    pub fn new(prompt: impl Into<String>, use_base: bool, mode: GenerationMode) -> Self {
        use rand::Rng;
        Self {
            prompt: prompt.into(),
            use_base,
            mode,
            seed: rand::rng().random_range(0..SEED_RANGE),
            allow_fonts: true,
            allow_shadows: false,
        }
    }
}

/// Body of a logo generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoRequest {
    pub prompt: String,
    pub theme_name: String,
}

/// Successful logo generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoResponse {
    #[serde(default)]
    pub success: bool,
    pub logo_url: String,
    #[serde(default)]
    pub prompt: String,
}

/// Error body returned by both endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// The prompt used when a logo request names only the theme.
pub fn default_logo_prompt(theme_name: &str) -> String {
    let name = if theme_name.trim().is_empty() {
        "Themer"
    } else {
        theme_name
    };
    format!(
        "Create a modern, minimalist logo for \"{name}\" - clean design, suitable for web use, \
         professional appearance, high contrast, works well on both light and dark backgrounds"
    )
}

/// Failure classes an upstream generator reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamCategory {
    SensitiveContent,
    RateLimited,
    InvalidPrompt,
    Timeout,
    Network,
    Generic,
}

impl UpstreamCategory {
    /// Classify an upstream error message by known substrings.
    ///
    /// Checks run in a fixed order, so a message mentioning both a rate limit
    /// and a timeout counts as rate limited.
    pub fn classify(message: &str) -> Self {
        let has = |needle: &str| message.contains(needle);
        if has("E005") || has("sensitive") {
            Self::SensitiveContent
        } else if has("rate limit") || has("quota") {
            Self::RateLimited
        } else if has("invalid") || has("malformed") {
            Self::InvalidPrompt
        } else if has("timeout") {
            Self::Timeout
        } else if has("network") || has("fetch") {
            Self::Network
        } else {
            Self::Generic
        }
    }

    /// Best guess from an HTTP status when the message says nothing useful.
    pub const fn from_status(status: u16) -> Self {
        match status {
            400 => Self::InvalidPrompt,
            408 => Self::Timeout,
            429 => Self::RateLimited,
            502..=504 => Self::Network,
            _ => Self::Generic,
        }
    }

    pub const fn status_code(self) -> u16 {
        match self {
            Self::SensitiveContent | Self::InvalidPrompt => 400,
            Self::RateLimited => 429,
            Self::Timeout => 408,
            Self::Network => 503,
            Self::Generic => 500,
        }
    }

    pub const fn user_message(self) -> &'static str {
        match self {
            Self::SensitiveContent => "Content flagged as sensitive. Please try a different prompt.",
            Self::RateLimited => "Rate limit exceeded. Please try again in a moment.",
            Self::InvalidPrompt => "Invalid prompt. Please try a different description.",
            Self::Timeout => "Request timed out. Please try again.",
            Self::Network => "Network error. Please check your connection and try again.",
            Self::Generic => "Generation failed",
        }
    }
}

impl fmt::Display for UpstreamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SensitiveContent => "sensitive-content",
            Self::RateLimited => "rate-limited",
            Self::InvalidPrompt => "invalid-prompt",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// Why a generation request failed.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Configuration`](GenerateError::Configuration) | Fix credentials or endpoint; do not retry |
/// | [`InvalidResponse`](GenerateError::InvalidResponse) | Keep the current theme; retry may help |
/// | [`Upstream`](GenerateError::Upstream) | Show the category's user message |
/// | [`Transport`](GenerateError::Transport) | Check connectivity and retry |
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Missing credentials or endpoint configuration.
    #[error("{0}")]
    Configuration(String),

    /// The response could not be read as a theme or logo.
    #[error("{0}")]
    InvalidResponse(String),

    /// The generator answered with an error status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        category: UpstreamCategory,
    },

    /// The request never got an answer.
    #[error("{0}")]
    Transport(String),
}

impl GenerateError {
    /// Build an upstream error, classifying configuration problems and the
    /// message's failure category.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("not configured") {
            return Self::Configuration(message);
        }
        let category = match UpstreamCategory::classify(&message) {
            UpstreamCategory::Generic => UpstreamCategory::from_status(status),
            category => category,
        };
        Self::Upstream {
            status,
            message,
            category,
        }
    }

    pub const fn category(&self) -> Option<UpstreamCategory> {
        match self {
            Self::Upstream { category, .. } => Some(*category),
            _ => None,
        }
    }
}

impl From<PayloadError> for GenerateError {
    fn from(err: PayloadError) -> Self {
        Self::InvalidResponse(format!("Invalid theme structure received from API: {err}"))
    }
}

/// Produces raw theme payloads from prompts.
#[async_trait]
pub trait ThemeGenerator: Send + Sync {
    /// Send a request and return the response body as JSON.
    async fn generate(&self, request: &GenerationRequest) -> Result<serde_json::Value, GenerateError>;
}

/// Produces logo images from prompts.
#[async_trait]
pub trait LogoGenerator: Send + Sync {
    async fn generate_logo(&self, request: &LogoRequest) -> Result<LogoResponse, GenerateError>;
}
