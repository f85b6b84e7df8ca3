//! Runtime configuration for `themer`.
//!
//! [`Config`] is the single source of truth for settings, whatever layer
//! they came from. Layers apply in this order, later ones winning:
//!
//! 1. built-in defaults
//! 2. the TOML file named by `--config` / `THEMER_CONFIG`
//! 3. environment variables (`THEMER_ENDPOINT`, `THEMER_TIMEOUT_SECS`, `THEMER_HISTORY`)
//! 4. command-line flags
//!
//! Layers 3 and 4 both arrive through clap, which prefers a flag over its
//! environment variable.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use themer::MAX_HISTORY;

use crate::cli::Cli;

/// Default generation service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Log output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the generation service.
    pub endpoint: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of undo snapshots kept.
    pub history_limit: usize,

    /// Whether mode-dependent commands default to the dark mode.
    pub dark: bool,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            history_limit: MAX_HISTORY,
            dark: false,
            verbosity: 0,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every layer for `cli` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or the
    /// merged settings are invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid TOML or unknown value types.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Read a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or invalid.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Overlay values given on the command line or through the environment.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(endpoint) = &cli.endpoint {
            self.endpoint.clone_from(endpoint);
        }
        if let Some(timeout) = cli.timeout_secs {
            self.timeout_secs = timeout;
        }
        if let Some(limit) = cli.history_limit {
            self.history_limit = limit;
        }
        if let Some(format) = cli.log_format {
            self.log_format = format;
        }
        if cli.verbose > 0 {
            self.verbosity = cli.verbose;
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }

    /// The `EnvFilter` directive matching the verbosity.
    #[must_use]
    pub const fn log_directive(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Endpoint: {}", self.endpoint));
        lines.push(format!("Timeout: {}s", self.timeout_secs));
        lines.push(format!("History limit: {}", self.history_limit));
        lines.push(format!("Mode: {}", if self.dark { "dark" } else { "light" }));
        lines.push(format!("Verbosity: {} ({})", self.verbosity, self.log_directive()));
        lines.push(format!("Log format: {:?}", self.log_format));

        lines.join("\n")
    }
}

/// Configuration error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    /// Config file is not valid TOML for this schema.
    #[error("Invalid config file: {0}")]
    Parse(String),

    /// Endpoint is blank.
    #[error("Endpoint must not be empty")]
    EmptyEndpoint,

    /// Timeout of zero seconds.
    #[error("Request timeout must be at least one second")]
    ZeroTimeout,

    /// History that cannot hold the current theme.
    #[error("History limit must be at least 1")]
    ZeroHistory,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["themer"];
        argv.extend_from_slice(args);
        argv.push("diagnostics");
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::new();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.history_limit, 50);
        assert!(!config.dark);
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("endpoint = \"https://gen.example.com\"\ndark = true\n")
            .unwrap();
        assert_eq!(config.endpoint, "https://gen.example.com");
        assert!(config.dark);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = Config::from_toml_str("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "endpoint = \"http://file.local\"\ntimeout_secs = 10\nverbosity = 1").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = Config::load(&cli(&["--config", &path, "--timeout-secs", "30"])).unwrap();
        assert_eq!(config.endpoint, "http://file.local");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.verbosity, 1);

        let config = Config::load(&cli(&["--config", &path, "-vvv"])).unwrap();
        assert_eq!(config.verbosity, 3);
        assert_eq!(config.log_directive(), "trace");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Config::load(&cli(&["--config", "/nonexistent/themer.toml"])).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn validation_rejects_zeroes() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));

        let config = Config {
            history_limit: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroHistory)));

        let config = Config {
            endpoint: "  ".into(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyEndpoint)));
    }

    #[test]
    fn diagnostic_string_lists_settings() {
        let text = Config::default().to_diagnostic_string();
        assert!(text.contains("Endpoint: http://localhost:3000"));
        assert!(text.contains("Timeout: 60s"));
        assert!(text.contains("Verbosity: 0 (warn)"));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::ZeroHistory.to_string(),
            "History limit must be at least 1"
        );
        assert!(
            ConfigError::FileNotFound(PathBuf::from("x.toml"))
                .to_string()
                .contains("x.toml")
        );
    }
}
