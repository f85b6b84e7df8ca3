//! Command-line interface for `themer`.
//!
//! # Examples
//!
//! ```bash
//! # Print the default theme as a stylesheet
//! themer default
//!
//! # Generate a theme and save it as JSON
//! themer generate "calm ocean palette" --format json --out ocean.json
//!
//! # Tweak a saved theme
//! themer generate "darker background" --tweak --base ocean.json
//!
//! # Audit and repair contrast
//! themer contrast --base ocean.json --fix
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use themer::GenerationMode;

use crate::config::LogFormat;

/// Generate, tweak and audit design-token themes.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "themer",
    author,
    version,
    about = "Generate, tweak and audit design-token themes",
    long_about = "Turns natural-language prompts into light/dark design-token themes \
                  rendered as CSS custom properties, with WCAG contrast checks."
)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "THEMER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the generation service
    #[arg(long, global = true, env = "THEMER_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "THEMER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Number of undo snapshots kept
    #[arg(long, global = true, env = "THEMER_HISTORY")]
    pub history_limit: Option<usize>,

    /// Log output format
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate a new theme, or tweak an existing one
    Generate(GenerateArgs),

    /// Print the default theme
    Default(ExportArgs),

    /// Report contrast for every background/foreground pair
    Contrast(ContrastArgs),

    /// Convert a color between HEX, OKLCH and HSL
    Convert(ConvertArgs),

    /// Generate a logo for a theme
    Logo(LogoArgs),

    /// Show the resolved configuration
    Diagnostics,
}

/// Arguments for the generate subcommand.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// What the theme should look like, or how to change it
    pub prompt: String,

    /// Patch the base theme instead of replacing it
    #[arg(long)]
    pub tweak: bool,

    /// Generation mode (create, remix or tweak)
    ///
    /// Defaults to tweak with --tweak and create otherwise
    #[arg(long)]
    pub mode: Option<GenerationMode>,

    /// Theme JSON/TOML file to start from
    #[arg(long)]
    pub base: Option<PathBuf>,

    #[command(flatten)]
    pub export: ExportArgs,
}

impl GenerateArgs {
    pub fn effective_mode(&self) -> GenerationMode {
        self.mode.unwrap_or(if self.tweak {
            GenerationMode::Tweak
        } else {
            GenerationMode::Create
        })
    }
}

/// Where and how to write a theme.
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = OutputFormat::Css)]
    pub format: OutputFormat,

    /// Output file path (stdout if omitted)
    #[arg(long, short = 'o')]
    pub out: Option<PathBuf>,
}

/// Arguments for the contrast subcommand.
#[derive(Args, Debug, Clone)]
pub struct ContrastArgs {
    /// Theme JSON/TOML file to audit (default theme if omitted)
    #[arg(long)]
    pub base: Option<PathBuf>,

    /// Report the dark mode
    #[arg(long)]
    pub dark: bool,

    /// Repair failing pairs before reporting
    #[arg(long)]
    pub fix: bool,

    /// Output file path for the repaired theme (.json or .toml)
    #[arg(long, requires = "fix")]
    pub out: Option<PathBuf>,
}

/// Arguments for the convert subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// `#rrggbb`, `#rgb`, `oklch(L C H)` or a bare `L C H` triple
    pub color: String,
}

/// Arguments for the logo subcommand.
#[derive(Args, Debug, Clone)]
pub struct LogoArgs {
    /// Logo description (a default naming the theme is used if omitted)
    pub prompt: Option<String>,

    /// Theme name to put in the request
    #[arg(long)]
    pub theme_name: Option<String>,
}

/// Theme output formats.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Stylesheet with `:root` and `.dark` blocks
    #[default]
    Css,
    /// Internal theme JSON
    Json,
}

impl Cli {
    /// Parse command line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create CLI from iterator (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if argument parsing fails.
    pub fn try_parse_from<I, T>(iter: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_generate() {
        let cli = Cli::try_parse_from(["themer", "generate", "warm sunset"]).unwrap();
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.prompt, "warm sunset");
                assert!(!args.tweak);
                assert_eq!(args.effective_mode(), GenerationMode::Create);
                assert_eq!(args.export.format, OutputFormat::Css);
                assert!(args.export.out.is_none());
            }
            other => panic!("Expected Generate command, got {other:?}"),
        }
    }

    #[test]
    fn cli_tweak_defaults_mode() {
        let cli = Cli::try_parse_from([
            "themer", "generate", "darker", "--tweak", "--base", "t.json", "-f", "json",
        ])
        .unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        assert_eq!(args.effective_mode(), GenerationMode::Tweak);
        assert_eq!(args.base, Some(PathBuf::from("t.json")));
        assert_eq!(args.export.format, OutputFormat::Json);

        let cli = Cli::try_parse_from(["themer", "generate", "x", "--mode", "remix"]).unwrap();
        let Command::Generate(args) = cli.command else {
            panic!("Expected Generate command");
        };
        assert_eq!(args.effective_mode(), GenerationMode::Remix);
    }

    #[test]
    fn cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["themer", "generate", "x", "--mode", "mutate"]).is_err());
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "themer",
            "diagnostics",
            "--endpoint",
            "http://gen.local",
            "--timeout-secs",
            "5",
            "-vv",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Diagnostics));
        assert_eq!(cli.endpoint.as_deref(), Some("http://gen.local"));
        assert_eq!(cli.timeout_secs, Some(5));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn cli_parses_contrast() {
        let cli = Cli::try_parse_from(["themer", "contrast", "--dark", "--fix"]).unwrap();
        let Command::Contrast(args) = cli.command else {
            panic!("Expected Contrast command");
        };
        assert!(args.dark && args.fix);
        assert!(Cli::try_parse_from(["themer", "contrast", "--out", "x.json"]).is_err());
    }

    #[test]
    fn cli_parses_convert_and_logo() {
        let cli = Cli::try_parse_from(["themer", "convert", "0.5 0.1 200"]).unwrap();
        assert!(matches!(cli.command, Command::Convert(ref a) if a.color == "0.5 0.1 200"));

        let cli = Cli::try_parse_from(["themer", "logo", "--theme-name", "Dusk"]).unwrap();
        let Command::Logo(args) = cli.command else {
            panic!("Expected Logo command");
        };
        assert!(args.prompt.is_none());
        assert_eq!(args.theme_name.as_deref(), Some("Dusk"));
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["themer"]).is_err());
    }

    #[test]
    fn cli_help_works() {
        let err = Cli::try_parse_from(["themer", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
