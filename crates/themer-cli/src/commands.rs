//! Subcommand implementations.
//!
//! Results go to the supplied writer; human-facing status goes to stderr.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, bail};
use themer::{
    FOREGROUND_PAIRS, GenerateError, Theme, ThemeStore, create_default_theme, render_stylesheet,
};
use themer_client::HttpThemeClient;
use tincture::{Oklch, Rgb, hex_to_oklch_triple, oklch_triple_to_hsl, unwrap_oklch_fn};
use tracing::info;

use crate::cli::{
    Command, ContrastArgs, ConvertArgs, ExportArgs, GenerateArgs, LogoArgs, OutputFormat,
};
use crate::config::Config;

/// Run one subcommand.
///
/// # Errors
///
/// Returns an error if the subcommand fails; the message is meant for users.
pub async fn run<W: Write>(command: &Command, config: &Config, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Generate(args) => generate(args, config, out).await,
        Command::Default(args) => export(&create_default_theme(), args, out),
        Command::Contrast(args) => contrast(args, config, out),
        Command::Convert(args) => convert(args, out),
        Command::Logo(args) => logo(args, config, out).await,
        Command::Diagnostics => {
            writeln!(out, "{}", config.to_diagnostic_string())?;
            Ok(())
        }
    }
}

fn client(config: &Config) -> anyhow::Result<HttpThemeClient> {
    HttpThemeClient::builder(config.endpoint.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .context("Failed to set up the generation client")
}

fn load_theme(path: Option<&Path>) -> anyhow::Result<Theme> {
    match path {
        Some(path) => Theme::from_file(path)
            .with_context(|| format!("Failed to load theme from {}", path.display())),
        None => Ok(create_default_theme()),
    }
}

/// Message shown for a failed generation.
fn describe(err: &GenerateError) -> String {
    match err.category() {
        Some(category) => format!("{} ({err})", category.user_message()),
        None => err.to_string(),
    }
}

fn export<W: Write>(theme: &Theme, args: &ExportArgs, out: &mut W) -> anyhow::Result<()> {
    let rendered = match args.format {
        OutputFormat::Css => render_stylesheet(theme),
        OutputFormat::Json => theme.to_json().context("Failed to serialize theme")?,
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(theme.name = %theme.name, output.path = %path.display(), "Theme written");
        }
        None => writeln!(out, "{}", rendered.trim_end())?,
    }
    Ok(())
}

async fn generate<W: Write>(
    args: &GenerateArgs,
    config: &Config,
    out: &mut W,
) -> anyhow::Result<()> {
    let client = client(config)?;
    let base = load_theme(args.base.as_deref())?;
    let mut store = ThemeStore::with_theme(base, config.history_limit);

    if let Err(err) = store
        .generate_theme(&client, &args.prompt, args.tweak, args.effective_mode())
        .await
    {
        bail!("{}", describe(&err));
    }

    eprintln!("{}", store.last_generation_text());
    export(store.current(), &args.export, out)
}

fn contrast<W: Write>(args: &ContrastArgs, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let base = load_theme(args.base.as_deref())?;
    let mut store = ThemeStore::with_theme(base, config.history_limit);

    let dark = args.dark || config.dark;
    if args.fix {
        for (background, foreground) in FOREGROUND_PAIRS {
            if let Some(fixed) = store.fix_contrast_in(background, dark) {
                writeln!(out, "fixed {foreground}: {fixed}")?;
            }
        }
    }

    let report = store.contrast_report(dark);
    let failing = report.iter().filter(|p| !p.check.passes).count();

    writeln!(out, "{} mode", if dark { "Dark" } else { "Light" })?;
    for pair in &report {
        writeln!(
            out,
            "{:<46} {:>6.2}:1  {}  {} {} on {}",
            format!("{}/{}", pair.background, pair.foreground),
            pair.ratio,
            if pair.check.passes { "PASS" } else { "FAIL" },
            pair.check.level.as_str(),
            pair.foreground_hex,
            pair.background_hex,
        )?;
    }
    writeln!(out, "{failing} of {} pairs below AA", report.len())?;

    if let Some(path) = &args.out {
        store
            .current()
            .to_file(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

fn convert<W: Write>(args: &ConvertArgs, out: &mut W) -> anyhow::Result<()> {
    let input = args.color.trim();

    let (hex, triple) = if input.starts_with('#') {
        let Some(rgb) = Rgb::from_hex(input) else {
            bail!("Not a HEX color: {input}");
        };
        let hex = rgb.to_hex();
        let triple = hex_to_oklch_triple(&hex);
        (hex, triple)
    } else {
        let Some(lch) = Oklch::parse(unwrap_oklch_fn(input)) else {
            bail!("Not a HEX color or OKLCH triple: {input}");
        };
        (lch.to_rgb().to_hex(), lch.to_string())
    };

    writeln!(out, "hex:   {hex}")?;
    writeln!(out, "oklch: oklch({triple})")?;
    writeln!(out, "hsl:   {}", oklch_triple_to_hsl(&triple))?;
    Ok(())
}

async fn logo<W: Write>(args: &LogoArgs, config: &Config, out: &mut W) -> anyhow::Result<()> {
    let client = client(config)?;
    let mut theme = create_default_theme();
    if let Some(name) = &args.theme_name {
        theme.name.clone_from(name);
    }
    let mut store = ThemeStore::with_theme(theme, config.history_limit);

    match store.generate_logo(&client, args.prompt.as_deref()).await {
        Ok(url) => {
            writeln!(out, "{url}")?;
            Ok(())
        }
        Err(err) => bail!("{}", describe(&err)),
    }
}
