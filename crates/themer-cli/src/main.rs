#![forbid(unsafe_code)]

//! # Themer
//!
//! Generate, tweak and audit design-token themes.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p themer-cli -- default
//! cargo run -p themer-cli -- generate "calm ocean palette" --format json
//! ```

use themer_cli::{Cli, Config, commands, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = Config::load(&cli)?;
    logging::init(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut stdout = std::io::stdout().lock();
    runtime.block_on(commands::run(&cli.command, &config, &mut stdout))
}
