#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

use anyhow::Result;
use clap::Parser;
use summary_seal::Config;
use summary_seal::app::dispatch::dispatch;
use summary_seal::cli::Cli;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout carries only command output.
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("setting default subscriber failed: {e}"))?;

    let mut config = Config::load_or_init()?;
    config.apply_env_overrides();

    let stdout = std::io::stdout();
    dispatch(cli, &config, &mut stdout.lock())
}
