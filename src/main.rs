use anyhow::Context;
use clap::Parser;
use pkgmirror::config::{Cli, LogLevel};
use pkgmirror::Config;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Convert CLI args to Config - this validates immediately
    let config = Config::try_from(cli).context("invalid arguments")?;
    init_tracing(config.log_level);

    tracing::debug!(version = pkgmirror::VERSION, "starting");
    let summary = pkgmirror::commands::execute(config.task).context("copy failed")?;
    println!("{}", summary);

    Ok(())
}

/// Initialize tracing subscriber on stderr; `RUST_LOG` overrides the flags.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
