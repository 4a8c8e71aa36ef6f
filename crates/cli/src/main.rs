//! shindan-toot CLI entry point

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod args;
mod commands;
mod config;

use args::{Cli, Commands, RunArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run(RunArgs::default()));

    // The env file goes first so a RUST_LOG it sets reaches the filter
    let env_file = match command {
        Commands::Config(_) => None,
        _ => config::load_env_file(cli.env_file.as_deref())?,
    };

    // Initialize logging
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    init_logging(log_level)?;

    if let Some(path) = &env_file {
        tracing::debug!(path = %path.display(), "Loaded env file");
    }

    // Execute command
    match command {
        Commands::Run(args) => commands::run::execute(args).await,
        Commands::Fetch(args) => commands::fetch::execute(args).await,
        Commands::Config(args) => commands::config::execute(args).await,
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}
