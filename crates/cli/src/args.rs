//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// shindan-toot: post generator results to Mastodon
#[derive(Parser, Debug)]
#[command(name = "shindan-toot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Env file to load before reading the environment (default: ./.env if present)
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Defaults to `run` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a result for every configured site and post each one
    Run(RunArgs),

    /// Fetch a single result and print it without posting
    Fetch(FetchArgs),

    /// Configuration management
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Log statuses instead of posting them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Site identifier to fetch
    pub site_id: String,

    /// Display name to submit (defaults to SHINDAN_NAME)
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example env file
    Init {
        /// Path to write the env file
        #[arg(long, default_value = "./.env.example")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
