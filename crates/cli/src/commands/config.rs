//! Config command - configuration management

use anyhow::{Context, Result};
use std::fs;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => init_config(path, force).await,
    }
}

async fn init_config(path: std::path::PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Env file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    let content = AppConfig::example_env();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&path, content)
        .with_context(|| format!("Failed to write env file: {}", path.display()))?;

    println!("Created env file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Copy it to .env and fill in your Mastodon server and access token");
    println!("  2. Set SHINDAN_IDS and SHINDAN_NAME");
    println!("  3. Run 'shindan-toot fetch <id>' to check a single site");
    println!("  4. Run 'shindan-toot run --dry-run' to test a full pass");

    Ok(())
}
