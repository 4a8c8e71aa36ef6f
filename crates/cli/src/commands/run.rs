//! Run command - one pass of fetch and publish over the configured sites

use anyhow::{Context, Result};
use shindan_toot_adapters::mastodon::MastodonPublisher;
use shindan_toot_domain::{
    IterationStatus, Publisher, TokioSleeper,
    usecases::{Driver, DriverConfig},
};
use std::sync::Arc;

use crate::args::RunArgs;
use crate::commands::fetch::build_fetcher;
use crate::config::AppConfig;

pub async fn execute(args: RunArgs) -> Result<()> {
    let config = AppConfig::load()?;

    let dry_run = args.dry_run || config.dry_run;

    tracing::info!(
        dry_run = dry_run,
        site_ids = ?config.site_ids,
        variant = %config.site.variant,
        wait_secs = config.wait.as_secs(),
        "Starting shindan-toot run"
    );

    let fetcher = build_fetcher(&config.site)?;
    let publisher = build_publisher(&config, dry_run)?;

    let driver = Driver::new(
        fetcher,
        publisher,
        Arc::new(TokioSleeper),
        DriverConfig {
            site_ids: config.site_ids.clone(),
            display_name: config.display_name.clone(),
            wait: config.wait,
            visibility: config.mastodon.visibility,
            dry_run,
            skip_empty_results: config.skip_empty_results,
        },
    );

    let outcomes = driver.run_once().await;

    let published = outcomes.iter().filter(|o| o.is_published()).count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o.status, IterationStatus::Failed(_)))
        .count();

    tracing::info!(
        total = outcomes.len(),
        published = published,
        failed = failed,
        "shindan-toot run completed"
    );
    Ok(())
}

fn build_publisher(config: &AppConfig, dry_run: bool) -> Result<Arc<dyn Publisher>> {
    if dry_run {
        return Ok(Arc::new(MastodonPublisher::disabled()));
    }

    let publisher = MastodonPublisher::new(
        config.mastodon.base_url.clone(),
        config.mastodon.access_token.clone(),
        config.site.timeout,
    )
    .context("Failed to initialize Mastodon publisher")?;

    Ok(Arc::new(publisher))
}
