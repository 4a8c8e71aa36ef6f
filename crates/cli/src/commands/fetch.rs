//! Fetch command - one-shot result retrieval

use anyhow::{Context, Result};
use shindan_toot_adapters::site::{DirectPostFetcher, TokenizedFormFetcher};
use shindan_toot_domain::{ResultFetcher, SiteVariant};
use std::sync::Arc;

use crate::args::FetchArgs;
use crate::config::{RawSettings, SiteConfig};

/// Print one result to stdout
///
/// An empty result is printed as an empty line and is not an error, the same
/// way a pass carries on past it.
pub async fn execute(args: FetchArgs) -> Result<()> {
    let raw = RawSettings::load()?;
    let site = SiteConfig::from_raw(&raw)?;

    let name = args
        .name
        .or(raw.shindan_name)
        .filter(|name| !name.trim().is_empty())
        .context("No display name given; pass --name or set SHINDAN_NAME")?;

    tracing::info!(
        site_id = %args.site_id,
        variant = %site.variant,
        base_url = %site.base_url,
        "Fetching single result"
    );

    let fetcher = build_fetcher(&site)?;
    let text = fetcher.fetch_result(&args.site_id, &name).await;

    if text.is_empty() {
        tracing::warn!(site_id = %args.site_id, "Fetch returned an empty result");
    }

    println!("{}", text);
    Ok(())
}

pub(crate) fn build_fetcher(site: &SiteConfig) -> Result<Arc<dyn ResultFetcher>> {
    let fetcher: Arc<dyn ResultFetcher> = match site.variant {
        SiteVariant::TokenizedForm => Arc::new(TokenizedFormFetcher::new(
            site.base_url.clone(),
            site.timeout,
        )),
        SiteVariant::DirectPost => Arc::new(
            DirectPostFetcher::new(site.base_url.clone(), site.timeout)
                .context("Failed to initialize direct-post fetcher")?,
        ),
    };
    Ok(fetcher)
}
