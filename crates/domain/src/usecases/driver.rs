//! Driver use case - one pass of fetch, publish, wait over the site list

use std::sync::Arc;
use std::time::Duration;

use crate::{
    model::{IterationOutcome, IterationStatus, StatusPost, Visibility},
    ports::{Publisher, ResultFetcher, Sleeper},
};

/// Configuration for a driver pass
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Site identifiers in posting order
    pub site_ids: Vec<String>,
    /// Name submitted to every generator
    pub display_name: String,
    /// Pause between consecutive identifiers
    pub wait: Duration,
    /// Visibility for created statuses
    pub visibility: Option<Visibility>,
    /// Log statuses instead of publishing
    pub dry_run: bool,
    /// Don't post results that came back empty
    pub skip_empty_results: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            site_ids: vec![],
            display_name: String::new(),
            wait: Duration::ZERO,
            visibility: None,
            dry_run: false,
            skip_empty_results: false,
        }
    }
}

/// Sequential fetch-and-publish driver
pub struct Driver<F, P, S>
where
    F: ResultFetcher + ?Sized,
    P: Publisher + ?Sized,
    S: Sleeper + ?Sized,
{
    fetcher: Arc<F>,
    publisher: Arc<P>,
    sleeper: Arc<S>,
    config: DriverConfig,
}

impl<F, P, S> Driver<F, P, S>
where
    F: ResultFetcher + ?Sized,
    P: Publisher + ?Sized,
    S: Sleeper + ?Sized,
{
    pub fn new(fetcher: Arc<F>, publisher: Arc<P>, sleeper: Arc<S>, config: DriverConfig) -> Self {
        Self {
            fetcher,
            publisher,
            sleeper,
            config,
        }
    }

    /// Process every configured identifier once, in order
    ///
    /// Failures are logged and recorded per identifier; they never stop the
    /// pass.
    pub async fn run_once(&self) -> Vec<IterationOutcome> {
        let total = self.config.site_ids.len();
        let mut outcomes = Vec::with_capacity(total);

        for (index, site_id) in self.config.site_ids.iter().enumerate() {
            let outcome = self.process(site_id).await;
            outcomes.push(outcome);

            if index + 1 < total {
                tracing::debug!(
                    wait_secs = self.config.wait.as_secs(),
                    next = %self.config.site_ids[index + 1],
                    "Waiting before next site"
                );
                self.sleeper.sleep(self.config.wait).await;
            }
        }

        outcomes
    }

    async fn process(&self, site_id: &str) -> IterationOutcome {
        let text = self
            .fetcher
            .fetch_result(site_id, &self.config.display_name)
            .await;

        if text.is_empty() {
            if self.config.skip_empty_results {
                tracing::warn!(site_id = %site_id, "Empty result, skipping post");
                return IterationOutcome {
                    site_id: site_id.to_string(),
                    text,
                    status: IterationStatus::SkippedEmpty,
                };
            }
            tracing::warn!(site_id = %site_id, "Empty result, posting anyway");
        }

        let post = StatusPost {
            text: text.clone(),
            site_id: site_id.to_string(),
            visibility: self.config.visibility,
        };

        if self.config.dry_run || !self.publisher.is_enabled() {
            tracing::info!(
                site_id = %site_id,
                platform = self.publisher.platform(),
                status_text = %post.text,
                "[DRY RUN] Would publish"
            );
            return IterationOutcome {
                site_id: site_id.to_string(),
                text,
                status: IterationStatus::DryRun,
            };
        }

        let status = match self.publisher.publish(&post).await {
            Ok(result) => {
                tracing::info!(
                    site_id = %site_id,
                    status_id = %result.id,
                    url = ?result.url,
                    "Published status"
                );
                IterationStatus::Published(result)
            }
            Err(e) => {
                tracing::error!(
                    site_id = %site_id,
                    platform = self.publisher.platform(),
                    error = %e,
                    "Failed to publish status"
                );
                IterationStatus::Failed(e.to_string())
            }
        };

        IterationOutcome {
            site_id: site_id.to_string(),
            text,
            status,
        }
    }
}
