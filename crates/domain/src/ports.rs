//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::model::StatusPost;

/// Error type for result fetching
///
/// Fetchers never surface this through [`ResultFetcher`]; it exists so the
/// failure kind can be logged and asserted on before collapsing to `""`.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Missing hidden field '{0}'")]
    MissingField(&'static str),
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Port for retrieving a generated result from a generator site
#[async_trait]
pub trait ResultFetcher: Send + Sync {
    /// Fetch the result text for a site identifier, or `""` on any failure
    async fn fetch_result(&self, site_id: &str, display_name: &str) -> String;
}

/// Error type for publisher operations
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
}

/// Result of a successful publish operation
#[derive(Debug, Clone)]
pub struct PublishResult {
    /// Platform-specific status ID
    pub id: String,
    /// URL to the published status, if available
    pub url: Option<String>,
}

/// Port for publishing statuses
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Publish a status, returns the created status
    async fn publish(&self, post: &StatusPost) -> Result<PublishResult, PublishError>;

    /// Check if this publisher is enabled
    fn is_enabled(&self) -> bool;

    /// Get the platform name (e.g., "mastodon")
    fn platform(&self) -> &'static str;
}

/// Port for the pause between iterations (enables deterministic testing)
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
