//! Mastodon publishing adapter

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use shindan_toot_domain::{PublishError, PublishResult, Publisher, StatusPost};
use std::time::Duration;

/// Mastodon publisher for creating statuses
pub struct MastodonPublisher {
    client: Client,
    access_token: SecretString,
    base_url: String,
    enabled: bool,
}

impl MastodonPublisher {
    /// `base_url` is the instance URL including scheme, e.g. `https://mstdn.example`
    pub fn new(
        base_url: String,
        access_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, PublishError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PublishError::Network(e.to_string()))?;

        Ok(Self {
            client,
            access_token,
            base_url,
            enabled: true,
        })
    }

    /// Create a disabled publisher (for dry-run)
    pub fn disabled() -> Self {
        Self {
            client: Client::new(),
            access_token: SecretString::new("".into()),
            base_url: String::new(),
            enabled: false,
        }
    }
}

#[derive(Deserialize)]
struct StatusResponse {
    id: String,
    #[serde(default)]
    url: Option<String>,
}

#[async_trait]
impl Publisher for MastodonPublisher {
    async fn publish(&self, post: &StatusPost) -> Result<PublishResult, PublishError> {
        if !self.enabled {
            return Err(PublishError::Api("Publisher is disabled".to_string()));
        }

        let mut form = vec![("status", post.text.as_str())];
        if let Some(visibility) = post.visibility {
            form.push(("visibility", visibility.as_str()));
        }

        let url = format!("{}/api/v1/statuses", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.access_token.expose_secret()),
            )
            .form(&form)
            .send()
            .await
            .map_err(|e| PublishError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                return Err(PublishError::Auth(body));
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(PublishError::RateLimited),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(PublishError::Api(format!(
                    "Failed to create status ({}): {}",
                    status, body
                )));
            }
            _ => {}
        }

        let status: StatusResponse = response
            .json()
            .await
            .map_err(|e| PublishError::Api(e.to_string()))?;

        Ok(PublishResult {
            id: status.id,
            url: status.url,
        })
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn platform(&self) -> &'static str {
        "mastodon"
    }
}
