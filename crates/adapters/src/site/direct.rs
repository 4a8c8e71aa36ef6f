//! Direct-post site adapter

use async_trait::async_trait;
use reqwest::Client;
use shindan_toot_domain::{FetchError, ResultFetcher};
use std::time::Duration;

use super::html::extract_result;
use super::{Fetched, network_error, settle};

const NAME_FIELD: &str = "u";
const RESULT_IDS: [&str; 2] = ["copy_text", "copy_text_140"];

/// Fetcher for sites that accept the display name in a single POST
pub struct DirectPostFetcher {
    client: Client,
    base_url: String,
}

impl DirectPostFetcher {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub async fn try_fetch(
        &self,
        site_id: &str,
        display_name: &str,
    ) -> Result<Fetched, FetchError> {
        let url = format!("{}/{}", self.base_url, site_id);

        let response = self
            .client
            .post(&url)
            .form(&[(NAME_FIELD, display_name)])
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(network_error)?;

        Ok(Fetched {
            status,
            text: extract_result(&body, &RESULT_IDS),
        })
    }
}

#[async_trait]
impl ResultFetcher for DirectPostFetcher {
    async fn fetch_result(&self, site_id: &str, display_name: &str) -> String {
        settle(site_id, self.try_fetch(site_id, display_name).await)
    }
}
