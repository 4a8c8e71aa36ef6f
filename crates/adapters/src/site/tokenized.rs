//! Tokenized-form site adapter

use async_trait::async_trait;
use reqwest::Client;
use shindan_toot_domain::{FetchError, ResultFetcher};
use std::time::Duration;

use super::html::{HIDDEN_NAME_FIELD, TOKEN_FIELD, extract_hidden_fields, extract_result};
use super::{Fetched, network_error, settle};

const NAME_FIELD: &str = "name";
const RESULT_IDS: [&str; 2] = ["copy-textarea", "copy-textarea-140"];

/// Fetcher for sites that require a token round-trip before the form POST
///
/// A new client (and cookie jar) is built for every fetch, so session cookies
/// never carry over from one identifier to the next.
pub struct TokenizedFormFetcher {
    base_url: String,
    timeout: Duration,
}

impl TokenizedFormFetcher {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }

    fn client(&self) -> Result<Client, FetchError> {
        Client::builder()
            .cookie_store(true)
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))
    }

    /// Run the GET/POST exchange, keeping the failure kind
    pub async fn try_fetch(
        &self,
        site_id: &str,
        display_name: &str,
    ) -> Result<Fetched, FetchError> {
        let url = format!("{}/{}", self.base_url, site_id);
        let client = self.client()?;

        let page = client.get(&url).send().await.map_err(network_error)?;
        if !page.status().is_success() {
            tracing::debug!(
                site_id = %site_id,
                status = %page.status(),
                "Form page returned non-success status"
            );
        }
        let page_body = page.text().await.map_err(network_error)?;

        let fields = extract_hidden_fields(&page_body)?;

        let form = [
            (TOKEN_FIELD, fields.token.as_str()),
            (NAME_FIELD, display_name),
            (HIDDEN_NAME_FIELD, fields.hidden_name.as_str()),
        ];

        let response = client
            .post(&url)
            .form(&form)
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
impl ResultFetcher for TokenizedFormFetcher {
    async fn fetch_result(&self, site_id: &str, display_name: &str) -> String {
        settle(site_id, self.try_fetch(site_id, display_name).await)
    }
}
