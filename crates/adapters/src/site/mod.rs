//! Generator site adapters
//!
//! One [`ResultFetcher`](shindan_toot_domain::ResultFetcher) per site family:
//! - `tokenized`: GET for hidden fields, then POST with the session cookie
//! - `direct`: single POST with the display name

mod direct;
pub mod html;
mod tokenized;

pub use direct::DirectPostFetcher;
pub use tokenized::TokenizedFormFetcher;

use shindan_toot_domain::FetchError;

/// Response of the final form submission
#[derive(Debug, Clone)]
pub struct Fetched {
    /// HTTP status of the POST
    pub status: u16,
    /// Extracted result text, empty when no result container matched
    pub text: String,
}

pub(crate) fn network_error(e: reqwest::Error) -> FetchError {
    FetchError::Network(e.to_string())
}

/// Log the outcome of a fetch and collapse failures to an empty result
pub(crate) fn settle(site_id: &str, outcome: Result<Fetched, FetchError>) -> String {
    match outcome {
        Ok(fetched) => {
            if (200..300).contains(&fetched.status) {
                tracing::info!(
                    site_id = %site_id,
                    status = fetched.status,
                    result = %fetched.text,
                    "Fetched result"
                );
            } else {
                tracing::warn!(
                    site_id = %site_id,
                    status = fetched.status,
                    result = %fetched.text,
                    "Generator returned non-success status"
                );
            }
            fetched.text
        }
        Err(e) => {
            tracing::warn!(site_id = %site_id, error = %e, "Failed to fetch result");
            String::new()
        }
    }
}
