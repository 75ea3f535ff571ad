use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::proxy::{build_proxy_url, PROXY_ENDPOINT};
use crate::retry::retry_fetch;

/// Origin the search pages live on; relative result links are resolved
/// against it.
pub const SEARCH_ORIGIN: &str = "https://www.amazon.com";

/// HTTP client for numbered search-result pages, routed through the scraping
/// proxy.
///
/// Each fetch attempt carries its own timeout. A page is retried up to
/// `max_retries` total attempts: transport failures (connection errors,
/// timeouts, non-2xx statuses) pause for a fixed backoff before the next
/// attempt, while response-handling failures retry immediately.
pub struct SearchClient {
    client: Client,
    api_key: String,
    location: String,
    proxy_endpoint: String,
    /// Total attempts per page before reporting terminal failure.
    max_retries: u32,
    /// Fixed pause after a transport-level failure.
    backoff: Duration,
}

impl SearchClient {
    /// Creates a `SearchClient` with the configured timeout and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        api_key: &str,
        location: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("shelfscan/0.1")
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            location: location.to_owned(),
            proxy_endpoint: PROXY_ENDPOINT.to_owned(),
            max_retries: max_retries.max(1),
            backoff: Duration::from_secs(backoff_secs),
        })
    }

    /// Overrides the proxy endpoint, e.g. to point at a local test server.
    #[must_use]
    pub fn with_proxy_endpoint(mut self, endpoint: &str) -> Self {
        self.proxy_endpoint = endpoint.to_owned();
        self
    }

    /// Fetches one numbered result page for `query` and returns the raw HTML
    /// body.
    ///
    /// A 200 response means the page is fetched; whether any result blocks
    /// can be extracted from the body afterwards is a separate (and always
    /// successful) concern — an empty results page is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::RetriesExhausted`] once all attempts are used
    /// up, wrapping the last per-attempt error.
    pub async fn fetch_page(&self, query: &str, page: u32) -> Result<String, ScraperError> {
        let target = Self::search_url(query, page);
        let url = build_proxy_url(&self.proxy_endpoint, &self.api_key, &target, &self.location)?;

        retry_fetch(self.max_retries, self.backoff, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                response.text().await.map_err(|source| ScraperError::Body {
                    url: url.to_string(),
                    source,
                })
            }
        })
        .await
        .map_err(|err| ScraperError::RetriesExhausted {
            query: query.to_owned(),
            page,
            attempts: self.max_retries,
            source: Box::new(err),
        })
    }

    /// Builds the target search URL for one page of a query. The query is
    /// embedded verbatim; percent encoding happens when the proxy URL wraps
    /// the whole target as a single query parameter.
    fn search_url(query: &str, page: u32) -> String {
        format!("{SEARCH_ORIGIN}/s?k={query}&page={page}")
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
