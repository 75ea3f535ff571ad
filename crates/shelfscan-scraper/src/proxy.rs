//! Proxy URL construction.
//!
//! Every page fetch goes through a scraping proxy that takes the real target
//! URL, the API credential, and a location code as query parameters. The
//! target URL is passed as a single `url` parameter and percent-encoded by
//! `Url::query_pairs_mut`, so query strings inside the target survive intact.

use reqwest::Url;

use crate::error::ScraperError;

/// Default proxy endpoint. Tests point the client at a local server instead.
pub const PROXY_ENDPOINT: &str = "https://proxy.scrapeops.io/v1/";

/// Wraps `target` in a proxy request URL carrying the API credential and
/// location code.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidProxyUrl`] when `endpoint` is not a
/// parseable base URL.
pub fn build_proxy_url(
    endpoint: &str,
    api_key: &str,
    target: &str,
    location: &str,
) -> Result<Url, ScraperError> {
    let mut url = Url::parse(endpoint).map_err(|e| ScraperError::InvalidProxyUrl {
        reason: format!("{endpoint}: {e}"),
    })?;
    url.query_pairs_mut()
        .append_pair("api_key", api_key)
        .append_pair("url", target)
        .append_pair("location", location);
    Ok(url)
}
