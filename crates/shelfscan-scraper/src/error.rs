use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed reading response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("page {page} of \"{query}\" failed after {attempts} attempts")]
    RetriesExhausted {
        query: String,
        page: u32,
        attempts: u32,
        #[source]
        source: Box<ScraperError>,
    },

    #[error("invalid proxy URL: {reason}")]
    InvalidProxyUrl { reason: String },
}
