use std::path::PathBuf;

/// Runtime configuration for a scrape run, sourced from the environment.
#[derive(Clone)]
pub struct AppConfig {
    /// Credential injected into every proxy request URL.
    pub api_key: String,
    /// Proxy location code, e.g. `"us"`.
    pub location: String,
    /// Number of result pages fetched per query.
    pub pages: u32,
    /// Upper bound on concurrent in-flight page fetches.
    pub max_workers: usize,
    /// Attempts per page before the page is given up on.
    pub max_retries: u32,
    /// Per-attempt request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Fixed pause after a transport-level failure, in seconds.
    pub retry_backoff_secs: u64,
    /// Directory the per-query CSV resources are written to.
    pub output_dir: PathBuf,
    pub log_level: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("location", &self.location)
            .field("pages", &self.pages)
            .field("max_workers", &self.max_workers)
            .field("max_retries", &self.max_retries)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry_backoff_secs", &self.retry_backoff_secs)
            .field("output_dir", &self.output_dir)
            .field("log_level", &self.log_level)
            .finish()
    }
}
