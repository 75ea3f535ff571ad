use thiserror::Error;

use crate::app_config::AppConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    // The proxy credential is the one required variable. The unprefixed
    // fallback matches what the proxy vendor's own snippets export.
    let api_key = lookup("SHELFSCAN_API_KEY")
        .or_else(|_| lookup("API_KEY"))
        .map_err(|_| ConfigError::MissingEnvVar("SHELFSCAN_API_KEY".to_string()))?;

    let location = or_default("SHELFSCAN_LOCATION", "us");
    let pages = parse_u32("SHELFSCAN_PAGES", "5")?;
    let max_workers = parse_usize("SHELFSCAN_MAX_WORKERS", "3")?;
    let max_retries = parse_u32("SHELFSCAN_MAX_RETRIES", "5")?;
    let request_timeout_secs = parse_u64("SHELFSCAN_REQUEST_TIMEOUT_SECS", "30")?;
    let retry_backoff_secs = parse_u64("SHELFSCAN_RETRY_BACKOFF_SECS", "2")?;
    let output_dir = PathBuf::from(or_default("SHELFSCAN_OUTPUT_DIR", "."));
    let log_level = or_default("SHELFSCAN_LOG_LEVEL", "info");

    Ok(AppConfig {
        api_key,
        location,
        pages,
        max_workers,
        max_retries,
        request_timeout_secs,
        retry_backoff_secs,
        output_dir,
        log_level,
    })
}
