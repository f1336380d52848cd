use crate::errors::AppError;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.apollo.io/v1";
pub const DEFAULT_RATE_LIMIT_DELAY_MS: u64 = 400;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub rate_limit_delay_ms: u64,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// `from_env` delegates here; tests pass a closure over a map.
    pub fn from_vars<F>(var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: var("APOLLO_API_KEY")
                .ok_or_else(|| {
                    AppError::Config("APOLLO_API_KEY environment variable required".to_string())
                })
                .and_then(|key| {
                    if key.trim().is_empty() {
                        return Err(AppError::Config(
                            "APOLLO_API_KEY cannot be empty".to_string(),
                        ));
                    }
                    Ok(key.trim().to_string())
                })?,
            base_url: var("APOLLO_BASE_URL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string(),
            rate_limit_delay_ms: parse_u64(
                var("APOLLO_RATE_LIMIT_DELAY_MS"),
                "APOLLO_RATE_LIMIT_DELAY_MS",
                DEFAULT_RATE_LIMIT_DELAY_MS,
            )?,
            timeout_secs: parse_u64(
                var("APOLLO_TIMEOUT_SECS"),
                "APOLLO_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?,
        };

        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(AppError::Config(
                "APOLLO_BASE_URL must start with http:// or https://".to_string(),
            ));
        }
        url::Url::parse(&config.base_url).map_err(|e| {
            AppError::Config(format!("APOLLO_BASE_URL is not a valid URL: {}", e))
        })?;
        if config.timeout_secs == 0 {
            return Err(AppError::Config(
                "APOLLO_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        // Never log the key itself
        tracing::debug!("Apollo Base URL: {}", config.base_url);
        tracing::debug!(
            "Rate limit delay: {}ms, request timeout: {}s",
            config.rate_limit_delay_ms,
            config.timeout_secs
        );

        Ok(config)
    }

    pub fn rate_limit_delay(&self) -> Duration {
        Duration::from_millis(self.rate_limit_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_u64(raw: Option<String>, name: &str, default: u64) -> Result<u64, AppError> {
    match raw.filter(|s| !s.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a non-negative integer", name))),
        None => Ok(default),
    }
}
