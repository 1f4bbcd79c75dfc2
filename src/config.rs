use crate::error::PriceWatchError;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILE: &str = "pricewatch.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, PriceWatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PriceWatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("PRICEWATCH_API_URL") {
            let url = url.trim().trim_end_matches('/').to_string();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(PriceWatchError::ConfigError(format!(
                    "PRICEWATCH_API_URL must be an http(s) URL, got '{}'",
                    url
                )));
            }
            config.api_base_url = url;
        }

        if let Some(secs) = lookup("PRICEWATCH_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|e| {
                PriceWatchError::ConfigError(format!("PRICEWATCH_TIMEOUT_SECS: {}", e))
            })?;
            if secs == 0 {
                return Err(PriceWatchError::ConfigError(
                    "PRICEWATCH_TIMEOUT_SECS must be greater than zero".into(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = lookup("PRICEWATCH_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Opens the log file for appending, creating it if needed.
    pub fn open_log_file(&self) -> Result<File, PriceWatchError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;
        Ok(file)
    }
}
