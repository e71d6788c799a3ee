//! Configuration loading from TOML files.

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Price feed endpoint settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    /// Base URL of the simple-price API (e.g. `https://api.coingecko.com/api/v3`).
    pub api_url: String,
    /// Asset identifier in the feed's namespace (e.g. `ethereum`).
    pub asset_id: String,
    /// Quote currency key in the response (e.g. `usd`).
    pub vs_currency: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Attempts per fetch; 1 means no retry.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Linear backoff between attempts in milliseconds.
    #[serde(default)]
    pub retry_backoff_ms: u64,
}

/// Cache freshness and degradation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheConfig {
    /// Seconds a fetched price stays fresh.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    /// Price returned whenever the feed cannot be used. Must be positive.
    #[serde(default = "default_fallback_price")]
    pub fallback_price: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_retry_max_attempts() -> u32 {
    1
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_fallback_price() -> Decimal {
    Decimal::new(2500, 0)
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.feed.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if Url::parse(&self.feed.api_url).is_err() {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: format!("not a valid URL: {}", self.feed.api_url),
            }
            .into());
        }
        if self.feed.asset_id.is_empty() {
            return Err(ConfigError::MissingField { field: "asset_id" }.into());
        }
        if self.feed.vs_currency.is_empty() {
            return Err(ConfigError::MissingField {
                field: "vs_currency",
            }
            .into());
        }
        if self.feed.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ttl_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        // A positive fallback keeps the conversion's divisor nonzero even
        // when the feed has never answered.
        if self.cache.fallback_price <= Decimal::ZERO {
            return Err(ConfigError::InvalidValue {
                field: "fallback_price",
                reason: format!("must be positive, got {}", self.cache.fallback_price),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the tracing subscriber with this config's logging settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

impl CacheConfig {
    #[must_use]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed: FeedConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.coingecko.com/api/v3".into(),
            asset_id: "ethereum".into(),
            vs_currency: "usd".into(),
            timeout_ms: default_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: 0,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            fallback_price: default_fallback_price(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
