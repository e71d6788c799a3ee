use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rust_decimal_macros::dec;

use powr_oracle::config::Config;
use powr_oracle::error::{ConfigError, Error};

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let suffix = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("powr-oracle-config-test-{nanos}-{suffix}.toml"));
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn config_loads_complete_file() {
    let toml = r#"
[feed]
api_url = "https://api.coingecko.com/api/v3"
asset_id = "ethereum"
vs_currency = "usd"
timeout_ms = 5000

[cache]
ttl_secs = 300
fallback_price = 2500.0

[logging]
level = "debug"
format = "json"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    let config = result.expect("config should load");
    assert_eq!(config.feed.asset_id, "ethereum");
    assert_eq!(config.cache.ttl_secs, 300);
    assert_eq!(config.cache.fallback_price, dec!(2500));
    assert_eq!(config.logging.format, "json");
}

#[test]
fn config_rejects_non_positive_fallback() {
    let toml = r#"
[cache]
fallback_price = 0.0
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "fallback_price",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid fallback_price error, got {err}"),
        Ok(config) => panic!(
            "Expected non-positive fallback to be rejected, got {}",
            config.cache.fallback_price
        ),
    }
}

#[test]
fn config_rejects_zero_ttl() {
    let toml = r#"
[cache]
ttl_secs = 0
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "ttl_secs",
            ..
        }))
    ));
}

#[test]
fn config_rejects_invalid_api_url() {
    let toml = r#"
[feed]
api_url = "not a url"
asset_id = "ethereum"
vs_currency = "usd"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::InvalidValue {
            field: "api_url",
            ..
        }))
    ));
}

#[test]
fn config_rejects_empty_asset_id() {
    let toml = r#"
[feed]
api_url = "https://api.coingecko.com/api/v3"
asset_id = ""
vs_currency = "usd"
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::MissingField { field: "asset_id" }))
    ));
}

#[test]
fn config_rejects_unknown_fields() {
    let toml = r#"
[cache]
ttl_minutes = 5
"#;

    let path = write_temp_config(toml);
    let result = Config::load(&path);
    let _ = fs::remove_file(&path);

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn missing_file_is_a_read_error() {
    let result = Config::load("/nonexistent/powr-oracle.toml");
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}
