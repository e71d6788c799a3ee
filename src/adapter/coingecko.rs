//! CoinGecko-style simple-price feed adapter.
//!
//! Talks to an unauthenticated `GET {api_url}/simple/price` endpoint and
//! expects the response shape `{ "<asset>": { "<currency>": <number> } }`.
//! Any deviation (missing keys, non-numeric or non-positive value) is
//! reported as [`FeedError::Malformed`]; transport failures and non-2xx
//! statuses as [`FeedError::Unavailable`]/[`FeedError::Status`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::error::FeedError;
use crate::port::feed::PriceFeed;

/// Response body of the simple-price endpoint: asset id → currency → price.
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

/// HTTP client for a CoinGecko-compatible price API.
pub struct CoinGeckoFeed {
    http: HttpClient,
    api_url: String,
    asset_id: String,
    vs_currency: String,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl CoinGeckoFeed {
    #[must_use]
    pub fn from_config(config: &FeedConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            api_url: config.api_url.clone(),
            asset_id: config.asset_id.clone(),
            vs_currency: config.vs_currency.clone(),
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    async fn get_simple_price(&self) -> Result<SimplePriceResponse, FeedError> {
        let url = format!(
            "{}/simple/price?ids={}&vs_currencies={}",
            self.api_url, self.asset_id, self.vs_currency
        );

        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(&url).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(FeedError::Unavailable(err));
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let status = response.status();
            if !status.is_success() {
                return Err(FeedError::Status {
                    status: status.as_u16(),
                });
            }

            return response
                .json::<SimplePriceResponse>()
                .await
                .map_err(|err| FeedError::Malformed {
                    reason: err.to_string(),
                });
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "price feed request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }

    fn extract_price(&self, body: &SimplePriceResponse) -> Result<Decimal, FeedError> {
        let raw = body
            .get(&self.asset_id)
            .and_then(|quotes| quotes.get(&self.vs_currency))
            .copied()
            .ok_or_else(|| FeedError::Malformed {
                reason: format!("missing {}.{} field", self.asset_id, self.vs_currency),
            })?;

        let price = Decimal::from_f64(raw).ok_or_else(|| FeedError::Malformed {
            reason: format!("unrepresentable price value: {raw}"),
        })?;

        if price <= Decimal::ZERO {
            return Err(FeedError::Malformed {
                reason: format!("non-positive price: {price}"),
            });
        }

        Ok(price)
    }
}

#[async_trait]
impl PriceFeed for CoinGeckoFeed {
    async fn spot_usd(&self) -> Result<Decimal, FeedError> {
        let body = self.get_simple_price().await?;
        let price = self.extract_price(&body)?;
        debug!(asset = %self.asset_id, price = %price, "fetched spot price");
        Ok(price)
    }
}
