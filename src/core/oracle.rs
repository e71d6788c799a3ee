//! TTL-cached price oracle with fallback degradation.
//!
//! The oracle owns a single cached [`Quote`] for the reference asset. Reads
//! that hit a fresh quote never touch the network; stale reads trigger a
//! refresh through the configured [`PriceFeed`]. Refreshes are single-flight:
//! concurrent stale callers serialize on a guard and re-check the cache, so
//! at most one outbound fetch is in flight at a time.
//!
//! Feed failures never surface to callers. The oracle logs the reason and
//! serves the configured fallback price instead, trading accuracy for
//! availability.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::CacheConfig;
use crate::core::domain::{format_asset_quantity, Quote};
use crate::port::feed::PriceFeed;

/// Cached USD price for one reference asset, with bounded staleness.
pub struct PriceOracle {
    feed: Arc<dyn PriceFeed>,
    ttl: Duration,
    fallback: Decimal,
    quote: RwLock<Option<Quote>>,
    /// Single-flight guard: held for the duration of a refresh fetch.
    refresh: Mutex<()>,
}

impl PriceOracle {
    /// Create an oracle over `feed`.
    ///
    /// `fallback` must be positive; [`crate::config::Config::load`] enforces
    /// this for config-driven construction.
    #[must_use]
    pub fn new(feed: Arc<dyn PriceFeed>, ttl: Duration, fallback: Decimal) -> Self {
        Self {
            feed,
            ttl,
            fallback,
            quote: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn from_config(feed: Arc<dyn PriceFeed>, config: &CacheConfig) -> Self {
        Self::new(feed, config.ttl(), config.fallback_price)
    }

    /// Current USD price of the reference asset.
    ///
    /// Returns the cached value while it is fresh, otherwise refreshes from
    /// the feed. Never fails: on any feed error the cache is left untouched
    /// and the fallback price is returned.
    pub async fn price(&self) -> Decimal {
        if let Some(quote) = self.fresh_quote() {
            return quote.price;
        }

        let _guard = self.refresh.lock().await;

        // Another caller may have completed a refresh while we waited.
        if let Some(quote) = self.fresh_quote() {
            return quote.price;
        }

        match self.feed.spot_usd().await {
            Ok(price) => {
                debug!(price = %price, "price cache refreshed");
                *self.quote.write() = Some(Quote::new(price));
                price
            }
            Err(err) => {
                warn!(
                    error = %err,
                    kind = err.kind(),
                    fallback = %self.fallback,
                    "price feed failed, serving fallback"
                );
                self.fallback
            }
        }
    }

    /// Convert a USD amount into a quantity of the reference asset,
    /// rendered with exactly 18 fractional digits.
    ///
    /// Never fails: the divisor comes from [`price`](Self::price), which is
    /// always positive. A quotient beyond `Decimal` range clamps to zero,
    /// with the inputs logged at `warn`.
    pub async fn convert(&self, usd: Decimal) -> String {
        let price = self.price().await;
        let quantity = usd.checked_div(price).unwrap_or_else(|| {
            warn!(usd = %usd, price = %price, "conversion overflow, clamping to zero");
            Decimal::ZERO
        });
        format_asset_quantity(quantity)
    }

    /// Snapshot of the cached quote, fresh or stale. `None` before the
    /// first successful fetch.
    #[must_use]
    pub fn last_quote(&self) -> Option<Quote> {
        *self.quote.read()
    }

    fn fresh_quote(&self) -> Option<Quote> {
        self.quote.read().filter(|quote| quote.is_fresh(self.ttl))
    }
}
