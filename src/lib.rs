//! PoWR price oracle - TTL-cached ETH/USD pricing with fallback degradation.
//!
//! This crate provides the pricing core of the PoWR backend: a single cached
//! USD price for the reference asset, refreshed from a CoinGecko-style feed
//! on a time-to-live basis, and a USD → asset conversion rendered at wei
//! granularity (18 fractional digits).
//!
//! # Architecture
//!
//! The crate uses a port/adapter split so the cache logic is testable
//! without a network:
//!
//! - **`core::oracle`** - [`PriceOracle`](core::PriceOracle), the TTL cache
//!   with single-flight refresh and fallback degradation
//! - **`port::feed`** - the [`PriceFeed`](port::PriceFeed) trait
//! - **`adapter::coingecko`** - reqwest implementation of the feed port
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface for diagnostics and one-off queries
//! - [`config`] - Configuration loading from TOML files
//! - [`core`] - Oracle cache and domain primitives
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`adapter`] - HTTP feed implementation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use powr_oracle::adapter::CoinGeckoFeed;
//! use powr_oracle::config::Config;
//! use powr_oracle::core::PriceOracle;
//!
//! # async fn example() {
//! let config = Config::default();
//! let feed = Arc::new(CoinGeckoFeed::from_config(&config.feed));
//! let oracle = PriceOracle::from_config(feed, &config.cache);
//!
//! let price = oracle.price().await;
//! let quantity = oracle.convert(rust_decimal::Decimal::from(100)).await;
//! # }
//! ```

pub mod adapter;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
