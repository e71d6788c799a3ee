//! Outbound adapters implementing the port traits.

pub mod coingecko;

pub use coingecko::CoinGeckoFeed;
