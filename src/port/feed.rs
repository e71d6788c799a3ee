//! Price feed port.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::FeedError;

/// Source of spot USD prices for the reference asset.
///
/// Implementations must return a strictly positive price; a zero or
/// negative value from upstream is a [`FeedError::Malformed`].
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Fetch the current USD price of the reference asset.
    async fn spot_usd(&self) -> Result<Decimal, FeedError>;
}
