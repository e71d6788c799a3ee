//! Mock price feeds for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::FeedError;
use crate::port::feed::PriceFeed;

/// Feed that always returns the same price, optionally after a delay.
///
/// The delay makes refresh windows wide enough for single-flight tests to
/// overlap reliably.
pub struct StaticFeed {
    price: Decimal,
    latency: Duration,
}

impl StaticFeed {
    #[must_use]
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            latency: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl PriceFeed for StaticFeed {
    async fn spot_usd(&self) -> Result<Decimal, FeedError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.price)
    }
}

/// Feed that always fails with a fixed error kind.
pub struct FailingFeed {
    kind: FailKind,
}

enum FailKind {
    Unavailable,
    Malformed,
}

impl FailingFeed {
    /// Simulates an unreachable feed (upstream 503).
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            kind: FailKind::Unavailable,
        }
    }

    /// Simulates a 2xx response missing the expected fields.
    #[must_use]
    pub fn malformed() -> Self {
        Self {
            kind: FailKind::Malformed,
        }
    }
}

#[async_trait]
impl PriceFeed for FailingFeed {
    async fn spot_usd(&self) -> Result<Decimal, FeedError> {
        match self.kind {
            FailKind::Unavailable => Err(FeedError::Status { status: 503 }),
            FailKind::Malformed => Err(FeedError::Malformed {
                reason: "empty response object".into(),
            }),
        }
    }
}

/// Wraps another feed and counts how many times it is invoked.
pub struct CountingFeed<F> {
    inner: F,
    calls: AtomicUsize,
}

impl<F: PriceFeed> CountingFeed<F> {
    #[must_use]
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `spot_usd` invocations so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F: PriceFeed> PriceFeed for CountingFeed<F> {
    async fn spot_usd(&self) -> Result<Decimal, FeedError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.spot_usd().await
    }
}

/// Feed that replays a scripted sequence of results, one per call.
///
/// Once the script is exhausted every further call fails, which keeps
/// tests from silently fetching more often than they expect.
pub struct ScriptedFeed {
    script: parking_lot::Mutex<std::collections::VecDeque<Result<Decimal, FeedError>>>,
}

impl ScriptedFeed {
    #[must_use]
    pub fn new(script: Vec<Result<Decimal, FeedError>>) -> Self {
        Self {
            script: parking_lot::Mutex::new(script.into()),
        }
    }
}

#[async_trait]
impl PriceFeed for ScriptedFeed {
    async fn spot_usd(&self) -> Result<Decimal, FeedError> {
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| {
                Err(FeedError::Malformed {
                    reason: "script exhausted".into(),
                })
            })
    }
}
