//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`] — Mock [`PriceFeed`](crate::port::PriceFeed) implementations:
//!   `StaticFeed`, `FailingFeed`, `CountingFeed`, `ScriptedFeed`.

pub mod feed;
