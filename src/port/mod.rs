//! Trait seams between the core and the outside world.

pub mod feed;

pub use feed::PriceFeed;
