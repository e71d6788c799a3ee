//! Core library components.

pub mod domain;
pub mod oracle;

pub use oracle::PriceOracle;
