use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Price feed errors.
///
/// These never cross the oracle's public API: the oracle converts any
/// `FeedError` into the configured fallback price at its boundary. They
/// exist so diagnostics can distinguish an unreachable feed from one
/// that answered with garbage.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("feed unavailable: {0}")]
    Unavailable(#[source] reqwest::Error),

    #[error("feed returned status {status}")]
    Status { status: u16 },

    #[error("feed response malformed: {reason}")]
    Malformed { reason: String },
}

impl FeedError {
    /// Short tag for log fields and metrics-style diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FeedError::Unavailable(_) => "unavailable",
            FeedError::Status { .. } => "status",
            FeedError::Malformed { .. } => "malformed",
        }
    }
}

/// Top-level error for fallible public entry points.
///
/// Feed faults never reach this type: the oracle converts them into the
/// fallback price at its boundary, so configuration is the only concern
/// that can fail outward.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
