//! Error types for persistence and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing the persisted preferences file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no platform data directory available")]
    NoDataDir,

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("could not serialize preferences: {0}")]
    Serialize(#[from] ron::Error),

    /// Raised by the in-memory store when told to fail.
    #[error("storage unavailable")]
    Unavailable,
}

/// Errors raised while loading or validating a `GameConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}
