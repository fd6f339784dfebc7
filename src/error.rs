//! Error types for the Slipway shell
//!
//! The compilation core never fails: every compile call is a pure, immediate
//! transformation. These errors originate entirely in the surrounding shell -
//! config loading, manifest rendering, and file writing.

use thiserror::Error;

/// Main error type for Slipway operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Configuration file could not be parsed or is missing required fields
    #[error("config error: {0}")]
    Config(String),

    /// Serialization/deserialization error while rendering manifests
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Filesystem error while reading config or writing manifests
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error with the given message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a serialization error with the given message
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }
}
