//! Error types for the tab group library
//!
//! Group manager operations never fail: unknown tabs or groups are no-ops.
//! The errors here cover the edges that touch the outside world: reading and
//! writing arrangements and settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing saved arrangements.
#[derive(Debug, Error)]
pub enum ArrangementError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(serde_json::Error),

    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(serde_json::Error),

    /// The window arrangement is not a JSON object
    #[error("Window arrangement must be a JSON object")]
    NotAnObject,
}

/// Errors raised while loading or saving settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error at {path}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// TOML parse error
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// No configuration directory could be determined
    #[error("Could not determine configuration directory")]
    NoConfigDir,
}

/// Umbrella error for library consumers.
#[derive(Debug, Error)]
pub enum TabGroupError {
    /// Arrangement error
    #[error(transparent)]
    Arrangement(#[from] ArrangementError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for arrangement operations
pub type ArrangementResult<T> = Result<T, ArrangementError>;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
