//! CLI error types and exit codes.

use tabgroups_core::{ArrangementError, ConfigError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - settings, file, or argument problems
    pub const GENERAL_ERROR: i32 = 1;
    /// A named group or tab does not exist in the arrangement
    pub const NOT_FOUND: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arrangement file error
    #[error("Arrangement error: {0}")]
    Arrangement(String),

    /// Group not found
    #[error("Group not found: {0}")]
    GroupNotFound(String),

    /// Tab not found
    #[error("Tab not found: {0}")]
    TabNotFound(String),

    /// Color argument could not be parsed
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Group error
    #[error("Group error: {0}")]
    Group(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ArrangementError> for CliError {
    fn from(err: ArrangementError) -> Self {
        match err {
            ArrangementError::Io(e) => Self::Io(e),
            other => Self::Arrangement(other.to_string()),
        }
    }
}

impl CliError {
    /// Returns the process exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::GroupNotFound(_) | Self::TabNotFound(_) => exit_codes::NOT_FOUND,
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}
