//! Automation Service Error Types

use thiserror::Error;

/// Result type for service operations
pub type Result<T> = std::result::Result<T, AutosrvError>;

/// Automation service errors
#[derive(Debug, Error)]
pub enum AutosrvError {
    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Point storage error (snapshot unavailable or incomplete)
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Write dispatch error
    #[error("Dispatch error: {0}")]
    DispatchError(String),
}

impl From<level_control::ControlError> for AutosrvError {
    fn from(err: level_control::ControlError) -> Self {
        AutosrvError::StorageError(err.to_string())
    }
}

impl From<figment::Error> for AutosrvError {
    fn from(err: figment::Error) -> Self {
        AutosrvError::ConfigError(err.to_string())
    }
}
