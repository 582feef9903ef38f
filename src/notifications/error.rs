//! Toast Store Error Types

use thiserror::Error;

/// Result type for toast store operations
pub type ToastResult<T> = Result<T, ToastError>;

/// Errors raised while building a toast store
///
/// Store operations themselves never fail: transitions naming an unknown id
/// are absorbed as no-ops.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ToastError {
    /// No tokio runtime is available to drive removal timers
    #[error("No tokio runtime available to drive toast removal timers")]
    NoRuntime,

    /// Configuration rejected by validation
    #[error("Invalid toast configuration: {message}")]
    InvalidConfig { message: String },
}

impl ToastError {
    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
