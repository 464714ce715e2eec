//! Common error types and utilities used across all OpenMotion crates.
//!
//! This module provides the top-level error enum that can wrap all sub-errors,
//! along with error classification and severity levels.

use core::fmt;

use crate::{ConfigError, SampleError, TrackerError};

/// Top-level error type that can wrap all OpenMotion sub-errors.
#[derive(Debug, thiserror::Error)]
pub enum OpenMotionError {
    /// Sample ingress errors
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),

    /// Persisted configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Tracker registry errors
    #[error("Tracker error: {0}")]
    Tracker(#[from] TrackerError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl OpenMotionError {
    /// Get the error category for classification.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpenMotionError::Sample(_) => ErrorCategory::Sample,
            OpenMotionError::Config(_) => ErrorCategory::Config,
            OpenMotionError::Tracker(_) => ErrorCategory::Tracker,
            OpenMotionError::Io(_) => ErrorCategory::IO,
            OpenMotionError::Other(_) => ErrorCategory::Other,
        }
    }

    /// Get the error severity level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            OpenMotionError::Sample(e) => e.severity(),
            OpenMotionError::Config(e) => e.severity(),
            OpenMotionError::Tracker(e) => e.severity(),
            OpenMotionError::Io(_) => ErrorSeverity::Error,
            OpenMotionError::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Check if this error is recoverable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    /// Create a generic error with a message.
    pub fn other(msg: impl Into<String>) -> Self {
        OpenMotionError::Other(msg.into())
    }
}

impl From<std::io::Error> for OpenMotionError {
    fn from(e: std::io::Error) -> Self {
        OpenMotionError::Io(e)
    }
}

/// Error category for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Sample ingress errors
    Sample = 0,
    /// Configuration errors
    Config = 1,
    /// Tracker registry errors
    Tracker = 2,
    /// I/O errors
    IO = 3,
    /// Other errors
    Other = 255,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Sample => write!(f, "Sample"),
            ErrorCategory::Config => write!(f, "Config"),
            ErrorCategory::Tracker => write!(f, "Tracker"),
            ErrorCategory::IO => write!(f, "IO"),
            ErrorCategory::Other => write!(f, "Other"),
        }
    }
}

/// Error severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Informational, no action required
    Info = 0,
    /// Warning, may require attention
    Warning = 1,
    /// Error, operation failed
    Error = 2,
    /// Critical, system may be in unstable state
    Critical = 3,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
