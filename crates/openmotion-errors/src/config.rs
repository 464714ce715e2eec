//! Persisted configuration errors.
//!
//! Only the outer surface (reading a stored filter configuration) can fail.
//! Out-of-range values inside a successfully parsed document are clamped by
//! the filter crate and never reach this type.

use crate::common::ErrorSeverity;

/// Errors produced while loading a stored filter configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("failed to parse filter configuration: {0}")]
    Parse(String),

    /// The document could not be read.
    #[error("failed to read filter configuration '{path}': {reason}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O failure
        reason: String,
    },
}

impl ConfigError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Error
    }

    /// Create a parse error.
    pub fn parse(reason: impl Into<String>) -> Self {
        ConfigError::Parse(reason.into())
    }

    /// Create an I/O error for the given path.
    pub fn io(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::Io {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_io_message() {
        let err = ConfigError::io("filters.json", "permission denied");
        let msg = err.to_string();
        assert!(msg.contains("filters.json"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_config_error_parse_message() {
        let err = ConfigError::parse("expected value at line 1");
        assert_eq!(
            err.to_string(),
            "failed to parse filter configuration: expected value at line 1"
        );
    }
}
