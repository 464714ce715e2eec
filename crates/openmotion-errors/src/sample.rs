//! Rotation sample ingress errors.
//!
//! These are produced on the sensor-rate path, so they are `Copy` and carry
//! no heap data.

use crate::common::ErrorSeverity;

/// Reason a raw rotation sample was refused at the ingress boundary.
///
/// A refused sample is dropped; the filter state it would have fed is left
/// untouched.
///
/// # Examples
///
/// ```
/// use openmotion_errors::{ErrorSeverity, SampleError};
///
/// let err = SampleError::NonFinite { component: 2 };
/// assert_eq!(err.code(), 1);
/// assert_eq!(err.severity(), ErrorSeverity::Warning);
/// assert!(err.to_string().contains("component 2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// A quaternion component was NaN or infinite.
    #[error("rotation component {component} is not finite")]
    NonFinite {
        /// Index of the offending component in `[w, x, y, z]` order
        component: u8,
    },

    /// The quaternion is too short to be normalized to a unit rotation.
    #[error("rotation cannot be normalized (norm {norm})")]
    Degenerate {
        /// Euclidean norm of the raw quaternion
        norm: f32,
    },
}

impl SampleError {
    /// Numeric code for compact reporting.
    pub fn code(self) -> u8 {
        match self {
            SampleError::NonFinite { .. } => 1,
            SampleError::Degenerate { .. } => 2,
        }
    }

    /// Get the error severity.
    ///
    /// A single bad sample is recoverable by construction: the previous filter
    /// state is retained.
    pub fn severity(self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_error_codes_are_distinct() {
        let a = SampleError::NonFinite { component: 0 };
        let b = SampleError::Degenerate { norm: 0.0 };
        assert_ne!(a.code(), b.code());
    }

    #[test]
    fn test_degenerate_display_includes_norm() {
        let err = SampleError::Degenerate { norm: 0.0 };
        assert!(err.to_string().contains("norm 0"));
    }

    #[test]
    fn test_sample_error_is_copy() {
        let err = SampleError::NonFinite { component: 3 };
        let copy = err;
        assert_eq!(err, copy);
    }
}
