//! Tracker registry errors.

use crate::common::ErrorSeverity;

/// Errors raised when addressing a tracker by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum TrackerError {
    /// No tracker with this id is registered.
    #[error("tracker {tracker} is not registered")]
    UnknownTracker {
        /// Tracker id
        tracker: u32,
    },

    /// A tracker with this id is already registered.
    #[error("tracker {tracker} is already registered")]
    DuplicateTracker {
        /// Tracker id
        tracker: u32,
    },
}

impl TrackerError {
    /// Get the error severity.
    pub fn severity(self) -> ErrorSeverity {
        match self {
            TrackerError::UnknownTracker { .. } => ErrorSeverity::Warning,
            TrackerError::DuplicateTracker { .. } => ErrorSeverity::Error,
        }
    }

    /// Id of the tracker the error refers to.
    pub fn tracker(self) -> u32 {
        match self {
            TrackerError::UnknownTracker { tracker } | TrackerError::DuplicateTracker { tracker } => {
                tracker
            }
        }
    }
}
