//! Filter State Types
//!
//! Aggregates the per-algorithm state types and the reset contract they share.

pub use crate::prediction::PredictionState;
pub use crate::smoothing::SmoothingState;

/// Common state operations for the filter kernels.
pub trait FilterState: core::fmt::Debug {
    /// Return to the uninitialized state. Tunables are kept; history is not.
    fn reset(&mut self);
}

impl FilterState for SmoothingState {
    fn reset(&mut self) {
        self.output = None;
        self.last_timestamp_ns = 0;
    }
}

impl FilterState for PredictionState {
    fn reset(&mut self) {
        self.clear();
    }
}
