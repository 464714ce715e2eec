//! Prelude module for convenient error handling imports.
//!
//! # Example
//!
//! ```
//! use openmotion_errors::prelude::*;
//!
//! fn lookup(id: u32, known: &[u32]) -> Result<u32> {
//!     if !known.contains(&id) {
//!         return Err(TrackerError::UnknownTracker { tracker: id }.into());
//!     }
//!     Ok(id)
//! }
//!
//! assert!(lookup(1, &[1, 2]).is_ok());
//! assert!(lookup(5, &[1, 2]).is_err());
//! ```

pub use crate::{
    Result, SampleResult,
    common::{ErrorCategory, ErrorSeverity, OpenMotionError},
    config::ConfigError,
    sample::SampleError,
    tracker::TrackerError,
};
