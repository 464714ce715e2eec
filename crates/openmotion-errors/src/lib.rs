//! Centralized error types for OpenMotion
//!
//! The tracker server favors silent normalization on the hot path and explicit
//! rejection only at data ingress. This crate holds the few error types that
//! remain once that rule is applied:
//!
//! - [`sample`]: rejection of raw rotation samples at the ingress boundary
//! - [`config`]: failures reading or parsing a persisted filter configuration
//! - [`tracker`]: lookups against the tracker registry
//! - [`common`]: the top-level [`OpenMotionError`] plus classification helpers
//!
//! Numeric configuration values never produce an error; they are clamped by
//! the filter crate.
//!
//! # Example
//!
//! ```
//! use openmotion_errors::prelude::*;
//!
//! fn check_component(index: u8, value: f32) -> Result<f32> {
//!     if !value.is_finite() {
//!         return Err(SampleError::NonFinite { component: index }.into());
//!     }
//!     Ok(value)
//! }
//!
//! assert!(check_component(0, 1.0).is_ok());
//! assert!(check_component(1, f32::NAN).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod common;
pub mod config;
pub mod prelude;
pub mod sample;
pub mod tracker;

pub use common::{ErrorCategory, ErrorSeverity, OpenMotionError};
pub use config::ConfigError;
pub use sample::SampleError;
pub use tracker::TrackerError;

/// A specialized `Result` type for OpenMotion operations.
pub type Result<T> = std::result::Result<T, OpenMotionError>;

/// A specialized `Result` type for sample ingress.
pub type SampleResult<T> = std::result::Result<T, SampleError>;
