//! Per-Tracker Rotation Filters for OpenMotion
//!
//! This crate turns noisy, irregularly spaced orientation samples into
//! smoothed or predicted rotations for real-time avatar animation.
//!
//! # Overview
//!
//! - **[`RotationSample`]**: validated unit quaternion plus capture timestamp
//! - **[`FilterConfig`]**: total validation of operator-tuned parameters
//! - **[`FilterEngine`]**: per-tracker state machine over [`FilterMode`]
//! - **Smoothing**: continuous-time exponential slerp toward the raw rotation
//! - **Prediction**: weighted angular-velocity extrapolation of the newest sample
//!
//! # RT Safety
//!
//! [`FilterEngine::step`] never allocates, blocks, or panics. Prediction history
//! is reserved at construction. Non-finite input is refused when building a
//! [`RotationSample`], so it cannot reach the filter math.
//!
//! # Example
//!
//! ```
//! use openmotion_filters::prelude::*;
//!
//! let mut engine = FilterEngine::new(FilterConfig::default());
//!
//! for step in 0..10u64 {
//!     let yaw = 0.01 * step as f32;
//!     let sample = RotationSample::from_unit(
//!         Rotation::from_euler_angles(0.0, 0.0, yaw),
//!         step * 10_000_000,
//!     )?;
//!     let filtered = engine.step(&sample);
//!     assert!(is_unit(&filtered, 1e-6));
//! }
//! # Ok::<(), openmotion_errors::SampleError>(())
//! ```

#![deny(static_mut_refs)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod engine;
pub mod math;
pub mod prediction;
pub mod prelude;
pub mod sample;
pub mod smoothing;
pub mod state;

pub use config::{ConfigAdjustment, FilterConfig, FilterMode, RawFilterConfig};
pub use engine::{FilterEngine, FilterKernel};
pub use math::{Rotation, RotationVector};
pub use prediction::{PredictionState, prediction_filter};
pub use sample::RotationSample;
pub use smoothing::{SmoothingState, smoothing_filter};
pub use state::FilterState;
