//! Prelude for the filters crate.
//!
//! # Example
//!
//! ```
//! use openmotion_filters::prelude::*;
//!
//! let mut engine = FilterEngine::new(FilterConfig::disabled());
//! let sample = RotationSample::new([1.0, 0.0, 0.0, 0.0], 0)?;
//! assert_eq!(engine.step(&sample), sample.rotation());
//! # Ok::<(), openmotion_errors::SampleError>(())
//! ```

pub use crate::config::{ConfigAdjustment, FilterConfig, FilterMode, RawFilterConfig};
pub use crate::engine::{FilterEngine, FilterKernel};
pub use crate::math::{Rotation, RotationVector, angle_between, is_unit};
pub use crate::prediction::{PredictionState, prediction_filter};
pub use crate::sample::RotationSample;
pub use crate::smoothing::{SmoothingState, smoothing_filter};
pub use crate::state::FilterState;
