//! Per-tracker filter engine.
//!
//! [`FilterEngine`] selects a kernel by [`FilterMode`], enforces sample
//! ordering, and handles reconfiguration. It is owned by exactly one tracker
//! binding and never shared.

use crate::config::{FilterConfig, FilterMode};
use crate::math::Rotation;
use crate::prediction::{PredictionState, prediction_filter};
use crate::sample::RotationSample;
use crate::smoothing::{SmoothingState, smoothing_filter};
use crate::state::FilterState;

/// Algorithm state tagged by mode.
#[derive(Clone, Debug)]
pub enum FilterKernel {
    /// Raw passthrough
    None,
    /// Exponential smoothing
    Smoothing(SmoothingState),
    /// Angular extrapolation
    Prediction(PredictionState),
}

impl FilterKernel {
    /// Fresh kernel for `config`.
    pub fn for_config(config: &FilterConfig) -> Self {
        match config.mode() {
            FilterMode::None => FilterKernel::None,
            FilterMode::Smoothing => FilterKernel::Smoothing(SmoothingState::new(config.smoothing_factor())),
            FilterMode::Prediction => FilterKernel::Prediction(PredictionState::new(
                config.prediction_factor(),
                config.predict_buffer(),
            )),
        }
    }

    /// Mode this kernel implements.
    pub fn mode(&self) -> FilterMode {
        match self {
            FilterKernel::None => FilterMode::None,
            FilterKernel::Smoothing(_) => FilterMode::Smoothing,
            FilterKernel::Prediction(_) => FilterMode::Prediction,
        }
    }

    fn retune(&mut self, config: &FilterConfig) {
        match self {
            FilterKernel::None => {}
            FilterKernel::Smoothing(state) => state.factor = config.smoothing_factor(),
            FilterKernel::Prediction(state) => {
                state.factor = config.prediction_factor();
                state.set_capacity(config.predict_buffer());
            }
        }
    }
}

impl FilterState for FilterKernel {
    fn reset(&mut self) {
        match self {
            FilterKernel::None => {}
            FilterKernel::Smoothing(state) => state.reset(),
            FilterKernel::Prediction(state) => state.reset(),
        }
    }
}

/// Stateful rotation filter for a single tracker.
///
/// # Ordering
///
/// Samples must arrive in non-decreasing timestamp order. Equal timestamps are
/// accepted. An older sample is dropped: state is left untouched and the
/// previous output is returned. [`FilterMode::None`] keeps no state and passes
/// every sample through.
///
/// # Example
///
/// ```
/// use openmotion_filters::prelude::*;
///
/// let mut engine = FilterEngine::new(FilterConfig::default().with_mode(FilterMode::Smoothing));
/// let sample = RotationSample::new([1.0, 0.0, 0.0, 0.0], 0)?;
/// let out = engine.step(&sample);
/// assert_eq!(out, sample.rotation());
///
/// // Changing mode discards history.
/// assert!(engine.reconfigure(FilterConfig::default()));
/// assert!(engine.last_output().is_none());
/// # Ok::<(), openmotion_errors::SampleError>(())
/// ```
#[derive(Clone, Debug)]
pub struct FilterEngine {
    config: FilterConfig,
    kernel: FilterKernel,
    last_timestamp_ns: Option<u64>,
    last_output: Option<Rotation>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl FilterEngine {
    /// Create an uninitialized engine running `config`.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            config,
            kernel: FilterKernel::for_config(&config),
            last_timestamp_ns: None,
            last_output: None,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Active mode.
    pub fn mode(&self) -> FilterMode {
        self.kernel.mode()
    }

    /// Algorithm state, for inspection.
    pub fn kernel(&self) -> &FilterKernel {
        &self.kernel
    }

    /// Forget all history. The next step behaves like the first.
    pub fn reset(&mut self) {
        self.kernel.reset();
        self.last_timestamp_ns = None;
        self.last_output = None;
    }

    /// Replace the configuration.
    ///
    /// A mode change rebuilds the kernel from scratch; otherwise only the
    /// tunables change and history is kept. Returns `true` if history was
    /// discarded.
    pub fn reconfigure(&mut self, config: FilterConfig) -> bool {
        let mode_changed = config.mode() != self.kernel.mode();
        self.config = config;
        if mode_changed {
            self.kernel = FilterKernel::for_config(&config);
            self.last_timestamp_ns = None;
            self.last_output = None;
        } else {
            self.kernel.retune(&config);
        }
        mode_changed
    }

    /// Whether `sample` would be dropped as older than the last accepted one.
    pub fn is_out_of_order(&self, sample: &RotationSample) -> bool {
        self.mode() != FilterMode::None
            && self
                .last_timestamp_ns
                .is_some_and(|last| sample.timestamp_ns() < last)
    }

    /// Filter one sample.
    ///
    /// Bounded time, no allocation, no blocking.
    pub fn step(&mut self, sample: &RotationSample) -> Rotation {
        if self.is_out_of_order(sample) {
            return self.last_output.unwrap_or_else(|| sample.rotation());
        }

        let output = match &mut self.kernel {
            FilterKernel::None => sample.rotation(),
            FilterKernel::Smoothing(state) => smoothing_filter(sample, state),
            FilterKernel::Prediction(state) => prediction_filter(sample, state),
        };

        self.last_timestamp_ns = Some(sample.timestamp_ns());
        self.last_output = Some(output);
        output
    }

    /// Most recent output, `None` after a reset.
    pub fn last_output(&self) -> Option<Rotation> {
        self.last_output
    }

    /// Timestamp of the last accepted sample.
    pub fn last_timestamp_ns(&self) -> Option<u64> {
        self.last_timestamp_ns
    }

    /// Samples currently buffered for prediction.
    pub fn history_len(&self) -> usize {
        match &self.kernel {
            FilterKernel::Prediction(state) => state.len(),
            _ => 0,
        }
    }

    /// Smoothing response rate the active configuration yields (1/s).
    pub fn effective_smoothing_factor(&self) -> f32 {
        self.config.smoothing_factor()
    }

    /// Prediction factor the active configuration yields.
    pub fn effective_prediction_factor(&self) -> f32 {
        self.config.prediction_factor()
    }
}
