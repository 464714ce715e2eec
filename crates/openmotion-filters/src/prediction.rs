//! Short-Horizon Angular Prediction
//!
//! Keeps a FIFO of recent samples, estimates the body-frame angular velocity
//! from consecutive pairs, and extrapolates the newest raw rotation forward by
//! `p * Δt` seconds of that motion. `Δt` is the gap to the newest buffered
//! sample, capped at the mean buffered spacing so a late sample after dropped
//! ticks is not thrown forward by the whole gap.

use std::collections::VecDeque;

use crate::config::PREDICT_BUFFER_RANGE;
use crate::math::{Rotation, RotationVector, exp_map, log_map, renormalized};
use crate::sample::RotationSample;

/// Largest history the state will ever hold; storage is reserved up front.
pub const MAX_PREDICT_BUFFER: usize = PREDICT_BUFFER_RANGE.1;

/// Smallest history the state can be configured with. A one-sample buffer
/// never extrapolates.
pub const MIN_PREDICT_BUFFER: usize = PREDICT_BUFFER_RANGE.0;

/// Past samples needed before extrapolation starts.
pub const MIN_PREDICTION_HISTORY: usize = 2;

/// Pairs closer together than this contribute zero velocity.
pub const MIN_PAIR_INTERVAL_NS: u64 = 1_000;

/// State for the prediction filter.
///
/// # RT Safety
///
/// - Buffer storage is allocated once in [`PredictionState::new`]
/// - O(n) in the buffer length, bounded by [`MAX_PREDICT_BUFFER`]
#[derive(Clone, Debug)]
pub struct PredictionState {
    /// Effective prediction factor
    pub factor: f32,
    capacity: usize,
    history: VecDeque<RotationSample>,
}

impl PredictionState {
    /// Create an empty prediction state.
    ///
    /// `capacity` is clamped into `[MIN_PREDICT_BUFFER, MAX_PREDICT_BUFFER]`.
    ///
    /// ```
    /// use openmotion_filters::PredictionState;
    ///
    /// let state = PredictionState::new(10.0, 6);
    /// assert_eq!(state.capacity(), 6);
    /// assert!(state.is_empty());
    /// ```
    pub fn new(factor: f32, capacity: usize) -> Self {
        Self {
            factor,
            capacity: clamp_capacity(capacity),
            history: VecDeque::with_capacity(MAX_PREDICT_BUFFER),
        }
    }

    /// Number of past samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the retained history length, evicting the oldest samples if it
    /// shrinks.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = clamp_capacity(capacity);
        self.evict();
    }

    /// Buffered sample count.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Whether no sample has been buffered yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Drop all buffered samples.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Weighted mean body-frame angular velocity (rad/s) across the buffered
    /// samples followed by `current`.
    ///
    /// Pair `i` (oldest first) has weight `i + 1`. Returns zero when there is
    /// no usable pair.
    pub fn angular_velocity(&self, current: &RotationSample) -> RotationVector {
        let samples = || self.history.iter().chain(core::iter::once(current));

        let mut weighted = RotationVector::zeros();
        let mut total_weight = 0.0f32;
        for (weight, (earlier, later)) in (1u16..).zip(samples().zip(samples().skip(1))) {
            let weight = f32::from(weight);
            weighted += pair_rate(earlier, later) * weight;
            total_weight += weight;
        }

        if total_weight > 0.0 {
            weighted / total_weight
        } else {
            RotationVector::zeros()
        }
    }

    /// Mean spacing of the buffered samples in nanoseconds, `None` until two
    /// are buffered.
    pub fn nominal_interval_ns(&self) -> Option<u64> {
        let (total_ns, pairs) = self
            .history
            .iter()
            .zip(self.history.iter().skip(1))
            .map(|(earlier, later)| later.timestamp_ns().saturating_sub(earlier.timestamp_ns()))
            .fold((0u64, 0u64), |(total, count), interval| {
                (total.saturating_add(interval), count.saturating_add(1))
            });
        total_ns.checked_div(pairs)
    }

    fn push(&mut self, sample: RotationSample) {
        self.history.push_back(sample);
        self.evict();
    }

    fn evict(&mut self) {
        while self.history.len() > self.capacity {
            let _evicted = self.history.pop_front();
        }
    }
}

fn clamp_capacity(capacity: usize) -> usize {
    capacity.clamp(MIN_PREDICT_BUFFER, MAX_PREDICT_BUFFER)
}

/// Rotation rate carrying `earlier` onto `later`, zero for pairs too close in
/// time to divide by.
fn pair_rate(earlier: &RotationSample, later: &RotationSample) -> RotationVector {
    let elapsed_ns = later.timestamp_ns().saturating_sub(earlier.timestamp_ns());
    if elapsed_ns < MIN_PAIR_INTERVAL_NS {
        return RotationVector::zeros();
    }
    let dt = later.seconds_since(earlier);
    let relative = earlier.rotation().inverse() * later.rotation();
    log_map(&relative) / dt
}

/// Prediction filter: extrapolate `sample` along the estimated motion.
///
/// Returns the raw rotation until [`MIN_PREDICTION_HISTORY`] past samples are
/// buffered, so the third call after a reset is the first one extrapolated.
/// The horizon is the gap since the newest buffered sample, but never more
/// than [`PredictionState::nominal_interval_ns`].
///
/// # Example
///
/// ```
/// use openmotion_filters::prelude::*;
///
/// let mut state = PredictionState::new(10.0, 6);
/// let mut last = Rotation::identity();
/// for step in 0..5u32 {
///     let yaw = 0.01 * step as f32;
///     let sample = RotationSample::from_unit(
///         Rotation::from_euler_angles(0.0, 0.0, yaw),
///         u64::from(step) * 10_000_000,
///     )?;
///     last = prediction_filter(&sample, &mut state);
/// }
/// // Raw yaw is 0.04; the prediction leads it by about ten steps.
/// assert!(last.euler_angles().2 > 0.1);
/// # Ok::<(), openmotion_errors::SampleError>(())
/// ```
pub fn prediction_filter(sample: &RotationSample, state: &mut PredictionState) -> Rotation {
    let raw = sample.rotation();
    let newest_timestamp_ns = state.history.back().map(RotationSample::timestamp_ns);

    let output = match newest_timestamp_ns {
        Some(newest_ns) if state.history.len() >= MIN_PREDICTION_HISTORY => {
            let elapsed_ns = sample.timestamp_ns().saturating_sub(newest_ns);
            let horizon_ns = state
                .nominal_interval_ns()
                .map_or(elapsed_ns, |nominal_ns| elapsed_ns.min(nominal_ns));
            let horizon = (horizon_ns as f64 / crate::sample::NANOS_PER_SEC) as f32;
            let velocity = state.angular_velocity(sample);
            renormalized(raw * exp_map(&(velocity * (state.factor * horizon))))
        }
        _ => raw,
    };

    state.push(*sample);
    output
}
