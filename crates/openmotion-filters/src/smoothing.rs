//! Exponential Smoothing on the Rotation Manifold
//!
//! Each step slerps the previous output toward the new raw rotation by
//! `t = 1 - exp(-f * Δt)`, where `f` is the effective smoothing factor in 1/s.
//! Working in continuous time keeps the response independent of the tracker's
//! sample rate and of jitter in sample spacing.

use crate::math::{Rotation, slerp_shortest};
use crate::sample::RotationSample;

/// Upper bound on `f * Δt`. Past this `exp(-x)` is indistinguishable from zero.
pub const MAX_SMOOTHING_EXPONENT: f32 = 50.0;

/// State for the smoothing filter.
///
/// # RT Safety
///
/// - No heap allocations
/// - O(1) time complexity
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothingState {
    /// Effective smoothing factor (1/s)
    pub factor: f32,
    /// Last emitted rotation, `None` until the first sample after a reset
    pub output: Option<Rotation>,
    /// Timestamp of the last consumed sample
    pub last_timestamp_ns: u64,
}

impl SmoothingState {
    /// Create an uninitialized smoothing state with the given response rate.
    ///
    /// ```
    /// use openmotion_filters::SmoothingState;
    ///
    /// let state = SmoothingState::new(11.0);
    /// assert!(state.output.is_none());
    /// ```
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            output: None,
            last_timestamp_ns: 0,
        }
    }

    /// Interpolation weight given to a raw sample arriving `dt` seconds after
    /// the previous one.
    #[inline]
    pub fn blend_weight(&self, dt: f32) -> f32 {
        let exponent = (self.factor * dt).clamp(0.0, MAX_SMOOTHING_EXPONENT);
        1.0 - (-exponent).exp()
    }
}

/// Smoothing filter: blend the previous output toward `sample`.
///
/// The first sample after a reset is returned unchanged. Samples are expected
/// in non-decreasing timestamp order; an older sample is treated as `Δt = 0`
/// and leaves the output where it was.
///
/// # Example
///
/// ```
/// use openmotion_filters::prelude::*;
///
/// let mut state = SmoothingState::new(11.0);
/// let first = RotationSample::new([1.0, 0.0, 0.0, 0.0], 0)?;
/// let turned = RotationSample::from_unit(
///     Rotation::from_euler_angles(0.0, 0.0, 1.0),
///     10_000_000,
/// )?;
///
/// smoothing_filter(&first, &mut state);
/// let out = smoothing_filter(&turned, &mut state);
/// assert!(out.angle() > 0.0 && out.angle() < 1.0);
/// # Ok::<(), openmotion_errors::SampleError>(())
/// ```
pub fn smoothing_filter(sample: &RotationSample, state: &mut SmoothingState) -> Rotation {
    let raw = sample.rotation();
    let output = match state.output {
        None => raw,
        Some(previous) => {
            let elapsed_ns = sample.timestamp_ns().saturating_sub(state.last_timestamp_ns);
            let dt = (elapsed_ns as f64 / crate::sample::NANOS_PER_SEC) as f32;
            slerp_shortest(&previous, &raw, state.blend_weight(dt))
        }
    };

    state.output = Some(output);
    state.last_timestamp_ns = state.last_timestamp_ns.max(sample.timestamp_ns());
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::angle_between;
    use nalgebra::{UnitQuaternion, Vector3};

    fn yaw_sample(angle: f32, timestamp_ns: u64) -> Result<RotationSample, Box<dyn std::error::Error>> {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle);
        Ok(RotationSample::from_unit(rotation, timestamp_ns)?)
    }

    #[test]
    fn test_first_sample_passes_through() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = SmoothingState::new(11.0);
        let sample = yaw_sample(0.8, 5)?;
        let out = smoothing_filter(&sample, &mut state);
        assert!(angle_between(&out, &sample.rotation()) < 1e-6);
        Ok(())
    }

    #[test]
    fn test_output_moves_part_way() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = SmoothingState::new(11.0);
        smoothing_filter(&yaw_sample(0.0, 0)?, &mut state);
        let out = smoothing_filter(&yaw_sample(1.0, 10_000_000)?, &mut state);

        // t = 1 - exp(-0.11)
        let expected = 1.0 - (-0.11f32).exp();
        assert!((out.angle() - expected).abs() < 1e-4);
        Ok(())
    }

    #[test]
    fn test_zero_elapsed_time_holds_output() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = SmoothingState::new(50.0);
        let first = smoothing_filter(&yaw_sample(0.0, 1_000)?, &mut state);
        let out = smoothing_filter(&yaw_sample(1.0, 1_000)?, &mut state);
        assert!(angle_between(&first, &out) < 1e-6);
        Ok(())
    }

    #[test]
    fn test_converges_to_constant_input() -> Result<(), Box<dyn std::error::Error>> {
        let mut state = SmoothingState::new(11.0);
        smoothing_filter(&yaw_sample(0.0, 0)?, &mut state);
        let target = yaw_sample(0.5, 0)?.rotation();
        let mut out = Rotation::identity();
        for step in 1..=500u64 {
            out = smoothing_filter(&yaw_sample(0.5, step * 10_000_000)?, &mut state);
        }
        assert!(angle_between(&out, &target) < 1e-3);
        Ok(())
    }

    #[test]
    fn test_blend_weight_bounds() {
        let state = SmoothingState::new(11.0);
        assert!(state.blend_weight(0.0).abs() < f32::EPSILON);
        assert!((state.blend_weight(1.0e6) - 1.0).abs() < f32::EPSILON);
        assert!(state.blend_weight(-1.0).abs() < f32::EPSILON);
    }
}
