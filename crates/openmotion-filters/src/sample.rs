//! Rotation samples at the ingress boundary.
//!
//! A [`RotationSample`] can only be built from finite, normalizable input, so
//! everything downstream of this module can assume a valid unit quaternion.

use nalgebra::{Quaternion, UnitQuaternion};
use openmotion_errors::{SampleError, SampleResult};

use crate::math::Rotation;

/// Nanoseconds per second, for timestamp conversion.
pub const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// One orientation reading plus its monotonic capture time.
///
/// # Example
///
/// ```
/// use openmotion_filters::RotationSample;
///
/// // Non-unit input is normalized on the way in.
/// let sample = RotationSample::new([2.0, 0.0, 0.0, 0.0], 1_000)?;
/// assert!((sample.rotation().quaternion().norm() - 1.0).abs() < 1e-6);
///
/// // Non-finite input is refused.
/// assert!(RotationSample::new([f32::NAN, 0.0, 0.0, 1.0], 2_000).is_err());
/// # Ok::<(), openmotion_errors::SampleError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationSample {
    rotation: Rotation,
    timestamp_ns: u64,
}

impl RotationSample {
    /// Build a sample from `[w, x, y, z]` components.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::NonFinite`] if any component is NaN or infinite
    /// and [`SampleError::Degenerate`] if the quaternion is (numerically) zero.
    pub fn new(wxyz: [f32; 4], timestamp_ns: u64) -> SampleResult<Self> {
        let [w, x, y, z] = wxyz;
        Self::from_quaternion(Quaternion::new(w, x, y, z), timestamp_ns)
    }

    /// Build a sample from a raw, possibly non-unit quaternion.
    ///
    /// The quaternion is rescaled by its largest component before
    /// normalization, so very large finite inputs do not overflow.
    ///
    /// # Errors
    ///
    /// See [`RotationSample::new`].
    pub fn from_quaternion(q: Quaternion<f32>, timestamp_ns: u64) -> SampleResult<Self> {
        let components = [q.w, q.i, q.j, q.k];
        let mut scale = 0.0f32;
        for (component, value) in (0u8..).zip(components) {
            if !value.is_finite() {
                return Err(SampleError::NonFinite { component });
            }
            scale = scale.max(value.abs());
        }
        if scale < f32::MIN_POSITIVE {
            return Err(SampleError::Degenerate { norm: q.norm() });
        }

        let scaled = q / scale;
        let norm = scaled.norm();
        if !norm.is_finite() || norm < f32::EPSILON {
            return Err(SampleError::Degenerate { norm: norm * scale });
        }

        Ok(Self {
            rotation: UnitQuaternion::new_unchecked(scaled / norm),
            timestamp_ns,
        })
    }

    /// Build a sample from an existing unit quaternion.
    ///
    /// The rotation is still checked and renormalized: a `UnitQuaternion`
    /// coming from elsewhere may carry NaN or accumulated drift.
    ///
    /// # Errors
    ///
    /// See [`RotationSample::new`].
    pub fn from_unit(rotation: Rotation, timestamp_ns: u64) -> SampleResult<Self> {
        Self::from_quaternion(rotation.into_inner(), timestamp_ns)
    }

    /// The normalized orientation.
    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Capture time in monotonic nanoseconds.
    #[inline]
    pub fn timestamp_ns(&self) -> u64 {
        self.timestamp_ns
    }

    /// Seconds elapsed from `earlier` to `self`, zero if `earlier` is newer.
    #[inline]
    pub fn seconds_since(&self, earlier: &RotationSample) -> f32 {
        let delta = self.timestamp_ns.saturating_sub(earlier.timestamp_ns);
        (delta as f64 / NANOS_PER_SEC) as f32
    }

    /// Components in `[w, x, y, z]` order.
    #[inline]
    pub fn wxyz(&self) -> [f32; 4] {
        let q = self.rotation.quaternion();
        [q.w, q.i, q.j, q.k]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_sample() -> Result<(), SampleError> {
        let sample = RotationSample::new([1.0, 0.0, 0.0, 0.0], 42)?;
        assert_eq!(sample.timestamp_ns(), 42);
        assert!(sample.rotation().angle() < 1e-7);
        Ok(())
    }

    #[test]
    fn test_non_unit_input_is_normalized() -> Result<(), SampleError> {
        let sample = RotationSample::new([0.0, 3.0, 0.0, 4.0], 0)?;
        let [w, x, y, z] = sample.wxyz();
        assert!(w.abs() < 1e-7);
        assert!((x - 0.6).abs() < 1e-6);
        assert!(y.abs() < 1e-7);
        assert!((z - 0.8).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_huge_finite_input_is_normalized() -> Result<(), SampleError> {
        let sample = RotationSample::new([f32::MAX, 0.0, 0.0, f32::MAX], 0)?;
        assert!((sample.rotation().quaternion().norm() - 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_non_finite_components_are_rejected() {
        for component in 0..4u8 {
            for bad in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
                let mut wxyz = [0.5f32; 4];
                if let Some(slot) = wxyz.get_mut(usize::from(component)) {
                    *slot = bad;
                }
                assert_eq!(
                    RotationSample::new(wxyz, 0),
                    Err(SampleError::NonFinite { component })
                );
            }
        }
    }

    #[test]
    fn test_zero_quaternion_is_rejected() {
        assert!(matches!(
            RotationSample::new([0.0; 4], 0),
            Err(SampleError::Degenerate { .. })
        ));
        assert!(matches!(
            RotationSample::new([1e-40, 0.0, 0.0, 0.0], 0),
            Err(SampleError::Degenerate { .. })
        ));
    }

    #[test]
    fn test_seconds_since() -> Result<(), SampleError> {
        let a = RotationSample::new([1.0, 0.0, 0.0, 0.0], 1_000_000_000)?;
        let b = RotationSample::new([1.0, 0.0, 0.0, 0.0], 1_010_000_000)?;
        assert!((b.seconds_since(&a) - 0.01).abs() < 1e-7);
        assert!(a.seconds_since(&b).abs() < f32::EPSILON);
        Ok(())
    }
}
