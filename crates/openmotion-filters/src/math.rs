//! Quaternion helpers shared by the filter kernels.
//!
//! Every function that produces a rotation renormalizes it before returning,
//! so repeated composition over thousands of steps does not drift off the
//! unit sphere.

use core::f32::consts::PI;

use nalgebra::{UnitQuaternion, Vector3};

/// Orientation on the rotation manifold.
pub type Rotation = UnitQuaternion<f32>;

/// Rotation rate or rotation vector (axis scaled by angle).
pub type RotationVector = Vector3<f32>;

/// Return `q` rescaled to exactly unit length.
#[inline]
pub fn renormalized(q: Rotation) -> Rotation {
    let mut q = q;
    let _norm: f32 = q.renormalize();
    q
}

/// Spherical interpolation along the shortest arc from `from` to `to`.
///
/// `t` is clamped to `[0, 1]`. When the interpolation is ill-conditioned the
/// nearer endpoint is returned instead of panicking.
#[inline]
pub fn slerp_shortest(from: &Rotation, to: &Rotation, t: f32) -> Rotation {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    let blended = from
        .try_slerp(to, t, f32::EPSILON)
        .unwrap_or(if t < 0.5 { *from } else { *to });
    renormalized(blended)
}

/// Angle in radians of the shortest rotation taking `a` onto `b`.
///
/// Uses `atan2` on the relative rotation rather than `acos` of its scalar
/// part, which keeps full precision for nearly equal rotations.
#[inline]
pub fn angle_between(a: &Rotation, b: &Rotation) -> f32 {
    log_map(&(a.inverse() * b)).norm()
}

/// Logarithm map: the rotation vector of `q` (angle in `[0, π]`).
#[inline]
pub fn log_map(q: &Rotation) -> RotationVector {
    let q = q.quaternion();
    // q and -q are the same rotation; take the representative with w >= 0.
    let (w, imag) = if q.w < 0.0 { (-q.w, -q.imag()) } else { (q.w, q.imag()) };
    let sin_half = imag.norm();
    if sin_half <= f32::EPSILON {
        return imag * 2.0;
    }
    imag * (2.0 * sin_half.atan2(w) / sin_half)
}

/// Exponential map: the rotation described by rotation vector `v`.
///
/// The angle is capped at π so the result stays on the principal branch. A
/// non-finite vector maps to the identity.
#[inline]
pub fn exp_map(v: &RotationVector) -> Rotation {
    let angle = v.norm();
    if !angle.is_finite() {
        return Rotation::identity();
    }
    let v = if angle > PI { v * (PI / angle) } else { *v };
    renormalized(UnitQuaternion::from_scaled_axis(v))
}

/// Whether `q` is unit length within `tolerance`.
#[inline]
pub fn is_unit(q: &Rotation, tolerance: f32) -> bool {
    (q.quaternion().norm() - 1.0).abs() <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn yaw(angle: f32) -> Rotation {
        UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = yaw(0.0);
        let b = yaw(1.0);
        assert!(angle_between(&slerp_shortest(&a, &b, 0.0), &a) < 1e-6);
        assert!(angle_between(&slerp_shortest(&a, &b, 1.0), &b) < 1e-6);
    }

    #[test]
    fn test_slerp_midpoint_is_half_angle() {
        let mid = slerp_shortest(&yaw(0.0), &yaw(1.0), 0.5);
        assert_relative_eq!(mid.angle(), 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_takes_short_way_for_negated_target() {
        let a = yaw(0.2);
        let b = UnitQuaternion::new_unchecked(-yaw(0.4).into_inner());
        let mid = slerp_shortest(&a, &b, 0.5);
        assert!(angle_between(&mid, &yaw(0.3)) < 1e-5);
    }

    #[test]
    fn test_slerp_clamps_parameter() {
        let a = yaw(0.0);
        let b = yaw(1.0);
        assert!(angle_between(&slerp_shortest(&a, &b, 7.0), &b) < 1e-6);
        assert!(angle_between(&slerp_shortest(&a, &b, -3.0), &a) < 1e-6);
        assert!(angle_between(&slerp_shortest(&a, &b, f32::NAN), &b) < 1e-6);
    }

    #[test]
    fn test_log_exp_inverse_for_small_rotation() {
        let q = yaw(0.7);
        let v = log_map(&q);
        assert_relative_eq!(v.z, 0.7, epsilon = 1e-5);
        assert!(angle_between(&exp_map(&v), &q) < 1e-5);
    }

    #[test]
    fn test_exp_map_of_zero_is_identity() {
        let q = exp_map(&RotationVector::zeros());
        assert!(angle_between(&q, &Rotation::identity()) < 1e-7);
        assert!(is_unit(&q, 1e-6));
    }

    #[test]
    fn test_exp_map_caps_angle_at_pi() {
        let q = exp_map(&RotationVector::new(0.0, 0.0, 10.0));
        assert_relative_eq!(q.angle(), PI, epsilon = 1e-4);
    }

    #[test]
    fn test_log_map_keeps_precision_for_tiny_angles() {
        let v = log_map(&yaw(1e-4));
        assert_relative_eq!(v.z, 1e-4, max_relative = 1e-3);
        assert!(angle_between(&yaw(0.3), &yaw(0.3)) < 1e-6);
    }

    #[test]
    fn test_log_map_picks_short_representative() {
        let q = UnitQuaternion::new_unchecked(-yaw(0.5).into_inner());
        assert_relative_eq!(log_map(&q).z, 0.5, epsilon = 1e-5);
    }
}
