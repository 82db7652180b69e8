//! Relative rotations and interpolation between rotations.

use super::Quaternion;
use crate::num::Float;
use nalgebra::{self as na, Vector3};

/// When the dot product of the endpoints is closer to ±1 than this, slerp
/// falls back to normalized linear interpolation.
const LINEAR_INTERPOLATION_THRESHOLD: f64 = 0.01;

impl<F: Float> Quaternion<F> {
    /// Computes the rotation `d` taking `b` to `a`, so that `b * d` is `a`
    /// (or `-a`).
    ///
    /// If the dot product of `a` and `b` is negative, `a` is negated first so
    /// that `d` is the shorter of the two relative rotations.
    pub fn quat_diff(a: &Self, b: &Self) -> Self {
        let a = if a.dot(b) < F::ZERO { a.negated() } else { *a };
        b.inverse() * a
    }

    /// Computes the rotation vector of [`Self::quat_diff`] for `a` and `b`.
    ///
    /// This uses [`Self::to_rotation_vector`] rather than
    /// [`Self::to_euler_vector`], including its treatment of very small
    /// rotations.
    pub fn angular_displacement(a: &Self, b: &Self) -> Vector3<F> {
        Self::quat_diff(a, b).to_rotation_vector()
    }

    /// Spherical linear interpolation from `a` (at `t = 0`) to `b` (at
    /// `t = 1`).
    ///
    /// With `allow_flip`, `a` is negated when its dot product with `b` is
    /// negative so that the interpolation follows the shortest path between
    /// the two orientations. The result then starts at `-a`, which is the
    /// same rotation as `a`.
    ///
    /// For nearly parallel endpoints, the quaternions are interpolated
    /// linearly and the result is normalized. Nearly antipodal endpoints
    /// interpolated without `allow_flip` have no well-defined arc between
    /// them, so the interpolation passes through a unit quaternion orthogonal
    /// to `a` at `t = 0.5`.
    pub fn slerp(a: &Self, b: &Self, t: F, allow_flip: bool) -> Self {
        let cos_angle = a.dot(b);
        let flip = allow_flip && cos_angle < F::ZERO;

        if F::ONE - cos_angle.abs() < na::convert::<f64, F>(LINEAR_INTERPOLATION_THRESHOLD) {
            if !allow_flip && cos_angle < F::ZERO {
                log::trace!("Interpolating nearly antipodal quaternions through orthogonal one");
                let midway = Self::new(-a.y, a.x, -a.w, a.z);
                return if t < F::ONE_HALF {
                    Self::slerp(a, &midway, t * F::TWO, false)
                } else {
                    Self::slerp(&midway, b, (t - F::ONE_HALF) * F::TWO, false)
                };
            }
            log::trace!("Interpolating nearly parallel quaternions linearly");
            let weight_a = if flip { t - F::ONE } else { F::ONE - t };
            return (a * weight_a + b * t).normalized();
        }

        let cos_angle = if flip { -cos_angle } else { cos_angle };
        let angle = cos_angle.acos();
        let sin_angle = angle.sin();

        let mut weight_a = (angle * (F::ONE - t)).sin() / sin_angle;
        let weight_b = (angle * t).sin() / sin_angle;

        if flip {
            weight_a = -weight_a;
        }

        a * weight_a + b * weight_b
    }
}
