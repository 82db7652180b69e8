//! Conversion between quaternions and other rotation representations.

use super::Quaternion;
use crate::num::Float;
use nalgebra::{self as na, Matrix3, Matrix4, Vector3};

/// Rotation vectors shorter than this are treated as no rotation.
const MIN_ROTATION_VECTOR_ANGLE: f64 = 1e-5;

/// Below this length, the imaginary part is returned unscaled as the rotation
/// vector.
const MIN_ROTATION_VECTOR_AXIS_LENGTH: f64 = 5e-4;

/// Vectors whose dot product is closer to -1 than this are aligned by a half
/// turn about an arbitrary perpendicular axis.
const ANTIPARALLEL_DOT_TOLERANCE: f64 = 1e-4;

impl<F: Float> Quaternion<F> {
    /// Creates the quaternion rotating by `angle` radians about `axis`.
    ///
    /// The axis is scaled by the sine of the half angle without being
    /// normalized first, so it must have unit length for the result to have
    /// unit norm. Use [`Self::from_unnormalized_axis_angle`] for arbitrary
    /// axes.
    pub fn from_axis_angle(axis: &Vector3<F>, angle: F) -> Self {
        let half_angle = angle * F::ONE_HALF;
        let sin_half_angle = half_angle.sin();
        Self::new(
            axis.x * sin_half_angle,
            axis.y * sin_half_angle,
            axis.z * sin_half_angle,
            half_angle.cos(),
        )
    }

    /// Creates the quaternion rotating by `angle` radians about the direction
    /// of `axis`, which need not have unit length. An axis of vanishing length
    /// gives the identity.
    pub fn from_unnormalized_axis_angle(axis: &Vector3<F>, angle: F) -> Self {
        let axis_length = axis.norm();
        if axis_length < <F as approx::AbsDiffEq>::default_epsilon() {
            return Self::identity();
        }
        Self::from_axis_angle(&(axis / axis_length), angle)
    }

    /// Returns the rotation axis and the angle in radians. The axis is
    /// `(0, 1, 0)` when the rotation angle is zero.
    ///
    /// The quaternion is assumed to have unit norm; the real part is clamped
    /// to `[-1, 1]` before taking its arccosine.
    pub fn to_axis_angle(&self) -> (Vector3<F>, F) {
        let half_angle = clamp_unit(self.w).acos();
        let sine = half_angle.sin();

        let axis = if sine == F::ZERO {
            Vector3::y()
        } else {
            self.imag() / sine
        };

        (axis, half_angle * F::TWO)
    }

    /// Creates the quaternion for the given rotation vector, whose direction
    /// is the rotation axis and whose length is the rotation angle in
    /// radians. A rotation vector shorter than `1e-5` gives exactly the
    /// identity.
    pub fn from_rotation_vector(rotation_vector: &Vector3<F>) -> Self {
        let angle = rotation_vector.norm();

        if angle < na::convert::<f64, F>(MIN_ROTATION_VECTOR_ANGLE) {
            return Self::identity();
        }

        let half_angle = angle * F::ONE_HALF;
        let scale = half_angle.sin() / angle;
        Self::new(
            rotation_vector.x * scale,
            rotation_vector.y * scale,
            rotation_vector.z * scale,
            half_angle.cos(),
        )
    }

    /// Computes the rotation vector (axis scaled by angle) of the normalized
    /// quaternion, choosing the sign so that the angle lies in `[0, π]`.
    ///
    /// When the imaginary part is shorter than `5e-4`, it is returned as is
    /// rather than rescaled, so for very small rotations the result is about
    /// half the true rotation vector. [`Self::angular_displacement`] relies on
    /// this behavior.
    pub fn to_rotation_vector(&self) -> Vector3<F> {
        let mut quat = self.normalized();
        if quat.w < F::ZERO {
            quat = quat.negated();
        }

        let angle = clamp_unit(quat.w).acos() * F::TWO;

        let imag = quat.imag();
        let imag_length = imag.norm();

        if imag_length > na::convert::<f64, F>(MIN_ROTATION_VECTOR_AXIS_LENGTH) {
            imag * (angle / imag_length)
        } else {
            imag
        }
    }

    /// Creates the shortest-arc rotation taking direction `from` onto
    /// direction `to`. Both vectors are assumed to have unit length.
    ///
    /// For opposite directions, the result is a half turn about an axis
    /// perpendicular to `from`.
    pub fn from_unit_vectors(from: &Vector3<F>, to: &Vector3<F>) -> Self {
        let mut real = from.dot(to) + F::ONE;

        let axis = if real < na::convert::<f64, F>(ANTIPARALLEL_DOT_TOLERANCE) {
            real = F::ZERO;
            if from.x.abs() > from.z.abs() {
                Vector3::new(-from.y, from.x, F::ZERO)
            } else {
                Vector3::new(F::ZERO, -from.z, from.y)
            }
        } else {
            from.cross(to)
        };

        Self::from_parts(real, axis).normalized()
    }

    /// Creates the quaternion for the given rotation matrix.
    ///
    /// The component with the largest magnitude is computed directly and the
    /// others are derived from it, selecting among four branches based on the
    /// trace and diagonal of the matrix.
    pub fn from_rotation_matrix(m: &Matrix3<F>) -> Self {
        let half = F::ONE_HALF;
        let (m00, m01, m02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
        let (m10, m11, m12) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
        let (m20, m21, m22) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

        let trace = m00 + m11 + m22;

        if trace > F::ZERO {
            let s = (trace + F::ONE).sqrt();
            let w = s * half;
            let s = half / s;
            Self::new((m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s, w)
        } else if m11 > m00 && m22 <= m11 {
            let s = ((m11 - (m22 + m00)) + F::ONE).sqrt();
            let y = s * half;
            let s = reciprocal_half_scale(s);
            Self::new((m01 + m10) * s, y, (m12 + m21) * s, (m02 - m20) * s)
        } else if (m11 <= m00 && m22 > m00) || m22 > m11 {
            let s = ((m22 - (m00 + m11)) + F::ONE).sqrt();
            let z = s * half;
            let s = reciprocal_half_scale(s);
            Self::new((m20 + m02) * s, (m12 + m21) * s, z, (m10 - m01) * s)
        } else {
            let s = ((m00 - (m11 + m22)) + F::ONE).sqrt();
            let x = s * half;
            let s = reciprocal_half_scale(s);
            Self::new(x, (m01 + m10) * s, (m20 + m02) * s, (m21 - m12) * s)
        }
    }

    /// Computes the rotation matrix of the quaternion, assuming unit norm.
    pub fn to_rotation_matrix(&self) -> Matrix3<F> {
        let Self { x, y, z, w } = *self;
        let (one, two) = (F::ONE, F::TWO);
        Matrix3::new(
            one - two * (y * y + z * z),
            two * (x * y - z * w),
            two * (z * x + y * w),
            two * (x * y + z * w),
            one - two * (z * z + x * x),
            two * (y * z - x * w),
            two * (z * x - y * w),
            two * (y * z + x * w),
            one - two * (y * y + x * x),
        )
    }

    /// Computes the 4x4 homogeneous transformation matrix of the rotation,
    /// assuming unit norm.
    pub fn to_homogeneous_matrix(&self) -> Matrix4<F> {
        self.to_rotation_matrix().to_homogeneous()
    }

    /// Returns the homogeneous rotation matrix as a flat column-major array,
    /// as expected by OpenGL.
    pub fn to_opengl_matrix(&self) -> [F; 16] {
        let mut elements = [F::ZERO; 16];
        elements.copy_from_slice(self.to_homogeneous_matrix().as_slice());
        elements
    }

    /// Creates the rotation taking the standard basis onto the given
    /// orthonormal frame. The frame vectors become the columns of the
    /// rotation matrix.
    pub fn from_frame(x_axis: &Vector3<F>, y_axis: &Vector3<F>, z_axis: &Vector3<F>) -> Self {
        Self::from_rotation_matrix(&Matrix3::from_columns(&[*x_axis, *y_axis, *z_axis]))
    }
}

impl<F: Float> From<Quaternion<F>> for na::Quaternion<F> {
    fn from(quaternion: Quaternion<F>) -> Self {
        na::Quaternion::new(quaternion.w, quaternion.x, quaternion.y, quaternion.z)
    }
}

impl<F: Float> From<na::Quaternion<F>> for Quaternion<F> {
    fn from(quaternion: na::Quaternion<F>) -> Self {
        Self::new(quaternion.i, quaternion.j, quaternion.k, quaternion.w)
    }
}

impl<F: Float> From<na::UnitQuaternion<F>> for Quaternion<F> {
    fn from(quaternion: na::UnitQuaternion<F>) -> Self {
        Self::from(quaternion.into_inner())
    }
}

fn reciprocal_half_scale<F: Float>(s: F) -> F {
    if s != F::ZERO { F::ONE_HALF / s } else { s }
}

pub(super) fn clamp_unit<F: Float>(value: F) -> F {
    if value > F::ONE {
        F::ONE
    } else if value < F::NEG_ONE {
        F::NEG_ONE
    } else {
        value
    }
}
