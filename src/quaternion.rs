//! Quaternions representing orientations and rotations.

mod conversion;
mod euler;
mod interpolation;
mod text;

pub use euler::EulerOrder;

use crate::num::Float;
use approx::AbsDiffEq;
use bytemuck::{Pod, Zeroable};
use nalgebra::{self as na, Vector3};
use simba::scalar::SupersetOf;
use std::ops::{Index, IndexMut};

/// A quaternion `xi + yj + zk + w` with scalars of type `F`.
///
/// A quaternion of unit norm represents a rotation in 3D space. Only
/// [`Self::identity`] and the rotation factories (axis-angle, rotation matrix,
/// Euler angles, frame, unit vector alignment and rotation vector) produce
/// unit quaternions. The arithmetic operators treat the quaternion as a plain
/// 4-vector and never renormalize.
///
/// Note that `q` and `-q` represent the same rotation. Equality (`==`) does
/// not account for this: two quaternions are equal only if each pair of
/// coefficients differs by at most the machine epsilon of `F`, so `q != -q`.
#[repr(C)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Clone, Copy, Debug, Default)]
pub struct Quaternion<F> {
    x: F,
    y: F,
    z: F,
    w: F,
}

/// Squared norms closer to one than this are left untouched by
/// [`Quaternion::normalize`].
const NORMALIZATION_SKIP_TOLERANCE: f64 = 1e-10;

impl<F: Float> Quaternion<F> {
    /// The number of scalar coefficients in a quaternion.
    pub const N_COMPONENTS: usize = 4;

    /// Creates a quaternion with the given coefficients. The result is not
    /// normalized.
    #[inline]
    pub const fn new(x: F, y: F, z: F, w: F) -> Self {
        Self { x, y, z, w }
    }

    /// Creates the quaternion `(0, 0, 0, 1)` representing no rotation.
    #[inline]
    pub const fn identity() -> Self {
        Self::new(F::ZERO, F::ZERO, F::ZERO, F::ONE)
    }

    /// Creates a quaternion from its real (scalar) and imaginary (vector)
    /// parts.
    #[inline]
    pub fn from_parts(real: F, imag: Vector3<F>) -> Self {
        Self::new(imag.x, imag.y, imag.z, real)
    }

    #[inline]
    pub fn x(&self) -> F {
        self.x
    }

    #[inline]
    pub fn y(&self) -> F {
        self.y
    }

    #[inline]
    pub fn z(&self) -> F {
        self.z
    }

    #[inline]
    pub fn w(&self) -> F {
        self.w
    }

    /// Returns the real (scalar) part `w`.
    #[inline]
    pub fn real(&self) -> F {
        self.w
    }

    /// Returns the imaginary (vector) part `(x, y, z)`.
    #[inline]
    pub fn imag(&self) -> Vector3<F> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Returns the coefficients in the order `[x, y, z, w]`.
    #[inline]
    pub fn as_array(&self) -> [F; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Overwrites all four coefficients.
    #[inline]
    pub fn set(&mut self, x: F, y: F, z: F, w: F) {
        *self = Self::new(x, y, z, w);
    }

    /// Resets the quaternion to the identity.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::identity();
    }

    /// Computes the four-component dot product with the given quaternion.
    #[inline]
    pub fn dot(&self, other: &Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    #[inline]
    pub fn norm_squared(&self) -> F {
        self.dot(self)
    }

    #[inline]
    pub fn norm(&self) -> F {
        self.norm_squared().sqrt()
    }

    /// Whether the squared norm deviates from one by no more than
    /// [`Float::UNIT_NORM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.norm_squared() - F::ONE).abs() <= F::UNIT_NORM_TOLERANCE
    }

    /// Scales the quaternion to unit norm. A quaternion that is already very
    /// close to unit norm is left as is. The zero quaternion has its real
    /// part set to one, which turns it into the identity.
    pub fn normalize(&mut self) {
        let norm_squared = self.norm_squared();

        if (norm_squared - F::ONE).abs() <= na::convert::<f64, F>(NORMALIZATION_SKIP_TOLERANCE) {
            return;
        }

        if norm_squared != F::ZERO {
            *self *= F::ONE / norm_squared.sqrt();
        } else {
            log::warn!("Normalizing zero quaternion, replacing it with the identity");
            self.w = F::ONE;
        }
    }

    /// Returns a copy of the quaternion scaled to unit norm, following the
    /// same rules as [`Self::normalize`].
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut normalized = *self;
        normalized.normalize();
        normalized
    }

    /// Returns the quaternion with all four coefficients negated. It
    /// represents the same rotation.
    #[inline]
    pub fn negated(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }

    /// Returns the quaternion with negated imaginary part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the multiplicative inverse, which is the conjugate divided by
    /// the squared norm. For a unit quaternion this is the inverse rotation.
    /// The zero quaternion is returned unchanged.
    pub fn inverse(&self) -> Self {
        let norm_squared = self.norm_squared();
        if norm_squared == F::ZERO {
            return *self;
        }
        self.conjugate() / norm_squared
    }

    /// Computes the product `self * (v, 0)` with the pure quaternion formed
    /// from the given vector.
    pub fn quat_vect_mult(&self, v: &Vector3<F>) -> Self {
        Self::new(
            self.w * v.x + self.y * v.z - self.z * v.y,
            self.w * v.y + self.z * v.x - self.x * v.z,
            self.w * v.z + self.x * v.y - self.y * v.x,
            -(self.x * v.x + self.y * v.y + self.z * v.z),
        )
    }

    /// Computes the product `(v, 0) * self` with the pure quaternion formed
    /// from the given vector.
    pub fn vect_quat_mult(&self, v: &Vector3<F>) -> Self {
        Self::new(
            v.x * self.w + v.y * self.z - v.z * self.y,
            v.y * self.w + v.z * self.x - v.x * self.z,
            v.z * self.w + v.x * self.y - v.y * self.x,
            -(v.x * self.x + v.y * self.y + v.z * self.z),
        )
    }

    /// Applies the rotation to the given vector.
    ///
    /// This evaluates the rotation matrix of the quaternion directly, without
    /// renormalizing, so the quaternion must have unit norm for the result to
    /// be a pure rotation.
    pub fn rotate(&self, v: &Vector3<F>) -> Vector3<F> {
        let Self { x, y, z, w } = *self;
        let two = F::TWO;
        Vector3::new(
            (F::ONE - two * (y * y + z * z)) * v.x
                + two * (x * y - z * w) * v.y
                + two * (z * x + y * w) * v.z,
            two * (x * y + z * w) * v.x
                + (F::ONE - two * (z * z + x * x)) * v.y
                + two * (y * z - x * w) * v.z,
            two * (z * x - y * w) * v.x
                + two * (y * z + x * w) * v.y
                + (F::ONE - two * (y * y + x * x)) * v.z,
        )
    }

    /// Applies the inverse rotation to the given vector, using the transpose
    /// of the matrix evaluated by [`Self::rotate`].
    pub fn inverse_rotate(&self, v: &Vector3<F>) -> Vector3<F> {
        let Self { x, y, z, w } = *self;
        let two = F::TWO;
        Vector3::new(
            (F::ONE - two * (y * y + z * z)) * v.x
                + two * (x * y + z * w) * v.y
                + two * (z * x - y * w) * v.z,
            two * (x * y - z * w) * v.x
                + (F::ONE - two * (z * z + x * x)) * v.y
                + two * (y * z + x * w) * v.z,
            two * (z * x + y * w) * v.x
                + two * (y * z - x * w) * v.y
                + (F::ONE - two * (y * y + x * x)) * v.z,
        )
    }

    /// Converts the coefficients to another floating point precision.
    pub fn cast<G>(&self) -> Quaternion<G>
    where
        G: Float + SupersetOf<F>,
    {
        Quaternion::new(
            na::convert(self.x),
            na::convert(self.y),
            na::convert(self.z),
            na::convert(self.w),
        )
    }
}

impl<F: Float> From<[F; 4]> for Quaternion<F> {
    fn from([x, y, z, w]: [F; 4]) -> Self {
        Self::new(x, y, z, w)
    }
}

impl<F: Float> From<Quaternion<F>> for [F; 4] {
    fn from(quaternion: Quaternion<F>) -> Self {
        quaternion.as_array()
    }
}

impl<F: Float> Index<usize> for Quaternion<F> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("quaternion component index {index} out of bounds"),
        }
    }
}

impl<F: Float> IndexMut<usize> for Quaternion<F> {
    fn index_mut(&mut self, index: usize) -> &mut F {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("quaternion component index {index} out of bounds"),
        }
    }
}

impl<F: Float> PartialEq for Quaternion<F> {
    fn eq(&self, other: &Self) -> bool {
        let epsilon = <F as AbsDiffEq>::default_epsilon();
        self.as_array()
            .into_iter()
            .zip(other.as_array())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

// The four coefficients share a `Pod` type and `#[repr(C)]` leaves no
// padding between them.
unsafe impl<F: Float> Zeroable for Quaternion<F> {}
unsafe impl<F: Float> Pod for Quaternion<F> {}

// Hamilton product: `a * b` applies `b` first, then `a`.
impl_binop!(Mul, mul, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(
        a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
        a.w * b.y + a.y * b.w + a.z * b.x - a.x * b.z,
        a.w * b.z + a.z * b.w + a.x * b.y - a.y * b.x,
        a.w * b.w - (a.x * b.x + a.y * b.y + a.z * b.z),
    )
});

impl_binop!(Add, add, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(a.x + b.x, a.y + b.y, a.z + b.z, a.w + b.w)
});

impl_binop!(Sub, sub, Quaternion<F>, Quaternion<F>, Quaternion<F>, |a, b| {
    Quaternion::new(a.x - b.x, a.y - b.y, a.z - b.z, a.w - b.w)
});

impl_scalar_binop!(Mul, mul, Quaternion<F>, Quaternion<F>, |a, s| {
    Quaternion::new(a.x * s, a.y * s, a.z * s, a.w * s)
});

impl_scalar_binop!(Div, div, Quaternion<F>, Quaternion<F>, |a, s| {
    Quaternion::new(a.x / s, a.y / s, a.z / s, a.w / s)
});

impl_unary_op!(Neg, neg, Quaternion<F>, Quaternion<F>, |a| { a.negated() });

impl_binop_assign!(MulAssign, mul_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = &*a * b;
});

impl_binop_assign!(AddAssign, add_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = &*a + b;
});

impl_binop_assign!(SubAssign, sub_assign, Quaternion<F>, Quaternion<F>, |a, b| {
    *a = &*a - b;
});

impl_binop_assign!(MulAssign, mul_assign, Quaternion<F>, F, |a, s| {
    *a = &*a * *s;
});

impl_binop_assign!(DivAssign, div_assign, Quaternion<F>, F, |a, s| {
    *a = &*a / *s;
});

impl_abs_diff_eq!(Quaternion<F>, |a, b, epsilon| {
    a.as_array()
        .into_iter()
        .zip(b.as_array())
        .all(|(a, b)| AbsDiffEq::abs_diff_eq(&a, &b, epsilon))
});

impl_relative_eq!(Quaternion<F>, |a, b, epsilon, max_relative| {
    a.as_array()
        .into_iter()
        .zip(b.as_array())
        .all(|(a, b)| approx::RelativeEq::relative_eq(&a, &b, epsilon, max_relative))
});

#[cfg(test)]
mod tests {
    #![allow(clippy::op_ref)]

    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

    const EPSILON: f64 = 1e-12;

    fn z_quarter_turn() -> Quaternion<f64> {
        Quaternion::from_axis_angle(&Vector3::z(), FRAC_PI_2)
    }

    #[test]
    fn identity_has_expected_coefficients() {
        let identity = Quaternion::<f64>::identity();
        assert_eq!(identity.as_array(), [0.0, 0.0, 0.0, 1.0]);
        assert!(identity.is_normalized());
    }

    #[test]
    fn default_quaternion_is_zero_and_not_a_rotation() {
        let quat = Quaternion::<f32>::default();
        assert_eq!(quat.as_array(), [0.0; 4]);
        assert!(!quat.is_normalized());
    }

    #[test]
    fn from_parts_splits_into_real_and_imag() {
        let quat = Quaternion::from_parts(5.0, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(quat.real(), 5.0);
        assert_eq!(quat.imag(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(quat.as_array(), [1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn set_and_clear_work() {
        let mut quat = Quaternion::<f64>::identity();
        quat.set(1.0, 2.0, 3.0, 4.0);
        assert_eq!(quat.as_array(), [1.0, 2.0, 3.0, 4.0]);
        quat.clear();
        assert_eq!(quat, Quaternion::identity());
    }

    #[test]
    fn indexing_follows_xyzw_order() {
        let mut quat = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(quat[0], 1.0);
        assert_eq!(quat[3], 4.0);
        quat[2] = -7.0;
        assert_eq!(quat.z(), -7.0);
    }

    #[test]
    #[should_panic]
    fn indexing_past_last_component_panics() {
        let quat = Quaternion::<f64>::identity();
        let _ = quat[Quaternion::<f64>::N_COMPONENTS];
    }

    #[test]
    fn array_conversion_preserves_order() {
        let quat = Quaternion::from([1.0_f32, 2.0, 3.0, 4.0]);
        let array: [f32; 4] = quat.into();
        assert_eq!(array, [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn equality_is_componentwise_and_ignores_double_cover() {
        let quat = z_quarter_turn();
        assert_eq!(quat, quat);
        assert_ne!(quat, quat.negated());
        assert_ne!(quat, -quat);
        assert_ne!(quat, quat + Quaternion::new(0.0, 0.0, 0.0, 1e-9));
    }

    #[test]
    fn normalize_scales_to_unit_norm() {
        let mut quat = Quaternion::new(1.0, 2.0, 2.0, 4.0);
        quat.normalize();
        assert_abs_diff_eq!(quat.norm(), 1.0, epsilon = EPSILON);
        assert_abs_diff_eq!(quat, Quaternion::new(0.2, 0.4, 0.4, 0.8), epsilon = EPSILON);
    }

    #[test]
    fn normalize_turns_zero_quaternion_into_identity() {
        let quat = Quaternion::<f64>::default().normalized();
        assert_eq!(quat, Quaternion::identity());
    }

    #[test]
    fn normalize_leaves_nearly_unit_quaternion_untouched() {
        let quat = Quaternion::new(0.0, 0.0, 0.0, 1.0 + 1e-12);
        assert_eq!(quat.normalized().w(), 1.0 + 1e-12);
    }

    #[test]
    fn hamilton_product_of_basis_quaternions_works() {
        let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(i * j, k);
        assert_eq!(j * i, -k);
        assert_eq!(&i * &i, Quaternion::new(0.0, 0.0, 0.0, -1.0));
    }

    #[test]
    fn product_applies_right_operand_first() {
        let a = Quaternion::from_axis_angle(&Vector3::x(), 0.7);
        let b = Quaternion::from_axis_angle(&Vector3::y(), -1.3);
        let v = Vector3::new(0.3, -2.0, 1.1);
        assert_abs_diff_eq!((a * b).rotate(&v), a.rotate(&b.rotate(&v)), epsilon = EPSILON);
    }

    #[test]
    fn mul_assign_composes_rotations() {
        let mut quat = Quaternion::from_axis_angle(&Vector3::z(), PI / 4.0);
        quat *= Quaternion::from_axis_angle(&Vector3::z(), PI / 4.0);
        assert_abs_diff_eq!(quat, z_quarter_turn(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_unit_quaternion_is_conjugate() {
        let quat = Quaternion::from_axis_angle(&Vector3::new(0.0, 0.6, 0.8), 1.2);
        assert_abs_diff_eq!(quat.inverse(), quat.conjugate(), epsilon = EPSILON);
        assert_abs_diff_eq!(quat * quat.inverse(), Quaternion::identity(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_scaled_quaternion_divides_by_squared_norm() {
        let quat = z_quarter_turn() * 3.0;
        assert_abs_diff_eq!(quat * quat.inverse(), Quaternion::identity(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_of_zero_quaternion_is_zero() {
        let zero = Quaternion::<f64>::default();
        assert_eq!(zero.inverse().as_array(), [0.0; 4]);
    }

    #[test]
    fn scalar_operators_scale_raw_coefficients() {
        let quat = Quaternion::new(1.0, -2.0, 3.0, 4.0);
        assert_eq!(quat * 2.0, Quaternion::new(2.0, -4.0, 6.0, 8.0));
        assert_eq!(&quat / 2.0, Quaternion::new(0.5, -1.0, 1.5, 2.0));

        let mut scaled = quat;
        scaled *= 3.0;
        scaled /= 6.0;
        assert_eq!(scaled, Quaternion::new(0.5, -1.0, 1.5, 2.0));
        assert!(!scaled.is_normalized());
    }

    #[test]
    fn additive_operators_are_componentwise() {
        let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        let b = Quaternion::new(0.5, 0.5, 0.5, 0.5);
        assert_eq!(a + b, Quaternion::new(1.5, 2.5, 3.5, 4.5));
        assert_eq!(&a - &b, Quaternion::new(0.5, 1.5, 2.5, 3.5));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn pure_quaternion_products_match_hamilton_product() {
        let quat = Quaternion::new(0.1, -0.4, 0.3, 0.8);
        let v = Vector3::new(2.0, -1.0, 0.5);
        let pure = Quaternion::from_parts(0.0, v);
        assert_abs_diff_eq!(quat.quat_vect_mult(&v), quat * pure, epsilon = EPSILON);
        assert_abs_diff_eq!(quat.vect_quat_mult(&v), pure * quat, epsilon = EPSILON);
    }

    #[test]
    fn rotating_x_axis_by_quarter_turn_about_z_gives_y_axis() {
        let quat = z_quarter_turn();
        assert_abs_diff_eq!(
            quat,
            Quaternion::new(0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2),
            epsilon = EPSILON
        );
        assert_abs_diff_eq!(quat.rotate(&Vector3::x()), Vector3::y(), epsilon = EPSILON);
        assert_abs_diff_eq!(quat.inverse_rotate(&Vector3::y()), Vector3::x(), epsilon = EPSILON);
    }

    #[test]
    fn rotate_matches_sandwich_product() {
        let quat = Quaternion::from_axis_angle(&Vector3::new(0.48, 0.6, 0.64), 2.1);
        let v = Vector3::new(-1.0, 0.25, 3.0);
        let sandwich = quat * Quaternion::from_parts(0.0, v) * quat.conjugate();
        assert_abs_diff_eq!(quat.rotate(&v), sandwich.imag(), epsilon = EPSILON);
    }

    #[test]
    fn inverse_rotate_undoes_rotate() {
        let quat = Quaternion::from_axis_angle(&Vector3::new(0.0, 0.6, -0.8), -0.9);
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_abs_diff_eq!(quat.inverse_rotate(&quat.rotate(&v)), v, epsilon = EPSILON);
    }

    #[test]
    fn inverse_rotate_does_not_renormalize() {
        let quat = Quaternion::new(0.0, 0.0, 0.0, 2.0);
        // The matrix of a non-unit real quaternion is still the identity
        assert_eq!(quat.rotate(&Vector3::x()), Vector3::x());
        assert_eq!(quat.inverse_rotate(&Vector3::x()), Vector3::x());
    }

    #[test]
    fn cast_converts_precision() {
        let quat = Quaternion::new(0.5_f64, -0.5, 0.5, -0.5);
        let single: Quaternion<f32> = quat.cast();
        assert_eq!(single.as_array(), [0.5, -0.5, 0.5, -0.5]);
        let double: Quaternion<f64> = single.cast();
        assert_eq!(double, quat);
    }

    #[test]
    fn quaternions_can_be_viewed_as_bytes() {
        let quats = [Quaternion::<f32>::identity(); 2];
        let floats: &[f32] = bytemuck::cast_slice(&quats);
        assert_eq!(floats, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn quaternions_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Quaternion<f32>>();
        assert_send_sync::<Quaternion<f64>>();
    }
}
