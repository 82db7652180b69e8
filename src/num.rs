//! Numbers and numerics.

use nalgebra as na;
use num_traits as nt;
use std::{fmt, str::FromStr};

/// Gathers traits useful for working with generic floating point types.
///
/// Only implemented for [`f32`] and [`f64`].
pub trait Float:
    Copy
    + nt::FloatConst
    + nt::FromPrimitive
    + na::RealField
    + bytemuck::Pod
    + FromStr<Err: fmt::Display>
{
    const ZERO: Self;
    const ONE: Self;
    const NEG_ONE: Self;
    const TWO: Self;
    const ONE_HALF: Self;

    /// Largest deviation of the squared norm from one for which a quaternion
    /// is still considered normalized.
    const UNIT_NORM_TOLERANCE: Self;
}

macro_rules! impl_float {
    ($f:ty, $unit_norm_tolerance:expr) => {
        impl Float for $f {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const NEG_ONE: Self = -1.0;
            const TWO: Self = 2.0;
            const ONE_HALF: Self = 0.5;
            const UNIT_NORM_TOLERANCE: Self = $unit_norm_tolerance;
        }
    };
}

impl_float!(f32, 1e-6);
impl_float!(f64, 1e-10);
