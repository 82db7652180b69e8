//! Euler angle representation of rotations.

use super::{Quaternion, conversion::clamp_unit};
use crate::num::Float;
use anyhow::{Result, anyhow, bail};
use nalgebra::Vector3;
use std::{fmt, str::FromStr};

/// The order in which the three elementary rotations of a set of Euler angles
/// are composed.
///
/// The first, second and third angle always rotate about the x-, y- and
/// z-axis respectively. For order `ABC`, the resulting rotation is
/// `R_A * R_B * R_C`, meaning that the rotation about the last named axis is
/// applied to a vector first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EulerOrder {
    XYZ,
    YXZ,
    ZXY,
    #[default]
    ZYX,
    YZX,
    XZY,
}

impl EulerOrder {
    pub const ALL: [Self; 6] = [
        Self::XYZ,
        Self::YXZ,
        Self::ZXY,
        Self::ZYX,
        Self::YZX,
        Self::XZY,
    ];

    /// Name used to explicitly state that no order is given.
    pub const NONE_NAME: &'static str = "NONE";

    /// Parses an order name that may also be [`Self::NONE_NAME`], in which
    /// case [`None`] is returned.
    ///
    /// # Errors
    /// Returns an error if the name is neither a valid order nor
    /// [`Self::NONE_NAME`].
    pub fn parse_optional(name: &str) -> Result<Option<Self>> {
        if name.trim() == Self::NONE_NAME {
            Ok(None)
        } else {
            name.parse().map(Some)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::XYZ => "XYZ",
            Self::YXZ => "YXZ",
            Self::ZXY => "ZXY",
            Self::ZYX => "ZYX",
            Self::YZX => "YZX",
            Self::XZY => "XZY",
        }
    }
}

impl fmt::Display for EulerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EulerOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name == Self::NONE_NAME {
            bail!("Euler order `{}` does not specify a valid order", name);
        }
        Self::ALL
            .into_iter()
            .find(|order| order.name() == name)
            .ok_or_else(|| anyhow!("Unknown Euler order `{}`", name))
    }
}

impl<F: Float> Quaternion<F> {
    /// Creates the quaternion for the given Euler angles in radians, where
    /// `angles` holds the angles about the x-, y- and z-axis, composed in the
    /// given order.
    pub fn from_euler(angles: &Vector3<F>, order: EulerOrder) -> Self {
        let half = F::ONE_HALF;
        let (s1, c1) = ((angles.x * half).sin(), (angles.x * half).cos());
        let (s2, c2) = ((angles.y * half).sin(), (angles.y * half).cos());
        let (s3, c3) = ((angles.z * half).sin(), (angles.z * half).cos());

        match order {
            EulerOrder::XYZ => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::YXZ => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::ZXY => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::ZYX => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
            EulerOrder::YZX => Self::new(
                s1 * c2 * c3 + c1 * s2 * s3,
                c1 * s2 * c3 + s1 * c2 * s3,
                c1 * c2 * s3 - s1 * s2 * c3,
                c1 * c2 * c3 - s1 * s2 * s3,
            ),
            EulerOrder::XZY => Self::new(
                s1 * c2 * c3 - c1 * s2 * s3,
                c1 * s2 * c3 - s1 * c2 * s3,
                c1 * c2 * s3 + s1 * s2 * c3,
                c1 * c2 * c3 + s1 * s2 * s3,
            ),
        }
    }

    /// Like [`Self::from_euler`], with the three angles given separately.
    pub fn from_euler_angles(alpha: F, beta: F, gamma: F, order: EulerOrder) -> Self {
        Self::from_euler(&Vector3::new(alpha, beta, gamma), order)
    }

    /// Like [`Self::from_euler`], but the order may be missing.
    ///
    /// # Errors
    /// Returns an error if no order is given.
    pub fn try_from_euler(angles: &Vector3<F>, order: Option<EulerOrder>) -> Result<Self> {
        match order {
            Some(order) => Ok(Self::from_euler(angles, order)),
            None => bail!("No Euler order given for creating quaternion from Euler angles"),
        }
    }

    /// Like [`Self::try_from_euler`], but logs an error and returns the
    /// identity if no order is given.
    pub fn from_euler_or_identity(angles: &Vector3<F>, order: Option<EulerOrder>) -> Self {
        Self::try_from_euler(angles, order).unwrap_or_else(|error| {
            log::error!("{error}, using identity instead");
            Self::identity()
        })
    }

    /// Computes the roll, pitch and yaw angles (about the x-, y- and z-axis)
    /// of the normalized quaternion. This is the inverse of
    /// [`Self::from_euler`] with [`EulerOrder::ZYX`] for pitch in
    /// `[-π/2, π/2]`.
    ///
    /// Note that this is not a rotation vector; see
    /// [`Self::to_rotation_vector`] for that.
    pub fn to_euler_vector(&self) -> Vector3<F> {
        let Self { x, y, z, w } = self.normalized();
        let (one, two) = (F::ONE, F::TWO);

        let roll = (two * (w * x + y * z)).atan2(one - two * (x * x + y * y));
        let pitch = clamp_unit(two * (w * y - z * x)).asin();
        let yaw = (two * (w * z + x * y)).atan2(one - two * (y * y + z * z));

        Vector3::new(roll, pitch, yaw)
    }
}
