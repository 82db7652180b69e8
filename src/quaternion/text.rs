//! Text representation of quaternions.

use super::Quaternion;
use crate::num::Float;
use anyhow::{Result, anyhow, bail};
use std::{fmt, str::FromStr};

impl<F: Float> fmt::Display for Quaternion<F> {
    /// Writes the coefficients as `x y z w`, separated by single spaces.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.z, self.w)
    }
}

impl<F: Float> FromStr for Quaternion<F> {
    type Err = anyhow::Error;

    /// Parses four whitespace separated coefficients in the order `x y z w`.
    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();
        let mut coefficients = [F::ZERO; 4];

        for (idx, coefficient) in coefficients.iter_mut().enumerate() {
            let token = tokens.next().ok_or_else(|| {
                anyhow!(
                    "Expected 4 quaternion coefficients in `{}`, found {}",
                    s,
                    idx
                )
            })?;
            *coefficient = token
                .parse()
                .map_err(|err| anyhow!("Invalid quaternion coefficient `{}`: {}", token, err))?;
        }

        if let Some(token) = tokens.next() {
            bail!(
                "Unexpected token `{}` after quaternion coefficients in `{}`",
                token,
                s
            );
        }

        Ok(Self::from(coefficients))
    }
}
