//! Unit quaternions for representing and manipulating rigid body rotations.

#[macro_use]
mod macros;

pub mod num;
pub mod quaternion;

pub use num::Float;
pub use quaternion::{EulerOrder, Quaternion};
