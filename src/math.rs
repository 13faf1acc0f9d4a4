//! Mathematical structs and functions.

use cgmath::{Point3, Quaternion, Vector3};
pub use bezier::CubicBezier3d;
pub use bounds::Bounds;
pub use curve::{subdivided_samples_along_curve, ParametricCurve3d};
pub use transform::{PathSpace, Transform};
pub use util::*;

mod bezier;
mod bounds;
mod curve;
mod transform;
mod util;

/// A 3D point
pub type Point3d = Point3<f64>;

/// A 3D vector
pub type Vector3d = Vector3<f64>;

/// A rotation in 3D space
pub type Quat = Quaternion<f64>;
