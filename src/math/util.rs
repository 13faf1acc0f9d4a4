use super::{Point3d, Quat, Vector3d};
use cgmath::prelude::*;
use cgmath::{Deg, Matrix3, Rad};

/// Finds the point on the segment `a`-`b` which is closest to `point`.
///
/// # Returns
/// A tuple containing the closest point, and how far along the segment it lies
/// as a fraction between 0 and 1. A zero-length segment yields `(a, 0.0)`.
pub fn closest_point_on_segment(point: Point3d, a: Point3d, b: Point3d) -> (Point3d, f64) {
    let ab = b - a;
    let len2 = ab.magnitude2();
    if len2 == 0.0 {
        return (a, 0.0);
    }
    let t = ((point - a).dot(ab) / len2).clamp(0.0, 1.0);
    (a + ab * t, t)
}

/// Reflects a vector across the plane through the origin with the given normal.
///
/// The normal does not need to be normalised.
/// A zero normal leaves the vector unchanged.
#[inline(always)]
pub fn reflect(vec: Vector3d, normal: Vector3d) -> Vector3d {
    let len2 = normal.magnitude2();
    if len2 == 0.0 {
        return vec;
    }
    vec - normal * (2.0 * normal.dot(vec) / len2)
}

/// The angle between two vectors, signed by the handedness of the rotation
/// from `from` to `to` around `axis`.
pub fn signed_angle(from: Vector3d, to: Vector3d, axis: Vector3d) -> Deg<f64> {
    if from.magnitude2() == 0.0 || to.magnitude2() == 0.0 {
        return Deg(0.0);
    }
    let angle: Deg<f64> = from.angle(to).into();
    if axis.dot(from.cross(to)) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// The shortest signed difference between two angles, in the range (-180°, 180°].
pub fn delta_angle(from: Deg<f64>, to: Deg<f64>) -> Deg<f64> {
    let mut delta = (to.0 - from.0).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    Deg(delta)
}

/// Rotates a vector around the given axis.
pub fn rotate_about(vec: Vector3d, axis: Vector3d, angle: impl Into<Rad<f64>>) -> Vector3d {
    if axis.magnitude2() == 0.0 {
        return vec;
    }
    Quat::from_axis_angle(axis.normalize(), angle) * vec
}

/// Creates a rotation that maps the +Z axis onto `forward` and the +Y axis
/// as close as possible to `up`.
pub fn look_rotation(forward: Vector3d, up: Vector3d) -> Quat {
    if forward.magnitude2() == 0.0 {
        return Quat::new(1.0, 0.0, 0.0, 0.0);
    }
    let z = forward.normalize();
    let x = up.cross(z);
    if x.magnitude2() < 1e-12 {
        return Quat::from_arc(Vector3d::unit_z(), z, None);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from(Matrix3::from_cols(x, y, z)).normalize()
}
