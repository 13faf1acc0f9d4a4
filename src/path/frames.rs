//! Normal computation for vertex paths.

use crate::math::{delta_angle, reflect, rotate_about, signed_angle, Point3d, Vector3d};
use cgmath::prelude::*;
use cgmath::Deg;
use itertools::Itertools;
use log::trace;

/// Closed loops whose normals already meet within this angle are left alone.
const LOOP_TOLERANCE: Deg<f64> = Deg(0.1);

/// The state carried from vertex to vertex by the rotation minimising frame.
#[derive(Copy, Clone, Debug)]
struct Frame {
    axis: Vector3d,
    tangent: Vector3d,
}

impl Frame {
    /// Carries the frame to the next vertex using two reflections
    /// (Wang et al., "Computation of rotation minimizing frames").
    ///
    /// # Parameters
    /// * `offset` - The vector from the previous vertex to the next
    /// * `tangent` - The tangent at the next vertex
    fn transport(self, offset: Vector3d, tangent: Vector3d) -> Frame {
        let axis = reflect(self.axis, offset);
        let reflected_tangent = reflect(self.tangent, offset);
        let axis = reflect(axis, tangent - reflected_tangent);
        Frame { axis, tangent }
    }

    fn normal(&self) -> Vector3d {
        let n = self.axis.cross(self.tangent);
        if n.magnitude2() < 1e-18 {
            any_perpendicular(self.tangent)
        } else {
            n.normalize()
        }
    }
}

/// A unit vector perpendicular to `v`.
fn any_perpendicular(v: Vector3d) -> Vector3d {
    let other = if v.x.abs() < 0.9 {
        Vector3d::unit_x()
    } else {
        Vector3d::unit_y()
    };
    v.cross(other).normalize()
}

/// Normals of a path lying in a plane.
pub(super) fn planar_normals(tangents: &[Vector3d], up: Vector3d, flip: bool) -> Vec<Vector3d> {
    tangents
        .iter()
        .map(|t| if flip { t.cross(up) } else { up.cross(*t) })
        .collect()
}

/// Normals of a 3D path, following a rotation minimising frame seeded with `up`.
pub(super) fn rotation_minimising_normals(
    points: &[Point3d],
    tangents: &[Vector3d],
    up: Vector3d,
) -> Vec<Vector3d> {
    let first = Frame {
        axis: up,
        tangent: tangents[0],
    };
    let rest = points
        .iter()
        .tuple_windows()
        .zip(&tangents[1..])
        .scan(first, |frame, ((a, b), tangent)| {
            *frame = frame.transport(*b - *a, *tangent);
            Some(*frame)
        });
    std::iter::once(first).chain(rest).map(|f| f.normal()).collect()
}

/// Spreads the twist between the last and first normal of a closed loop along
/// the whole path, so the normals meet up at the join.
pub(super) fn close_loop(normals: &mut [Vector3d], tangents: &[Vector3d]) {
    let n = normals.len();
    let error = signed_angle(normals[n - 1], normals[0], tangents[0]);
    if error.0.abs() <= LOOP_TOLERANCE.0 {
        return;
    }
    trace!("correcting {:.2} degrees of twist across loop join", error.0);
    let last = (n - 1) as f64;
    for i in 1..n {
        normals[i] = rotate_about(normals[i], tangents[i], error * (i as f64 / last));
    }
}

/// Rotates the normals between each pair of anchors to match the anchor normal angles.
///
/// # Parameters
/// * `anchor_vertices` - The vertex index of each anchor, in order. For closed
///   loops the last entry is the join back to the first anchor.
/// * `angles` - The normal angle of each anchor
/// * `global` - An angle added to every anchor angle
pub(super) fn apply_anchor_angles(
    normals: &mut [Vector3d],
    tangents: &[Vector3d],
    anchor_vertices: &[usize],
    angles: &[Deg<f64>],
    global: Deg<f64>,
    closed: bool,
) {
    if anchor_vertices.len() < 2 {
        return;
    }
    let spans = anchor_vertices.len() - 1;
    let angle_at = |anchor: usize| angles.get(anchor).copied().unwrap_or(Deg(0.0)) + global;

    for (span, (&start_vert, &end_vert)) in anchor_vertices.iter().tuple_windows().enumerate() {
        let next = if closed { (span + 1) % spans } else { span + 1 };
        let start_angle = angle_at(span);
        let delta = delta_angle(start_angle, angle_at(next));

        // The last span also owns its end vertex
        let mut count = end_vert.saturating_sub(start_vert);
        if span == spans - 1 {
            count += 1;
        }
        let count = count.min(normals.len().saturating_sub(start_vert));

        for i in 0..count {
            let vert = start_vert + i;
            let t = if count == 1 {
                1.0
            } else {
                i as f64 / (count - 1) as f64
            };
            normals[vert] = rotate_about(normals[vert], tangents[vert], start_angle + delta * t);
        }
    }
}
