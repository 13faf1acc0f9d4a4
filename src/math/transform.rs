//! Local to world conversions for paths.

use super::{Point3d, Quat, Vector3d};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The space a path lives in.
///
/// Planar paths only respond to the parts of a [Transform] that keep them in their plane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PathSpace {
    /// A full 3D path.
    #[default]
    FullVolume,
    /// A path lying in the XY plane.
    PlaneXY,
    /// A path lying in the XZ plane.
    PlaneXZ,
}

impl PathSpace {
    /// The axis perpendicular to the plane of a planar path.
    pub fn plane_normal(self) -> Option<Vector3d> {
        match self {
            PathSpace::FullVolume => None,
            PathSpace::PlaneXY => Some(Vector3d::unit_z()),
            PathSpace::PlaneXZ => Some(Vector3d::unit_y()),
        }
    }
}

/// A local-to-world transform, supplied by the host of the path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform {
    /// The world position of the local origin.
    pub position: Vector3d,
    /// The rotation of the local axes. Must be a unit quaternion.
    pub rotation: Quat,
    /// Scale along each local axis.
    pub scale: Vector3d,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The transform that leaves everything where it is.
    pub fn identity() -> Self {
        Self {
            position: Vector3d::new(0.0, 0.0, 0.0),
            rotation: Quat::new(1.0, 0.0, 0.0, 0.0),
            scale: Vector3d::new(1.0, 1.0, 1.0),
        }
    }

    /// A pure translation.
    pub fn from_position(position: Vector3d) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    pub fn with_rotation(self, rotation: Quat) -> Self {
        Self { rotation, ..self }
    }

    pub fn with_scale(self, scale: Vector3d) -> Self {
        Self { scale, ..self }
    }

    /// Restricts the transform to what a path in the given space can use.
    ///
    /// The scale always becomes uniform (its largest component). Planar spaces
    /// keep only the rotation around the plane normal, and drop the part of the
    /// translation that would move the path out of its plane.
    pub fn locked_to(&self, space: PathSpace) -> Transform {
        let s = self.scale.x.max(self.scale.y).max(self.scale.z);
        let mut locked = Transform {
            scale: Vector3d::new(s, s, s),
            ..*self
        };
        if let Some(normal) = space.plane_normal() {
            locked.rotation = twist(self.rotation, normal);
            locked.position -= normal * self.position.dot(normal);
        }
        locked
    }

    /// Transforms a point from local space to world space.
    pub fn transform_point(&self, point: Point3d, space: PathSpace) -> Point3d {
        let t = self.locked_to(space);
        let local = point.to_vec().mul_element_wise(t.scale);
        Point3d::from_vec(t.rotation * local + t.position)
    }

    /// Transforms a direction from local space to world space.
    ///
    /// Only the rotation applies, so unit vectors stay unit vectors.
    pub fn transform_direction(&self, dir: Vector3d, space: PathSpace) -> Vector3d {
        self.locked_to(space).rotation * dir
    }

    /// Transforms a point from world space to local space.
    pub fn inverse_transform_point(&self, point: Point3d, space: PathSpace) -> Point3d {
        let t = self.locked_to(space);
        let local = t.rotation.conjugate() * (point.to_vec() - t.position);
        Point3d::from_vec(local.div_element_wise(t.scale))
    }
}

/// Extracts the part of a rotation that turns around `axis` (swing-twist decomposition).
fn twist(rotation: Quat, axis: Vector3d) -> Quat {
    let proj = axis * rotation.v.dot(axis);
    let twist = Quat::from_sv(rotation.s, proj);
    if twist.magnitude2() < 1e-12 {
        Quat::new(1.0, 0.0, 0.0, 0.0)
    } else {
        twist.normalize()
    }
}
