use super::{Point3d, Vector3d};
use crate::util::Interval;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    pub min: Point3d,
    pub max: Point3d,
}

impl Bounds {
    /// Computes the smallest box containing every point, or `None` if there are no points.
    pub fn from_points(points: impl IntoIterator<Item = Point3d>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let bounds = points.fold(Self { min: first, max: first }, |b, p| Self {
            min: Point3d::new(b.min.x.min(p.x), b.min.y.min(p.y), b.min.z.min(p.z)),
            max: Point3d::new(b.max.x.max(p.x), b.max.y.max(p.y), b.max.z.max(p.z)),
        });
        Some(bounds)
    }

    /// The centre of the box.
    pub fn center(&self) -> Point3d {
        self.min.midpoint(self.max)
    }

    /// The extents of the box along each axis.
    pub fn size(&self) -> Vector3d {
        self.max - self.min
    }

    /// The extent of the box along the given axis (0 = x, 1 = y, 2 = z).
    pub fn axis(&self, axis: usize) -> Interval<f64> {
        Interval::new(self.min[axis], self.max[axis])
    }

    /// Returns true if the point lies inside or on the boundary of the box.
    pub fn contains(&self, point: Point3d) -> bool {
        (0..3).all(|i| self.axis(i).contains(point[i]))
    }
}
