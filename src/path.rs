//! The vertex path: a polyline approximation of a curve, with per-vertex frames.

use crate::error::ConfigError;
use crate::math::{Bounds, PathSpace, Point3d, Transform, Vector3d};
use cgmath::{Deg, InnerSpace};
use itertools::Itertools;
use smallvec::SmallVec;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use query::{ClosestPoint, EndOfPath, PathQuery, TimeOnPath};
pub use split::PathSamples;

mod frames;
mod query;
mod split;

/// A collection of vertices lying along a curve.
///
/// Allows moving at constant speed along the curve, and looking up positions,
/// directions and normals by distance travelled or by "time"
/// (where time = 0 is the start of the path and time = 1 is the end).
///
/// A path is immutable once built. Changing the curve means building a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexPath {
    space: PathSpace,
    closed: bool,
    points: Vec<Point3d>,
    tangents: Vec<Vector3d>,
    normals: Vec<Vector3d>,
    /// Total distance from the first vertex up to each vertex.
    cumulative_lengths: Vec<f64>,
    /// Fraction of the path length at each vertex.
    times: Vec<f64>,
    length: f64,
    bounds: Bounds,
    /// Seeds the normals of planar paths; first rotation axis of 3D paths.
    up: Vector3d,
}

/// Options for building a [VertexPath] from curve samples.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathOptions {
    /// The space the path lives in.
    pub space: PathSpace,
    /// Whether the last vertex joins back up with the first.
    pub closed: bool,
    /// Reverses the direction of every normal.
    pub flip_normals: bool,
    /// Rotation added to the normal angle of every anchor (3D paths only).
    pub global_normal_angle: Deg<f64>,
    /// Normal angle at each anchor, in anchor order (3D paths only).
    /// Missing entries are treated as zero.
    pub normal_angles: SmallVec<[Deg<f64>; 8]>,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            space: PathSpace::FullVolume,
            closed: false,
            flip_normals: false,
            global_normal_angle: Deg(0.0),
            normal_angles: SmallVec::new(),
        }
    }
}

impl VertexPath {
    /// Builds a path from samples of an arbitrary curve, computing the normals.
    ///
    /// Tangents need not be unit length, but must not be zero.
    ///
    /// Planar paths take their normals from the cross product of tangent and up vector.
    /// 3D paths use a rotation minimising frame, corrected so closed loops join
    /// up, then rotated to match the anchor normal angles.
    pub fn from_samples(samples: PathSamples, options: &PathOptions) -> Result<Self, ConfigError> {
        samples.validate()?;
        let PathSamples {
            points,
            tangents,
            cumulative_lengths,
            anchor_vertices,
        } = samples;
        let tangents = tangents.into_iter().map(|t| t.normalize()).collect::<Vec<_>>();

        let up = match options.space {
            PathSpace::PlaneXY => -Vector3d::unit_z(),
            PathSpace::PlaneXZ => Vector3d::unit_y(),
            PathSpace::FullVolume => {
                let size = Bounds::from_points(points.iter().copied())
                    .ok_or(ConfigError::TooFewVertices { count: 0 })?
                    .size();
                if size.z > size.y {
                    Vector3d::unit_y()
                } else {
                    -Vector3d::unit_z()
                }
            }
        };

        let normals = match options.space {
            PathSpace::FullVolume => {
                let mut normals = frames::rotation_minimising_normals(&points, &tangents, up);
                if options.closed {
                    frames::close_loop(&mut normals, &tangents);
                }
                if !options.normal_angles.is_empty() || options.global_normal_angle.0 != 0.0 {
                    frames::apply_anchor_angles(
                        &mut normals,
                        &tangents,
                        &anchor_vertices,
                        &options.normal_angles,
                        options.global_normal_angle,
                        options.closed,
                    );
                }
                if options.flip_normals {
                    normals.iter_mut().for_each(|n| *n = -*n);
                }
                normals
            }
            PathSpace::PlaneXY | PathSpace::PlaneXZ => {
                frames::planar_normals(&tangents, up, options.flip_normals)
            }
        };

        Self::from_parts(
            options.space,
            options.closed,
            up,
            points,
            tangents,
            normals,
            cumulative_lengths,
        )
    }

    /// Assembles a path from fully computed vertex data, deriving times and bounds.
    pub(crate) fn from_parts(
        space: PathSpace,
        closed: bool,
        up: Vector3d,
        points: Vec<Point3d>,
        tangents: Vec<Vector3d>,
        normals: Vec<Vector3d>,
        cumulative_lengths: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        let count = points.len();
        if count < 2 {
            return Err(ConfigError::TooFewVertices { count });
        }
        for (name, len) in [
            ("tangents", tangents.len()),
            ("normals", normals.len()),
            ("cumulative_lengths", cumulative_lengths.len()),
        ] {
            if len != count {
                return Err(ConfigError::LengthMismatch {
                    name,
                    expected: count,
                    actual: len,
                });
            }
        }

        let length = cumulative_lengths[count - 1];
        if length.is_nan() || length <= 0.0 {
            return Err(ConfigError::ZeroLength);
        }
        let times = cumulative_lengths.iter().map(|l| l / length).collect();
        let bounds = Bounds::from_points(points.iter().copied())
            .ok_or(ConfigError::TooFewVertices { count })?;

        Ok(Self {
            space,
            closed,
            points,
            tangents,
            normals,
            cumulative_lengths,
            times,
            length,
            bounds,
            up,
        })
    }

    /// Creates a view of the path that answers queries in world space.
    pub fn query<'a>(&'a self, transform: &'a Transform) -> PathQuery<'a> {
        PathQuery::new(self, transform)
    }

    /// The number of vertices in the path.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// The total length of the path.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Whether the last vertex connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn space(&self) -> PathSpace {
        self.space
    }

    /// The bounding box of the vertices, in local space.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn up(&self) -> Vector3d {
        self.up
    }

    /// The vertex positions in local space.
    pub fn points(&self) -> &[Point3d] {
        &self.points
    }

    /// The unit tangent at each vertex, in local space.
    pub fn tangents(&self) -> &[Vector3d] {
        &self.tangents
    }

    /// The unit normal at each vertex, in local space.
    pub fn normals(&self) -> &[Vector3d] {
        &self.normals
    }

    /// The distance along the path at each vertex.
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative_lengths
    }

    /// The time (fraction of the path length) at each vertex.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Iterates over the segments of the path as pairs of vertex indices,
    /// including the segment back to the start for closed paths.
    pub fn segments(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.points.len();
        let wrap = self.closed.then_some((n - 1, 0));
        (0..n).tuple_windows().chain(wrap)
    }
}

impl PathSamples {
    /// Checks the samples describe a usable path.
    fn validate(&self) -> Result<(), ConfigError> {
        let count = self.points.len();
        if count < 2 {
            return Err(ConfigError::TooFewVertices { count });
        }
        for (name, len) in [
            ("tangents", self.tangents.len()),
            ("cumulative_lengths", self.cumulative_lengths.len()),
        ] {
            if len != count {
                return Err(ConfigError::LengthMismatch {
                    name,
                    expected: count,
                    actual: len,
                });
            }
        }
        if !self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
            return Err(ConfigError::NonFinite { name: "points" });
        }
        if !self.tangents.iter().all(|t| t.x.is_finite() && t.y.is_finite() && t.z.is_finite()) {
            return Err(ConfigError::NonFinite { name: "tangents" });
        }
        if !self.cumulative_lengths.iter().all(|l| l.is_finite()) {
            return Err(ConfigError::NonFinite { name: "cumulative_lengths" });
        }
        if self.cumulative_lengths[0] != 0.0 {
            return Err(ConfigError::NonZeroStart {
                first: self.cumulative_lengths[0],
            });
        }
        if let Some(index) = self.tangents.iter().position(|t| t.magnitude2() < 1e-18) {
            return Err(ConfigError::ZeroTangent { index });
        }
        if let Some((index, _)) = self
            .cumulative_lengths
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| b < a)
        {
            return Err(ConfigError::DecreasingLength { index: index + 1 });
        }
        Ok(())
    }
}
