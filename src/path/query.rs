//! Time, distance and closest-point lookups on a [VertexPath].

use super::VertexPath;
use crate::math::{closest_point_on_segment, look_rotation, Point3d, Quat, Transform, Vector3d};
use crate::util::Interval;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with times that fall outside the range `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EndOfPath {
    /// Stop at the ends of the path.
    Clamp,
    /// Start again from the beginning.
    #[default]
    Wrap,
    /// Travel back and forth along the path.
    PingPong,
}

impl EndOfPath {
    /// Maps a time onto the range `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        match self {
            EndOfPath::Clamp => t.clamp(0.0, 1.0),
            EndOfPath::Wrap => t.rem_euclid(1.0),
            EndOfPath::PingPong => 1.0 - (t.rem_euclid(2.0) - 1.0).abs(),
        }
    }
}

/// A location on the path, expressed as a fraction of the way between two vertices.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimeOnPath {
    pub previous_index: usize,
    pub next_index: usize,
    /// How far between the two vertices, from 0 to 1.
    pub fraction: f64,
}

/// The result of a closest point search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClosestPoint {
    /// The time of the closest point.
    pub time: f64,
    /// The distance along the path to the closest point.
    pub distance: f64,
    /// The closest point, in world space.
    pub position: Point3d,
}

impl VertexPath {
    /// Finds the vertices either side of the time `t`, after applying the end of path behaviour.
    ///
    /// When several vertices share the same time, the lowest index wins.
    pub fn locate_time(&self, t: f64, end: EndOfPath) -> TimeOnPath {
        let t = end.apply(t);
        let times = &self.times;
        let last = times.len() - 1;

        let mut prev = 0;
        let mut next = last;
        // Start from where `t` would be if the vertices were evenly spaced
        let mut i = ((t * last as f64).round() as usize).min(last);

        loop {
            if t <= times[i] {
                next = i;
            } else {
                prev = i;
            }
            i = (prev + next) / 2;
            if next - prev <= 1 {
                break;
            }
        }

        TimeOnPath {
            previous_index: prev,
            next_index: next,
            fraction: Interval::new(times[prev], times[next]).inv_lerp(t),
        }
    }

    /// Finds the location on the path closest to a point in local space.
    ///
    /// Checks every segment, including the one joining the ends of a closed path.
    pub fn closest_to_local(&self, point: Point3d) -> TimeOnPath {
        let initial = TimeOnPath {
            previous_index: 0,
            next_index: 1,
            fraction: 0.0,
        };
        self.segments()
            .map(|(a, b)| {
                let (closest, fraction) = closest_point_on_segment(point, self.points[a], self.points[b]);
                let data = TimeOnPath {
                    previous_index: a,
                    next_index: b,
                    fraction,
                };
                (data, (point - closest).magnitude2())
            })
            .fold((initial, f64::INFINITY), |best, candidate| {
                if candidate.1 < best.1 {
                    candidate
                } else {
                    best
                }
            })
            .0
    }

    /// The time at a location on the path.
    ///
    /// The segment closing a loop has no times of its own, so locations on it
    /// snap to whichever end is nearer.
    pub fn time_at(&self, data: &TimeOnPath) -> f64 {
        if data.next_index < data.previous_index {
            let nearest = if data.fraction < 0.5 {
                data.previous_index
            } else {
                data.next_index
            };
            return self.times[nearest];
        }
        Interval::new(self.times[data.previous_index], self.times[data.next_index]).lerp(data.fraction)
    }

    /// The distance along the path at a location on the path.
    pub fn distance_at(&self, data: &TimeOnPath) -> f64 {
        self.time_at(data) * self.length
    }

    /// The local space position at a location on the path.
    pub fn local_point_at(&self, data: &TimeOnPath) -> Point3d {
        let a = self.points[data.previous_index];
        let b = self.points[data.next_index];
        Point3d::from_vec(a.to_vec().lerp(b.to_vec(), data.fraction))
    }

    fn local_tangent_at(&self, data: &TimeOnPath) -> Vector3d {
        lerp_direction(
            self.tangents[data.previous_index],
            self.tangents[data.next_index],
            data.fraction,
        )
    }

    fn local_normal_at(&self, data: &TimeOnPath) -> Vector3d {
        lerp_direction(
            self.normals[data.previous_index],
            self.normals[data.next_index],
            data.fraction,
        )
    }
}

/// Interpolates between two directions, keeping the result unit length where possible.
fn lerp_direction(a: Vector3d, b: Vector3d, t: f64) -> Vector3d {
    let v = a.lerp(b, t);
    if v.magnitude2() > 1e-18 {
        v.normalize()
    } else {
        a
    }
}

/// A [VertexPath] placed in the world by a [Transform].
///
/// All results are in world space.
#[derive(Copy, Clone, Debug)]
pub struct PathQuery<'a> {
    path: &'a VertexPath,
    transform: &'a Transform,
}

impl<'a> PathQuery<'a> {
    pub fn new(path: &'a VertexPath, transform: &'a Transform) -> Self {
        Self { path, transform }
    }

    fn to_world_point(&self, point: Point3d) -> Point3d {
        self.transform.transform_point(point, self.path.space)
    }

    fn to_world_direction(&self, dir: Vector3d) -> Vector3d {
        self.transform.transform_direction(dir, self.path.space)
    }

    /// Converts a distance along the path to a time.
    fn time_of(&self, distance: f64) -> f64 {
        distance / self.path.length
    }

    /// The position of the vertex with the given index.
    pub fn point(&self, index: usize) -> Point3d {
        self.to_world_point(self.path.points[index])
    }

    /// The tangent of the vertex with the given index.
    pub fn tangent(&self, index: usize) -> Vector3d {
        self.to_world_direction(self.path.tangents[index])
    }

    /// The normal of the vertex with the given index.
    pub fn normal(&self, index: usize) -> Vector3d {
        self.to_world_direction(self.path.normals[index])
    }

    /// Gets the point on the path at time `t` (0 is the start, 1 is the end).
    pub fn point_at_time(&self, t: f64, end: EndOfPath) -> Point3d {
        let data = self.path.locate_time(t, end);
        self.to_world_point(self.path.local_point_at(&data))
    }

    /// Gets the point on the path after travelling the given distance.
    pub fn point_at_distance(&self, distance: f64, end: EndOfPath) -> Point3d {
        self.point_at_time(self.time_of(distance), end)
    }

    /// Gets the forward direction of the path at time `t`.
    pub fn direction_at_time(&self, t: f64, end: EndOfPath) -> Vector3d {
        let data = self.path.locate_time(t, end);
        self.to_world_direction(self.path.local_tangent_at(&data))
    }

    /// Gets the forward direction of the path after travelling the given distance.
    pub fn direction_at_distance(&self, distance: f64, end: EndOfPath) -> Vector3d {
        self.direction_at_time(self.time_of(distance), end)
    }

    /// Gets the normal of the path at time `t`.
    pub fn normal_at_time(&self, t: f64, end: EndOfPath) -> Vector3d {
        let data = self.path.locate_time(t, end);
        self.to_world_direction(self.path.local_normal_at(&data))
    }

    /// Gets the normal of the path after travelling the given distance.
    pub fn normal_at_distance(&self, distance: f64, end: EndOfPath) -> Vector3d {
        self.normal_at_time(self.time_of(distance), end)
    }

    /// Gets a rotation that faces along the path at time `t`, with its up axis along the path normal.
    pub fn rotation_at_time(&self, t: f64, end: EndOfPath) -> Quat {
        let data = self.path.locate_time(t, end);
        let forward = self.to_world_direction(self.path.local_tangent_at(&data));
        let up = self.to_world_direction(self.path.local_normal_at(&data));
        look_rotation(forward, up)
    }

    /// Gets a rotation that faces along the path after travelling the given distance.
    pub fn rotation_at_distance(&self, distance: f64, end: EndOfPath) -> Quat {
        self.rotation_at_time(self.time_of(distance), end)
    }

    /// Finds the point on the path closest to a point in the world.
    pub fn closest(&self, world_point: Point3d) -> ClosestPoint {
        // Work in local space, so the vertices don't each need transforming
        let local = self.transform.inverse_transform_point(world_point, self.path.space);
        let data = self.path.closest_to_local(local);
        let time = self.path.time_at(&data);
        ClosestPoint {
            time,
            distance: time * self.path.length,
            position: self.to_world_point(self.path.local_point_at(&data)),
        }
    }

    /// Finds the point on the path closest to a point in the world.
    pub fn closest_point(&self, world_point: Point3d) -> Point3d {
        self.closest(world_point).position
    }

    /// Finds the time (0 is the start, 1 is the end) of the point on the path closest to a point in the world.
    pub fn closest_time(&self, world_point: Point3d) -> f64 {
        self.closest(world_point).time
    }

    /// Finds the distance along the path of the point closest to a point in the world.
    pub fn closest_distance(&self, world_point: Point3d) -> f64 {
        self.closest(world_point).distance
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::PathSpace;
    use crate::path::{PathOptions, PathSamples};
    use assert_approx_eq::assert_approx_eq;
    use rand::{Rng, SeedableRng};

    fn line_path(lengths: &[f64]) -> VertexPath {
        let points = lengths
            .iter()
            .map(|&l| Point3d::new(l, 0.0, 0.0))
            .collect::<Vec<_>>();
        let samples = PathSamples {
            tangents: vec![Vector3d::unit_x(); points.len()],
            cumulative_lengths: lengths.to_vec(),
            points,
            anchor_vertices: vec![],
        };
        let options = PathOptions {
            space: PathSpace::PlaneXZ,
            ..Default::default()
        };
        VertexPath::from_samples(samples, &options).unwrap()
    }

    #[test]
    fn end_of_path_behaviours() {
        assert_approx_eq!(EndOfPath::Wrap.apply(1.3), 0.3);
        assert_approx_eq!(EndOfPath::Wrap.apply(-0.25), 0.75);
        assert_approx_eq!(EndOfPath::PingPong.apply(1.2), 0.8);
        assert_approx_eq!(EndOfPath::PingPong.apply(2.3), 0.3);
        assert_approx_eq!(EndOfPath::PingPong.apply(-0.2), 0.2);
        assert_eq!(EndOfPath::Clamp.apply(1.7), 1.0);
        assert_eq!(EndOfPath::Clamp.apply(-3.0), 0.0);
        assert_eq!(EndOfPath::Clamp.apply(0.4), 0.4);
    }

    #[test]
    fn locate_time_brackets_t() {
        let path = line_path(&[0.0, 1.0, 2.0, 4.0, 8.0]);
        let data = path.locate_time(0.375, EndOfPath::Clamp);
        assert_eq!((data.previous_index, data.next_index), (2, 3));
        assert_approx_eq!(data.fraction, 0.5);

        let data = path.locate_time(0.0, EndOfPath::Clamp);
        assert_eq!(data.previous_index, 0);
        assert_eq!(data.fraction, 0.0);

        let data = path.locate_time(1.0, EndOfPath::Clamp);
        assert_eq!(data.next_index, 4);
        assert_eq!(data.fraction, 1.0);
    }

    #[test]
    fn locate_time_at_vertices() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Vegemite sandwhich is not fun...");
        let mut lengths = vec![0.0];
        for _ in 0..200 {
            let step = rng.gen_range(0.01..5.0);
            lengths.push(lengths.last().unwrap() + step);
        }
        let path = line_path(&lengths);
        for (i, &t) in path.times().iter().enumerate() {
            let data = path.locate_time(t, EndOfPath::Clamp);
            assert!(data.previous_index <= i && i <= data.next_index);
            assert!(data.next_index - data.previous_index <= 1);
            assert!(data.fraction == 0.0 || data.fraction == 1.0);
            assert_approx_eq!(path.time_at(&data), t);
        }
    }

    #[test]
    fn duplicate_times_resolve_to_lower_index() {
        let path = line_path(&[0.0, 1.0, 2.0, 2.0, 4.0]);
        let data = path.locate_time(0.5, EndOfPath::Clamp);
        assert_eq!((data.previous_index, data.next_index), (1, 2));
        assert_eq!(data.fraction, 1.0);

        // Just past the duplicated vertex, the zero-length segment is skipped
        let data = path.locate_time(0.6, EndOfPath::Clamp);
        assert_eq!((data.previous_index, data.next_index), (3, 4));
    }

    #[test]
    fn closest_point_on_degenerate_segments() {
        let path = line_path(&[0.0, 1.0, 1.0, 3.0]);
        let data = path.closest_to_local(Point3d::new(2.0, 1.0, 0.0));
        assert_eq!((data.previous_index, data.next_index), (2, 3));
        assert_approx_eq!(data.fraction, 0.5);
        assert_approx_eq!(path.time_at(&data), 2.0 / 3.0);
        assert_approx_eq!(path.distance_at(&data), 2.0);
    }

    #[test]
    fn queries_apply_transform() {
        let path = line_path(&[0.0, 5.0, 10.0]);
        let transform = Transform::from_position(Vector3d::new(0.0, 0.0, 3.0));
        let query = path.query(&transform);
        let p = query.point_at_distance(2.5, EndOfPath::Clamp);
        assert_approx_eq!(p.x, 2.5);
        assert_approx_eq!(p.z, 3.0);

        let closest = query.closest(Point3d::new(7.0, 0.0, 5.0));
        assert_approx_eq!(closest.time, 0.7);
        assert_approx_eq!(closest.distance, 7.0);
        assert_approx_eq!(closest.position.z, 3.0);
    }
}
