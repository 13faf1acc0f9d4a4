use crate::error::{check_positive, ConfigError};
use crate::math::{subdivided_samples_along_curve, ParametricCurve3d, Point3d, Vector3d};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Points sampled along a curve, ready to be turned into a [VertexPath](super::VertexPath).
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathSamples {
    /// The sampled positions, in order along the curve.
    pub points: Vec<Point3d>,
    /// The unit tangent at each sample.
    pub tangents: Vec<Vector3d>,
    /// The distance along the curve at each sample. Must not decrease.
    pub cumulative_lengths: Vec<f64>,
    /// The sample index at which each anchor (curve end point) lies.
    pub anchor_vertices: Vec<usize>,
}

impl PathSamples {
    /// Samples a chain of curves, each starting where the previous one ends.
    ///
    /// Every curve is subdivided until no segment is longer than `max_spacing`.
    /// The point shared by two consecutive curves is only sampled once.
    pub fn from_curves<C: ParametricCurve3d>(
        curves: &[C],
        max_spacing: f64,
    ) -> Result<Self, ConfigError> {
        check_positive("max_spacing", max_spacing)?;

        let mut samples = Self::default();
        for (idx, curve) in curves.iter().enumerate() {
            let skip = if idx == 0 { 0 } else { 1 };
            samples.anchor_vertices.push(samples.points.len().saturating_sub(skip));
            for (t, point) in subdivided_samples_along_curve(curve, max_spacing).skip(skip) {
                let tangent = curve.sample_dt(t);
                samples.push(point, tangent);
            }
        }
        if let Some(last) = samples.points.len().checked_sub(1) {
            samples.anchor_vertices.push(last);
        }
        Ok(samples)
    }

    /// Appends a sample, measuring its distance from the previous one.
    ///
    /// A vanishing derivative (e.g. at a cusp) falls back to the direction of travel.
    fn push(&mut self, point: Point3d, derivative: Vector3d) {
        let prev = self.points.last().copied();
        let length = match (prev, self.cumulative_lengths.last()) {
            (Some(prev), Some(&len)) => len + (point - prev).magnitude(),
            _ => 0.0,
        };
        let tangent = if derivative.magnitude2() > 1e-18 {
            derivative.normalize()
        } else {
            match (prev, self.tangents.last()) {
                (Some(prev), _) if point != prev => (point - prev).normalize(),
                (_, Some(&last)) => last,
                _ => Vector3d::unit_z(),
            }
        };
        self.points.push(point);
        self.tangents.push(tangent);
        self.cumulative_lengths.push(length);
    }
}
