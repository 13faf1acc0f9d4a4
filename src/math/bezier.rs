use super::curve::ParametricCurve3d;
use super::{Point3d, Vector3d};
use crate::util::Interval;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cubic bezier curve
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier3d {
    points: [Point3d; 4],
}

impl CubicBezier3d {
    pub const fn new(points: &[Point3d; 4]) -> Self {
        Self { points: *points }
    }

    /// A straight line expressed as a cubic bezier.
    pub fn line(start: Point3d, end: Point3d) -> Self {
        let s = start.to_vec();
        let e = end.to_vec();
        let ps = [s, s.lerp(e, 1. / 3.), s.lerp(e, 2. / 3.), e];
        Self {
            points: ps.map(Point3d::from_vec),
        }
    }

    /// The control points of the curve.
    pub fn points(&self) -> &[Point3d; 4] {
        &self.points
    }
}

impl ParametricCurve3d for CubicBezier3d {
    fn sample(&self, t: f64) -> Point3d {
        let t1 = 1.0 - t;
        Point3d::from_vec(
            t1 * t1 * t1 * self.points[0].to_vec()
                + 3.0 * t1 * t1 * t * self.points[1].to_vec()
                + 3.0 * t1 * t * t * self.points[2].to_vec()
                + t * t * t * self.points[3].to_vec(),
        )
    }

    fn bounds(&self) -> Interval<f64> {
        Interval { min: 0.0, max: 1.0 }
    }

    fn sample_dt(&self, t: f64) -> Vector3d {
        let t1 = 1.0 - t;
        (-3.0 * t1 * t1) * self.points[0].to_vec()
            + (9.0 * t * t - 12.0 * t + 3.0) * self.points[1].to_vec()
            + (-9.0 * t * t + 6.0 * t) * self.points[2].to_vec()
            + (3.0 * t * t) * self.points[3].to_vec()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn bezier_hits_end_points() {
        let curve = CubicBezier3d::new(&[
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 0.0),
            Point3d::new(3.0, 2.0, 1.0),
            Point3d::new(4.0, 0.0, 1.0),
        ]);
        assert_eq!(curve.sample(0.0), curve.points()[0]);
        assert_eq!(curve.sample(1.0), curve.points()[3]);
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let curve = CubicBezier3d::new(&[
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 2.0, 0.0),
            Point3d::new(3.0, 2.0, 1.0),
            Point3d::new(4.0, 0.0, 1.0),
        ]);
        for &t in &[0.1, 0.5, 0.9] {
            let h = 1e-6;
            let approx = (curve.sample(t + h) - curve.sample(t)) / h;
            let exact = curve.sample_dt(t);
            assert_approx_eq!(approx.x, exact.x, 1e-3);
            assert_approx_eq!(approx.y, exact.y, 1e-3);
            assert_approx_eq!(approx.z, exact.z, 1e-3);
        }
    }

    #[test]
    fn line_has_constant_derivative() {
        let curve = CubicBezier3d::line(Point3d::new(0.0, 0.0, 0.0), Point3d::new(3.0, 0.0, 0.0));
        assert_approx_eq!(curve.sample_dt(0.0).x, 3.0);
        assert_approx_eq!(curve.sample_dt(0.7).x, 3.0);
        assert_approx_eq!(curve.sample(0.5).x, 1.5);
    }
}
