use super::{Point3d, Vector3d};
use crate::util::Interval;
use cgmath::prelude::*;

/// A parametric curve in 3D space.
pub trait ParametricCurve3d {
    /// Samples the parametric curve.
    fn sample(&self, t: f64) -> Point3d;

    /// Returns the minimum and maximum t-values that define the bounds of the curve.
    fn bounds(&self) -> Interval<f64>;

    /// Samples the derivative of the parametric curve.
    ///
    /// The default implementation approximates the derivative by sampling
    /// two very nearby points along the curve.
    fn sample_dt(&self, t: f64) -> Vector3d {
        let bounds = self.bounds();
        let delta = bounds.length() * 0.0001;
        // Step backwards at the end of the curve so we never sample outside it
        if t + delta > bounds.max {
            (self.sample(t) - self.sample(t - delta)) / delta
        } else {
            (self.sample(t + delta) - self.sample(t)) / delta
        }
    }
}

impl<T: ParametricCurve3d + ?Sized> ParametricCurve3d for &T {
    fn sample(&self, t: f64) -> Point3d {
        (**self).sample(t)
    }

    fn bounds(&self) -> Interval<f64> {
        (**self).bounds()
    }

    fn sample_dt(&self, t: f64) -> Vector3d {
        (**self).sample_dt(t)
    }
}

/// Approximates a curve by subdividing it until all segments are no longer than `max_length` units in length.
///
/// Yields `(t, point)` pairs in order of increasing `t`, starting and ending at the curve bounds.
pub fn subdivided_samples_along_curve<C: ParametricCurve3d>(
    curve: &C,
    max_length: f64,
) -> impl Iterator<Item = (f64, Point3d)> + '_ {
    SubdividedSamples::new(curve, max_length)
}

struct SubdividedSamples<'a, C> {
    curve: &'a C,
    stack: Vec<(f64, Point3d)>,
    length2: f64,
}

impl<'a, C: ParametricCurve3d> SubdividedSamples<'a, C> {
    fn new(curve: &'a C, max_length: f64) -> Self {
        let Interval { min, max } = curve.bounds();
        let mid = 0.5 * (min + max);
        Self {
            curve,
            // The midpoint is always sampled, so closed curves don't collapse to a single chord
            stack: vec![
                (max, curve.sample(max)),
                (mid, curve.sample(mid)),
                (min, curve.sample(min)),
            ],
            length2: max_length.powi(2),
        }
    }
}

impl<'a, C: ParametricCurve3d> Iterator for SubdividedSamples<'a, C> {
    type Item = (f64, Point3d);

    fn next(&mut self) -> Option<Self::Item> {
        let (t1, p1) = self.stack.pop()?;
        if let Some((mut t2, mut p2)) = self.stack.last().copied() {
            while (p2 - p1).magnitude2() > self.length2 {
                let mid_t = 0.5 * (t1 + t2);
                (t2, p2) = (mid_t, self.curve.sample(mid_t));
                self.stack.push((t2, p2));
            }
        }
        Some((t1, p1))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Circle;

    impl ParametricCurve3d for Circle {
        fn sample(&self, t: f64) -> Point3d {
            Point3d::new(t.cos(), 0.0, t.sin())
        }

        fn bounds(&self) -> Interval<f64> {
            Interval::new(0.0, std::f64::consts::TAU)
        }
    }

    #[test]
    fn subdivision_respects_max_length() {
        let samples = subdivided_samples_along_curve(&Circle, 0.1).collect::<Vec<_>>();
        assert_eq!(samples.first().unwrap().0, 0.0);
        assert_eq!(samples.last().unwrap().0, std::f64::consts::TAU);
        for pair in samples.windows(2) {
            assert!(pair[1].0 > pair[0].0);
            assert!((pair[1].1 - pair[0].1).magnitude() <= 0.1);
        }
    }

    #[test]
    fn default_derivative_is_tangent() {
        let d = Circle.sample_dt(0.0).normalize();
        assert!((d.z - 1.0).abs() < 1e-3);
        let d = Circle.sample_dt(std::f64::consts::TAU).normalize();
        assert!((d.z - 1.0).abs() < 1e-3);
    }
}
