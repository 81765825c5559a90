use crate::error::Error;
use ordered_float::NotNan;
use std::ops::{Add, Sub};

/// A 2D point in normalized frame coordinates (0-1 range, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub(crate) struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub(crate) fn new(x: f32, y: f32) -> Result<Self, Error> {
        Ok(Self {
            x: NotNan::new(x)
                .map_err(|e| Error::ConstructNotNan(e, x))?
                .into_inner(),
            y: NotNan::new(y)
                .map_err(|e| Error::ConstructNotNan(e, y))?
                .into_inner(),
        })
    }

    pub(crate) fn distance(self, other: Self) -> f32 {
        let delta = other - self;
        delta.dot(delta).sqrt()
    }

    #[inline]
    pub(crate) fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub(crate) fn x(self) -> f32 {
        self.x
    }

    #[inline]
    pub(crate) fn y(self) -> f32 {
        self.y
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::Output {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

/// Angle in degrees at vertex `b` formed by the rays to `a` and `c`.
///
/// A zero-length ray means the joint is collapsed in the detection; the joint
/// is reported as fully extended (180°) rather than dividing by zero.
pub(crate) fn angle_at_vertex(a: Point, b: Point, c: Point) -> f32 {
    let u = a - b;
    let v = c - b;
    let len_u = u.dot(u).sqrt();
    let len_v = v.dot(v).sqrt();
    if len_u == 0.0 || len_v == 0.0 {
        return 180.0;
    }
    let cos = (u.dot(v) / (len_u * len_v)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::{angle_at_vertex, Point};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn distance_of_unit_diagonal() {
        let a = Point::new(0.0, 0.0).unwrap();
        let b = Point::new(1.0, 1.0).unwrap();
        assert_approx_eq!(a.distance(b), std::f32::consts::SQRT_2);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(0.25, 0.75).unwrap();
        let b = Point::new(0.5, 0.25).unwrap();
        assert_approx_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn nan_coordinate_is_rejected() {
        assert!(Point::new(f32::NAN, 0.5).is_err());
        assert!(Point::new(0.5, f32::NAN).is_err());
    }

    mod angle_at_vertex_tests {
        use super::{angle_at_vertex, Point};
        use assert_approx_eq::assert_approx_eq;

        #[test]
        fn collinear_points_are_fully_extended() {
            let a = Point::new(0.1, 0.1).unwrap();
            let b = Point::new(0.5, 0.5).unwrap();
            let c = Point::new(0.9, 0.9).unwrap();
            assert_approx_eq!(angle_at_vertex(a, b, c), 180.0, 1e-3);
        }

        #[test]
        fn perpendicular_rays() {
            let a = Point::new(0.5, 0.0).unwrap();
            let b = Point::new(0.5, 0.5).unwrap();
            let c = Point::new(1.0, 0.5).unwrap();
            assert_approx_eq!(angle_at_vertex(a, b, c), 90.0, 1e-3);
        }

        #[test]
        fn folded_back_rays() {
            let a = Point::new(0.0, 0.5).unwrap();
            let b = Point::new(0.5, 0.5).unwrap();
            let c = Point::new(0.0, 0.5).unwrap();
            assert_approx_eq!(angle_at_vertex(a, b, c), 0.0, 1e-3);
        }

        #[test]
        fn zero_length_ray_reports_extended() {
            let b = Point::new(0.5, 0.5).unwrap();
            let c = Point::new(0.9, 0.9).unwrap();
            assert_approx_eq!(angle_at_vertex(b, b, c), 180.0);
            assert_approx_eq!(angle_at_vertex(c, b, b), 180.0);
        }
    }
}
