// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A 2D point.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use crate::tolerance::ACCURACY;
use crate::Vec2;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 2D point.
///
/// Coordinates may be infinite: [`Point::INFINITY`] stands for the ideal
/// point reached at the open ends of unbounded curves.
///
/// `PartialEq` compares coordinates exactly. Geometric equality, which is
/// what every algorithm in this crate uses, is [`Point::almost_equals`].
#[derive(Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// The point (0, 0).
    pub const ORIGIN: Point = Point::new(0., 0.);

    /// The point at infinity, returned as first or last point of
    /// unbounded curves.
    pub const INFINITY: Point = Point::new(f64::INFINITY, f64::INFINITY);

    /// Create a new `Point` with the provided `x` and `y` coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point from polar coordinates around `center`.
    #[inline]
    pub fn from_polar(center: Point, rho: f64, theta: f64) -> Point {
        center + Vec2::from_polar(rho, theta)
    }

    /// Convert this point into a `Vec2`.
    #[inline]
    pub const fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Linearly interpolate between two points.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        self.to_vec2().lerp(other.to_vec2(), t).to_point()
    }

    /// Determine the midpoint of two points.
    #[inline]
    pub fn midpoint(self, other: Point) -> Point {
        Point::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).hypot()
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        (self - other).hypot2()
    }

    /// Geometric equality: the distance is below [`ACCURACY`].
    ///
    /// Points with infinite coordinates are equal when every coordinate
    /// is either equal or within tolerance.
    #[inline]
    pub fn almost_equals(self, other: Point) -> bool {
        self.almost_equals_eps(other, ACCURACY)
    }

    /// Geometric equality with an explicit tolerance.
    pub fn almost_equals_eps(self, other: Point, eps: f64) -> bool {
        if self.is_finite() && other.is_finite() {
            return self.distance(other) < eps;
        }
        let close = |a: f64, b: f64| a == b || (a - b).abs() < eps;
        close(self.x, other.x) && close(self.y, other.y)
    }

    /// Is this point finite?
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Is this point NaN?
    #[inline]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// A point is bounded when both coordinates are finite.
    #[inline]
    pub fn is_bounded(self) -> bool {
        self.is_finite()
    }

    /// The centroid (arithmetic mean) of a set of points.
    ///
    /// Returns `None` for an empty slice.
    pub fn centroid(points: &[Point]) -> Option<Point> {
        if points.is_empty() {
            return None;
        }
        let sum: Vec2 = points.iter().map(|p| p.to_vec2()).sum();
        Some((sum / points.len() as f64).to_point())
    }

    /// Twice the signed area of the triangle `(p1, p2, p3)`.
    ///
    /// Positive when the points turn counter-clockwise.
    #[inline]
    pub fn ccw(p1: Point, p2: Point, p3: Point) -> f64 {
        (p2 - p1).cross(p3 - p1)
    }

    /// Returns `true` if the three points lie on a common line.
    #[inline]
    pub fn is_colinear(p1: Point, p2: Point, p3: Point) -> bool {
        Point::ccw(p1, p2, p3).abs() < ACCURACY
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from(v: (f64, f64)) -> Point {
        Point { x: v.0, y: v.1 }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(v: Point) -> (f64, f64) {
        (v.x, v.y)
    }
}

impl Add<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Vec2) -> Self {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign<Vec2> for Point {
    #[inline]
    fn add_assign(&mut self, other: Vec2) {
        *self = *self + other;
    }
}

impl Sub<Vec2> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Vec2) -> Self {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl SubAssign<Vec2> for Point {
    #[inline]
    fn sub_assign(&mut self, other: Vec2) {
        *self = *self - other;
    }
}

impl Sub<Point> for Point {
    type Output = Vec2;

    #[inline]
    fn sub(self, other: Point) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "(")?;
        fmt::Display::fmt(&self.x, formatter)?;
        write!(formatter, ", ")?;
        fmt::Display::fmt(&self.y, formatter)?;
        write!(formatter, ")")
    }
}

#[cfg(feature = "mint")]
impl From<Point> for mint::Point2<f64> {
    #[inline]
    fn from(p: Point) -> mint::Point2<f64> {
        mint::Point2 { x: p.x, y: p.y }
    }
}

#[cfg(feature = "mint")]
impl From<mint::Point2<f64>> for Point {
    #[inline]
    fn from(p: mint::Point2<f64>) -> Point {
        Point { x: p.x, y: p.y }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use super::Point;
    use crate::Vec2;

    #[test]
    fn point_arithmetic() {
        assert_eq!(
            Point::new(0., 0.) - Vec2::new(10., 0.),
            Point::new(-10., 0.)
        );
        assert_eq!(
            Point::new(0., 0.) - Point::new(-5., 101.),
            Vec2::new(5., -101.)
        );
    }

    #[test]
    fn distance() {
        let p1 = Point::new(0., 10.);
        let p2 = Point::new(0., 5.);
        assert_eq!(p1.distance(p2), 5.);

        let p1 = Point::new(-11., 1.);
        let p2 = Point::new(-7., -2.);
        assert_eq!(p1.distance(p2), 5.);
    }

    #[test]
    fn geometric_equality() {
        let p = Point::new(1.0, 2.0);
        assert!(p.almost_equals(Point::new(1.0 + 1e-13, 2.0)));
        assert!(!p.almost_equals(Point::new(1.0 + 1e-9, 2.0)));
        assert!(Point::INFINITY.almost_equals(Point::INFINITY));
        assert!(!Point::INFINITY.almost_equals(p));
        assert!(!Point::INFINITY.is_bounded());
    }

    #[test]
    fn polar_and_centroid() {
        let p = Point::from_polar(Point::new(1.0, 1.0), 2.0, FRAC_PI_2);
        assert!(p.almost_equals_eps(Point::new(1.0, 3.0), 1e-15));
        let c = Point::centroid(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ]);
        assert_eq!(c, Some(Point::new(1.0, 1.0)));
        assert_eq!(Point::centroid(&[]), None);
    }

    #[test]
    fn colinearity() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(1.0, 1.0);
        assert!(Point::is_colinear(p1, p2, Point::new(3.0, 3.0)));
        assert!(!Point::is_colinear(p1, p2, Point::new(3.0, 3.1)));
        assert!(Point::ccw(p1, Point::new(1.0, 0.0), p2) > 0.0);
    }

    #[test]
    fn display() {
        let p = Point::new(0.12345, 9.87654);
        assert_eq!(format!("{p}"), String::from("(0.12345, 9.87654)"));
        let p = Point::new(0.12345, 9.87654);
        assert_eq!(format!("{p:.2}"), String::from("(0.12, 9.88)"));
    }
}
