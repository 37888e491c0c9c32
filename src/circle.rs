// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circles.

use core::f64::consts::{PI, TAU};
use core::ops::{Add, Mul, Sub};

use smallvec::SmallVec;

use crate::angle::normalize_angle;
use crate::param_curve::{OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::tolerance::ACCURACY;
use crate::{Affine, BezPath, Curve, Ellipse, GeomError, Interval, Line, Point, Rect, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A circle.
///
/// The point at parameter `t` is `center + radius * (cos t, ±sin t)`, with
/// the `+` sign for a direct (counter-clockwise) circle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center.
    pub center: Point,
    /// The radius.
    pub radius: f64,
    /// `true` for counter-clockwise traversal.
    pub direct: bool,
}

impl Circle {
    /// A new direct circle from center and radius.
    #[inline]
    pub fn new(center: impl Into<Point>, radius: f64) -> Circle {
        Circle {
            center: center.into(),
            radius: radius.abs(),
            direct: true,
        }
    }

    /// The circle through three points.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the points are colinear.
    pub fn through(p1: Point, p2: Point, p3: Point) -> Result<Circle> {
        let b = p2 - p1;
        let c = p3 - p1;
        let d = 2.0 * b.cross(c);
        if d.abs() < ACCURACY {
            return Err(GeomError::DegenerateInput("circle through colinear points"));
        }
        let (b2, c2) = (b.hypot2(), c.hypot2());
        let offset = Vec2::new(c.y * b2 - b.y * c2, b.x * c2 - c.x * b2) / d;
        let center = p1 + offset;
        let circle = Circle::new(center, offset.hypot());
        Ok(circle.with_direct(Point::ccw(p1, p2, p3) > 0.0))
    }

    /// A copy with the given orientation.
    #[must_use]
    #[inline]
    pub fn with_direct(self, direct: bool) -> Circle {
        Circle { direct, ..self }
    }

    /// The enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }

    /// The circumference.
    #[inline]
    pub fn perimeter(&self) -> f64 {
        TAU * self.radius
    }

    /// The same circle as an [`Ellipse`].
    #[inline]
    pub fn to_ellipse(&self) -> Ellipse {
        Ellipse::new(self.center, (self.radius, self.radius), 0.0).with_direct(self.direct)
    }

    /// Is this circle finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.radius.is_finite()
    }

    #[inline]
    fn sign(&self) -> f64 {
        if self.direct {
            1.0
        } else {
            -1.0
        }
    }
}

impl ParamCurve for Circle {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::new(0.0, TAU)
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.domain().clamp(t);
        Point::from_polar(self.center, self.radius, self.sign() * t)
    }

    fn position(&self, p: Point) -> Option<f64> {
        if ((p - self.center).hypot() - self.radius).abs() > ACCURACY {
            return None;
        }
        Some(self.project(p))
    }

    fn project(&self, p: Point) -> f64 {
        let v = p - self.center;
        if v.hypot2() == 0.0 {
            return 0.0;
        }
        normalize_angle(self.sign() * v.atan2())
    }

    fn distance(&self, p: Point) -> f64 {
        ((p - self.center).hypot() - self.radius).abs()
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        true
    }

    #[inline]
    fn is_closed(&self) -> bool {
        true
    }

    fn bounding_box(&self) -> Rect {
        let (x, y, r) = (self.center.x, self.center.y, self.radius);
        Rect::new(x - r, y - r, x + r, y + r)
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        self.to_ellipse().line_crossings(line)
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        self.to_ellipse().subcurve(t0, t1)
    }

    fn reversed(&self) -> Circle {
        self.with_direct(!self.direct)
    }

    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        self.to_ellipse().append_to(path, tolerance)
    }
}

impl ParamCurveDeriv for Circle {
    fn tangent(&self, t: f64) -> Vec2 {
        let sign = self.sign();
        let (s, c) = (sign * t).sin_cos();
        sign * self.radius * Vec2::new(-s, c)
    }
}

impl OrientedCurve for Circle {
    fn signed_distance(&self, p: Point) -> f64 {
        self.sign() * ((p - self.center).hypot() - self.radius)
    }

    fn winding_angle(&self, p: Point) -> f64 {
        if (p - self.center).hypot() < self.radius {
            self.sign() * TAU
        } else {
            0.0
        }
    }
}

impl Add<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn add(self, v: Vec2) -> Circle {
        Circle {
            center: self.center + v,
            ..self
        }
    }
}

impl Sub<Vec2> for Circle {
    type Output = Circle;

    #[inline]
    fn sub(self, v: Vec2) -> Circle {
        Circle {
            center: self.center - v,
            ..self
        }
    }
}

impl Mul<Circle> for Affine {
    type Output = Ellipse;

    fn mul(self, other: Circle) -> Self::Output {
        self * other.to_ellipse()
    }
}
