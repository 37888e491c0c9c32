// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lines, rays and segments.

use core::f64::consts::PI;
use core::ops::Mul;

use smallvec::SmallVec;

use crate::param_curve::{OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::tolerance::ACCURACY;
use crate::{Affine, BezPath, Curve, GeomError, Interval, Point, Rect, Result, Vec2};

/// Which part of its support line a [`Line`] covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// The whole line, parameter domain `(-∞, +∞)`.
    Line,
    /// Starts at the origin and goes on forever, domain `[0, +∞)`.
    Ray,
    /// Comes from infinity and ends at the origin, domain `(-∞, 0]`.
    InvertedRay,
    /// From the origin to `origin + direction`, domain `[0, 1]`.
    Segment,
}

/// A linear curve: `origin + t * direction` with `t` in the domain of its
/// [`LineKind`].
///
/// The left of the direction is the inside, so a counter-clockwise
/// polygon made of segments has its interior inside every edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// Point at parameter 0.
    pub origin: Point,
    /// Displacement per unit of parameter.
    pub direction: Vec2,
    /// Which part of the support line is covered.
    pub kind: LineKind,
}

impl Line {
    /// Create a linear curve of the given kind.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the direction is zero or not finite.
    pub fn new(origin: impl Into<Point>, direction: impl Into<Vec2>, kind: LineKind) -> Result<Line> {
        let direction = direction.into();
        if !direction.is_finite() || direction.hypot2() == 0.0 {
            return Err(GeomError::DegenerateInput("line direction must be non-zero"));
        }
        Ok(Line {
            origin: origin.into(),
            direction,
            kind,
        })
    }

    /// The segment from `p0` to `p1`.
    ///
    /// A segment may have zero length; it then covers a single point.
    #[inline]
    pub fn segment(p0: impl Into<Point>, p1: impl Into<Point>) -> Line {
        let p0 = p0.into();
        Line {
            origin: p0,
            direction: p1.into() - p0,
            kind: LineKind::Segment,
        }
    }

    /// The full line through two distinct points, oriented from `p0`
    /// toward `p1`.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the points coincide.
    pub fn through(p0: impl Into<Point>, p1: impl Into<Point>) -> Result<Line> {
        let p0 = p0.into();
        Line::new(p0, p1.into() - p0, LineKind::Line)
    }

    /// A ray starting at `origin`.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the direction is zero.
    pub fn ray(origin: impl Into<Point>, direction: impl Into<Vec2>) -> Result<Line> {
        Line::new(origin, direction, LineKind::Ray)
    }

    /// A ray coming from infinity and ending at `origin`.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the direction is zero.
    pub fn inverted_ray(origin: impl Into<Point>, direction: impl Into<Vec2>) -> Result<Line> {
        Line::new(origin, direction, LineKind::InvertedRay)
    }

    /// The full line through `origin` with a direction known to be non-zero.
    #[inline]
    pub(crate) const fn support(origin: Point, direction: Vec2) -> Line {
        Line {
            origin,
            direction,
            kind: LineKind::Line,
        }
    }

    /// The full line this curve lies on.
    #[inline]
    pub fn support_line(&self) -> Line {
        Line::support(self.origin, self.direction)
    }

    /// The length, infinite unless this is a segment.
    #[inline]
    pub fn length(&self) -> f64 {
        match self.kind {
            LineKind::Segment => self.direction.hypot(),
            _ => f64::INFINITY,
        }
    }

    /// The midpoint of a segment.
    pub fn midpoint(&self) -> Option<Point> {
        match self.kind {
            LineKind::Segment => Some(self.origin + 0.5 * self.direction),
            _ => None,
        }
    }

    /// The perpendicular bisector of a segment, oriented to the left of it.
    ///
    /// Returns `None` for unbounded kinds and zero length segments.
    pub fn median(&self) -> Option<Line> {
        let mid = self.midpoint()?;
        Line::new(mid, self.direction.turn_90(), LineKind::Line).ok()
    }

    /// Distance from `p` to the support line.
    #[inline]
    pub fn support_distance(&self, p: Point) -> f64 {
        (self.direction.cross(p - self.origin) / self.direction.hypot()).abs()
    }

    /// A copy of this curve shifted `dist` to the right of its direction.
    pub fn parallel(&self, dist: f64) -> Line {
        let d = self.direction;
        let shift = Vec2::new(d.y, -d.x) / d.hypot() * dist;
        Line {
            origin: self.origin + shift,
            ..*self
        }
    }

    /// The full line through `p` perpendicular to this one.
    pub fn perpendicular(&self, p: Point) -> Line {
        Line::support(p, self.direction.turn_90())
    }

    /// Are the support lines parallel?
    #[inline]
    pub fn is_parallel(&self, other: &Line) -> bool {
        self.direction.is_parallel(other.direction)
    }

    /// Do both curves lie on the same support line?
    pub fn is_colinear(&self, other: &Line) -> bool {
        self.is_parallel(other) && self.support_distance(other.origin) < ACCURACY
    }

    /// Parameters on `self` and `other` where the support lines cross, or
    /// `None` if they are parallel.
    pub fn intersection_params(&self, other: &Line) -> Option<(f64, f64)> {
        let d1 = self.direction;
        let d2 = other.direction;
        let denom = d1.cross(d2);
        if denom.abs() < ACCURACY * d1.hypot() * d2.hypot() {
            return None;
        }
        let w = other.origin - self.origin;
        Some((w.cross(d2) / denom, w.cross(d1) / denom))
    }

    /// The point where both curves cross, if it lies in both domains.
    pub fn intersection(&self, other: &Line) -> Option<Point> {
        let (t, u) = self.intersection_params(other)?;
        if self.domain().contains(t) && other.domain().contains(u) {
            Some(self.eval(t))
        } else {
            None
        }
    }

    /// The counter-clockwise angle between two segments sharing an
    /// endpoint, measured at that endpoint from `a` to `b`.
    ///
    /// Returns NaN when the segments share no endpoint.
    pub fn edge_angle(a: &Line, b: &Line) -> f64 {
        let (a0, a1) = (a.start(), a.end());
        let (b0, b1) = (b.start(), b.end());
        let (vertex, p1, p3) = if a0.almost_equals(b0) {
            (a0, a1, b1)
        } else if a0.almost_equals(b1) {
            (a0, a1, b0)
        } else if a1.almost_equals(b0) {
            (a1, a0, b1)
        } else if a1.almost_equals(b1) {
            (a1, a0, b0)
        } else {
            return f64::NAN;
        };
        (p1 - vertex).angle_to(p3 - vertex)
    }

    /// Signed side of `p`: positive on the left of the direction.
    #[inline]
    fn side(&self, p: Point) -> f64 {
        self.direction.cross(p - self.origin)
    }
}

impl ParamCurve for Line {
    #[inline]
    fn domain(&self) -> Interval {
        match self.kind {
            LineKind::Line => Interval::REAL,
            LineKind::Ray => Interval::new(0.0, f64::INFINITY),
            LineKind::InvertedRay => Interval::new(f64::NEG_INFINITY, 0.0),
            LineKind::Segment => Interval::UNIT,
        }
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.domain().clamp(t);
        if t.is_infinite() {
            return Point::INFINITY;
        }
        self.origin + t * self.direction
    }

    fn position(&self, p: Point) -> Option<f64> {
        if self.direction.hypot2() == 0.0 {
            return self.origin.almost_equals(p).then_some(0.0);
        }
        if self.support_distance(p) > ACCURACY {
            return None;
        }
        let Vec2 { x: dx, y: dy } = self.direction;
        let t = if dx.abs() > dy.abs() {
            (p.x - self.origin.x) / dx
        } else {
            (p.y - self.origin.y) / dy
        };
        let domain = self.domain();
        domain.contains(t).then(|| domain.clamp(t))
    }

    fn project(&self, p: Point) -> f64 {
        let d2 = self.direction.hypot2();
        if d2 == 0.0 {
            return 0.0;
        }
        self.domain().clamp((p - self.origin).dot(self.direction) / d2)
    }

    fn contains(&self, p: Point) -> bool {
        self.position(p).is_some()
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        self.kind == LineKind::Segment && self.origin.is_finite() && self.direction.is_finite()
    }

    fn bounding_box(&self) -> Rect {
        let axis = |o: f64, d: f64| -> (f64, f64) {
            match self.kind {
                LineKind::Segment => (o.min(o + d), o.max(o + d)),
                LineKind::Line if d != 0.0 => (f64::NEG_INFINITY, f64::INFINITY),
                LineKind::Ray if d > 0.0 => (o, f64::INFINITY),
                LineKind::Ray if d < 0.0 => (f64::NEG_INFINITY, o),
                LineKind::InvertedRay if d > 0.0 => (f64::NEG_INFINITY, o),
                LineKind::InvertedRay if d < 0.0 => (o, f64::INFINITY),
                _ => (o, o),
            }
        };
        let (x0, x1) = axis(self.origin.x, self.direction.x);
        let (y0, y1) = axis(self.origin.y, self.direction.y);
        Rect::new(x0, y0, x1, y1)
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let mut result = SmallVec::new();
        if let Some((t, _)) = self.intersection_params(&line.support_line()) {
            let domain = self.domain();
            if domain.contains(t) {
                result.push(domain.clamp(t));
            }
        }
        result
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        if t1 < t0 {
            return None;
        }
        let domain = self.domain();
        let (t0, t1) = (domain.clamp(t0), domain.clamp(t1));
        let line = match (t0.is_finite(), t1.is_finite()) {
            (true, true) => Line::segment(self.eval(t0), self.eval(t1)),
            (false, true) => Line {
                origin: self.eval(t1),
                direction: self.direction,
                kind: LineKind::InvertedRay,
            },
            (true, false) => Line {
                origin: self.eval(t0),
                direction: self.direction,
                kind: LineKind::Ray,
            },
            (false, false) => self.support_line(),
        };
        Some(Curve::Linear(line))
    }

    fn reversed(&self) -> Line {
        match self.kind {
            LineKind::Line => Line::support(self.origin, -self.direction),
            LineKind::Ray => Line {
                origin: self.origin,
                direction: -self.direction,
                kind: LineKind::InvertedRay,
            },
            LineKind::InvertedRay => Line {
                origin: self.origin,
                direction: -self.direction,
                kind: LineKind::Ray,
            },
            LineKind::Segment => Line::segment(self.origin + self.direction, self.origin),
        }
    }

    fn append_to(&self, path: &mut BezPath, _tolerance: f64) -> Result<()> {
        if !self.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        path.start_at(self.origin);
        path.line_to(self.origin + self.direction);
        Ok(())
    }
}

impl ParamCurveDeriv for Line {
    #[inline]
    fn tangent(&self, _t: f64) -> Vec2 {
        self.direction
    }
}

impl OrientedCurve for Line {
    fn signed_distance(&self, p: Point) -> f64 {
        let dist = self.distance(p);
        if self.side(p) > 0.0 {
            -dist
        } else {
            dist
        }
    }

    fn winding_angle(&self, p: Point) -> f64 {
        let domain = self.domain();
        let v0 = if domain.t0.is_finite() {
            self.eval(domain.t0) - p
        } else {
            -self.direction
        };
        let v1 = if domain.t1.is_finite() {
            self.eval(domain.t1) - p
        } else {
            self.direction
        };
        let w = v0.signed_angle_to(v1);
        if (w.abs() - PI).abs() < ACCURACY {
            let side = self.side(p);
            if side.abs() < ACCURACY * self.direction.hypot() {
                0.0
            } else {
                PI.copysign(side)
            }
        } else {
            w
        }
    }

    fn is_inside(&self, p: Point) -> bool {
        self.side(p) > 0.0
    }
}

impl Mul<Line> for Affine {
    type Output = Line;

    #[inline]
    fn mul(self, line: Line) -> Line {
        Line {
            origin: self * line.origin,
            direction: self.transform_vec(line.direction),
            kind: line.kind,
        }
    }
}
