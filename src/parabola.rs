// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parabolas and parabola arcs.

use core::f64::consts::PI;
use core::ops::Mul;

use smallvec::SmallVec;

use crate::angle::normalize_signed_angle;
use crate::common::{solve_cubic, solve_quadratic};
use crate::param_curve::{convex_arc_winding, same_side_of_chord, OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::tolerance::ACCURACY;
use crate::{Affine, BezPath, Curve, GeomError, Interval, Line, Point, Rect, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A parabola, or an arc of one when `range` is bounded.
///
/// In the local frame centered on the vertex and rotated by `theta`, the
/// point at parameter `t` is `(t, a·t²)`. The parabola opens toward the
/// local `+y` axis when `a > 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Parabola {
    /// The vertex.
    pub vertex: Point,
    /// The curvature coefficient; non-zero.
    pub a: f64,
    /// Rotation of the local frame, in radians.
    pub theta: f64,
    /// The parameter range, `(-∞, +∞)` for the whole parabola.
    pub range: Interval,
}

impl Parabola {
    /// The whole parabola with the given pose.
    #[inline]
    pub fn new(vertex: impl Into<Point>, a: f64, theta: f64) -> Parabola {
        Parabola {
            vertex: vertex.into(),
            a,
            theta,
            range: Interval::REAL,
        }
    }

    /// The parabola with the given focus and directrix.
    ///
    /// The parabola opens away from the directrix. Its parameter increases
    /// along the directrix direction.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] if the focus lies on the directrix.
    pub fn from_focus_directrix(focus: Point, directrix: &Line) -> Result<Parabola> {
        let d = directrix.direction.normalize();
        let foot = directrix.origin + (focus - directrix.origin).dot(d) * d;
        let axis = focus - foot;
        let p = axis.hypot();
        if p < ACCURACY {
            return Err(GeomError::DegenerateInput("focus on the directrix"));
        }
        let theta = d.atan2();
        // The local +y axis is the left normal of the directrix.
        let a = if d.cross(axis) > 0.0 { 0.5 / p } else { -0.5 / p };
        Ok(Parabola::new(foot.midpoint(focus), a, theta))
    }

    /// The arc of this parabola between two parameters.
    #[must_use]
    pub fn with_range(self, range: Interval) -> Parabola {
        Parabola { range, ..self }
    }

    /// The focus.
    pub fn focus(&self) -> Point {
        self.to_global(Vec2::new(0.0, 0.25 / self.a))
    }

    /// The axis of symmetry, oriented from the vertex toward the inside of
    /// the parabola.
    pub fn axis(&self) -> Line {
        Line::support(self.vertex, Vec2::from_angle(self.theta).turn_90() * self.a.signum())
    }

    #[inline]
    fn to_local(&self, p: Point) -> Vec2 {
        (p - self.vertex).rotate(-self.theta)
    }

    #[inline]
    fn to_global(&self, v: Vec2) -> Point {
        self.vertex + v.rotate(self.theta)
    }

    /// Direction of the far parts of the curve, toward the opening.
    #[inline]
    fn opening(&self) -> Vec2 {
        Vec2::from_angle(self.theta).turn_90() * self.a.signum()
    }

    /// Is `p` strictly on the concave side?
    fn in_opening(&self, p: Point) -> bool {
        let q = self.to_local(p);
        self.a * (q.y - self.a * q.x * q.x) > 0.0
    }

    /// Coordinates of the ideal point reached as `t` goes to `sign * ∞`.
    fn far_point(&self, sign: f64) -> Point {
        let (s, c) = self.theta.sin_cos();
        let quad = Vec2::new(-self.a * s, self.a * c);
        let lin = Vec2::new(c, s) * sign;
        let pick = |q: f64, l: f64| {
            if q.abs() > ACCURACY {
                f64::INFINITY.copysign(q)
            } else {
                f64::INFINITY.copysign(l)
            }
        };
        Point::new(pick(quad.x, lin.x), pick(quad.y, lin.y))
    }
}

impl ParamCurve for Parabola {
    #[inline]
    fn domain(&self) -> Interval {
        self.range
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.range.clamp(t);
        if t.is_infinite() {
            return Point::INFINITY;
        }
        self.to_global(Vec2::new(t, self.a * t * t))
    }

    fn position(&self, p: Point) -> Option<f64> {
        let t = self.to_local(p).x;
        if !self.range.contains(t) {
            return None;
        }
        let t = self.range.clamp(t);
        (self.eval(t).distance(p) < ACCURACY).then_some(t)
    }

    fn project(&self, p: Point) -> f64 {
        let q = self.to_local(p);
        let a = self.a;
        // Stationary points of the squared distance.
        let roots = solve_cubic(-q.x, 1.0 - 2.0 * a * q.y, 0.0, 2.0 * a * a);
        let mut candidates: SmallVec<[f64; 5]> = roots.iter().map(|&t| self.range.clamp(t)).collect();
        for end in [self.range.t0, self.range.t1] {
            if end.is_finite() {
                candidates.push(end);
            }
        }
        let mut best = self.range.clamp(q.x);
        let mut best_d = f64::INFINITY;
        for t in candidates {
            let d = self.eval(t).distance_squared(p);
            if d < best_d {
                best = t;
                best_d = d;
            }
        }
        best
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        self.range.is_finite()
    }

    fn bounding_box(&self) -> Rect {
        let (s, c) = self.theta.sin_cos();
        let mut bbox = Rect::EMPTY;
        for (end, sign) in [(self.range.t0, -1.0), (self.range.t1, 1.0)] {
            bbox = if end.is_finite() {
                bbox.union_pt(self.eval(end))
            } else {
                bbox.union_pt(self.far_point(sign))
            };
        }
        // Parameters where x or y is extreme.
        for t in [c / (2.0 * self.a * s), -s / (2.0 * self.a * c)] {
            if t.is_finite() && self.range.contains(t) {
                bbox = bbox.union_pt(self.eval(t));
            }
        }
        bbox
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let o = self.to_local(line.origin);
        let n = line.direction.rotate(-self.theta).turn_90();
        let mut result: SmallVec<[f64; 4]> = solve_quadratic(-n.dot(o), n.x, self.a * n.y)
            .into_iter()
            .filter(|t| self.range.contains(*t))
            .map(|t| self.range.clamp(t))
            .collect();
        result.sort_by(f64::total_cmp);
        result
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        if t1 < t0 {
            return None;
        }
        let range = Interval::new(self.range.clamp(t0), self.range.clamp(t1));
        Some(Curve::Parabola(self.with_range(range)))
    }

    fn reversed(&self) -> Parabola {
        Parabola {
            vertex: self.vertex,
            a: -self.a,
            theta: normalize_signed_angle(self.theta + PI),
            range: Interval::new(-self.range.t1, -self.range.t0),
        }
    }

    /// Exported exactly as a single quadratic Bézier.
    fn append_to(&self, path: &mut BezPath, _tolerance: f64) -> Result<()> {
        if !self.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        let Interval { t0, t1 } = self.range;
        let control = self.to_global(Vec2::new(0.5 * (t0 + t1), self.a * t0 * t1));
        path.start_at(self.eval(t0));
        path.quad_to(control, self.eval(t1));
        Ok(())
    }
}

impl ParamCurveDeriv for Parabola {
    fn tangent(&self, t: f64) -> Vec2 {
        Vec2::new(1.0, 2.0 * self.a * t).rotate(self.theta)
    }
}

impl OrientedCurve for Parabola {
    fn signed_distance(&self, p: Point) -> f64 {
        let dist = self.distance(p);
        if self.is_inside(p) {
            -dist
        } else {
            dist
        }
    }

    fn winding_angle(&self, p: Point) -> f64 {
        let (start, end) = (self.start(), self.end());
        let far = self.opening();
        let v0 = if start.is_finite() { start - p } else { far };
        let v1 = if end.is_finite() { end - p } else { far };
        let mid = self.eval(Interval::interior_between(self.range.t0, self.range.t1));
        let enclosed = self.in_opening(p) && same_side_of_chord(start, end, far, mid, p);
        convex_arc_winding(v0, v1, enclosed, self.a > 0.0)
    }

    /// Points on the left of the direction of travel.
    fn is_inside(&self, p: Point) -> bool {
        let q = self.to_local(p);
        q.y > self.a * q.x * q.x
    }
}

impl Mul<Parabola> for Affine {
    type Output = Parabola;

    /// The image parabola, reparametrized linearly so that its vertex is at
    /// parameter 0.
    fn mul(self, parabola: Parabola) -> Parabola {
        let origin = self * parabola.vertex;
        let u = self.transform_vec(Vec2::from_angle(parabola.theta));
        let n = self.transform_vec(Vec2::from_angle(parabola.theta).turn_90() * parabola.a);
        // P(t) = origin + t·u + t²·n
        let t_v = -u.dot(n) / (2.0 * n.hypot2());
        let vertex = origin + t_v * u + t_v * t_v * n;
        let w = u + 2.0 * t_v * n;
        let w_len = w.hypot();
        let a = n.dot(w.turn_90()) / (w_len * w_len * w_len);
        let map = |t: f64| (t - t_v) * w_len;
        Parabola {
            vertex,
            a,
            theta: w.atan2(),
            range: Interval::new(map(parabola.range.t0), map(parabola.range.t1)),
        }
    }
}
