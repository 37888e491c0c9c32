// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hyperbolas and hyperbola branches.

use core::ops::Mul;

use smallvec::SmallVec;

use crate::angle::normalize_axis_angle;
use crate::common::solve_quadratic;
use crate::param_curve::{
    convex_arc_winding, nearest_param, same_side_of_chord, OrientedCurve, ParamCurve, ParamCurveDeriv,
};
use crate::tolerance::ACCURACY;
use crate::{Affine, BezPath, Curve, GeomError, Interval, Line, Point, Rect, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A hyperbola with both branches.
///
/// In the local frame centered on `center` and rotated by `theta`, the
/// equation is `x²/a² − y²/b² = 1`. The positive branch is
/// `(a·cosh t, b·sinh t)` and the negative branch its point reflection
/// `(−a·cosh t, −b·sinh t)`; a non-direct hyperbola traverses both with
/// `t` negated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hyperbola {
    /// The center of symmetry.
    pub center: Point,
    /// Semi-transverse axis length.
    pub a: f64,
    /// Semi-conjugate axis length.
    pub b: f64,
    /// Rotation of the transverse axis, in radians.
    pub theta: f64,
    /// Orientation of the parametrization.
    pub direct: bool,
}

impl Hyperbola {
    /// A new direct hyperbola.
    #[inline]
    pub fn new(center: impl Into<Point>, a: f64, b: f64, theta: f64) -> Hyperbola {
        Hyperbola {
            center: center.into(),
            a: a.abs(),
            b: b.abs(),
            theta,
            direct: true,
        }
    }

    /// The branch on the `+x` side of the local frame.
    #[inline]
    pub fn positive_branch(&self) -> HyperbolaBranch {
        HyperbolaBranch::new(*self, true)
    }

    /// The branch on the `−x` side of the local frame.
    #[inline]
    pub fn negative_branch(&self) -> HyperbolaBranch {
        HyperbolaBranch::new(*self, false)
    }

    /// The two asymptotes, through the center.
    pub fn asymptotes(&self) -> [Line; 2] {
        let d0 = Vec2::new(self.a, self.b).rotate(self.theta);
        let d1 = Vec2::new(self.a, -self.b).rotate(self.theta);
        [Line::support(self.center, d0), Line::support(self.center, d1)]
    }

    /// The two foci, on the positive then the negative side.
    pub fn foci(&self) -> [Point; 2] {
        let c = self.a.hypot(self.b);
        let v = Vec2::from_angle(self.theta) * c;
        [self.center + v, self.center - v]
    }

    /// `c / a`, always greater than 1.
    #[inline]
    pub fn eccentricity(&self) -> f64 {
        self.a.hypot(self.b) / self.a
    }

    /// Is `p` on one of the branches?
    pub fn contains(&self, p: Point) -> bool {
        self.positive_branch().contains(p) || self.negative_branch().contains(p)
    }

    #[inline]
    fn to_local(&self, p: Point) -> Vec2 {
        (p - self.center).rotate(-self.theta)
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

impl Mul<Hyperbola> for Affine {
    type Output = Hyperbola;

    fn mul(self, hyperbola: Hyperbola) -> Hyperbola {
        (self * hyperbola.positive_branch()).hyperbola
    }
}

/// One branch of a hyperbola, or an arc of it when `range` is bounded.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HyperbolaBranch {
    /// The hyperbola carrying this branch.
    pub hyperbola: Hyperbola,
    /// `true` for the branch on the `+x` side of the local frame.
    pub positive: bool,
    /// The parameter range, `(-∞, +∞)` for the whole branch.
    pub range: Interval,
}

impl HyperbolaBranch {
    /// The whole branch.
    #[inline]
    pub fn new(hyperbola: Hyperbola, positive: bool) -> HyperbolaBranch {
        HyperbolaBranch {
            hyperbola,
            positive,
            range: Interval::REAL,
        }
    }

    /// The arc of this branch between two parameters.
    #[must_use]
    pub fn with_range(self, range: Interval) -> HyperbolaBranch {
        HyperbolaBranch { range, ..self }
    }

    /// The vertex of the branch.
    pub fn vertex(&self) -> Point {
        let h = &self.hyperbola;
        h.center + Vec2::new(self.branch_sign() * h.a, 0.0).rotate(h.theta)
    }

    #[inline]
    fn branch_sign(&self) -> f64 {
        if self.positive {
            1.0
        } else {
            -1.0
        }
    }

    /// Local coordinates at parameter `t`.
    #[inline]
    fn local_point(&self, t: f64) -> Vec2 {
        let h = &self.hyperbola;
        let beta = self.branch_sign();
        Vec2::new(beta * h.a * t.cosh(), beta * h.sign() * h.b * t.sinh())
    }

    /// Direction of the far end reached as `t` goes to `sign * ∞`.
    fn asymptotic_direction(&self, sign: f64) -> Vec2 {
        let h = &self.hyperbola;
        let beta = self.branch_sign();
        Vec2::new(beta * h.a, beta * h.sign() * sign * h.b).rotate(h.theta)
    }

    /// Is `p` strictly on the side of the branch that holds its focus?
    fn on_focus_side(&self, p: Point) -> bool {
        let h = &self.hyperbola;
        let q = h.to_local(p);
        let x = self.branch_sign() * q.x;
        x > 0.0 && x * x / (h.a * h.a) - q.y * q.y / (h.b * h.b) > 1.0
    }

    /// Does the branch bend to the left of its direction of travel?
    #[inline]
    fn turns_left(&self) -> bool {
        !self.hyperbola.direct
    }
}

impl ParamCurve for HyperbolaBranch {
    #[inline]
    fn domain(&self) -> Interval {
        self.range
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.range.clamp(t);
        if t.is_infinite() {
            return Point::INFINITY;
        }
        let h = &self.hyperbola;
        h.center + self.local_point(t).rotate(h.theta)
    }

    fn position(&self, p: Point) -> Option<f64> {
        let h = &self.hyperbola;
        let q = h.to_local(p);
        if self.branch_sign() * q.x <= 0.0 {
            return None;
        }
        let y = self.branch_sign() * h.sign() * q.y / h.b;
        let t = y.asinh();
        if !self.range.contains(t) {
            return None;
        }
        let t = self.range.clamp(t);
        (self.eval(t).distance(p) < ACCURACY).then_some(t)
    }

    fn project(&self, p: Point) -> f64 {
        let h = &self.hyperbola;
        let reference = self.range.clamp(0.0);
        let radius = (p - h.center).hypot() + (p - self.eval(reference)).hypot();
        // No point farther than this from the center beats the reference.
        let bound = (radius / h.a.min(h.b)).max(1.0).acosh();
        let lo = self.range.t0.max(-bound).min(reference);
        let hi = self.range.t1.min(bound).max(reference);
        if hi - lo < ACCURACY {
            return reference;
        }
        nearest_param(self, p, lo, hi, 128)
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        self.range.is_finite()
    }

    fn bounding_box(&self) -> Rect {
        let h = &self.hyperbola;
        let mut bbox = Rect::EMPTY;
        let (s, c) = h.theta.sin_cos();
        for (end, sign) in [(self.range.t0, -1.0), (self.range.t1, 1.0)] {
            if end.is_finite() {
                bbox = bbox.union_pt(self.eval(end));
                continue;
            }
            let dir = self.asymptotic_direction(sign);
            let pick = |d: f64, center: f64| {
                if d.abs() > ACCURACY * dir.hypot() {
                    f64::INFINITY.copysign(d)
                } else {
                    center
                }
            };
            bbox = bbox.union_pt(Point::new(pick(dir.x, h.center.x), pick(dir.y, h.center.y)));
        }
        // tanh t at the parameters where x or y is extreme.
        let sb = h.sign() * h.b;
        for ratio in [sb * s / (h.a * c), -sb * c / (h.a * s)] {
            if ratio.abs() < 1.0 {
                let t = ratio.atanh();
                if self.range.contains(t) {
                    bbox = bbox.union_pt(self.eval(t));
                }
            }
        }
        bbox
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let h = &self.hyperbola;
        let o = h.to_local(line.origin);
        let n = line.direction.rotate(-h.theta).turn_90();
        let beta = self.branch_sign();
        let sb = h.sign() * h.b;
        // With u = exp(t), n·(P(t) − o) = 0 becomes a quadratic in u.
        let c2 = beta * (n.x * h.a + n.y * sb);
        let c1 = -2.0 * n.dot(o);
        let c0 = beta * (n.x * h.a - n.y * sb);
        let mut result: SmallVec<[f64; 4]> = solve_quadratic(c0, c1, c2)
            .into_iter()
            .filter(|u| *u > 0.0)
            .map(|u| u.ln())
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
        Some(Curve::Hyperbola(self.with_range(range)))
    }

    fn reversed(&self) -> HyperbolaBranch {
        HyperbolaBranch {
            hyperbola: Hyperbola {
                direct: !self.hyperbola.direct,
                ..self.hyperbola
            },
            positive: self.positive,
            range: Interval::new(-self.range.t1, -self.range.t0),
        }
    }

    /// Exported as a polyline dense enough for `tolerance`.
    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        if !self.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        let h = &self.hyperbola;
        let scale = h.a.max(h.b) / tolerance.max(ACCURACY);
        let n = (self.range.length() * scale.sqrt()).ceil().clamp(1.0, 4096.0) as usize;
        let step = self.range.length() / n as f64;
        path.start_at(self.eval(self.range.t0));
        for i in 1..=n {
            let t = if i == n { self.range.t1 } else { self.range.t0 + i as f64 * step };
            path.line_to(self.eval(t));
        }
        Ok(())
    }
}

impl ParamCurveDeriv for HyperbolaBranch {
    fn tangent(&self, t: f64) -> Vec2 {
        let h = &self.hyperbola;
        let beta = self.branch_sign();
        Vec2::new(beta * h.a * t.sinh(), beta * h.sign() * h.b * t.cosh()).rotate(h.theta)
    }
}

impl OrientedCurve for HyperbolaBranch {
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
        let v0 = if start.is_finite() {
            start - p
        } else {
            self.asymptotic_direction(-1.0)
        };
        let v1 = if end.is_finite() {
            end - p
        } else {
            self.asymptotic_direction(1.0)
        };
        let far = if start.is_finite() { v1 } else { v0 };
        let mid = self.eval(Interval::interior_between(self.range.t0, self.range.t1));
        let enclosed = self.on_focus_side(p) && same_side_of_chord(start, end, far, mid, p);
        convex_arc_winding(v0, v1, enclosed, self.turns_left())
    }

    /// Points on the left of the direction of travel.
    fn is_inside(&self, p: Point) -> bool {
        self.on_focus_side(p) == self.turns_left()
    }
}

impl Mul<HyperbolaBranch> for Affine {
    type Output = HyperbolaBranch;

    /// The image branch, with its parameter shifted so that `t = 0` is the
    /// image vertex.
    fn mul(self, branch: HyperbolaBranch) -> HyperbolaBranch {
        let h = &branch.hyperbola;
        let beta = branch.branch_sign();
        let u = self.transform_vec(Vec2::new(beta * h.a, 0.0).rotate(h.theta));
        let v = self.transform_vec(Vec2::new(0.0, beta * h.sign() * h.b).rotate(h.theta));
        // P(t) = c + U cosh t + V sinh t = c + A cosh(t − τ) + B sinh(t − τ)
        // with A and B perpendicular.
        let tau = 0.5 * (-2.0 * u.dot(v) / (u.hypot2() + v.hypot2())).atanh();
        let (ch, sh) = (tau.cosh(), tau.sinh());
        let a = u * ch + v * sh;
        let b = u * sh + v * ch;
        let theta = normalize_axis_angle(a.atan2());
        let positive = a.dot(Vec2::from_angle(theta)) > 0.0;
        let hyperbola = Hyperbola {
            center: self * h.center,
            a: a.hypot(),
            b: b.hypot(),
            theta,
            direct: a.cross(b) > 0.0,
        };
        HyperbolaBranch {
            hyperbola,
            positive,
            range: Interval::new(branch.range.t0 - tau, branch.range.t1 - tau),
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use crate::param_curve::{OrientedCurve, ParamCurve};
    use crate::{Affine, BezPath, Curve, GeomError, Hyperbola, Interval, Line, PathEl, Point};

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn branches() {
        let h = Hyperbola::new((0.0, 0.0), 2.0, 1.0, 0.0);
        let pos = h.positive_branch();
        let neg = h.negative_branch();
        assert_eq!(pos.eval(0.0), Point::new(2.0, 0.0));
        assert_eq!(neg.eval(0.0), Point::new(-2.0, 0.0));
        assert_eq!(pos.vertex(), Point::new(2.0, 0.0));
        assert!(neg.eval(1.0).almost_equals(Point::new(-2.0 * 1f64.cosh(), -(1f64.sinh()))));
        assert_eq!(pos.start(), Point::INFINITY);
        assert!(!pos.is_bounded());
        assert!(h.contains(Point::new(-2.0, 0.0)));
        assert!(!h.contains(Point::ORIGIN));
    }

    #[test]
    fn position_inverts_eval() {
        let h = Hyperbola::new((1.0, -1.0), 3.0, 2.0, 0.4);
        for branch in [h.positive_branch(), h.negative_branch(), h.positive_branch().reversed()] {
            for t in [-2.0, -0.3, 0.0, 1.7] {
                let p = branch.eval(t);
                assert_near(branch.position(p).unwrap(), t, 1e-9);
            }
        }
        assert!(h.positive_branch().position(h.negative_branch().eval(0.5)).is_none());
    }

    #[test]
    fn projection() {
        let h = Hyperbola::new((0.0, 0.0), 1.0, 1.0, 0.0);
        let branch = h.positive_branch();
        // Deep inside the focus side the nearest points are far from the vertex.
        let t = branch.project(Point::new(100.0, 0.0));
        assert_near(t.abs(), 50f64.acosh(), 1e-6);
        assert_near(branch.project(Point::new(-3.0, 0.0)), 0.0, 1e-9);
        let q = branch.eval(0.8);
        assert!(branch.distance(q) < 1e-12);
    }

    #[test]
    fn crossings() {
        let h = Hyperbola::new((50.0, 50.0), 10.0, 10.0, 0.0);
        let branch = h.positive_branch();
        let line = Line::through((70.0, 0.0), (70.0, 100.0)).unwrap();
        let ts = branch.line_crossings(&line);
        assert_eq!(ts.len(), 2);
        let p0 = branch.eval(ts[0]);
        let p1 = branch.eval(ts[1]);
        let r3 = 10.0 * 3f64.sqrt();
        assert!(p0.almost_equals_eps(Point::new(70.0, 50.0 - r3), 1e-9), "{p0:?}");
        assert!(p1.almost_equals_eps(Point::new(70.0, 50.0 + r3), 1e-9), "{p1:?}");
        let miss = Line::through((45.0, 0.0), (45.0, 100.0)).unwrap();
        assert!(branch.line_crossings(&miss).is_empty());
        assert_eq!(h.negative_branch().line_crossings(&miss).len(), 0);
    }

    #[test]
    fn bounding_boxes() {
        let h = Hyperbola::new((0.0, 0.0), 1.0, 1.0, 0.0);
        let bb = h.positive_branch().bounding_box();
        assert_eq!(bb.x0, 1.0);
        assert_eq!((bb.x1, bb.y0, bb.y1), (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY));
        let arc = h.positive_branch().with_range(Interval::new(-1.0, 1.0));
        let bb = arc.bounding_box();
        assert_near(bb.y0, -(1f64.sinh()), 1e-12);
        assert_near(bb.x1, 1f64.cosh(), 1e-12);
    }

    #[test]
    fn orientation() {
        let h = Hyperbola::new((0.0, 0.0), 1.0, 1.0, 0.0);
        let branch = h.positive_branch();
        // A direct branch runs upward and keeps the center on its left.
        assert!(branch.is_inside(Point::ORIGIN));
        assert!(!branch.is_inside(Point::new(5.0, 0.0)));
        assert!(branch.signed_distance(Point::ORIGIN) < 0.0);
        let reversed = branch.reversed();
        assert!(reversed.is_inside(Point::new(5.0, 0.0)));
        // Seen from the center the branch spans the angle between asymptotes.
        assert_near(branch.winding_angle(Point::ORIGIN), FRAC_PI_2, 1e-12);
        // From the focus side it wraps almost all the way around.
        let w = branch.winding_angle(Point::new(5.0, 0.0));
        assert_near(w, FRAC_PI_2 - core::f64::consts::TAU, 1e-12);
    }

    #[test]
    fn subcurve_and_export() {
        let branch = Hyperbola::new((0.0, 0.0), 1.0, 1.0, 0.0).positive_branch();
        let Some(Curve::Hyperbola(arc)) = branch.subcurve(-1.0, 1.0) else {
            panic!("expected a hyperbola arc");
        };
        let mut path = BezPath::new();
        arc.append_to(&mut path, 0.01).unwrap();
        assert_eq!(path.elements()[0], PathEl::MoveTo(arc.start()));
        assert_eq!(path.elements().last(), Some(&PathEl::LineTo(arc.end())));
        assert!(path.len() > 4);
        assert_eq!(branch.append_to(&mut path, 0.01), Err(GeomError::UnboundedShape));
        assert!(branch.subcurve(1.0, -1.0).is_none());
    }

    #[test]
    fn affine_image() {
        let branch = Hyperbola::new((1.0, 2.0), 2.0, 1.0, 0.3)
            .negative_branch()
            .with_range(Interval::new(-1.5, 2.0));
        for t in [Affine::new([1.2, 0.5, 3.0, -0.4, 0.9, -1.0]), Affine::FLIP_X, Affine::rotate(2.5)] {
            let image = t * branch;
            for i in 0..8 {
                let s = -1.5 + 0.5 * i as f64;
                let q = t * branch.eval(s);
                assert!(image.eval(s - (branch.range.t0 - image.range.t0)).almost_equals_eps(q, 1e-9));
            }
            assert!(image.hyperbola.theta >= 0.0 && image.hyperbola.theta < core::f64::consts::PI);
        }
    }
}
