// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ellipses, and the eccentric-angle arithmetic shared with circles and arcs.

use core::f64::consts::{PI, TAU};
use core::ops::Mul;

use smallvec::SmallVec;

use crate::angle::{normalize_angle, sweep_contains};
use crate::common::solve_quadratic;
use crate::param_curve::{nearest_param, OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::tolerance::ACCURACY;
use crate::{Affine, Arc, BezPath, Curve, Interval, Line, Point, Rect, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A full ellipse.
///
/// The point at parameter `t` is
/// `center + rotate(x_rotation) * (radii.x * cos t, ±radii.y * sin t)`,
/// with the `+` sign for a direct (counter-clockwise) ellipse. The domain
/// is `[0, 2π]` and the curve is closed.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    /// The center.
    pub center: Point,
    /// The semi-axis lengths, along the rotated x and y axes.
    pub radii: Vec2,
    /// Counter-clockwise rotation of the first semi-axis, in radians.
    pub x_rotation: f64,
    /// `true` for counter-clockwise traversal.
    pub direct: bool,
}

impl Ellipse {
    /// A new direct ellipse from center, radii and rotation.
    ///
    /// Negative radii describe the same ellipse and are made positive.
    #[inline]
    pub fn new(center: impl Into<Point>, radii: impl Into<Vec2>, x_rotation: f64) -> Ellipse {
        let radii = radii.into();
        Ellipse {
            center: center.into(),
            radii: Vec2::new(radii.x.abs(), radii.y.abs()),
            x_rotation,
            direct: true,
        }
    }

    /// The largest axis-aligned ellipse inscribed in `rect`.
    #[inline]
    pub fn from_rect(rect: Rect) -> Ellipse {
        Ellipse::new(rect.center(), (0.5 * rect.width(), 0.5 * rect.height()), 0.0)
    }

    /// A copy with the given orientation.
    #[must_use]
    #[inline]
    pub fn with_direct(self, direct: bool) -> Ellipse {
        Ellipse { direct, ..self }
    }

    /// The enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        PI * self.radii.x * self.radii.y
    }

    /// Are both radii equal?
    #[inline]
    pub fn is_circle(&self) -> bool {
        (self.radii.x - self.radii.y).abs() < ACCURACY
    }

    /// The whole ellipse as an arc, sweeping in its direction of travel.
    pub fn to_arc(&self) -> Arc {
        let sign = self.sign();
        Arc {
            center: self.center,
            radii: self.radii,
            start_angle: 0.0,
            sweep_angle: sign * TAU,
            x_rotation: self.x_rotation,
        }
    }

    #[inline]
    fn sign(&self) -> f64 {
        if self.direct {
            1.0
        } else {
            -1.0
        }
    }

    /// Parameter of the point at eccentric angle `angle`.
    #[inline]
    fn param_of_angle(&self, angle: f64) -> f64 {
        normalize_angle(self.sign() * angle)
    }
}

impl ParamCurve for Ellipse {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::new(0.0, TAU)
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.domain().clamp(t);
        self.center + ellipse_offset(self.radii, self.x_rotation, self.sign() * t)
    }

    fn position(&self, p: Point) -> Option<f64> {
        let angle = eccentric_angle(self.center, self.radii, self.x_rotation, p);
        let t = self.param_of_angle(angle);
        (self.eval(t).distance(p) < ACCURACY).then_some(t)
    }

    fn project(&self, p: Point) -> f64 {
        nearest_param(self, p, 0.0, TAU, 64)
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
        elliptic_bbox(self.center, self.radii, self.x_rotation, 0.0, TAU)
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let mut result: SmallVec<[f64; 4]> =
            ellipse_line_angles(self.center, self.radii, self.x_rotation, line)
                .into_iter()
                .map(|a| self.param_of_angle(a))
                .collect();
        result.sort_by(f64::total_cmp);
        result
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        let d = self.domain();
        let (t0, t1) = (d.clamp(t0), d.clamp(t1));
        let len = if t1 < t0 { t1 + TAU - t0 } else { t1 - t0 };
        let sign = self.sign();
        Some(Curve::Arc(Arc {
            center: self.center,
            radii: self.radii,
            start_angle: sign * t0,
            sweep_angle: sign * len,
            x_rotation: self.x_rotation,
        }))
    }

    fn reversed(&self) -> Ellipse {
        self.with_direct(!self.direct)
    }

    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        self.to_arc().append_to(path, tolerance)?;
        path.close_path();
        Ok(())
    }
}

impl ParamCurveDeriv for Ellipse {
    fn tangent(&self, t: f64) -> Vec2 {
        let sign = self.sign();
        sign * ellipse_derivative(self.radii, self.x_rotation, sign * t)
    }
}

impl OrientedCurve for Ellipse {
    fn signed_distance(&self, p: Point) -> f64 {
        let dist = self.distance(p);
        if self.is_inside(p) {
            -dist
        } else {
            dist
        }
    }

    fn winding_angle(&self, p: Point) -> f64 {
        if inside_ellipse(self.center, self.radii, self.x_rotation, p) {
            self.sign() * TAU
        } else {
            0.0
        }
    }

    fn is_inside(&self, p: Point) -> bool {
        inside_ellipse(self.center, self.radii, self.x_rotation, p) == self.direct
    }
}

impl Mul<Ellipse> for Affine {
    type Output = Ellipse;

    /// The image ellipse. Its parametrization starts at the end of the
    /// image's first semi-axis, which need not be the image of the
    /// original start point.
    fn mul(self, ellipse: Ellipse) -> Ellipse {
        let image = transform_ellipse(self, ellipse.center, ellipse.radii, ellipse.x_rotation, ellipse.direct);
        Ellipse {
            center: image.center,
            radii: image.radii,
            x_rotation: image.x_rotation,
            direct: image.direct,
        }
    }
}

/// Offset from the center at eccentric angle `angle`.
#[inline]
pub(crate) fn ellipse_offset(radii: Vec2, x_rotation: f64, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(radii.x * c, radii.y * s).rotate(x_rotation)
}

/// Derivative of [`ellipse_offset`] with respect to the angle.
#[inline]
pub(crate) fn ellipse_derivative(radii: Vec2, x_rotation: f64, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(-radii.x * s, radii.y * c).rotate(x_rotation)
}

/// Eccentric angle of `p`, in `(-π, π]`.
#[inline]
pub(crate) fn eccentric_angle(center: Point, radii: Vec2, x_rotation: f64, p: Point) -> f64 {
    let q = (p - center).rotate(-x_rotation);
    (q.y / radii.y).atan2(q.x / radii.x)
}

/// Is `p` strictly inside the full ellipse?
#[inline]
pub(crate) fn inside_ellipse(center: Point, radii: Vec2, x_rotation: f64, p: Point) -> bool {
    let q = (p - center).rotate(-x_rotation);
    let u = Vec2::new(q.x / radii.x, q.y / radii.y);
    u.hypot2() < 1.0
}

/// Eccentric angles where the support line of `line` meets the ellipse.
pub(crate) fn ellipse_line_angles(
    center: Point,
    radii: Vec2,
    x_rotation: f64,
    line: &Line,
) -> SmallVec<[f64; 2]> {
    let o = (line.origin - center).rotate(-x_rotation);
    let d = line.direction.rotate(-x_rotation);
    // In the frame where the ellipse is the unit circle.
    let o = Vec2::new(o.x / radii.x, o.y / radii.y);
    let d = Vec2::new(d.x / radii.x, d.y / radii.y);
    solve_quadratic(o.hypot2() - 1.0, 2.0 * o.dot(d), d.hypot2())
        .into_iter()
        .map(|s| {
            let q = o + s * d;
            q.y.atan2(q.x)
        })
        .collect()
}

/// Bounding box of the elliptic arc starting at eccentric angle `start`
/// and sweeping `sweep`.
pub(crate) fn elliptic_bbox(center: Point, radii: Vec2, x_rotation: f64, start: f64, sweep: f64) -> Rect {
    let (sin_r, cos_r) = x_rotation.sin_cos();
    let at = |a: f64| center + ellipse_offset(radii, x_rotation, a);
    let mut bbox = Rect::EMPTY.union_pt(at(start)).union_pt(at(start + sweep));
    let x_extreme = (-radii.y * sin_r).atan2(radii.x * cos_r);
    let y_extreme = (radii.y * cos_r).atan2(radii.x * sin_r);
    for a in [x_extreme, x_extreme + PI, y_extreme, y_extreme + PI] {
        if sweep_contains(start, sweep, a) {
            bbox = bbox.union_pt(at(a));
        }
    }
    bbox
}

/// An ellipse mapped by an affine transform, in conjugate-diameter form.
pub(crate) struct EllipseImage {
    pub(crate) center: Point,
    pub(crate) radii: Vec2,
    pub(crate) x_rotation: f64,
    /// The image point at angle `a` sits at angle `a - shift` on the image.
    pub(crate) shift: f64,
    pub(crate) direct: bool,
}

/// Map the ellipse `center + U cos a + V sin a` through `affine`.
///
/// `direct` selects the sign of `V`. The image semi-axes are the
/// conjugate diameters that become perpendicular after the transform.
pub(crate) fn transform_ellipse(
    affine: Affine,
    center: Point,
    radii: Vec2,
    x_rotation: f64,
    direct: bool,
) -> EllipseImage {
    let sign = if direct { 1.0 } else { -1.0 };
    let u = affine.transform_vec(Vec2::new(radii.x, 0.0).rotate(x_rotation));
    let v = affine.transform_vec(Vec2::new(0.0, sign * radii.y).rotate(x_rotation));
    let shift = 0.5 * (2.0 * u.dot(v)).atan2(u.hypot2() - v.hypot2());
    let (s, c) = shift.sin_cos();
    let a = u * c + v * s;
    let b = v * c - u * s;
    EllipseImage {
        center: affine * center,
        radii: Vec2::new(a.hypot(), b.hypot()),
        x_rotation: a.atan2(),
        shift,
        direct: a.cross(b) > 0.0,
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::param_curve::{OrientedCurve, ParamCurve};
    use crate::{Affine, Curve, Ellipse, Line, Point, Rect};

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn eval_and_position() {
        let e = Ellipse::new((1.0, 2.0), (4.0, 2.0), FRAC_PI_2);
        assert!(e.eval(0.0).almost_equals(Point::new(1.0, 6.0)));
        assert!(e.eval(FRAC_PI_2).almost_equals(Point::new(-1.0, 2.0)));
        let t = e.position(e.eval(2.0)).unwrap();
        assert_near(t, 2.0, 1e-12);
        assert!(e.position(Point::new(1.0, 2.0)).is_none());
        let r = e.reversed();
        assert!(r.eval(FRAC_PI_2).almost_equals(Point::new(3.0, 2.0)));
        assert_near(r.position(Point::new(3.0, 2.0)).unwrap(), FRAC_PI_2, 1e-12);
    }

    #[test]
    fn projection() {
        let e = Ellipse::new((0.0, 0.0), (5.0, 3.0), 0.0);
        let t = e.project(Point::new(10.0, 0.0));
        assert_near(t.min(TAU - t), 0.0, 1e-9);
        let q = e.eval(e.project(Point::new(0.0, 7.0)));
        assert!(q.almost_equals_eps(Point::new(0.0, 3.0), 1e-9));
        assert!(e.contains(e.eval(1.0)));
        assert_near(e.distance(Point::new(0.0, -4.0)), 1.0, 1e-9);
    }

    #[test]
    fn bbox_and_crossings() {
        let e = Ellipse::new((0.0, 0.0), (2.0, 1.0), FRAC_PI_2);
        let bb = e.bounding_box();
        assert_near(bb.x0, -1.0, 1e-12);
        assert_near(bb.x1, 1.0, 1e-12);
        assert_near(bb.y0, -2.0, 1e-12);
        assert_near(bb.y1, 2.0, 1e-12);
        let line = Line::through((0.0, -5.0), (0.0, 5.0)).unwrap();
        let ts = e.line_crossings(&line);
        assert_eq!(ts.len(), 2);
        for t in ts {
            assert_near(e.eval(t).x, 0.0, 1e-12);
        }
        let far = Line::through((5.0, -5.0), (5.0, 5.0)).unwrap();
        assert!(e.line_crossings(&far).is_empty());
    }

    #[test]
    fn orientation() {
        let e = Ellipse::new((0.0, 0.0), (2.0, 1.0), 0.0);
        assert!(e.is_inside(Point::ORIGIN));
        assert!(e.signed_distance(Point::ORIGIN) < 0.0);
        assert_near(e.winding_angle(Point::ORIGIN), TAU, 1e-15);
        assert_eq!(e.winding_angle(Point::new(3.0, 0.0)), 0.0);
        let r = e.reversed();
        assert!(!r.is_inside(Point::ORIGIN));
        assert!(r.is_inside(Point::new(3.0, 0.0)));
        assert_near(r.winding_angle(Point::ORIGIN), -TAU, 1e-15);
        assert_near(e.area(), 2.0 * PI, 1e-15);
    }

    #[test]
    fn subcurve_wraps() {
        let e = Ellipse::new((0.0, 0.0), (2.0, 1.0), 0.0);
        let Some(Curve::Arc(arc)) = e.subcurve(3.0 * FRAC_PI_2, FRAC_PI_2) else {
            panic!("expected an arc");
        };
        assert_near(arc.sweep_angle, PI, 1e-15);
        assert!(arc.start().almost_equals(Point::new(0.0, -1.0)));
        assert!(arc.end().almost_equals(Point::new(0.0, 1.0)));
        assert!(arc.contains(Point::new(2.0, 0.0)));
    }

    #[test]
    fn affine_image() {
        let e = Ellipse::new((1.0, 1.0), (2.0, 1.0), 0.3);
        let t = Affine::new([1.0, 0.5, 2.0, -0.3, 2.0, 1.0]);
        let image = t * e;
        for i in 0..12 {
            let p = t * e.eval(i as f64 * 0.5);
            assert!(image.contains(p), "{p:?}");
        }
        assert_eq!(image.direct, t.is_direct());
        let mirrored = Affine::FLIP_Y * e;
        assert!(!mirrored.direct);
        assert!(mirrored.contains(Affine::FLIP_Y * e.eval(1.0)));
    }

    #[test]
    fn from_rect() {
        let e = Ellipse::from_rect(Rect::new(0.0, 0.0, 4.0, 2.0));
        assert_eq!(e.center, Point::new(2.0, 1.0));
        let bb = e.bounding_box();
        for (a, b) in [(bb.x0, 0.0), (bb.y0, 0.0), (bb.x1, 4.0), (bb.y1, 2.0)] {
            assert_near(a, b, 1e-12);
        }
    }
}
