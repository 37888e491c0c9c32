// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elliptical and circular arcs.

use core::f64::consts::{FRAC_PI_2, TAU};
use core::ops::Mul;

use smallvec::SmallVec;

use crate::angle::normalize_angle;
use crate::ellipse::{
    eccentric_angle, elliptic_bbox, ellipse_derivative, ellipse_line_angles, ellipse_offset,
    inside_ellipse, transform_ellipse,
};
use crate::param_curve::{
    convex_arc_winding, nearest_param, same_side_of_chord, tangent_signed_distance, OrientedCurve,
    ParamCurve, ParamCurveDeriv,
};
use crate::tolerance::ACCURACY;
use crate::{Affine, BezPath, Curve, Interval, Line, PathEl, Point, Rect, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A single elliptical arc segment.
///
/// The arc starts at eccentric angle `start_angle` and sweeps
/// `sweep_angle` radians, counter-clockwise when positive. It is
/// parametrized by the swept angle, so its domain is `[0, |sweep_angle|]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arc {
    /// The arc's centre point.
    pub center: Point,
    /// The arc's radii, where the vector's x-component is the radius in the
    /// positive x direction after applying `x_rotation`.
    pub radii: Vec2,
    /// The start angle in radians.
    pub start_angle: f64,
    /// The angle between the start and end of the arc.
    pub sweep_angle: f64,
    /// How much the arc is rotated, in radians.
    pub x_rotation: f64,
}

impl Arc {
    /// Create a new `Arc`.
    pub fn new(
        center: impl Into<Point>,
        radii: impl Into<Vec2>,
        start_angle: f64,
        sweep_angle: f64,
        x_rotation: f64,
    ) -> Self {
        Self {
            center: center.into(),
            radii: radii.into(),
            start_angle,
            sweep_angle,
            x_rotation,
        }
    }

    /// A circular arc.
    pub fn circular(center: impl Into<Point>, radius: f64, start_angle: f64, sweep_angle: f64) -> Arc {
        Arc::new(center, (radius, radius), start_angle, sweep_angle, 0.0)
    }

    /// The angle where the arc ends.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Does the arc turn counter-clockwise?
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.sweep_angle >= 0.0
    }

    #[inline]
    fn sign(&self) -> f64 {
        if self.is_direct() {
            1.0
        } else {
            -1.0
        }
    }

    /// Eccentric angle at parameter `t`.
    #[inline]
    fn angle_at(&self, t: f64) -> f64 {
        self.start_angle + self.sign() * t
    }

    /// Parameter of eccentric angle `angle`, if the arc reaches it.
    fn param_of_angle(&self, angle: f64) -> Option<f64> {
        let span = self.sweep_angle.abs();
        let offset = normalize_angle(self.sign() * (angle - self.start_angle));
        if offset <= span + ACCURACY {
            Some(offset.min(span))
        } else if offset >= TAU - ACCURACY {
            Some(0.0)
        } else {
            None
        }
    }

    /// Create an iterator generating Bézier path elements.
    ///
    /// The generated elements can be appended to an existing path that is
    /// positioned at the start of the arc.
    pub fn append_iter(&self, tolerance: f64) -> ArcAppendIter {
        let sign = self.sign();
        let scaled_err = self.radii.x.max(self.radii.y) / tolerance;
        // Number of subdivisions per ellipse based on error tolerance.
        // Note: this may slightly underestimate the error for quadrants.
        let n_err = (1.1163 * scaled_err).powf(1.0 / 6.0).max(3.999_999);
        let n = (n_err * self.sweep_angle.abs() * (1.0 / TAU)).ceil();
        let angle_step = self.sweep_angle / n;
        let n = n as usize;
        let arm_len = (4.0 / 3.0) * (0.25 * angle_step).abs().tan() * sign;
        let angle0 = self.start_angle;
        let p0 = sample_ellipse(self.radii, self.x_rotation, angle0);

        ArcAppendIter {
            idx: 0,

            center: self.center,
            radii: self.radii,
            x_rotation: self.x_rotation,
            n,
            arm_len,
            angle_step,

            p0,
            angle0,
        }
    }
}

impl ParamCurve for Arc {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::new(0.0, self.sweep_angle.abs())
    }

    fn eval(&self, t: f64) -> Point {
        let t = self.domain().clamp(t);
        self.center + ellipse_offset(self.radii, self.x_rotation, self.angle_at(t))
    }

    fn position(&self, p: Point) -> Option<f64> {
        let angle = eccentric_angle(self.center, self.radii, self.x_rotation, p);
        let t = self.param_of_angle(angle)?;
        (self.eval(t).distance(p) < ACCURACY).then_some(t)
    }

    fn project(&self, p: Point) -> f64 {
        let span = self.sweep_angle.abs();
        let samples = (span * (64.0 / TAU)).ceil() as usize;
        nearest_param(self, p, 0.0, span, samples.max(8))
    }

    #[inline]
    fn is_bounded(&self) -> bool {
        true
    }

    #[inline]
    fn is_closed(&self) -> bool {
        self.sweep_angle.abs() >= TAU - ACCURACY
    }

    fn bounding_box(&self) -> Rect {
        elliptic_bbox(self.center, self.radii, self.x_rotation, self.start_angle, self.sweep_angle)
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let mut result: SmallVec<[f64; 4]> =
            ellipse_line_angles(self.center, self.radii, self.x_rotation, line)
                .into_iter()
                .filter_map(|a| self.param_of_angle(a))
                .collect();
        result.sort_by(f64::total_cmp);
        result
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        let d = self.domain();
        let (t0, t1) = (d.clamp(t0), d.clamp(t1));
        let len = if t1 >= t0 {
            t1 - t0
        } else if self.is_closed() {
            d.t1 - t0 + t1
        } else {
            return None;
        };
        Some(Curve::Arc(Arc {
            start_angle: self.angle_at(t0),
            sweep_angle: self.sign() * len,
            ..*self
        }))
    }

    fn reversed(&self) -> Arc {
        Arc {
            start_angle: self.end_angle(),
            sweep_angle: -self.sweep_angle,
            ..*self
        }
    }

    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        path.start_at(self.start());
        path.extend(self.append_iter(tolerance));
        Ok(())
    }
}

impl ParamCurveDeriv for Arc {
    fn tangent(&self, t: f64) -> Vec2 {
        self.sign() * ellipse_derivative(self.radii, self.x_rotation, self.angle_at(self.domain().clamp(t)))
    }
}

impl OrientedCurve for Arc {
    fn signed_distance(&self, p: Point) -> f64 {
        tangent_signed_distance(self, p)
    }

    fn winding_angle(&self, p: Point) -> f64 {
        let (start, end) = (self.start(), self.end());
        let inside = inside_ellipse(self.center, self.radii, self.x_rotation, p);
        let enclosed = if self.is_closed() {
            inside
        } else {
            let mid = self.eval(0.5 * self.sweep_angle.abs());
            inside && same_side_of_chord(start, end, Vec2::ZERO, mid, p)
        };
        convex_arc_winding(start - p, end - p, enclosed, self.is_direct())
    }
}

impl Mul<Arc> for Affine {
    type Output = Arc;

    fn mul(self, arc: Arc) -> Arc {
        let image = transform_ellipse(self, arc.center, arc.radii, arc.x_rotation, true);
        let (start_angle, sweep_angle) = if image.direct {
            (arc.start_angle - image.shift, arc.sweep_angle)
        } else {
            (image.shift - arc.start_angle, -arc.sweep_angle)
        };
        Arc {
            center: image.center,
            radii: image.radii,
            start_angle,
            sweep_angle,
            x_rotation: image.x_rotation,
        }
    }
}

/// Cubic Bézier segments approximating an [`Arc`].
#[derive(Clone, Debug)]
pub struct ArcAppendIter {
    idx: usize,

    center: Point,
    radii: Vec2,
    x_rotation: f64,
    n: usize,
    arm_len: f64,
    angle_step: f64,

    p0: Vec2,
    angle0: f64,
}

impl Iterator for ArcAppendIter {
    type Item = PathEl;

    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.n {
            return None;
        }

        let angle1 = self.angle0 + self.angle_step;
        let p0 = self.p0;
        let p1 = p0 + self.arm_len * sample_ellipse(self.radii, self.x_rotation, self.angle0 + FRAC_PI_2);
        let p3 = sample_ellipse(self.radii, self.x_rotation, angle1);
        let p2 = p3 - self.arm_len * sample_ellipse(self.radii, self.x_rotation, angle1 + FRAC_PI_2);

        self.angle0 = angle1;
        self.p0 = p3;
        self.idx += 1;

        Some(PathEl::CurveTo(
            self.center + p1,
            self.center + p2,
            self.center + p3,
        ))
    }
}

#[inline]
fn sample_ellipse(radii: Vec2, x_rotation: f64, angle: f64) -> Vec2 {
    ellipse_offset(radii, x_rotation, angle)
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::param_curve::{OrientedCurve, ParamCurve};
    use crate::{Affine, Arc, BezPath, Curve, Line, PathEl, Point};

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    #[test]
    fn eval_and_position() {
        let arc = Arc::circular((0.0, 0.0), 2.0, 0.0, FRAC_PI_2);
        assert_eq!(arc.domain().t1, FRAC_PI_2);
        assert!(arc.end().almost_equals(Point::new(0.0, 2.0)));
        let p = arc.eval(0.5);
        assert_near(arc.position(p).unwrap(), 0.5, 1e-12);
        assert!(arc.position(Point::new(-2.0, 0.0)).is_none());
        let cw = Arc::circular((0.0, 0.0), 2.0, 0.0, -FRAC_PI_2);
        assert!(cw.end().almost_equals(Point::new(0.0, -2.0)));
        assert_near(cw.position(Point::new(0.0, -2.0)).unwrap(), FRAC_PI_2, 1e-12);
    }

    #[test]
    fn reverse_and_subcurve() {
        let arc = Arc::circular((0.0, 0.0), 1.0, 0.0, PI);
        let rev = arc.reversed();
        assert!(rev.start().almost_equals(arc.end()));
        assert!(rev.end().almost_equals(arc.start()));
        let Some(Curve::Arc(sub)) = arc.subcurve(FRAC_PI_2, PI) else {
            panic!("expected an arc");
        };
        assert!(sub.start().almost_equals(Point::new(0.0, 1.0)));
        assert!(arc.subcurve(2.0, 1.0).is_none());
        let full = Arc::circular((0.0, 0.0), 1.0, 0.0, TAU);
        let Some(Curve::Arc(wrapped)) = full.subcurve(3.0 * FRAC_PI_2, FRAC_PI_2) else {
            panic!("expected an arc");
        };
        assert_near(wrapped.sweep_angle, PI, 1e-12);
    }

    #[test]
    fn bbox_and_crossings() {
        let arc = Arc::circular((0.0, 0.0), 1.0, 0.0, PI);
        let bb = arc.bounding_box();
        assert_near(bb.x0, -1.0, 1e-12);
        assert_near(bb.x1, 1.0, 1e-12);
        assert_near(bb.y0, 0.0, 1e-12);
        assert_near(bb.y1, 1.0, 1e-12);
        let horizontal = Line::through((-5.0, 0.5), (5.0, 0.5)).unwrap();
        assert_eq!(arc.line_crossings(&horizontal).len(), 2);
        let below = Line::through((-5.0, -0.5), (5.0, -0.5)).unwrap();
        assert!(arc.line_crossings(&below).is_empty());
    }

    #[test]
    fn winding() {
        // Upper half circle, counter-clockwise.
        let arc = Arc::circular((0.0, 0.0), 1.0, 0.0, PI);
        let expected = PI + 2.0 * 0.5f64.atan();
        assert_near(arc.winding_angle(Point::new(0.0, 0.5)), expected, 1e-12);
        // Below the chord the arc subtends less than a half turn.
        let w = arc.winding_angle(Point::new(0.0, -0.5));
        assert!(w > 0.0 && w < PI, "{w}");
        // Far away on the right the arc sweeps back and forth.
        assert!(arc.winding_angle(Point::new(5.0, 0.0)).abs() < PI);
        assert!(arc.is_inside(Point::new(0.0, 0.5)));
        assert!(!arc.is_inside(Point::new(0.0, 1.5)));
    }

    #[test]
    fn cubic_export() {
        let arc = Arc::circular((0.0, 0.0), 1.0, 0.0, FRAC_PI_2);
        let mut path = BezPath::new();
        arc.append_to(&mut path, 0.1).unwrap();
        assert_eq!(path.elements()[0], PathEl::MoveTo(Point::new(1.0, 0.0)));
        let Some(PathEl::CurveTo(p1, _, p3)) = path.elements().last().copied() else {
            panic!("expected a cubic");
        };
        assert!(p3.almost_equals(Point::new(0.0, 1.0)));
        assert!(p1.y > 0.0);
        // The clockwise arc bends the other way.
        let cw = Arc::circular((0.0, 0.0), 1.0, 0.0, -FRAC_PI_2);
        let mut path = BezPath::new();
        cw.append_to(&mut path, 0.1).unwrap();
        let Some(PathEl::CurveTo(p1, _, _)) = path.elements().get(1).copied() else {
            panic!("expected a cubic");
        };
        assert!(p1.y < 0.0);
    }

    #[test]
    fn affine_image() {
        let arc = Arc::new((1.0, 0.0), (2.0, 1.0), 0.2, 1.5, 0.4);
        for t in [Affine::new([2.0, 0.3, 1.0, -0.4, 1.0, 2.0]), Affine::FLIP_X] {
            let image = t * arc;
            assert!(image.start().almost_equals_eps(t * arc.start(), 1e-9));
            assert!(image.end().almost_equals_eps(t * arc.end(), 1e-9));
            assert!(image.contains(t * arc.eval(0.7)));
        }
    }
}
