// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Traits for curves parametrized by a scalar.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use smallvec::SmallVec;

use crate::tolerance::ACCURACY;
use crate::{clip_curve, BezPath, Curve, CurveSet, GeomError, Interval, Line, Point, Rect, Result, Vec2};

/// A curve parametrized by a scalar over a possibly infinite domain.
///
/// The parametrization need not be by arc length. Evaluating at a
/// parameter outside the domain clamps it; an infinite end evaluates to
/// [`Point::INFINITY`].
pub trait ParamCurve {
    /// The parameter domain.
    fn domain(&self) -> Interval;

    /// Evaluate the curve at parameter `t`, clamped to the domain.
    fn eval(&self, t: f64) -> Point;

    /// The first point, [`Point::INFINITY`] when the domain starts at `-∞`.
    fn start(&self) -> Point {
        self.eval(self.domain().t0)
    }

    /// The last point, [`Point::INFINITY`] when the domain ends at `+∞`.
    fn end(&self) -> Point {
        self.eval(self.domain().t1)
    }

    /// The parameter of a point on the curve, or `None` if the point is not
    /// on the curve (within [`ACCURACY`]).
    fn position(&self, p: Point) -> Option<f64>;

    /// The parameter of the curve point nearest to `p`.
    fn project(&self, p: Point) -> f64;

    /// Distance from `p` to the nearest curve point.
    fn distance(&self, p: Point) -> f64 {
        self.eval(self.project(p)).distance(p)
    }

    /// Is `p` on the curve, within [`ACCURACY`]?
    fn contains(&self, p: Point) -> bool {
        self.distance(p) < ACCURACY
    }

    /// Are both the domain and the image finite?
    fn is_bounded(&self) -> bool;

    /// Does the last point join the first one?
    ///
    /// Sub-curve extraction wraps through the joint on closed curves.
    fn is_closed(&self) -> bool {
        false
    }

    /// Parameters of non-smooth or terminal points: polyline vertices,
    /// arc endpoints.
    fn singular_params(&self) -> SmallVec<[f64; 4]> {
        let d = self.domain();
        let mut params = SmallVec::new();
        if self.is_closed() {
            return params;
        }
        for t in [d.t0, d.t1] {
            if t.is_finite() {
                params.push(t);
            }
        }
        params
    }

    /// Is `t` one of the [singular parameters](ParamCurve::singular_params)?
    fn is_singular(&self, t: f64) -> bool {
        self.singular_params()
            .iter()
            .any(|s| (s - t).abs() < ACCURACY)
    }

    /// The smallest axis-aligned rectangle containing the curve; bounds are
    /// infinite for unbounded curves.
    fn bounding_box(&self) -> Rect;

    /// Parameters, sorted and inside the domain, where the curve meets the
    /// support line of `line`.
    ///
    /// A curve lying along the line reports no crossing.
    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]>;

    /// The part of the curve between `t0` and `t1`.
    ///
    /// When `t1 < t0`, closed curves wrap through their closing point and
    /// open curves return `None`.
    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve>;

    /// The same image traversed in the opposite direction.
    #[must_use]
    fn reversed(&self) -> Self
    where
        Self: Sized;

    /// Sample `n + 1` points at evenly spaced parameters.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnboundedShape`] for unbounded curves and
    /// [`GeomError::DegenerateInput`] when `n` is zero.
    fn to_polyline(&self, n: usize) -> Result<Vec<Point>> {
        if n == 0 {
            return Err(GeomError::DegenerateInput("polyline needs at least one segment"));
        }
        if !self.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        let d = self.domain();
        let step = d.length() / n as f64;
        Ok((0..=n)
            .map(|i| {
                let t = if i == n { d.t1 } else { d.t0 + i as f64 * step };
                self.eval(t)
            })
            .collect())
    }

    /// Append the curve to `path`: a `MoveTo` to the first point, then
    /// segments in parameter order. Curved parts are approximated to
    /// `tolerance` where they are not represented exactly.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnboundedShape`] for unbounded curves.
    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()>;

    /// Clip the curve against a rectangle.
    fn clip(&self, rect: &Rect) -> CurveSet
    where
        Self: Clone + Into<Curve>,
    {
        clip_curve(&self.clone().into(), rect)
    }
}

/// A curve with a well defined tangent everywhere in its domain.
pub trait ParamCurveDeriv: ParamCurve {
    /// The derivative with respect to the parameter at `t`.
    fn tangent(&self, t: f64) -> Vec2;
}

/// A curve that separates the plane into an inside, on its left, and an
/// outside.
///
/// A counter-clockwise closed boundary therefore has its interior inside.
pub trait OrientedCurve: ParamCurve {
    /// Distance to the curve, negative for points inside.
    fn signed_distance(&self, p: Point) -> f64;

    /// The signed angle the curve sweeps as seen from `p`.
    ///
    /// A closed counter-clockwise boundary sweeps `2π` around points it
    /// encloses and `0` around points outside.
    fn winding_angle(&self, p: Point) -> f64;

    /// Is `p` on the inside of the curve?
    fn is_inside(&self, p: Point) -> bool {
        self.signed_distance(p) < 0.0
    }
}

/// Signed distance of a smooth curve: the distance to the nearest point,
/// negated when `p` is left of the tangent there.
pub(crate) fn tangent_signed_distance<C: ParamCurveDeriv>(curve: &C, p: Point) -> f64 {
    let t = curve.project(p);
    let q = curve.eval(t);
    let dist = q.distance(p);
    if curve.tangent(t).cross(p - q) > 0.0 {
        -dist
    } else {
        dist
    }
}

/// Parameter in `[t0, t1]` of the point nearest to `p`.
///
/// The range is sampled `samples` times, then the best bracket is refined
/// by bisection on the derivative of the squared distance.
pub(crate) fn nearest_param<C: ParamCurveDeriv>(curve: &C, p: Point, t0: f64, t1: f64, samples: usize) -> f64 {
    let n = samples.max(2);
    let step = (t1 - t0) / n as f64;
    let param = |i: usize| if i == n { t1 } else { t0 + i as f64 * step };
    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for i in 0..=n {
        let d = curve.eval(param(i)).distance_squared(p);
        if d < best_d {
            best = i;
            best_d = d;
        }
    }
    let slope = |t: f64| (curve.eval(t) - p).dot(curve.tangent(t));
    let mut t_best = param(best);
    for (lo, hi) in [(best.saturating_sub(1), best), (best, (best + 1).min(n))] {
        if lo == hi {
            continue;
        }
        let (mut a, mut b) = (param(lo), param(hi));
        if !(slope(a) < 0.0 && slope(b) > 0.0) {
            continue;
        }
        for _ in 0..64 {
            let m = 0.5 * (a + b);
            if m <= a || m >= b {
                break;
            }
            if slope(m) < 0.0 {
                a = m;
            } else {
                b = m;
            }
        }
        let t = 0.5 * (a + b);
        let d = curve.eval(t).distance_squared(p);
        if d < best_d {
            best_d = d;
            t_best = t;
        }
    }
    t_best
}

/// Winding angle of a convex arc seen from `p`.
///
/// `v0` and `v1` point from `p` toward the two ends of the arc, or along
/// the asymptotic direction for an end at infinity. `enclosed` tells
/// whether `p` lies in the region bounded by the arc and its chord, and
/// `turns_left` whether the arc bends counter-clockwise.
pub(crate) fn convex_arc_winding(v0: Vec2, v1: Vec2, enclosed: bool, turns_left: bool) -> f64 {
    let chord = v0.signed_angle_to(v1);
    match (enclosed, turns_left) {
        (false, _) => chord,
        (true, true) => {
            if chord > 0.0 {
                chord
            } else {
                chord + TAU
            }
        }
        (true, false) => {
            if chord < 0.0 {
                chord
            } else {
                chord - TAU
            }
        }
    }
}

/// Is `p` on the same side of the chord from `a` to `b` as `witness`?
///
/// An infinite end is replaced by a ray along `dir` from the other end.
pub(crate) fn same_side_of_chord(a: Point, b: Point, dir: Vec2, witness: Point, p: Point) -> bool {
    let (origin, along) = match (a.is_finite(), b.is_finite()) {
        (true, true) => (a, b - a),
        (true, false) => (a, dir),
        (false, true) => (b, dir),
        (false, false) => return true,
    };
    let s_w = along.cross(witness - origin);
    let s_p = along.cross(p - origin);
    s_w * s_p > 0.0
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::convex_arc_winding;
    use crate::Vec2;

    #[test]
    fn chord_winding_corrections() {
        // Upper half of the unit circle seen from inside the cap.
        let v0 = Vec2::new(1.0, -0.5);
        let v1 = Vec2::new(-1.0, -0.5);
        let w = convex_arc_winding(v0, v1, true, true);
        assert!(w > PI && w < TAU, "{w}");
        assert!((w - (v0.signed_angle_to(v1) + TAU)).abs() < 1e-15);
        let w = convex_arc_winding(v1, v0, true, false);
        assert!(w < -PI && w > -TAU, "{w}");
        // Outside the cap only the chord angle remains.
        let w = convex_arc_winding(Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0), false, true);
        assert!((w - FRAC_PI_2).abs() < 1e-15);
    }
}
