// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of curve types.

use alloc::vec::Vec;
use core::ops::Mul;

use smallvec::SmallVec;

use crate::param_curve::{OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::{
    Affine, Arc, BezPath, Circle, Ellipse, HyperbolaBranch, Interval, Line, Parabola, Point,
    PolyCurve, Rect, Result, Vec2,
};

/// Any curve of this crate.
///
/// Sub-curves, clip results and poly-curve pieces are `Curve`s, so the
/// sum type is the currency between operations.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    /// A line, ray, inverted ray or segment.
    Linear(Line),
    /// A whole circle.
    Circle(Circle),
    /// A whole ellipse.
    Ellipse(Ellipse),
    /// An elliptic or circular arc.
    Arc(Arc),
    /// A parabola or parabola arc.
    Parabola(Parabola),
    /// A hyperbola branch or arc of one.
    Hyperbola(HyperbolaBranch),
    /// A composite curve.
    Poly(PolyCurve),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Curve::Linear($c) => $body,
            Curve::Circle($c) => $body,
            Curve::Ellipse($c) => $body,
            Curve::Arc($c) => $body,
            Curve::Parabola($c) => $body,
            Curve::Hyperbola($c) => $body,
            Curve::Poly($c) => $body,
        }
    };
}

impl Curve {
    /// The image of the curve under `transform`.
    ///
    /// Circles stay circles under similarities and become ellipses
    /// otherwise.
    pub fn transform(&self, transform: &Affine) -> Curve {
        let t = *transform;
        match self {
            Curve::Linear(l) => Curve::Linear(t * *l),
            Curve::Circle(c) => {
                let e = t * *c;
                if e.is_circle() {
                    Curve::Circle(Circle::new(e.center, e.radii.x).with_direct(e.direct))
                } else {
                    Curve::Ellipse(e)
                }
            }
            Curve::Ellipse(e) => Curve::Ellipse(t * *e),
            Curve::Arc(a) => Curve::Arc(t * *a),
            Curve::Parabola(p) => Curve::Parabola(t * *p),
            Curve::Hyperbola(h) => Curve::Hyperbola(t * *h),
            Curve::Poly(p) => Curve::Poly(p.transform(transform)),
        }
    }

    /// The composite, if this is one.
    #[inline]
    pub fn as_poly(&self) -> Option<&PolyCurve> {
        match self {
            Curve::Poly(p) => Some(p),
            _ => None,
        }
    }
}

impl ParamCurve for Curve {
    fn domain(&self) -> Interval {
        dispatch!(self, c => c.domain())
    }

    fn eval(&self, t: f64) -> Point {
        dispatch!(self, c => c.eval(t))
    }

    fn start(&self) -> Point {
        dispatch!(self, c => c.start())
    }

    fn end(&self) -> Point {
        dispatch!(self, c => c.end())
    }

    fn position(&self, p: Point) -> Option<f64> {
        dispatch!(self, c => c.position(p))
    }

    fn project(&self, p: Point) -> f64 {
        dispatch!(self, c => c.project(p))
    }

    fn distance(&self, p: Point) -> f64 {
        dispatch!(self, c => c.distance(p))
    }

    fn contains(&self, p: Point) -> bool {
        dispatch!(self, c => c.contains(p))
    }

    fn is_bounded(&self) -> bool {
        dispatch!(self, c => c.is_bounded())
    }

    fn is_closed(&self) -> bool {
        dispatch!(self, c => c.is_closed())
    }

    fn singular_params(&self) -> SmallVec<[f64; 4]> {
        dispatch!(self, c => c.singular_params())
    }

    fn bounding_box(&self) -> Rect {
        dispatch!(self, c => c.bounding_box())
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        dispatch!(self, c => c.line_crossings(line))
    }

    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        dispatch!(self, c => c.subcurve(t0, t1))
    }

    fn reversed(&self) -> Curve {
        dispatch!(self, c => c.reversed().into())
    }

    fn to_polyline(&self, n: usize) -> Result<Vec<Point>> {
        dispatch!(self, c => c.to_polyline(n))
    }

    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        dispatch!(self, c => c.append_to(path, tolerance))
    }
}

impl ParamCurveDeriv for Curve {
    /// The derivative of the owning piece for composites.
    fn tangent(&self, t: f64) -> Vec2 {
        dispatch!(self, c => c.tangent(t))
    }
}

impl OrientedCurve for Curve {
    fn signed_distance(&self, p: Point) -> f64 {
        dispatch!(self, c => c.signed_distance(p))
    }

    fn winding_angle(&self, p: Point) -> f64 {
        dispatch!(self, c => c.winding_angle(p))
    }

    fn is_inside(&self, p: Point) -> bool {
        dispatch!(self, c => c.is_inside(p))
    }
}

impl Mul<Curve> for Affine {
    type Output = Curve;

    #[inline]
    fn mul(self, curve: Curve) -> Curve {
        curve.transform(&self)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),*) => {
        $(
            impl From<$ty> for Curve {
                #[inline]
                fn from(c: $ty) -> Curve {
                    Curve::$variant(c)
                }
            }
        )*
    };
}

impl_from!(
    Line => Linear,
    Circle => Circle,
    Ellipse => Ellipse,
    Arc => Arc,
    Parabola => Parabola,
    HyperbolaBranch => Hyperbola,
    PolyCurve => Poly
);

#[cfg(test)]
mod tests {
    use core::f64::consts::FRAC_PI_2;

    use crate::param_curve::{OrientedCurve, ParamCurve, ParamCurveDeriv};
    use crate::{Affine, Arc, Circle, Curve, Ellipse, Line, Point, PolyCurve, Vec2};

    #[test]
    fn dispatches_to_payload() {
        let circle = Circle::new((0.0, 0.0), 2.0);
        let curve = Curve::from(circle);
        assert_eq!(curve.eval(FRAC_PI_2), circle.eval(FRAC_PI_2));
        assert_eq!(curve.domain(), circle.domain());
        assert!(curve.is_closed());
        assert!(curve.is_inside(Point::ORIGIN));
        assert_eq!(curve.reversed(), Curve::Circle(circle.reversed()));
        let seg: Curve = Line::segment((0.0, 0.0), (2.0, 0.0)).into();
        assert_eq!(seg.tangent(0.3), Vec2::new(2.0, 0.0));
        assert!(seg.as_poly().is_none());
    }

    #[test]
    fn circle_images() {
        let circle = Curve::from(Circle::new((1.0, 1.0), 1.0));
        let Curve::Circle(moved) = circle.transform(&Affine::rotate(0.5).then_scale(2.0)) else {
            panic!("similarity image should stay a circle");
        };
        assert!((moved.radius - 2.0).abs() < 1e-12);
        let mirrored = Affine::FLIP_Y * circle.clone();
        let Curve::Circle(mirrored) = mirrored else {
            panic!("reflection image should stay a circle");
        };
        assert!(!mirrored.direct);
        assert!(matches!(
            circle.transform(&Affine::scale_non_uniform(2.0, 1.0)),
            Curve::Ellipse(_)
        ));
    }

    #[test]
    fn composite_variant() {
        let poly = PolyCurve::from_points(&[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(1.0, 1.0)], false)
            .unwrap();
        let curve = Curve::from(poly.clone());
        assert_eq!(curve.as_poly(), Some(&poly));
        assert_eq!(curve.end(), Point::new(1.0, 1.0));
        let arc = Curve::from(Arc::circular((0.0, 0.0), 1.0, 0.0, FRAC_PI_2));
        assert!(arc.contains(Point::new(0.0, 1.0)));
        let e = Curve::from(Ellipse::new((0.0, 0.0), (2.0, 1.0), 0.0));
        assert!(e.bounding_box().contains(Point::new(2.0, 0.0)));
    }
}
