// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Domains bounded by an oriented curve.

use core::ops::Mul;

use crate::param_curve::{OrientedCurve, ParamCurve};
use crate::{Affine, Curve, CurveSet, Point, Rect};

/// The part of the plane on the left of an oriented boundary.
///
/// A counter-clockwise closed boundary bounds its interior; a clockwise
/// one bounds the outside. Open unbounded boundaries, such as a line or a
/// parabola, give half-planes and other unbounded domains.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    boundary: Curve,
}

impl Region {
    /// The region on the left of `boundary`.
    #[inline]
    pub fn new(boundary: impl Into<Curve>) -> Region {
        Region {
            boundary: boundary.into(),
        }
    }

    /// The oriented boundary.
    #[inline]
    pub fn boundary(&self) -> &Curve {
        &self.boundary
    }

    /// Is `p` in the region or on its boundary?
    pub fn contains(&self, p: Point) -> bool {
        self.boundary.is_inside(p) || self.boundary.contains(p)
    }

    /// Signed distance to the boundary, negative inside.
    #[inline]
    pub fn signed_distance(&self, p: Point) -> f64 {
        self.boundary.signed_distance(p)
    }

    /// The closure of the rest of the plane.
    #[must_use]
    pub fn complement(&self) -> Region {
        Region {
            boundary: self.boundary.reversed(),
        }
    }

    /// The image under `transform`.
    ///
    /// Transforms that reverse orientation also reverse the boundary, so
    /// the image of the inside stays on the left.
    #[must_use]
    pub fn transform(&self, transform: &Affine) -> Region {
        let boundary = self.boundary.transform(transform);
        if transform.is_direct() {
            Region { boundary }
        } else {
            Region {
                boundary: boundary.reversed(),
            }
        }
    }

    /// Does the region fit in a rectangle?
    pub fn is_bounded(&self) -> bool {
        if !self.boundary.is_bounded() || !self.boundary.is_closed() {
            return false;
        }
        let bbox = self.boundary.bounding_box();
        let outside = Point::new(bbox.x1 + bbox.width().max(1.0), bbox.y1 + bbox.height().max(1.0));
        !self.boundary.is_inside(outside)
    }

    /// The bounding box of the region, infinite when it is unbounded.
    pub fn bounding_box(&self) -> Rect {
        if self.is_bounded() {
            self.boundary.bounding_box()
        } else {
            Rect::INFINITE
        }
    }

    /// The parts of the boundary inside `rect`.
    pub fn clip_boundary(&self, rect: &Rect) -> CurveSet {
        self.boundary.clip(rect)
    }
}

impl Mul<Region> for Affine {
    type Output = Region;

    #[inline]
    fn mul(self, region: Region) -> Region {
        region.transform(&self)
    }
}

#[cfg(test)]
mod tests {
    use crate::param_curve::ParamCurve;
    use crate::{Affine, Circle, Line, Parabola, Point, Polygon, Rect, Region};

    #[test]
    fn disc() {
        let disc = Region::new(Circle::new((0.0, 0.0), 2.0));
        assert!(disc.contains(Point::ORIGIN));
        assert!(disc.contains(Point::new(2.0, 0.0)));
        assert!(!disc.contains(Point::new(3.0, 0.0)));
        assert!(disc.is_bounded());
        assert_eq!(disc.bounding_box(), Rect::new(-2.0, -2.0, 2.0, 2.0));
        assert!(disc.signed_distance(Point::ORIGIN) < 0.0);
        let outside = disc.complement();
        assert!(!outside.contains(Point::ORIGIN));
        assert!(outside.contains(Point::new(3.0, 0.0)));
        assert!(outside.contains(Point::new(0.0, 2.0)));
        assert!(!outside.is_bounded());
        assert_eq!(outside.bounding_box(), Rect::INFINITE);
    }

    #[test]
    fn half_planes() {
        let upper = Region::new(Line::through((0.0, 0.0), (1.0, 0.0)).unwrap());
        assert!(upper.contains(Point::new(5.0, 1.0)));
        assert!(!upper.contains(Point::new(5.0, -1.0)));
        assert!(!upper.is_bounded());
        let cup = Region::new(Parabola::new((0.0, 0.0), 1.0, 0.0));
        assert!(cup.contains(Point::new(0.0, 1.0)));
        assert!(!cup.contains(Point::new(2.0, 1.0)));
    }

    #[test]
    fn mirrored_region_keeps_inside() {
        let poly = Polygon::new(vec![
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 2.0),
        ])
        .unwrap();
        let region = Region::new(poly.boundary());
        assert!(region.contains(Point::new(2.5, 1.2)));
        let mirrored = Affine::FLIP_Y * region;
        assert!(mirrored.contains(Point::new(2.5, -1.2)));
        assert!(!mirrored.contains(Point::new(2.5, 1.2)));
        assert!(mirrored.is_bounded());
        let clipped = mirrored.clip_boundary(&Rect::new(0.0, -1.5, 4.0, 0.0));
        // The kept arcs join through the closing vertex into one chain.
        assert_eq!(clipped.len(), 1);
        let chain = clipped.iter().next().unwrap();
        assert!(chain.start().almost_equals(Point::new(3.0, -1.5)));
        assert!(chain.end().almost_equals(Point::new(2.0, -1.5)));
    }
}
