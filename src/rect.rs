// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned boxes, possibly unbounded.

use core::ops::Mul;

use smallvec::SmallVec;

use crate::tolerance::ACCURACY;
use crate::{Affine, Line, Point, Vec2};

/// An axis-aligned rectangle, used as clipping window and bounding box.
///
/// Any bound may be infinite, so a `Rect` can describe a half-plane, a
/// strip or the whole plane. A rectangle with `x0 > x1` or `y0 > y1` is
/// empty; [`Rect::EMPTY`] is the canonical empty value and the identity
/// for [`Rect::union`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The minimum x coordinate.
    pub x0: f64,
    /// The minimum y coordinate.
    pub y0: f64,
    /// The maximum x coordinate.
    pub x1: f64,
    /// The maximum y coordinate.
    pub y1: f64,
}

impl Rect {
    /// The empty set.
    pub const EMPTY: Rect = Rect::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);

    /// The whole plane.
    pub const INFINITE: Rect = Rect::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::INFINITY);

    /// A new rectangle from minimum and maximum coordinates.
    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect { x0, y0, x1, y1 }
    }

    /// A new rectangle from the bounds in `(xmin, xmax, ymin, ymax)` order.
    #[inline]
    pub const fn from_bounds(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Rect {
        Rect::new(xmin, ymin, xmax, ymax)
    }

    /// A new rectangle from two points.
    ///
    /// The result will have non-negative width and height.
    #[inline]
    pub fn from_points(p0: impl Into<Point>, p1: impl Into<Point>) -> Rect {
        let p0 = p0.into();
        let p1 = p1.into();
        Rect::new(p0.x.min(p1.x), p0.y.min(p1.y), p0.x.max(p1.x), p0.y.max(p1.y))
    }

    /// The width of the rectangle, infinite for unbounded rectangles.
    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// The height of the rectangle, infinite for unbounded rectangles.
    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// The center point of the rectangle.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Is the rectangle empty?
    ///
    /// NaN bounds also produce an empty rectangle.
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.x0 <= self.x1 && self.y0 <= self.y1)
    }

    /// Are all four bounds finite?
    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.x0.is_finite() && self.x1.is_finite() && self.y0.is_finite() && self.y1.is_finite()
    }

    /// Returns `true` if `p` is inside the rectangle or on its boundary,
    /// with [`ACCURACY`] slack.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x0 - ACCURACY
            && p.x <= self.x1 + ACCURACY
            && p.y >= self.y0 - ACCURACY
            && p.y <= self.y1 + ACCURACY
    }

    /// The smallest rectangle enclosing two rectangles.
    #[inline]
    pub fn union(&self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.x0.min(other.x0),
            self.y0.min(other.y0),
            self.x1.max(other.x1),
            self.y1.max(other.y1),
        )
    }

    /// The smallest rectangle enclosing the rectangle and a point.
    ///
    /// Infinite points stretch the bounds to infinity.
    pub fn union_pt(&self, pt: Point) -> Rect {
        self.union(Rect::new(pt.x, pt.y, pt.x, pt.y))
    }

    /// The intersection of two rectangles, [`Rect::EMPTY`] if they do not
    /// overlap.
    #[inline]
    pub fn intersect(&self, other: Rect) -> Rect {
        let r = Rect::new(
            self.x0.max(other.x0),
            self.y0.max(other.y0),
            self.x1.min(other.x1),
            self.y1.min(other.y1),
        );
        if r.is_empty() {
            Rect::EMPTY
        } else {
            r
        }
    }

    /// The support lines of the finite sides.
    ///
    /// Vertical sides point up and horizontal sides point right. An
    /// unbounded side contributes no line, so the whole plane has none.
    pub fn boundary_lines(&self) -> SmallVec<[Line; 4]> {
        let mut lines = SmallVec::new();
        if self.is_empty() {
            return lines;
        }
        for x in [self.x0, self.x1] {
            if x.is_finite() {
                lines.push(Line::support(Point::new(x, 0.0), Vec2::new(0.0, 1.0)));
            }
        }
        for y in [self.y0, self.y1] {
            if y.is_finite() {
                lines.push(Line::support(Point::new(0.0, y), Vec2::new(1.0, 0.0)));
            }
        }
        lines
    }

    /// The sides as segments, counter-clockwise from the bottom one.
    ///
    /// Empty unless the rectangle is bounded.
    pub fn edges(&self) -> SmallVec<[Line; 4]> {
        if self.is_empty() || !self.is_bounded() {
            return SmallVec::new();
        }
        let c = self.corners();
        (0..4).map(|i| Line::segment(c[i], c[(i + 1) % 4])).collect()
    }

    /// The four corners in counter-clockwise order, starting at `(x0, y0)`.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x0, self.y0),
            Point::new(self.x1, self.y0),
            Point::new(self.x1, self.y1),
            Point::new(self.x0, self.y1),
        ]
    }
}

impl Default for Rect {
    fn default() -> Rect {
        Rect::EMPTY
    }
}

impl From<(Point, Point)> for Rect {
    fn from(points: (Point, Point)) -> Rect {
        Rect::from_points(points.0, points.1)
    }
}

/// The bounding box of a transformed rectangle.
impl Mul<Rect> for Affine {
    type Output = Rect;

    fn mul(self, rect: Rect) -> Rect {
        if rect.is_empty() {
            return Rect::EMPTY;
        }
        if !rect.is_bounded() {
            return if self.is_identity() { rect } else { Rect::INFINITE };
        }
        rect.corners()
            .iter()
            .fold(Rect::EMPTY, |acc, &p| acc.union_pt(self * p))
    }
}
