// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing paths, the export target for bounded curves.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;
use core::iter::Copied;
use core::ops::Mul;
use core::slice;

use crate::{Affine, Point, Rect};

/// A sequence of drawing commands made of lines and Bézier segments, possibly
/// with several subpaths.
#[derive(Clone, Default, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BezPath(Vec<PathEl>);

/// The element of a drawing path.
///
/// A valid path has `MoveTo` at the beginning of each subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PathEl {
    /// Move directly to the point without drawing anything, starting a new
    /// subpath.
    MoveTo(Point),
    /// Draw a line from the current location to the point.
    LineTo(Point),
    /// Draw a quadratic bezier using the current location and the two points.
    QuadTo(Point, Point),
    /// Draw a cubic bezier using the current location and the three points.
    CurveTo(Point, Point, Point),
    /// Close off the path.
    ClosePath,
}

impl PathEl {
    /// The point where the element ends, `None` for `ClosePath`.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => Some(*p),
            PathEl::QuadTo(_, p2) => Some(*p2),
            PathEl::CurveTo(_, _, p3) => Some(*p3),
            PathEl::ClosePath => None,
        }
    }
}

impl BezPath {
    /// Create a new path.
    pub fn new() -> BezPath {
        BezPath::default()
    }

    /// Create a path from a vector of path elements.
    pub fn from_vec(v: Vec<PathEl>) -> BezPath {
        BezPath(v)
    }

    /// Push a generic path element onto the path.
    pub fn push(&mut self, el: PathEl) {
        self.0.push(el);
    }

    /// Push a "move to" element onto the path.
    pub fn move_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::MoveTo(p.into()));
    }

    /// Push a "line to" element onto the path.
    pub fn line_to<P: Into<Point>>(&mut self, p: P) {
        self.push(PathEl::LineTo(p.into()));
    }

    /// Push a "quad to" element onto the path.
    pub fn quad_to<P: Into<Point>>(&mut self, p1: P, p2: P) {
        self.push(PathEl::QuadTo(p1.into(), p2.into()));
    }

    /// Push a "curve to" element onto the path.
    pub fn curve_to<P: Into<Point>>(&mut self, p1: P, p2: P, p3: P) {
        self.push(PathEl::CurveTo(p1.into(), p2.into(), p3.into()));
    }

    /// Push a "close path" element onto the path.
    pub fn close_path(&mut self) {
        self.push(PathEl::ClosePath);
    }

    /// Continue drawing from `p`.
    ///
    /// Starts a new subpath unless the open subpath already ends at `p`,
    /// so that consecutive pieces of a composite curve form one subpath.
    pub(crate) fn start_at(&mut self, p: Point) {
        match self.0.last().and_then(PathEl::end_point) {
            Some(current) if current.almost_equals(p) => {}
            _ => self.move_to(p),
        }
    }

    /// Get the path elements.
    pub fn elements(&self) -> &[PathEl] {
        &self.0
    }

    /// Returns an iterator over the path's elements.
    pub fn iter(&self) -> impl Iterator<Item = PathEl> + Clone + '_ {
        self.0.iter().copied()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path contains no segments.
    pub fn is_empty(&self) -> bool {
        !self
            .0
            .iter()
            .any(|el| matches!(el, PathEl::LineTo(..) | PathEl::QuadTo(..) | PathEl::CurveTo(..)))
    }

    /// Apply an affine transform to the path.
    pub fn apply_affine(&mut self, affine: Affine) {
        for el in self.0.iter_mut() {
            *el = affine * (*el);
        }
    }

    /// The bounding box of every point in the path, control points included.
    pub fn control_box(&self) -> Rect {
        self.0.iter().fold(Rect::EMPTY, |acc, el| match *el {
            PathEl::MoveTo(p) | PathEl::LineTo(p) => acc.union_pt(p),
            PathEl::QuadTo(p1, p2) => acc.union_pt(p1).union_pt(p2),
            PathEl::CurveTo(p1, p2, p3) => acc.union_pt(p1).union_pt(p2).union_pt(p3),
            PathEl::ClosePath => acc,
        })
    }

    /// Convert the path to an SVG path string representation.
    pub fn to_svg(&self) -> String {
        let mut buffer = String::new();
        for (i, el) in self.0.iter().enumerate() {
            if i > 0 {
                buffer.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *el {
                PathEl::MoveTo(p) => write!(buffer, "M{},{}", p.x, p.y),
                PathEl::LineTo(p) => write!(buffer, "L{},{}", p.x, p.y),
                PathEl::QuadTo(p1, p2) => write!(buffer, "Q{},{} {},{}", p1.x, p1.y, p2.x, p2.y),
                PathEl::CurveTo(p1, p2, p3) => write!(
                    buffer,
                    "C{},{} {},{} {},{}",
                    p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
                ),
                PathEl::ClosePath => write!(buffer, "Z"),
            };
        }
        buffer
    }
}

impl<'a> IntoIterator for &'a BezPath {
    type Item = PathEl;
    type IntoIter = Copied<slice::Iter<'a, PathEl>>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements().iter().copied()
    }
}

impl Extend<PathEl> for BezPath {
    fn extend<I: IntoIterator<Item = PathEl>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<PathEl> for BezPath {
    fn from_iter<T: IntoIterator<Item = PathEl>>(iter: T) -> Self {
        BezPath(iter.into_iter().collect())
    }
}

impl Mul<PathEl> for Affine {
    type Output = PathEl;

    fn mul(self, other: PathEl) -> PathEl {
        match other {
            PathEl::MoveTo(p) => PathEl::MoveTo(self * p),
            PathEl::LineTo(p) => PathEl::LineTo(self * p),
            PathEl::QuadTo(p1, p2) => PathEl::QuadTo(self * p1, self * p2),
            PathEl::CurveTo(p1, p2, p3) => PathEl::CurveTo(self * p1, self * p2, self * p3),
            PathEl::ClosePath => PathEl::ClosePath,
        }
    }
}

impl Mul<BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: BezPath) -> BezPath {
        other.iter().map(|el| self * el).collect()
    }
}

impl Mul<&BezPath> for Affine {
    type Output = BezPath;

    fn mul(self, other: &BezPath) -> BezPath {
        other.iter().map(|el| self * el).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Affine, BezPath, PathEl, Point, Rect};

    #[test]
    fn start_at_joins_subpaths() {
        let mut path = BezPath::new();
        path.start_at(Point::new(0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.start_at(Point::new(1.0, 0.0));
        path.line_to((1.0, 1.0));
        path.start_at(Point::new(5.0, 5.0));
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(1.0, 0.0)),
                PathEl::LineTo(Point::new(1.0, 1.0)),
                PathEl::MoveTo(Point::new(5.0, 5.0)),
            ]
        );
        path.close_path();
        path.start_at(Point::new(5.0, 5.0));
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn empty_paths() {
        let mut path = BezPath::new();
        assert!(path.is_empty());
        path.move_to((1.0, 1.0));
        assert!(path.is_empty());
        path.quad_to((2.0, 2.0), (3.0, 1.0));
        assert!(!path.is_empty());
        assert_eq!(path.control_box(), Rect::new(1.0, 1.0, 3.0, 2.0));
    }

    #[test]
    fn transform_and_svg() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((1.0, 0.0));
        path.curve_to((1.0, 1.0), (0.0, 1.0), (0.0, 0.0));
        path.close_path();
        let moved = Affine::translate((1.0, 2.0)) * &path;
        assert_eq!(moved.elements()[1], PathEl::LineTo(Point::new(2.0, 2.0)));
        assert_eq!(path.to_svg(), "M0,0 L1,0 C1,1 0,1 0,0 Z");
    }
}
