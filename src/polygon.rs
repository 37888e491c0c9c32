// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simple polygons given by their vertex ring.

use alloc::vec::Vec;
use core::f64::consts::PI;
use core::ops::Mul;

use crate::param_curve::ParamCurve;
use crate::tolerance::ACCURACY;
use crate::{Affine, CurveSet, GeomError, Line, Point, PolyCurve, Rect, Region, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A closed polygon.
///
/// The ring is implicitly closed: the last vertex joins the first one.
/// Counter-clockwise polygons have positive [signed area] and their
/// interior on the left of each edge.
///
/// [signed area]: Polygon::signed_area
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Point>", into = "Vec<Point>"))]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl Polygon {
    /// A polygon from its vertices.
    ///
    /// A repeated closing vertex is dropped.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] with fewer than three distinct
    /// vertices.
    pub fn new(vertices: impl Into<Vec<Point>>) -> Result<Polygon> {
        let mut vertices = vertices.into();
        if vertices.len() > 1 && vertices[0].almost_equals(vertices[vertices.len() - 1]) {
            vertices.pop();
        }
        if vertices.len() < 3 {
            return Err(GeomError::DegenerateInput("polygon needs three vertices"));
        }
        Ok(Polygon { vertices })
    }

    /// The counter-clockwise outline of a bounded rectangle.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnboundedShape`] if any bound is infinite.
    pub fn from_rect(rect: Rect) -> Result<Polygon> {
        if !rect.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        Polygon::new(rect.corners().to_vec())
    }

    /// The vertices, in order.
    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The edges as segments, the closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = Line> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Line::segment(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Shoelace area, positive for counter-clockwise polygons.
    pub fn signed_area(&self) -> f64 {
        let origin = self.vertices[0];
        let sum: f64 = self
            .vertices
            .windows(2)
            .map(|w| (w[0] - origin).cross(w[1] - origin))
            .sum();
        0.5 * sum
    }

    /// The enclosed area.
    #[inline]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// The centroid of the enclosed area.
    ///
    /// Falls back to the vertex average for polygons of zero area.
    pub fn centroid(&self) -> Point {
        let origin = self.vertices[0];
        let mut area = 0.0;
        let mut acc = Vec2::ZERO;
        for w in self.vertices.windows(2) {
            let (a, b) = (w[0] - origin, w[1] - origin);
            let cross = a.cross(b);
            area += cross;
            acc += (a + b) * cross;
        }
        if area.abs() < ACCURACY {
            return Point::centroid(&self.vertices).unwrap_or(origin);
        }
        origin + acc / (3.0 * area)
    }

    /// The sum of the angles subtended by the edges, `±2π` inside and
    /// `0` outside.
    pub fn winding_angle(&self, p: Point) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                let a = self.vertices[i] - p;
                let b = self.vertices[(i + 1) % n] - p;
                a.signed_angle_to(b)
            })
            .sum()
    }

    /// Is `p` strictly enclosed, whatever the orientation?
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.winding_angle(p).abs() > PI
    }

    /// Is `p` on an edge?
    pub fn on_boundary(&self, p: Point) -> bool {
        self.edges().any(|e| e.contains(p))
    }

    /// The same ring traversed backwards, keeping the first vertex.
    #[must_use]
    pub fn reversed(&self) -> Polygon {
        let mut vertices = Vec::with_capacity(self.vertices.len());
        vertices.push(self.vertices[0]);
        vertices.extend(self.vertices[1..].iter().rev());
        Polygon { vertices }
    }

    /// The boundary as a closed polyline.
    pub fn boundary(&self) -> PolyCurve {
        PolyCurve::polyline(&self.vertices, true)
    }

    /// The bounding box of the vertices.
    pub fn bounding_box(&self) -> Rect {
        self.vertices.iter().fold(Rect::EMPTY, |r, &p| r.union_pt(p))
    }

    /// The image under `transform`.
    ///
    /// The ring is reversed by transforms that reverse orientation, so the
    /// sign of the area is kept.
    #[must_use]
    pub fn transform(&self, transform: &Affine) -> Polygon {
        let image = Polygon {
            vertices: transform.transform_points(&self.vertices),
        };
        if transform.is_direct() {
            image
        } else {
            image.reversed()
        }
    }

    /// The closure of the outside, bounded by the ring run clockwise.
    pub fn complement(&self) -> Region {
        let ring = if self.signed_area() < 0.0 {
            self.boundary()
        } else {
            self.reversed().boundary()
        };
        Region::new(ring)
    }

    /// The parts of the boundary inside `rect`.
    pub fn clip_boundary(&self, rect: &Rect) -> CurveSet {
        self.boundary().clip(rect)
    }
}

impl Mul<Polygon> for Affine {
    type Output = Polygon;

    #[inline]
    fn mul(self, polygon: Polygon) -> Polygon {
        polygon.transform(&self)
    }
}

impl TryFrom<Vec<Point>> for Polygon {
    type Error = GeomError;

    fn try_from(vertices: Vec<Point>) -> Result<Polygon> {
        Polygon::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Vec<Point> {
        polygon.vertices
    }
}
