// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composite curves.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::param_curve::{OrientedCurve, ParamCurve, ParamCurveDeriv};
use crate::tolerance::{ACCURACY, PARAM_ACCURACY};
use crate::{Affine, BezPath, Curve, GeomError, Interval, Line, PathEl, Point, Rect, Result, Vec2};

/// A sequence of curves, each starting where the previous one ends.
///
/// # Parametrization
///
/// Piece `i` occupies `[2i, 2i + 1]` of the global domain `[0, 2n − 1]`.
/// Inside that unit span the parameter is mapped onto the piece's own
/// domain with [`Interval::from_unit`], so unbounded pieces are
/// addressable. The open gap `(2i + 1, 2i + 2)` is the joint between two
/// pieces and evaluates to their shared vertex.
///
/// Pieces may themselves be composites. Every lookup through nested
/// composites walks down iteratively.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "(Vec<Curve>, bool)", into = "(Vec<Curve>, bool)")
)]
pub struct PolyCurve {
    pieces: Vec<Curve>,
    closed: bool,
}

/// Pieces and closedness, checked as by [`PolyCurve::new`].
impl TryFrom<(Vec<Curve>, bool)> for PolyCurve {
    type Error = GeomError;

    fn try_from((pieces, closed): (Vec<Curve>, bool)) -> Result<PolyCurve> {
        PolyCurve::new(pieces, closed)
    }
}

impl From<PolyCurve> for (Vec<Curve>, bool) {
    fn from(poly: PolyCurve) -> (Vec<Curve>, bool) {
        (poly.pieces, poly.closed)
    }
}

/// A non-composite curve reached by walking down nested composites, with
/// the path of `(index, piece domain)` pairs taken from the top.
struct Leaf<'a> {
    curve: &'a Curve,
    path: SmallVec<[(usize, Interval); 4]>,
}

impl Leaf<'_> {
    /// Map a parameter of the leaf back to the top-level composite.
    fn lift(&self, t: f64) -> f64 {
        self.path
            .iter()
            .rev()
            .fold(t, |t, &(i, domain)| 2.0 * i as f64 + domain.to_unit(t))
    }
}

fn join_gap(end: Point, start: Point) -> Option<f64> {
    if end.is_finite() && end.almost_equals(start) {
        None
    } else if end.is_finite() && start.is_finite() {
        Some(end.distance(start))
    } else {
        Some(f64::INFINITY)
    }
}

impl PolyCurve {
    /// A composite of the given pieces.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] without pieces, and
    /// [`GeomError::Discontinuous`] if a piece does not start where the
    /// previous one ends, or, for a closed composite, if the last piece
    /// does not end where the first one starts.
    pub fn new(pieces: Vec<Curve>, closed: bool) -> Result<PolyCurve> {
        if pieces.is_empty() {
            return Err(GeomError::DegenerateInput("poly-curve needs at least one piece"));
        }
        for (index, pair) in pieces.windows(2).enumerate() {
            if let Some(gap) = join_gap(pair[0].end(), pair[1].start()) {
                return Err(GeomError::Discontinuous {
                    index: index + 1,
                    gap,
                });
            }
        }
        if closed {
            let (first, last) = (&pieces[0], &pieces[pieces.len() - 1]);
            if let Some(gap) = join_gap(last.end(), first.start()) {
                return Err(GeomError::Discontinuous {
                    index: pieces.len(),
                    gap,
                });
            }
        }
        Ok(PolyCurve { pieces, closed })
    }

    /// The polyline through `points`, closed by a final segment back to
    /// the first point when `closed` is set.
    ///
    /// # Errors
    ///
    /// [`GeomError::DegenerateInput`] with fewer than two points.
    pub fn from_points(points: &[Point], closed: bool) -> Result<PolyCurve> {
        if points.len() < 2 {
            return Err(GeomError::DegenerateInput("polyline needs two points"));
        }
        Ok(PolyCurve::polyline(points, closed))
    }

    /// [`PolyCurve::from_points`] for at least two points.
    pub(crate) fn polyline(points: &[Point], closed: bool) -> PolyCurve {
        let mut pieces: Vec<Curve> = points
            .windows(2)
            .map(|w| Curve::Linear(Line::segment(w[0], w[1])))
            .collect();
        if let (true, Some(&first), Some(&last)) = (closed, points.first(), points.last()) {
            if !first.almost_equals(last) {
                pieces.push(Curve::Linear(Line::segment(last, first)));
            }
        }
        PolyCurve { pieces, closed }
    }

    /// Append a piece.
    ///
    /// # Errors
    ///
    /// [`GeomError::Discontinuous`] if the piece does not start at the
    /// current end, and [`GeomError::DegenerateInput`] on a closed
    /// composite.
    pub fn push(&mut self, piece: impl Into<Curve>) -> Result<()> {
        if self.closed {
            return Err(GeomError::DegenerateInput("cannot extend a closed poly-curve"));
        }
        let piece = piece.into();
        if let Some(gap) = join_gap(self.end(), piece.start()) {
            return Err(GeomError::Discontinuous {
                index: self.pieces.len(),
                gap,
            });
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Mark the composite as closed, adding a closing segment if the ends
    /// do not meet.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnboundedShape`] if either end is at infinity.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        let (start, end) = (self.start(), self.end());
        if !start.is_finite() || !end.is_finite() {
            return Err(GeomError::UnboundedShape);
        }
        if !end.almost_equals(start) {
            self.pieces.push(Curve::Linear(Line::segment(end, start)));
        }
        self.closed = true;
        Ok(())
    }

    /// The pieces, in order.
    #[inline]
    pub fn pieces(&self) -> &[Curve] {
        &self.pieces
    }

    /// The piece at `index`.
    #[inline]
    pub fn piece(&self, index: usize) -> Option<&Curve> {
        self.pieces.get(index)
    }

    /// Number of top-level pieces.
    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Always `false`; composites hold at least one piece.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Index of the piece owning the global parameter `t`.
    pub fn curve_index(&self, t: f64) -> usize {
        let last = self.pieces.len().saturating_sub(1);
        if t.is_nan() || t <= 0.0 {
            return 0;
        }
        ((t / 2.0).floor() as usize).min(last)
    }

    /// The parameter, in its piece's own domain, of the global parameter
    /// `t`.
    pub fn local_position(&self, t: f64) -> f64 {
        let i = self.curve_index(t);
        let u = (t - 2.0 * i as f64).clamp(0.0, 1.0);
        self.pieces[i].domain().from_unit(u)
    }

    /// The global parameter of parameter `local` of piece `index`.
    pub fn global_position(&self, index: usize, local: f64) -> f64 {
        let index = index.min(self.pieces.len().saturating_sub(1));
        2.0 * index as f64 + self.pieces[index].domain().to_unit(local)
    }

    /// The non-composite piece and its local parameter at global `t`.
    fn leaf_at(&self, t: f64) -> (&Curve, f64) {
        let mut poly = self;
        let mut t = t;
        loop {
            let i = poly.curve_index(t);
            let piece = &poly.pieces[i];
            let local = piece.domain().from_unit((t - 2.0 * i as f64).clamp(0.0, 1.0));
            match piece {
                Curve::Poly(inner) => {
                    poly = inner;
                    t = local;
                }
                _ => return (piece, local),
            }
        }
    }

    /// Every non-composite piece, in traversal order.
    fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut leaves = Vec::new();
        let mut stack: Vec<(&PolyCurve, usize, SmallVec<[(usize, Interval); 4]>)> =
            alloc::vec![(self, 0, SmallVec::new())];
        while let Some((poly, i, path)) = stack.pop() {
            let Some(piece) = poly.pieces.get(i) else {
                continue;
            };
            stack.push((poly, i + 1, path.clone()));
            let mut child_path = path;
            child_path.push((i, piece.domain()));
            match piece {
                Curve::Poly(inner) => stack.push((inner, 0, child_path)),
                curve => leaves.push(Leaf {
                    curve,
                    path: child_path,
                }),
            }
        }
        leaves
    }

    /// The image under `transform`, piece by piece.
    pub fn transform(&self, transform: &Affine) -> PolyCurve {
        PolyCurve {
            pieces: self.pieces.iter().map(|c| c.transform(transform)).collect(),
            closed: self.closed,
        }
    }

    /// Move `t` out of a joint gap onto the start of the next piece.
    fn snap_start(&self, t: f64) -> f64 {
        let i = self.curve_index(t);
        if t > 2.0 * i as f64 + 1.0 - ACCURACY && i + 1 < self.pieces.len() {
            2.0 * (i + 1) as f64
        } else {
            t
        }
    }

    /// Move `t` out of a joint gap onto the end of the previous piece.
    fn snap_end(&self, t: f64) -> f64 {
        let i = self.curve_index(t);
        if i > 0 && t < 2.0 * i as f64 + ACCURACY {
            2.0 * i as f64 - 1.0
        } else {
            t.min(2.0 * i as f64 + 1.0)
        }
    }

    /// The vertex joining the piece owning `t` to a neighbor, if `t` is at
    /// one of its ends: `(incoming piece, outgoing piece)`.
    fn joint_at(&self, t: f64) -> Option<(usize, usize)> {
        let n = self.pieces.len();
        let i = self.curve_index(t);
        let u = t - 2.0 * i as f64;
        if u >= 1.0 - PARAM_ACCURACY {
            if i + 1 < n {
                return Some((i, i + 1));
            }
            if self.closed {
                return Some((i, 0));
            }
        } else if u <= PARAM_ACCURACY {
            if i > 0 {
                return Some((i - 1, i));
            }
            if self.closed {
                return Some((n - 1, 0));
            }
        }
        None
    }

    fn append_pieces(pieces: &mut Vec<Curve>, curve: Curve) {
        match curve {
            Curve::Poly(p) => pieces.extend(p.pieces),
            c => pieces.push(c),
        }
    }
}

impl ParamCurve for PolyCurve {
    #[inline]
    fn domain(&self) -> Interval {
        Interval::new(0.0, 2.0 * self.pieces.len() as f64 - 1.0)
    }

    fn eval(&self, t: f64) -> Point {
        let (leaf, local) = self.leaf_at(t);
        leaf.eval(local)
    }

    fn position(&self, p: Point) -> Option<f64> {
        self.leaves()
            .iter()
            .find_map(|leaf| leaf.curve.position(p).map(|t| leaf.lift(t)))
    }

    fn project(&self, p: Point) -> f64 {
        let mut best = (f64::INFINITY, 0.0);
        for leaf in self.leaves() {
            let t = leaf.curve.project(p);
            let d = leaf.curve.eval(t).distance_squared(p);
            if d < best.0 {
                best = (d, leaf.lift(t));
            }
        }
        best.1
    }

    fn distance(&self, p: Point) -> f64 {
        self.leaves()
            .iter()
            .map(|leaf| leaf.curve.distance(p))
            .fold(f64::INFINITY, f64::min)
    }

    fn is_bounded(&self) -> bool {
        self.leaves().iter().all(|leaf| leaf.curve.is_bounded())
    }

    #[inline]
    fn is_closed(&self) -> bool {
        self.closed
    }

    /// Joints between pieces, the singular points of each piece, and the
    /// two ends of an open composite.
    fn singular_params(&self) -> SmallVec<[f64; 4]> {
        let mut params: SmallVec<[f64; 4]> = SmallVec::new();
        for leaf in self.leaves() {
            let d = leaf.curve.domain();
            for t in [d.t0, d.t1] {
                if t.is_finite() {
                    params.push(leaf.lift(t));
                }
            }
            params.extend(leaf.curve.singular_params().iter().map(|&t| leaf.lift(t)));
        }
        if self.closed {
            let end = self.domain().t1;
            params.retain(|t| *t > ACCURACY && *t < end - ACCURACY);
            params.push(0.0);
        }
        params.sort_by(f64::total_cmp);
        params.dedup_by(|a, b| (*a - *b).abs() < ACCURACY);
        params
    }

    fn bounding_box(&self) -> Rect {
        self.leaves()
            .iter()
            .fold(Rect::EMPTY, |acc, leaf| acc.union(leaf.curve.bounding_box()))
    }

    fn line_crossings(&self, line: &Line) -> SmallVec<[f64; 4]> {
        let mut result: SmallVec<[f64; 4]> = SmallVec::new();
        for leaf in self.leaves() {
            result.extend(leaf.curve.line_crossings(line).iter().map(|&t| leaf.lift(t)));
        }
        result.sort_by(f64::total_cmp);
        result.dedup_by(|a, b| (*a - *b).abs() < ACCURACY);
        result
    }

    /// The part between two global parameters.
    ///
    /// A range inside one piece gives that piece's sub-curve; a range over
    /// several pieces gives a composite. On closed composites `t1 < t0`
    /// wraps through the closing vertex.
    fn subcurve(&self, t0: f64, t1: f64) -> Option<Curve> {
        let domain = self.domain();
        if t1 < t0 {
            if !self.closed {
                return None;
            }
            let mut pieces = Vec::new();
            Self::append_pieces(&mut pieces, self.subcurve(t0, domain.t1)?);
            Self::append_pieces(&mut pieces, self.subcurve(domain.t0, t1)?);
            return PolyCurve::new(pieces, false).ok().map(Curve::Poly);
        }
        let (mut t0, mut t1) = (domain.clamp(t0), domain.clamp(t1));
        if self.curve_index(t0) != self.curve_index(t1) {
            t0 = self.snap_start(t0);
            t1 = self.snap_end(t1);
        }
        let (i0, i1) = (self.curve_index(t0), self.curve_index(t1));
        let (l0, l1) = (self.local_position(t0), self.local_position(t1));
        if i0 >= i1 {
            let piece = &self.pieces[i0];
            return piece.subcurve(l0, l1.max(l0));
        }
        let mut pieces = Vec::with_capacity(i1 - i0 + 1);
        let first = &self.pieces[i0];
        Self::append_pieces(&mut pieces, first.subcurve(l0, first.domain().t1)?);
        pieces.extend(self.pieces[i0 + 1..i1].iter().cloned());
        let last = &self.pieces[i1];
        Self::append_pieces(&mut pieces, last.subcurve(last.domain().t0, l1)?);
        PolyCurve::new(pieces, false).ok().map(Curve::Poly)
    }

    fn reversed(&self) -> PolyCurve {
        PolyCurve {
            pieces: self.pieces.iter().rev().map(ParamCurve::reversed).collect(),
            closed: self.closed,
        }
    }

    /// `n` segments per non-composite piece; shared vertices appear once.
    fn to_polyline(&self, n: usize) -> Result<Vec<Point>> {
        if n == 0 {
            return Err(GeomError::DegenerateInput("polyline needs at least one segment"));
        }
        let mut points: Vec<Point> = Vec::new();
        for leaf in self.leaves() {
            let part = leaf.curve.to_polyline(n)?;
            let skip = match (points.last(), part.first()) {
                (Some(last), Some(first)) if last.almost_equals(*first) => 1,
                _ => 0,
            };
            points.extend(part.into_iter().skip(skip));
        }
        Ok(points)
    }

    fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        if !self.is_bounded() {
            return Err(GeomError::UnboundedShape);
        }
        for leaf in self.leaves() {
            leaf.curve.append_to(path, tolerance)?;
        }
        if self.closed && path.elements().last() != Some(&PathEl::ClosePath) {
            path.close_path();
        }
        Ok(())
    }
}

impl ParamCurveDeriv for PolyCurve {
    /// The derivative of the owning piece with respect to its own
    /// parameter.
    fn tangent(&self, t: f64) -> Vec2 {
        let (leaf, local) = self.leaf_at(t);
        leaf.tangent(local)
    }
}

impl OrientedCurve for PolyCurve {
    /// The signed distance to the nearest piece.
    ///
    /// Near reflex joints this can disagree in sign with
    /// [`is_inside`](OrientedCurve::is_inside), which handles vertices
    /// exactly.
    fn signed_distance(&self, p: Point) -> f64 {
        self.leaves()
            .iter()
            .map(|leaf| leaf.curve.signed_distance(p))
            .fold(f64::INFINITY, |best, d| if d.abs() < best.abs() { d } else { best })
    }

    fn winding_angle(&self, p: Point) -> f64 {
        self.leaves()
            .iter()
            .map(|leaf| leaf.curve.winding_angle(p))
            .sum()
    }

    fn is_inside(&self, p: Point) -> bool {
        let t = self.project(p);
        let Some((incoming, outgoing)) = self.joint_at(t) else {
            let (leaf, _) = self.leaf_at(t);
            return leaf.is_inside(p);
        };
        let (c_in, c_out) = (&self.pieces[incoming], &self.pieces[outgoing]);
        let vertex = c_out.start();
        let t_in = c_in.tangent(c_in.domain().t1);
        let t_out = c_out.tangent(c_out.domain().t0);
        let left_of_in = t_in.cross(p - vertex) > 0.0;
        let left_of_out = t_out.cross(p - vertex) > 0.0;
        if t_in.cross(t_out) >= 0.0 {
            left_of_in && left_of_out
        } else {
            left_of_in || left_of_out
        }
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use crate::param_curve::{OrientedCurve, ParamCurve};
    use crate::{Arc, BezPath, Curve, GeomError, Line, PathEl, Point, PolyCurve, Vec2};

    fn assert_near(a: f64, b: f64, eps: f64) {
        assert!((a - b).abs() < eps, "{a} != {b}");
    }

    fn square() -> PolyCurve {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        PolyCurve::from_points(&pts, true).unwrap()
    }

    fn lens() -> PolyCurve {
        let arc1 = Arc::circular((0.0, 0.0), 10.0, 5.0 * PI / 3.0, 2.0 * PI / 3.0);
        let arc2 = Arc::circular((10.0, 0.0), 10.0, 2.0 * PI / 3.0, 2.0 * PI / 3.0);
        PolyCurve::new(vec![arc1.into(), arc2.into()], true).unwrap()
    }

    #[test]
    fn two_piece_layout() {
        let poly = PolyCurve::from_points(&[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(1.0, 1.0)], false)
            .unwrap();
        assert_eq!(poly.domain().t0, 0.0);
        assert_eq!(poly.domain().t1, 3.0);
        assert_eq!(poly.global_position(1, 0.0), 2.0);
        assert_eq!(poly.curve_index(1.5), 0);
        assert_eq!(poly.curve_index(2.0), 1);
        assert_eq!(poly.curve_index(3.0), 1);
        // The joint gap evaluates to the shared vertex.
        assert_eq!(poly.eval(1.5), Point::new(1.0, 0.0));
        assert_eq!(poly.eval(2.5), Point::new(1.0, 0.5));
        assert_eq!(poly.local_position(2.5), 0.5);
        assert_eq!(poly.local_position(1.0), 1.0);
    }

    #[test]
    fn closed_lens_positions() {
        let poly = lens();
        assert_near(poly.position(Point::new(10.0, 0.0)).unwrap(), 0.5, 1e-12);
        assert_near(poly.position(Point::new(0.0, 0.0)).unwrap(), 2.5, 1e-12);
        assert!(poly.position(Point::new(5.0, 0.0)).is_none());
        let t = poly.project(Point::new(12.0, 0.0));
        assert_near(t, 0.5, 1e-9);
        assert_near(poly.global_position(1, 2.0 * PI / 3.0), 3.0, 1e-12);
    }

    #[test]
    fn lens_subcurve_wraps_through_the_closing_point() {
        let poly = lens();
        let t0 = poly.position(Point::new(10.0, 0.0)).unwrap();
        let t1 = poly.position(Point::new(0.0, 0.0)).unwrap();
        let Some(Curve::Poly(wrapped)) = poly.subcurve(t0, t1) else {
            panic!("expected a composite");
        };
        assert_eq!(wrapped.len(), 2);
        assert!(wrapped.start().almost_equals(Point::new(10.0, 0.0)));
        assert!(wrapped.end().almost_equals(Point::ORIGIN));
        let expected = [((10.0, 0.0), PI), ((0.0, 0.0), 5.0 * PI / 3.0)];
        for (piece, (center, start)) in wrapped.pieces().iter().zip(expected) {
            let Curve::Arc(arc) = piece else {
                panic!("expected an arc, got {piece:?}");
            };
            assert!(arc.center.almost_equals(center.into()));
            assert_near(arc.radii.x, 10.0, 1e-12);
            assert_near(arc.start_angle.rem_euclid(TAU), start, 1e-9);
            assert_near(arc.sweep_angle, PI / 3.0, 1e-9);
        }
    }

    #[test]
    fn continuity_is_checked() {
        let a = Line::segment((0.0, 0.0), (1.0, 0.0));
        let b = Line::segment((2.0, 0.0), (3.0, 0.0));
        assert_eq!(
            PolyCurve::new(vec![a.into(), b.into()], false),
            Err(GeomError::Discontinuous { index: 1, gap: 1.0 })
        );
        let mut poly = PolyCurve::new(vec![a.into()], false).unwrap();
        assert!(matches!(poly.push(b), Err(GeomError::Discontinuous { index: 1, .. })));
        poly.push(Line::segment((1.0, 0.0), (1.0, 1.0))).unwrap();
        poly.close().unwrap();
        assert_eq!(poly.len(), 3);
        assert!(poly.is_closed());
        assert_eq!(poly.end(), Point::ORIGIN);
        assert!(poly.push(a).is_err());
        assert!(PolyCurve::new(vec![], false).is_err());
        assert!(PolyCurve::try_from((Vec::<Curve>::new(), true)).is_err());
        let open = PolyCurve::try_from((vec![Curve::from(a), Curve::from(b)], true));
        assert!(matches!(open, Err(GeomError::Discontinuous { .. })));
        let (pieces, closed): (Vec<Curve>, bool) = poly.clone().into();
        assert_eq!(PolyCurve::try_from((pieces, closed)), Ok(poly));
    }

    #[test]
    fn unbounded_pieces() {
        let ray_in = Line::inverted_ray((0.0, 0.0), (1.0, 0.0)).unwrap();
        let ray_out = Line::ray((0.0, 0.0), (0.0, 1.0)).unwrap();
        let poly = PolyCurve::new(vec![ray_in.into(), ray_out.into()], false).unwrap();
        assert_eq!(poly.start(), Point::INFINITY);
        assert_eq!(poly.end(), Point::INFINITY);
        assert_eq!(poly.eval(1.0), Point::ORIGIN);
        assert_eq!(poly.eval(2.5), Point::new(0.0, 1.0));
        assert_eq!(poly.eval(0.5), Point::new(-1.0, 0.0));
        assert_near(poly.position(Point::new(0.0, 3.0)).unwrap(), 2.75, 1e-12);
        assert!(!poly.is_bounded());
        assert_eq!(poly.to_polyline(4), Err(GeomError::UnboundedShape));
        // Left of an L turning left: the inside is the convex corner.
        assert!(poly.is_inside(Point::new(-1.0, 1.0)));
        assert!(!poly.is_inside(Point::new(1.0, 1.0)));
        assert!(!poly.is_inside(Point::new(-1.0, -1.0)));
        assert_near(poly.winding_angle(Point::new(-1.0, 1.0)), 3.0 * FRAC_PI_2, 1e-12);
    }

    #[test]
    fn square_orientation() {
        let sq = square();
        assert_near(sq.winding_angle(Point::new(5.0, 5.0)), TAU, 1e-12);
        assert_near(sq.winding_angle(Point::new(15.0, 5.0)), 0.0, 1e-12);
        assert!(sq.is_inside(Point::new(5.0, 5.0)));
        assert!(sq.is_inside(Point::new(0.5, 0.5)));
        assert!(!sq.is_inside(Point::new(-1.0, -1.0)));
        assert!(!sq.is_inside(Point::new(11.0, -0.5)));
        assert_near(sq.signed_distance(Point::new(5.0, 1.0)), -1.0, 1e-12);
        assert_near(sq.signed_distance(Point::new(5.0, -2.0)), 2.0, 1e-12);
        let rev = sq.reversed();
        assert!(!rev.is_inside(Point::new(5.0, 5.0)));
        assert_near(rev.winding_angle(Point::new(5.0, 5.0)), -TAU, 1e-12);
        assert_eq!(rev.start(), Point::ORIGIN);
    }

    #[test]
    fn reflex_vertex() {
        // An L-shaped hexagon with its reflex corner at (5, 5).
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let poly = PolyCurve::from_points(&pts, true).unwrap();
        assert!(poly.is_inside(Point::new(4.0, 6.0)));
        assert!(poly.is_inside(Point::new(6.0, 4.0)));
        assert!(poly.is_inside(Point::new(4.0, 4.0)));
        assert!(!poly.is_inside(Point::new(6.0, 6.0)));
        assert!(poly.singular_params().contains(&6.0));
    }

    #[test]
    fn subcurves() {
        let sq = square();
        let Some(Curve::Linear(edge)) = sq.subcurve(0.25, 0.75) else {
            panic!("expected a segment");
        };
        assert_eq!(edge.start(), Point::new(2.5, 0.0));
        let Some(Curve::Poly(part)) = sq.subcurve(0.5, 2.5) else {
            panic!("expected a composite");
        };
        assert_eq!(part.len(), 2);
        assert_eq!(part.start(), Point::new(5.0, 0.0));
        assert_eq!(part.end(), Point::new(10.0, 5.0));
        // Wrapping through the closing vertex.
        let Some(Curve::Poly(wrap)) = sq.subcurve(6.5, 0.5) else {
            panic!("expected a composite");
        };
        assert_eq!(wrap.start(), Point::new(0.0, 5.0));
        assert_eq!(wrap.end(), Point::new(5.0, 0.0));
        assert!(!wrap.is_closed());
        // Ending in a joint gap stops at the vertex.
        let Some(Curve::Poly(gap)) = sq.subcurve(0.5, 3.5) else {
            panic!("expected a composite");
        };
        assert_eq!(gap.len(), 2);
        assert_eq!(gap.end(), Point::new(10.0, 10.0));
        let open = PolyCurve::from_points(&[Point::ORIGIN, Point::new(1.0, 0.0)], false).unwrap();
        assert!(open.subcurve(0.8, 0.2).is_none());
    }

    #[test]
    fn nested_composites() {
        let inner = PolyCurve::from_points(&[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(1.0, 1.0)], false)
            .unwrap();
        let tail = Line::segment((1.0, 1.0), (0.0, 1.0));
        let outer = PolyCurve::new(vec![inner.into(), tail.into()], false).unwrap();
        assert_eq!(outer.domain().t1, 3.0);
        // Outer parameter 0.5 is inner parameter 1.5, the inner joint.
        assert_eq!(outer.eval(0.5), Point::new(1.0, 0.0));
        assert_near(outer.position(Point::new(1.0, 0.5)).unwrap(), 2.5 / 3.0, 1e-12);
        assert_near(outer.position(Point::new(0.5, 1.0)).unwrap(), 2.5, 1e-12);
        let ts = outer.line_crossings(&Line::through((0.5, -1.0), (0.5, 2.0)).unwrap());
        assert_eq!(ts.len(), 2);
        assert_near(ts[0], 0.5 / 3.0, 1e-12);
        assert_near(ts[1], 2.5, 1e-12);
        assert_eq!(outer.to_polyline(2).unwrap().len(), 7);
        assert_eq!(outer.bounding_box().x1, 1.0);
    }

    #[test]
    fn export() {
        let sq = square();
        let mut path = BezPath::new();
        sq.append_to(&mut path, 0.1).unwrap();
        assert_eq!(path.to_svg(), "M0,0 L10,0 L10,10 L0,10 L0,0 Z");
        assert_eq!(path.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count(), 1);
        let pts = sq.to_polyline(2).unwrap();
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[1], Point::new(5.0, 0.0));
        let lens = lens();
        let mut path = BezPath::new();
        lens.append_to(&mut path, 0.01).unwrap();
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
        let moved = lens.transform(&crate::Affine::translate(Vec2::new(1.0, 0.0)));
        assert!(moved.position(Point::new(11.0, 0.0)).is_some());
    }
}
