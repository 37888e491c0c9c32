// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clipping curves against rectangles.

use alloc::vec::Vec;
use core::ops::Mul;

use smallvec::SmallVec;

use crate::log::log_debug;
use crate::param_curve::ParamCurve;
use crate::tolerance::{approx_eq, ACCURACY, ROOT_ACCURACY};
use crate::{Affine, BezPath, Curve, Interval, Rect, Result};

/// An ordered collection of curves, typically the result of a clip.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveSet(Vec<Curve>);

impl CurveSet {
    /// An empty set.
    #[inline]
    pub fn new() -> CurveSet {
        CurveSet(Vec::new())
    }

    /// Add a curve at the end.
    #[inline]
    pub fn push(&mut self, curve: impl Into<Curve>) {
        self.0.push(curve.into());
    }

    /// The curves, in order.
    #[inline]
    pub fn curves(&self) -> &[Curve] {
        &self.0
    }

    /// Iterate over the curves.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Curve> {
        self.0.iter()
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Is the set empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The union of the bounding boxes.
    pub fn bounding_box(&self) -> Rect {
        self.0
            .iter()
            .fold(Rect::EMPTY, |acc, c| acc.union(c.bounding_box()))
    }

    /// The image of every curve under `transform`.
    pub fn transform(&self, transform: &Affine) -> CurveSet {
        self.0.iter().map(|c| c.transform(transform)).collect()
    }

    /// Clip every curve, concatenating the results.
    pub fn clip(&self, rect: &Rect) -> CurveSet {
        self.0.iter().flat_map(|c| clip_curve(c, rect)).collect()
    }

    /// Append every curve to `path`, each in its own subpath unless it
    /// starts where the previous one ended.
    ///
    /// # Errors
    ///
    /// [`GeomError::UnboundedShape`](crate::GeomError::UnboundedShape) if
    /// any curve is unbounded.
    pub fn append_to(&self, path: &mut BezPath, tolerance: f64) -> Result<()> {
        for curve in &self.0 {
            curve.append_to(path, tolerance)?;
        }
        Ok(())
    }
}

impl FromIterator<Curve> for CurveSet {
    fn from_iter<I: IntoIterator<Item = Curve>>(iter: I) -> CurveSet {
        CurveSet(iter.into_iter().collect())
    }
}

impl IntoIterator for CurveSet {
    type Item = Curve;
    type IntoIter = alloc::vec::IntoIter<Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a CurveSet {
    type Item = &'a Curve;
    type IntoIter = core::slice::Iter<'a, Curve>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Mul<CurveSet> for Affine {
    type Output = CurveSet;

    #[inline]
    fn mul(self, set: CurveSet) -> CurveSet {
        set.transform(&self)
    }
}

/// The parts of `curve` inside `rect`, boundary included.
///
/// The curve is cut at its crossings with the finite sides of the
/// rectangle; each piece between consecutive cuts is kept when a point
/// strictly inside it lies in the rectangle. Adjacent kept pieces are
/// merged, through the closing point on closed curves. A curve that lies
/// entirely in the rectangle is returned as is. Pieces whose image is a
/// single point, such as tangential touches, are dropped.
///
/// Against a bounded rectangle every result is bounded.
pub fn clip_curve(curve: &Curve, rect: &Rect) -> CurveSet {
    if rect.is_empty() {
        return CurveSet::new();
    }
    let domain = curve.domain();
    let mut cuts: Vec<f64> = Vec::new();
    cuts.push(domain.t0);
    for line in rect.boundary_lines() {
        cuts.extend(
            curve
                .line_crossings(&line)
                .into_iter()
                .filter(|&t| t > domain.t0 + ACCURACY && t < domain.t1 - ACCURACY),
        );
    }
    cuts.push(domain.t1);
    cuts.sort_by(f64::total_cmp);
    cuts.dedup_by(|a, b| (*a - *b).abs() < ACCURACY);

    let mut kept: SmallVec<[Interval; 4]> = SmallVec::new();
    for pair in cuts.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if b - a < ACCURACY {
            continue;
        }
        let mid = Interval::interior_between(a, b);
        if !rect.contains(curve.eval(mid)) {
            continue;
        }
        match kept.last_mut() {
            Some(last) if approx_eq(last.t1, a) => last.t1 = b,
            _ => kept.push(Interval::new(a, b)),
        }
    }
    let whole = |i: Interval| approx_eq(i.t0, domain.t0) && approx_eq(i.t1, domain.t1);
    kept.retain(|i| whole(*i) || !is_single_point(curve, *i));
    log_debug!(
        "clip: {} cuts, {} kept intervals",
        cuts.len().saturating_sub(2),
        kept.len()
    );

    if let [only] = kept.as_slice() {
        if whole(*only) {
            return CurveSet(alloc::vec![curve.clone()]);
        }
    }
    // Join the last and first pieces through the closing point.
    if curve.is_closed() && kept.len() > 1 {
        let n = kept.len();
        if approx_eq(kept[0].t0, domain.t0) && approx_eq(kept[n - 1].t1, domain.t1) {
            let first = kept.remove(0);
            kept[n - 2].t1 = first.t1;
        }
    }
    kept.iter()
        .filter_map(|i| curve.subcurve(i.t0, i.t1))
        .collect()
}

/// Does the part of `curve` over `range` reduce to one point?
///
/// Two roots of a near-tangency are only resolved to [`ROOT_ACCURACY`],
/// relative to the magnitude of the coordinates.
fn is_single_point(curve: &Curve, range: Interval) -> bool {
    let p0 = curve.eval(range.t0);
    if !p0.is_finite() {
        return false;
    }
    let eps = ROOT_ACCURACY * (1.0 + p0.to_vec2().hypot());
    let p1 = curve.eval(range.t1);
    let mid = curve.eval(Interval::interior_between(range.t0, range.t1));
    p0.almost_equals_eps(p1, eps) && p0.almost_equals_eps(mid, eps)
}
