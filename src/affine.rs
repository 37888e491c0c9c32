// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affine transforms.

use alloc::vec::Vec;
use core::f64::consts::FRAC_PI_2;
use core::ops::{Mul, MulAssign};

use crate::tolerance::{is_zero, ACCURACY};
use crate::{GeomError, Line, Point, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A 2D affine transform.
///
/// The coefficients `[m00, m01, m02, m10, m11, m12]` describe the map
///
/// ```text
/// x' = m00·x + m01·y + m02
/// y' = m10·x + m11·y + m12
/// ```
///
/// Two composition orders exist and are named apart:
/// [`compose`](Affine::compose) applies its argument first, and
/// [`chain`](Affine::chain) applies it last. The [`Mul`] impl follows
/// the matrix convention `(A * B) * p == A * (B * p)`, so `a.compose(b)`
/// is `a * b`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Affine([f64; 6]);

impl Affine {
    /// The identity transform.
    pub const IDENTITY: Affine = Affine::scale(1.0);

    /// Mirror across the x axis (negates y).
    pub const FLIP_Y: Affine = Affine::new([1.0, 0., 0., 0., -1.0, 0.]);

    /// Mirror across the y axis (negates x).
    pub const FLIP_X: Affine = Affine::new([-1.0, 0., 0., 0., 1.0, 0.]);

    /// Construct an affine transform from coefficients
    /// `[m00, m01, m02, m10, m11, m12]`.
    #[inline(always)]
    pub const fn new(c: [f64; 6]) -> Affine {
        Affine(c)
    }

    /// Construct a transform from a slice of 4 or 6 coefficients.
    ///
    /// Four coefficients `[m00, m01, m10, m11]` describe a linear map
    /// without translation.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::DegenerateInput`] for any other length.
    pub fn from_slice(c: &[f64]) -> Result<Affine> {
        match *c {
            [m00, m01, m10, m11] => Ok(Affine([m00, m01, 0.0, m10, m11, 0.0])),
            [m00, m01, m02, m10, m11, m12] => Ok(Affine([m00, m01, m02, m10, m11, m12])),
            _ => Err(GeomError::DegenerateInput(
                "affine transform needs 4 or 6 coefficients",
            )),
        }
    }

    /// An affine transform representing uniform scaling.
    #[inline(always)]
    pub const fn scale(s: f64) -> Affine {
        Affine([s, 0.0, 0.0, 0.0, s, 0.0])
    }

    /// Non-uniform scaling about the origin.
    #[inline(always)]
    pub const fn scale_non_uniform(s_x: f64, s_y: f64) -> Affine {
        Affine([s_x, 0.0, 0.0, 0.0, s_y, 0.0])
    }

    /// Scaling by `s_x`, `s_y` that keeps `center` fixed.
    ///
    /// Negative factors are allowed; `(-1, -1)` is the point reflection
    /// through `center`.
    #[inline]
    pub fn scale_about(s_x: f64, s_y: f64, center: impl Into<Point>) -> Affine {
        let c = center.into();
        Affine([s_x, 0.0, (1.0 - s_x) * c.x, 0.0, s_y, (1.0 - s_y) * c.y])
    }

    /// Uniform scaling by `k` about `center`.
    #[inline]
    pub fn homothecy(center: impl Into<Point>, k: f64) -> Affine {
        Affine::scale_about(k, k, center)
    }

    /// The central symmetry through `center`.
    #[inline]
    pub fn point_reflection(center: impl Into<Point>) -> Affine {
        Affine::scale_about(-1.0, -1.0, center)
    }

    /// An affine transform representing translation.
    #[inline(always)]
    pub fn translate<V: Into<Vec2>>(v: V) -> Affine {
        let v = v.into();
        Affine([1.0, 0.0, v.x, 0.0, 1.0, v.y])
    }

    /// Counter-clockwise rotation about the origin.
    ///
    /// Angles within [`ACCURACY`] of a multiple of π/2 produce exact
    /// quadrant rotations.
    #[inline]
    pub fn rotate(th: f64) -> Affine {
        Affine::rotate_about(th, Point::ORIGIN)
    }

    /// Counter-clockwise rotation of `th` radians about `center`.
    pub fn rotate_about(th: f64, center: impl Into<Point>) -> Affine {
        let c = center.into();
        let k = (th / FRAC_PI_2).round();
        if (k * FRAC_PI_2 - th).abs() < ACCURACY {
            // `k` is integral; only its residue mod 4 matters.
            let quadrant = (k % 4.0 + 4.0) % 4.0;
            return Affine::quadrant_rotation_about(quadrant as u8, c);
        }
        let (s, co) = th.sin_cos();
        Affine([
            co,
            -s,
            (1.0 - co) * c.x + s * c.y,
            s,
            co,
            (1.0 - co) * c.y - s * c.x,
        ])
    }

    /// Exact rotation by `quadrant · π/2` about the origin.
    ///
    /// Only `quadrant % 4` is significant.
    pub fn quadrant_rotation(quadrant: u8) -> Affine {
        match quadrant % 4 {
            0 => Affine::IDENTITY,
            1 => Affine([0.0, -1.0, 0.0, 1.0, 0.0, 0.0]),
            2 => Affine([-1.0, 0.0, 0.0, 0.0, -1.0, 0.0]),
            _ => Affine([0.0, 1.0, 0.0, -1.0, 0.0, 0.0]),
        }
    }

    /// Exact rotation by `quadrant · π/2` about `center`.
    pub fn quadrant_rotation_about(quadrant: u8, center: impl Into<Point>) -> Affine {
        let c = center.into();
        let Affine([m00, m01, _, m10, m11, _]) = Affine::quadrant_rotation(quadrant);
        Affine([
            m00,
            m01,
            (1.0 - m00) * c.x - m01 * c.y,
            m10,
            m11,
            (1.0 - m11) * c.y - m10 * c.x,
        ])
    }

    /// A shear: `x' = x + shx·y`, `y' = shy·x + y`.
    #[inline(always)]
    pub fn shear(shx: f64, shy: f64) -> Affine {
        Affine([1.0, shx, 0.0, shy, 1.0, 0.0])
    }

    /// Reflection across the support line of `line`.
    ///
    /// A segment whose ends coincide has no support line and gives
    /// [`GeomError::DegenerateInput`].
    pub fn line_reflection(line: &Line) -> Result<Affine> {
        let Point { x: x0, y: y0 } = line.origin;
        let Vec2 { x: dx, y: dy } = line.direction;
        let delta = dx * dx + dy * dy;
        if is_zero(delta) {
            return Err(GeomError::DegenerateInput("reflection line has no direction"));
        }
        Ok(Affine([
            (dx * dx - dy * dy) / delta,
            2.0 * dx * dy / delta,
            2.0 * dy * (dy * x0 - dx * y0) / delta,
            2.0 * dx * dy / delta,
            (dy * dy - dx * dx) / delta,
            2.0 * dx * (dx * y0 - dy * x0) / delta,
        ]))
    }

    /// Reflection across the support line of `line` followed by a
    /// translation of `distance` along the line's direction.
    pub fn glide_reflection(line: &Line, distance: f64) -> Result<Affine> {
        let reflection = Affine::line_reflection(line)?;
        Ok(reflection.then_translate(line.direction.normalize() * distance))
    }

    /// The transform that applies `other` first, then `self`.
    ///
    /// Equivalent to `self * other`.
    #[inline]
    #[must_use]
    pub fn compose(self, other: Affine) -> Affine {
        self * other
    }

    /// The transform that applies `self` first, then `other`.
    ///
    /// Equivalent to `other * self`.
    #[inline]
    #[must_use]
    pub fn chain(self, other: Affine) -> Affine {
        other * self
    }

    /// `self` followed by a translation.
    #[inline]
    #[must_use]
    pub fn then_translate(mut self, trans: Vec2) -> Self {
        self.0[2] += trans.x;
        self.0[5] += trans.y;
        self
    }

    /// `self` followed by a rotation about the origin.
    #[inline]
    #[must_use]
    pub fn then_rotate(self, th: f64) -> Self {
        self.chain(Affine::rotate(th))
    }

    /// `self` followed by a uniform scaling about the origin.
    #[inline]
    #[must_use]
    pub fn then_scale(self, scale: f64) -> Self {
        self.chain(Affine::scale(scale))
    }

    /// Get the coefficients `[m00, m01, m02, m10, m11, m12]`.
    #[inline(always)]
    pub fn as_coeffs(self) -> [f64; 6] {
        self.0
    }

    /// The linear part `[m00, m01, m10, m11]`.
    #[inline]
    pub fn linear_coeffs(self) -> [f64; 4] {
        let [m00, m01, _, m10, m11, _] = self.0;
        [m00, m01, m10, m11]
    }

    /// Compute the determinant of the linear part.
    #[inline]
    pub fn determinant(self) -> f64 {
        self.0[0] * self.0[4] - self.0[3] * self.0[1]
    }

    /// The translation component.
    #[inline]
    pub fn translation(self) -> Vec2 {
        Vec2::new(self.0[2], self.0[5])
    }

    /// Apply only the linear part to a vector.
    #[inline]
    pub fn transform_vec(self, v: Vec2) -> Vec2 {
        let [m00, m01, _, m10, m11, _] = self.0;
        Vec2::new(m00 * v.x + m01 * v.y, m10 * v.x + m11 * v.y)
    }

    /// Apply the transform to a point.
    ///
    /// The point at infinity is mapped to itself.
    #[inline]
    pub fn transform_point(self, p: Point) -> Point {
        if !p.is_finite() {
            return Point::INFINITY;
        }
        let [m00, m01, m02, m10, m11, m12] = self.0;
        Point::new(m00 * p.x + m01 * p.y + m02, m10 * p.x + m11 * p.y + m12)
    }

    /// Apply the transform to every point, preserving order.
    pub fn transform_points(self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.transform_point(p)).collect()
    }

    /// Compute the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::NonInvertible`] carrying `self` when the
    /// determinant is within [`ACCURACY`] of zero.
    pub fn inverse(self) -> Result<Affine> {
        let det = self.determinant();
        if det.abs() < ACCURACY {
            return Err(GeomError::NonInvertible(self));
        }
        let [m00, m01, m02, m10, m11, m12] = self.0;
        Ok(Affine([
            m11 / det,
            -m01 / det,
            (m01 * m12 - m02 * m11) / det,
            -m10 / det,
            m00 / det,
            (m02 * m10 - m00 * m12) / det,
        ]))
    }

    /// Is every coefficient within tolerance of the identity?
    pub fn is_identity(self) -> bool {
        self.0
            .iter()
            .zip(Affine::IDENTITY.0)
            .all(|(a, b)| (a - b).abs() < ACCURACY)
    }

    /// Does the transform preserve orientation?
    #[inline]
    pub fn is_direct(self) -> bool {
        self.determinant() > 0.0
    }

    /// Does the transform preserve distances?
    pub fn is_isometry(self) -> bool {
        let [a, b, _, c, d, _] = self.0;
        (a * a + b * b - 1.0).abs() < ACCURACY
            && (c * c + d * d - 1.0).abs() < ACCURACY
            && (a * c + b * d).abs() < ACCURACY
    }

    /// An isometry that preserves orientation: a rotation, a translation
    /// or a combination.
    #[inline]
    pub fn is_motion(self) -> bool {
        self.is_isometry() && self.is_direct()
    }

    /// Does the transform scale all distances by one common factor?
    pub fn is_similarity(self) -> bool {
        let [a, b, _, c, d, _] = self.0;
        let k2 = self.determinant().abs();
        [a * a + b * b, c * c + d * d, a * a + c * c, b * b + d * d]
            .iter()
            .all(|n| (n - k2).abs() < ACCURACY)
            && (a * c + b * d).abs() < ACCURACY
    }

    /// Is this transform finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Default for Affine {
    #[inline(always)]
    fn default() -> Affine {
        Affine::IDENTITY
    }
}

impl Mul<Point> for Affine {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Point {
        self.transform_point(other)
    }
}

impl Mul for Affine {
    type Output = Affine;

    #[inline]
    fn mul(self, other: Affine) -> Affine {
        let [a00, a01, a02, a10, a11, a12] = self.0;
        let [b00, b01, b02, b10, b11, b12] = other.0;
        Affine([
            a00 * b00 + a01 * b10,
            a00 * b01 + a01 * b11,
            a00 * b02 + a01 * b12 + a02,
            a10 * b00 + a11 * b10,
            a10 * b01 + a11 * b11,
            a10 * b02 + a11 * b12 + a12,
        ])
    }
}

impl MulAssign for Affine {
    #[inline]
    fn mul_assign(&mut self, other: Affine) {
        *self = self.mul(other);
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::{Affine, GeomError, Line, Point, Vec2};

    fn assert_near(p0: Point, p1: Point) {
        assert!((p1 - p0).hypot() < 1e-9, "{p0:?} != {p1:?}");
    }

    fn affine_assert_near(a0: Affine, a1: Affine) {
        for i in 0..6 {
            assert!(
                (a0.0[i] - a1.0[i]).abs() < 1e-9,
                "{a0:?} != {a1:?}"
            );
        }
    }

    fn random_affine(rng: &mut StdRng) -> Affine {
        let mut c = [0.0; 6];
        for x in &mut c {
            *x = rng.random_range(-10.0..10.0);
        }
        Affine::new(c)
    }

    #[test]
    fn affine_basic() {
        let p = Point::new(3.0, 4.0);

        assert_near(Affine::default() * p, p);
        assert_near(Affine::scale(2.0) * p, Point::new(6.0, 8.0));
        assert_near(Affine::rotate(0.0) * p, p);
        assert_near(Affine::rotate(FRAC_PI_2) * p, Point::new(-4.0, 3.0));
        assert_near(Affine::translate((5.0, 6.0)) * p, Point::new(8.0, 10.0));
        assert_near(Affine::shear(2.0, 0.0) * p, Point::new(11.0, 4.0));
        assert_near(
            Affine::scale_about(2.0, 3.0, (1.0, 1.0)) * p,
            Point::new(5.0, 10.0),
        );
    }

    #[test]
    fn quadrant_rotations_are_exact() {
        assert_eq!(Affine::rotate(FRAC_PI_2).as_coeffs(), [0.0, -1.0, 0.0, 1.0, 0.0, 0.0]);
        assert_eq!(Affine::rotate(PI).as_coeffs(), [-1.0, 0.0, 0.0, 0.0, -1.0, 0.0]);
        assert_eq!(Affine::rotate(-FRAC_PI_2), Affine::quadrant_rotation(3));
        assert_eq!(Affine::rotate(4.0 * PI), Affine::IDENTITY);
        let r = Affine::rotate_about(FRAC_PI_2, (1.0, 1.0));
        assert_eq!(r * Point::new(2.0, 1.0), Point::new(1.0, 2.0));
        // Off-quadrant angles go through sin/cos.
        let r = Affine::rotate_about(FRAC_PI_4, (1.0, 1.0));
        assert_near(r * Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert_near(
            r * Point::new(2.0, 1.0),
            Point::new(1.0 + 0.5f64.sqrt(), 1.0 + 0.5f64.sqrt()),
        );
    }

    #[test]
    fn compose_and_chain_orders() {
        let t = Affine::translate((1.0, 0.0));
        let r = Affine::rotate(FRAC_PI_2);
        let p = Point::new(1.0, 0.0);
        // Translate first, then rotate.
        assert_near(r.compose(t) * p, Point::new(0.0, 2.0));
        assert_near(t.chain(r) * p, Point::new(0.0, 2.0));
        // Rotate first, then translate.
        assert_near(t.compose(r) * p, Point::new(1.0, 1.0));
        assert_near(r.chain(t) * p, Point::new(1.0, 1.0));
        assert_near(r.then_translate(Vec2::new(1.0, 0.0)) * p, Point::new(1.0, 1.0));
    }

    #[test]
    fn composition_is_associative() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let t1 = random_affine(&mut rng);
            let t2 = random_affine(&mut rng);
            let t3 = random_affine(&mut rng);
            let left = t1.compose(t2).compose(t3);
            let right = t1.compose(t2.compose(t3));
            for i in 0..6 {
                let scale = left.0[i].abs().max(1.0);
                assert!((left.0[i] - right.0[i]).abs() < 1e-9 * scale);
            }
        }
    }

    #[test]
    fn affine_inv() {
        let a = Affine::new([0.1, 1.2, 2.3, 2.1, 3.4, 4.5]);
        let a_inv = a.inverse().unwrap();
        let det = 0.1 * 3.4 - 2.1 * 1.2;
        affine_assert_near(
            a_inv,
            Affine::new([
                3.4 / det,
                -1.2 / det,
                (1.2 * 4.5 - 2.3 * 3.4) / det,
                -2.1 / det,
                0.1 / det,
                (2.3 * 2.1 - 0.1 * 4.5) / det,
            ]),
        );
        affine_assert_near(a * a_inv, Affine::IDENTITY);
        affine_assert_near(a_inv * a, Affine::IDENTITY);
        let p = Point::new(3.0, 4.0);
        assert_near(a_inv * (a * p), p);
    }

    #[test]
    fn inverse_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let t = random_affine(&mut rng);
            if t.determinant().abs() < 0.1 {
                continue;
            }
            let inv = t.inverse().unwrap();
            let p = Point::new(rng.random_range(-100.0..100.0), rng.random_range(-100.0..100.0));
            assert!(inv.transform_point(t.transform_point(p)).distance(p) < 1e-8);
        }
    }

    #[test]
    fn singular_inverse_fails() {
        let singular = Affine::new([1.0, 2.0, 3.0, 2.0, 4.0, 5.0]);
        assert_eq!(singular.inverse(), Err(GeomError::NonInvertible(singular)));
        assert!(Affine::scale(0.0).inverse().is_err());
    }

    #[test]
    fn from_slice_lengths() {
        let a = Affine::from_slice(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(a.as_coeffs(), [1.0, 2.0, 0.0, 3.0, 4.0, 0.0]);
        let b = Affine::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(b.as_coeffs(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(matches!(
            Affine::from_slice(&[1.0, 2.0, 3.0]),
            Err(GeomError::DegenerateInput(_))
        ));
    }

    #[test]
    fn reflection() {
        // The line y = x - 1.
        let line = Line::through(Point::new(1.0, 0.0), Point::new(2.0, 1.0)).unwrap();
        let map = Affine::line_reflection(&line).unwrap();
        assert_near(map * Point::new(1., 0.), Point::new(1., 0.));
        assert_near(map * Point::new(2., 1.), Point::new(2., 1.));
        assert_near(map * Point::new(2., 2.), Point::new(3., 1.));
        assert!(map.is_isometry());
        assert!(!map.is_direct());
        affine_assert_near(map * map, Affine::IDENTITY);

        let glide = Affine::glide_reflection(&line, 2.0f64.sqrt()).unwrap();
        assert_near(glide * Point::new(1., 0.), Point::new(2., 1.));
        assert_near(glide * Point::new(2., 2.), Point::new(4., 2.));
    }

    #[test]
    fn reflection_needs_a_direction() {
        let point = Line::segment((1.0, 1.0), (1.0, 1.0));
        assert!(matches!(
            Affine::line_reflection(&point),
            Err(GeomError::DegenerateInput(_))
        ));
        assert!(Affine::glide_reflection(&point, 1.0).is_err());
    }

    #[test]
    fn classification() {
        let motions = [
            Affine::rotate(0.3),
            Affine::rotate_about(1.2, (4.0, -2.0)),
            Affine::translate((3.0, 5.0)),
            Affine::rotate(FRAC_PI_2),
        ];
        for t in motions {
            assert!(t.is_motion(), "{t:?}");
            assert!(t.is_direct(), "{t:?}");
            assert!(t.is_similarity(), "{t:?}");
        }
        let pr = Affine::point_reflection((1.0, 2.0));
        assert!(pr.is_isometry());
        assert!(pr.is_direct());
        assert_near(pr * Point::new(2.0, 3.0), Point::new(0.0, 1.0));

        let h = Affine::homothecy((1.0, 1.0), 3.0);
        assert!(h.is_similarity());
        assert!(!h.is_isometry());
        assert!(h.is_direct());

        assert!(!Affine::scale_non_uniform(1.0, 2.0).is_similarity());
        assert!(!Affine::shear(0.5, 0.0).is_isometry());
        assert!(Affine::FLIP_X.is_isometry() && !Affine::FLIP_X.is_direct());
        assert!(Affine::new([1.0, 1e-13, 0.0, 0.0, 1.0, -1e-13]).is_identity());
        assert!(!Affine::translate((1e-6, 0.0)).is_identity());
    }

    #[test]
    fn batch_transform_preserves_order() {
        let t = Affine::translate((1.0, 1.0));
        let input = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::INFINITY];
        let out = t.transform_points(&input);
        assert_eq!(out, vec![Point::new(1.0, 1.0), Point::new(2.0, 1.0), Point::INFINITY]);
        assert_eq!(input[0], Point::new(0.0, 0.0));
    }
}
