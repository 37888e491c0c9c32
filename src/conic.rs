// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Implicit second-degree equations and their reduction to posed conics.
//!
//! Coefficients are always given in the order `[A, B, C, D, E, F]` of
//! `A·x² + B·xy + C·y² + D·x + E·y + F = 0`.

use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use crate::angle::normalize_axis_angle;
use crate::log::{log_debug, log_warn};
use crate::tolerance::{is_zero, ACCURACY};
use crate::{Affine, Circle, Ellipse, GeomError, Hyperbola, Parabola, Point, Result, Vec2};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A conic in canonical pose, as produced by [`reduce_conic`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Conic {
    /// A circle.
    Circle(Circle),
    /// An ellipse whose first radius is the semi-major axis.
    Ellipse(Ellipse),
    /// A parabola.
    Parabola(Parabola),
    /// A hyperbola; its positive branch lies along `theta`.
    Hyperbola(Hyperbola),
    /// An equation with no real solution, such as `x² + y² + 1 = 0`.
    Empty,
}

impl Conic {
    /// The implicit coefficients `[A, B, C, D, E, F]` of this conic.
    ///
    /// Circles and ellipses are normalized so that the constant term of
    /// the centered equation is `−1`; parabolas so that the linear term
    /// along their axis normal is `1`.
    pub fn coefficients(&self) -> [f64; 6] {
        match *self {
            Conic::Circle(c) => {
                let p = 1.0 / (c.radius * c.radius);
                translate_coefficients([p, 0.0, p, 0.0, 0.0, -1.0], c.center)
            }
            Conic::Ellipse(e) => {
                let p = 1.0 / (e.radii.x * e.radii.x);
                let q = 1.0 / (e.radii.y * e.radii.y);
                translate_coefficients(principal(p, q, e.x_rotation), e.center)
            }
            Conic::Hyperbola(h) => {
                let p = 1.0 / (h.a * h.a);
                let q = -1.0 / (h.b * h.b);
                translate_coefficients(principal(p, q, h.theta), h.center)
            }
            Conic::Parabola(p) => {
                // Y − a·X² in the frame of the parabola.
                let (s, c) = p.theta.sin_cos();
                let coefs = [-p.a * c * c, -2.0 * p.a * s * c, -p.a * s * s, -s, c, 0.0];
                translate_coefficients(coefs, p.vertex)
            }
            Conic::Empty => [1.0, 0.0, 1.0, 0.0, 0.0, 1.0],
        }
    }

    /// The name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Conic::Circle(_) => "circle",
            Conic::Ellipse(_) => "ellipse",
            Conic::Parabola(_) => "parabola",
            Conic::Hyperbola(_) => "hyperbola",
            Conic::Empty => "empty",
        }
    }
}

/// Centered coefficients of `p·X² + q·Y² − 1` in a frame rotated by `theta`.
fn principal(p: f64, q: f64, theta: f64) -> [f64; 6] {
    let (s, c) = theta.sin_cos();
    [
        p * c * c + q * s * s,
        2.0 * (p - q) * s * c,
        p * s * s + q * c * c,
        0.0,
        0.0,
        -1.0,
    ]
}

/// Rewrite an equation in `x − origin.x`, `y − origin.y` as one in `x`, `y`.
fn translate_coefficients(coefs: [f64; 6], origin: Point) -> [f64; 6] {
    let [a, b, c, d, e, f] = coefs;
    let (x, y) = (origin.x, origin.y);
    [
        a,
        b,
        c,
        d - 2.0 * a * x - b * y,
        e - b * x - 2.0 * c * y,
        a * x * x + b * x * y + c * y * y - d * x - e * y + f,
    ]
}

/// Classify a general second-degree equation and compute its pose.
///
/// Only the first six coefficients are read.
///
/// # Errors
///
/// [`GeomError::DegenerateInput`] when fewer than six coefficients are
/// given, or when the equation describes a degenerate conic: a point, a
/// line, or a pair of lines.
///
/// # Examples
///
/// ```
/// use planar::{reduce_conic, Conic, Point};
///
/// // x²/4 + y² = 1
/// let Conic::Ellipse(e) = reduce_conic(&[0.25, 0.0, 1.0, 0.0, 0.0, -1.0]).unwrap() else {
///     panic!("not an ellipse");
/// };
/// assert_eq!(e.center, Point::ORIGIN);
/// assert_eq!((e.radii.x, e.radii.y), (2.0, 1.0));
/// ```
pub fn reduce_conic(coefs: &[f64]) -> Result<Conic> {
    let &[a, b, c, d, e, f, ..] = coefs else {
        return Err(GeomError::DegenerateInput("conic needs 6 coefficients"));
    };

    let theta0 = if is_zero(b) {
        0.0
    } else if is_zero(a - c) {
        FRAC_PI_4
    } else {
        normalize_axis_angle(0.5 * b.atan2(a - c))
    };

    // Coefficients in the frame rotated by theta0.
    let (s, co) = theta0.sin_cos();
    let (sin2, cos2) = (2.0 * theta0).sin_cos();
    let a1 = a * co * co + b * s * co + c * s * s;
    let b1 = (c - a) * sin2 + b * cos2;
    let c1 = a * s * s - b * s * co + c * co * co;
    let d1 = d * co + e * s;
    let e1 = -d * s + e * co;
    if b1.abs() > ACCURACY * (a.abs() + b.abs() + c.abs()).max(1.0) {
        log_warn!("conic reduction left a cross term of {b1:e}");
    }
    let to_global = |x: f64, y: f64| Point::ORIGIN + Vec2::new(x, y).rotate(theta0);

    let conic = match (is_zero(a1), is_zero(c1)) {
        (true, true) => return Err(GeomError::DegenerateInput("conic equation is linear")),
        (true, false) => {
            // X = c2·Y² + e2·Y + f2
            if is_zero(d1) {
                return Err(GeomError::DegenerateInput("conic is a pair of parallel lines"));
            }
            let (c2, e2, f2) = (-c1 / d1, -e1 / d1, -f / d1);
            let yv = -e2 / (2.0 * c2);
            let xv = f2 - e2 * e2 / (4.0 * c2);
            Conic::Parabola(Parabola::new(to_global(xv, yv), c2, theta0 - FRAC_PI_2))
        }
        (false, true) => {
            // Y = a2·X² + d2·X + f2
            if is_zero(e1) {
                return Err(GeomError::DegenerateInput("conic is a pair of parallel lines"));
            }
            let (a2, d2, f2) = (-a1 / e1, -d1 / e1, -f / e1);
            let xv = -d2 / (2.0 * a2);
            let yv = f2 - d2 * d2 / (4.0 * a2);
            Conic::Parabola(Parabola::new(to_global(xv, yv), a2, theta0))
        }
        (false, false) => {
            let (x0, y0) = (-d1 / (2.0 * a1), -e1 / (2.0 * c1));
            let center = to_global(x0, y0);
            let k = a1 * x0 * x0 + c1 * y0 * y0 - f;
            if is_zero(k) {
                return Err(GeomError::DegenerateInput("conic is a point or a pair of lines"));
            }
            let (at, bt) = (k / a1, k / c1);
            if at > 0.0 && bt > 0.0 {
                if is_zero(at - bt) {
                    Conic::Circle(Circle::new(center, at.sqrt()))
                } else if at >= bt {
                    Conic::Ellipse(Ellipse::new(center, (at.sqrt(), bt.sqrt()), theta0))
                } else {
                    let theta = normalize_axis_angle(theta0 + FRAC_PI_2);
                    Conic::Ellipse(Ellipse::new(center, (bt.sqrt(), at.sqrt()), theta))
                }
            } else if at < 0.0 && bt < 0.0 {
                Conic::Empty
            } else if at > 0.0 {
                Conic::Hyperbola(Hyperbola::new(center, at.sqrt(), (-bt).sqrt(), theta0))
            } else {
                let theta = normalize_axis_angle(theta0 + FRAC_PI_2);
                Conic::Hyperbola(Hyperbola::new(center, bt.sqrt(), (-at).sqrt(), theta))
            }
        }
    };
    log_debug!("reduced conic to {}", conic.kind());
    Ok(conic)
}

/// The equation of the image of a conic under the linear part of
/// `transform`.
///
/// The translation of `transform` is ignored, so a conic centered on the
/// origin stays centered on it.
///
/// # Errors
///
/// [`GeomError::NonInvertible`] if the linear part is singular.
pub fn transform_centered(coefs: [f64; 6], transform: &Affine) -> Result<[f64; 6]> {
    let det = transform.determinant();
    if det.abs() < ACCURACY {
        return Err(GeomError::NonInvertible(*transform));
    }
    let [a, b, c, d, e, f] = coefs;
    let [m00, m01, m10, m11] = transform.linear_coeffs();
    let det2 = det * det;
    Ok([
        (a * m11 * m11 - b * m10 * m11 + c * m10 * m10) / det2,
        (b * (m00 * m11 + m01 * m10) - 2.0 * (a * m01 * m11 + c * m00 * m10)) / det2,
        (a * m01 * m01 - b * m00 * m01 + c * m00 * m00) / det2,
        (d * m11 - e * m10) / det,
        (e * m00 - d * m01) / det,
        f,
    ])
}

/// The equation of the image of a conic under `transform`.
///
/// # Errors
///
/// [`GeomError::NonInvertible`] if the linear part is singular.
pub fn transform_coefficients(coefs: [f64; 6], transform: &Affine) -> Result<[f64; 6]> {
    let centered = transform_centered(coefs, transform)?;
    Ok(translate_coefficients(
        centered,
        Point::ORIGIN + transform.translation(),
    ))
}
