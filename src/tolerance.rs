// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The numeric tolerance shared by every geometric predicate.
//!
//! Equality of points, containment of a point in a curve, colinearity and
//! the degeneracy checks performed by constructors all compare against
//! [`ACCURACY`] instead of testing for exact equality. Two predicates may
//! still disagree on values sitting right at the threshold; that is a
//! property of floating point and is not corrected anywhere.

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Absolute tolerance used for all equality and containment tests.
pub const ACCURACY: f64 = 1e-12;

/// Resolution of a double root found by a quadratic solve, `√ACCURACY`.
///
/// A tangency that is not exact in floating point comes back as two
/// roots about this far apart.
pub const ROOT_ACCURACY: f64 = 1e-6;

/// Tolerance on local parameters when snapping them to the ends of a
/// composite piece.
pub const PARAM_ACCURACY: f64 = 1e-9;

/// Returns `true` if `x` is within [`ACCURACY`] of zero.
#[inline]
pub fn is_zero(x: f64) -> bool {
    x.abs() < ACCURACY
}

/// Returns `true` if `a` and `b` differ by less than [`ACCURACY`].
///
/// Infinite values compare equal when they have the same sign.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() < ACCURACY
}

#[cfg(test)]
mod tests {
    use super::{approx_eq, is_zero, ACCURACY, PARAM_ACCURACY, ROOT_ACCURACY};

    #[test]
    fn tolerance_predicates() {
        assert!(is_zero(0.5 * ACCURACY));
        assert!(!is_zero(2.0 * ACCURACY));
        assert!(approx_eq(1.0, 1.0 + 1e-13));
        assert!(approx_eq(f64::INFINITY, f64::INFINITY));
        assert!(!approx_eq(f64::INFINITY, f64::NEG_INFINITY));
        assert!(!approx_eq(f64::NAN, f64::NAN));
    }

    #[test]
    fn coarse_tolerances_are_ordered() {
        assert!((ROOT_ACCURACY * ROOT_ACCURACY - ACCURACY).abs() < 1e-24);
        assert!(ACCURACY < PARAM_ACCURACY && PARAM_ACCURACY < ROOT_ACCURACY);
    }
}
