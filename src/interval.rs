// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameter domains.

use core::f64::consts::PI;

use crate::tolerance::ACCURACY;

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// A closed parameter interval `[t0, t1]` whose ends may be infinite.
///
/// Every curve exposes its domain as an `Interval`. Composite curves
/// address each piece through the unit segment `[0, 1]`; [`from_unit`] and
/// [`to_unit`] map between the two, which is what lets a composite hold
/// rays, lines and other unbounded pieces.
///
/// [`from_unit`]: Interval::from_unit
/// [`to_unit`]: Interval::to_unit
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    /// Lower end.
    pub t0: f64,
    /// Upper end.
    pub t1: f64,
}

impl Interval {
    /// The whole real line.
    pub const REAL: Interval = Interval::new(f64::NEG_INFINITY, f64::INFINITY);

    /// The unit interval `[0, 1]`.
    pub const UNIT: Interval = Interval::new(0.0, 1.0);

    /// Create a new interval.
    #[inline]
    pub const fn new(t0: f64, t1: f64) -> Interval {
        Interval { t0, t1 }
    }

    /// Are both ends finite?
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.t0.is_finite() && self.t1.is_finite()
    }

    /// `t1 - t0`, infinite for unbounded domains.
    #[inline]
    pub fn length(&self) -> f64 {
        self.t1 - self.t0
    }

    /// Does the interval contain `t`, with [`ACCURACY`] slack at the ends?
    #[inline]
    pub fn contains(&self, t: f64) -> bool {
        t >= self.t0 - ACCURACY && t <= self.t1 + ACCURACY
    }

    /// Clamp `t` into the interval.
    #[inline]
    pub fn clamp(&self, t: f64) -> f64 {
        t.max(self.t0).min(self.t1)
    }

    /// Map `u` in `[0, 1]` onto the interval.
    ///
    /// Finite intervals use the affine map. A half-infinite interval uses a
    /// rational map and the real line uses `tan`, so the infinite ends are
    /// reached exactly at `u = 0` and `u = 1`.
    pub fn from_unit(&self, u: f64) -> f64 {
        let u = u.max(0.0).min(1.0);
        match (self.t0.is_finite(), self.t1.is_finite()) {
            (true, true) => self.t0 + u * (self.t1 - self.t0),
            (true, false) => {
                if u >= 1.0 {
                    f64::INFINITY
                } else {
                    self.t0 + u / (1.0 - u)
                }
            }
            (false, true) => {
                if u <= 0.0 {
                    f64::NEG_INFINITY
                } else {
                    self.t1 - (1.0 - u) / u
                }
            }
            (false, false) => {
                if u <= 0.0 {
                    f64::NEG_INFINITY
                } else if u >= 1.0 {
                    f64::INFINITY
                } else {
                    (PI * (u - 0.5)).tan()
                }
            }
        }
    }

    /// Inverse of [`Interval::from_unit`].
    pub fn to_unit(&self, t: f64) -> f64 {
        let t = self.clamp(t);
        match (self.t0.is_finite(), self.t1.is_finite()) {
            (true, true) => {
                let len = self.t1 - self.t0;
                if len.abs() < ACCURACY {
                    0.0
                } else {
                    (t - self.t0) / len
                }
            }
            (true, false) => {
                if t == f64::INFINITY {
                    1.0
                } else {
                    (t - self.t0) / (1.0 + t - self.t0)
                }
            }
            (false, true) => {
                if t == f64::NEG_INFINITY {
                    0.0
                } else {
                    1.0 / (1.0 + self.t1 - t)
                }
            }
            (false, false) => {
                if t == f64::INFINITY {
                    1.0
                } else if t == f64::NEG_INFINITY {
                    0.0
                } else {
                    t.atan() / PI + 0.5
                }
            }
        }
    }

    /// A parameter strictly between `a` and `b` (`a < b`), finite even
    /// when either end is infinite.
    pub(crate) fn interior_between(a: f64, b: f64) -> f64 {
        match (a.is_finite(), b.is_finite()) {
            (true, true) => 0.5 * (a + b),
            (true, false) => a + a.abs().max(1.0),
            (false, true) => b - b.abs().max(1.0),
            (false, false) => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Interval;

    fn assert_round_trip(i: Interval, t: f64) {
        let back = i.from_unit(i.to_unit(t));
        assert!((back - t).abs() < 1e-9 * t.abs().max(1.0), "{i:?}: {t} -> {back}");
    }

    #[test]
    fn unit_mapping_finite() {
        let i = Interval::new(2.0, 6.0);
        assert_eq!(i.from_unit(0.0), 2.0);
        assert_eq!(i.from_unit(1.0), 6.0);
        assert_eq!(i.from_unit(0.25), 3.0);
        assert_eq!(i.to_unit(5.0), 0.75);
        assert_eq!(i.from_unit(1.5), 6.0);
    }

    #[test]
    fn unit_mapping_unbounded() {
        let ray = Interval::new(0.0, f64::INFINITY);
        assert_eq!(ray.from_unit(0.0), 0.0);
        assert_eq!(ray.from_unit(1.0), f64::INFINITY);
        assert_eq!(ray.from_unit(0.5), 1.0);
        let inv = Interval::new(f64::NEG_INFINITY, 0.0);
        assert_eq!(inv.from_unit(0.0), f64::NEG_INFINITY);
        assert_eq!(inv.from_unit(1.0), 0.0);
        assert_eq!(inv.from_unit(0.5), -1.0);
        assert_eq!(Interval::REAL.from_unit(0.0), f64::NEG_INFINITY);
        assert_eq!(Interval::REAL.from_unit(1.0), f64::INFINITY);
        assert!(Interval::REAL.from_unit(0.5).abs() < 1e-15);
        for t in [-100.0, -1.0, 0.0, 0.3, 7.0] {
            assert_round_trip(Interval::REAL, t);
            assert_round_trip(Interval::new(-200.0, f64::INFINITY), t);
            assert_round_trip(Interval::new(f64::NEG_INFINITY, 10.0), t);
        }
    }

    #[test]
    fn interior_points() {
        assert_eq!(Interval::interior_between(0.0, 2.0), 1.0);
        assert!(Interval::interior_between(f64::NEG_INFINITY, -3.0) < -3.0);
        assert!(Interval::interior_between(5.0, f64::INFINITY) > 5.0);
        assert!(Interval::interior_between(f64::NEG_INFINITY, f64::INFINITY).is_finite());
    }
}
