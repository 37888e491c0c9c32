// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Angle normalization helpers.

use core::f64::consts::{PI, TAU};

#[cfg(not(feature = "std"))]
use crate::common::FloatFuncs;

/// Normalize an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle - TAU * (angle / TAU).floor();
    // Rounding can land exactly on 2π for tiny negative inputs.
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Normalize an angle into `(-π, π]`.
#[inline]
pub fn normalize_signed_angle(angle: f64) -> f64 {
    let a = normalize_angle(angle);
    if a > PI {
        a - TAU
    } else {
        a
    }
}

/// Normalize an angle into `[0, π)`, the range of an undirected axis.
#[inline]
pub fn normalize_axis_angle(angle: f64) -> f64 {
    let a = angle - PI * (angle / PI).floor();
    if a >= PI {
        0.0
    } else {
        a
    }
}

/// Returns `true` if `angle` is on the arc that starts at `start` and
/// sweeps `sweep` radians (counter-clockwise when positive).
pub fn sweep_contains(start: f64, sweep: f64, angle: f64) -> bool {
    use crate::tolerance::ACCURACY;
    if sweep.abs() >= TAU - ACCURACY {
        return true;
    }
    let offset = if sweep >= 0.0 {
        normalize_angle(angle - start)
    } else {
        normalize_angle(start - angle)
    };
    offset <= sweep.abs() + ACCURACY || offset >= TAU - ACCURACY
}
