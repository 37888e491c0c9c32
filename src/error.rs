// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::Affine;

/// Errors reported by geometric constructions and exports.
///
/// Queries whose answer is legitimately undefined (the position of a point
/// that is not on a curve, the intersection of parallel lines) do not use
/// this type; they return `None` or `NaN` instead.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum GeomError {
    /// The operation needs a bounded curve, for example polyline or path
    /// export. Clip or take a sub-curve first.
    #[error("operation requires a bounded shape")]
    UnboundedShape,
    /// The transform has a determinant within tolerance of zero.
    #[error("affine transform is not invertible: {0:?}")]
    NonInvertible(Affine),
    /// A shape was constructed from invalid data.
    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),
    /// A poly-curve piece does not start where the previous piece ends.
    #[error("piece {index} starts {gap} away from the end of the previous piece")]
    Discontinuous {
        /// Index the rejected piece would have had.
        index: usize,
        /// Distance between the previous end and the new start.
        gap: f64,
    },
}

/// Result type with [`GeomError`] as the default error.
pub type Result<T, E = GeomError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::GeomError;
    use crate::Affine;

    #[test]
    fn error_messages() {
        assert_eq!(
            GeomError::UnboundedShape.to_string(),
            "operation requires a bounded shape"
        );
        let msg = GeomError::NonInvertible(Affine::scale(0.0)).to_string();
        assert!(msg.starts_with("affine transform is not invertible"), "{msg}");
        let msg = GeomError::Discontinuous { index: 2, gap: 0.5 }.to_string();
        assert_eq!(msg, "piece 2 starts 0.5 away from the end of the previous piece");
    }
}
