// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Planar curve algebra.
//!
//! The planar library models curves of the Euclidean plane: lines, rays
//! and segments, circles and ellipses with their arcs, parabolas,
//! hyperbola branches, and composite curves chained from those. Every
//! curve is parametrized over an [`Interval`] that may be unbounded, can
//! be transformed by an [`Affine`] map, and can be clipped against a
//! [`Rect`] into a [`CurveSet`] of bounded pieces ready for export.
//!
//! General second-degree equations are turned into curves by
//! [`reduce_conic`].
//!
//! # Examples
//!
//! Clipping a hyperbola branch against a box:
//!
//! ```
//! use planar::{Hyperbola, ParamCurve, Point, Rect};
//!
//! let branch = Hyperbola::new((50.0, 50.0), 10.0, 10.0, 0.0).positive_branch();
//! assert!(!branch.is_bounded());
//! let pieces = branch.clip(&Rect::new(0.0, 0.0, 70.0, 100.0));
//! assert_eq!(pieces.len(), 1);
//! let arc = &pieces.curves()[0];
//! assert!(arc.is_bounded());
//! assert!(arc.contains(Point::new(60.0, 50.0)));
//! ```
//!
//! Oriented curves split the plane:
//!
//! ```
//! use planar::{Circle, OrientedCurve, ParamCurve, Point, PolyCurve};
//!
//! let circle = Circle::new((0.0, 0.0), 1.0);
//! assert!(circle.is_inside(Point::ORIGIN));
//! assert!(!circle.reversed().is_inside(Point::ORIGIN));
//!
//! let square = PolyCurve::from_points(
//!     &[(0.0, 0.0).into(), (1.0, 0.0).into(), (1.0, 1.0).into(), (0.0, 1.0).into()],
//!     true,
//! )
//! .unwrap();
//! assert!(square.is_inside(Point::new(0.5, 0.5)));
//! ```
//!
//! # Features
//!
//! This crate either uses the standard library or the [`libm`] crate for
//! math functionality. The `std` feature is enabled by default, but can be
//! disabled, as long as the `libm` feature is enabled. The `alloc` crate is
//! used regardless. The `tracing` feature routes the crate's diagnostics to
//! [`tracing`].
//!
//! [`libm`]: https://docs.rs/libm
//! [`tracing`]: https://docs.rs/tracing

#![forbid(unsafe_code)]
#![deny(missing_docs, clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::doc_markdown, rustdoc::broken_intra_doc_links)]
#![allow(
    clippy::many_single_char_names,
    clippy::excessive_precision,
    reason = "formulas read better with the usual one-letter names"
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod affine;
pub mod angle;
mod arc;
mod bezpath;
mod circle;
mod clip;
pub mod common;
mod conic;
mod curve;
mod ellipse;
mod error;
mod hyperbola;
mod interval;
mod line;
mod log;
mod parabola;
mod param_curve;
mod point;
mod poly_curve;
mod polygon;
mod rect;
mod region;
pub mod tolerance;
mod vec2;

pub use crate::affine::*;
pub use crate::arc::*;
pub use crate::bezpath::*;
pub use crate::circle::*;
pub use crate::clip::*;
pub use crate::conic::*;
pub use crate::curve::*;
pub use crate::ellipse::*;
pub use crate::error::*;
pub use crate::hyperbola::*;
pub use crate::interval::*;
pub use crate::line::*;
pub use crate::parabola::*;
pub use crate::param_curve::*;
pub use crate::point::*;
pub use crate::poly_curve::*;
pub use crate::polygon::*;
pub use crate::rect::*;
pub use crate::region::*;
pub use crate::vec2::*;
