// Copyright 2025 the Planar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Logging facade.
//!
//! With the `tracing` feature `log_debug!` and `log_warn!` are `tracing`'s
//! `debug!` and `warn!`. Without it they type-check their format arguments
//! and emit nothing.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug as log_debug, warn as log_warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        if false {
            let _ = format_args!($($arg)*);
        }
    }};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {log_debug, log_warn};
