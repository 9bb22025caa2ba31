// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fail-fast construction errors.

use kurbo::Rect;

/// Errors reported when constructing a [`QuadTree`](crate::QuadTree).
///
/// Both conditions are rejected up front: a non-positive resolution limit
/// would let splitting recurse forever, and an inverted extent would make
/// every containment test vacuously false.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    /// The resolution limit was zero, negative, or not finite.
    InvalidResolutionLimit(f64),
    /// The extent had `min > max` on some axis, or a NaN corner.
    InvalidExtent(Rect),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidResolutionLimit(limit) => {
                write!(f, "resolution limit must be finite and positive, got {limit}")
            }
            Self::InvalidExtent(extent) => {
                write!(
                    f,
                    "extent must have min <= max on both axes, got ({}, {})..({}, {})",
                    extent.x0, extent.y0, extent.x1, extent.y1
                )
            }
        }
    }
}

impl core::error::Error for Error {}
