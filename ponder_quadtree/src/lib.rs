// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ponder Quadtree: a Kurbo-native, resolution-limited point quadtree.
//!
//! The tree partitions a fixed rectangular extent into four quadrants per
//! node, splitting leaves as items arrive until further subdivision would
//! produce cells smaller than a configured resolution limit. On top of
//! that structure it offers:
//!
//! - Incremental insertion of items carrying arbitrary payloads, with
//!   positions read through a [`Coords`] accessor (any
//!   `Fn(&I) -> kurbo::Point` works).
//! - Branch-and-bound nearest-neighbor search ([`QuadTree::nearest`]).
//! - Rectangular and circular range queries ([`QuadTree::in_region`],
//!   [`QuadTree::in_circle`]).
//! - Pre- and post-order traversal with pruning ([`QuadTree::visit`],
//!   [`QuadTree::visit_post`]).
//! - Outlier-aware density estimation per region
//!   ([`QuadTree::density_areas`]).
//! - Count-weighted aggregation of per-item value vectors
//!   ([`QuadTree::local_values`]).
//!
//! Items are never moved or removed once inserted; rebuild the tree when
//! the underlying data changes. Items outside the extent are dropped at
//! insertion. Floating point inputs are assumed finite (no NaNs).
//!
//! ## API overview
//!
//! - [`QuadTree`]: the tree itself, generic over the item type and its
//!   coordinate accessor.
//! - [`Coords`]: how the tree reads an item's position.
//! - [`NodeId`]: handle of a node, valid for the lifetime of the tree.
//! - [`Visit`]: traversal control (continue or prune).
//! - [`DensityOptions`] / [`AreaRecord`]: density estimation inputs and
//!   outputs.
//! - [`ExtentKey`]: ordered map key wrapping a node extent, used by
//!   [`QuadTree::local_values`].
//! - [`geom`]: the quadrant and extent arithmetic the tree is built on.
//!
//! ### Minimal usage
//!
//! ```
//! use ponder_quadtree::{DensityOptions, QuadTree};
//! use kurbo::{Point, Rect};
//!
//! let points = vec![
//!     Point::new(0.6, 0.6),
//!     Point::new(0.8, 0.6),
//!     Point::new(0.8, 0.7),
//! ];
//! let tree = QuadTree::build(
//!     points,
//!     Rect::new(0.0, 0.0, 1.0, 1.0),
//!     |p: &Point| *p,
//!     0.25,
//! )
//! .unwrap();
//!
//! // Nearest neighbor, unbounded.
//! let (item, distance) = tree.nearest(0.65, 0.6, None).unwrap();
//! assert_eq!(*item, Point::new(0.6, 0.6));
//! assert!((distance - 0.05).abs() < 1e-12);
//!
//! // Everything in the high quadrant.
//! assert_eq!(tree.in_region(Rect::new(0.5, 0.5, 1.0, 1.0)).len(), 3);
//!
//! // One density record per occupied region, containers first.
//! let areas = tree.density_areas(DensityOptions::default());
//! assert_eq!(areas[0].extent, tree.extent());
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Without the `std` feature the
//! `libm` feature must be enabled for the floating point math the density
//! pass needs.

#![no_std]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("ponder_quadtree requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod aggregate;
mod density;
mod error;
pub mod geom;
mod query;
mod tree;
mod types;
mod visit;

pub use aggregate::ExtentKey;
pub use density::{AreaRecord, DensityOptions, DEFAULT_OUTLIER_ALLOWANCE};
pub use error::Error;
pub use geom::Quadrant;
pub use tree::QuadTree;
pub use types::{Coords, NodeId, DEFAULT_RESOLUTION_LIMIT};
pub use visit::Visit;
