// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared across the crate: node identifiers and the
//! coordinate accessor capability.

use kurbo::Point;

/// Default minimum side length below which a quadrant may no longer split.
///
/// Used by [`QuadTree::new`](crate::QuadTree::new); pass an explicit limit
/// to [`QuadTree::with_resolution_limit`](crate::QuadTree::with_resolution_limit)
/// to override it.
pub const DEFAULT_RESOLUTION_LIMIT: f64 = 1.0;

/// Identifier for a node in a [`QuadTree`](crate::QuadTree).
///
/// This is a small, copyable handle into the tree's node arena. The tree
/// supports no deletion, so a `NodeId` obtained from a tree stays valid
/// for that tree's whole lifetime. Ids from one tree are meaningless in
/// another.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    #[allow(
        clippy::cast_possible_truncation,
        reason = "node ids are intentionally 32-bit; trees this large are out of scope"
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Coordinate accessor capability supplied at build time.
///
/// The tree stores opaque item handles and never inspects them itself;
/// whenever it needs a position it asks the accessor it was built with.
/// Items must keep stable coordinates for as long as they are indexed.
///
/// Any `Fn(&I) -> Point` closure or function is an accessor:
///
/// ```
/// use kurbo::Point;
/// use ponder_quadtree::Coords;
///
/// let by_pair = |p: &(f64, f64)| Point::new(p.0, p.1);
/// assert_eq!(by_pair.x(&(2.0, 5.0)), 2.0);
/// assert_eq!(by_pair.y(&(2.0, 5.0)), 5.0);
/// ```
pub trait Coords<I> {
    /// The x coordinate of `item`.
    fn x(&self, item: &I) -> f64;

    /// The y coordinate of `item`.
    fn y(&self, item: &I) -> f64;

    /// Both coordinates of `item` as a [`Point`].
    fn point(&self, item: &I) -> Point {
        Point::new(self.x(item), self.y(item))
    }
}

impl<I, F: Fn(&I) -> Point> Coords<I> for F {
    fn x(&self, item: &I) -> f64 {
        self(item).x
    }

    fn y(&self, item: &I) -> f64 {
        self(item).y
    }

    fn point(&self, item: &I) -> Point {
        self(item)
    }
}
