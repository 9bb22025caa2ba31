// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The tree model: arena-backed nodes, construction, and insertion.

use alloc::vec;
use alloc::vec::Vec;
use core::mem;
use kurbo::{Point, Rect};

use crate::error::Error;
use crate::geom::{self, Quadrant};
use crate::types::{Coords, DEFAULT_RESOLUTION_LIMIT, NodeId};

/// A node's payload: empty, a leaf holding items, or four child slots.
///
/// Only the root is ever `Empty`. A leaf holding more than one item either
/// holds coincident duplicates or sits in a resolution-collapsed quadrant
/// that may not split further.
pub(crate) enum NodeKind<I> {
    Empty,
    Leaf(Vec<I>),
    Internal([Option<NodeId>; 4]),
}

pub(crate) struct Node<I> {
    /// Number of items reachable beneath this node.
    pub(crate) count: usize,
    pub(crate) kind: NodeKind<I>,
}

/// An adaptive, resolution-limited 2D point quadtree.
///
/// The tree stores opaque item handles of type `I` and asks the coordinate
/// accessor `C` (see [`Coords`]) for positions. It grows by [`insert`],
/// never shrinks, and all queries are pure reads.
///
/// [`insert`]: QuadTree::insert
pub struct QuadTree<I, C> {
    extent: Rect,
    resolution_limit: f64,
    coords: C,
    // Slot 0 is the root; nodes are never freed.
    nodes: Vec<Node<I>>,
}

impl<I, C> core::fmt::Debug for QuadTree<I, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let leaves = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Leaf(_)))
            .count();
        f.debug_struct("QuadTree")
            .field("extent", &self.extent)
            .field("resolution_limit", &self.resolution_limit)
            .field("items", &self.len())
            .field("nodes", &self.nodes.len())
            .field("leaves", &leaves)
            .finish_non_exhaustive()
    }
}

impl<I, C: Coords<I>> QuadTree<I, C> {
    /// Create an empty tree over `extent` with [`DEFAULT_RESOLUTION_LIMIT`].
    pub fn new(extent: Rect, coords: C) -> Result<Self, Error> {
        Self::with_resolution_limit(extent, coords, DEFAULT_RESOLUTION_LIMIT)
    }

    /// Create an empty tree over `extent` with an explicit resolution limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResolutionLimit`] unless the limit is finite
    /// and positive, and [`Error::InvalidExtent`] unless the extent has
    /// `min <= max` on both axes.
    pub fn with_resolution_limit(
        extent: Rect,
        coords: C,
        resolution_limit: f64,
    ) -> Result<Self, Error> {
        if !(resolution_limit > 0.0) || !resolution_limit.is_finite() {
            return Err(Error::InvalidResolutionLimit(resolution_limit));
        }
        // Negated comparisons so NaN corners are rejected too.
        if !(extent.x0 <= extent.x1) || !(extent.y0 <= extent.y1) {
            return Err(Error::InvalidExtent(extent));
        }
        Ok(Self {
            extent,
            resolution_limit,
            coords,
            nodes: vec![Node {
                count: 0,
                kind: NodeKind::Empty,
            }],
        })
    }

    /// Build a tree by inserting `items` in order.
    ///
    /// Items whose coordinates fall outside `extent` are dropped, exactly
    /// as [`insert`](Self::insert) drops them.
    ///
    /// # Errors
    ///
    /// Same conditions as [`with_resolution_limit`](Self::with_resolution_limit).
    pub fn build<T>(items: T, extent: Rect, coords: C, resolution_limit: f64) -> Result<Self, Error>
    where
        T: IntoIterator<Item = I>,
    {
        let mut tree = Self::with_resolution_limit(extent, coords, resolution_limit)?;
        for item in items {
            let _ = tree.insert(item);
        }
        Ok(tree)
    }

    /// Insert a single item, splitting nodes as needed.
    ///
    /// Returns `false` (and drops the item) when its coordinates lie
    /// outside the tree's extent; the tree's count is unchanged in that
    /// case. Coincident duplicates accumulate in one leaf, and quadrants
    /// narrower than the resolution limit on either axis stop splitting
    /// and accumulate instead.
    pub fn insert(&mut self, item: I) -> bool {
        let p = self.coords.point(&item);
        if !geom::contains(self.extent, p.x, p.y) {
            return false;
        }
        self.insert_at(NodeId::ROOT, self.extent, item, p);
        true
    }

    fn insert_at(&mut self, id: NodeId, extent: Rect, item: I, p: Point) {
        enum Step {
            BecomeLeaf,
            Append,
            Descend(NodeId, Quadrant),
            NewChild(Quadrant),
            Split,
        }

        self.nodes[id.idx()].count += 1;
        let step = match &self.nodes[id.idx()].kind {
            NodeKind::Empty => Step::BecomeLeaf,
            NodeKind::Internal(children) => {
                let q = geom::quadrant_of(extent, p.x, p.y);
                match children[q.index()] {
                    Some(child) => Step::Descend(child, q),
                    None => Step::NewChild(q),
                }
            }
            NodeKind::Leaf(items) => {
                if extent.width() < self.resolution_limit
                    || extent.height() < self.resolution_limit
                {
                    // Resolution-collapsed: splitting is geometrically
                    // disallowed, so the leaf just grows.
                    Step::Append
                } else {
                    // All current items share one position; checking the
                    // representative is enough.
                    let existing = self.coords.point(&items[0]);
                    if existing.x == p.x && existing.y == p.y {
                        Step::Append
                    } else {
                        Step::Split
                    }
                }
            }
        };

        match step {
            Step::BecomeLeaf => {
                self.nodes[id.idx()].kind = NodeKind::Leaf(vec![item]);
            }
            Step::Append => {
                let NodeKind::Leaf(items) = &mut self.nodes[id.idx()].kind else {
                    unreachable!("append step only applies to leaves");
                };
                items.push(item);
            }
            Step::Descend(child, q) => {
                self.insert_at(child, geom::sub_extent(extent, q), item, p);
            }
            Step::NewChild(q) => {
                let leaf = self.alloc_leaf(item);
                let NodeKind::Internal(children) = &mut self.nodes[id.idx()].kind else {
                    unreachable!("new-child step only applies to internal nodes");
                };
                children[q.index()] = Some(leaf);
            }
            Step::Split => self.split_and_insert(id, extent, item, p),
        }
    }

    /// Convert a splittable leaf into an internal node, moving its items
    /// into the child for their shared position, then place the new item.
    fn split_and_insert(&mut self, id: NodeId, extent: Rect, item: I, p: Point) {
        let NodeKind::Leaf(items) = &mut self.nodes[id.idx()].kind else {
            unreachable!("split step only applies to leaves");
        };
        let moved_items = mem::take(items);
        let old = self.coords.point(&moved_items[0]);
        let oq = geom::quadrant_of(extent, old.x, old.y);

        // The node's count was already incremented for the incoming item.
        let moved = self.alloc(Node {
            count: moved_items.len(),
            kind: NodeKind::Leaf(moved_items),
        });
        let mut children = [None; 4];
        children[oq.index()] = Some(moved);
        self.nodes[id.idx()].kind = NodeKind::Internal(children);

        let tq = geom::quadrant_of(extent, p.x, p.y);
        if tq == oq {
            self.insert_at(moved, geom::sub_extent(extent, oq), item, p);
        } else {
            let leaf = self.alloc_leaf(item);
            let NodeKind::Internal(children) = &mut self.nodes[id.idx()].kind else {
                unreachable!("node was just made internal");
            };
            children[tq.index()] = Some(leaf);
        }
    }

    fn alloc(&mut self, node: Node<I>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn alloc_leaf(&mut self, item: I) -> NodeId {
        self.alloc(Node {
            count: 1,
            kind: NodeKind::Leaf(vec![item]),
        })
    }
}

impl<I, C> QuadTree<I, C> {
    /// The root node. Present even in an empty tree.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The tree's extent (root box).
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// The minimum quadrant side length that may still be split.
    pub fn resolution_limit(&self) -> f64 {
        self.resolution_limit
    }

    /// The coordinate accessor the tree was built with.
    pub fn coords(&self) -> &C {
        &self.coords
    }

    /// Total number of indexed items.
    pub fn len(&self) -> usize {
        self.nodes[NodeId::ROOT.idx()].count
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of items reachable beneath `id`.
    pub fn node_count(&self, id: NodeId) -> usize {
        self.nodes[id.idx()].count
    }

    /// Whether `id` is a leaf (holds items directly).
    pub fn node_is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.idx()].kind, NodeKind::Leaf(_))
    }

    /// The four child slots of `id` in quadrant order, or `None` if `id`
    /// is not an internal node.
    pub fn node_children(&self, id: NodeId) -> Option<&[Option<NodeId>; 4]> {
        match &self.nodes[id.idx()].kind {
            NodeKind::Internal(children) => Some(children),
            _ => None,
        }
    }

    /// The items held directly by `id`. Empty unless `id` is a leaf.
    pub fn node_items(&self, id: NodeId) -> &[I] {
        match &self.nodes[id.idx()].kind {
            NodeKind::Leaf(items) => items,
            _ => &[],
        }
    }

    /// Every item in the subtree rooted at `id`, in quadrant order.
    pub fn subtree_items(&self, id: NodeId) -> Vec<&I> {
        let mut out = Vec::with_capacity(self.node_count(id));
        self.collect_items(id, &mut out);
        out
    }

    pub(crate) fn collect_items<'t>(&'t self, id: NodeId, out: &mut Vec<&'t I>) {
        match &self.nodes[id.idx()].kind {
            NodeKind::Empty => {}
            NodeKind::Leaf(items) => out.extend(items.iter()),
            NodeKind::Internal(children) => {
                for child in children.iter().flatten() {
                    self.collect_items(*child, out);
                }
            }
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<I> {
        &self.nodes[id.idx()]
    }

    /// Number of arena slots, for per-node caches.
    pub(crate) fn node_slots(&self) -> usize {
        self.nodes.len()
    }
}
