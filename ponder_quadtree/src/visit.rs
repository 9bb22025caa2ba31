// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic pre- and post-order traversal with pruning.

use kurbo::Rect;

use crate::geom::{self, Quadrant};
use crate::tree::{NodeKind, QuadTree};
use crate::types::NodeId;

/// Control value returned by a pre-order visitor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the node's children as usual.
    Continue,
    /// Skip the node's children. Meaningful only on internal nodes.
    Prune,
}

impl<I, C> QuadTree<I, C> {
    /// Visit every node in pre-order, passing each node's id and extent.
    ///
    /// The visitor runs before descent, so containing nodes are seen before
    /// the nodes they contain, and returning [`Visit::Prune`] skips an
    /// internal node's children. Child quadrants are visited in ascending
    /// index order. The root is visited even when the tree is empty.
    pub fn visit<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, Rect) -> Visit,
    {
        self.visit_pre_rec(NodeId::ROOT, self.extent(), &mut visitor);
    }

    /// Visit every node in post-order: children always come first.
    ///
    /// Pruning is unavailable here by construction — skipping a subtree
    /// would leave any bottom-up aggregation without its inputs.
    pub fn visit_post<F>(&self, mut visitor: F)
    where
        F: FnMut(NodeId, Rect),
    {
        self.visit_post_rec(NodeId::ROOT, self.extent(), &mut visitor);
    }

    fn visit_pre_rec<F>(&self, id: NodeId, extent: Rect, visitor: &mut F)
    where
        F: FnMut(NodeId, Rect) -> Visit,
    {
        if visitor(id, extent) == Visit::Prune {
            return;
        }
        if let NodeKind::Internal(children) = &self.node(id).kind {
            for (qi, child) in children.iter().enumerate() {
                if let Some(child) = child {
                    let sub = geom::sub_extent(extent, Quadrant::ALL[qi]);
                    self.visit_pre_rec(*child, sub, visitor);
                }
            }
        }
    }

    fn visit_post_rec<F>(&self, id: NodeId, extent: Rect, visitor: &mut F)
    where
        F: FnMut(NodeId, Rect),
    {
        if let NodeKind::Internal(children) = &self.node(id).kind {
            for (qi, child) in children.iter().enumerate() {
                if let Some(child) = child {
                    let sub = geom::sub_extent(extent, Quadrant::ALL[qi]);
                    self.visit_post_rec(*child, sub, visitor);
                }
            }
        }
        visitor(id, extent);
    }
}
