// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nearest-neighbor and range queries.
//!
//! Both query families are pure reads built on the geometry helpers:
//! nearest-neighbor search is branch-and-bound over quadrants, and range
//! queries short-circuit whole subtrees once a query box envelops them.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::geom::{self, Quadrant};
use crate::tree::{NodeKind, QuadTree};
use crate::types::{Coords, NodeId};

impl<I, C: Coords<I>> QuadTree<I, C> {
    /// Find the item closest to `(x, y)` by Euclidean distance, together
    /// with that distance.
    ///
    /// With a `radius`, only items at distance `<= radius` are considered
    /// and `None` is returned when nothing is near enough. On an empty
    /// tree the result is always `None`.
    ///
    /// Ties are broken by visitation order: the quadrant containing the
    /// query point is searched first, then the remaining touched quadrants
    /// in ascending index order, and within a leaf items keep insertion
    /// order. A later candidate replaces an earlier one only when strictly
    /// closer.
    pub fn nearest(&self, x: f64, y: f64, radius: Option<f64>) -> Option<(&I, f64)> {
        if self.is_empty() {
            return None;
        }
        self.nearest_rec(NodeId::ROOT, self.extent(), Point::new(x, y), radius)
    }

    fn nearest_rec(
        &self,
        id: NodeId,
        extent: Rect,
        target: Point,
        radius: Option<f64>,
    ) -> Option<(&I, f64)> {
        match &self.node(id).kind {
            NodeKind::Empty => None,
            NodeKind::Leaf(items) => {
                let mut best: Option<(&I, f64)> = None;
                for item in items {
                    let d = self.coords().point(item).distance(target);
                    if radius.is_none_or(|r| d <= r) && best.is_none_or(|(_, b)| d < b) {
                        best = Some((item, d));
                    }
                }
                best
            }
            NodeKind::Internal(children) => {
                // Descend into the containing quadrant first: it tightens
                // the bound fastest.
                let fq = geom::quadrant_of(extent, target.x, target.y);
                let mut best = match children[fq.index()] {
                    Some(child) => {
                        self.nearest_rec(child, geom::sub_extent(extent, fq), target, radius)
                    }
                    None => None,
                };

                // Every other quadrant is pruned against the current best
                // distance (or the caller's radius while nothing is found).
                let bound = best.map(|(_, d)| d).or(radius);
                let quads = match bound {
                    Some(r) => geom::touched_quadrants(
                        extent,
                        Rect::new(target.x - r, target.y - r, target.x + r, target.y + r),
                    ),
                    None => Quadrant::ALL.to_vec(),
                };
                for q in quads {
                    if q == fq {
                        continue;
                    }
                    let Some(child) = children[q.index()] else {
                        continue;
                    };
                    let bound = best.map(|(_, d)| d).or(radius);
                    if let Some((item, d)) =
                        self.nearest_rec(child, geom::sub_extent(extent, q), target, bound)
                        && best.is_none_or(|(_, b)| d < b)
                    {
                        best = Some((item, d));
                    }
                }
                best
            }
        }
    }

    /// Every item whose coordinates lie within the closed rectangle
    /// `region`.
    ///
    /// Quadrants that `region` does not touch are never descended into,
    /// and once `region` envelops a node's whole extent the subtree's
    /// items are collected without per-item tests.
    pub fn in_region(&self, region: Rect) -> Vec<&I> {
        let mut out = Vec::new();
        self.in_region_rec(NodeId::ROOT, self.extent(), region, &mut out);
        out
    }

    fn in_region_rec<'t>(
        &'t self,
        id: NodeId,
        extent: Rect,
        region: Rect,
        out: &mut Vec<&'t I>,
    ) {
        match &self.node(id).kind {
            NodeKind::Empty => {}
            NodeKind::Leaf(items) => {
                for item in items {
                    let p = self.coords().point(item);
                    if geom::contains(region, p.x, p.y) {
                        out.push(item);
                    }
                }
            }
            NodeKind::Internal(children) => {
                let touched = geom::touched_quadrants(extent, region);
                if touched.len() == 4 && geom::envelops(region, extent) {
                    self.collect_items(id, out);
                    return;
                }
                for q in touched {
                    if let Some(child) = children[q.index()] {
                        self.in_region_rec(child, geom::sub_extent(extent, q), region, out);
                    }
                }
            }
        }
    }

    /// Every item within Euclidean distance `radius` of `(cx, cy)`,
    /// boundary inclusive.
    ///
    /// Implemented as [`in_region`](Self::in_region) over the circle's
    /// bounding square followed by a distance filter.
    pub fn in_circle(&self, cx: f64, cy: f64, radius: f64) -> Vec<&I> {
        let center = Point::new(cx, cy);
        let bounding = Rect::new(cx - radius, cy - radius, cx + radius, cy + radius);
        self.in_region(bounding)
            .into_iter()
            .filter(|item| self.coords().point(item).distance(center) <= radius)
            .collect()
    }
}
