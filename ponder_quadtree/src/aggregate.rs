// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Count-weighted aggregation of per-item values over tree regions.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::geom::{self, Quadrant};
use crate::tree::{NodeKind, QuadTree};
use crate::types::{Coords, NodeId};

/// A node extent encoded for use as an ordered map key.
///
/// `f64` is not [`Ord`], so extents are keyed by the IEEE 754 bit patterns
/// of their four edges. Extents produced by subdividing a common root
/// compare equal exactly when they are the same region.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtentKey([u64; 4]);

impl From<Rect> for ExtentKey {
    fn from(r: Rect) -> Self {
        Self([
            r.x0.to_bits(),
            r.y0.to_bits(),
            r.x1.to_bits(),
            r.y1.to_bits(),
        ])
    }
}

impl ExtentKey {
    /// The extent this key was built from.
    pub fn extent(&self) -> Rect {
        Rect::new(
            f64::from_bits(self.0[0]),
            f64::from_bits(self.0[1]),
            f64::from_bits(self.0[2]),
            f64::from_bits(self.0[3]),
        )
    }
}

impl<I, C: Coords<I>> QuadTree<I, C> {
    /// Aggregate a per-item value vector over every region of the tree.
    ///
    /// `values_fn` maps an item to a vector of values; all items must
    /// yield vectors of the same length. Each unpruned node gets one
    /// entry: leaf-like nodes (actual leaves, or nodes whose dimensions
    /// are both below twice `max_resolution`) hold the plain elementwise
    /// mean over the items beneath them, while larger internal nodes hold
    /// the count-weighted elementwise mean of their children's vectors.
    /// Nodes whose dimensions are both below `max_resolution` are skipped
    /// entirely.
    pub fn local_values<F>(
        &self,
        values_fn: F,
        max_resolution: Option<f64>,
    ) -> BTreeMap<ExtentKey, Vec<f64>>
    where
        F: Fn(&I) -> Vec<f64>,
    {
        let mut out = BTreeMap::new();
        self.local_values_at(NodeId::ROOT, self.extent(), &values_fn, max_resolution, &mut out);
        out
    }

    /// Recursive helper: returns the node's aggregated vector and item
    /// count, or `None` when the node is empty or pruned.
    fn local_values_at<F>(
        &self,
        id: NodeId,
        extent: Rect,
        values_fn: &F,
        max_resolution: Option<f64>,
        out: &mut BTreeMap<ExtentKey, Vec<f64>>,
    ) -> Option<(Vec<f64>, usize)>
    where
        F: Fn(&I) -> Vec<f64>,
    {
        if max_resolution.is_some_and(|mr| extent.width() < mr && extent.height() < mr) {
            return None;
        }
        let leaf_like = max_resolution
            .is_some_and(|mr| extent.width() < 2.0 * mr && extent.height() < 2.0 * mr);

        let aggregated = match &self.node(id).kind {
            NodeKind::Empty => return None,
            NodeKind::Leaf(_) => mean_over_items(self.node_items(id), values_fn),
            NodeKind::Internal(_) if leaf_like => {
                // Too small to report children separately; fold the whole
                // subtree into one unweighted mean.
                let items = self.subtree_items(id);
                mean_over_items(&items, |item| values_fn(item))
            }
            NodeKind::Internal(children) => {
                let children = *children;
                let mut sum: Option<Vec<f64>> = None;
                let mut total = 0_usize;
                for (qi, child) in children.iter().enumerate() {
                    let Some(child) = child else { continue };
                    let sub = geom::sub_extent(extent, Quadrant::ALL[qi]);
                    let Some((values, count)) =
                        self.local_values_at(*child, sub, values_fn, max_resolution, out)
                    else {
                        continue;
                    };
                    match &mut sum {
                        None => {
                            sum = Some(
                                values.iter().map(|v| v * count as f64).collect(),
                            );
                        }
                        Some(sum) => {
                            debug_assert_eq!(sum.len(), values.len());
                            for (s, v) in sum.iter_mut().zip(&values) {
                                *s += v * count as f64;
                            }
                        }
                    }
                    total += count;
                }
                let mut sum = sum?;
                for s in &mut sum {
                    *s /= total as f64;
                }
                (sum, total)
            }
        };

        out.insert(ExtentKey::from(extent), aggregated.0.clone());
        Some(aggregated)
    }
}

fn mean_over_items<T, F>(items: &[T], values_fn: F) -> (Vec<f64>, usize)
where
    F: Fn(&T) -> Vec<f64>,
{
    let mut iter = items.iter();
    let first = iter.next().expect("nonempty node holds at least one item");
    let mut sum = values_fn(first);
    for item in iter {
        let values = values_fn(item);
        debug_assert_eq!(sum.len(), values.len());
        for (s, v) in sum.iter_mut().zip(&values) {
            *s += v;
        }
    }
    for s in &mut sum {
        *s /= items.len() as f64;
    }
    (sum, items.len())
}
