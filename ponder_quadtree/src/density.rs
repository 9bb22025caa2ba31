// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlier-aware density estimation over the tree.
//!
//! [`QuadTree::density_areas`] makes two passes. The first walks the whole
//! tree bottom-up, caching per-node centroids and raw densities and
//! accumulating the normalization statistics: a global density max/min and
//! an online mean/variance (Welford) over the densities of leaf-like
//! nodes. The second walks top-down and emits one [`AreaRecord`] per
//! unpruned node, containing nodes strictly before their descendants so
//! callers can draw larger regions first.

use alloc::vec;
use alloc::vec::Vec;
use core::f64::consts::{PI, SQRT_2};
use kurbo::{Point, Rect};

use crate::tree::{NodeKind, QuadTree};
use crate::types::{Coords, NodeId};
use crate::visit::Visit;

/// Default number of standard deviations from the mean leaf density used
/// to trim the standard-density normalization bounds.
pub const DEFAULT_OUTLIER_ALLOWANCE: f64 = 3.0;

#[cfg(feature = "std")]
#[inline]
fn sqrt(x: f64) -> f64 {
    x.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
#[inline]
fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Options for [`QuadTree::density_areas`].
#[derive(Copy, Clone, Debug)]
pub struct DensityOptions {
    /// Nodes whose width and height are both below this are pruned; a node
    /// whose dimensions are both below twice this is reported as a leaf.
    pub max_resolution: Option<f64>,
    /// Seed for the global max/min density, establishing a floor on the
    /// normalization range even when the data is sparser.
    pub base_density: Option<f64>,
    /// Normalize `relative_density` against zero rather than against the
    /// observed minimum density.
    pub min_as_zero: bool,
    /// Standard deviations of leaf density kept inside the trimmed bounds.
    pub outlier_allowance: f64,
}

impl Default for DensityOptions {
    fn default() -> Self {
        Self {
            max_resolution: None,
            base_density: None,
            min_as_zero: false,
            outlier_allowance: DEFAULT_OUTLIER_ALLOWANCE,
        }
    }
}

/// One region of the tree with derived density statistics.
///
/// Ephemeral: regenerated on every call to [`QuadTree::density_areas`],
/// never stored in the tree.
#[derive(Clone, Debug)]
pub struct AreaRecord {
    /// The node's extent.
    pub extent: Rect,
    /// Raw density (items per unit area; see the module docs for the leaf
    /// estimate).
    pub density: f64,
    /// Density scaled into the observed min..max range (or 0..max with
    /// [`DensityOptions::min_as_zero`]).
    pub relative_density: f64,
    /// Density scaled into the outlier-trimmed bounds.
    pub standard_density: f64,
    /// Mean position of the items beneath the node.
    pub centroid: Point,
    /// Whether the node is an actual leaf, or was forced into leaf status
    /// by `max_resolution`.
    pub is_leaf: bool,
    /// The originating node.
    pub node: NodeId,
}

/// Online mean and variance (Welford's algorithm).
#[derive(Clone, Copy, Debug, Default)]
struct Welford {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 divisor), defined as 0 for fewer than two
    /// observations to keep downstream arithmetic finite.
    fn sample_variance(&self) -> f64 {
        if self.n <= 1 {
            0.0
        } else {
            self.m2 / (self.n - 1) as f64
        }
    }
}

struct Pass1 {
    centroids: Vec<Option<Point>>,
    densities: Vec<Option<f64>>,
    max_density: Option<f64>,
    min_density: Option<f64>,
    leaf_stats: Welford,
}

fn pruned(extent: Rect, max_resolution: Option<f64>) -> bool {
    max_resolution.is_some_and(|mr| extent.width() < mr && extent.height() < mr)
}

fn leaf_like(is_actual_leaf: bool, extent: Rect, max_resolution: Option<f64>) -> bool {
    is_actual_leaf
        || max_resolution
            .is_some_and(|mr| extent.width() < 2.0 * mr && extent.height() < 2.0 * mr)
}

impl<I, C: Coords<I>> QuadTree<I, C> {
    /// Estimate per-region densities across the tree.
    ///
    /// Returns one record per node not pruned by
    /// [`DensityOptions::max_resolution`], with containing (larger) nodes
    /// strictly before their descendants. An empty tree yields no records.
    pub fn density_areas(&self, options: DensityOptions) -> Vec<AreaRecord> {
        let mut acc = Pass1 {
            centroids: vec![None; self.node_slots()],
            densities: vec![None; self.node_slots()],
            max_density: options.base_density,
            min_density: options.base_density,
            leaf_stats: Welford::default(),
        };
        self.density_pass1(NodeId::ROOT, self.extent(), options.max_resolution, &mut acc);

        let mean = acc.leaf_stats.mean();
        let sd = sqrt(acc.leaf_stats.sample_variance());
        let allowance = options.outlier_allowance;
        let max_density = acc.max_density.unwrap_or(0.0);
        let min_density = acc.min_density.unwrap_or(0.0);
        let floor = if options.min_as_zero { 0.0 } else { min_density };
        let lower = (mean - allowance * sd).max(floor);
        let upper = (mean + allowance * sd).min(max_density);

        let mut out = Vec::new();
        self.visit(|id, extent| {
            let node = self.node(id);
            if matches!(node.kind, NodeKind::Empty) || pruned(extent, options.max_resolution) {
                return Visit::Prune;
            }
            let density = acc.densities[id.idx()]
                .expect("pass 1 computed a density for every unpruned node");
            let centroid = acc.centroids[id.idx()]
                .expect("pass 1 computed a centroid for every nonempty node");
            let relative_density = if options.min_as_zero {
                safe_ratio(density, max_density)
            } else {
                safe_ratio(density - min_density, max_density - min_density)
            };
            let standard_density = safe_ratio(density - lower, upper - lower);
            out.push(AreaRecord {
                extent,
                density,
                relative_density,
                standard_density,
                centroid,
                is_leaf: leaf_like(
                    matches!(node.kind, NodeKind::Leaf(_)),
                    extent,
                    options.max_resolution,
                ),
                node: id,
            });
            Visit::Continue
        });
        out
    }

    /// Bottom-up statistics pass: centroids for every node (pruning does
    /// not apply, since a forced leaf's centroid still comes from its
    /// descendants), densities and normalization stats for unpruned nodes.
    fn density_pass1(
        &self,
        id: NodeId,
        extent: Rect,
        max_resolution: Option<f64>,
        acc: &mut Pass1,
    ) {
        let is_actual_leaf = match &self.node(id).kind {
            NodeKind::Empty => return,
            NodeKind::Leaf(items) => {
                let mut sum = kurbo::Vec2::ZERO;
                for item in items {
                    sum += self.coords().point(item).to_vec2();
                }
                acc.centroids[id.idx()] = Some((sum / items.len() as f64).to_point());
                true
            }
            NodeKind::Internal(children) => {
                let children = *children;
                for (qi, child) in children.iter().enumerate() {
                    if let Some(child) = child {
                        let sub = crate::geom::sub_extent(extent, crate::geom::Quadrant::ALL[qi]);
                        self.density_pass1(*child, sub, max_resolution, acc);
                    }
                }
                let mut sum = kurbo::Vec2::ZERO;
                let mut total = 0_usize;
                for child in children.iter().flatten() {
                    if let Some(c) = acc.centroids[child.idx()] {
                        let count = self.node_count(*child);
                        sum += c.to_vec2() * count as f64;
                        total += count;
                    }
                }
                if total > 0 {
                    acc.centroids[id.idx()] = Some((sum / total as f64).to_point());
                }
                false
            }
        };

        if pruned(extent, max_resolution) {
            return;
        }
        let density = self.node_density(id, extent, &acc.centroids);
        acc.densities[id.idx()] = Some(density);
        acc.max_density = Some(acc.max_density.map_or(density, |m| m.max(density)));
        acc.min_density = Some(acc.min_density.map_or(density, |m| m.min(density)));
        if leaf_like(is_actual_leaf, extent, max_resolution) {
            acc.leaf_stats.push(density);
        }
    }

    /// Raw density of one node.
    ///
    /// Internal nodes use items per extent area. Leaves use the mean item
    /// distance `m` to the centroid: a leaf tighter than
    /// `sqrt(2) * resolution_limit` is treated as one resolution cell
    /// (`count / resolution_limit^2`), anything looser as a disc of radius
    /// `m` (`count / (2 * pi * m^2)`).
    fn node_density(&self, id: NodeId, extent: Rect, centroids: &[Option<Point>]) -> f64 {
        let count = self.node_count(id) as f64;
        match &self.node(id).kind {
            NodeKind::Leaf(items) => {
                let centroid = centroids[id.idx()].expect("leaf centroid was just computed");
                let mut mean_dist = 0.0;
                for item in items {
                    mean_dist += self.coords().point(item).distance(centroid);
                }
                mean_dist /= items.len() as f64;
                if mean_dist < SQRT_2 * self.resolution_limit() {
                    count / (self.resolution_limit() * self.resolution_limit())
                } else {
                    count / (2.0 * PI * mean_dist * mean_dist)
                }
            }
            _ => count / (extent.width() * extent.height()),
        }
    }
}

/// `a / b`, or 0 when the divisor is zero or not finite.
fn safe_ratio(a: f64, b: f64) -> f64 {
    if b.is_finite() && b != 0.0 { a / b } else { 0.0 }
}
