// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pure geometry helpers over axis-aligned extents and quadrant indices.
//!
//! All boundary comparisons here are closed: a point on any edge of an
//! extent counts as inside it. This differs from [`Rect::contains`], which
//! treats the maximum edges as exclusive, so the tree uses these helpers
//! exclusively.

use alloc::vec::Vec;
use kurbo::Rect;

/// One of the four sub-boxes of an extent.
///
/// The enumeration is fixed and independent of any screen-coordinate
/// convention: quadrant 0 is the low-x/low-y corner, 1 is high-x/low-y,
/// 2 is low-x/high-y, and 3 is high-x/high-y.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    /// Low x, low y (index 0).
    LowLow = 0,
    /// High x, low y (index 1).
    HighLow = 1,
    /// Low x, high y (index 2).
    LowHigh = 2,
    /// High x, high y (index 3).
    HighHigh = 3,
}

impl Quadrant {
    /// All four quadrants in ascending index order.
    pub const ALL: [Self; 4] = [Self::LowLow, Self::HighLow, Self::LowHigh, Self::HighHigh];

    /// The quadrant's index, 0 through 3.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub(crate) const fn from_index(i: usize) -> Self {
        Self::ALL[i]
    }
}

/// Midpoint of an extent, computed as `min + (max - min) / 2` on each axis.
///
/// The subdivision arithmetic in [`sub_extent`] uses the same formula, so
/// quadrant classification and child extents agree bit-for-bit.
#[inline]
fn midpoint(extent: Rect) -> (f64, f64) {
    (
        extent.x0 + (extent.x1 - extent.x0) / 2.0,
        extent.y0 + (extent.y1 - extent.y0) / 2.0,
    )
}

/// Whether `(x, y)` lies within the closed box, boundary inclusive on all
/// four sides.
#[inline]
pub fn contains(extent: Rect, x: f64, y: f64) -> bool {
    x >= extent.x0 && x <= extent.x1 && y >= extent.y0 && y <= extent.y1
}

/// Whether `sub` is entirely contained in `extent`, boundary inclusive.
#[inline]
pub fn envelops(extent: Rect, sub: Rect) -> bool {
    extent.x0 <= sub.x0 && extent.y0 <= sub.y0 && extent.x1 >= sub.x1 && extent.y1 >= sub.y1
}

/// The quadrant of `extent` containing `(x, y)`.
///
/// Points exactly on a midline land on the high-index side. Points outside
/// the extent are classified as if clamped to the nearest edge; callers
/// that care must bounds-check separately.
#[inline]
pub fn quadrant_of(extent: Rect, x: f64, y: f64) -> Quadrant {
    let (mx, my) = midpoint(extent);
    let high_x = usize::from(x >= mx);
    let high_y = usize::from(y >= my);
    Quadrant::from_index(high_x + 2 * high_y)
}

/// The quadrants of `extent` whose sub-box overlaps `region`, in ascending
/// index order without duplicates.
///
/// Comparisons are closed-interval: a region that only touches a midline
/// still overlaps both sides of it. Returns an empty list when `region`
/// does not overlap `extent` at all.
pub fn touched_quadrants(extent: Rect, region: Rect) -> Vec<Quadrant> {
    if region.x1 < extent.x0
        || region.y1 < extent.y0
        || region.x0 > extent.x1
        || region.y0 > extent.y1
    {
        return Vec::new();
    }
    let (mx, my) = midpoint(extent);
    let low_x = region.x0 <= mx;
    let high_x = region.x1 >= mx;
    let low_y = region.y0 <= my;
    let high_y = region.y1 >= my;
    let mut out = Vec::with_capacity(4);
    if low_x && low_y {
        out.push(Quadrant::LowLow);
    }
    if high_x && low_y {
        out.push(Quadrant::HighLow);
    }
    if low_x && high_y {
        out.push(Quadrant::LowHigh);
    }
    if high_x && high_y {
        out.push(Quadrant::HighHigh);
    }
    out
}

/// The exact sub-box of `extent` for the given quadrant.
pub fn sub_extent(extent: Rect, quadrant: Quadrant) -> Rect {
    let (mx, my) = midpoint(extent);
    match quadrant {
        Quadrant::LowLow => Rect::new(extent.x0, extent.y0, mx, my),
        Quadrant::HighLow => Rect::new(mx, extent.y0, extent.x1, my),
        Quadrant::LowHigh => Rect::new(extent.x0, my, mx, extent.y1),
        Quadrant::HighHigh => Rect::new(mx, my, extent.x1, extent.y1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    #[test]
    fn contains_is_boundary_inclusive() {
        assert!(contains(UNIT, 0.5, 0.5));
        assert!(contains(UNIT, 0.0, 0.0));
        assert!(contains(UNIT, 0.0, 0.5));
        assert!(contains(UNIT, 1.0, 1.0));
        assert!(!contains(UNIT, 1.5, 0.5));
        assert!(!contains(UNIT, 1.0, 1.5));
        assert!(!contains(UNIT, 8.0, 8.0));
    }

    #[test]
    fn envelops_closed_comparisons() {
        assert!(envelops(UNIT, UNIT));
        assert!(envelops(UNIT, Rect::new(0.5, 0.5, 0.75, 0.75)));
        assert!(!envelops(UNIT, Rect::new(0.5, 0.5, 1.5, 1.5)));
        let shifted = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(!envelops(shifted, Rect::new(0.5, 0.5, 0.75, 0.75)));
        assert!(!envelops(shifted, Rect::new(0.5, 0.5, 1.5, 1.5)));
        assert!(envelops(shifted, Rect::new(1.1, 1.1, 1.9, 1.9)));
        assert!(envelops(shifted, Rect::new(1.9, 1.1, 1.95, 1.15)));
    }

    #[test]
    fn envelops_iff_all_corners_contained() {
        let outer = Rect::new(0.25, 0.25, 3.0, 2.0);
        let candidates = [
            Rect::new(0.25, 0.25, 3.0, 2.0),
            Rect::new(0.5, 0.5, 1.0, 1.0),
            Rect::new(0.0, 0.5, 1.0, 1.0),
            Rect::new(0.5, 0.5, 4.0, 1.0),
            Rect::new(2.9, 1.9, 3.0, 2.0),
        ];
        for sub in candidates {
            let corners = contains(outer, sub.x0, sub.y0)
                && contains(outer, sub.x1, sub.y0)
                && contains(outer, sub.x0, sub.y1)
                && contains(outer, sub.x1, sub.y1);
            assert_eq!(envelops(outer, sub), corners, "mismatch for {sub:?}");
        }
    }

    #[test]
    fn quadrant_of_corners_and_midlines() {
        assert_eq!(quadrant_of(UNIT, 0.0, 0.0), Quadrant::LowLow);
        assert_eq!(quadrant_of(UNIT, 1.0, 0.0), Quadrant::HighLow);
        assert_eq!(quadrant_of(UNIT, 0.0, 1.0), Quadrant::LowHigh);
        assert_eq!(quadrant_of(UNIT, 1.0, 1.0), Quadrant::HighHigh);
        assert_eq!(quadrant_of(UNIT, 0.25, 0.25), Quadrant::LowLow);
        assert_eq!(quadrant_of(UNIT, 0.75, 0.25), Quadrant::HighLow);
        assert_eq!(quadrant_of(UNIT, 0.25, 0.75), Quadrant::LowHigh);
        assert_eq!(quadrant_of(UNIT, 0.75, 0.75), Quadrant::HighHigh);
        // Midlines go to the high side.
        assert_eq!(quadrant_of(UNIT, 0.5, 0.25), Quadrant::HighLow);
        assert_eq!(quadrant_of(UNIT, 0.25, 0.5), Quadrant::LowHigh);
        assert_eq!(quadrant_of(UNIT, 0.5, 0.5), Quadrant::HighHigh);
    }

    #[test]
    fn quadrant_of_clamps_outside_points() {
        assert_eq!(quadrant_of(UNIT, -1.0, 0.0), Quadrant::LowLow);
        assert_eq!(quadrant_of(UNIT, 0.25, -1.0), Quadrant::LowLow);
        assert_eq!(quadrant_of(UNIT, 0.75, -1.0), Quadrant::HighLow);
        assert_eq!(quadrant_of(UNIT, 1.75, 0.25), Quadrant::HighLow);
        assert_eq!(quadrant_of(UNIT, -1.0, 0.75), Quadrant::LowHigh);
        assert_eq!(quadrant_of(UNIT, 0.25, 1.5), Quadrant::LowHigh);
        assert_eq!(quadrant_of(UNIT, 1.25, 0.75), Quadrant::HighHigh);
        assert_eq!(quadrant_of(UNIT, 1.5, 1.5), Quadrant::HighHigh);
    }

    #[test]
    fn touched_quadrants_ordering_and_overlap() {
        use Quadrant::*;
        let tq = |r: Rect| touched_quadrants(UNIT, r);
        assert_eq!(tq(Rect::new(0.0, 0.0, 0.25, 0.25)), vec![LowLow]);
        assert_eq!(tq(Rect::new(0.0, 0.0, 0.75, 0.25)), vec![LowLow, HighLow]);
        assert_eq!(tq(Rect::new(0.0, 0.0, 0.25, 0.75)), vec![LowLow, LowHigh]);
        assert_eq!(tq(Rect::new(0.0, 0.0, 0.75, 0.75)), Quadrant::ALL.to_vec());
        // A sliver straddling the vertical midline touches all four.
        assert_eq!(tq(Rect::new(0.5, 0.0, 0.75, 0.5)), Quadrant::ALL.to_vec());
        assert_eq!(tq(Rect::new(0.6, 0.0, 0.75, 0.6)), vec![HighLow, HighHigh]);
        assert_eq!(tq(Rect::new(0.5, 0.0, 0.75, 0.25)), vec![LowLow, HighLow]);
        assert_eq!(tq(Rect::new(0.6, 0.0, 0.75, 0.25)), vec![HighLow]);
        // Touching only the shared corner still overlaps.
        assert_eq!(tq(Rect::new(1.0, 1.0, 2.0, 2.0)), vec![HighHigh]);
        assert_eq!(tq(Rect::new(-1.0, -1.0, 2.0, 2.0)), Quadrant::ALL.to_vec());
    }

    #[test]
    fn touched_quadrants_disjoint_region_is_empty() {
        assert!(touched_quadrants(UNIT, Rect::new(1.5, 1.5, 2.0, 2.0)).is_empty());
        assert!(touched_quadrants(UNIT, Rect::new(-1.0, -1.0, -0.5, -0.5)).is_empty());
        assert!(touched_quadrants(UNIT, Rect::new(0.25, -0.5, 0.75, -0.25)).is_empty());
        assert!(touched_quadrants(UNIT, Rect::new(0.25, 1.5, 0.75, 2.0)).is_empty());
    }

    #[test]
    fn sub_extent_quarters() {
        assert_eq!(sub_extent(UNIT, Quadrant::LowLow), Rect::new(0.0, 0.0, 0.5, 0.5));
        assert_eq!(sub_extent(UNIT, Quadrant::HighLow), Rect::new(0.5, 0.0, 1.0, 0.5));
        assert_eq!(sub_extent(UNIT, Quadrant::LowHigh), Rect::new(0.0, 0.5, 0.5, 1.0));
        assert_eq!(sub_extent(UNIT, Quadrant::HighHigh), Rect::new(0.5, 0.5, 1.0, 1.0));

        let off = Rect::new(0.2, 0.2, 1.4, 1.4);
        let hl = sub_extent(off, Quadrant::HighLow);
        assert!((hl.x0 - 0.8).abs() < 1e-12);
        assert!((hl.y1 - 0.8).abs() < 1e-12);
        assert_eq!(hl.x1, 1.4);
        assert_eq!(hl.y0, 0.2);
    }

    #[test]
    fn sub_extents_tile_the_parent() {
        let extent = Rect::new(-3.0, 1.0, 5.0, 9.5);
        let (mx, my) = (
            extent.x0 + (extent.x1 - extent.x0) / 2.0,
            extent.y0 + (extent.y1 - extent.y0) / 2.0,
        );
        for q in Quadrant::ALL {
            let s = sub_extent(extent, q);
            // Each child shares the parent midpoint on both axes.
            assert!(s.x0 == extent.x0 || s.x0 == mx);
            assert!(s.x1 == mx || s.x1 == extent.x1);
            assert!(s.y0 == extent.y0 || s.y0 == my);
            assert!(s.y1 == my || s.y1 == extent.y1);
            assert_eq!(quadrant_of(extent, s.center().x, s.center().y), q);
        }
    }
}
