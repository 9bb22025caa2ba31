// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Density map.
//!
//! Build a tree over clustered points, estimate per-region densities, and
//! render a coarse ASCII heat map from the standard densities.
//!
//! Run:
//! - `cargo run -p ponder_demos --example density_map`

use kurbo::{Point, Rect};
use ponder_quadtree::{DensityOptions, QuadTree};

const SIZE: f64 = 64.0;

fn main() {
    // A deterministic point cloud: two tight clusters over sparse noise.
    let mut points = Vec::new();
    let mut state = 0x2545_F491_4F6C_DD1D_u64;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        (state >> 11) as f64 / (1u64 << 53) as f64
    };
    for _ in 0..200 {
        points.push(Point::new(next() * SIZE, next() * SIZE));
    }
    for _ in 0..400 {
        points.push(Point::new(12.0 + next() * 6.0, 44.0 + next() * 6.0));
    }
    for _ in 0..400 {
        points.push(Point::new(44.0 + next() * 4.0, 14.0 + next() * 4.0));
    }

    let tree = QuadTree::build(
        points,
        Rect::new(0.0, 0.0, SIZE, SIZE),
        |p: &Point| *p,
        0.5,
    )
    .unwrap();

    let areas = tree.density_areas(DensityOptions {
        max_resolution: Some(2.0),
        ..Default::default()
    });
    println!("{} density records", areas.len());

    // Paint leaf records into a 32x32 character grid. Records arrive
    // containers-first, so later (smaller) regions overwrite earlier ones.
    let cells = 32usize;
    let cell = SIZE / cells as f64;
    let mut grid = vec![b' '; cells * cells];
    let shades = [b'.', b':', b'+', b'*', b'#'];
    for area in &areas {
        let shade = shades[((area.standard_density * 4.0) as usize).min(4)];
        let x0 = (area.extent.x0 / cell) as usize;
        let y0 = (area.extent.y0 / cell) as usize;
        let x1 = ((area.extent.x1 / cell) as usize).min(cells);
        let y1 = ((area.extent.y1 / cell) as usize).min(cells);
        for y in y0..y1 {
            for x in x0..x1 {
                grid[y * cells + x] = shade;
            }
        }
    }
    for row in grid.chunks(cells).rev() {
        println!("{}", core::str::from_utf8(row).unwrap());
    }
}
