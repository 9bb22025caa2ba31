// Copyright 2026 the Ponder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadtree basics.
//!
//! Build a small tree, run nearest-neighbor and range queries, and walk
//! the structure.
//!
//! Run:
//! - `cargo run -p ponder_demos --example quadtree_basics`

use kurbo::{Point, Rect};
use ponder_quadtree::{QuadTree, Visit};

fn main() {
    let cities = [
        ("Lighthouse", Point::new(12.0, 87.0)),
        ("Harborview", Point::new(15.0, 82.0)),
        ("Milltown", Point::new(64.0, 23.0)),
        ("Crossing", Point::new(58.0, 31.0)),
        ("Summit", Point::new(91.0, 95.0)),
    ];

    let tree = QuadTree::build(
        cities,
        Rect::new(0.0, 0.0, 100.0, 100.0),
        |c: &(&str, Point)| c.1,
        1.0,
    )
    .unwrap();
    println!("inserted {} items", tree.len());

    // Nearest neighbor to a probe point
    let ((name, pos), distance) = tree.nearest(60.0, 30.0, None).unwrap();
    println!("nearest to (60, 30): {name} at {pos:?}, distance {distance:.2}");

    // Everything in the northwest quarter
    let northwest = tree.in_region(Rect::new(0.0, 50.0, 50.0, 100.0));
    println!("in the northwest: {:?}", northwest.iter().map(|c| c.0).collect::<Vec<_>>());

    // Within 10 units of Milltown
    let nearby = tree.in_circle(64.0, 23.0, 10.0);
    println!("near Milltown: {:?}", nearby.iter().map(|c| c.0).collect::<Vec<_>>());

    // Walk the structure, printing occupied regions
    tree.visit(|id, extent| {
        println!(
            "node {id:?}: extent {extent:?}, {} item(s)",
            tree.node_count(id)
        );
        Visit::Continue
    });
}
