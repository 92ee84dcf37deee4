// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory Stripe Hash: build, count, clash-test, and visit.

use understory_stripe_hash::{Point3, StripeHash};

fn main() {
    let cloud = [
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(0.0, 0.0, 2.0),
        Point3::new(5.0, 5.0, 5.0),
    ];
    let idx = StripeHash::build(&cloud, 2.5).expect("valid cloud and cell size");
    println!("{idx:?}");

    let q = Point3::new(0.0, 0.0, 1.0);
    println!("neighbors of {q:?}: {}", idx.count_neighbors(q));
    println!("clash at origin: {}", idx.has_clash(Point3::new(0.0, 0.0, 0.0)));

    // Visitors see grid-frame coordinates; add back the min corner for input space.
    let t = idx.translation();
    idx.visit(q, |_, p, d2| {
        let input = Point3::new(p.x - t.x, p.y - t.y, p.z - t.z);
        println!("  {input:?} at squared distance {d2}");
    });
}
