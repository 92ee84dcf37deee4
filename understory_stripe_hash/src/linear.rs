// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear scan with the same query contract as the stripe hash.
//!
//! Every query touches every point. It is the reference the stripe hash is
//! tested against and a baseline for benchmarks; for very small clouds it can
//! also be the faster choice.

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::query::NeighborQuery;
use crate::types::{Point3, Scalar};

/// Brute-force fixed-radius queries over a flat point list.
#[derive(Clone)]
pub struct LinearScan<T> {
    radius_squared: T,
    points: Vec<Point3<T>>,
}

impl<T: Scalar> LinearScan<T> {
    /// Take ownership of `points`; queries use `radius`.
    pub fn new(points: impl Into<Vec<Point3<T>>>, radius: T) -> Self {
        Self {
            radius_squared: radius * radius,
            points: points.into(),
        }
    }

    /// The stored points, in input order.
    pub fn points(&self) -> &[Point3<T>] {
        &self.points
    }
}

impl<T: Scalar> NeighborQuery<T> for LinearScan<T> {
    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn count_neighbors(&self, q: Point3<T>) -> usize {
        let r2 = self.radius_squared;
        self.points
            .iter()
            .filter(|&&p| q.distance_squared(p) <= r2)
            .count()
    }

    fn has_clash(&self, q: Point3<T>) -> bool {
        let r2 = self.radius_squared;
        self.points.iter().any(|&p| q.distance_squared(p) < r2)
    }

    fn visit<F: FnMut(Point3<T>, Point3<T>, T)>(&self, q: Point3<T>, mut visitor: F) {
        for &p in &self.points {
            let d2 = q.distance_squared(p);
            if d2 <= self.radius_squared {
                visitor(q, p, d2);
            }
        }
    }
}

impl<T: Scalar> Debug for LinearScan<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LinearScan")
            .field("radius_squared", &self.radius_squared)
            .field("points", &self.points.len())
            .finish_non_exhaustive()
    }
}
