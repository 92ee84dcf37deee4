// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-radius queries.
//!
//! Every query follows the same sweep. The query point is moved into the grid
//! frame and rejected outright if it lies more than one cell outside the grid.
//! Otherwise its home column `ix` is clamped into the grid, and for each `iy`
//! and `iz` within one cell of home the stripe of `(ix, iy, iz)` is scanned as
//! one contiguous slice. The x neighbors come for free from the stripe, so only
//! y and z are walked.
//!
//! The radius is always the index's cell size. Neighbors are points at squared
//! distance `<= r²`; clashes are points at squared distance strictly `< r²`. A
//! stored point equal to the query point is reported like any other.
//!
//! The `*_in_grid_frame` variants skip the translation step, for queries that
//! already live in the grid frame such as the index's own stored points.

use core::ops::Range;

use crate::index::StripeHashGeneric;
use crate::types::{Point3, Scalar};
use crate::width::IndexWidth;

/// Fixed-radius neighbor queries shared by the stripe hash and the linear scan.
pub trait NeighborQuery<T: Scalar> {
    /// Number of indexed points.
    fn point_count(&self) -> usize;

    /// Count points within the radius of `q` (boundary inclusive).
    fn count_neighbors(&self, q: Point3<T>) -> usize;

    /// Whether any point lies strictly inside the radius of `q`.
    fn has_clash(&self, q: Point3<T>) -> bool;

    /// Call `visitor(q, p, d²)` for every point `p` within the radius of `q`.
    fn visit<F: FnMut(Point3<T>, Point3<T>, T)>(&self, q: Point3<T>, visitor: F);
}

/// The y/z windows swept around a home column.
#[derive(Clone, Debug)]
struct Sweep {
    ix: usize,
    ys: Range<usize>,
    zs: Range<usize>,
}

#[inline]
fn window(home: usize, dim: usize) -> Range<usize> {
    home.saturating_sub(1)..home.saturating_add(2).min(dim)
}

impl<T: Scalar, I: IndexWidth> StripeHashGeneric<T, I> {
    fn sweep(&self, q: Point3<T>) -> Option<Sweep> {
        let r = self.frame.cell_size;
        let reach = self.frame.reach;
        let near = |v: T, hi: T| v >= -r && v <= hi;
        if !(near(q.x, reach.x) && near(q.y, reach.y) && near(q.z, reach.z)) {
            return None;
        }
        let home = |v: T| {
            if v < T::ZERO {
                0
            } else {
                (v / r).cell_index()
            }
        };
        let d = self.frame.dims;
        Some(Sweep {
            ix: home(q.x).min(d.x - 1),
            ys: window(home(q.y), d.y),
            zs: window(home(q.z), d.z),
        })
    }

    /// Stripes to scan for a grid-frame query point, in `iy`-major order.
    fn stripes_around(&self, q: Point3<T>) -> impl Iterator<Item = &[Point3<T>]> + '_ {
        let d = self.frame.dims;
        self.sweep(q)
            .into_iter()
            .flat_map(move |Sweep { ix, ys, zs }| {
                ys.flat_map(move |iy| zs.clone().map(move |iz| d.cell_id(ix, iy, iz)))
            })
            .map(move |cell| &self.points[self.stripes[cell].range()])
    }

    /// Count points within `cell_size` of `q` (boundary inclusive).
    pub fn count_neighbors(&self, q: Point3<T>) -> usize {
        self.count_neighbors_in_grid_frame(self.to_grid_frame(q))
    }

    /// [`Self::count_neighbors`] for a query already in the grid frame.
    ///
    /// Use this with points taken from [`Self::points`] or passed to a visitor;
    /// they are translated already and must not be translated again.
    pub fn count_neighbors_in_grid_frame(&self, q: Point3<T>) -> usize {
        let r2 = self.cell_size_squared;
        self.stripes_around(q)
            .map(|s| s.iter().filter(|&&p| q.distance_squared(p) <= r2).count())
            .sum()
    }

    /// Whether any point lies strictly closer than `cell_size` to `q`.
    ///
    /// A point at exactly `cell_size` counts as a neighbor but not as a clash.
    pub fn has_clash(&self, q: Point3<T>) -> bool {
        self.has_clash_in_grid_frame(self.to_grid_frame(q))
    }

    /// [`Self::has_clash`] for a query already in the grid frame.
    pub fn has_clash_in_grid_frame(&self, q: Point3<T>) -> bool {
        let r2 = self.cell_size_squared;
        self.stripes_around(q)
            .flatten()
            .any(|&p| q.distance_squared(p) < r2)
    }

    /// Call `visitor(q, p, d²)` for every point `p` within `cell_size` of `q`.
    ///
    /// Both points are passed in the grid frame (see [`Self::to_grid_frame`]).
    /// Order follows the internal layout and is the same on every call.
    pub fn visit<F: FnMut(Point3<T>, Point3<T>, T)>(&self, q: Point3<T>, mut visitor: F) {
        let q = self.to_grid_frame(q);
        let r2 = self.cell_size_squared;
        for stripe in self.stripes_around(q) {
            for &p in stripe {
                let d2 = q.distance_squared(p);
                if d2 <= r2 {
                    visitor(q, p, d2);
                }
            }
        }
    }

    /// Call `visitor(q, p)` for every point in the swept stripes, without a distance test.
    ///
    /// The candidates are a superset of what [`Self::visit`] reports, drawn only
    /// from the 3×3×3 block of cells around `q`. Useful when the caller applies
    /// its own, possibly batched, test.
    pub fn visit_lax<F: FnMut(Point3<T>, Point3<T>)>(&self, q: Point3<T>, mut visitor: F) {
        let q = self.to_grid_frame(q);
        for stripe in self.stripes_around(q) {
            for &p in stripe {
                visitor(q, p);
            }
        }
    }

    /// Iterate over `(p, d²)` for every point `p` within `cell_size` of `q`.
    ///
    /// Yields the same points in the same order as [`Self::visit`].
    pub fn neighbors(&self, q: Point3<T>) -> impl Iterator<Item = (Point3<T>, T)> + '_ {
        let q = self.to_grid_frame(q);
        let r2 = self.cell_size_squared;
        self.stripes_around(q).flatten().filter_map(move |&p| {
            let d2 = q.distance_squared(p);
            (d2 <= r2).then_some((p, d2))
        })
    }
}

impl<T: Scalar, I: IndexWidth> NeighborQuery<T> for StripeHashGeneric<T, I> {
    fn point_count(&self) -> usize {
        Self::point_count(self)
    }

    fn count_neighbors(&self, q: Point3<T>) -> usize {
        Self::count_neighbors(self, q)
    }

    fn has_clash(&self, q: Point3<T>) -> bool {
        Self::has_clash(self, q)
    }

    fn visit<F: FnMut(Point3<T>, Point3<T>, T)>(&self, q: Point3<T>, visitor: F) {
        Self::visit(self, q, visitor);
    }
}
