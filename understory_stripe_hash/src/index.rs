// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable stripe hash and its construction.

use alloc::boxed::Box;
use core::fmt::Debug;
use core::ops::Range;

use crate::config::Config;
use crate::error::BuildError;
use crate::grid::{Buckets, Dims, GridFrame, bucket_points};
use crate::stripe;
use crate::types::{Aabb3D, Point3, Scalar};
use crate::width::{IndexWidth, Span};

/// A static fixed-radius neighbor index over a 3D point cloud.
///
/// `T` is the coordinate scalar and `I` the integer width used to store offsets
/// into the reordered point array, which bounds the point capacity. Most code
/// uses the [`StripeHash`] alias (`u32` offsets).
///
/// The index is built once and never changes. Queries take `&self` only, so a
/// built index can be shared freely between threads.
pub struct StripeHashGeneric<T: Scalar, I: IndexWidth> {
    pub(crate) frame: GridFrame<T>,
    pub(crate) cell_size_squared: T,
    /// Translated points sorted by cell id.
    pub(crate) points: Box<[Point3<T>]>,
    pub(crate) buckets: Box<[Span<I>]>,
    pub(crate) stripes: Box<[Span<I>]>,
}

/// Stripe hash with 32-bit offsets.
pub type StripeHash<T> = StripeHashGeneric<T, u32>;

/// Stripe hash with 16-bit offsets: at most 65 535 points, compact tables.
pub type StripeHash16<T> = StripeHashGeneric<T, u16>;

impl<T: Scalar, I: IndexWidth> StripeHashGeneric<T, I> {
    /// Build an index whose cells, and query radius, are `cell_size`.
    ///
    /// The point capacity is the largest value `I` can hold.
    pub fn build(points: &[Point3<T>], cell_size: T) -> Result<Self, BuildError> {
        Self::build_with(points, Config::new(cell_size))
    }

    /// Build an index with explicit configuration.
    ///
    /// # Errors
    ///
    /// - [`BuildError::InvalidCellSize`] if the cell size is not finite and positive.
    /// - [`BuildError::CapacityExceeded`] if there are more points than the capacity.
    /// - [`BuildError::NonFinitePoint`] if a coordinate is NaN or infinite.
    /// - [`BuildError::GridTooLarge`] if the grid would exceed the width or cell cap.
    pub fn build_with(points: &[Point3<T>], config: Config<T>) -> Result<Self, BuildError> {
        let frame = GridFrame::fit::<I>(points, &config).inspect_err(|err| {
            tracing::debug!(points = points.len(), error = %err, "stripe hash build rejected");
        })?;
        let Buckets { points, ranges } = bucket_points::<T, I>(&frame, points);
        let stripes = stripe::encode(frame.dims, &ranges);
        tracing::debug!(
            points = points.len(),
            dims = ?frame.dims,
            cell_size = ?frame.cell_size,
            "built stripe hash"
        );
        Ok(Self {
            cell_size_squared: frame.cell_size * frame.cell_size,
            frame,
            points: points.into_boxed_slice(),
            buckets: ranges.into_boxed_slice(),
            stripes,
        })
    }

    /// Number of indexed points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cell side length, which is also the query radius.
    pub fn cell_size(&self) -> T {
        self.frame.cell_size
    }

    /// Square of [`Self::cell_size`].
    pub fn cell_size_squared(&self) -> T {
        self.cell_size_squared
    }

    /// Cells per axis.
    pub fn dims(&self) -> Dims {
        self.frame.dims
    }

    /// Offset added to input coordinates to reach the grid frame.
    pub fn translation(&self) -> Point3<T> {
        self.frame.translation
    }

    /// Bounding box of the input cloud, or `None` if it was empty.
    pub fn bounds(&self) -> Option<Aabb3D<T>> {
        self.frame.bounds
    }

    /// Map an input-space point into the grid frame used by stored points.
    #[inline]
    pub fn to_grid_frame(&self, p: Point3<T>) -> Point3<T> {
        p.translate(self.frame.translation)
    }

    /// Stored points, in the grid frame, in cell order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = Point3<T>> + '_ {
        self.points.iter().copied()
    }

    /// Offsets of the points whose home cell is `(ix, iy, iz)`.
    ///
    /// Returns `None` outside the grid.
    pub fn bucket_range(&self, ix: usize, iy: usize, iz: usize) -> Option<Range<usize>> {
        self.cell(ix, iy, iz).map(|c| self.buckets[c].range())
    }

    /// Offsets covered by the stripe of `(ix, iy, iz)`: its bucket and its x neighbors'.
    ///
    /// Returns `None` outside the grid.
    pub fn stripe_range(&self, ix: usize, iy: usize, iz: usize) -> Option<Range<usize>> {
        self.cell(ix, iy, iz).map(|c| self.stripes[c].range())
    }

    fn cell(&self, ix: usize, iy: usize, iz: usize) -> Option<usize> {
        let d = self.frame.dims;
        (ix < d.x && iy < d.y && iz < d.z).then(|| d.cell_id(ix, iy, iz))
    }

    /// Check the structural invariants of the built tables.
    ///
    /// Buckets must partition the point array in cell order, every point must
    /// sit in the bucket of its own cell, and every stripe must equal the merge
    /// of its three x-adjacent buckets.
    pub fn check_layout(&self) -> bool {
        let mut next = 0;
        for (cell, span) in self.buckets.iter().enumerate() {
            let r = span.range();
            if r.start != next || r.end < r.start {
                return false;
            }
            if self.points[r.clone()]
                .iter()
                .any(|&p| self.frame.cell_of(p) != cell)
            {
                return false;
            }
            next = r.end;
        }
        if next != self.points.len() {
            return false;
        }
        let d = self.frame.dims;
        (0..d.cell_count()).all(|cell| {
            let (ix, iy, iz) = d.cell_coords(cell);
            let lo = self.buckets[d.cell_id(ix.saturating_sub(1), iy, iz)];
            let hi = self.buckets[d.cell_id((ix + 1).min(d.x - 1), iy, iz)];
            self.stripes[cell] == Span { start: lo.start, end: hi.end }
        })
    }
}

impl<T: Scalar, I: IndexWidth> Debug for StripeHashGeneric<T, I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.buckets.iter().filter(|s| s.start != s.end).count();
        f.debug_struct("StripeHashGeneric")
            .field("cell_size", &self.frame.cell_size)
            .field("dims", &self.frame.dims)
            .field("translation", &self.frame.translation)
            .field("points", &self.points.len())
            .field("occupied_cells", &occupied)
            .finish_non_exhaustive()
    }
}
