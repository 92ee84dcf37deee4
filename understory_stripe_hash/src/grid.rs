// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid sizing and counting-sort bucketing.
//!
//! Points are translated so the cloud's minimum corner sits at the origin, then
//! binned into cubic cells of side `cell_size`. Cell ids run with `x` fastest,
//! then `y`, then `z`, and the reordered point array follows the same order, so
//! the points of any run of x-adjacent cells are contiguous.

use alloc::vec;
use alloc::vec::Vec;

use crate::config::Config;
use crate::error::BuildError;
use crate::types::{Aabb3D, Point3, Scalar};
use crate::width::{IndexWidth, Span};

/// Number of cells along each axis.
///
/// Dimensions taken from a built index are always non-zero and their product
/// fits in `usize`. Values built by hand with [`Dims::new`] are not checked;
/// use [`Dims::checked_cell_count`] to validate them before doing cell math.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Dims {
    /// Cells along x.
    pub x: usize,
    /// Cells along y.
    pub y: usize,
    /// Cells along z.
    pub z: usize,
}

impl Dims {
    /// Create a new set of dimensions.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Total number of cells.
    ///
    /// # Panics
    ///
    /// Overflows if the product does not fit in `usize`: a panic in debug
    /// builds, a wrapped value in release builds.
    pub const fn cell_count(&self) -> usize {
        self.x * self.y * self.z
    }

    /// Total number of cells, or `None` if any axis is zero or the product
    /// overflows `usize`.
    pub const fn checked_cell_count(&self) -> Option<usize> {
        if self.x == 0 || self.y == 0 || self.z == 0 {
            return None;
        }
        match self.x.checked_mul(self.y) {
            Some(xy) => xy.checked_mul(self.z),
            None => None,
        }
    }

    /// Linear cell id of `(ix, iy, iz)`, with `x` varying fastest.
    ///
    /// Coordinates are not bounds-checked against the dimensions.
    #[inline]
    pub const fn cell_id(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.x * (iy + self.y * iz)
    }

    /// Inverse of [`Dims::cell_id`].
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is zero.
    pub const fn cell_coords(&self, id: usize) -> (usize, usize, usize) {
        let ix = id % self.x;
        let rest = id / self.x;
        (ix, rest % self.y, rest / self.y)
    }
}

/// Geometry of a sized grid: where it sits and how many cells it has.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct GridFrame<T> {
    pub(crate) dims: Dims,
    pub(crate) cell_size: T,
    /// Offset that moves the cloud's minimum corner to the origin.
    pub(crate) translation: Point3<T>,
    /// Translated extent of the cloud plus one cell on every axis.
    pub(crate) reach: Point3<T>,
    pub(crate) bounds: Option<Aabb3D<T>>,
}

impl<T: Scalar> GridFrame<T> {
    /// Size a grid around `points`.
    ///
    /// An empty cloud gets a single empty cell at the origin.
    pub(crate) fn fit<I: IndexWidth>(
        points: &[Point3<T>],
        config: &Config<T>,
    ) -> Result<Self, BuildError> {
        let cell_size = config.cell_size();
        if !(cell_size > T::ZERO && cell_size.is_finite()) {
            return Err(BuildError::InvalidCellSize {
                cell_size: cell_size.to_f64(),
            });
        }

        let capacity = config.capacity_for::<I>();
        if points.len() > capacity {
            return Err(BuildError::CapacityExceeded {
                len: points.len(),
                capacity,
            });
        }

        let bounds = cloud_bounds(points)?;
        let (translation, extent) = match bounds {
            Some(b) => (
                Point3::new(-b.min.x, -b.min.y, -b.min.z),
                b.max.translate(Point3::new(-b.min.x, -b.min.y, -b.min.z)),
            ),
            None => (Point3::splat(T::ZERO), Point3::splat(T::ZERO)),
        };

        // floor(extent / R) + 1 is ceil((extent + eps) / R) for an infinitesimal eps:
        // the farthest point lands strictly inside the last cell.
        let axis = |e: T| (e / cell_size).cell_index().checked_add(1);
        let dims = match (axis(extent.x), axis(extent.y), axis(extent.z)) {
            (Some(x), Some(y), Some(z)) => Dims::new(x, y, z),
            (x, y, z) => {
                let sat = |d: Option<usize>| d.unwrap_or(usize::MAX);
                return Err(BuildError::GridTooLarge {
                    dims: [sat(x), sat(y), sat(z)],
                    max_axis: I::MAX,
                    max_cells: config.max_cells(),
                });
            }
        };
        let fits_axes = dims.x <= I::MAX && dims.y <= I::MAX && dims.z <= I::MAX;
        let cells = dims.checked_cell_count();
        if !fits_axes || cells.is_none_or(|n| n > config.max_cells()) {
            return Err(BuildError::GridTooLarge {
                dims: [dims.x, dims.y, dims.z],
                max_axis: I::MAX,
                max_cells: config.max_cells(),
            });
        }

        Ok(Self {
            dims,
            cell_size,
            translation,
            reach: Point3::new(
                extent.x + cell_size,
                extent.y + cell_size,
                extent.z + cell_size,
            ),
            bounds,
        })
    }

    /// Cell coordinate along one axis of a translated, in-grid value.
    #[inline]
    pub(crate) fn axis_cell(&self, v: T, dim: usize) -> usize {
        (v / self.cell_size).cell_index().min(dim - 1)
    }

    /// Cell id of a translated point that lies inside the grid.
    #[inline]
    pub(crate) fn cell_of(&self, p: Point3<T>) -> usize {
        let d = self.dims;
        d.cell_id(
            self.axis_cell(p.x, d.x),
            self.axis_cell(p.y, d.y),
            self.axis_cell(p.z, d.z),
        )
    }
}

fn cloud_bounds<T: Scalar>(points: &[Point3<T>]) -> Result<Option<Aabb3D<T>>, BuildError> {
    let mut bounds: Option<Aabb3D<T>> = None;
    for (index, &p) in points.iter().enumerate() {
        if !p.is_finite() {
            return Err(BuildError::NonFinitePoint { index });
        }
        bounds = Some(match bounds {
            Some(b) => b.union_point(p),
            None => Aabb3D::from_point(p),
        });
    }
    Ok(bounds)
}

/// Points sorted by cell id, with the `[start, end)` range of every cell.
#[derive(Clone, Debug)]
pub(crate) struct Buckets<T, I> {
    pub(crate) points: Vec<Point3<T>>,
    pub(crate) ranges: Vec<Span<I>>,
}

/// Counting-sort `points` into the cells of `frame`.
///
/// Two passes over the input plus one prefix sum. Within a cell, points keep
/// their input order.
pub(crate) fn bucket_points<T: Scalar, I: IndexWidth>(
    frame: &GridFrame<T>,
    points: &[Point3<T>],
) -> Buckets<T, I> {
    let cell_count = frame.dims.cell_count();
    let mut counts = vec![0_usize; cell_count];
    for &p in points {
        counts[frame.cell_of(p.translate(frame.translation))] += 1;
    }

    // Prefix sum; `counts` becomes each cell's write cursor.
    let mut ranges = Vec::with_capacity(cell_count);
    let mut start = 0;
    for count in &mut counts {
        let end = start + *count;
        ranges.push(Span::new(start, end));
        *count = start;
        start = end;
    }

    let mut sorted = vec![Point3::splat(T::ZERO); points.len()];
    for &p in points {
        let local = p.translate(frame.translation);
        let cursor = &mut counts[frame.cell_of(local)];
        sorted[*cursor] = local;
        *cursor += 1;
    }

    Buckets {
        points: sorted,
        ranges,
    }
}
