// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build configuration.

use crate::width::IndexWidth;

/// Parameters for building a [`StripeHashGeneric`](crate::StripeHashGeneric).
///
/// ```rust
/// use understory_stripe_hash::{Config, Point3, StripeHash};
///
/// let cfg = Config::new(1.5_f32).with_capacity(2);
/// let pts = [Point3::new(0.0, 0.0, 0.0); 3];
/// assert!(StripeHash::build_with(&pts, cfg).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config<T> {
    cell_size: T,
    capacity: Option<usize>,
    max_cells: usize,
}

impl<T: Copy> Config<T> {
    /// A configuration with the given cell size and no extra capacity cap.
    ///
    /// The cell size is also the radius of every query against the built index.
    pub const fn new(cell_size: T) -> Self {
        Self {
            cell_size,
            capacity: None,
            max_cells: usize::MAX,
        }
    }

    /// Cap the number of points the index accepts.
    ///
    /// The effective capacity never exceeds what the offset width can address.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Cap the total number of grid cells.
    ///
    /// Unlimited by default, so only the offset width and `usize` bound the
    /// grid. Sparse clouds with a tiny cell size can need very large tables;
    /// a cap turns those into [`BuildError::GridTooLarge`] instead of an
    /// allocation.
    ///
    /// [`BuildError::GridTooLarge`]: crate::BuildError::GridTooLarge
    #[must_use]
    pub const fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Cell side length and query radius.
    pub const fn cell_size(&self) -> T {
        self.cell_size
    }

    /// Maximum total cell count.
    pub const fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Point capacity for offsets stored at width `I`.
    pub fn capacity_for<I: IndexWidth>(&self) -> usize {
        match self.capacity {
            Some(cap) => cap.min(I::MAX),
            None => I::MAX,
        }
    }
}
