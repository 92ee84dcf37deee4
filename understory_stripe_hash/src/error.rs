// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

/// Reasons a [`StripeHashGeneric`](crate::StripeHashGeneric) cannot be built.
///
/// Only construction can fail. Every query on a built index is total.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// More points than the configured capacity or the offset width can address.
    #[error("{len} points exceed the index capacity of {capacity}")]
    CapacityExceeded {
        /// Number of points handed to the builder.
        len: usize,
        /// Effective capacity: the smaller of the configured cap and the width's maximum.
        capacity: usize,
    },

    /// The cell size (which is also the query radius) is zero, negative, or not finite.
    #[error("cell size must be finite and strictly positive, got {cell_size}")]
    InvalidCellSize {
        /// The rejected cell size, widened to `f64`.
        cell_size: f64,
    },

    /// The grid needed to cover the cloud has too many cells.
    #[error("a {}x{}x{} grid exceeds the limit of {max_axis} cells per axis or {max_cells} cells total", dims[0], dims[1], dims[2])]
    GridTooLarge {
        /// Cells per axis the cloud would need, saturated at `usize::MAX`.
        dims: [usize; 3],
        /// Largest per-axis cell count the offset width accepts.
        max_axis: usize,
        /// Configured cap on the total cell count.
        max_cells: usize,
    },

    /// An input point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint {
        /// Position of the offending point in the input slice.
        index: usize,
    },
}
