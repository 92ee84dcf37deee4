// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stripe encoding: merge each cell's range with its x neighbors.
//!
//! Because the reordered points run with `x` fastest, cells `ix - 1`, `ix` and
//! `ix + 1` of one `(iy, iz)` row are stored back to back. A stripe is the
//! single range covering all three, so a query scans one contiguous slice per
//! `(iy, iz)` pair instead of three.

use alloc::boxed::Box;

use crate::grid::Dims;
use crate::width::{IndexWidth, Span};

/// Build the stripe table for `buckets`, one entry per cell.
///
/// Entry `(ix, iy, iz)` spans from the start of bucket `max(ix - 1, 0)` to the
/// end of bucket `min(ix + 1, xdim - 1)` in the same row.
pub(crate) fn encode<I: IndexWidth>(dims: Dims, buckets: &[Span<I>]) -> Box<[Span<I>]> {
    debug_assert_eq!(buckets.len(), dims.cell_count(), "one bucket per cell");
    buckets
        .chunks_exact(dims.x)
        .flat_map(|row| {
            let last = row.len() - 1;
            (0..row.len()).map(move |ix| Span {
                start: row[ix.saturating_sub(1)].start,
                end: row[(ix + 1).min(last)].end,
            })
        })
        .collect()
}
