// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset widths for the bucket and stripe tables.
//!
//! Ranges into the reordered point array are stored as pairs of offsets of an
//! [`IndexWidth`] type. Narrow widths halve or quarter the table footprint, at
//! the cost of a lower point capacity. The capacity is checked when the index
//! is built; offsets are never truncated.

use core::fmt::Debug;
use core::ops::Range;

/// Unsigned integer type used to store offsets into the reordered point array.
///
/// `MAX` is both the largest point count and the largest per-axis cell count an
/// index with this width accepts.
pub trait IndexWidth: Copy + Debug + Eq + Ord + Send + Sync + 'static {
    /// Largest value representable by this width, as a `usize`.
    const MAX: usize;

    /// Convert from `usize`. Callers only pass values no greater than [`Self::MAX`].
    fn from_usize(n: usize) -> Self;

    /// Widen to `usize`.
    fn to_usize(self) -> usize;
}

impl IndexWidth for u16 {
    const MAX: usize = u16::MAX as usize;

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Values are bounded by `MAX` at construction."
    )]
    fn from_usize(n: usize) -> Self {
        debug_assert!(n <= <Self as IndexWidth>::MAX, "offset {n} exceeds u16");
        n as Self
    }

    #[inline]
    fn to_usize(self) -> usize {
        self.into()
    }
}

impl IndexWidth for u32 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Clamped to usize::MAX on 16-bit targets."
    )]
    const MAX: usize = if (u32::MAX as u64) > (usize::MAX as u64) {
        usize::MAX
    } else {
        u32::MAX as usize
    };

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Values are bounded by `MAX` at construction."
    )]
    fn from_usize(n: usize) -> Self {
        debug_assert!(n <= <Self as IndexWidth>::MAX, "offset {n} exceeds u32");
        n as Self
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Stored values never exceed `MAX`, which fits usize."
    )]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl IndexWidth for u64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Clamped to usize::MAX on 32-bit targets."
    )]
    const MAX: usize = if (u64::MAX as u128) > (usize::MAX as u128) {
        usize::MAX
    } else {
        u64::MAX as usize
    };

    #[inline]
    fn from_usize(n: usize) -> Self {
        n as Self
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Stored values never exceed `MAX`, which fits usize."
    )]
    fn to_usize(self) -> usize {
        self as usize
    }
}

impl IndexWidth for usize {
    const MAX: usize = usize::MAX;

    #[inline]
    fn from_usize(n: usize) -> Self {
        n
    }

    #[inline]
    fn to_usize(self) -> usize {
        self
    }
}

/// Half-open `[start, end)` range of offsets, stored at width `I`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Span<I> {
    pub(crate) start: I,
    pub(crate) end: I,
}

impl<I: IndexWidth> Span<I> {
    #[inline]
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Self {
            start: I::from_usize(start),
            end: I::from_usize(end),
        }
    }

    #[inline]
    pub(crate) fn range(self) -> Range<usize> {
        self.start.to_usize()..self.end.to_usize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_values() {
        assert_eq!(<u16 as IndexWidth>::MAX, 65_535);
        assert_eq!(<u32 as IndexWidth>::MAX, u32::MAX as usize);
        assert_eq!(<usize as IndexWidth>::MAX, usize::MAX);
    }

    #[test]
    fn span_round_trips_through_narrow_width() {
        let s = Span::<u16>::new(3, 65_535);
        assert_eq!(s.range(), 3..65_535);
        assert!(Span::<u16>::default().range().is_empty());
    }
}
