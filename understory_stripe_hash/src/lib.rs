// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_stripe_hash --heading-base-level=0

//! Understory Stripe Hash: a static fixed-radius neighbor index for 3D point clouds.
//!
//! The index bins a fixed cloud into a uniform grid whose cell size equals the
//! query radius, so every neighbor of a query point lies in the 3×3×3 block of
//! cells around it. Query cost depends on how crowded that block is, not on the
//! size of the cloud.
//!
//! - Build once from a slice of points with [`StripeHash::build`].
//! - Count neighbors, test for clashes, or visit neighbors of any query point.
//! - Share the built index across threads; queries never mutate it.
//!
//! Points are stored in one flat array sorted by cell, with `x` varying fastest.
//! Each cell also records a *stripe*: the single range spanning itself and its
//! two x neighbors, which are adjacent in memory. A query therefore scans nine
//! contiguous slices rather than twenty-seven scattered buckets.
//!
//! # Example
//!
//! ```rust
//! use understory_stripe_hash::{Point3, StripeHash};
//!
//! let cloud = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(0.0, 0.0, 2.0),
//!     Point3::new(5.0, 5.0, 5.0),
//! ];
//! let idx = StripeHash::build(&cloud, 2.5).unwrap();
//!
//! assert_eq!(idx.count_neighbors(Point3::new(0.0, 0.0, 1.0)), 2);
//! assert!(idx.has_clash(Point3::new(0.0, 0.0, 0.0)));
//!
//! let mut d2s = Vec::new();
//! idx.visit(Point3::new(0.0, 0.0, 1.0), |_, _, d2| d2s.push(d2));
//! assert_eq!(d2s, [1.0, 1.0]);
//! ```
//!
//! ## Radius semantics
//!
//! The radius of every query is the cell size chosen at build time.
//! [`count_neighbors`](StripeHashGeneric::count_neighbors),
//! [`visit`](StripeHashGeneric::visit) and
//! [`neighbors`](StripeHashGeneric::neighbors) include points at exactly that
//! distance; [`has_clash`](StripeHashGeneric::has_clash) does not.
//! [`visit_lax`](StripeHashGeneric::visit_lax) skips the distance test and
//! reports every candidate in the swept cells.
//!
//! Visitors receive coordinates in the grid frame, which is the input frame
//! shifted by [`translation`](StripeHashGeneric::translation).
//!
//! ## Choosing an offset width
//!
//! - [`StripeHash`] (`u32` offsets): the default.
//! - [`StripeHash16`] (`u16` offsets): up to 65 535 points with half-size tables.
//! - [`StripeHashGeneric`] with `u64` or `usize` for clouds beyond `u32::MAX`.
//!
//! A [`Config`] can lower the capacity further. Building from more points than
//! the capacity fails with [`BuildError::CapacityExceeded`]; nothing is dropped.
//!
//! ### Float semantics
//!
//! Input points must be finite. Query points may be anything: NaN or far-away
//! queries simply have no neighbors.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod grid;
pub mod index;
pub mod linear;
pub mod query;
mod stripe;
pub mod types;
pub mod width;

pub use config::Config;
pub use error::BuildError;
pub use grid::Dims;
pub use index::{StripeHash, StripeHash16, StripeHashGeneric};
pub use linear::LinearScan;
pub use query::NeighborQuery;
pub use types::{Aabb3D, Point3, Scalar};
pub use width::IndexWidth;
