// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use core::cmp::Ordering;
use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// A point in 3D.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3<T> {
    /// X coordinate.
    pub x: T,
    /// Y coordinate.
    pub y: T,
    /// Z coordinate.
    pub z: T,
}

impl<T> Point3<T> {
    /// Create a new point.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T: Copy> Point3<T> {
    /// A point with all three coordinates set to `v`.
    pub const fn splat(v: T) -> Self {
        Self { x: v, y: v, z: v }
    }
}

impl<T: Scalar> Point3<T> {
    /// Offset this point by `t` along every axis.
    #[inline]
    pub fn translate(self, t: Self) -> Self {
        Self {
            x: self.x + t.x,
            y: self.y + t.y,
            z: self.z + t.z,
        }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> T {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    /// Whether all three coordinates are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<T> From<[T; 3]> for Point3<T> {
    fn from([x, y, z]: [T; 3]) -> Self {
        Self { x, y, z }
    }
}

impl<T> From<(T, T, T)> for Point3<T> {
    fn from((x, y, z): (T, T, T)) -> Self {
        Self { x, y, z }
    }
}

impl<T> From<Point3<T>> for [T; 3] {
    fn from(p: Point3<T>) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3D<T> {
    /// Minimum corner.
    pub min: Point3<T>,
    /// Maximum corner.
    pub max: Point3<T>,
}

impl<T> Aabb3D<T> {
    /// Create a new AABB from min/max corners.
    pub const fn new(min: Point3<T>, max: Point3<T>) -> Self {
        Self { min, max }
    }
}

impl<T: Copy + PartialOrd> Aabb3D<T> {
    /// A degenerate box holding a single point.
    pub const fn from_point(p: Point3<T>) -> Self {
        Self { min: p, max: p }
    }

    /// Smallest box containing both `self` and `p`.
    pub fn union_point(&self, p: Point3<T>) -> Self {
        Self {
            min: Point3::new(
                min_t(self.min.x, p.x),
                min_t(self.min.y, p.y),
                min_t(self.min.z, p.z),
            ),
            max: Point3::new(
                max_t(self.max.x, p.x),
                max_t(self.max.y, p.y),
                max_t(self.max.z, p.z),
            ),
        }
    }

    /// Whether this AABB contains the point (boundary inclusive).
    pub fn contains_point(&self, p: Point3<T>) -> bool {
        le(self.min.x, p.x)
            && le(self.min.y, p.y)
            && le(self.min.z, p.z)
            && le(p.x, self.max.x)
            && le(p.y, self.max.y)
            && le(p.z, self.max.z)
    }
}

impl<T: Scalar> Aabb3D<T> {
    /// Per-axis size of the box.
    pub fn extent(&self) -> Point3<T> {
        Point3::new(
            self.max.x - self.min.x,
            self.max.y - self.min.y,
            self.max.z - self.min.z,
        )
    }
}

/// Floating-point scalar abstraction for point coordinates.
///
/// Implemented for `f32` and `f64`. Only the operations the grid needs are
/// exposed: arithmetic through the `core::ops` traits, a finiteness test, and
/// a saturating conversion of a non-negative quotient into a cell coordinate.
pub trait Scalar:
    Copy
    + PartialOrd
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    /// Zero value for the scalar type.
    const ZERO: Self;

    /// Whether the value is neither NaN nor infinite.
    fn is_finite(self) -> bool;

    /// Floor of a non-negative value as a cell coordinate.
    ///
    /// Saturates at `usize::MAX`; negative and NaN inputs map to `0`.
    fn cell_index(self) -> usize;

    /// Lossless widening used for error reporting.
    fn to_f64(self) -> f64;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Float to usize casts saturate, which is the documented behavior."
    )]
    fn cell_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self.into()
    }
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;

    #[inline]
    fn is_finite(self) -> bool {
        Self::is_finite(self)
    }

    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "Float to usize casts saturate, which is the documented behavior."
    )]
    fn cell_index(self) -> usize {
        self as usize
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

pub(crate) fn min_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t<T: PartialOrd + Copy>(a: T, b: T) -> T {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le<T: PartialOrd>(a: T, b: T) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_index_floors_and_saturates() {
        assert_eq!(2.9_f64.cell_index(), 2);
        assert_eq!(0.0_f32.cell_index(), 0);
        assert_eq!(f64::NAN.cell_index(), 0);
        assert_eq!(1e300_f64.cell_index(), usize::MAX);
    }

    #[test]
    fn union_point_grows_box() {
        let b = Aabb3D::from_point(Point3::new(1.0, 2.0, 3.0))
            .union_point(Point3::new(-1.0, 5.0, 3.0));
        assert_eq!(b.min, Point3::new(-1.0, 2.0, 3.0));
        assert_eq!(b.max, Point3::new(1.0, 5.0, 3.0));
        assert_eq!(b.extent(), Point3::new(2.0, 3.0, 0.0));
        assert!(b.contains_point(Point3::new(0.0, 4.0, 3.0)));
        assert!(!b.contains_point(Point3::new(0.0, 4.0, f64::NAN)));
    }

    #[test]
    fn translate_matches_subtraction() {
        let p = Point3::new(0.3_f64, -7.25, 1e-9);
        let min = Point3::new(-2.1_f64, -8.0, 0.0);
        let t = Point3::new(-min.x, -min.y, -min.z);
        let q = p.translate(t);
        assert_eq!(q, Point3::new(p.x - min.x, p.y - min.y, p.z - min.z));
    }
}
